//! Thread-safe shared handle over a bus
//!
//! Native hooks typically deliver key events on a dedicated thread while the
//! application mutates registries from its own threads. Every access goes
//! through one mutex, so registry updates and expression-buffer mutations
//! never tear.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::hotkey::{Hotkey, HotkeyListener};

use super::machine::HotkeyEventBus;

/// The seam a native hook integration drives. Mirrors the two raw
/// notifications the hook produces.
pub trait KeyEventHandler: Send + Sync {
    fn key_pressed(&self, keycode: i32);
    fn key_released(&self, keycode: i32);
}

/// A cloneable, lock-guarded handle to a [`HotkeyEventBus`].
///
/// Lifecycle: create the bus, wrap it, hand a clone to the hook integration,
/// and keep another clone for registry mutation. Dropping every clone
/// detaches the bus. Listener dispatch still happens synchronously on the
/// thread delivering the key event, with the lock held; a slow listener
/// stalls subsequent key processing.
#[derive(Clone)]
pub struct SharedHotkeyEventBus {
    inner: Arc<Mutex<HotkeyEventBus>>,
}

impl SharedHotkeyEventBus {
    pub fn new(bus: HotkeyEventBus) -> Self {
        Self {
            inner: Arc::new(Mutex::new(bus)),
        }
    }

    /// Locks the bus, recovering from a poisoned mutex; bus state stays
    /// consistent even if a listener panicked mid-dispatch.
    fn lock(&self) -> MutexGuard<'_, HotkeyEventBus> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn on_key_press(&self, keycode: i32) {
        self.lock().on_key_press(keycode);
    }

    pub fn on_key_release(&self, keycode: i32) {
        self.lock().on_key_release(keycode);
    }

    pub fn register_hotkey(&self, hotkey: Hotkey) -> bool {
        self.lock().register_hotkey(hotkey)
    }

    pub fn replace_hotkeys(&self, hotkeys: HashSet<Hotkey>) {
        self.lock().replace_hotkeys(hotkeys);
    }

    pub fn remove_hotkey(&self, hotkey: &Hotkey) -> bool {
        self.lock().remove_hotkey(hotkey)
    }

    pub fn register_hotkey_with_listener(&self, hotkey: Hotkey, listener: Arc<dyn HotkeyListener>) {
        self.lock().register_hotkey_with_listener(hotkey, listener);
    }

    pub fn remove_hotkey_with_listener(&self, hotkey: &Hotkey) -> bool {
        self.lock().remove_hotkey_with_listener(hotkey)
    }

    pub fn add_listener(&self, listener: Arc<dyn HotkeyListener>) -> bool {
        self.lock().add_listener(listener)
    }

    pub fn remove_listener(&self, listener: &Arc<dyn HotkeyListener>) -> bool {
        self.lock().remove_listener(listener)
    }

    pub fn registered_hotkeys(&self) -> HashSet<Hotkey> {
        self.lock().registered_hotkeys()
    }

    pub fn set_paused(&self, paused: bool) {
        self.lock().set_paused(paused);
    }

    pub fn is_paused(&self) -> bool {
        self.lock().is_paused()
    }

    /// Runs a closure with exclusive access to the underlying bus, for
    /// compound operations that must be atomic.
    pub fn with<R>(&self, f: impl FnOnce(&mut HotkeyEventBus) -> R) -> R {
        f(&mut self.lock())
    }
}

impl KeyEventHandler for SharedHotkeyEventBus {
    fn key_pressed(&self, keycode: i32) {
        self.on_key_press(keycode);
    }

    fn key_released(&self, keycode: i32) {
        self.on_key_release(keycode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hotkey::{CallbackListener, HotkeyEvent};
    use crate::keys::code;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn test_shared_handle_clones_share_state() {
        let shared = SharedHotkeyEventBus::new(HotkeyEventBus::new());
        let clone = shared.clone();

        shared.register_hotkey(Hotkey::new("open", code::CONTROL, code::ALT, code::O));
        assert_eq!(clone.registered_hotkeys().len(), 1);
    }

    #[test]
    fn test_hook_thread_drives_dispatch() {
        let shared = SharedHotkeyEventBus::new(HotkeyEventBus::new());
        let fired = Arc::new(AtomicUsize::new(0));

        let counter = fired.clone();
        shared.register_hotkey(Hotkey::new("open", code::CONTROL, code::ALT, code::O));
        shared.add_listener(Arc::new(CallbackListener::new(move |_: &HotkeyEvent| {
            counter.fetch_add(1, Ordering::SeqCst);
        })));

        let hook = shared.clone();
        let handle = thread::spawn(move || {
            hook.key_pressed(code::CONTROL);
            hook.key_pressed(code::ALT);
            hook.key_released(code::O);
        });
        handle.join().unwrap();

        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_with_gives_atomic_compound_access() {
        let shared = SharedHotkeyEventBus::new(HotkeyEventBus::new());

        let count = shared.with(|bus| {
            bus.register_hotkey(Hotkey::new("a", code::CONTROL, code::ALT, code::A));
            bus.register_hotkey(Hotkey::new("b", code::CONTROL, code::ALT, code::B));
            bus.registered_hotkeys().len()
        });

        assert_eq!(count, 2);
    }
}
