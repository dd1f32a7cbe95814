//! Fired-hotkey events and the listener capability
//!
//! A `HotkeyEvent` pairs the binding that fired with its dispatch timestamp.
//! Listeners are notified synchronously on the thread driving the bus; the
//! broadcast-sender adapter forwards events into async tasks.

use chrono::{DateTime, Local};
use tokio::sync::broadcast;

use super::binding::Hotkey;

/// A fired hotkey and the time it was dispatched.
///
/// Created once per successful match and handed to listener callbacks. The
/// event carries its own copy of the immutable binding; the bus keeps the
/// authoritative registry copy.
#[derive(Debug, Clone)]
pub struct HotkeyEvent {
    hotkey: Hotkey,
    dispatched_at: DateTime<Local>,
}

impl HotkeyEvent {
    /// Creates an event for the given binding, stamped with the current time.
    pub fn new(hotkey: Hotkey) -> Self {
        Self {
            hotkey,
            dispatched_at: Local::now(),
        }
    }

    /// The binding that fired.
    pub fn hotkey(&self) -> &Hotkey {
        &self.hotkey
    }

    /// When the event was dispatched.
    pub fn dispatched_at(&self) -> DateTime<Local> {
        self.dispatched_at
    }
}

/// Capability notified when a registered hotkey fires.
///
/// Invocation is synchronous on the thread delivering key events: a slow or
/// blocking implementation stalls processing of subsequent key events.
pub trait HotkeyListener: Send + Sync {
    fn on_hotkey_fired(&self, event: &HotkeyEvent);
}

/// Adapter wrapping a plain closure as a [`HotkeyListener`].
pub struct CallbackListener<F> {
    callback: F,
}

impl<F> CallbackListener<F>
where
    F: Fn(&HotkeyEvent) + Send + Sync,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> HotkeyListener for CallbackListener<F>
where
    F: Fn(&HotkeyEvent) + Send + Sync,
{
    fn on_hotkey_fired(&self, event: &HotkeyEvent) {
        (self.callback)(event);
    }
}

/// A broadcast sender doubles as a listener, forwarding every fired event
/// into the channel. A send error only means no receiver is currently
/// subscribed, which is a steady state, not a failure.
impl HotkeyListener for broadcast::Sender<HotkeyEvent> {
    fn on_hotkey_fired(&self, event: &HotkeyEvent) {
        let _ = self.send(event.clone());
    }
}
