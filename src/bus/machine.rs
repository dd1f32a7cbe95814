//! The hotkey event bus state machine
//!
//! Consumes raw key press/release events, tracks an in-progress expression of
//! at most two modifiers plus one primary key, matches completed expressions
//! against registered bindings, and fans fired events out to listeners.
//!
//! The expression buffer moves through EMPTY, ONE_MODIFIER, TWO_MODIFIERS and
//! a transient KEY_CAPTURED within a single release-event pass; only modifier
//! slots persist across calls, and the buffer is always reset back to EMPTY
//! after a match attempt, successful or not.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::hotkey::{Hotkey, HotkeyEvent, HotkeyListener};
use crate::keys::{self, EXPRESSION_LEN, INVALID_CODE};

/// Index of the first modifier in the expression buffer.
const MODIFIER_1: usize = 0;
/// Index of the second modifier in the expression buffer.
const MODIFIER_2: usize = 1;
/// Index of the primary key in the expression buffer.
const KEYCODE: usize = 2;

/// Tunables for a bus instance.
#[derive(Debug, Clone, Copy, Default)]
pub struct BusOptions {
    /// Log every expression-buffer transition at debug level. Diagnostic
    /// only, no behavioral effect.
    pub debug: bool,

    /// Clear the in-progress expression whenever the paused flag flips.
    ///
    /// Off by default: a gesture begun before a pause resumes where it left
    /// off after unpausing, matching the historical contract.
    pub reset_expression_on_pause: bool,
}

/// The event bus driven by an external key hook.
///
/// Bindings registered through [`register_hotkey`](Self::register_hotkey)
/// broadcast to every listener added with
/// [`add_listener`](Self::add_listener); bindings registered through
/// [`register_hotkey_with_listener`](Self::register_hotkey_with_listener)
/// notify only their dedicated listener. A binding present in both registries
/// fires through both paths independently.
///
/// The bus itself is single-threaded; wrap it in
/// [`SharedHotkeyEventBus`](super::SharedHotkeyEventBus) when the hook
/// delivers events on a dedicated thread.
pub struct HotkeyEventBus {
    /// Slot 0: first modifier seen. Slot 1: second modifier seen.
    /// Slot 2: completed primary key, set only within one release pass.
    expression: [i32; EXPRESSION_LEN],
    hotkey_set: HashSet<Hotkey>,
    listener_map: HashMap<Hotkey, Arc<dyn HotkeyListener>>,
    listener_set: Vec<Arc<dyn HotkeyListener>>,
    paused: bool,
    options: BusOptions,
}

impl HotkeyEventBus {
    /// Creates a bus with no bindings and default options.
    pub fn new() -> Self {
        Self::with_options(BusOptions::default())
    }

    /// Creates a bus with the given options.
    pub fn with_options(options: BusOptions) -> Self {
        Self {
            expression: [INVALID_CODE; EXPRESSION_LEN],
            hotkey_set: HashSet::new(),
            listener_map: HashMap::new(),
            listener_set: Vec::new(),
            paused: false,
            options,
        }
    }

    /// Creates a bus pre-populated with broadcast bindings.
    pub fn with_hotkeys(hotkeys: HashSet<Hotkey>) -> Self {
        let mut bus = Self::new();
        bus.hotkey_set = hotkeys;
        bus
    }

    /// Handles a raw key-press notification from the hook.
    ///
    /// Only modifier presses mutate state; the primary key of an expression
    /// is captured on release.
    pub fn on_key_press(&mut self, keycode: i32) {
        if self.paused {
            return;
        }

        if self.options.debug {
            debug!(keycode, text = %keys::key_text(keycode), "key press received");
        }

        if !keys::is_modifier_code(keycode) {
            return;
        }

        if self.expression[MODIFIER_1] == INVALID_CODE
            && self.expression[MODIFIER_2] == INVALID_CODE
        {
            if self.options.debug {
                debug!(keycode, "first modifier slot captured");
            }
            self.expression[MODIFIER_1] = keycode;
        } else if self.expression[MODIFIER_1] != INVALID_CODE
            && self.expression[MODIFIER_2] == INVALID_CODE
            && keycode != self.expression[MODIFIER_1]
        {
            // The first modifier must not be re-captured into the second
            // slot; that would allow bindings like Control + Control + C.
            if self.options.debug {
                debug!(keycode, "second modifier slot captured");
            }
            self.expression[MODIFIER_2] = keycode;
        }
    }

    /// Handles a raw key-release notification from the hook.
    ///
    /// A released modifier is removed from the in-progress expression,
    /// letting the user re-press a different one instead of failing the
    /// gesture. A released non-modifier key, if bindable, completes the
    /// expression and triggers a match attempt.
    pub fn on_key_release(&mut self, keycode: i32) {
        if self.paused {
            return;
        }

        if self.options.debug {
            debug!(keycode, text = %keys::key_text(keycode), "key release received");
        }

        if keys::is_modifier_code(keycode) {
            if self.expression[MODIFIER_1] == keycode {
                if self.options.debug {
                    debug!(keycode, "first modifier released and cleared");
                }
                self.expression[MODIFIER_1] = INVALID_CODE;
            } else if self.expression[MODIFIER_2] == keycode {
                if self.options.debug {
                    debug!(keycode, "second modifier released and cleared");
                }
                self.expression[MODIFIER_2] = INVALID_CODE;
            }
            return;
        }

        if !keys::is_bindable_code(keycode) {
            if self.options.debug {
                debug!(keycode, text = %keys::key_text(keycode), "released key is not a valid binding code");
            }
            return;
        }

        self.expression[KEYCODE] = keycode;
        self.check_expression();
    }

    /// Matches the completed expression against both registries, dispatches
    /// events, and unconditionally resets the buffer.
    fn check_expression(&mut self) {
        if self.options.debug {
            debug!(
                expression = %keys::expression_label(&self.expression),
                "checking completed expression"
            );
        }

        for hotkey in &self.hotkey_set {
            if hotkey.matches_slots(&self.expression) {
                if self.options.debug {
                    debug!(hotkey = %hotkey, "matching broadcast binding found");
                }

                let event = HotkeyEvent::new(hotkey.clone());
                for listener in &self.listener_set {
                    listener.on_hotkey_fired(&event);
                }
            }
        }

        for (hotkey, listener) in &self.listener_map {
            if hotkey.matches_slots(&self.expression) {
                if self.options.debug {
                    debug!(hotkey = %hotkey, "matching dedicated binding found");
                }

                listener.on_hotkey_fired(&HotkeyEvent::new(hotkey.clone()));
            }
        }

        self.reset_expression();
    }

    /// Resets every expression slot to unset.
    fn reset_expression(&mut self) {
        if self.options.debug {
            debug!("expression buffer reset");
        }
        self.expression = [INVALID_CODE; EXPRESSION_LEN];
    }

    /// Pauses or resumes event processing. While paused, every incoming key
    /// event is ignored. Unless
    /// [`BusOptions::reset_expression_on_pause`] is set, an in-progress
    /// gesture survives the pause and resumes where it left off.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;

        if self.options.reset_expression_on_pause {
            self.reset_expression();
        }

        if paused {
            info!("bus paused; input events will not be processed");
        } else {
            info!("bus unpaused; input events will now be processed");
        }
    }

    /// Whether the bus is currently ignoring input events.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Snapshot of the in-progress expression buffer, for diagnostics.
    pub fn current_expression(&self) -> [i32; EXPRESSION_LEN] {
        self.expression
    }

    /// Adds a broadcast binding. Returns false, without erroring, if an equal
    /// binding is already registered.
    pub fn register_hotkey(&mut self, hotkey: Hotkey) -> bool {
        let rendered = hotkey.to_string();
        let added = self.hotkey_set.insert(hotkey);

        if added {
            info!(hotkey = %rendered, "hotkey registered");
        } else {
            warn!(hotkey = %rendered, "hotkey already registered; nothing added");
        }

        added
    }

    /// Replaces the entire broadcast binding set.
    pub fn replace_hotkeys(&mut self, hotkeys: HashSet<Hotkey>) {
        info!(count = hotkeys.len(), "broadcast hotkey set replaced");
        self.hotkey_set = hotkeys;
    }

    /// Removes a broadcast binding. Returns false if it was absent.
    pub fn remove_hotkey(&mut self, hotkey: &Hotkey) -> bool {
        let removed = self.hotkey_set.remove(hotkey);

        if removed {
            info!(hotkey = %hotkey, "hotkey removed");
        } else {
            warn!(hotkey = %hotkey, "hotkey was not registered; nothing removed");
        }

        removed
    }

    /// Binds a hotkey to exactly one dedicated listener, replacing any
    /// previous mapping for an equal binding. A hotkey present in both the
    /// broadcast set and this map fires through both paths.
    pub fn register_hotkey_with_listener(
        &mut self,
        hotkey: Hotkey,
        listener: Arc<dyn HotkeyListener>,
    ) {
        let rendered = hotkey.to_string();
        let replaced = self.listener_map.insert(hotkey, listener).is_some();

        if replaced {
            info!(hotkey = %rendered, "dedicated listener replaced for hotkey");
        } else {
            info!(hotkey = %rendered, "hotkey registered with dedicated listener");
        }
    }

    /// Removes a dedicated binding. Returns false if it was absent.
    pub fn remove_hotkey_with_listener(&mut self, hotkey: &Hotkey) -> bool {
        let removed = self.listener_map.remove(hotkey).is_some();

        if removed {
            info!(hotkey = %hotkey, "dedicated binding removed");
        } else {
            warn!(hotkey = %hotkey, "no dedicated binding for hotkey; nothing removed");
        }

        removed
    }

    /// Attaches a broadcast listener. Listeners are identified by pointer, so
    /// attaching the same `Arc` twice is a reported no-op.
    pub fn add_listener(&mut self, listener: Arc<dyn HotkeyListener>) -> bool {
        if self
            .listener_set
            .iter()
            .any(|existing| Arc::ptr_eq(existing, &listener))
        {
            warn!("listener already attached; nothing added");
            return false;
        }

        self.listener_set.push(listener);
        info!("listener attached");
        true
    }

    /// Detaches a broadcast listener. Returns false if it was never attached.
    pub fn remove_listener(&mut self, listener: &Arc<dyn HotkeyListener>) -> bool {
        let before = self.listener_set.len();
        self.listener_set
            .retain(|existing| !Arc::ptr_eq(existing, listener));
        let removed = self.listener_set.len() < before;

        if removed {
            info!("listener detached");
        } else {
            warn!("listener was not attached; nothing removed");
        }

        removed
    }

    /// All registered bindings: the union of the broadcast set and the
    /// dedicated map's keys, deduplicated by hotkey equality.
    pub fn registered_hotkeys(&self) -> HashSet<Hotkey> {
        self.hotkey_set
            .iter()
            .chain(self.listener_map.keys())
            .cloned()
            .collect()
    }
}

impl Default for HotkeyEventBus {
    fn default() -> Self {
        Self::new()
    }
}
