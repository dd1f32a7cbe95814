//! hotkey-bus: match raw key press/release streams against registered
//! keybindings and publish fired-hotkey events.
//!
//! The crate is the pure core of a global-hotkey system:
//! - [`Hotkey`]: an immutable keybinding of up to two modifiers plus one
//!   primary key, with cached expression text and a JSON record form.
//! - [`HotkeyEventBus`]: the expression-tracking state machine that consumes
//!   `on_key_press` / `on_key_release` notifications and fans out
//!   [`HotkeyEvent`]s to [`HotkeyListener`]s.
//! - [`SharedHotkeyEventBus`]: lock-guarded handle for hooks that deliver
//!   events on a dedicated thread.
//!
//! Capturing keyboard input from the operating system is out of scope; an
//! external hook drives the bus through [`KeyEventHandler`] or the
//! `on_key_*` methods directly.
//!
//! ```
//! use std::sync::Arc;
//! use hotkey_bus::{keys::code, CallbackListener, Hotkey, HotkeyEventBus};
//!
//! let mut bus = HotkeyEventBus::new();
//! bus.register_hotkey(Hotkey::new("open-window", code::CONTROL, code::ALT, code::O));
//! bus.add_listener(Arc::new(CallbackListener::new(|event| {
//!     println!("fired: {}", event.hotkey().command_id());
//! })));
//!
//! // Driven by the external hook:
//! bus.on_key_press(code::CONTROL);
//! bus.on_key_press(code::ALT);
//! bus.on_key_release(code::O);
//! ```

pub mod bus;
pub mod hotkey;
pub mod keys;

pub use bus::{BusOptions, HotkeyEventBus, KeyEventHandler, SharedHotkeyEventBus};
pub use hotkey::{CallbackListener, ExpressionError, Hotkey, HotkeyEvent, HotkeyListener};
pub use keys::INVALID_CODE;
