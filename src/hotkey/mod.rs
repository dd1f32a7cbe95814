//! Hotkey bindings, fired events, and the listener capability
//!
//! The binding is a pure value type; the event pairs a fired binding with a
//! timestamp; listeners receive events synchronously from the bus.

mod binding;
mod event;

pub use binding::{ExpressionError, Hotkey};
pub use event::{CallbackListener, HotkeyEvent, HotkeyListener};
