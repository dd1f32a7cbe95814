//! Event bus module: expression tracking, matching, and dispatch
//!
//! [`HotkeyEventBus`] is the single-threaded reducer over the raw key event
//! stream; [`SharedHotkeyEventBus`] is the lock-guarded handle for hook-driven
//! use.

mod machine;
mod shared;

pub use machine::{BusOptions, HotkeyEventBus};
pub use shared::{KeyEventHandler, SharedHotkeyEventBus};
