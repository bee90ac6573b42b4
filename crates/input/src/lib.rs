//! Keyboard state tracking for securedesk.
//!
//! Tracks which modifier keys are currently held down so gestures can be
//! matched against them. Key-up events are not guaranteed: when the OS
//! switches desktops, releases for keys pressed beforehand are delivered to
//! the other desktop, so the held set must be cleared explicitly.
//!
//! # Example
//!
//! ```ignore
//! use securedesk_input::{KeyDirection, Modifier, ModifierState};
//!
//! let mut modifiers = ModifierState::new();
//! modifiers.apply(Modifier::Control, KeyDirection::Press);
//! assert!(modifiers.is_held(Modifier::Control));
//! modifiers.clear();
//! ```

mod modifiers;

pub use modifiers::{KeyDirection, Modifier, ModifierState};
