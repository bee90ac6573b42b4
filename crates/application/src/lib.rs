//! Secure desktop transition handling.
//!
//! When the OS switches to the secure desktop this process can neither read
//! nor drive it. [`DesktopContext::on_desktop_switched_to_secure`] tells the
//! user, parks focus on a [`DormancyFocusTarget`] so the application sleeps,
//! and notifies observers.

mod config;
mod constants;
mod dormancy;
mod error;
mod focus;
mod output;
mod transition;

pub use config::SecureDesktopConfig;
pub use constants::*;
pub use dormancy::{DormancyFocusTarget, DormancyState};
pub use error::{FocusError, OutputError, TransitionError};
pub use focus::{FocusId, FocusManager, FocusTarget, SleepMode};
pub use output::{NullOutput, OutputSink, OutputSinkRef, SpeechPriority, TracingOutput};
pub use transition::{dispatch_desktop_switch, DesktopContext};
