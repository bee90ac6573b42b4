//! Placeholder focus object that keeps the application asleep while the
//! secure desktop is active.
//!
//! The type has no window handle or process id fields, so nothing holding it
//! can query the real secure desktop through it.

use crate::constants::DORMANCY_TARGET_NAME;
use crate::error::FocusError;
use crate::focus::{FocusTarget, SleepMode};
use crate::output::OutputSink;
use std::any::Any;

/// Lifecycle of a dormancy target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DormancyState {
    /// Constructed but not yet focused.
    Unfocused,
    /// Focused; terminal until the object is superseded and dropped.
    FocusedDormant,
}

/// Focus object standing in for the secure desktop.
///
/// Created fresh for every transition and never reused.
#[derive(Debug)]
pub struct DormancyFocusTarget {
    state: DormancyState,
    sleep_mode: SleepMode,
}

impl Default for DormancyFocusTarget {
    fn default() -> Self {
        Self {
            state: DormancyState::Unfocused,
            sleep_mode: SleepMode::Normal,
        }
    }
}

impl DormancyFocusTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DormancyState {
        self.state
    }
}

impl FocusTarget for DormancyFocusTarget {
    fn name(&self) -> &str {
        DORMANCY_TARGET_NAME
    }

    fn process_id(&self) -> Option<u32> {
        None
    }

    fn sleep_mode(&self) -> SleepMode {
        self.sleep_mode
    }

    /// Cancel output so it does not overlap the secure desktop's own speech,
    /// then sleep.
    ///
    /// Sleep mode is entered even if cancelling fails; the cancel error is
    /// still reported. Safe to repeat.
    fn on_gain_focus(&mut self, output: &dyn OutputSink) -> Result<(), FocusError> {
        let cancelled = output.cancel_output();

        self.sleep_mode = SleepMode::Full;
        self.state = DormancyState::FocusedDormant;

        cancelled.map_err(|source| FocusError::GainFocus {
            target: DORMANCY_TARGET_NAME.to_string(),
            source,
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
