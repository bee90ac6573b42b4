//! Focus ownership.
//!
//! Exactly one object holds focus at a time. Installing a new one drops the
//! previous object; its focus-gained callback runs synchronously on install.

use crate::error::FocusError;
use crate::output::OutputSink;
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Event handling state of the focused object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SleepMode {
    /// Events are handled normally.
    #[default]
    Normal,
    /// All normal event handling is suppressed while this object has focus.
    Full,
}

/// Sequence number assigned to each focus installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FocusId(u64);

/// An entity that can become the focus object.
pub trait FocusTarget: Send + 'static {
    fn name(&self) -> &str;

    /// Owning process, if this object represents a real window.
    fn process_id(&self) -> Option<u32>;

    fn sleep_mode(&self) -> SleepMode;

    /// Called once this object has been installed as the focus object.
    fn on_gain_focus(&mut self, output: &dyn OutputSink) -> Result<(), FocusError>;

    fn as_any(&self) -> &dyn Any;
}

struct Focused {
    id: FocusId,
    target: Box<dyn FocusTarget>,
}

/// Holder of the single current focus object.
#[derive(Default)]
pub struct FocusManager {
    current: Option<Focused>,
    installs: u64,
}

impl FocusManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `target` the focus object and fire its focus-gained callback.
    ///
    /// The previous object is dropped before the callback runs. If the
    /// callback fails, `target` stays focused and the error is returned: the
    /// superseded object is never restored.
    pub fn set_focus(
        &mut self,
        target: Box<dyn FocusTarget>,
        output: &dyn OutputSink,
    ) -> Result<FocusId, FocusError> {
        self.installs += 1;
        let id = FocusId(self.installs);

        if let Some(previous) = self.current.take() {
            tracing::debug!(
                previous = previous.target.name(),
                previous_id = previous.id.0,
                "focus superseded"
            );
        }

        let focused = self.current.insert(Focused { id, target });
        tracing::debug!(focus_id = id.0, target = focused.target.name(), "focus installed");

        focused.target.on_gain_focus(output)?;
        Ok(id)
    }

    pub fn current(&self) -> Option<&dyn FocusTarget> {
        self.current.as_ref().map(|f| f.target.as_ref())
    }

    pub fn current_id(&self) -> Option<FocusId> {
        self.current.as_ref().map(|f| f.id)
    }

    /// The focus object, if it is a `T`.
    pub fn current_as<T: FocusTarget>(&self) -> Option<&T> {
        self.current().and_then(|t| t.as_any().downcast_ref::<T>())
    }

    pub fn is_sleeping(&self) -> bool {
        self.current()
            .is_some_and(|t| t.sleep_mode() == SleepMode::Full)
    }

    /// Whether ordinary input and object events should be handled.
    pub fn should_process_events(&self) -> bool {
        !self.is_sleeping()
    }
}

impl std::fmt::Debug for FocusManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FocusManager")
            .field("current", &self.current().map(|t| t.name()))
            .field("current_id", &self.current_id())
            .finish()
    }
}
