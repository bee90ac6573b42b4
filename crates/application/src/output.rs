//! Seam to the speech/output subsystem.

use crate::error::OutputError;
use std::sync::Arc;

/// Scheduling priority of an utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum SpeechPriority {
    /// Queued behind everything else.
    #[default]
    Normal,
    /// Spoken after the current utterance, ahead of the queue.
    Next,
    /// Interrupts whatever is being spoken.
    Now,
}

impl SpeechPriority {
    /// The highest priority available.
    pub const HIGHEST: SpeechPriority = SpeechPriority::Now;

    pub fn interrupts(self) -> bool {
        matches!(self, SpeechPriority::Now)
    }
}

/// The application's speech/braille output.
pub trait OutputSink: Send + Sync {
    /// Present a message to the user.
    fn announce(&self, text: &str, priority: SpeechPriority) -> Result<(), OutputError>;

    /// Stop any output in progress. Must succeed when nothing is in progress.
    fn cancel_output(&self) -> Result<(), OutputError>;
}

pub type OutputSinkRef = Arc<dyn OutputSink>;

impl<O: OutputSink + ?Sized> OutputSink for Arc<O> {
    fn announce(&self, text: &str, priority: SpeechPriority) -> Result<(), OutputError> {
        (**self).announce(text, priority)
    }

    fn cancel_output(&self) -> Result<(), OutputError> {
        (**self).cancel_output()
    }
}

/// Output sink that writes announcements to the log. For headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingOutput;

impl OutputSink for TracingOutput {
    fn announce(&self, text: &str, priority: SpeechPriority) -> Result<(), OutputError> {
        tracing::info!(?priority, text, "announce");
        Ok(())
    }

    fn cancel_output(&self) -> Result<(), OutputError> {
        tracing::debug!("cancel output");
        Ok(())
    }
}

/// Output sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullOutput;

impl OutputSink for NullOutput {
    fn announce(&self, _text: &str, _priority: SpeechPriority) -> Result<(), OutputError> {
        Ok(())
    }

    fn cancel_output(&self) -> Result<(), OutputError> {
        Ok(())
    }
}
