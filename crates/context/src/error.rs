//! Error types for desktop identity queries.

use thiserror::Error;

/// The operating system could not report which desktop is active.
///
/// Never mapped to a fallback desktop name: guessing the wrong desktop would
/// misclassify secure-desktop status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvironmentQueryError {
    /// A platform call failed.
    #[error("{operation} failed: {message}")]
    Os {
        operation: &'static str,
        message: String,
    },

    /// The desktop name returned by the OS was not valid text.
    #[error("desktop name is not valid UTF-16")]
    InvalidName,

    /// No desktop probe exists for this platform.
    #[error("desktop identity cannot be queried on this platform")]
    Unsupported,

    /// The probe has no desktop name to report.
    #[error("desktop name unavailable: {0}")]
    Unavailable(String),
}

impl EnvironmentQueryError {
    pub fn os(operation: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Os {
            operation,
            message: err.to_string(),
        }
    }
}
