use securedesk_context::EnvironmentQueryError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OutputError {
    #[error("output unavailable: {0}")]
    Unavailable(String),
    #[error("output failed: {0}")]
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FocusError {
    #[error("focus callback for {target} failed: {source}")]
    GainFocus {
        target: String,
        #[source]
        source: OutputError,
    },
}

/// Failure while reacting to a desktop switch.
///
/// Never retried; the next switch notification is an independent attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error(transparent)]
    Environment(#[from] EnvironmentQueryError),
    #[error(transparent)]
    Focus(#[from] FocusError),
}
