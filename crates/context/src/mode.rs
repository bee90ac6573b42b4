//! Run mode definitions and resolution logic.
//!
//! Pure domain logic - no I/O, no platform dependencies.

use serde::{Deserialize, Serialize};

/// How restricted the process must be given where it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Ordinary user-session operation.
    #[default]
    Normal,

    /// Running on the secure desktop: no persistence, no content in logs.
    Secure,
}

impl RunMode {
    pub fn label(&self) -> &'static str {
        match self {
            RunMode::Normal => "Normal",
            RunMode::Secure => "Secure",
        }
    }

    /// Whether settings and other user data may be written to disk.
    pub fn allows_persistence(&self) -> bool {
        matches!(self, RunMode::Normal)
    }

    /// Whether logs may include user-visible content (spoken text, window titles).
    pub fn allows_logging_content(&self) -> bool {
        matches!(self, RunMode::Normal)
    }
}

impl std::fmt::Display for RunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Resolve the run mode.
///
/// Secure on the secure desktop unless the `service_debug` override is set,
/// which keeps full logging available for diagnosing secure-screen issues.
pub fn resolve_run_mode(is_secure_desktop: bool, service_debug: bool) -> RunMode {
    if is_secure_desktop && !service_debug {
        RunMode::Secure
    } else {
        RunMode::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_desktop_is_secure_mode() {
        assert_eq!(resolve_run_mode(true, false), RunMode::Secure);
    }

    #[test]
    fn test_service_debug_overrides() {
        assert_eq!(resolve_run_mode(true, true), RunMode::Normal);
    }

    #[test]
    fn test_user_desktop_is_normal() {
        assert_eq!(resolve_run_mode(false, false), RunMode::Normal);
        assert_eq!(resolve_run_mode(false, true), RunMode::Normal);
    }

    #[test]
    fn test_secure_mode_restrictions() {
        assert!(!RunMode::Secure.allows_persistence());
        assert!(!RunMode::Secure.allows_logging_content());
        assert!(RunMode::Normal.allows_persistence());
        assert!(RunMode::Normal.allows_logging_content());
    }
}
