//! Secure desktop classification.
//!
//! Pure domain logic apart from the single probe call in [`is_secure_desktop`].

use crate::error::EnvironmentQueryError;
use crate::provider::{DesktopProbe, InputDesktopProbe};
use serde::{Deserialize, Serialize};

/// Reserved name of the secure desktop hosting sign-in and elevation screens.
pub const SECURE_DESKTOP_NAME: &str = "Winlogon";

/// Name of the interactive desktop of a normal user session.
pub const DEFAULT_DESKTOP_NAME: &str = "Default";

/// Classification of a desktop name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesktopKind {
    /// The OS-isolated secure desktop.
    Secure,
    /// Any other desktop, including unknown names.
    Interactive,
}

impl DesktopKind {
    pub fn is_secure(self) -> bool {
        matches!(self, DesktopKind::Secure)
    }
}

impl std::fmt::Display for DesktopKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DesktopKind::Secure => write!(f, "secure"),
            DesktopKind::Interactive => write!(f, "interactive"),
        }
    }
}

/// What the OS reports about the desktop currently receiving input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputDesktop {
    /// The input desktop could be opened and has this name.
    Named(String),
    /// Opening the input desktop was refused. From a user session this only
    /// happens while the secure desktop is receiving input.
    AccessDenied,
}

impl InputDesktop {
    pub fn kind(&self) -> DesktopKind {
        match self {
            InputDesktop::Named(name) => classify_desktop(name),
            InputDesktop::AccessDenied => DesktopKind::Secure,
        }
    }
}

impl std::fmt::Display for InputDesktop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputDesktop::Named(name) => write!(f, "{name}"),
            InputDesktop::AccessDenied => write!(f, "<access denied>"),
        }
    }
}

/// Classify a desktop name. Only an exact, case-sensitive match is secure.
pub fn classify_desktop(name: &str) -> DesktopKind {
    if name == SECURE_DESKTOP_NAME {
        DesktopKind::Secure
    } else {
        DesktopKind::Interactive
    }
}

/// Returns `true` if the desktop reported by `probe` right now is the secure desktop.
///
/// Queries the probe on every call; the desktop can change between calls, so
/// callers must not cache the answer. Has no side effects beyond the probe
/// query and is safe to call from startup code, mode checks or logging guards.
pub fn is_secure_desktop<P>(probe: &P) -> Result<bool, EnvironmentQueryError>
where
    P: DesktopProbe + ?Sized,
{
    let name = probe.current_desktop_name()?;
    Ok(classify_desktop(&name).is_secure())
}

/// Classify the desktop receiving input right now.
///
/// Unlike [`is_secure_desktop`], which describes where this process runs,
/// this follows the user: it changes when a UAC prompt or the sign-in screen
/// takes over input.
pub fn input_desktop_kind<P>(probe: &P) -> Result<DesktopKind, EnvironmentQueryError>
where
    P: InputDesktopProbe + ?Sized,
{
    Ok(probe.current_input_desktop()?.kind())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{FixedDesktopProbe, UnsupportedProbe};

    #[test]
    fn test_winlogon_is_secure() {
        let probe = FixedDesktopProbe::new("Winlogon");
        assert!(is_secure_desktop(&probe).unwrap());
    }

    #[test]
    fn test_default_is_not_secure() {
        let probe = FixedDesktopProbe::new("Default");
        assert!(!is_secure_desktop(&probe).unwrap());
    }

    #[test]
    fn test_only_exact_name_is_secure() {
        let near_misses = [
            "",
            "winlogon",
            "WINLOGON",
            "Winlogon ",
            " Winlogon",
            "Screen-saver",
            "Disconnect",
        ];
        for name in near_misses {
            assert_eq!(classify_desktop(name), DesktopKind::Interactive, "{name:?}");
        }
        assert_eq!(classify_desktop(SECURE_DESKTOP_NAME), DesktopKind::Secure);
    }

    #[test]
    fn test_requeries_probe_each_call() {
        let probe = FixedDesktopProbe::new("Default");
        assert!(!is_secure_desktop(&probe).unwrap());

        probe.set_desktop_name("Winlogon");
        assert!(is_secure_desktop(&probe).unwrap());

        probe.set_desktop_name("Default");
        assert!(!is_secure_desktop(&probe).unwrap());
    }

    #[test]
    fn test_probe_failure_propagates() {
        let err = is_secure_desktop(&UnsupportedProbe).unwrap_err();
        assert_eq!(err, EnvironmentQueryError::Unsupported);

        let probe = FixedDesktopProbe::new("Default");
        probe.set_unavailable();
        assert!(matches!(
            is_secure_desktop(&probe),
            Err(EnvironmentQueryError::Unavailable(_))
        ));
    }

    #[test]
    fn test_denied_input_desktop_is_secure() {
        assert_eq!(InputDesktop::AccessDenied.kind(), DesktopKind::Secure);
        assert_eq!(
            InputDesktop::Named("Winlogon".to_string()).kind(),
            DesktopKind::Secure
        );
        assert_eq!(
            InputDesktop::Named("Default".to_string()).kind(),
            DesktopKind::Interactive
        );
    }

    #[test]
    fn test_input_desktop_follows_user_while_thread_desktop_stays() {
        // A user-session process: its own desktop never changes, but input
        // moves to the secure desktop and opening it is refused.
        let probe = FixedDesktopProbe::new("Default");
        probe.set_input_desktop(InputDesktop::AccessDenied);

        assert!(!is_secure_desktop(&probe).unwrap());
        assert_eq!(input_desktop_kind(&probe).unwrap(), DesktopKind::Secure);

        probe.set_input_desktop(InputDesktop::Named("Default".to_string()));
        assert_eq!(input_desktop_kind(&probe).unwrap(), DesktopKind::Interactive);
    }

    #[test]
    fn test_input_query_failure_propagates() {
        assert_eq!(
            input_desktop_kind(&UnsupportedProbe),
            Err(EnvironmentQueryError::Unsupported)
        );
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&DesktopKind::Secure).unwrap();
        assert_eq!(json, "\"secure\"");
    }
}
