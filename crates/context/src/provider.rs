//! Probe traits for desktop identity detection.
//!
//! The traits abstract the platform queries so classification stays pure and
//! testable. Two different desktops matter: the one this process runs on
//! ([`DesktopProbe`]) and the one currently receiving input
//! ([`InputDesktopProbe`]). Only the second changes when the user is taken to
//! the secure desktop.

use crate::desktop::InputDesktop;
use crate::error::EnvironmentQueryError;
use std::sync::{Arc, PoisonError, RwLock};

/// Reports the name of the desktop currently associated with this process.
pub trait DesktopProbe: Send + Sync {
    /// Query the OS for the current desktop name.
    ///
    /// Must reflect the desktop at the instant of the call. Fails instead of
    /// returning a placeholder name.
    fn current_desktop_name(&self) -> Result<String, EnvironmentQueryError>;
}

/// Reports the desktop currently receiving user input.
pub trait InputDesktopProbe: Send + Sync {
    /// Query the OS for the input desktop.
    ///
    /// A refused open is reported as [`InputDesktop::AccessDenied`]; every
    /// other OS failure is an error.
    fn current_input_desktop(&self) -> Result<InputDesktop, EnvironmentQueryError>;
}

impl<P: DesktopProbe + ?Sized> DesktopProbe for Arc<P> {
    fn current_desktop_name(&self) -> Result<String, EnvironmentQueryError> {
        (**self).current_desktop_name()
    }
}

impl<P: DesktopProbe + ?Sized> DesktopProbe for &P {
    fn current_desktop_name(&self) -> Result<String, EnvironmentQueryError> {
        (**self).current_desktop_name()
    }
}

impl<P: InputDesktopProbe + ?Sized> InputDesktopProbe for Arc<P> {
    fn current_input_desktop(&self) -> Result<InputDesktop, EnvironmentQueryError> {
        (**self).current_input_desktop()
    }
}

impl<P: InputDesktopProbe + ?Sized> InputDesktopProbe for &P {
    fn current_input_desktop(&self) -> Result<InputDesktop, EnvironmentQueryError> {
        (**self).current_input_desktop()
    }
}

/// Probe for platforms without a desktop query. Always fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedProbe;

impl UnsupportedProbe {
    pub fn new() -> Self {
        Self
    }
}

impl DesktopProbe for UnsupportedProbe {
    fn current_desktop_name(&self) -> Result<String, EnvironmentQueryError> {
        Err(EnvironmentQueryError::Unsupported)
    }
}

impl InputDesktopProbe for UnsupportedProbe {
    fn current_input_desktop(&self) -> Result<InputDesktop, EnvironmentQueryError> {
        Err(EnvironmentQueryError::Unsupported)
    }
}

/// In-process probe reporting settable desktops.
///
/// Used for headless runs and tests. The process desktop and the input
/// desktop are tracked separately, so a test can model a user-session
/// process whose own desktop stays `Default` while input moves elsewhere.
#[derive(Debug)]
pub struct FixedDesktopProbe {
    thread: RwLock<Option<String>>,
    input: RwLock<Option<InputDesktop>>,
}

impl FixedDesktopProbe {
    /// Process and input desktop both named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            input: RwLock::new(Some(InputDesktop::Named(name.clone()))),
            thread: RwLock::new(Some(name)),
        }
    }

    /// Change both the process and the input desktop.
    pub fn set_desktop_name(&self, name: impl Into<String>) {
        let name = name.into();
        *self.input.write().unwrap_or_else(PoisonError::into_inner) =
            Some(InputDesktop::Named(name.clone()));
        *self.thread.write().unwrap_or_else(PoisonError::into_inner) = Some(name);
    }

    /// Change only the input desktop.
    pub fn set_input_desktop(&self, desktop: InputDesktop) {
        *self.input.write().unwrap_or_else(PoisonError::into_inner) = Some(desktop);
    }

    /// Make subsequent queries fail with [`EnvironmentQueryError::Unavailable`].
    pub fn set_unavailable(&self) {
        *self.input.write().unwrap_or_else(PoisonError::into_inner) = None;
        *self.thread.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl DesktopProbe for FixedDesktopProbe {
    fn current_desktop_name(&self) -> Result<String, EnvironmentQueryError> {
        self.thread
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or_else(|| EnvironmentQueryError::Unavailable("no desktop name set".to_string()))
    }
}

impl InputDesktopProbe for FixedDesktopProbe {
    fn current_input_desktop(&self) -> Result<InputDesktop, EnvironmentQueryError> {
        self.input
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or_else(|| EnvironmentQueryError::Unavailable("no input desktop set".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_probe_reports_latest_name() {
        let probe = FixedDesktopProbe::new("Default");
        assert_eq!(probe.current_desktop_name().unwrap(), "Default");

        probe.set_desktop_name("Winlogon");
        assert_eq!(probe.current_desktop_name().unwrap(), "Winlogon");
        assert_eq!(
            probe.current_input_desktop().unwrap(),
            InputDesktop::Named("Winlogon".to_string())
        );
    }

    #[test]
    fn test_input_desktop_changes_independently() {
        let probe = FixedDesktopProbe::new("Default");
        probe.set_input_desktop(InputDesktop::AccessDenied);

        assert_eq!(probe.current_desktop_name().unwrap(), "Default");
        assert_eq!(probe.current_input_desktop().unwrap(), InputDesktop::AccessDenied);
    }

    #[test]
    fn test_writes_survive_poisoned_lock() {
        let probe = Arc::new(FixedDesktopProbe::new("Default"));

        let poisoner = Arc::clone(&probe);
        let _ = std::thread::spawn(move || {
            let _thread = poisoner.thread.write().unwrap();
            let _input = poisoner.input.write().unwrap();
            panic!("poison the probe locks");
        })
        .join();
        assert!(probe.thread.is_poisoned());

        probe.set_desktop_name("Winlogon");
        assert_eq!(probe.current_desktop_name().unwrap(), "Winlogon");

        probe.set_input_desktop(InputDesktop::AccessDenied);
        assert_eq!(probe.current_input_desktop().unwrap(), InputDesktop::AccessDenied);

        probe.set_unavailable();
        assert!(probe.current_desktop_name().is_err());
    }

    #[test]
    fn test_arc_probe_delegates() {
        let probe: Arc<dyn DesktopProbe> = Arc::new(FixedDesktopProbe::new("Default"));
        assert_eq!(probe.current_desktop_name().unwrap(), "Default");
    }

    #[test]
    fn test_unsupported_probe_fails() {
        assert_eq!(
            UnsupportedProbe.current_desktop_name(),
            Err(EnvironmentQueryError::Unsupported)
        );
        assert_eq!(
            UnsupportedProbe.current_input_desktop(),
            Err(EnvironmentQueryError::Unsupported)
        );
    }
}
