//! Runtime configuration.

use crate::constants::{DEFAULT_POLL_INTERVAL_MS, SECURE_DESKTOP_ANNOUNCEMENT};
use securedesk_context::{
    is_secure_desktop, resolve_run_mode, DesktopProbe, EnvironmentQueryError, RunMode,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SecureDesktopConfig {
    /// Message spoken when the secure desktop becomes active.
    pub announcement: String,
    /// Desktop switch watcher poll interval in milliseconds.
    pub poll_interval_ms: u64,
    /// Keep full logging on the secure desktop (diagnostics only).
    pub service_debug: bool,
}

impl Default for SecureDesktopConfig {
    fn default() -> Self {
        Self {
            announcement: SECURE_DESKTOP_ANNOUNCEMENT.to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            service_debug: false,
        }
    }
}

impl SecureDesktopConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    /// Run mode for the desktop the probe reports right now.
    pub fn run_mode<P>(&self, probe: &P) -> Result<RunMode, EnvironmentQueryError>
    where
        P: DesktopProbe + ?Sized,
    {
        Ok(resolve_run_mode(is_secure_desktop(probe)?, self.service_debug))
    }
}
