/// Spoken when the secure desktop becomes active.
pub const SECURE_DESKTOP_ANNOUNCEMENT: &str = "Secure Desktop";

/// Display name of the placeholder object focused while the secure desktop is active
pub const DORMANCY_TARGET_NAME: &str = "Secure desktop placeholder";

/// How often the desktop switch watcher polls the desktop name (ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;
