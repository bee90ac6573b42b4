//! Platform-specific implementations.

#[cfg(windows)]
mod win;

#[cfg(windows)]
pub use win::{DesktopSwitchHook, WindowsDesktopProbe, WindowsInputDesktopProbe};

// Re-export the appropriate probes for the current platform
#[cfg(windows)]
pub type PlatformProbe = WindowsDesktopProbe;

#[cfg(windows)]
pub type PlatformInputProbe = WindowsInputDesktopProbe;

#[cfg(not(windows))]
pub type PlatformProbe = crate::provider::UnsupportedProbe;

#[cfg(not(windows))]
pub type PlatformInputProbe = crate::provider::UnsupportedProbe;
