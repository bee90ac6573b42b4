//! Desktop awareness for securedesk.
//!
//! This crate answers two questions about the operating system's secure
//! desktop (sign-in screen, elevation prompts): is this process running on
//! it, and has the user's input just moved to it?
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Domain Layer                             │
//! │  desktop.rs  - Secure desktop classification (pure)         │
//! │  mode.rs     - Run mode resolution (pure)                   │
//! │  provider.rs - Probe trait and in-process probes            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Infrastructure Layer                        │
//! │  platform/win.rs - Win32 desktop queries, switch hook       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Application Layer                          │
//! │  watcher.rs - Polling desktop switch detection              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use securedesk_context::{is_secure_desktop, platform::PlatformProbe};
//!
//! let probe = PlatformProbe::new();
//! if is_secure_desktop(&probe)? {
//!     println!("running on the secure desktop");
//! }
//! ```

mod desktop;
mod error;
mod mode;
mod provider;
mod watcher;

pub mod platform;

pub use desktop::{
    classify_desktop, input_desktop_kind, is_secure_desktop, DesktopKind, InputDesktop,
    DEFAULT_DESKTOP_NAME, SECURE_DESKTOP_NAME,
};
pub use error::EnvironmentQueryError;
pub use mode::{resolve_run_mode, RunMode};
pub use provider::{DesktopProbe, FixedDesktopProbe, InputDesktopProbe, UnsupportedProbe};
pub use watcher::{
    DesktopSwitchNotification, DesktopSwitchWatcher, SwitchCallback, DEFAULT_POLL_INTERVAL,
};
