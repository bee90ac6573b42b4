//! Observer channels and event contracts.
//!
//! [`Action`] is the in-process broadcast primitive. The DTOs here are the
//! formal payloads carried on it, so every subscriber agrees on field names.

mod action;
mod bus;

pub use action::{Action, Handler, HandlerId};
pub use bus::{bridge_to_bus, EmittedEvent, EventBus, EventBusRef, InMemoryEventBus, NullEventBus};

use serde::{Deserialize, Serialize};

/// Raised when the user switches to or from the secure desktop.
///
/// Producers: transition handler (on desktop switch notification)
/// Consumers: anything that must stop reading or writing user state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecureDesktopStateChanged {
    /// True if the new desktop is the secure desktop.
    pub is_secure_desktop: bool,
}

/// Observer channel type for secure desktop transitions.
pub type SecureDesktopStateChannel = Action<SecureDesktopStateChanged>;

/// Event names as constants to prevent typos.
pub mod event_names {
    /// Secure desktop entered or left.
    pub const SECURE_DESKTOP_CHANGED: &str = "desktop:secure_state_changed";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_changed_wire_shape() {
        let json = serde_json::to_value(SecureDesktopStateChanged {
            is_secure_desktop: true,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"isSecureDesktop": true}));
    }

    #[test]
    fn test_state_changed_deserialize() {
        let event: SecureDesktopStateChanged =
            serde_json::from_str(r#"{"isSecureDesktop": false}"#).unwrap();
        assert!(!event.is_secure_desktop);
    }
}
