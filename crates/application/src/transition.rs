//! Reaction to the user switching to the secure desktop.

use crate::config::SecureDesktopConfig;
use crate::dormancy::DormancyFocusTarget;
use crate::error::{FocusError, TransitionError};
use crate::focus::{FocusId, FocusManager, FocusTarget};
use crate::output::{OutputSinkRef, SpeechPriority};
use securedesk_context::{DesktopKind, InputDesktopProbe};
use securedesk_events::{SecureDesktopStateChanged, SecureDesktopStateChannel};
use securedesk_input::ModifierState;
use std::sync::Arc;

/// Process-scoped state touched by desktop transitions.
///
/// Owns the held-modifier set and the focus object, and holds the shared
/// output sink and the secure desktop observer channel. Lives on the
/// application's event thread; every method runs to completion without
/// yielding.
pub struct DesktopContext {
    modifiers: ModifierState,
    focus: FocusManager,
    output: OutputSinkRef,
    secure_desktop_changed: Arc<SecureDesktopStateChannel>,
    announcement: String,
}

impl DesktopContext {
    pub fn new(output: OutputSinkRef) -> Self {
        Self::with_config(output, &SecureDesktopConfig::default())
    }

    pub fn with_config(output: OutputSinkRef, config: &SecureDesktopConfig) -> Self {
        Self {
            modifiers: ModifierState::new(),
            focus: FocusManager::new(),
            output,
            secure_desktop_changed: Arc::new(SecureDesktopStateChannel::new()),
            announcement: config.announcement.clone(),
        }
    }

    pub fn modifiers(&self) -> &ModifierState {
        &self.modifiers
    }

    pub fn modifiers_mut(&mut self) -> &mut ModifierState {
        &mut self.modifiers
    }

    pub fn focus(&self) -> &FocusManager {
        &self.focus
    }

    /// Install a new focus object.
    pub fn set_focus(&mut self, target: Box<dyn FocusTarget>) -> Result<FocusId, FocusError> {
        self.focus.set_focus(target, self.output.as_ref())
    }

    /// Channel notified with `is_secure_desktop` after each transition.
    pub fn secure_desktop_changed(&self) -> &Arc<SecureDesktopStateChannel> {
        &self.secure_desktop_changed
    }

    /// Handle a switch to the secure desktop.
    ///
    /// In order, with nothing in between:
    /// 1. forget held modifiers (their key-up events go to the other desktop)
    /// 2. announce the switch, interrupting current speech
    /// 3. focus a fresh [`DormancyFocusTarget`], which cancels output and sleeps
    /// 4. notify observers with `is_secure_desktop = true`
    ///
    /// A failed announcement is logged and does not stop the switch into
    /// dormancy. A failed focus callback is returned after observers have
    /// been notified; the dormancy target stays focused either way.
    pub fn on_desktop_switched_to_secure(&mut self) -> Result<(), TransitionError> {
        tracing::info!("secure desktop active, entering dormancy");

        self.modifiers.clear();

        if let Err(e) = self
            .output
            .announce(&self.announcement, SpeechPriority::HIGHEST)
        {
            tracing::warn!(error = %e, "secure desktop announcement failed");
        }

        let installed = self.set_focus(Box::new(DormancyFocusTarget::new()));

        self.secure_desktop_changed.notify(&SecureDesktopStateChanged {
            is_secure_desktop: true,
        });

        let focus_id = installed?;
        tracing::debug!(?focus_id, "dormancy focus installed");
        Ok(())
    }
}

impl std::fmt::Debug for DesktopContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DesktopContext")
            .field("modifiers", &self.modifiers)
            .field("focus", &self.focus)
            .field("observers", &self.secure_desktop_changed.len())
            .finish_non_exhaustive()
    }
}

/// React to a desktop switch notification.
///
/// The notification itself says nothing about the new desktop, so the input
/// desktop is queried here. The process's own desktop cannot be used: it
/// stays the same when input moves to the secure desktop. Switching to the
/// secure desktop runs [`DesktopContext::on_desktop_switched_to_secure`];
/// switching away is left to the instance running on the user's desktop.
pub fn dispatch_desktop_switch<P>(
    ctx: &mut DesktopContext,
    probe: &P,
) -> Result<DesktopKind, TransitionError>
where
    P: InputDesktopProbe + ?Sized,
{
    let desktop = probe.current_input_desktop()?;
    let kind = desktop.kind();
    tracing::debug!(%desktop, %kind, "desktop switch");

    if kind.is_secure() {
        ctx.on_desktop_switched_to_secure()?;
    }

    Ok(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::NullOutput;
    use securedesk_context::{is_secure_desktop, FixedDesktopProbe, InputDesktop};
    use securedesk_input::{KeyDirection, Modifier};

    #[test]
    fn test_dispatch_on_user_desktop_changes_nothing() {
        let mut ctx = DesktopContext::new(Arc::new(NullOutput));
        ctx.modifiers_mut().apply(Modifier::Shift, KeyDirection::Press);

        let kind = dispatch_desktop_switch(&mut ctx, &FixedDesktopProbe::new("Default")).unwrap();

        assert_eq!(kind, DesktopKind::Interactive);
        assert!(ctx.modifiers().is_held(Modifier::Shift));
        assert!(ctx.focus().current().is_none());
    }

    #[test]
    fn test_dispatch_on_secure_desktop_enters_dormancy() {
        let mut ctx = DesktopContext::new(Arc::new(NullOutput));

        let kind = dispatch_desktop_switch(&mut ctx, &FixedDesktopProbe::new("Winlogon")).unwrap();

        assert_eq!(kind, DesktopKind::Secure);
        assert!(ctx.focus().is_sleeping());
        assert!(ctx.focus().current_as::<DormancyFocusTarget>().is_some());
    }

    #[test]
    fn test_dispatch_follows_input_desktop_not_process_desktop() {
        let mut ctx = DesktopContext::new(Arc::new(NullOutput));
        let probe = FixedDesktopProbe::new("Default");
        probe.set_input_desktop(InputDesktop::AccessDenied);

        let kind = dispatch_desktop_switch(&mut ctx, &probe).unwrap();

        assert!(!is_secure_desktop(&probe).unwrap());
        assert_eq!(kind, DesktopKind::Secure);
        assert!(ctx.focus().is_sleeping());
    }

    #[test]
    fn test_dispatch_propagates_query_failure() {
        let mut ctx = DesktopContext::new(Arc::new(NullOutput));
        let probe = FixedDesktopProbe::new("Winlogon");
        probe.set_unavailable();

        let err = dispatch_desktop_switch(&mut ctx, &probe).unwrap_err();

        assert!(matches!(err, TransitionError::Environment(_)));
        assert!(ctx.focus().current().is_none());
    }
}
