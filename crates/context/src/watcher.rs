//! Desktop switch watcher - background task that detects desktop changes.
//!
//! Polling fallback for [`DesktopSwitchHook`](crate::platform) where the OS
//! hook is unavailable.

use crate::desktop::InputDesktop;
use crate::provider::InputDesktopProbe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Default polling interval for desktop changes.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Signal that the active desktop changed.
///
/// Carries no payload: receivers must re-query the probe for the current
/// desktop instead of trusting what the watcher saw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesktopSwitchNotification;

/// Callback type for desktop switch notifications.
pub type SwitchCallback = Arc<dyn Fn(DesktopSwitchNotification) + Send + Sync + 'static>;

/// Last thing the watcher learned about the input desktop.
#[derive(Debug, PartialEq, Eq)]
enum Observed {
    Desktop(InputDesktop),
    Failed,
}

/// Background watcher that raises a notification whenever the input desktop changes.
///
/// A probe that starts failing counts as a change: the receiver re-queries
/// and surfaces the error instead of the watcher hiding it. The callback runs
/// on the watcher thread. Hand the notification to the application's event
/// thread before reacting to it.
pub struct DesktopSwitchWatcher {
    running: Arc<AtomicBool>,
    handle: Option<std::thread::JoinHandle<()>>,
}

impl Default for DesktopSwitchWatcher {
    fn default() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }
}

impl DesktopSwitchWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start watching with the given probe and callback.
    pub fn start<P>(&mut self, probe: Arc<P>, callback: SwitchCallback)
    where
        P: InputDesktopProbe + ?Sized + 'static,
    {
        self.start_with_interval(probe, callback, DEFAULT_POLL_INTERVAL);
    }

    /// Start watching with a custom interval.
    pub fn start_with_interval<P>(
        &mut self,
        probe: Arc<P>,
        callback: SwitchCallback,
        interval: Duration,
    ) where
        P: InputDesktopProbe + ?Sized + 'static,
    {
        if self.running.load(Ordering::SeqCst) {
            tracing::warn!("DesktopSwitchWatcher already running");
            return;
        }

        self.running.store(true, Ordering::SeqCst);
        let running = Arc::clone(&self.running);

        let handle = std::thread::spawn(move || {
            tracing::info!("DesktopSwitchWatcher started with interval {:?}", interval);

            // The desktop seen at start-up is the baseline, not a switch.
            let mut last: Option<Observed> = None;

            while running.load(Ordering::SeqCst) {
                let observed = match probe.current_input_desktop() {
                    Ok(desktop) => Observed::Desktop(desktop),
                    Err(e) => {
                        tracing::warn!(error = %e, "input desktop probe failed");
                        Observed::Failed
                    }
                };

                if last.as_ref().is_some_and(|previous| *previous != observed) {
                    tracing::debug!(?observed, "desktop switched");
                    callback(DesktopSwitchNotification);
                }
                last = Some(observed);

                std::thread::sleep(interval);
            }

            tracing::info!("DesktopSwitchWatcher stopped");
        });

        self.handle = Some(handle);
    }

    /// Stop the watcher.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);

        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Drop for DesktopSwitchWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}
