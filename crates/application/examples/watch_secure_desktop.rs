//! Example: enter dormancy when the secure desktop appears.
//!
//! Run with: cargo run -p securedesk-application --example watch_secure_desktop
//!
//! Trigger a UAC prompt or press Ctrl+Alt+Del while it runs.

use securedesk_application::{
    dispatch_desktop_switch, DesktopContext, SecureDesktopConfig, TracingOutput,
};
use securedesk_context::platform::{PlatformInputProbe, PlatformProbe};
use securedesk_context::{DesktopSwitchNotification, DesktopSwitchWatcher, SwitchCallback};
use securedesk_events::SecureDesktopStateChanged;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("securedesk_application=debug,securedesk_context=debug")
        .init();

    let config = SecureDesktopConfig::default();
    let input = Arc::new(PlatformInputProbe::new());

    match config.run_mode(&PlatformProbe::new()) {
        Ok(mode) => println!("Run mode: {mode}"),
        Err(e) => {
            eprintln!("Cannot determine the current desktop: {e}");
            return;
        }
    }

    let mut ctx = DesktopContext::with_config(Arc::new(TracingOutput), &config);
    ctx.secure_desktop_changed()
        .register(Arc::new(|event: &SecureDesktopStateChanged| {
            println!("Observer: is_secure_desktop={}", event.is_secure_desktop);
        }));

    // Notification threads only forward; all handling happens here.
    let (tx, rx) = crossbeam_channel::unbounded();
    let forward: SwitchCallback = Arc::new(move |notification: DesktopSwitchNotification| {
        let _ = tx.send(notification);
    });

    #[cfg(windows)]
    let _hook = match securedesk_context::platform::DesktopSwitchHook::start(Arc::clone(&forward)) {
        Ok(hook) => Some(hook),
        Err(e) => {
            eprintln!("Switch hook unavailable, polling only: {e}");
            None
        }
    };

    let mut watcher = DesktopSwitchWatcher::new();
    watcher.start_with_interval(Arc::clone(&input), forward, config.poll_interval());

    println!("Watching for 60 seconds... (Ctrl+C to stop)\n");
    let deadline = Instant::now() + Duration::from_secs(60);

    while let Some(remaining) = deadline.checked_duration_since(Instant::now()) {
        match rx.recv_timeout(remaining) {
            Ok(_notification) => match dispatch_desktop_switch(&mut ctx, input.as_ref()) {
                Ok(kind) => println!(
                    "Desktop switched ({kind}); sleeping: {}",
                    ctx.focus().is_sleeping()
                ),
                Err(e) => eprintln!("Desktop switch handling failed: {e}"),
            },
            Err(_) => break,
        }
    }

    watcher.stop();
    println!("\nDone.");
}
