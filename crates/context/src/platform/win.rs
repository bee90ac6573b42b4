//! Windows implementation of the desktop probes and switch notifications.

use crate::desktop::InputDesktop;
use crate::error::EnvironmentQueryError;
use crate::provider::{DesktopProbe, InputDesktopProbe};
use crate::watcher::{DesktopSwitchNotification, SwitchCallback};
use std::cell::RefCell;
use std::mem;
use windows::Win32::{
    Foundation::{E_ACCESSDENIED, FALSE, HANDLE, HMODULE, HWND, LPARAM, WPARAM},
    System::{
        StationsAndDesktops::{
            CloseDesktop, GetThreadDesktop, GetUserObjectInformationW, OpenInputDesktop,
            DESKTOP_CONTROL_FLAGS, DESKTOP_READOBJECTS, UOI_NAME,
        },
        Threading::GetCurrentThreadId,
    },
    UI::{
        Accessibility::{SetWinEventHook, UnhookWinEvent, HWINEVENTHOOK},
        WindowsAndMessaging::{
            DispatchMessageW, GetMessageW, PeekMessageW, PostThreadMessageW, MSG, PM_NOREMOVE,
            WM_QUIT,
        },
    },
};

/// Desktop object names are short; 256 UTF-16 units covers every OS-defined name.
const NAME_BUFFER_LEN: usize = 256;

const EVENT_SYSTEM_DESKTOPSWITCH: u32 = 0x0020;
const WINEVENT_OUTOFCONTEXT: u32 = 0x0000;

/// Name of a desktop or window station object.
fn object_name(object: HANDLE) -> Result<String, EnvironmentQueryError> {
    let mut buffer = [0u16; NAME_BUFFER_LEN];
    let mut needed = 0u32;

    unsafe {
        GetUserObjectInformationW(
            object,
            UOI_NAME,
            Some(buffer.as_mut_ptr().cast()),
            (buffer.len() * mem::size_of::<u16>()) as u32,
            Some(&mut needed as *mut u32),
        )
    }
    .map_err(|e| EnvironmentQueryError::os("GetUserObjectInformationW", e))?;

    let len = buffer.iter().position(|&c| c == 0).unwrap_or(buffer.len());
    String::from_utf16(&buffer[..len]).map_err(|_| EnvironmentQueryError::InvalidName)
}

/// Queries the name of the desktop assigned to the calling thread.
///
/// This is the desktop the process was started on. A user-session process
/// keeps reporting `Default` while the secure desktop has input; use
/// [`WindowsInputDesktopProbe`] to follow switches.
///
/// The handle from `GetThreadDesktop` is owned by the system and is not closed.
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsDesktopProbe;

impl WindowsDesktopProbe {
    pub fn new() -> Self {
        Self
    }
}

impl DesktopProbe for WindowsDesktopProbe {
    fn current_desktop_name(&self) -> Result<String, EnvironmentQueryError> {
        let desktop = unsafe { GetThreadDesktop(GetCurrentThreadId()) }
            .map_err(|e| EnvironmentQueryError::os("GetThreadDesktop", e))?;

        object_name(HANDLE(desktop.0 as _))
    }
}

/// Queries the desktop currently receiving input via `OpenInputDesktop`.
///
/// A user-session process is refused access while the secure desktop has
/// input; that refusal is reported as [`InputDesktop::AccessDenied`].
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsInputDesktopProbe;

impl WindowsInputDesktopProbe {
    pub fn new() -> Self {
        Self
    }
}

impl InputDesktopProbe for WindowsInputDesktopProbe {
    fn current_input_desktop(&self) -> Result<InputDesktop, EnvironmentQueryError> {
        let desktop =
            match unsafe { OpenInputDesktop(DESKTOP_CONTROL_FLAGS(0), FALSE, DESKTOP_READOBJECTS) } {
                Ok(desktop) => desktop,
                Err(e) if e.code() == E_ACCESSDENIED => return Ok(InputDesktop::AccessDenied),
                Err(e) => return Err(EnvironmentQueryError::os("OpenInputDesktop", e)),
            };

        let name = object_name(HANDLE(desktop.0 as _));

        if let Err(e) = unsafe { CloseDesktop(desktop) } {
            tracing::warn!(error = %e, "CloseDesktop failed");
        }

        name.map(InputDesktop::Named)
    }
}

thread_local! {
    static HOOK_CALLBACK: RefCell<Option<SwitchCallback>> = const { RefCell::new(None) };
}

unsafe extern "system" fn desktop_switch_proc(
    _hook: HWINEVENTHOOK,
    _event: u32,
    _hwnd: HWND,
    _id_object: i32,
    _id_child: i32,
    _event_thread: u32,
    _event_time: u32,
) {
    HOOK_CALLBACK.with(|slot| {
        if let Some(callback) = slot.borrow().as_ref() {
            callback(DesktopSwitchNotification);
        }
    });
}

/// Receives `EVENT_SYSTEM_DESKTOPSWITCH` from the OS.
///
/// Runs a dedicated thread with a message loop; the out-of-context hook
/// delivers each switch there and the callback runs on that thread. Hand the
/// notification to the application's event thread before reacting to it.
pub struct DesktopSwitchHook {
    thread_id: u32,
    handle: Option<std::thread::JoinHandle<()>>,
}

impl DesktopSwitchHook {
    /// Install the hook. Fails if the OS refuses it.
    pub fn start(callback: SwitchCallback) -> Result<Self, EnvironmentQueryError> {
        let (ready_tx, ready_rx) = crossbeam_channel::bounded(1);

        let handle = std::thread::spawn(move || {
            HOOK_CALLBACK.with(|slot| *slot.borrow_mut() = Some(callback));

            let mut msg = MSG::default();
            unsafe {
                // Creates this thread's message queue so `stop` can post to it.
                let _ = PeekMessageW(&mut msg, HWND::default(), 0, 0, PM_NOREMOVE);

                let hook = SetWinEventHook(
                    EVENT_SYSTEM_DESKTOPSWITCH,
                    EVENT_SYSTEM_DESKTOPSWITCH,
                    HMODULE::default(),
                    Some(desktop_switch_proc),
                    0,
                    0,
                    WINEVENT_OUTOFCONTEXT,
                );

                if hook.is_invalid() {
                    let _ = ready_tx.send(Err(EnvironmentQueryError::os(
                        "SetWinEventHook",
                        "hook not installed",
                    )));
                    return;
                }

                let _ = ready_tx.send(Ok(GetCurrentThreadId()));
                tracing::info!("desktop switch hook installed");

                while GetMessageW(&mut msg, HWND::default(), 0, 0).0 > 0 {
                    DispatchMessageW(&msg);
                }

                let _ = UnhookWinEvent(hook);
            }

            tracing::info!("desktop switch hook removed");
        });

        let thread_id = ready_rx
            .recv()
            .map_err(|e| EnvironmentQueryError::os("SetWinEventHook", e))??;

        Ok(Self {
            thread_id,
            handle: Some(handle),
        })
    }

    /// Remove the hook and stop its thread.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Err(e) =
                unsafe { PostThreadMessageW(self.thread_id, WM_QUIT, WPARAM(0), LPARAM(0)) }
            {
                tracing::warn!(error = %e, "failed to stop desktop switch hook");
                return;
            }
            let _ = handle.join();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for DesktopSwitchHook {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_thread_desktop_has_a_name() {
        // Result depends on the session; the query itself must succeed.
        let name = WindowsDesktopProbe::new().current_desktop_name().unwrap();
        assert!(!name.is_empty());
    }

    #[test]
    fn test_input_desktop_query_answers() {
        // Named on an interactive session, AccessDenied behind a UAC prompt.
        let desktop = WindowsInputDesktopProbe::new().current_input_desktop().unwrap();
        if let InputDesktop::Named(name) = desktop {
            assert!(!name.is_empty());
        }
    }

    #[test]
    fn test_hook_lifecycle() {
        let mut hook = DesktopSwitchHook::start(Arc::new(|_: DesktopSwitchNotification| {})).unwrap();
        assert!(hook.is_running());
        hook.stop();
        assert!(!hook.is_running());
    }
}
