//! Hook installation: route a window's `WM_INPUT` traffic to a callback.
//!
//! [`hook_raw_input_for_window`] either subclasses a window the host already
//! owns or creates a hidden message-only window, then registers the chosen
//! device classes with `RIDEV_INPUTSINK` so input arrives with or without
//! focus. The crate never pumps messages; whichever thread owns the hooked
//! window keeps running its loop (`GetMessageW`/`DispatchMessageW`) and the
//! callback fires from inside that loop.
//!
//! A window carries at most one hook for the lifetime of the process; a
//! second install on the same window fails with
//! [`Error::AlreadyInstalled`](crate::Error::AlreadyInstalled). Hooks are
//! never uninstalled, which is also what keeps the subclass chain sound.
//!
//! The callback may do ordinary window work. A message it dispatches
//! synchronously back to its own window (setting the title, painting, a
//! modal dialog pumping the queue) re-enters the window procedure while
//! the callback is busy; such nested messages skip the callback and go
//! straight to the previous procedure.

use crate::device::DeviceClass;

/// Classes registered when the caller has no preference: keyboards, mice
/// and controllers.
pub const DEFAULT_DEVICE_CLASSES: [DeviceClass; 3] = [
    DeviceClass::Keyboard,
    DeviceClass::Mouse,
    DeviceClass::Controller,
];

#[cfg(target_os = "windows")]
const WM_INPUT: u32 = 0x00FF;

/// Deliver decoded raw input events from `window` to `callback`.
///
/// With `window: Some(hwnd)` the existing window is subclassed and its other
/// messages keep flowing to the previous procedure. With `window: None` a
/// message-only helper window is created on the calling thread; the caller
/// still has to pump that thread's message loop.
///
/// The callback receives `Err` for notifications that fetched or decoded
/// badly. The window procedure has no caller to return an error to, so the
/// callback channel is where those surface; a notification is never
/// delivered twice.
///
/// Device classes translate to Raw Input usage registrations; see
/// [`DeviceClass`]. Pass [`DEFAULT_DEVICE_CLASSES`] to watch everything this
/// crate decodes.
#[cfg(target_os = "windows")]
#[cfg_attr(docsrs, doc(cfg(target_os = "windows")))]
pub fn hook_raw_input_for_window<F>(
    window: Option<isize>,
    mut callback: F,
    classes: &[DeviceClass],
) -> crate::Result<()>
where
    F: FnMut(crate::Result<crate::event::RawInputEvent>) + Send + 'static,
{
    use crate::backends::windows::window_hook;

    let (hwnd, subclass) = match window {
        Some(hwnd) => (hwnd, true),
        // Created windows run the hook procedure from birth; nothing to
        // subclass.
        None => (window_hook::create_message_window()?, false),
    };
    window_hook::install(
        hwnd,
        subclass,
        Box::new(move |hwnd, message, _wparam, lparam| {
            if message == WM_INPUT {
                callback(decode_wm_input(hwnd, lparam));
            }
        }),
    )?;
    window_hook::register_device_classes(hwnd, classes)?;
    Ok(())
}

/// Fetch and decode one `WM_INPUT` notification.
///
/// `lparam` is the `HRAWINPUT` from the message. Exposed for hosts that
/// already intercept `WM_INPUT` in their own window procedure and only want
/// the decoding; [`hook_raw_input_for_window`] calls this for every
/// notification it sees. Must run during the message (the `HRAWINPUT` is
/// only valid until the message is dispatched).
#[cfg(target_os = "windows")]
#[cfg_attr(docsrs, doc(cfg(target_os = "windows")))]
pub fn decode_wm_input(hwnd: isize, lparam: isize) -> crate::Result<crate::event::RawInputEvent> {
    use std::time::Instant;

    let at = Instant::now();
    let bytes = crate::backends::windows::raw_input::fetch_wm_input(lparam)?;
    let payload = crate::decode::parse_raw_input(&bytes)?;
    let device = crate::catalog::get_device(payload.kind(), payload.device)?;
    crate::decode::decode_payload(
        &payload,
        device,
        crate::keynames::KeyNameTables::current(),
        hwnd,
        at,
    )
}
