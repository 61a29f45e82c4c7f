#![cfg(target_os = "windows")]

//! Windows Raw Input backend.
//!
//! The Win32 surface this crate uses:
//! - **Device queries** via `GetRawInputDeviceList` / `GetRawInputDeviceInfoW`
//! - **Window plumbing**: subclassing, the message-only helper window, and
//!   `RegisterRawInputDevices`
//! - **Payload fetch** via `GetRawInputData` during `WM_INPUT`
//! - **Layout probing** via `MapVirtualKeyW` / `GetKeyNameTextW` / `ToUnicode`
//!
//! Most users should not touch these modules directly; prefer
//! [`hook_raw_input_for_window`](crate::hook::hook_raw_input_for_window) and
//! the catalog functions. The fetch step is exposed through
//! [`decode_wm_input`](crate::hook::decode_wm_input) for host applications
//! that own the Win32 message loop.

pub mod device_query;
pub mod key_layout;
pub mod raw_input;
pub mod window_hook;

use windows_sys::Win32::Foundation::GetLastError;

use crate::error::Error;

/// The failure of the named call, with the thread's last-error code.
pub(crate) fn last_error(call: &'static str) -> Error {
    Error::Os {
        call,
        code: unsafe { GetLastError() },
    }
}

/// NUL-terminated UTF-16 for the `W` family of calls.
pub(crate) fn to_wstring(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}
