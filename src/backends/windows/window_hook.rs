//! Window-procedure plumbing: subclassing, the hidden helper window, and
//! device-class registration.
//!
//! The OS holds exactly one function pointer per hooked window, and it must
//! stay callable for the life of the process. That pointer is always the
//! static [`hook_proc`] trampoline; per-window state (the boxed hook and
//! the previous procedure) lives in a process-wide [`HookMap`] that is
//! inserted into and never drained.
//!
//! ## Conventions
//! - One hook per window. A second install fails with
//!   [`Error::AlreadyInstalled`]; stacking is not supported.
//! - Subclassed windows chain to their previous procedure after the hook
//!   runs; windows created here fall through to `DefWindowProcW`.
//! - No lock is held while a hook runs. A message dispatched synchronously
//!   from inside a hook re-enters [`hook_proc`] on the same thread, finds
//!   the hook checked out, and forwards straight to the previous procedure.

#![cfg(target_os = "windows")]

use core::mem;
use core::ptr;
use std::sync::OnceLock;

use windows_sys::Win32::Foundation::{
    ERROR_CLASS_ALREADY_EXISTS, GetLastError, HWND, LPARAM, LRESULT, WPARAM,
};
use windows_sys::Win32::System::LibraryLoader::GetModuleHandleW;
use windows_sys::Win32::UI::Input::{RegisterRawInputDevices, RAWINPUTDEVICE, RIDEV_INPUTSINK};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    CallWindowProcW, CreateWindowExW, DefWindowProcW, RegisterClassExW, GWLP_WNDPROC,
    HWND_MESSAGE, WNDCLASSEXW, WNDPROC,
};
#[cfg(target_pointer_width = "64")]
use windows_sys::Win32::UI::WindowsAndMessaging::SetWindowLongPtrW;

use super::{last_error, to_wstring};
use crate::backends::hook_map::{HookFn, HookMap};
use crate::device::DeviceClass;
use crate::error::{Error, Result};

// user32 only exports the pointer-sized setter on 64-bit targets; the
// 32-bit spelling is SetWindowLongW.
#[cfg(target_pointer_width = "32")]
#[allow(non_snake_case)]
unsafe fn SetWindowLongPtrW(
    hwnd: HWND,
    index: windows_sys::Win32::UI::WindowsAndMessaging::WINDOW_LONG_PTR_INDEX,
    value: isize,
) -> isize {
    windows_sys::Win32::UI::WindowsAndMessaging::SetWindowLongW(hwnd, index, value as i32) as isize
}

const WINDOW_CLASS_NAME: &str = "rawsink_message_window";

static HOOKS: OnceLock<HookMap> = OnceLock::new();

fn hooks() -> &'static HookMap {
    HOOKS.get_or_init(HookMap::new)
}

/// The one window procedure the OS ever sees. Checks the registered hook
/// out of the map, runs it unlocked, then forwards to the previous
/// procedure (subclassed windows) or to `DefWindowProcW` (created windows,
/// messages that arrive during `CreateWindowExW` before the slot exists,
/// and nested messages that find the hook already out).
unsafe extern "system" fn hook_proc(
    hwnd: HWND,
    message: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let prev = hooks().dispatch(hwnd as isize, message, wparam, lparam);
    if prev == 0 {
        DefWindowProcW(hwnd, message, wparam, lparam)
    } else {
        let prev_proc: WNDPROC = mem::transmute(prev);
        CallWindowProcW(prev_proc, hwnd, message, wparam, lparam)
    }
}

/// Register `hook` for `hwnd`, subclassing the window when it is not one of
/// ours.
pub(crate) fn install(hwnd: isize, subclass: bool, hook: HookFn) -> Result<()> {
    let _prev = hooks().install(hwnd, hook, || {
        if !subclass {
            return Ok(0);
        }
        let prev =
            unsafe { SetWindowLongPtrW(hwnd as _, GWLP_WNDPROC, hook_proc as usize as isize) };
        if prev == 0 {
            return Err(last_error("SetWindowLongPtrW"));
        }
        Ok(prev)
    })?;
    #[cfg(feature = "debug-log")]
    eprintln!("[RAWIN/HOOK] installed on hwnd {hwnd:#x} (prev {_prev:#x})");
    Ok(())
}

/// Create the hidden message-only helper window. Its class is registered
/// once per process and points straight at [`hook_proc`].
pub(crate) fn create_message_window() -> Result<isize> {
    let class_name = to_wstring(WINDOW_CLASS_NAME);
    let module = unsafe { GetModuleHandleW(ptr::null()) };

    let mut class: WNDCLASSEXW = unsafe { mem::zeroed() };
    class.cbSize = mem::size_of::<WNDCLASSEXW>() as u32;
    class.lpfnWndProc = Some(hook_proc);
    class.hInstance = module;
    class.lpszClassName = class_name.as_ptr();

    if unsafe { RegisterClassExW(&class) } == 0 {
        let code = unsafe { GetLastError() };
        // Every helper window after the first reuses the class.
        if code != ERROR_CLASS_ALREADY_EXISTS {
            return Err(Error::Os {
                call: "RegisterClassExW",
                code,
            });
        }
    }

    let hwnd = unsafe {
        CreateWindowExW(
            0,
            class_name.as_ptr(),
            ptr::null(),
            0,
            0,
            0,
            0,
            0,
            HWND_MESSAGE,
            ptr::null_mut(),
            module,
            ptr::null(),
        )
    };
    if hwnd.is_null() {
        return Err(last_error("CreateWindowExW"));
    }
    #[cfg(feature = "debug-log")]
    eprintln!(
        "[RAWIN/HOOK] created message-only window {:#x}",
        hwnd as isize
    );
    Ok(hwnd as isize)
}

/// Subscribe `hwnd` to the given device classes, one `RAWINPUTDEVICE` per
/// (usage page, usage), in a single `RegisterRawInputDevices` call.
/// `RIDEV_INPUTSINK` keeps events coming while the window is unfocused.
pub(crate) fn register_device_classes(hwnd: isize, classes: &[DeviceClass]) -> Result<()> {
    let registrations: Vec<RAWINPUTDEVICE> = classes
        .iter()
        .flat_map(|class| class.usages().iter().copied())
        .map(|(page, usage)| RAWINPUTDEVICE {
            usUsagePage: page,
            usUsage: usage,
            dwFlags: RIDEV_INPUTSINK,
            hwndTarget: hwnd as _,
        })
        .collect();
    if registrations.is_empty() {
        return Ok(());
    }

    let ok = unsafe {
        RegisterRawInputDevices(
            registrations.as_ptr(),
            registrations.len() as u32,
            mem::size_of::<RAWINPUTDEVICE>() as u32,
        )
    };
    if ok == 0 {
        return Err(last_error("RegisterRawInputDevices"));
    }
    #[cfg(feature = "debug-log")]
    eprintln!(
        "[RAWIN/HOOK] {} usage registration(s) for hwnd {hwnd:#x}",
        registrations.len()
    );
    Ok(())
}
