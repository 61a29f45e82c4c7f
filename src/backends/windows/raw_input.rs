//! `WM_INPUT` payload fetch.
//!
//! This module is intentionally "dumb": it copies one notification's bytes
//! out of the OS and hands them to the portable parser in
//! [`decode`](crate::decode). No interpretation happens here.
//!
//! ## Conventions
//! - Two-phase fetch: a size query (null buffer, returns 0 on success)
//!   followed by the copy. The OS tells us the size; we never guess it.
//! - The copy must happen while the `WM_INPUT` message is being handled.
//!   The `HRAWINPUT` behind `lparam` is only valid until the message is
//!   dispatched; the returned buffer has no such lifetime.
//! - A byte-count disagreement between the two phases is reported as
//!   [`Error::PayloadSize`](crate::Error::PayloadSize), not papered over.

#![cfg(target_os = "windows")]

use core::ffi::c_void;
use core::mem;
use core::ptr;

use windows_sys::Win32::UI::Input::{GetRawInputData, RAWINPUTHEADER, RID_INPUT};

use super::last_error;
use crate::error::{Error, Result};

/// Copy the complete payload behind a `WM_INPUT` `lparam`.
pub(crate) fn fetch_wm_input(lparam: isize) -> Result<Vec<u8>> {
    let header_size = mem::size_of::<RAWINPUTHEADER>() as u32;

    let mut size = 0u32;
    let rc = unsafe {
        GetRawInputData(
            lparam as _,
            RID_INPUT,
            ptr::null_mut(),
            &mut size,
            header_size,
        )
    };
    if rc != 0 {
        return Err(last_error("GetRawInputData"));
    }

    let mut buf = vec![0u8; size as usize];
    let written = unsafe {
        GetRawInputData(
            lparam as _,
            RID_INPUT,
            buf.as_mut_ptr() as *mut c_void,
            &mut size,
            header_size,
        )
    };
    if written == u32::MAX {
        return Err(last_error("GetRawInputData"));
    }
    if written as usize != buf.len() {
        return Err(Error::PayloadSize {
            expected: buf.len(),
            actual: written as usize,
        });
    }
    Ok(buf)
}
