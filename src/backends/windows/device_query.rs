//! [`DeviceQuery`] answered by the Raw Input device list.
//!
//! Name and info queries share `GetRawInputDeviceInfoW` with different
//! command values. Both are two-phase for variable-size answers; the name
//! size query doubles as the liveness probe behind
//! [`is_connected`](crate::catalog::is_connected).

#![cfg(target_os = "windows")]

use core::ffi::c_void;
use core::mem;
use core::ptr;

use windows_sys::Win32::UI::Input::{
    GetRawInputDeviceInfoW, GetRawInputDeviceList, RAWINPUTDEVICELIST, RIDI_DEVICEINFO,
    RIDI_DEVICENAME, RID_DEVICE_INFO,
};

use super::last_error;
use crate::catalog::DeviceQuery;
use crate::decode::{RIM_TYPEHID, RIM_TYPEKEYBOARD, RIM_TYPEMOUSE};
use crate::device::{DeviceHandle, RawDeviceInfo};
use crate::error::{Error, Result};

/// The live Win32 implementation of [`DeviceQuery`].
pub(crate) struct WinDeviceQuery;

impl DeviceQuery for WinDeviceQuery {
    fn enumerate(&self) -> Result<Vec<(u32, DeviceHandle)>> {
        let entry_size = mem::size_of::<RAWINPUTDEVICELIST>() as u32;

        let mut count = 0u32;
        let rc =
            unsafe { GetRawInputDeviceList(ptr::null_mut(), &mut count, entry_size) };
        if rc == u32::MAX {
            return Err(last_error("GetRawInputDeviceList"));
        }
        if count == 0 {
            return Ok(Vec::new());
        }

        let mut list = vec![
            RAWINPUTDEVICELIST {
                hDevice: ptr::null_mut(),
                dwType: 0,
            };
            count as usize
        ];
        let stored =
            unsafe { GetRawInputDeviceList(list.as_mut_ptr(), &mut count, entry_size) };
        if stored == u32::MAX {
            return Err(last_error("GetRawInputDeviceList"));
        }
        list.truncate(stored as usize);

        Ok(list
            .iter()
            .map(|entry| (entry.dwType, DeviceHandle(entry.hDevice as isize)))
            .collect())
    }

    fn device_name(&self, handle: DeviceHandle) -> Result<String> {
        // Size is in characters for RIDI_DEVICENAME, and the size query
        // returns 0 on success.
        let mut chars = 0u32;
        let rc = unsafe {
            GetRawInputDeviceInfoW(handle.0 as _, RIDI_DEVICENAME, ptr::null_mut(), &mut chars)
        };
        if rc != 0 {
            return Err(last_error("GetRawInputDeviceInfoW"));
        }

        let mut buf = vec![0u16; chars as usize];
        let written = unsafe {
            GetRawInputDeviceInfoW(
                handle.0 as _,
                RIDI_DEVICENAME,
                buf.as_mut_ptr() as *mut c_void,
                &mut chars,
            )
        };
        if written == u32::MAX {
            return Err(last_error("GetRawInputDeviceInfoW"));
        }
        buf.truncate(written as usize);
        if buf.last() == Some(&0) {
            buf.pop();
        }
        Ok(String::from_utf16_lossy(&buf))
    }

    fn device_info(&self, handle: DeviceHandle) -> Result<RawDeviceInfo> {
        let mut info: RID_DEVICE_INFO = unsafe { mem::zeroed() };
        info.cbSize = mem::size_of::<RID_DEVICE_INFO>() as u32;
        let mut size = info.cbSize;
        let written = unsafe {
            GetRawInputDeviceInfoW(
                handle.0 as _,
                RIDI_DEVICEINFO,
                &mut info as *mut _ as *mut c_void,
                &mut size,
            )
        };
        if written == u32::MAX {
            return Err(last_error("GetRawInputDeviceInfoW"));
        }

        // The union member is selected by dwType.
        Ok(match info.dwType {
            RIM_TYPEMOUSE => {
                let m = unsafe { info.Anonymous.mouse };
                RawDeviceInfo::Mouse {
                    id: m.dwId,
                    buttons: m.dwNumberOfButtons,
                    sample_rate: m.dwSampleRate,
                    has_horizontal_wheel: m.fHasHorizontalWheel != 0,
                }
            }
            RIM_TYPEKEYBOARD => {
                let k = unsafe { info.Anonymous.keyboard };
                RawDeviceInfo::Keyboard {
                    kind: k.dwType,
                    subtype: k.dwSubType,
                    scan_code_mode: k.dwKeyboardMode,
                    function_keys: k.dwNumberOfFunctionKeys,
                    indicators: k.dwNumberOfIndicators,
                    total_keys: k.dwNumberOfKeysTotal,
                }
            }
            RIM_TYPEHID => {
                let h = unsafe { info.Anonymous.hid };
                RawDeviceInfo::Hid {
                    vendor_id: h.dwVendorId,
                    product_id: h.dwProductId,
                    version: h.dwVersionNumber,
                    usage_page: h.usUsagePage,
                    usage: h.usUsage,
                }
            }
            other => return Err(Error::UnsupportedDeviceClass(other)),
        })
    }

    fn probe_name(&self, handle: DeviceHandle) -> Result<()> {
        let mut chars = 0u32;
        let rc = unsafe {
            GetRawInputDeviceInfoW(handle.0 as _, RIDI_DEVICENAME, ptr::null_mut(), &mut chars)
        };
        if rc != 0 {
            return Err(last_error("GetRawInputDeviceInfoW"));
        }
        Ok(())
    }

    /// Look the interface path up in the HID enumeration and take its
    /// product string. Interface paths differ in letter case between the
    /// two APIs, hence the case-insensitive compare. Resolution results are
    /// cached upstream, so the fresh `HidApi` snapshot per call stays off
    /// the hot path.
    #[cfg(feature = "hid")]
    fn product_string(&self, path: &str) -> Option<String> {
        let api = hidapi::HidApi::new().ok()?;
        api.device_list()
            .find(|dev| {
                dev.path()
                    .to_str()
                    .is_ok_and(|p| p.eq_ignore_ascii_case(path))
            })
            .and_then(|dev| dev.product_string().map(str::to_string))
    }
}
