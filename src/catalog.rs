//! Connected-device catalog over `GetRawInputDeviceList`.
//!
//! Raw Input hands out opaque device `HANDLE`s; everything human-readable
//! about a device comes from per-handle queries. Those cost system calls,
//! and `WM_INPUT` arrives at input rate, so the catalog keeps every device
//! it has resolved in a process-wide cache keyed by handle.
//!
//! ## Cache policy
//! - [`get_device`] serves from the cache and resolves unseen handles on
//!   demand; during an event burst only the first notification pays for the
//!   lookup.
//! - [`list_devices`] re-enumerates and replaces the cache wholesale. A
//!   completed listing is also how stale entries leave the cache.
//! - Handles are session-scoped and the OS may reuse them. [`is_connected`]
//!   re-probes a handle without touching the cache.
//!
//! The OS boundary is the [`DeviceQuery`] seam; the cache and the entry
//! assembly behind it are host-independent.

// Off-Windows builds only exercise this module from tests.
#![cfg_attr(not(target_os = "windows"), allow(dead_code))]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
#[cfg(target_os = "windows")]
use std::sync::OnceLock;

use crate::decode::{RIM_TYPEHID, RIM_TYPEKEYBOARD, RIM_TYPEMOUSE};
use crate::device::{
    DeviceHandle, HidDevice, KeyboardDevice, MouseDevice, RawDeviceInfo, RawInputDevice,
};
use crate::error::{Error, Result};
use crate::metadata;

const ERROR_INVALID_HANDLE: u32 = 6;

/// Per-handle device queries, answered by `GetRawInputDeviceList` and
/// `GetRawInputDeviceInfoW` on Windows and by mocks in tests.
pub(crate) trait DeviceQuery {
    /// All currently registered devices as `(type discriminant, handle)`.
    fn enumerate(&self) -> Result<Vec<(u32, DeviceHandle)>>;

    /// The device interface path (`RIDI_DEVICENAME`).
    fn device_name(&self, handle: DeviceHandle) -> Result<String>;

    /// The class-specific info block (`RIDI_DEVICEINFO`).
    fn device_info(&self, handle: DeviceHandle) -> Result<RawDeviceInfo>;

    /// Name size query only, to learn whether the handle is still alive.
    fn probe_name(&self, handle: DeviceHandle) -> Result<()>;

    /// Product string for a device interface path, when a side channel has
    /// one. Purely cosmetic, so `None` is always acceptable.
    fn product_string(&self, _path: &str) -> Option<String> {
        None
    }
}

/// Handle-keyed cache of resolved devices.
pub(crate) struct DeviceCatalog {
    devices: Mutex<HashMap<DeviceHandle, Arc<RawInputDevice>>>,
}

impl DeviceCatalog {
    fn new() -> Self {
        Self {
            devices: Mutex::new(HashMap::new()),
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<DeviceHandle, Arc<RawInputDevice>>> {
        // The map is swapped or inserted into atomically; a poisoned lock
        // still guards a consistent map.
        self.devices.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Cache-or-resolve lookup for one handle.
    ///
    /// A cached handle is served as-is; the discriminant is only consulted
    /// when the handle has to be resolved.
    pub(crate) fn get_with(
        &self,
        query: &dyn DeviceQuery,
        kind: u32,
        handle: DeviceHandle,
    ) -> Result<Arc<RawInputDevice>> {
        let mut entries = self.entries();
        if let Some(device) = entries.get(&handle) {
            return Ok(Arc::clone(device));
        }
        check_kind(kind)?;
        let device = build_device(query, handle)?;
        #[cfg(feature = "debug-log")]
        eprintln!(
            "[RAWIN/CATALOG] cached handle {} ({})",
            handle.0,
            device.name()
        );
        entries.insert(handle, Arc::clone(&device));
        Ok(device)
    }

    /// Enumerate everything and replace the cache with the outcome.
    ///
    /// The swap happens only after every entry resolved, so a failing
    /// enumeration leaves the previous cache intact.
    pub(crate) fn list_with(&self, query: &dyn DeviceQuery) -> Result<Vec<Arc<RawInputDevice>>> {
        let enumerated = query.enumerate()?;
        let mut fresh = HashMap::with_capacity(enumerated.len());
        let mut listed = Vec::with_capacity(enumerated.len());
        for (kind, handle) in enumerated {
            check_kind(kind)?;
            if fresh.contains_key(&handle) {
                continue;
            }
            let device = build_device(query, handle)?;
            fresh.insert(handle, Arc::clone(&device));
            listed.push(device);
        }
        #[cfg(feature = "debug-log")]
        eprintln!("[RAWIN/CATALOG] enumerated {} device(s)", listed.len());
        *self.entries() = fresh;
        Ok(listed)
    }
}

fn check_kind(kind: u32) -> Result<()> {
    match kind {
        RIM_TYPEMOUSE | RIM_TYPEKEYBOARD | RIM_TYPEHID => Ok(()),
        other => Err(Error::UnsupportedDeviceClass(other)),
    }
}

/// Resolve one handle into a tagged catalog entry, rendering the numeric
/// info block through the [`metadata`] tables.
fn build_device(query: &dyn DeviceQuery, handle: DeviceHandle) -> Result<Arc<RawInputDevice>> {
    let name = query.device_name(handle)?;
    let device = match query.device_info(handle)? {
        RawDeviceInfo::Mouse {
            id,
            buttons,
            sample_rate,
            has_horizontal_wheel,
        } => RawInputDevice::Mouse(MouseDevice {
            handle,
            name,
            kind: metadata::mouse_kind(id),
            buttons,
            sample_rate: metadata::sample_rate(sample_rate),
            has_horizontal_wheel,
        }),

        RawDeviceInfo::Keyboard {
            kind,
            subtype,
            scan_code_mode,
            function_keys,
            indicators,
            total_keys,
        } => RawInputDevice::Keyboard(KeyboardDevice {
            handle,
            name,
            kind: metadata::keyboard_kind(kind),
            subtype,
            scan_code_mode,
            function_keys,
            indicators,
            total_keys,
        }),

        RawDeviceInfo::Hid {
            vendor_id,
            product_id,
            version,
            usage_page,
            usage,
        } => {
            let product = query.product_string(&name);
            RawInputDevice::Hid(HidDevice {
                handle,
                name,
                vendor_id: vendor_id as u16,
                product_id: product_id as u16,
                version,
                usage_page,
                usage_page_name: metadata::usage_page_name(usage_page),
                usage,
                usage_name: metadata::usage_name(usage_page, usage),
                product,
            })
        }
    };
    Ok(Arc::new(device))
}

/// Liveness check behind [`is_connected`]: a name size query that fails
/// with `ERROR_INVALID_HANDLE` means the device is gone. Any other failure
/// is a real error and propagates.
pub(crate) fn probe_connected(query: &dyn DeviceQuery, handle: DeviceHandle) -> Result<bool> {
    match query.probe_name(handle) {
        Ok(()) => Ok(true),
        Err(Error::Os {
            code: ERROR_INVALID_HANDLE,
            ..
        }) => Ok(false),
        Err(err) => Err(err),
    }
}

#[cfg(target_os = "windows")]
static CATALOG: OnceLock<DeviceCatalog> = OnceLock::new();

#[cfg(target_os = "windows")]
pub(crate) fn global() -> &'static DeviceCatalog {
    CATALOG.get_or_init(DeviceCatalog::new)
}

/// Enumerate every device currently registered with Raw Input.
///
/// Replaces the process-wide cache with the result, so calling this is also
/// how the cache sheds devices that have been unplugged.
#[cfg(target_os = "windows")]
#[cfg_attr(docsrs, doc(cfg(target_os = "windows")))]
pub fn list_devices() -> Result<Vec<Arc<RawInputDevice>>> {
    global().list_with(&crate::backends::windows::device_query::WinDeviceQuery)
}

/// Resolve the device behind a `WM_INPUT` header.
///
/// `kind` is the `RAWINPUTHEADER.dwType` discriminant (mouse 0, keyboard 1,
/// HID 2). Served from the cache when possible; an unknown discriminant
/// only fails a lookup that has to resolve the handle.
#[cfg(target_os = "windows")]
#[cfg_attr(docsrs, doc(cfg(target_os = "windows")))]
pub fn get_device(kind: u32, handle: DeviceHandle) -> Result<Arc<RawInputDevice>> {
    global().get_with(
        &crate::backends::windows::device_query::WinDeviceQuery,
        kind,
        handle,
    )
}

/// Whether the OS still answers for this device's handle.
///
/// Only `ERROR_INVALID_HANDLE` maps to `Ok(false)`; other query failures
/// stay errors instead of being misread as an unplug.
#[cfg(target_os = "windows")]
#[cfg_attr(docsrs, doc(cfg(target_os = "windows")))]
pub fn is_connected(device: &RawInputDevice) -> Result<bool> {
    probe_connected(
        &crate::backends::windows::device_query::WinDeviceQuery,
        device.handle(),
    )
}
