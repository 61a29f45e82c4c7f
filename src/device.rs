//! Device identity and per-class descriptions.
//!
//! Raw Input identifies a device by an opaque handle that stays valid only
//! while the device is connected in the current session; the interface path
//! string is the stable cross-session identifier. [`RawInputDevice`] carries
//! both, plus whatever class-specific capabilities the OS reports.
//!
//! # Conventions
//! - Equality and hashing are defined by the session handle alone. Two
//!   catalog entries are "the same device" exactly when their handles match;
//!   compare `name()` yourself if you need cross-session identity.
//! - Sub-kind labels (`kind`, usage names) come from fixed tables in
//!   [`metadata`](crate::metadata); codes the tables do not know resolve to
//!   `"unknown"` instead of failing, because hardware reports undocumented
//!   values in practice.
//! - A reported sample rate of zero means "not available" and is stored as
//!   `None`.

use serde::Serialize;

/// Session-scoped Raw Input device handle.
///
/// Valid only while the device stays connected; the OS may reuse the value
/// for a different device later. Revalidate long-held handles with
/// [`is_connected`](crate::catalog::is_connected) before trusting them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DeviceHandle(pub isize);

impl DeviceHandle {
    /// The raw `HANDLE` value as delivered in `RAWINPUTHEADER.hDevice`.
    #[inline]
    pub fn raw(self) -> isize {
        self.0
    }
}

/// A mouse as described by `RID_DEVICE_INFO_MOUSE`.
#[derive(Clone, Debug, Serialize)]
pub struct MouseDevice {
    pub handle: DeviceHandle,
    /// Device interface path (stable across sessions).
    pub name: String,
    /// Sub-kind label resolved from the numeric id ("HID mouse", ...).
    pub kind: &'static str,
    /// Number of buttons the driver reports.
    pub buttons: u32,
    /// Sample rate in Hz; `None` when the driver reports zero.
    pub sample_rate: Option<u32>,
    pub has_horizontal_wheel: bool,
}

/// A keyboard as described by `RID_DEVICE_INFO_KEYBOARD`.
#[derive(Clone, Debug, Serialize)]
pub struct KeyboardDevice {
    pub handle: DeviceHandle,
    /// Device interface path (stable across sessions).
    pub name: String,
    /// Sub-kind label resolved from the numeric type ("Enhanced 101- or
    /// 102-key keyboard...", ...).
    pub kind: &'static str,
    pub subtype: u32,
    /// Scan code mode (1 = make/break codes).
    pub scan_code_mode: u32,
    pub function_keys: u32,
    /// Number of LED indicators.
    pub indicators: u32,
    pub total_keys: u32,
}

/// A generic HID device as described by `RID_DEVICE_INFO_HID`.
#[derive(Clone, Debug, Serialize)]
pub struct HidDevice {
    pub handle: DeviceHandle,
    /// Device interface path (stable across sessions).
    pub name: String,
    pub vendor_id: u16,
    pub product_id: u16,
    pub version: u32,
    pub usage_page: u16,
    /// Usage page label, `"unknown"` for undocumented pages.
    pub usage_page_name: &'static str,
    pub usage: u16,
    /// Usage label within the page, `"unknown"` outside the known set.
    pub usage_name: &'static str,
    /// Friendly product string resolved from the HID driver, when available.
    pub product: Option<String>,
}

impl HidDevice {
    /// Whether this device reports a Generic Desktop controller usage
    /// (joystick, game pad or multi-axis controller). Events from such
    /// devices are tagged [`DeviceType::Controller`](crate::event::DeviceType).
    pub fn is_controller(&self) -> bool {
        self.usage_page == GENERIC_DESKTOP_PAGE
            && matches!(self.usage, USAGE_JOYSTICK | USAGE_GAME_PAD | USAGE_MULTI_AXIS)
    }
}

/// One enumerated Raw Input device.
///
/// The variant is fixed at creation; the catalog never reclassifies an entry.
#[derive(Clone, Debug, Serialize)]
pub enum RawInputDevice {
    Mouse(MouseDevice),
    Keyboard(KeyboardDevice),
    Hid(HidDevice),
}

impl RawInputDevice {
    /// Session-scoped handle this device was enumerated under.
    pub fn handle(&self) -> DeviceHandle {
        match self {
            RawInputDevice::Mouse(d) => d.handle,
            RawInputDevice::Keyboard(d) => d.handle,
            RawInputDevice::Hid(d) => d.handle,
        }
    }

    /// Device interface path (stable across sessions).
    pub fn name(&self) -> &str {
        match self {
            RawInputDevice::Mouse(d) => &d.name,
            RawInputDevice::Keyboard(d) => &d.name,
            RawInputDevice::Hid(d) => &d.name,
        }
    }

    /// Whether the OS still knows this handle. See
    /// [`catalog::is_connected`](crate::catalog::is_connected).
    #[cfg(target_os = "windows")]
    #[cfg_attr(docsrs, doc(cfg(target_os = "windows")))]
    pub fn is_connected(&self) -> crate::Result<bool> {
        crate::catalog::is_connected(self)
    }
}

// Catalog identity is the handle, nothing else. Metadata can differ between
// a cached entry and a fresh lookup without making them different devices.
impl PartialEq for RawInputDevice {
    fn eq(&self, other: &Self) -> bool {
        self.handle() == other.handle()
    }
}

impl Eq for RawInputDevice {}

impl std::hash::Hash for RawInputDevice {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.handle().hash(state);
    }
}

// HID usage constants referenced across the crate. Kept local rather than
// imported: windows-sys moves these between modules across versions.
pub(crate) const GENERIC_DESKTOP_PAGE: u16 = 0x01;
pub(crate) const USAGE_MOUSE: u16 = 0x02;
pub(crate) const USAGE_JOYSTICK: u16 = 0x04;
pub(crate) const USAGE_GAME_PAD: u16 = 0x05;
pub(crate) const USAGE_KEYBOARD: u16 = 0x06;
pub(crate) const USAGE_MULTI_AXIS: u16 = 0x08;

/// Device classes that can be subscribed to raw input delivery.
///
/// Each class expands to one or more (usage page, usage) pairs on the
/// Generic Desktop page; `Controller` covers joysticks, game pads and
/// multi-axis controllers in a single registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum DeviceClass {
    Keyboard,
    Mouse,
    Controller,
}

impl DeviceClass {
    /// (usage page, usage) pairs registered for this class.
    pub fn usages(self) -> &'static [(u16, u16)] {
        match self {
            DeviceClass::Keyboard => &[(GENERIC_DESKTOP_PAGE, USAGE_KEYBOARD)],
            DeviceClass::Mouse => &[(GENERIC_DESKTOP_PAGE, USAGE_MOUSE)],
            DeviceClass::Controller => &[
                (GENERIC_DESKTOP_PAGE, USAGE_JOYSTICK),
                (GENERIC_DESKTOP_PAGE, USAGE_GAME_PAD),
                (GENERIC_DESKTOP_PAGE, USAGE_MULTI_AXIS),
            ],
        }
    }
}

/// Raw class-specific info block as read from `RIDI_DEVICEINFO`, before the
/// catalog turns it into a tagged [`RawInputDevice`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RawDeviceInfo {
    Mouse {
        id: u32,
        buttons: u32,
        sample_rate: u32,
        has_horizontal_wheel: bool,
    },
    Keyboard {
        kind: u32,
        subtype: u32,
        scan_code_mode: u32,
        function_keys: u32,
        indicators: u32,
        total_keys: u32,
    },
    Hid {
        vendor_id: u32,
        product_id: u32,
        version: u32,
        usage_page: u16,
        usage: u16,
    },
}
