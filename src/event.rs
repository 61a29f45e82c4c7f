//! Normalized raw input events.
//!
//! Every `WM_INPUT` notification decodes into one [`RawInputEvent`]: a small,
//! short-lived value handed to the callback and not stored anywhere by this
//! crate.
//!
//! ## Value conventions
//! - **Mouse deltas** are raw OS counts exactly as Raw Input reports them,
//!   not pixels and not normalized. Absolute-mode devices (tablets, some
//!   touchpads) report absolute coordinates in the same fields.
//! - **Wheel turns** arrive as discrete [`EventKind::WheelUp`] /
//!   [`EventKind::WheelDown`] events, one per notification, regardless of
//!   the delta magnitude the device packed into the payload.
//! - **Key codes** are hardware scan codes (layout-independent); the `name`
//!   is resolved through the fixed virtual-key table or the current layout.
//! - **HID reports** are delivered undecoded in `data`; parsing report
//!   descriptors is the embedder's business.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::device::RawInputDevice;

/// What happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Key or button pressed.
    Down,
    /// Key or button released.
    Up,
    /// Mouse motion sample (no buttons involved).
    Move,
    /// Vertical wheel rotated away from the user.
    WheelUp,
    /// Vertical wheel rotated toward the user.
    WheelDown,
    /// Raw HID report received.
    Data,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Down => "down",
            EventKind::Up => "up",
            EventKind::Move => "move",
            EventKind::WheelUp => "wheel-up",
            EventKind::WheelDown => "wheel-down",
            EventKind::Data => "data",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which kind of device produced the event.
///
/// `Keypad` is reported for keys on the numeric block of a keyboard;
/// `Controller` for HID devices with a Generic Desktop controller usage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeviceType {
    Keyboard,
    Keypad,
    Mouse,
    Hid,
    Controller,
}

impl DeviceType {
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceType::Keyboard => "keyboard",
            DeviceType::Keypad => "keypad",
            DeviceType::Mouse => "mouse",
            DeviceType::Hid => "hid",
            DeviceType::Controller => "controller",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One decoded raw input notification.
#[derive(Clone, Debug)]
pub struct RawInputEvent {
    /// What happened.
    pub kind: EventKind,
    /// Scan code for keys, button index for mouse buttons (left = 1,
    /// middle/wheel = 2, right = 3, thumbs = 4/5). `None` for motion samples
    /// and HID reports.
    pub code: Option<u16>,
    /// Human-readable name: key name, button name, or a `"<count> x <size>
    /// bytes"` summary for HID reports. `None` for motion samples.
    pub name: Option<String>,
    /// Kind of device the event came from.
    pub device_type: DeviceType,
    /// The catalog entry for the device that produced the event.
    pub device: Arc<RawInputDevice>,
    /// Horizontal motion delta, raw counts. Motion samples only.
    pub delta_x: Option<i32>,
    /// Vertical motion delta, raw counts. Motion samples only.
    pub delta_y: Option<i32>,
    /// Window the notification was delivered to (raw `HWND` value).
    pub hwnd: isize,
    /// Capture time (monotonic), taken when decoding began. Suitable for
    /// ordering and delta timing within a run.
    pub at: Instant,
    /// Raw report bytes for HID events, exactly `dwSizeHid * dwCount` long.
    pub data: Option<Vec<u8>>,
}

impl fmt::Display for RawInputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.device_type, self.kind)?;
        if let Some(name) = &self.name {
            write!(f, " {name:?}")?;
        }
        if let (Some(dx), Some(dy)) = (self.delta_x, self.delta_y) {
            write!(f, " ({dx:+}, {dy:+})")?;
        }
        Ok(())
    }
}
