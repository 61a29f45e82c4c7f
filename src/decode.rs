//! `WM_INPUT` payload parsing and event decoding.
//!
//! This module is intentionally free of OS calls: it turns bytes already
//! fetched by `GetRawInputData` into [`RawPayload`] values and those into
//! [`RawInputEvent`]s. The `cfg(windows)` fetch lives in
//! [`backends::windows::raw_input`](crate::backends::windows::raw_input);
//! everything here works on any host, which is also what makes the decode
//! path testable off-Windows.
//!
//! It is public to support host applications that own the Win32 message loop
//! and fetch `WM_INPUT` payloads themselves: copy the bytes during the
//! message, then parse and decode whenever convenient.
//!
//! ## Layout notes
//! - The structs below mirror `RAWINPUTHEADER`, `RAWKEYBOARD`, `RAWMOUSE`
//!   and the fixed head of `RAWHID` byte for byte, including the alignment
//!   padding inside `RAWMOUSE`. Handle-sized fields use `usize`, so the
//!   mirrors stay correct on both pointer widths.
//! - Keyboard and mouse payloads have exactly one fixed size each; anything
//!   else is malformed and reported as [`Error::PayloadSize`], never decoded
//!   on a guess.

use std::sync::Arc;
use std::time::Instant;

use crate::device::{DeviceHandle, RawInputDevice};
use crate::error::{Error, Result};
use crate::event::{DeviceType, EventKind, RawInputEvent};
use crate::keynames::{virtual_key, KeyNameTables};

// Local constants (avoid relying on module exports that vary by windows-sys
// version, and keep this module portable).
pub(crate) const RIM_TYPEMOUSE: u32 = 0;
pub(crate) const RIM_TYPEKEYBOARD: u32 = 1;
pub(crate) const RIM_TYPEHID: u32 = 2;

const WM_KEYDOWN: u32 = 0x0100;
const WM_KEYUP: u32 = 0x0101;
const WM_SYSKEYDOWN: u32 = 0x0104;

const RI_MOUSE_LEFT_BUTTON_DOWN: u16 = 0x0001;
const RI_MOUSE_LEFT_BUTTON_UP: u16 = 0x0002;
const RI_MOUSE_RIGHT_BUTTON_DOWN: u16 = 0x0004;
const RI_MOUSE_RIGHT_BUTTON_UP: u16 = 0x0008;
const RI_MOUSE_MIDDLE_BUTTON_DOWN: u16 = 0x0010;
const RI_MOUSE_MIDDLE_BUTTON_UP: u16 = 0x0020;
const RI_MOUSE_BUTTON_4_DOWN: u16 = 0x0040;
const RI_MOUSE_BUTTON_4_UP: u16 = 0x0080;
const RI_MOUSE_BUTTON_5_DOWN: u16 = 0x0100;
const RI_MOUSE_BUTTON_5_UP: u16 = 0x0200;
const RI_MOUSE_WHEEL: u16 = 0x0400;

/// `RAWINPUTHEADER`: type discriminant, total size, source device, wParam.
#[repr(C)]
#[derive(Clone, Copy)]
struct RawInputHeader {
    kind: u32,
    size: u32,
    device: usize,
    wparam: usize,
}

/// `RAWKEYBOARD`, 16 bytes.
#[repr(C)]
#[derive(Clone, Copy)]
struct RawKeyboardData {
    make_code: u16,
    flags: u16,
    reserved: u16,
    vkey: u16,
    message: u32,
    extra_information: u32,
}

/// `RAWMOUSE`, 24 bytes. The button union is spelled out as its two `u16`
/// halves (flags, then wheel data) at offset 4; `_pad` keeps the offsets
/// aligned the way the C union does.
#[repr(C)]
#[derive(Clone, Copy)]
struct RawMouseData {
    flags: u16,
    _pad: u16,
    button_flags: u16,
    button_data: u16,
    raw_buttons: u32,
    last_x: i32,
    last_y: i32,
    extra_information: u32,
}

/// Fixed head of `RAWHID`; `size_hid * count` report bytes follow.
#[repr(C)]
#[derive(Clone, Copy)]
struct RawHidHeader {
    size_hid: u32,
    count: u32,
}

const HEADER_SIZE: usize = core::mem::size_of::<RawInputHeader>();
const KEYBOARD_PAYLOAD_SIZE: usize = HEADER_SIZE + core::mem::size_of::<RawKeyboardData>();
const MOUSE_PAYLOAD_SIZE: usize = HEADER_SIZE + core::mem::size_of::<RawMouseData>();
const HID_HEAD_SIZE: usize = HEADER_SIZE + core::mem::size_of::<RawHidHeader>();

/// Keyboard portion of a parsed payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyboardPayload {
    /// Hardware scan code.
    pub scan_code: u16,
    /// `RI_KEY_*` flag bits (break/E0/E1).
    pub flags: u16,
    /// Virtual-key code.
    pub vkey: u16,
    /// Originating window message (`WM_KEYDOWN`, ...).
    pub message: u32,
}

/// Mouse portion of a parsed payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MousePayload {
    /// `MOUSE_MOVE_*` mode bits (relative/absolute).
    pub flags: u16,
    /// `RI_MOUSE_*` button transition bits.
    pub button_flags: u16,
    /// Wheel delta when a wheel bit is set; hardware-defined otherwise.
    pub button_data: u16,
    /// Raw horizontal delta (or absolute coordinate).
    pub last_x: i32,
    /// Raw vertical delta (or absolute coordinate).
    pub last_y: i32,
}

/// HID portion of a parsed payload: the exact report span, nothing more.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HidPayload {
    /// Bytes per report.
    pub size: u32,
    /// Number of reports in this notification.
    pub count: u32,
    /// Exactly `size * count` bytes.
    pub data: Vec<u8>,
}

/// Class-discriminated body of one notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PayloadBody {
    Keyboard(KeyboardPayload),
    Mouse(MousePayload),
    Hid(HidPayload),
}

/// One parsed `RID_INPUT` payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawPayload {
    /// Device the notification came from.
    pub device: DeviceHandle,
    pub body: PayloadBody,
}

impl RawPayload {
    /// Raw input type discriminant for the body (mouse 0, keyboard 1, HID 2).
    pub fn kind(&self) -> u32 {
        match self.body {
            PayloadBody::Mouse(_) => RIM_TYPEMOUSE,
            PayloadBody::Keyboard(_) => RIM_TYPEKEYBOARD,
            PayloadBody::Hid(_) => RIM_TYPEHID,
        }
    }
}

/// Parse a raw `RID_INPUT` payload (bytes returned by `GetRawInputData`).
///
/// Safe to call after the message was dispatched, as long as the bytes were
/// copied during `WM_INPUT`. The buffer must be the complete payload: the
/// declared header size is cross-checked against the buffer length, and the
/// keyboard/mouse bodies against their fixed layouts.
pub fn parse_raw_input(buf: &[u8]) -> Result<RawPayload> {
    if buf.len() < HEADER_SIZE {
        return Err(Error::PayloadSize {
            expected: HEADER_SIZE,
            actual: buf.len(),
        });
    }

    // The buffers come from GetRawInputData without any alignment promise,
    // hence read_unaligned. Lengths are checked before every read.
    let hdr: RawInputHeader =
        unsafe { core::ptr::read_unaligned(buf.as_ptr() as *const RawInputHeader) };
    if hdr.size as usize != buf.len() {
        return Err(Error::PayloadSize {
            expected: hdr.size as usize,
            actual: buf.len(),
        });
    }

    let device = DeviceHandle(hdr.device as isize);
    let data_ptr = unsafe { buf.as_ptr().add(HEADER_SIZE) };

    let body = match hdr.kind {
        RIM_TYPEKEYBOARD => {
            if buf.len() != KEYBOARD_PAYLOAD_SIZE {
                return Err(Error::PayloadSize {
                    expected: KEYBOARD_PAYLOAD_SIZE,
                    actual: buf.len(),
                });
            }
            let kbd: RawKeyboardData =
                unsafe { core::ptr::read_unaligned(data_ptr as *const RawKeyboardData) };
            PayloadBody::Keyboard(KeyboardPayload {
                scan_code: kbd.make_code,
                flags: kbd.flags,
                vkey: kbd.vkey,
                message: kbd.message,
            })
        }

        RIM_TYPEMOUSE => {
            if buf.len() != MOUSE_PAYLOAD_SIZE {
                return Err(Error::PayloadSize {
                    expected: MOUSE_PAYLOAD_SIZE,
                    actual: buf.len(),
                });
            }
            let m: RawMouseData =
                unsafe { core::ptr::read_unaligned(data_ptr as *const RawMouseData) };
            PayloadBody::Mouse(MousePayload {
                flags: m.flags,
                button_flags: m.button_flags,
                button_data: m.button_data,
                last_x: m.last_x,
                last_y: m.last_y,
            })
        }

        RIM_TYPEHID => {
            if buf.len() < HID_HEAD_SIZE {
                return Err(Error::PayloadSize {
                    expected: HID_HEAD_SIZE,
                    actual: buf.len(),
                });
            }
            let hid: RawHidHeader =
                unsafe { core::ptr::read_unaligned(data_ptr as *const RawHidHeader) };
            // The backing buffer may be larger than the logical report span
            // (alignment slack); copy exactly size * count bytes.
            let span = hid.size_hid as u64 * hid.count as u64;
            let need = HID_HEAD_SIZE as u64 + span;
            if (buf.len() as u64) < need {
                return Err(Error::PayloadSize {
                    expected: need as usize,
                    actual: buf.len(),
                });
            }
            let start = HID_HEAD_SIZE;
            let end = start + span as usize;
            PayloadBody::Hid(HidPayload {
                size: hid.size_hid,
                count: hid.count,
                data: buf[start..end].to_vec(),
            })
        }

        other => return Err(Error::UnsupportedDeviceClass(other)),
    };

    Ok(RawPayload { device, body })
}

/// `down`/`up` for a keyboard message code.
///
/// `WM_SYSKEYDOWN` counts as `down`: AltGr sequences deliver their second
/// key with that code. Anything else fails rather than acquiring a meaning.
fn key_event_kind(message: u32) -> Result<EventKind> {
    match message {
        WM_KEYDOWN | WM_SYSKEYDOWN => Ok(EventKind::Down),
        WM_KEYUP => Ok(EventKind::Up),
        other => Err(Error::UnknownKeyMessage(other)),
    }
}

/// Fixed transition table for single button bits. Button indices follow the
/// left=1, middle=2, right=3, thumb=4/5 convention; the wheel is handled
/// separately and owns index 2 for its events.
fn mouse_button(button_flags: u16) -> Option<(EventKind, u16, &'static str)> {
    let entry = match button_flags {
        RI_MOUSE_LEFT_BUTTON_DOWN => (EventKind::Down, 1, "left"),
        RI_MOUSE_LEFT_BUTTON_UP => (EventKind::Up, 1, "left"),
        RI_MOUSE_RIGHT_BUTTON_DOWN => (EventKind::Down, 3, "right"),
        RI_MOUSE_RIGHT_BUTTON_UP => (EventKind::Up, 3, "right"),
        RI_MOUSE_MIDDLE_BUTTON_DOWN => (EventKind::Down, 2, "middle"),
        RI_MOUSE_MIDDLE_BUTTON_UP => (EventKind::Up, 2, "middle"),
        RI_MOUSE_BUTTON_4_DOWN => (EventKind::Down, 4, "thumb1"),
        RI_MOUSE_BUTTON_4_UP => (EventKind::Up, 4, "thumb1"),
        RI_MOUSE_BUTTON_5_DOWN => (EventKind::Down, 5, "thumb2"),
        RI_MOUSE_BUTTON_5_UP => (EventKind::Up, 5, "thumb2"),
        _ => return None,
    };
    Some(entry)
}

/// Decode a parsed payload into the normalized event.
///
/// `device` is the catalog entry for `payload.device`; `tables` resolve scan
/// codes the fixed virtual-key table does not cover; `hwnd` and `at` stamp
/// the event with its delivery window and decode-start time.
pub fn decode_payload(
    payload: &RawPayload,
    device: Arc<RawInputDevice>,
    tables: &KeyNameTables,
    hwnd: isize,
    at: Instant,
) -> Result<RawInputEvent> {
    let mut event = RawInputEvent {
        kind: EventKind::Data,
        code: None,
        name: None,
        device_type: DeviceType::Hid,
        device,
        delta_x: None,
        delta_y: None,
        hwnd,
        at,
        data: None,
    };

    match &payload.body {
        PayloadBody::Keyboard(k) => {
            let (name, keypad) = match virtual_key(k.vkey) {
                Some((name, keypad)) => (name.to_string(), keypad),
                // Not in the fixed table: ask the layout, never the keypad.
                None => (tables.unshifted(k.scan_code).to_string(), false),
            };
            event.kind = key_event_kind(k.message)?;
            event.code = Some(k.scan_code);
            event.name = Some(name);
            event.device_type = if keypad {
                DeviceType::Keypad
            } else {
                DeviceType::Keyboard
            };
        }

        PayloadBody::Mouse(m) => {
            event.device_type = DeviceType::Mouse;
            if m.button_flags == 0 {
                // Pure motion sample.
                event.kind = EventKind::Move;
                event.delta_x = Some(m.last_x);
                event.delta_y = Some(m.last_y);
            } else if m.button_flags == RI_MOUSE_WHEEL {
                // Wheel delta is a signed count packed into the data half of
                // the union; only its sign matters for the event kind.
                event.kind = match m.button_data as i16 {
                    d if d > 0 => EventKind::WheelUp,
                    d if d < 0 => EventKind::WheelDown,
                    _ => return Err(Error::UnknownMouseButtons(m.button_flags)),
                };
                event.code = Some(2);
                event.name = Some("wheel".to_string());
            } else {
                let (kind, code, name) = mouse_button(m.button_flags)
                    .ok_or(Error::UnknownMouseButtons(m.button_flags))?;
                event.kind = kind;
                event.code = Some(code);
                event.name = Some(name.to_string());
            }
        }

        PayloadBody::Hid(h) => {
            event.kind = EventKind::Data;
            event.name = Some(format!("{} x {} bytes", h.count, h.size));
            event.device_type = match &*event.device {
                RawInputDevice::Hid(d) if d.is_controller() => DeviceType::Controller,
                _ => DeviceType::Hid,
            };
            event.data = Some(h.data.clone());
        }
    }

    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{DeviceHandle, HidDevice, KeyboardDevice, MouseDevice};
    use std::collections::HashMap;

    // Byte-buffer builders matching the in-memory layout (native order, the
    // same order read_unaligned sees).

    fn header_bytes(kind: u32, total: usize, device: isize) -> Vec<u8> {
        let mut buf = Vec::with_capacity(total);
        buf.extend_from_slice(&kind.to_ne_bytes());
        buf.extend_from_slice(&(total as u32).to_ne_bytes());
        buf.extend_from_slice(&(device as usize).to_ne_bytes());
        buf.extend_from_slice(&0usize.to_ne_bytes());
        buf
    }

    fn keyboard_bytes(device: isize, scan: u16, vkey: u16, message: u32) -> Vec<u8> {
        let mut buf = header_bytes(RIM_TYPEKEYBOARD, KEYBOARD_PAYLOAD_SIZE, device);
        buf.extend_from_slice(&scan.to_ne_bytes());
        buf.extend_from_slice(&0u16.to_ne_bytes()); // flags
        buf.extend_from_slice(&0u16.to_ne_bytes()); // reserved
        buf.extend_from_slice(&vkey.to_ne_bytes());
        buf.extend_from_slice(&message.to_ne_bytes());
        buf.extend_from_slice(&0u32.to_ne_bytes()); // extra information
        buf
    }

    fn mouse_bytes(device: isize, button_flags: u16, button_data: u16, dx: i32, dy: i32) -> Vec<u8> {
        let mut buf = header_bytes(RIM_TYPEMOUSE, MOUSE_PAYLOAD_SIZE, device);
        buf.extend_from_slice(&0u16.to_ne_bytes()); // usFlags (relative)
        buf.extend_from_slice(&0u16.to_ne_bytes()); // union alignment pad
        buf.extend_from_slice(&button_flags.to_ne_bytes());
        buf.extend_from_slice(&button_data.to_ne_bytes());
        buf.extend_from_slice(&0u32.to_ne_bytes()); // ulRawButtons
        buf.extend_from_slice(&dx.to_ne_bytes());
        buf.extend_from_slice(&dy.to_ne_bytes());
        buf.extend_from_slice(&0u32.to_ne_bytes()); // extra information
        buf
    }

    fn hid_bytes(device: isize, size: u32, count: u32, data: &[u8], slack: usize) -> Vec<u8> {
        let total = HID_HEAD_SIZE + data.len() + slack;
        let mut buf = header_bytes(RIM_TYPEHID, total, device);
        buf.extend_from_slice(&size.to_ne_bytes());
        buf.extend_from_slice(&count.to_ne_bytes());
        buf.extend_from_slice(data);
        buf.resize(total, 0xAA); // alignment slack past the logical span
        buf
    }

    fn keyboard_device(handle: isize) -> Arc<RawInputDevice> {
        Arc::new(RawInputDevice::Keyboard(KeyboardDevice {
            handle: DeviceHandle(handle),
            name: r"\\?\HID#VID_1234#kb".into(),
            kind: "Enhanced 101- or 102-key keyboards (and compatibles)",
            subtype: 0,
            scan_code_mode: 1,
            function_keys: 12,
            indicators: 3,
            total_keys: 104,
        }))
    }

    fn mouse_device(handle: isize) -> Arc<RawInputDevice> {
        Arc::new(RawInputDevice::Mouse(MouseDevice {
            handle: DeviceHandle(handle),
            name: r"\\?\HID#VID_1234#mouse".into(),
            kind: "HID mouse",
            buttons: 5,
            sample_rate: None,
            has_horizontal_wheel: false,
        }))
    }

    fn hid_device(handle: isize, usage: u16) -> Arc<RawInputDevice> {
        Arc::new(RawInputDevice::Hid(HidDevice {
            handle: DeviceHandle(handle),
            name: r"\\?\HID#VID_1234#pad".into(),
            vendor_id: 0x054c,
            product_id: 0x05c4,
            version: 0x100,
            usage_page: 0x01,
            usage_page_name: "Generic Desktop Controls",
            usage,
            usage_name: "Game Pad",
            product: None,
        }))
    }

    fn decode(buf: &[u8], device: Arc<RawInputDevice>) -> Result<RawInputEvent> {
        let payload = parse_raw_input(buf)?;
        decode_payload(&payload, device, &KeyNameTables::default(), 0x42, Instant::now())
    }

    #[test]
    fn keyboard_down_resolves_through_virtual_key_table() {
        let ev = decode(&keyboard_bytes(7, 30, 0x41, 0x0100), keyboard_device(7)).unwrap();
        assert_eq!(ev.kind, EventKind::Down);
        assert_eq!(ev.device_type, DeviceType::Keyboard);
        assert_eq!(ev.name.as_deref(), Some("a"));
        assert_eq!(ev.code, Some(30));
        assert_eq!(ev.hwnd, 0x42);
    }

    #[test]
    fn fixed_table_spelling_is_not_trimmed() {
        // vk 0xaa is tabled as "browser search key " with a trailing
        // space; the event carries the spelling verbatim.
        let ev = decode(&keyboard_bytes(7, 101, 0xaa, 0x0100), keyboard_device(7)).unwrap();
        assert_eq!(ev.name.as_deref(), Some("browser search key "));
        assert_eq!(ev.device_type, DeviceType::Keyboard);
    }

    #[test]
    fn keyboard_up_and_syskeydown() {
        let ev = decode(&keyboard_bytes(7, 30, 0x41, 0x0101), keyboard_device(7)).unwrap();
        assert_eq!(ev.kind, EventKind::Up);

        // AltGr sequences deliver WM_SYSKEYDOWN; it still counts as down.
        let ev = decode(&keyboard_bytes(7, 56, 0x12, 0x0104), keyboard_device(7)).unwrap();
        assert_eq!(ev.kind, EventKind::Down);
        assert_eq!(ev.name.as_deref(), Some("alt"));
    }

    #[test]
    fn keyboard_unknown_message_fails() {
        let err = decode(&keyboard_bytes(7, 56, 0x12, 0x0105), keyboard_device(7)).unwrap_err();
        assert_eq!(err, Error::UnknownKeyMessage(0x0105));
    }

    #[test]
    fn keyboard_falls_back_to_scan_table() {
        let mut unshifted = HashMap::new();
        unshifted.insert(86u16, "<".to_string());
        let tables = KeyNameTables::new(unshifted, HashMap::new());

        let payload = parse_raw_input(&keyboard_bytes(7, 86, 0xE2, 0x0100)).unwrap();
        let ev =
            decode_payload(&payload, keyboard_device(7), &tables, 0, Instant::now()).unwrap();
        assert_eq!(ev.name.as_deref(), Some("<"));
        assert_eq!(ev.device_type, DeviceType::Keyboard);

        // No table entry either: resolves to "unknown", still an event.
        let payload = parse_raw_input(&keyboard_bytes(7, 99, 0xE2, 0x0100)).unwrap();
        let ev = decode_payload(
            &payload,
            keyboard_device(7),
            &KeyNameTables::default(),
            0,
            Instant::now(),
        )
        .unwrap();
        assert_eq!(ev.name.as_deref(), Some("unknown"));
    }

    #[test]
    fn keypad_keys_tag_keypad() {
        let ev = decode(&keyboard_bytes(7, 82, 0x60, 0x0100), keyboard_device(7)).unwrap();
        assert_eq!(ev.device_type, DeviceType::Keypad);
        assert_eq!(ev.name.as_deref(), Some("0"));
    }

    #[test]
    fn mouse_motion_sample() {
        let ev = decode(&mouse_bytes(3, 0, 0, 5, -3), mouse_device(3)).unwrap();
        assert_eq!(ev.kind, EventKind::Move);
        assert_eq!(ev.device_type, DeviceType::Mouse);
        assert_eq!(ev.delta_x, Some(5));
        assert_eq!(ev.delta_y, Some(-3));
        assert_eq!(ev.code, None);
        assert_eq!(ev.name, None);
    }

    #[test]
    fn mouse_buttons_map_through_fixed_table() {
        let cases: &[(u16, EventKind, u16, &str)] = &[
            (0x0001, EventKind::Down, 1, "left"),
            (0x0002, EventKind::Up, 1, "left"),
            (0x0004, EventKind::Down, 3, "right"),
            (0x0008, EventKind::Up, 3, "right"),
            (0x0010, EventKind::Down, 2, "middle"),
            (0x0020, EventKind::Up, 2, "middle"),
            (0x0040, EventKind::Down, 4, "thumb1"),
            (0x0080, EventKind::Up, 4, "thumb1"),
            (0x0100, EventKind::Down, 5, "thumb2"),
            (0x0200, EventKind::Up, 5, "thumb2"),
        ];
        for &(flags, kind, code, name) in cases {
            let ev = decode(&mouse_bytes(3, flags, 0, 0, 0), mouse_device(3)).unwrap();
            assert_eq!(ev.kind, kind, "flags {flags:#06x}");
            assert_eq!(ev.code, Some(code));
            assert_eq!(ev.name.as_deref(), Some(name));
            assert_eq!(ev.delta_x, None);
        }
    }

    #[test]
    fn wheel_direction_follows_delta_sign() {
        let ev = decode(&mouse_bytes(3, 0x0400, 120, 0, 0), mouse_device(3)).unwrap();
        assert_eq!(ev.kind, EventKind::WheelUp);
        assert_eq!(ev.code, Some(2));
        assert_eq!(ev.name.as_deref(), Some("wheel"));

        let ev = decode(
            &mouse_bytes(3, 0x0400, (-120i16) as u16, 0, 0),
            mouse_device(3),
        )
        .unwrap();
        assert_eq!(ev.kind, EventKind::WheelDown);

        let err = decode(&mouse_bytes(3, 0x0400, 0, 0, 0), mouse_device(3)).unwrap_err();
        assert_eq!(err, Error::UnknownMouseButtons(0x0400));
    }

    #[test]
    fn unrecognized_button_patterns_fail_loudly() {
        // Two buttons in one notification.
        let err = decode(&mouse_bytes(3, 0x0005, 0, 0, 0), mouse_device(3)).unwrap_err();
        assert_eq!(err, Error::UnknownMouseButtons(0x0005));
        // Horizontal wheel is outside the fixed table.
        let err = decode(&mouse_bytes(3, 0x0800, 120, 0, 0), mouse_device(3)).unwrap_err();
        assert_eq!(err, Error::UnknownMouseButtons(0x0800));
    }

    #[test]
    fn hid_copies_exact_report_span() {
        let reports: Vec<u8> = (0..12).collect();
        // Backing buffer carries 4 slack bytes past the logical span.
        let ev = decode(&hid_bytes(9, 4, 3, &reports, 4), hid_device(9, 0x05)).unwrap();
        assert_eq!(ev.kind, EventKind::Data);
        assert_eq!(ev.name.as_deref(), Some("3 x 4 bytes"));
        assert_eq!(ev.code, None);
        assert_eq!(ev.data.as_deref(), Some(&reports[..]));
    }

    #[test]
    fn hid_span_larger_than_buffer_fails() {
        let err = parse_raw_input(&hid_bytes(9, 16, 4, &[0u8; 8], 0)).unwrap_err();
        assert!(matches!(err, Error::PayloadSize { .. }));
    }

    #[test]
    fn controller_usage_tags_controller() {
        let ev = decode(&hid_bytes(9, 2, 1, &[1, 2], 0), hid_device(9, 0x05)).unwrap();
        assert_eq!(ev.device_type, DeviceType::Controller);

        // Same payload from a non-controller usage stays plain HID.
        let ev = decode(&hid_bytes(9, 2, 1, &[1, 2], 0), hid_device(9, 0x01)).unwrap();
        assert_eq!(ev.device_type, DeviceType::Hid);
    }

    #[test]
    fn truncated_buffers_fail() {
        let err = parse_raw_input(&[0u8; 4]).unwrap_err();
        assert!(matches!(err, Error::PayloadSize { .. }));

        // Header alone is not a keyboard payload.
        let mut buf = header_bytes(RIM_TYPEKEYBOARD, HEADER_SIZE, 7);
        buf.truncate(HEADER_SIZE);
        let err = parse_raw_input(&buf).unwrap_err();
        assert_eq!(
            err,
            Error::PayloadSize {
                expected: KEYBOARD_PAYLOAD_SIZE,
                actual: HEADER_SIZE
            }
        );
    }

    #[test]
    fn declared_size_must_match_buffer() {
        let mut buf = keyboard_bytes(7, 30, 0x41, 0x0100);
        buf.push(0); // one byte longer than the header claims
        let err = parse_raw_input(&buf).unwrap_err();
        assert_eq!(
            err,
            Error::PayloadSize {
                expected: KEYBOARD_PAYLOAD_SIZE,
                actual: KEYBOARD_PAYLOAD_SIZE + 1
            }
        );
    }

    #[test]
    fn unknown_discriminant_fails() {
        let buf = header_bytes(7, HEADER_SIZE, 1);
        let err = parse_raw_input(&buf).unwrap_err();
        assert_eq!(err, Error::UnsupportedDeviceClass(7));
    }

    #[test]
    fn payload_kind_matches_body() {
        let p = parse_raw_input(&mouse_bytes(3, 0, 0, 1, 1)).unwrap();
        assert_eq!(p.kind(), RIM_TYPEMOUSE);
        assert_eq!(p.device, DeviceHandle(3));
        let p = parse_raw_input(&keyboard_bytes(4, 30, 0x41, 0x0100)).unwrap();
        assert_eq!(p.kind(), RIM_TYPEKEYBOARD);
        let p = parse_raw_input(&hid_bytes(5, 1, 1, &[0], 0)).unwrap();
        assert_eq!(p.kind(), RIM_TYPEHID);
    }
}
