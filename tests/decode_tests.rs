//! End-to-end decode scenarios over the public API: notification bytes in,
//! named events out.

use std::mem;
use std::sync::Arc;
use std::time::Instant;

use rawsink::decode::{decode_payload, parse_raw_input, PayloadBody};
use rawsink::keynames::KeyNameTables;
use rawsink::{
    DeviceHandle, DeviceType, Error, EventKind, HidDevice, KeyboardDevice, MouseDevice,
    RawInputDevice,
};

// RAWINPUTHEADER is two u32 fields followed by two pointer-sized fields.
const HEADER: usize = 8 + 2 * mem::size_of::<usize>();

const KIND_MOUSE: u32 = 0;
const KIND_KEYBOARD: u32 = 1;
const KIND_HID: u32 = 2;

fn header(kind: u32, total: usize, device: isize) -> Vec<u8> {
    let mut buf = Vec::with_capacity(total);
    buf.extend_from_slice(&kind.to_ne_bytes());
    buf.extend_from_slice(&(total as u32).to_ne_bytes());
    buf.extend_from_slice(&(device as usize).to_ne_bytes());
    buf.extend_from_slice(&0usize.to_ne_bytes());
    buf
}

fn keyboard_packet(device: isize, scan: u16, vkey: u16, message: u32) -> Vec<u8> {
    let mut buf = header(KIND_KEYBOARD, HEADER + 16, device);
    buf.extend_from_slice(&scan.to_ne_bytes());
    buf.extend_from_slice(&0u16.to_ne_bytes());
    buf.extend_from_slice(&0u16.to_ne_bytes());
    buf.extend_from_slice(&vkey.to_ne_bytes());
    buf.extend_from_slice(&message.to_ne_bytes());
    buf.extend_from_slice(&0u32.to_ne_bytes());
    buf
}

fn mouse_packet(device: isize, button_flags: u16, button_data: u16, dx: i32, dy: i32) -> Vec<u8> {
    let mut buf = header(KIND_MOUSE, HEADER + 24, device);
    buf.extend_from_slice(&0u16.to_ne_bytes());
    buf.extend_from_slice(&0u16.to_ne_bytes());
    buf.extend_from_slice(&button_flags.to_ne_bytes());
    buf.extend_from_slice(&button_data.to_ne_bytes());
    buf.extend_from_slice(&0u32.to_ne_bytes());
    buf.extend_from_slice(&dx.to_ne_bytes());
    buf.extend_from_slice(&dy.to_ne_bytes());
    buf.extend_from_slice(&0u32.to_ne_bytes());
    buf
}

fn hid_packet(device: isize, size: u32, count: u32, reports: &[u8]) -> Vec<u8> {
    let total = HEADER + 8 + reports.len();
    let mut buf = header(KIND_HID, total, device);
    buf.extend_from_slice(&size.to_ne_bytes());
    buf.extend_from_slice(&count.to_ne_bytes());
    buf.extend_from_slice(reports);
    buf
}

fn keyboard() -> Arc<RawInputDevice> {
    Arc::new(RawInputDevice::Keyboard(KeyboardDevice {
        handle: DeviceHandle(1),
        name: r"\\?\HID#VID_046D&PID_C31C#kbd".into(),
        kind: "Enhanced 101- or 102-key keyboards (and compatibles)",
        subtype: 0,
        scan_code_mode: 1,
        function_keys: 12,
        indicators: 3,
        total_keys: 104,
    }))
}

fn mouse() -> Arc<RawInputDevice> {
    Arc::new(RawInputDevice::Mouse(MouseDevice {
        handle: DeviceHandle(2),
        name: r"\\?\HID#VID_046D&PID_C077#mouse".into(),
        kind: "HID mouse",
        buttons: 5,
        sample_rate: None,
        has_horizontal_wheel: false,
    }))
}

fn game_pad() -> Arc<RawInputDevice> {
    Arc::new(RawInputDevice::Hid(HidDevice {
        handle: DeviceHandle(3),
        name: r"\\?\HID#VID_054C&PID_05C4#pad".into(),
        vendor_id: 0x054c,
        product_id: 0x05c4,
        version: 0x100,
        usage_page: 0x01,
        usage_page_name: "Generic Desktop Controls",
        usage: 0x05,
        usage_name: "Game Pad",
        product: Some("Wireless Controller".into()),
    }))
}

fn decode(buf: &[u8], device: Arc<RawInputDevice>) -> rawsink::Result<rawsink::RawInputEvent> {
    let payload = parse_raw_input(buf)?;
    decode_payload(
        &payload,
        device,
        &KeyNameTables::default(),
        0x1234,
        Instant::now(),
    )
}

#[test]
fn a_key_press_becomes_a_named_keyboard_event() {
    let ev = decode(&keyboard_packet(1, 30, 0x41, 0x0100), keyboard()).unwrap();
    assert_eq!(ev.kind, EventKind::Down);
    assert_eq!(ev.device_type, DeviceType::Keyboard);
    assert_eq!(ev.name.as_deref(), Some("a"));
    assert_eq!(ev.code, Some(30));
    assert_eq!(ev.hwnd, 0x1234);
    assert_eq!(ev.device.handle(), DeviceHandle(1));
    assert_eq!(ev.to_string(), "keyboard down \"a\"");
}

#[test]
fn key_release_and_altgr_companion_press() {
    let ev = decode(&keyboard_packet(1, 30, 0x41, 0x0101), keyboard()).unwrap();
    assert_eq!(ev.kind, EventKind::Up);

    let ev = decode(&keyboard_packet(1, 29, 0x11, 0x0104), keyboard()).unwrap();
    assert_eq!(ev.kind, EventKind::Down);
    assert_eq!(ev.name.as_deref(), Some("ctrl"));
}

#[test]
fn keypad_keys_report_the_keypad_device_type() {
    let ev = decode(&keyboard_packet(1, 79, 0x61, 0x0100), keyboard()).unwrap();
    assert_eq!(ev.device_type, DeviceType::Keypad);
    assert_eq!(ev.name.as_deref(), Some("1"));
}

#[test]
fn unknown_key_message_codes_are_errors() {
    let err = decode(&keyboard_packet(1, 30, 0x41, 0x0105), keyboard()).unwrap_err();
    assert_eq!(err, Error::UnknownKeyMessage(0x0105));
}

#[test]
fn pure_motion_decodes_to_move_with_signed_deltas() {
    let ev = decode(&mouse_packet(2, 0, 0, 5, -3), mouse()).unwrap();
    assert_eq!(ev.kind, EventKind::Move);
    assert_eq!(ev.device_type, DeviceType::Mouse);
    assert_eq!(ev.delta_x, Some(5));
    assert_eq!(ev.delta_y, Some(-3));
    assert_eq!(ev.code, None);
    assert_eq!(ev.name, None);
    assert_eq!(ev.to_string(), "mouse move (+5, -3)");
}

#[test]
fn left_button_press_decodes_to_down_left() {
    let ev = decode(&mouse_packet(2, 0x0001, 0, 0, 0), mouse()).unwrap();
    assert_eq!(ev.kind, EventKind::Down);
    assert_eq!(ev.code, Some(1));
    assert_eq!(ev.name.as_deref(), Some("left"));
    assert_eq!(ev.to_string(), "mouse down \"left\"");
}

#[test]
fn wheel_events_follow_the_delta_sign() {
    let up = decode(&mouse_packet(2, 0x0400, 120, 0, 0), mouse()).unwrap();
    assert_eq!(up.kind, EventKind::WheelUp);
    assert_eq!(up.name.as_deref(), Some("wheel"));
    assert_eq!(up.code, Some(2));

    let down = decode(&mouse_packet(2, 0x0400, (-120i16) as u16, 0, 0), mouse()).unwrap();
    assert_eq!(down.kind, EventKind::WheelDown);

    let err = decode(&mouse_packet(2, 0x0400, 0, 0, 0), mouse()).unwrap_err();
    assert_eq!(err, Error::UnknownMouseButtons(0x0400));
}

#[test]
fn surprise_button_combinations_are_errors() {
    let err = decode(&mouse_packet(2, 0x0003, 0, 0, 0), mouse()).unwrap_err();
    assert_eq!(err, Error::UnknownMouseButtons(0x0003));
}

#[test]
fn hid_reports_carry_the_exact_span_and_a_size_name() {
    let reports: Vec<u8> = (0..12).collect();
    let ev = decode(&hid_packet(3, 4, 3, &reports), game_pad()).unwrap();
    assert_eq!(ev.kind, EventKind::Data);
    assert_eq!(ev.name.as_deref(), Some("3 x 4 bytes"));
    assert_eq!(ev.code, None);
    assert_eq!(ev.data.as_deref(), Some(&reports[..]));
    // A Generic Desktop game pad is surfaced as a controller.
    assert_eq!(ev.device_type, DeviceType::Controller);
}

#[test]
fn truncated_or_mis_sized_buffers_are_errors() {
    assert!(matches!(
        parse_raw_input(&[0u8; 4]),
        Err(Error::PayloadSize { .. })
    ));

    // Declared size and buffer length must agree.
    let mut buf = keyboard_packet(1, 30, 0x41, 0x0100);
    buf.push(0);
    assert!(matches!(
        parse_raw_input(&buf),
        Err(Error::PayloadSize { .. })
    ));

    // A HID span larger than the backing buffer never decodes.
    assert!(matches!(
        parse_raw_input(&hid_packet(3, 100, 100, &[0u8; 4])),
        Err(Error::PayloadSize { .. })
    ));
}

#[test]
fn unknown_discriminants_are_rejected() {
    let buf = header(7, HEADER, 1);
    assert_eq!(
        parse_raw_input(&buf).unwrap_err(),
        Error::UnsupportedDeviceClass(7)
    );
}

#[test]
fn parsed_payload_reports_its_discriminant_and_device() {
    let payload = parse_raw_input(&mouse_packet(2, 0, 0, 1, 1)).unwrap();
    assert_eq!(payload.kind(), KIND_MOUSE);
    assert_eq!(payload.device, DeviceHandle(2));
    assert!(matches!(payload.body, PayloadBody::Mouse(_)));

    let payload = parse_raw_input(&keyboard_packet(1, 30, 0x41, 0x0100)).unwrap();
    assert_eq!(payload.kind(), KIND_KEYBOARD);

    let payload = parse_raw_input(&hid_packet(3, 1, 2, &[7, 9])).unwrap();
    assert_eq!(payload.kind(), KIND_HID);
    match payload.body {
        PayloadBody::Hid(hid) => {
            assert_eq!(hid.size, 1);
            assert_eq!(hid.count, 2);
            assert_eq!(hid.data, vec![7, 9]);
        }
        other => panic!("expected hid body, got {other:?}"),
    }
}
