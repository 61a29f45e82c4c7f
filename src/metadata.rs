//! Fixed label tables for device sub-kinds.
//!
//! The Raw Input info blocks describe devices with numeric codes; these
//! tables turn them into the documented human-readable labels. Lookups are
//! total: any code outside a table resolves to `"unknown"` so enumeration
//! never fails on hardware that reports undocumented values.

/// Label kept for every code the tables do not know.
pub const UNKNOWN: &str = "unknown";

/// Mouse sub-kind from `RID_DEVICE_INFO_MOUSE.dwId`.
pub fn mouse_kind(id: u32) -> &'static str {
    match id {
        0x0080 => "HID mouse",
        0x0100 => "HID wheel mouse",
        0x8000 => "Mouse with horizontal wheel",
        _ => UNKNOWN,
    }
}

/// Keyboard sub-kind from `RID_DEVICE_INFO_KEYBOARD.dwType`.
pub fn keyboard_kind(kind: u32) -> &'static str {
    match kind {
        0x4 => "Enhanced 101- or 102-key keyboards (and compatibles)",
        0x7 => "Japanese Keyboard",
        0x8 => "Korean Keyboard",
        0x51 => "Unknown type or HID keyboard",
        _ => UNKNOWN,
    }
}

/// HID usage page label.
pub fn usage_page_name(page: u16) -> &'static str {
    match page {
        0x01 => "Generic Desktop Controls",
        0x05 => "Game Controls",
        0x08 => "LEDs",
        0x09 => "Button",
        _ => UNKNOWN,
    }
}

/// HID usage label within a page. Only the Generic Desktop page has named
/// usages here; every other page resolves to `"unknown"`.
pub fn usage_name(page: u16, usage: u16) -> &'static str {
    if page != 0x01 {
        return UNKNOWN;
    }
    match usage {
        0x01 => "Pointer",
        0x02 => "Mouse",
        0x04 => "Joystick",
        0x05 => "Game Pad",
        0x06 => "Keyboard",
        0x07 => "Keypad",
        0x08 => "Multi-axis Controller",
        _ => UNKNOWN,
    }
}

/// Zero means "not reported" for mouse sample rates.
pub fn sample_rate(raw: u32) -> Option<u32> {
    if raw == 0 {
        None
    } else {
        Some(raw)
    }
}
