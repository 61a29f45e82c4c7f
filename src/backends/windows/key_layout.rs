//! Scan-code name tables for the active keyboard layout.
//!
//! Built once per process (see
//! [`KeyNameTables::current`](crate::keynames::KeyNameTables::current)) by
//! probing the layout APIs for every scan code in the single-byte range:
//!
//! 1. `MapVirtualKeyW` inverts the layout's virtual-key mapping so each scan
//!    code gets a virtual key to ask about. Scan codes claimed by several
//!    virtual keys keep the one the fixed name table knows.
//! 2. `GetKeyNameTextW` supplies the locale's key caption ("shift", ...);
//!    the enhanced-key probe runs first so the plain caption wins when both
//!    exist.
//! 3. `ToUnicode` overrides both case slots with the actual character the
//!    key produces, probed with an empty and a shift-down key state. Only
//!    the last character of the answer counts; accented answers sometimes
//!    arrive with leftover prefix characters.
//!
//! Probe failures leave gaps, which read as `"unknown"` through the total
//! lookups. The AltGr scan code (541) sits outside the probed range and is
//! pinned by hand.

#![cfg(target_os = "windows")]

use std::collections::HashMap;

use windows_sys::Win32::UI::Input::KeyboardAndMouse::{
    GetKeyNameTextW, MapVirtualKeyW, ToUnicode, MAPVK_VK_TO_VSC,
};

use crate::keynames::{normalize_name, virtual_key, KeyNameTables, SCAN_ALT_GR};

const SCAN_CODE_RANGE: u16 = 128;
const SHIFT_STATE_INDEX: usize = 0x10;

pub(crate) fn probe_current_layout() -> KeyNameTables {
    let mut unshifted: HashMap<u16, String> = HashMap::new();
    let mut shifted: HashMap<u16, String> = HashMap::new();

    // Invert vk -> scan. Several virtual keys can share a scan code; keep
    // the one the fixed table documents.
    let mut scan_to_vk: HashMap<u16, u16> = HashMap::new();
    for vk in 0x01u16..0x100 {
        let scan = unsafe { MapVirtualKeyW(vk as u32, MAPVK_VK_TO_VSC) } as u16;
        if scan == 0 {
            continue;
        }
        let documented = scan_to_vk
            .get(&scan)
            .is_some_and(|&kept| virtual_key(kept).is_some());
        if !documented {
            scan_to_vk.insert(scan, vk);
        }
    }

    let mut name_buf = [0u16; 32];
    let mut key_state = [0u8; 256];
    for scan in 0..SCAN_CODE_RANGE {
        // Locale caption, same for both cases. Enhanced first, so the plain
        // probe overrides it when both answer.
        for enhanced in [1u32, 0] {
            let lparam = (((scan as u32) << 16) | (enhanced << 24)) as i32;
            let len =
                unsafe { GetKeyNameTextW(lparam, name_buf.as_mut_ptr(), name_buf.len() as i32) };
            if len > 0 {
                let name = normalize_name(&String::from_utf16_lossy(&name_buf[..len as usize]));
                unshifted.insert(scan, name.clone());
                shifted.insert(scan, name);
            }
        }

        let Some(&vk) = scan_to_vk.get(&scan) else {
            continue;
        };
        // The produced character, when there is one, beats the caption.
        for shift in [false, true] {
            key_state[SHIFT_STATE_INDEX] = if shift { 0xFF } else { 0 };
            let mut chars = [0u16; 8];
            let rc = unsafe {
                ToUnicode(
                    vk as u32,
                    scan as u32,
                    key_state.as_ptr(),
                    chars.as_mut_ptr(),
                    chars.len() as i32,
                    0,
                )
            };
            // Negative answers are dead keys; the buffer still holds the
            // spacing character.
            if rc != 0 {
                let written = (rc.unsigned_abs() as usize).min(chars.len());
                let text = String::from_utf16_lossy(&chars[..written]);
                if let Some(ch) = text.chars().last() {
                    let table = if shift { &mut shifted } else { &mut unshifted };
                    table.insert(scan, ch.to_string());
                }
            }
        }
    }

    unshifted.insert(SCAN_ALT_GR, "alt gr".to_string());
    shifted.insert(SCAN_ALT_GR, "alt gr".to_string());

    KeyNameTables::new(unshifted, shifted)
}
