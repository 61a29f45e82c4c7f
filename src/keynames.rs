//! Key name resolution: the fixed virtual-key table, the alias table, and
//! the per-layout scan-code tables.
//!
//! Names follow one canonical vocabulary: lower case, spaces instead of
//! underscores, platform spellings rewritten through the alias table
//! ("escape" is "esc", "Left Arrow" is "left"). The virtual-key table is the
//! documented, layout-independent mapping; the scan-code tables are built
//! once per process by probing the active keyboard layout (see
//! [`KeyNameTables::current`]) and answer for keys the fixed table does not
//! cover.

use std::collections::HashMap;

use crate::metadata::UNKNOWN;

/// Scan code Windows reports for AltGr; the layout probe mislabels it as
/// plain "alt", so both tables carry a fixed override.
#[cfg_attr(not(target_os = "windows"), allow(dead_code))]
pub(crate) const SCAN_ALT_GR: u16 = 541;

/// Canonical name and keypad flag for a well-known virtual-key code.
///
/// Covers the documented, layout-independent range; OEM keys whose meaning
/// varies by layout are absent and resolve through the scan-code tables
/// instead.
pub fn virtual_key(vk: u16) -> Option<(&'static str, bool)> {
    let entry = match vk {
        0x03 => ("control-break processing", false),
        0x08 => ("backspace", false),
        0x09 => ("tab", false),
        0x0c => ("clear", false),
        0x0d => ("enter", false),
        0x10 => ("shift", false),
        0x11 => ("ctrl", false),
        0x12 => ("alt", false),
        0x13 => ("pause", false),
        0x14 => ("caps lock", false),
        0x15 => ("ime hangul mode", false),
        0x17 => ("ime junja mode", false),
        0x18 => ("ime final mode", false),
        0x19 => ("ime kanji mode", false),
        0x1b => ("esc", false),
        0x1c => ("ime convert", false),
        0x1d => ("ime nonconvert", false),
        0x1e => ("ime accept", false),
        0x1f => ("ime mode change request", false),
        0x20 => ("spacebar", false),
        0x21 => ("page up", false),
        0x22 => ("page down", false),
        0x23 => ("end", false),
        0x24 => ("home", false),
        0x25 => ("left", false),
        0x26 => ("up", false),
        0x27 => ("right", false),
        0x28 => ("down", false),
        0x29 => ("select", false),
        0x2a => ("print", false),
        0x2b => ("execute", false),
        0x2c => ("print screen", false),
        0x2d => ("insert", false),
        0x2e => ("delete", false),
        0x2f => ("help", false),
        0x30 => ("0", false),
        0x31 => ("1", false),
        0x32 => ("2", false),
        0x33 => ("3", false),
        0x34 => ("4", false),
        0x35 => ("5", false),
        0x36 => ("6", false),
        0x37 => ("7", false),
        0x38 => ("8", false),
        0x39 => ("9", false),
        0x41 => ("a", false),
        0x42 => ("b", false),
        0x43 => ("c", false),
        0x44 => ("d", false),
        0x45 => ("e", false),
        0x46 => ("f", false),
        0x47 => ("g", false),
        0x48 => ("h", false),
        0x49 => ("i", false),
        0x4a => ("j", false),
        0x4b => ("k", false),
        0x4c => ("l", false),
        0x4d => ("m", false),
        0x4e => ("n", false),
        0x4f => ("o", false),
        0x50 => ("p", false),
        0x51 => ("q", false),
        0x52 => ("r", false),
        0x53 => ("s", false),
        0x54 => ("t", false),
        0x55 => ("u", false),
        0x56 => ("v", false),
        0x57 => ("w", false),
        0x58 => ("x", false),
        0x59 => ("y", false),
        0x5a => ("z", false),
        0x5b => ("left windows", false),
        0x5c => ("right windows", false),
        0x5d => ("applications", false),
        0x5f => ("sleep", false),
        0x60 => ("0", true),
        0x61 => ("1", true),
        0x62 => ("2", true),
        0x63 => ("3", true),
        0x64 => ("4", true),
        0x65 => ("5", true),
        0x66 => ("6", true),
        0x67 => ("7", true),
        0x68 => ("8", true),
        0x69 => ("9", true),
        0x6a => ("*", true),
        0x6b => ("+", true),
        0x6c => ("separator", true),
        0x6d => ("-", true),
        0x6e => ("decimal", true),
        0x6f => ("/", true),
        0x70 => ("f1", false),
        0x71 => ("f2", false),
        0x72 => ("f3", false),
        0x73 => ("f4", false),
        0x74 => ("f5", false),
        0x75 => ("f6", false),
        0x76 => ("f7", false),
        0x77 => ("f8", false),
        0x78 => ("f9", false),
        0x79 => ("f10", false),
        0x7a => ("f11", false),
        0x7b => ("f12", false),
        0x7c => ("f13", false),
        0x7d => ("f14", false),
        0x7e => ("f15", false),
        0x7f => ("f16", false),
        0x80 => ("f17", false),
        0x81 => ("f18", false),
        0x82 => ("f19", false),
        0x83 => ("f20", false),
        0x84 => ("f21", false),
        0x85 => ("f22", false),
        0x86 => ("f23", false),
        0x87 => ("f24", false),
        0x90 => ("num lock", true),
        0x91 => ("scroll lock", false),
        0xa0 => ("left shift", false),
        0xa1 => ("right shift", false),
        0xa2 => ("left ctrl", false),
        0xa3 => ("right ctrl", false),
        0xa4 => ("left menu", false),
        0xa5 => ("right menu", false),
        0xa6 => ("browser back", false),
        0xa7 => ("browser forward", false),
        0xa8 => ("browser refresh", false),
        0xa9 => ("browser stop", false),
        0xaa => ("browser search key ", false), // sic, trailing space
        0xab => ("browser favorites", false),
        0xac => ("browser start and home", false),
        0xad => ("volume mute", false),
        0xae => ("volume down", false),
        0xaf => ("volume up", false),
        0xb0 => ("next track", false),
        0xb1 => ("previous track", false),
        0xb2 => ("stop media", false),
        0xb3 => ("play/pause media", false),
        0xb4 => ("start mail", false),
        0xb5 => ("select media", false),
        0xb6 => ("start application 1", false),
        0xb7 => ("start application 2", false),
        0xbb => ("+", false),
        0xbc => (",", false),
        0xbd => ("-", false),
        0xbe => (".", false),
        0xe5 => ("ime process", false),
        0xf6 => ("attn", false),
        0xf7 => ("crsel", false),
        0xf8 => ("exsel", false),
        0xf9 => ("erase eof", false),
        0xfa => ("play", false),
        0xfb => ("zoom", false),
        0xfc => ("reserved ", false), // sic, trailing space
        0xfd => ("pa1", false),
        0xfe => ("clear", false),
        _ => return None,
    };
    Some(entry)
}

/// Rewrite of a lower-cased, space-separated spelling to the canonical
/// vocabulary, if the spelling has one.
fn canonical_alias(name: &str) -> Option<&'static str> {
    let canon = match name {
        "escape" => "esc",
        "return" => "enter",
        "del" => "delete",
        "control" => "ctrl",
        "altgr" => "alt gr",

        "left arrow" => "left",
        "up arrow" => "up",
        "down arrow" => "down",
        "right arrow" => "right",

        // Spell out keys that would be hard to read.
        " " => "space",
        "\u{1b}" => "esc",
        "\u{8}" => "backspace",
        "\n" => "enter",
        "\t" => "tab",
        "\r" => "enter",

        "scrlk" => "scroll lock",
        "prtscn" => "print screen",
        "prnt scrn" => "print screen",
        "snapshot" => "print screen",
        "ins" => "insert",
        "pause break" => "pause",
        "ctrll lock" => "caps lock",
        "capslock" => "caps lock",
        "number lock" => "num lock",
        "numlock:" => "num lock",
        "space bar" => "space",
        "spacebar" => "space",
        "linefeed" => "enter",
        "win" => "windows",

        "app" => "menu",
        "apps" => "menu",
        "application" => "menu",
        "applications" => "menu",

        "pagedown" => "page down",
        "pageup" => "page up",
        "pgdown" => "page down",
        "pgup" => "page up",
        // "next"/"prior" look wrong but are how some layouts report paging.
        "next" => "page down",
        "prior" => "page up",

        "underscore" => "_",
        "equal" => "=",
        "minplus" => "+",
        "plus" => "+",
        "add" => "+",
        "subtract" => "-",
        "minus" => "-",
        "multiply" => "*",
        "asterisk" => "*",
        "divide" => "/",

        "question" => "?",
        "exclam" => "!",
        "slash" => "/",
        "bar" => "|",
        "backslash" => "\\",
        "braceleft" => "{",
        "braceright" => "}",
        "bracketleft" => "[",
        "bracketright" => "]",
        "parenleft" => "(",
        "parenright" => ")",

        "period" => ".",
        "dot" => ".",
        "comma" => ",",
        "semicolon" => ";",
        "colon" => ":",

        "less" => "<",
        "greater" => ">",
        "ampersand" => "&",
        "at" => "@",
        "numbersign" => "#",
        "hash" => "#",
        "hashtag" => "#",

        "dollar" => "$",
        "sterling" => "£",
        "pound" => "£",
        "yen" => "¥",
        "euro" => "€",
        "cent" => "¢",
        "currency" => "¤",
        "registered" => "®",
        "copyright" => "©",
        "notsign" => "¬",
        "percent" => "%",
        "diaeresis" => "\"",
        "quotedbl" => "\"",
        "onesuperior" => "¹",
        "twosuperior" => "²",
        "threesuperior" => "³",
        "onehalf" => "½",
        "onequarter" => "¼",
        "threequarters" => "¾",
        "paragraph" => "¶",
        "section" => "§",
        "ssharp" => "§",
        "division" => "÷",
        "questiondown" => "¿",
        "exclamdown" => "¡",
        "degree" => "°",
        "guillemotright" => "»",
        "guillemotleft" => "«",

        "acute" => "´",
        "agudo" => "´",
        "grave" => "`",
        "tilde" => "~",
        "asciitilde" => "~",
        "til" => "~",
        "cedilla" => ",",
        "circumflex" => "^",
        "apostrophe" => "'",

        "adiaeresis" => "ä",
        "udiaeresis" => "ü",
        "odiaeresis" => "ö",
        "oe" => "Œ",
        "oslash" => "ø",
        "ooblique" => "Ø",
        "ccedilla" => "ç",
        "ntilde" => "ñ",
        "eacute" => "é",
        "uacute" => "ú",
        "oacute" => "ó",
        "thorn" => "þ",
        "ae" => "æ",
        "eth" => "ð",
        "masculine" => "º",
        "feminine" => "ª",
        "iacute" => "í",
        "aacute" => "á",
        "mu" => "Μ",
        "aring" => "å",

        "zero" => "0",
        "one" => "1",
        "two" => "2",
        "three" => "3",
        "four" => "4",
        "five" => "5",
        "six" => "6",
        "seven" => "7",
        "eight" => "8",
        "nine" => "9",

        "play/pause" => "play/pause media",

        "num multiply" => "*",
        "num divide" => "/",
        "num add" => "+",
        "num plus" => "+",
        "num minus" => "-",
        "num sub" => "-",
        "num enter" => "enter",
        "num 0" => "0",
        "num 1" => "1",
        "num 2" => "2",
        "num 3" => "3",
        "num 4" => "4",
        "num 5" => "5",
        "num 6" => "6",
        "num 7" => "7",
        "num 8" => "8",
        "num 9" => "9",

        "left win" => "left windows",
        "right win" => "right windows",
        "left control" => "left ctrl",
        "right control" => "right ctrl",
        // Windows reports the left alt key as "left menu".
        "left menu" => "left alt",
        _ => return None,
    };
    Some(canon)
}

/// Normalize a free-form key name to the canonical vocabulary.
///
/// Lower-cases, turns underscores into spaces (unless the whole name is a
/// literal underscore), then applies the alias table. Idempotent; empty
/// input resolves to `"unknown"`.
pub fn normalize_name(name: &str) -> String {
    if name.is_empty() {
        return UNKNOWN.to_string();
    }
    let mut name = name.to_lowercase();
    if name != "_" {
        name = name.replace('_', " ");
    }
    match canonical_alias(&name) {
        Some(canon) => canon.to_string(),
        None => name,
    }
}

/// Scan-code name tables for one keyboard layout.
///
/// Two mappings, unshifted and shifted, both already normalized. Built once
/// per process by [`KeyNameTables::current`]; construction probes the OS once
/// per possible scan code, so it is never rebuilt. Lookups are total and
/// fall back to `"unknown"`.
#[derive(Clone, Debug, Default)]
pub struct KeyNameTables {
    unshifted: HashMap<u16, String>,
    shifted: HashMap<u16, String>,
}

impl KeyNameTables {
    /// Build a table set from explicit mappings (custom layouts, tests).
    pub fn new(unshifted: HashMap<u16, String>, shifted: HashMap<u16, String>) -> Self {
        Self { unshifted, shifted }
    }

    /// Name for a scan code with shift inactive.
    pub fn unshifted(&self, scan_code: u16) -> &str {
        self.unshifted
            .get(&scan_code)
            .map(String::as_str)
            .unwrap_or(UNKNOWN)
    }

    /// Name for a scan code with shift active.
    pub fn shifted(&self, scan_code: u16) -> &str {
        self.shifted
            .get(&scan_code)
            .map(String::as_str)
            .unwrap_or(UNKNOWN)
    }

    /// The process-wide tables for the active layout, built on first use.
    ///
    /// Cost of the first call is O(number of possible scan codes) OS round
    /// trips; afterwards it is a plain reference.
    #[cfg(target_os = "windows")]
    #[cfg_attr(docsrs, doc(cfg(target_os = "windows")))]
    pub fn current() -> &'static KeyNameTables {
        use std::sync::OnceLock;
        static TABLES: OnceLock<KeyNameTables> = OnceLock::new();
        TABLES.get_or_init(crate::backends::windows::key_layout::probe_current_layout)
    }
}
