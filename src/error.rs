//! Error type shared across the crate.
//!
//! Everything fallible returns [`Result`]. Platform failures carry the name of
//! the Win32 call that failed plus the `GetLastError` code so embedders can
//! log or match on the exact condition. Malformed payloads are reported as
//! their own variants instead of being decoded on a best-effort basis.

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A Win32 call signalled failure. `code` is the `GetLastError` value
    /// captured immediately after the call.
    #[error("{call} failed with Win32 error {code}")]
    Os { call: &'static str, code: u32 },

    /// A raw input payload did not have the size the two-phase query or the
    /// fixed per-class layout promised.
    #[error("raw input payload size mismatch: expected {expected} bytes, got {actual}")]
    PayloadSize { expected: usize, actual: usize },

    /// The raw input type discriminant was not mouse (0), keyboard (1) or
    /// HID (2).
    #[error("unsupported raw input device class {0}")]
    UnsupportedDeviceClass(u32),

    /// A keyboard payload carried a message code outside the known
    /// down/up set.
    #[error("unrecognized keyboard message {0:#06x}")]
    UnknownKeyMessage(u32),

    /// A mouse payload carried a button bit pattern outside the fixed table.
    #[error("unrecognized mouse button bits {0:#06x}")]
    UnknownMouseButtons(u16),

    /// The window already has a raw input hook; one hook per window.
    #[error("window {hwnd:#x} already has a raw input hook installed")]
    AlreadyInstalled { hwnd: isize },
}

impl Error {
    /// `GetLastError` code for [`Error::Os`], `None` for everything else.
    pub fn os_code(&self) -> Option<u32> {
        match self {
            Error::Os { code, .. } => Some(*code),
            _ => None,
        }
    }
}
