//! Platform backends.
//!
//! Everything that talks to the operating system lives below this module.
//! The portable core reaches the platform through narrow seams (the device
//! query trait, the window hook map, the layout probe) that the backend
//! implements; nothing outside `backends` issues an OS call.
//!
//! # Feature flags
//! - **`hid`** — product-string enrichment of HID catalog entries via
//!   `hidapi` (default in this build).
//! - **`debug-log`** — `eprintln!` diagnostics from the install,
//!   registration and cache-insert paths.

pub(crate) mod hook_map;

#[cfg(target_os = "windows")]
#[cfg_attr(docsrs, doc(cfg(target_os = "windows")))]
pub mod windows;
