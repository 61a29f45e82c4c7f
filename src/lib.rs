//! Raw Input event pipeline for Windows.
//!
//! Everything the OS delivers through `WM_INPUT` (the raw keyboard, mouse
//! and HID firehose) decoded into named, device-attributed events, plus the
//! device catalog to make sense of where each event came from.
//!
//! Three layers, usable separately:
//! - the **catalog** ([`catalog`]): enumerates devices, caches per-handle
//!   metadata, answers liveness probes;
//! - the **hook** ([`hook`]): subclasses a window you own, or creates a
//!   hidden message-only one, and registers device classes for
//!   focus-independent delivery;
//! - the **decoder** ([`decode`], [`keynames`]): turns notification bytes
//!   into [`RawInputEvent`]s, with key names resolved against the active
//!   layout. This layer is portable and is where the crate's tests live.
//!
//! ```ignore
//! // Watch all raw input from a hidden window, then pump this thread.
//! rawsink::hook_raw_input_for_window(
//!     None,
//!     |event| match event {
//!         Ok(ev) => println!("{ev}"),
//!         Err(err) => eprintln!("undecodable notification: {err}"),
//!     },
//!     &rawsink::DEFAULT_DEVICE_CLASSES,
//! )?;
//! // ...message loop; see demos/watch.rs for the full program.
//! ```
//!
//! # Feature flags
//! - **`hid`** (default) — friendly product strings on HID catalog entries,
//!   via `hidapi`.
//! - **`debug-log`** — `eprintln!` diagnostics from the install and catalog
//!   paths.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod backends;
pub mod catalog;
pub mod decode;
pub mod device;
pub mod error;
pub mod event;
pub mod hook;
pub mod keynames;
pub mod metadata;

pub use catalog::*;
pub use device::*;
pub use error::*;
pub use event::*;
pub use hook::*;
