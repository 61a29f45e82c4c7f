//! Per-window hook slots behind the native window procedure.
//!
//! Maps a window handle to its installed hook and the procedure it
//! displaced. Window procedures re-enter on the calling thread whenever a
//! hook sends a synchronous message or pumps a modal loop, so the map lock
//! is held only around slot access, never while a hook runs. A running
//! hook is checked out of its slot; a nested arrival for the same window
//! finds the slot empty and forwards to the previous procedure without it.
//!
//! Nothing here issues an OS call; the platform glue owns the trampoline
//! and the forwarding.

// Off-Windows builds only exercise this module from tests.
#![cfg_attr(not(target_os = "windows"), allow(dead_code))]

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::error::{Error, Result};

/// Per-message hook: `(hwnd, message, wparam, lparam)`.
pub(crate) type HookFn = Box<dyn FnMut(isize, u32, usize, isize) + Send>;

struct Slot {
    /// `None` while the hook is out running.
    hook: Option<HookFn>,
    /// Previous window procedure as a raw value; 0 for windows the caller
    /// created, which fall through to the default procedure instead.
    prev: isize,
}

/// Handle-keyed hook slots. Inserted into and never drained.
pub(crate) struct HookMap {
    slots: Mutex<HashMap<isize, Slot>>,
}

impl HookMap {
    pub(crate) fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<isize, Slot>> {
        // Slots move in and out atomically; a poisoned lock still guards a
        // consistent map.
        self.slots.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Claim the slot for `hwnd`, then run `swap` to point the window at
    /// the trampoline and learn the displaced procedure. Both happen under
    /// one lock, so the first routed message already finds the slot and
    /// racing installs cannot swap the same window twice. A failing `swap`
    /// leaves no slot behind.
    pub(crate) fn install(
        &self,
        hwnd: isize,
        hook: HookFn,
        swap: impl FnOnce() -> Result<isize>,
    ) -> Result<isize> {
        let mut slots = self.slots();
        if slots.contains_key(&hwnd) {
            return Err(Error::AlreadyInstalled { hwnd });
        }
        let prev = swap()?;
        slots.insert(
            hwnd,
            Slot {
                hook: Some(hook),
                prev,
            },
        );
        Ok(prev)
    }

    /// Run the hook registered for `hwnd`, unlocked, and return the
    /// procedure value to forward to afterwards (0 when the window has none
    /// recorded). A dispatch that arrives while the hook is already out
    /// running skips it and forwards straight away.
    pub(crate) fn dispatch(
        &self,
        hwnd: isize,
        message: u32,
        wparam: usize,
        lparam: isize,
    ) -> isize {
        let (hook, prev) = {
            let mut slots = self.slots();
            match slots.get_mut(&hwnd) {
                Some(slot) => (slot.hook.take(), slot.prev),
                None => (None, 0),
            }
        };
        let mut hook = match hook {
            Some(hook) => hook,
            None => return prev,
        };
        hook(hwnd, message, wparam, lparam);
        let mut slots = self.slots();
        if let Some(slot) = slots.get_mut(&hwnd) {
            slot.hook = Some(hook);
        }
        prev
    }
}
