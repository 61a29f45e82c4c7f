//! Print every raw input event until interrupted.
//!
//! Run with `cargo run --example watch`. Events arrive with or without
//! focus; the hidden helper window only needs this thread to keep pumping.

#[cfg(target_os = "windows")]
fn main() -> rawsink::Result<()> {
    use windows_sys::Win32::UI::WindowsAndMessaging::{
        DispatchMessageW, GetMessageW, TranslateMessage, MSG,
    };

    rawsink::hook_raw_input_for_window(
        None,
        |event| match event {
            Ok(ev) => println!("{ev}   [{}]", ev.device.name()),
            Err(err) => eprintln!("undecodable notification: {err}"),
        },
        &rawsink::DEFAULT_DEVICE_CLASSES,
    )?;
    println!("watching raw input; press Ctrl+C to quit");

    unsafe {
        let mut msg: MSG = std::mem::zeroed();
        while GetMessageW(&mut msg, std::ptr::null_mut(), 0, 0) > 0 {
            TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
    Ok(())
}

#[cfg(not(target_os = "windows"))]
fn main() {
    eprintln!("this demo only runs on Windows");
}
