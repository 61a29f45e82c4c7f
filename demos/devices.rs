//! Dump the device catalog as JSON.
//!
//! Run with `cargo run --example devices`. With the `hid` feature (default)
//! HID entries carry their product strings.

#[cfg(target_os = "windows")]
fn main() -> rawsink::Result<()> {
    let devices = rawsink::list_devices()?;
    eprintln!("{} device(s)", devices.len());

    let entries: Vec<_> = devices.iter().map(|d| d.as_ref()).collect();
    println!(
        "{}",
        serde_json::to_string_pretty(&entries).expect("catalog serializes")
    );
    Ok(())
}

#[cfg(not(target_os = "windows"))]
fn main() {
    eprintln!("this demo only runs on Windows");
}
