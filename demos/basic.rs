//! Basic usage example for zipflow

use zipflow::{EntryMeta, ZipWriter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== zipflow basic example ===\n");

    println!("Creating test.zip...");
    let meta = EntryMeta::Unix {
        mode: 0o644,
        atime: 1_700_000_000,
        mtime: 1_700_000_000,
    };
    let mut writer = ZipWriter::create("test.zip", -1)?;

    writer.begin_entry("hello.txt", meta)?;
    writer.write_data(b"Hello, zipflow!", true)?;

    writer.begin_entry("folder/nested.txt", meta)?;
    writer.write_data(b"This is a nested file.", true)?;

    writer.begin_entry("data.txt", meta)?;
    writer.write_data(b"Line 1\nLine 2\nLine 3\n", true)?;

    writer.finish()?;
    println!("created test.zip\n");

    // zipflow is a write-only engine - reading the resulting archive back
    // is a job for a dedicated unzip tool (`unzip -l test.zip`, an
    // `unzip` crate, etc.), not this library.
    println!("done - inspect the result with `unzip -l test.zip`");

    Ok(())
}
