//! Example demonstrating arbitrary writer usage
//!
//! This shows how to write ZIP archives to any `Write` implementor (not
//! just files), such as in-memory buffers or a network stream wrapped in
//! a `CallbackSink`.
//!
//! The `finish()` method returns the inner writer, allowing you to:
//! - Extract the `Vec<u8>` from a `Cursor` to get the ZIP bytes
//! - Continue using the writer for other purposes
//! - Save an in-memory archive to disk or send it over the network
//!
//! IMPORTANT: with `Vec<u8>`/`Cursor<Vec<u8>>`, the entire compressed
//! archive accumulates in memory. Only use this for small archives;
//! for large ones, write to a file or a streaming network sink instead.

use std::io::Cursor;
use zipflow::{EntryMeta, Result, ZipWriter};

fn unix_meta() -> EntryMeta {
    EntryMeta::Unix {
        mode: 0o644,
        atime: 1_700_000_000,
        mtime: 1_700_000_000,
    }
}

fn main() -> Result<()> {
    // Example 1: write to an in-memory buffer.
    println!("Example 1: writing to an in-memory buffer...");
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()), -1)?;
    zip.begin_entry("hello.txt", unix_meta())?;
    zip.write_data(b"Hello from an in-memory ZIP!", true)?;
    zip.begin_entry("data.txt", unix_meta())?;
    zip.write_data(b"Some data in the second file.", true)?;
    let cursor = zip.finish()?;
    let zip_bytes = cursor.into_inner();
    println!(
        "  created in-memory archive ({} bytes)",
        zip_bytes.len()
    );

    // Example 2: custom compression level.
    println!("\nExample 2: writing with maximum compression...");
    let mut zip2 = ZipWriter::new(Cursor::new(Vec::new()), 9)?;
    zip2.begin_entry("compressed.txt", unix_meta())?;
    let large_data = "Hello World! ".repeat(1000);
    zip2.write_data(large_data.as_bytes(), true)?;
    let cursor2 = zip2.finish()?;
    let zip_bytes2 = cursor2.into_inner();
    println!(
        "  created highly compressed archive ({} bytes, {} bytes uncompressed)",
        zip_bytes2.len(),
        large_data.len()
    );

    // Example 3: pipe output through a callback instead of a concrete writer.
    println!("\nExample 3: piping through a callback sink...");
    let mut collected = Vec::new();
    {
        let mut zip3 = ZipWriter::pipe(
            |chunk: Option<&[u8]>| {
                if let Some(bytes) = chunk {
                    collected.extend_from_slice(bytes);
                }
                false // never abort
            },
            -1,
        )?;
        zip3.begin_entry("piped.txt", unix_meta())?;
        zip3.write_data(b"This ZIP was streamed through a callback.", true)?;
        zip3.finish()?;
    }
    println!("  callback collected {} bytes", collected.len());

    Ok(())
}
