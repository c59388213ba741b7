//! Memory usage demo with a 100MB file
//!
//! This demonstrates that `zipflow` maintains constant memory usage even
//! when compressing large files, since it never buffers the whole archive
//! and streams every chunk straight to the output file.
//!
//! Run with:
//! ```bash
//! cargo run --example memory_test_100mb --release
//! ```
//!
//! Monitor with:
//! ```bash
//! /usr/bin/time -v cargo run --example memory_test_100mb --release
//! ```

use std::time::Instant;
use tempfile::NamedTempFile;
use zipflow::{EntryMeta, Result, ZipWriter};

/// Current process RSS in MB (Linux only).
#[cfg(target_os = "linux")]
fn get_memory_usage_mb() -> f64 {
    let status = std::fs::read_to_string("/proc/self/status").unwrap_or_default();
    for line in status.lines() {
        if line.starts_with("VmRSS:") {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() >= 2 {
                if let Ok(kb) = parts[1].parse::<f64>() {
                    return kb / 1024.0;
                }
            }
        }
    }
    0.0
}

#[cfg(not(target_os = "linux"))]
fn get_memory_usage_mb() -> f64 {
    0.0
}

fn main() -> Result<()> {
    println!("Memory Usage Demo - 100MB File\n");
    println!("Verifying zipflow's constant memory usage guarantee...\n");

    let temp = NamedTempFile::new()?;
    let mut writer = ZipWriter::create(temp.path(), 6)?;

    let initial_mem = get_memory_usage_mb();
    println!("Initial memory: {:.2} MB", initial_mem);

    let meta = EntryMeta::Unix {
        mode: 0o644,
        atime: 1_700_000_000,
        mtime: 1_700_000_000,
    };
    writer.begin_entry("large_file.bin", meta)?;

    let start = Instant::now();
    let chunk_size = 1024 * 1024; // 1MB chunks
    let total_size = 100 * 1024 * 1024; // 100MB
    let chunk = vec![b'X'; chunk_size];

    let mut bytes_written = 0;
    let mut max_mem = initial_mem;
    let mut mem_samples = Vec::new();

    while bytes_written < total_size {
        let remaining = total_size - bytes_written;
        let last = remaining <= chunk_size;
        let this_chunk = if last { &chunk[..remaining] } else { &chunk[..] };
        writer.write_data(this_chunk, last)?;
        bytes_written += this_chunk.len();

        if bytes_written % (10 * 1024 * 1024) == 0 {
            let current_mem = get_memory_usage_mb();
            mem_samples.push(current_mem);
            if current_mem > max_mem {
                max_mem = current_mem;
            }
            println!(
                "Progress: {}MB / 100MB - Memory: {:.2} MB",
                bytes_written / (1024 * 1024),
                current_mem
            );
        }
    }

    writer.finish()?;
    let duration = start.elapsed();

    let final_mem = get_memory_usage_mb();
    let mem_delta = final_mem - initial_mem;

    println!("\nResults:");
    println!("  time taken: {:.2}s", duration.as_secs_f64());
    println!(
        "  throughput: {:.2} MiB/s",
        100.0 / duration.as_secs_f64()
    );
    println!("  max memory: {:.2} MB", max_mem);
    println!("  memory delta: {:.2} MB", mem_delta);
    if !mem_samples.is_empty() {
        println!(
            "  average memory: {:.2} MB",
            mem_samples.iter().sum::<f64>() / mem_samples.len() as f64
        );
    }

    #[cfg(target_os = "linux")]
    {
        if mem_delta < 10.0 {
            println!("  PASS: memory usage stayed roughly constant (<10MB delta)");
        } else {
            println!("  WARNING: memory delta higher than expected");
        }
    }

    Ok(())
}
