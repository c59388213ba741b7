//! Extreme memory usage demo - 1GB file
//!
//! Demonstrates that `zipflow` keeps memory usage flat even for very large
//! files, since it only ever holds a chunk buffer and the deflate engine's
//! internal state - never the whole input or output.
//!
//! Run with:
//! ```bash
//! /usr/bin/time -v cargo run --example memory_test_1gb --release
//! ```

use std::time::Instant;
use tempfile::NamedTempFile;
use zipflow::{EntryMeta, Result, ZipWriter};

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
    println!("Extreme memory demo - 1GB file");
    println!("================================\n");
    println!("This demonstrates zipflow handling a huge file with constant memory.\n");

    let total_size = 1024u64 * 1024 * 1024; // 1GB
    println!("Processing {} MB", total_size / (1024 * 1024));

    let temp = NamedTempFile::new()?;
    let mut writer = ZipWriter::create(temp.path(), 6)?;

    let initial_mem = get_memory_usage_mb();
    println!("Initial memory: {:.2} MB\n", initial_mem);

    let meta = EntryMeta::Unix {
        mode: 0o644,
        atime: 1_700_000_000,
        mtime: 1_700_000_000,
    };
    writer.begin_entry("huge_file.bin", meta)?;

    let start = Instant::now();
    let chunk_size = 4 * 1024 * 1024; // 4MB chunks
    let chunk = vec![b'Z'; chunk_size];

    let mut bytes_written = 0u64;
    let mut max_mem = initial_mem;
    let mut min_mem = initial_mem;
    let mut mem_samples = Vec::new();
    let mut last_print = 0u64;

    while bytes_written < total_size {
        let remaining = (total_size - bytes_written) as usize;
        let last = remaining <= chunk_size;
        let this_chunk = if last { &chunk[..remaining] } else { &chunk[..] };
        writer.write_data(this_chunk, last)?;
        bytes_written += this_chunk.len() as u64;

        if bytes_written - last_print >= 50 * 1024 * 1024 {
            let current_mem = get_memory_usage_mb();
            mem_samples.push(current_mem);
            if current_mem > max_mem {
                max_mem = current_mem;
            }
            if current_mem < min_mem {
                min_mem = current_mem;
            }

            let progress = (bytes_written as f64 / total_size as f64) * 100.0;
            let elapsed = start.elapsed().as_secs_f64();
            let speed = (bytes_written as f64 / (1024.0 * 1024.0)) / elapsed;
            println!(
                "[{:>5.1}%] {:>4} MB / 1024 MB | mem: {:.2} MB | speed: {:.1} MiB/s",
                progress,
                bytes_written / (1024 * 1024),
                current_mem,
                speed
            );
            last_print = bytes_written;
        }
    }

    writer.finish()?;
    let duration = start.elapsed();

    let final_mem = get_memory_usage_mb();
    let mem_delta = max_mem - initial_mem;
    let avg_mem = if mem_samples.is_empty() {
        initial_mem
    } else {
        mem_samples.iter().sum::<f64>() / mem_samples.len() as f64
    };
    let mem_variance = max_mem - min_mem;

    println!("\nResults");
    println!("  time taken:     {:.2}s", duration.as_secs_f64());
    println!("  throughput:     {:.2} MiB/s", 1024.0 / duration.as_secs_f64());
    println!("  initial memory: {:.2} MB", initial_mem);
    println!("  average memory: {:.2} MB", avg_mem);
    println!("  peak memory:    {:.2} MB", max_mem);
    println!("  min memory:     {:.2} MB", min_mem);
    println!("  memory variance:{:.2} MB", mem_variance);
    println!("  memory delta:   {:.2} MB", mem_delta);
    println!("  final memory:   {:.2} MB", final_mem);

    let file_size = std::fs::metadata(temp.path())?.len();
    let ratio = (file_size as f64 / total_size as f64) * 100.0;
    println!(
        "  compressed to:  {:.2} MB ({:.2}% of original)",
        file_size as f64 / (1024.0 * 1024.0),
        ratio
    );

    Ok(())
}
