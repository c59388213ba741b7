//! Filter CLI front-end: reads `name<TAB>source-path` pairs from stdin and
//! streams a ZIP to stdout. Exits 1 on a usage error.
//!
//! Unix-only: it builds entry metadata straight from `MetadataExt`, which
//! has no Windows equivalent with the same fields.

#[cfg(not(unix))]
fn main() {
    eprintln!("zipflow-filter: only supported on unix");
    std::process::exit(1);
}

#[cfg(unix)]
use std::fs;
#[cfg(unix)]
use std::io::{self, BufRead, Write};
#[cfg(unix)]
use std::os::unix::fs::MetadataExt;
#[cfg(unix)]
use std::process::ExitCode;
#[cfg(unix)]
use zipflow::{EntryMeta, ZipWriter};

#[cfg(unix)]
fn main() -> ExitCode {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut zip = match ZipWriter::new(stdout.lock(), -1) {
        Ok(zip) => zip,
        Err(e) => {
            eprintln!("zipflow-filter: {}", e);
            return ExitCode::FAILURE;
        }
    };

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("zipflow-filter: stdin: {}", e);
                return ExitCode::FAILURE;
            }
        };
        let Some((name, source)) = line.split_once('\t') else {
            eprintln!("zipflow-filter: malformed line (expected name<TAB>path): {}", line);
            return ExitCode::FAILURE;
        };

        let metadata = match fs::metadata(source) {
            Ok(m) => m,
            Err(e) => {
                eprintln!("zipflow-filter: {}: {} - entry skipped", source, e);
                continue;
            }
        };
        let data = match fs::read(source) {
            Ok(d) => d,
            Err(e) => {
                eprintln!("zipflow-filter: {}: {} - entry skipped", source, e);
                continue;
            }
        };

        let meta = EntryMeta::Unix {
            mode: (metadata.mode() & 0o7777) as u16,
            atime: metadata.atime() as u32,
            mtime: metadata.mtime() as u32,
        };

        if let Err(e) = zip.begin_entry(name, meta) {
            eprintln!("zipflow-filter: {}: {}", name, e);
            return ExitCode::FAILURE;
        }
        if let Err(e) = zip.write_data(&data, true) {
            eprintln!("zipflow-filter: {}: {}", name, e);
            return ExitCode::FAILURE;
        }
    }

    match zip.finish() {
        Ok(mut stdout) => {
            let _ = stdout.flush();
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("zipflow-filter: {}", e);
            ExitCode::FAILURE
        }
    }
}
