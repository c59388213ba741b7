//! Archiver CLI front-end: walks each path argument and writes the named
//! entries into the given output ZIP, exiting with the value of
//! `finish()` — 0 on success, 1 on a latched write error.

use std::env;
use std::process::ExitCode;
use zipflow::ZipWriter;

fn main() -> ExitCode {
    let mut args = env::args().skip(1);
    let output = match args.next() {
        Some(path) => path,
        None => {
            eprintln!("usage: zipflow-archive <output.zip> <path>...");
            return ExitCode::FAILURE;
        }
    };
    let inputs: Vec<String> = args.collect();
    if inputs.is_empty() {
        eprintln!("usage: zipflow-archive <output.zip> <path>...");
        return ExitCode::FAILURE;
    }

    let mut zip = match ZipWriter::create(&output, -1) {
        Ok(zip) => zip,
        Err(e) => {
            eprintln!("zipflow-archive: cannot create {}: {}", output, e);
            return ExitCode::FAILURE;
        }
    };

    for path in &inputs {
        if let Err(e) = zip.add_path(path) {
            eprintln!("zipflow-archive: {}: {}", path, e);
        }
    }

    match zip.finish() {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("zipflow-archive: {}", e);
            ExitCode::FAILURE
        }
    }
}
