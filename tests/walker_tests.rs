//! Directory-walk behavior (§6.4 collaborator contract): regular files are
//! archived, symlinks to directories are skipped to avoid loops, symlinks to
//! regular files are followed, and non-regular objects are skipped with a
//! diagnostic.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::symlink;
use std::process::Command;
use std::sync::{Arc, Mutex};
use tempfile::tempdir;
use zipflow::ZipWriter;

fn entry_names(zip_bytes: &[u8]) -> Vec<String> {
    // Scan for local file header signatures and pull each entry's name out
    // using its name-len field, rather than depending on a reader crate.
    let sig = 0x0403_4b50u32.to_le_bytes();
    let mut names = Vec::new();
    let mut i = 0;
    while i + 4 <= zip_bytes.len() {
        if zip_bytes[i..i + 4] == sig {
            let name_len = u16::from_le_bytes([zip_bytes[i + 26], zip_bytes[i + 27]]) as usize;
            let name_start = i + 30;
            if name_start + name_len <= zip_bytes.len() {
                names.push(String::from_utf8_lossy(&zip_bytes[name_start..name_start + name_len]).into_owned());
            }
            i = name_start + name_len;
        } else {
            i += 1;
        }
    }
    names
}

#[test]
fn skips_named_pipes_and_follows_file_symlinks() {
    let dir = tempdir().unwrap();
    let root = dir.path();

    fs::write(root.join("a.txt"), b"hello").unwrap();
    symlink(root.join("a.txt"), root.join("l")).unwrap();

    let fifo_path = root.join("p");
    let mkfifo = Command::new("mkfifo").arg(&fifo_path).status();
    let have_fifo = matches!(mkfifo, Ok(status) if status.success());

    let log_lines: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let log_lines_cb = Arc::clone(&log_lines);

    let mut zip = ZipWriter::new(Vec::new(), -1).unwrap();
    zip.set_log_hook(Some(Box::new(move |msg: &str| {
        log_lines_cb.lock().unwrap().push(msg.to_string());
    })));
    zip.add_path(root).unwrap();
    let out = zip.finish().unwrap();

    let names = entry_names(&out);
    assert!(names.iter().any(|n| n.ends_with("a.txt")));
    assert!(names.iter().any(|n| n.ends_with('l')));
    assert!(!names.iter().any(|n| n.ends_with('p')));

    if have_fifo {
        let lines = log_lines.lock().unwrap();
        assert!(lines.iter().any(|l| l.contains('p')));
    }
}

#[test]
fn skips_symlinks_to_directories() {
    let dir = tempdir().unwrap();
    let root = dir.path();

    fs::create_dir(root.join("real")).unwrap();
    fs::write(root.join("real/f.txt"), b"content").unwrap();
    symlink(root.join("real"), root.join("link_to_dir")).unwrap();

    let mut zip = ZipWriter::new(Vec::new(), -1).unwrap();
    zip.add_path(root).unwrap();
    let out = zip.finish().unwrap();

    let names = entry_names(&out);
    // Exactly one copy of f.txt's content should be archived - the real
    // path, not a second traversal through the directory symlink.
    assert_eq!(names.iter().filter(|n| n.ends_with("f.txt")).count(), 1);
}
