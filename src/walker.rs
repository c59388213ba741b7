//! Filesystem walker: the convenience layer that turns `add_path` into a
//! sequence of entry emissions. Recurses with `walkdir`, skips symlinks to
//! directories (loop avoidance) and non-regular files (with a diagnostic),
//! and otherwise hands each regular file — symlinked or not — to the
//! session controller using the walked name.

use crate::entry::EntryMeta;
use crate::error::Result;
use crate::platform;
use crate::writer::ZipWriter;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use walkdir::WalkDir;

pub(crate) fn walk<W: Write>(zw: &mut ZipWriter<W>, root: &Path) -> Result<()> {
    let base = if root.is_dir() { root } else { root.parent().unwrap_or(root) };

    for entry in WalkDir::new(root).follow_links(false).into_iter() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                zw.log(&format!("walk error: {}", e));
                continue;
            }
        };

        if entry.path_is_symlink() {
            match fs::metadata(entry.path()) {
                Ok(target) if target.is_dir() => {
                    zw.log(&format!(
                        "skipping symlink to directory: {}",
                        entry.path().display()
                    ));
                    continue;
                }
                Ok(target) if target.is_file() => {
                    emit(zw, base, entry.path(), &target)?;
                }
                Ok(_) => {
                    zw.log(&format!(
                        "skipping symlink to non-regular file: {}",
                        entry.path().display()
                    ));
                }
                Err(e) => {
                    zw.log(&format!(
                        "skipping broken symlink {}: {}",
                        entry.path().display(),
                        e
                    ));
                }
            }
            continue;
        }

        let file_type = entry.file_type();
        if file_type.is_dir() {
            continue;
        }
        if !file_type.is_file() {
            zw.log(&format!(
                "skipping non-regular file: {}",
                entry.path().display()
            ));
            continue;
        }

        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(e) => {
                zw.log(&format!("stat error on {}: {}", entry.path().display(), e));
                continue;
            }
        };
        emit(zw, base, entry.path(), &metadata)?;
    }

    Ok(())
}

fn emit<W: Write>(
    zw: &mut ZipWriter<W>,
    base: &Path,
    path: &Path,
    metadata: &fs::Metadata,
) -> Result<()> {
    let relative = path.strip_prefix(base).unwrap_or(path);
    let name = relative.to_string_lossy().into_owned();
    if name.is_empty() {
        return Ok(());
    }

    let meta: EntryMeta = platform::metadata_for(metadata);

    match File::open(path) {
        Ok(file) => zw.write_file_entry(name, meta, file),
        Err(e) => {
            zw.log(&format!("open error on {}: {} - entry omitted", path.display(), e));
            Ok(())
        }
    }
}
