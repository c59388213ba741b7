use crate::entry::EntryMeta;
use std::fs::Metadata;
use std::os::unix::fs::MetadataExt;

/// Build the Unix entry metadata from a `stat` result: permission bits plus
/// 32-bit POSIX access/modify timestamps.
pub(crate) fn metadata_for(metadata: &Metadata) -> EntryMeta {
    EntryMeta::Unix {
        mode: (metadata.mode() & 0o7777) as u16,
        atime: metadata.atime() as u32,
        mtime: metadata.mtime() as u32,
    }
}
