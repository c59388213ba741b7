use crate::entry::EntryMeta;
use std::fs::Metadata;
use std::os::windows::fs::MetadataExt;
use std::time::SystemTime;

const TICKS_PER_SECOND: u64 = 10_000_000;
const EPOCH_DIFF_SECONDS: u64 = 11_644_473_600;

fn to_filetime(time: std::io::Result<SystemTime>) -> u64 {
    let time = match time {
        Ok(t) => t,
        Err(_) => return 0,
    };
    match time.duration_since(std::time::UNIX_EPOCH) {
        Ok(d) => (d.as_secs() + EPOCH_DIFF_SECONDS) * TICKS_PER_SECOND + u64::from(d.subsec_nanos()) / 100,
        Err(_) => 0,
    }
}

/// Build the Windows entry metadata: the raw attribute bitmap plus 64-bit
/// FILETIME creation/access/modify timestamps.
pub(crate) fn metadata_for(metadata: &Metadata) -> EntryMeta {
    EntryMeta::Windows {
        attr: metadata.file_attributes(),
        ctime: to_filetime(metadata.created()),
        atime: to_filetime(metadata.accessed()),
        mtime: to_filetime(metadata.modified()),
    }
}
