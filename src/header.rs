//! Bit-exact wire-format emitters (§6.1). Each function appends its record
//! to a `Vec<u8>` scratch buffer, which the caller then hands to the sink in
//! one shot — this keeps the byte layout in one place and the sink free of
//! any knowledge of ZIP structure.

use crate::dostime;
use crate::entry::{EntryMeta, EntryRecord};

const LOCAL_FILE_HEADER_SIG: u32 = 0x0403_4b50;
const DATA_DESCRIPTOR_SIG: u32 = 0x0807_4b50;
const CENTRAL_DIR_SIG: u32 = 0x0201_4b50;
const ZIP64_EOCD_SIG: u32 = 0x0606_4b50;
const ZIP64_EOCD_LOCATOR_SIG: u32 = 0x0706_4b50;
const EOCD_SIG: u32 = 0x0605_4b50;

const ZIP64_EXTRA_ID: u16 = 0x0001;
const UNIX_TIME_EXTRA_ID: u16 = 0x5455;
const NTFS_TIME_EXTRA_ID: u16 = 0x000a;

/// General-purpose bit flag shared by local and central headers: bit 3
/// (data descriptor follows), bit 11 (UTF-8 name), plus a non-standard
/// compression-level signal in bits 1-2 (display-only; no reader is known
/// to depend on it semantically).
fn gp_flag(level: i32) -> u16 {
    let level_bits: u16 = if level >= 9 {
        0b01
    } else if level == 2 {
        0b10
    } else if level == 1 {
        0b11
    } else {
        0b00
    };
    (1 << 3) | (1 << 11) | (level_bits << 1)
}

fn version_needed(uses_zip64: bool) -> u16 {
    if uses_zip64 {
        45
    } else {
        20
    }
}

/// Local file header, name, and (currently empty) extra field. `local_offset`
/// only affects the version-needed decision, since Zip64-by-offset is only
/// knowable for certain once the entry is finished; writers that expect to
/// cross 4 GiB in offset should not rely on this field being exact until the
/// central directory is written.
pub(crate) fn local_file_header(
    name: &str,
    meta: &EntryMeta,
    level: i32,
    local_offset: u64,
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(30 + name.len());
    buf.extend_from_slice(&LOCAL_FILE_HEADER_SIG.to_le_bytes());
    buf.extend_from_slice(&version_needed(local_offset >= u32::MAX as u64).to_le_bytes());
    buf.extend_from_slice(&gp_flag(level).to_le_bytes());
    buf.extend_from_slice(&8u16.to_le_bytes()); // method = deflate
    buf.extend_from_slice(&dostime::pack(mtime_seconds(meta)).to_le_bytes());
    buf.extend_from_slice(&0u32.to_le_bytes()); // crc placeholder
    buf.extend_from_slice(&0u32.to_le_bytes()); // compressed size placeholder
    buf.extend_from_slice(&0u32.to_le_bytes()); // uncompressed size placeholder
    buf.extend_from_slice(&(name.len() as u16).to_le_bytes());
    buf.extend_from_slice(&0u16.to_le_bytes()); // extra len
    buf.extend_from_slice(name.as_bytes());
    buf
}

/// Data descriptor trailer: legacy (16 bytes) unless either size reaches or
/// overflows the `u32::MAX` sentinel, in which case both sizes are written
/// as 8-byte fields (24 bytes total).
pub(crate) fn data_descriptor(crc32: u32, compressed_len: u64, uncompressed_len: u64) -> Vec<u8> {
    let mut buf = Vec::with_capacity(24);
    buf.extend_from_slice(&DATA_DESCRIPTOR_SIG.to_le_bytes());
    buf.extend_from_slice(&crc32.to_le_bytes());
    if compressed_len >= u32::MAX as u64 || uncompressed_len >= u32::MAX as u64 {
        buf.extend_from_slice(&compressed_len.to_le_bytes());
        buf.extend_from_slice(&uncompressed_len.to_le_bytes());
    } else {
        buf.extend_from_slice(&(compressed_len as u32).to_le_bytes());
        buf.extend_from_slice(&(uncompressed_len as u32).to_le_bytes());
    }
    buf
}

fn zip64_extra(entry: &EntryRecord) -> Vec<u8> {
    let mut data = Vec::new();
    // Canonical order: uncompressed, compressed, offset - opposite to the
    // data descriptor's compressed-then-uncompressed order.
    if entry.uncompressed_len >= u32::MAX as u64 {
        data.extend_from_slice(&entry.uncompressed_len.to_le_bytes());
    }
    if entry.compressed_len >= u32::MAX as u64 {
        data.extend_from_slice(&entry.compressed_len.to_le_bytes());
    }
    if entry.local_offset >= u32::MAX as u64 {
        data.extend_from_slice(&entry.local_offset.to_le_bytes());
    }
    let mut field = Vec::with_capacity(4 + data.len());
    field.extend_from_slice(&ZIP64_EXTRA_ID.to_le_bytes());
    field.extend_from_slice(&(data.len() as u16).to_le_bytes());
    field.extend_from_slice(&data);
    field
}

fn timestamp_extra(meta: &EntryMeta) -> Vec<u8> {
    match meta {
        EntryMeta::Unix { atime, mtime, .. } => {
            let mut field = Vec::with_capacity(12);
            field.extend_from_slice(&UNIX_TIME_EXTRA_ID.to_le_bytes());
            field.extend_from_slice(&8u16.to_le_bytes()); // atime(4) + mtime(4)
            field.extend_from_slice(&atime.to_le_bytes());
            field.extend_from_slice(&mtime.to_le_bytes());
            field
        }
        EntryMeta::Windows {
            ctime,
            atime,
            mtime,
            ..
        } => {
            let mut field = Vec::with_capacity(36);
            field.extend_from_slice(&NTFS_TIME_EXTRA_ID.to_le_bytes());
            field.extend_from_slice(&32u16.to_le_bytes());
            field.extend_from_slice(&0u32.to_le_bytes()); // reserved
            field.extend_from_slice(&1u16.to_le_bytes()); // tag 1
            field.extend_from_slice(&24u16.to_le_bytes()); // tag size
            field.extend_from_slice(&mtime.to_le_bytes());
            field.extend_from_slice(&atime.to_le_bytes());
            field.extend_from_slice(&ctime.to_le_bytes());
            field
        }
    }
}

/// Central directory record for one entry: fixed header, name, Zip64 extra
/// (if needed), timestamp extra.
pub(crate) fn central_dir_entry(entry: &EntryRecord, level: i32) -> Vec<u8> {
    let uses_zip64 = entry.uses_zip64();
    let zip64 = if uses_zip64 {
        zip64_extra(entry)
    } else {
        Vec::new()
    };
    let timestamp = timestamp_extra(&entry.meta);
    let extra_len = zip64.len() + timestamp.len();

    let mut buf = Vec::with_capacity(46 + entry.name.len() + extra_len);
    buf.extend_from_slice(&CENTRAL_DIR_SIG.to_le_bytes());
    let version_made_by = ((entry.meta.os_code() as u16) << 8) | 45;
    buf.extend_from_slice(&version_made_by.to_le_bytes());
    buf.extend_from_slice(&version_needed(uses_zip64).to_le_bytes());
    buf.extend_from_slice(&gp_flag(level).to_le_bytes());
    buf.extend_from_slice(&8u16.to_le_bytes()); // method = deflate

    buf.extend_from_slice(&dostime::pack(mtime_seconds(&entry.meta)).to_le_bytes());

    buf.extend_from_slice(&entry.crc32.to_le_bytes());
    if entry.compressed_len >= u32::MAX as u64 {
        buf.extend_from_slice(&u32::MAX.to_le_bytes());
    } else {
        buf.extend_from_slice(&(entry.compressed_len as u32).to_le_bytes());
    }
    if entry.uncompressed_len >= u32::MAX as u64 {
        buf.extend_from_slice(&u32::MAX.to_le_bytes());
    } else {
        buf.extend_from_slice(&(entry.uncompressed_len as u32).to_le_bytes());
    }
    buf.extend_from_slice(&(entry.name.len() as u16).to_le_bytes());
    buf.extend_from_slice(&(extra_len as u16).to_le_bytes());
    buf.extend_from_slice(&0u16.to_le_bytes()); // comment len
    buf.extend_from_slice(&0u16.to_le_bytes()); // disk number start
    buf.extend_from_slice(&0u16.to_le_bytes()); // internal attrs
    buf.extend_from_slice(&entry.meta.external_attrs().to_le_bytes());
    if entry.local_offset >= u32::MAX as u64 {
        buf.extend_from_slice(&u32::MAX.to_le_bytes());
    } else {
        buf.extend_from_slice(&(entry.local_offset as u32).to_le_bytes());
    }
    buf.extend_from_slice(entry.name.as_bytes());
    buf.extend_from_slice(&zip64);
    buf.extend_from_slice(&timestamp);
    buf
}

/// Windows FILETIME (100-ns ticks since 1601-01-01) to Unix epoch seconds.
fn windows_filetime_to_unix(ticks: u64) -> i64 {
    const TICKS_PER_SECOND: u64 = 10_000_000;
    const EPOCH_DIFF_SECONDS: i64 = 11_644_473_600;
    (ticks / TICKS_PER_SECOND) as i64 - EPOCH_DIFF_SECONDS
}

/// The modify time of an entry, normalized to Unix epoch seconds for DOS
/// time packing regardless of which OS variant produced it.
fn mtime_seconds(meta: &EntryMeta) -> i64 {
    match meta {
        EntryMeta::Unix { mtime, .. } => *mtime as i64,
        EntryMeta::Windows { mtime, .. } => windows_filetime_to_unix(*mtime),
    }
}

pub(crate) fn zip64_eocd_record(
    entry_count: u64,
    dir_len: u64,
    dir_offset: u64,
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(56);
    buf.extend_from_slice(&ZIP64_EOCD_SIG.to_le_bytes());
    buf.extend_from_slice(&44u64.to_le_bytes()); // size of remaining record
    buf.extend_from_slice(&45u16.to_le_bytes()); // version made by
    buf.extend_from_slice(&45u16.to_le_bytes()); // version needed
    buf.extend_from_slice(&0u32.to_le_bytes()); // disk number
    buf.extend_from_slice(&0u32.to_le_bytes()); // disk with central dir
    buf.extend_from_slice(&entry_count.to_le_bytes()); // entries on this disk
    buf.extend_from_slice(&entry_count.to_le_bytes()); // total entries
    buf.extend_from_slice(&dir_len.to_le_bytes());
    buf.extend_from_slice(&dir_offset.to_le_bytes());
    buf
}

pub(crate) fn zip64_eocd_locator(zip64_eocd_offset: u64) -> Vec<u8> {
    let mut buf = Vec::with_capacity(20);
    buf.extend_from_slice(&ZIP64_EOCD_LOCATOR_SIG.to_le_bytes());
    buf.extend_from_slice(&0u32.to_le_bytes()); // disk with zip64 eocd
    buf.extend_from_slice(&zip64_eocd_offset.to_le_bytes());
    buf.extend_from_slice(&1u32.to_le_bytes()); // total number of disks
    buf
}

pub(crate) fn eocd(entry_count: usize, dir_len: u64, dir_offset: u64) -> Vec<u8> {
    let mut buf = Vec::with_capacity(22);
    buf.extend_from_slice(&EOCD_SIG.to_le_bytes());
    buf.extend_from_slice(&0u16.to_le_bytes()); // disk number
    buf.extend_from_slice(&0u16.to_le_bytes()); // disk with central dir

    let clamped_count = entry_count.min(u16::MAX as usize) as u16;
    buf.extend_from_slice(&clamped_count.to_le_bytes());
    buf.extend_from_slice(&clamped_count.to_le_bytes());

    if dir_len > u32::MAX as u64 {
        buf.extend_from_slice(&u32::MAX.to_le_bytes());
    } else {
        buf.extend_from_slice(&(dir_len as u32).to_le_bytes());
    }
    if dir_offset > u32::MAX as u64 {
        buf.extend_from_slice(&u32::MAX.to_le_bytes());
    } else {
        buf.extend_from_slice(&(dir_offset as u32).to_le_bytes());
    }
    buf.extend_from_slice(&0u16.to_le_bytes()); // comment len
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_header_has_expected_signature_and_size_for_empty_name() {
        let meta = EntryMeta::Unix {
            mode: 0o644,
            atime: 0,
            mtime: 0,
        };
        let h = local_file_header("", &meta, 6, 0);
        assert_eq!(&h[0..4], &LOCAL_FILE_HEADER_SIG.to_le_bytes());
        assert_eq!(h.len(), 30);
    }

    #[test]
    fn local_header_carries_the_real_dos_timestamp() {
        let meta = EntryMeta::Unix {
            mode: 0o644,
            atime: 0,
            mtime: 1_700_000_000,
        };
        let h = local_file_header("x", &meta, 6, 0);
        let dos_time = u32::from_le_bytes([h[10], h[11], h[12], h[13]]);
        assert_eq!(dos_time, dostime::pack(1_700_000_000));
        assert_ne!(dos_time, 0);
    }

    #[test]
    fn legacy_data_descriptor_is_16_bytes() {
        let d = data_descriptor(0x1234, 10, 20);
        assert_eq!(d.len(), 16);
        assert_eq!(&d[0..4], &DATA_DESCRIPTOR_SIG.to_le_bytes());
    }

    #[test]
    fn zip64_data_descriptor_is_24_bytes() {
        let d = data_descriptor(0, (u32::MAX as u64) + 1, 10);
        assert_eq!(d.len(), 24);
    }

    #[test]
    fn data_descriptor_promotes_at_exactly_u32_max() {
        // A size of exactly u32::MAX must take the Zip64 form - the legacy
        // field's raw value would otherwise collide with the sentinel a
        // reader uses to mean "see the Zip64 extra field".
        let d = data_descriptor(0, u32::MAX as u64, 10);
        assert_eq!(d.len(), 24);
    }

    #[test]
    fn unix_timestamp_extra_is_12_bytes_atime_then_mtime_no_flags() {
        let meta = EntryMeta::Unix {
            mode: 0o644,
            atime: 111,
            mtime: 222,
        };
        let field = timestamp_extra(&meta);
        assert_eq!(field.len(), 12);
        assert_eq!(&field[0..2], &UNIX_TIME_EXTRA_ID.to_le_bytes());
        assert_eq!(u16::from_le_bytes([field[2], field[3]]), 8);
        assert_eq!(u32::from_le_bytes([field[4], field[5], field[6], field[7]]), 111);
        assert_eq!(u32::from_le_bytes([field[8], field[9], field[10], field[11]]), 222);
    }

    #[test]
    fn gp_flag_sets_descriptor_and_utf8_bits() {
        let f = gp_flag(6);
        assert_eq!(f & (1 << 3), 1 << 3);
        assert_eq!(f & (1 << 11), 1 << 11);
    }

    #[test]
    fn gp_flag_level_bits_match_quantisation_table() {
        assert_eq!((gp_flag(1) >> 1) & 0b11, 0b11);
        assert_eq!((gp_flag(2) >> 1) & 0b11, 0b10);
        assert_eq!((gp_flag(9) >> 1) & 0b11, 0b01);
        assert_eq!((gp_flag(6) >> 1) & 0b11, 0b00);
    }
}
