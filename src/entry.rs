//! Per-entry metadata: the OS-tagged variant passed in by the caller (or
//! produced by the walker) and the record kept around until the central
//! directory is synthesized.

/// OS-specific metadata for one entry. Unix entries carry a 32-bit mode and
/// 32-bit POSIX timestamps; Windows entries carry a raw attribute bitmap and
/// 64-bit FILETIME timestamps. This replaces the variadic, OS-tagged
/// argument list of the original API with a single tagged entry point.
#[derive(Debug, Clone, Copy)]
pub enum EntryMeta {
    /// `mode` is the POSIX permission bits (e.g. `0o644`); the regular-file
    /// bit is forced on by the writer. `atime`/`mtime` are seconds since the
    /// Unix epoch.
    Unix { mode: u16, atime: u32, mtime: u32 },
    /// `attr` is the raw Windows external-attribute bitmap. `ctime`,
    /// `atime`, `mtime` are Windows FILETIME values (100-ns ticks since
    /// 1601-01-01 UTC).
    Windows {
        attr: u32,
        ctime: u64,
        atime: u64,
        mtime: u64,
    },
}

impl EntryMeta {
    /// The `os` byte stored in version-made-by (3 = Unix, 10 = Windows/NTFS).
    pub(crate) fn os_code(&self) -> u8 {
        match self {
            EntryMeta::Unix { .. } => 3,
            EntryMeta::Windows { .. } => 10,
        }
    }

    /// 32-bit external file attributes as they go in the central directory.
    pub(crate) fn external_attrs(&self) -> u32 {
        match self {
            // Regular-file bit (S_IFREG = 0o100000) forced on, masked to the
            // permission bits, shifted into the high 16 bits of the field.
            EntryMeta::Unix { mode, .. } => (0o100000u32 | (*mode as u32 & 0o7777)) << 16,
            EntryMeta::Windows { attr, .. } => *attr,
        }
    }
}

/// One archive entry, kept from the moment its local header is written
/// until the central directory is synthesized at `finish()`.
pub(crate) struct EntryRecord {
    pub(crate) name: String,
    pub(crate) meta: EntryMeta,
    pub(crate) crc32: u32,
    pub(crate) uncompressed_len: u64,
    pub(crate) compressed_len: u64,
    pub(crate) local_offset: u64,
}

impl EntryRecord {
    pub(crate) fn uses_zip64(&self) -> bool {
        self.uncompressed_len >= u32::MAX as u64
            || self.compressed_len >= u32::MAX as u64
            || self.local_offset >= u32::MAX as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(uncompressed_len: u64, compressed_len: u64, local_offset: u64) -> EntryRecord {
        EntryRecord {
            name: "x".into(),
            meta: EntryMeta::Unix {
                mode: 0o644,
                atime: 0,
                mtime: 0,
            },
            crc32: 0,
            uncompressed_len,
            compressed_len,
            local_offset,
        }
    }

    #[test]
    fn small_entry_does_not_need_zip64() {
        assert!(!record(10, 10, 10).uses_zip64());
    }

    #[test]
    fn large_local_offset_alone_forces_zip64() {
        assert!(record(10, 10, u32::MAX as u64).uses_zip64());
    }

    #[test]
    fn large_uncompressed_len_forces_zip64() {
        assert!(record(u32::MAX as u64, 10, 0).uses_zip64());
    }

    #[test]
    fn unix_external_attrs_force_regular_file_bit() {
        let meta = EntryMeta::Unix {
            mode: 0o644,
            atime: 0,
            mtime: 0,
        };
        // S_IFREG (0o100000) << 16 | 0o644 << 16
        assert_eq!(meta.external_attrs(), 0o100644u32 << 16);
        assert_eq!(meta.os_code(), 3);
    }

    #[test]
    fn windows_external_attrs_pass_through_raw_bitmap() {
        let meta = EntryMeta::Windows {
            attr: 0x20,
            ctime: 0,
            atime: 0,
            mtime: 0,
        };
        assert_eq!(meta.external_attrs(), 0x20);
        assert_eq!(meta.os_code(), 10);
    }
}
