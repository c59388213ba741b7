//! Streaming ZIP writer: local headers, on-the-fly `deflate` compression,
//! data descriptors, and a post-hoc central directory with Zip64
//! promotion — emitted as a forward-only byte stream with no seeking and
//! no whole-archive buffering.

use crate::compress::CompressionUnit;
use crate::entry::{EntryMeta, EntryRecord};
use crate::error::{Result, ZipError};
use crate::header;
use crate::log::{LogHook, LogSink};
use crate::sink::{CallbackSink, FlushHint, Sink};
use crate::walker;
use flate2::Compression;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

fn compression_from_level(level: i32) -> Compression {
    if level < 0 {
        Compression::default()
    } else {
        Compression::new(level as u32)
    }
}

fn check_level(level: i32) -> Result<()> {
    if !(-1..=9).contains(&level) {
        return Err(ZipError::InvalidArgument(format!(
            "compression level {} out of range -1..=9",
            level
        )));
    }
    Ok(())
}

/// Caller-fed entry state machine: idle, awaiting the first `write_data`
/// call, or mid-stream.
enum FeedState {
    Idle,
    AwaitingFirstData,
    InData,
}

struct CurrentEntry {
    name: String,
    meta: EntryMeta,
    local_offset: u64,
    header_written: bool,
}

/// A streaming ZIP session. One `ZipWriter` owns one archive; entries are
/// emitted in the order they are added and the central directory is
/// synthesized at `finish()`.
pub struct ZipWriter<W: Write> {
    sink: Sink<W>,
    level: i32,
    compression: Compression,
    entries: Vec<EntryRecord>,
    compress: CompressionUnit,
    log: LogSink,
    state: FeedState,
    current: Option<CurrentEntry>,
}

impl ZipWriter<File> {
    /// Create a ZIP file on disk. `level` must be in `-1..=9` (`-1` means
    /// the zlib default).
    pub fn create<P: AsRef<Path>>(path: P, level: i32) -> Result<Self> {
        check_level(level)?;
        let file = File::create(path)?;
        Self::new(file, level)
    }
}

impl<W: Write> ZipWriter<W> {
    /// Wrap an arbitrary writer — a file, an in-memory buffer, a network
    /// stream, or a [`CallbackSink`]. Never seeks the writer.
    pub fn new(writer: W, level: i32) -> Result<Self> {
        check_level(level)?;
        Ok(Self {
            sink: Sink::new(writer),
            level,
            compression: compression_from_level(level),
            entries: Vec::new(),
            compress: CompressionUnit::new(compression_from_level(level)),
            log: LogSink::new(),
            state: FeedState::Idle,
            current: None,
        })
    }

    /// Install or clear the diagnostic hook. Defaults to a line on stderr.
    pub fn set_log_hook(&mut self, hook: Option<LogHook>) {
        self.log.set_hook(hook);
    }

    /// Reconfigure the deflate engine's level for entries written from now
    /// on. Has no effect on an entry already in progress.
    pub fn set_level(&mut self, level: i32) -> Result<()> {
        check_level(level)?;
        self.level = level;
        self.compression = compression_from_level(level);
        Ok(())
    }

    /// Walk `path` (a file or a directory tree) and emit one entry per
    /// regular file found, skipping symlink loops and non-regular files.
    /// Valid only while idle.
    pub fn add_path<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.require_idle("add_path")?;
        walker::walk(self, path.as_ref())
    }

    /// Begin a caller-fed entry. No bytes are emitted yet — the local
    /// header is written lazily on the first `write_data` call, so an
    /// entry whose content never arrives can still be abandoned cleanly by
    /// `finish()`.
    pub fn begin_entry(&mut self, name: impl Into<String>, meta: EntryMeta) -> Result<()> {
        self.require_idle("begin_entry")?;
        let name = name.into();
        if name.len() > 65535 {
            return Err(ZipError::NameTooLong(name.len()));
        }
        if self.sink.is_bad() {
            return Err(ZipError::WriteFailed);
        }
        self.compress.begin(self.compression);
        self.current = Some(CurrentEntry {
            name,
            meta,
            local_offset: self.sink.offset(),
            header_written: false,
        });
        self.state = FeedState::AwaitingFirstData;
        Ok(())
    }

    /// Feed one chunk of this entry's uncompressed content. `last` ends the
    /// entry: the deflate stream is finished, the data descriptor is
    /// written, and the entry is appended to the directory.
    ///
    /// `(buf.is_empty(), last=false)` is a no-op — this is the one case
    /// that does not require an entry to be open, since it truly does
    /// nothing either way. Every other call requires `begin_entry` to have
    /// been called first.
    pub fn write_data(&mut self, buf: &[u8], last: bool) -> Result<()> {
        if buf.is_empty() && !last {
            return Ok(());
        }
        if matches!(self.state, FeedState::Idle) {
            return Err(ZipError::InvalidState(
                "write_data called with no entry open",
            ));
        }
        if self.sink.is_bad() {
            return Err(ZipError::WriteFailed);
        }

        let mut current = self
            .current
            .take()
            .expect("state machine guarantees a current entry outside Idle");

        if !current.header_written {
            let header = header::local_file_header(
                &current.name,
                &current.meta,
                self.level,
                current.local_offset,
            );
            self.sink.write(&header, FlushHint::None, &mut self.log);
            current.header_written = true;
            self.state = FeedState::InData;
        }

        if !buf.is_empty() {
            self.compress.feed(buf, &mut self.sink, &mut self.log);
        }

        if last {
            self.compress.finish(&mut self.sink, &mut self.log);
            let crc32 = self.compress.crc32();
            let uncompressed_len = self.compress.uncompressed_len();
            let compressed_len = self.compress.compressed_len();
            if !self.sink.is_bad() {
                let descriptor = header::data_descriptor(crc32, compressed_len, uncompressed_len);
                self.sink.write(&descriptor, FlushHint::None, &mut self.log);
            }
            self.entries.push(EntryRecord {
                name: current.name,
                meta: current.meta,
                crc32,
                uncompressed_len,
                compressed_len,
                local_offset: current.local_offset,
            });
            self.state = FeedState::Idle;
        } else {
            self.current = Some(current);
        }

        if self.sink.is_bad() {
            return Err(ZipError::WriteFailed);
        }
        Ok(())
    }

    /// File-backed entry emission (§4.3), used by the walker. Opens and
    /// pumps `file` through the deflate engine in `CHUNK`-sized blocks. A
    /// read error mid-file omits the entry from the directory but still
    /// finishes the deflate stream so the archive stays parseable.
    pub(crate) fn write_file_entry(
        &mut self,
        name: String,
        meta: EntryMeta,
        mut file: File,
    ) -> Result<()> {
        self.require_idle("write_file_entry")?;
        if name.len() > 65535 {
            self.log
                .emit(&format!("name too long, entry omitted: {} bytes", name.len()));
            return Ok(());
        }
        if self.sink.is_bad() {
            return Err(ZipError::WriteFailed);
        }

        let local_offset = self.sink.offset();
        let header = header::local_file_header(&name, &meta, self.level, local_offset);
        self.sink.write(&header, FlushHint::None, &mut self.log);
        if self.sink.is_bad() {
            return Err(ZipError::WriteFailed);
        }

        self.compress.begin(self.compression);
        let mut buf = vec![0u8; crate::compress::CHUNK];
        let mut omit = false;
        loop {
            match file.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => {
                    self.compress.feed(&buf[..n], &mut self.sink, &mut self.log);
                    if self.sink.is_bad() {
                        break;
                    }
                }
                Err(e) => {
                    omit = true;
                    self.log
                        .emit(&format!("read error on {}: {} - entry omitted", name, e));
                    break;
                }
            }
        }
        self.compress.finish(&mut self.sink, &mut self.log);

        let crc32 = self.compress.crc32();
        let uncompressed_len = self.compress.uncompressed_len();
        let compressed_len = self.compress.compressed_len();

        if !self.sink.is_bad() {
            let descriptor = header::data_descriptor(crc32, compressed_len, uncompressed_len);
            self.sink.write(&descriptor, FlushHint::None, &mut self.log);
        }

        if self.sink.is_bad() {
            return Err(ZipError::WriteFailed);
        }

        if !omit {
            self.entries.push(EntryRecord {
                name,
                meta,
                crc32,
                uncompressed_len,
                compressed_len,
                local_offset,
            });
        }
        Ok(())
    }

    /// Finish the archive: close out any entry still open, write the
    /// central directory (promoting to Zip64 records if needed), flush,
    /// and hand back the inner writer. Always consumes the session, so a
    /// finished archive cannot be reused by accident.
    pub fn finish(mut self) -> Result<W> {
        if !matches!(self.state, FeedState::Idle) {
            let _ = self.write_data(&[], true);
        }

        let dir_offset = self.sink.offset();
        for entry in &self.entries {
            let record = header::central_dir_entry(entry, self.level);
            self.sink.write(&record, FlushHint::None, &mut self.log);
        }
        let dir_len = self.sink.offset() - dir_offset;

        let need_zip64 = self.entries.len() >= u16::MAX as usize
            || dir_len >= u32::MAX as u64
            || dir_offset >= u32::MAX as u64;

        if need_zip64 {
            let zip64_offset = self.sink.offset();
            let record =
                header::zip64_eocd_record(self.entries.len() as u64, dir_len, dir_offset);
            self.sink.write(&record, FlushHint::None, &mut self.log);
            let locator = header::zip64_eocd_locator(zip64_offset);
            self.sink.write(&locator, FlushHint::None, &mut self.log);
        }

        let eocd = header::eocd(self.entries.len(), dir_len, dir_offset);
        self.sink.write(&eocd, FlushHint::EndOfStream, &mut self.log);

        if self.sink.is_bad() {
            Err(ZipError::WriteFailed)
        } else {
            Ok(self.sink.into_inner())
        }
    }

    pub(crate) fn log(&mut self, msg: &str) {
        self.log.emit(msg);
    }

    fn require_idle(&self, what: &'static str) -> Result<()> {
        match self.state {
            FeedState::Idle => Ok(()),
            _ => Err(ZipError::InvalidState(what)),
        }
    }
}

impl<F> ZipWriter<CallbackSink<F>>
where
    F: FnMut(Option<&[u8]>) -> bool,
{
    /// Drive the archive through a `put(bytes|None) -> abort` callback
    /// instead of a concrete writer, mirroring a caller-supplied sink.
    pub fn pipe(put: F, level: i32) -> Result<Self> {
        ZipWriter::new(CallbackSink::new(put), level)
    }
}
