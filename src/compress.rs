//! Reusable raw-deflate compression unit: one `flate2::Compress` engine
//! reset between entries, a scratch output buffer, and a running CRC-32
//! over the uncompressed bytes fed to it.

use crate::log::LogSink;
use crate::sink::{FlushHint, Sink};
use crc32fast::Hasher as Crc32;
use flate2::{Compress, Compression, FlushCompress, Status};
use std::io::Write;

/// 256 KiB on 64-bit hosts, 32 KiB on hosts with a 32-bit pointer width.
#[cfg(target_pointer_width = "64")]
pub(crate) const CHUNK: usize = 256 * 1024;
#[cfg(not(target_pointer_width = "64"))]
pub(crate) const CHUNK: usize = 32 * 1024;

pub(crate) struct CompressionUnit {
    compress: Compress,
    crc: Crc32,
    out_buf: Vec<u8>,
    uncompressed_len: u64,
    compressed_len: u64,
}

impl CompressionUnit {
    pub(crate) fn new(level: Compression) -> Self {
        Self {
            compress: Compress::new(level, false),
            crc: Crc32::new(),
            out_buf: vec![0u8; CHUNK],
            uncompressed_len: 0,
            compressed_len: 0,
        }
    }

    /// Reset for a new entry. Preserves the allocated `Compress` state.
    pub(crate) fn begin(&mut self, level: Compression) {
        self.compress.reset();
        self.compress.set_level(level);
        self.crc = Crc32::new();
        self.uncompressed_len = 0;
        self.compressed_len = 0;
    }

    pub(crate) fn crc32(&self) -> u32 {
        self.crc.clone().finalize()
    }

    pub(crate) fn uncompressed_len(&self) -> u64 {
        self.uncompressed_len
    }

    pub(crate) fn compressed_len(&self) -> u64 {
        self.compressed_len
    }

    /// Feed `data` through the deflate engine, writing every produced chunk
    /// to `sink` as it is produced. Updates CRC and the running counters.
    pub(crate) fn feed<W: Write>(
        &mut self,
        data: &[u8],
        sink: &mut Sink<W>,
        log: &mut LogSink,
    ) {
        self.crc.update(data);
        self.uncompressed_len += data.len() as u64;
        self.pump(data, FlushCompress::None, sink, log);
    }

    /// Finish the stream: drain any buffered input/output with `Finish`.
    pub(crate) fn finish<W: Write>(&mut self, sink: &mut Sink<W>, log: &mut LogSink) {
        self.pump(&[], FlushCompress::Finish, sink, log);
    }

    fn pump<W: Write>(
        &mut self,
        mut data: &[u8],
        flush: FlushCompress,
        sink: &mut Sink<W>,
        log: &mut LogSink,
    ) {
        loop {
            let before_in = self.compress.total_in();
            let before_out = self.compress.total_out();
            let status = self
                .compress
                .compress(data, &mut self.out_buf, flush)
                .expect("deflate compression failed");

            let consumed = (self.compress.total_in() - before_in) as usize;
            let produced = (self.compress.total_out() - before_out) as usize;
            if produced > 0 {
                self.compressed_len += produced as u64;
                sink.write(&self.out_buf[..produced], FlushHint::None, log);
            }
            data = &data[consumed..];

            match status {
                Status::Ok | Status::BufError => {
                    if data.is_empty() && flush != FlushCompress::Finish {
                        break;
                    }
                    if produced == 0 && consumed == 0 {
                        // Nothing more to do with None/Sync flush on empty input.
                        break;
                    }
                }
                Status::StreamEnd => break,
            }
        }
    }
}
