//! Single chokepoint for all archive output. Never seeks; tracks a running
//! offset and a sticky write-error flag so a failure mid-entry still lets
//! the session traverse its state machine and finish cleanly.

use crate::log::LogSink;
use std::io::{self, Write};

/// Hint passed alongside a write so the sink knows whether to flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FlushHint {
    None,
    EndOfStream,
}

pub(crate) struct Sink<W> {
    writer: W,
    offset: u64,
    bad: bool,
}

impl<W: Write> Sink<W> {
    pub(crate) fn new(writer: W) -> Self {
        Self {
            writer,
            offset: 0,
            bad: false,
        }
    }

    /// Write `buf` and apply `hint`. Silently discards once latched. On a
    /// failure, latches `bad` and logs once; never calls the inner writer
    /// again afterward.
    pub(crate) fn write(&mut self, buf: &[u8], hint: FlushHint, log: &mut LogSink) {
        if self.bad {
            return;
        }
        if !buf.is_empty() {
            match self.writer.write_all(buf) {
                Ok(()) => self.offset += buf.len() as u64,
                Err(e) => {
                    self.bad = true;
                    log.emit(&format!("write error: {}", e));
                    return;
                }
            }
        }
        if hint == FlushHint::EndOfStream {
            if let Err(e) = self.writer.flush() {
                self.bad = true;
                log.emit(&format!("flush error: {}", e));
            }
        }
    }

    pub(crate) fn is_bad(&self) -> bool {
        self.bad
    }

    pub(crate) fn offset(&self) -> u64 {
        self.offset
    }

    pub(crate) fn into_inner(self) -> W {
        self.writer
    }
}

/// Adapts a `FnMut(Option<&[u8]>) -> bool` callback into a [`Write`]
/// implementor, reproducing the `put(handle, bytes|NULL, len) -> 0|nonzero`
/// collaborator contract: `None` signals end-of-stream (the callback may
/// flush), and returning `true` is a permanent abort.
pub struct CallbackSink<F> {
    put: F,
}

impl<F> CallbackSink<F>
where
    F: FnMut(Option<&[u8]>) -> bool,
{
    pub fn new(put: F) -> Self {
        Self { put }
    }
}

impl<F> Write for CallbackSink<F>
where
    F: FnMut(Option<&[u8]>) -> bool,
{
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if (self.put)(Some(buf)) {
            Err(io::Error::new(io::ErrorKind::Other, "callback aborted"))
        } else {
            Ok(buf.len())
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        if (self.put)(None) {
            Err(io::Error::new(io::ErrorKind::Other, "callback aborted"))
        } else {
            Ok(())
        }
    }
}
