//! # zipflow: a streaming, non-seeking ZIP archive writer
//!
//! `zipflow` emits a valid ZIP file as a forward-only byte stream: it never
//! seeks the output and never buffers the whole archive in memory. Point it
//! at a directory and it walks the tree, or feed it entries yourself with
//! metadata followed by one or more data chunks. Output uses `deflate`,
//! upgrades transparently to Zip64 fields past the 32-bit limits, and
//! embeds OS-native timestamps and permissions.
//!
//! ## Quick start
//!
//! ### Walking a directory
//!
//! ```no_run
//! use zipflow::ZipWriter;
//!
//! let mut zip = ZipWriter::create("archive.zip", -1)?;
//! zip.add_path("./assets")?;
//! zip.finish()?;
//! # Ok::<(), zipflow::ZipError>(())
//! ```
//!
//! ### Feeding entries directly
//!
//! ```no_run
//! use zipflow::{EntryMeta, ZipWriter};
//!
//! let mut zip = ZipWriter::create("archive.zip", 6)?;
//! zip.begin_entry("hello.txt", EntryMeta::Unix { mode: 0o644, atime: 0, mtime: 0 })?;
//! zip.write_data(b"Hello, World!", true)?;
//! zip.finish()?;
//! # Ok::<(), zipflow::ZipError>(())
//! ```

mod compress;
mod dostime;
mod entry;
pub mod error;
mod header;
mod log;
mod platform;
mod sink;
mod walker;
pub mod writer;

pub use entry::EntryMeta;
pub use error::{Result, ZipError};
pub use log::LogHook;
pub use sink::CallbackSink;
pub use writer::ZipWriter;
