//! OS-specific metadata extraction for the filesystem walker. Exactly one
//! of these compiles in for a given target, producing the `EntryMeta`
//! variant matching that OS's native attribute/timestamp representation.

#[cfg(unix)]
mod unix;
#[cfg(unix)]
pub(crate) use unix::metadata_for;

#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub(crate) use windows::metadata_for;
