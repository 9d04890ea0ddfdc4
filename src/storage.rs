//! File store seam for the update-from-storage workflow.
//!
//! The actual store (FAT on SD-card, SPI flash filesystem, host loopback in
//! tests) lives outside this crate; the update workflow only needs this
//! small synchronous surface.

/// Directory entry metadata returned by [`FileStore::stat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileInfo {
    /// Size in bytes. Zero for directories on most stores.
    pub size: u32,
    pub is_dir: bool,
}

/// Minimal synchronous file store.
///
/// `stat` distinguishes "no such entry" (`Ok(None)`) from "the store itself
/// failed" (`Err`); the update detector treats both as "no update pending"
/// but the distinction matters for diagnostics.
pub trait FileStore {
    /// Owned open-file resource. Dropped or passed back to [`close`].
    ///
    /// [`close`]: FileStore::close
    type Handle;
    type Error;

    fn stat(&mut self, path: &str) -> Result<Option<FileInfo>, Self::Error>;

    /// Create `path`, truncating any existing entry, open for writing.
    fn create(&mut self, path: &str) -> Result<Self::Handle, Self::Error>;

    fn append(&mut self, handle: &mut Self::Handle, data: &[u8]) -> Result<(), Self::Error>;

    /// Close an open handle. Close failures have nowhere to go; the store
    /// should release the handle regardless.
    fn close(&mut self, handle: Self::Handle);

    fn remove(&mut self, path: &str) -> Result<(), Self::Error>;
}
