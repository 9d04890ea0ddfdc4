//! Update request detection.
//!
//! The bootloader polls [`update_requested`] continuously while idle. The
//! check must stay cheap and side-effect-free; it runs every idle-loop
//! iteration.

use crate::config;
use crate::storage::FileStore;

/// Names the firmware image the detector looks for. Constant for the life
/// of the process.
pub trait FirmwareFilename {
    fn filename(&self) -> &str;
}

/// Default provider: the fixed path from [`config::FIRMWARE_FILENAME`].
pub struct FixedFilename;

impl FirmwareFilename for FixedFilename {
    fn filename(&self) -> &str {
        config::FIRMWARE_FILENAME
    }
}

/// Returns `true` iff the firmware file exists, is a regular file, and has
/// a non-zero size.
///
/// Fails closed: a missing entry, a directory, an empty file, and a store
/// query failure all answer `false`. The bootloader must never start an
/// update it cannot read back.
pub fn update_requested<S, F>(store: &mut S, firmware: &F) -> bool
where
    S: FileStore,
    F: FirmwareFilename,
{
    match store.stat(firmware.filename()) {
        Ok(Some(info)) => !info.is_dir && info.size > 0,
        Ok(None) | Err(_) => false,
    }
}
