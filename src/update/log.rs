//! Session log sink: a log file on the file store plus a serial echo.
//!
//! The file half is best-effort. Once an open or append fails the sink
//! stops touching the file for the rest of the session; the update itself
//! never depends on the log being written. The serial half is unconditional
//! and strictly ordered: one byte at a time, blocking until the sink can
//! accept the next byte, no buffering.

use embedded_hal::serial::Write;
use nb::block;

use crate::config;
use crate::storage::FileStore;

pub struct LogSink<S: FileStore> {
    handle: Option<S::Handle>,
    usable: bool,
}

impl<S: FileStore> LogSink<S> {
    /// A sink with no file attached; what an idle session holds.
    pub fn inactive() -> Self {
        Self {
            handle: None,
            usable: false,
        }
    }

    /// Create or truncate the log file. On failure the sink comes up with
    /// `usable == false` and is never retried for this session.
    pub fn open(store: &mut S) -> Self {
        match store.create(config::LOG_FILENAME) {
            Ok(handle) => Self {
                handle: Some(handle),
                usable: true,
            },
            Err(_) => Self::inactive(),
        }
    }

    pub fn usable(&self) -> bool {
        self.usable
    }

    /// Append `text` to the log file (while usable) and echo it over
    /// serial. An append failure closes the file and latches the sink
    /// unusable; the serial echo happens regardless. Empty text touches
    /// neither sink.
    pub fn write<TX: Write<u8>>(&mut self, store: &mut S, serial: &mut TX, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.usable {
            let append_failed = match self.handle.as_mut() {
                Some(handle) => store.append(handle, text.as_bytes()).is_err(),
                None => false,
            };
            if append_failed {
                self.usable = false;
                if let Some(handle) = self.handle.take() {
                    store.close(handle);
                }
            }
        }
        for byte in text.bytes() {
            // serial echo is busy-wait by contract; errors have no handler
            block!(serial.write(byte)).ok();
        }
    }

    /// Close the log file if one is open. Safe to call on an unusable or
    /// already-closed sink.
    pub fn close(&mut self, store: &mut S) {
        if let Some(handle) = self.handle.take() {
            store.close(handle);
        }
        self.usable = false;
    }
}
