//! Firmware update from local file storage.
//!
//! The bootloader idle loop polls [`detect::update_requested`]; when an
//! image is waiting it opens an [`UpdateSession`], streams programming
//! progress through the session log, and finishes with [`completed`] or
//! [`error`]. [`run_pending_update`] packages that sequence for callers
//! that keep the programming engine behind a closure.
//!
//! [`completed`]: UpdateSession::completed
//! [`error`]: UpdateSession::error

pub mod detect;
pub mod log;

use embedded_hal::serial::Write;
use nb::block;

use crate::storage::FileStore;
use crate::watchdog::CopService;
use detect::FirmwareFilename;
use log::LogSink;

/// How a session ended. Error codes come from the update engine and are
/// opaque here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Completed,
    Error(u8),
}

enum State {
    Idle,
    Started,
}

/// One firmware update from local storage.
///
/// Owns its log state for exactly one start-to-finish run; no two sessions
/// may be active at once. All methods run to completion on the caller's
/// thread, and the serial echo inside [`log`] busy-waits per byte, so a
/// slow serial consumer stretches the whole session.
///
/// [`log`]: UpdateSession::log
pub struct UpdateSession<'a, S: FileStore, TX: Write<u8>> {
    store: &'a mut S,
    serial: &'a mut TX,
    firmware_path: &'a str,
    state: State,
    sink: LogSink<S>,
}

impl<'a, S: FileStore, TX: Write<u8>> UpdateSession<'a, S, TX> {
    pub fn new(store: &'a mut S, serial: &'a mut TX, firmware_path: &'a str) -> Self {
        Self {
            store,
            serial,
            firmware_path,
            state: State::Idle,
            sink: LogSink::inactive(),
        }
    }

    /// The update is starting: create/truncate the log file. A log file
    /// that cannot be opened never blocks the update; the session simply
    /// runs without one.
    ///
    /// Calling this twice without an intervening [`completed`]/[`error`]
    /// is a caller bug.
    ///
    /// [`completed`]: UpdateSession::completed
    /// [`error`]: UpdateSession::error
    pub fn started(&mut self) {
        debug_assert!(matches!(self.state, State::Idle), "session already started");
        self.sink = LogSink::open(self.store);
        self.state = State::Started;
    }

    /// Record a progress entry: append to the log file while that still
    /// works, and echo every byte over serial in order.
    pub fn log(&mut self, text: &str) {
        debug_assert!(matches!(self.state, State::Started), "log() outside a session");
        self.sink.write(self.store, self.serial, text);
    }

    /// Whether log-file writes are still being attempted. The serial echo
    /// is independent of this.
    pub fn log_usable(&self) -> bool {
        self.sink.usable()
    }

    /// The update finished successfully: close the log, drain the serial
    /// line completely, then delete the firmware file so the same image is
    /// not applied again on the next boot.
    ///
    /// The delete is best-effort and unreported, and nothing guards
    /// against a reset between the drain and the delete; either way the
    /// next boot sees the file again and re-runs the update, which is only
    /// sound if programming the same image twice is acceptable.
    pub fn completed(&mut self) {
        debug_assert!(matches!(self.state, State::Started), "completed() outside a session");
        self.sink.close(self.store);
        // full drain, not the per-byte readiness wait used while logging
        block!(self.serial.flush()).ok();
        self.store.remove(self.firmware_path).ok();
        self.state = State::Idle;
    }

    /// The update failed: close the log and nothing else. The firmware
    /// file stays on the store for diagnosis or a retry on the next boot,
    /// and no serial drain is performed.
    pub fn error(&mut self, _code: u8) {
        debug_assert!(matches!(self.state, State::Started), "error() outside a session");
        self.sink.close(self.store);
        self.state = State::Idle;
    }
}

/// Lets callers build log lines with `uwrite!`/`uwriteln!` straight into
/// the session.
impl<S: FileStore, TX: Write<u8>> ufmt::uWrite for UpdateSession<'_, S, TX> {
    type Error = core::convert::Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.log(s);
        Ok(())
    }
}

/// One idle-loop iteration of the update workflow.
///
/// Polls the store for a pending image; if none is waiting returns `None`
/// without side effects. Otherwise runs a full session around `program`,
/// which receives the session (for logging) and the watchdog service (to
/// keep the device alive through long erase/program stretches). `program`
/// returns `Err(code)` to abort with that code.
pub fn run_pending_update<'a, S, TX, F, C, P>(
    store: &'a mut S,
    serial: &'a mut TX,
    firmware: &'a F,
    cop: &mut C,
    program: P,
) -> Option<SessionOutcome>
where
    S: FileStore,
    TX: Write<u8>,
    F: FirmwareFilename,
    C: CopService,
    P: FnOnce(&mut UpdateSession<'a, S, TX>, &mut C) -> Result<(), u8>,
{
    if !detect::update_requested(store, firmware) {
        return None;
    }
    cop.service();
    let mut session = UpdateSession::new(store, serial, firmware.filename());
    session.started();
    match program(&mut session, cop) {
        Ok(()) => {
            session.completed();
            Some(SessionOutcome::Completed)
        }
        Err(code) => {
            session.error(code);
            Some(SessionOutcome::Error(code))
        }
    }
}
