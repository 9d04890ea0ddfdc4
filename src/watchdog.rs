//! External watchdog (COP) servicing.
//!
//! The bootloader core calls `service()` from any loop whose duration could
//! exceed the watchdog period: flash erase/program loops, the file-update
//! streaming loop, the idle poll. There is no scheduler behind this; if a
//! long-running loop forgets to call it, the device resets.

use embedded_hal::watchdog::{Watchdog, WatchdogEnable};

/// Reset-prevention timer hooks. Defaults are no-ops for boards without an
/// external watchdog.
pub trait CopService {
    /// Configure and arm the timer. Called once during bootloader init.
    fn init(&mut self) {}

    /// Reset the countdown. Called from long-running loops.
    fn service(&mut self) {}
}

/// No watchdog fitted.
pub struct NullCop;

impl CopService for NullCop {}

/// Adapter for any HAL watchdog timer.
pub struct HardwareCop<W, P> {
    timer: W,
    period: P,
}

impl<W, P> HardwareCop<W, P> {
    pub fn new(timer: W, period: P) -> Self {
        Self { timer, period }
    }
}

impl<W, P> CopService for HardwareCop<W, P>
where
    W: WatchdogEnable + Watchdog,
    P: Into<<W as WatchdogEnable>::Time> + Copy,
{
    fn init(&mut self) {
        self.timer.start(self.period);
    }

    fn service(&mut self) {
        self.timer.feed();
    }
}
