//! Backdoor entry and user program hand-off gates.
//!
//! Two decision points the bootloader core consults: whether to stay in the
//! bootloader after reset without an explicit host request, and whether it
//! is okay to hand control to the resident application. Both must return
//! quickly; they sit on the reset and hand-off paths.

/// Decides whether the bootloader stays active after a reset.
pub trait BackdoorEntry {
    /// Prepare whatever state the decision needs (pin direction, flag read).
    fn init(&mut self) {}

    /// Returns `true` to keep the bootloader active. Must not block and
    /// must not mutate state; a custom gate may sample a GPIO or a flag.
    fn entry_requested(&self) -> bool;
}

/// Last-moment check before jumping to the user program. Returning `false`
/// keeps the bootloader active.
pub trait UserProgramStart {
    fn start_allowed(&self) -> bool;
}

/// Default gate: the bootloader always takes control after a reset.
pub struct AlwaysEnter;

impl BackdoorEntry for AlwaysEnter {
    fn entry_requested(&self) -> bool {
        true
    }
}

/// Default gate: the user program may always start.
pub struct AlwaysStart;

impl UserProgramStart for AlwaysStart {
    fn start_allowed(&self) -> bool {
        true
    }
}
