//! Customization hooks for a microcontroller bootloader.
//!
//! The bootloader core (flash driver, host protocol, image checking) calls
//! into this layer at well-defined points: backdoor entry after reset,
//! user program hand-off, extra NVM address ranges, external watchdog
//! servicing, and the firmware-update-from-file-storage workflow. Every
//! hook has a default that keeps the stock behavior; integrators swap in
//! their own implementation where the board needs it.

#![cfg_attr(not(test), no_std)]

pub mod config;

#[cfg(feature = "backdoor-hooks")]
pub mod backdoor;
#[cfg(feature = "nvm-hooks")]
pub mod memory;
#[cfg(feature = "cop-hooks")]
pub mod watchdog;

#[cfg(feature = "file-update")]
pub mod storage;
#[cfg(feature = "file-update")]
pub mod update;

// Re-export commonly used types
#[cfg(feature = "backdoor-hooks")]
pub use backdoor::{AlwaysEnter, AlwaysStart, BackdoorEntry, UserProgramStart};
#[cfg(feature = "nvm-hooks")]
pub use memory::{ExtendedRange, MemoryResult, NoExtendedMemory, NvmHook, NvmMedium};
#[cfg(feature = "cop-hooks")]
pub use watchdog::{CopService, HardwareCop, NullCop};

#[cfg(feature = "file-update")]
pub use storage::{FileInfo, FileStore};
#[cfg(feature = "file-update")]
pub use update::detect::{update_requested, FirmwareFilename, FixedFilename};
#[cfg(feature = "file-update")]
pub use update::{run_pending_update, SessionOutcome, UpdateSession};
