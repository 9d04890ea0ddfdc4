//! Build-time configuration constants for the bootloader hooks

/// Firmware image the update detector polls for on the file store
pub const FIRMWARE_FILENAME: &str = "/demoprog.srec";

/// Log file created (or truncated) at the start of every update session
pub const LOG_FILENAME: &str = "/bootlog.txt";

/// Baud rate of the serial line that mirrors the update log
pub const LOG_BAUD: u32 = 57_600;

/// External watchdog timeout period in milliseconds
pub const COP_TIMEOUT_MS: u16 = 1000;
