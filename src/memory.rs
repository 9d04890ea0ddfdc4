//! Extended NVM range hooks.
//!
//! The generic NVM driver only knows the MCU's internal flash. When the
//! host asks it to program or erase an address it does not own, it offers
//! the request to this hook first. `NotInRange` means "not mine either";
//! the driver then reports an unsupported address to the host.

/// Outcome of an extended write or erase. There is no partial success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryResult {
    Done,
    NotInRange,
    Failed,
}

/// Hooks the NVM driver calls for addresses outside its built-in regions.
///
/// The defaults decline every request, which leaves the driver's built-in
/// behavior unchanged.
pub trait NvmHook {
    /// Called once before any write or erase, at NVM driver init.
    fn init(&mut self) {}

    /// Program `data` at `addr`. Must perform no mutation when returning
    /// `NotInRange`.
    fn write(&mut self, addr: u32, data: &[u8]) -> MemoryResult {
        let _ = (addr, data);
        MemoryResult::NotInRange
    }

    /// Erase `len` bytes starting at `addr`. Must perform no mutation when
    /// returning `NotInRange`.
    fn erase(&mut self, addr: u32, len: u32) -> MemoryResult {
        let _ = (addr, len);
        MemoryResult::NotInRange
    }

    /// Called once after all write/erase operations of a programming
    /// session; flush any buffered state. `true` on success.
    fn done(&mut self) -> bool {
        true
    }
}

/// Default hook: no extra memory attached.
pub struct NoExtendedMemory;

impl NvmHook for NoExtendedMemory {}

/// Byte-addressed medium backing an extended range (external flash,
/// EEPROM, FRAM). Offsets are relative to the start of the range.
pub trait NvmMedium {
    type Error;

    fn write(&mut self, offset: u32, data: &[u8]) -> Result<(), Self::Error>;
    fn erase(&mut self, offset: u32, len: u32) -> Result<(), Self::Error>;

    /// Flush buffered state at the end of a programming session.
    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// An extended range `base..base+length` in the device address space,
/// mapped onto a medium. Requests must fit entirely inside the range;
/// anything that straddles the boundary is declined untouched.
pub struct ExtendedRange<M> {
    medium: M,
    base: u32,
    length: u32,
}

impl<M: NvmMedium> ExtendedRange<M> {
    pub fn new(medium: M, base: u32, length: u32) -> Self {
        Self {
            medium,
            base,
            length,
        }
    }

    fn covers(&self, addr: u32, len: u32) -> bool {
        // u64 math so base + length and addr + len cannot wrap
        let start = addr as u64;
        let end = start + len as u64;
        let range_start = self.base as u64;
        let range_end = range_start + self.length as u64;
        start >= range_start && end <= range_end
    }
}

impl<M: NvmMedium> NvmHook for ExtendedRange<M> {
    fn write(&mut self, addr: u32, data: &[u8]) -> MemoryResult {
        if !self.covers(addr, data.len() as u32) {
            return MemoryResult::NotInRange;
        }
        if data.is_empty() {
            return MemoryResult::Done;
        }
        match self.medium.write(addr - self.base, data) {
            Ok(()) => MemoryResult::Done,
            Err(_) => MemoryResult::Failed,
        }
    }

    fn erase(&mut self, addr: u32, len: u32) -> MemoryResult {
        if !self.covers(addr, len) {
            return MemoryResult::NotInRange;
        }
        if len == 0 {
            return MemoryResult::Done;
        }
        match self.medium.erase(addr - self.base, len) {
            Ok(()) => MemoryResult::Done,
            Err(_) => MemoryResult::Failed,
        }
    }

    fn done(&mut self) -> bool {
        self.medium.flush().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: u32 = 0x0800_0000;
    const LEN: u32 = 0x1000;

    #[derive(Default)]
    struct MemNvm {
        writes: Vec<(u32, Vec<u8>)>,
        erases: Vec<(u32, u32)>,
        fail: bool,
        flushed: u32,
    }

    impl NvmMedium for MemNvm {
        type Error = ();

        fn write(&mut self, offset: u32, data: &[u8]) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.writes.push((offset, data.to_vec()));
            Ok(())
        }

        fn erase(&mut self, offset: u32, len: u32) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.erases.push((offset, len));
            Ok(())
        }

        fn flush(&mut self) -> Result<(), ()> {
            self.flushed += 1;
            Ok(())
        }
    }

    fn range() -> ExtendedRange<MemNvm> {
        ExtendedRange::new(MemNvm::default(), BASE, LEN)
    }

    #[test]
    fn default_hook_declines_everything() {
        let mut hook = NoExtendedMemory;
        hook.init();
        assert_eq!(hook.write(0, &[1, 2, 3]), MemoryResult::NotInRange);
        assert_eq!(hook.erase(0, 64), MemoryResult::NotInRange);
        assert!(hook.done());
    }

    #[test]
    fn outside_range_untouched() {
        let mut ext = range();
        assert_eq!(ext.write(BASE - 4, &[0xAA; 4]), MemoryResult::NotInRange);
        assert_eq!(ext.write(BASE + LEN, &[0xAA; 4]), MemoryResult::NotInRange);
        assert_eq!(ext.erase(0, 16), MemoryResult::NotInRange);
        assert!(ext.medium.writes.is_empty());
        assert!(ext.medium.erases.is_empty());
    }

    #[test]
    fn straddling_request_declined() {
        let mut ext = range();
        // last 2 bytes in range, next 2 outside
        assert_eq!(ext.write(BASE + LEN - 2, &[0; 4]), MemoryResult::NotInRange);
        assert_eq!(ext.erase(BASE + LEN - 2, 4), MemoryResult::NotInRange);
        assert!(ext.medium.writes.is_empty());
        assert!(ext.medium.erases.is_empty());
    }

    #[test]
    fn matched_write_uses_relative_offset() {
        let mut ext = range();
        assert_eq!(ext.write(BASE + 0x100, &[1, 2, 3]), MemoryResult::Done);
        assert_eq!(ext.medium.writes, vec![(0x100, vec![1, 2, 3])]);
    }

    #[test]
    fn matched_erase() {
        let mut ext = range();
        assert_eq!(ext.erase(BASE, LEN), MemoryResult::Done);
        assert_eq!(ext.medium.erases, vec![(0, LEN)]);
    }

    #[test]
    fn zero_length_in_range_is_done_without_medium_call() {
        let mut ext = range();
        assert_eq!(ext.write(BASE, &[]), MemoryResult::Done);
        assert_eq!(ext.erase(BASE + 8, 0), MemoryResult::Done);
        assert!(ext.medium.writes.is_empty());
        assert!(ext.medium.erases.is_empty());
    }

    #[test]
    fn medium_failure_reported() {
        let mut ext = range();
        ext.medium.fail = true;
        assert_eq!(ext.write(BASE, &[1]), MemoryResult::Failed);
        assert_eq!(ext.erase(BASE, 1), MemoryResult::Failed);
    }

    #[test]
    fn done_flushes_medium() {
        let mut ext = range();
        assert!(ext.done());
        assert_eq!(ext.medium.flushed, 1);
    }

    #[test]
    fn address_arithmetic_does_not_wrap() {
        let mut ext = ExtendedRange::new(MemNvm::default(), 0xFFFF_F000, 0x1000);
        assert_eq!(ext.write(0xFFFF_FF00, &[0; 0x100]), MemoryResult::Done);
        assert_eq!(ext.erase(0xFFFF_FF00, 0x101), MemoryResult::NotInRange);
    }
}
