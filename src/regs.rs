//! The UART register block and the port abstraction the driver talks to.

use bitflags::bitflags;

use crate::RegisterBlock;

/// Layout of the UART register block.
///
/// Never build a reference to this type at a hardware address; go through
/// [`UartRegisters::new_mmio_at`] and the [`MmioUartRegisters`] handle it
/// returns. A plain value of this type is only useful as a stand-in for the
/// hardware in host tests.
///
/// ```
/// use emb_uart::regs::UartRegisters;
///
/// let mut block = UartRegisters::default();
/// // Safety: `block` outlives the handle and nothing else touches it.
/// let mut regs = unsafe { UartRegisters::new_mmio(&raw mut block) };
/// regs.write_cnr(0x3);
/// assert_eq!(regs.read_cnr(), 0x3);
/// ```
///
/// The status register cannot be written:
///
/// ```compile_fail
/// use emb_uart::regs::UartRegisters;
///
/// let mut block = UartRegisters::default();
/// let mut regs = unsafe { UartRegisters::new_mmio(&raw mut block) };
/// regs.write_sta(0x2);
/// ```
///
/// nor read-modify-written:
///
/// ```compile_fail
/// use emb_uart::regs::UartRegisters;
///
/// let mut block = UartRegisters::default();
/// let mut regs = unsafe { UartRegisters::new_mmio(&raw mut block) };
/// regs.modify_sta(|v| v | 0x2);
/// ```
///
/// and the transmit data register cannot be read back:
///
/// ```compile_fail
/// use emb_uart::regs::UartRegisters;
///
/// let mut block = UartRegisters::default();
/// let mut regs = unsafe { UartRegisters::new_mmio(&raw mut block) };
/// let _ = regs.read_tdr();
/// ```
#[derive(RegisterBlock, Debug, Default, Clone, PartialEq, Eq)]
#[repr(C)]
pub struct UartRegisters {
    /// Control register.
    #[reg(RW)]
    pub cnr: u32,
    /// Baud rate and line configuration register.
    #[reg(RW)]
    pub brr: u32,
    /// Status register.
    #[reg(RO)]
    pub sta: u32,
    /// Transmit data register.
    #[reg(WO)]
    pub tdr: u32,
    /// Receive data register.
    #[reg(RO)]
    pub rdr: u32,
}

bitflags! {
    /// Bits of the CNR register.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Control: u32 {
        /// Enable the transmitter and receiver.
        const ENABLE = 1 << 0;
        /// Raise an interrupt whenever STA changes. Nothing in this crate
        /// services it.
        const STATUS_IRQ = 1 << 1;
    }
}

bitflags! {
    /// Bits of the STA register. Both are owned by hardware.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Status: u32 {
        /// A byte is waiting in RDR. Cleared by reading RDR.
        const RX_READY = 1 << 0;
        /// TDR can accept a byte. Cleared by writing TDR.
        const TX_READY = 1 << 1;
    }
}

/// The register accesses the driver needs.
///
/// Each method is exactly one 32-bit access to the named register. The MMIO
/// handle implements this with volatile loads and stores; tests implement it
/// with recording doubles.
pub trait UartPort {
    /// Address of the register block this port is bound to.
    fn base_address(&self) -> usize;
    /// Store to the control register.
    fn write_cnr(&mut self, value: u32);
    /// Store to the baud rate and line configuration register.
    fn write_brr(&mut self, value: u32);
    /// Load the status register.
    fn read_sta(&mut self) -> u32;
    /// Store to the transmit data register. Clears TX ready in hardware.
    fn write_tdr(&mut self, value: u32);
    /// Load the receive data register. Clears RX ready in hardware.
    fn read_rdr(&mut self) -> u32;
}

impl UartPort for MmioUartRegisters<'_> {
    fn base_address(&self) -> usize {
        MmioUartRegisters::base_address(self)
    }

    fn write_cnr(&mut self, value: u32) {
        MmioUartRegisters::write_cnr(self, value)
    }

    fn write_brr(&mut self, value: u32) {
        MmioUartRegisters::write_brr(self, value)
    }

    fn read_sta(&mut self) -> u32 {
        MmioUartRegisters::read_sta(self)
    }

    fn write_tdr(&mut self, value: u32) {
        MmioUartRegisters::write_tdr(self, value)
    }

    fn read_rdr(&mut self) -> u32 {
        MmioUartRegisters::read_rdr(self)
    }
}

/// Map the register block at `base`.
///
/// Returns `None` for a null or misaligned address; nothing is dereferenced
/// in either case.
///
/// # Safety
///
/// A non-null, aligned `base` must be the address of a UART register block
/// that stays mapped for `'static`, and no other handle to it may exist.
pub unsafe fn map(base: usize) -> Option<MmioUartRegisters<'static>> {
    if base == 0 || base % core::mem::align_of::<UartRegisters>() != 0 {
        return None;
    }
    Some(UartRegisters::new_mmio_at(base))
}
