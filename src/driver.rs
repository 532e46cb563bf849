//! The polled UART driver.

use log::{debug, trace, warn};

use crate::config::BRR_INIT;
use crate::error::{Error, Result};
use crate::poll::{self, PollPolicy, SpinLimit};
use crate::regs::{self, Control, MmioUartRegisters, Status, UartPort};

/// A polled driver for one UART.
///
/// The driver owns the port it is bound to. Create it, call
/// [`initialize`](Self::initialize) once, then move bytes with
/// [`write_byte`](Self::write_byte) and [`read_byte`](Self::read_byte).
///
/// The driver does no locking. Wrap it in a mutex if more than one thread
/// needs it.
#[derive(Debug)]
pub struct UartDriver<T, P = SpinLimit> {
    port: Option<T>,
    policy: P,
    initialized: bool,
}

impl UartDriver<MmioUartRegisters<'static>> {
    /// Bind a driver to the register block at `base`.
    ///
    /// A null or misaligned `base` yields a driver whose every operation
    /// fails with [`Error::InvalidHandle`].
    ///
    /// # Safety
    ///
    /// See [`regs::map`].
    pub unsafe fn new_at(base: usize) -> Self {
        Self {
            port: regs::map(base),
            policy: SpinLimit::default(),
            initialized: false,
        }
    }
}

impl<T: UartPort> UartDriver<T> {
    /// Bind a driver to an already mapped port.
    pub fn new(port: T) -> Self {
        Self {
            port: Some(port),
            policy: SpinLimit::default(),
            initialized: false,
        }
    }

    /// A driver that is not bound to anything.
    pub fn unbound() -> Self {
        Self {
            port: None,
            policy: SpinLimit::default(),
            initialized: false,
        }
    }
}

impl<T: UartPort> Default for UartDriver<T> {
    fn default() -> Self {
        Self::unbound()
    }
}

impl<T: UartPort, P: PollPolicy> UartDriver<T, P> {
    /// Replace the policy that bounds every status poll.
    pub fn with_policy<Q: PollPolicy>(self, policy: Q) -> UartDriver<T, Q> {
        UartDriver {
            port: self.port,
            policy,
            initialized: self.initialized,
        }
    }

    /// Program the control and line configuration registers.
    ///
    /// Enables the transmitter, receiver and status-change interrupt, then
    /// writes [`BRR_INIT`] to BRR. Calling this again writes the same values
    /// again.
    pub fn initialize(&mut self) -> Result<()> {
        let Some(port) = self.port.as_mut() else {
            warn!("uart: initialize on a driver with no register block");
            return Err(Error::InvalidHandle);
        };

        let control = Control::ENABLE | Control::STATUS_IRQ;
        let brr = BRR_INIT;
        port.write_cnr(control.bits());
        port.write_brr(brr);
        self.initialized = true;

        debug!(
            "uart@{:#x}: initialized, cnr={:#x} brr={:#06x}",
            port.base_address(),
            control.bits(),
            brr
        );
        Ok(())
    }

    /// Send one byte.
    ///
    /// Waits for TX-ready, then stores `byte` to TDR exactly once. On
    /// timeout nothing is written.
    pub fn write_byte(&mut self, byte: u8) -> Result<()> {
        let port = bound(&mut self.port, self.initialized)?;

        if !poll::wait_for(port, &mut self.policy, Status::TX_READY) {
            warn!("uart@{:#x}: timed out waiting for TX ready", port.base_address());
            return Err(Error::Timeout);
        }
        port.write_tdr(u32::from(byte));
        trace!("uart@{:#x}: tx {:#04x}", port.base_address(), byte);
        Ok(())
    }

    /// Receive one byte.
    ///
    /// Waits for RX-ready, then loads RDR exactly once and returns its low
    /// byte. On timeout RDR is not touched.
    pub fn read_byte(&mut self) -> Result<u8> {
        let port = bound(&mut self.port, self.initialized)?;

        if !poll::wait_for(port, &mut self.policy, Status::RX_READY) {
            warn!("uart@{:#x}: timed out waiting for RX ready", port.base_address());
            return Err(Error::Timeout);
        }
        let byte = (port.read_rdr() & 0xFF) as u8;
        trace!("uart@{:#x}: rx {:#04x}", port.base_address(), byte);
        Ok(byte)
    }

    /// Sample the status register once.
    pub fn status(&mut self) -> Result<Status> {
        let port = bound(&mut self.port, self.initialized)?;
        Ok(Status::from_bits_truncate(port.read_sta()))
    }

    /// Has [`initialize`](Self::initialize) completed?
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Address of the bound register block, if any.
    pub fn base_address(&self) -> Option<usize> {
        self.port.as_ref().map(|port| port.base_address())
    }

    /// The bound port, for inspection only.
    pub fn port(&self) -> Option<&T> {
        self.port.as_ref()
    }

    /// The policy bounding each status poll.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Give up the driver and hand back the port.
    pub fn release(self) -> Option<T> {
        self.port
    }
}

fn bound<T: UartPort>(port: &mut Option<T>, initialized: bool) -> Result<&mut T> {
    let Some(port) = port.as_mut() else {
        warn!("uart: driver has no register block");
        return Err(Error::InvalidHandle);
    };
    if !initialized {
        warn!("uart@{:#x}: not initialized", port.base_address());
        return Err(Error::NotInitialized);
    }
    Ok(port)
}
