//! A register-level test double for the UART.
#![allow(dead_code)]

use emb_uart::regs::{Status, UartPort};

/// One access the driver made, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    WriteCnr(u32),
    WriteBrr(u32),
    ReadSta,
    WriteTdr(u32),
    ReadRdr,
}

/// Records every register access and behaves like the hardware does:
/// reading RDR clears RX ready, writing TDR clears TX ready.
#[derive(Debug, Default)]
pub struct RecordingPort {
    pub cnr: u32,
    pub brr: u32,
    pub sta: u32,
    pub tdr: u32,
    pub rdr: u32,
    pub log: Vec<Access>,
    pending: Option<(Status, usize)>,
}

pub const BASE: usize = 0xFC00_0000;

impl RecordingPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `flag` in STA after `polls` more reads of STA have seen it clear.
    pub fn raise_after(&mut self, flag: Status, polls: usize) {
        if polls == 0 {
            self.sta |= flag.bits();
        } else {
            self.pending = Some((flag, polls));
        }
    }

    /// A byte has arrived on the line.
    pub fn receive(&mut self, byte: u32) {
        self.rdr = byte;
        self.sta |= Status::RX_READY.bits();
    }

    pub fn count(&self, access: fn(&Access) -> bool) -> usize {
        self.log.iter().filter(|a| access(a)).count()
    }

    pub fn sta_reads(&self) -> usize {
        self.count(|a| *a == Access::ReadSta)
    }

    pub fn tdr_writes(&self) -> usize {
        self.count(|a| matches!(a, Access::WriteTdr(_)))
    }

    pub fn rdr_reads(&self) -> usize {
        self.count(|a| *a == Access::ReadRdr)
    }
}

impl UartPort for RecordingPort {
    fn base_address(&self) -> usize {
        BASE
    }

    fn write_cnr(&mut self, value: u32) {
        self.log.push(Access::WriteCnr(value));
        self.cnr = value;
    }

    fn write_brr(&mut self, value: u32) {
        self.log.push(Access::WriteBrr(value));
        self.brr = value;
    }

    fn read_sta(&mut self) -> u32 {
        self.log.push(Access::ReadSta);
        let value = self.sta;
        if let Some((flag, polls)) = self.pending.take() {
            if polls <= 1 {
                self.sta |= flag.bits();
            } else {
                self.pending = Some((flag, polls - 1));
            }
        }
        value
    }

    fn write_tdr(&mut self, value: u32) {
        self.log.push(Access::WriteTdr(value));
        self.tdr = value;
        self.sta &= !Status::TX_READY.bits();
    }

    fn read_rdr(&mut self) -> u32 {
        self.log.push(Access::ReadRdr);
        self.sta &= !Status::RX_READY.bits();
        self.rdr
    }
}

/// A clock that advances by one tick every time it is read.
#[derive(Debug, Default)]
pub struct TickClock(pub std::cell::Cell<u64>);

impl emb_uart::poll::Clock for &TickClock {
    fn now(&self) -> u64 {
        let now = self.0.get();
        self.0.set(now + 1);
        now
    }
}
