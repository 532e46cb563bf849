//! Board constants and the BRR line configuration.

/// Where the UART lives on the reference board.
pub const DEFAULT_BASE_ADDRESS: usize = 0xFC00_0000;

/// How many failed status polls a transfer tolerates before giving up.
pub const DEFAULT_POLL_LIMIT: u32 = 1_000_000;

/// The value `initialize` writes to BRR: 115200 baud, no parity, one stop
/// bit, no flow control, as the reference board expects it.
///
/// This is not what packing [`LineConfig::DEFAULT`] gives (`0x1026`).
/// Decoded with [`LineConfig::from_brr`] it reads as 115200 baud, no parity
/// and no flow control, but with a stop-bit field of 0 and the unassigned
/// bits 6 and 11 set.
pub const BRR_INIT: u32 = 0x0866;

const BAUD_SHIFT: u32 = 0;
const BAUD_MASK: u32 = 0xF;
const PARITY_SHIFT: u32 = 4;
const PARITY_MASK: u32 = 0x3;
const FLOW_CONTROL_BIT: u32 = 1 << 8;
const STOP_BITS_SHIFT: u32 = 12;
const STOP_BITS_MASK: u32 = 0xF;

/// Baud rate codes understood by BRR\[0:3\].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum BaudRate {
    B4800 = 0,
    B9600 = 1,
    B14400 = 2,
    B19200 = 3,
    B38400 = 4,
    B57600 = 5,
    B115200 = 6,
    B128000 = 7,
    B256000 = 8,
}

impl BaudRate {
    const ALL: [BaudRate; 9] = [
        BaudRate::B4800,
        BaudRate::B9600,
        BaudRate::B14400,
        BaudRate::B19200,
        BaudRate::B38400,
        BaudRate::B57600,
        BaudRate::B115200,
        BaudRate::B128000,
        BaudRate::B256000,
    ];

    pub const fn bits_per_second(self) -> u32 {
        match self {
            BaudRate::B4800 => 4800,
            BaudRate::B9600 => 9600,
            BaudRate::B14400 => 14400,
            BaudRate::B19200 => 19200,
            BaudRate::B38400 => 38400,
            BaudRate::B57600 => 57600,
            BaudRate::B115200 => 115_200,
            BaudRate::B128000 => 128_000,
            BaudRate::B256000 => 256_000,
        }
    }

    /// Look up the code for a rate in bits per second.
    pub fn from_bits_per_second(bps: u32) -> Option<BaudRate> {
        Self::ALL.into_iter().find(|rate| rate.bits_per_second() == bps)
    }

    fn from_code(code: u32) -> Option<BaudRate> {
        Self::ALL.get(code as usize).copied()
    }
}

/// Parity codes understood by BRR\[4:5\]. Code 3 is reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Parity {
    Even = 0,
    Odd = 1,
    None = 2,
}

impl Parity {
    fn from_code(code: u32) -> Option<Parity> {
        match code {
            0 => Some(Parity::Even),
            1 => Some(Parity::Odd),
            2 => Some(Parity::None),
            _ => None,
        }
    }
}

/// Line settings packed into the BRR register.
///
/// Used to inspect BRR values. `initialize` writes [`BRR_INIT`], not a
/// packed `LineConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineConfig {
    pub baud: BaudRate,
    pub parity: Parity,
    pub flow_control: bool,
    /// Stored in a four bit field; values above 15 are truncated.
    pub stop_bits: u8,
}

impl LineConfig {
    /// 115200 baud, no parity, one stop bit, no flow control.
    pub const DEFAULT: LineConfig = LineConfig {
        baud: BaudRate::B115200,
        parity: Parity::None,
        flow_control: false,
        stop_bits: 1,
    };

    /// The BRR value for this configuration.
    pub const fn brr(&self) -> u32 {
        let mut value = (self.baud as u32 & BAUD_MASK) << BAUD_SHIFT;
        value |= (self.parity as u32 & PARITY_MASK) << PARITY_SHIFT;
        if self.flow_control {
            value |= FLOW_CONTROL_BIT;
        }
        value |= (self.stop_bits as u32 & STOP_BITS_MASK) << STOP_BITS_SHIFT;
        value
    }

    /// Decode a BRR value. Bits outside the defined fields are ignored;
    /// reserved baud or parity codes give `None`.
    pub fn from_brr(value: u32) -> Option<LineConfig> {
        Some(LineConfig {
            baud: BaudRate::from_code((value >> BAUD_SHIFT) & BAUD_MASK)?,
            parity: Parity::from_code((value >> PARITY_SHIFT) & PARITY_MASK)?,
            flow_control: value & FLOW_CONTROL_BIT != 0,
            stop_bits: ((value >> STOP_BITS_SHIFT) & STOP_BITS_MASK) as u8,
        })
    }
}

impl Default for LineConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
