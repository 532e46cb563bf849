/*!
# `emb-uart` - a polled driver for a memory-mapped UART

The UART this crate drives has five 32-bit registers:

| Register | Offset | Access | Contents |
|----------|--------|--------|----------|
| CNR      | `0x0`  | RW     | bit 0 enable TX/RX, bit 1 interrupt on STA change |
| BRR      | `0x4`  | RW     | baud code, parity, flow control, stop bits |
| STA      | `0x8`  | RO     | bit 0 RX ready, bit 1 TX ready |
| TDR      | `0xC`  | WO     | byte to send |
| RDR      | `0x10` | RO     | byte received |

In C you would describe that block with a `volatile` struct and be done.
Rust has no volatile types, only volatile reads and writes through raw
pointers, and we must never make a reference to an MMIO register because
the compiler is free to dereference references whenever it likes.

So the block is described as a plain `#[repr(C)]` struct and
`#[derive(RegisterBlock)]` generates a handle type around a raw pointer to
it:

```rust
use emb_uart::RegisterBlock;

#[derive(RegisterBlock)]
#[repr(C)]
struct Timer {
    #[reg(RW)]
    load: u32,
    #[reg(RO)]
    value: u32,
    _reserved: u32,
    #[reg(WO)]
    clear: u32,
}

let mut fake = Timer { load: 0, value: 7, _reserved: 0, clear: 0 };
// Safety: `fake` outlives the handle and is not touched otherwise.
let mut timer = unsafe { Timer::new_mmio(&raw mut fake) };
timer.write_load(100);
assert_eq!(timer.read_load(), 100);
assert_eq!(timer.read_value(), 7);
timer.write_clear(1);
assert_eq!(Timer::CLEAR_OFFSET, 0xC);
```

Every `read_x` and `write_x` is exactly one volatile access. Read-only
registers get no `write_x`, write-only registers get no `read_x`, and only
read-write registers get `modify_x`. Fields starting with `_` are
reserved and get nothing.

The driver itself is [`UartDriver`]. It talks to the hardware through the
[`UartPort`](regs::UartPort) trait, which the generated
[`MmioUartRegisters`](regs::MmioUartRegisters) handle implements, so the
same driver runs against a recording test double on the host.

```rust,no_run
use emb_uart::{config::DEFAULT_BASE_ADDRESS, UartDriver};

// Safety: the UART is mapped at this address for the life of the program
// and nothing else touches it.
let mut uart = unsafe { UartDriver::new_at(DEFAULT_BASE_ADDRESS) };
uart.initialize()?;
uart.write_byte(b'A')?;
let byte = uart.read_byte()?;
# let _ = byte;
# Ok::<(), emb_uart::Error>(())
```

Transfers are polled. Each one re-reads STA until the ready bit appears or
the [`PollPolicy`](poll::PollPolicy) runs out, in which case
[`Error::Timeout`] is returned and no data register is touched.
Interrupt-driven operation is not supported: initialization arms the
status-change interrupt, but nothing here services it.
*/

#![cfg_attr(not(test), no_std)]

#[doc(inline)]
pub use emb_uart_macro::RegisterBlock;

pub mod config;
pub mod driver;
pub mod error;
pub mod poll;
pub mod regs;

pub use driver::UartDriver;
pub use error::{Error, Result};
