//! Board bring-up against a fake UART.
//!
//! We use an in-memory register block so this doesn't need any specific
//! hardware to run. Set `RUST_LOG=trace` to see every register access the
//! driver logs.

use emb_uart::regs::{Status, UartRegisters};
use emb_uart::UartDriver;

fn main() {
    env_logger::init();

    let mut uart_block = UartRegisters::default();
    let ptr = &raw mut uart_block;
    println!("sample UART is @ {ptr:p}");

    // Safety: `uart_block` outlives the driver and is only touched through
    // `ptr` from here on.
    let mut uart = unsafe { UartDriver::new_at(ptr as usize) };

    if let Err(e) = uart.write_byte(b'A') {
        println!("write before initialize: {e}");
    }

    if let Err(e) = uart.initialize() {
        println!("initialize failed: {e}");
        return;
    }
    println!("cnr = {:#x}, brr = {:#06x}", unsafe { (*ptr).cnr }, unsafe {
        (*ptr).brr
    });

    // nothing raised TX ready yet
    match uart.write_byte(b'A') {
        Ok(()) => println!("wrote 'A' without TX ready?"),
        Err(e) => println!("write with TX clear: {e}"),
    }

    unsafe { (*ptr).sta = Status::TX_READY.bits() };
    match uart.write_byte(b'A') {
        Ok(()) => println!("wrote {:?}", unsafe { (*ptr).tdr } as u8 as char),
        Err(e) => println!("error writing to UART: {e}"),
    }

    unsafe {
        (*ptr).rdr = u32::from(b'A');
        (*ptr).sta = Status::RX_READY.bits();
    }
    match uart.read_byte() {
        Ok(byte) => println!("received data: {}", byte as char),
        Err(e) => println!("error reading from UART: {e}"),
    }
}
