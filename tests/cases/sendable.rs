use emb_uart::regs::{MmioUartRegisters, UartRegisters};
use emb_uart::UartDriver;

fn send_check<T: Send>(_: &T) {}

fn main() {
    let mut block = UartRegisters::default();

    // Safety: We're pointing at a real object
    let regs: MmioUartRegisters<'static> = unsafe { UartRegisters::new_mmio(&raw mut block) };
    send_check(&regs);

    let uart = UartDriver::new(regs);
    send_check(&uart);
}
