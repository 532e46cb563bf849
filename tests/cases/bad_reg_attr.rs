#![allow(dead_code)]

use emb_uart::RegisterBlock;

#[derive(RegisterBlock)]
#[repr(C)]
struct Uart {
    #[reg(RX)]
    data: u32,
}

fn main() {}
