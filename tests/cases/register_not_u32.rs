#![allow(dead_code)]

use emb_uart::RegisterBlock;

#[derive(RegisterBlock)]
#[repr(C)]
struct Uart {
    control: u32,
    data: u16,
}

fn main() {}
