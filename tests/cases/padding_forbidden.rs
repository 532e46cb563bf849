#![allow(dead_code)]

use emb_uart::RegisterBlock;

#[derive(RegisterBlock)]
#[repr(C)]
struct Uart {
    data: u32,
    _reserved: u8,
}

fn main() {}
