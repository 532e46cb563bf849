#![allow(dead_code)]

use emb_uart::RegisterBlock;

#[derive(RegisterBlock)]
#[repr(C)]
struct Uart(u32, u32);

fn main() {}
