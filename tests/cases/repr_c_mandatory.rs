#![allow(dead_code)]

use emb_uart::RegisterBlock;

#[derive(RegisterBlock)]
struct Uart {
    data: u32,
}

fn main() {}
