mod board {
    #[derive(emb_uart::RegisterBlock)]
    #[repr(C)]
    pub(crate) struct Watchdog {
        #[reg(WO)]
        kick: u32,
        #[reg(RO)]
        remaining: u32,
    }

    // Can not really touch hardware on a host. Simply verify that it builds.
    pub(crate) fn handle() -> MmioWatchdog<'static> {
        unsafe { Watchdog::new_mmio_at(0x4000_1000) }
    }
}

fn main() {
    let watchdog = board::handle();
    assert_eq!(watchdog.base_address(), 0x4000_1000);
    assert_eq!(board::Watchdog::REMAINING_OFFSET, 4);
}
