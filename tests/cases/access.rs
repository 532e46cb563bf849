use emb_uart::RegisterBlock;

#[derive(RegisterBlock)]
#[repr(C)]
pub struct Spi {
    // this is read-write by default
    control: u32,
    // you can be explicit if you like
    #[reg(RW)]
    divider: u32,
    // no write_x or modify_x method
    #[reg(RO)]
    status: u32,
    // no read_x or modify_x method
    #[reg(WO)]
    fifo: u32,
    // this is ignored
    _reserved: u32,
    #[reg(RO)]
    id: core::primitive::u32,
}

fn main() {
    let mut spi = Spi {
        control: 0xC,
        divider: 4,
        status: 0xF,
        fifo: 0,
        _reserved: 0xDEAD,
        id: 0x5350_4900,
    };
    let ptr = core::ptr::addr_of_mut!(spi);

    // Safety: We're pointing at a real object
    let mut mmio_spi = unsafe { Spi::new_mmio(ptr) };

    assert_eq!(mmio_spi.read_control(), 0xC);
    mmio_spi.write_control(0x0B);
    assert_eq!(mmio_spi.read_control(), 0xB);
    mmio_spi.modify_divider(|d| {
        assert_eq!(d, 4);
        d * 2
    });
    assert_eq!(mmio_spi.read_divider(), 8);
    assert_eq!(mmio_spi.read_status(), 0xF);
    mmio_spi.write_fifo(0x42);
    assert_eq!(mmio_spi.read_id(), 0x5350_4900);

    assert_eq!(Spi::CONTROL_OFFSET, 0x0);
    assert_eq!(Spi::DIVIDER_OFFSET, 0x4);
    assert_eq!(Spi::STATUS_OFFSET, 0x8);
    assert_eq!(Spi::FIFO_OFFSET, 0xC);
    assert_eq!(Spi::ID_OFFSET, 0x14);
    assert_eq!(mmio_spi.pointer_to_id() as usize, ptr as usize + 0x14);
    assert_eq!(mmio_spi.base_address(), ptr as usize);

    let fifo = unsafe { mmio_spi.pointer_to_fifo().read_volatile() };
    assert_eq!(fifo, 0x42);
    assert_eq!(spi._reserved, 0xDEAD);
}
