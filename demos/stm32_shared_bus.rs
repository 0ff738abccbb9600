//! Two AD5791 boards sharing SPI3 on an STM32F405.
//!
//! Build for the target with
//! `cargo build --example stm32_shared_bus --target thumbv7em-none-eabihf --features defmt`.
#![cfg_attr(target_os = "none", no_main)]
#![cfg_attr(target_os = "none", no_std)]

#[cfg(not(target_os = "none"))]
fn main() {}

#[cfg(target_os = "none")]
mod app {
    // Setting up entry vector/panic handler and logging
    use cortex_m_rt::entry;
    use defmt_rtt as _;
    use panic_probe as _;
    // Imports for the shared bus
    use core::cell::RefCell;
    use embedded_hal_bus::spi::{NoDelay, RefCellDevice};
    // Hal imports
    use hal::prelude::*;
    use hal::spi::{Mode, Spi};
    use stm32f4xx_hal as hal;

    use ad5791::{Ad5791, LinearityCompensation};

    #[entry]
    fn main() -> ! {
        // Take peripherals and set up the clocks.
        let p = hal::pac::Peripherals::take().unwrap();
        let pc = cortex_m::Peripherals::take().unwrap();
        let rcc = p.RCC.constrain();
        let ccdr = rcc.cfgr.freeze();
        // Create a SysTick based delay
        let mut delay = cortex_m::delay::Delay::new(pc.SYST, ccdr.sysclk().raw());
        let gpioc = p.GPIOC.split();
        let spi3_sclk = gpioc.pc10.into_alternate();
        let spi3_miso = gpioc.pc11.into_alternate();
        let spi3_mosi = gpioc.pc12.into_alternate();
        // ~SYNC of each board acts as its chip select. ~LDAC is tied high so
        // outputs only change on a software update.
        let gpioa = p.GPIOA.split();
        let sync_a = gpioa
            .pa15
            .into_push_pull_output_in_state(hal::gpio::PinState::High);
        let sync_b = gpioa
            .pa8
            .into_push_pull_output_in_state(hal::gpio::PinState::High);
        // The AD5791 samples SDIN on the falling edge of SCLK: MODE 1
        let spi3 = Spi::new(
            p.SPI3,
            (spi3_sclk, spi3_miso, spi3_mosi),
            Mode {
                phase: hal::spi::Phase::CaptureOnSecondTransition,
                polarity: hal::spi::Polarity::IdleLow,
            },
            1.MHz(),
            &ccdr,
        );
        let spi_bus = RefCell::new(spi3);

        let mut dac_a = Ad5791::new(RefCellDevice::new(&spi_bus, sync_a, NoDelay));
        let mut dac_b = Ad5791::new(RefCellDevice::new(&spi_bus, sync_b, NoDelay));

        // Board A runs from +/-10V references, board B from +/-5V
        dac_a
            .apply_configuration(LinearityCompensation::Range19To20V)
            .unwrap();
        dac_b
            .apply_configuration(LinearityCompensation::Range0To10V)
            .unwrap();
        dac_b.set_clear_code(0x8_0000).unwrap();
        defmt::info!("config A: {:#x}", dac_a.get_config().unwrap());

        let mut val: u32 = 0x0_0000;
        loop {
            // Output a stepped voltage on A and its mirror on B
            delay.delay_ms(250);
            dac_a.set_dac_output(val).unwrap();
            dac_b.set_dac_output(0xF_FFFF - val).unwrap();
            dac_a.update_dac().unwrap();
            dac_b.update_dac().unwrap();
            val = (val + 0x1_0000) & 0xF_FFFF;
        }
    }
}
