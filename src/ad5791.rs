//! Register access and command implementation
use embedded_hal::spi::SpiDevice;

use crate::frame::{decode_frame, encode_frame, Direction, Register, NOP_FRAME};
use crate::{Ad5791, BusLock, Config, Error, LinearityCompensation, NoLock, SoftwareControl};

impl<DEV, E> Ad5791<DEV, NoLock>
where
    DEV: SpiDevice<Error = E>,
{
    /// Create a new AD5791 driver on an SPI device.
    ///
    /// Two frame sequences are not guarded, see [`NoLock`].
    pub fn new(spi: DEV) -> Self {
        Self::new_with_lock(spi, NoLock)
    }
}

impl<DEV, L, E> Ad5791<DEV, L>
where
    DEV: SpiDevice<Error = E>,
    L: BusLock,
{
    /// Create a new AD5791 driver whose reads and software control triggers
    /// run under `lock`
    pub fn new_with_lock(spi: DEV, lock: L) -> Self {
        Self { spi, lock }
    }

    /// Destroy the driver and return the SPI device
    pub fn destroy(self) -> DEV {
        self.spi
    }

    /// Write the default configuration with the given linearity
    /// compensation to the control register.
    ///
    /// This selects the external amplifier, a normal output and offset
    /// binary coding, see [`Config`]. Numeric range selectors are accepted,
    /// anything outside `0..=4` selects the 0-10V compensation.
    /// ```
    /// # use embedded_hal_mock::eh1::spi::{Mock, Transaction};
    /// # let spi = Mock::new(&[
    /// #     Transaction::transaction_start(),
    /// #     Transaction::write_vec(vec![0x20, 0x02, 0x92]),
    /// #     Transaction::transaction_end(),
    /// # ]);
    /// # let mut dac = ad5791::Ad5791::new(spi);
    /// dac.apply_configuration(ad5791::LinearityCompensation::Range12To16V).unwrap();
    /// # dac.destroy().done();
    /// ```
    ///
    /// > The new coding applies to the value already held in the DAC
    /// > register, so the output can jump.
    pub fn apply_configuration(
        &mut self,
        range: impl Into<LinearityCompensation>,
    ) -> Result<(), Error<E>> {
        self.set_config(Config::for_range(range.into()))
    }

    /// Write an arbitrary configuration to the control register
    pub fn set_config(&mut self, cfg: Config) -> Result<(), Error<E>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("AD5791 config {}", cfg);
        self.write(Register::Control, u32::from(cfg))
    }

    /// Read the raw 20 bit control register.
    ///
    /// Use [`Config::from`] to get at the individual fields.
    pub fn get_config(&mut self) -> Result<u32, Error<E>> {
        self.read(Register::Control)
    }

    /// Write a 20 bit code to the DAC register. Bits above bit 19 are
    /// ignored.
    ///
    /// With ~LDAC held high the value only reaches the output after
    /// [`update_dac`](Self::update_dac).
    pub fn set_dac_output(&mut self, val: u32) -> Result<(), Error<E>> {
        self.write(Register::Dac, val)
    }

    /// Read back the DAC register
    pub fn get_dac_output(&mut self) -> Result<u32, Error<E>> {
        self.read(Register::Dac)
    }

    /// Write the 20 bit code loaded into the DAC on a clear
    pub fn set_clear_code(&mut self, val: u32) -> Result<(), Error<E>> {
        self.write(Register::ClearCode, val)
    }

    /// Read back the clearcode register
    pub fn get_clear_code(&mut self) -> Result<u32, Error<E>> {
        self.read(Register::ClearCode)
    }

    /// Load the DAC register into the output
    pub fn update_dac(&mut self) -> Result<(), Error<E>> {
        self.trigger(SoftwareControl::Load)
    }

    /// Load the clearcode into the DAC register and update the output
    pub fn clear_dac(&mut self) -> Result<(), Error<E>> {
        self.trigger(SoftwareControl::Clear)
    }

    /// Return the chip to its power on state. The output is clamped to
    /// ground and tristated until it is configured again.
    pub fn reset_dac(&mut self) -> Result<(), Error<E>> {
        self.trigger(SoftwareControl::Reset)
    }

    fn write(&mut self, reg: Register, data: u32) -> Result<(), Error<E>> {
        write_frame(&mut self.spi, reg, data).map_err(Error::Spi)
    }

    fn read(&mut self, reg: Register) -> Result<u32, Error<E>> {
        let spi = &mut self.spi;
        self.lock
            .exclusive(|| read_frame(spi, reg))
            .map_err(Error::Spi)
    }

    // The second write returns the register to idle. If the first write
    // fails the second is not attempted.
    fn trigger(&mut self, func: SoftwareControl) -> Result<(), Error<E>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("AD5791 software control {}", func);
        let spi = &mut self.spi;
        self.lock
            .exclusive(|| {
                write_frame(spi, Register::SoftwareControl, u32::from(func))?;
                write_frame(spi, Register::SoftwareControl, 0)
            })
            .map_err(Error::Spi)
    }
}

fn write_frame<DEV: SpiDevice>(spi: &mut DEV, reg: Register, data: u32) -> Result<(), DEV::Error> {
    let frame = encode_frame(Direction::Write, reg, data);
    #[cfg(feature = "defmt")]
    defmt::trace!("AD5791 write {:x}", frame);
    spi.write(&frame)
}

// The first frame latches the address, the register contents are shifted
// out on the next one. Each frame gets its own chip select assertion.
fn read_frame<DEV: SpiDevice>(spi: &mut DEV, reg: Register) -> Result<u32, DEV::Error> {
    spi.write(&encode_frame(Direction::Read, reg, 0))?;
    let mut rx = [0x00; 3];
    spi.transfer(&mut rx, &NOP_FRAME)?;
    #[cfg(feature = "defmt")]
    defmt::trace!("AD5791 read {} -> {:x}", reg, rx);
    Ok(decode_frame(rx))
}
