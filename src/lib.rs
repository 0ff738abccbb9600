//! Driver for the Analog Devices AD5791 single channel 20bit voltage output DAC
//!
//! The driver talks to the chip through an [`embedded_hal::spi::SpiDevice`],
//! one transaction per 24-bit frame. The SPI bus has to be configured in
//! mode 1 or 2 (data is sampled on the falling edge of SCLK).
//!
//! ```
//! # use embedded_hal_mock::eh1::spi::{Mock, Transaction};
//! use ad5791::{Ad5791, LinearityCompensation};
//! # let spi = Mock::new(&[
//! #     Transaction::transaction_start(),
//! #     Transaction::write_vec(vec![0x20, 0x00, 0x12]),
//! #     Transaction::transaction_end(),
//! #     Transaction::transaction_start(),
//! #     Transaction::write_vec(vec![0x18, 0x00, 0x00]),
//! #     Transaction::transaction_end(),
//! # ]);
//!
//! let mut dac = Ad5791::new(spi);
//! // External amplifier, normal output, offset binary coding
//! dac.apply_configuration(LinearityCompensation::Range0To10V).unwrap();
//! // Midscale
//! dac.set_dac_output(0x8_0000).unwrap();
//! # dac.destroy().done();
//! ```
//!
//! Reads and software control triggers take two frames. When several tasks
//! or interrupt handlers share the bus, construct the driver with
//! [`Ad5791::new_with_lock`] so these sequences cannot be interleaved with
//! frames to other devices.

#![deny(unsafe_code, missing_docs)]
#![no_std]

use core::fmt;

mod ad5791;
mod config;
pub mod frame;
mod lock;

pub use config::{Config, LinearityCompensation};
pub use frame::{Direction, Register};
#[cfg(feature = "critical-section")]
pub use lock::CriticalSectionLock;
pub use lock::{BusLock, NoLock};

/// AD5791 DAC on a (possibly shared) SPI bus
#[derive(Debug)]
pub struct Ad5791<DEV, L = NoLock> {
    spi: DEV,
    lock: L,
}

/// Errors for this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// SPI communication error
    Spi(E),
}

impl<E: embedded_hal::spi::Error> Error<E> {
    /// Generic kind of the underlying SPI error
    pub fn kind(&self) -> embedded_hal::spi::ErrorKind {
        match self {
            Error::Spi(e) => e.kind(),
        }
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Spi(e) => write!(f, "SPI transfer failed: {e:?}"),
        }
    }
}

/// Functions of the software control register.
///
/// Each is written as a single set bit and followed by a write of zero to
/// return the register to its idle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u32)]
pub enum SoftwareControl {
    /// Load the DAC register into the output (software LDAC)
    Load = 0b001,
    /// Load the clearcode register into the DAC register and output
    Clear = 0b010,
    /// Return the chip to its power on state
    Reset = 0b100,
}

impl From<SoftwareControl> for u32 {
    fn from(func: SoftwareControl) -> Self {
        func as u32
    }
}
