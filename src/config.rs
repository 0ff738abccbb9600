//! Control register contents
use bitfield_struct::bitfield;

/// Linearity compensation setting for the span of the reference voltages.
///
/// The 4-bit codes are the only patterns defined by the datasheet, any other
/// value written to the LIN COMP field is undefined.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum LinearityCompensation {
    /// Reference span up to 10V (power on default)
    #[default]
    Range0To10V = 0b0000,
    /// Reference span between 10V and 12V
    Range10To12V = 0b1001,
    /// Reference span between 12V and 16V
    Range12To16V = 0b1010,
    /// Reference span between 16V and 19V
    Range16To19V = 0b1011,
    /// Reference span between 19V and 20V
    Range19To20V = 0b1100,
}

impl LinearityCompensation {
    /// Map a numeric range selector onto a compensation setting.
    ///
    /// | selector | span     |
    /// |----------|----------|
    /// | 0        | 0-10V    |
    /// | 1        | 10-12V   |
    /// | 2        | 12-16V   |
    /// | 3        | 16-19V   |
    /// | 4        | 19-20V   |
    ///
    /// Every other selector falls back to the 0-10V setting.
    pub const fn from_selector(selector: i32) -> Self {
        match selector {
            1 => Self::Range10To12V,
            2 => Self::Range12To16V,
            3 => Self::Range16To19V,
            4 => Self::Range19To20V,
            _ => Self::Range0To10V,
        }
    }

    /// The 4-bit LIN COMP code
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Look up a LIN COMP code, `None` for patterns the chip leaves undefined
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0b0000 => Some(Self::Range0To10V),
            0b1001 => Some(Self::Range10To12V),
            0b1010 => Some(Self::Range12To16V),
            0b1011 => Some(Self::Range16To19V),
            0b1100 => Some(Self::Range19To20V),
            _ => None,
        }
    }
}

impl From<u8> for LinearityCompensation {
    fn from(selector: u8) -> Self {
        Self::from_selector(selector as i32)
    }
}

impl From<i32> for LinearityCompensation {
    fn from(selector: i32) -> Self {
        Self::from_selector(selector)
    }
}

/// Definition of the configuration in the Control Register.
///
/// The defaults are not the power on state of the chip. They select the
/// external amplifier, a normal (neither clamped nor tristated) output,
/// offset binary coding and an enabled SDO pin, which is the word written by
/// [`Ad5791::apply_configuration`](crate::Ad5791::apply_configuration).
/// ```
/// use ad5791::{Config, LinearityCompensation};
///
/// let cfg = Config::new().with_lin_comp(LinearityCompensation::Range12To16V);
/// assert_eq!(u32::from(cfg), 0x292);
/// ```
#[bitfield(u32)]
#[derive(PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    #[bits(1)]
    _reserved: bool,

    /// Set by the user to power down the internal output amplifier so an
    /// external amplifier can be used (default). Cleared to use the internal
    /// unity gain buffer.
    #[bits(default = true)]
    pub rbuf: bool,

    /// Set by the user to clamp the output to ground through a 6kΩ
    /// resistor. Cleared for normal operation (default).
    #[bits(default = false)]
    pub opgnd: bool,

    /// Set by the user to put the output in tristate. Cleared for normal
    /// operation (default).
    #[bits(default = false)]
    pub dactri: bool,

    /// Offset binary coding when set (default), two's complement when
    /// cleared. This changes how the DAC and clearcode registers are
    /// interpreted.
    #[bits(default = true)]
    pub bin2sc: bool,

    /// Set by the user to disable the SDO output. Cleared by the user to
    /// enable the SDO output (default). Reading back registers needs SDO.
    #[bits(default = false)]
    pub sdodis: bool,

    #[bits(4)]
    lin_comp_code: u8,

    #[bits(22)]
    _unused: u32,
}

impl Config {
    /// Default configuration with the given linearity compensation
    pub fn for_range(range: LinearityCompensation) -> Self {
        Self::new().with_lin_comp(range)
    }

    /// Linearity compensation setting, `None` if the field holds a pattern
    /// the chip does not define
    pub fn lin_comp(&self) -> Option<LinearityCompensation> {
        LinearityCompensation::from_code(self.lin_comp_code())
    }

    /// Set the linearity compensation
    pub fn set_lin_comp(&mut self, range: LinearityCompensation) {
        self.set_lin_comp_code(range.code())
    }

    /// Builder variant of [`set_lin_comp`](Self::set_lin_comp)
    pub fn with_lin_comp(self, range: LinearityCompensation) -> Self {
        self.with_lin_comp_code(range.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: u32 = 0x12;

    #[test]
    fn default_is_base_word() {
        assert_eq!(u32::from(Config::new()), BASE);
        assert_eq!(Config::new().lin_comp(), Some(LinearityCompensation::Range0To10V));
    }

    #[test]
    fn selector_codes() {
        let expected = [
            (0, 0b0000),
            (1, 0b1001),
            (2, 0b1010),
            (3, 0b1011),
            (4, 0b1100),
        ];
        for (selector, code) in expected {
            let cfg = Config::for_range(LinearityCompensation::from_selector(selector));
            let word = u32::from(cfg);
            assert_eq!((word >> 6) & 0xF, code);
            assert_eq!(word & 0x3F, BASE);
            assert_eq!(word & !0x3FF, 0);
        }
    }

    #[test]
    fn scenario_words() {
        assert_eq!(u32::from(Config::for_range(LinearityCompensation::from(1u8))), 0x252);
        assert_eq!(u32::from(Config::for_range(LinearityCompensation::from(2u8))), 0x292);
        assert_eq!(u32::from(Config::for_range(LinearityCompensation::from(3u8))), 0x2D2);
        assert_eq!(u32::from(Config::for_range(LinearityCompensation::from(4u8))), 0x312);
    }

    #[test]
    fn unknown_selectors_fall_back_to_lowest_range() {
        for selector in [-1, 5, 9, 12, i32::MAX, i32::MIN] {
            assert_eq!(
                LinearityCompensation::from_selector(selector),
                LinearityCompensation::Range0To10V
            );
        }
        assert_eq!(
            LinearityCompensation::from(200u8),
            LinearityCompensation::Range0To10V
        );
    }

    #[test]
    fn undefined_readback_code() {
        // LIN COMP = 0b0110 is not a defined pattern
        let cfg = Config::from(0x192);
        assert_eq!(cfg.lin_comp(), None);
        assert!(cfg.rbuf());
        assert!(cfg.bin2sc());
        assert!(!cfg.sdodis());
    }

    #[test]
    fn field_positions() {
        let cfg = Config::from(0)
            .with_rbuf(true)
            .with_opgnd(true)
            .with_dactri(true)
            .with_bin2sc(true)
            .with_sdodis(true);
        assert_eq!(u32::from(cfg), 0b11_1110);
        let power_on = Config::from(0b00_1110);
        assert!(power_on.opgnd());
        assert!(power_on.dactri());
        assert!(!power_on.bin2sc());
    }
}
