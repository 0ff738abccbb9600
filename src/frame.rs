//! 24-bit input shift register frames
//!
//! Every access to the AD5791 is a 24-bit frame clocked MSB first:
//!
//! | bit    | 23  | 22..20  | 19..0 |
//! |--------|-----|---------|-------|
//! | field  | R/W | address | data  |
//!
//! The top byte therefore carries the direction flag, the register address
//! and the upper nibble of the 20-bit data word.
use bitfield_struct::bitfield;

/// Mask of the meaningful data bits in a frame.
pub const DATA_MASK: u32 = 0x000F_FFFF;

/// Bytes clocked out while the response of a read is shifted in. All zero is
/// a write to the no-operation register.
pub(crate) const NOP_FRAME: [u8; 3] = [0x00; 3];

/// Direction of a register access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Write the data field into the addressed register
    Write,
    /// Request the addressed register on the next frame
    Read,
}

/// Registers that can be addressed by this driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    /// DAC register holding the output code
    Dac = 0b001,
    /// Control register, see [`Config`](crate::Config)
    Control = 0b010,
    /// Clearcode register, loaded into the DAC register on a clear
    ClearCode = 0b011,
    /// Write-only software control register, see
    /// [`SoftwareControl`](crate::SoftwareControl)
    SoftwareControl = 0b100,
}

impl From<Register> for u8 {
    fn from(reg: Register) -> Self {
        reg as u8
    }
}

#[bitfield(u8)]
struct CommandByte {
    #[bits(4)]
    data_msb: u8,

    #[bits(3)]
    addr: u8,

    #[bits(1)]
    rw: bool,
}

/// Encode a register access into the three bytes sent on the bus.
///
/// Only the low 20 bits of `data` are used, anything above bit 19 is
/// silently dropped just as the chip would ignore it.
/// ```
/// use ad5791::frame::{encode_frame, Direction, Register};
///
/// assert_eq!(encode_frame(Direction::Write, Register::Dac, 0x8_0000), [0x18, 0x00, 0x00]);
/// assert_eq!(encode_frame(Direction::Read, Register::Control, 0), [0xA0, 0x00, 0x00]);
/// ```
pub fn encode_frame(direction: Direction, reg: Register, data: u32) -> [u8; 3] {
    let data = data & DATA_MASK;
    let cmd = CommandByte::new()
        .with_rw(direction == Direction::Read)
        .with_addr(u8::from(reg))
        .with_data_msb((data >> 16) as u8);
    [u8::from(cmd), (data >> 8) as u8, data as u8]
}

/// Assemble the 20-bit data word from three received bytes.
///
/// The upper nibble of the first byte is protocol overhead and is discarded.
pub fn decode_frame(rx: [u8; 3]) -> u32 {
    let raw = (u32::from(rx[0]) << 16) | (u32::from(rx[1]) << 8) | u32::from(rx[2]);
    raw & DATA_MASK
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGISTERS: [Register; 4] = [
        Register::Dac,
        Register::Control,
        Register::ClearCode,
        Register::SoftwareControl,
    ];

    #[test]
    fn command_byte_layout() {
        assert_eq!(encode_frame(Direction::Write, Register::Dac, 0)[0], 0x10);
        assert_eq!(encode_frame(Direction::Write, Register::Control, 0)[0], 0x20);
        assert_eq!(encode_frame(Direction::Write, Register::ClearCode, 0)[0], 0x30);
        assert_eq!(
            encode_frame(Direction::Write, Register::SoftwareControl, 0)[0],
            0x40
        );
        assert_eq!(encode_frame(Direction::Read, Register::Dac, 0)[0], 0x90);
        assert_eq!(encode_frame(Direction::Read, Register::ClearCode, 0)[0], 0xB0);
    }

    #[test]
    fn data_bytes() {
        assert_eq!(
            encode_frame(Direction::Write, Register::Dac, 0xA_BCDE),
            [0x1A, 0xBC, 0xDE]
        );
        assert_eq!(
            encode_frame(Direction::Write, Register::Control, 0x292),
            [0x20, 0x02, 0x92]
        );
    }

    #[test]
    fn wide_data_never_reaches_direction_or_address() {
        for reg in REGISTERS {
            let frame = encode_frame(Direction::Write, reg, 0xFFFF_FFFF);
            assert_eq!(frame[0] & 0xF0, u8::from(reg) << 4);
            assert_eq!(frame[0] & 0x0F, 0x0F);
            assert_eq!([frame[1], frame[2]], [0xFF, 0xFF]);
        }
    }

    #[test]
    fn decode_discards_top_nibble() {
        assert_eq!(decode_frame([0x00, 0x80, 0x00]), 0x0_8000);
        assert_eq!(decode_frame([0x08, 0x00, 0x00]), 0x8_0000);
        assert_eq!(decode_frame([0xF8, 0x00, 0x01]), 0x8_0001);
        assert_eq!(decode_frame([0xFF, 0xFF, 0xFF]), DATA_MASK);
    }

    #[test]
    fn decode_inverts_encode_with_truncation() {
        // Stride through the whole 24-bit input space
        let mut v: u32 = 0;
        while v <= 0x00FF_FFFF {
            for reg in REGISTERS {
                let frame = encode_frame(Direction::Write, reg, v);
                assert_eq!(decode_frame(frame), v & DATA_MASK);
            }
            v += 0x1_0101;
        }
        assert_eq!(
            decode_frame(encode_frame(Direction::Write, Register::Dac, 0x00FF_FFFF)),
            DATA_MASK
        );
    }

    #[test]
    fn reencoding_is_stable() {
        for v in [0, 1, 0x7_FFFF, 0x8_0000, 0xF_0F0F, DATA_MASK] {
            let first = encode_frame(Direction::Write, Register::ClearCode, v);
            let second = encode_frame(Direction::Write, Register::ClearCode, decode_frame(first));
            assert_eq!(first, second);
        }
    }
}
