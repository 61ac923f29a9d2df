//! LEB128 unsigned variable-length integers.
//!
//! Each byte carries 7 data bits, least significant group first. The top bit
//! is set on every byte except the last.
use crate::{
    error::Result,
    io::{Reader, Writer},
};

/// Largest encoded size of a `u64` (`ceil(64 / 7)`).
pub const MAX_VARINT_LEN: usize = 10;

/// Number of bytes needed to encode `value`.
#[inline(always)]
pub const fn varint_len(value: u64) -> usize {
    // `value | 1` so that zero still takes one byte.
    let bits = 64 - (value | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}

/// Write `value` to `writer`.
#[inline]
pub fn encode_varint(writer: &mut Writer, mut value: u64) -> Result<()> {
    let mut buf = [0u8; MAX_VARINT_LEN];
    let mut i = 0;
    while value >= 0x80 {
        buf[i] = (value as u8 & 0x7F) | 0x80;
        value >>= 7;
        i += 1;
    }
    buf[i] = value as u8;
    writer.write_exact(&buf[..=i])
}

/// Read a value from `reader`.
///
/// Groups shifted past bit 63 are discarded rather than rejected, so an
/// over-long encoding still terminates at the first byte with the top bit clear.
#[inline]
pub fn decode_varint(reader: &mut Reader) -> Result<u64> {
    let mut value = 0u64;
    let mut shift = 0u32;
    loop {
        let byte = reader.read_byte()?;
        value |= u64::from(byte & 0x7F).checked_shl(shift).unwrap_or(0);
        if byte & 0x80 == 0 {
            return Ok(value);
        }
        shift = shift.saturating_add(7);
    }
}
