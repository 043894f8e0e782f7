use embedded_io::Read;

use crate::{FormatError, Result, WbmpError};

/// Reads a WBMP multi-byte integer.
///
/// Each byte carries 7 bits of the value, most significant group first. A set
/// high bit means another byte follows. Values that do not fit a `u32` are
/// rejected with [`FormatError::DimensionOverflow`]; leading zero groups are
/// accepted no matter how many there are.
pub fn read_varint<R: Read>(reader: &mut R) -> Result<u32> {
    let mut value: u32 = 0;
    loop {
        let mut byte = [0u8; 1];
        reader
            .read_exact(&mut byte)
            .map_err(WbmpError::from_read_exact_error)?;
        let b = byte[0];
        if value > u32::MAX >> 7 {
            return Err(FormatError::DimensionOverflow.into());
        }
        value = (value << 7) | (b & 0x7F) as u32;
        // high bit clear marks the last byte
        if b & 0x80 == 0 {
            return Ok(value);
        }
    }
}
