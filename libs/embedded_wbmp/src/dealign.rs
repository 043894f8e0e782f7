use alloc::{vec, vec::Vec};

use crate::{FormatError, Result};

/// Bytes occupied by one row of `width` pixels in a byte aligned image.
pub const fn row_stride(width: usize) -> usize {
    width.div_ceil(8)
}

/// Size of a `width` x `height` image with no padding between rows.
pub fn packed_len(width: usize, height: usize) -> Option<usize> {
    Some(width.checked_mul(height)?.div_ceil(8))
}

/// Removes the per-row byte padding of a 1bpp image.
///
/// `src` holds `height` rows of [`row_stride`] bytes each, MSB first. The
/// result concatenates the rows bit by bit so that pixel `(x, y)` is bit
/// `y * width + x` of the output. Unused bits at the end of the output are zero,
/// padding bits of the input are never read and input past the last row is
/// ignored.
pub fn dealign(src: &[u8], width: usize, height: usize) -> Result<Vec<u8>> {
    let stride = row_stride(width);
    let expected = stride
        .checked_mul(height)
        .ok_or(FormatError::DimensionOverflow)?;
    if src.len() < expected {
        return Err(FormatError::TruncatedPixelData {
            expected,
            available: src.len(),
        }
        .into());
    }
    let dst_len = packed_len(width, height).ok_or(FormatError::DimensionOverflow)?;

    if width % 8 == 0 {
        trace!("dealign {}x{}: rows already packed", width, height);
        return Ok(src[..expected].to_vec());
    }

    trace!("dealign {}x{}: repacking {} rows", width, height, height);
    let mut dst = vec![0u8; dst_len];
    let mut dst_bit = 0usize;
    for row in src[..expected].chunks_exact(stride) {
        for x in 0..width {
            let bit = (row[x >> 3] >> (7 - (x & 7))) & 1;
            if bit != 0 {
                dst[dst_bit >> 3] |= 1 << (7 - (dst_bit & 7));
            }
            dst_bit += 1;
        }
    }

    Ok(dst)
}
