use alloc::{sync::Arc, vec::Vec};
use embedded_graphics::prelude::{OriginDimensions, Size};

/// WBMP images always use a single bit per pixel.
pub const BITS_PER_PIXEL: u8 = 1;

/// A decoded image ready to be handed to the renderer.
///
/// The buffer is shared with the decode cache and must be treated as
/// immutable. Pixel `(x, y)` is bit `y * width + x`, most significant bit first,
/// with no padding between rows. The palette is passed through untouched.
#[derive(Debug, Clone)]
pub struct Bitmap<C> {
    width: u32,
    height: u32,
    buffer: Arc<[u8]>,
    palette: Vec<C>,
}

impl<C> Bitmap<C> {
    pub(crate) fn new(width: u32, height: u32, buffer: Arc<[u8]>, palette: Vec<C>) -> Self {
        debug_assert_eq!(
            Some(buffer.len()),
            crate::packed_len(width as usize, height as usize)
        );
        Bitmap {
            width,
            height,
            buffer,
            palette,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bits_per_pixel(&self) -> u8 {
        BITS_PER_PIXEL
    }

    /// Always `true` for WBMP. The meaning of the flag is up to the renderer.
    pub fn byte_aligned_rows(&self) -> bool {
        true
    }

    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    pub fn shared_buffer(&self) -> &Arc<[u8]> {
        &self.buffer
    }

    pub fn palette(&self) -> &[C] {
        &self.palette
    }

    /// Returns whether the pixel at `(x, y)` is set, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<bool> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = y as usize * self.width as usize + x as usize;
        let byte = self.buffer.get(index >> 3)?;
        Some(byte & (0x80 >> (index & 7)) != 0)
    }
}

impl<C> OriginDimensions for Bitmap<C> {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}
