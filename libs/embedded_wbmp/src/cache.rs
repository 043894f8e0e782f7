use alloc::{string::String, sync::Arc};

use crate::{FormatError, Result, packed_len};

/// Dimensions and packed pixels of a cached image.
#[derive(Debug, Clone)]
pub struct CachedImage {
    pub width: u32,
    pub height: u32,
    pub buffer: Arc<[u8]>,
}

struct Entry {
    path: String,
    image: CachedImage,
}

/// Remembers the most recently decoded image.
///
/// Holds at most one entry, keyed by the exact path string it was decoded
/// from. There is no eviction besides replacing the entry or calling
/// [`DecodeCache::clear`].
#[derive(Default)]
pub struct DecodeCache {
    slot: Option<Entry>,
}

impl DecodeCache {
    pub const fn new() -> Self {
        DecodeCache { slot: None }
    }

    /// Returns the cached image if it was decoded from `path`.
    pub fn lookup(&self, path: &str) -> Option<CachedImage> {
        match &self.slot {
            Some(entry) if entry.path == path => Some(entry.image.clone()),
            _ => None,
        }
    }

    /// Replaces the cached entry.
    ///
    /// `buffer` must hold exactly `ceil(width * height / 8)` bytes, otherwise the
    /// cache is left as it was.
    pub fn store(&mut self, path: &str, width: u32, height: u32, buffer: Arc<[u8]>) -> Result<()> {
        let expected = packed_len(width as usize, height as usize)
            .ok_or(FormatError::DimensionOverflow)?;
        if buffer.len() != expected {
            return Err(FormatError::BufferSizeMismatch {
                expected,
                actual: buffer.len(),
            }
            .into());
        }
        self.slot = Some(Entry {
            path: String::from(path),
            image: CachedImage {
                width,
                height,
                buffer,
            },
        });
        Ok(())
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    pub fn cached_path(&self) -> Option<&str> {
        self.slot.as_ref().map(|entry| entry.path.as_str())
    }
}
