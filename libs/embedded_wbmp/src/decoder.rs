use alloc::{sync::Arc, vec::Vec};
use embedded_io::{Error as _, ErrorKind, Read};

use crate::{Bitmap, DecodeCache, Filesystem, FormatError, Result, WbmpError, dealign, read_varint};

/// Knobs for header validation. The defaults accept everything a type 0 WBMP
/// reader traditionally accepts.
#[derive(Copy, Clone, Debug)]
pub struct DecoderOptions {
    strict_header: bool,
    max_width: u32,
    max_height: u32,
}

impl DecoderOptions {
    /// Require both reserved header bytes to be zero.
    pub fn set_strict_header(&mut self, strict: bool) {
        self.strict_header = strict;
    }
    pub fn set_max_width(&mut self, width: u32) {
        self.max_width = width;
    }
    pub fn set_max_height(&mut self, height: u32) {
        self.max_height = height;
    }
    pub const fn get_strict_header(&self) -> bool {
        self.strict_header
    }
    pub const fn get_max_width(&self) -> u32 {
        self.max_width
    }
    pub const fn get_max_height(&self) -> u32 {
        self.max_height
    }
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            strict_header: false,
            max_width: u32::MAX,
            max_height: u32::MAX,
        }
    }
}

/// The fields preceding the pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub type_field: u8,
    pub fixed_header: u8,
    pub width: u32,
    pub height: u32,
}

impl Header {
    /// Bytes of row aligned pixel data that follow the header.
    pub fn aligned_size(&self) -> Option<usize> {
        let width = usize::try_from(self.width).ok()?;
        let height = usize::try_from(self.height).ok()?;
        crate::row_stride(width).checked_mul(height)
    }
}

pub fn parse_header<R: Read>(reader: &mut R, options: &DecoderOptions) -> Result<Header> {
    let mut reserved = [0u8; 2];
    reader
        .read_exact(&mut reserved)
        .map_err(WbmpError::from_read_exact_error)?;
    if options.strict_header && reserved != [0, 0] {
        return Err(FormatError::InvalidHeader.into());
    }

    let width = read_varint(reader)?;
    let height = read_varint(reader)?;
    info!("Parsed WBMP header: width={}, height={}", width, height);

    if width > options.max_width || height > options.max_height {
        return Err(FormatError::TooLarge { width, height }.into());
    }

    Ok(Header {
        type_field: reserved[0],
        fixed_header: reserved[1],
        width,
        height,
    })
}

fn read_to_end<R: Read>(reader: &mut R) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    let mut chunk = [0u8; 512];
    loop {
        let read = match reader.read(&mut chunk) {
            Ok(read) => read,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(WbmpError::from_io_error(e)),
        };
        if read == 0 {
            return Ok(data);
        }
        data.extend_from_slice(&chunk[..read]);
    }
}

fn decode_stream<R: Read>(reader: &mut R, options: &DecoderOptions) -> Result<(Header, Vec<u8>)> {
    let header = parse_header(reader, options)?;
    let raw = read_to_end(reader)?;
    let width = usize::try_from(header.width).map_err(|_| FormatError::DimensionOverflow)?;
    let height = usize::try_from(header.height).map_err(|_| FormatError::DimensionOverflow)?;
    let pixels = dealign(&raw, width, height)?;
    Ok((header, pixels))
}

/// Decodes a complete WBMP stream without touching any cache.
pub fn decode_from_reader<R: Read, C>(
    reader: &mut R,
    palette: Vec<C>,
    options: &DecoderOptions,
) -> Result<Bitmap<C>> {
    let (header, pixels) = decode_stream(reader, options)?;
    Ok(Bitmap::new(header.width, header.height, Arc::from(pixels), palette))
}

/// Decodes WBMP files by path, reusing the last result when the same path is
/// requested again.
pub struct Decoder<FS> {
    fs: FS,
    cache: DecodeCache,
    options: DecoderOptions,
}

impl<FS: Filesystem> Decoder<FS> {
    pub fn new(fs: FS) -> Self {
        Self::with_cache(fs, DecodeCache::new())
    }

    pub fn with_cache(fs: FS, cache: DecodeCache) -> Self {
        Decoder {
            fs,
            cache,
            options: DecoderOptions::default(),
        }
    }

    pub fn with_options(mut self, options: DecoderOptions) -> Self {
        self.options = options;
        self
    }

    /// Decodes the image at `path`.
    ///
    /// A cache hit performs no I/O and returns the cached buffer itself. On a
    /// miss the file is read and unpacked, and the cache is only replaced once
    /// that fully succeeded. The palette is never cached.
    pub fn decode<C>(&mut self, path: &str, palette: Vec<C>) -> Result<Bitmap<C>> {
        if let Some(image) = self.cache.lookup(path) {
            debug!("WBMP cache hit for {}", path);
            return Ok(Bitmap::new(image.width, image.height, image.buffer, palette));
        }
        debug!("WBMP cache miss for {}", path);

        let mut file = self.fs.open_file(path).map_err(WbmpError::from_io_error)?;
        let (header, pixels) = decode_stream(&mut file, &self.options)?;
        let buffer: Arc<[u8]> = Arc::from(pixels);
        self.cache
            .store(path, header.width, header.height, buffer.clone())?;

        Ok(Bitmap::new(header.width, header.height, buffer, palette))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache(&self) -> &DecodeCache {
        &self.cache
    }

    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    pub fn filesystem(&self) -> &FS {
        &self.fs
    }

    pub fn into_parts(self) -> (FS, DecodeCache) {
        (self.fs, self.cache)
    }
}

#[cfg(feature = "std")]
pub use self::shared::SharedDecoder;

#[cfg(feature = "std")]
mod shared {
    use std::sync::{Mutex, MutexGuard, PoisonError};

    use alloc::vec::Vec;

    use super::Decoder;
    use crate::{Bitmap, Filesystem, Result};

    /// A [`Decoder`] that can be used from several threads.
    ///
    /// Each call holds the lock for the whole lookup, decode and store sequence
    /// so a slow decode can not overwrite a newer cache entry.
    pub struct SharedDecoder<FS> {
        inner: Mutex<Decoder<FS>>,
    }

    impl<FS: Filesystem> SharedDecoder<FS> {
        pub fn new(decoder: Decoder<FS>) -> Self {
            SharedDecoder {
                inner: Mutex::new(decoder),
            }
        }

        pub fn decode<C>(&self, path: &str, palette: Vec<C>) -> Result<Bitmap<C>> {
            self.lock().decode(path, palette)
        }

        pub fn clear_cache(&self) {
            self.lock().clear_cache();
        }

        pub fn cached_path(&self) -> Option<alloc::string::String> {
            self.lock().cache().cached_path().map(alloc::string::String::from)
        }

        pub fn into_inner(self) -> Decoder<FS> {
            self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
        }

        // The cache is written only after a decode succeeded, so the state
        // behind a poisoned lock is still consistent.
        fn lock(&self) -> MutexGuard<'_, Decoder<FS>> {
            self.inner.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }
}
