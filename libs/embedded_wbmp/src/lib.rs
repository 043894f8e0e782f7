/*!
A no_std WBMP reader using embedded-io for memory constrained environment.

Decodes type 0 WBMP files (1 bit per pixel, rows padded to whole bytes) into a
tightly packed, row-major buffer that a monochrome display can blit directly.
The last decoded image is memoized so redrawing it every frame costs nothing.

## Features
- no_std + alloc
- `log`: log header and cache activity through the `log` facade (default)
- `std`: [`StdFilesystem`] and the lock guarded [`SharedDecoder`]

## Usage
```
# use embedded_wbmp as wbmp;
# fn main() -> Result<(), wbmp::WbmpError> {
let data: &[u8] = &[0x00, 0x00, 0x08, 0x01, 0b1010_0101];
let mut reader = data;
let bitmap = wbmp::decode_from_reader(&mut reader, vec![0u8, 1], &Default::default())?;
assert_eq!(bitmap.buffer(), &[0b1010_0101]);
assert_eq!(bitmap.pixel(0, 0), Some(true));
# Ok(())
# }
```

## Limitations & non-goals
- only the uncompressed single plane type 0 format
- no encoder
- one cached image per [`Decoder`]
*/

#![no_std]

extern crate alloc;
#[cfg(any(test, feature = "std"))]
extern crate std;

#[macro_use]
mod macros;

mod bitmap;
mod cache;
mod dealign;
mod decoder;
mod error;
mod fs;
mod varint;


pub use bitmap::{BITS_PER_PIXEL, Bitmap};
pub use cache::{CachedImage, DecodeCache};
pub use dealign::{dealign, packed_len, row_stride};
pub use decoder::{Decoder, DecoderOptions, Header, decode_from_reader, parse_header};
pub use error::{FormatError, WbmpError};
pub use fs::Filesystem;
pub use varint::read_varint;

#[cfg(feature = "std")]
pub use decoder::SharedDecoder;
#[cfg(feature = "std")]
pub use fs::{StdFile, StdFilesystem};

pub type Result<T> = core::result::Result<T, WbmpError>;
