//! # bmpcopy
//!
//! Byte-exact copier for the structural parts of a Windows Bitmap file:
//! the 54-byte header, the optional 1024-byte color table, and the pixel
//! payload.
//!
//! ## File layout
//!
//! | Offset        | Length         | Contents                                  |
//! |---------------|----------------|-------------------------------------------|
//! | 0             | 54             | Header, copied verbatim                   |
//! | 54            | 1024           | Color table, only when bit depth <= 8     |
//! | 54 or 1078    | width * height | Pixel payload                             |
//!
//! Width, height, and bit depth are little-endian `i32` values at offsets 18,
//! 22, and 28 of the header. See [`BmpHeader`].
//!
//! ## Non-Goals
//!
//! - Row padding. Real BMP scanlines are padded to 4 bytes and hold more than
//!   one byte per pixel at depths above 8; the payload here is always
//!   `width * height` bytes, so a copy of most real 24/32-bit files is cut
//!   short.
//! - RLE or any other compression
//! - Pixel decoding or format conversion
//!
//! ## Usage
//!
//! ```no_run
//! use bmpcopy::Unstoppable;
//!
//! let summary = bmpcopy::copy_file("in.bmp", "out.bmp", Unstoppable)?;
//! println!("{}x{}", summary.width, summary.height);
//!
//! // In memory, with a probe first
//! let data = std::fs::read("in.bmp")?;
//! let header = bmpcopy::BmpHeader::from_bytes(&data)?;
//! println!("bit depth {}", header.bit_depth());
//! let (copy, _summary) = bmpcopy::copy_bytes(&data, Unstoppable)?;
//! # Ok::<(), bmpcopy::BmpCopyError>(())
//! ```

#![forbid(unsafe_code)]

mod copy;
mod error;
mod header;
mod limits;

use std::path::Path;

// Re-exports
pub use copy::{CopyRequest, Permissiveness, Summary, read_header};
pub use enough::{Stop, Unstoppable};
pub use error::BmpCopyError;
pub use header::{BmpHeader, HEADER_LEN, Layout, MAX_PALETTE_BIT_DEPTH, PALETTE_LEN, Section};
pub use limits::Limits;

/// Copy a BMP file with default settings (strict, no limits).
pub fn copy_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    stop: impl Stop,
) -> Result<Summary, BmpCopyError> {
    CopyRequest::new().copy_file(input, output, stop)
}

/// Copy an in-memory BMP with default settings.
pub fn copy_bytes(data: &[u8], stop: impl Stop) -> Result<(Vec<u8>, Summary), BmpCopyError> {
    CopyRequest::new().copy_bytes(data, stop)
}
