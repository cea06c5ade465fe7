//! The 54-byte BMP header and the fields read out of it.
//!
//! The header is treated as an opaque blob that is copied verbatim. Only
//! three fields are decoded from it, each as a little-endian `i32`:
//!
//! | Offset | Field     |
//! |--------|-----------|
//! | 18     | width     |
//! | 22     | height    |
//! | 28     | bit depth |
//!
//! A conforming BMP stores the bit depth as a `u16` at offset 28 followed by
//! the compression field at 30. Reading four bytes folds the compression field
//! into the high half, so any compressed file reads as a very large bit depth
//! and is copied without a palette.

use core::fmt;

use crate::error::BmpCopyError;

/// Length of the header blob.
pub const HEADER_LEN: usize = 54;
/// Length of the color table (256 entries of 4 bytes).
pub const PALETTE_LEN: usize = 1024;
/// Bit depths at or below this value carry a color table.
pub const MAX_PALETTE_BIT_DEPTH: i32 = 8;

const WIDTH_OFFSET: usize = 18;
const HEIGHT_OFFSET: usize = 22;
const BIT_DEPTH_OFFSET: usize = 28;

/// A region of the input file, used to report short reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Header,
    Palette,
    Payload,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Section::Header => "header",
            Section::Palette => "color table",
            Section::Payload => "pixel data",
        })
    }
}

/// Raw BMP header with fixed-offset field accessors.
#[derive(Clone, PartialEq, Eq)]
pub struct BmpHeader {
    bytes: [u8; HEADER_LEN],
}

impl BmpHeader {
    pub fn new(bytes: [u8; HEADER_LEN]) -> Self {
        Self { bytes }
    }

    /// Take the header from the start of `data`.
    ///
    /// Bytes past the header are ignored. Fails with
    /// [`BmpCopyError::TruncatedInput`] when `data` is shorter than
    /// [`HEADER_LEN`].
    pub fn from_bytes(data: &[u8]) -> Result<Self, BmpCopyError> {
        let bytes: [u8; HEADER_LEN] = data
            .get(..HEADER_LEN)
            .and_then(|h| h.try_into().ok())
            .ok_or(BmpCopyError::TruncatedInput {
                section: Section::Header,
                needed: HEADER_LEN,
                available: data.len(),
            })?;
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8; HEADER_LEN] {
        &self.bytes
    }

    pub fn width(&self) -> i32 {
        self.read_i32_le(WIDTH_OFFSET)
    }

    pub fn height(&self) -> i32 {
        self.read_i32_le(HEIGHT_OFFSET)
    }

    pub fn bit_depth(&self) -> i32 {
        self.read_i32_le(BIT_DEPTH_OFFSET)
    }

    /// Whether a color table follows the header.
    ///
    /// The comparison is signed, so zero and negative depths count too.
    pub fn has_palette(&self) -> bool {
        self.bit_depth() <= MAX_PALETTE_BIT_DEPTH
    }

    pub fn palette_len(&self) -> usize {
        if self.has_palette() { PALETTE_LEN } else { 0 }
    }

    /// Width and height, rejecting zero and negative values.
    pub fn dimensions(&self) -> Result<(u32, u32), BmpCopyError> {
        let (width, height) = (self.width(), self.height());
        if width <= 0 {
            return Err(BmpCopyError::InvalidHeader(format!(
                "width {width} is not positive"
            )));
        }
        if height <= 0 {
            return Err(BmpCopyError::InvalidHeader(format!(
                "height {height} is not positive"
            )));
        }
        Ok((width.unsigned_abs(), height.unsigned_abs()))
    }

    /// Validated section sizes for this header.
    ///
    /// The payload is `width * height` bytes. Channel count and 4-byte row
    /// padding are not accounted for.
    pub fn layout(&self) -> Result<Layout, BmpCopyError> {
        let (width, height) = self.dimensions()?;
        let too_large = BmpCopyError::DimensionsTooLarge {
            width: self.width(),
            height: self.height(),
        };
        let payload_len = usize::try_from(width)
            .ok()
            .zip(usize::try_from(height).ok())
            .and_then(|(w, h)| w.checked_mul(h));
        let Some(payload_len) = payload_len else {
            return Err(too_large);
        };
        let palette_len = self.palette_len();
        let Some(total_len) = (HEADER_LEN + palette_len).checked_add(payload_len) else {
            return Err(too_large);
        };
        Ok(Layout {
            width,
            height,
            palette_len,
            payload_len,
            total_len,
        })
    }

    fn read_i32_le(&self, offset: usize) -> i32 {
        let b = &self.bytes;
        i32::from_le_bytes([b[offset], b[offset + 1], b[offset + 2], b[offset + 3]])
    }
}

impl fmt::Debug for BmpHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BmpHeader")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("bit_depth", &self.bit_depth())
            .finish_non_exhaustive()
    }
}

/// Section sizes of a copy, derived from a validated header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
    /// 0 or [`PALETTE_LEN`].
    pub palette_len: usize,
    /// `width * height`.
    pub payload_len: usize,
    /// Header, color table, and payload together.
    pub total_len: usize,
}
