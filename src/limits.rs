use crate::error::BmpCopyError;
use crate::header::Layout;

/// Resource limits checked before the pixel buffer is allocated.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    /// Maximum pixel buffer size (`width * height` bytes).
    pub max_payload_bytes: Option<u64>,
    /// Maximum output size, header and color table included.
    pub max_output_bytes: Option<u64>,
}

impl Limits {
    /// Check a validated layout against every configured limit.
    pub(crate) fn check(&self, layout: &Layout) -> Result<(), BmpCopyError> {
        if let Some(max_w) = self.max_width {
            if layout.width > max_w {
                return Err(BmpCopyError::LimitExceeded(format!(
                    "width {} exceeds limit {max_w}",
                    layout.width
                )));
            }
        }
        if let Some(max_h) = self.max_height {
            if layout.height > max_h {
                return Err(BmpCopyError::LimitExceeded(format!(
                    "height {} exceeds limit {max_h}",
                    layout.height
                )));
            }
        }
        if let Some(max_payload) = self.max_payload_bytes {
            if layout.payload_len as u64 > max_payload {
                return Err(BmpCopyError::LimitExceeded(format!(
                    "pixel data {} bytes exceeds limit {max_payload}",
                    layout.payload_len
                )));
            }
        }
        if let Some(max_out) = self.max_output_bytes {
            if layout.total_len as u64 > max_out {
                return Err(BmpCopyError::LimitExceeded(format!(
                    "output {} bytes exceeds limit {max_out}",
                    layout.total_len
                )));
            }
        }
        Ok(())
    }
}
