//! Raw storage for block-compressed surfaces.
//!
//! DXT data is opaque to the pipeline: blocks are produced by the
//! compressor and consumed by the container writer without per-pixel
//! access. The only structure enforced here is total size, which follows
//! the 4x4 block rounding of [`SurfaceFormat::data_size`].

use crucible_common::SurfaceFormat;

use super::BitmapError;

/// A bitmap holding block-compressed bytes for one DXT surface format.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockBitmap {
    width: u32,
    height: u32,
    format: SurfaceFormat,
    data: Vec<u8>,
}

impl BlockBitmap {
    /// New zeroed bitmap. `format` must be a block-compressed format.
    pub fn new(format: SurfaceFormat, width: u32, height: u32) -> Result<Self, BitmapError> {
        if format.block_bytes().is_none() {
            return Err(BitmapError::NotBlockFormat(format));
        }
        Ok(Self {
            width,
            height,
            format,
            data: vec![0; format.data_size(width, height)],
        })
    }

    /// Wrap already-compressed bytes. Length must match the format's size
    /// for these dimensions.
    pub fn from_data(
        format: SurfaceFormat,
        width: u32,
        height: u32,
        data: Vec<u8>,
    ) -> Result<Self, BitmapError> {
        if format.block_bytes().is_none() {
            return Err(BitmapError::NotBlockFormat(format));
        }
        let expected = format.data_size(width, height);
        if data.len() != expected {
            return Err(BitmapError::DataSizeMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> SurfaceFormat {
        self.format
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Replace the compressed bytes. Length must match exactly.
    pub fn set_data(&mut self, data: &[u8]) -> Result<(), BitmapError> {
        if data.len() != self.data.len() {
            return Err(BitmapError::DataSizeMismatch {
                expected: self.data.len(),
                got: data.len(),
            });
        }
        self.data.copy_from_slice(data);
        Ok(())
    }
}
