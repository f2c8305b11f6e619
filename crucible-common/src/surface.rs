//! GPU surface formats and their CNB wire values.
//!
//! The wire value of each format is written as a little-endian i32 at the
//! start of every texture body. Values are explicit and frozen; new formats
//! get new values, existing values are never reused.

use std::fmt;

use thiserror::Error;

/// Surface formats a compiled texture can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum SurfaceFormat {
    /// 32-bit RGBA, 8 bits per channel.
    Color = 0,
    /// 16-bit RGB, 5/6/5 bits.
    Bgr565 = 1,
    /// 16-bit RGBA, 5/5/5/1 bits.
    Bgra5551 = 2,
    /// 16-bit RGBA, 4 bits per channel.
    Bgra4444 = 3,
    /// 32-bit signed normalized, 8 bits per channel.
    NormalizedByte4 = 4,
    /// 128-bit float RGBA, 32 bits per channel.
    Vector4 = 5,
    /// 32-bit RGBA with sRGB color channels.
    ColorSRgb = 6,
    /// DXT1 block compression, opaque.
    Dxt1 = 7,
    /// DXT1 block compression with 1-bit alpha.
    Dxt1a = 8,
    /// DXT1 block compression, sRGB color.
    Dxt1SRgb = 9,
    /// DXT3 block compression, explicit alpha.
    Dxt3 = 10,
    /// DXT3 block compression, sRGB color.
    Dxt3SRgb = 11,
    /// DXT5 block compression, interpolated alpha.
    Dxt5 = 12,
    /// DXT5 block compression, sRGB color.
    Dxt5SRgb = 13,
    /// 4-bit palette indices plus a 16-entry RGBA palette.
    Paletted4 = 14,
    /// 8-bit palette indices plus a 256-entry RGBA palette.
    Paletted8 = 15,
}

/// Error returned when a texture body names a wire value this build does
/// not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown surface format wire value {0}")]
pub struct UnknownWireFormat(pub i32);

impl SurfaceFormat {
    /// Every known format, in wire-value order.
    pub const ALL: [SurfaceFormat; 16] = [
        SurfaceFormat::Color,
        SurfaceFormat::Bgr565,
        SurfaceFormat::Bgra5551,
        SurfaceFormat::Bgra4444,
        SurfaceFormat::NormalizedByte4,
        SurfaceFormat::Vector4,
        SurfaceFormat::ColorSRgb,
        SurfaceFormat::Dxt1,
        SurfaceFormat::Dxt1a,
        SurfaceFormat::Dxt1SRgb,
        SurfaceFormat::Dxt3,
        SurfaceFormat::Dxt3SRgb,
        SurfaceFormat::Dxt5,
        SurfaceFormat::Dxt5SRgb,
        SurfaceFormat::Paletted4,
        SurfaceFormat::Paletted8,
    ];

    /// Wire value written to texture bodies.
    pub fn wire(self) -> i32 {
        self as i32
    }

    /// Parse a wire value back into a format.
    pub fn from_wire(value: i32) -> Result<SurfaceFormat, UnknownWireFormat> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.wire() == value)
            .ok_or(UnknownWireFormat(value))
    }

    pub fn name(self) -> &'static str {
        match self {
            SurfaceFormat::Color => "Color",
            SurfaceFormat::Bgr565 => "Bgr565",
            SurfaceFormat::Bgra5551 => "Bgra5551",
            SurfaceFormat::Bgra4444 => "Bgra4444",
            SurfaceFormat::NormalizedByte4 => "NormalizedByte4",
            SurfaceFormat::Vector4 => "Vector4",
            SurfaceFormat::ColorSRgb => "ColorSRgb",
            SurfaceFormat::Dxt1 => "Dxt1",
            SurfaceFormat::Dxt1a => "Dxt1a",
            SurfaceFormat::Dxt1SRgb => "Dxt1SRgb",
            SurfaceFormat::Dxt3 => "Dxt3",
            SurfaceFormat::Dxt3SRgb => "Dxt3SRgb",
            SurfaceFormat::Dxt5 => "Dxt5",
            SurfaceFormat::Dxt5SRgb => "Dxt5SRgb",
            SurfaceFormat::Paletted4 => "Paletted4",
            SurfaceFormat::Paletted8 => "Paletted8",
        }
    }

    /// Bytes per pixel for linear (non-block, non-paletted) formats.
    pub fn bytes_per_pixel(self) -> Option<usize> {
        match self {
            SurfaceFormat::Color | SurfaceFormat::ColorSRgb | SurfaceFormat::NormalizedByte4 => {
                Some(4)
            }
            SurfaceFormat::Bgr565 | SurfaceFormat::Bgra5551 | SurfaceFormat::Bgra4444 => Some(2),
            SurfaceFormat::Vector4 => Some(16),
            _ => None,
        }
    }

    /// Bytes per 4x4 block for block-compressed formats.
    pub fn block_bytes(self) -> Option<usize> {
        match self {
            SurfaceFormat::Dxt1 | SurfaceFormat::Dxt1a | SurfaceFormat::Dxt1SRgb => Some(8),
            SurfaceFormat::Dxt3
            | SurfaceFormat::Dxt3SRgb
            | SurfaceFormat::Dxt5
            | SurfaceFormat::Dxt5SRgb => Some(16),
            _ => None,
        }
    }

    pub fn is_block_compressed(self) -> bool {
        self.block_bytes().is_some()
    }

    /// Bits per palette index for paletted formats.
    pub fn palette_bits(self) -> Option<u32> {
        match self {
            SurfaceFormat::Paletted4 => Some(4),
            SurfaceFormat::Paletted8 => Some(8),
            _ => None,
        }
    }

    pub fn is_paletted(self) -> bool {
        self.palette_bits().is_some()
    }

    pub fn is_srgb(self) -> bool {
        matches!(
            self,
            SurfaceFormat::ColorSRgb
                | SurfaceFormat::Dxt1SRgb
                | SurfaceFormat::Dxt3SRgb
                | SurfaceFormat::Dxt5SRgb
        )
    }

    /// Size in bytes of one level's pixel data at the given dimensions.
    ///
    /// Linear formats are `width * height * bytes_per_pixel`; block formats
    /// round each dimension up to whole 4x4 blocks; paletted formats count
    /// packed index bytes, rounding the final partial byte up. Palette
    /// tables are not included.
    pub fn data_size(self, width: u32, height: u32) -> usize {
        let (w, h) = (width as usize, height as usize);
        if let Some(bpp) = self.bytes_per_pixel() {
            w * h * bpp
        } else if let Some(block) = self.block_bytes() {
            w.div_ceil(4) * h.div_ceil(4) * block
        } else if let Some(bits) = self.palette_bits() {
            (w * h * bits as usize).div_ceil(8)
        } else {
            unreachable!("every format is linear, block, or paletted")
        }
    }
}

impl fmt::Display for SurfaceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
