//! Texture body deserialization with capability-driven fallback.
//!
//! The reader consumes the body the compiler laid out: format, packed
//! dimensions, level count, then each level's palette and pixel blocks.
//! Capability policy is decided before any level is converted:
//!
//! - A multi-level chain with a non-power-of-two storage dimension on a
//!   device without that support uploads only the base level. The
//!   remaining levels are still consumed so the read position stays
//!   exact for whatever follows the body.
//! - Block-compressed families the device cannot sample downgrade to
//!   plain color, and every kept level is software-decompressed.
//! - Paletted levels always expand through their palette, and
//!   NormalizedByte4 always rewrites to plain color.
//! - Bgra5551 and Bgra4444 levels get an in-place 16-bit channel
//!   rotation into the runtime's native order.

use thiserror::Error;

use crucible_common::{SurfaceFormat, UnknownWireFormat, mip_dimension, unpack_dimension};

use crate::capabilities::GraphicsCapabilities;
use crate::cursor::Cursor;
use crate::device::TextureUpload;
use crate::dxt::{self, DxtError};

/// Errors from deserializing a texture body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextureReadError {
    /// Body ended before the named field or block.
    #[error("texture body truncated reading the {0}")]
    Truncated(&'static str),
    #[error(transparent)]
    UnknownFormat(#[from] UnknownWireFormat),
    /// Level count written as zero or negative.
    #[error("mip level count must be at least 1, got {0}")]
    LevelCount(i32),
    /// A palette or pixel block declared a negative byte length.
    #[error("negative {what} length {len}")]
    NegativeLength { what: &'static str, len: i32 },
    /// A level's block data could not be decompressed.
    #[error("level {level}: {source}")]
    Decompress {
        level: u32,
        #[source]
        source: DxtError,
    },
    /// A paletted level's index data is too small for its dimensions.
    #[error("level {level}: {got} index bytes, {needed} needed for {width}x{height} {format}")]
    LevelTooShort {
        level: u32,
        format: SurfaceFormat,
        width: u32,
        height: u32,
        needed: usize,
        got: usize,
    },
    /// A packed index points past the end of the level's palette.
    #[error("level {level}: palette index {index} outside {entries}-entry palette")]
    PaletteIndex {
        level: u32,
        index: usize,
        entries: usize,
    },
    /// Bytes left over after the last declared level.
    #[error("{0} trailing bytes after the last mip level")]
    TrailingBytes(usize),
}

/// Deserialize a texture body, applying capability fallback policy.
///
/// Every stored level is consumed even when the device cannot use it.
/// The returned upload carries only the surviving levels, already
/// converted to the output format.
pub fn read_texture(
    body: &[u8],
    capabilities: &GraphicsCapabilities,
) -> Result<TextureUpload, TextureReadError> {
    let mut cursor = Cursor::new(body);

    let wire = cursor
        .i32_le()
        .ok_or(TextureReadError::Truncated("surface format"))?;
    let format = SurfaceFormat::from_wire(wire)?;
    let (original_width, width) = unpack_dimension(
        cursor
            .i32_le()
            .ok_or(TextureReadError::Truncated("width"))?,
    );
    let (original_height, height) = unpack_dimension(
        cursor
            .i32_le()
            .ok_or(TextureReadError::Truncated("height"))?,
    );
    let declared_levels = cursor
        .i32_le()
        .ok_or(TextureReadError::Truncated("level count"))?;
    if declared_levels < 1 {
        return Err(TextureReadError::LevelCount(declared_levels));
    }
    let declared_levels = declared_levels as u32;

    let mut upload_levels = declared_levels;
    if declared_levels > 1
        && !capabilities.supports_non_power_of_two
        && !(width.is_power_of_two() && height.is_power_of_two())
    {
        upload_levels = 1;
        tracing::debug!(
            width,
            height,
            "device lacks non-power-of-two mip support, keeping base level only"
        );
    }

    let target = downgrade_target(format, capabilities);
    if let Some(target) = target {
        tracing::debug!("converting {format} levels to {target} for upload");
    }

    let mut levels = Vec::with_capacity(upload_levels as usize);
    for level in 0..declared_levels {
        let palette = if format.is_paletted() {
            let len = cursor
                .i32_le()
                .ok_or(TextureReadError::Truncated("palette length"))?;
            if len < 0 {
                return Err(TextureReadError::NegativeLength {
                    what: "palette",
                    len,
                });
            }
            cursor
                .take(len as usize)
                .ok_or(TextureReadError::Truncated("palette"))?
        } else {
            &[]
        };

        let len = cursor
            .i32_le()
            .ok_or(TextureReadError::Truncated("pixel data length"))?;
        if len < 0 {
            return Err(TextureReadError::NegativeLength {
                what: "pixel data",
                len,
            });
        }
        let data = cursor
            .take(len as usize)
            .ok_or(TextureReadError::Truncated("pixel data"))?;

        if level >= upload_levels {
            continue;
        }

        let level_width = mip_dimension(width, level);
        let level_height = mip_dimension(height, level);
        levels.push(convert_level(
            format,
            target.is_some(),
            level,
            level_width,
            level_height,
            data,
            palette,
        )?);
    }

    if cursor.remaining() != 0 {
        return Err(TextureReadError::TrailingBytes(cursor.remaining()));
    }

    Ok(TextureUpload {
        format: target.unwrap_or(format),
        width,
        height,
        original_width,
        original_height,
        levels,
    })
}

/// Output format after capability policy, or `None` to keep the stored
/// format untouched.
fn downgrade_target(
    format: SurfaceFormat,
    capabilities: &GraphicsCapabilities,
) -> Option<SurfaceFormat> {
    match format {
        SurfaceFormat::Dxt1 | SurfaceFormat::Dxt1a if !capabilities.supports_dxt1 => {
            Some(SurfaceFormat::Color)
        }
        SurfaceFormat::Dxt1SRgb if !capabilities.supports_dxt1 => Some(SurfaceFormat::ColorSRgb),
        SurfaceFormat::Dxt3 | SurfaceFormat::Dxt5 if !capabilities.supports_s3tc => {
            Some(SurfaceFormat::Color)
        }
        SurfaceFormat::Dxt3SRgb | SurfaceFormat::Dxt5SRgb if !capabilities.supports_s3tc => {
            Some(SurfaceFormat::ColorSRgb)
        }
        SurfaceFormat::NormalizedByte4 => Some(SurfaceFormat::Color),
        // No device samples palette indices; always expand.
        SurfaceFormat::Paletted4 | SurfaceFormat::Paletted8 => Some(SurfaceFormat::Color),
        _ => None,
    }
}

fn convert_level(
    format: SurfaceFormat,
    downgraded: bool,
    level: u32,
    width: u32,
    height: u32,
    data: &[u8],
    palette: &[u8],
) -> Result<Vec<u8>, TextureReadError> {
    let decompress_err = |source| TextureReadError::Decompress { level, source };
    match format {
        SurfaceFormat::Paletted4 | SurfaceFormat::Paletted8 => {
            expand_palette(format, level, width, height, data, palette)
        }
        SurfaceFormat::Dxt1 | SurfaceFormat::Dxt1a | SurfaceFormat::Dxt1SRgb if downgraded => {
            dxt::decompress_dxt1(data, width, height).map_err(decompress_err)
        }
        SurfaceFormat::Dxt3 | SurfaceFormat::Dxt3SRgb if downgraded => {
            dxt::decompress_dxt3(data, width, height).map_err(decompress_err)
        }
        SurfaceFormat::Dxt5 | SurfaceFormat::Dxt5SRgb if downgraded => {
            dxt::decompress_dxt5(data, width, height).map_err(decompress_err)
        }
        SurfaceFormat::NormalizedByte4 => Ok(reorder_normalized_byte4(data)),
        SurfaceFormat::Bgra5551 => Ok(rotate_16bit(data, 1)),
        SurfaceFormat::Bgra4444 => Ok(rotate_16bit(data, 4)),
        _ => Ok(data.to_vec()),
    }
}

/// Rotate every little-endian 16-bit pixel left by `bits`, moving the
/// packed alpha component to the end the runtime samplers expect.
fn rotate_16bit(data: &[u8], bits: u32) -> Vec<u8> {
    let mut out = data.to_vec();
    for pixel in out.chunks_exact_mut(2) {
        let value = u16::from_le_bytes([pixel[0], pixel[1]]).rotate_left(bits);
        pixel.copy_from_slice(&value.to_le_bytes());
    }
    out
}

/// Permute NormalizedByte4 texels into the runtime's RGBA byte order.
fn reorder_normalized_byte4(data: &[u8]) -> Vec<u8> {
    let mut out = data.to_vec();
    for pixel in out.chunks_exact_mut(4) {
        let [b0, b1, b2, b3] = [pixel[0], pixel[1], pixel[2], pixel[3]];
        pixel.copy_from_slice(&[b2, b1, b0, b3]);
    }
    out
}

/// Expand packed palette indices to RGBA8 through the level's palette.
fn expand_palette(
    format: SurfaceFormat,
    level: u32,
    width: u32,
    height: u32,
    indices: &[u8],
    palette: &[u8],
) -> Result<Vec<u8>, TextureReadError> {
    let pixel_count = width as usize * height as usize;
    let needed = format.data_size(width, height);
    if indices.len() < needed {
        return Err(TextureReadError::LevelTooShort {
            level,
            format,
            width,
            height,
            needed,
            got: indices.len(),
        });
    }

    let entries = palette.len() / 4;
    let mut out = Vec::with_capacity(pixel_count * 4);
    for pixel in 0..pixel_count {
        let index = if format == SurfaceFormat::Paletted4 {
            let byte = indices[pixel / 2];
            // Even pixels sit in the high nibble.
            if pixel % 2 == 0 { byte >> 4 } else { byte & 0x0F }
        } else {
            indices[pixel]
        } as usize;
        if index >= entries {
            return Err(TextureReadError::PaletteIndex {
                level,
                index,
                entries,
            });
        }
        out.extend_from_slice(&palette[index * 4..index * 4 + 4]);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const GREEN: [u8; 4] = [0, 255, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];

    fn push_i32(body: &mut Vec<u8>, value: i32) {
        body.extend_from_slice(&value.to_le_bytes());
    }

    /// Body with one pixel block per level and no palettes.
    fn texture_body(
        format: SurfaceFormat,
        width_field: i32,
        height_field: i32,
        levels: &[&[u8]],
    ) -> Vec<u8> {
        let mut body = Vec::new();
        push_i32(&mut body, format.wire());
        push_i32(&mut body, width_field);
        push_i32(&mut body, height_field);
        push_i32(&mut body, levels.len() as i32);
        for level in levels {
            push_i32(&mut body, level.len() as i32);
            body.extend_from_slice(level);
        }
        body
    }

    /// An 8-byte DXT1 block of a single color in four-color mode.
    fn dxt1_block(endpoint: u16) -> [u8; 8] {
        let mut block = [0u8; 8];
        block[0..2].copy_from_slice(&endpoint.to_le_bytes());
        block
    }

    #[test]
    fn test_reads_single_level_color_texture() {
        let data: Vec<u8> = [RED, GREEN, BLUE, RED].concat();
        let body = texture_body(SurfaceFormat::Color, 2, 2, &[&data]);

        let upload = read_texture(&body, &GraphicsCapabilities::FULL).unwrap();
        assert_eq!(upload.format, SurfaceFormat::Color);
        assert_eq!((upload.width, upload.height), (2, 2));
        // Plain legacy dimensions read back as both sizes.
        assert_eq!((upload.original_width, upload.original_height), (2, 2));
        assert_eq!(upload.levels, vec![data]);
    }

    #[test]
    fn test_packed_dimensions_recover_original_size() {
        let data = vec![0u8; 8 * 4 * 4];
        let body = texture_body(SurfaceFormat::Color, (5 << 16) | 8, (3 << 16) | 4, &[&data]);

        let upload = read_texture(&body, &GraphicsCapabilities::FULL).unwrap();
        assert_eq!((upload.width, upload.height), (8, 4));
        assert_eq!((upload.original_width, upload.original_height), (5, 3));
    }

    #[test]
    fn test_rejects_unknown_wire_format() {
        let mut body = texture_body(SurfaceFormat::Color, 1, 1, &[&[0u8; 4]]);
        body[0..4].copy_from_slice(&42i32.to_le_bytes());

        assert_eq!(
            read_texture(&body, &GraphicsCapabilities::FULL),
            Err(TextureReadError::UnknownFormat(UnknownWireFormat(42)))
        );
    }

    #[test]
    fn test_rejects_non_positive_level_count() {
        for count in [0, -3] {
            let mut body = Vec::new();
            push_i32(&mut body, SurfaceFormat::Color.wire());
            push_i32(&mut body, 1);
            push_i32(&mut body, 1);
            push_i32(&mut body, count);
            assert_eq!(
                read_texture(&body, &GraphicsCapabilities::FULL),
                Err(TextureReadError::LevelCount(count))
            );
        }
    }

    #[test]
    fn test_non_power_of_two_chain_uploads_base_level_only() {
        let base: Vec<u8> = vec![7u8; 6 * 4 * 4];
        let mip1 = vec![8u8; 3 * 2 * 4];
        let mip2 = vec![9u8; 4];
        let body = texture_body(SurfaceFormat::Color, 6, 4, &[&base, &mip1, &mip2]);

        let upload = read_texture(&body, &GraphicsCapabilities::MINIMAL).unwrap();
        assert_eq!(upload.levels.len(), 1);
        assert_eq!(upload.levels[0], base);

        // The same chain survives intact on a capable device.
        let upload = read_texture(&body, &GraphicsCapabilities::FULL).unwrap();
        assert_eq!(upload.levels.len(), 3);
        assert_eq!(upload.levels[2], mip2);
    }

    #[test]
    fn test_clamped_chain_still_consumes_every_level() {
        let base: Vec<u8> = vec![7u8; 6 * 4 * 4];
        let mip1 = vec![8u8; 3 * 2 * 4];
        let mip2 = vec![9u8; 4];
        let body = texture_body(SurfaceFormat::Color, 6, 4, &[&base, &mip1, &mip2]);

        // Discarded levels are still read: cutting the last one short or
        // appending stray bytes both fail, clamped or not.
        assert_eq!(
            read_texture(&body[..body.len() - 1], &GraphicsCapabilities::MINIMAL),
            Err(TextureReadError::Truncated("pixel data"))
        );
        let mut oversized = body.clone();
        oversized.push(0);
        assert_eq!(
            read_texture(&oversized, &GraphicsCapabilities::MINIMAL),
            Err(TextureReadError::TrailingBytes(1))
        );
    }

    #[test]
    fn test_power_of_two_chain_keeps_mips_on_minimal_device() {
        let levels: Vec<Vec<u8>> = vec![vec![0u8; 4 * 4 * 4], vec![1u8; 2 * 2 * 4], vec![2u8; 4]];
        let refs: Vec<&[u8]> = levels.iter().map(Vec::as_slice).collect();
        let body = texture_body(SurfaceFormat::Color, 4, 4, &refs);

        let upload = read_texture(&body, &GraphicsCapabilities::MINIMAL).unwrap();
        assert_eq!(upload.levels.len(), 3);
    }

    #[test]
    fn test_single_level_non_power_of_two_is_never_clamped() {
        let data = vec![0u8; 6 * 4 * 4];
        let body = texture_body(SurfaceFormat::Color, 6, 4, &[&data]);

        let upload = read_texture(&body, &GraphicsCapabilities::MINIMAL).unwrap();
        assert_eq!(upload.levels.len(), 1);
    }

    #[test]
    fn test_dxt1_passes_through_on_capable_device() {
        let block = dxt1_block(0xF800);
        let body = texture_body(SurfaceFormat::Dxt1, 4, 4, &[&block]);

        let upload = read_texture(&body, &GraphicsCapabilities::FULL).unwrap();
        assert_eq!(upload.format, SurfaceFormat::Dxt1);
        assert_eq!(upload.levels[0], block);
    }

    #[test]
    fn test_dxt1_decompresses_without_device_support() {
        let block = dxt1_block(0xF800);
        let body = texture_body(SurfaceFormat::Dxt1, 4, 4, &[&block]);
        let capabilities = GraphicsCapabilities {
            supports_dxt1: false,
            ..GraphicsCapabilities::FULL
        };

        let upload = read_texture(&body, &capabilities).unwrap();
        assert_eq!(upload.format, SurfaceFormat::Color);
        assert_eq!(upload.levels[0].len(), 4 * 4 * 4);
        assert_eq!(&upload.levels[0][..4], &RED);
    }

    #[test]
    fn test_dxt1_srgb_downgrades_to_srgb_color() {
        let block = dxt1_block(0xF800);
        let body = texture_body(SurfaceFormat::Dxt1SRgb, 4, 4, &[&block]);
        let capabilities = GraphicsCapabilities {
            supports_dxt1: false,
            ..GraphicsCapabilities::FULL
        };

        let upload = read_texture(&body, &capabilities).unwrap();
        assert_eq!(upload.format, SurfaceFormat::ColorSRgb);
        // sRGB downgrades decompress like their linear counterparts.
        assert_eq!(upload.levels[0].len(), 4 * 4 * 4);
    }

    #[test]
    fn test_dxt5_decompresses_interpolated_alpha() {
        let mut block = [0u8; 16];
        // Alpha endpoints 255/0, every selector 1: fully transparent.
        block[0] = 255;
        block[2..8].copy_from_slice(&[0x49, 0x92, 0x24, 0x49, 0x92, 0x24]);
        block[8..16].copy_from_slice(&dxt1_block(0xF800));
        let body = texture_body(SurfaceFormat::Dxt5, 4, 4, &[&block]);
        let capabilities = GraphicsCapabilities {
            supports_s3tc: false,
            ..GraphicsCapabilities::FULL
        };

        let upload = read_texture(&body, &capabilities).unwrap();
        assert_eq!(upload.format, SurfaceFormat::Color);
        assert_eq!(&upload.levels[0][..4], &[255, 0, 0, 0]);
    }

    #[test]
    fn test_dxt3_keeps_its_format_when_s3tc_present() {
        let block = [0u8; 16];
        let body = texture_body(SurfaceFormat::Dxt3, 4, 4, &[&block]);
        let capabilities = GraphicsCapabilities {
            supports_dxt1: false,
            ..GraphicsCapabilities::FULL
        };

        // DXT3/DXT5 are gated on s3tc, not on the DXT1 flag.
        let upload = read_texture(&body, &capabilities).unwrap();
        assert_eq!(upload.format, SurfaceFormat::Dxt3);
        assert_eq!(upload.levels[0], block);
    }

    #[test]
    fn test_truncated_dxt_level_reports_decompress_error() {
        let body = texture_body(SurfaceFormat::Dxt1, 4, 4, &[&[0u8; 4]]);
        let capabilities = GraphicsCapabilities {
            supports_dxt1: false,
            ..GraphicsCapabilities::FULL
        };

        assert!(matches!(
            read_texture(&body, &capabilities),
            Err(TextureReadError::Decompress { level: 0, .. })
        ));
    }

    #[test]
    fn test_normalized_byte4_reorders_channels() {
        let body = texture_body(SurfaceFormat::NormalizedByte4, 1, 1, &[&[1, 2, 3, 4]]);

        let upload = read_texture(&body, &GraphicsCapabilities::FULL).unwrap();
        assert_eq!(upload.format, SurfaceFormat::Color);
        assert_eq!(upload.levels[0], vec![3, 2, 1, 4]);
    }

    #[test]
    fn test_bgra5551_rotates_alpha_bit_to_the_bottom() {
        let data = [0x8000u16.to_le_bytes(), 0x7FFFu16.to_le_bytes()].concat();
        let body = texture_body(SurfaceFormat::Bgra5551, 2, 1, &[&data]);

        let upload = read_texture(&body, &GraphicsCapabilities::FULL).unwrap();
        assert_eq!(upload.format, SurfaceFormat::Bgra5551);
        assert_eq!(
            upload.levels[0],
            [0x0001u16.to_le_bytes(), 0xFFFEu16.to_le_bytes()].concat()
        );
    }

    #[test]
    fn test_bgra4444_rotates_one_nibble() {
        let data = 0x1234u16.to_le_bytes();
        let body = texture_body(SurfaceFormat::Bgra4444, 1, 1, &[&data]);

        let upload = read_texture(&body, &GraphicsCapabilities::FULL).unwrap();
        assert_eq!(upload.levels[0], 0x2341u16.to_le_bytes());
    }

    #[test]
    fn test_bgr565_passes_through_untouched() {
        let data = 0xABCDu16.to_le_bytes();
        let body = texture_body(SurfaceFormat::Bgr565, 1, 1, &[&data]);

        let upload = read_texture(&body, &GraphicsCapabilities::FULL).unwrap();
        assert_eq!(upload.format, SurfaceFormat::Bgr565);
        assert_eq!(upload.levels[0], data);
    }

    /// Body for a paletted texture with per-level palette and index blocks.
    fn paletted_body(
        format: SurfaceFormat,
        width: i32,
        height: i32,
        levels: &[(&[u8], &[u8])],
    ) -> Vec<u8> {
        let mut body = Vec::new();
        push_i32(&mut body, format.wire());
        push_i32(&mut body, width);
        push_i32(&mut body, height);
        push_i32(&mut body, levels.len() as i32);
        for (palette, indices) in levels {
            push_i32(&mut body, palette.len() as i32);
            body.extend_from_slice(palette);
            push_i32(&mut body, indices.len() as i32);
            body.extend_from_slice(indices);
        }
        body
    }

    #[test]
    fn test_paletted8_expands_through_palette() {
        let palette: Vec<u8> = [RED, GREEN].concat();
        let body = paletted_body(SurfaceFormat::Paletted8, 2, 2, &[(&palette, &[0, 1, 1, 0])]);

        let upload = read_texture(&body, &GraphicsCapabilities::FULL).unwrap();
        assert_eq!(upload.format, SurfaceFormat::Color);
        assert_eq!(upload.levels[0], [RED, GREEN, GREEN, RED].concat());
    }

    #[test]
    fn test_paletted4_reads_even_pixels_from_high_nibbles() {
        let palette: Vec<u8> = [RED, GREEN, BLUE].concat();
        // Pixels 0..4 index 0, 1, 2, 0.
        let body = paletted_body(SurfaceFormat::Paletted4, 2, 2, &[(&palette, &[0x01, 0x20])]);

        let upload = read_texture(&body, &GraphicsCapabilities::FULL).unwrap();
        assert_eq!(upload.levels[0], [RED, GREEN, BLUE, RED].concat());
    }

    #[test]
    fn test_paletted_mip_chain_reads_palette_per_level() {
        let palette: Vec<u8> = [RED, GREEN].concat();
        let body = paletted_body(
            SurfaceFormat::Paletted8,
            2,
            2,
            &[(&palette, &[0, 1, 0, 1]), (&palette, &[1])],
        );

        let upload = read_texture(&body, &GraphicsCapabilities::FULL).unwrap();
        assert_eq!(upload.levels.len(), 2);
        assert_eq!(upload.levels[1], GREEN);
    }

    #[test]
    fn test_palette_index_out_of_range_is_rejected() {
        let palette: Vec<u8> = [RED, GREEN].concat();
        let body = paletted_body(SurfaceFormat::Paletted8, 2, 2, &[(&palette, &[0, 5, 0, 0])]);

        assert_eq!(
            read_texture(&body, &GraphicsCapabilities::FULL),
            Err(TextureReadError::PaletteIndex {
                level: 0,
                index: 5,
                entries: 2,
            })
        );
    }

    #[test]
    fn test_paletted_level_too_short_for_dimensions() {
        let palette: Vec<u8> = [RED, GREEN].concat();
        let body = paletted_body(SurfaceFormat::Paletted8, 2, 2, &[(&palette, &[0, 1, 0])]);

        assert_eq!(
            read_texture(&body, &GraphicsCapabilities::FULL),
            Err(TextureReadError::LevelTooShort {
                level: 0,
                format: SurfaceFormat::Paletted8,
                width: 2,
                height: 2,
                needed: 4,
                got: 3,
            })
        );
    }

    #[test]
    fn test_truncated_header_names_the_missing_field() {
        assert_eq!(
            read_texture(&[], &GraphicsCapabilities::FULL),
            Err(TextureReadError::Truncated("surface format"))
        );
        assert_eq!(
            read_texture(&0i32.to_le_bytes(), &GraphicsCapabilities::FULL),
            Err(TextureReadError::Truncated("width"))
        );
    }

    #[test]
    fn test_negative_pixel_length_is_rejected() {
        let mut body = Vec::new();
        push_i32(&mut body, SurfaceFormat::Color.wire());
        push_i32(&mut body, 1);
        push_i32(&mut body, 1);
        push_i32(&mut body, 1);
        push_i32(&mut body, -8);

        assert_eq!(
            read_texture(&body, &GraphicsCapabilities::FULL),
            Err(TextureReadError::NegativeLength {
                what: "pixel data",
                len: -8,
            })
        );
    }
}
