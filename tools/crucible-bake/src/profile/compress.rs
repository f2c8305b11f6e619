//! Shared texture compressors.
//!
//! The block compressor picks BC1 for fully opaque content and BC3 when
//! any pixel carries alpha, padding levels out to the 4x4 block grid by
//! edge extension before handing them to `intel_tex_2`. The 16-bit
//! compressor applies the same alpha split between `Bgr565` and
//! `Bgra4444`.

use hashbrown::HashSet;
use intel_tex_2::{bc1, bc3, RgbaSurface};

use crucible_common::SurfaceFormat;

use crate::bitmap::{self, Bitmap, BitmapError, BlockBitmap, Color, Region, Texel};
use crate::texture::{TextureContent, TextureError};

use super::CompressError;

/// An 8-bit palette admits this many distinct colors.
const MAX_PALETTE_COLORS: usize = 255;

/// Count the distinct quantized colors across every face and level.
///
/// Returns `None` as soon as the count passes the 8-bit palette capacity,
/// or when a level has no float view and cannot be palettized.
pub(super) fn count_distinct_colors(content: &TextureContent) -> Option<usize> {
    let mut palette: HashSet<Color> = HashSet::new();
    for face in &content.faces {
        for level in face {
            let float = level.to_vector4()?;
            for pixel in float.pixels() {
                palette.insert(Color::from_vector4(*pixel));
                if palette.len() > MAX_PALETTE_COLORS {
                    return None;
                }
            }
        }
    }
    Some(palette.len())
}

/// Replace face 0's chain with a single 8-bit paletted level built from
/// its level 0. Existing mip levels are discarded.
pub(super) fn palettize_face0(content: &mut TextureContent) -> Result<(), TextureError> {
    let Some(level0) = content.faces.first().and_then(|face| face.first()) else {
        return Ok(());
    };
    let full = Region::full(level0.width(), level0.height());
    let mut paletted =
        Bitmap::new_pixel(SurfaceFormat::Paletted8, level0.width(), level0.height())?;
    bitmap::copy(level0, full, &mut paletted, full)?;
    content.faces[0] = vec![paletted];
    Ok(())
}

/// Convert to 16-bit color: `Bgra4444` when any pixel has alpha, `Bgr565`
/// otherwise. The whole texture gets one format so the container stays
/// single-format.
pub(super) fn compress_color16(content: &mut TextureContent) -> Result<(), TextureError> {
    let format = if content_has_transparency(content)? {
        SurfaceFormat::Bgra4444
    } else {
        SurfaceFormat::Bgr565
    };
    content.convert_pixel_format(format)
}

/// Compress every level of every face to the DXT format matching the
/// content's alpha usage.
pub(super) fn compress_block(content: &mut TextureContent) -> Result<(), CompressError> {
    let format = if content_has_transparency(content).map_err(failed)? {
        SurfaceFormat::Dxt5
    } else {
        SurfaceFormat::Dxt1
    };
    for face in &mut content.faces {
        for level in face.iter_mut() {
            *level = compress_level(level, format)?;
        }
    }
    Ok(())
}

fn compress_level(level: &Bitmap, format: SurfaceFormat) -> Result<Bitmap, CompressError> {
    let float = level.to_vector4().ok_or_else(|| {
        CompressError::Failed(format!("cannot block-compress {} content", level.format()))
    })?;

    let mut rgba = Vec::with_capacity(float.pixels().len() * 4);
    for pixel in float.pixels() {
        let c = Color::from_vector4(*pixel);
        rgba.extend_from_slice(&[c.r, c.g, c.b, c.a]);
    }

    let compressed = compress_rgba(&rgba, level.width(), level.height(), format);
    BlockBitmap::from_data(format, level.width(), level.height(), compressed)
        .map(Bitmap::Block)
        .map_err(failed)
}

/// Compress RGBA8 pixels into BC1 or BC3 blocks, edge-extending the
/// buffer when the dimensions are not multiples of 4.
fn compress_rgba(pixels: &[u8], width: u32, height: u32, format: SurfaceFormat) -> Vec<u8> {
    let w = width as usize;
    let h = height as usize;
    if w == 0 || h == 0 {
        return Vec::new();
    }

    let blocks_x = w.div_ceil(4);
    let blocks_y = h.div_ceil(4);
    let padded_width = blocks_x * 4;
    let padded_height = blocks_y * 4;

    let input: Vec<u8> = if w == padded_width && h == padded_height {
        pixels.to_vec()
    } else {
        let mut padded = vec![0u8; padded_width * padded_height * 4];
        for y in 0..padded_height {
            for x in 0..padded_width {
                let src_x = x.min(w - 1);
                let src_y = y.min(h - 1);
                let src_idx = (src_y * w + src_x) * 4;
                let dst_idx = (y * padded_width + x) * 4;
                padded[dst_idx..dst_idx + 4].copy_from_slice(&pixels[src_idx..src_idx + 4]);
            }
        }
        padded
    };

    let surface = RgbaSurface {
        width: padded_width as u32,
        height: padded_height as u32,
        stride: (padded_width * 4) as u32,
        data: &input,
    };

    if format == SurfaceFormat::Dxt1 {
        let mut output = vec![0u8; blocks_x * blocks_y * 8];
        bc1::compress_blocks_into(&surface, &mut output);
        output
    } else {
        let mut output = vec![0u8; blocks_x * blocks_y * 16];
        bc3::compress_blocks_into(&surface, &mut output);
        output
    }
}

fn content_has_transparency(content: &TextureContent) -> Result<bool, TextureError> {
    for face in &content.faces {
        for level in face {
            let float = level.to_vector4().ok_or(BitmapError::UnsupportedConversion {
                from: level.format(),
                to: SurfaceFormat::Vector4,
            })?;
            if float.pixels().iter().any(|p| p.w < 1.0) {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

fn failed(err: impl std::fmt::Display) -> CompressError {
    CompressError::Failed(err.to_string())
}
