//! Texture content aggregate.
//!
//! A [`TextureContent`] is the unit the pipeline moves through import,
//! profile conversion, and serialization: per-face mip chains plus the
//! source's pre-padding dimensions. Profiles mutate the chains in place;
//! the container writer consumes the result read-only.

use std::path::{Path, PathBuf};

use anyhow::Context;
use glam::Vec4;
use thiserror::Error;

use crucible_common::{SurfaceFormat, mip_dimension};

use crate::bitmap::{self, Bitmap, BitmapError, Color, PixelBitmap, Region, Texel};

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("texture has no faces")]
    NoFaces,
    #[error("face {0} has no mip levels")]
    EmptyFace(usize),
    #[error("face {face} has {got} mip levels where face 0 has {want}")]
    MixedChainLength { face: usize, got: usize, want: usize },
    #[error("face {face} level {level} is {got_width}x{got_height}, expected {want_width}x{want_height}")]
    BadLevelDimensions {
        face: usize,
        level: usize,
        got_width: u32,
        got_height: u32,
        want_width: u32,
        want_height: u32,
    },
    #[error("face {face} level {level} is {got} where the texture is {want}")]
    MixedFormats {
        face: usize,
        level: usize,
        got: SurfaceFormat,
        want: SurfaceFormat,
    },
    #[error(transparent)]
    Bitmap(#[from] BitmapError),
}

/// A texture being built.
///
/// The outer `faces` index is the cubemap face (a plain 2D texture uses
/// face 0 only); the inner index is the mip level, level 0 most detailed.
/// `original_width`/`original_height` keep the source dimensions from
/// before any power-of-two padding so readers can recover the real
/// content size.
#[derive(Debug, Clone)]
pub struct TextureContent {
    pub faces: Vec<Vec<Bitmap>>,
    pub original_width: u32,
    pub original_height: u32,
}

impl TextureContent {
    /// Wrap an imported level 0 bitmap as face 0 of a new texture.
    pub fn new(level0: Bitmap) -> Self {
        Self {
            original_width: level0.width(),
            original_height: level0.height(),
            faces: vec![vec![level0]],
        }
    }

    /// Width of face 0 level 0; the padded width once padding has run.
    pub fn width(&self) -> u32 {
        self.level0().map_or(0, Bitmap::width)
    }

    /// Height of face 0 level 0.
    pub fn height(&self) -> u32 {
        self.level0().map_or(0, Bitmap::height)
    }

    /// Surface format of face 0 level 0.
    pub fn format(&self) -> Option<SurfaceFormat> {
        self.level0().map(Bitmap::format)
    }

    fn level0(&self) -> Option<&Bitmap> {
        self.faces.first().and_then(|face| face.first())
    }

    /// Check the chain invariants: every face has the same number of
    /// levels, dimensions halve per level down to 1, and every bitmap
    /// shares one surface format. The writer requires all of these.
    pub fn validate(&self) -> Result<(), TextureError> {
        let first = self.faces.first().ok_or(TextureError::NoFaces)?;
        if first.is_empty() {
            return Err(TextureError::EmptyFace(0));
        }
        let want_levels = first.len();
        let base_width = first[0].width();
        let base_height = first[0].height();
        let want_format = first[0].format();

        for (face_index, face) in self.faces.iter().enumerate() {
            if face.is_empty() {
                return Err(TextureError::EmptyFace(face_index));
            }
            if face.len() != want_levels {
                return Err(TextureError::MixedChainLength {
                    face: face_index,
                    got: face.len(),
                    want: want_levels,
                });
            }
            for (level, bitmap) in face.iter().enumerate() {
                let want_width = mip_dimension(base_width, level as u32);
                let want_height = mip_dimension(base_height, level as u32);
                if bitmap.width() != want_width || bitmap.height() != want_height {
                    return Err(TextureError::BadLevelDimensions {
                        face: face_index,
                        level,
                        got_width: bitmap.width(),
                        got_height: bitmap.height(),
                        want_width,
                        want_height,
                    });
                }
                if bitmap.format() != want_format {
                    return Err(TextureError::MixedFormats {
                        face: face_index,
                        level,
                        got: bitmap.format(),
                        want: want_format,
                    });
                }
            }
        }
        Ok(())
    }

    /// Convert every level of every face to `format` through the generic
    /// bitmap copy.
    pub fn convert_pixel_format(&mut self, format: SurfaceFormat) -> Result<(), TextureError> {
        for face in &mut self.faces {
            for level in face.iter_mut() {
                if level.format() == format {
                    continue;
                }
                let mut dest = Bitmap::new_pixel(format, level.width(), level.height())?;
                let full = Region::full(level.width(), level.height());
                bitmap::copy(level, full, &mut dest, full)?;
                *level = dest;
            }
        }
        Ok(())
    }

    /// Replace each face's chain with a full mip chain generated from its
    /// level 0 by successive 2x2 box reduction in float space, converting
    /// each level back to level 0's format.
    pub fn generate_mipmaps(&mut self) -> Result<(), TextureError> {
        for face in &mut self.faces {
            let Some(level0) = face.first() else {
                continue;
            };
            let format = level0.format();
            let mut previous = float_view(level0)?;
            face.truncate(1);

            let mut width = previous.width();
            let mut height = previous.height();
            while width > 1 || height > 1 {
                width = (width >> 1).max(1);
                height = (height >> 1).max(1);
                let reduced = box_reduce(&previous, width, height);
                face.push(Bitmap::from_vector4(&reduced, format)?);
                previous = reduced;
            }
        }
        Ok(())
    }

    /// Pad each face's level 0 up to power-of-two (and optionally square)
    /// dimensions by replicating the edge pixels, then truncate the chain
    /// to that single level. `original_width`/`original_height` keep their
    /// pre-padding values.
    pub fn pad(&mut self, power_of_two: bool, square: bool) -> Result<(), TextureError> {
        let width = self.width();
        let height = self.height();
        if width == 0 || height == 0 {
            return Ok(());
        }

        let mut target_width = if power_of_two {
            width.next_power_of_two()
        } else {
            width
        };
        let mut target_height = if power_of_two {
            height.next_power_of_two()
        } else {
            height
        };
        if square {
            let side = target_width.max(target_height);
            target_width = side;
            target_height = side;
        }
        if target_width == width && target_height == height {
            return Ok(());
        }

        for face in &mut self.faces {
            let Some(level0) = face.first() else {
                continue;
            };
            let format = level0.format();
            let source = float_view(level0)?;

            let mut padded = PixelBitmap::<Vec4>::new(target_width, target_height);
            for y in 0..target_height {
                let sy = y.min(source.height() - 1);
                for x in 0..target_width {
                    let sx = x.min(source.width() - 1);
                    padded.set_pixel(x, y, source.pixel(sx, sy));
                }
            }

            face.clear();
            face.push(Bitmap::from_vector4(&padded, format)?);
        }
        Ok(())
    }

    /// Write every face and mip level as `{stem}_face{f}_mip{m}.png` for
    /// inspection. Block-compressed levels have no preview and are skipped
    /// with a warning. Returns the written paths.
    pub fn dump_to_png(&self, stem: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for (face_index, face) in self.faces.iter().enumerate() {
            for (level, bitmap) in face.iter().enumerate() {
                let Some(rgba) = bitmap_to_rgba(bitmap) else {
                    tracing::warn!(
                        "skipping face {} mip {}: no preview for {}",
                        face_index,
                        level,
                        bitmap.format()
                    );
                    continue;
                };
                let path = dump_path(stem, face_index, level);
                let image = image::RgbaImage::from_raw(bitmap.width(), bitmap.height(), rgba)
                    .context("pixel buffer does not match its dimensions")?;
                image
                    .save(&path)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                written.push(path);
            }
        }
        Ok(written)
    }
}

/// Load an image file as a single-level full-color texture.
pub fn import_file(input: &Path) -> anyhow::Result<TextureContent> {
    let img = image::open(input)
        .with_context(|| format!("failed to load image: {}", input.display()))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut bitmap = PixelBitmap::<Color>::new(width, height);
    bitmap.set_pixel_bytes(rgba.as_raw())?;
    Ok(TextureContent::new(Bitmap::Color(bitmap)))
}

fn float_view(bitmap: &Bitmap) -> Result<PixelBitmap<Vec4>, BitmapError> {
    bitmap
        .to_vector4()
        .ok_or(BitmapError::UnsupportedConversion {
            from: bitmap.format(),
            to: SurfaceFormat::Vector4,
        })
}

/// Average the up-to-2x2 source block behind each destination pixel.
fn box_reduce(src: &PixelBitmap<Vec4>, width: u32, height: u32) -> PixelBitmap<Vec4> {
    let mut out = PixelBitmap::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let x0 = (x * 2).min(src.width() - 1);
            let y0 = (y * 2).min(src.height() - 1);
            let x1 = (x * 2 + 1).min(src.width() - 1);
            let y1 = (y * 2 + 1).min(src.height() - 1);
            let sum =
                src.pixel(x0, y0) + src.pixel(x1, y0) + src.pixel(x0, y1) + src.pixel(x1, y1);
            out.set_pixel(x, y, sum * 0.25);
        }
    }
    out
}

fn bitmap_to_rgba(bitmap: &Bitmap) -> Option<Vec<u8>> {
    if let Bitmap::Paletted(paletted) = bitmap {
        let count = paletted.width() as usize * paletted.height() as usize;
        let mut out = Vec::with_capacity(count * 4);
        for i in 0..count {
            let color = paletted.colors()[paletted.index_at(i) as usize];
            out.extend_from_slice(&[color.r, color.g, color.b, color.a]);
        }
        return Some(out);
    }

    let float = bitmap.to_vector4()?;
    let mut out = Vec::with_capacity(float.pixels().len() * 4);
    for v in float.pixels() {
        let c = Color::from_vector4(*v);
        out.extend_from_slice(&[c.r, c.g, c.b, c.a]);
    }
    Some(out)
}

fn dump_path(stem: &Path, face: usize, level: usize) -> PathBuf {
    let name = match stem.file_name().and_then(|n| n.to_str()) {
        Some(name) => format!("{}_face{}_mip{}.png", name, face, level),
        None => format!("face{}_mip{}.png", face, level),
    };
    stem.with_file_name(name)
}
