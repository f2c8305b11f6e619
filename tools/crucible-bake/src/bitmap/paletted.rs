//! Palette-indexed pixel storage.
//!
//! A paletted bitmap stores one palette index per pixel, packed at 4 or 8
//! bits per index, plus a color table of `2^bits` RGBA entries. Conversion
//! quantizes float pixels with the same truncating cast as
//! [`Color::from_vector4`] and admits at most `2^bits - 1` distinct colors;
//! one more is a conversion failure, not a quality tradeoff.

use glam::Vec4;
use hashbrown::HashMap;

use crucible_common::SurfaceFormat;

use super::texel::Texel;
use super::{BitmapError, Color, PixelBitmap};

/// A bitmap of palette indices with its color table.
#[derive(Debug, Clone, PartialEq)]
pub struct PalettedBitmap {
    width: u32,
    height: u32,
    bits_per_index: u32,
    /// Packed indices, high nibble first for 4-bit, one byte each for 8-bit.
    indices: Vec<u8>,
    /// `2^bits_per_index` entries; unused tail entries stay zero.
    colors: Vec<Color>,
    /// The color table flattened to RGBA bytes, 4 per entry.
    color_data: Vec<u8>,
}

impl PalettedBitmap {
    /// New zeroed bitmap. `bits_per_index` must be 4 or 8.
    pub fn new(bits_per_index: u32, width: u32, height: u32) -> Result<Self, BitmapError> {
        if bits_per_index != 4 && bits_per_index != 8 {
            return Err(BitmapError::InvalidBitsPerIndex(bits_per_index));
        }
        let pixel_count = width as usize * height as usize;
        // Partial trailing bytes round up, never truncate
        let index_bytes = (pixel_count * bits_per_index as usize).div_ceil(8);
        let color_count = 1usize << bits_per_index;
        Ok(Self {
            width,
            height,
            bits_per_index,
            indices: vec![0; index_bytes],
            colors: vec![Color::default(); color_count],
            color_data: vec![0; color_count * 4],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bits_per_index(&self) -> u32 {
        self.bits_per_index
    }

    pub fn format(&self) -> SurfaceFormat {
        match self.bits_per_index {
            4 => SurfaceFormat::Paletted4,
            _ => SurfaceFormat::Paletted8,
        }
    }

    /// Most distinct colors a conversion may use. One entry below the table
    /// size, matching the platform profiles' color-count gate.
    pub fn color_capacity(&self) -> usize {
        (1usize << self.bits_per_index) - 1
    }

    /// Packed index bytes.
    pub fn index_data(&self) -> &[u8] {
        &self.indices
    }

    /// The color table as raw RGBA bytes.
    pub fn palette_data(&self) -> &[u8] {
        &self.color_data
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Replace the packed index bytes. Length must match exactly.
    pub fn set_index_data(&mut self, data: &[u8]) -> Result<(), BitmapError> {
        if data.len() != self.indices.len() {
            return Err(BitmapError::DataSizeMismatch {
                expected: self.indices.len(),
                got: data.len(),
            });
        }
        self.indices.copy_from_slice(data);
        Ok(())
    }

    /// Palette index of the pixel at linear position `pixel`.
    pub fn index_at(&self, pixel: usize) -> u8 {
        match self.bits_per_index {
            8 => self.indices[pixel],
            _ => {
                let byte = self.indices[pixel / 2];
                if pixel % 2 == 0 { byte >> 4 } else { byte & 0x0F }
            }
        }
    }

    fn set_index(&mut self, pixel: usize, value: u8) {
        match self.bits_per_index {
            8 => self.indices[pixel] = value,
            _ => {
                let byte = &mut self.indices[pixel / 2];
                if pixel % 2 == 0 {
                    *byte = (*byte & 0x0F) | (value << 4);
                } else {
                    *byte = (*byte & 0xF0) | (value & 0x0F);
                }
            }
        }
    }

    /// Quantize a float bitmap of identical dimensions into this palette.
    ///
    /// Colors are recorded in first-encounter order. Exceeding
    /// [`color_capacity`](Self::color_capacity) distinct colors fails the
    /// conversion. A lookup miss while writing indices cannot come from
    /// quantization drift (both passes quantize identically) and is
    /// reported as an internal consistency error.
    pub fn build_from_vector4(&mut self, source: &PixelBitmap<Vec4>) -> Result<(), BitmapError> {
        let mut lookup: HashMap<Color, u8> = HashMap::new();
        let mut palette: Vec<Color> = Vec::new();
        for pixel in source.pixels() {
            let color = Color::from_vector4(*pixel);
            if !lookup.contains_key(&color) {
                if palette.len() >= self.color_capacity() {
                    return Err(BitmapError::PaletteOverflow {
                        bits: self.bits_per_index,
                        capacity: self.color_capacity(),
                    });
                }
                lookup.insert(color, palette.len() as u8);
                palette.push(color);
            }
        }

        self.indices.fill(0);
        for (i, pixel) in source.pixels().iter().enumerate() {
            let color = Color::from_vector4(*pixel);
            let index = *lookup
                .get(&color)
                .ok_or(BitmapError::PaletteInconsistency)?;
            self.set_index(i, index);
        }

        self.colors.fill(Color::default());
        self.colors[..palette.len()].copy_from_slice(&palette);

        self.color_data.fill(0);
        for (i, color) in self.colors.iter().enumerate() {
            self.color_data[i * 4] = color.r;
            self.color_data[i * 4 + 1] = color.g;
            self.color_data[i * 4 + 2] = color.b;
            self.color_data[i * 4 + 3] = color.a;
        }

        Ok(())
    }
}
