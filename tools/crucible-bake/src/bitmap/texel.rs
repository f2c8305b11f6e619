//! Typed pixels held by [`PixelBitmap`](super::PixelBitmap).
//!
//! Every texel knows its surface format and converts to and from a
//! 4-channel float through [`glam::Vec4`]. The float-to-byte quantization
//! in [`Color::from_vector4`] truncates rather than rounds; the paletted
//! conversion depends on that exact behavior, so it must not change.

use bytemuck::{Pod, Zeroable};
use glam::Vec4;

use crucible_common::SurfaceFormat;

use super::{Bitmap, PixelBitmap};

/// A fixed-layout pixel type.
pub trait Texel: Copy + Default + PartialEq + Pod + 'static {
    /// Surface format of bitmaps holding this texel.
    const FORMAT: SurfaceFormat;

    fn to_vector4(self) -> Vec4;
    fn from_vector4(v: Vec4) -> Self;

    /// View a bitmap as this texel's variant, if it is one.
    fn bitmap_ref(bitmap: &Bitmap) -> Option<&PixelBitmap<Self>>;
    /// Mutable counterpart of [`Texel::bitmap_ref`].
    fn bitmap_mut(bitmap: &mut Bitmap) -> Option<&mut PixelBitmap<Self>>;
}

/// 32-bit RGBA pixel, 8 bits per channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Texel for Color {
    const FORMAT: SurfaceFormat = SurfaceFormat::Color;

    fn to_vector4(self) -> Vec4 {
        Vec4::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        )
    }

    // Truncating cast, not rounding: 0.999 * 255 quantizes to 254.
    fn from_vector4(v: Vec4) -> Self {
        Self {
            r: (v.x * 255.0).clamp(0.0, 255.0) as u8,
            g: (v.y * 255.0).clamp(0.0, 255.0) as u8,
            b: (v.z * 255.0).clamp(0.0, 255.0) as u8,
            a: (v.w * 255.0).clamp(0.0, 255.0) as u8,
        }
    }

    fn bitmap_ref(bitmap: &Bitmap) -> Option<&PixelBitmap<Self>> {
        match bitmap {
            Bitmap::Color(b) => Some(b),
            _ => None,
        }
    }

    fn bitmap_mut(bitmap: &mut Bitmap) -> Option<&mut PixelBitmap<Self>> {
        match bitmap {
            Bitmap::Color(b) => Some(b),
            _ => None,
        }
    }
}

impl Texel for Vec4 {
    const FORMAT: SurfaceFormat = SurfaceFormat::Vector4;

    fn to_vector4(self) -> Vec4 {
        self
    }

    fn from_vector4(v: Vec4) -> Self {
        v
    }

    fn bitmap_ref(bitmap: &Bitmap) -> Option<&PixelBitmap<Self>> {
        match bitmap {
            Bitmap::Vector4(b) => Some(b),
            _ => None,
        }
    }

    fn bitmap_mut(bitmap: &mut Bitmap) -> Option<&mut PixelBitmap<Self>> {
        match bitmap {
            Bitmap::Vector4(b) => Some(b),
            _ => None,
        }
    }
}

/// 16-bit RGB pixel: red in bits 11-15, green in 5-10, blue in 0-4.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
#[repr(transparent)]
pub struct Bgr565(pub u16);

impl Texel for Bgr565 {
    const FORMAT: SurfaceFormat = SurfaceFormat::Bgr565;

    fn to_vector4(self) -> Vec4 {
        let bits = self.0;
        Vec4::new(
            ((bits >> 11) & 0x1F) as f32 / 31.0,
            ((bits >> 5) & 0x3F) as f32 / 63.0,
            (bits & 0x1F) as f32 / 31.0,
            1.0,
        )
    }

    fn from_vector4(v: Vec4) -> Self {
        let r = (v.x.clamp(0.0, 1.0) * 31.0).round() as u16;
        let g = (v.y.clamp(0.0, 1.0) * 63.0).round() as u16;
        let b = (v.z.clamp(0.0, 1.0) * 31.0).round() as u16;
        Self((r << 11) | (g << 5) | b)
    }

    fn bitmap_ref(bitmap: &Bitmap) -> Option<&PixelBitmap<Self>> {
        match bitmap {
            Bitmap::Bgr565(b) => Some(b),
            _ => None,
        }
    }

    fn bitmap_mut(bitmap: &mut Bitmap) -> Option<&mut PixelBitmap<Self>> {
        match bitmap {
            Bitmap::Bgr565(b) => Some(b),
            _ => None,
        }
    }
}

/// 16-bit RGBA pixel: alpha in bit 15, red in 10-14, green in 5-9, blue in 0-4.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
#[repr(transparent)]
pub struct Bgra5551(pub u16);

impl Texel for Bgra5551 {
    const FORMAT: SurfaceFormat = SurfaceFormat::Bgra5551;

    fn to_vector4(self) -> Vec4 {
        let bits = self.0;
        Vec4::new(
            ((bits >> 10) & 0x1F) as f32 / 31.0,
            ((bits >> 5) & 0x1F) as f32 / 31.0,
            (bits & 0x1F) as f32 / 31.0,
            ((bits >> 15) & 0x1) as f32,
        )
    }

    fn from_vector4(v: Vec4) -> Self {
        let r = (v.x.clamp(0.0, 1.0) * 31.0).round() as u16;
        let g = (v.y.clamp(0.0, 1.0) * 31.0).round() as u16;
        let b = (v.z.clamp(0.0, 1.0) * 31.0).round() as u16;
        let a = v.w.clamp(0.0, 1.0).round() as u16;
        Self((a << 15) | (r << 10) | (g << 5) | b)
    }

    fn bitmap_ref(bitmap: &Bitmap) -> Option<&PixelBitmap<Self>> {
        match bitmap {
            Bitmap::Bgra5551(b) => Some(b),
            _ => None,
        }
    }

    fn bitmap_mut(bitmap: &mut Bitmap) -> Option<&mut PixelBitmap<Self>> {
        match bitmap {
            Bitmap::Bgra5551(b) => Some(b),
            _ => None,
        }
    }
}

/// 16-bit RGBA pixel, 4 bits per channel: alpha in bits 12-15, red in 8-11,
/// green in 4-7, blue in 0-3.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
#[repr(transparent)]
pub struct Bgra4444(pub u16);

impl Texel for Bgra4444 {
    const FORMAT: SurfaceFormat = SurfaceFormat::Bgra4444;

    fn to_vector4(self) -> Vec4 {
        let bits = self.0;
        Vec4::new(
            ((bits >> 8) & 0xF) as f32 / 15.0,
            ((bits >> 4) & 0xF) as f32 / 15.0,
            (bits & 0xF) as f32 / 15.0,
            ((bits >> 12) & 0xF) as f32 / 15.0,
        )
    }

    fn from_vector4(v: Vec4) -> Self {
        let r = (v.x.clamp(0.0, 1.0) * 15.0).round() as u16;
        let g = (v.y.clamp(0.0, 1.0) * 15.0).round() as u16;
        let b = (v.z.clamp(0.0, 1.0) * 15.0).round() as u16;
        let a = (v.w.clamp(0.0, 1.0) * 15.0).round() as u16;
        Self((a << 12) | (r << 8) | (g << 4) | b)
    }

    fn bitmap_ref(bitmap: &Bitmap) -> Option<&PixelBitmap<Self>> {
        match bitmap {
            Bitmap::Bgra4444(b) => Some(b),
            _ => None,
        }
    }

    fn bitmap_mut(bitmap: &mut Bitmap) -> Option<&mut PixelBitmap<Self>> {
        match bitmap {
            Bitmap::Bgra4444(b) => Some(b),
            _ => None,
        }
    }
}
