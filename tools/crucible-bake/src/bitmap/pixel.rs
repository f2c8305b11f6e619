//! Dense typed pixel storage.

use crucible_common::SurfaceFormat;

use super::{BitmapError, Texel};

/// A rectangular grid of typed pixels in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBitmap<T: Texel> {
    width: u32,
    height: u32,
    pixels: Vec<T>,
}

impl<T: Texel> PixelBitmap<T> {
    /// New bitmap with every pixel at the texel's default value.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![T::default(); width as usize * height as usize],
        }
    }

    /// Wrap an existing pixel vector. Its length must be `width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<T>) -> Result<Self, BitmapError> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(BitmapError::DataSizeMismatch {
                expected,
                got: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> SurfaceFormat {
        T::FORMAT
    }

    pub fn pixel(&self, x: u32, y: u32) -> T {
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, value: T) {
        self.pixels[(y * self.width + x) as usize] = value;
    }

    pub fn pixels(&self) -> &[T] {
        &self.pixels
    }

    pub fn row(&self, y: u32) -> &[T] {
        let start = (y * self.width) as usize;
        &self.pixels[start..start + self.width as usize]
    }

    pub fn row_mut(&mut self, y: u32) -> &mut [T] {
        let start = (y * self.width) as usize;
        &mut self.pixels[start..start + self.width as usize]
    }

    /// Raw pixel bytes in row-major order.
    pub fn pixel_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.pixels).to_vec()
    }

    /// Replace all pixels from raw bytes. Length must match exactly.
    pub fn set_pixel_bytes(&mut self, bytes: &[u8]) -> Result<(), BitmapError> {
        let expected = self.pixels.len() * std::mem::size_of::<T>();
        if bytes.len() != expected {
            return Err(BitmapError::DataSizeMismatch {
                expected,
                got: bytes.len(),
            });
        }
        // pod_collect_to_vec tolerates unaligned input
        self.pixels = bytemuck::pod_collect_to_vec(bytes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec4;

    use super::super::texel::{Bgr565, Color};
    use super::*;

    #[test]
    fn test_new_is_default_filled() {
        let bitmap = PixelBitmap::<Color>::new(4, 2);
        assert_eq!(bitmap.pixels().len(), 8);
        assert!(bitmap.pixels().iter().all(|p| *p == Color::default()));
    }

    #[test]
    fn test_pixel_addressing_is_row_major() {
        let mut bitmap = PixelBitmap::<Color>::new(3, 2);
        bitmap.set_pixel(2, 1, Color::new(1, 2, 3, 4));
        assert_eq!(bitmap.pixels()[5], Color::new(1, 2, 3, 4));
        assert_eq!(bitmap.pixel(2, 1), Color::new(1, 2, 3, 4));
        assert_eq!(bitmap.row(1)[2], Color::new(1, 2, 3, 4));
    }

    #[test]
    fn test_byte_roundtrip() {
        let mut bitmap = PixelBitmap::<Bgr565>::new(2, 2);
        bitmap.set_pixel(0, 0, Bgr565(0xABCD));
        bitmap.set_pixel(1, 1, Bgr565(0x1234));

        let bytes = bitmap.pixel_bytes();
        assert_eq!(bytes.len(), 8);
        // little-endian u16 layout
        assert_eq!(&bytes[0..2], &[0xCD, 0xAB]);

        let mut restored = PixelBitmap::<Bgr565>::new(2, 2);
        restored.set_pixel_bytes(&bytes).unwrap();
        assert_eq!(restored, bitmap);
    }

    #[test]
    fn test_set_pixel_bytes_rejects_bad_length() {
        let mut bitmap = PixelBitmap::<Vec4>::new(2, 2);
        let err = bitmap.set_pixel_bytes(&[0u8; 17]).unwrap_err();
        assert_eq!(
            err,
            BitmapError::DataSizeMismatch {
                expected: 64,
                got: 17
            }
        );
    }

    #[test]
    fn test_from_pixels_length_check() {
        assert!(PixelBitmap::from_pixels(2, 2, vec![Color::default(); 4]).is_ok());
        assert!(PixelBitmap::from_pixels(2, 2, vec![Color::default(); 3]).is_err());
    }
}
