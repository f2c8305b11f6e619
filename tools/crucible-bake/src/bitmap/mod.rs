//! In-memory bitmaps for single mip levels.
//!
//! A [`Bitmap`] holds one mip level's pixels in one of the pipeline's
//! storage layouts: typed pixels, packed palette indices, or raw compressed
//! blocks. [`copy`] converts a region between any two bitmaps, going through
//! a float intermediate when no direct path exists. Block formats are opaque
//! here; they are produced by the platform compressors and only support
//! whole-bitmap moves.

mod block;
mod paletted;
mod pixel;
mod texel;

pub use block::BlockBitmap;
pub use paletted::PalettedBitmap;
pub use pixel::PixelBitmap;
pub use texel::{Bgr565, Bgra4444, Bgra5551, Color, Texel};

use std::fmt;

use glam::Vec4;
use thiserror::Error;

use crucible_common::SurfaceFormat;

/// A rectangular area of a bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The full area of a `width x height` bitmap.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    fn fits(&self, width: u32, height: u32) -> bool {
        // u64 sums so oversized coordinates cannot wrap
        self.x as u64 + self.width as u64 <= width as u64
            && self.y as u64 + self.height as u64 <= height as u64
    }

    fn covers(&self, width: u32, height: u32) -> bool {
        self.x == 0 && self.y == 0 && self.width == width && self.height == height
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} at ({}, {})", self.width, self.height, self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BitmapError {
    #[error("bits per index must be 4 or 8, got {0}")]
    InvalidBitsPerIndex(u32),
    #[error("data size mismatch: expected {expected} bytes, got {got}")]
    DataSizeMismatch { expected: usize, got: usize },
    #[error("region {region} out of bounds for a {width}x{height} bitmap")]
    RegionOutOfBounds {
        region: Region,
        width: u32,
        height: u32,
    },
    #[error("no conversion from {from} to {to}")]
    UnsupportedConversion {
        from: SurfaceFormat,
        to: SurfaceFormat,
    },
    #[error("source needs more than {capacity} distinct colors, too many for a {bits}-bit palette")]
    PaletteOverflow { bits: u32, capacity: usize },
    #[error("quantized pixel color missing from its own palette")]
    PaletteInconsistency,
    #[error("{0} is not a block-compressed format")]
    NotBlockFormat(SurfaceFormat),
    #[error("no in-memory pixel bitmap for {0}")]
    NotPixelFormat(SurfaceFormat),
}

/// One mip level's pixel storage.
#[derive(Debug, Clone, PartialEq)]
pub enum Bitmap {
    Color(PixelBitmap<Color>),
    Bgr565(PixelBitmap<Bgr565>),
    Bgra5551(PixelBitmap<Bgra5551>),
    Bgra4444(PixelBitmap<Bgra4444>),
    Vector4(PixelBitmap<Vec4>),
    Paletted(PalettedBitmap),
    Block(BlockBitmap),
}

impl Bitmap {
    /// New zeroed bitmap for a format the pipeline can construct per pixel.
    /// Block-compressed bitmaps come from the compressors instead.
    pub fn new_pixel(
        format: SurfaceFormat,
        width: u32,
        height: u32,
    ) -> Result<Self, BitmapError> {
        match format {
            SurfaceFormat::Color => Ok(Self::Color(PixelBitmap::new(width, height))),
            SurfaceFormat::Bgr565 => Ok(Self::Bgr565(PixelBitmap::new(width, height))),
            SurfaceFormat::Bgra5551 => Ok(Self::Bgra5551(PixelBitmap::new(width, height))),
            SurfaceFormat::Bgra4444 => Ok(Self::Bgra4444(PixelBitmap::new(width, height))),
            SurfaceFormat::Vector4 => Ok(Self::Vector4(PixelBitmap::new(width, height))),
            SurfaceFormat::Paletted4 => Ok(Self::Paletted(PalettedBitmap::new(4, width, height)?)),
            SurfaceFormat::Paletted8 => Ok(Self::Paletted(PalettedBitmap::new(8, width, height)?)),
            other => Err(BitmapError::NotPixelFormat(other)),
        }
    }

    pub fn width(&self) -> u32 {
        match self {
            Bitmap::Color(b) => b.width(),
            Bitmap::Bgr565(b) => b.width(),
            Bitmap::Bgra5551(b) => b.width(),
            Bitmap::Bgra4444(b) => b.width(),
            Bitmap::Vector4(b) => b.width(),
            Bitmap::Paletted(b) => b.width(),
            Bitmap::Block(b) => b.width(),
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            Bitmap::Color(b) => b.height(),
            Bitmap::Bgr565(b) => b.height(),
            Bitmap::Bgra5551(b) => b.height(),
            Bitmap::Bgra4444(b) => b.height(),
            Bitmap::Vector4(b) => b.height(),
            Bitmap::Paletted(b) => b.height(),
            Bitmap::Block(b) => b.height(),
        }
    }

    pub fn format(&self) -> SurfaceFormat {
        match self {
            Bitmap::Color(b) => b.format(),
            Bitmap::Bgr565(b) => b.format(),
            Bitmap::Bgra5551(b) => b.format(),
            Bitmap::Bgra4444(b) => b.format(),
            Bitmap::Vector4(b) => b.format(),
            Bitmap::Paletted(b) => b.format(),
            Bitmap::Block(b) => b.format(),
        }
    }

    /// Raw stored bytes: typed pixels, packed palette indices, or compressed
    /// blocks. A paletted bitmap's color table is not part of its pixel data.
    pub fn pixel_bytes(&self) -> Vec<u8> {
        match self {
            Bitmap::Color(b) => b.pixel_bytes(),
            Bitmap::Bgr565(b) => b.pixel_bytes(),
            Bitmap::Bgra5551(b) => b.pixel_bytes(),
            Bitmap::Bgra4444(b) => b.pixel_bytes(),
            Bitmap::Vector4(b) => b.pixel_bytes(),
            Bitmap::Paletted(b) => b.index_data().to_vec(),
            Bitmap::Block(b) => b.data().to_vec(),
        }
    }

    /// Replace the raw stored bytes. Length must match exactly.
    pub fn set_pixel_bytes(&mut self, bytes: &[u8]) -> Result<(), BitmapError> {
        match self {
            Bitmap::Color(b) => b.set_pixel_bytes(bytes),
            Bitmap::Bgr565(b) => b.set_pixel_bytes(bytes),
            Bitmap::Bgra5551(b) => b.set_pixel_bytes(bytes),
            Bitmap::Bgra4444(b) => b.set_pixel_bytes(bytes),
            Bitmap::Vector4(b) => b.set_pixel_bytes(bytes),
            Bitmap::Paletted(b) => b.set_index_data(bytes),
            Bitmap::Block(b) => b.set_data(bytes),
        }
    }

    /// The whole bitmap as float pixels. `None` for paletted and block
    /// bitmaps, which have no general path out.
    pub fn to_vector4(&self) -> Option<PixelBitmap<Vec4>> {
        region_to_vector4(self, Region::full(self.width(), self.height()))
    }

    /// Convert float pixels into a new bitmap of `format`.
    pub fn from_vector4(
        src: &PixelBitmap<Vec4>,
        format: SurfaceFormat,
    ) -> Result<Self, BitmapError> {
        let mut dest = Self::new_pixel(format, src.width(), src.height())?;
        let full = Region::full(src.width(), src.height());
        match &mut dest {
            Bitmap::Color(d) => convert_region(d, src, full, full),
            Bitmap::Bgr565(d) => convert_region(d, src, full, full),
            Bitmap::Bgra5551(d) => convert_region(d, src, full, full),
            Bitmap::Bgra4444(d) => convert_region(d, src, full, full),
            Bitmap::Vector4(d) => convert_region(d, src, full, full),
            Bitmap::Paletted(d) => d.build_from_vector4(src)?,
            Bitmap::Block(_) => unreachable!("new_pixel never builds block bitmaps"),
        }
        Ok(dest)
    }

    /// Direct copy from `source` into this bitmap.
    ///
    /// `Ok(false)` means this pair of formats and regions has no direct
    /// path and the caller should fall back to [`copy`]'s general path.
    /// `Err` means the pair is supported but the copy itself failed, such
    /// as a palette overflowing its capacity.
    pub fn try_copy_from(
        &mut self,
        source: &Bitmap,
        source_region: Region,
        dest_region: Region,
    ) -> Result<bool, BitmapError> {
        if raw_full_copy(source, source_region, self, dest_region)? {
            return Ok(true);
        }
        match self {
            Bitmap::Color(dest) => Ok(pixel_copy_from(dest, source, source_region, dest_region)),
            Bitmap::Bgr565(dest) => Ok(pixel_copy_from(dest, source, source_region, dest_region)),
            Bitmap::Bgra5551(dest) => Ok(pixel_copy_from(dest, source, source_region, dest_region)),
            Bitmap::Bgra4444(dest) => Ok(pixel_copy_from(dest, source, source_region, dest_region)),
            Bitmap::Vector4(dest) => Ok(pixel_copy_from(dest, source, source_region, dest_region)),
            Bitmap::Paletted(dest) => paletted_copy_from(dest, source, source_region, dest_region),
            Bitmap::Block(_) => Ok(false),
        }
    }

    /// Direct copy from this bitmap into `dest`. Same contract as
    /// [`Bitmap::try_copy_from`].
    pub fn try_copy_to(
        &self,
        dest: &mut Bitmap,
        source_region: Region,
        dest_region: Region,
    ) -> Result<bool, BitmapError> {
        if raw_full_copy(self, source_region, dest, dest_region)? {
            return Ok(true);
        }
        Ok(match self {
            Bitmap::Color(src) => pixel_copy_to(src, dest, source_region, dest_region),
            Bitmap::Bgr565(src) => pixel_copy_to(src, dest, source_region, dest_region),
            Bitmap::Bgra5551(src) => pixel_copy_to(src, dest, source_region, dest_region),
            Bitmap::Bgra4444(src) => pixel_copy_to(src, dest, source_region, dest_region),
            Bitmap::Vector4(src) => pixel_copy_to(src, dest, source_region, dest_region),
            Bitmap::Paletted(_) | Bitmap::Block(_) => false,
        })
    }
}

/// Copy and convert a region between two bitmaps.
///
/// Both bitmaps' direct paths are tried first. The fallback pulls the source
/// region into a float bitmap, resizes it with nearest-neighbor sampling
/// when the regions differ in size, and converts into the destination.
/// Paletted and block sources have no general path out, and paletted
/// destinations only accept whole-bitmap writes.
pub fn copy(
    source: &Bitmap,
    source_region: Region,
    dest: &mut Bitmap,
    dest_region: Region,
) -> Result<(), BitmapError> {
    if !source_region.fits(source.width(), source.height()) {
        return Err(BitmapError::RegionOutOfBounds {
            region: source_region,
            width: source.width(),
            height: source.height(),
        });
    }
    if !dest_region.fits(dest.width(), dest.height()) {
        return Err(BitmapError::RegionOutOfBounds {
            region: dest_region,
            width: dest.width(),
            height: dest.height(),
        });
    }

    if source.try_copy_to(dest, source_region, dest_region)? {
        return Ok(());
    }
    if dest.try_copy_from(source, source_region, dest_region)? {
        return Ok(());
    }

    let from = source.format();
    let to = dest.format();
    let unsupported = || BitmapError::UnsupportedConversion { from, to };

    let mut intermediate = region_to_vector4(source, source_region).ok_or_else(unsupported)?;
    if source_region.width != dest_region.width || source_region.height != dest_region.height {
        intermediate = resize_nearest(&intermediate, dest_region.width, dest_region.height);
    }
    let full = Region::full(intermediate.width(), intermediate.height());
    let intermediate = Bitmap::Vector4(intermediate);
    if dest.try_copy_from(&intermediate, full, dest_region)? {
        return Ok(());
    }
    Err(unsupported())
}

/// Whole-bitmap raw byte move between identical formats. For paletted
/// bitmaps this moves the indices and leaves the destination's color table
/// alone.
fn raw_full_copy(
    source: &Bitmap,
    source_region: Region,
    dest: &mut Bitmap,
    dest_region: Region,
) -> Result<bool, BitmapError> {
    if source.format() == dest.format()
        && source_region.covers(source.width(), source.height())
        && source_region == dest_region
        && dest_region.covers(dest.width(), dest.height())
    {
        let bytes = source.pixel_bytes();
        dest.set_pixel_bytes(&bytes)?;
        return Ok(true);
    }
    Ok(false)
}

/// Conversion from a float source of the same region size.
fn pixel_copy_from<T: Texel>(
    dest: &mut PixelBitmap<T>,
    source: &Bitmap,
    source_region: Region,
    dest_region: Region,
) -> bool {
    if source_region.width != dest_region.width || source_region.height != dest_region.height {
        return false;
    }
    let Bitmap::Vector4(src) = source else {
        return false;
    };
    convert_region(dest, src, source_region, dest_region);
    true
}

fn convert_region<T: Texel>(
    dest: &mut PixelBitmap<T>,
    src: &PixelBitmap<Vec4>,
    source_region: Region,
    dest_region: Region,
) {
    for y in 0..source_region.height {
        for x in 0..source_region.width {
            let v = src.pixel(source_region.x + x, source_region.y + y);
            dest.set_pixel(dest_region.x + x, dest_region.y + y, T::from_vector4(v));
        }
    }
}

/// Conversion into a float destination of the same region size.
fn pixel_copy_to<T: Texel>(
    src: &PixelBitmap<T>,
    dest: &mut Bitmap,
    source_region: Region,
    dest_region: Region,
) -> bool {
    if source_region.width != dest_region.width || source_region.height != dest_region.height {
        return false;
    }
    let Bitmap::Vector4(dst) = dest else {
        return false;
    };
    for y in 0..source_region.height {
        for x in 0..source_region.width {
            let v = src.pixel(source_region.x + x, source_region.y + y).to_vector4();
            dst.set_pixel(dest_region.x + x, dest_region.y + y, v);
        }
    }
    true
}

/// Quantize a float source of matching size into the palette. Subregion
/// destinations are unsupported.
fn paletted_copy_from(
    dest: &mut PalettedBitmap,
    source: &Bitmap,
    source_region: Region,
    dest_region: Region,
) -> Result<bool, BitmapError> {
    if !dest_region.covers(dest.width(), dest.height()) {
        return Ok(false);
    }
    if source_region.width != dest_region.width || source_region.height != dest_region.height {
        return Ok(false);
    }
    let Bitmap::Vector4(src) = source else {
        return Ok(false);
    };
    if source_region.covers(src.width(), src.height()) {
        dest.build_from_vector4(src)?;
    } else {
        let mut cropped = PixelBitmap::<Vec4>::new(source_region.width, source_region.height);
        fill_vector4(&mut cropped, src, source_region);
        dest.build_from_vector4(&cropped)?;
    }
    Ok(true)
}

/// Pull a region of any per-pixel bitmap into a float bitmap. `None` for
/// paletted and block sources.
fn region_to_vector4(source: &Bitmap, region: Region) -> Option<PixelBitmap<Vec4>> {
    let mut out = PixelBitmap::<Vec4>::new(region.width, region.height);
    match source {
        Bitmap::Color(b) => fill_vector4(&mut out, b, region),
        Bitmap::Bgr565(b) => fill_vector4(&mut out, b, region),
        Bitmap::Bgra5551(b) => fill_vector4(&mut out, b, region),
        Bitmap::Bgra4444(b) => fill_vector4(&mut out, b, region),
        Bitmap::Vector4(b) => fill_vector4(&mut out, b, region),
        Bitmap::Paletted(_) | Bitmap::Block(_) => return None,
    }
    Some(out)
}

fn fill_vector4<T: Texel>(out: &mut PixelBitmap<Vec4>, src: &PixelBitmap<T>, region: Region) {
    for y in 0..region.height {
        for x in 0..region.width {
            out.set_pixel(x, y, src.pixel(region.x + x, region.y + y).to_vector4());
        }
    }
}

/// Nearest-neighbor resample for the general conversion path.
fn resize_nearest(src: &PixelBitmap<Vec4>, width: u32, height: u32) -> PixelBitmap<Vec4> {
    let mut out = PixelBitmap::new(width, height);
    if src.width() == 0 || src.height() == 0 {
        return out;
    }
    for y in 0..height {
        let sy = (y as u64 * src.height() as u64 / height as u64) as u32;
        for x in 0..width {
            let sx = (x as u64 * src.width() as u64 / width as u64) as u32;
            out.set_pixel(x, y, src.pixel(sx, sy));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color_bitmap(width: u32, height: u32, fill: impl Fn(u32, u32) -> Color) -> Bitmap {
        let mut bitmap = PixelBitmap::<Color>::new(width, height);
        for y in 0..height {
            for x in 0..width {
                bitmap.set_pixel(x, y, fill(x, y));
            }
        }
        Bitmap::Color(bitmap)
    }

    fn pixel_at(bitmap: &Bitmap, x: u32, y: u32) -> Color {
        match bitmap {
            Bitmap::Color(b) => b.pixel(x, y),
            _ => panic!("expected a Color bitmap"),
        }
    }

    #[test]
    fn test_full_copy_same_format() {
        let source = color_bitmap(4, 4, |x, y| Color::new(x as u8, y as u8, 0, 255));
        let mut dest = Bitmap::new_pixel(SurfaceFormat::Color, 4, 4).unwrap();

        copy(&source, Region::full(4, 4), &mut dest, Region::full(4, 4)).unwrap();
        assert_eq!(dest.pixel_bytes(), source.pixel_bytes());
    }

    #[test]
    fn test_copy_converts_between_pixel_formats() {
        let source = color_bitmap(2, 2, |_, _| Color::new(255, 0, 0, 255));
        let mut dest = Bitmap::new_pixel(SurfaceFormat::Bgr565, 2, 2).unwrap();

        copy(&source, Region::full(2, 2), &mut dest, Region::full(2, 2)).unwrap();
        match &dest {
            Bitmap::Bgr565(b) => assert_eq!(b.pixel(0, 0).0, 0x1F << 11),
            _ => panic!("format changed"),
        }
    }

    #[test]
    fn test_copy_subregion_between_same_formats() {
        let source = color_bitmap(4, 4, |x, y| Color::new((x + 4 * y) as u8, 0, 0, 255));
        let mut dest = Bitmap::new_pixel(SurfaceFormat::Color, 2, 2).unwrap();

        copy(
            &source,
            Region::new(1, 1, 2, 2),
            &mut dest,
            Region::full(2, 2),
        )
        .unwrap();

        assert_eq!(pixel_at(&dest, 0, 0).r, 5);
        assert_eq!(pixel_at(&dest, 1, 0).r, 6);
        assert_eq!(pixel_at(&dest, 0, 1).r, 9);
        assert_eq!(pixel_at(&dest, 1, 1).r, 10);
    }

    #[test]
    fn test_copy_resizes_with_nearest_sampling() {
        // 2x2 quadrant colors scaled up to 4x4 keep hard edges
        let source = color_bitmap(2, 2, |x, y| Color::new((x * 100) as u8, (y * 100) as u8, 0, 255));
        let mut dest = Bitmap::new_pixel(SurfaceFormat::Color, 4, 4).unwrap();

        copy(&source, Region::full(2, 2), &mut dest, Region::full(4, 4)).unwrap();

        assert_eq!(pixel_at(&dest, 0, 0), Color::new(0, 0, 0, 255));
        assert_eq!(pixel_at(&dest, 3, 0), Color::new(100, 0, 0, 255));
        assert_eq!(pixel_at(&dest, 0, 3), Color::new(0, 100, 0, 255));
        assert_eq!(pixel_at(&dest, 3, 3), Color::new(100, 100, 0, 255));
    }

    #[test]
    fn test_copy_region_out_of_bounds() {
        let source = color_bitmap(2, 2, |_, _| Color::default());
        let mut dest = Bitmap::new_pixel(SurfaceFormat::Color, 2, 2).unwrap();

        let err = copy(
            &source,
            Region::new(1, 1, 2, 2),
            &mut dest,
            Region::full(2, 2),
        )
        .unwrap_err();
        assert!(matches!(err, BitmapError::RegionOutOfBounds { .. }));
    }

    #[test]
    fn test_copy_color_source_into_paletted() {
        // A non-float source reaches the paletted builder through the
        // float intermediate
        let source = color_bitmap(4, 4, |x, _| Color::new(x as u8, 0, 0, 255));
        let mut dest = Bitmap::new_pixel(SurfaceFormat::Paletted8, 4, 4).unwrap();

        copy(&source, Region::full(4, 4), &mut dest, Region::full(4, 4)).unwrap();

        match &dest {
            Bitmap::Paletted(p) => {
                assert_eq!(p.colors()[p.index_at(0) as usize], Color::new(0, 0, 0, 255));
                assert_eq!(p.colors()[p.index_at(3) as usize], Color::new(3, 0, 0, 255));
            }
            _ => panic!("format changed"),
        }
    }

    #[test]
    fn test_copy_palette_overflow_is_an_error() {
        let source = color_bitmap(16, 16, |x, y| Color::new(x as u8, y as u8, 0, 255));
        let mut dest = Bitmap::new_pixel(SurfaceFormat::Paletted8, 16, 16).unwrap();

        let err = copy(&source, Region::full(16, 16), &mut dest, Region::full(16, 16)).unwrap_err();
        assert_eq!(
            err,
            BitmapError::PaletteOverflow {
                bits: 8,
                capacity: 255
            }
        );
    }

    #[test]
    fn test_copy_into_paletted_subregion_is_unsupported() {
        let source = color_bitmap(2, 2, |_, _| Color::default());
        let mut dest = Bitmap::new_pixel(SurfaceFormat::Paletted8, 4, 4).unwrap();

        let err = copy(
            &source,
            Region::full(2, 2),
            &mut dest,
            Region::new(0, 0, 2, 2),
        )
        .unwrap_err();
        assert_eq!(
            err,
            BitmapError::UnsupportedConversion {
                from: SurfaceFormat::Color,
                to: SurfaceFormat::Paletted8
            }
        );
    }

    #[test]
    fn test_copy_out_of_block_format_is_unsupported() {
        let source = Bitmap::Block(BlockBitmap::new(SurfaceFormat::Dxt1, 4, 4).unwrap());
        let mut dest = Bitmap::new_pixel(SurfaceFormat::Color, 4, 4).unwrap();

        let err = copy(&source, Region::full(4, 4), &mut dest, Region::full(4, 4)).unwrap_err();
        assert_eq!(
            err,
            BitmapError::UnsupportedConversion {
                from: SurfaceFormat::Dxt1,
                to: SurfaceFormat::Color
            }
        );
    }

    #[test]
    fn test_full_copy_between_block_bitmaps_moves_raw_blocks() {
        let blocks = vec![0x5A; 8];
        let source =
            Bitmap::Block(BlockBitmap::from_data(SurfaceFormat::Dxt1, 4, 4, blocks).unwrap());
        let mut dest = Bitmap::Block(BlockBitmap::new(SurfaceFormat::Dxt1, 4, 4).unwrap());

        copy(&source, Region::full(4, 4), &mut dest, Region::full(4, 4)).unwrap();
        assert_eq!(dest.pixel_bytes(), vec![0x5A; 8]);
    }

    #[test]
    fn test_full_copy_between_paletted_bitmaps_keeps_dest_palette() {
        let red = color_bitmap(2, 2, |_, _| Color::new(255, 0, 0, 255));
        let green = color_bitmap(2, 2, |_, _| Color::new(0, 255, 0, 255));

        let mut source = Bitmap::new_pixel(SurfaceFormat::Paletted8, 2, 2).unwrap();
        copy(&red, Region::full(2, 2), &mut source, Region::full(2, 2)).unwrap();
        let mut dest = Bitmap::new_pixel(SurfaceFormat::Paletted8, 2, 2).unwrap();
        copy(&green, Region::full(2, 2), &mut dest, Region::full(2, 2)).unwrap();

        // The whole-bitmap paletted copy moves indices, not the color table
        copy(&source, Region::full(2, 2), &mut dest, Region::full(2, 2)).unwrap();
        match &dest {
            Bitmap::Paletted(p) => {
                assert_eq!(p.colors()[0], Color::new(0, 255, 0, 255));
            }
            _ => panic!("format changed"),
        }
    }
}
