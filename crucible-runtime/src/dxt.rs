//! Software DXT decompression.
//!
//! Used when a container carries block-compressed levels for a device
//! that cannot sample the family; each level expands to RGBA8 at its
//! declared dimensions before upload.
//!
//! Per 4x4 block: DXT1 is two RGB565 endpoints and sixteen 2-bit
//! selectors; DXT3 prepends eight bytes of 4-bit explicit alpha; DXT5
//! prepends two alpha endpoints and sixteen 3-bit selectors. Selector
//! bits run low-to-high in texel row order.

use thiserror::Error;

/// Errors from decompressing a block-compressed level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DxtError {
    /// Level data holds fewer blocks than the dimensions require.
    #[error("compressed level holds {got} bytes, {needed} needed for {width}x{height}")]
    Truncated {
        width: u32,
        height: u32,
        needed: usize,
        got: usize,
    },
}

/// Decompress one DXT1 level.
///
/// Blocks whose first endpoint does not exceed the second are in
/// three-color mode and decode selector 3 as transparent black, which is
/// how 1-bit punch-through alpha is stored.
pub fn decompress_dxt1(data: &[u8], width: u32, height: u32) -> Result<Vec<u8>, DxtError> {
    decompress_level(data, width, height, 8, |block, texels| {
        *texels = decode_color_block(block, false);
    })
}

/// Decompress one DXT3 level. Alpha is explicit, 4 bits per texel.
pub fn decompress_dxt3(data: &[u8], width: u32, height: u32) -> Result<Vec<u8>, DxtError> {
    decompress_level(data, width, height, 16, |block, texels| {
        *texels = decode_color_block(&block[8..], true);
        let alphas = decode_explicit_alpha(block);
        for (texel, alpha) in texels.iter_mut().zip(alphas) {
            texel[3] = alpha;
        }
    })
}

/// Decompress one DXT5 level. Alpha interpolates between two endpoints.
pub fn decompress_dxt5(data: &[u8], width: u32, height: u32) -> Result<Vec<u8>, DxtError> {
    decompress_level(data, width, height, 16, |block, texels| {
        *texels = decode_color_block(&block[8..], true);
        let alphas = decode_interpolated_alpha(block);
        for (texel, alpha) in texels.iter_mut().zip(alphas) {
            texel[3] = alpha;
        }
    })
}

fn decompress_level(
    data: &[u8],
    width: u32,
    height: u32,
    block_bytes: usize,
    decode: impl Fn(&[u8], &mut [[u8; 4]; 16]),
) -> Result<Vec<u8>, DxtError> {
    let blocks_wide = (width as usize).div_ceil(4);
    let blocks_high = (height as usize).div_ceil(4);
    let needed = blocks_wide * blocks_high * block_bytes;
    if data.len() < needed {
        return Err(DxtError::Truncated {
            width,
            height,
            needed,
            got: data.len(),
        });
    }

    let (width, height) = (width as usize, height as usize);
    let mut out = vec![0u8; width * height * 4];
    let mut texels = [[0u8; 4]; 16];
    for (block_index, block) in data[..needed].chunks_exact(block_bytes).enumerate() {
        decode(block, &mut texels);
        let block_x = block_index % blocks_wide;
        let block_y = block_index / blocks_wide;
        for (texel_index, texel) in texels.iter().enumerate() {
            let x = block_x * 4 + texel_index % 4;
            let y = block_y * 4 + texel_index / 4;
            // Edge blocks of narrow levels hang past the image.
            if x >= width || y >= height {
                continue;
            }
            let at = (y * width + x) * 4;
            out[at..at + 4].copy_from_slice(texel);
        }
    }
    Ok(out)
}

/// Expand an RGB565 endpoint to 8-bit channels, replicating high bits.
fn expand_565(color: u16) -> [u8; 3] {
    let r = ((color & 0xF800) >> 8) | ((color & 0xF800) >> 13);
    let g = ((color & 0x07E0) >> 3) | ((color & 0x07E0) >> 9);
    let b = ((color & 0x001F) << 3) | ((color & 0x001F) >> 2);
    [r as u8, g as u8, b as u8]
}

/// Decode the color half of a block into sixteen RGBA texels.
///
/// `force_four_color` is set for DXT3/DXT5, whose color section is always
/// in four-color mode regardless of endpoint order.
fn decode_color_block(block: &[u8], force_four_color: bool) -> [[u8; 4]; 16] {
    let c0 = u16::from_le_bytes([block[0], block[1]]);
    let c1 = u16::from_le_bytes([block[2], block[3]]);
    let selectors = u32::from_le_bytes([block[4], block[5], block[6], block[7]]);

    let [r0, g0, b0] = expand_565(c0);
    let [r1, g1, b1] = expand_565(c1);

    let mut table = [[0u8; 4]; 4];
    table[0] = [r0, g0, b0, 255];
    table[1] = [r1, g1, b1, 255];
    if force_four_color || c0 > c1 {
        table[2] = [
            third(2, r0, r1),
            third(2, g0, g1),
            third(2, b0, b1),
            255,
        ];
        table[3] = [
            third(1, r0, r1),
            third(1, g0, g1),
            third(1, b0, b1),
            255,
        ];
    } else {
        table[2] = [
            midpoint(r0, r1),
            midpoint(g0, g1),
            midpoint(b0, b1),
            255,
        ];
        table[3] = [0, 0, 0, 0];
    }

    let mut texels = [[0u8; 4]; 16];
    for (i, texel) in texels.iter_mut().enumerate() {
        *texel = table[((selectors >> (2 * i)) & 0b11) as usize];
    }
    texels
}

/// `(weight*a + (3-weight)*b) / 3` on one channel.
fn third(weight: u16, a: u8, b: u8) -> u8 {
    ((weight * a as u16 + (3 - weight) * b as u16) / 3) as u8
}

fn midpoint(a: u8, b: u8) -> u8 {
    ((a as u16 + b as u16) / 2) as u8
}

/// Sixteen 4-bit alpha values from the first eight block bytes.
fn decode_explicit_alpha(block: &[u8]) -> [u8; 16] {
    let mut bits = 0u64;
    for (i, byte) in block[..8].iter().enumerate() {
        bits |= (*byte as u64) << (8 * i);
    }

    let mut alphas = [0u8; 16];
    for (i, alpha) in alphas.iter_mut().enumerate() {
        let nibble = ((bits >> (4 * i)) & 0xF) as u8;
        *alpha = (nibble << 4) | nibble;
    }
    alphas
}

/// Sixteen interpolated alpha values from the first eight block bytes.
///
/// Endpoint order picks the table: `a0 > a1` interpolates six steps
/// between the endpoints; otherwise four steps with selectors 6 and 7
/// pinned to fully transparent and fully opaque.
fn decode_interpolated_alpha(block: &[u8]) -> [u8; 16] {
    let a0 = block[0];
    let a1 = block[1];

    let mut table = [0u8; 8];
    table[0] = a0;
    table[1] = a1;
    if a0 > a1 {
        for i in 1..7u16 {
            table[1 + i as usize] = (((7 - i) * a0 as u16 + i * a1 as u16) / 7) as u8;
        }
    } else {
        for i in 1..5u16 {
            table[1 + i as usize] = (((5 - i) * a0 as u16 + i * a1 as u16) / 5) as u8;
        }
        table[6] = 0;
        table[7] = 255;
    }

    let mut bits = 0u64;
    for (i, byte) in block[2..8].iter().enumerate() {
        bits |= (*byte as u64) << (8 * i);
    }

    let mut alphas = [0u8; 16];
    for (i, alpha) in alphas.iter_mut().enumerate() {
        *alpha = table[((bits >> (3 * i)) & 0b111) as usize];
    }
    alphas
}
