//! Packed 16-bit dimension scheme and mip chain math.
//!
//! Texture bodies store each dimension as one i32: the padded (storage)
//! size in the low 16 bits and the pre-padding original size in the high
//! 16 bits. A value with an empty high half-word is an unpacked legacy
//! dimension and reads back as both sizes.
//!
//! Dimensions above 65535 do not fit the scheme and wrap silently; 65535
//! is the hard limit of the container, not a validated bound.

/// Pack an original/padded dimension pair into one i32.
pub fn pack_dimension(original: u32, padded: u32) -> i32 {
    (((original & 0xFFFF) << 16) | (padded & 0xFFFF)) as i32
}

/// Unpack an i32 dimension into `(original, padded)`.
///
/// A zero high half-word means the value was written unpacked, so the
/// original size equals the padded size.
pub fn unpack_dimension(packed: i32) -> (u32, u32) {
    let bits = packed as u32;
    let padded = bits & 0xFFFF;
    let original = (bits & 0xFFFF_0000) >> 16;
    if original != 0 {
        (original, padded)
    } else {
        (padded, padded)
    }
}

/// Dimension of a mip level: half per level, floored, never below 1.
pub fn mip_dimension(base: u32, level: u32) -> u32 {
    (base >> level).max(1)
}

/// Number of levels in a full mip chain down to 1x1.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    let largest = width.max(height).max(1);
    32 - largest.leading_zeros()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_unpack_roundtrip() {
        // Everything with a nonzero original inside 16 bits survives
        for (original, padded) in [
            (1u32, 1u32),
            (1, 2),
            (13, 16),
            (640, 1024),
            (65535, 65535),
            (300, 512),
        ] {
            let packed = pack_dimension(original, padded);
            assert_eq!(unpack_dimension(packed), (original, padded));
        }
    }

    #[test]
    fn test_unpack_legacy_plain_value() {
        // High half-word empty: treated as an unpacked dimension
        assert_eq!(unpack_dimension(256), (256, 256));
        assert_eq!(unpack_dimension(65535), (65535, 65535));
    }

    #[test]
    fn test_pack_wraps_past_16_bits() {
        // 70000 & 0xFFFF == 4464: oversized dimensions wrap, by contract
        let packed = pack_dimension(70000, 70000);
        assert_eq!(unpack_dimension(packed), (4464, 4464));
    }

    #[test]
    fn test_mip_dimension() {
        assert_eq!(mip_dimension(256, 0), 256);
        assert_eq!(mip_dimension(256, 3), 32);
        assert_eq!(mip_dimension(5, 1), 2);
        assert_eq!(mip_dimension(5, 2), 1);
        // Clamped at 1 past the chain's end
        assert_eq!(mip_dimension(5, 4), 1);
        assert_eq!(mip_dimension(1, 7), 1);
    }

    #[test]
    fn test_mip_level_count() {
        assert_eq!(mip_level_count(1, 1), 1);
        assert_eq!(mip_level_count(256, 256), 9);
        assert_eq!(mip_level_count(256, 16), 9);
        assert_eq!(mip_level_count(5, 3), 3);
    }
}
