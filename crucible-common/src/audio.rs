//! Wave format block shared by the compiler and the loader.
//!
//! Audio bodies carry an 18-byte format block in classic WAVEFORMATEX
//! order, so platform mixers can consume it without translation.
//!
//! # Layout
//! ```text
//! 0x00: format_tag u16 LE
//! 0x02: channel_count u16 LE
//! 0x04: sample_rate u32 LE
//! 0x08: average_bytes_per_second u32 LE
//! 0x0C: block_align u16 LE
//! 0x0E: bits_per_sample u16 LE
//! 0x10: extra data size u16 LE (always 0)
//! ```

/// Known wave format tags.
pub mod format_tag {
    /// Uncompressed PCM.
    pub const PCM: u16 = 0x0001;
    /// Microsoft ADPCM.
    pub const ADPCM: u16 = 0x0002;
    /// 32-bit float PCM. Seen in source WAV files, never in baked output.
    pub const IEEE_FLOAT: u16 = 0x0003;
    /// IMA ADPCM.
    pub const IMA_ADPCM: u16 = 0x0011;
    /// Windows Media Audio 2.
    pub const WMA2: u16 = 0x0161;
}

/// Processing format of audio data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AudioFormat {
    /// Wave format tag. Codecs without a wave tag use 0.
    pub format_tag: u16,
    pub channel_count: u16,
    pub sample_rate: u32,
    pub average_bytes_per_second: u32,
    /// Bytes per sample frame. Meaningful for PCM only; 0 otherwise.
    pub block_align: u16,
    pub bits_per_sample: u16,
}

impl AudioFormat {
    pub const SIZE: usize = 18;

    /// Write the format block to bytes.
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..2].copy_from_slice(&self.format_tag.to_le_bytes());
        bytes[2..4].copy_from_slice(&self.channel_count.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.sample_rate.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.average_bytes_per_second.to_le_bytes());
        bytes[12..14].copy_from_slice(&self.block_align.to_le_bytes());
        bytes[14..16].copy_from_slice(&self.bits_per_sample.to_le_bytes());
        // extra data size stays 0
        bytes
    }

    /// Read a format block from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(Self {
            format_tag: u16::from_le_bytes([bytes[0], bytes[1]]),
            channel_count: u16::from_le_bytes([bytes[2], bytes[3]]),
            sample_rate: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            average_bytes_per_second: u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
            block_align: u16::from_le_bytes([bytes[12], bytes[13]]),
            bits_per_sample: u16::from_le_bytes([bytes[14], bytes[15]]),
        })
    }

    /// Whether the format is uncompressed PCM.
    pub fn is_pcm(&self) -> bool {
        self.format_tag == format_tag::PCM
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_block_size() {
        assert_eq!(AudioFormat::SIZE, 18);
    }

    #[test]
    fn test_format_roundtrip() {
        let format = AudioFormat {
            format_tag: format_tag::PCM,
            channel_count: 2,
            sample_rate: 44100,
            average_bytes_per_second: 176400,
            block_align: 4,
            bits_per_sample: 16,
        };
        let parsed = AudioFormat::from_bytes(&format.to_bytes()).unwrap();
        assert_eq!(parsed, format);
        assert!(parsed.is_pcm());
    }

    #[test]
    fn test_format_layout() {
        let format = AudioFormat {
            format_tag: format_tag::ADPCM,
            channel_count: 1,
            sample_rate: 22050,
            average_bytes_per_second: 11155,
            block_align: 512,
            bits_per_sample: 4,
        };
        let bytes = format.to_bytes();
        assert_eq!(&bytes[0..2], &[0x02, 0x00]);
        assert_eq!(&bytes[4..8], &22050u32.to_le_bytes());
        // trailing extra-data size is always zero
        assert_eq!(&bytes[16..18], &[0x00, 0x00]);
    }

    #[test]
    fn test_format_too_short() {
        assert!(AudioFormat::from_bytes(&[0u8; 17]).is_none());
    }
}
