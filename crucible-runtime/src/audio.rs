//! Audio body deserialization.
//!
//! An audio body is the wave format block, the encoded payload, and loop
//! metadata. A zero-length payload marks a streaming sound whose encoded
//! data lives in a sidecar file next to the container.

use std::time::Duration;

use thiserror::Error;

use crucible_common::AudioFormat;

use crate::cursor::Cursor;

/// Errors from deserializing an audio body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AudioReadError {
    /// Body ended before the named field or block.
    #[error("audio body truncated reading the {0}")]
    Truncated(&'static str),
    /// Declared wave format block is smaller than the fixed fields.
    #[error("wave format block of {0} bytes is too small")]
    FormatBlockTooShort(u32),
    /// Bytes left over after the loop metadata.
    #[error("{0} trailing bytes after the audio body")]
    TrailingBytes(usize),
}

/// A loaded sound: wave format, encoded payload, and loop metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundData {
    pub format: AudioFormat,
    pub data: Vec<u8>,
    /// First sample frame of the loop region.
    pub loop_start: i32,
    /// Loop region length in sample frames.
    pub loop_length: i32,
    pub duration: Duration,
}

impl SoundData {
    /// True when the payload was externalized for streaming.
    pub fn is_streaming(&self) -> bool {
        self.data.is_empty()
    }
}

/// Deserialize an audio body.
///
/// The wave format block may be longer than its fixed fields; the excess
/// holds codec-private data and is skipped.
pub fn read_sound(body: &[u8]) -> Result<SoundData, AudioReadError> {
    let mut cursor = Cursor::new(body);

    let format_len = cursor
        .u32_le()
        .ok_or(AudioReadError::Truncated("format block length"))?;
    if (format_len as usize) < AudioFormat::SIZE {
        return Err(AudioReadError::FormatBlockTooShort(format_len));
    }
    let block = cursor
        .take(format_len as usize)
        .ok_or(AudioReadError::Truncated("format block"))?;
    let format =
        AudioFormat::from_bytes(block).ok_or(AudioReadError::FormatBlockTooShort(format_len))?;

    let payload_len = cursor
        .u32_le()
        .ok_or(AudioReadError::Truncated("payload length"))?;
    let data = cursor
        .take(payload_len as usize)
        .ok_or(AudioReadError::Truncated("payload"))?
        .to_vec();

    let loop_start = cursor
        .i32_le()
        .ok_or(AudioReadError::Truncated("loop start"))?;
    let loop_length = cursor
        .i32_le()
        .ok_or(AudioReadError::Truncated("loop length"))?;
    let millis = cursor
        .i32_le()
        .ok_or(AudioReadError::Truncated("duration"))?;

    if cursor.remaining() != 0 {
        return Err(AudioReadError::TrailingBytes(cursor.remaining()));
    }

    Ok(SoundData {
        format,
        data,
        loop_start,
        loop_length,
        duration: Duration::from_millis(millis.max(0) as u64),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use crucible_common::format_tag;

    fn pcm_format() -> AudioFormat {
        AudioFormat {
            format_tag: format_tag::PCM,
            channel_count: 2,
            sample_rate: 44100,
            average_bytes_per_second: 176_400,
            block_align: 4,
            bits_per_sample: 16,
        }
    }

    fn sound_body(
        format: &AudioFormat,
        payload: &[u8],
        loop_start: i32,
        loop_length: i32,
        millis: i32,
    ) -> Vec<u8> {
        let mut body = Vec::new();
        let block = format.to_bytes();
        body.extend_from_slice(&(block.len() as u32).to_le_bytes());
        body.extend_from_slice(&block);
        body.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        body.extend_from_slice(payload);
        body.extend_from_slice(&loop_start.to_le_bytes());
        body.extend_from_slice(&loop_length.to_le_bytes());
        body.extend_from_slice(&millis.to_le_bytes());
        body
    }

    #[test]
    fn test_reads_pcm_sound() {
        let body = sound_body(&pcm_format(), &[1, 2, 3, 4], 0, 22050, 1500);

        let sound = read_sound(&body).unwrap();
        assert_eq!(sound.format, pcm_format());
        assert_eq!(sound.data, vec![1, 2, 3, 4]);
        assert_eq!(sound.loop_start, 0);
        assert_eq!(sound.loop_length, 22050);
        assert_eq!(sound.duration, Duration::from_millis(1500));
        assert!(!sound.is_streaming());
    }

    #[test]
    fn test_zero_payload_is_streaming() {
        let body = sound_body(&pcm_format(), &[], 0, 0, 90_000);

        let sound = read_sound(&body).unwrap();
        assert!(sound.is_streaming());
        assert_eq!(sound.duration, Duration::from_millis(90_000));
    }

    #[test]
    fn test_oversized_format_block_skips_codec_private_data() {
        let mut body = Vec::new();
        let block = pcm_format().to_bytes();
        body.extend_from_slice(&((block.len() + 6) as u32).to_le_bytes());
        body.extend_from_slice(&block);
        body.extend_from_slice(&[0xAA; 6]);
        body.extend_from_slice(&0u32.to_le_bytes());
        body.extend_from_slice(&0i32.to_le_bytes());
        body.extend_from_slice(&0i32.to_le_bytes());
        body.extend_from_slice(&250i32.to_le_bytes());

        let sound = read_sound(&body).unwrap();
        assert_eq!(sound.format, pcm_format());
    }

    #[test]
    fn test_rejects_short_format_block() {
        let mut body = Vec::new();
        body.extend_from_slice(&10u32.to_le_bytes());
        body.extend_from_slice(&[0u8; 10]);

        assert_eq!(read_sound(&body), Err(AudioReadError::FormatBlockTooShort(10)));
    }

    #[test]
    fn test_rejects_truncated_payload() {
        let mut body = sound_body(&pcm_format(), &[5; 16], 0, 0, 100);
        body.truncate(body.len() - 13);

        assert_eq!(read_sound(&body), Err(AudioReadError::Truncated("payload")));
    }

    #[test]
    fn test_rejects_trailing_bytes() {
        let mut body = sound_body(&pcm_format(), &[5; 16], 0, 0, 100);
        body.extend_from_slice(&[0; 2]);

        assert_eq!(read_sound(&body), Err(AudioReadError::TrailingBytes(2)));
    }

    #[test]
    fn test_negative_duration_clamps_to_zero() {
        let body = sound_body(&pcm_format(), &[], 0, 0, -5);

        let sound = read_sound(&body).unwrap();
        assert_eq!(sound.duration, Duration::ZERO);
    }
}
