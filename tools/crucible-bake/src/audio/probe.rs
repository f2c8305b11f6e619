//! Stream metadata extraction.
//!
//! Converted payloads are described by ffprobe's flat output
//! (`streams.stream.0.sample_rate="44100"`), parsed here as a pure
//! function. WAV sources additionally get their header read at import so
//! unconverted content carries real format metadata from the start.

use std::path::Path;
use std::time::Duration;

use crucible_common::{AudioFormat, format_tag};

/// Numeric facts about the first stream of one probed file.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProbedStream {
    pub sample_rate: u32,
    pub bits_per_sample: u32,
    pub channel_count: u32,
    pub average_bytes_per_second: u32,
    pub duration_seconds: f64,
}

/// Parse `-of flat` ffprobe output for the first stream.
///
/// Unknown keys and unparseable values (ffprobe prints `"N/A"` for facts
/// a codec does not expose) are skipped; missing fields keep their zero
/// defaults.
pub fn parse_ffprobe_flat(output: &str) -> ProbedStream {
    let mut probed = ProbedStream::default();
    for line in output.lines() {
        let Some((key, raw)) = line.split_once('=') else {
            continue;
        };
        let value = raw.trim().trim_matches('"');
        match key {
            "streams.stream.0.sample_rate" => {
                if let Ok(v) = value.parse() {
                    probed.sample_rate = v;
                }
            }
            "streams.stream.0.bits_per_sample" => {
                if let Ok(v) = value.parse() {
                    probed.bits_per_sample = v;
                }
            }
            "streams.stream.0.channels" => {
                if let Ok(v) = value.parse() {
                    probed.channel_count = v;
                }
            }
            "streams.stream.0.bit_rate" => {
                if let Ok(v) = value.parse::<u32>() {
                    probed.average_bytes_per_second = v / 8;
                }
            }
            "streams.stream.0.duration" => {
                if let Ok(v) = value.parse() {
                    probed.duration_seconds = v;
                }
            }
            _ => {}
        }
    }
    probed
}

/// Metadata read from a WAV header.
#[derive(Debug, Clone, Copy)]
pub struct WavInfo {
    pub format: AudioFormat,
    pub duration: Duration,
    /// Sample frames in the data chunk.
    pub sample_frames: u32,
}

/// Read format facts and length from a WAV file's header.
pub fn probe_wav(path: &Path) -> Result<WavInfo, hound::Error> {
    let reader = hound::WavReader::open(path)?;
    let spec = reader.spec();
    let sample_frames = reader.duration();

    let block_align = (spec.bits_per_sample / 8) * spec.channels;
    let format = AudioFormat {
        format_tag: match spec.sample_format {
            hound::SampleFormat::Float => format_tag::IEEE_FLOAT,
            hound::SampleFormat::Int => format_tag::PCM,
        },
        channel_count: spec.channels,
        sample_rate: spec.sample_rate,
        average_bytes_per_second: spec.sample_rate * u32::from(block_align),
        block_align,
        bits_per_sample: spec.bits_per_sample,
    };
    let duration = if spec.sample_rate > 0 {
        Duration::from_secs_f64(f64::from(sample_frames) / f64::from(spec.sample_rate))
    } else {
        Duration::ZERO
    };

    Ok(WavInfo {
        format,
        duration,
        sample_frames,
    })
}
