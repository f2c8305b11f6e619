//! Audio content and ffmpeg-backed conversion.
//!
//! [`AudioContent`] is the mutable aggregate a build works on: raw encoded
//! bytes plus the format facts the platform mixer needs. Conversion shells
//! out to ffmpeg for the transcode and then to ffprobe to read the facts
//! back off the encoded result, so the stored metadata always describes
//! the bytes actually written.

mod probe;
pub mod profile;
mod runner;

pub use probe::{ProbedStream, WavInfo, parse_ffprobe_flat, probe_wav};
pub use runner::{SystemToolRunner, ToolError, ToolOutput, ToolRunner};

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

use crucible_common::{AudioFormat, format_tag};

/// Source container of imported audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFileType {
    Wav,
    Mp3,
    Wma,
}

impl AudioFileType {
    /// Detect from a file extension, case-insensitive.
    pub fn from_extension(extension: &str) -> Option<AudioFileType> {
        match extension.to_ascii_lowercase().as_str() {
            "wav" => Some(AudioFileType::Wav),
            "mp3" => Some(AudioFileType::Mp3),
            "wma" => Some(AudioFileType::Wma),
            _ => None,
        }
    }
}

/// Target codec for audio conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ConversionFormat {
    Adpcm,
    Pcm,
    WindowsMedia,
    ImaAdpcm,
    Aac,
    Vorbis,
}

impl ConversionFormat {
    /// ffmpeg encoder name.
    pub fn codec(self) -> &'static str {
        match self {
            ConversionFormat::Adpcm => "adpcm_ms",
            ConversionFormat::Pcm => "pcm_s16le",
            ConversionFormat::WindowsMedia => "wmav2",
            ConversionFormat::ImaAdpcm => "adpcm_ima_wav",
            ConversionFormat::Aac => "aac",
            ConversionFormat::Vorbis => "libvorbis",
        }
    }

    /// ffmpeg muxer for the encoded payload. PCM uses a raw muxer, so its
    /// payload carries no container header at all.
    pub fn muxer(self) -> &'static str {
        match self {
            ConversionFormat::Adpcm => "wav",
            ConversionFormat::Pcm => "s16le",
            ConversionFormat::WindowsMedia => "asf",
            ConversionFormat::ImaAdpcm => "wav",
            ConversionFormat::Aac => "ipod",
            ConversionFormat::Vorbis => "ogg",
        }
    }

    /// Wave format tag carried in the container. Codecs without a wave
    /// tag use 0.
    pub fn format_tag(self) -> u16 {
        match self {
            ConversionFormat::Adpcm => format_tag::ADPCM,
            ConversionFormat::Pcm => format_tag::PCM,
            ConversionFormat::WindowsMedia => format_tag::WMA2,
            ConversionFormat::ImaAdpcm => format_tag::IMA_ADPCM,
            ConversionFormat::Aac | ConversionFormat::Vorbis => 0,
        }
    }

    /// Extension for payloads externalized to a streaming file.
    pub fn file_extension(self) -> &'static str {
        match self {
            ConversionFormat::Adpcm | ConversionFormat::ImaAdpcm => "wav",
            ConversionFormat::Pcm => "pcm",
            ConversionFormat::WindowsMedia => "wma",
            ConversionFormat::Aac => "m4a",
            ConversionFormat::Vorbis => "ogg",
        }
    }

    /// Whether quality steers this codec through its bit rate. The rest
    /// take a retargeted sample rate instead.
    fn bitrate_based(self) -> bool {
        matches!(
            self,
            ConversionFormat::WindowsMedia | ConversionFormat::Aac | ConversionFormat::Vorbis
        )
    }
}

impl fmt::Display for ConversionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConversionFormat::Adpcm => "ADPCM",
            ConversionFormat::Pcm => "PCM",
            ConversionFormat::WindowsMedia => "Windows Media",
            ConversionFormat::ImaAdpcm => "IMA ADPCM",
            ConversionFormat::Aac => "AAC",
            ConversionFormat::Vorbis => "Vorbis",
        };
        f.write_str(name)
    }
}

/// Quality tier for audio conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ConversionQuality {
    Low,
    Medium,
    #[default]
    Best,
}

/// Target bit rate in bits per second for a quality tier.
pub fn quality_to_bit_rate(quality: ConversionQuality) -> u32 {
    match quality {
        ConversionQuality::Low => 96_000,
        ConversionQuality::Medium => 128_000,
        ConversionQuality::Best => 192_000,
    }
}

/// Target sample rate for a quality tier, floored at 8 kHz.
pub fn quality_to_sample_rate(quality: ConversionQuality, source_rate: u32) -> u32 {
    match quality {
        ConversionQuality::Low => (source_rate / 2).max(8000),
        _ => source_rate.max(8000),
    }
}

/// Errors from audio conversion.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio data loaded for {0}")]
    NoData(String),
    #[error(transparent)]
    Tool(#[from] ToolError),
    #[error("{program} exited with code {code}:\n{stdout}\n{stderr}")]
    ToolExit {
        program: &'static str,
        code: i32,
        stdout: String,
        stderr: String,
    },
    #[error("conversion scratch file: {0}")]
    Scratch(#[source] std::io::Error),
    #[error("failed to write {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Imported audio asset flowing through the pipeline.
#[derive(Debug, Clone)]
pub struct AudioContent {
    pub file_name: String,
    pub file_type: AudioFileType,
    /// Encoded payload. None once externalized to a streaming file.
    pub data: Option<Vec<u8>>,
    pub duration: Duration,
    pub format: AudioFormat,
    /// Loop start offset in sample frames.
    pub loop_start: i32,
    /// Loop length in sample frames.
    pub loop_length: i32,
}

impl AudioContent {
    /// Load a source file, reading WAV headers for initial metadata.
    ///
    /// Compressed sources (mp3, wma) keep zeroed metadata until a
    /// conversion fills it in from the encoder output.
    pub fn from_file(path: &Path) -> anyhow::Result<AudioContent> {
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let file_type = AudioFileType::from_extension(extension)
            .ok_or_else(|| anyhow::anyhow!("unrecognized audio extension: {}", path.display()))?;
        let data =
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;

        let mut content = AudioContent {
            file_name: path.display().to_string(),
            file_type,
            data: Some(data),
            duration: Duration::ZERO,
            format: AudioFormat::default(),
            loop_start: 0,
            loop_length: 0,
        };
        if file_type == AudioFileType::Wav {
            let info = probe_wav(path)
                .with_context(|| format!("bad wav header in {}", path.display()))?;
            content.format = info.format;
            content.duration = info.duration;
            content.loop_length = info.sample_frames as i32;
        }
        Ok(content)
    }

    /// Transcode the payload and refresh metadata from ffprobe's view of
    /// the encoded result.
    ///
    /// With `save_to` set, the encoded payload lands there instead of in
    /// memory and `data` is cleared. Scratch files are removed on every
    /// path out of this function, failures included.
    pub fn convert_format(
        &mut self,
        runner: &dyn ToolRunner,
        format: ConversionFormat,
        quality: ConversionQuality,
        save_to: Option<&Path>,
    ) -> Result<(), AudioError> {
        let data = self
            .data
            .as_ref()
            .ok_or_else(|| AudioError::NoData(self.file_name.clone()))?;

        // NamedTempFile deletes on drop, whichever way this exits.
        let source = NamedTempFile::new().map_err(AudioError::Scratch)?;
        let encoded = NamedTempFile::new().map_err(AudioError::Scratch)?;
        std::fs::write(source.path(), data).map_err(AudioError::Scratch)?;

        // Sample rate retargeting applies to codecs whose quality knob is
        // not the bit rate. Compressed sources report no rate until the
        // probe below has run, so theirs passes through unchanged.
        let target_rate = if !format.bitrate_based() && self.format.sample_rate > 0 {
            Some(quality_to_sample_rate(quality, self.format.sample_rate))
        } else {
            None
        };

        let mut args: Vec<String> = vec![
            "-y".into(),
            "-i".into(),
            path_arg(source.path()),
            "-vn".into(),
            "-c:a".into(),
            format.codec().into(),
            "-b:a".into(),
            quality_to_bit_rate(quality).to_string(),
        ];
        if let Some(rate) = target_rate {
            args.push("-ar".into());
            args.push(rate.to_string());
        }
        args.extend([
            "-f:a".into(),
            format.muxer().into(),
            "-strict".into(),
            "experimental".into(),
            path_arg(encoded.path()),
        ]);

        debug!("ffmpeg {}", args.join(" "));
        let ffmpeg = runner.run("ffmpeg", &args)?;
        if !ffmpeg.success() {
            return Err(AudioError::ToolExit {
                program: "ffmpeg",
                code: ffmpeg.exit_code,
                stdout: ffmpeg.stdout,
                stderr: ffmpeg.stderr,
            });
        }

        let raw = std::fs::read(encoded.path()).map_err(AudioError::Scratch)?;
        let probed = self.probe_encoded(runner, format, encoded.path(), target_rate)?;

        if let Some(path) = save_to {
            std::fs::write(path, &raw).map_err(|source| AudioError::WriteOutput {
                path: path.to_path_buf(),
                source,
            })?;
            self.data = None;
        } else {
            self.data = Some(raw);
        }

        // Block alignment is a PCM concept; other codecs leave it zero.
        let block_align = if format == ConversionFormat::Pcm {
            (probed.bits_per_sample / 8) * probed.channel_count
        } else {
            0
        };

        self.duration = Duration::from_secs_f64(probed.duration_seconds.max(0.0));
        self.format = AudioFormat {
            format_tag: format.format_tag(),
            channel_count: probed.channel_count as u16,
            sample_rate: probed.sample_rate,
            average_bytes_per_second: probed.average_bytes_per_second,
            block_align: block_align as u16,
            bits_per_sample: probed.bits_per_sample as u16,
        };

        // Loop defaults cover the whole sound. Codecs with sub-byte
        // samples have no whole-byte frame size; their length stays zero,
        // as does a payload externalized to a file.
        self.loop_start = 0;
        let frame_size = ((probed.bits_per_sample / 8) * probed.channel_count) as usize;
        self.loop_length = match &self.data {
            Some(data) if frame_size > 0 => (data.len() / frame_size) as i32,
            _ => 0,
        };

        Ok(())
    }

    fn probe_encoded(
        &self,
        runner: &dyn ToolRunner,
        format: ConversionFormat,
        encoded: &Path,
        target_rate: Option<u32>,
    ) -> Result<ProbedStream, AudioError> {
        let mut args: Vec<String> = Vec::new();

        // A raw PCM payload has no container for ffprobe to identify.
        // Hand it the demuxer and the stream parameters the transcode
        // pinned down.
        if format == ConversionFormat::Pcm {
            args.extend(["-f".into(), format.muxer().into()]);
            let rate =
                target_rate.or((self.format.sample_rate > 0).then_some(self.format.sample_rate));
            if let Some(rate) = rate {
                args.push("-ar".into());
                args.push(rate.to_string());
            }
            if self.format.channel_count > 0 {
                args.push("-ac".into());
                args.push(self.format.channel_count.to_string());
            }
        }
        args.extend([
            "-i".into(),
            path_arg(encoded),
            "-show_entries".into(),
            "streams".into(),
            "-v".into(),
            "quiet".into(),
            "-of".into(),
            "flat".into(),
        ]);

        debug!("ffprobe {}", args.join(" "));
        let ffprobe = runner.run("ffprobe", &args)?;
        if !ffprobe.success() {
            return Err(AudioError::ToolExit {
                program: "ffprobe",
                code: ffprobe.exit_code,
                stdout: ffprobe.stdout,
                stderr: ffprobe.stderr,
            });
        }
        Ok(parse_ffprobe_flat(&ffprobe.stdout))
    }
}

fn path_arg(path: &Path) -> String {
    path.display().to_string()
}
