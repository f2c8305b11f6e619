//! Per-platform audio conversion policy.
//!
//! An [`AudioProfile`] decides which codec an asset gets on a target
//! platform: the in-memory codec for sound effects and the streaming
//! codec for music externalized next to the compiled container. Profiles
//! live in an [`AudioProfileRegistry`] populated by explicit
//! registration, same as the texture side.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crucible_common::TargetPlatform;

use super::{AudioContent, AudioError, ConversionFormat, ConversionQuality, ToolRunner};

/// Errors from audio profile dispatch.
#[derive(Debug, Error)]
pub enum AudioProfileError {
    #[error("no audio profile supports the {0} platform")]
    NoProfile(TargetPlatform),
    #[error("the {platform} platform cannot play {format} audio")]
    UnsupportedFormat {
        platform: TargetPlatform,
        format: ConversionFormat,
    },
    #[error(transparent)]
    Audio(#[from] AudioError),
}

/// Platform policy for audio conversion.
pub trait AudioProfile {
    /// Whether this profile handles the given platform.
    fn supports(&self, platform: TargetPlatform) -> bool;

    /// Codecs the platform's runtime can decode.
    fn supported_formats(&self, platform: TargetPlatform) -> &'static [ConversionFormat];

    /// Codec used when a payload is externalized for streaming.
    fn streaming_format(&self) -> ConversionFormat;

    /// In-memory codec for a quality tier when the build names none.
    /// Best keeps uncompressed samples; the lower tiers trade fidelity
    /// for a quarter of the memory.
    fn default_format(&self, quality: ConversionQuality) -> ConversionFormat {
        match quality {
            ConversionQuality::Best => ConversionFormat::Pcm,
            _ => ConversionFormat::Adpcm,
        }
    }

    /// Convert in place for in-memory playback.
    ///
    /// A requested codec the platform cannot decode is a build error, not
    /// a fallback.
    fn convert_audio(
        &self,
        runner: &dyn ToolRunner,
        platform: TargetPlatform,
        content: &mut AudioContent,
        quality: ConversionQuality,
        requested: Option<ConversionFormat>,
    ) -> Result<ConversionFormat, AudioProfileError> {
        let format = requested.unwrap_or_else(|| self.default_format(quality));
        if !self.supported_formats(platform).contains(&format) {
            return Err(AudioProfileError::UnsupportedFormat { platform, format });
        }
        content.convert_format(runner, format, quality, None)?;
        Ok(format)
    }

    /// Convert to an external streaming file next to `output_stem`,
    /// clearing the in-memory payload. Returns the written path.
    fn convert_streaming_audio(
        &self,
        runner: &dyn ToolRunner,
        content: &mut AudioContent,
        quality: ConversionQuality,
        output_stem: &Path,
    ) -> Result<PathBuf, AudioProfileError> {
        let format = self.streaming_format();
        let path = output_stem.with_extension(format.file_extension());
        content.convert_format(runner, format, quality, Some(&path))?;
        Ok(path)
    }
}

/// Desktop targets decode the wav family plus Vorbis; Windows alone
/// still ships WMA.
pub struct DesktopAudioProfile;

impl AudioProfile for DesktopAudioProfile {
    fn supports(&self, platform: TargetPlatform) -> bool {
        matches!(
            platform,
            TargetPlatform::Windows | TargetPlatform::DesktopGl | TargetPlatform::MacOs
        )
    }

    fn supported_formats(&self, platform: TargetPlatform) -> &'static [ConversionFormat] {
        if platform == TargetPlatform::Windows {
            &[
                ConversionFormat::Pcm,
                ConversionFormat::Adpcm,
                ConversionFormat::ImaAdpcm,
                ConversionFormat::WindowsMedia,
                ConversionFormat::Vorbis,
            ]
        } else {
            &[
                ConversionFormat::Pcm,
                ConversionFormat::Adpcm,
                ConversionFormat::ImaAdpcm,
                ConversionFormat::Vorbis,
            ]
        }
    }

    fn streaming_format(&self) -> ConversionFormat {
        ConversionFormat::Vorbis
    }
}

/// Mobile targets stream AAC through their system decoders.
pub struct MobileAudioProfile;

impl AudioProfile for MobileAudioProfile {
    fn supports(&self, platform: TargetPlatform) -> bool {
        matches!(
            platform,
            TargetPlatform::Android | TargetPlatform::Ios | TargetPlatform::Web
        )
    }

    fn supported_formats(&self, _platform: TargetPlatform) -> &'static [ConversionFormat] {
        &[
            ConversionFormat::Pcm,
            ConversionFormat::Adpcm,
            ConversionFormat::ImaAdpcm,
            ConversionFormat::Aac,
        ]
    }

    fn streaming_format(&self) -> ConversionFormat {
        ConversionFormat::Aac
    }
}

/// The handheld mixer decodes the wav family and Vorbis in software.
pub struct HandheldAudioProfile;

impl AudioProfile for HandheldAudioProfile {
    fn supports(&self, platform: TargetPlatform) -> bool {
        platform == TargetPlatform::Handheld
    }

    fn supported_formats(&self, _platform: TargetPlatform) -> &'static [ConversionFormat] {
        &[
            ConversionFormat::Pcm,
            ConversionFormat::Adpcm,
            ConversionFormat::ImaAdpcm,
            ConversionFormat::Vorbis,
        ]
    }

    fn streaming_format(&self) -> ConversionFormat {
        ConversionFormat::Vorbis
    }
}

/// Ordered audio profiles for platform lookup.
pub struct AudioProfileRegistry {
    profiles: Vec<Box<dyn AudioProfile>>,
}

impl AudioProfileRegistry {
    pub fn new() -> Self {
        Self {
            profiles: Vec::new(),
        }
    }

    /// All built-in profiles.
    pub fn builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(DesktopAudioProfile));
        registry.register(Box::new(MobileAudioProfile));
        registry.register(Box::new(HandheldAudioProfile));
        registry
    }

    pub fn register(&mut self, profile: Box<dyn AudioProfile>) {
        self.profiles.push(profile);
    }

    pub fn for_platform(
        &self,
        platform: TargetPlatform,
    ) -> Result<&dyn AudioProfile, AudioProfileError> {
        self.profiles
            .iter()
            .map(|p| p.as_ref())
            .find(|p| p.supports(platform))
            .ok_or(AudioProfileError::NoProfile(platform))
    }
}

impl Default for AudioProfileRegistry {
    fn default() -> Self {
        Self::new()
    }
}
