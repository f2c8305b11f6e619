//! Per-platform texture conversion policy.
//!
//! A [`TextureProfile`] decides how a requested output format maps onto a
//! target platform: which levels get block compressed, whether paletted
//! color is preferred, and what dimension constraints the format imposes.
//! Profiles live in a [`ProfileRegistry`] populated by explicit
//! registration; [`ProfileRegistry::builtins`] covers every built-in
//! platform.

mod compress;
mod desktop;
mod handheld;
mod mobile;

pub use desktop::DesktopProfile;
pub use handheld::HandheldProfile;
pub use mobile::MobileProfile;

use thiserror::Error;

use crucible_common::{SurfaceFormat, TargetPlatform};

use crate::bitmap::BitmapError;
use crate::log::ContentLogger;
use crate::texture::{TextureContent, TextureError};

/// Output format a build requests for a texture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TextureOutputFormat {
    /// Leave the content exactly as imported.
    NoChange,
    /// Full 32-bit color.
    #[default]
    Color,
    /// 16-bit color, picked by alpha usage.
    Color16Bit,
    /// The platform's native block compression.
    Compressed,
}

/// Dimension constraints a format imposes on a platform, consumed by the
/// padding step before conversion runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextureRequirements {
    pub power_of_two: bool,
    pub square: bool,
}

/// Why the platform block compressor produced no output.
#[derive(Debug, Error)]
pub enum CompressError {
    #[error("compression backend unavailable: {0}")]
    BackendUnavailable(String),
    #[error("compression failed: {0}")]
    Failed(String),
}

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("no texture profile supports the '{0}' platform")]
    NoProfile(TargetPlatform),
    #[error(transparent)]
    Texture(#[from] TextureError),
    #[error(transparent)]
    Bitmap(#[from] BitmapError),
    #[error(transparent)]
    Compression(#[from] CompressError),
}

/// Platform-specific texture conversion.
pub trait TextureProfile: std::fmt::Debug {
    /// True when this profile handles `platform`.
    fn supports(&self, platform: TargetPlatform) -> bool;

    /// Dimension constraints `format` imposes on this platform.
    fn requirements(&self, format: TextureOutputFormat) -> TextureRequirements;

    /// Platforms with little texture memory prefer a paletted texture
    /// whenever the content's colors fit one.
    fn prefers_paletted_color(&self) -> bool {
        false
    }

    /// The platform's native block compression. `Color` requests land here
    /// too and come back as uncompressed full color.
    fn platform_compress_texture(
        &self,
        content: &mut TextureContent,
        format: TextureOutputFormat,
        is_sprite_font: bool,
        logger: &dyn ContentLogger,
    ) -> Result<(), CompressError>;

    /// Convert `content` to the requested output format for this platform.
    ///
    /// Dispatch order: `NoChange` returns untouched; limited-memory
    /// platforms try the paletted heuristic for plain color; `Color16Bit`
    /// runs the 16-bit compressor; everything else goes to the platform
    /// compressor, whose failures are logged as an important message and
    /// re-raised as a fatal build error.
    fn convert_texture(
        &self,
        content: &mut TextureContent,
        format: TextureOutputFormat,
        is_sprite_font: bool,
        logger: &dyn ContentLogger,
    ) -> Result<(), ProfileError> {
        if format == TextureOutputFormat::NoChange {
            return Ok(());
        }

        if self.prefers_paletted_color() && format == TextureOutputFormat::Color {
            if let Some(count) = compress::count_distinct_colors(content) {
                logger.message(&format!(
                    "{} unique colors, outputting a paletted texture",
                    count
                ));
                compress::palettize_face0(content)?;
                return Ok(());
            }
            content.convert_pixel_format(SurfaceFormat::Color)?;
            return Ok(());
        }

        if format == TextureOutputFormat::Color16Bit {
            compress::compress_color16(content)?;
            return Ok(());
        }

        match self.platform_compress_texture(content, format, is_sprite_font, logger) {
            Ok(()) => Ok(()),
            Err(err) => {
                match &err {
                    CompressError::BackendUnavailable(detail) => logger.important(&format!(
                        "could not compress texture, the compression backend is unavailable: {}",
                        detail
                    )),
                    CompressError::Failed(detail) => {
                        logger.important(&format!("could not convert texture: {}", detail))
                    }
                }
                Err(err.into())
            }
        }
    }
}

/// Texture profiles in registration order; the first one supporting a
/// platform wins.
pub struct ProfileRegistry {
    profiles: Vec<Box<dyn TextureProfile>>,
}

impl ProfileRegistry {
    pub fn new() -> Self {
        Self {
            profiles: Vec::new(),
        }
    }

    /// All built-in profiles.
    pub fn builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(DesktopProfile));
        registry.register(Box::new(MobileProfile));
        registry.register(Box::new(HandheldProfile));
        registry
    }

    pub fn register(&mut self, profile: Box<dyn TextureProfile>) {
        self.profiles.push(profile);
    }

    pub fn for_platform(
        &self,
        platform: TargetPlatform,
    ) -> Result<&dyn TextureProfile, ProfileError> {
        self.profiles
            .iter()
            .map(|p| p.as_ref())
            .find(|p| p.supports(platform))
            .ok_or(ProfileError::NoProfile(platform))
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::new()
    }
}
