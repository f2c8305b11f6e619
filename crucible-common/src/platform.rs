//! Target platform and shader profile identification.
//!
//! Every platform the pipeline can build for is listed here as a closed enum.
//! Each platform carries a display name, a stable numeric value, and the
//! single-character identifier stored in the CNB container header. Adding a
//! platform means adding a variant and updating the exhaustive matches the
//! compiler will point at.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Platforms the pipeline can compile assets for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetPlatform {
    /// Windows desktop (Direct3D).
    Windows,
    /// Desktop OpenGL (Windows/Linux).
    DesktopGl,
    /// macOS desktop.
    MacOs,
    /// Android phones and tablets.
    Android,
    /// iOS devices.
    Ios,
    /// Browser (WebGL).
    Web,
    /// Fixed-spec handheld with limited texture memory.
    Handheld,
}

impl TargetPlatform {
    /// Every known platform, in stable numeric-value order.
    pub const ALL: [TargetPlatform; 7] = [
        TargetPlatform::Windows,
        TargetPlatform::DesktopGl,
        TargetPlatform::MacOs,
        TargetPlatform::Android,
        TargetPlatform::Ios,
        TargetPlatform::Web,
        TargetPlatform::Handheld,
    ];

    /// Canonical lowercase name, as written in manifests and on the CLI.
    pub fn name(self) -> &'static str {
        match self {
            TargetPlatform::Windows => "windows",
            TargetPlatform::DesktopGl => "desktopgl",
            TargetPlatform::MacOs => "macos",
            TargetPlatform::Android => "android",
            TargetPlatform::Ios => "ios",
            TargetPlatform::Web => "web",
            TargetPlatform::Handheld => "handheld",
        }
    }

    /// Stable numeric value.
    pub fn value(self) -> u8 {
        match self {
            TargetPlatform::Windows => 0,
            TargetPlatform::DesktopGl => 1,
            TargetPlatform::MacOs => 2,
            TargetPlatform::Android => 3,
            TargetPlatform::Ios => 4,
            TargetPlatform::Web => 5,
            TargetPlatform::Handheld => 6,
        }
    }

    /// Single-character identifier stored in the CNB container header.
    pub fn identifier(self) -> char {
        match self {
            TargetPlatform::Windows => 'w',
            TargetPlatform::DesktopGl => 'd',
            TargetPlatform::MacOs => 'm',
            TargetPlatform::Android => 'a',
            TargetPlatform::Ios => 'i',
            TargetPlatform::Web => 'b',
            TargetPlatform::Handheld => 'h',
        }
    }

    /// Look up a platform by name (case-insensitive).
    pub fn from_name(name: &str) -> Option<TargetPlatform> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }

    /// Look up a platform by its container identifier character.
    pub fn from_identifier(identifier: char) -> Option<TargetPlatform> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.identifier() == identifier)
    }

    /// Look up a platform by stable numeric value.
    pub fn from_value(value: u8) -> Option<TargetPlatform> {
        Self::ALL.iter().copied().find(|p| p.value() == value)
    }

    /// Shader profile the platform's renderer consumes.
    pub fn shader_profile(self) -> ShaderProfile {
        match self {
            TargetPlatform::Windows => ShaderProfile::Direct3d,
            TargetPlatform::DesktopGl
            | TargetPlatform::MacOs
            | TargetPlatform::Android
            | TargetPlatform::Ios
            | TargetPlatform::Handheld => ShaderProfile::OpenGl,
            TargetPlatform::Web => ShaderProfile::WebGl,
        }
    }

    /// Whether the platform has tight texture-memory limits. Texture
    /// profiles for such platforms prefer paletted output when an image's
    /// color count allows it.
    pub fn is_limited_texture_memory(self) -> bool {
        matches!(self, TargetPlatform::Handheld)
    }
}

impl fmt::Display for TargetPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a platform name does not match any known platform.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown target platform '{0}'")]
pub struct PlatformParseError(pub String);

impl FromStr for TargetPlatform {
    type Err = PlatformParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TargetPlatform::from_name(s).ok_or_else(|| PlatformParseError(s.to_string()))
    }
}

/// Shader language family a platform's renderer consumes.
///
/// The pipeline only tags content with a profile; it never compiles shaders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderProfile {
    Direct3d,
    OpenGl,
    WebGl,
}

impl ShaderProfile {
    pub const ALL: [ShaderProfile; 3] = [
        ShaderProfile::Direct3d,
        ShaderProfile::OpenGl,
        ShaderProfile::WebGl,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShaderProfile::Direct3d => "Direct3D",
            ShaderProfile::OpenGl => "OpenGL",
            ShaderProfile::WebGl => "WebGL",
        }
    }

    /// Stable numeric value.
    pub fn value(self) -> u8 {
        match self {
            ShaderProfile::Direct3d => 0,
            ShaderProfile::OpenGl => 1,
            ShaderProfile::WebGl => 2,
        }
    }
}

impl fmt::Display for ShaderProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
