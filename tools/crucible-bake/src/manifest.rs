//! assets.toml manifest parsing
//!
//! A manifest names every asset a game ships, keyed by the output name
//! the compiled file takes. The batch driver in [`crate::compile`] walks
//! it entry by entry.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crucible_common::TargetPlatform;

use crate::audio::{ConversionFormat, ConversionQuality};
use crate::profile::TextureOutputFormat;

/// Root manifest structure
#[derive(Debug, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub output: OutputConfig,
    /// Platform every asset targets unless the command line overrides it.
    #[serde(default)]
    pub platform: Option<TargetPlatform>,
    #[serde(default)]
    pub textures: HashMap<String, TextureEntry>,
    #[serde(default)]
    pub sounds: HashMap<String, SoundEntry>,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

// A missing [output] table and a missing `dir` key agree on the default.
impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("baked/")
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TextureEntry {
    Simple(PathBuf),
    Detailed {
        path: PathBuf,
        #[serde(default)]
        format: TextureOutputFormat,
        #[serde(default)]
        mipmaps: bool,
        #[serde(default)]
        sprite_font: bool,
    },
}

impl TextureEntry {
    pub fn path(&self) -> &Path {
        match self {
            TextureEntry::Simple(p) => p,
            TextureEntry::Detailed { path, .. } => path,
        }
    }

    pub fn format(&self) -> TextureOutputFormat {
        match self {
            TextureEntry::Simple(_) => TextureOutputFormat::default(),
            TextureEntry::Detailed { format, .. } => *format,
        }
    }

    pub fn mipmaps(&self) -> bool {
        match self {
            TextureEntry::Simple(_) => false,
            TextureEntry::Detailed { mipmaps, .. } => *mipmaps,
        }
    }

    pub fn sprite_font(&self) -> bool {
        match self {
            TextureEntry::Simple(_) => false,
            TextureEntry::Detailed { sprite_font, .. } => *sprite_font,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SoundEntry {
    Simple(PathBuf),
    Detailed {
        path: PathBuf,
        #[serde(default)]
        quality: ConversionQuality,
        /// Codec override. Absent means the platform profile picks from
        /// the quality tier.
        #[serde(default)]
        codec: Option<ConversionFormat>,
        #[serde(default)]
        streaming: bool,
    },
}

impl SoundEntry {
    pub fn path(&self) -> &Path {
        match self {
            SoundEntry::Simple(p) => p,
            SoundEntry::Detailed { path, .. } => path,
        }
    }

    pub fn quality(&self) -> ConversionQuality {
        match self {
            SoundEntry::Simple(_) => ConversionQuality::default(),
            SoundEntry::Detailed { quality, .. } => *quality,
        }
    }

    pub fn codec(&self) -> Option<ConversionFormat> {
        match self {
            SoundEntry::Simple(_) => None,
            SoundEntry::Detailed { codec, .. } => *codec,
        }
    }

    pub fn streaming(&self) -> bool {
        match self {
            SoundEntry::Simple(_) => false,
            SoundEntry::Detailed { streaming, .. } => *streaming,
        }
    }
}

impl Manifest {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse manifest")
    }
}

/// Load and parse a manifest file
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {:?}", path))?;
    let manifest: Manifest = toml::from_str(&content)
        .with_context(|| format!("Failed to parse manifest: {:?}", path))?;
    Ok(manifest)
}

/// Validate a manifest without building. Source paths resolve relative
/// to `base_dir`, the directory the manifest lives in.
pub fn validate(manifest: &Manifest, base_dir: &Path) -> Result<()> {
    // Check that all source files exist
    for (name, entry) in &manifest.textures {
        if !base_dir.join(entry.path()).exists() {
            anyhow::bail!("Texture '{}' source not found: {:?}", name, entry.path());
        }
    }
    for (name, entry) in &manifest.sounds {
        if !base_dir.join(entry.path()).exists() {
            anyhow::bail!("Sound '{}' source not found: {:?}", name, entry.path());
        }
    }
    Ok(())
}

/// Platform the build targets: the command line wins over the manifest.
pub fn resolve_platform(
    manifest: &Manifest,
    override_platform: Option<TargetPlatform>,
) -> Result<TargetPlatform> {
    override_platform
        .or(manifest.platform)
        .context("no target platform: set `platform` in the manifest or pass --platform")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_minimal() {
        let manifest = Manifest::parse("").unwrap();

        assert_eq!(manifest.output.dir, PathBuf::from("baked/"));
        assert!(manifest.platform.is_none());
        assert!(manifest.textures.is_empty());
        assert!(manifest.sounds.is_empty());
    }

    #[test]
    fn test_manifest_simple_entries() {
        let manifest = Manifest::parse(
            r#"
platform = "windows"

[output]
dir = "compiled"

[textures]
hero = "art/hero.png"

[sounds]
jump = "sfx/jump.wav"
"#,
        )
        .unwrap();

        assert_eq!(manifest.platform, Some(TargetPlatform::Windows));
        assert_eq!(manifest.output.dir, PathBuf::from("compiled"));

        let hero = &manifest.textures["hero"];
        assert_eq!(hero.path(), Path::new("art/hero.png"));
        assert_eq!(hero.format(), TextureOutputFormat::Color);
        assert!(!hero.mipmaps());
        assert!(!hero.sprite_font());

        let jump = &manifest.sounds["jump"];
        assert_eq!(jump.path(), Path::new("sfx/jump.wav"));
        assert_eq!(jump.quality(), ConversionQuality::Best);
        assert!(jump.codec().is_none());
        assert!(!jump.streaming());
    }

    #[test]
    fn test_manifest_detailed_entries() {
        let manifest = Manifest::parse(
            r#"
[textures.terrain]
path = "art/terrain.png"
format = "compressed"
mipmaps = true

[textures.font]
path = "art/font.png"
sprite_font = true

[sounds.music]
path = "music/theme.wav"
quality = "medium"
streaming = true

[sounds.voice]
path = "vo/intro.wav"
codec = "vorbis"
"#,
        )
        .unwrap();

        let terrain = &manifest.textures["terrain"];
        assert_eq!(terrain.format(), TextureOutputFormat::Compressed);
        assert!(terrain.mipmaps());
        assert!(!terrain.sprite_font());

        assert!(manifest.textures["font"].sprite_font());

        let music = &manifest.sounds["music"];
        assert_eq!(music.quality(), ConversionQuality::Medium);
        assert!(music.streaming());

        assert_eq!(
            manifest.sounds["voice"].codec(),
            Some(ConversionFormat::Vorbis)
        );
    }

    #[test]
    fn test_manifest_rejects_garbage() {
        assert!(Manifest::parse("textures = 3").is_err());
    }

    #[test]
    fn test_validate_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = Manifest::parse(
            r#"
[textures]
hero = "art/hero.png"
"#,
        )
        .unwrap();

        let err = validate(&manifest, dir.path()).unwrap_err();
        assert!(err.to_string().contains("hero"));

        std::fs::create_dir_all(dir.path().join("art")).unwrap();
        std::fs::write(dir.path().join("art/hero.png"), b"png").unwrap();
        validate(&manifest, dir.path()).unwrap();
    }

    #[test]
    fn test_resolve_platform_precedence() {
        let with = Manifest::parse(r#"platform = "handheld""#).unwrap();
        let without = Manifest::parse("").unwrap();

        assert_eq!(
            resolve_platform(&with, None).unwrap(),
            TargetPlatform::Handheld
        );
        assert_eq!(
            resolve_platform(&with, Some(TargetPlatform::Ios)).unwrap(),
            TargetPlatform::Ios
        );
        assert!(resolve_platform(&without, None).is_err());
    }
}
