//! Per-asset compilation and the batch build driver.
//!
//! The single-asset entry points take one source file all the way to a
//! finished container. [`build_all`] walks a manifest and compiles each
//! entry independently, so one bad source cannot hide every other error
//! in the set.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crucible_common::{CNB_EXTENSION, TargetPlatform};

use crate::audio::profile::AudioProfileRegistry;
use crate::audio::{AudioContent, ConversionFormat, ConversionQuality, ToolRunner};
use crate::log::ContentLogger;
use crate::manifest::{self, Manifest};
use crate::profile::{ProfileRegistry, TextureOutputFormat};
use crate::texture;
use crate::writer;

/// Settings for one texture build.
#[derive(Debug, Clone, Copy)]
pub struct TextureSettings {
    pub platform: TargetPlatform,
    pub format: TextureOutputFormat,
    pub mipmaps: bool,
    pub sprite_font: bool,
}

/// Compile one image file into a texture container.
///
/// Padding runs before mipmap generation so every level inherits the
/// dimensions the format requires.
pub fn compile_texture(
    input: &Path,
    output: &Path,
    settings: &TextureSettings,
    registry: &ProfileRegistry,
    logger: &dyn ContentLogger,
) -> Result<()> {
    let mut content = texture::import_file(input)?;
    let profile = registry.for_platform(settings.platform)?;

    let requirements = profile.requirements(settings.format);
    content.pad(requirements.power_of_two, requirements.square)?;
    if settings.mipmaps {
        content.generate_mipmaps()?;
    }
    profile.convert_texture(&mut content, settings.format, settings.sprite_font, logger)?;

    let file = File::create(output)
        .with_context(|| format!("Failed to create output: {:?}", output))?;
    let mut w = BufWriter::new(file);
    writer::write_texture(&mut w, settings.platform, &content)?;
    w.flush()?;
    Ok(())
}

/// Settings for one sound build.
#[derive(Debug, Clone, Copy)]
pub struct AudioSettings {
    pub platform: TargetPlatform,
    pub quality: ConversionQuality,
    pub codec: Option<ConversionFormat>,
    pub streaming: bool,
}

/// Compile one audio file into an audio container.
///
/// A streaming sound lands next to the container under the codec's own
/// extension; the container keeps the format block and loop metadata
/// with an empty payload.
pub fn compile_audio(
    runner: &dyn ToolRunner,
    input: &Path,
    output: &Path,
    settings: &AudioSettings,
    registry: &AudioProfileRegistry,
    logger: &dyn ContentLogger,
) -> Result<()> {
    let mut content = AudioContent::from_file(input)?;
    let profile = registry.for_platform(settings.platform)?;

    if settings.streaming {
        let streamed =
            profile.convert_streaming_audio(runner, &mut content, settings.quality, output)?;
        logger.message(&format!("streaming payload written to {:?}", streamed));
    } else {
        let format = profile.convert_audio(
            runner,
            settings.platform,
            &mut content,
            settings.quality,
            settings.codec,
        )?;
        logger.message(&format!("encoded as {}", format));
    }

    let file = File::create(output)
        .with_context(|| format!("Failed to create output: {:?}", output))?;
    let mut w = BufWriter::new(file);
    writer::write_audio(&mut w, settings.platform, &content)?;
    w.flush()?;
    Ok(())
}

/// What a manifest build produced.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildSummary {
    pub built: usize,
    pub failed: usize,
}

/// Build every asset in a manifest.
///
/// Source paths resolve relative to `base_dir`, the directory the
/// manifest lives in. Each failure goes out through the important
/// channel and the build moves on; the summary tells the caller whether
/// the exit status should report trouble.
pub fn build_all(
    manifest: &Manifest,
    base_dir: &Path,
    platform_override: Option<TargetPlatform>,
    output_override: Option<&Path>,
    runner: &dyn ToolRunner,
    logger: &dyn ContentLogger,
) -> Result<BuildSummary> {
    let platform = manifest::resolve_platform(manifest, platform_override)?;
    let output_dir = base_dir.join(output_override.unwrap_or(&manifest.output.dir));
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output dir: {:?}", output_dir))?;

    let texture_profiles = ProfileRegistry::builtins();
    let audio_profiles = AudioProfileRegistry::builtins();
    let mut summary = BuildSummary::default();

    for (name, entry) in &manifest.textures {
        let input = base_dir.join(entry.path());
        let output = output_dir.join(format!("{}.{}", name, CNB_EXTENSION));
        tracing::info!("Compiling texture: {} -> {:?}", name, output);

        let settings = TextureSettings {
            platform,
            format: entry.format(),
            mipmaps: entry.mipmaps(),
            sprite_font: entry.sprite_font(),
        };
        match compile_texture(&input, &output, &settings, &texture_profiles, logger) {
            Ok(()) => summary.built += 1,
            Err(err) => {
                logger.important(&format!("Failed to build texture '{}': {:#}", name, err));
                summary.failed += 1;
            }
        }
    }

    for (name, entry) in &manifest.sounds {
        let input = base_dir.join(entry.path());
        let output = output_dir.join(format!("{}.{}", name, CNB_EXTENSION));
        tracing::info!("Compiling sound: {} -> {:?}", name, output);

        let settings = AudioSettings {
            platform,
            quality: entry.quality(),
            codec: entry.codec(),
            streaming: entry.streaming(),
        };
        match compile_audio(runner, &input, &output, &settings, &audio_profiles, logger) {
            Ok(()) => summary.built += 1,
            Err(err) => {
                logger.important(&format!("Failed to build sound '{}': {:#}", name, err));
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}
