//! crucible-bake - Crucible asset compiler
//!
//! Bakes source images and audio into .cnb containers for a target
//! platform, driven by an assets.toml manifest or one file at a time.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crucible_bake::audio::profile::AudioProfileRegistry;
use crucible_bake::audio::{ConversionFormat, ConversionQuality, SystemToolRunner};
use crucible_bake::compile::{self, AudioSettings, TextureSettings};
use crucible_bake::log::TracingLogger;
use crucible_bake::profile::{ProfileRegistry, TextureOutputFormat};
use crucible_bake::{CNB_EXTENSION, TargetPlatform, manifest, texture};

#[derive(Parser)]
#[command(name = "crucible-bake")]
#[command(about = "Crucible asset compiler")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build assets from a manifest file
    Build {
        /// Path to assets.toml manifest
        #[arg(default_value = "assets.toml")]
        manifest: PathBuf,

        /// Output directory (overrides manifest)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Target platform (overrides manifest)
        #[arg(short, long)]
        platform: Option<TargetPlatform>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate manifest without building
    Check {
        /// Path to assets.toml manifest
        #[arg(default_value = "assets.toml")]
        manifest: PathBuf,
    },

    /// Compile a single texture file
    Texture {
        /// Input image file (PNG/JPG/BMP/TGA)
        input: PathBuf,

        /// Output .cnb file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Target platform
        #[arg(short, long, default_value = "desktopgl")]
        platform: TargetPlatform,

        /// Output texture format
        #[arg(short, long, value_enum, default_value = "color")]
        format: TextureOutputFormat,

        /// Generate a full mipmap chain
        #[arg(long)]
        mipmaps: bool,

        /// Sprite font sheet, kept out of block compression
        #[arg(long)]
        sprite_font: bool,
    },

    /// Compile a single audio file
    Audio {
        /// Input audio file (WAV/MP3/WMA)
        input: PathBuf,

        /// Output .cnb file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Target platform
        #[arg(short, long, default_value = "desktopgl")]
        platform: TargetPlatform,

        /// Compression quality tier
        #[arg(short, long, value_enum, default_value = "best")]
        quality: ConversionQuality,

        /// Codec override (default: the platform's pick for the tier)
        #[arg(short, long, value_enum)]
        codec: Option<ConversionFormat>,

        /// Externalize the payload for streaming playback
        #[arg(long)]
        streaming: bool,
    },

    /// Convert a texture and dump every face and mip level as PNG
    Dump {
        /// Input image file
        input: PathBuf,

        /// Target platform
        #[arg(short, long, default_value = "desktopgl")]
        platform: TargetPlatform,

        /// Output texture format
        #[arg(short, long, value_enum, default_value = "color")]
        format: TextureOutputFormat,

        /// Generate a full mipmap chain
        #[arg(long)]
        mipmaps: bool,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            manifest,
            output,
            platform,
            verbose,
        } => {
            tracing::info!("Building assets from {:?}", manifest);
            let config = manifest::load_manifest(&manifest)?;
            let base_dir = manifest_dir(&manifest);
            let logger = TracingLogger::new(verbose);
            let runner = SystemToolRunner;

            let summary = compile::build_all(
                &config,
                base_dir,
                platform,
                output.as_deref(),
                &runner,
                &logger,
            )?;
            if summary.failed > 0 {
                anyhow::bail!(
                    "{} of {} assets failed",
                    summary.failed,
                    summary.built + summary.failed
                );
            }
            tracing::info!("Built {} assets", summary.built);
        }

        Commands::Check { manifest } => {
            tracing::info!("Checking manifest {:?}", manifest);
            let config = manifest::load_manifest(&manifest)?;
            manifest::validate(&config, manifest_dir(&manifest))?;
            tracing::info!("Manifest is valid!");
        }

        Commands::Texture {
            input,
            output,
            platform,
            format,
            mipmaps,
            sprite_font,
        } => {
            let output = output.unwrap_or_else(|| input.with_extension(CNB_EXTENSION));
            tracing::info!("Compiling {:?} -> {:?}", input, output);

            let settings = TextureSettings {
                platform,
                format,
                mipmaps,
                sprite_font,
            };
            compile::compile_texture(
                &input,
                &output,
                &settings,
                &ProfileRegistry::builtins(),
                &TracingLogger::new(true),
            )?;
            tracing::info!("Done!");
        }

        Commands::Audio {
            input,
            output,
            platform,
            quality,
            codec,
            streaming,
        } => {
            let output = output.unwrap_or_else(|| input.with_extension(CNB_EXTENSION));
            tracing::info!("Compiling {:?} -> {:?}", input, output);

            let settings = AudioSettings {
                platform,
                quality,
                codec,
                streaming,
            };
            compile::compile_audio(
                &SystemToolRunner,
                &input,
                &output,
                &settings,
                &AudioProfileRegistry::builtins(),
                &TracingLogger::new(true),
            )?;
            tracing::info!("Done!");
        }

        Commands::Dump {
            input,
            platform,
            format,
            mipmaps,
        } => {
            let mut content = texture::import_file(&input)?;
            let registry = ProfileRegistry::builtins();
            let profile = registry.for_platform(platform)?;

            let requirements = profile.requirements(format);
            content.pad(requirements.power_of_two, requirements.square)?;
            if mipmaps {
                content.generate_mipmaps()?;
            }
            profile.convert_texture(&mut content, format, false, &TracingLogger::new(true))?;

            let stem = input.with_extension("");
            for path in content.dump_to_png(&stem)? {
                tracing::info!("Wrote {:?}", path);
            }
        }
    }

    Ok(())
}

/// Directory a manifest lives in; asset paths resolve relative to it.
fn manifest_dir(manifest: &Path) -> &Path {
    match manifest.parent() {
        Some(parent) if parent != Path::new("") => parent,
        _ => Path::new("."),
    }
}
