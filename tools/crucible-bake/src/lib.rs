//! crucible-bake library
//!
//! Asset compilation for the Crucible content pipeline: image import,
//! per-platform texture conversion, ffmpeg-backed audio transcoding, and
//! container writing. The CLI in `main.rs` is a thin shell over this;
//! build scripts that embed the pipeline call it directly.

pub mod audio;
pub mod bitmap;
pub mod compile;
pub mod log;
pub mod manifest;
pub mod profile;
pub mod texture;
pub mod writer;

// Re-export container types so consumers of compiled output need not
// name crucible-common themselves
pub use crucible_common::{
    AssetKind, CNB_EXTENSION, CnbHeader, SurfaceFormat, TargetPlatform,
};

// Re-export what a build script driving the pipeline touches
pub use compile::{
    AudioSettings, BuildSummary, TextureSettings, build_all, compile_audio, compile_texture,
};
pub use log::{ContentLogger, NullLogger, TracingLogger};
