//! Runtime loader for Crucible CNB assets
//!
//! This crate is the consuming side of the pipeline: it reads the
//! containers `crucible-bake` produces and prepares them for the device
//! actually present at runtime. Capability policy happens here, at load
//! time: mip chains a device cannot sample are truncated, and stored
//! formats it cannot sample are converted in software.
//!
//! # Modules
//!
//! - [`capabilities`] - Device capability queries the reader consults
//! - [`device`] - Texture upload seam and its implementations
//! - [`texture`] - Texture body deserialization and fallback policy
//! - [`dxt`] - Software DXT decompression
//! - [`audio`] - Audio body deserialization
//! - [`loader`] - Container-level entry points

pub mod audio;
pub mod capabilities;
mod cursor;
pub mod device;
pub mod dxt;
pub mod loader;
pub mod texture;

pub use audio::{AudioReadError, SoundData, read_sound};
pub use capabilities::GraphicsCapabilities;
pub use device::{
    DeviceError, GraphicsDevice, RenderThreadDevice, SoftwareDevice, TextureHandle, TextureUpload,
};
pub use dxt::{DxtError, decompress_dxt1, decompress_dxt3, decompress_dxt5};
pub use loader::{LoadError, load_sound, load_texture};
pub use texture::{TextureReadError, read_texture};
