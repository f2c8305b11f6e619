//! Shared types for the Crucible asset pipeline
//!
//! This crate provides the format knowledge shared between:
//! - `crucible-bake` (asset compiler)
//! - `crucible-runtime` (asset loader)
//!
//! # Modules
//!
//! - [`platform`] - Target platform and shader profile identification
//! - [`surface`] - GPU surface formats and their wire values
//! - [`container`] - CNB container header
//! - [`dimensions`] - Packed 16-bit dimension scheme and mip math
//! - [`audio`] - Wave format block shared by compiler and loader

pub mod audio;
pub mod container;
pub mod dimensions;
pub mod platform;
pub mod surface;

pub use audio::{AudioFormat, format_tag};
pub use container::{
    AssetKind, CNB_EXTENSION, CNB_MAGIC, CNB_VERSION, CnbHeader, ContainerError, container_flags,
};
pub use dimensions::{mip_dimension, mip_level_count, pack_dimension, unpack_dimension};
pub use platform::{PlatformParseError, ShaderProfile, TargetPlatform};
pub use surface::{SurfaceFormat, UnknownWireFormat};
