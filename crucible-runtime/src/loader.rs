//! Container-level asset loading.
//!
//! Entry points take the complete bytes of one CNB file, validate the
//! header, and hand the body to the kind-specific reader. Texture loads
//! finish by creating the device texture in a single call.

use thiserror::Error;

use crucible_common::{AssetKind, CnbHeader, ContainerError};

use crate::audio::{AudioReadError, SoundData, read_sound};
use crate::device::{DeviceError, GraphicsDevice, TextureHandle};
use crate::texture::{TextureReadError, read_texture};

/// Errors from loading a complete container.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error(transparent)]
    Container(#[from] ContainerError),
    /// Container holds a different kind of asset.
    #[error("container holds {found:?}, expected {expected:?}")]
    WrongKind {
        expected: AssetKind,
        found: AssetKind,
    },
    /// Header size field disagrees with the bytes provided.
    #[error("container declares {declared} bytes, got {actual}")]
    Length { declared: u32, actual: usize },
    #[error(transparent)]
    Texture(#[from] TextureReadError),
    #[error(transparent)]
    Audio(#[from] AudioReadError),
    #[error(transparent)]
    Device(#[from] DeviceError),
}

/// Load a texture container and create the device texture.
///
/// The whole surviving mip chain goes to the device in one blocking call.
pub fn load_texture<D: GraphicsDevice>(
    device: &D,
    bytes: &[u8],
) -> Result<TextureHandle, LoadError> {
    let body = body_of(bytes, AssetKind::Texture2d)?;
    let upload = read_texture(body, &device.capabilities())?;
    Ok(device.create_texture(upload)?)
}

/// Load an audio container.
pub fn load_sound(bytes: &[u8]) -> Result<SoundData, LoadError> {
    let body = body_of(bytes, AssetKind::Audio)?;
    Ok(read_sound(body)?)
}

fn body_of(bytes: &[u8], expected: AssetKind) -> Result<&[u8], LoadError> {
    let header = CnbHeader::from_bytes(bytes)?;
    if header.kind != expected {
        return Err(LoadError::WrongKind {
            expected,
            found: header.kind,
        });
    }
    if header.total_size as usize != bytes.len() {
        return Err(LoadError::Length {
            declared: header.total_size,
            actual: bytes.len(),
        });
    }
    Ok(&bytes[CnbHeader::SIZE..])
}
