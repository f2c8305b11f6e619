//! CNB container header (.cnb)
//!
//! Every compiled asset starts with a fixed 12-byte header identifying the
//! target platform and asset kind, followed by the kind-specific body.
//!
//! # Layout
//! ```text
//! 0x00: magic "CNB" (3 bytes)
//! 0x03: platform identifier char (1 byte)
//! 0x04: container version u8
//! 0x05: flags u8 (must be 0 in version 1)
//! 0x06: asset kind u8
//! 0x07: reserved u8
//! 0x08: total file size u32 LE (header + body)
//! ```

use thiserror::Error;

use crate::platform::TargetPlatform;

/// Magic bytes at the start of every CNB file.
pub const CNB_MAGIC: &[u8; 3] = b"CNB";

/// Current container version.
pub const CNB_VERSION: u8 = 1;

/// CNB file extension without dot.
pub const CNB_EXTENSION: &str = "cnb";

/// Container flags.
pub mod container_flags {
    /// Whole-body compression. Reserved; version 1 readers reject it.
    pub const COMPRESSED: u8 = 0b0000_0001;
}

/// Kind of asset stored in a container body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AssetKind {
    Texture2d = 1,
    Audio = 2,
}

impl AssetKind {
    pub fn to_byte(self) -> u8 {
        self as u8
    }

    pub fn from_byte(byte: u8) -> Option<AssetKind> {
        match byte {
            1 => Some(AssetKind::Texture2d),
            2 => Some(AssetKind::Audio),
            _ => None,
        }
    }
}

/// Errors produced while parsing a container header.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainerError {
    /// Fewer bytes than a header needs.
    #[error("container header truncated: got {0} bytes, need {size}", size = CnbHeader::SIZE)]
    Truncated(usize),
    /// Leading bytes are not the CNB magic.
    #[error("not a CNB container (bad magic bytes)")]
    BadMagic,
    /// Header names a container version this build does not read.
    #[error("unsupported container version {0}")]
    UnsupportedVersion(u8),
    /// Nonzero flags. Version 1 defines none.
    #[error("unsupported container flags {0:#04x}")]
    UnsupportedFlags(u8),
    /// Platform identifier character is not a known platform.
    #[error("unknown platform identifier '{0}'")]
    UnknownPlatform(char),
    /// Asset kind byte is not a known kind.
    #[error("unknown asset kind {0}")]
    UnknownAssetKind(u8),
}

/// CNB container header (12 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CnbHeader {
    pub platform: TargetPlatform,
    pub version: u8,
    pub flags: u8,
    pub kind: AssetKind,
    /// Total file size including this header.
    pub total_size: u32,
}

impl CnbHeader {
    pub const SIZE: usize = 12;

    /// Header for a freshly compiled asset at the current version.
    pub fn new(platform: TargetPlatform, kind: AssetKind, total_size: u32) -> Self {
        Self {
            platform,
            version: CNB_VERSION,
            flags: 0,
            kind,
            total_size,
        }
    }

    /// Write the header to bytes.
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..3].copy_from_slice(CNB_MAGIC);
        bytes[3] = self.platform.identifier() as u8;
        bytes[4] = self.version;
        bytes[5] = self.flags;
        bytes[6] = self.kind.to_byte();
        // byte 7 reserved, stays 0
        bytes[8..12].copy_from_slice(&self.total_size.to_le_bytes());
        bytes
    }

    /// Parse and validate a header.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ContainerError> {
        if bytes.len() < Self::SIZE {
            return Err(ContainerError::Truncated(bytes.len()));
        }
        if &bytes[0..3] != CNB_MAGIC {
            return Err(ContainerError::BadMagic);
        }
        let platform = TargetPlatform::from_identifier(bytes[3] as char)
            .ok_or(ContainerError::UnknownPlatform(bytes[3] as char))?;
        let version = bytes[4];
        if version != CNB_VERSION {
            return Err(ContainerError::UnsupportedVersion(version));
        }
        let flags = bytes[5];
        if flags != 0 {
            return Err(ContainerError::UnsupportedFlags(flags));
        }
        let kind = AssetKind::from_byte(bytes[6]).ok_or(ContainerError::UnknownAssetKind(bytes[6]))?;
        let total_size = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
        Ok(Self {
            platform,
            version,
            flags,
            kind,
            total_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_size() {
        assert_eq!(CnbHeader::SIZE, 12);
    }

    #[test]
    fn test_header_roundtrip() {
        let header = CnbHeader::new(TargetPlatform::Handheld, AssetKind::Texture2d, 4096);
        let parsed = CnbHeader::from_bytes(&header.to_bytes()).unwrap();
        assert_eq!(parsed, header);
        assert_eq!(parsed.platform, TargetPlatform::Handheld);
        assert_eq!(parsed.kind, AssetKind::Texture2d);
        assert_eq!(parsed.total_size, 4096);
    }

    #[test]
    fn test_header_layout() {
        let header = CnbHeader::new(TargetPlatform::Windows, AssetKind::Audio, 0x0102_0304);
        let bytes = header.to_bytes();
        assert_eq!(&bytes[0..3], b"CNB");
        assert_eq!(bytes[3], b'w');
        assert_eq!(bytes[4], CNB_VERSION);
        assert_eq!(bytes[5], 0);
        assert_eq!(bytes[6], 2);
        assert_eq!(bytes[7], 0);
        assert_eq!(&bytes[8..12], &[0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn test_rejects_truncated() {
        let header = CnbHeader::new(TargetPlatform::Windows, AssetKind::Audio, 64);
        let bytes = header.to_bytes();
        assert_eq!(
            CnbHeader::from_bytes(&bytes[..7]),
            Err(ContainerError::Truncated(7))
        );
    }

    #[test]
    fn test_rejects_bad_magic() {
        let mut bytes = CnbHeader::new(TargetPlatform::Windows, AssetKind::Audio, 64).to_bytes();
        bytes[0] = b'X';
        assert_eq!(CnbHeader::from_bytes(&bytes), Err(ContainerError::BadMagic));
    }

    #[test]
    fn test_rejects_future_version() {
        let mut bytes =
            CnbHeader::new(TargetPlatform::Windows, AssetKind::Texture2d, 64).to_bytes();
        bytes[4] = CNB_VERSION + 1;
        assert_eq!(
            CnbHeader::from_bytes(&bytes),
            Err(ContainerError::UnsupportedVersion(CNB_VERSION + 1))
        );
    }

    #[test]
    fn test_rejects_compressed_flag() {
        let mut bytes =
            CnbHeader::new(TargetPlatform::Windows, AssetKind::Texture2d, 64).to_bytes();
        bytes[5] = container_flags::COMPRESSED;
        assert_eq!(
            CnbHeader::from_bytes(&bytes),
            Err(ContainerError::UnsupportedFlags(container_flags::COMPRESSED))
        );
    }

    #[test]
    fn test_rejects_unknown_platform_and_kind() {
        let mut bytes =
            CnbHeader::new(TargetPlatform::Windows, AssetKind::Texture2d, 64).to_bytes();
        bytes[3] = b'z';
        assert_eq!(
            CnbHeader::from_bytes(&bytes),
            Err(ContainerError::UnknownPlatform('z'))
        );

        let mut bytes =
            CnbHeader::new(TargetPlatform::Windows, AssetKind::Texture2d, 64).to_bytes();
        bytes[6] = 9;
        assert_eq!(
            CnbHeader::from_bytes(&bytes),
            Err(ContainerError::UnknownAssetKind(9))
        );
    }
}
