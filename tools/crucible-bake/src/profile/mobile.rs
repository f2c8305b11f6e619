//! Mobile and web texture policy.

use crucible_common::{SurfaceFormat, TargetPlatform};

use crate::log::ContentLogger;
use crate::texture::TextureContent;

use super::{CompressError, TextureOutputFormat, TextureProfile, TextureRequirements, compress};

/// Android, iOS, and web. The GL ES / WebGL compressed-texture paths want
/// power-of-two dimensions, so block compression asks for padding.
#[derive(Debug)]
pub struct MobileProfile;

impl TextureProfile for MobileProfile {
    fn supports(&self, platform: TargetPlatform) -> bool {
        matches!(
            platform,
            TargetPlatform::Android | TargetPlatform::Ios | TargetPlatform::Web
        )
    }

    fn requirements(&self, format: TextureOutputFormat) -> TextureRequirements {
        TextureRequirements {
            power_of_two: format == TextureOutputFormat::Compressed,
            square: false,
        }
    }

    fn platform_compress_texture(
        &self,
        content: &mut TextureContent,
        format: TextureOutputFormat,
        is_sprite_font: bool,
        _logger: &dyn ContentLogger,
    ) -> Result<(), CompressError> {
        match format {
            TextureOutputFormat::Compressed if !is_sprite_font => compress::compress_block(content),
            _ => content
                .convert_pixel_format(SurfaceFormat::Color)
                .map_err(|e| CompressError::Failed(e.to_string())),
        }
    }
}
