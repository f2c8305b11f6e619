//! Desktop texture policy.

use crucible_common::{SurfaceFormat, TargetPlatform};

use crate::log::ContentLogger;
use crate::texture::TextureContent;

use super::{CompressError, TextureOutputFormat, TextureProfile, TextureRequirements, compress};

/// Windows, generic desktop GL, and macOS. DXT hardware is assumed, and no
/// dimension constraints apply.
#[derive(Debug)]
pub struct DesktopProfile;

impl TextureProfile for DesktopProfile {
    fn supports(&self, platform: TargetPlatform) -> bool {
        matches!(
            platform,
            TargetPlatform::Windows | TargetPlatform::DesktopGl | TargetPlatform::MacOs
        )
    }

    fn requirements(&self, _format: TextureOutputFormat) -> TextureRequirements {
        TextureRequirements::default()
    }

    fn platform_compress_texture(
        &self,
        content: &mut TextureContent,
        format: TextureOutputFormat,
        is_sprite_font: bool,
        _logger: &dyn ContentLogger,
    ) -> Result<(), CompressError> {
        match format {
            // Font atlases keep exact glyph coverage; block compression
            // smears the distance ramps.
            TextureOutputFormat::Compressed if !is_sprite_font => compress::compress_block(content),
            _ => content
                .convert_pixel_format(SurfaceFormat::Color)
                .map_err(|e| CompressError::Failed(e.to_string())),
        }
    }
}
