//! Handheld texture policy.

use crucible_common::{SurfaceFormat, TargetPlatform};

use crate::log::ContentLogger;
use crate::texture::TextureContent;

use super::{CompressError, TextureOutputFormat, TextureProfile, TextureRequirements};

/// The fixed-memory handheld target. Texture memory is the scarce
/// resource, so plain color content that fits an 8-bit palette ships
/// paletted. There is no block compression encoder for this target.
#[derive(Debug)]
pub struct HandheldProfile;

impl TextureProfile for HandheldProfile {
    fn supports(&self, platform: TargetPlatform) -> bool {
        platform == TargetPlatform::Handheld
    }

    fn requirements(&self, _format: TextureOutputFormat) -> TextureRequirements {
        TextureRequirements::default()
    }

    fn prefers_paletted_color(&self) -> bool {
        true
    }

    fn platform_compress_texture(
        &self,
        content: &mut TextureContent,
        format: TextureOutputFormat,
        _is_sprite_font: bool,
        _logger: &dyn ContentLogger,
    ) -> Result<(), CompressError> {
        match format {
            TextureOutputFormat::Compressed => Err(CompressError::BackendUnavailable(
                "no block compression encoder for the handheld target".into(),
            )),
            _ => content
                .convert_pixel_format(SurfaceFormat::Color)
                .map_err(|e| CompressError::Failed(e.to_string())),
        }
    }
}
