//! CNB serialization.
//!
//! A container is a 12-byte [`CnbHeader`] followed by one asset body.
//! Texture bodies carry face 0's whole mip chain; audio bodies carry the
//! wave format block, the encoded payload, and loop metadata. All
//! multi-byte fields are little-endian.

use std::io::Write;

use anyhow::Result;

use crucible_common::{AssetKind, CnbHeader, TargetPlatform, pack_dimension};

use crate::audio::AudioContent;
use crate::bitmap::Bitmap;
use crate::texture::TextureContent;

/// Serialize a texture body.
///
/// Layout: i32 surface format wire value; i32 packed width
/// `(original << 16) | padded`; i32 packed height; i32 mip level count;
/// then per level, for paletted formats an i32 palette byte length and
/// the raw RGBA8 palette, followed by an i32 pixel byte length and the
/// raw pixel bytes. Only face 0 is written. Dimensions above 65535 do
/// not fit the packing and truncate silently.
pub fn write_texture_body<W: Write>(w: &mut W, content: &TextureContent) -> Result<()> {
    content.validate()?;

    // validate guarantees face 0 exists and has at least one level.
    let face = &content.faces[0];
    let format = face[0].format();

    write_i32(w, format.wire())?;
    write_i32(w, pack_dimension(content.original_width, face[0].width()))?;
    write_i32(w, pack_dimension(content.original_height, face[0].height()))?;
    write_i32(w, face.len() as i32)?;

    for level in face {
        if let Bitmap::Paletted(paletted) = level {
            let palette = paletted.palette_data();
            write_i32(w, palette.len() as i32)?;
            w.write_all(palette)?;
        }
        let pixels = level.pixel_bytes();
        write_i32(w, pixels.len() as i32)?;
        w.write_all(&pixels)?;
    }
    Ok(())
}

/// Write a complete texture container: header, then the texture body.
pub fn write_texture<W: Write>(
    w: &mut W,
    platform: TargetPlatform,
    content: &TextureContent,
) -> Result<()> {
    let mut body = Vec::new();
    write_texture_body(&mut body, content)?;

    let total = (CnbHeader::SIZE + body.len()) as u32;
    let header = CnbHeader::new(platform, AssetKind::Texture2d, total);
    w.write_all(&header.to_bytes())?;
    w.write_all(&body)?;
    Ok(())
}

/// Serialize an audio body.
///
/// Layout: u32 format block length + the wave format block; u32 payload
/// length + payload bytes (length 0 when the payload was externalized
/// for streaming); i32 loop start; i32 loop length; i32 duration in
/// milliseconds.
pub fn write_audio_body<W: Write>(w: &mut W, content: &AudioContent) -> Result<()> {
    let format = content.format.to_bytes();
    write_u32(w, format.len() as u32)?;
    w.write_all(&format)?;

    match &content.data {
        Some(data) => {
            write_u32(w, data.len() as u32)?;
            w.write_all(data)?;
        }
        None => write_u32(w, 0)?,
    }

    write_i32(w, content.loop_start)?;
    write_i32(w, content.loop_length)?;
    write_i32(w, content.duration.as_millis() as i32)?;
    Ok(())
}

/// Write a complete audio container: header, then the audio body.
pub fn write_audio<W: Write>(
    w: &mut W,
    platform: TargetPlatform,
    content: &AudioContent,
) -> Result<()> {
    let mut body = Vec::new();
    write_audio_body(&mut body, content)?;

    let total = (CnbHeader::SIZE + body.len()) as u32;
    let header = CnbHeader::new(platform, AssetKind::Audio, total);
    w.write_all(&header.to_bytes())?;
    w.write_all(&body)?;
    Ok(())
}

fn write_i32<W: Write>(w: &mut W, value: i32) -> std::io::Result<()> {
    w.write_all(&value.to_le_bytes())
}

fn write_u32<W: Write>(w: &mut W, value: u32) -> std::io::Result<()> {
    w.write_all(&value.to_le_bytes())
}
