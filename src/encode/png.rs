use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    encode::ffmpeg::ensure_parent_dir,
    foundation::error::{ArchimedesError, ArchimedesResult},
    render::surface::FrameRGBA,
};

/// Convert premultiplied RGBA8 to straight alpha in place.
pub fn unpremultiply_rgba8(data: &mut [u8]) {
    for px in data.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

/// Straight-alpha RGBA8 bytes suitable for PNG.
pub fn straight_rgba8(frame: &FrameRGBA) -> Vec<u8> {
    let mut data = frame.data.clone();
    if frame.premultiplied {
        unpremultiply_rgba8(&mut data);
    }
    data
}

pub fn write_png(frame: &FrameRGBA, path: &Path) -> ArchimedesResult<()> {
    let expected = (frame.width as usize) * (frame.height as usize) * 4;
    if frame.data.len() != expected {
        return Err(ArchimedesError::encode(format!(
            "frame data is {} bytes, expected {expected} for {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }
    ensure_parent_dir(path)?;
    image::save_buffer_with_format(
        path,
        &straight_rgba8(frame),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

/// `dir/frame_00042.png`.
pub fn sequence_frame_path(dir: &Path, index: u64) -> PathBuf {
    dir.join(format!("frame_{index:05}.png"))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
