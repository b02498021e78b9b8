use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::Path,
};

use image::{DynamicImage, ImageFormat, codecs::jpeg::JpegEncoder, imageops::FilterType};

use crate::buffer::pixel::PixelBuffer;
use crate::foundation::error::{PixfxError, PixfxResult};

/// Decode the image at `path`, guessing the format from its contents.
pub fn load_image(path: &Path) -> PixfxResult<DynamicImage> {
    let img = image::ImageReader::open(path)
        .map_err(|e| PixfxError::io(format!("open image '{}'", path.display()), e.into()))?
        .with_guessed_format()
        .map_err(|e| PixfxError::io(format!("sniff image '{}'", path.display()), e.into()))?
        .decode()
        .map_err(|e| PixfxError::io(format!("decode image '{}'", path.display()), e))?;
    tracing::debug!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        "loaded image"
    );
    Ok(img)
}

/// Encode `img` to `path`, picking the format from the extension.
///
/// JPEG output is written at `quality` (1..=100) after dropping alpha; other
/// formats use the encoder defaults. Missing parent directories are created.
pub fn save_image(path: &Path, img: &DynamicImage, quality: u8) -> PixfxResult<()> {
    if !(1..=100).contains(&quality) {
        return Err(PixfxError::invalid(format!(
            "jpeg quality must be in 1..=100, got {quality}"
        )));
    }
    let format = ImageFormat::from_path(path)
        .map_err(|e| PixfxError::io(format!("output format for '{}'", path.display()), e))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            PixfxError::io(format!("create output dir '{}'", parent.display()), e.into())
        })?;
    }

    let write_ctx = || format!("write image '{}'", path.display());
    match format {
        ImageFormat::Jpeg => {
            let file = File::create(path).map_err(|e| PixfxError::io(write_ctx(), e.into()))?;
            let mut writer = BufWriter::new(file);
            JpegEncoder::new_with_quality(&mut writer, quality)
                .encode_image(&img.to_rgb8())
                .map_err(|e| PixfxError::io(write_ctx(), e))?;
            writer
                .flush()
                .map_err(|e| PixfxError::io(write_ctx(), e.into()))?;
        }
        _ => img
            .save_with_format(path, format)
            .map_err(|e| PixfxError::io(write_ctx(), e))?,
    }
    tracing::debug!(path = %path.display(), ?format, "saved image");
    Ok(())
}

/// Bilinear resample of `src` to `width x height`.
pub fn resize_image(src: &PixelBuffer, width: u32, height: u32) -> PixfxResult<PixelBuffer> {
    if width == 0 || height == 0 {
        return Err(PixfxError::invalid(format!(
            "resize target must be non-zero, got {width}x{height}"
        )));
    }
    let rgba = src.clone().into_rgba_image();
    let resized = image::imageops::resize(&rgba, width, height, FilterType::Triangle);
    PixelBuffer::from_raw(width, height, resized.into_raw())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/codec.rs"]
mod tests;
