//! Command bodies: load, filter, save.
//!
//! Every function validates its parameters before touching the filesystem.

use std::path::PathBuf;

use image::DynamicImage;

use crate::assets::codec::{load_image, resize_image, save_image};
use crate::buffer::pixel::PixelBuffer;
use crate::effects::blur::{Accumulation, BoxBlur, EdgeMode};
use crate::effects::composite::{blend, overlay, tile};
use crate::effects::edge::{EdgeDetector, Narrowing};
use crate::foundation::error::{PixfxError, PixfxResult};

/// Default encoder quality for JPEG output.
pub const DEFAULT_QUALITY: u8 = 100;

/// Inputs of [`resize`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResizeParams {
    /// Source image path.
    pub input: PathBuf,
    /// Destination image path.
    pub output: PathBuf,
    /// Target width in pixels.
    pub width: u32,
    /// Target height in pixels.
    pub height: u32,
    /// JPEG quality, 1..=100.
    pub quality: u8,
}

/// Inputs of [`blur`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlurParams {
    /// Source image path.
    pub input: PathBuf,
    /// Destination image path.
    pub output: PathBuf,
    /// Window radius, must be >= 1.
    pub radius: i64,
    /// Edge sampling policy.
    pub edge: EdgeMode,
    /// Running-mean strategy.
    pub accumulation: Accumulation,
    /// JPEG quality, 1..=100.
    pub quality: u8,
}

/// Inputs of [`brick`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrickParams {
    /// Source image path.
    pub input: PathBuf,
    /// Brick tile image path.
    pub brick: PathBuf,
    /// Destination image path.
    pub output: PathBuf,
    /// JPEG quality, 1..=100.
    pub quality: u8,
}

/// Inputs of [`edges`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeParams {
    /// Source image path.
    pub input: PathBuf,
    /// Destination image path.
    pub output: PathBuf,
    /// Magnitude narrowing policy.
    pub narrowing: Narrowing,
    /// JPEG quality, 1..=100.
    pub quality: u8,
}

/// Resample the input to a fixed size.
pub fn resize(params: &ResizeParams) -> PixfxResult<()> {
    require_input(&params.input)?;
    if params.width == 0 || params.height == 0 {
        return Err(PixfxError::invalid(
            "destination width and height must both be provided and non-zero",
        ));
    }

    let src = PixelBuffer::from_image(&load_image(&params.input)?)?;
    let out = resize_image(&src, params.width, params.height)?;
    tracing::info!(
        from = ?(src.width(), src.height()),
        to = ?(out.width(), out.height()),
        "resized"
    );
    save_image(&params.output, &DynamicImage::from(out), params.quality)
}

/// Box-blur the input.
pub fn blur(params: &BlurParams) -> PixfxResult<()> {
    require_input(&params.input)?;
    let filter = BoxBlur::new(params.radius)?
        .with_edge(params.edge)
        .with_accumulation(params.accumulation);

    let src = PixelBuffer::from_image(&load_image(&params.input)?)?;
    let out = filter.apply(&src)?;
    tracing::info!(radius = filter.radius(), edge = ?filter.edge(), "blurred");
    save_image(&params.output, &DynamicImage::from(out), params.quality)
}

/// Overlay a tiled brick texture on the input.
pub fn brick(params: &BrickParams) -> PixfxResult<()> {
    require_input(&params.input)?;
    if params.brick.as_os_str().is_empty() {
        return Err(PixfxError::invalid("no brick image path provided"));
    }

    let src = PixelBuffer::from_image(&load_image(&params.input)?)?;
    let brick = PixelBuffer::from_image(&load_image(&params.brick)?)?;
    let out = brick_mosaic(&src, &brick)?;
    save_image(&params.output, &DynamicImage::from(out), params.quality)
}

/// Write the Sobel gradient magnitude of the input as a grayscale image.
pub fn edges(params: &EdgeParams) -> PixfxResult<()> {
    require_input(&params.input)?;
    let detector = EdgeDetector::new(params.narrowing);

    let src = PixelBuffer::from_image(&load_image(&params.input)?)?;
    let out = detector.detect(&src)?;
    tracing::info!(narrowing = ?detector.narrowing(), "edges detected");
    save_image(
        &params.output,
        &DynamicImage::ImageLuma8(out.into_gray_image()),
        params.quality,
    )
}

/// In-memory body of [`brick`].
///
/// The source is scaled down to the nearest multiple of the brick size on each
/// axis that has a remainder, the brick is tiled over a layer of that size, and
/// the source is overlay-blended onto the layer.
pub fn brick_mosaic(src: &PixelBuffer, brick: &PixelBuffer) -> PixfxResult<PixelBuffer> {
    let (bw, bh) = (brick.width(), brick.height());
    let w = src.width() - src.width() % bw;
    let h = src.height() - src.height() % bh;
    if w == 0 || h == 0 {
        return Err(PixfxError::invalid(format!(
            "brick {bw}x{bh} is larger than the {}x{} source",
            src.width(),
            src.height()
        )));
    }

    let fitted = if (w, h) == (src.width(), src.height()) {
        src.clone()
    } else {
        tracing::debug!(
            from = ?(src.width(), src.height()),
            to = ?(w, h),
            "fitting source to brick grid"
        );
        resize_image(src, w, h)?
    };

    let layer = tile(brick, w, h)?;
    Ok(blend(&fitted, &layer, overlay))
}

fn require_input(path: &std::path::Path) -> PixfxResult<()> {
    if path.as_os_str().is_empty() {
        return Err(PixfxError::invalid("no source image path provided"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
