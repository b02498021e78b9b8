//! Sobel gradient magnitude over a luma reduction of the input.

use crate::buffer::gray::GrayBuffer;
use crate::buffer::pixel::PixelBuffer;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{PixfxError, PixfxResult};

/// Vertical-gradient kernel, indexed `[ky + 1][kx + 1]`.
pub const SOBEL_Y: [[i32; 3]; 3] = [[1, 0, -1], [2, 0, -2], [1, 0, -1]];

/// Horizontal-gradient kernel, indexed `[ky + 1][kx + 1]`.
pub const SOBEL_X: [[i32; 3]; 3] = [[1, 2, 1], [0, 0, 0], [-1, -2, -1]];

/// How a gradient magnitude above 255 is narrowed to 8 bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Narrowing {
    /// Clamp to 255.
    #[default]
    Saturate,
    /// Truncate to an integer and keep the low byte, so 256 becomes 0.
    Wrap,
}

impl Narrowing {
    /// Narrow a non-negative magnitude, truncating the fractional part.
    pub fn narrow(self, magnitude: f64) -> u8 {
        match self {
            Narrowing::Saturate => magnitude.min(255.0) as u8,
            Narrowing::Wrap => (magnitude as u32 & 0xff) as u8,
        }
    }
}

/// Perceptual luma of an RGBA8 pixel, alpha ignored.
///
/// Uses the 16-bit integer weights `19595 / 38470 / 7471` (sum `65536`), so a
/// gray pixel `(v, v, v)` maps back to `v`.
pub fn luma(px: Rgba8) -> u8 {
    let [r, g, b] = [px[0], px[1], px[2]].map(|c| u32::from(c) * 257);
    ((19595 * r + 38470 * g + 7471 * b + (1 << 15)) >> 24) as u8
}

/// Reduce every pixel to its [`luma`].
pub fn grayscale(src: &PixelBuffer) -> PixfxResult<GrayBuffer> {
    let mut gray = GrayBuffer::new(src.width(), src.height(), (0, 0))?;
    for y in 0..src.height() {
        for x in 0..src.width() {
            gray.set(x, y, luma(src.get(x, y)));
        }
    }
    Ok(gray)
}

/// Responses `(gy, gx)` of [`SOBEL_Y`] and [`SOBEL_X`] centred on `(x, y)`.
///
/// # Panics
///
/// Panics unless `(x, y)` has a full 3x3 neighbourhood inside `gray`.
pub fn gradients(gray: &GrayBuffer, x: u32, y: u32) -> (i32, i32) {
    assert!(
        x >= 1 && y >= 1 && x + 1 < gray.width() && y + 1 < gray.height(),
        "({x}, {y}) is not an interior sample"
    );
    let (mut gy, mut gx) = (0i32, 0i32);
    for ky in 0..3 {
        for kx in 0..3 {
            let v = i32::from(gray.get(x + kx - 1, y + ky - 1));
            gy += v * SOBEL_Y[ky as usize][kx as usize];
            gx += v * SOBEL_X[ky as usize][kx as usize];
        }
    }
    (gy, gx)
}

/// Sobel edge detector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EdgeDetector {
    narrowing: Narrowing,
}

impl EdgeDetector {
    /// Detector narrowing magnitudes with `narrowing`.
    pub fn new(narrowing: Narrowing) -> Self {
        Self { narrowing }
    }

    /// Narrowing policy in use.
    pub fn narrowing(&self) -> Narrowing {
        self.narrowing
    }

    /// Gradient magnitude `sqrt(gy^2 + gx^2)` for every interior pixel.
    ///
    /// The result is `(W - 2) x (H - 2)`; its [`GrayBuffer::bounds`] place it at
    /// `(1, 1)` in the source. The one-pixel border is not computed.
    ///
    /// # Errors
    ///
    /// Returns [`PixfxError::InvalidParameter`] for inputs smaller than 3x3.
    #[tracing::instrument(skip(src), fields(width = src.width(), height = src.height()))]
    pub fn detect(&self, src: &PixelBuffer) -> PixfxResult<GrayBuffer> {
        if src.width() < 3 || src.height() < 3 {
            return Err(PixfxError::invalid(format!(
                "edge detection needs at least 3x3 pixels, got {}x{}",
                src.width(),
                src.height()
            )));
        }

        let gray = grayscale(src)?;
        let mut out = GrayBuffer::new(src.width() - 2, src.height() - 2, (1, 1))?;
        for y in 1..src.height() - 1 {
            for x in 1..src.width() - 1 {
                let (gy, gx) = gradients(&gray, x, y);
                let magnitude = (f64::from(gy * gy) + f64::from(gx * gx)).sqrt();
                out.set(x - 1, y - 1, self.narrowing.narrow(magnitude));
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/edge.rs"]
mod tests;
