//! Separable box blur with an amortized O(1) running window.
//!
//! Each output sample is the mean of a `2r + 1` wide window. The window is kept
//! as a FIFO of raw samples plus a channel-wise accumulator; sliding by one
//! position pops the leaving sample from the front and pushes the entering one
//! at the back, so the cost per pixel is independent of the radius.
//!
//! Rows are blurred first into an intermediate buffer, then columns of that
//! buffer into the output.

use std::collections::VecDeque;

use crate::buffer::pixel::PixelBuffer;
use crate::foundation::error::{PixfxError, PixfxResult};

/// How window taps that fall outside the line are mapped back into it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdgeMode {
    /// Near-side folding.
    ///
    /// At the start of a line, a tap at offset `k < 0` reads index `k + 2r`.
    /// When sliding, the entering index is `x + r` if that is inside the line and
    /// `x - r` otherwise. Lines too short for either rule (`len <= 2r`) fall back
    /// to `index mod len`.
    #[default]
    Fold,
    /// Toroidal sampling: a tap at index `i` reads `i mod len`, so the first
    /// window of a line reaches into the opposite end.
    Wrap,
}

impl EdgeMode {
    /// Line index sampled by the tap at `offset` (in `[-r, r]`) around position 0.
    pub fn initial_tap(self, offset: isize, len: usize, radius: usize) -> usize {
        let idx = match self {
            EdgeMode::Fold if offset < 0 => offset + 2 * radius as isize,
            EdgeMode::Fold | EdgeMode::Wrap => offset,
        };
        fold_into(idx, len)
    }

    /// Line index that enters the window when it slides onto position `pos`.
    pub fn entering_tap(self, pos: usize, len: usize, radius: usize) -> usize {
        match self {
            EdgeMode::Fold if pos + radius < len => pos + radius,
            EdgeMode::Fold => fold_into(pos as isize - radius as isize, len),
            EdgeMode::Wrap => (pos + radius) % len,
        }
    }
}

fn fold_into(idx: isize, len: usize) -> usize {
    idx.rem_euclid(len as isize) as usize
}

/// How the running window mean is maintained.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Accumulation {
    /// Each sample is divided by the window size as it enters or leaves, and
    /// the truncated quotients are added to or subtracted from the running
    /// mean. Rounding error accumulates along the line and the mean can
    /// exceed 255, in which case only the low byte is emitted.
    #[default]
    Truncating,
    /// Undivided running sum, divided once per emitted pixel.
    Exact,
}

/// Largest accepted radius: a full window of 255 samples still sums within `u32`.
pub const MAX_RADIUS: u32 = (u32::MAX / 255 - 1) / 2;

/// Box blur parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoxBlur {
    radius: u32,
    edge: EdgeMode,
    accumulation: Accumulation,
}

impl BoxBlur {
    /// Blur with the given radius, [`EdgeMode::Fold`] and
    /// [`Accumulation::Truncating`].
    ///
    /// # Errors
    ///
    /// Returns [`PixfxError::InvalidParameter`] when `radius <= 0` or exceeds
    /// [`MAX_RADIUS`].
    pub fn new(radius: i64) -> PixfxResult<Self> {
        if radius <= 0 {
            return Err(PixfxError::invalid(format!(
                "blur radius must be >= 1, got {radius}"
            )));
        }
        let radius = u32::try_from(radius)
            .ok()
            .filter(|&r| r <= MAX_RADIUS)
            .ok_or_else(|| {
                PixfxError::invalid(format!(
                    "blur radius {radius} is too large, max is {MAX_RADIUS}"
                ))
            })?;
        Ok(Self {
            radius,
            edge: EdgeMode::default(),
            accumulation: Accumulation::default(),
        })
    }

    /// Replace the edge policy.
    pub fn with_edge(mut self, edge: EdgeMode) -> Self {
        self.edge = edge;
        self
    }

    /// Replace the accumulation strategy.
    pub fn with_accumulation(mut self, accumulation: Accumulation) -> Self {
        self.accumulation = accumulation;
        self
    }

    /// Window radius.
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Samples per window, `2r + 1`.
    pub fn window_size(&self) -> u32 {
        2 * self.radius + 1
    }

    /// Edge policy in use.
    pub fn edge(&self) -> EdgeMode {
        self.edge
    }

    /// Accumulation strategy in use.
    pub fn accumulation(&self) -> Accumulation {
        self.accumulation
    }

    /// Blur `src` horizontally, then vertically, into a new buffer of the same size.
    #[tracing::instrument(skip(src), fields(width = src.width(), height = src.height()))]
    pub fn apply(&self, src: &PixelBuffer) -> PixfxResult<PixelBuffer> {
        let (width, height) = (src.width(), src.height());
        let mut tmp = PixelBuffer::new_blank(width, height)?;
        let mut out = PixelBuffer::new_blank(width, height)?;
        let mut window = SlidingWindow::new(self.window_size(), self.accumulation);

        horizontal_pass(self, src, &mut tmp, &mut window);
        vertical_pass(self, &tmp, &mut out, &mut window);
        tracing::debug!(radius = self.radius, "box blur done");
        Ok(out)
    }
}

/// FIFO of the samples currently inside the window plus their running mean.
#[derive(Clone, Debug)]
pub(crate) struct SlidingWindow {
    samples: VecDeque<[u32; 4]>,
    acc: [u32; 4],
    size: u32,
    accumulation: Accumulation,
}

impl SlidingWindow {
    pub(crate) fn new(size: u32, accumulation: Accumulation) -> Self {
        Self {
            samples: VecDeque::with_capacity(size as usize),
            acc: [0; 4],
            size,
            accumulation,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.samples.len()
    }

    /// Start a new line from an explicit window.
    pub(crate) fn reset(&mut self, taps: impl IntoIterator<Item = [u32; 4]>) {
        self.samples.clear();
        self.samples.extend(taps);
        debug_assert_eq!(self.samples.len(), self.size as usize);

        let mut sum = [0u32; 4];
        for s in &self.samples {
            for c in 0..4 {
                sum[c] += s[c];
            }
        }
        self.acc = match self.accumulation {
            Accumulation::Truncating => sum.map(|v| v / self.size),
            Accumulation::Exact => sum,
        };
    }

    /// Drop the oldest sample and append `entering`.
    pub(crate) fn slide(&mut self, entering: [u32; 4]) {
        let Some(leaving) = self.samples.pop_front() else {
            unreachable!("sliding window is reset before it slides");
        };
        self.samples.push_back(entering);

        let size = self.size;
        for c in 0..4 {
            self.acc[c] = match self.accumulation {
                Accumulation::Truncating => self.acc[c]
                    .wrapping_sub(leaving[c] / size)
                    .wrapping_add(entering[c] / size),
                Accumulation::Exact => self.acc[c] - leaving[c] + entering[c],
            };
        }
    }

    /// Current window mean narrowed to 8 bits.
    pub(crate) fn mean(&self) -> [u8; 4] {
        match self.accumulation {
            // Low byte only.
            Accumulation::Truncating => self.acc.map(|v| v as u8),
            Accumulation::Exact => self.acc.map(|v| (v / self.size) as u8),
        }
    }
}

fn horizontal_pass(
    blur: &BoxBlur,
    src: &PixelBuffer,
    dst: &mut PixelBuffer,
    window: &mut SlidingWindow,
) {
    let stride = src.stride();
    let len = src.width() as usize;
    for y in 0..src.height() as usize {
        let line = Line {
            start: y * stride,
            step: 4,
            len,
        };
        blur_line(blur, src.as_bytes(), dst.as_bytes_mut(), line, window);
    }
}

fn vertical_pass(
    blur: &BoxBlur,
    src: &PixelBuffer,
    dst: &mut PixelBuffer,
    window: &mut SlidingWindow,
) {
    let stride = src.stride();
    let len = src.height() as usize;
    for x in 0..src.width() as usize {
        let line = Line {
            start: x * 4,
            step: stride,
            len,
        };
        blur_line(blur, src.as_bytes(), dst.as_bytes_mut(), line, window);
    }
}

/// A row or column addressed as `start + i * step` for `i` in `0..len`.
#[derive(Clone, Copy, Debug)]
struct Line {
    start: usize,
    step: usize,
    len: usize,
}

impl Line {
    fn offset(self, i: usize) -> usize {
        self.start + i * self.step
    }
}

fn blur_line(
    blur: &BoxBlur,
    src: &[u8],
    dst: &mut [u8],
    line: Line,
    window: &mut SlidingWindow,
) {
    let r = blur.radius as usize;
    let read = |i: usize| {
        let o = line.offset(i);
        [
            u32::from(src[o]),
            u32::from(src[o + 1]),
            u32::from(src[o + 2]),
            u32::from(src[o + 3]),
        ]
    };

    let reach = r as isize;
    window.reset((-reach..=reach).map(|k| read(blur.edge.initial_tap(k, line.len, r))));
    write_px(dst, line.offset(0), window.mean());

    for pos in 1..line.len {
        window.slide(read(blur.edge.entering_tap(pos, line.len, r)));
        debug_assert_eq!(window.len(), 2 * r + 1);
        write_px(dst, line.offset(pos), window.mean());
    }
}

fn write_px(dst: &mut [u8], offset: usize, px: [u8; 4]) {
    dst[offset..offset + 4].copy_from_slice(&px);
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
