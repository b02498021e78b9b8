use image::GrayImage;

use crate::foundation::core::Bounds;
use crate::foundation::error::{PixfxError, PixfxResult};

/// Single-channel 8-bit raster.
///
/// `origin` records where pixel `(0, 0)` sits in the coordinates of the image it
/// was derived from; edge maps start at `(1, 1)` because the border is never
/// computed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayBuffer {
    width: u32,
    height: u32,
    origin: (i32, i32),
    data: Vec<u8>,
}

impl GrayBuffer {
    pub(crate) fn new(width: u32, height: u32, origin: (i32, i32)) -> PixfxResult<Self> {
        if width == 0 || height == 0 {
            return Err(PixfxError::invalid(format!(
                "gray buffer size must be non-zero, got {width}x{height}"
            )));
        }
        Ok(Self {
            width,
            height,
            origin,
            data: vec![0; width as usize * height as usize],
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Placement in the source image's coordinate space.
    pub fn bounds(&self) -> Bounds {
        let (x, y) = self.origin;
        Bounds::new(
            x,
            y,
            x + self.width as i32,
            y + self.height as i32,
        )
    }

    /// Read the sample at local `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics when `(x, y)` lies outside the buffer.
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.data[self.offset(x, y)]
    }

    pub(crate) fn set(&mut self, x: u32, y: u32, v: u8) {
        let i = self.offset(x, y);
        self.data[i] = v;
    }

    /// Raw samples, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Hand the samples to the `image` crate for encoding.
    pub fn into_gray_image(self) -> GrayImage {
        GrayImage::from_raw(self.width, self.height, self.data)
            .unwrap_or_else(|| unreachable!("gray buffer length matches its size"))
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "sample ({x}, {y}) outside {}x{} gray buffer",
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }
}
