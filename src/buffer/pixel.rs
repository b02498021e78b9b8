use image::{DynamicImage, RgbaImage};

use crate::foundation::core::{Bounds, Rgba8};
use crate::foundation::error::{PixfxError, PixfxResult};

const CHANNELS: usize = 4;

/// In-memory RGBA8 raster with explicit stride.
///
/// Pixel `(x, y)` occupies bytes `[y * stride + x * 4, y * stride + x * 4 + 4)` and
/// `stride == width * 4` always holds. Width and height are never zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    stride: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a buffer with every channel set to zero.
    pub fn new_blank(width: u32, height: u32) -> PixfxResult<Self> {
        Self::filled(width, height, [0; 4])
    }

    /// Allocate a buffer where every pixel is `px`.
    pub fn filled(width: u32, height: u32, px: Rgba8) -> PixfxResult<Self> {
        let len = byte_len(width, height)?;
        Ok(Self {
            width,
            height,
            stride: width as usize * CHANNELS,
            data: px.repeat(len / CHANNELS),
        })
    }

    /// Wrap raw RGBA8 bytes laid out row-major without padding.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> PixfxResult<Self> {
        let len = byte_len(width, height)?;
        if data.len() != len {
            return Err(PixfxError::invalid(format!(
                "pixel data length {} does not match {width}x{height} rgba8 ({len})",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            stride: width as usize * CHANNELS,
            data,
        })
    }

    /// Convert any decoded image into the canonical RGBA8 layout.
    pub fn from_image(img: &DynamicImage) -> PixfxResult<Self> {
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_raw(width, height, rgba.into_raw())
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Byte distance between consecutive rows.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Addressable region, anchored at the origin.
    pub fn bounds(&self) -> Bounds {
        Bounds::from_size(self.width, self.height)
    }

    /// Byte offset of the first channel of pixel `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics when `(x, y)` lies outside the buffer.
    pub fn pixel_offset(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} buffer",
            self.width,
            self.height
        );
        y as usize * self.stride + x as usize * CHANNELS
    }

    /// Read pixel `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics when `(x, y)` lies outside the buffer.
    pub fn get(&self, x: u32, y: u32) -> Rgba8 {
        let i = self.pixel_offset(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Write pixel `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics when `(x, y)` lies outside the buffer.
    pub fn set(&mut self, x: u32, y: u32, px: Rgba8) {
        let i = self.pixel_offset(x, y);
        self.data[i..i + CHANNELS].copy_from_slice(&px);
    }

    /// Raw RGBA8 bytes, `stride * height` long.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Hand the pixels to the `image` crate for encoding.
    pub fn into_rgba_image(self) -> RgbaImage {
        RgbaImage::from_raw(self.width, self.height, self.data)
            .unwrap_or_else(|| unreachable!("stride invariant guarantees a matching length"))
    }
}

impl From<PixelBuffer> for DynamicImage {
    fn from(buf: PixelBuffer) -> Self {
        DynamicImage::ImageRgba8(buf.into_rgba_image())
    }
}

fn byte_len(width: u32, height: u32) -> PixfxResult<usize> {
    if width == 0 || height == 0 {
        return Err(PixfxError::invalid(format!(
            "image size must be non-zero, got {width}x{height}"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(CHANNELS))
        .ok_or_else(|| PixfxError::invalid("pixel buffer size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/buffer/pixel.rs"]
mod tests;
