//! pixfx is a small pixel-domain image filtering toolkit.
//!
//! Images are held fully in memory as [`PixelBuffer`]s (flat RGBA8, explicit
//! stride) and run through pure filter functions:
//!
//! - [`BoxBlur`]: separable box blur with a running window, amortized O(1) per
//!   pixel regardless of radius. Edge sampling is selected with [`EdgeMode`].
//! - [`EdgeDetector`]: luma reduction followed by the 3x3 Sobel kernel pair,
//!   producing a [`GrayBuffer`] two pixels smaller on each axis.
//! - [`blend`]: intersection-aware per-pixel merge of two buffers through a
//!   blend function such as [`overlay`].
//!
//! Decoding, encoding and resampling are thin wrappers over the `image` crate in
//! [`load_image`], [`save_image`] and [`resize_image`]. The [`pipeline`]
//! functions chain them into the commands exposed by the `pixfx` binary.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod buffer;
mod effects;
mod foundation;

pub mod pipeline;

pub use assets::codec::{load_image, resize_image, save_image};
pub use buffer::gray::GrayBuffer;
pub use buffer::pixel::PixelBuffer;
pub use effects::blur::{Accumulation, BoxBlur, EdgeMode, MAX_RADIUS};
pub use effects::composite::{blend, narrow, overlay, overlay_channel, tile, widen};
pub use effects::edge::{EdgeDetector, Narrowing, SOBEL_X, SOBEL_Y, gradients, grayscale, luma};
pub use foundation::core::{Bounds, Rgba8, Rgba16};
pub use foundation::error::{PixfxError, PixfxResult};
