use crate::buffer::pixel::PixelBuffer;
use crate::foundation::core::{Rgba8, Rgba16};
use crate::foundation::error::PixfxResult;

const MAX: f64 = 65535.0;
const MID: f64 = MAX / 2.0;

/// Scale an 8-bit pixel to 16 bits per channel (`c * 257`).
pub fn widen(px: Rgba8) -> Rgba16 {
    px.map(|c| (u16::from(c) << 8) | u16::from(c))
}

/// Drop a 16-bit pixel back to 8 bits per channel (`c >> 8`).
pub fn narrow(px: Rgba16) -> Rgba8 {
    px.map(|c| (c >> 8) as u8)
}

/// Merge `src` into `dst` with `blend_fn`, producing a buffer shaped like `dst`.
///
/// Both buffers are anchored at their own origin and compared coordinate for
/// coordinate. Inside the intersection of their bounds the output pixel is
/// `blend_fn(src, dst)` evaluated in 16-bit precision; everywhere else it is a
/// byte-for-byte copy of `dst`.
#[tracing::instrument(skip_all, fields(
    src = ?(src.width(), src.height()),
    dst = ?(dst.width(), dst.height())
))]
pub fn blend<F>(src: &PixelBuffer, dst: &PixelBuffer, blend_fn: F) -> PixelBuffer
where
    F: Fn(Rgba16, Rgba16) -> Rgba16,
{
    let mut out = dst.clone();
    let inter = dst.bounds().intersect(src.bounds());
    for y in inter.min_y..inter.max_y {
        for x in inter.min_x..inter.max_x {
            let (x, y) = (x as u32, y as u32);
            let px = blend_fn(widen(src.get(x, y)), widen(dst.get(x, y)));
            out.set(x, y, narrow(px));
        }
    }
    out
}

/// Overlay blend, applied to all four channels including alpha.
pub fn overlay(src: Rgba16, dst: Rgba16) -> Rgba16 {
    [
        overlay_channel(src[0], dst[0]),
        overlay_channel(src[1], dst[1]),
        overlay_channel(src[2], dst[2]),
        overlay_channel(src[3], dst[3]),
    ]
}

/// Overlay one 16-bit channel: multiply below mid-tone, screen above, chosen by
/// the destination value. Rounded half-up and clamped.
pub fn overlay_channel(src: u16, dst: u16) -> u16 {
    let (s, d) = (f64::from(src), f64::from(dst));
    let v = if d < MID {
        2.0 * s * d / MAX
    } else {
        MAX - 2.0 * (MAX - s) * (MAX - d) / MAX
    };
    to_u16(v)
}

fn to_u16(v: f64) -> u16 {
    (v + 0.5).floor().clamp(0.0, MAX) as u16
}

/// Paint `tile` repeatedly from the origin over a `width x height` layer.
/// Tiles crossing the right or bottom edge are clipped.
pub fn tile(tile: &PixelBuffer, width: u32, height: u32) -> PixfxResult<PixelBuffer> {
    let mut layer = PixelBuffer::new_blank(width, height)?;
    let (tw, th) = (tile.width(), tile.height());
    for y in 0..height {
        for x in 0..width {
            layer.set(x, y, tile.get(x % tw, y % th));
        }
    }
    Ok(layer)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
