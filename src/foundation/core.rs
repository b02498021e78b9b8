/// One RGBA pixel with 8-bit channels.
pub type Rgba8 = [u8; 4];

/// One RGBA pixel with 16-bit channels, used as blend intermediate precision.
pub type Rgba16 = [u16; 4];

/// Axis-aligned integer rectangle, half-open on the max side.
///
/// A rectangle with `min >= max` on either axis is empty. All empty rectangles
/// compare equal to [`Bounds::default`] once produced by [`Bounds::intersect`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bounds {
    /// Inclusive left edge.
    pub min_x: i32,
    /// Inclusive top edge.
    pub min_y: i32,
    /// Exclusive right edge.
    pub max_x: i32,
    /// Exclusive bottom edge.
    pub max_y: i32,
}

impl Bounds {
    /// Build a rectangle from its edges.
    pub fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Rectangle anchored at the origin covering `width x height` pixels.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, to_i32(width), to_i32(height))
    }

    /// Horizontal extent (zero when empty).
    pub fn width(self) -> u32 {
        self.max_x.saturating_sub(self.min_x).max(0) as u32
    }

    /// Vertical extent (zero when empty).
    pub fn height(self) -> u32 {
        self.max_y.saturating_sub(self.min_y).max(0) as u32
    }

    /// True when the rectangle covers no pixel.
    pub fn is_empty(self) -> bool {
        self.min_x >= self.max_x || self.min_y >= self.max_y
    }

    /// True when `(x, y)` lies inside the rectangle.
    pub fn contains(self, x: i32, y: i32) -> bool {
        self.min_x <= x && x < self.max_x && self.min_y <= y && y < self.max_y
    }

    /// Largest rectangle contained in both `self` and `other`.
    pub fn intersect(self, other: Bounds) -> Bounds {
        let out = Bounds::new(
            self.min_x.max(other.min_x),
            self.min_y.max(other.min_y),
            self.max_x.min(other.max_x),
            self.max_y.min(other.max_y),
        );
        if out.is_empty() { Bounds::default() } else { out }
    }
}

fn to_i32(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
