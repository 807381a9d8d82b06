#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All coordinates are container-local pixels (origin at the container's
//! top-left), stored as `f32` because pointer events deliver fractional
//! positions. Widths and heights are never negative after construction
//! through the provided operations.

/// Clamp `v` into `[lo, hi]`, with `lo` winning when the interval is empty.
///
/// This is deliberately not [`f32::clamp`], which panics when `lo > hi`.
/// During overlay manipulation the interval collapses whenever a rectangle
/// is larger than the container inset; the low bound must win so the
/// rectangle pins to the top-left instead of panicking.
#[inline]
#[must_use]
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    v.min(hi).max(lo)
}

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Width in pixels.
    pub w: f32,
    /// Height in pixels.
    pub h: f32,
}

impl Size {
    /// Create a new size.
    #[inline]
    #[must_use]
    pub const fn new(w: f32, h: f32) -> Self {
        Self { w, h }
    }

    /// Whether either dimension is zero or negative.
    ///
    /// Degenerate sizes occur before the container has been measured or
    /// before the first video frame has arrived; callers skip work on them.
    #[inline]
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }
}

impl From<(f32, f32)> for Size {
    fn from((w, h): (f32, f32)) -> Self {
        Self { w, h }
    }
}

/// A rectangle in container-local pixels.
///
/// Used for overlay bounds, hit testing, and crop regions. The origin is
/// the container's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width in pixels.
    pub w: f32,
    /// Height in pixels.
    pub h: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge (`x + w`).
    #[inline]
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge (`y + h`).
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Area in square pixels.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f32 {
        self.w * self.h
    }

    /// Whether the rectangle has zero (or negative) area.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    /// Whether a point lies inside the rectangle.
    ///
    /// Left/top edges are inclusive, right/bottom exclusive, so adjacent
    /// rectangles never both claim a shared border point.
    #[inline]
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Move the rectangle so it lies fully within `bounds` inset by `pad`
    /// on every side. Size is unchanged; position pins to the top-left
    /// inset corner when the rectangle is too large to fit.
    #[must_use]
    pub fn clamp_within(&self, bounds: Size, pad: f32) -> Rect {
        Rect {
            x: clamp(self.x, pad, bounds.w - pad - self.w),
            y: clamp(self.y, pad, bounds.h - pad - self.h),
            w: self.w,
            h: self.h,
        }
    }
}
