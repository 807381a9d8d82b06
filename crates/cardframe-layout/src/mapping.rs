#![forbid(unsafe_code)]

//! Coordinate conversions between normalized, container-pixel, and
//! video-frame spaces.
//!
//! The preview draws the video with cover scaling: the frame is scaled
//! uniformly until it fully fills the container, centered, with the
//! overflowing axis cropped. [`map_overlay_to_video_crop`] inverts that
//! drawing transform so a rectangle the user sees on the preview becomes
//! the matching region of the raw frame.
//!
//! # Invariants
//!
//! 1. [`map_overlay_to_video_crop`] results always satisfy
//!    `0 ≤ x`, `0 ≤ y`, `x + w ≤ videoW`, `y + h ≤ videoH`, so every crop
//!    request is satisfiable by the actual frame buffer regardless of
//!    rounding noise at the edges.
//! 2. All conversions are pure and bit-reproducible for identical inputs.
//!
//! # Failure Modes
//!
//! None of these functions fail. Degenerate container or video dimensions
//! are the caller's responsibility to avoid; if called anyway the results
//! may have zero area but contain no NaN or negative sizes after the
//! clamping step.

use cardframe_core::geometry::{Rect, Size, clamp};

use crate::NormRect;

/// Convert a normalized rectangle to container pixels, rounding each
/// component to the nearest whole pixel.
///
/// No clamping is re-applied; the input is assumed already valid (i.e. it
/// went through [`NormRect::clamped`]).
#[inline]
#[must_use]
pub fn normalized_to_px(r: NormRect, w: f32, h: f32) -> Rect {
    Rect {
        x: (r.x * w).round(),
        y: (r.y * h).round(),
        w: (r.w * w).round(),
        h: (r.h * h).round(),
    }
}

/// Convert a container-pixel rectangle to normalized coordinates, clamped
/// into the unit square.
///
/// Used to persist a user's custom guides after a drag or resize. Returns
/// a zero rectangle for a degenerate container.
#[must_use]
pub fn px_to_normalized(r: Rect, w: f32, h: f32) -> NormRect {
    if w <= 0.0 || h <= 0.0 {
        return NormRect::default();
    }

    NormRect {
        x: r.x / w,
        y: r.y / h,
        w: r.w / w,
        h: r.h / h,
    }
    .clamped()
}

/// Map a container-space overlay rectangle to a video-frame crop rectangle
/// under cover scaling.
///
/// The frame is scaled by `max(containerW/videoW, containerH/videoH)` and
/// centered; a container point maps back to the frame by adding the drawn
/// frame's offset and dividing by the scale. The result is clamped into
/// the frame.
#[must_use]
pub fn map_overlay_to_video_crop(container: Size, video: Size, overlay: Rect) -> Rect {
    let scale = (container.w / video.w).max(container.h / video.h);

    let offset_x = (video.w * scale - container.w) / 2.0;
    let offset_y = (video.h * scale - container.h) / 2.0;

    let x = (overlay.x + offset_x) / scale;
    let y = (overlay.y + offset_y) / scale;
    let w = overlay.w / scale;
    let h = overlay.h / scale;

    let cx = clamp(x, 0.0, video.w);
    let cy = clamp(y, 0.0, video.h);
    Rect {
        x: cx,
        y: cy,
        w: clamp(w, 0.0, video.w - cx),
        h: clamp(h, 0.0, video.h - cy),
    }
}
