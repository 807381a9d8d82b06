#![forbid(unsafe_code)]

//! Guide layout primitives and solvers.
//!
//! This crate computes where guide rectangles sit over a camera preview and
//! how they map onto the source video frame:
//!
//! - The auto-layout engine in this module places 2 or 3 guides for a given
//!   container aspect ratio, in normalized `[0, 1]` coordinates.
//! - [`mapping`] converts between normalized and pixel rectangles and maps
//!   container-space overlays to video-frame crops under cover scaling.
//! - [`capture`] turns overlay rectangles into concrete crop requests for a
//!   frame source.
//! - [`config`] is the persisted guide configuration with a total
//!   validating parser.
//! - [`resolver`] resolves custom-or-auto rectangles per container size,
//!   with memoization.
//!
//! All solvers are pure: identical inputs always produce identical outputs.

use serde::{Deserialize, Serialize};

pub use cardframe_core::geometry::{Rect, Size, clamp};

pub mod capture;
pub mod config;
pub mod mapping;
pub mod resolver;

// ---------------------------------------------------------------------------
// Layout tuning constants
// ---------------------------------------------------------------------------

/// Margin reserved on every container edge, as a fraction of each axis.
pub const MARGIN: f32 = 0.05;
/// Gap between adjacent guides, as a fraction of each axis.
pub const GAP: f32 = 0.03;
/// Band height for two stacked guides in a portrait container.
const TWO_PORTRAIT_BAND_H: f32 = 0.25;
/// Fraction of width kept clear between two side-by-side guides, leaving
/// room for a shared score area in the middle.
const TWO_LANDSCAPE_CENTER_GAP: f32 = 0.25;
/// Upper bound on side-band width for two side-by-side guides.
const TWO_LANDSCAPE_MAX_W: f32 = 0.42;
/// Band height of the top/bottom guides in the three-guide portrait layout.
const THREE_PORTRAIT_BAND_H: f32 = 0.22;
/// Width of the right-side guide in the three-guide portrait layout.
const THREE_PORTRAIT_SIDE_W: f32 = 0.42;
/// Floor on the middle guide's height when the bands leave little room.
const THREE_PORTRAIT_MIN_MID_H: f32 = 0.1;
/// Side-band width in the three-guide landscape layout.
const THREE_LANDSCAPE_SIDE_W: f32 = 0.26;
/// Top-box height in the three-guide landscape layout.
const THREE_LANDSCAPE_TOP_H: f32 = 0.26;
/// Minimum guide edge length enforced by the legacy pixel variant.
pub const MIN_GUIDE_PX: f32 = 140.0;

// ---------------------------------------------------------------------------
// Normalized rectangles
// ---------------------------------------------------------------------------

/// A rectangle in normalized container coordinates, each component in
/// `[0, 1]`.
///
/// This is the canonical persisted representation: it is
/// resolution-independent, so saved guides survive container resizes and
/// device rotation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormRect {
    /// Left edge as a fraction of container width.
    pub x: f32,
    /// Top edge as a fraction of container height.
    pub y: f32,
    /// Width as a fraction of container width.
    pub w: f32,
    /// Height as a fraction of container height.
    pub h: f32,
}

impl NormRect {
    /// Create a new normalized rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Clamp every component into `[0, 1]` and shrink the size so
    /// `x + w ≤ 1` and `y + h ≤ 1`.
    ///
    /// This is the enforcement step behind the normalized-rect invariant:
    /// every rectangle this crate produces or accepts for persistence
    /// passes through here.
    #[must_use]
    pub fn clamped(&self) -> NormRect {
        let x = clamp(self.x, 0.0, 1.0);
        let y = clamp(self.y, 0.0, 1.0);
        let w = clamp(self.w, 0.0, 1.0);
        let h = clamp(self.h, 0.0, 1.0);

        NormRect {
            x,
            y,
            w: w.min(1.0 - x),
            h: h.min(1.0 - y),
        }
    }
}

// ---------------------------------------------------------------------------
// Guide count
// ---------------------------------------------------------------------------

/// How many guides to lay out. The layout algorithm supports exactly two
/// or three; nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum GuideCount {
    /// Two guides.
    Two,
    /// Three guides.
    Three,
}

impl GuideCount {
    /// The number of guides as a plain count.
    #[inline]
    #[must_use]
    pub const fn count(self) -> usize {
        match self {
            GuideCount::Two => 2,
            GuideCount::Three => 3,
        }
    }
}

/// Error for a guide count outside `{2, 3}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidGuideCount(pub u8);

impl std::fmt::Display for InvalidGuideCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "guide count must be 2 or 3, got {}", self.0)
    }
}

impl std::error::Error for InvalidGuideCount {}

impl TryFrom<u8> for GuideCount {
    type Error = InvalidGuideCount;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(GuideCount::Two),
            3 => Ok(GuideCount::Three),
            other => Err(InvalidGuideCount(other)),
        }
    }
}

impl From<GuideCount> for u8 {
    fn from(value: GuideCount) -> Self {
        value.count() as u8
    }
}

// ---------------------------------------------------------------------------
// Auto-layout engine
// ---------------------------------------------------------------------------

/// Compute default guide placements in normalized coordinates.
///
/// Pure: no hidden state, identical inputs give identical outputs. Returns
/// an empty sequence for a degenerate container.
///
/// Output ordering is stable reading order and downstream labels depend on
/// it: two guides are `[top, bottom]` (portrait) or `[left, right]`
/// (landscape); three guides are `[top, right, bottom]` (portrait) or
/// `[left, top, right]` (landscape).
///
/// # Invariants
///
/// For any container with `w, h > 0`, every returned rectangle satisfies
/// `x ≥ 0`, `y ≥ 0`, `x + w ≤ 1`, `y + h ≤ 1`, and has positive size.
#[must_use]
pub fn compute_guides_auto(count: GuideCount, w: f32, h: f32) -> Vec<NormRect> {
    if w <= 0.0 || h <= 0.0 {
        return Vec::new();
    }

    let portrait = h >= w;
    let m = MARGIN;
    let g = GAP;

    let rects = match count {
        GuideCount::Two => {
            if portrait {
                // Stacked top/bottom bands spanning the usable width.
                let band_h = TWO_PORTRAIT_BAND_H;
                let top = NormRect::new(m, m, 1.0 - 2.0 * m, band_h);
                let bottom = NormRect::new(m, 1.0 - m - band_h, 1.0 - 2.0 * m, band_h);
                vec![top, bottom]
            } else {
                // Side-by-side bands with the center kept clear. The fixed
                // width is only an upper bound; narrow containers shrink
                // the bands instead of overlapping the center.
                let available = 1.0 - 2.0 * m - TWO_LANDSCAPE_CENTER_GAP;
                let band_w = TWO_LANDSCAPE_MAX_W.min(available / 2.0);
                let left = NormRect::new(m, m, band_w, 1.0 - 2.0 * m);
                let right = NormRect::new(1.0 - m - band_w, m, band_w, 1.0 - 2.0 * m);
                vec![left, right]
            }
        }
        GuideCount::Three => {
            if portrait {
                // Wide top and bottom bands with one side box on the right
                // filling the vertical gap between them.
                let band_h = THREE_PORTRAIT_BAND_H;
                let top_y = m;
                let bottom_y = 1.0 - m - band_h;

                let mid_top = top_y + band_h + g;
                let mid_bottom = bottom_y - g;
                let mid_h = (mid_bottom - mid_top).max(THREE_PORTRAIT_MIN_MID_H);

                let side_w = THREE_PORTRAIT_SIDE_W;
                let top = NormRect::new(m, top_y, 1.0 - 2.0 * m, band_h);
                let right = NormRect::new(1.0 - m - side_w, mid_top, side_w, mid_h);
                let bottom = NormRect::new(m, bottom_y, 1.0 - 2.0 * m, band_h);
                vec![top, right, bottom]
            } else {
                // Vertical side bands with one box centered in the
                // horizontal gap between them.
                let side_w = THREE_LANDSCAPE_SIDE_W;
                let left = NormRect::new(m, m, side_w, 1.0 - 2.0 * m);
                let right = NormRect::new(1.0 - m - side_w, m, side_w, 1.0 - 2.0 * m);

                let center_x = m + side_w + g;
                let center_w = 1.0 - 2.0 * m - 2.0 * side_w - 2.0 * g;
                let top = NormRect::new(center_x, m, center_w, THREE_LANDSCAPE_TOP_H);
                vec![left, top, right]
            }
        }
    };

    rects.into_iter().map(|r| r.clamped()).collect()
}

/// Legacy pixel-space variant of [`compute_guides_auto`].
///
/// Matches the normalized layout in spirit, then enforces an explicit
/// minimum edge length of [`MIN_GUIDE_PX`] (bounded by the container) so
/// guides remain usable targets on very small previews.
#[must_use]
pub fn compute_guides(count: GuideCount, w: f32, h: f32) -> Vec<Rect> {
    if w <= 0.0 || h <= 0.0 {
        return Vec::new();
    }

    compute_guides_auto(count, w, h)
        .iter()
        .map(|r| {
            let px = mapping::normalized_to_px(*r, w, h);
            let pw = px.w.max(MIN_GUIDE_PX.min(w));
            let ph = px.h.max(MIN_GUIDE_PX.min(h));
            Rect {
                x: clamp(px.x, 0.0, w - pw),
                y: clamp(px.y, 0.0, h - ph),
                w: pw,
                h: ph,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f32 = 1e-5;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn assert_contained(r: &NormRect) {
        assert!(r.x >= 0.0 && r.y >= 0.0, "origin out of range: {r:?}");
        assert!(r.x + r.w <= 1.0 + EPS, "right edge out of range: {r:?}");
        assert!(r.y + r.h <= 1.0 + EPS, "bottom edge out of range: {r:?}");
    }

    fn overlaps(a: &NormRect, b: &NormRect) -> bool {
        a.x < b.x + b.w && b.x < a.x + a.w && a.y < b.y + b.h && b.y < a.y + a.h
    }

    // --- NormRect tests ---

    #[test]
    fn clamped_limits_components() {
        let r = NormRect::new(-0.2, 0.5, 2.0, 0.3).clamped();
        assert_eq!(r.x, 0.0);
        assert_eq!(r.w, 1.0);
        assert_eq!(r.y, 0.5);
        assert_eq!(r.h, 0.3);
    }

    #[test]
    fn clamped_shrinks_overflow() {
        let r = NormRect::new(0.8, 0.9, 0.5, 0.5).clamped();
        assert_close(r.w, 0.2);
        assert_close(r.h, 0.1);
    }

    // --- GuideCount tests ---

    #[test]
    fn guide_count_conversions() {
        assert_eq!(GuideCount::try_from(2), Ok(GuideCount::Two));
        assert_eq!(GuideCount::try_from(3), Ok(GuideCount::Three));
        assert_eq!(GuideCount::try_from(4), Err(InvalidGuideCount(4)));
        assert_eq!(u8::from(GuideCount::Three), 3);
        assert_eq!(GuideCount::Two.count(), 2);
    }

    // --- Auto-layout tests ---

    #[test]
    fn degenerate_container_yields_empty() {
        assert!(compute_guides_auto(GuideCount::Two, 0.0, 100.0).is_empty());
        assert!(compute_guides_auto(GuideCount::Three, 100.0, -1.0).is_empty());
        assert!(compute_guides(GuideCount::Two, 0.0, 0.0).is_empty());
    }

    #[test]
    fn two_portrait_stacks_bands() {
        // 1080×1920 portrait phone preview.
        let rects = compute_guides_auto(GuideCount::Two, 1080.0, 1920.0);
        assert_eq!(rects.len(), 2);

        let (top, bottom) = (&rects[0], &rects[1]);
        assert_close(top.x, 0.05);
        assert_close(top.y, 0.05);
        assert_close(top.w, 0.90);
        assert_close(top.h, 0.25);
        assert_close(bottom.y, 0.70);
        assert_close(bottom.h, 0.25);

        // Full usable width, one clear gap, everything inside the margins.
        assert!(top.y + top.h < bottom.y);
        assert!(!overlaps(top, bottom));
        for r in &rects {
            assert!(r.x >= 0.05 - EPS && r.x + r.w <= 0.95 + EPS);
            assert!(r.y >= 0.05 - EPS && r.y + r.h <= 0.95 + EPS);
        }
    }

    #[test]
    fn two_landscape_keeps_center_clear() {
        let rects = compute_guides_auto(GuideCount::Two, 1920.0, 1080.0);
        assert_eq!(rects.len(), 2);

        let (left, right) = (&rects[0], &rects[1]);
        // Width capped by the available space, not the 0.42 bound:
        // (1 − 0.10 − 0.25) / 2 = 0.325.
        assert_close(left.w, 0.325);
        assert_close(right.w, 0.325);
        assert_close(left.x, 0.05);
        assert_close(right.x, 1.0 - 0.05 - 0.325);
        assert_close(left.h, 0.90);

        // The center score area stays empty.
        let gap = right.x - (left.x + left.w);
        assert_close(gap, 0.25);
    }

    #[test]
    fn three_portrait_is_top_right_bottom() {
        let rects = compute_guides_auto(GuideCount::Three, 1080.0, 1920.0);
        assert_eq!(rects.len(), 3);

        let (top, right, bottom) = (&rects[0], &rects[1], &rects[2]);
        assert_close(top.y, 0.05);
        assert_close(top.h, 0.22);
        assert_close(bottom.y, 1.0 - 0.05 - 0.22);
        assert_close(right.x, 1.0 - 0.05 - 0.42);
        assert_close(right.y, 0.05 + 0.22 + 0.03);
        assert_close(right.h, 0.40);

        for (a, b) in [(top, right), (top, bottom), (right, bottom)] {
            assert!(!overlaps(a, b), "{a:?} overlaps {b:?}");
        }
    }

    #[test]
    fn three_landscape_is_left_top_right() {
        // 1920×1080 landscape scenario.
        let rects = compute_guides_auto(GuideCount::Three, 1920.0, 1080.0);
        assert_eq!(rects.len(), 3);

        let (left, top, right) = (&rects[0], &rects[1], &rects[2]);
        assert_close(left.x, 0.05);
        assert_close(left.w, 0.26);
        assert_close(right.x, 1.0 - 0.05 - 0.26);
        assert_close(top.x, 0.05 + 0.26 + 0.03);
        assert_close(top.w, 1.0 - 0.10 - 0.52 - 0.06);
        assert_close(top.h, 0.26);

        for (a, b) in [(left, top), (left, right), (top, right)] {
            assert!(!overlaps(a, b), "{a:?} overlaps {b:?}");
        }
        // Total horizontal extent stays inside the container.
        assert!(right.x + right.w <= 1.0 + EPS);
    }

    #[test]
    fn three_portrait_middle_height_floor() {
        // A square-ish "portrait" container (h == w) uses the same formula;
        // the middle box never collapses below the floor.
        let rects = compute_guides_auto(GuideCount::Three, 500.0, 500.0);
        assert!(rects[1].h >= THREE_PORTRAIT_MIN_MID_H - EPS);
    }

    #[test]
    fn orientation_flips_at_square() {
        // h ≥ w counts as portrait, including the exact square.
        let square = compute_guides_auto(GuideCount::Two, 100.0, 100.0);
        assert_close(square[0].h, TWO_PORTRAIT_BAND_H);

        let wide = compute_guides_auto(GuideCount::Two, 101.0, 100.0);
        assert_close(wide[0].h, 0.90);
    }

    #[test]
    fn pixel_variant_matches_normalized_shape() {
        let norm = compute_guides_auto(GuideCount::Two, 1080.0, 1920.0);
        let px = compute_guides(GuideCount::Two, 1080.0, 1920.0);
        assert_eq!(px.len(), norm.len());
        for (n, p) in norm.iter().zip(&px) {
            assert!((n.x * 1080.0 - p.x).abs() <= 1.0);
            assert!((n.w * 1080.0 - p.w).abs() <= 1.0);
        }
    }

    #[test]
    fn pixel_variant_enforces_min_size() {
        // A small container: every guide is floored at the minimum edge
        // length, clamped into the container.
        let px = compute_guides(GuideCount::Two, 200.0, 300.0);
        for r in &px {
            assert!(r.w >= MIN_GUIDE_PX.min(200.0));
            assert!(r.h >= MIN_GUIDE_PX.min(300.0));
            assert!(r.x >= 0.0 && r.right() <= 200.0);
            assert!(r.y >= 0.0 && r.bottom() <= 300.0);
        }
    }

    #[test]
    fn layout_is_deterministic() {
        let a = compute_guides_auto(GuideCount::Three, 777.0, 333.0);
        let b = compute_guides_auto(GuideCount::Three, 777.0, 333.0);
        assert_eq!(a, b);
    }

    // --- Properties ---

    proptest! {
        #[test]
        fn guides_always_contained(
            count in prop_oneof![Just(GuideCount::Two), Just(GuideCount::Three)],
            w in 1.0f32..5000.0,
            h in 1.0f32..5000.0,
        ) {
            let rects = compute_guides_auto(count, w, h);
            prop_assert_eq!(rects.len(), count.count());
            for r in &rects {
                prop_assert!(r.x >= 0.0 && r.y >= 0.0);
                prop_assert!(r.x + r.w <= 1.0 + EPS);
                prop_assert!(r.y + r.h <= 1.0 + EPS);
                prop_assert!(r.w > 0.0 && r.h > 0.0);
            }
        }

        #[test]
        fn pixel_guides_always_contained(
            count in prop_oneof![Just(GuideCount::Two), Just(GuideCount::Three)],
            w in 1.0f32..5000.0,
            h in 1.0f32..5000.0,
        ) {
            for r in compute_guides(count, w, h) {
                prop_assert!(r.x >= 0.0 && r.y >= 0.0);
                prop_assert!(r.right() <= w + EPS);
                prop_assert!(r.bottom() <= h + EPS);
                prop_assert!(r.w > 0.0 && r.h > 0.0);
            }
        }
    }
}
