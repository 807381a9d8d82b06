#![forbid(unsafe_code)]

//! Capture planning: turn overlay rectangles into crop requests against a
//! frame source.
//!
//! On capture, each guide's overlay rectangle becomes a region of the raw
//! video frame plus an output buffer size. Full-resolution crops from a
//! modern camera are heavy, so outputs are scaled down to a fixed target
//! width while preserving the crop's aspect ratio.

use cardframe_core::geometry::{Rect, Size};

use crate::mapping::map_overlay_to_video_crop;

/// Output width the planner scales crops to (preserving aspect ratio).
pub const DEFAULT_TARGET_WIDTH: f32 = 960.0;

/// A source of ready video frames.
///
/// This is the seam to the external camera/preview machinery: the engine
/// never acquires streams or manages device permissions, it only asks for
/// the current frame dimensions and requests region draws. Implementations
/// must only be called once a frame is actually available
/// ([`frame_size`](FrameSource::frame_size) non-degenerate); that readiness
/// check belongs to the embedder.
pub trait FrameSource {
    /// Pixel dimensions of the current frame.
    fn frame_size(&self) -> Size;

    /// Draw `crop` (frame pixels) into a fresh output buffer of
    /// `out_w × out_h` pixels.
    fn draw_region(&mut self, crop: Rect, out_w: u32, out_h: u32);
}

/// One planned crop: the frame region to extract and the output size to
/// scale it into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRequest {
    /// Region of the video frame, in frame pixels.
    pub crop: Rect,
    /// Output buffer width in pixels.
    pub out_w: u32,
    /// Output buffer height in pixels.
    pub out_h: u32,
}

impl CropRequest {
    /// Whether this request would produce an empty image. Callers skip
    /// these rather than drawing zero-area regions.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.crop.is_empty() || self.out_w == 0 || self.out_h == 0
    }
}

/// Plan one crop request per overlay rectangle.
///
/// Output sizes scale each crop to `target_width` (use
/// [`DEFAULT_TARGET_WIDTH`] unless the embedder has a reason not to),
/// never upscaling rounding into a division by zero: the scale divisor is
/// floored at one frame pixel.
#[must_use]
pub fn plan_capture(
    container: Size,
    video: Size,
    overlays: &[Rect],
    target_width: f32,
) -> Vec<CropRequest> {
    overlays
        .iter()
        .map(|overlay| {
            let crop = map_overlay_to_video_crop(container, video, *overlay);
            let scale = target_width / crop.w.max(1.0);
            CropRequest {
                crop,
                out_w: (crop.w * scale).round() as u32,
                out_h: (crop.h * scale).round() as u32,
            }
        })
        .collect()
}

/// Plan and execute a capture against a frame source, skipping empty
/// requests. Returns the number of regions drawn.
pub fn capture_guides(
    source: &mut dyn FrameSource,
    container: Size,
    overlays: &[Rect],
    target_width: f32,
) -> usize {
    let video = source.frame_size();
    if video.is_degenerate() || container.is_degenerate() {
        return 0;
    }

    let mut drawn = 0;
    for request in plan_capture(container, video, overlays, target_width) {
        if request.is_empty() {
            continue;
        }
        source.draw_region(request.crop, request.out_w, request.out_h);
        drawn += 1;
    }
    drawn
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Frame source double that records draw requests.
    struct RecordingSource {
        size: Size,
        draws: Vec<CropRequest>,
    }

    impl RecordingSource {
        fn new(w: f32, h: f32) -> Self {
            Self {
                size: Size::new(w, h),
                draws: Vec::new(),
            }
        }
    }

    impl FrameSource for RecordingSource {
        fn frame_size(&self) -> Size {
            self.size
        }

        fn draw_region(&mut self, crop: Rect, out_w: u32, out_h: u32) {
            self.draws.push(CropRequest { crop, out_w, out_h });
        }
    }

    #[test]
    fn plans_one_request_per_overlay() {
        let container = Size::new(1000.0, 1000.0);
        let video = Size::new(1000.0, 1000.0);
        let overlays = [
            Rect::new(0.0, 0.0, 480.0, 240.0),
            Rect::new(500.0, 500.0, 100.0, 100.0),
        ];

        let plan = plan_capture(container, video, &overlays, DEFAULT_TARGET_WIDTH);
        assert_eq!(plan.len(), 2);

        // 480-wide crop doubled to 960, aspect preserved.
        assert_eq!(plan[0].crop, Rect::new(0.0, 0.0, 480.0, 240.0));
        assert_eq!((plan[0].out_w, plan[0].out_h), (960, 480));
        assert_eq!((plan[1].out_w, plan[1].out_h), (960, 960));
    }

    #[test]
    fn zero_area_overlay_plans_empty_request() {
        let size = Size::new(1000.0, 1000.0);
        let plan = plan_capture(size, size, &[Rect::new(10.0, 10.0, 0.0, 50.0)], 960.0);
        assert!(plan[0].is_empty());
    }

    #[test]
    fn capture_skips_empty_requests() {
        let mut source = RecordingSource::new(1000.0, 1000.0);
        let overlays = [
            Rect::new(0.0, 0.0, 480.0, 240.0),
            Rect::new(10.0, 10.0, 0.0, 50.0),
        ];

        let drawn = capture_guides(
            &mut source,
            Size::new(1000.0, 1000.0),
            &overlays,
            DEFAULT_TARGET_WIDTH,
        );
        assert_eq!(drawn, 1);
        assert_eq!(source.draws.len(), 1);
        assert_eq!(source.draws[0].crop.w, 480.0);
    }

    #[test]
    fn capture_bails_on_unready_frame() {
        let mut source = RecordingSource::new(0.0, 0.0);
        let drawn = capture_guides(
            &mut source,
            Size::new(1000.0, 1000.0),
            &[Rect::new(0.0, 0.0, 100.0, 100.0)],
            DEFAULT_TARGET_WIDTH,
        );
        assert_eq!(drawn, 0);
        assert!(source.draws.is_empty());
    }

    #[test]
    fn capture_maps_through_cover_scaling() {
        // Container is the right half of a cover-scaled 2000×1000 frame in
        // a 1000×1000 container: overlays shift right by 500 frame pixels.
        let mut source = RecordingSource::new(2000.0, 1000.0);
        let drawn = capture_guides(
            &mut source,
            Size::new(1000.0, 1000.0),
            &[Rect::new(0.0, 0.0, 200.0, 200.0)],
            DEFAULT_TARGET_WIDTH,
        );
        assert_eq!(drawn, 1);
        assert_eq!(source.draws[0].crop, Rect::new(500.0, 0.0, 200.0, 200.0));
    }
}
