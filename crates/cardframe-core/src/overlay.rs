#![forbid(unsafe_code)]

//! Interactive guide overlay: pointer-driven move/resize of one rectangle
//! among many.
//!
//! [`GuideOverlay`] is a stateful processor that consumes raw
//! [`PointerEvent`]s and emits [`OverlayEvent`]s describing selection
//! changes and updated rectangle sequences. The embedder renders the
//! rectangles and commits emitted sequences to storage; the machine itself
//! never touches a drawing surface.
//!
//! # State Machine
//!
//! The machine is either idle or running exactly one interaction session:
//!
//! - **Idle → Move**: pointer-down on a rectangle body while dragging is
//!   enabled. Captures the pointer-to-corner offset and a snapshot of all
//!   rectangles; subsequent deltas are computed against that snapshot.
//! - **Idle → Resize**: pointer-down on a corner handle of the *active*
//!   (selected) rectangle while resizing is enabled.
//! - **Move/Resize → Move/Resize**: pointer-moves with the session's
//!   pointer id recompute geometry and emit the full updated sequence.
//! - **Move/Resize → Idle**: pointer-up or pointer-cancel with the
//!   session's pointer id. Events from any other pointer are ignored.
//!
//! A pointer-down on a body also selects that rectangle (handles are shown
//! for the selection only); a pointer-down on empty background clears the
//! selection.
//!
//! # Invariants
//!
//! 1. At most one interaction session exists at a time; events from other
//!    pointers never disturb it.
//! 2. Emitted sequences have the same length and order as the input
//!    sequence; rectangles other than the manipulated one pass through
//!    unchanged.
//! 3. Geometry deltas are computed against the session-start snapshot, not
//!    the live rectangles, so intermediate rounding never accumulates.
//! 4. Manipulated rectangles stay within the container inset by
//!    [`OverlayConfig::safe_pad`], and never shrink below
//!    [`OverlayConfig::min_size`].
//! 5. During a resize the corner opposite the dragged handle stays pinned
//!    unless a boundary clamp forces the whole rectangle to shift.
//!
//! # Failure Modes
//!
//! - Pointer-moves while the container size is degenerate are dropped (the
//!   embedder has not measured the container yet).
//! - [`set_rects`](GuideOverlay::set_rects) with a shorter sequence ends
//!   any session whose index no longer exists.

use crate::event::{PointerEvent, PointerEventKind, PointerId};
use crate::geometry::{Rect, Size, clamp};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Capabilities and tuning for the overlay.
#[derive(Debug, Clone)]
pub struct OverlayConfig {
    /// Whether rectangle bodies can be dragged.
    pub draggable: bool,
    /// Whether the active rectangle's corner handles can be dragged.
    pub resizable: bool,
    /// Minimum width/height in pixels enforced during resize (default: 56).
    pub min_size: f32,
    /// Rendered border thickness; the clamping inset is derived from it
    /// (default: 3).
    pub stroke_width: f32,
    /// Half the side length of a corner handle's square hit area
    /// (default: 9, matching an 18 px rendered handle).
    pub handle_radius: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            draggable: false,
            resizable: false,
            min_size: 56.0,
            stroke_width: 3.0,
            handle_radius: 9.0,
        }
    }
}

impl OverlayConfig {
    /// Whether any pointer interaction is enabled at all.
    #[inline]
    #[must_use]
    pub fn interactive(&self) -> bool {
        self.draggable || self.resizable
    }

    /// Inset keeping the rendered stroke from clipping at container edges.
    #[inline]
    #[must_use]
    pub fn safe_pad(&self) -> f32 {
        ((self.stroke_width / 2.0).ceil() + 1.0).max(2.0)
    }
}

// ---------------------------------------------------------------------------
// Handles and sessions
// ---------------------------------------------------------------------------

/// A corner resize handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    /// Top-left.
    Nw,
    /// Top-right.
    Ne,
    /// Bottom-left.
    Sw,
    /// Bottom-right.
    Se,
}

impl Handle {
    /// All handles in hit-test order.
    pub const ALL: [Handle; 4] = [Handle::Nw, Handle::Ne, Handle::Sw, Handle::Se];

    /// The corner position of this handle on a rectangle.
    #[must_use]
    pub fn corner(self, r: &Rect) -> (f32, f32) {
        match self {
            Handle::Nw => (r.x, r.y),
            Handle::Ne => (r.right(), r.y),
            Handle::Sw => (r.x, r.bottom()),
            Handle::Se => (r.right(), r.bottom()),
        }
    }

    /// Whether dragging this handle moves the left edge.
    #[inline]
    fn moves_left_edge(self) -> bool {
        matches!(self, Handle::Nw | Handle::Sw)
    }

    /// Whether dragging this handle moves the top edge.
    #[inline]
    fn moves_top_edge(self) -> bool {
        matches!(self, Handle::Nw | Handle::Ne)
    }
}

/// The kind of interaction a session performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    /// The whole rectangle follows the pointer.
    Move,
    /// One corner follows the pointer; the opposite corner stays pinned.
    Resize,
}

/// An active interaction session. Deltas are computed against the
/// `start_rects` snapshot taken at pointer-down.
#[derive(Debug, Clone)]
enum Interaction {
    Move {
        index: usize,
        pointer: PointerId,
        offset: (f32, f32),
        start_rects: Vec<Rect>,
    },
    Resize {
        index: usize,
        pointer: PointerId,
        handle: Handle,
        start: Rect,
        start_pos: (f32, f32),
        start_rects: Vec<Rect>,
    },
}

impl Interaction {
    fn pointer(&self) -> PointerId {
        match self {
            Interaction::Move { pointer, .. } | Interaction::Resize { pointer, .. } => *pointer,
        }
    }

    fn index(&self) -> usize {
        match self {
            Interaction::Move { index, .. } | Interaction::Resize { index, .. } => *index,
        }
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Semantic output of the overlay state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayEvent {
    /// The active (selected) rectangle changed. `None` means the selection
    /// was cleared by a background press.
    SelectionChanged(Option<usize>),
    /// A move or resize session began on the rectangle at `index`.
    InteractionStarted {
        kind: InteractionKind,
        index: usize,
    },
    /// The full rectangle sequence after a pointer-move. Same length and
    /// order as the input sequence.
    RectsChanged(Vec<Rect>),
    /// The session ended (pointer-up or pointer-cancel).
    InteractionEnded,
}

// ---------------------------------------------------------------------------
// GuideOverlay
// ---------------------------------------------------------------------------

/// Pointer-driven overlay state machine.
///
/// Feed container-local [`PointerEvent`]s to
/// [`process`](GuideOverlay::process) and apply the returned
/// [`OverlayEvent`]s. Keep the machine's rectangle sequence and container
/// size current via [`set_rects`](GuideOverlay::set_rects) and
/// [`set_bounds`](GuideOverlay::set_bounds).
pub struct GuideOverlay {
    config: OverlayConfig,
    bounds: Size,
    rects: Vec<Rect>,
    active: Option<usize>,
    interaction: Option<Interaction>,
}

impl std::fmt::Debug for GuideOverlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuideOverlay")
            .field("rects", &self.rects.len())
            .field("active", &self.active)
            .field("interacting", &self.is_interacting())
            .finish()
    }
}

impl GuideOverlay {
    /// Create an idle overlay with no rectangles.
    #[must_use]
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            config,
            bounds: Size::default(),
            rects: Vec::new(),
            active: None,
            interaction: None,
        }
    }

    /// Replace the rectangle sequence.
    ///
    /// If the new sequence is shorter than the selection or session index,
    /// that state is dropped.
    pub fn set_rects(&mut self, rects: Vec<Rect>) {
        if self.active.is_some_and(|i| i >= rects.len()) {
            self.active = None;
        }
        if self
            .interaction
            .as_ref()
            .is_some_and(|s| s.index() >= rects.len())
        {
            self.interaction = None;
        }
        self.rects = rects;
    }

    /// Update the container size (resize/rotation signal).
    pub fn set_bounds(&mut self, bounds: Size) {
        self.bounds = bounds;
    }

    /// Current rectangle sequence.
    #[inline]
    #[must_use]
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    /// Index of the active (selected) rectangle, if any.
    #[inline]
    #[must_use]
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Whether a move/resize session is in progress.
    #[inline]
    #[must_use]
    pub fn is_interacting(&self) -> bool {
        self.interaction.is_some()
    }

    /// Get a reference to the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Update the configuration. An in-flight session keeps running.
    pub fn set_config(&mut self, config: OverlayConfig) {
        self.config = config;
    }

    /// Drop the session and selection, returning to idle.
    pub fn reset(&mut self) {
        self.active = None;
        self.interaction = None;
    }

    /// Process one pointer event, returning any semantic events produced.
    ///
    /// Ignores everything when neither dragging nor resizing is enabled.
    pub fn process(&mut self, event: &PointerEvent) -> Vec<OverlayEvent> {
        let mut out = Vec::with_capacity(2);

        if !self.config.interactive() {
            return out;
        }

        match event.kind {
            PointerEventKind::Down => self.on_down(event, &mut out),
            PointerEventKind::Move => self.on_move(event, &mut out),
            PointerEventKind::Up | PointerEventKind::Cancel => self.on_up(event, &mut out),
        }

        out
    }
}

// ---------------------------------------------------------------------------
// Internal event handlers
// ---------------------------------------------------------------------------

impl GuideOverlay {
    fn on_down(&mut self, event: &PointerEvent, out: &mut Vec<OverlayEvent>) {
        // Single-pointer by design: a second contact is ignored outright.
        if self.interaction.is_some() {
            return;
        }

        // Corner handles of the active rectangle win over bodies.
        if self.config.resizable
            && let Some(index) = self.active
            && let Some(rect) = self.rects.get(index).copied()
            && let Some(handle) = self.hit_handle(&rect, event.x, event.y)
        {
            tracing::debug!(index, ?handle, "resize session started");
            self.interaction = Some(Interaction::Resize {
                index,
                pointer: event.id,
                handle,
                start: rect,
                start_pos: (event.x, event.y),
                start_rects: self.rects.clone(),
            });
            out.push(OverlayEvent::InteractionStarted {
                kind: InteractionKind::Resize,
                index,
            });
            return;
        }

        // Bodies, topmost (last drawn) first.
        if let Some((index, rect)) = self
            .rects
            .iter()
            .enumerate()
            .rev()
            .find(|(_, r)| r.contains(event.x, event.y))
            .map(|(i, r)| (i, *r))
        {
            if self.active != Some(index) {
                self.active = Some(index);
                out.push(OverlayEvent::SelectionChanged(Some(index)));
            }
            if self.config.draggable {
                tracing::debug!(index, "move session started");
                self.interaction = Some(Interaction::Move {
                    index,
                    pointer: event.id,
                    offset: (event.x - rect.x, event.y - rect.y),
                    start_rects: self.rects.clone(),
                });
                out.push(OverlayEvent::InteractionStarted {
                    kind: InteractionKind::Move,
                    index,
                });
            }
            return;
        }

        // Background press clears the selection.
        if self.active.take().is_some() {
            out.push(OverlayEvent::SelectionChanged(None));
        }
    }

    fn on_move(&mut self, event: &PointerEvent, out: &mut Vec<OverlayEvent>) {
        if self.bounds.is_degenerate() {
            return;
        }

        let next = match &self.interaction {
            Some(session) if session.pointer() == event.id => match session {
                Interaction::Move {
                    index,
                    offset,
                    start_rects,
                    ..
                } => {
                    let Some(target) = start_rects.get(*index).copied() else {
                        return;
                    };
                    let moved = Rect {
                        x: event.x - offset.0,
                        y: event.y - offset.1,
                        ..target
                    }
                    .clamp_within(self.bounds, self.config.safe_pad());
                    Self::replace_at(start_rects, *index, moved)
                }
                Interaction::Resize {
                    index,
                    handle,
                    start,
                    start_pos,
                    start_rects,
                    ..
                } => {
                    let delta = (event.x - start_pos.0, event.y - start_pos.1);
                    let resized = self.resize_rect(*start, *handle, delta);
                    Self::replace_at(start_rects, *index, resized)
                }
            },
            _ => return,
        };

        self.rects = next.clone();
        out.push(OverlayEvent::RectsChanged(next));
    }

    fn on_up(&mut self, event: &PointerEvent, out: &mut Vec<OverlayEvent>) {
        if self
            .interaction
            .as_ref()
            .is_some_and(|s| s.pointer() == event.id)
        {
            tracing::debug!("interaction session ended");
            self.interaction = None;
            out.push(OverlayEvent::InteractionEnded);
        }
    }

    /// Find the handle whose square hit area contains the point, if any.
    fn hit_handle(&self, rect: &Rect, x: f32, y: f32) -> Option<Handle> {
        let r = self.config.handle_radius;
        Handle::ALL.into_iter().find(|h| {
            let (cx, cy) = h.corner(rect);
            (x - cx).abs() <= r && (y - cy).abs() <= r
        })
    }

    /// Apply a corner drag to the session-start rectangle.
    ///
    /// Order matters: delta, min-size floor, position clamp, size shrink to
    /// fit, then re-derive the position from the opposite fixed edge for
    /// handles that moved the left or top edge.
    fn resize_rect(&self, start: Rect, handle: Handle, (dx, dy): (f32, f32)) -> Rect {
        let pad = self.config.safe_pad();
        let (bw, bh) = (self.bounds.w, self.bounds.h);

        let (mut x, mut y, mut w, mut h) = match handle {
            Handle::Nw => (start.x + dx, start.y + dy, start.w - dx, start.h - dy),
            Handle::Ne => (start.x, start.y + dy, start.w + dx, start.h - dy),
            Handle::Sw => (start.x + dx, start.y, start.w - dx, start.h + dy),
            Handle::Se => (start.x, start.y, start.w + dx, start.h + dy),
        };

        w = w.max(self.config.min_size);
        h = h.max(self.config.min_size);

        x = clamp(x, pad, bw - pad - w);
        y = clamp(y, pad, bh - pad - h);

        w = w.min(bw - pad - x);
        h = h.min(bh - pad - y);

        if handle.moves_left_edge() {
            x = clamp(start.right() - w, pad, bw - pad - w);
        }
        if handle.moves_top_edge() {
            y = clamp(start.bottom() - h, pad, bh - pad - h);
        }

        Rect { x, y, w, h }
    }

    fn replace_at(rects: &[Rect], index: usize, rect: Rect) -> Vec<Rect> {
        let mut next = rects.to_vec();
        if let Some(slot) = next.get_mut(index) {
            *slot = rect;
        }
        next
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
