#![forbid(unsafe_code)]

//! Canonical pointer event types.
//!
//! The overlay state machine consumes a stream of [`PointerEvent`]s. The
//! embedder (whatever owns the real input surface) translates its native
//! events into these before calling in; positions are container-local
//! pixels, not client/screen coordinates.
//!
//! # Design Notes
//!
//! - One event per pointer transition; there is no coalescing here.
//! - `Cancel` carries the same meaning as `Up` for session teardown: the
//!   embedder sends it when the platform revokes pointer capture.
//! - Pointer ids are opaque; the machine only compares them for equality.

/// Opaque identifier for a pointer, matching the embedder's notion of
/// pointer identity (e.g. `PointerEvent.pointerId` on the web).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerId(pub i64);

/// What happened to the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    /// Pointer made contact (or button pressed).
    Down,
    /// Pointer moved while tracked.
    Move,
    /// Pointer released.
    Up,
    /// Tracking was aborted by the platform.
    Cancel,
}

/// A single pointer transition at a container-local position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Which pointer this event belongs to.
    pub id: PointerId,
    /// Horizontal position in container pixels.
    pub x: f32,
    /// Vertical position in container pixels.
    pub y: f32,
    /// The transition kind.
    pub kind: PointerEventKind,
}

impl PointerEvent {
    /// A pointer-down at the given position.
    #[must_use]
    pub const fn down(id: PointerId, x: f32, y: f32) -> Self {
        Self {
            id,
            x,
            y,
            kind: PointerEventKind::Down,
        }
    }

    /// A pointer-move to the given position.
    #[must_use]
    pub const fn move_to(id: PointerId, x: f32, y: f32) -> Self {
        Self {
            id,
            x,
            y,
            kind: PointerEventKind::Move,
        }
    }

    /// A pointer-up at the given position.
    #[must_use]
    pub const fn up(id: PointerId, x: f32, y: f32) -> Self {
        Self {
            id,
            x,
            y,
            kind: PointerEventKind::Up,
        }
    }

    /// A pointer-cancel at the given position.
    #[must_use]
    pub const fn cancel(id: PointerId, x: f32, y: f32) -> Self {
        Self {
            id,
            x,
            y,
            kind: PointerEventKind::Cancel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_kind() {
        let id = PointerId(7);
        assert_eq!(PointerEvent::down(id, 1.0, 2.0).kind, PointerEventKind::Down);
        assert_eq!(
            PointerEvent::move_to(id, 1.0, 2.0).kind,
            PointerEventKind::Move
        );
        assert_eq!(PointerEvent::up(id, 1.0, 2.0).kind, PointerEventKind::Up);
        assert_eq!(
            PointerEvent::cancel(id, 1.0, 2.0).kind,
            PointerEventKind::Cancel
        );
    }

    #[test]
    fn pointer_ids_compare_by_value() {
        assert_eq!(PointerId(3), PointerId(3));
        assert_ne!(PointerId(3), PointerId(4));
    }
}
