#![forbid(unsafe_code)]

//! Core: pointer events, geometry, and the interactive guide overlay.
//!
//! # Role in cardframe
//! `cardframe-core` is the input layer. It owns the canonical pointer event
//! types, the pixel-space geometry primitives, and the state machine that
//! turns raw pointer events into guide-rectangle manipulation.
//!
//! # Primary responsibilities
//! - **PointerEvent**: canonical down/move/up/cancel events in
//!   container-local pixels.
//! - **Rect / Size**: pixel-space geometry with clamping that never panics
//!   on collapsed intervals.
//! - **GuideOverlay**: single-pointer move/resize sessions over a rectangle
//!   sequence, with selection and whole-sequence emission.
//!
//! # How it fits in the system
//! The layout crate (`cardframe-layout`) produces normalized guide
//! rectangles and converts them to the pixel rectangles this crate
//! manipulates; after an interaction the embedder converts the emitted
//! pixel rectangles back to normalized space for persistence.

pub mod event;
pub mod geometry;
pub mod overlay;

pub use event::{PointerEvent, PointerEventKind, PointerId};
pub use geometry::{Rect, Size, clamp};
pub use overlay::{GuideOverlay, Handle, InteractionKind, OverlayConfig, OverlayEvent};
