//! Core types for the tactile interaction engine.
//!
//! This crate is the host-independent half of tactile: it knows nothing
//! about rendering or physics solving. It provides:
//! - Geometric primitives: [`Point`], [`Vector`], [`Rect`], [`Transform2D`]
//! - Polygon paths and hit-testing: [`PolygonPath`]
//! - Pointer identity and raw events: [`PointerId`], [`PointerEvent`]
//! - The live pointer registry: [`InputState`]
//! - Motion history and velocity smoothing: [`MotionTracker`]
//! - One-shot deadline timers: [`TimerQueue`]
//! - Per-shape gesture interpretation: [`GestureTracker`]

mod event;
mod geometry;
mod gesture;
mod input;
mod motion;
mod path;
mod timer;

pub use event::{PointerEvent, PointerId, TouchId};
pub use geometry::{Point, Rect, Transform2D, Vector};
pub use gesture::{
    GestureTimerEvent, GestureTracker, PinchBaseline, LONG_PRESS_DELAY, TAP_WINDOW,
};
pub use input::InputState;
pub use motion::{MotionSample, MotionTracker};
pub use path::{PathError, PolygonPath};
pub use timer::{TimerHandle, TimerQueue};
