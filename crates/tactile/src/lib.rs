//! Tactile: interactive 2D shape scenes.
//!
//! A [`ShapeScene`] owns a set of [`Shape`]s and turns raw host pointer
//! events into taps, drags, long presses, and release flicks. Shapes can
//! participate in a host physics simulation through the [`PhysicsBackend`]
//! seam; while a shape is being dragged its body is swapped for an edge
//! collider so the simulation never fights the user's hand.
//!
//! The core primitives (geometry, paths, events, gesture tracking) live in
//! `tactile-core` and are re-exported here.
//!
//! # Example
//!
//! ```
//! use std::time::Instant;
//! use tactile::{Point, PointerEvent, PointerId, Rect, Shape, ShapeScene};
//!
//! let mut scene = ShapeScene::new(Rect::new(0.0, 0.0, 800.0, 600.0));
//! let ball = scene.add(Shape::oval(60.0, 60.0).unwrap());
//! scene
//!     .shape_mut(ball)
//!     .unwrap()
//!     .set_on_tapped(|| println!("tapped"));
//!
//! let now = Instant::now();
//! scene.handle_event(
//!     &PointerEvent::Down {
//!         id: PointerId::touch(1),
//!         position: Point::new(30.0, 30.0),
//!     },
//!     now,
//! );
//! ```

mod physics;
mod scene;
mod shape;

pub use physics::{NullBody, NullPhysics, PhysicsBackend, PhysicsBody};
pub use scene::ShapeScene;
pub use shape::{ReleaseOutcome, Shape, ShapeId, RELEASE_MOTION_WINDOW};

pub use tactile_core::{
    GestureTimerEvent, GestureTracker, InputState, MotionSample, MotionTracker, PathError,
    PinchBaseline, Point, PointerEvent, PointerId, PolygonPath, Rect, TimerHandle, TimerQueue,
    TouchId, Transform2D, Vector, LONG_PRESS_DELAY, TAP_WINDOW,
};
