//! A scene of interactive shapes driven by host pointer events.

use crate::physics::{NullPhysics, PhysicsBackend};
use crate::shape::{ReleaseOutcome, Shape, ShapeId};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tactile_core::{InputState, Point, PointerEvent, PointerId, Rect, TimerQueue};

/// Maximum press duration for a background tap.
const BACKGROUND_TAP_WINDOW: Duration = Duration::from_millis(100);

/// Maximum movement for a background tap, scene units.
const BACKGROUND_TAP_SLOP: f32 = 10.0;

type SceneShapeHandler = Box<dyn FnMut(ShapeId)>;

/// Scene-level aggregate callbacks, fired after the corresponding
/// shape-level handler.
#[derive(Default)]
struct SceneHandlers {
    on_shape_tapped: Option<SceneShapeHandler>,
    on_shape_moving: Option<SceneShapeHandler>,
    on_shape_moved: Option<SceneShapeHandler>,
    on_shape_exited: Option<SceneShapeHandler>,
    on_background_tapped: Option<Box<dyn FnMut(Point)>>,
    on_shape_collision: Option<Box<dyn FnMut(ShapeId, ShapeId)>>,
}

/// Owns shapes and routes input, timers, and simulation callbacks to them.
///
/// Everything runs on the host's event thread. The expected per-frame
/// order is: deliver pointer events via [`handle_event`], then
/// [`advance_timers`], then step the host physics simulation, then
/// [`post_physics`], then [`frame_completed`].
///
/// [`handle_event`]: ShapeScene::handle_event
/// [`advance_timers`]: ShapeScene::advance_timers
/// [`post_physics`]: ShapeScene::post_physics
/// [`frame_completed`]: ShapeScene::frame_completed
pub struct ShapeScene {
    bounds: Rect,
    shapes: Vec<Option<Shape>>,
    input: InputState,
    timers: TimerQueue,
    backend: Box<dyn PhysicsBackend>,
    captures: HashMap<PointerId, ShapeId>,
    tracked_exits: HashMap<ShapeId, bool>,
    background_press: Option<(PointerId, Point, Instant)>,
    handlers: SceneHandlers,
}

impl ShapeScene {
    /// Create a scene without a physics simulation.
    #[must_use]
    pub fn new(bounds: Rect) -> Self {
        Self::with_physics(bounds, Box::new(NullPhysics))
    }

    /// Create a scene backed by a physics simulation.
    #[must_use]
    pub fn with_physics(bounds: Rect, backend: Box<dyn PhysicsBackend>) -> Self {
        Self {
            bounds,
            shapes: Vec::new(),
            input: InputState::new(),
            timers: TimerQueue::new(),
            backend,
            captures: HashMap::new(),
            tracked_exits: HashMap::new(),
            background_press: None,
            handlers: SceneHandlers::default(),
        }
    }

    /// The scene's visible bounds.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Resize the visible bounds.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    // --- shape management -------------------------------------------------

    /// Add a shape; later additions sit above earlier ones for hit-testing.
    pub fn add(&mut self, shape: Shape) -> ShapeId {
        let id = ShapeId(self.shapes.len());
        self.shapes.push(Some(shape));
        id
    }

    /// Remove a shape. Its handle becomes invalid; pending captures and
    /// exit tracking for it are dropped.
    pub fn remove(&mut self, id: ShapeId) {
        if let Some(slot) = self.shapes.get_mut(id.0) {
            *slot = None;
        }
        self.captures.retain(|_, owner| *owner != id);
        self.tracked_exits.remove(&id);
    }

    /// Borrow a shape.
    #[must_use]
    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(id.0).and_then(Option::as_ref)
    }

    /// Mutably borrow a shape.
    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Handles of all live shapes, in insertion order.
    pub fn shape_ids(&self) -> impl Iterator<Item = ShapeId> + '_ {
        self.shapes
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|_| ShapeId(index)))
    }

    /// Enable or disable physics for a shape using the scene's backend.
    pub fn set_physics(&mut self, id: ShapeId, enabled: bool) {
        if let Some(shape) = self.shapes.get_mut(id.0).and_then(Option::as_mut) {
            if enabled {
                shape.enable_physics(&mut *self.backend);
            } else {
                shape.disable_physics();
            }
        }
    }

    /// Whether the shape's bounding box still intersects the scene bounds.
    #[must_use]
    pub fn is_in_scene(&self, id: ShapeId) -> bool {
        self.shape(id)
            .is_some_and(|shape| shape.frame().intersects(&self.bounds))
    }

    /// Start watching a shape for leaving the scene bounds.
    pub fn track_shape(&mut self, id: ShapeId) {
        let inside = self.is_in_scene(id);
        if self.shape(id).is_some() {
            self.tracked_exits.insert(id, inside);
        }
    }

    // --- scene-level handlers ---------------------------------------------

    /// Called after any shape's own tap handler.
    pub fn set_on_shape_tapped(&mut self, handler: impl FnMut(ShapeId) + 'static) {
        self.handlers.on_shape_tapped = Some(Box::new(handler));
    }

    /// Called after any shape's own moving handler.
    pub fn set_on_shape_moving(&mut self, handler: impl FnMut(ShapeId) + 'static) {
        self.handlers.on_shape_moving = Some(Box::new(handler));
    }

    /// Called after any shape's own moved handler.
    pub fn set_on_shape_moved(&mut self, handler: impl FnMut(ShapeId) + 'static) {
        self.handlers.on_shape_moved = Some(Box::new(handler));
    }

    /// Called after any shape's own exited-scene handler.
    pub fn set_on_shape_exited(&mut self, handler: impl FnMut(ShapeId) + 'static) {
        self.handlers.on_shape_exited = Some(Box::new(handler));
    }

    /// Called when a quick tap lands on no shape.
    pub fn set_on_background_tapped(&mut self, handler: impl FnMut(Point) + 'static) {
        self.handlers.on_background_tapped = Some(Box::new(handler));
    }

    /// Called once per contact event, after both shapes' own handlers.
    pub fn set_on_shape_collision(&mut self, handler: impl FnMut(ShapeId, ShapeId) + 'static) {
        self.handlers.on_shape_collision = Some(Box::new(handler));
    }

    // --- input routing ----------------------------------------------------

    /// Fold one raw pointer event into the scene.
    ///
    /// Downs are offered to shapes top-most first; the first shape whose
    /// outline contains the pointer captures it for the rest of its
    /// lifetime. Downs nobody claims start background-tap tracking.
    pub fn handle_event(&mut self, event: &PointerEvent, now: Instant) {
        self.input.apply(event);

        match *event {
            PointerEvent::Down { id, position } => self.route_down(id, position, now),
            PointerEvent::Moved { id, .. } => self.route_moved(id, now),
            PointerEvent::Up { id, position } => self.route_up(id, position, now),
            PointerEvent::Cancelled { id } => self.route_cancelled(id, now),
        }
    }

    fn route_down(&mut self, id: PointerId, position: Point, now: Instant) {
        for index in (0..self.shapes.len()).rev() {
            let Some(shape) = self.shapes[index].as_mut() else {
                continue;
            };
            if !shape.responds_to_touch() {
                continue;
            }
            if shape.pointers_began(&[id], &self.input, &mut *self.backend, &mut self.timers, now)
            {
                self.captures.insert(id, ShapeId(index));
                return;
            }
        }
        self.background_press = Some((id, position, now));
    }

    fn route_moved(&mut self, id: PointerId, now: Instant) {
        let Some(&owner) = self.captures.get(&id) else {
            return;
        };
        let Some(shape) = self.shapes.get_mut(owner.0).and_then(Option::as_mut) else {
            return;
        };
        if shape.pointers_moved(&[id], &self.input, now) {
            if let Some(handler) = self.handlers.on_shape_moving.as_mut() {
                handler(owner);
            }
        }
    }

    fn route_up(&mut self, id: PointerId, position: Point, now: Instant) {
        if let Some(owner) = self.captures.remove(&id) {
            let Some(shape) = self.shapes.get_mut(owner.0).and_then(Option::as_mut) else {
                return;
            };
            let outcome = shape.pointers_ended(&[id], &self.input, &mut self.timers, now);
            match outcome {
                ReleaseOutcome::Tapped => {
                    if let Some(handler) = self.handlers.on_shape_tapped.as_mut() {
                        handler(owner);
                    }
                }
                ReleaseOutcome::Moved => {
                    if let Some(handler) = self.handlers.on_shape_moved.as_mut() {
                        handler(owner);
                    }
                }
                ReleaseOutcome::Ignored | ReleaseOutcome::Cancelled => {}
            }
        } else if let Some((down_id, down_position, down_time)) = self.background_press.take() {
            if down_id != id {
                self.background_press = Some((down_id, down_position, down_time));
                return;
            }
            let within_slop = (position.x - down_position.x).abs() < BACKGROUND_TAP_SLOP
                && (position.y - down_position.y).abs() < BACKGROUND_TAP_SLOP;
            if within_slop && now - down_time <= BACKGROUND_TAP_WINDOW {
                if let Some(handler) = self.handlers.on_background_tapped.as_mut() {
                    handler(position);
                }
            }
        }
    }

    fn route_cancelled(&mut self, id: PointerId, now: Instant) {
        if let Some(owner) = self.captures.remove(&id) {
            if let Some(shape) = self.shapes.get_mut(owner.0).and_then(Option::as_mut) {
                shape.pointers_cancelled(&[id], &self.input, &mut self.timers, now);
            }
        } else if matches!(self.background_press, Some((down_id, _, _)) if down_id == id) {
            self.background_press = None;
        }
    }

    // --- frame hooks ------------------------------------------------------

    /// Drain due deadlines and route them to shape trackers.
    pub fn advance_timers(&mut self, now: Instant) {
        for handle in self.timers.fire_due(now) {
            for slot in &mut self.shapes {
                if let Some(shape) = slot.as_mut() {
                    if shape.timer_fired(handle).is_some() {
                        break;
                    }
                }
            }
        }
    }

    /// Re-suspend dragged bodies after the simulation step, so residual
    /// forces never move a shape the user is holding.
    pub fn post_physics(&mut self) {
        for slot in &mut self.shapes {
            if let Some(shape) = slot.as_mut() {
                if shape.is_tracking() && shape.has_physics() && !shape.is_immobile() {
                    shape.suspend_for_drag();
                }
            }
        }
    }

    /// End-of-frame scene-membership check. Fires `on_exited_scene` exactly
    /// once per inside→outside transition.
    pub fn frame_completed(&mut self) {
        let watched: Vec<ShapeId> = self.tracked_exits.keys().copied().collect();
        for id in watched {
            let inside = self.is_in_scene(id);
            let was_inside = self.tracked_exits.insert(id, inside);
            if was_inside == Some(true) && !inside {
                if let Some(shape) = self.shapes.get_mut(id.0).and_then(Option::as_mut) {
                    shape.exited_scene();
                }
                if let Some(handler) = self.handlers.on_shape_exited.as_mut() {
                    handler(id);
                }
            }
        }
    }

    /// Report a contact event from the physics backend. Each shape's own
    /// collision handler fires, then the scene aggregate, once per call.
    pub fn collision_began(&mut self, a: ShapeId, b: ShapeId) {
        if a == b || self.shape(a).is_none() || self.shape(b).is_none() {
            return;
        }
        if let Some(shape) = self.shapes.get_mut(a.0).and_then(Option::as_mut) {
            shape.collided_with(b);
        }
        if let Some(shape) = self.shapes.get_mut(b.0).and_then(Option::as_mut) {
            shape.collided_with(a);
        }
        if let Some(handler) = self.handlers.on_shape_collision.as_mut() {
            handler(a, b);
        }
    }
}
