//! Interactive shapes: geometry, interaction state, and physics hand-off.

use crate::physics::{PhysicsBackend, PhysicsBody};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tactile_core::{
    GestureTimerEvent, GestureTracker, InputState, PathError, Point, PointerId, PolygonPath, Rect,
    TimerHandle, TimerQueue, Transform2D, Vector,
};

/// How recently the last motion must have happened for a release to carry
/// an impulse.
pub const RELEASE_MOTION_WINDOW: Duration = Duration::from_millis(100);

/// Handle identifying a shape within its scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeId(pub usize);

/// How a batch of lifted pointers resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReleaseOutcome {
    /// None of the lifted pointers were tracked by this shape, or pointers
    /// remain down on it.
    Ignored,
    /// The gesture resolved to a tap.
    Tapped,
    /// The gesture resolved to a completed drag.
    Moved,
    /// The host cancelled the interaction.
    Cancelled,
}

type Handler = Box<dyn FnMut()>;
type CollisionHandler = Box<dyn FnMut(ShapeId)>;

/// Optional per-shape callbacks. Each is the user-facing half of a
/// two-stage dispatch: the scene fires its aggregate handler after these.
#[derive(Default)]
struct ShapeHandlers {
    on_tapped: Option<Handler>,
    on_moving: Option<Handler>,
    on_moved: Option<Handler>,
    on_exited_scene: Option<Handler>,
    on_long_press: Option<Handler>,
    on_collision: Option<CollisionHandler>,
}

/// A two-dimensional shape the user can tap, drag, and flick.
///
/// A shape filters raw pointer events through its own hit test, feeds the
/// survivors to its [`GestureTracker`], and swaps its physics body out for
/// an edge collider while a drag is in progress so the simulation cannot
/// fight user-driven movement.
pub struct Shape {
    name: Option<String>,
    path: PolygonPath,
    transform: Transform2D,
    tracker: GestureTracker,
    body: Option<Box<dyn PhysicsBody>>,
    cached_body: Option<Box<dyn PhysicsBody>>,
    responds_to_touch: bool,
    draggable: bool,
    immobile: bool,
    affected_by_gravity: bool,
    handlers: ShapeHandlers,
}

impl Shape {
    /// Create a shape from a closed polygon.
    pub fn polygon(points: Vec<Point>) -> Result<Self, PathError> {
        Ok(Self::from_path(PolygonPath::new(points)?))
    }

    /// Create an oval shape with the given extents.
    pub fn oval(width: f32, height: f32) -> Result<Self, PathError> {
        Ok(Self::from_path(PolygonPath::ellipse(width, height)?))
    }

    fn from_path(path: PolygonPath) -> Self {
        Self {
            name: None,
            path,
            transform: Transform2D::IDENTITY,
            tracker: GestureTracker::with_touch_limit(2),
            body: None,
            cached_body: None,
            responds_to_touch: true,
            draggable: true,
            immobile: false,
            affected_by_gravity: true,
            handlers: ShapeHandlers::default(),
        }
    }

    /// Copy of this shape's geometry and flags. The physics body, handlers,
    /// and any in-flight gesture are not carried over.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        Self {
            name: self.name.clone(),
            path: self.path.clone(),
            transform: self.transform,
            tracker: GestureTracker::with_touch_limit(self.tracker.touch_limit()),
            body: None,
            cached_body: None,
            responds_to_touch: self.responds_to_touch,
            draggable: self.draggable,
            immobile: self.immobile,
            affected_by_gravity: self.affected_by_gravity,
            handlers: ShapeHandlers::default(),
        }
    }

    // --- geometry ---------------------------------------------------------

    /// The shape's outline in local space.
    #[must_use]
    pub fn path(&self) -> &PolygonPath {
        &self.path
    }

    /// Node placement within the parent frame.
    #[must_use]
    pub fn transform(&self) -> &Transform2D {
        &self.transform
    }

    /// Position of the shape's origin (lower-left of its bounding box).
    #[must_use]
    pub fn position(&self) -> Point {
        self.transform.translation
    }

    /// Move the shape's origin.
    pub fn set_position(&mut self, position: Point) {
        self.transform.translation = position;
    }

    /// Rotation in radians.
    #[must_use]
    pub fn angle(&self) -> f32 {
        self.transform.rotation
    }

    /// Set the rotation in radians.
    pub fn set_angle(&mut self, angle: f32) {
        self.transform.rotation = angle;
    }

    /// Axis-aligned bounding box in the parent frame.
    #[must_use]
    pub fn frame(&self) -> Rect {
        self.path
            .bounding_rect()
            .offset_by(self.transform.translation.x, self.transform.translation.y)
    }

    /// Whether a scene-frame point falls inside the shape's outline.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> bool {
        self.path.contains(self.transform.to_local(point))
    }

    // --- naming and flags -------------------------------------------------

    /// The shape's name, if set.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Name the shape.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Whether the shape reacts to pointers at all.
    #[must_use]
    pub fn responds_to_touch(&self) -> bool {
        self.responds_to_touch
    }

    /// Enable or disable pointer response. Supersedes `draggable`.
    pub fn set_responds_to_touch(&mut self, responds: bool) {
        self.responds_to_touch = responds;
    }

    /// Whether the shape can be dragged. A non-draggable shape still
    /// responds to taps.
    #[must_use]
    pub fn is_draggable(&self) -> bool {
        self.draggable
    }

    /// Enable or disable dragging.
    pub fn set_draggable(&mut self, draggable: bool) {
        self.draggable = draggable;
    }

    /// Whether the shape ignores simulation forces while still colliding.
    #[must_use]
    pub fn is_immobile(&self) -> bool {
        self.immobile
    }

    /// Fix the shape in place (or release it) within the simulation.
    pub fn set_immobile(&mut self, immobile: bool) {
        self.immobile = immobile;
        if let Some(body) = self.body.as_mut() {
            body.set_dynamic(!immobile);
        }
    }

    /// Whether gravity acts on the shape.
    #[must_use]
    pub fn is_affected_by_gravity(&self) -> bool {
        self.affected_by_gravity
    }

    /// Enable or disable gravity for the shape.
    pub fn set_affected_by_gravity(&mut self, affected: bool) {
        self.affected_by_gravity = affected;
        if let Some(body) = self.body.as_mut() {
            body.set_affected_by_gravity(affected);
        }
    }

    // --- physics ----------------------------------------------------------

    /// Whether the shape participates in the simulation (live or cached
    /// body present).
    #[must_use]
    pub fn has_physics(&self) -> bool {
        self.body.is_some() || self.cached_body.is_some()
    }

    /// Give the shape a solid polygon body from the backend.
    pub fn enable_physics(&mut self, backend: &mut dyn PhysicsBackend) {
        if self.has_physics() {
            return;
        }
        let mut body = backend.polygon_body(&self.path);
        body.set_affected_by_gravity(self.affected_by_gravity);
        body.set_dynamic(!self.immobile);
        self.body = Some(body);
    }

    /// Drop the shape's bodies, live and cached.
    pub fn disable_physics(&mut self) {
        self.body = None;
        self.cached_body = None;
    }

    /// Apply an impulse to the live body.
    pub fn apply_impulse(&mut self, impulse: Vector) {
        if let Some(body) = self.body.as_mut() {
            body.apply_impulse(impulse);
        }
    }

    /// Push the shape in a direction (degrees, 0 = straight up) with a
    /// given strength.
    pub fn push(&mut self, direction: f32, strength: f32) {
        self.apply_impulse(Vector::from_angle(direction, strength));
    }

    /// Zero the body's linear and angular velocity.
    pub fn stop_all_motion(&mut self) {
        if let Some(body) = self.body.as_mut() {
            body.set_velocity(Vector::ZERO);
            body.set_angular_velocity(0.0);
        }
    }

    /// Hold the body still while a drag is in progress: no gravity, no
    /// residual velocity. Called after each simulation step for tracked
    /// shapes.
    pub fn suspend_for_drag(&mut self) {
        if let Some(body) = self.body.as_mut() {
            body.set_affected_by_gravity(false);
            body.set_angular_velocity(0.0);
            body.set_velocity(Vector::ZERO);
        }
    }

    // --- handlers ---------------------------------------------------------

    /// Called when the user taps the shape.
    pub fn set_on_tapped(&mut self, handler: impl FnMut() + 'static) {
        self.handlers.on_tapped = Some(Box::new(handler));
    }

    /// Called repeatedly while the shape is being dragged.
    pub fn set_on_moving(&mut self, handler: impl FnMut() + 'static) {
        self.handlers.on_moving = Some(Box::new(handler));
    }

    /// Called when the user finishes dragging and lifts their finger.
    pub fn set_on_moved(&mut self, handler: impl FnMut() + 'static) {
        self.handlers.on_moved = Some(Box::new(handler));
    }

    /// Called once when the shape leaves the scene's visible bounds.
    pub fn set_on_exited_scene(&mut self, handler: impl FnMut() + 'static) {
        self.handlers.on_exited_scene = Some(Box::new(handler));
    }

    /// Called when a press is held for the long-press delay.
    pub fn set_on_long_press(&mut self, handler: impl FnMut() + 'static) {
        self.handlers.on_long_press = Some(Box::new(handler));
    }

    /// Called when the physics backend reports contact with another shape.
    pub fn set_on_collision(&mut self, handler: impl FnMut(ShapeId) + 'static) {
        self.handlers.on_collision = Some(Box::new(handler));
    }

    // --- interaction state machine ---------------------------------------

    /// The gesture tracker driving this shape.
    #[must_use]
    pub fn tracker(&self) -> &GestureTracker {
        &self.tracker
    }

    /// True while a drag session has recorded at least one position.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.tracker.is_tracking()
    }

    /// Offer newly-down pointers to the shape. Pointers outside the
    /// shape's outline are ignored; returns whether any were accepted.
    ///
    /// The first accepted pointer of a session suspends the body and, for
    /// physics shapes, swaps the live body for an edge collider (the
    /// original body is cached for the release).
    pub fn pointers_began(
        &mut self,
        ids: &[PointerId],
        input: &InputState,
        backend: &mut dyn PhysicsBackend,
        timers: &mut TimerQueue,
        now: Instant,
    ) -> bool {
        let accepted: Vec<PointerId> = ids
            .iter()
            .copied()
            .filter(|id| {
                input
                    .location(*id)
                    .is_some_and(|location| self.hit_test(location))
            })
            .collect();
        if accepted.is_empty() {
            return false;
        }

        if self.tracker.active_count() == 0 {
            if !self.immobile {
                self.suspend_for_drag();
            }
            if self.has_physics() {
                self.cached_body = self.body.take();
                self.body = Some(backend.edge_body(&self.path));
            }
        }

        for id in accepted {
            self.tracker
                .add_pointer(id, input, &self.transform, timers, now);
        }
        true
    }

    /// Drive the drag with moved pointers. Ignored for non-draggable
    /// shapes and for pointers the shape is not tracking. Returns whether
    /// the shape moved (the scene fires its aggregate callback on `true`).
    pub fn pointers_moved(&mut self, ids: &[PointerId], input: &InputState, now: Instant) -> bool {
        if !self.draggable {
            return false;
        }
        if !ids.iter().any(|id| self.tracker.contains(*id)) {
            return false;
        }

        let Some(position) = self.tracker.update(input, &self.transform, now) else {
            return false;
        };
        self.transform.translation = position;

        if let Some(handler) = self.handlers.on_moving.as_mut() {
            handler();
        }
        true
    }

    /// Complete the interaction for lifted pointers.
    pub fn pointers_ended(
        &mut self,
        ids: &[PointerId],
        input: &InputState,
        timers: &mut TimerQueue,
        now: Instant,
    ) -> ReleaseOutcome {
        self.end_pointers(ids, input, timers, now, false)
    }

    /// Abort the interaction for cancelled pointers. No tap/moved
    /// resolution and no release impulse.
    pub fn pointers_cancelled(
        &mut self,
        ids: &[PointerId],
        input: &InputState,
        timers: &mut TimerQueue,
        now: Instant,
    ) -> ReleaseOutcome {
        self.end_pointers(ids, input, timers, now, true)
    }

    /// Route a fired deadline to the shape's tracker.
    pub fn timer_fired(&mut self, handle: TimerHandle) -> Option<GestureTimerEvent> {
        let event = self.tracker.timer_fired(handle)?;
        if event == GestureTimerEvent::LongPress {
            if let Some(handler) = self.handlers.on_long_press.as_mut() {
                handler();
            }
        }
        Some(event)
    }

    /// Fire the shape-level collision handler.
    pub(crate) fn collided_with(&mut self, other: ShapeId) {
        if let Some(handler) = self.handlers.on_collision.as_mut() {
            handler(other);
        }
    }

    /// Fire the shape-level exited-scene handler.
    pub(crate) fn exited_scene(&mut self) {
        if let Some(handler) = self.handlers.on_exited_scene.as_mut() {
            handler();
        }
    }

    fn end_pointers(
        &mut self,
        ids: &[PointerId],
        input: &InputState,
        timers: &mut TimerQueue,
        now: Instant,
        cancelled: bool,
    ) -> ReleaseOutcome {
        let lifted: Vec<PointerId> = ids
            .iter()
            .copied()
            .filter(|id| self.tracker.contains(*id))
            .collect();
        if lifted.is_empty() {
            return ReleaseOutcome::Ignored;
        }

        // Partial lift: the session continues on the remaining pointers.
        if lifted.len() < self.tracker.active_count() {
            for id in lifted {
                self.tracker
                    .remove_pointer(id, input, &self.transform, timers);
            }
            return ReleaseOutcome::Ignored;
        }

        if self.has_physics() {
            if let Some(cached) = self.cached_body.take() {
                self.body = Some(cached);
            }
            if let Some(body) = self.body.as_mut() {
                body.set_affected_by_gravity(self.affected_by_gravity);
            }
        }

        let outcome = if cancelled {
            ReleaseOutcome::Cancelled
        } else {
            if !self.immobile && self.tracker.time_since_last(now) < RELEASE_MOTION_WINDOW {
                let impulse = self.tracker.smoothed_velocity();
                self.apply_impulse(impulse);
            }

            if self.tracker.is_interpretable_as_tap() {
                if let Some(handler) = self.handlers.on_tapped.as_mut() {
                    handler();
                }
                ReleaseOutcome::Tapped
            } else {
                if let Some(handler) = self.handlers.on_moved.as_mut() {
                    handler();
                }
                ReleaseOutcome::Moved
            }
        };

        for id in lifted {
            self.tracker
                .remove_pointer(id, input, &self.transform, timers);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tactile_core::PointerEvent;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        PolygonBody,
        EdgeBody,
        SetDynamic(bool),
        SetGravity(bool),
        SetVelocity(Vector),
        SetAngularVelocity(f32),
        Impulse(Vector),
    }

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<Call>>>);

    impl Recorder {
        fn calls(&self) -> Vec<Call> {
            self.0.borrow().clone()
        }

        fn push(&self, call: Call) {
            self.0.borrow_mut().push(call);
        }

        fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
            self.0.borrow().iter().filter(|call| predicate(call)).count()
        }
    }

    struct RecordingBody(Recorder);

    impl PhysicsBody for RecordingBody {
        fn set_dynamic(&mut self, dynamic: bool) {
            self.0.push(Call::SetDynamic(dynamic));
        }

        fn set_affected_by_gravity(&mut self, affected: bool) {
            self.0.push(Call::SetGravity(affected));
        }

        fn set_velocity(&mut self, velocity: Vector) {
            self.0.push(Call::SetVelocity(velocity));
        }

        fn set_angular_velocity(&mut self, velocity: f32) {
            self.0.push(Call::SetAngularVelocity(velocity));
        }

        fn apply_impulse(&mut self, impulse: Vector) {
            self.0.push(Call::Impulse(impulse));
        }
    }

    struct RecordingPhysics(Recorder);

    impl PhysicsBackend for RecordingPhysics {
        fn polygon_body(&mut self, _path: &PolygonPath) -> Box<dyn PhysicsBody> {
            self.0.push(Call::PolygonBody);
            Box::new(RecordingBody(self.0.clone()))
        }

        fn edge_body(&mut self, _path: &PolygonPath) -> Box<dyn PhysicsBody> {
            self.0.push(Call::EdgeBody);
            Box::new(RecordingBody(self.0.clone()))
        }
    }

    fn square() -> Shape {
        Shape::polygon(vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
            Point::new(0.0, 100.0),
        ])
        .unwrap()
    }

    fn press(input: &mut InputState, id: PointerId, position: Point) {
        input.apply(&PointerEvent::Down { id, position });
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn pointer_outside_outline_is_rejected() {
        let mut shape = square();
        let mut input = InputState::new();
        let mut timers = TimerQueue::new();
        let id = PointerId::touch(1);
        press(&mut input, id, Point::new(300.0, 300.0));

        let accepted = shape.pointers_began(
            &[id],
            &input,
            &mut crate::physics::NullPhysics,
            &mut timers,
            Instant::now(),
        );

        assert!(!accepted);
        assert_eq!(shape.tracker().active_count(), 0);
    }

    #[test]
    fn first_pointer_swaps_body_for_edge_collider() {
        let recorder = Recorder::default();
        let mut backend = RecordingPhysics(recorder.clone());
        let mut shape = square();
        shape.enable_physics(&mut backend);

        let mut input = InputState::new();
        let mut timers = TimerQueue::new();
        let id = PointerId::touch(1);
        press(&mut input, id, Point::new(50.0, 50.0));

        assert!(shape.pointers_began(&[id], &input, &mut backend, &mut timers, Instant::now()));
        assert_eq!(recorder.count(|call| *call == Call::PolygonBody), 1);
        assert_eq!(recorder.count(|call| *call == Call::EdgeBody), 1);
        assert!(shape.has_physics());
    }

    #[test]
    fn quick_release_resolves_as_tap() {
        let mut shape = square();
        let tapped = Rc::new(RefCell::new(0));
        let moved = Rc::new(RefCell::new(0));
        let tapped_clone = Rc::clone(&tapped);
        let moved_clone = Rc::clone(&moved);
        shape.set_on_tapped(move || *tapped_clone.borrow_mut() += 1);
        shape.set_on_moved(move || *moved_clone.borrow_mut() += 1);

        let mut input = InputState::new();
        let mut timers = TimerQueue::new();
        let mut backend = crate::physics::NullPhysics;
        let id = PointerId::touch(1);
        let t0 = Instant::now();
        press(&mut input, id, Point::new(50.0, 50.0));
        shape.pointers_began(&[id], &input, &mut backend, &mut timers, t0);

        input.apply(&PointerEvent::Up {
            id,
            position: Point::new(50.0, 50.0),
        });
        let outcome = shape.pointers_ended(&[id], &input, &mut timers, t0 + ms(50));

        assert_eq!(outcome, ReleaseOutcome::Tapped);
        assert_eq!(*tapped.borrow(), 1);
        assert_eq!(*moved.borrow(), 0);
        assert!(!shape.is_tracking());
    }

    #[test]
    fn drag_past_tap_window_resolves_as_moved_with_impulse() {
        let recorder = Recorder::default();
        let mut backend = RecordingPhysics(recorder.clone());
        let mut shape = square();
        shape.enable_physics(&mut backend);

        let mut input = InputState::new();
        let mut timers = TimerQueue::new();
        let id = PointerId::touch(1);
        let t0 = Instant::now();
        press(&mut input, id, Point::new(50.0, 50.0));
        shape.pointers_began(&[id], &input, &mut backend, &mut timers, t0);

        for handle in timers.fire_due(t0 + ms(250)) {
            shape.timer_fired(handle);
        }

        for step in 1..=5 {
            let x = 50.0 + 40.0 * step as f32;
            input.apply(&PointerEvent::Moved {
                id,
                position: Point::new(x, 50.0),
            });
            assert!(shape.pointers_moved(&[id], &input, t0 + ms(250 + step * 10)));
        }
        assert!((shape.position().x - 200.0).abs() < 1e-3);

        input.apply(&PointerEvent::Up {
            id,
            position: Point::new(250.0, 50.0),
        });
        let outcome = shape.pointers_ended(&[id], &input, &mut timers, t0 + ms(310));

        assert_eq!(outcome, ReleaseOutcome::Moved);
        let impulses: Vec<Vector> = recorder
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Impulse(vector) => Some(vector),
                _ => None,
            })
            .collect();
        assert_eq!(impulses.len(), 1);
        assert!(impulses[0].dx > 0.0);
    }

    #[test]
    fn release_after_idle_hold_skips_impulse() {
        let recorder = Recorder::default();
        let mut backend = RecordingPhysics(recorder.clone());
        let mut shape = square();
        shape.enable_physics(&mut backend);

        let mut input = InputState::new();
        let mut timers = TimerQueue::new();
        let id = PointerId::touch(1);
        let t0 = Instant::now();
        press(&mut input, id, Point::new(50.0, 50.0));
        shape.pointers_began(&[id], &input, &mut backend, &mut timers, t0);

        for handle in timers.fire_due(t0 + ms(250)) {
            shape.timer_fired(handle);
        }
        input.apply(&PointerEvent::Moved {
            id,
            position: Point::new(120.0, 50.0),
        });
        shape.pointers_moved(&[id], &input, t0 + ms(260));

        // Held still for half a second before letting go.
        input.apply(&PointerEvent::Up {
            id,
            position: Point::new(120.0, 50.0),
        });
        let outcome = shape.pointers_ended(&[id], &input, &mut timers, t0 + ms(760));

        assert_eq!(outcome, ReleaseOutcome::Moved);
        assert_eq!(recorder.count(|call| matches!(call, Call::Impulse(_))), 0);
    }

    #[test]
    fn non_draggable_shape_still_taps_but_never_moves() {
        let mut shape = square();
        shape.set_draggable(false);

        let mut input = InputState::new();
        let mut timers = TimerQueue::new();
        let mut backend = crate::physics::NullPhysics;
        let id = PointerId::touch(1);
        let t0 = Instant::now();
        press(&mut input, id, Point::new(50.0, 50.0));
        shape.pointers_began(&[id], &input, &mut backend, &mut timers, t0);

        input.apply(&PointerEvent::Moved {
            id,
            position: Point::new(90.0, 50.0),
        });
        assert!(!shape.pointers_moved(&[id], &input, t0 + ms(30)));
        assert_eq!(shape.position(), Point::ORIGIN);

        input.apply(&PointerEvent::Up {
            id,
            position: Point::new(90.0, 50.0),
        });
        let outcome = shape.pointers_ended(&[id], &input, &mut timers, t0 + ms(60));
        assert_eq!(outcome, ReleaseOutcome::Tapped);
    }

    #[test]
    fn cancellation_restores_body_without_callbacks() {
        let recorder = Recorder::default();
        let mut backend = RecordingPhysics(recorder.clone());
        let mut shape = square();
        shape.enable_physics(&mut backend);
        let tapped = Rc::new(RefCell::new(0));
        let tapped_clone = Rc::clone(&tapped);
        shape.set_on_tapped(move || *tapped_clone.borrow_mut() += 1);

        let mut input = InputState::new();
        let mut timers = TimerQueue::new();
        let id = PointerId::touch(1);
        let t0 = Instant::now();
        press(&mut input, id, Point::new(50.0, 50.0));
        shape.pointers_began(&[id], &input, &mut backend, &mut timers, t0);

        input.apply(&PointerEvent::Cancelled { id });
        let outcome = shape.pointers_cancelled(&[id], &input, &mut timers, t0 + ms(40));

        assert_eq!(outcome, ReleaseOutcome::Cancelled);
        assert_eq!(*tapped.borrow(), 0);
        assert_eq!(recorder.count(|call| matches!(call, Call::Impulse(_))), 0);
        // Gravity is re-applied to the restored body on the way out.
        assert!(recorder.count(|call| *call == Call::SetGravity(true)) >= 1);
    }

    #[test]
    fn partial_lift_keeps_the_session_alive() {
        let mut shape = square();
        let mut input = InputState::new();
        let mut timers = TimerQueue::new();
        let mut backend = crate::physics::NullPhysics;
        let first = PointerId::touch(1);
        let second = PointerId::touch(2);
        let t0 = Instant::now();

        press(&mut input, first, Point::new(40.0, 50.0));
        shape.pointers_began(&[first], &input, &mut backend, &mut timers, t0);
        press(&mut input, second, Point::new(60.0, 50.0));
        shape.pointers_began(&[second], &input, &mut backend, &mut timers, t0 + ms(20));
        assert_eq!(shape.tracker().active_count(), 2);

        input.apply(&PointerEvent::Up {
            id: second,
            position: Point::new(60.0, 50.0),
        });
        let outcome = shape.pointers_ended(&[second], &input, &mut timers, t0 + ms(40));

        assert_eq!(outcome, ReleaseOutcome::Ignored);
        assert_eq!(shape.tracker().active_count(), 1);
        assert!(shape.tracker().contains(first));
    }

    #[test]
    fn long_press_timer_reaches_handler() {
        let mut shape = square();
        let pressed = Rc::new(RefCell::new(0));
        let pressed_clone = Rc::clone(&pressed);
        shape.set_on_long_press(move || *pressed_clone.borrow_mut() += 1);

        let mut input = InputState::new();
        let mut timers = TimerQueue::new();
        let mut backend = crate::physics::NullPhysics;
        let id = PointerId::touch(1);
        let t0 = Instant::now();
        press(&mut input, id, Point::new(50.0, 50.0));
        shape.pointers_began(&[id], &input, &mut backend, &mut timers, t0);

        for handle in timers.fire_due(t0 + ms(1100)) {
            shape.timer_fired(handle);
        }

        assert_eq!(*pressed.borrow(), 1);
        assert!(shape.tracker().long_press_fired());
    }

    #[test]
    fn immobile_flag_drives_body_dynamics() {
        let recorder = Recorder::default();
        let mut backend = RecordingPhysics(recorder.clone());
        let mut shape = square();
        shape.enable_physics(&mut backend);

        shape.set_immobile(true);
        shape.set_immobile(false);

        assert_eq!(recorder.count(|call| *call == Call::SetDynamic(false)), 1);
        // Once at enable (not immobile) and once on release of the flag.
        assert_eq!(recorder.count(|call| *call == Call::SetDynamic(true)), 2);
    }

    #[test]
    fn hit_test_tracks_the_transform() {
        let mut shape = square();
        shape.set_position(Point::new(500.0, 500.0));

        assert!(shape.hit_test(Point::new(550.0, 550.0)));
        assert!(!shape.hit_test(Point::new(50.0, 50.0)));
        let frame = shape.frame();
        assert!((frame.x - 500.0).abs() < 1e-6);
        assert!((frame.y - 500.0).abs() < 1e-6);
    }

    #[test]
    fn shape_id_serde_roundtrip() {
        let id = ShapeId(7);
        let json = serde_json::to_string(&id).unwrap();
        let back: ShapeId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    proptest! {
        // Wherever the pointer wanders, the shape's origin stays at a
        // fixed offset from it.
        #[test]
        fn prop_drag_preserves_grab_offset(
            start in (10.0f32..90.0, 10.0f32..90.0),
            steps in proptest::collection::vec((-600.0f32..600.0, -600.0f32..600.0), 1..20),
        ) {
            let mut shape = square();
            let mut input = InputState::new();
            let mut timers = TimerQueue::new();
            let mut backend = crate::physics::NullPhysics;
            let id = PointerId::touch(1);
            let t0 = Instant::now();

            let grab = Point::new(start.0, start.1);
            press(&mut input, id, grab);
            shape.pointers_began(&[id], &input, &mut backend, &mut timers, t0);

            let mut last = grab;
            for (step, (x, y)) in steps.iter().enumerate() {
                last = Point::new(*x, *y);
                input.apply(&PointerEvent::Moved { id, position: last });
                shape.pointers_moved(&[id], &input, t0 + ms(10 * (step as u64 + 1)));
            }

            let position = shape.position();
            prop_assert!((position.x - (last.x - grab.x)).abs() < 1e-2);
            prop_assert!((position.y - (last.y - grab.y)).abs() < 1e-2);
        }
    }
}
