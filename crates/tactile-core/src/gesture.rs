//! Multi-pointer gesture tracking for one interactive shape.
//!
//! A [`GestureTracker`] owns the set of pointers currently pressing its
//! shape, interprets them as a tap, a drag, or a two-finger pinch, and
//! drives a [`MotionTracker`] with the resulting positions so a release
//! velocity can be derived.

use crate::event::PointerId;
use crate::geometry::{Point, Transform2D, Vector};
use crate::input::InputState;
use crate::motion::MotionTracker;
use crate::timer::{TimerHandle, TimerQueue};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// How long after the first pointer-down the gesture may still resolve to
/// a tap.
pub const TAP_WINDOW: Duration = Duration::from_millis(200);

/// How long a stationary press takes to count as a long press.
pub const LONG_PRESS_DELAY: Duration = Duration::from_millis(1000);

/// Deadline events surfaced by [`GestureTracker::timer_fired`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureTimerEvent {
    /// The tap window closed; the gesture can no longer resolve to a tap.
    TapWindowElapsed,
    /// The press has been held for [`LONG_PRESS_DELAY`]. Extension point;
    /// the tracker attaches no behavior of its own.
    LongPress,
}

/// Snapshot taken when a second pointer engages, the reference for any
/// pinch interpretation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchBaseline {
    /// Distance between the two pointers, parent frame.
    pub distance: f32,
    /// Angle of the line between the two pointers, radians.
    pub angle: f32,
    /// Shape's scale at capture time. Recorded but not applied anywhere;
    /// reserved for pinch-to-scale.
    pub scale: f32,
    /// Shape's rotation at capture time, radians.
    pub rotation: f32,
}

/// Tracks the active pointers on one shape and their combined motion.
///
/// The centroid of all active pointers is the drag anchor: on every update
/// the shape is moved so the centroid keeps its original offset from the
/// shape's origin. Pointer locations are read live from [`InputState`];
/// positions are never cached at event time.
#[derive(Debug, Default)]
pub struct GestureTracker {
    motion: MotionTracker,
    active: HashMap<PointerId, Point>,
    touch_limit: usize,
    offset: Point,
    pinch: Option<PinchBaseline>,
    interpretable_as_tap: bool,
    long_press_fired: bool,
    tap_timer: Option<TimerHandle>,
    long_press_timer: Option<TimerHandle>,
}

impl GestureTracker {
    /// Create a tracker accepting a single pointer.
    #[must_use]
    pub fn new() -> Self {
        Self::with_touch_limit(1)
    }

    /// Create a tracker accepting up to `limit` simultaneous pointers.
    #[must_use]
    pub fn with_touch_limit(limit: usize) -> Self {
        Self {
            touch_limit: limit,
            ..Self::default()
        }
    }

    /// Number of pointers currently tracked.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Whether a pointer is currently tracked.
    #[must_use]
    pub fn contains(&self, id: PointerId) -> bool {
        self.active.contains_key(&id)
    }

    /// Maximum number of simultaneous pointers accepted.
    #[must_use]
    pub fn touch_limit(&self) -> usize {
        self.touch_limit
    }

    /// True once any position has been recorded in the current session.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.motion.is_tracking()
    }

    /// Whether the gesture can still resolve to a tap.
    #[must_use]
    pub fn is_interpretable_as_tap(&self) -> bool {
        self.interpretable_as_tap
    }

    /// Whether the long-press deadline fired during this session.
    #[must_use]
    pub fn long_press_fired(&self) -> bool {
        self.long_press_fired
    }

    /// The pinch reference captured when the second pointer engaged.
    #[must_use]
    pub fn pinch_baseline(&self) -> Option<&PinchBaseline> {
        self.pinch.as_ref()
    }

    /// Smoothed release velocity of the current session.
    #[must_use]
    pub fn smoothed_velocity(&self) -> Vector {
        self.motion.smoothed_velocity()
    }

    /// Idle time since the last recorded motion.
    #[must_use]
    pub fn time_since_last(&self, now: Instant) -> Duration {
        self.motion.time_since_last(now)
    }

    /// Begin tracking a pointer.
    ///
    /// No-op when the pointer is already tracked, has no known location, or
    /// the touch limit is reached. The first pointer opens the tap window
    /// and arms the long-press deadline; a second pointer captures the
    /// pinch baseline.
    pub fn add_pointer(
        &mut self,
        id: PointerId,
        input: &InputState,
        frame: &Transform2D,
        timers: &mut TimerQueue,
        now: Instant,
    ) {
        if self.active.len() >= self.touch_limit || self.active.contains_key(&id) {
            return;
        }
        let Some(location) = input.location(id) else {
            return;
        };

        let prior_count = self.active.len();
        self.active.insert(id, location);
        self.refresh_offset(input, frame);

        if prior_count == 0 {
            self.interpretable_as_tap = true;
            self.long_press_fired = false;
            self.tap_timer = Some(timers.schedule(now, TAP_WINDOW));
            self.long_press_timer = Some(timers.schedule(now, LONG_PRESS_DELAY));
        } else if prior_count == 1 {
            self.pinch = self.capture_pinch_baseline(input, frame);
        }
    }

    /// Stop tracking a pointer. Untracked pointers are ignored.
    ///
    /// Removing the last pointer ends the session: the motion history is
    /// discarded and any pending deadlines are invalidated.
    pub fn remove_pointer(
        &mut self,
        id: PointerId,
        input: &InputState,
        frame: &Transform2D,
        timers: &mut TimerQueue,
    ) {
        if self.active.remove(&id).is_none() {
            return;
        }

        if self.active.is_empty() {
            self.motion = MotionTracker::new();
            self.pinch = None;
            if let Some(handle) = self.tap_timer.take() {
                timers.cancel(handle);
            }
            if let Some(handle) = self.long_press_timer.take() {
                timers.cancel(handle);
            }
        } else {
            if self.active.len() < 2 {
                self.pinch = None;
            }
            self.refresh_offset(input, frame);
        }
    }

    /// Recompute the shape position from the current pointer centroid.
    ///
    /// Returns the new position of the shape's origin in the parent frame,
    /// or `None` when no pointer is active. The caller applies the position
    /// to the shape's transform; the tracker records it for velocity.
    pub fn update(
        &mut self,
        input: &InputState,
        frame: &Transform2D,
        now: Instant,
    ) -> Option<Point> {
        let centroid = self.centroid_in(input, frame)?;
        let position = frame.to_parent(centroid - self.offset);
        self.motion.record(position, now);
        Some(position)
    }

    /// Arithmetic mean of the active pointers' locations in a node's local
    /// frame. Insertion order never affects the result.
    #[must_use]
    pub fn centroid_in(&self, input: &InputState, frame: &Transform2D) -> Option<Point> {
        let mut sum = Point::ORIGIN;
        let mut count = 0usize;
        for id in self.active.keys() {
            if let Some(location) = input.location_in(*id, frame) {
                sum = sum + location;
                count += 1;
            }
        }
        if count == 0 {
            None
        } else {
            Some(Point::new(sum.x / count as f32, sum.y / count as f32))
        }
    }

    /// Route a fired deadline to this tracker. Handles belonging to other
    /// trackers are ignored.
    pub fn timer_fired(&mut self, handle: TimerHandle) -> Option<GestureTimerEvent> {
        if self.tap_timer == Some(handle) {
            self.tap_timer = None;
            self.interpretable_as_tap = false;
            Some(GestureTimerEvent::TapWindowElapsed)
        } else if self.long_press_timer == Some(handle) {
            self.long_press_timer = None;
            self.long_press_fired = true;
            Some(GestureTimerEvent::LongPress)
        } else {
            None
        }
    }

    fn refresh_offset(&mut self, input: &InputState, frame: &Transform2D) {
        if let Some(centroid) = self.centroid_in(input, frame) {
            self.offset = centroid;
        }
    }

    fn capture_pinch_baseline(
        &self,
        input: &InputState,
        frame: &Transform2D,
    ) -> Option<PinchBaseline> {
        let mut locations = self.active.keys().filter_map(|id| input.location(*id));
        let first = locations.next()?;
        let second = locations.next()?;

        Some(PinchBaseline {
            distance: first.distance(&second),
            angle: first.angle_to(&second),
            scale: frame.scale,
            rotation: frame.rotation,
        })
    }
}
