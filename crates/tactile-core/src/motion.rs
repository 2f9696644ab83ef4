//! Bounded position history with velocity smoothing.

use crate::geometry::{Point, Vector};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Maximum number of samples retained.
const HISTORY_CAPACITY: usize = 10;

/// Gain converting the pixel-space speed estimate into an
/// impulse-appropriate magnitude for the physics backend.
const IMPULSE_GAIN: f32 = 20.0;

/// One recorded position. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSample {
    /// Position in the parent frame.
    pub position: Point,
    /// Monotonic time the sample was taken.
    pub timestamp: Instant,
}

/// Records a drag session's recent positions and derives a smoothed
/// release velocity from them.
///
/// One tracker serves one drag session: it is created fresh when the first
/// pointer goes down and replaced with a fresh instance when the last
/// pointer lifts.
#[derive(Debug, Clone, Default)]
pub struct MotionTracker {
    initial: Option<MotionSample>,
    history: VecDeque<MotionSample>,
}

impl MotionTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample, evicting the oldest entries to keep at most
    /// [`HISTORY_CAPACITY`] samples. The first sample ever recorded is also
    /// retained as the session's initial sample.
    pub fn record(&mut self, position: Point, now: Instant) {
        let sample = MotionSample {
            position,
            timestamp: now,
        };

        if self.initial.is_none() {
            self.initial = Some(sample);
        }

        self.history.push_back(sample);
        while self.history.len() > HISTORY_CAPACITY {
            self.history.pop_front();
        }
    }

    /// Whether any position was recorded in the current session.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.initial.is_some()
    }

    /// The first sample of the session, if any.
    #[must_use]
    pub fn initial_sample(&self) -> Option<MotionSample> {
        self.initial
    }

    /// Samples currently held, oldest first.
    #[must_use]
    pub fn history(&self) -> impl Iterator<Item = &MotionSample> {
        self.history.iter()
    }

    /// Number of samples currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// True when no samples are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Time elapsed since the most recent sample, or [`Duration::MAX`] when
    /// nothing was recorded.
    #[must_use]
    pub fn time_since_last(&self, now: Instant) -> Duration {
        self.history
            .back()
            .map_or(Duration::MAX, |sample| now - sample.timestamp)
    }

    /// Smoothed release velocity.
    ///
    /// Speed is a root-mean-square estimate over consecutive sample pairs
    /// (`sqrt(sum((dx² + dy²) / dt)) / n`); direction comes from the last
    /// pair's displacement, normalized, then scaled by the speed and
    /// [`IMPULSE_GAIN`].
    ///
    /// Returns zero with fewer than two samples, when the last displacement
    /// is zero, or when no pair has a positive time delta. Never NaN or
    /// infinite for finite input.
    #[must_use]
    pub fn smoothed_velocity(&self) -> Vector {
        if self.history.len() <= 1 {
            return Vector::ZERO;
        }

        let mut sum = 0.0f32;
        for (earlier, later) in self.history.iter().zip(self.history.iter().skip(1)) {
            let dt = (later.timestamp - earlier.timestamp).as_secs_f32();
            if dt <= 0.0 {
                continue;
            }
            let d = Vector::between(earlier.position, later.position);
            sum += (d.dx * d.dx + d.dy * d.dy) / dt;
        }

        let speed = sum.sqrt() / self.history.len() as f32;

        let last = self.history[self.history.len() - 1].position;
        let prior = self.history[self.history.len() - 2].position;
        match Vector::between(prior, last).normalized() {
            Some(direction) => direction.scaled(speed * IMPULSE_GAIN),
            None => Vector::ZERO,
        }
    }
}
