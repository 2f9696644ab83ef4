//! Live registry of active pointer locations.
//!
//! The host input system owns the truth about where each contact currently
//! is; this registry mirrors it so trackers can query a pointer's location
//! on demand, in whatever frame they need, instead of storing positions at
//! event time.

use crate::event::{PointerEvent, PointerId};
use crate::geometry::{Point, Transform2D};
use std::collections::HashMap;

/// Current location of every active pointer, in the scene frame.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    locations: HashMap<PointerId, Point>,
}

impl InputState {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one raw event into the registry. `Down` and `Moved` update the
    /// pointer's location; `Up` and `Cancelled` retire it.
    pub fn apply(&mut self, event: &PointerEvent) {
        match *event {
            PointerEvent::Down { id, position } | PointerEvent::Moved { id, position } => {
                self.locations.insert(id, position);
            }
            PointerEvent::Up { id, .. } | PointerEvent::Cancelled { id } => {
                self.locations.remove(&id);
            }
        }
    }

    /// Current scene-frame location of a pointer, if it is down.
    #[must_use]
    pub fn location(&self, id: PointerId) -> Option<Point> {
        self.locations.get(&id).copied()
    }

    /// Current location of a pointer converted into a node's local frame.
    #[must_use]
    pub fn location_in(&self, id: PointerId, frame: &Transform2D) -> Option<Point> {
        self.location(id).map(|p| frame.to_local(p))
    }

    /// Number of active pointers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// True when no pointer is down.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_down_then_move_updates_location() {
        let mut input = InputState::new();
        let id = PointerId::touch(1);

        input.apply(&PointerEvent::Down {
            id,
            position: Point::new(10.0, 10.0),
        });
        assert_eq!(input.location(id), Some(Point::new(10.0, 10.0)));

        input.apply(&PointerEvent::Moved {
            id,
            position: Point::new(15.0, 12.0),
        });
        assert_eq!(input.location(id), Some(Point::new(15.0, 12.0)));
        assert_eq!(input.len(), 1);
    }

    #[test]
    fn test_up_retires_pointer() {
        let mut input = InputState::new();
        let id = PointerId::Mouse;

        input.apply(&PointerEvent::Down {
            id,
            position: Point::ORIGIN,
        });
        input.apply(&PointerEvent::Up {
            id,
            position: Point::ORIGIN,
        });
        assert!(input.is_empty());
        assert_eq!(input.location(id), None);
    }

    #[test]
    fn test_location_in_local_frame() {
        let mut input = InputState::new();
        let id = PointerId::touch(2);
        input.apply(&PointerEvent::Down {
            id,
            position: Point::new(110.0, 220.0),
        });

        let frame = Transform2D::translate(100.0, 200.0);
        assert_eq!(input.location_in(id, &frame), Some(Point::new(10.0, 20.0)));
    }
}
