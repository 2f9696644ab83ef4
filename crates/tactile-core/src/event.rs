//! Pointer identity and raw input events.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Identifier for one touch contact, assigned by the host input system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct TouchId(pub u64);

impl TouchId {
    /// Create a new touch ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Identity of one physical contact point over its down→move→up lifetime.
///
/// Touch contacts are distinguished by their host-assigned [`TouchId`];
/// mouse input is a singleton identity, so every mouse event belongs to the
/// same gesture. Tracking logic must not branch on the variant beyond this
/// equality behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerId {
    /// One finger on a multi-touch surface.
    Touch(TouchId),
    /// The single system mouse cursor.
    Mouse,
}

impl PointerId {
    /// Shorthand for a touch pointer.
    #[must_use]
    pub const fn touch(id: u64) -> Self {
        Self::Touch(TouchId::new(id))
    }
}

/// A raw pointer event delivered by the host framework, with positions in
/// the scene coordinate frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    /// Pointer made contact.
    Down {
        /// Pointer identity
        id: PointerId,
        /// Contact position
        position: Point,
    },
    /// Pointer moved while down.
    Moved {
        /// Pointer identity
        id: PointerId,
        /// New position
        position: Point,
    },
    /// Pointer lifted.
    Up {
        /// Pointer identity
        id: PointerId,
        /// Final position
        position: Point,
    },
    /// Pointer cancelled by the host (e.g. palm rejection, focus loss).
    Cancelled {
        /// Pointer identity
        id: PointerId,
    },
}

impl PointerEvent {
    /// The identity this event belongs to.
    #[must_use]
    pub const fn pointer(&self) -> PointerId {
        match self {
            Self::Down { id, .. }
            | Self::Moved { id, .. }
            | Self::Up { id, .. }
            | Self::Cancelled { id } => *id,
        }
    }
}
