//! Seams to the external physics backend.
//!
//! The interaction layer never solves physics. It reads and writes body
//! state through [`PhysicsBody`] and asks a [`PhysicsBackend`] to build
//! colliders; the host wires these traits to its simulation.

use tactile_core::{PolygonPath, Vector};

/// Handle to one simulated body.
pub trait PhysicsBody {
    /// Whether the body moves in response to the simulation.
    fn set_dynamic(&mut self, dynamic: bool);
    /// Whether gravity acts on the body.
    fn set_affected_by_gravity(&mut self, affected: bool);
    /// Overwrite the body's linear velocity.
    fn set_velocity(&mut self, velocity: Vector);
    /// Overwrite the body's angular velocity (radians per second).
    fn set_angular_velocity(&mut self, velocity: f32);
    /// Apply an instantaneous impulse.
    fn apply_impulse(&mut self, impulse: Vector);
}

/// Builds bodies for shapes.
pub trait PhysicsBackend {
    /// A solid, dynamic body matching the polygon.
    fn polygon_body(&mut self, path: &PolygonPath) -> Box<dyn PhysicsBody>;

    /// A non-dynamic edge collider following the polygon's outline. Used as
    /// a stand-in while the user hand-positions the shape, so collision
    /// geometry survives without the simulation fighting the drag.
    fn edge_body(&mut self, path: &PolygonPath) -> Box<dyn PhysicsBody>;
}

/// A body that absorbs every call. Scenes without a simulation use these.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBody;

impl PhysicsBody for NullBody {
    fn set_dynamic(&mut self, _dynamic: bool) {}
    fn set_affected_by_gravity(&mut self, _affected: bool) {}
    fn set_velocity(&mut self, _velocity: Vector) {}
    fn set_angular_velocity(&mut self, _velocity: f32) {}
    fn apply_impulse(&mut self, _impulse: Vector) {}
}

/// Backend producing [`NullBody`] handles.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPhysics;

impl PhysicsBackend for NullPhysics {
    fn polygon_body(&mut self, _path: &PolygonPath) -> Box<dyn PhysicsBody> {
        Box::new(NullBody)
    }

    fn edge_body(&mut self, _path: &PolygonPath) -> Box<dyn PhysicsBody> {
        Box::new(NullBody)
    }
}
