//! Per-frame orbit integration.
//!
//! Motion is purely kinematic: `angle = phase + ω·T` where `T` is the
//! accumulated simulation time. Nothing is integrated incrementally, so the
//! result does not drift and a paused clock leaves every angle untouched.

use crate::geom::Point;
use crate::tree::Tree;

/// Upper bound of the user speed control.
pub const MAX_SPEED: f64 = 5.0;

/// Accumulated simulation time and the user's speed multiplier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimClock {
    time: f64,
    speed: f64,
}

impl Default for SimClock {
    fn default() -> Self {
        Self { time: 0.0, speed: 1.0 }
    }
}

impl SimClock {
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Clamp into `[0, MAX_SPEED]`. `0` freezes rotation.
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = if speed.is_finite() { speed.clamp(0.0, MAX_SPEED) } else { 0.0 };
    }

    /// `T += dt × speed`. Negative or non-finite deltas are dropped.
    pub fn advance(&mut self, dt: f64) {
        if dt.is_finite() && dt > 0.0 {
            self.time += dt * self.speed;
        }
    }
}

/// Recompute every node's angle and position for simulation time `time`.
///
/// The arena is stored in pre-order, so a forward walk always updates a
/// parent before any of its children read its position.
pub fn integrate(tree: &mut Tree, time: f64) {
    let nodes = tree.nodes_mut();
    for i in 0..nodes.len() {
        let parent = nodes[i].parent;
        let center = match parent {
            None => {
                nodes[i].orbit.angle = 0.0;
                nodes[i].orbit.position = Point::ORIGIN;
                continue;
            }
            Some(parent) => {
                debug_assert!(parent.0 < i, "arena is not in pre-order");
                nodes[parent.0].orbit.position
            }
        };
        let orbit = &mut nodes[i].orbit;
        orbit.angle = orbit.phase + orbit.angular_velocity * time;
        orbit.position = center.orbit(orbit.radius, orbit.angle);
    }
}
