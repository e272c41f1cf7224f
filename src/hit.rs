//! Screen-space hit testing.
//!
//! A pointer hits a node when its world-space distance to the node centre is
//! below the drawn radius plus a small slack. Hover uses a tighter slack
//! than click. Nodes are scanned in pre-order and the first match wins, so
//! a parent shadows any child drawn over it.

use crate::camera::Camera;
use crate::config::InteractionConfig;
use crate::geom::Point;
use crate::tree::{NodeId, Tree};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitKind {
    Hover,
    Click,
}

impl HitKind {
    pub fn epsilon(self, cfg: &InteractionConfig) -> f64 {
        match self {
            HitKind::Hover => cfg.hover_epsilon,
            HitKind::Click => cfg.click_epsilon,
        }
    }
}

/// First node, in pre-order, under the screen point `screen`.
pub fn hit_test(tree: &Tree, camera: &Camera, screen: Point, epsilon: f64) -> Option<NodeId> {
    let world = camera.to_world(screen);
    if !world.is_finite() {
        return None;
    }
    tree.nodes()
        .iter()
        .position(|n| world.distance(n.orbit.position) < n.appearance.radius + epsilon)
        .map(NodeId)
}
