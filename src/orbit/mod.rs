//! Orbit assignment.
//!
//! Runs once per ingested tree, depth-first from the root:
//!   - Root: pinned at the origin, no orbit, drawn as the dark core
//!   - Child `i` of `n`: phase `i/n · 2π`, so siblings start evenly spread
//!   - Orbit radius: ring start for the parent's class + `i · spacing/2` + jitter
//!   - Angular velocity: random magnitude inside a fixed band, random sign
//!   - Stellar bodies shrink with depth; orbital bodies take their clamped
//!     mass as radius and an age-keyed colour
//!
//! Randomness comes from the caller's `Rng`, so a seeded source reproduces
//! the same layout exactly.

pub mod integrator;
pub mod palette;

use std::f64::consts::TAU;

use rand::Rng;

use crate::config::{OrbitConfig, RingSpacing};
use crate::tree::{Appearance, Body, NodeId, OrbitState, Tree};

/// Assign phase, radius, velocity, appearance and time-zero position to
/// every node. `now` is the wall-clock time (ms since the Unix epoch) used
/// to age orbital bodies.
pub fn assign<R: Rng + ?Sized>(tree: &mut Tree, cfg: &OrbitConfig, now: f64, rng: &mut R) {
    if let Some(root) = tree.get_mut(NodeId::ROOT) {
        root.orbit = OrbitState::default();
        root.appearance = Appearance {
            radius: cfg.core_radius,
            color: cfg.core_color,
            glow: Some(cfg.core_ring),
        };
    }
    // Pre-order arena: each parent is placed before its children read its
    // position, and the draw order of `rng` matches a depth-first walk.
    let slots = sibling_slots(tree);
    for (id, slot) in slots.into_iter().enumerate().skip(1) {
        place(tree, NodeId(id), slot, cfg, now, rng);
    }
    log::debug!("orbit assignment done for {} nodes", tree.len());
}

/// `(index among siblings, sibling count)` for every node; the root gets `(0, 1)`.
fn sibling_slots(tree: &Tree) -> Vec<(usize, usize)> {
    let mut slots = vec![(0, 1); tree.len()];
    for node in tree.nodes() {
        let count = node.children.len();
        for (i, child) in node.children.iter().enumerate() {
            slots[child.0] = (i, count);
        }
    }
    slots
}

fn place<R: Rng + ?Sized>(tree: &mut Tree, id: NodeId, (i, count): (usize, usize), cfg: &OrbitConfig, now: f64, rng: &mut R) {
    let Some(parent) = tree.get(id).and_then(|n| n.parent).and_then(|p| tree.get(p)) else {
        return;
    };
    let rings = rings_for(cfg, parent.is_root(), &parent.body);
    let center = parent.orbit.position;

    let phase = i as f64 / count as f64 * TAU;
    let radius = rings.start + i as f64 * (rings.spacing / 2.0) + rng.random::<f64>() * cfg.jitter;
    let speed = cfg.min_speed + rng.random::<f64>() * cfg.speed_band;
    let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };

    if let Some(node) = tree.get_mut(id) {
        node.orbit = OrbitState {
            phase,
            angular_velocity: speed * direction,
            radius,
            angle: phase,
            position: center.orbit(radius, phase),
        };
        node.appearance = appearance(cfg, &node.body, node.depth, now);
    }
}

fn rings_for(cfg: &OrbitConfig, is_root: bool, body: &Body) -> RingSpacing {
    match body {
        _ if is_root => cfg.root_rings,
        Body::Stellar { .. } => cfg.stellar_rings,
        Body::Orbital { .. } => cfg.default_rings,
    }
}

fn appearance(cfg: &OrbitConfig, body: &Body, depth: u32, now: f64) -> Appearance {
    match *body {
        Body::Stellar { .. } => {
            let shrink = cfg.star_shrink * depth.saturating_sub(1) as f64;
            Appearance {
                radius: (cfg.star_radius - shrink).max(cfg.star_min_radius),
                color: cfg.star_color,
                glow: Some(cfg.star_glow),
            }
        }
        Body::Orbital { mass, last_modified } => Appearance {
            radius: mass.clamp(cfg.planet_min_radius, cfg.planet_max_radius),
            color: palette::cool(normalized_age(cfg, now, last_modified)),
            glow: None,
        },
    }
}

/// `clamp(now - last_modified, 0, max_age) / max_age`; unknown timestamps
/// count as brand new.
pub fn normalized_age(cfg: &OrbitConfig, now: f64, last_modified: Option<f64>) -> f64 {
    if cfg.max_age <= 0.0 {
        return 0.0;
    }
    let age = last_modified.map_or(0.0, |t| (now - t).clamp(0.0, cfg.max_age));
    if age.is_finite() {
        age / cfg.max_age
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::palette::{CORE_COLOR, CORE_RING, STAR_COLOR, STAR_GLOW};
    use super::*;
    use crate::geom::Point;
    use crate::tree::NodeRecord;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::f64::consts::PI;

    const NOW: f64 = 1_700_000_000_000.0;

    fn scenario_a() -> NodeRecord {
        NodeRecord::star("proj", "/proj")
            .with_child(NodeRecord::planet("a.ts", "/proj/a.ts", 10.0, NOW))
            .with_child(
                NodeRecord::star("lib", "/proj/lib")
                    .with_child(NodeRecord::planet("b.ts", "/proj/lib/b.ts", 5.0, NOW)),
            )
    }

    fn assigned(seed: u64) -> Tree {
        let mut tree = Tree::from_record(&scenario_a());
        let mut rng = SmallRng::seed_from_u64(seed);
        assign(&mut tree, &OrbitConfig::default(), NOW, &mut rng);
        tree
    }

    #[test]
    fn root_is_pinned() {
        let tree = assigned(1);
        let root = tree.root();
        assert_eq!(root.orbit.position, Point::ORIGIN);
        assert_eq!(root.orbit.radius, 0.0);
        assert_eq!(root.orbit.angular_velocity, 0.0);
        assert_eq!(root.depth, 0);
        assert_eq!(root.appearance.color, CORE_COLOR);
        assert_eq!(root.appearance.glow, Some(CORE_RING));
    }

    #[test]
    fn siblings_are_spread_evenly() {
        let tree = assigned(2);
        let a = tree.get(NodeId(1)).unwrap();
        let lib = tree.get(NodeId(2)).unwrap();
        assert_eq!(a.orbit.phase, 0.0);
        assert!((lib.orbit.phase - PI).abs() < 1e-12);
        assert!(a.orbit.radius > 0.0 && lib.orbit.radius > 0.0);
        assert_ne!(a.orbit.radius, lib.orbit.radius);
    }

    #[test]
    fn radii_and_speeds_stay_in_band() {
        let cfg = OrbitConfig::default();
        let tree = assigned(3);
        let a = tree.get(NodeId(1)).unwrap();
        let lib = tree.get(NodeId(2)).unwrap();
        let b = tree.get(NodeId(3)).unwrap();
        assert!(a.orbit.radius >= 200.0 && a.orbit.radius < 220.0);
        assert!(lib.orbit.radius >= 275.0 && lib.orbit.radius < 295.0);
        assert!(b.orbit.radius >= 120.0 && b.orbit.radius < 140.0);
        for node in &tree.nodes()[1..] {
            let w = node.orbit.angular_velocity.abs();
            assert!(w >= cfg.min_speed && w < cfg.min_speed + cfg.speed_band);
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let a = assigned(42);
        let b = assigned(42);
        for (x, y) in a.nodes().iter().zip(b.nodes()) {
            assert_eq!(x.orbit, y.orbit);
        }
    }

    #[test]
    fn initial_positions_sit_on_their_orbit() {
        let tree = assigned(9);
        for id in tree.preorder().skip(1) {
            let node = tree.get(id).unwrap();
            let d = node.orbit.position.distance(tree.parent_position(id));
            assert!((d - node.orbit.radius).abs() < 1e-9);
            assert_eq!(node.orbit.angle, node.orbit.phase);
        }
    }

    #[test]
    fn visuals_follow_kind() {
        let tree = assigned(5);
        let a = tree.get(NodeId(1)).unwrap();
        let lib = tree.get(NodeId(2)).unwrap();
        let b = tree.get(NodeId(3)).unwrap();
        assert_eq!(a.appearance.radius, 10.0);
        assert_eq!(b.appearance.radius, 5.0);
        assert_eq!(a.appearance.glow, None);
        assert_eq!(lib.appearance.radius, 20.0);
        assert_eq!(lib.appearance.color, STAR_COLOR);
        assert_eq!(lib.appearance.glow, Some(STAR_GLOW));
    }

    #[test]
    fn stellar_radius_floors_with_depth() {
        let cfg = OrbitConfig::default();
        let body = Body::Stellar { mass: 500.0 };
        assert_eq!(appearance(&cfg, &body, 1, NOW).radius, 20.0);
        assert_eq!(appearance(&cfg, &body, 3, NOW).radius, 16.0);
        assert_eq!(appearance(&cfg, &body, 30, NOW).radius, 10.0);
    }

    #[test]
    fn planet_radius_is_clamped_mass() {
        let cfg = OrbitConfig::default();
        let tiny = Body::Orbital { mass: 0.5, last_modified: None };
        let huge = Body::Orbital { mass: 90.0, last_modified: None };
        assert_eq!(appearance(&cfg, &tiny, 1, NOW).radius, 4.0);
        assert_eq!(appearance(&cfg, &huge, 1, NOW).radius, 12.0);
    }

    #[test]
    fn age_is_clamped_to_a_year() {
        let cfg = OrbitConfig::default();
        assert_eq!(normalized_age(&cfg, NOW, Some(NOW)), 0.0);
        assert_eq!(normalized_age(&cfg, NOW, Some(NOW + 5000.0)), 0.0);
        assert_eq!(normalized_age(&cfg, NOW, Some(0.0)), 1.0);
        assert!((normalized_age(&cfg, NOW, Some(NOW - cfg.max_age / 2.0)) - 0.5).abs() < 1e-12);
        assert_eq!(normalized_age(&cfg, NOW, None), 0.0);
    }
}
