//! Node arena.
//!
//! The host sends an owned, recursive tree; we flatten it into a `Vec` in
//! pre-order so that every node's parent sits at a lower index than the node
//! itself. Walking the arena front to back is therefore a valid
//! parent-before-child traversal, which the integrator relies on.

pub mod record;

use crate::geom::Point;
use crate::orbit::palette::Rgba;

pub use record::{NodeRecord, RecordKind};

/// Mass assumed for a container record that carries none.
pub const DEFAULT_STELLAR_MASS: f64 = 500.0;
/// Mass assumed for a leaf record that carries none (the smallest file mass).
pub const DEFAULT_ORBITAL_MASS: f64 = 5.0;

/// Stable index into a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);
}

/// What a node is, with the inputs that only make sense for that kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Body {
    /// Container (directory).
    Stellar { mass: f64 },
    /// Leaf (file). `last_modified` is `None` when the host sent no usable
    /// timestamp; the node is then treated as brand new.
    Orbital { mass: f64, last_modified: Option<f64> },
}

impl Body {
    pub fn mass(&self) -> f64 {
        match *self {
            Body::Stellar { mass } | Body::Orbital { mass, .. } => mass,
        }
    }

    pub fn is_stellar(&self) -> bool {
        matches!(self, Body::Stellar { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Body::Stellar { .. } => "star",
            Body::Orbital { .. } => "planet",
        }
    }
}

/// Orbital parameters shared by every kind of node.
///
/// `phase`, `angular_velocity` and `radius` are written once by orbit
/// assignment. `angle` and `position` are rewritten every frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrbitState {
    pub phase: f64,
    pub angular_velocity: f64,
    pub radius: f64,
    pub angle: f64,
    pub position: Point,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    pub radius: f64,
    pub color: Rgba,
    pub glow: Option<Rgba>,
}

impl Default for Appearance {
    fn default() -> Self {
        Self { radius: 0.0, color: Rgba::WHITE, glow: None }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub path: String,
    pub name: String,
    pub depth: u32,
    pub body: Body,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub orbit: OrbitState,
    pub appearance: Appearance,
}

impl Node {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// A whole ingested tree. Index 0 is always the root.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Flatten a host record into an arena. Orbits and appearance are left
    /// zeroed until orbit assignment runs.
    pub fn from_record(record: &NodeRecord) -> Self {
        let mut nodes: Vec<Node> = Vec::with_capacity(record.count());
        // Explicit stack so nesting depth is bounded by the heap, not the call
        // stack. Children go on in reverse so they pop in record order.
        let mut stack = vec![(record, None, 0u32)];
        while let Some((rec, parent, depth)) = stack.pop() {
            let id = NodeId(nodes.len());
            if let Some(NodeId(p)) = parent {
                nodes[p].children.push(id);
            }
            nodes.push(Node {
                path: rec.path.clone(),
                name: rec.name.clone(),
                depth,
                body: body_of(rec),
                parent,
                children: Vec::with_capacity(rec.children().len()),
                orbit: OrbitState::default(),
                appearance: Appearance::default(),
            });
            stack.extend(rec.children().iter().rev().map(|child| (child, Some(id), depth + 1)));
        }
        Self { nodes }
    }

    pub fn root(&self) -> &Node {
        &self.nodes[0]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node ids in pre-order (parent before children, siblings in order).
    pub fn preorder(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn find_by_path(&self, path: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.path == path).map(NodeId)
    }

    /// Position of `id`'s parent, or the origin for the root.
    pub fn parent_position(&self, id: NodeId) -> Point {
        self.get(id)
            .and_then(|n| n.parent)
            .and_then(|p| self.get(p))
            .map(|p| p.orbit.position)
            .unwrap_or(Point::ORIGIN)
    }
}

fn body_of(record: &NodeRecord) -> Body {
    let mass = record.size.filter(|m| m.is_finite());
    match record.kind {
        RecordKind::Star => Body::Stellar {
            mass: mass.unwrap_or(DEFAULT_STELLAR_MASS),
        },
        RecordKind::Planet => Body::Orbital {
            mass: mass.unwrap_or(DEFAULT_ORBITAL_MASS),
            last_modified: record.last_modified.filter(|t| t.is_finite()),
        },
    }
}
