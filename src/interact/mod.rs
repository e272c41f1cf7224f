//! Interaction dispatcher.
//!
//! Turns pointer events into outcomes for the engine:
//! - Hover → tooltip payload + cursor affordance
//! - Click → open a leaf, or fly to a container
//! - Secondary click → [`ContextMenu`] for the node or the background
//! - Menu choice → host [`Intent`], or a clipboard update for Cut
//!
//! The only local state touched is the clipboard and the hover cache.

pub mod clipboard;
pub mod menu;

use crate::camera::Camera;
use crate::config::InteractionConfig;
use crate::geom::Point;
use crate::hit::{hit_test, HitKind};
use crate::host::Intent;
use crate::tree::{Body, NodeId, Tree};

pub use clipboard::Clipboard;
pub use menu::{ContextMenu, MenuAction, MenuEntry, MenuTarget};

/// Pointer affordance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Cursor {
    /// Over a node.
    Pointer,
    /// Over empty space, where dragging pans.
    #[default]
    Move,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TooltipDetail {
    /// Number of direct children of a container.
    Children(usize),
    /// Human-readable size of a leaf.
    Size(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    pub name: String,
    pub kind: &'static str,
    pub detail: TooltipDetail,
}

impl Tooltip {
    pub fn for_node(tree: &Tree, id: NodeId) -> Option<Self> {
        let node = tree.get(id)?;
        let detail = match node.body {
            Body::Stellar { .. } => TooltipDetail::Children(node.children.len()),
            Body::Orbital { mass, .. } => TooltipDetail::Size(format_bytes(bytes_from_mass(mass))),
        };
        Some(Self { name: node.name.clone(), kind: node.body.label(), detail })
    }

    /// Display lines: name, type, size.
    pub fn lines(&self) -> [String; 3] {
        let size = match &self.detail {
            TooltipDetail::Children(n) => format!("{n} planets"),
            TooltipDetail::Size(s) => s.clone(),
        };
        [self.name.clone(), format!("Type: {}", self.kind), format!("Size: {size}")]
    }
}

/// Result of a hover update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hover {
    pub node: Option<NodeId>,
    pub tooltip: Option<Tooltip>,
    pub cursor: Cursor,
}

/// Result of a primary click.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// A leaf was clicked; the host should open this path.
    Open(String),
    /// A container was clicked; the camera should centre on `target`.
    FlyTo { node: NodeId, target: Point },
    Miss,
}

pub struct Dispatcher {
    cfg: InteractionConfig,
    clipboard: Clipboard,
    hover: Hover,
}

impl Dispatcher {
    pub fn new(cfg: InteractionConfig) -> Self {
        Self { cfg, clipboard: Clipboard::default(), hover: Hover::default() }
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    /// Last hover result.
    pub fn current_hover(&self) -> &Hover {
        &self.hover
    }

    fn pick(&self, tree: Option<&Tree>, camera: &Camera, screen: Point, kind: HitKind) -> Option<NodeId> {
        hit_test(tree?, camera, screen, kind.epsilon(&self.cfg))
    }

    pub fn hover(&mut self, tree: Option<&Tree>, camera: &Camera, screen: Point) -> &Hover {
        let node = self.pick(tree, camera, screen, HitKind::Hover);
        self.hover = match (node, tree) {
            (Some(id), Some(tree)) => Hover {
                node: Some(id),
                tooltip: Tooltip::for_node(tree, id),
                cursor: Cursor::Pointer,
            },
            _ => Hover::default(),
        };
        &self.hover
    }

    /// Pointer left the canvas.
    pub fn leave(&mut self) {
        self.hover = Hover::default();
    }

    pub fn click(&self, tree: Option<&Tree>, camera: &Camera, screen: Point) -> ClickOutcome {
        let Some(tree) = tree else {
            return ClickOutcome::Miss;
        };
        let Some(id) = self.pick(Some(tree), camera, screen, HitKind::Click) else {
            return ClickOutcome::Miss;
        };
        match tree.get(id) {
            Some(node) if node.body.is_stellar() => ClickOutcome::FlyTo { node: id, target: node.orbit.position },
            Some(node) => ClickOutcome::Open(node.path.clone()),
            None => ClickOutcome::Miss,
        }
    }

    /// Menu for whatever lies under `screen`.
    pub fn context_menu(&self, tree: Option<&Tree>, camera: &Camera, screen: Point) -> Option<ContextMenu> {
        let target = match self.pick(tree, camera, screen, HitKind::Click) {
            Some(id) => MenuTarget::Node(id),
            None => MenuTarget::Background,
        };
        ContextMenu::build(tree, target, &self.clipboard)
    }

    /// Apply a menu choice. Cut only fills the clipboard; everything else
    /// becomes an intent, and Paste drains the clipboard.
    pub fn choose(&mut self, action: &MenuAction) -> Option<Intent> {
        match action {
            MenuAction::NewFile { parent } => Some(Intent::CreateFile(parent.clone())),
            MenuAction::NewFolder { parent } => Some(Intent::CreateFolder(parent.clone())),
            MenuAction::Rename { path } => Some(Intent::Rename(path.clone())),
            MenuAction::Delete { path } => Some(Intent::Delete(path.clone())),
            MenuAction::Cut { path } => {
                log::debug!("clipboard holds {path}");
                self.clipboard.cut(path.as_str());
                None
            }
            MenuAction::Paste { destination } => self.clipboard.paste(destination),
        }
    }
}

/// Leaf mass is `10·ln(bytes)`; invert it.
pub fn bytes_from_mass(mass: f64) -> f64 {
    (mass / 10.0).exp().round()
}

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

pub fn format_bytes(bytes: f64) -> String {
    if !bytes.is_finite() || bytes < 0.0 {
        return "?".to_string();
    }
    if bytes < 1024.0 {
        return format!("{bytes:.0} B");
    }
    let mut value = bytes;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Viewport;
    use crate::config::{CameraConfig, OrbitConfig};
    use crate::orbit::assign;
    use crate::tree::NodeRecord;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn setup() -> (Tree, Camera) {
        let rec = NodeRecord::star("proj", "/proj")
            .with_child(NodeRecord::planet("a.ts", "/proj/a.ts", 10.0, 0.0))
            .with_child(
                NodeRecord::star("lib", "/proj/lib")
                    .with_child(NodeRecord::planet("b.ts", "/proj/lib/b.ts", 5.0, 0.0)),
            );
        let mut tree = Tree::from_record(&rec);
        assign(&mut tree, &OrbitConfig::default(), 0.0, &mut SmallRng::seed_from_u64(9));
        (tree, Camera::new(CameraConfig::default(), Viewport::new(900.0, 700.0).unwrap()))
    }

    fn screen_of(tree: &Tree, cam: &Camera, id: NodeId) -> Point {
        cam.to_screen(tree.get(id).unwrap().orbit.position)
    }

    #[test]
    fn hover_sets_tooltip_and_cursor() {
        let (tree, cam) = setup();
        let mut d = Dispatcher::new(InteractionConfig::default());
        let h = d.hover(Some(&tree), &cam, screen_of(&tree, &cam, NodeId(2))).clone();
        assert_eq!(h.cursor, Cursor::Pointer);
        let tip = h.tooltip.unwrap();
        assert_eq!(tip.detail, TooltipDetail::Children(1));
        assert_eq!(tip.lines(), ["lib".to_string(), "Type: star".into(), "Size: 1 planets".into()]);

        let h = d.hover(Some(&tree), &cam, Point::new(-5000.0, -5000.0));
        assert_eq!(h.cursor, Cursor::Move);
        assert!(h.tooltip.is_none());
    }

    #[test]
    fn click_opens_leaf_and_flies_to_container() {
        let (tree, cam) = setup();
        let d = Dispatcher::new(InteractionConfig::default());
        assert_eq!(
            d.click(Some(&tree), &cam, screen_of(&tree, &cam, NodeId(1))),
            ClickOutcome::Open("/proj/a.ts".into())
        );
        let lib = tree.get(NodeId(2)).unwrap().orbit.position;
        assert_eq!(
            d.click(Some(&tree), &cam, screen_of(&tree, &cam, NodeId(2))),
            ClickOutcome::FlyTo { node: NodeId(2), target: lib }
        );
        assert_eq!(d.click(Some(&tree), &cam, Point::new(-5000.0, 0.0)), ClickOutcome::Miss);
        assert_eq!(d.click(None, &cam, Point::new(450.0, 350.0)), ClickOutcome::Miss);
    }

    #[test]
    fn cut_is_silent_and_paste_drains() {
        let mut d = Dispatcher::new(InteractionConfig::default());
        assert_eq!(d.choose(&MenuAction::Cut { path: "/proj/a.ts".into() }), None);
        assert_eq!(d.clipboard().holding(), Some("/proj/a.ts"));
        assert_eq!(
            d.choose(&MenuAction::Paste { destination: "/proj/lib".into() }),
            Some(Intent::move_to("/proj/a.ts", "/proj/lib"))
        );
        assert_eq!(d.choose(&MenuAction::Paste { destination: "/proj/lib".into() }), None);
        assert_eq!(
            d.choose(&MenuAction::Rename { path: "/x".into() }),
            Some(Intent::Rename("/x".into()))
        );
    }

    #[test]
    fn context_menu_on_background() {
        let (tree, cam) = setup();
        let d = Dispatcher::new(InteractionConfig::default());
        let menu = d.context_menu(Some(&tree), &cam, Point::new(1.0, 1.0)).unwrap();
        assert_eq!(menu.target, MenuTarget::Background);
    }

    #[test]
    fn size_formatting() {
        assert_eq!(bytes_from_mass(0.0), 1.0);
        assert_eq!(format_bytes(512.0), "512 B");
        assert_eq!(format_bytes(2048.0), "2.0 KB");
        assert_eq!(format_bytes(5.5 * 1024.0 * 1024.0), "5.5 MB");
        assert_eq!(format_bytes(f64::INFINITY), "?");
        let tip_mass = 10.0 * (1500.0f64).ln();
        assert_eq!(format_bytes(bytes_from_mass(tip_mass)), "1.5 KB");
    }
}
