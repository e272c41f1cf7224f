//! Frame renderer.
//!
//! One full pass per frame, strictly back to front:
//!   1. clear
//!   2. background starfield
//!   3. orbit rings (each child's ring, centred on its parent)
//!   4. parent → child links
//!   5. bodies: root core, glowing stars, gradient-lit planets
//!   6. deep-space boundary ring + warning label
//!   7. name labels (stars always, planets only when zoomed in)
//!
//! Widths and font sizes that must look constant on screen are divided by
//! the current zoom scale before they reach the surface.

pub mod starfield;
pub mod surface;

#[cfg(feature = "gui")]
pub mod egui_surface;

use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::geom::Point;
use crate::orbit::palette::Rgba;
use crate::tree::{Body, Node, Tree};

pub use starfield::{BackgroundStar, Starfield};
pub use surface::{Align, DrawCommand, Fill, Mapping, Recorder, Stroke, Surface, TextStyle};

const STAR_ALPHA: f32 = 0.8;
const BOUNDARY_ALPHA: f32 = 0.6;
const BOUNDARY_LABEL_ALPHA: f32 = 0.8;
/// Highlight spot of a planet, as a fraction of its radius.
const HIGHLIGHT_INNER: f64 = 0.2;
/// World-space label offset from a body's rim.
const LABEL_DX: f64 = 5.0;
const LABEL_DY: f64 = 4.0;

pub struct Renderer {
    cfg: RenderConfig,
}

impl Renderer {
    pub fn new(cfg: RenderConfig) -> Self {
        Self { cfg }
    }

    /// Draw one frame. With no tree yet, only the backdrop layers appear.
    pub fn draw<S: Surface + ?Sized>(&self, tree: Option<&Tree>, camera: &Camera, starfield: &Starfield, surface: &mut S) {
        let k = camera.scale();
        surface.clear(self.cfg.space_color);
        surface.set_mapping(Mapping { scale: k, offset: camera.offset() });

        self.draw_starfield(starfield, k, surface);
        if let Some(tree) = tree {
            self.draw_rings(tree, k, surface);
            self.draw_links(tree, k, surface);
            self.draw_bodies(tree, k, surface);
        }
        self.draw_boundary(k, surface);
        if let Some(tree) = tree {
            self.draw_labels(tree, k, surface);
        }
    }

    fn draw_starfield<S: Surface + ?Sized>(&self, starfield: &Starfield, k: f64, surface: &mut S) {
        for star in starfield.stars() {
            surface.fill_circle(
                star.position,
                star.size / k,
                Fill::Solid(Rgba::WHITE.with_alpha(STAR_ALPHA * star.opacity)),
            );
        }
    }

    fn draw_rings<S: Surface + ?Sized>(&self, tree: &Tree, k: f64, surface: &mut S) {
        let stroke = Stroke::solid(Rgba::WHITE.with_alpha(self.cfg.ring_alpha), self.cfg.line_width / k);
        for (node, parent) in with_parents(tree) {
            surface.stroke_circle(parent.orbit.position, node.orbit.radius, stroke);
        }
    }

    fn draw_links<S: Surface + ?Sized>(&self, tree: &Tree, k: f64, surface: &mut S) {
        let stroke = Stroke::solid(Rgba::WHITE.with_alpha(self.cfg.link_alpha), self.cfg.line_width / k);
        for (node, parent) in with_parents(tree) {
            surface.line(parent.orbit.position, node.orbit.position, stroke);
        }
    }

    fn draw_bodies<S: Surface + ?Sized>(&self, tree: &Tree, k: f64, surface: &mut S) {
        for node in tree.nodes() {
            let center = node.orbit.position;
            let look = node.appearance;
            match node.body {
                _ if node.is_root() => {
                    surface.fill_circle(center, look.radius, Fill::Solid(look.color));
                    if let Some(ring) = look.glow {
                        surface.stroke_circle(center, look.radius, Stroke::solid(ring, 2.0 * self.cfg.line_width / k));
                    }
                }
                Body::Stellar { .. } => {
                    let fill = match look.glow {
                        Some(glow) => Fill::Glow { color: look.color, glow, blur: self.cfg.glow_blur / k },
                        None => Fill::Solid(look.color),
                    };
                    surface.fill_circle(center, look.radius, fill);
                }
                Body::Orbital { .. } => {
                    surface.fill_circle(
                        center,
                        look.radius,
                        Fill::RadialGradient {
                            highlight: Rgba::WHITE,
                            mid: look.color,
                            rim: Rgba::BLACK,
                            inner: HIGHLIGHT_INNER,
                        },
                    );
                }
            }
        }
    }

    fn draw_boundary<S: Surface + ?Sized>(&self, k: f64, surface: &mut S) {
        let r = self.cfg.universe_radius;
        surface.stroke_circle(
            Point::ORIGIN,
            r,
            Stroke {
                color: self.cfg.boundary_color.with_alpha(BOUNDARY_ALPHA),
                width: self.cfg.boundary_width / k,
                dash: Some((self.cfg.boundary_dash, self.cfg.boundary_gap)),
            },
        );
        surface.text(
            Point::new(0.0, -r - self.cfg.boundary_label_gap / k),
            &self.cfg.boundary_label,
            TextStyle {
                size: self.cfg.boundary_font_size / k,
                color: self.cfg.boundary_color.with_alpha(BOUNDARY_LABEL_ALPHA),
                align: Align::Center,
                monospace: true,
            },
        );
    }

    fn draw_labels<S: Surface + ?Sized>(&self, tree: &Tree, k: f64, surface: &mut S) {
        let style = TextStyle {
            size: self.cfg.label_font_size / k,
            color: Rgba::WHITE,
            align: Align::Left,
            monospace: false,
        };
        let show_planets = k > self.cfg.label_zoom_threshold;
        for node in tree.nodes() {
            if node.body.is_stellar() || show_planets {
                let p = node.orbit.position;
                let anchor = Point::new(p.x + node.appearance.radius + LABEL_DX, p.y + LABEL_DY);
                surface.text(anchor, &node.name, style);
            }
        }
    }
}

/// Every non-root node with its parent, in pre-order.
fn with_parents<'a>(tree: &'a Tree) -> impl Iterator<Item = (&'a Node, &'a Node)> + 'a {
    tree.nodes()
        .iter()
        .filter_map(move |n| n.parent.and_then(|p| tree.get(p)).map(|parent| (n, parent)))
}
