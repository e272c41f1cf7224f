//! egui Painter backend for [`Surface`].
//!
//! Converts world-space draw calls into egui shapes using the mapping the
//! renderer announced for the frame. Gradients and glows are approximated
//! with stacked translucent discs since the Painter has no radial fills.

use egui::{Align2, Color32, FontId, Pos2, Rounding, Shape};

use crate::geom::Point;
use crate::orbit::palette::Rgba;
use crate::render::surface::{Align, Fill, Mapping, Stroke, Surface, TextStyle};

/// Discs used to fake a radial gradient.
const GRADIENT_STEPS: usize = 10;
/// Halo rings used to fake a blur.
const GLOW_LAYERS: usize = 6;

pub struct EguiSurface<'a> {
    painter: &'a egui::Painter,
    /// Top-left of the canvas in egui screen coordinates.
    origin: Pos2,
    mapping: Mapping,
}

impl<'a> EguiSurface<'a> {
    pub fn new(painter: &'a egui::Painter, origin: Pos2) -> Self {
        Self { painter, origin, mapping: Mapping::IDENTITY }
    }

    fn pos(&self, world: Point) -> Pos2 {
        to_pos(self.origin, self.mapping, world)
    }

    fn px(&self, world: f64) -> f32 {
        (world * self.mapping.scale) as f32
    }

    fn egui_stroke(&self, stroke: &Stroke) -> egui::Stroke {
        egui::Stroke::new(self.px(stroke.width), color32(stroke.color))
    }

    /// Whether a circle can touch the visible area at all.
    fn visible(&self, center: Pos2, radius: f32) -> bool {
        self.painter.clip_rect().expand(radius).contains(center)
    }
}

impl Surface for EguiSurface<'_> {
    fn clear(&mut self, color: Rgba) {
        self.painter.rect_filled(self.painter.clip_rect(), Rounding::ZERO, color32(color));
    }

    fn set_mapping(&mut self, mapping: Mapping) {
        self.mapping = mapping;
    }

    fn fill_circle(&mut self, center: Point, radius: f64, fill: Fill) {
        let c = self.pos(center);
        let r = self.px(radius);
        match fill {
            Fill::Solid(color) => {
                if self.visible(c, r) {
                    self.painter.circle_filled(c, r, color32(color));
                }
            }
            Fill::RadialGradient { highlight, mid, rim, inner } => {
                if !self.visible(c, r) {
                    return;
                }
                for step in 0..GRADIENT_STEPS {
                    let f = 1.0 - step as f64 / GRADIENT_STEPS as f64;
                    self.painter
                        .circle_filled(c, r * f as f32, color32(gradient_at(f, highlight, mid, rim, inner)));
                }
            }
            Fill::Glow { color, glow, blur } => {
                let halo = self.px(blur);
                if !self.visible(c, r + halo) {
                    return;
                }
                for layer in (1..=GLOW_LAYERS).rev() {
                    let t = layer as f32 / GLOW_LAYERS as f32;
                    let alpha = (1.0 - t) * 0.35 + 0.05;
                    self.painter
                        .circle_filled(c, r + halo * t, color32(glow.with_alpha(alpha * glow.a as f32 / 255.0)));
                }
                self.painter.circle_filled(c, r, color32(color));
            }
        }
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: Stroke) {
        let c = self.pos(center);
        let r = self.px(radius);
        let s = self.egui_stroke(&stroke);
        match stroke.dash {
            None => {
                self.painter.circle_stroke(c, r, s);
            }
            Some((dash, gap)) => {
                let path = circle_path(c, r);
                self.painter
                    .extend(Shape::dashed_line(&path, s, self.px(dash), self.px(gap)));
            }
        }
    }

    fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
        let s = self.egui_stroke(&stroke);
        self.painter.line_segment([self.pos(from), self.pos(to)], s);
    }

    fn text(&mut self, anchor: Point, text: &str, style: TextStyle) {
        let size = self.px(style.size);
        if size < 1.0 {
            return;
        }
        let font = if style.monospace { FontId::monospace(size) } else { FontId::proportional(size) };
        let align = match style.align {
            Align::Left => Align2::LEFT_BOTTOM,
            Align::Center => Align2::CENTER_BOTTOM,
        };
        self.painter.text(self.pos(anchor), align, text, font, color32(style.color));
    }
}

fn to_pos(origin: Pos2, mapping: Mapping, world: Point) -> Pos2 {
    let p = mapping.apply(world);
    Pos2::new(origin.x + p.x as f32, origin.y + p.y as f32)
}

fn color32(c: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

/// Colour at fraction `f` of the radius: `rim` at the edge, `mid` at half,
/// `highlight` from `inner` inwards.
fn gradient_at(f: f64, highlight: Rgba, mid: Rgba, rim: Rgba, inner: f64) -> Rgba {
    if f >= 0.5 {
        mid.lerp(rim, ((f - 0.5) / 0.5) as f32)
    } else if f > inner {
        highlight.lerp(mid, ((f - inner) / (0.5 - inner)) as f32)
    } else {
        highlight
    }
}

/// Closed polyline around a circle, fine enough that dashes read as arcs.
fn circle_path(center: Pos2, radius: f32) -> Vec<Pos2> {
    let segments = ((radius * 0.5) as usize).clamp(32, 1024);
    (0..=segments)
        .map(|i| {
            let a = i as f32 / segments as f32 * std::f32::consts::TAU;
            Pos2::new(center.x + radius * a.cos(), center.y + radius * a.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_conversion() {
        let c = color32(Rgba::rgb(0xf3, 0x9c, 0x12));
        assert_eq!(c.r(), 0xf3);
        assert_eq!(c.g(), 0x9c);
        assert_eq!(c.b(), 0x12);
        assert_eq!(c.a(), 255);
    }

    #[test]
    fn mapping_offsets_from_canvas_origin() {
        let mapping = Mapping { scale: 2.0, offset: Point::new(400.0, 300.0) };
        let p = to_pos(Pos2::new(10.0, 20.0), mapping, Point::new(5.0, -5.0));
        assert!((p.x - 420.0).abs() < 1e-4);
        assert!((p.y - 310.0).abs() < 1e-4);
    }

    #[test]
    fn gradient_runs_rim_to_highlight() {
        let (hi, mid, rim) = (Rgba::WHITE, Rgba::rgb(100, 50, 200), Rgba::BLACK);
        assert_eq!(gradient_at(1.0, hi, mid, rim, 0.2), rim);
        assert_eq!(gradient_at(0.5, hi, mid, rim, 0.2), mid);
        assert_eq!(gradient_at(0.1, hi, mid, rim, 0.2), hi);
    }

    #[test]
    fn circle_path_is_closed() {
        let path = circle_path(Pos2::new(0.0, 0.0), 100.0);
        let (first, last) = (path[0], path[path.len() - 1]);
        assert!((first - last).length() < 1e-3);
    }
}
