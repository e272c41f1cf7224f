//! The drawing seam between the renderer and whatever puts pixels on screen.
//!
//! All coordinates and lengths handed to a [`Surface`] are in world space.
//! The renderer announces the world→screen mapping once per frame with
//! [`Surface::set_mapping`]; a backend multiplies lengths by `scale`, so a
//! width of `base / scale` comes out as `base` pixels.

use crate::geom::Point;
use crate::orbit::palette::Rgba;

/// `screen = world · scale + offset`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mapping {
    pub scale: f64,
    pub offset: Point,
}

impl Mapping {
    pub const IDENTITY: Self = Self { scale: 1.0, offset: Point::ORIGIN };

    pub fn apply(&self, world: Point) -> Point {
        Point::new(world.x * self.scale + self.offset.x, world.y * self.scale + self.offset.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fill {
    Solid(Rgba),
    /// Lit sphere: `highlight` at `inner` (fraction of the radius) through
    /// `mid` at half radius to `rim` at the edge.
    RadialGradient { highlight: Rgba, mid: Rgba, rim: Rgba, inner: f64 },
    /// Solid body with a blurred halo `blur` world units wide.
    Glow { color: Rgba, glow: Rgba, blur: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f64,
    /// `(dash, gap)` lengths, world units.
    pub dash: Option<(f64, f64)>,
}

impl Stroke {
    pub fn solid(color: Rgba, width: f64) -> Self {
        Self { color, width, dash: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// Text starts at the anchor.
    Left,
    /// Text is centred on the anchor.
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub color: Rgba,
    pub align: Align,
    pub monospace: bool,
}

pub trait Surface {
    /// Wipe the whole surface.
    fn clear(&mut self, color: Rgba);

    fn set_mapping(&mut self, mapping: Mapping);

    fn fill_circle(&mut self, center: Point, radius: f64, fill: Fill);

    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: Stroke);

    fn line(&mut self, from: Point, to: Point, stroke: Stroke);

    /// `anchor` is the text baseline origin.
    fn text(&mut self, anchor: Point, text: &str, style: TextStyle);
}

// ─── Recorder ────────────────────────────────────────────────────────────────

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rgba),
    Mapping(Mapping),
    FillCircle { center: Point, radius: f64, fill: Fill },
    StrokeCircle { center: Point, radius: f64, stroke: Stroke },
    Line { from: Point, to: Point, stroke: Stroke },
    Text { anchor: Point, text: String, style: TextStyle },
}

/// A [`Surface`] that keeps every call, for tests and golden comparisons.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texts drawn, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for Recorder {
    fn clear(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn set_mapping(&mut self, mapping: Mapping) {
        self.commands.push(DrawCommand::Mapping(mapping));
    }

    fn fill_circle(&mut self, center: Point, radius: f64, fill: Fill) {
        self.commands.push(DrawCommand::FillCircle { center, radius, fill });
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: Stroke) {
        self.commands.push(DrawCommand::StrokeCircle { center, radius, stroke });
    }

    fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.commands.push(DrawCommand::Line { from, to, stroke });
    }

    fn text(&mut self, anchor: Point, text: &str, style: TextStyle) {
        self.commands.push(DrawCommand::Text { anchor, text: text.to_string(), style });
    }
}
