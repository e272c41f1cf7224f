//! Camera / viewport.
//!
//! World origin maps to the centre of the viewport:
//!
//!   screen = world · k + (x, y) + (width / 2, height / 2)
//!   world  = (screen − centre − (x, y)) / k
//!
//! `k` is clamped to `[min_scale, max_scale]` on every update. Fly-to is
//! driven by [`Tween`], which any gesture cancels.

use serde::{Deserialize, Serialize};

use crate::config::CameraConfig;
use crate::error::{EngineError, Result};
use crate::geom::Point;

/// Pan/zoom state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub k: f64,
}

impl Transform {
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, k: 1.0 };
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Drawing surface size in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Result<Self> {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            Ok(Self { width, height })
        } else {
            Err(EngineError::InvalidViewport { width, height })
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

// ─── Animation primitive ─────────────────────────────────────────────────────

/// Values a [`Tween`] can interpolate.
pub trait Lerp: Copy {
    fn lerp(self, to: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(self, to: Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

impl Lerp for Transform {
    fn lerp(self, to: Self, t: f64) -> Self {
        Transform {
            x: self.x.lerp(to.x, t),
            y: self.y.lerp(to.y, t),
            k: self.k.lerp(to.k, t),
        }
    }
}

/// Cubic ease-in-out on `[0, 1]`.
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

/// Eased interpolation from `from` to `to` over `duration` time units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween<T: Lerp> {
    from: T,
    to: T,
    duration: f64,
    elapsed: f64,
}

impl<T: Lerp> Tween<T> {
    pub fn new(from: T, to: T, duration: f64) -> Self {
        Self { from, to, duration: duration.max(0.0), elapsed: 0.0 }
    }

    pub fn advance(&mut self, dt: f64) {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed = (self.elapsed + dt).min(self.duration);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Current value; exactly `to` once finished.
    pub fn value(&self) -> T {
        if self.is_finished() {
            return self.to;
        }
        self.from.lerp(self.to, ease_cubic_in_out(self.elapsed / self.duration))
    }
}

// ─── Camera ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    cfg: CameraConfig,
    transform: Transform,
    viewport: Viewport,
    flight: Option<Tween<Transform>>,
}

impl Camera {
    pub fn new(cfg: CameraConfig, viewport: Viewport) -> Self {
        Self { cfg, transform: Transform::IDENTITY, viewport, flight: None }
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn scale(&self) -> f64 {
        self.transform.k
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn is_flying(&self) -> bool {
        self.flight.is_some()
    }

    /// Screen offset applied after scaling: pan plus viewport centre.
    pub fn offset(&self) -> Point {
        let c = self.viewport.center();
        Point::new(self.transform.x + c.x, self.transform.y + c.y)
    }

    pub fn to_screen(&self, world: Point) -> Point {
        let o = self.offset();
        Point::new(world.x * self.transform.k + o.x, world.y * self.transform.k + o.y)
    }

    pub fn to_world(&self, screen: Point) -> Point {
        let o = self.offset();
        Point::new((screen.x - o.x) / self.transform.k, (screen.y - o.y) / self.transform.k)
    }

    fn clamp_scale(&self, k: f64) -> f64 {
        if k.is_finite() {
            k.clamp(self.cfg.min_scale, self.cfg.max_scale)
        } else {
            self.transform.k
        }
    }

    /// Drag by a screen-space delta.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        if !(dx.is_finite() && dy.is_finite()) {
            return;
        }
        self.flight = None;
        self.transform.x += dx;
        self.transform.y += dy;
    }

    /// Multiply the scale by `factor` while keeping the world point under
    /// `anchor` (screen space) fixed. The result is clamped, never rejected.
    pub fn zoom_at(&mut self, anchor: Point, factor: f64) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        self.flight = None;
        let world = self.to_world(anchor);
        let k = self.clamp_scale(self.transform.k * factor);
        let c = self.viewport.center();
        self.transform = Transform {
            x: anchor.x - c.x - world.x * k,
            y: anchor.y - c.y - world.y * k,
            k,
        };
    }

    /// Wheel zoom: positive `delta` zooms out.
    pub fn wheel(&mut self, anchor: Point, delta: f64) {
        self.zoom_at(anchor, 2f64.powf(-delta * self.cfg.wheel_sensitivity));
    }

    /// Set the scale directly, zooming about the viewport centre.
    pub fn set_scale(&mut self, k: f64) {
        if k.is_finite() && k > 0.0 {
            self.zoom_at(self.viewport.center(), k / self.transform.k);
        } else {
            self.zoom_at(self.viewport.center(), self.cfg.min_scale / self.transform.k);
        }
    }

    /// Transform that centres `target` at the fly-to zoom level.
    pub fn fly_to_transform(&self, target: Point) -> Transform {
        let k = self.clamp_scale(self.cfg.fly_to_scale);
        Transform { x: -target.x * k, y: -target.y * k, k }
    }

    /// Start animating toward `target`; `animate == false` jumps there.
    pub fn fly_to(&mut self, target: Point, animate: bool) {
        let to = self.fly_to_transform(target);
        if animate && self.cfg.fly_to_duration > 0.0 {
            log::debug!("fly-to ({:.1}, {:.1}) over {}", target.x, target.y, self.cfg.fly_to_duration);
            self.flight = Some(Tween::new(self.transform, to, self.cfg.fly_to_duration));
        } else {
            self.flight = None;
            self.transform = to;
        }
    }

    /// Step any in-flight animation by `dt` time units.
    pub fn advance(&mut self, dt: f64) {
        if let Some(flight) = self.flight.as_mut() {
            flight.advance(dt);
            self.transform = flight.value();
            if flight.is_finished() {
                self.flight = None;
            }
        }
    }

    /// New surface size. Any flight in progress is dropped.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.flight = None;
    }

    /// Back to the identity transform.
    pub fn reset(&mut self) {
        self.flight = None;
        self.transform = Transform::IDENTITY;
    }
}
