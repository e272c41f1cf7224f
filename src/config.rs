//! Engine configuration.
//!
//! Every struct carries the visual constants of the orbital view as its
//! `Default`. Hosts may override any subset by handing a partial JSON object
//! to [`EngineConfig::from_json`]; fields left out keep their defaults.
//! Colours are given as `#rrggbb` strings.

use serde::Deserialize;

use crate::error::Result;
use crate::orbit::palette::{self, Rgba};

/// Ring placement for the children of one class of parent.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RingSpacing {
    /// Orbit radius of the first child.
    pub start: f64,
    /// Each later sibling sits `spacing / 2` further out.
    pub spacing: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    /// Children of the root.
    pub root_rings: RingSpacing,
    /// Children of a non-root container.
    pub stellar_rings: RingSpacing,
    /// Fallback for any other parent.
    pub default_rings: RingSpacing,
    /// Upper bound (exclusive) of the random radius jitter.
    pub jitter: f64,
    /// Smallest angular speed magnitude, radians per time unit.
    pub min_speed: f64,
    /// Width of the random speed band above `min_speed`.
    pub speed_band: f64,
    /// Root core radius.
    pub core_radius: f64,
    /// Stellar radius at depth 1.
    pub star_radius: f64,
    /// Stellar radius lost per extra level of depth.
    pub star_shrink: f64,
    /// Stellar radius never drops below this.
    pub star_min_radius: f64,
    /// Orbital radius is the mass hint clamped into `[min, max]`.
    pub planet_min_radius: f64,
    pub planet_max_radius: f64,
    /// Age at which the colour ramp saturates, in time units.
    pub max_age: f64,
    pub core_color: Rgba,
    pub core_ring: Rgba,
    pub star_color: Rgba,
    pub star_glow: Rgba,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            root_rings: RingSpacing { start: 200.0, spacing: 150.0 },
            stellar_rings: RingSpacing { start: 120.0, spacing: 40.0 },
            default_rings: RingSpacing { start: 100.0, spacing: 50.0 },
            jitter: 20.0,
            min_speed: 0.0005,
            speed_band: 0.001,
            core_radius: 40.0,
            star_radius: 20.0,
            star_shrink: 2.0,
            star_min_radius: 10.0,
            planet_min_radius: 4.0,
            planet_max_radius: 12.0,
            max_age: 1000.0 * 60.0 * 60.0 * 24.0 * 365.0,
            core_color: palette::CORE_COLOR,
            core_ring: palette::CORE_RING,
            star_color: palette::STAR_COLOR,
            star_glow: palette::STAR_GLOW,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Zoom level a fly-to settles at.
    pub fly_to_scale: f64,
    /// Fly-to duration in time units.
    pub fly_to_duration: f64,
    /// Wheel zoom: `factor = 2^(-delta * wheel_sensitivity)`.
    pub wheel_sensitivity: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.1,
            max_scale: 4.0,
            fly_to_scale: 1.5,
            fly_to_duration: 1500.0,
            wheel_sensitivity: 0.002,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Radius of the deep-space boundary and of the starfield.
    pub universe_radius: f64,
    pub star_count: usize,
    /// Background star size upper bound (screen pixels).
    pub star_max_size: f64,
    pub ring_alpha: f32,
    pub link_alpha: f32,
    /// Line width on screen for rings, links and the core outline.
    pub line_width: f64,
    pub boundary_width: f64,
    pub boundary_dash: f64,
    pub boundary_gap: f64,
    pub boundary_label: String,
    pub boundary_font_size: f64,
    /// Screen-space gap between the boundary ring and its label.
    pub boundary_label_gap: f64,
    pub label_font_size: f64,
    /// Orbital labels are drawn only above this zoom scale.
    pub label_zoom_threshold: f64,
    /// Blur radius of the stellar glow, world units.
    pub glow_blur: f64,
    /// Clear colour behind everything.
    pub space_color: Rgba,
    pub boundary_color: Rgba,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            universe_radius: 2500.0,
            star_count: 500,
            star_max_size: 2.0,
            ring_alpha: 0.05,
            link_alpha: 0.1,
            line_width: 1.0,
            boundary_width: 2.0,
            boundary_dash: 20.0,
            boundary_gap: 10.0,
            boundary_label: ">> WARNING: DEEP SPACE <<".to_string(),
            boundary_font_size: 24.0,
            boundary_label_gap: 30.0,
            label_font_size: 12.0,
            label_zoom_threshold: 1.5,
            glow_blur: 20.0,
            space_color: palette::SPACE,
            boundary_color: palette::WARNING_RED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub hover_epsilon: f64,
    pub click_epsilon: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self { hover_epsilon: 3.0, click_epsilon: 5.0 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub orbit: OrbitConfig,
    pub camera: CameraConfig,
    pub render: RenderConfig,
    pub interaction: InteractionConfig,
    /// Seed for layout and starfield randomness. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        crate::host::decode(json)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = EngineConfig::from_json(r#"{ "camera": { "max_scale": 8.0 }, "seed": 7 }"#).unwrap();
        assert_eq!(cfg.camera.max_scale, 8.0);
        assert_eq!(cfg.camera.min_scale, 0.1);
        assert_eq!(cfg.orbit, OrbitConfig::default());
        assert_eq!(cfg.seed, Some(7));
    }

    #[test]
    fn colours_override_from_hex() {
        let cfg = EngineConfig::from_json(
            r##"{ "orbit": { "star_color": "#ffcc00" }, "render": { "space_color": "#000" } }"##,
        )
        .unwrap();
        assert_eq!(cfg.orbit.star_color, Rgba::rgb(0xff, 0xcc, 0x00));
        assert_eq!(cfg.orbit.star_glow, palette::STAR_GLOW);
        assert_eq!(cfg.render.space_color, Rgba::BLACK);

        let err = EngineConfig::from_json(r#"{ "orbit": { "star_glow": "gold" } }"#).unwrap_err();
        assert!(matches!(err, crate::error::EngineError::Decode(_)));
    }

    #[test]
    fn bad_json_is_a_decode_error() {
        let err = EngineConfig::from_json("{ camera: nope").unwrap_err();
        assert!(matches!(err, crate::error::EngineError::Decode(_)));
    }

    #[test]
    fn epsilons_differ_by_gesture() {
        let cfg = InteractionConfig::default();
        assert!(cfg.click_epsilon > cfg.hover_epsilon);
    }
}
