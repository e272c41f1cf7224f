//! Static background stars.
//!
//! Generated once at startup inside the safe zone and never touched again;
//! they do not depend on the node tree.

use std::f64::consts::TAU;

use rand::Rng;

use crate::geom::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundStar {
    pub position: Point,
    /// Screen-pixel size, divided by the zoom scale when drawn.
    pub size: f64,
    pub opacity: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Starfield {
    stars: Vec<BackgroundStar>,
}

impl Starfield {
    /// `count` stars spread uniformly over the disc of radius `radius`.
    pub fn generate<R: Rng + ?Sized>(count: usize, radius: f64, max_size: f64, rng: &mut R) -> Self {
        let stars = (0..count)
            .map(|_| {
                // sqrt keeps the density uniform over the disc
                let r = radius * rng.random::<f64>().sqrt();
                let theta = rng.random::<f64>() * TAU;
                BackgroundStar {
                    position: Point::ORIGIN.orbit(r, theta),
                    size: rng.random::<f64>() * max_size,
                    opacity: rng.random::<f32>(),
                }
            })
            .collect();
        Self { stars }
    }

    pub fn stars(&self) -> &[BackgroundStar] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}
