pub mod camera;
pub mod config;
pub mod engine;
pub mod error;
pub mod geom;
pub mod hit;
pub mod host;
pub mod interact;
pub mod orbit;
pub mod render;
pub mod tree;

pub use engine::{Capabilities, Engine};
pub use error::{EngineError, Result};
