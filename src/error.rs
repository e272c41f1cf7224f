//! Engine error type.

use thiserror::Error;

/// Errors surfaced by the engine.
///
/// Host-bound intents are fire-and-forget and never appear here; only
/// startup preconditions and undecodable input do.
#[derive(Debug, Error)]
pub enum EngineError {
    /// There is no drawing surface to boot against. Nothing is reported to
    /// the host because the channel does not exist yet.
    #[error("no drawing surface available")]
    MissingSurface,

    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },

    /// Rejected before decoding; see [`crate::host::MAX_NESTING`].
    #[error("message nests {depth} levels deep, limit is {limit}")]
    TooDeep { depth: usize, limit: usize },

    /// A host message or config blob was not valid JSON for its schema.
    #[error("decode failed: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
