//! Single-slot cut/paste clipboard.
//!
//! ```text
//!   Empty ──cut(p)──▶ Holding(p) ──cut(q)──▶ Holding(q)
//!     ▲                   │
//!     └──paste(dest)──────┘   emits move(p, dest)
//! ```
//!
//! Paste while empty emits nothing.

use crate::host::Intent;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Clipboard {
    #[default]
    Empty,
    /// A pending move of this path.
    Holding(String),
}

impl Clipboard {
    /// Remember `path` for a later paste, replacing anything held.
    pub fn cut(&mut self, path: impl Into<String>) {
        *self = Clipboard::Holding(path.into());
    }

    /// Consume the held path into a move intent toward `destination`.
    pub fn paste(&mut self, destination: &str) -> Option<Intent> {
        match std::mem::take(self) {
            Clipboard::Holding(source) => Some(Intent::move_to(source, destination)),
            Clipboard::Empty => None,
        }
    }

    pub fn holding(&self) -> Option<&str> {
        match self {
            Clipboard::Holding(path) => Some(path),
            Clipboard::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Clipboard::Empty)
    }
}

/// Last path component, splitting on either separator.
pub fn basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}
