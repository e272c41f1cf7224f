//! Inbound node records, exactly as the host serializes them.

use serde::{Deserialize, Serialize};

/// `"star"` for containers, `"planet"` for leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Star,
    Planet,
}

/// One node of the host's tree. `size` is the mass hint and `lastModified`
/// a millisecond Unix timestamp; both may be absent on malformed input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: RecordKind,
    pub path: String,
    #[serde(default)]
    pub size: Option<f64>,
    #[serde(default)]
    pub last_modified: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NodeRecord>>,
}

impl NodeRecord {
    /// A container record with no children yet.
    pub fn star(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: RecordKind::Star,
            path: path.into(),
            size: None,
            last_modified: None,
            children: Some(Vec::new()),
        }
    }

    /// A leaf record.
    pub fn planet(name: impl Into<String>, path: impl Into<String>, size: f64, last_modified: f64) -> Self {
        Self {
            name: name.into(),
            kind: RecordKind::Planet,
            path: path.into(),
            size: Some(size),
            last_modified: Some(last_modified),
            children: None,
        }
    }

    /// Builder-style child append; turns `children: None` into a list.
    pub fn with_child(mut self, child: NodeRecord) -> Self {
        self.children.get_or_insert_with(Vec::new).push(child);
        self
    }

    pub fn children(&self) -> &[NodeRecord] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Total number of records in this subtree, self included.
    pub fn count(&self) -> usize {
        let mut stack = vec![self];
        let mut n = 0;
        while let Some(rec) = stack.pop() {
            n += 1;
            stack.extend(rec.children());
        }
        n
    }
}
