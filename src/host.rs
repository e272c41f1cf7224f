//! Host wire protocol.
//!
//! Inbound: `{"type":"update","data":<NodeRecord>}` replaces the whole tree.
//! Outbound: one-way [`Intent`]s, `{"type":<name>,"value":<payload>}`. The
//! engine never waits for an answer; the host performs the mutation and
//! sends a fresh tree when it is done.
//!
//! Trees may nest far deeper than serde_json's default recursion limit, so
//! inbound JSON goes through [`decode`]: the limit is lifted, the stack grows
//! on demand, and a flat pre-scan caps nesting at [`MAX_NESTING`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::tree::NodeRecord;

/// Deepest `{`/`[` nesting accepted from the host. Each tree level costs
/// two (the node object and its `children` array), so this admits trees
/// about 2000 levels deep.
pub const MAX_NESTING: usize = 4096;

/// Message from the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostMessage {
    Update { data: NodeRecord },
}

/// Wire shape of [`HostMessage`]. Decoding a plain struct keeps serde from
/// buffering the whole tree the way an internally tagged enum would.
#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: MessageKind,
    data: NodeRecord,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
enum MessageKind {
    Update,
}

impl HostMessage {
    pub fn from_json(json: &str) -> Result<Self> {
        let Envelope { kind, data } = decode(json)?;
        Ok(match kind {
            MessageKind::Update => HostMessage::Update { data },
        })
    }
}

/// Decode host JSON of any nesting depth up to [`MAX_NESTING`].
pub fn decode<T: DeserializeOwned>(json: &str) -> Result<T> {
    let depth = nesting_depth(json);
    if depth > MAX_NESTING {
        return Err(EngineError::TooDeep { depth, limit: MAX_NESTING });
    }
    let mut de = serde_json::Deserializer::from_str(json);
    de.disable_recursion_limit();
    let value = T::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(value)
}

/// Maximum bracket depth outside string literals. Malformed input is left
/// for the real decoder to reject.
fn nesting_depth(json: &str) -> usize {
    let (mut depth, mut max) = (0usize, 0usize);
    let (mut in_string, mut escaped) = (false, false);
    for b in json.bytes() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                max = max.max(depth);
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max
}

/// Source and destination of a move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveTarget {
    pub source: String,
    pub destination: String,
}

/// Fire-and-forget request to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Intent {
    /// Sent once at startup, before any tree is expected.
    #[serde(rename = "onReady")]
    Ready,
    #[serde(rename = "onError")]
    Error(String),
    #[serde(rename = "onInfo")]
    Info(String),
    #[serde(rename = "onOpenFile")]
    Open(String),
    /// Payload is the parent container's path.
    #[serde(rename = "createFile")]
    CreateFile(String),
    #[serde(rename = "createFolder")]
    CreateFolder(String),
    #[serde(rename = "renameFile")]
    Rename(String),
    #[serde(rename = "deleteFile")]
    Delete(String),
    #[serde(rename = "moveFile")]
    Move(MoveTarget),
}

impl Intent {
    pub fn move_to(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Intent::Move(MoveTarget { source: source.into(), destination: destination.into() })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
