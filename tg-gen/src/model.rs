//! Records emitted by the generator.

use std::fmt;
use std::str::FromStr;

use chrono::{
    DateTime,
    Utc,
};
use serde::{
    Deserialize,
    Deserializer,
    Serialize,
    Serializer,
};
use uuid::Uuid;

/// Marker written in place of a parent id for root nodes.
pub const ROOT_SENTINEL: &str = "CDN";

/// Parent reference of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Source {
    /// No parent; rendered as [`ROOT_SENTINEL`].
    Root,
    /// Id of a node created earlier in the same run.
    Node(Uuid),
}

impl Source {
    /// Whether this is the root sentinel.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str(ROOT_SENTINEL),
            Self::Node(id) => write!(f, "{id}"),
        }
    }
}

impl FromStr for Source {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ROOT_SENTINEL {
            Ok(Self::Root)
        } else {
            Uuid::parse_str(s).map(Self::Node)
        }
    }
}

impl Serialize for Source {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Source {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// A single generated node.
///
/// Field order here is the field order on disk.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Event time, whole seconds, UTC.
    #[serde(with = "tg_core::time::utc_seconds")]
    pub timestamp: DateTime<Utc>,
    /// Unique node id.
    pub id: Uuid,
    /// Health value, rounded to two decimals.
    pub health: f64,
    /// Per-record session id; never shared between records.
    pub session_id: Uuid,
    /// Parent of this node.
    pub source: Source,
    /// Depth in its tree: 1 for roots, parent's level + 1 otherwise.
    pub level: u32,
}

impl NodeRecord {
    /// Whether this node starts a new tree.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.source.is_root()
    }
}
