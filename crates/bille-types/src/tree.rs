use crate::{Color, ErrorText, Path, Scalar, TracePayload, TraceRecord};
use facet::Facet;
use std::error::Error;
use std::fmt;

/// Index of a node in the snapshot tree's arena.
#[derive(Facet, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[facet(transparent)]
pub struct NodeId(usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// One observable instance's accumulated history.
#[derive(Facet, Debug, Clone, PartialEq, Default)]
pub struct SnapshotNode {
    items: Vec<Item>,
}

impl SnapshotNode {
    pub fn items(&self) -> &[Item] {
        &self.items
    }
}

/// One entry in a node's history, in arrival order.
///
/// Items are append-only: once pushed they are never removed or mutated.
/// A terminal item ([`Item::Error`] or [`Item::Completed`]) is always the
/// last one its node receives.
#[derive(Facet, Debug, Clone, PartialEq)]
#[repr(u8)]
#[facet(rename_all = "snake_case")]
pub enum Item {
    Value {
        time_ms: u64,
        value: Scalar,
        color: Option<Color>,
    },
    Nested {
        time_ms: u64,
        color: Option<Color>,
        node: NodeId,
    },
    Error {
        time_ms: u64,
        error: ErrorText,
    },
    Completed {
        time_ms: u64,
    },
}

impl Item {
    pub fn time_ms(&self) -> u64 {
        match self {
            Self::Value { time_ms, .. }
            | Self::Nested { time_ms, .. }
            | Self::Error { time_ms, .. }
            | Self::Completed { time_ms } => *time_ms,
        }
    }
}

/// Arena-backed snapshot of everything a trace has emitted so far.
///
/// Node 0 is the root stream and exists from construction. The tree has a
/// single writer (whoever applies trace records); readers never see it
/// mid-mutation because the whole pipeline is single-threaded.
#[derive(Facet, Debug, Clone, PartialEq)]
pub struct SnapshotTree {
    nodes: Vec<SnapshotNode>,
}

impl Default for SnapshotTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![SnapshotNode::default()],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Number of observable instances discovered so far (root included).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> &SnapshotNode {
        &self.nodes[id.0]
    }

    /// Walks `path` down the tree, following nested items by emission index.
    pub fn resolve(&self, path: &Path) -> Result<NodeId, ApplyError> {
        let mut current = NodeId::ROOT;
        for (depth, &index) in path.indices().iter().enumerate() {
            let node = &self.nodes[current.0];
            let item = node.items.get(index as usize).ok_or(ApplyError::PathIndexOutOfRange {
                path: path.clone(),
                depth,
                index,
                len: node.items.len(),
            })?;
            match item {
                Item::Nested { node, .. } => current = *node,
                _ => {
                    return Err(ApplyError::PathThroughNonObservable {
                        path: path.clone(),
                        depth,
                        index,
                    });
                }
            }
        }
        Ok(current)
    }

    /// Applies one trace record, appending an item to the node its path
    /// addresses. A [`TracePayload::NestedObservable`] record allocates a
    /// fresh empty node and links it in place.
    ///
    /// Timeout markers are process-wide, not tree mutations; callers check
    /// [`TracePayload::is_timeout`] before applying.
    pub fn apply(&mut self, record: &TraceRecord) -> Result<(), ApplyError> {
        let target = self.resolve(&record.path)?;
        match &record.payload {
            TracePayload::Value(value) => {
                self.nodes[target.0].items.push(Item::Value {
                    time_ms: record.time_ms,
                    value: value.clone(),
                    color: None,
                });
            }
            TracePayload::NestedObservable => {
                self.add_nested(target, record.time_ms, None);
            }
            TracePayload::Error(error) => {
                self.nodes[target.0].items.push(Item::Error {
                    time_ms: record.time_ms,
                    error: error.clone(),
                });
            }
            TracePayload::Completed => {
                self.nodes[target.0].items.push(Item::Completed {
                    time_ms: record.time_ms,
                });
            }
            TracePayload::Timeout => return Err(ApplyError::MetaRecord),
        }
        Ok(())
    }

    /// Appends a plain value item. Used by code that builds trees directly.
    pub fn push_value(&mut self, node: NodeId, time_ms: u64, value: Scalar, color: Option<Color>) {
        self.nodes[node.0].items.push(Item::Value {
            time_ms,
            value,
            color,
        });
    }

    /// Appends a nested-observable item and returns the fresh child node.
    pub fn add_nested(&mut self, parent: NodeId, time_ms: u64, color: Option<Color>) -> NodeId {
        let child = NodeId(self.nodes.len());
        self.nodes.push(SnapshotNode::default());
        self.nodes[parent.0].items.push(Item::Nested {
            time_ms,
            color,
            node: child,
        });
        child
    }

    pub fn push_error(&mut self, node: NodeId, time_ms: u64, error: ErrorText) {
        self.nodes[node.0].items.push(Item::Error { time_ms, error });
    }

    pub fn push_completed(&mut self, node: NodeId, time_ms: u64) {
        self.nodes[node.0].items.push(Item::Completed { time_ms });
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    /// The record is a process-wide marker, not a tree mutation.
    MetaRecord,
    PathIndexOutOfRange {
        path: Path,
        depth: usize,
        index: u32,
        len: usize,
    },
    PathThroughNonObservable {
        path: Path,
        depth: usize,
        index: u32,
    },
}

impl fmt::Display for ApplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MetaRecord => {
                write!(f, "meta record (timeout) cannot be applied to the snapshot tree")
            }
            Self::PathIndexOutOfRange {
                path,
                depth,
                index,
                len,
            } => write!(
                f,
                "invariant violated: path {path} index {index} at depth {depth} is out of range for a node with {len} items"
            ),
            Self::PathThroughNonObservable { path, depth, index } => write!(
                f,
                "invariant violated: path {path} index {index} at depth {depth} does not address a nested observable"
            ),
        }
    }
}

impl Error for ApplyError {}
