//! Error types for the layout engine.
//!
//! Every error the engine can produce is a caller bug, not a transient
//! failure: the tree was mutated against its structural invariants, the
//! dirty/seen protocol was violated, or a measure was requested from a node
//! without a callback. There is no recovery, retry or partial result.

use thiserror::Error;

use crate::NodeKey;

/// Result type alias for layout-engine operations.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors surfaced by tree mutation, the dirty-state protocol and measurement.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// A parent/child invariant was broken: inserting a child that already
    /// has a parent, detaching a child its recorded parent does not list, or
    /// addressing a child index that does not exist.
    #[error("tree structure violation at {node:?}: {message}")]
    TreeStructure { node: NodeKey, message: &'static str },

    /// The dirty/seen sequence was violated: a node in `HasNewLayout` was
    /// mutated before its layout was consumed, or `mark_layout_seen` was
    /// called with no new layout pending.
    #[error("layout protocol misuse at {node:?}: {message}")]
    ProtocolMisuse { node: NodeKey, message: &'static str },

    /// A measurement was requested from a node with no measure function.
    #[error("measure function is not defined for {node:?}")]
    MeasureNotDefined { node: NodeKey },
}
