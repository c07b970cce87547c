//! Kind of a flow node; selects how the engine evaluates it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of a flow node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
  /// Emits its configured text every pass.
  #[serde(alias = "sourceStatic", alias = "source-static", alias = "source")]
  SourceStatic,
  /// Emits a buffer that an external driver keeps appending to.
  #[serde(alias = "sourceStreaming", alias = "source-streaming", alias = "stream")]
  SourceStreaming,
  Transform,
  Branch,
  Merge,
  Batch,
  Sequence,
  Sink,
  /// Any kind name this engine does not know; evaluated as a pass-through.
  #[serde(other)]
  Unknown,
}

impl NodeKind {
  /// Returns true for kinds that seed their own output from configuration.
  pub fn is_source(self) -> bool {
    matches!(self, NodeKind::SourceStatic | NodeKind::SourceStreaming)
  }
}

impl fmt::Display for NodeKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      NodeKind::SourceStatic => write!(f, "source_static"),
      NodeKind::SourceStreaming => write!(f, "source_streaming"),
      NodeKind::Transform => write!(f, "transform"),
      NodeKind::Branch => write!(f, "branch"),
      NodeKind::Merge => write!(f, "merge"),
      NodeKind::Batch => write!(f, "batch"),
      NodeKind::Sequence => write!(f, "sequence"),
      NodeKind::Sink => write!(f, "sink"),
      NodeKind::Unknown => write!(f, "unknown"),
    }
  }
}
