//! An edge in a flow graph.

use serde::{Deserialize, Serialize};

/// An edge in a flow graph. Carries no data of its own; the engine records
/// the value forwarded from `source` as the edge's output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
  pub id: String,
  #[serde(alias = "from")]
  pub source: String,
  #[serde(alias = "to")]
  pub target: String,
}

impl FlowEdge {
  pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      source: source.into(),
      target: target.into(),
    }
  }
}
