//! Result of one engine pass.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::NodeValue;

/// Node id → output value. Also the carried state between passes.
pub type NodeOutputs = BTreeMap<String, NodeValue>;
/// Edge id → value observed flowing along the edge.
pub type EdgeOutputs = BTreeMap<String, NodeValue>;

/// Result of one engine pass. Rebuilt from scratch every pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
  pub node_outputs: NodeOutputs,
  pub edge_outputs: EdgeOutputs,
  /// Nodes never dequeued this pass (blocked behind a cycle). Diagnostic only.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub unscheduled: Vec<String>,
}

impl ExecutionResult {
  pub fn node_output(&self, node_id: &str) -> Option<&NodeValue> {
    self.node_outputs.get(node_id)
  }

  pub fn edge_output(&self, edge_id: &str) -> Option<&NodeValue> {
    self.edge_outputs.get(edge_id)
  }

  /// True when every node was scheduled this pass.
  pub fn is_complete(&self) -> bool {
    self.unscheduled.is_empty()
  }

  /// Consumes the result, keeping the node outputs as the next pass's previous state.
  pub fn into_snapshot(self) -> NodeOutputs {
    self.node_outputs
  }
}
