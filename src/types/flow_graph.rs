//! A flow graph as supplied by the editor or the graph file.

use serde::{Deserialize, Serialize};

use super::{FlowEdge, FlowNode};

/// A flow graph: ordered nodes and ordered edges. Order matters; it fixes the
/// engine's evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowGraph {
  #[serde(default)]
  pub nodes: Vec<FlowNode>,
  #[serde(default)]
  pub edges: Vec<FlowEdge>,
}

impl FlowGraph {
  pub fn new(nodes: Vec<FlowNode>, edges: Vec<FlowEdge>) -> Self {
    Self { nodes, edges }
  }

  pub fn node(&self, id: &str) -> Option<&FlowNode> {
    self.nodes.iter().find(|n| n.id == id)
  }

  pub fn node_mut(&mut self, id: &str) -> Option<&mut FlowNode> {
    self.nodes.iter_mut().find(|n| n.id == id)
  }

  pub fn contains_node(&self, id: &str) -> bool {
    self.node(id).is_some()
  }

  pub fn incoming_edges(&self, node_id: &str) -> Vec<&FlowEdge> {
    self.edges.iter().filter(|e| e.target == node_id).collect()
  }

  pub fn outgoing_edges(&self, node_id: &str) -> Vec<&FlowEdge> {
    self.edges.iter().filter(|e| e.source == node_id).collect()
  }
}
