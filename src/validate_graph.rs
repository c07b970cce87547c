//! Lint a flow graph before running it.
//!
//! The engine tolerates every problem reported here (it ignores dangling
//! edges, defaults missing selectors and leaves cycles unscheduled). Callers
//! that would rather fail loudly run [validate] first.

use std::collections::HashSet;

use tracing::instrument;

use crate::engine::Topology;
use crate::error::{FlowError, FlowResult};
use crate::operators::TransformRegistry;
use crate::types::{FlowGraph, NodeKind};

/// Ids of nodes a topological pass can never reach, in node-list order.
#[instrument(level = "trace", skip(graph))]
pub fn find_cycle_nodes(graph: &FlowGraph) -> Vec<String> {
  let topology = Topology::build(&graph.nodes, &graph.edges);
  let (_, blocked) = topology.kahn_order();
  blocked
    .into_iter()
    .map(|i| topology.nodes[i].id.clone())
    .collect()
}

/// Validates against the builtin transforms. See [validate_with].
pub fn validate(graph: &FlowGraph) -> FlowResult<()> {
  validate_with(graph, TransformRegistry::builtin())
}

/// Reports the first problem found: duplicate ids, dangling edges,
/// unrecognized kinds, Transform/Branch nodes without a known selector,
/// then cycles.
#[instrument(level = "trace", skip(graph, registry))]
pub fn validate_with(graph: &FlowGraph, registry: &TransformRegistry) -> FlowResult<()> {
  let mut ids = HashSet::new();
  for node in &graph.nodes {
    if !ids.insert(node.id.as_str()) {
      return Err(FlowError::DuplicateNode(node.id.clone()));
    }
  }

  for edge in &graph.edges {
    for endpoint in [&edge.source, &edge.target] {
      if !ids.contains(endpoint.as_str()) {
        return Err(FlowError::DanglingEdge {
          edge_id: edge.id.clone(),
          node_id: endpoint.clone(),
        });
      }
    }
  }

  if let Some(node) = graph.nodes.iter().find(|n| n.kind == NodeKind::Unknown) {
    return Err(FlowError::UnknownKind(node.id.clone()));
  }

  for node in &graph.nodes {
    if !matches!(node.kind, NodeKind::Transform | NodeKind::Branch) {
      continue;
    }
    match node.transform.as_deref().map(str::trim) {
      None | Some("") => {
        return Err(FlowError::MissingTransform {
          node_id: node.id.clone(),
          kind: node.kind.to_string(),
        });
      }
      Some(tag) if !registry.contains(tag) => {
        return Err(FlowError::UnknownTransform {
          node_id: node.id.clone(),
          transform: tag.to_string(),
        });
      }
      Some(_) => {}
    }
  }

  let blocked = find_cycle_nodes(graph);
  if !blocked.is_empty() {
    return Err(FlowError::CycleDetected(blocked));
  }
  Ok(())
}
