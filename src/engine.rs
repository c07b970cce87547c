//! Flow execution engine.
//!
//! One call is one pass: sources are seeded, nodes are evaluated in Kahn
//! topological order (FIFO among ready nodes, node-list order first), and the
//! output of every node and every edge is returned. The engine reads the graph
//! and the previous pass's node outputs and mutates neither, so it is safe to
//! call again on every edit or timer tick.
//!
//! Nodes caught in a cycle never reach in-degree zero. They get no output and
//! are listed in [ExecutionResult::unscheduled]; the pass itself still succeeds.

use std::collections::{HashMap, VecDeque};

use tracing::{debug, instrument, warn};

use crate::operators::sequence;
use crate::operators::{DEFAULT_TRANSFORM, TransformRegistry, batch};
use crate::types::{
  EdgeOutputs, ExecutionResult, FlowEdge, FlowGraph, FlowNode, NodeKind, NodeOutputs, NodeValue,
};

/// Execution engine bound to a transform registry.
#[derive(Debug, Clone, Default)]
pub struct FlowEngine {
  registry: TransformRegistry,
}

impl FlowEngine {
  pub fn new(registry: TransformRegistry) -> Self {
    Self { registry }
  }

  pub fn registry(&self) -> &TransformRegistry {
    &self.registry
  }

  pub fn registry_mut(&mut self) -> &mut TransformRegistry {
    &mut self.registry
  }

  /// Runs one pass. See [execute].
  pub fn execute(
    &self,
    nodes: &[FlowNode],
    edges: &[FlowEdge],
    previous: &NodeOutputs,
  ) -> ExecutionResult {
    execute_with(&self.registry, nodes, edges, previous)
  }

  pub fn execute_graph(&self, graph: &FlowGraph, previous: &NodeOutputs) -> ExecutionResult {
    self.execute(&graph.nodes, &graph.edges, previous)
  }
}

/// Runs one pass with the builtin transforms.
///
/// `previous` is the `node_outputs` of the last pass (empty on the first);
/// only sequence nodes read it.
pub fn execute(nodes: &[FlowNode], edges: &[FlowEdge], previous: &NodeOutputs) -> ExecutionResult {
  execute_with(TransformRegistry::builtin(), nodes, edges, previous)
}

pub fn execute_graph(graph: &FlowGraph, previous: &NodeOutputs) -> ExecutionResult {
  execute(&graph.nodes, &graph.edges, previous)
}

/// Adjacency built from the edges whose endpoints both exist.
pub(crate) struct Topology<'g> {
  /// Nodes with unique ids, in input order.
  pub nodes: Vec<&'g FlowNode>,
  /// Successor indices, one entry per edge.
  pub successors: Vec<Vec<usize>>,
  /// Incoming edges per node, in edge order.
  pub incoming: Vec<Vec<&'g FlowEdge>>,
  pub in_degree: Vec<usize>,
}

impl<'g> Topology<'g> {
  #[instrument(level = "trace", skip_all)]
  pub(crate) fn build(nodes: &'g [FlowNode], edges: &'g [FlowEdge]) -> Self {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut unique = Vec::with_capacity(nodes.len());
    for node in nodes {
      if index.contains_key(node.id.as_str()) {
        warn!(node_id = %node.id, "duplicate node id ignored");
        continue;
      }
      index.insert(node.id.as_str(), unique.len());
      unique.push(node);
    }

    let n = unique.len();
    let mut successors = vec![Vec::new(); n];
    let mut incoming = vec![Vec::new(); n];
    let mut in_degree = vec![0; n];
    for edge in edges {
      let (Some(&from), Some(&to)) = (
        index.get(edge.source.as_str()),
        index.get(edge.target.as_str()),
      ) else {
        debug!(edge_id = %edge.id, source = %edge.source, target = %edge.target, "dangling edge ignored");
        continue;
      };
      successors[from].push(to);
      incoming[to].push(edge);
      in_degree[to] += 1;
    }

    Self {
      nodes: unique,
      successors,
      incoming,
      in_degree,
    }
  }

  /// Kahn order over the graph. Returns the visit order and the indices never reached.
  pub(crate) fn kahn_order(&self) -> (Vec<usize>, Vec<usize>) {
    let mut in_degree = self.in_degree.clone();
    let mut queue: VecDeque<usize> = (0..self.nodes.len())
      .filter(|&i| in_degree[i] == 0)
      .collect();
    let mut order = Vec::with_capacity(self.nodes.len());
    while let Some(i) = queue.pop_front() {
      order.push(i);
      for &succ in &self.successors[i] {
        in_degree[succ] -= 1;
        if in_degree[succ] == 0 {
          queue.push_back(succ);
        }
      }
    }
    let mut reached = vec![false; self.nodes.len()];
    for &i in &order {
      reached[i] = true;
    }
    let blocked = (0..self.nodes.len()).filter(|&i| !reached[i]).collect();
    (order, blocked)
  }
}

/// Runs one pass with an explicit registry.
#[instrument(level = "trace", skip_all, fields(nodes = nodes.len(), edges = edges.len()))]
pub fn execute_with(
  registry: &TransformRegistry,
  nodes: &[FlowNode],
  edges: &[FlowEdge],
  previous: &NodeOutputs,
) -> ExecutionResult {
  let topology = Topology::build(nodes, edges);

  let mut node_outputs = NodeOutputs::new();
  let mut edge_outputs = EdgeOutputs::new();
  for node in topology.nodes.iter().filter(|n| n.is_source()) {
    node_outputs.insert(node.id.clone(), node.seed_value());
  }

  // Outputs are computed in the same order kahn_order reports, so every
  // upstream value is final before a node reads it.
  let (order, blocked) = topology.kahn_order();
  for i in order {
    let node = topology.nodes[i];
    let gathered = gather_input(&topology.incoming[i], &node_outputs, &mut edge_outputs);
    let input = match gathered {
      Some(v) => Some(v),
      None if node.is_source() => node_outputs.get(&node.id).cloned(),
      None => None,
    };
    match input {
      Some(input) => {
        let output = evaluate(registry, node, input, previous);
        node_outputs.insert(node.id.clone(), output);
      }
      None => debug!(node_id = %node.id, "no input this pass"),
    }
  }

  let unscheduled: Vec<String> = blocked
    .into_iter()
    .map(|i| topology.nodes[i].id.clone())
    .collect();
  if !unscheduled.is_empty() {
    warn!(nodes = ?unscheduled, "nodes never scheduled (cycle); no output this pass");
  }
  debug!(
    produced = node_outputs.len(),
    edges = edge_outputs.len(),
    "pass complete"
  );

  ExecutionResult {
    node_outputs,
    edge_outputs,
    unscheduled,
  }
}

/// Collects upstream values for a node and records each as its edge's output.
pub(crate) fn gather_input(
  incoming: &[&FlowEdge],
  node_outputs: &NodeOutputs,
  edge_outputs: &mut EdgeOutputs,
) -> Option<NodeValue> {
  let mut values = Vec::with_capacity(incoming.len());
  for edge in incoming {
    if let Some(value) = node_outputs.get(&edge.source) {
      edge_outputs.insert(edge.id.clone(), value.clone());
      values.push(value.clone());
    }
  }
  aggregate(values)
}

/// Fan-in: one value is used verbatim; several are flattened into one
/// sequence in edge order, text values counting as one element each.
pub(crate) fn aggregate(mut values: Vec<NodeValue>) -> Option<NodeValue> {
  match values.len() {
    0 => None,
    1 => values.pop(),
    _ => Some(NodeValue::Lines(
      values
        .into_iter()
        .flat_map(NodeValue::into_sequence)
        .collect(),
    )),
  }
}

/// Evaluates one node on its aggregated input.
#[instrument(level = "trace", skip(registry, node, input, previous), fields(node_id = %node.id, kind = %node.kind))]
pub(crate) fn evaluate(
  registry: &TransformRegistry,
  node: &FlowNode,
  input: NodeValue,
  previous: &NodeOutputs,
) -> NodeValue {
  match node.kind {
    NodeKind::Transform | NodeKind::Branch => {
      let tag = node
        .transform
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_TRANSFORM);
      registry.apply(tag, &input, &node.params)
    }
    NodeKind::Batch => batch(&input, node.params.batch_size_or_default()),
    NodeKind::Sequence => {
      let carried = previous
        .get(&node.id)
        .map(NodeValue::flatten)
        .unwrap_or_default();
      let target = node.params.pattern.as_deref().unwrap_or("");
      NodeValue::Text(sequence::advance(&carried, target, &input))
    }
    NodeKind::Merge | NodeKind::Sink | NodeKind::SourceStatic | NodeKind::SourceStreaming => input,
    NodeKind::Unknown => {
      debug!(node_id = %node.id, "unrecognized node kind, passing input through");
      input
    }
  }
}
