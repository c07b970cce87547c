//! Run a small log-filtering flow: keep ERROR lines, pull out the message
//! field, sort and count them.

use textflow::{FlowEdge, FlowGraph, FlowNode, NodeParams, execute_graph, validate_graph};

fn main() -> Result<(), Box<dyn std::error::Error>> {
  let log = "ERROR disk full\nINFO started\nERROR disk full\nWARN slow\nERROR auth failed";

  let graph = FlowGraph::new(
    vec![
      FlowNode::source("log", log),
      FlowNode::transform("errors", "filter").with_params(NodeParams::default().with_pattern("^error")),
      FlowNode::transform("message", "extract_field")
        .with_params(NodeParams::default().with_field_index(2)),
      FlowNode::transform("sorted", "sort"),
      FlowNode::transform("unique", "dedupe"),
      FlowNode::transform("summary", "count"),
      FlowNode::sink("out"),
    ],
    vec![
      FlowEdge::new("e1", "log", "errors"),
      FlowEdge::new("e2", "errors", "message"),
      FlowEdge::new("e3", "message", "sorted"),
      FlowEdge::new("e4", "sorted", "unique"),
      FlowEdge::new("e5", "unique", "out"),
      FlowEdge::new("e6", "errors", "summary"),
    ],
  );

  validate_graph::validate(&graph)?;
  let result = execute_graph(&graph, &Default::default());

  println!("Flow completed.");
  for (id, value) in &result.node_outputs {
    println!("  {}: {}", id, serde_json::to_string(value)?);
  }
  Ok(())
}
