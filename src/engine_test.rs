//! Tests for the flow execution engine.

use crate::engine::{FlowEngine, Topology, aggregate, execute, execute_graph};
use crate::operators::TransformRegistry;
use crate::types::{
  FlowEdge, FlowGraph, FlowNode, NodeKind, NodeOutputs, NodeParams, NodeValue,
};

fn edge(id: &str, from: &str, to: &str) -> FlowEdge {
  FlowEdge::new(id, from, to)
}

fn sorted_source(prefix: &str, text: &str) -> Vec<FlowNode> {
  vec![
    FlowNode::source(format!("{prefix}_src"), text),
    FlowNode::transform(format!("{prefix}_sort"), "sort"),
  ]
}

#[test]
fn aggregate_single_value_verbatim() {
  assert_eq!(
    aggregate(vec![NodeValue::text("a\nb")]),
    Some(NodeValue::text("a\nb"))
  );
  assert_eq!(aggregate(vec![]), None);
}

#[test]
fn aggregate_sequences_concatenate() {
  let out = aggregate(vec![NodeValue::lines(["a", "b"]), NodeValue::lines(["c"])]);
  assert_eq!(out, Some(NodeValue::lines(["a", "b", "c"])));
}

#[test]
fn aggregate_mixed_coerces_scalars() {
  let out = aggregate(vec![NodeValue::lines(["a"]), NodeValue::text("x")]);
  assert_eq!(out, Some(NodeValue::lines(["a", "x"])));
}

#[test]
fn filter_pipeline_end_to_end() {
  let nodes = vec![
    FlowNode::source("src", "ERROR 1\nINFO 2\nERROR 3"),
    FlowNode::transform("flt", "filter").with_params(NodeParams::default().with_pattern("ERROR")),
    FlowNode::sink("out"),
  ];
  let edges = vec![edge("e1", "src", "flt"), edge("e2", "flt", "out")];
  let r = execute(&nodes, &edges, &NodeOutputs::new());

  assert_eq!(
    r.node_output("out"),
    Some(&NodeValue::lines(["ERROR 1", "ERROR 3"]))
  );
  assert_eq!(
    r.edge_output("e1"),
    Some(&NodeValue::text("ERROR 1\nINFO 2\nERROR 3"))
  );
  assert_eq!(r.edge_output("e2"), r.node_output("flt"));
  assert!(r.is_complete());
}

#[test]
fn fan_in_of_two_sequences() {
  let mut nodes = sorted_source("l", "b\na");
  nodes.extend(sorted_source("r", "c"));
  nodes.push(FlowNode::new("m", NodeKind::Merge));
  let edges = vec![
    edge("e1", "l_src", "l_sort"),
    edge("e2", "r_src", "r_sort"),
    edge("e3", "l_sort", "m"),
    edge("e4", "r_sort", "m"),
  ];
  let r = execute(&nodes, &edges, &NodeOutputs::new());
  assert_eq!(r.node_output("m"), Some(&NodeValue::lines(["a", "b", "c"])));
}

#[test]
fn fan_in_of_sequence_and_scalar() {
  let mut nodes = sorted_source("l", "a");
  nodes.push(FlowNode::source("x", "x"));
  nodes.push(FlowNode::new("m", NodeKind::Merge));
  let edges = vec![
    edge("e1", "l_src", "l_sort"),
    edge("e2", "l_sort", "m"),
    edge("e3", "x", "m"),
  ];
  let r = execute(&nodes, &edges, &NodeOutputs::new());
  assert_eq!(r.node_output("m"), Some(&NodeValue::lines(["a", "x"])));
  assert_eq!(r.edge_output("e3"), Some(&NodeValue::text("x")));
}

#[test]
fn batch_node_end_to_end() {
  let nodes = vec![
    FlowNode::source("src", "a\nb\nc"),
    FlowNode::new("b", NodeKind::Batch).with_params(NodeParams::default().with_batch_size(2)),
  ];
  let r = execute(&nodes, &[edge("e", "src", "b")], &NodeOutputs::new());
  assert_eq!(
    r.node_output("b"),
    Some(&NodeValue::lines([
      "chunk of size 2: a, b",
      "chunk of size 1: c"
    ]))
  );
}

#[test]
fn batch_node_default_size() {
  let nodes = vec![
    FlowNode::source("src", "1\n2\n3\n4"),
    FlowNode::new("b", NodeKind::Batch),
  ];
  let r = execute(&nodes, &[edge("e", "src", "b")], &NodeOutputs::new());
  assert_eq!(
    r.node_output("b"),
    Some(&NodeValue::lines([
      "chunk of size 3: 1, 2, 3",
      "chunk of size 1: 4"
    ]))
  );
}

#[test]
fn sequence_progress_threads_through_passes() {
  let mut graph = FlowGraph::new(
    vec![
      FlowNode::new("feed", NodeKind::SourceStreaming)
        .with_params(NodeParams::default().with_text("XBYA")),
      FlowNode::new("seq", NodeKind::Sequence).with_params(NodeParams::default().with_pattern("AB")),
    ],
    vec![edge("e", "feed", "seq")],
  );

  let first = execute_graph(&graph, &NodeOutputs::new());
  assert_eq!(first.node_output("seq"), Some(&NodeValue::text("A")));

  graph.node_mut("feed").unwrap().params.text = Some("B".to_string());
  let second = execute_graph(&graph, &first.into_snapshot());
  assert_eq!(second.node_output("seq"), Some(&NodeValue::text("AB")));

  graph.node_mut("feed").unwrap().params.text = Some("QQQ".to_string());
  let third = execute_graph(&graph, &second.into_snapshot());
  assert_eq!(third.node_output("seq"), Some(&NodeValue::text("AB")));
}

#[test]
fn sequence_without_previous_starts_empty() {
  let nodes = vec![
    FlowNode::source("src", "nothing useful"),
    FlowNode::new("seq", NodeKind::Sequence).with_params(NodeParams::default().with_pattern("Z")),
  ];
  let r = execute(&nodes, &[edge("e", "src", "seq")], &NodeOutputs::new());
  assert_eq!(r.node_output("seq"), Some(&NodeValue::text("")));
}

#[test]
fn cycle_nodes_get_no_output() {
  let nodes = vec![
    FlowNode::source("src", "x"),
    FlowNode::sink("out"),
    FlowNode::transform("a", "sort"),
    FlowNode::transform("b", "sort"),
  ];
  let edges = vec![
    edge("e1", "src", "out"),
    edge("e2", "src", "a"),
    edge("e3", "a", "b"),
    edge("e4", "b", "a"),
  ];
  let r = execute(&nodes, &edges, &NodeOutputs::new());
  assert_eq!(r.node_output("out"), Some(&NodeValue::text("x")));
  assert!(r.node_output("a").is_none());
  assert!(r.node_output("b").is_none());
  assert!(r.edge_output("e2").is_none());
  assert_eq!(r.unscheduled, vec!["a".to_string(), "b".to_string()]);
  assert!(!r.is_complete());
}

#[test]
fn dangling_edges_are_ignored() {
  let nodes = vec![FlowNode::source("src", "v"), FlowNode::sink("out")];
  let edges = vec![
    edge("ghost_in", "missing", "out"),
    edge("e", "src", "out"),
    edge("ghost_out", "src", "nowhere"),
  ];
  let r = execute(&nodes, &edges, &NodeOutputs::new());
  assert_eq!(r.node_output("out"), Some(&NodeValue::text("v")));
  assert!(r.edge_output("ghost_in").is_none());
  assert!(r.edge_output("ghost_out").is_none());
  assert!(r.is_complete());
}

#[test]
fn node_without_input_has_no_output_and_downstream_proceeds() {
  let nodes = vec![
    FlowNode::transform("orphan", "sort"),
    FlowNode::sink("after"),
  ];
  let r = execute(&nodes, &[edge("e", "orphan", "after")], &NodeOutputs::new());
  assert!(r.node_output("orphan").is_none());
  assert!(r.node_output("after").is_none());
  assert!(r.edge_output("e").is_none());
  assert!(r.is_complete());
}

#[test]
fn lone_source_emits_its_seed() {
  let nodes = vec![FlowNode::source("src", "hello")];
  let r = execute(&nodes, &[], &NodeOutputs::new());
  assert_eq!(r.node_output("src"), Some(&NodeValue::text("hello")));
}

#[test]
fn source_with_upstream_forwards_upstream_value() {
  let nodes = vec![
    FlowNode::source("a", "from a"),
    FlowNode::source("b", "from b"),
  ];
  let r = execute(&nodes, &[edge("e", "a", "b")], &NodeOutputs::new());
  assert_eq!(r.node_output("b"), Some(&NodeValue::text("from a")));
}

#[test]
fn transform_without_selector_defaults_to_filter() {
  let nodes = vec![
    FlowNode::source("src", "apple\nbanana\navocado"),
    FlowNode::new("t", NodeKind::Transform).with_params(NodeParams::default().with_pattern("^a")),
  ];
  let r = execute(&nodes, &[edge("e", "src", "t")], &NodeOutputs::new());
  assert_eq!(
    r.node_output("t"),
    Some(&NodeValue::lines(["apple", "avocado"]))
  );
}

#[test]
fn branch_dispatches_like_transform() {
  let nodes = vec![
    FlowNode::source("src", "b\na"),
    FlowNode::new("br", NodeKind::Branch).with_transform("sort"),
  ];
  let r = execute(&nodes, &[edge("e", "src", "br")], &NodeOutputs::new());
  assert_eq!(r.node_output("br"), Some(&NodeValue::lines(["a", "b"])));
}

#[test]
fn unknown_selector_passes_lines_through() {
  let nodes = vec![
    FlowNode::source("src", "b\na"),
    FlowNode::transform("t", "does_not_exist"),
  ];
  let r = execute(&nodes, &[edge("e", "src", "t")], &NodeOutputs::new());
  assert_eq!(r.node_output("t"), Some(&NodeValue::lines(["b", "a"])));
}

#[test]
fn duplicate_node_ids_keep_first() {
  let nodes = vec![
    FlowNode::source("src", "first"),
    FlowNode::source("src", "second"),
  ];
  let r = execute(&nodes, &[], &NodeOutputs::new());
  assert_eq!(r.node_output("src"), Some(&NodeValue::text("first")));
}

#[test]
fn every_reachable_node_gets_one_output() {
  let nodes = vec![
    FlowNode::source("src", "c\nb\na"),
    FlowNode::transform("up", "uppercase"),
    FlowNode::transform("srt", "sort"),
    FlowNode::transform("cnt", "count"),
    FlowNode::sink("out"),
  ];
  let edges = vec![
    edge("e1", "src", "up"),
    edge("e2", "up", "srt"),
    edge("e3", "srt", "cnt"),
    edge("e4", "cnt", "out"),
  ];
  let r = execute(&nodes, &edges, &NodeOutputs::new());
  assert_eq!(r.node_outputs.len(), nodes.len());
  assert_eq!(r.edge_outputs.len(), edges.len());
  assert_eq!(
    r.node_output("out"),
    Some(&NodeValue::text("lines: 3\nchars: 3"))
  );
}

#[test]
fn repeated_passes_are_deterministic_and_pure() {
  let graph = FlowGraph::new(
    vec![
      FlowNode::source("src", "b,a,b"),
      FlowNode::transform("split", "split"),
      FlowNode::transform("uniq", "dedupe"),
      FlowNode::transform("join", "join").with_params(NodeParams::default().with_delimiter("+")),
    ],
    vec![
      edge("e1", "src", "split"),
      edge("e2", "split", "uniq"),
      edge("e3", "uniq", "join"),
    ],
  );
  let before = graph.clone();
  let a = execute_graph(&graph, &NodeOutputs::new());
  let b = execute_graph(&graph, &a.node_outputs);
  assert_eq!(a, b);
  assert_eq!(graph, before);
  assert_eq!(a.node_output("join"), Some(&NodeValue::text("b+a")));
}

#[test]
fn engine_uses_custom_registry() {
  fn shout(input: &NodeValue, _p: &NodeParams) -> NodeValue {
    NodeValue::Lines(input.to_lines().iter().map(|l| format!("{l}!")).collect())
  }
  let mut registry = TransformRegistry::with_builtins();
  registry.register("shout", shout);
  let engine = FlowEngine::new(registry);
  assert!(engine.registry().contains("shout"));

  let nodes = vec![FlowNode::source("src", "hi"), FlowNode::transform("t", "shout")];
  let r = engine.execute(&nodes, &[edge("e", "src", "t")], &NodeOutputs::new());
  assert_eq!(r.node_output("t"), Some(&NodeValue::lines(["hi!"])));
}

#[test]
fn topology_counts_only_valid_edges() {
  let nodes = vec![FlowNode::source("a", ""), FlowNode::sink("b")];
  let edges = vec![edge("e1", "a", "b"), edge("e2", "zzz", "b"), edge("e3", "a", "b")];
  let t = Topology::build(&nodes, &edges);
  assert_eq!(t.in_degree, vec![0, 2]);
  assert_eq!(t.incoming[1].len(), 2);
  let (order, blocked) = t.kahn_order();
  assert_eq!(order, vec![0, 1]);
  assert!(blocked.is_empty());
}

#[test]
fn parallel_edges_fan_in_twice() {
  let nodes = vec![FlowNode::source("a", "v"), FlowNode::new("m", NodeKind::Merge)];
  let edges = vec![edge("e1", "a", "m"), edge("e2", "a", "m")];
  let r = execute(&nodes, &edges, &NodeOutputs::new());
  assert_eq!(r.node_output("m"), Some(&NodeValue::lines(["v", "v"])));
}

#[test]
fn unrecognized_kind_forwards_input() {
  let graph = crate::graph_io::parse_graph(
    r#"{
      "nodes": [
        {"id": "s", "kind": "sourceStatic", "params": {"text": "b\na"}},
        {"id": "sorted", "kind": "transform", "transform": "sort"},
        {"id": "x", "kind": "display"},
        {"id": "out", "kind": "sink"}
      ],
      "edges": [
        {"id": "e1", "from": "s", "to": "sorted"},
        {"id": "e2", "from": "sorted", "to": "x"},
        {"id": "e3", "from": "x", "to": "out"}
      ]
    }"#,
  )
  .unwrap();
  assert_eq!(graph.node("x").unwrap().kind, NodeKind::Unknown);

  let result = execute_graph(&graph, &NodeOutputs::new());
  let lines = NodeValue::lines(["a", "b"]);
  assert_eq!(result.node_output("x"), Some(&lines));
  assert_eq!(result.node_output("out"), Some(&lines));
  assert_eq!(result.edge_output("e3"), Some(&lines));
  assert!(result.is_complete());
}
