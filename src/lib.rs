//! # textflow
//!
//! Execution engine for visual text-processing flows.
//!
//! A flow is a directed graph of typed nodes (sources, transforms, branches,
//! merges, batches, sequence detectors, sinks) connected by edges. One call to
//! [execute] runs a single deterministic topological pass and returns the
//! value each node produced plus the value each edge carried.
//!
//! ## Architecture
//!
//! - `types`: graph, node, edge and value types (serde, JSON).
//! - `operators`: text transforms, their registry, batching, sequence progress.
//! - `engine`: the topological pass.
//! - `validate_graph`: structural checks run before execution.
//! - `graph_io`: JSON load/save for graphs and output snapshots.
//! - `streaming`: seeded character feed for streaming sources.
//! - `runner`: multi-pass runs that thread previous outputs forward.

pub mod engine;
#[cfg(test)]
mod engine_test;
pub mod error;
pub mod graph_io;
pub mod operators;
pub mod runner;
pub mod streaming;
pub mod types;
pub mod validate_graph;

pub use engine::{FlowEngine, execute, execute_graph, execute_with};
pub use error::{FlowError, FlowResult};
pub use operators::TransformRegistry;
pub use runner::{RunOptions, RunReport, run_passes, run_passes_with};
pub use streaming::StreamingFeed;
pub use types::{
  EdgeOutputs, ExecutionResult, FlowEdge, FlowGraph, FlowNode, NodeKind, NodeOutputs, NodeParams,
  NodeValue,
};
