//! Graph file and snapshot save/load (JSON).
//!
//! A graph file is `{ "nodes": [...], "edges": [...] }`. A snapshot is the
//! node-output map of a pass, kept so a later run can resume sequence progress.

use std::path::Path;

use tracing::instrument;

use crate::error::FlowResult;
use crate::types::{FlowGraph, NodeOutputs};

/// Default filename for the snapshot under a run directory.
pub const SNAPSHOT_FILENAME: &str = "snapshot.json";

/// Parses a graph from JSON text.
pub fn parse_graph(source: &str) -> FlowResult<FlowGraph> {
  Ok(serde_json::from_str(source)?)
}

/// Loads a graph from a JSON file.
#[instrument(level = "trace", skip(path))]
pub fn load_graph(path: &Path) -> FlowResult<FlowGraph> {
  let bytes = std::fs::read(path)?;
  Ok(serde_json::from_slice(&bytes)?)
}

/// Writes `graph` to `path` as pretty JSON, creating parent directories.
#[instrument(level = "trace", skip(path, graph))]
pub fn save_graph(path: &Path, graph: &FlowGraph) -> FlowResult<()> {
  write_json(path, &serde_json::to_string_pretty(graph)?)
}

/// Writes a node-output snapshot to `path`.
#[instrument(level = "trace", skip(path, snapshot))]
pub fn save_snapshot(path: &Path, snapshot: &NodeOutputs) -> FlowResult<()> {
  write_json(path, &serde_json::to_string_pretty(snapshot)?)
}

/// Loads a snapshot from `path`. Errors if the file is missing or not valid JSON.
#[instrument(level = "trace", skip(path))]
pub fn load_snapshot(path: &Path) -> FlowResult<NodeOutputs> {
  let bytes = std::fs::read(path)?;
  Ok(serde_json::from_slice(&bytes)?)
}

fn write_json(path: &Path, json: &str) -> FlowResult<()> {
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent)?;
  }
  std::fs::write(path, json)?;
  Ok(())
}
