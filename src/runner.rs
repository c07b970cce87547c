//! Multi-pass runner: feeds streaming sources, runs the engine, and threads
//! each pass's node outputs into the next pass as previous state.
//!
//! - [run_passes]: run with the builtin transforms.
//! - [run_passes_with]: run with a caller-supplied [FlowEngine].

use std::path::Path;

use tracing::{info, instrument};

use crate::engine::FlowEngine;
use crate::error::FlowResult;
use crate::graph_io::{self, SNAPSHOT_FILENAME};
use crate::streaming::StreamingFeed;
use crate::types::{ExecutionResult, FlowGraph, NodeOutputs};

/// Options for [run_passes].
#[derive(Debug, Default)]
pub struct RunOptions<'a> {
  /// Number of passes to run; 0 runs one.
  pub passes: usize,
  /// If set, the final snapshot is written here (to `run_dir/snapshot.json`).
  pub run_dir: Option<&'a Path>,
  /// If set together with `run_dir`, start from the snapshot found there.
  pub resume: bool,
  /// If set, streaming sources are fed once before every pass.
  pub feed: Option<StreamingFeed>,
}

/// Outcome of a multi-pass run.
#[derive(Debug, Clone)]
pub struct RunReport {
  /// Result of the last pass.
  pub result: ExecutionResult,
  pub passes: usize,
  /// True if the run started from a saved snapshot.
  pub resumed: bool,
}

impl RunReport {
  /// Node outputs of the last pass; what `run_dir/snapshot.json` holds.
  pub fn snapshot(&self) -> &NodeOutputs {
    &self.result.node_outputs
  }
}

pub fn run_passes(graph: &mut FlowGraph, options: RunOptions<'_>) -> FlowResult<RunReport> {
  run_passes_with(&FlowEngine::default(), graph, options)
}

/// Runs `options.passes` sequential passes over `graph`.
///
/// The graph is mutated only by the streaming feed; the engine itself never
/// writes to it.
#[instrument(level = "trace", skip_all, fields(passes = options.passes))]
pub fn run_passes_with(
  engine: &FlowEngine,
  graph: &mut FlowGraph,
  mut options: RunOptions<'_>,
) -> FlowResult<RunReport> {
  let snapshot_path = options.run_dir.map(|d| d.join(SNAPSHOT_FILENAME));

  let (mut previous, resumed) = match &snapshot_path {
    Some(path) if options.resume && path.exists() => {
      info!(path = %path.display(), "resuming from snapshot");
      (graph_io::load_snapshot(path)?, true)
    }
    _ => (NodeOutputs::new(), false),
  };

  let passes = options.passes.max(1);
  let mut result = ExecutionResult::default();
  for pass in 1..=passes {
    if let Some(feed) = options.feed.as_mut() {
      feed.tick(graph);
    }
    result = engine.execute_graph(graph, &previous);
    info!(
      pass,
      outputs = result.node_outputs.len(),
      unscheduled = result.unscheduled.len(),
      "pass complete"
    );
    previous = result.node_outputs.clone();
  }

  if let Some(path) = &snapshot_path {
    graph_io::save_snapshot(path, &previous)?;
  }

  Ok(RunReport {
    result,
    passes,
    resumed,
  })
}
