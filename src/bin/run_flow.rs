//! CLI: Run a text-processing flow from a JSON graph file.
//!
//! Loads the graph, optionally lints it (--strict), runs N passes threading
//! each pass's outputs into the next, and prints the final node outputs.
//!
//! Usage: `run_flow [OPTIONS] <graph.json>`
//! Example: run_flow --passes 5 --feed --seed 7 flows/sequence.json
//!
//! With --run-dir, the final outputs are written to <run-dir>/snapshot.json;
//! --resume starts from that snapshot when it exists.
//!
//! Set RUST_LOG=textflow=trace for TRACE-level span enter/exit and events.

use clap::Parser;
use std::env;
use std::path::PathBuf;
use std::process;
use textflow::{RunOptions, StreamingFeed, graph_io, run_passes, validate_graph};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

/// Run a text-processing flow from a JSON graph file.
#[derive(Parser, Debug)]
#[command(name = "run_flow")]
#[command(
  after_help = r#"Environment variables (override the matching flags when set):
  TEXTFLOW_PASSES    Number of passes to run.
  TEXTFLOW_RUN_DIR   Directory for snapshot.json.
  TEXTFLOW_SEED      Seed for the streaming feed.

Examples:
  run_flow flows/log_filter.json
  run_flow --passes 10 --feed --seed 3 --run-dir .textflow flows/sequence.json"#
)]
struct Args {
  /// Number of passes. Overridden by TEXTFLOW_PASSES if set.
  #[arg(long, value_name = "N", default_value_t = 1)]
  passes: usize,

  /// Seed for the streaming feed. Overridden by TEXTFLOW_SEED if set.
  #[arg(long, value_name = "N", default_value_t = 0)]
  seed: u64,

  /// Append generated characters to streaming sources before every pass.
  #[arg(long)]
  feed: bool,

  /// Directory for snapshot.json. Overridden by TEXTFLOW_RUN_DIR if set.
  #[arg(long, value_name = "DIR")]
  run_dir: Option<PathBuf>,

  /// Start from <run-dir>/snapshot.json when it exists.
  #[arg(long)]
  resume: bool,

  /// Lint the graph first and fail on any problem.
  #[arg(long)]
  strict: bool,

  /// Print the final result as JSON.
  #[arg(long)]
  json: bool,

  /// Path to the JSON graph file
  #[arg(value_name = "graph.json")]
  graph_path: PathBuf,
}

fn env_number<T: std::str::FromStr>(name: &str) -> Option<T> {
  let raw = env::var(name).ok()?;
  match raw.trim().parse() {
    Ok(n) => Some(n),
    Err(_) => {
      eprintln!("Error: {} must be a non-negative integer, got '{}'", name, raw);
      process::exit(1);
    }
  }
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
    .with_writer(std::io::stderr)
    .init();

  info!("run_flow starting");
  let args = Args::parse();

  // Env vars override flags.
  let passes = env_number("TEXTFLOW_PASSES").unwrap_or(args.passes);
  let seed = env_number("TEXTFLOW_SEED").unwrap_or(args.seed);
  let run_dir = env::var("TEXTFLOW_RUN_DIR")
    .ok()
    .map(PathBuf::from)
    .or_else(|| args.run_dir.clone());

  info!(passes, seed, feed = args.feed, run_dir = ?run_dir, "options (env or flags)");

  let path = &args.graph_path;
  let mut graph = match graph_io::load_graph(path) {
    Ok(g) => g,
    Err(e) => {
      eprintln!("Error loading {}: {}", path.display(), e);
      process::exit(1);
    }
  };

  if args.strict
    && let Err(e) = validate_graph::validate(&graph)
  {
    eprintln!("Invalid flow: {}", e);
    process::exit(1);
  }

  let options = RunOptions {
    passes,
    run_dir: run_dir.as_deref(),
    resume: args.resume,
    feed: args.feed.then(|| StreamingFeed::new(seed)),
  };

  let report = match run_passes(&mut graph, options) {
    Ok(r) => r,
    Err(e) => {
      eprintln!("Run error: {}", e);
      process::exit(1);
    }
  };

  info!(
    passes = report.passes,
    outputs = report.result.node_outputs.len(),
    "flow completed"
  );

  if args.json {
    match serde_json::to_string_pretty(&report.result) {
      Ok(s) => println!("{}", s),
      Err(e) => {
        eprintln!("Error encoding result: {}", e);
        process::exit(1);
      }
    }
    return;
  }

  println!("Flow completed.");
  println!("  Passes: {}", report.passes);
  if report.resumed {
    println!("  Resumed from snapshot");
  }
  for (id, value) in &report.result.node_outputs {
    let shown = serde_json::to_string(value).unwrap_or_else(|_| value.to_string());
    println!("  {}: {}", id, shown);
  }
  if !report.result.unscheduled.is_empty() {
    println!("  Unscheduled: {}", report.result.unscheduled.join(", "));
  }
}
