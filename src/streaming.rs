//! Streaming-source driver.
//!
//! Simulates the external driver that, on a fixed cadence, appends generated
//! characters to every active streaming source's buffer and keeps only a
//! trailing window of it. The engine sees the buffer as an ordinary `text`
//! parameter.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{instrument, trace};

use crate::types::{FlowGraph, NodeKind};

pub const DEFAULT_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DEFAULT_CHARS_PER_TICK: usize = 1;
pub const DEFAULT_WINDOW: usize = 32;

/// Deterministic (seeded) character feed for streaming sources.
#[derive(Debug, Clone)]
pub struct StreamingFeed {
  rng: StdRng,
  alphabet: Vec<char>,
  chars_per_tick: usize,
  window: usize,
}

impl StreamingFeed {
  pub fn new(seed: u64) -> Self {
    Self {
      rng: StdRng::seed_from_u64(seed),
      alphabet: DEFAULT_ALPHABET.chars().collect(),
      chars_per_tick: DEFAULT_CHARS_PER_TICK,
      window: DEFAULT_WINDOW,
    }
  }

  /// Characters to draw from. An empty alphabet keeps the current one.
  pub fn with_alphabet(mut self, alphabet: &str) -> Self {
    if !alphabet.is_empty() {
      self.alphabet = alphabet.chars().collect();
    }
    self
  }

  pub fn with_chars_per_tick(mut self, n: usize) -> Self {
    self.chars_per_tick = n;
    self
  }

  /// Trailing window kept in each buffer, at least one character.
  pub fn with_window(mut self, window: usize) -> Self {
    self.window = window.max(1);
    self
  }

  pub fn window(&self) -> usize {
    self.window
  }

  fn next_chunk(&mut self) -> String {
    (0..self.chars_per_tick)
      .map(|_| self.alphabet[self.rng.gen_range(0..self.alphabet.len())])
      .collect()
  }

  /// Feeds every active streaming source once. Returns how many were fed.
  #[instrument(level = "trace", skip_all)]
  pub fn tick(&mut self, graph: &mut FlowGraph) -> usize {
    let mut fed = 0;
    for node in graph.nodes.iter_mut() {
      if node.kind != NodeKind::SourceStreaming || !node.active {
        continue;
      }
      let chunk = self.next_chunk();
      let buffer = node.params.text.get_or_insert_with(String::new);
      append_window(buffer, &chunk, self.window);
      trace!(node_id = %node.id, chunk = %chunk, "fed streaming source");
      fed += 1;
    }
    fed
  }
}

/// Appends `extra` and drops leading characters beyond `window`.
pub(crate) fn append_window(buffer: &mut String, extra: &str, window: usize) {
  buffer.push_str(extra);
  let len = buffer.chars().count();
  if len > window {
    *buffer = buffer.chars().skip(len - window).collect();
  }
}
