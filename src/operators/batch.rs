//! Batch operator: groups lines into fixed-size chunks.

use tracing::instrument;

use crate::types::{DEFAULT_BATCH_SIZE, NodeValue};

/// Lines a batch node works on: non-empty lines of text, or the elements of a sequence.
pub(crate) fn batch_items(input: &NodeValue) -> Vec<String> {
  match input {
    NodeValue::Text(_) => input
      .to_lines()
      .into_iter()
      .filter(|l| !l.is_empty())
      .collect(),
    NodeValue::Lines(v) => v.clone(),
  }
}

/// Renders one chunk as `chunk of size N: a, b, c`.
pub(crate) fn describe_chunk(chunk: &[String]) -> String {
  format!("chunk of size {}: {}", chunk.len(), chunk.join(", "))
}

/// Partitions the input into consecutive chunks of `size` (0 means the default
/// of 3) and describes each chunk on its own line.
#[instrument(level = "trace", skip(input))]
pub fn batch(input: &NodeValue, size: usize) -> NodeValue {
  let size = if size == 0 { DEFAULT_BATCH_SIZE } else { size };
  let items = batch_items(input);
  NodeValue::Lines(items.chunks(size).map(describe_chunk).collect())
}
