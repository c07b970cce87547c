//! Sequence matcher: stateful, one-character-per-pass pattern discovery.
//!
//! State is the longest prefix of the target matched so far. The caller keeps
//! it between passes (the previous pass's output for the node) and hands it
//! back in; this module holds nothing.

use std::fmt;

use tracing::{debug, instrument};

use crate::types::NodeValue;

/// Matcher state derived from progress and target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceState {
  Matching,
  Complete,
}

impl fmt::Display for SequenceState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SequenceState::Matching => write!(f, "matching"),
      SequenceState::Complete => write!(f, "complete"),
    }
  }
}

/// `Complete` once progress equals the whole target.
pub fn sequence_state(progress: &str, target: &str) -> SequenceState {
  if progress == target {
    SequenceState::Complete
  } else {
    SequenceState::Matching
  }
}

/// Carried progress, or "" when it is no longer a prefix of the target.
pub(crate) fn carried_progress<'a>(previous: &'a str, target: &str) -> &'a str {
  if target.starts_with(previous) {
    previous
  } else {
    ""
  }
}

/// Next character the matcher is waiting for, if any.
pub(crate) fn needed_char(progress: &str, target: &str) -> Option<char> {
  target.get(progress.len()..)?.chars().next()
}

/// Advances `previous` by at most one character toward `target`.
///
/// The needed character only has to appear somewhere in the flattened input
/// buffer; position and repetitions are ignored.
#[instrument(level = "trace", skip(input))]
pub fn advance(previous: &str, target: &str, input: &NodeValue) -> String {
  let progress = carried_progress(previous, target);
  if progress.len() != previous.len() {
    debug!(previous, target, "progress no longer a prefix of target, restarting");
  }
  let Some(needed) = needed_char(progress, target) else {
    return progress.to_string();
  };
  let mut next = progress.to_string();
  if input.flatten().contains(needed) {
    next.push(needed);
  }
  next
}
