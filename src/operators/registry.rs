//! Lookup table from transform tag to transform function.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use tracing::{instrument, warn};

use super::transforms::{self, TransformFn};
use crate::types::{NodeParams, NodeValue};

/// Transform used by Transform/Branch nodes with no selector.
pub const DEFAULT_TRANSFORM: &str = "filter";

static BUILTIN: Lazy<TransformRegistry> = Lazy::new(TransformRegistry::with_builtins);

/// Normalizes a selector: lowercase, with `-` and spaces mapped to `_`.
pub fn normalize_tag(tag: &str) -> String {
  tag.trim().to_ascii_lowercase().replace(['-', ' '], "_")
}

/// Lookup table from transform tag to transform function.
///
/// The engine only sees this table, so new transforms can be added with
/// [TransformRegistry::register] without touching the scheduler.
#[derive(Clone)]
pub struct TransformRegistry {
  table: HashMap<String, TransformFn>,
}

impl fmt::Debug for TransformRegistry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("TransformRegistry")
      .field("tags", &self.tags())
      .finish()
  }
}

impl Default for TransformRegistry {
  fn default() -> Self {
    Self::with_builtins()
  }
}

impl TransformRegistry {
  /// A registry with no transforms.
  pub fn empty() -> Self {
    Self {
      table: HashMap::new(),
    }
  }

  /// An owned registry preloaded with the builtin transforms and their aliases.
  pub fn with_builtins() -> Self {
    let mut r = Self::empty();
    r.register("split", transforms::split)
      .register("filter", transforms::filter)
      .register("grep", transforms::filter)
      .register("match", transforms::filter)
      .register("substitute", transforms::substitute)
      .register("replace", transforms::substitute)
      .register("sub", transforms::substitute)
      .register("extract_field", transforms::extract_field)
      .register("extract", transforms::extract_field)
      .register("field", transforms::extract_field)
      .register("cut", transforms::extract_field)
      .register("sort", transforms::sort)
      .register("dedupe", transforms::dedupe)
      .register("unique", transforms::dedupe)
      .register("uniq", transforms::dedupe)
      .register("join", transforms::join)
      .register("count", transforms::count)
      .register("wc", transforms::count)
      .register("uppercase", transforms::uppercase)
      .register("upper", transforms::uppercase)
      .register("lowercase", transforms::lowercase)
      .register("lower", transforms::lowercase);
    r
  }

  /// Shared builtin registry.
  pub fn builtin() -> &'static TransformRegistry {
    &BUILTIN
  }

  /// Adds or replaces the transform for `tag`.
  pub fn register(&mut self, tag: &str, f: TransformFn) -> &mut Self {
    self.table.insert(normalize_tag(tag), f);
    self
  }

  pub fn get(&self, tag: &str) -> Option<TransformFn> {
    self.table.get(&normalize_tag(tag)).copied()
  }

  pub fn contains(&self, tag: &str) -> bool {
    self.get(tag).is_some()
  }

  /// Registered tags, sorted.
  pub fn tags(&self) -> Vec<&str> {
    let mut tags: Vec<&str> = self.table.keys().map(String::as_str).collect();
    tags.sort_unstable();
    tags
  }

  /// Runs the transform tagged `tag`; unknown tags are identity on the line-split input.
  #[instrument(level = "trace", skip(self, input, params))]
  pub fn apply(&self, tag: &str, input: &NodeValue, params: &NodeParams) -> NodeValue {
    match self.get(tag) {
      Some(f) => f(input, params),
      None => {
        warn!(tag, "unknown transform, passing lines through");
        transforms::identity(input, params)
      }
    }
  }
}
