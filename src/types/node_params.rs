//! Parameter set attached to a flow node.

use serde::{Deserialize, Serialize};

/// Default chunk size for batch nodes.
pub const DEFAULT_BATCH_SIZE: usize = 3;
/// Default 1-based field for extract-field.
pub const DEFAULT_FIELD_INDEX: usize = 1;

/// Parameter set attached to a flow node. Every field is optional; operators
/// fall back to their documented defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeParams {
  /// Regex/literal pattern for filter and substitute; target for sequence nodes.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub pattern: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub replacement: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub delimiter: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none", alias = "fieldIndex")]
  pub field_index: Option<usize>,
  #[serde(skip_serializing_if = "Option::is_none", alias = "batchSize")]
  pub batch_size: Option<usize>,
  /// Source text, or the rolling buffer of a streaming source.
  #[serde(skip_serializing_if = "Option::is_none", alias = "buffer")]
  pub text: Option<String>,
}

impl NodeParams {
  pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
    self.pattern = Some(pattern.into());
    self
  }

  pub fn with_replacement(mut self, replacement: impl Into<String>) -> Self {
    self.replacement = Some(replacement.into());
    self
  }

  pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
    self.delimiter = Some(delimiter.into());
    self
  }

  pub fn with_field_index(mut self, field_index: usize) -> Self {
    self.field_index = Some(field_index);
    self
  }

  pub fn with_batch_size(mut self, batch_size: usize) -> Self {
    self.batch_size = Some(batch_size);
    self
  }

  pub fn with_text(mut self, text: impl Into<String>) -> Self {
    self.text = Some(text.into());
    self
  }

  /// Configured delimiter, or `default` when unset.
  pub fn delimiter_or<'a>(&'a self, default: &'a str) -> &'a str {
    self.delimiter.as_deref().unwrap_or(default)
  }

  /// Batch size, with 0 and unset both mapping to [DEFAULT_BATCH_SIZE].
  pub fn batch_size_or_default(&self) -> usize {
    match self.batch_size {
      Some(n) if n >= 1 => n,
      _ => DEFAULT_BATCH_SIZE,
    }
  }

  /// 1-based field index, with 0 and unset both mapping to [DEFAULT_FIELD_INDEX].
  pub fn field_index_or_default(&self) -> usize {
    match self.field_index {
      Some(n) if n >= 1 => n,
      _ => DEFAULT_FIELD_INDEX,
    }
  }
}
