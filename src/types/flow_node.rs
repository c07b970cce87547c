//! A node in a flow graph.

use serde::{Deserialize, Serialize};

use super::{NodeKind, NodeParams, NodeValue};

fn default_active() -> bool {
  true
}

fn is_true(b: &bool) -> bool {
  *b
}

/// A node in a flow graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
  pub id: String,
  pub kind: NodeKind,
  /// Transform selector for Transform and Branch nodes (e.g. `filter`).
  #[serde(
    default,
    skip_serializing_if = "Option::is_none",
    alias = "transformType",
    alias = "operation"
  )]
  pub transform: Option<String>,
  #[serde(default)]
  pub params: NodeParams,
  /// Streaming sources only; the feed skips inactive sources.
  #[serde(default = "default_active", skip_serializing_if = "is_true")]
  pub active: bool,
  /// Last value shown for this node by the editor. Never read by the engine.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub output: Option<NodeValue>,
}

impl FlowNode {
  pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
    Self {
      id: id.into(),
      kind,
      transform: None,
      params: NodeParams::default(),
      active: true,
      output: None,
    }
  }

  /// Static source emitting `text`.
  pub fn source(id: impl Into<String>, text: impl Into<String>) -> Self {
    Self::new(id, NodeKind::SourceStatic).with_params(NodeParams::default().with_text(text))
  }

  /// Transform node running the operation tagged `op`.
  pub fn transform(id: impl Into<String>, op: impl Into<String>) -> Self {
    Self::new(id, NodeKind::Transform).with_transform(op)
  }

  pub fn sink(id: impl Into<String>) -> Self {
    Self::new(id, NodeKind::Sink)
  }

  pub fn with_transform(mut self, op: impl Into<String>) -> Self {
    self.transform = Some(op.into());
    self
  }

  pub fn with_params(mut self, params: NodeParams) -> Self {
    self.params = params;
    self
  }

  pub fn with_active(mut self, active: bool) -> Self {
    self.active = active;
    self
  }

  pub fn is_source(&self) -> bool {
    self.kind.is_source()
  }

  /// Value a source emits before any propagation: its text, else its pattern, else "".
  pub fn seed_value(&self) -> NodeValue {
    let text = self
      .params
      .text
      .as_deref()
      .or(self.params.pattern.as_deref())
      .unwrap_or("");
    NodeValue::text(text)
  }
}
