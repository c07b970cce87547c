//! Errors raised outside the engine: file I/O, JSON, and graph linting.
//!
//! The engine itself never fails; it always returns a (possibly partial) result.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlowError {
  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),

  #[error("invalid flow JSON: {0}")]
  Json(#[from] serde_json::Error),

  #[error("duplicate node id '{0}'")]
  DuplicateNode(String),

  #[error("edge '{edge_id}' references missing node '{node_id}'")]
  DanglingEdge { edge_id: String, node_id: String },

  #[error("{kind} node '{node_id}' has no transform selector")]
  MissingTransform { node_id: String, kind: String },

  #[error("node '{node_id}' uses unknown transform '{transform}'")]
  UnknownTransform { node_id: String, transform: String },

  #[error("node '{0}' has an unrecognized kind")]
  UnknownKind(String),

  #[error("cycle detected; nodes never scheduled: {}", .0.join(", "))]
  CycleDetected(Vec<String>),
}

pub type FlowResult<T> = std::result::Result<T, FlowError>;
