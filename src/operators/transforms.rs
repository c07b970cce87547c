//! Line-oriented text transforms.
//!
//! Every transform is a pure `fn(&NodeValue, &NodeParams) -> NodeValue`. Text
//! input is split on universal line breaks first (except by [split], which
//! works on the raw string).

use std::collections::HashSet;

use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::types::{NodeParams, NodeValue};

/// Signature shared by every transform.
pub type TransformFn = fn(&NodeValue, &NodeParams) -> NodeValue;

/// Pattern compiled as a regex, or kept literal when it does not compile.
#[derive(Debug)]
pub(crate) enum Matcher {
  Regex(Regex),
  Literal(String),
}

impl Matcher {
  pub(crate) fn new(pattern: &str, case_insensitive: bool) -> Self {
    match RegexBuilder::new(pattern)
      .case_insensitive(case_insensitive)
      .build()
    {
      Ok(re) => Matcher::Regex(re),
      Err(e) => {
        debug!(pattern, error = %e, "invalid regex, using literal match");
        Matcher::Literal(pattern.to_string())
      }
    }
  }

  pub(crate) fn is_match(&self, line: &str) -> bool {
    match self {
      Matcher::Regex(re) => re.is_match(line),
      Matcher::Literal(p) => line.contains(p.as_str()),
    }
  }

  pub(crate) fn replace_all(&self, line: &str, replacement: &str) -> String {
    match self {
      Matcher::Regex(re) => re.replace_all(line, replacement).into_owned(),
      Matcher::Literal(p) => line.replace(p.as_str(), replacement),
    }
  }
}

/// Splits raw text on `delimiter` (default `,`). Sequences pass through.
pub fn split(input: &NodeValue, params: &NodeParams) -> NodeValue {
  match input {
    NodeValue::Text(s) if s.is_empty() => NodeValue::Lines(Vec::new()),
    NodeValue::Text(s) => {
      let delimiter = params.delimiter_or(",");
      if delimiter.is_empty() {
        NodeValue::Lines(s.chars().map(String::from).collect())
      } else {
        NodeValue::lines(s.split(delimiter))
      }
    }
    NodeValue::Lines(v) => NodeValue::Lines(v.clone()),
  }
}

/// Keeps lines matching `pattern` (case-insensitive regex, literal fallback).
pub fn filter(input: &NodeValue, params: &NodeParams) -> NodeValue {
  let lines = input.to_lines();
  let matcher = Matcher::new(params.pattern.as_deref().unwrap_or(""), true);
  NodeValue::Lines(lines.into_iter().filter(|l| matcher.is_match(l)).collect())
}

/// Replaces every match of `pattern` with `replacement` on each line.
pub fn substitute(input: &NodeValue, params: &NodeParams) -> NodeValue {
  let lines = input.to_lines();
  let pattern = match params.pattern.as_deref() {
    Some(p) if !p.is_empty() => p,
    _ => return NodeValue::Lines(lines),
  };
  let replacement = params.replacement.as_deref().unwrap_or("");
  let matcher = Matcher::new(pattern, false);
  NodeValue::Lines(
    lines
      .iter()
      .map(|l| matcher.replace_all(l, replacement))
      .collect(),
  )
}

/// Returns the 1-based `field_index` of each line split on `delimiter`
/// (default a single space), ignoring empty fragments.
pub fn extract_field(input: &NodeValue, params: &NodeParams) -> NodeValue {
  let delimiter = params.delimiter_or(" ");
  let index = params.field_index_or_default() - 1;
  let fields = input.to_lines().into_iter().map(|line| {
    let field = if delimiter.is_empty() {
      line.split_whitespace().nth(index)
    } else {
      line.split(delimiter).filter(|f| !f.is_empty()).nth(index)
    };
    field.unwrap_or("").to_string()
  });
  NodeValue::Lines(fields.collect())
}

pub fn sort(input: &NodeValue, _params: &NodeParams) -> NodeValue {
  let mut lines = input.to_lines();
  lines.sort();
  NodeValue::Lines(lines)
}

/// Drops repeated lines, keeping first occurrences in order.
pub fn dedupe(input: &NodeValue, _params: &NodeParams) -> NodeValue {
  let mut seen = HashSet::new();
  let mut lines = input.to_lines();
  lines.retain(|l| seen.insert(l.clone()));
  NodeValue::Lines(lines)
}

/// Joins lines with `delimiter` (default newline).
pub fn join(input: &NodeValue, params: &NodeParams) -> NodeValue {
  NodeValue::Text(input.to_lines().join(params.delimiter_or("\n")))
}

/// Two-line summary: line count and character count.
pub fn count(input: &NodeValue, _params: &NodeParams) -> NodeValue {
  let lines = input.to_lines();
  let chars: usize = lines.iter().map(|l| l.chars().count()).sum();
  NodeValue::Text(format!("lines: {}\nchars: {}", lines.len(), chars))
}

pub fn uppercase(input: &NodeValue, _params: &NodeParams) -> NodeValue {
  NodeValue::Lines(input.to_lines().iter().map(|l| l.to_uppercase()).collect())
}

pub fn lowercase(input: &NodeValue, _params: &NodeParams) -> NodeValue {
  NodeValue::Lines(input.to_lines().iter().map(|l| l.to_lowercase()).collect())
}

/// Line-split input, unchanged.
pub fn identity(input: &NodeValue, _params: &NodeParams) -> NodeValue {
  NodeValue::Lines(input.to_lines())
}
