//! Value produced by a node or carried along an edge.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Value produced by a node: a single string or an ordered sequence of strings.
///
/// Serialized untagged, so a JSON string maps to `Text` and a JSON array of
/// strings maps to `Lines`. An absent value is `None` at the call site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeValue {
  Text(String),
  Lines(Vec<String>),
}

impl Default for NodeValue {
  fn default() -> Self {
    NodeValue::Text(String::new())
  }
}

impl NodeValue {
  pub fn text(s: impl Into<String>) -> Self {
    NodeValue::Text(s.into())
  }

  pub fn lines<I, S>(items: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    NodeValue::Lines(items.into_iter().map(Into::into).collect())
  }

  /// Line view of the value: text is split on universal line breaks,
  /// a sequence is returned as-is.
  pub fn to_lines(&self) -> Vec<String> {
    match self {
      NodeValue::Text(s) => split_lines(s),
      NodeValue::Lines(v) => v.clone(),
    }
  }

  /// Sequence view used for fan-in: text becomes a one-element sequence.
  pub fn into_sequence(self) -> Vec<String> {
    match self {
      NodeValue::Text(s) => vec![s],
      NodeValue::Lines(v) => v,
    }
  }

  /// All content concatenated into one buffer.
  pub fn flatten(&self) -> String {
    match self {
      NodeValue::Text(s) => s.clone(),
      NodeValue::Lines(v) => v.concat(),
    }
  }
}

impl fmt::Display for NodeValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      NodeValue::Text(s) => f.write_str(s),
      NodeValue::Lines(v) => f.write_str(&v.join("\n")),
    }
  }
}

impl From<&str> for NodeValue {
  fn from(s: &str) -> Self {
    NodeValue::Text(s.to_string())
  }
}

impl From<String> for NodeValue {
  fn from(s: String) -> Self {
    NodeValue::Text(s)
  }
}

impl From<Vec<String>> for NodeValue {
  fn from(v: Vec<String>) -> Self {
    NodeValue::Lines(v)
  }
}

/// Returns true for characters that end a line: `\n`, `\r`, vertical tab,
/// form feed, the file/group/record separators, NEL, and the Unicode line and
/// paragraph separators.
fn is_line_break(c: char) -> bool {
  matches!(
    c,
    '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
  )
}

/// Splits on universal line breaks (see [is_line_break]), with `\r\n`
/// counting as one break. A trailing break does not produce an empty last
/// line, and the empty string has no lines.
pub fn split_lines(s: &str) -> Vec<String> {
  let mut lines = Vec::new();
  let mut current = String::new();
  let mut chars = s.chars().peekable();
  while let Some(c) = chars.next() {
    match c {
      '\r' => {
        if chars.peek() == Some(&'\n') {
          chars.next();
        }
        lines.push(std::mem::take(&mut current));
      }
      c if is_line_break(c) => lines.push(std::mem::take(&mut current)),
      _ => current.push(c),
    }
  }
  if !current.is_empty() {
    lines.push(current);
  }
  lines
}
