//! Path compilation and evaluation over parsed JSON documents.
//!
//! Paths use RFC 9535 JSONPath syntax (`$.values[*]`, `$.a.b`,
//! `$.items[?@.state == 'ACTIVE']`). A path is compiled once when a metric is
//! built and then shared read-only by every scrape.
//!
//! Evaluation yields [`TypedResult`]s: a borrowed node plus its coarse JSON
//! kind. Documents keep member order and the exact text of every number, so
//! matches come back in document order and the raw text of a number is the
//! matched text. String results keep their delimiting quotes.

use std::fmt;
use std::vec;

use serde_json::Value;
use serde_json_path::JsonPath;

use crate::error::{JsonExporterError, Result};

/// Compiled, reusable path expression.
#[derive(Debug, Clone)]
pub struct CompiledPath {
    expr: String,
    path: JsonPath,
}

impl CompiledPath {
    /// Compile a path expression, keeping the source text for diagnostics.
    pub fn compile(expr: &str) -> Result<Self> {
        let path = JsonPath::parse(expr).map_err(|e| JsonExporterError::PathSyntax {
            expr: expr.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            expr: expr.to_string(),
            path,
        })
    }

    /// The expression this path was compiled from.
    pub fn as_str(&self) -> &str {
        &self.expr
    }

    /// Evaluate against `node`, yielding matches in document order.
    pub fn evaluate<'a>(&self, node: &'a Value) -> Matches<'a> {
        Matches {
            inner: self.path.query(node).into_iter(),
        }
    }

    /// First match only, if any.
    pub fn first<'a>(&self, node: &'a Value) -> Option<TypedResult<'a>> {
        self.evaluate(node).next()
    }
}

impl fmt::Display for CompiledPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expr)
    }
}

/// Single-pass sequence of matches produced by [`CompiledPath::evaluate`].
pub struct Matches<'a> {
    inner: vec::IntoIter<&'a Value>,
}

impl<'a> Iterator for Matches<'a> {
    type Item = TypedResult<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(TypedResult::new)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// A parsed JSON document, scraped by any number of metrics.
#[derive(Debug, Clone)]
pub struct Document {
    root: Value,
}

impl Document {
    /// Parse raw bytes. Malformed JSON is the only structural failure of a scrape.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let root = serde_json::from_slice(bytes)
            .map_err(|e| JsonExporterError::InvalidDocument(e.to_string()))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Value {
        &self.root
    }
}

/// Coarse JSON type of a matched node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    Number,
    String,
    Null,
    Object,
    Array,
    /// Booleans.
    Other,
}

impl ResultKind {
    /// Objects and arrays are instance payloads for structured metrics.
    pub fn is_structural(self) -> bool {
        matches!(self, ResultKind::Object | ResultKind::Array)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResultKind::Number => "number",
            ResultKind::String => "string",
            ResultKind::Null => "null",
            ResultKind::Object => "object",
            ResultKind::Array => "array",
            ResultKind::Other => "other",
        }
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One match of a path: the node and its kind.
#[derive(Debug, Clone, Copy)]
pub struct TypedResult<'a> {
    node: &'a Value,
    kind: ResultKind,
}

impl<'a> TypedResult<'a> {
    pub fn new(node: &'a Value) -> Self {
        let kind = match node {
            Value::Number(_) => ResultKind::Number,
            Value::String(_) => ResultKind::String,
            Value::Null => ResultKind::Null,
            Value::Object(_) => ResultKind::Object,
            Value::Array(_) => ResultKind::Array,
            Value::Bool(_) => ResultKind::Other,
        };
        Self { node, kind }
    }

    pub fn kind(&self) -> ResultKind {
        self.kind
    }

    /// The matched node, used as the root for instance-relative paths.
    pub fn node(&self) -> &'a Value {
        self.node
    }

    /// Raw matched text: numbers verbatim, strings with their quotes,
    /// containers as compact JSON.
    pub fn raw(&self) -> String {
        self.node.to_string()
    }

    /// Text used as a label value: string contents without quotes, raw JSON otherwise.
    pub fn label_text(&self) -> String {
        match self.node {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
