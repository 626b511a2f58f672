use serde::{Deserialize, Serialize};

use crate::catalog::{Encoding, TypedBuffer};
use crate::types::value::Value;

/// What a selection produces: a typed buffer, or the values as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectionOutput {
    Typed(TypedBuffer),
    Sequence(Vec<Value>),
}

impl SelectionOutput {
    pub fn is_typed(&self) -> bool {
        matches!(self, SelectionOutput::Typed(_))
    }

    pub fn encoding(&self) -> Option<Encoding> {
        match self {
            SelectionOutput::Typed(buf) => Some(buf.encoding()),
            SelectionOutput::Sequence(_) => None,
        }
    }

    pub fn as_typed(&self) -> Option<&TypedBuffer> {
        match self {
            SelectionOutput::Typed(buf) => Some(buf),
            SelectionOutput::Sequence(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SelectionOutput::Typed(buf) => buf.len(),
            SelectionOutput::Sequence(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Plain values, in order. Typed buffers are widened back to `Value`s.
    pub fn into_values(self) -> Vec<Value> {
        match self {
            SelectionOutput::Typed(buf) => buf.to_values(),
            SelectionOutput::Sequence(values) => values,
        }
    }
}

/// Why an analysis ended the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Reason {
    Empty,
    NonNumeric,
    Int,
    Float,
    NoFittingType,
}

/// Selection outcome plus descriptive statistics.
///
/// `min`/`max` are taken over float-coerced copies so integer and float
/// inputs compare on one scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub value: SelectionOutput,
    pub typecode: Option<Encoding>,
    pub count: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub reason: Reason,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SelectionError {
    #[error("Value at index {index}={value} violates expected {expected}")]
    Violation {
        index: usize,
        value: Value,
        expected: String,
    },

    #[error("Invalid selection options: {0}")]
    InvalidOptions(String),
}
