//! Ports to columnar and tensor array libraries.
//!
//! The crate does not link any such library. A caller supplies a builder
//! that knows how to turn either native-endian bytes plus an [`Encoding`],
//! or a plain value slice, into its own array type. Availability is asked
//! up front through [`ArrayBuilder::is_available`].

use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use crate::catalog::Encoding;
use crate::selection::streaming::fill_window;
use crate::selection::{select_values, SelectionOptions};
use crate::types::{SelectionError, SelectionOutput, Value};

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Unsupported dtype: {0}")]
    UnsupportedDtype(String),

    #[error("{0} not available")]
    Unavailable(&'static str),

    #[error("Builder error: {0}")]
    Build(String),

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

/// Requested output type: `Min` runs selection, the rest bypass it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetType {
    #[default]
    Min,
    Float32,
    Float64,
    Int64,
    UInt64,
}

impl TargetType {
    /// Explicit encoding, `None` for `Min`.
    pub fn encoding(self) -> Option<Encoding> {
        match self {
            TargetType::Min => None,
            TargetType::Float32 => Some(Encoding::Float32),
            TargetType::Float64 => Some(Encoding::Float64),
            TargetType::Int64 => Some(Encoding::Int64),
            TargetType::UInt64 => Some(Encoding::UInt64),
        }
    }
}

impl FromStr for TargetType {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "min" => Ok(TargetType::Min),
            "float32" => Ok(TargetType::Float32),
            "float64" => Ok(TargetType::Float64),
            "int64" => Ok(TargetType::Int64),
            "uint64" => Ok(TargetType::UInt64),
            other => Err(BridgeError::UnsupportedDtype(other.to_string())),
        }
    }
}

pub trait ArrayBuilder {
    type Array;

    /// Human-readable backend name, used in errors.
    fn name(&self) -> &'static str;

    fn is_available(&self) -> bool;

    /// Build from native-endian bytes laid out as `encoding`.
    fn from_raw(&self, bytes: &[u8], encoding: Encoding) -> Result<Self::Array, BridgeError>;

    /// Build from values. `None` asks for a generic/object array; `Some`
    /// asks the backend to cast every value to that encoding.
    fn from_values(
        &self,
        values: &[Value],
        encoding: Option<Encoding>,
    ) -> Result<Self::Array, BridgeError>;
}

pub trait ColumnarBuilder: ArrayBuilder {
    /// Assemble independently built chunks into one chunked array.
    fn chunked(&self, chunks: Vec<Self::Array>) -> Result<Self::Array, BridgeError>;
}

fn ensure_available<B: ArrayBuilder + ?Sized>(builder: &B) -> Result<(), BridgeError> {
    if builder.is_available() {
        Ok(())
    } else {
        Err(BridgeError::Unavailable(builder.name()))
    }
}

fn build_one<B: ArrayBuilder + ?Sized>(
    builder: &B,
    values: Vec<Value>,
    target: TargetType,
    options: &SelectionOptions,
) -> Result<B::Array, BridgeError> {
    if let Some(encoding) = target.encoding() {
        return builder.from_values(&values, Some(encoding));
    }
    match select_values(values, options)? {
        SelectionOutput::Typed(buf) => builder.from_raw(buf.as_bytes(), buf.encoding()),
        SelectionOutput::Sequence(values) => builder.from_values(&values, None),
    }
}

/// Build a columnar array, optionally in chunks.
///
/// With `chunk_size`, every chunk is selected on its own, so chunks may
/// end up with different encodings; assembling them is up to the backend.
pub fn to_columnar<B, I>(
    builder: &B,
    values: I,
    target: TargetType,
    chunk_size: Option<usize>,
    options: &SelectionOptions,
) -> Result<B::Array, BridgeError>
where
    B: ColumnarBuilder,
    I: IntoIterator,
    I::Item: Into<Value>,
{
    ensure_available(builder)?;

    let mut source = values.into_iter();
    let size = match chunk_size {
        Some(size) if size > 0 => size,
        _ => {
            let all: Vec<Value> = source.map(Into::into).collect();
            return build_one(builder, all, target, options);
        }
    };

    let mut chunks = Vec::new();
    loop {
        let mut window = Vec::with_capacity(size.min(crate::DEFAULT_CHUNK_SIZE));
        fill_window(&mut source, &mut window, size);
        if window.is_empty() {
            break;
        }
        chunks.push(build_one(builder, window, target, options)?);
    }
    debug!(backend = builder.name(), chunks = chunks.len(), "assembling chunked array");
    builder.chunked(chunks)
}

/// Build a tensor. Explicit targets skip selection entirely.
pub fn to_tensor<B, I>(
    builder: &B,
    values: I,
    target: TargetType,
    options: &SelectionOptions,
) -> Result<B::Array, BridgeError>
where
    B: ArrayBuilder,
    I: IntoIterator,
    I::Item: Into<Value>,
{
    ensure_available(builder)?;
    let values: Vec<Value> = values.into_iter().map(Into::into).collect();
    build_one(builder, values, target, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_parsing() {
        assert_eq!("min".parse::<TargetType>().unwrap(), TargetType::Min);
        assert_eq!("uint64".parse::<TargetType>().unwrap().encoding(), Some(Encoding::UInt64));
        let err = "int8".parse::<TargetType>().unwrap_err();
        assert!(matches!(err, BridgeError::UnsupportedDtype(s) if s == "int8"));
    }
}
