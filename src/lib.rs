//! Deterministic narrowest-fit encoding selection for value sequences.
//!
//! `array-select` picks the smallest fixed-width numeric encoding (signed or
//! unsigned 8/16/32/64-bit integers, 32/64-bit floats) that holds every value
//! of an input exactly, and falls back to the values themselves when nothing
//! fits. The search order is a policy choice, and all operations are
//! deterministic: identical inputs and options always produce identical
//! outputs.
//!
//! Entry points: [`select_array`], [`analyze_array`], [`stream_array`] and
//! [`get_array`]. Columnar and tensor backends plug in through [`bridge`].

pub mod bridge;
pub mod catalog;
pub mod selection;
pub mod types;

pub use catalog::{Encoding, TypedBuffer};
pub use selection::{
    analyze_array, get_array, select_array, stream_array, Policy, SelectionOptions, StreamArray,
    DEFAULT_CHUNK_SIZE,
};
pub use types::{AnalysisResult, Reason, SelectionError, SelectionOutput, Value};
