pub mod analysis;
pub mod policy;
pub mod sequencing;
pub mod streaming;

use tracing::debug;

use crate::catalog::{Encoding, TypedBuffer, F32_MAX};
use crate::types::{SelectionError, SelectionOutput, Value};
pub use analysis::analyze_array;
pub use policy::{Policy, SelectionOptions};
pub use sequencing::sequence;
pub use streaming::{stream_array, StreamArray, DEFAULT_CHUNK_SIZE};

/// Summary of a fully numeric input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct NumericScan {
	pub count: usize,
	pub min: Option<f64>,
	pub max: Option<f64>,
	pub has_float: bool,
}

impl NumericScan {
	pub fn of(values: &[Value]) -> Self {
		let mut min: Option<f64> = None;
		let mut max: Option<f64> = None;
		for f in values.iter().filter_map(Value::as_f64) {
			min = Some(min.map_or(f, |m| m.min(f)));
			max = Some(max.map_or(f, |m| m.max(f)));
		}
		Self {
			count: values.len(),
			min,
			max,
			has_float: values.iter().any(Value::is_float),
		}
	}

	fn exceeds_f32(&self) -> bool {
		[self.min, self.max]
			.into_iter()
			.flatten()
			.any(|v| v.abs() > F32_MAX)
	}
}

/// Pick the narrowest encoding that holds every value, in policy order.
///
/// Empty and non-numeric inputs come back unchanged as a sequence. When no
/// candidate fits, the values come back as a sequence too, unless
/// `strict` is set, in which case the first value the last candidate cannot
/// hold is reported.
pub fn select_array<I>(values: I, options: &SelectionOptions) -> Result<SelectionOutput, SelectionError>
where
	I: IntoIterator,
	I::Item: Into<Value>,
{
	let values: Vec<Value> = values.into_iter().map(Into::into).collect();
	select_values(values, options)
}

/// `select_array` under the default `smallest` policy.
pub fn get_array<I>(values: I) -> Result<SelectionOutput, SelectionError>
where
	I: IntoIterator,
	I::Item: Into<Value>,
{
	select_array(values, &SelectionOptions::default())
}

pub(crate) fn select_values(
	values: Vec<Value>,
	options: &SelectionOptions,
) -> Result<SelectionOutput, SelectionError> {
	// 0. Empty and non-numeric inputs short-circuit
	if values.is_empty() {
		return Ok(SelectionOutput::Sequence(values));
	}
	if !values.iter().all(Value::is_numeric) {
		debug!(count = values.len(), "non-numeric input, returning sequence");
		return Ok(SelectionOutput::Sequence(values));
	}

	let scan = NumericScan::of(&values);

	// 1. Float data under no_float
	if scan.has_float && options.no_float {
		if options.strict {
			if let Some(index) = values.iter().position(Value::is_float) {
				return Err(SelectionError::Violation {
					index,
					value: values[index].clone(),
					expected: "integers only".to_string(),
				});
			}
		}
		debug!("float input with no_float set, returning sequence");
		return Ok(SelectionOutput::Sequence(values));
	}

	// 2. Candidate ordering
	let mut candidates = sequencing::sequence_for(options);
	if !options.allow_float_downgrade && scan.has_float && scan.exceeds_f32() {
		candidates.retain(|e| *e != Encoding::Float32);
	}
	debug!(
		candidates = %candidates.iter().map(|e| e.code()).collect::<String>(),
		"attempting encodings"
	);

	// 3. First fit wins
	for &encoding in &candidates {
		if let Some(buffer) = TypedBuffer::try_from_values(encoding, &values) {
			debug!(%encoding, count = scan.count, "selected encoding");
			return Ok(SelectionOutput::Typed(buffer));
		}
	}

	// 4. Nothing fits
	if options.strict {
		// Reported against the widest attempted candidate, not the narrowest.
		let target = candidates.last().copied().unwrap_or(Encoding::Float64);
		let index = values.iter().position(|v| !target.holds(v)).unwrap_or(0);
		return Err(SelectionError::Violation {
			index,
			value: values[index].clone(),
			expected: target.name().to_string(),
		});
	}

	debug!(count = scan.count, "no fitting encoding, returning sequence");
	Ok(SelectionOutput::Sequence(values))
}
