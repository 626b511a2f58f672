use crate::selection::policy::SelectionOptions;
use crate::selection::{select_values, NumericScan};
use crate::types::{AnalysisResult, Reason, SelectionError, SelectionOutput, Value};

/// Run selection and report count, bounds and the reason for the outcome.
///
/// Selection semantics are exactly those of [`select_array`](crate::select_array);
/// strict violations propagate unchanged.
pub fn analyze_array<I>(values: I, options: &SelectionOptions) -> Result<AnalysisResult, SelectionError>
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    let values: Vec<Value> = values.into_iter().map(Into::into).collect();

    if values.is_empty() {
        return Ok(AnalysisResult {
            value: SelectionOutput::Sequence(values),
            typecode: None,
            count: 0,
            min: None,
            max: None,
            reason: Reason::Empty,
        });
    }

    if !values.iter().all(Value::is_numeric) {
        return Ok(AnalysisResult {
            count: values.len(),
            value: SelectionOutput::Sequence(values),
            typecode: None,
            min: None,
            max: None,
            reason: Reason::NonNumeric,
        });
    }

    let scan = NumericScan::of(&values);
    let value = select_values(values, options)?;

    let (typecode, reason) = match value.encoding() {
        Some(encoding) if scan.has_float => (Some(encoding), Reason::Float),
        Some(encoding) => (Some(encoding), Reason::Int),
        None => (None, Reason::NoFittingType),
    };

    Ok(AnalysisResult {
        value,
        typecode,
        count: scan.count,
        min: scan.min,
        max: scan.max,
        reason,
    })
}
