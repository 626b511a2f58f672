pub mod array_result;
pub mod value;

pub use array_result::{AnalysisResult, Reason, SelectionError, SelectionOutput};
pub use value::Value;
