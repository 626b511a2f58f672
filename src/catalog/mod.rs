pub mod buffer;
pub mod encoding;

pub use buffer::TypedBuffer;
pub use encoding::{Encoding, UnknownEncoding, F32_MAX};
