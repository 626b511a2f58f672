use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::encoding::Encoding;
use crate::types::Value;

/// A contiguous, homogeneously encoded run of numbers.
///
/// Serialized adjacently tagged: `{"typecode": "B", "values": [1, 2]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "typecode", content = "values")]
pub enum TypedBuffer {
    #[serde(rename = "b")]
    Int8(Vec<i8>),
    #[serde(rename = "B")]
    UInt8(Vec<u8>),
    #[serde(rename = "h")]
    Int16(Vec<i16>),
    #[serde(rename = "H")]
    UInt16(Vec<u16>),
    #[serde(rename = "i")]
    Int32(Vec<i32>),
    #[serde(rename = "I")]
    UInt32(Vec<u32>),
    #[serde(rename = "q")]
    Int64(Vec<i64>),
    #[serde(rename = "Q")]
    UInt64(Vec<u64>),
    #[serde(rename = "f")]
    Float32(Vec<f32>),
    #[serde(rename = "d")]
    Float64(Vec<f64>),
}

// Applies `$body` to the inner vector of whichever variant `$buf` holds.
macro_rules! with_inner {
    ($buf:expr, $v:ident => $body:expr) => {
        match $buf {
            TypedBuffer::Int8($v) => $body,
            TypedBuffer::UInt8($v) => $body,
            TypedBuffer::Int16($v) => $body,
            TypedBuffer::UInt16($v) => $body,
            TypedBuffer::Int32($v) => $body,
            TypedBuffer::UInt32($v) => $body,
            TypedBuffer::Int64($v) => $body,
            TypedBuffer::UInt64($v) => $body,
            TypedBuffer::Float32($v) => $body,
            TypedBuffer::Float64($v) => $body,
        }
    };
}

fn ints<T>(values: &[Value], narrow: fn(i128) -> T) -> Vec<T> {
    values
        .iter()
        .filter_map(|v| match v {
            Value::Int(i) => Some(narrow(*i)),
            _ => None,
        })
        .collect()
}

impl TypedBuffer {
    /// Build a buffer of `encoding` holding every value, or `None` if any
    /// value overflows, is a float for an integer encoding, or is non-numeric.
    pub fn try_from_values(encoding: Encoding, values: &[Value]) -> Option<Self> {
        if !values.iter().all(|v| encoding.holds(v)) {
            return None;
        }

        // Every value is known to fit, so the narrowing casts below are exact.
        let buffer = match encoding {
            Encoding::Int8 => TypedBuffer::Int8(ints(values, |i| i as i8)),
            Encoding::UInt8 => TypedBuffer::UInt8(ints(values, |i| i as u8)),
            Encoding::Int16 => TypedBuffer::Int16(ints(values, |i| i as i16)),
            Encoding::UInt16 => TypedBuffer::UInt16(ints(values, |i| i as u16)),
            Encoding::Int32 => TypedBuffer::Int32(ints(values, |i| i as i32)),
            Encoding::UInt32 => TypedBuffer::UInt32(ints(values, |i| i as u32)),
            Encoding::Int64 => TypedBuffer::Int64(ints(values, |i| i as i64)),
            Encoding::UInt64 => TypedBuffer::UInt64(ints(values, |i| i as u64)),
            Encoding::Float32 => TypedBuffer::Float32(
                values
                    .iter()
                    .filter_map(Value::as_f64)
                    .map(|f| f as f32)
                    .collect(),
            ),
            Encoding::Float64 => {
                TypedBuffer::Float64(values.iter().filter_map(Value::as_f64).collect())
            }
        };
        Some(buffer)
    }

    pub fn encoding(&self) -> Encoding {
        match self {
            TypedBuffer::Int8(_) => Encoding::Int8,
            TypedBuffer::UInt8(_) => Encoding::UInt8,
            TypedBuffer::Int16(_) => Encoding::Int16,
            TypedBuffer::UInt16(_) => Encoding::UInt16,
            TypedBuffer::Int32(_) => Encoding::Int32,
            TypedBuffer::UInt32(_) => Encoding::UInt32,
            TypedBuffer::Int64(_) => Encoding::Int64,
            TypedBuffer::UInt64(_) => Encoding::UInt64,
            TypedBuffer::Float32(_) => Encoding::Float32,
            TypedBuffer::Float64(_) => Encoding::Float64,
        }
    }

    pub fn typecode(&self) -> char {
        self.encoding().code()
    }

    pub fn len(&self) -> usize {
        with_inner!(self, v => v.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Native-endian view of the backing storage, without copying.
    pub fn as_bytes(&self) -> &[u8] {
        with_inner!(self, v => bytemuck::cast_slice(v.as_slice()))
    }

    pub fn to_values(&self) -> Vec<Value> {
        with_inner!(self, v => v.iter().map(|&x| Value::from(x)).collect())
    }

    /// Content hash over the typecode and the native-endian bytes.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update([self.typecode() as u8]);
        hasher.update(self.as_bytes());
        format!("sha256:{}", hex::encode(hasher.finalize()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints_of(xs: &[i128]) -> Vec<Value> {
        xs.iter().map(|&x| Value::Int(x)).collect()
    }

    #[test]
    fn overflow_rejects_whole_buffer() {
        assert!(TypedBuffer::try_from_values(Encoding::UInt8, &ints_of(&[1, 256])).is_none());
        assert!(TypedBuffer::try_from_values(Encoding::UInt16, &ints_of(&[1, 256])).is_some());
    }

    #[test]
    fn integer_encoding_rejects_integral_float() {
        let values = vec![Value::Int(1), Value::Float(2.0)];
        assert!(TypedBuffer::try_from_values(Encoding::Int64, &values).is_none());
        let buf = TypedBuffer::try_from_values(Encoding::Float32, &values).unwrap();
        assert_eq!(buf, TypedBuffer::Float32(vec![1.0, 2.0]));
    }

    #[test]
    fn bytes_are_native_endian() {
        let buf = TypedBuffer::try_from_values(Encoding::Int16, &ints_of(&[1, -2])).unwrap();
        let mut expected = Vec::new();
        expected.extend_from_slice(&1i16.to_ne_bytes());
        expected.extend_from_slice(&(-2i16).to_ne_bytes());
        assert_eq!(buf.as_bytes(), expected.as_slice());
        assert_eq!(buf.as_bytes().len(), buf.len() * buf.encoding().width());
    }

    #[test]
    fn to_values_restores_integers() {
        let values = ints_of(&[0, 255]);
        let buf = TypedBuffer::try_from_values(Encoding::UInt8, &values).unwrap();
        assert_eq!(buf.to_values(), values);
    }

    #[test]
    fn fingerprint_depends_on_typecode() {
        let values = ints_of(&[1, 2]);
        let a = TypedBuffer::try_from_values(Encoding::Int8, &values).unwrap();
        let b = TypedBuffer::try_from_values(Encoding::UInt8, &values).unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
        assert_ne!(a.fingerprint(), b.fingerprint());
        assert!(a.fingerprint().starts_with("sha256:"));
    }

    #[test]
    fn serializes_with_typecode_tag() {
        let buf = TypedBuffer::try_from_values(Encoding::UInt8, &ints_of(&[7])).unwrap();
        assert_eq!(
            serde_json::to_string(&buf).unwrap(),
            r#"{"typecode":"B","values":[7]}"#
        );
    }
}
