use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::Value;

/// Largest finite magnitude representable as an IEEE-754 single.
pub const F32_MAX: f64 = 3.4028235e38;

/// A fixed-width numeric encoding.
///
/// Declaration order is the canonical catalog order; `min_type`/`max_type`
/// bounds are resolved against it, never against a policy order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Encoding {
    #[serde(rename = "b")]
    Int8,
    #[serde(rename = "B")]
    UInt8,
    #[serde(rename = "h")]
    Int16,
    #[serde(rename = "H")]
    UInt16,
    #[serde(rename = "i")]
    Int32,
    #[serde(rename = "I")]
    UInt32,
    #[serde(rename = "q")]
    Int64,
    #[serde(rename = "Q")]
    UInt64,
    #[serde(rename = "f")]
    Float32,
    #[serde(rename = "d")]
    Float64,
}

impl Encoding {
    /// The full catalog in canonical order.
    pub const ALL: [Encoding; 10] = [
        Encoding::Int8,
        Encoding::UInt8,
        Encoding::Int16,
        Encoding::UInt16,
        Encoding::Int32,
        Encoding::UInt32,
        Encoding::Int64,
        Encoding::UInt64,
        Encoding::Float32,
        Encoding::Float64,
    ];

    pub fn code(self) -> char {
        match self {
            Encoding::Int8 => 'b',
            Encoding::UInt8 => 'B',
            Encoding::Int16 => 'h',
            Encoding::UInt16 => 'H',
            Encoding::Int32 => 'i',
            Encoding::UInt32 => 'I',
            Encoding::Int64 => 'q',
            Encoding::UInt64 => 'Q',
            Encoding::Float32 => 'f',
            Encoding::Float64 => 'd',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Encoding::Int8 => "int8",
            Encoding::UInt8 => "uint8",
            Encoding::Int16 => "int16",
            Encoding::UInt16 => "uint16",
            Encoding::Int32 => "int32",
            Encoding::UInt32 => "uint32",
            Encoding::Int64 => "int64",
            Encoding::UInt64 => "uint64",
            Encoding::Float32 => "float32",
            Encoding::Float64 => "float64",
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.code() == code)
    }

    /// Position in the canonical catalog order.
    pub fn rank(self) -> usize {
        self as usize
    }

    /// Width of one element in bytes.
    pub fn width(self) -> usize {
        match self {
            Encoding::Int8 | Encoding::UInt8 => 1,
            Encoding::Int16 | Encoding::UInt16 => 2,
            Encoding::Int32 | Encoding::UInt32 | Encoding::Float32 => 4,
            Encoding::Int64 | Encoding::UInt64 | Encoding::Float64 => 8,
        }
    }

    pub fn is_float(self) -> bool {
        matches!(self, Encoding::Float32 | Encoding::Float64)
    }

    pub fn is_signed(self) -> bool {
        matches!(
            self,
            Encoding::Int8 | Encoding::Int16 | Encoding::Int32 | Encoding::Int64
        ) || self.is_float()
    }

    /// Inclusive integer bounds, `None` for float encodings.
    pub fn int_range(self) -> Option<(i128, i128)> {
        let range = match self {
            Encoding::Int8 => (i8::MIN as i128, i8::MAX as i128),
            Encoding::UInt8 => (0, u8::MAX as i128),
            Encoding::Int16 => (i16::MIN as i128, i16::MAX as i128),
            Encoding::UInt16 => (0, u16::MAX as i128),
            Encoding::Int32 => (i32::MIN as i128, i32::MAX as i128),
            Encoding::UInt32 => (0, u32::MAX as i128),
            Encoding::Int64 => (i64::MIN as i128, i64::MAX as i128),
            Encoding::UInt64 => (0, u64::MAX as i128),
            Encoding::Float32 | Encoding::Float64 => return None,
        };
        Some(range)
    }

    /// Whether a single integer fits this encoding.
    pub fn holds_int(self, v: i128) -> bool {
        match self.int_range() {
            Some((lo, hi)) => lo <= v && v <= hi,
            None => self.holds_float(v as f64),
        }
    }

    /// Whether a single float fits this encoding.
    ///
    /// Integer encodings never hold a float, integral or not.
    pub fn holds_float(self, v: f64) -> bool {
        match self {
            Encoding::Float32 => v.is_nan() || v.abs() <= F32_MAX,
            Encoding::Float64 => true,
            _ => false,
        }
    }

    /// Whether a single value fits this encoding. Non-numeric values never do.
    pub fn holds(self, value: &Value) -> bool {
        match value {
            Value::Int(v) => self.holds_int(*v),
            Value::Float(v) => self.holds_float(*v),
            _ => false,
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown encoding: {0}")]
pub struct UnknownEncoding(pub String);

/// Accepts either a one-character code (`"B"`) or a name (`"uint8"`).
impl FromStr for Encoding {
    type Err = UnknownEncoding;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(enc) = Encoding::from_code(c) {
                return Ok(enc);
            }
        }
        Encoding::ALL
            .into_iter()
            .find(|e| e.name() == s)
            .ok_or_else(|| UnknownEncoding(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_order_matches_rank() {
        for (idx, enc) in Encoding::ALL.iter().enumerate() {
            assert_eq!(enc.rank(), idx);
        }
        let codes: String = Encoding::ALL.iter().map(|e| e.code()).collect();
        assert_eq!(codes, "bBhHiIqQfd");
    }

    #[test]
    fn widths_and_signedness() {
        let widths: Vec<usize> = Encoding::ALL.iter().map(|e| e.width()).collect();
        assert_eq!(widths, vec![1, 1, 2, 2, 4, 4, 8, 8, 4, 8]);
        assert!(Encoding::Int32.is_signed());
        assert!(!Encoding::UInt32.is_signed());
        assert!(Encoding::Float32.is_float() && !Encoding::UInt64.is_float());
    }

    #[test]
    fn integer_bounds_are_inclusive() {
        assert!(Encoding::Int8.holds_int(-128));
        assert!(Encoding::Int8.holds_int(127));
        assert!(!Encoding::Int8.holds_int(128));
        assert!(Encoding::UInt8.holds_int(255));
        assert!(!Encoding::UInt8.holds_int(-1));
        assert!(Encoding::UInt64.holds_int(u64::MAX as i128));
        assert!(!Encoding::Int64.holds_int(u64::MAX as i128));
    }

    #[test]
    fn float32_rejects_beyond_finite_bound() {
        assert!(Encoding::Float32.holds_float(3.0e38));
        assert!(!Encoding::Float32.holds_float(1e40));
        assert!(!Encoding::Float32.holds_float(f64::INFINITY));
        assert!(Encoding::Float32.holds_float(f64::NAN));
        assert!(Encoding::Float64.holds_float(1e300));
        assert!(!Encoding::Int64.holds_float(1.0));
    }

    #[test]
    fn parse_accepts_codes_and_names() {
        assert_eq!("B".parse::<Encoding>().unwrap(), Encoding::UInt8);
        assert_eq!("float32".parse::<Encoding>().unwrap(), Encoding::Float32);
        assert!("x".parse::<Encoding>().is_err());
        assert!("int128".parse::<Encoding>().is_err());
    }
}
