use crate::catalog::Encoding;
use crate::selection::policy::{Policy, SelectionOptions};

use crate::catalog::Encoding::*;

const SIGNED_FIRST: [Encoding; 8] = [Int8, UInt8, Int16, UInt16, Int32, UInt32, Int64, UInt64];
const UNSIGNED_FIRST: [Encoding; 8] = [UInt8, Int8, UInt16, Int16, UInt32, Int32, UInt64, Int64];
const WIDE_FIRST: [Encoding; 8] = [Int32, UInt32, Int64, UInt64, Int16, UInt16, Int8, UInt8];

/// Ordered candidate encodings for one selection.
///
/// `min_type`/`max_type` window the result by canonical catalog position
/// after policy ordering; codes that do not parse leave that side open.
pub fn sequence(
    policy: Policy,
    prefer_signed: bool,
    no_float: bool,
    min_type: Option<&str>,
    max_type: Option<&str>,
) -> Vec<Encoding> {
    let base = match policy {
        Policy::Smallest if prefer_signed => SIGNED_FIRST,
        Policy::Smallest => UNSIGNED_FIRST,
        Policy::Balanced => SIGNED_FIRST,
        Policy::Wide => WIDE_FIRST,
    };

    let mut seq = base.to_vec();
    if !no_float {
        seq.extend([Float32, Float64]);
    }

    let lo = min_type
        .and_then(|c| c.parse::<Encoding>().ok())
        .map_or(0, Encoding::rank);
    let hi = max_type
        .and_then(|c| c.parse::<Encoding>().ok())
        .map_or(Float64.rank(), Encoding::rank);

    seq.retain(|e| (lo..=hi).contains(&e.rank()));
    seq
}

pub fn sequence_for(options: &SelectionOptions) -> Vec<Encoding> {
    sequence(
        options.policy,
        options.prefer_signed,
        options.no_float,
        options.min_type.as_deref(),
        options.max_type.as_deref(),
    )
}
