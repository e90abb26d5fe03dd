//! Numeric utilities: the few integer conversions the builder and the in-memory transport need.
//!
//! Guidelines
//! - Pagination values clamp instead of failing (a negative offset is simply zero).
//! - Keep conversions in one place so call sites stay searchable.

#[inline]
#[must_use]
pub fn u64_to_usize(v: u64) -> usize {
    usize::try_from(v).unwrap_or(usize::MAX)
}

#[inline]
#[must_use]
pub fn usize_to_u64(v: usize) -> u64 {
    u64::try_from(v).unwrap_or(u64::MAX)
}

#[inline]
#[must_use]
pub fn i64_to_u64_saturating_nonnegative(v: i64) -> u64 {
    u64::try_from(v).unwrap_or(0)
}

/// Truncates toward zero; NaN becomes 0 and out-of-range values saturate.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn f64_to_i64_truncating(v: f64) -> i64 {
    if v.is_nan() {
        return 0;
    }
    // `as` saturates at the i64 bounds
    v.trunc() as i64
}
