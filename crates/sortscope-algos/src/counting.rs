#![forbid(unsafe_code)]

//! Reference counting sort.
//!
//! Requires a bounded integer range: the counting table has
//! `k = max - min + 1` entries, so a sparse input spanning a huge range
//! degrades to excessive auxiliary memory. That is a documented property
//! of the algorithm, not an error this function guards against.

/// Sort integers by counting, returning a new ascending vector.
///
/// Offset-by-minimum so negative values work; stable by construction since
/// equal values are indistinguishable.
#[must_use]
pub fn counting_sort(input: &[i64]) -> Vec<i64> {
    let Some(&min) = input.iter().min() else {
        return Vec::new();
    };
    let max = *input.iter().max().unwrap_or(&min);
    let k = (max - min + 1) as usize;

    let mut counts = vec![0usize; k];
    for &value in input {
        counts[(value - min) as usize] += 1;
    }

    let mut out = Vec::with_capacity(input.len());
    for (offset, &freq) in counts.iter().enumerate() {
        let value = min + offset as i64;
        out.extend(std::iter::repeat_n(value, freq));
    }
    out
}
