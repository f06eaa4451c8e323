#![forbid(unsafe_code)]

//! Reference LSD radix sort, signed variant and stable keyed-record variant.
//!
//! Digits are extracted as `(value / exp) % base`, least significant first,
//! with a stable counting sort per digit. The prefix-sum loop uses the
//! corrected bound (`count[d] += count[d - 1]` for every `d` in `1..base`).
//! Negative inputs are sorted by sign splitting: magnitudes of the
//! negatives sorted independently, then reversed and negated, with the
//! negative block prepended to the sorted non-negatives.

/// One stable counting-sort pass over `keys` by the digit at `exp`,
/// reordering `companion` identically.
fn stable_pass_with_companion(keys: &mut [i64], companion: &mut [usize], exp: i64, base: i64) {
    let n = keys.len();
    let mut out_keys = vec![0i64; n];
    let mut out_companion = vec![0usize; n];
    let mut count = vec![0usize; base as usize];

    for &key in keys.iter() {
        count[((key / exp) % base) as usize] += 1;
    }
    for d in 1..base as usize {
        count[d] += count[d - 1];
    }
    // Walk backwards so equal digits keep their relative order.
    for i in (0..n).rev() {
        let d = ((keys[i] / exp) % base) as usize;
        count[d] -= 1;
        out_keys[count[d]] = keys[i];
        out_companion[count[d]] = companion[i];
    }
    keys.copy_from_slice(&out_keys);
    companion.copy_from_slice(&out_companion);
}

/// One stable counting-sort pass over plain values by the digit at `exp`.
fn counting_sort_by_digit(values: &mut [i64], exp: i64, base: i64) {
    let n = values.len();
    let mut output = vec![0i64; n];
    let mut count = vec![0usize; base as usize];

    for &value in values.iter() {
        count[((value / exp) % base) as usize] += 1;
    }
    for d in 1..base as usize {
        count[d] += count[d - 1];
    }
    for i in (0..n).rev() {
        let d = ((values[i] / exp) % base) as usize;
        count[d] -= 1;
        output[count[d]] = values[i];
    }
    values.copy_from_slice(&output);
}

fn radix_sort_nonneg(values: &mut [i64], base: i64) {
    let max = values.iter().copied().max().unwrap_or(0);
    let mut exp = 1i64;
    while max / exp > 0 {
        counting_sort_by_digit(values, exp, base);
        exp = exp.saturating_mul(base);
    }
}

/// Sort signed integers by LSD radix, returning a new ascending vector.
#[must_use]
pub fn radix_sort_lsd(input: &[i64], base: i64) -> Vec<i64> {
    if input.is_empty() {
        return Vec::new();
    }
    let mut neg: Vec<i64> = input.iter().filter(|&&x| x < 0).map(|&x| -x).collect();
    let mut pos: Vec<i64> = input.iter().copied().filter(|&x| x >= 0).collect();

    radix_sort_nonneg(&mut neg, base);
    radix_sort_nonneg(&mut pos, base);

    neg.iter().rev().map(|&m| -m).chain(pos).collect()
}

/// Stable keyed-record sort: LSD radix over non-negative keys with a
/// companion index array, so records with equal keys keep their original
/// relative order.
#[must_use]
pub fn sort_records_by_key<T, F>(records: &[T], base: i64, key_of: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> i64,
{
    if records.is_empty() {
        return Vec::new();
    }
    let mut keys: Vec<i64> = records.iter().map(&key_of).collect();
    let mut order: Vec<usize> = (0..records.len()).collect();

    let max = keys.iter().copied().max().unwrap_or(0);
    let mut exp = 1i64;
    while max / exp > 0 {
        stable_pass_with_companion(&mut keys, &mut order, exp, base);
        exp = exp.saturating_mul(base);
    }

    order.into_iter().map(|i| records[i].clone()).collect()
}
