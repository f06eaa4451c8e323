#![forbid(unsafe_code)]

//! Reference insertion sort.

/// Sort a sequence by insertion, returning a new ascending vector.
///
/// Stable: equal elements keep their original relative order. Quadratic in
/// the input length, linear on already-sorted input.
#[must_use]
pub fn insertion_sort<T: Ord + Clone>(input: &[T]) -> Vec<T> {
    let mut out = input.to_vec();
    for i in 1..out.len() {
        let key = out[i].clone();
        let mut j = i;
        while j > 0 && out[j - 1] > key {
            out[j] = out[j - 1].clone();
            j -= 1;
        }
        out[j] = key;
    }
    out
}
