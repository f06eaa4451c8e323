#![forbid(unsafe_code)]

//! Reference bucket sort for floats in the unit interval.

/// Sort values in `[0, 1)` by bucketing, returning a new ascending vector.
///
/// Uses one bucket per input element with index `floor(n * x)`, so inputs
/// outside `[0, 1)` are clamped into the valid bucket range rather than
/// panicking. Each bucket is sorted with the standard library and the
/// buckets are concatenated in index order.
#[must_use]
pub fn bucket_sort(input: &[f64]) -> Vec<f64> {
    let n = input.len();
    if n == 0 {
        return Vec::new();
    }

    let mut buckets: Vec<Vec<f64>> = vec![Vec::new(); n];
    for &x in input {
        let idx = ((n as f64 * x) as usize).min(n - 1);
        buckets[idx].push(x);
    }

    let mut out = Vec::with_capacity(n);
    for bucket in &mut buckets {
        bucket.sort_by(|a, b| a.total_cmp(b));
        out.append(bucket);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_the_gpa_scenario() {
        let gpas = [0.78, 0.17, 0.26, 0.81, 0.92, 0.99, 0.68, 0.39];
        let sorted = bucket_sort(&gpas);
        assert_eq!(
            sorted,
            vec![0.17, 0.26, 0.39, 0.68, 0.78, 0.81, 0.92, 0.99]
        );
    }

    #[test]
    fn handles_trivial_inputs() {
        assert_eq!(bucket_sort(&[]), Vec::<f64>::new());
        assert_eq!(bucket_sort(&[0.5]), vec![0.5]);
    }

    #[test]
    fn collisions_within_one_bucket_are_sorted() {
        let data = [0.91, 0.90, 0.92, 0.11, 0.10];
        let sorted = bucket_sort(&data);
        assert!(sorted.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(sorted.len(), data.len());
    }
}
