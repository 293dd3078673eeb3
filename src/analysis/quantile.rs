//! Score quantiles

/// Linearly interpolated quantile of the given values, missing excluded.
///
/// Matches the assessment convention: for `q` in `[0, 1]` the cutoff sits
/// at position `q * (n - 1)` of the sorted values, interpolating between
/// neighbors. Returns `None` when no value is present.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let q = q.clamp(0.0, 1.0);
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }
    let frac = pos - lo as f64;
    Some(sorted[lo] + frac * (sorted[hi] - sorted[lo]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn interpolates_between_neighbors() {
        let scores: Vec<f64> = (1..=10).map(|n| (n * 10) as f64).collect();
        // 0.73 * 9 = 6.57 -> between 70 and 80
        assert_relative_eq!(quantile(&scores, 0.73).unwrap(), 75.7, epsilon = 1e-9);
        // 0.27 * 9 = 2.43 -> between 30 and 40
        assert_relative_eq!(quantile(&scores, 0.27).unwrap(), 34.3, epsilon = 1e-9);
    }

    #[test]
    fn endpoints_and_singletons() {
        assert_eq!(quantile(&[42.0], 0.73), Some(42.0));
        assert_eq!(quantile(&[1.0, 2.0, 3.0], 0.0), Some(1.0));
        assert_eq!(quantile(&[1.0, 2.0, 3.0], 1.0), Some(3.0));
    }

    #[test]
    fn empty_and_all_missing() {
        assert_eq!(quantile(&[], 0.5), None);
        assert_eq!(quantile(&[f64::NAN], 0.5), None);
    }

    #[test]
    fn unsorted_input_is_fine() {
        assert_eq!(quantile(&[3.0, 1.0, 2.0], 0.5), Some(2.0));
    }
}
