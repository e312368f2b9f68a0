use std::f64;

/// Population mean and standard deviation. Empty input gives `(0.0, 0.0)`.
#[inline]
pub fn mean_and_stddev(data: &[f64]) -> (f64, f64) {
    let count = data.len();
    if count == 0 {
        return (0.0, 0.0);
    }

    let sum: f64 = data.iter().sum();
    let mean = sum / count as f64;

    let variance: f64 = data
        .iter()
        .map(|value| {
            let diff = mean - *value;
            diff * diff
        })
        .sum::<f64>()
        / count as f64;

    (mean, variance.sqrt())
}

/// Min and max of the finite values, or `None` if there are none.
pub fn finite_min_max<'a>(values: impl IntoIterator<Item = &'a f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Expands `(min, max)` by `pad_pct` of its span on both sides.
/// A zero span is widened by 1.0 so the plot never collapses.
pub fn padded_range(min: f64, max: f64, pad_pct: f64) -> (f64, f64) {
    let span = max - min;
    if span <= f64::EPSILON {
        return (min - 1.0, max + 1.0);
    }
    let pad = span * pad_pct;
    (min - pad, max + pad)
}

/// `count` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count).map(|i| start + step * i as f64).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_and_stddev_of_constant_is_zero_spread() {
        assert_eq!(mean_and_stddev(&[2.0, 2.0, 2.0]), (2.0, 0.0));
        assert_eq!(mean_and_stddev(&[]), (0.0, 0.0));
        let (m, s) = mean_and_stddev(&[1.0, 3.0]);
        assert_eq!(m, 2.0);
        assert!((s - 1.0).abs() < 1e-12);
    }

    #[test]
    fn finite_min_max_skips_nan() {
        let v = [f64::NAN, 3.0, -1.0, f64::INFINITY];
        assert_eq!(finite_min_max(&v), Some((-1.0, 3.0)));
        assert_eq!(finite_min_max(&[f64::NAN]), None);
    }

    #[test]
    fn linspace_hits_both_ends() {
        let v = linspace(0.0, 10.0, 6);
        assert_eq!(v.len(), 6);
        assert_eq!(v[0], 0.0);
        assert_eq!(v[5], 10.0);
        assert_eq!(linspace(3.0, 4.0, 1), vec![3.0]);
    }

    #[test]
    fn padded_range_handles_flat_series() {
        assert_eq!(padded_range(5.0, 5.0, 0.1), (4.0, 6.0));
        assert_eq!(padded_range(0.0, 10.0, 0.1), (-1.0, 11.0));
    }
}
