//! Some useful post-processing functions
use crate::Real;

/// Relative drift of a conserved-quantity series,
///
/// (max(series) - series\[1\]) / series\[1\]
///
/// The reference is the second entry, i.e. the first value recorded
/// after the Euler bootstrap. Returns NAN for series shorter than two
/// entries.
pub fn relative_drift(series: &[Real]) -> Real {
    if series.len() < 2 {
        return Real::NAN;
    }
    let max = series.iter().cloned().fold(Real::MIN, Real::max);
    (max - series[1]) / series[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drift_of_a_constant_series_is_zero() {
        let series = [2., 2., 2., 2.];
        assert_eq!(relative_drift(&series), 0.);
    }

    #[test]
    fn drift_is_measured_against_the_second_entry() {
        let series = [1., 2., 2.5, 2.];
        assert!((relative_drift(&series) - 0.25).abs() < 1e-15);
    }

    #[test]
    fn short_series_has_no_drift() {
        assert!(relative_drift(&[1.]).is_nan());
    }
}
