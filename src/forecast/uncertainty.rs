//! Interval widths for the fitted model.

use {
    crate::forecast::ForecastError,
    statrs::distribution::{ContinuousCDF, Normal},
};

/// Two-sided standard normal quantile for an interval of `width` (0.8 -> ~1.2816).
pub fn interval_z(width: f64) -> Result<f64, ForecastError> {
    if !(width > 0.0 && width < 1.0) {
        return Err(ForecastError::InvalidParameter(format!(
            "interval width must be in (0, 1), got {}",
            width
        )));
    }
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| ForecastError::InvalidParameter(e.to_string()))?;
    Ok(normal.inverse_cdf(0.5 + width / 2.0))
}

/// Spread of the future trend `h` scaled-time units past the end of history.
///
/// Future changepoints arrive at `rate` per unit time with Laplace magnitudes of
/// scale `mean_abs_delta`; the slope walk integrates to a variance of
/// `rate * 2λ² * h³ / 3`. Zero inside history.
pub fn trend_sd(h: f64, rate: f64, mean_abs_delta: f64) -> f64 {
    if h <= 0.0 {
        return 0.0;
    }
    (rate * 2.0 * mean_abs_delta.powi(2) * h.powi(3) / 3.0).sqrt()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub lower: f64,
    pub upper: f64,
}

impl Band {
    pub fn around(center: f64, z: f64, sd: f64) -> Self {
        Self {
            lower: center - z * sd,
            upper: center + z * sd,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eighty_percent_z() {
        let z = interval_z(0.8).unwrap();
        assert!((z - 1.281_551_565_5).abs() < 1e-6);
        assert!(interval_z(1.0).is_err());
        assert!(interval_z(0.0).is_err());
    }

    #[test]
    fn trend_sd_grows_with_horizon() {
        assert_eq!(trend_sd(0.0, 25.0, 0.1), 0.0);
        assert_eq!(trend_sd(-1.0, 25.0, 0.1), 0.0);
        let near = trend_sd(0.1, 25.0, 0.1);
        let far = trend_sd(0.5, 25.0, 0.1);
        assert!(near > 0.0 && far > near);
        assert_eq!(trend_sd(0.5, 0.0, 0.1), 0.0);
    }

    #[test]
    fn band_is_symmetric() {
        let b = Band::around(10.0, 2.0, 1.5);
        assert_eq!(b, Band { lower: 7.0, upper: 13.0 });
    }
}
