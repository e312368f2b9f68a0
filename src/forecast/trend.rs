//! Piecewise-linear trend with automatic changepoints.
//!
//! Time is scaled so history runs over `[0, 1]`. The trend at `t` is
//! `m + k*t + sum_j delta_j * max(t - s_j, 0)`.

use crate::{config::ForecastSettings, utils::linspace};

/// Changepoint locations in scaled time.
///
/// Candidates are spread evenly over the first `changepoint_range` of the
/// history rows. The first row is never a changepoint. Short histories get
/// fewer changepoints and a single row gets none.
pub fn changepoints(t_scaled: &[f64], settings: &ForecastSettings) -> Vec<f64> {
    let hist_size = (t_scaled.len() as f64 * settings.changepoint_range).floor() as usize;
    let n_cp = settings.n_changepoints.min(hist_size.saturating_sub(1));
    if n_cp == 0 {
        return Vec::new();
    }

    let mut cps: Vec<f64> = linspace(0.0, (hist_size - 1) as f64, n_cp + 1)
        .into_iter()
        .skip(1)
        .map(|idx| t_scaled[idx.round() as usize])
        .collect();
    cps.dedup();
    cps
}

/// Design row fragment for the changepoint columns.
pub fn changepoint_features(t: f64, changepoints: &[f64]) -> impl Iterator<Item = f64> + '_ {
    changepoints.iter().map(move |&s| (t - s).max(0.0))
}

#[derive(Debug, Clone, PartialEq)]
pub struct PiecewiseLinear {
    pub offset: f64,
    pub slope: f64,
    pub changepoints: Vec<f64>,
    pub deltas: Vec<f64>,
}

impl PiecewiseLinear {
    pub fn eval(&self, t: f64) -> f64 {
        let bends: f64 = changepoint_features(t, &self.changepoints)
            .zip(&self.deltas)
            .map(|(x, d)| x * d)
            .sum();
        self.offset + self.slope * t + bends
    }

    /// Slope in effect at the end of history.
    pub fn final_slope(&self) -> f64 {
        self.slope + self.deltas.iter().sum::<f64>()
    }

    /// Mean absolute rate change, the scale of future changepoints.
    pub fn mean_abs_delta(&self) -> f64 {
        if self.deltas.is_empty() {
            return 0.0;
        }
        self.deltas.iter().map(|d| d.abs()).sum::<f64>() / self.deltas.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FORECAST;

    #[test]
    fn changepoints_stay_in_first_eighty_percent() {
        let t = linspace(0.0, 1.0, 1001);
        let cps = changepoints(&t, &FORECAST);
        assert_eq!(cps.len(), 25);
        assert!(cps.iter().all(|&c| c > 0.0 && c < 0.8));
        assert!(cps.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn short_history_gets_fewer_changepoints() {
        let t = linspace(0.0, 1.0, 10);
        // floor(10 * 0.8) = 8 rows, so 7 candidates
        assert_eq!(changepoints(&t, &FORECAST).len(), 7);
        assert!(changepoints(&[0.0], &FORECAST).is_empty());
        assert!(changepoints(&[0.0, 1.0], &FORECAST).is_empty());
    }

    #[test]
    fn piecewise_linear_bends_at_changepoint() {
        let trend = PiecewiseLinear {
            offset: 1.0,
            slope: 2.0,
            changepoints: vec![0.5],
            deltas: vec![-2.0],
        };
        assert_eq!(trend.eval(0.0), 1.0);
        assert_eq!(trend.eval(0.5), 2.0);
        // flat after the bend
        assert_eq!(trend.eval(1.0), 2.0);
        assert_eq!(trend.final_slope(), 0.0);
        assert_eq!(trend.mean_abs_delta(), 2.0);
    }
}
