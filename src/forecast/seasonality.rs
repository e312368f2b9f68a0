//! Fourier-series seasonal components.

use {
    crate::config::{ForecastSettings, SeasonalitySpec},
    std::f64::consts::PI,
};

/// `[sin(2πnt/P), cos(2πnt/P)]` for `n = 1..=order`, `t` in days since the epoch.
pub fn fourier_features(t_days: f64, spec: &SeasonalitySpec) -> impl Iterator<Item = f64> {
    let period = spec.period_days;
    (1..=spec.fourier_order).flat_map(move |n| {
        let x = 2.0 * PI * n as f64 * t_days / period;
        [x.sin(), x.cos()]
    })
}

pub fn n_columns(spec: &SeasonalitySpec) -> usize {
    2 * spec.fourier_order
}

/// Seasonalities switched on for a history with the given span and smallest
/// gap between consecutive dates, both in days.
///
/// Yearly needs two years of data. Weekly needs two weeks and sub-weekly
/// spacing. Daily seasonality is never enabled on daily bars.
pub fn enabled(span_days: i64, min_spacing_days: i64, settings: &ForecastSettings) -> Vec<SeasonalitySpec> {
    let mut out = Vec::with_capacity(2);
    if span_days >= settings.yearly_min_span_days {
        out.push(settings.yearly);
    }
    if span_days >= settings.weekly_min_span_days && min_spacing_days < 7 {
        out.push(settings.weekly);
    }
    out
}

/// A fitted seasonal block: its spec and the Fourier coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedSeasonality {
    pub spec: SeasonalitySpec,
    pub beta: Vec<f64>,
}

impl FittedSeasonality {
    pub fn eval(&self, t_days: f64) -> f64 {
        fourier_features(t_days, &self.spec)
            .zip(&self.beta)
            .map(|(x, b)| x * b)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FORECAST;

    #[test]
    fn weekly_features_repeat_every_seven_days() {
        let a: Vec<f64> = fourier_features(3.0, &FORECAST.weekly).collect();
        let b: Vec<f64> = fourier_features(10.0, &FORECAST.weekly).collect();
        assert_eq!(a.len(), n_columns(&FORECAST.weekly));
        for (x, y) in a.iter().zip(&b) {
            assert!((x - y).abs() < 1e-9);
        }
    }

    #[test]
    fn seasonalities_follow_history_span() {
        assert!(enabled(10, 1, &FORECAST).is_empty());
        let names = |v: Vec<SeasonalitySpec>| v.iter().map(|s| s.name).collect::<Vec<_>>();
        assert_eq!(names(enabled(100, 1, &FORECAST)), vec!["weekly"]);
        assert_eq!(names(enabled(800, 1, &FORECAST)), vec!["yearly", "weekly"]);
        assert_eq!(names(enabled(800, 7, &FORECAST)), vec!["yearly"]);
    }
}
