//! Default forecasting model configuration.
//!
//! These mirror the stock defaults of the additive trend + seasonality model:
//! nothing here is tuned per coin.

/// One Fourier seasonality block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonalitySpec {
    pub name: &'static str,
    pub period_days: f64,
    pub fourier_order: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSettings {
    /// Upper bound on potential trend changepoints.
    pub n_changepoints: usize,
    /// Fraction of history (from the start) where changepoints may be placed.
    pub changepoint_range: f64,
    /// Prior scale of changepoint rate adjustments. Smaller = stiffer trend.
    pub changepoint_prior_scale: f64,
    /// Prior scale of Fourier coefficients.
    pub seasonality_prior_scale: f64,
    /// Starting guess of the observation noise sd on the scaled series. The
    /// fit re-solves once with the residual sd in its place.
    pub noise_prior: f64,
    pub yearly: SeasonalitySpec,
    pub weekly: SeasonalitySpec,
    /// History span needed before yearly seasonality is switched on.
    pub yearly_min_span_days: i64,
    /// History span needed before weekly seasonality is switched on.
    pub weekly_min_span_days: i64,
    /// Width of the uncertainty interval (0.8 = 10th..90th percentile).
    pub interval_width: f64,
}

pub const FORECAST: ForecastSettings = ForecastSettings {
    n_changepoints: 25,
    changepoint_range: 0.8,
    changepoint_prior_scale: 0.05,
    seasonality_prior_scale: 10.0,
    noise_prior: 0.05,
    yearly: SeasonalitySpec {
        name: "yearly",
        period_days: 365.25,
        fourier_order: 10,
    },
    weekly: SeasonalitySpec {
        name: "weekly",
        period_days: 7.0,
        fourier_order: 3,
    },
    yearly_min_span_days: 730,
    weekly_min_span_days: 14,
    interval_width: 0.80,
};

impl Default for ForecastSettings {
    fn default() -> Self {
        FORECAST
    }
}
