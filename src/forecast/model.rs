use {
    crate::{
        config::{ForecastSettings, SeasonalitySpec},
        forecast::{
            ForecastError,
            seasonality::{self, FittedSeasonality},
            solver::solve_ridge,
            trend::{self, PiecewiseLinear},
            uncertainty::{Band, interval_z, trend_sd},
        },
        models::{ForecastFrame, ForecastRow, TrainingSeries},
        utils::{TimeUtils, mean_and_stddev},
    },
    chrono::{Duration, NaiveDate},
    rayon::prelude::*,
};

#[cfg(debug_assertions)]
use crate::config::DF;

/// Rows a fit needs at minimum.
pub const MIN_FIT_ROWS: usize = 2;

/// Prior scale on the base offset and slope. Wide enough to be nearly free.
const BASE_PRIOR_SCALE: f64 = 5.0;

/// Floor on the refitted noise sd so a near-perfect fit keeps some shrinkage.
const MIN_NOISE: f64 = 1e-3;

/// Additive trend + seasonality model with default configuration.
#[derive(Debug, Clone, Default)]
pub struct ForecastModel {
    settings: ForecastSettings,
}

/// Model parameters after a fit, in scaled units.
#[derive(Debug, Clone)]
pub struct FittedModel {
    settings: ForecastSettings,
    history_dates: Vec<NaiveDate>,
    /// Epoch day of the first history row.
    t_start: f64,
    /// History span in days. Scaled time is `(day - t_start) / t_span`.
    t_span: f64,
    y_scale: f64,
    trend: PiecewiseLinear,
    seasonalities: Vec<FittedSeasonality>,
    /// Residual standard deviation on the scaled series.
    sigma_obs: f64,
    /// Changepoints per unit of scaled time seen over history.
    changepoint_rate: f64,
    z: f64,
}

struct Scaled {
    dates: Vec<NaiveDate>,
    y: Vec<f64>,
    t_start: f64,
    t_span: f64,
    y_scale: f64,
}

impl ForecastModel {
    pub fn new(settings: ForecastSettings) -> Self {
        Self { settings }
    }

    pub fn fit(&self, training: &TrainingSeries) -> Result<FittedModel, ForecastError> {
        let z = interval_z(self.settings.interval_width)?;
        let scaled = Self::prepare(training)?;

        let t_scaled: Vec<f64> = scaled
            .dates
            .iter()
            .map(|d| (TimeUtils::date_to_epoch_days(*d) - scaled.t_start) / scaled.t_span)
            .collect();
        let changepoints = trend::changepoints(&t_scaled, &self.settings);

        let span_days = scaled.t_span as i64;
        let min_spacing = scaled
            .dates
            .windows(2)
            .map(|w| (w[1] - w[0]).num_days())
            .min()
            .unwrap_or(span_days);
        let specs = seasonality::enabled(span_days, min_spacing, &self.settings);

        let rows: Vec<Vec<f64>> = crate::trace_time!("design matrix", 5_000, {
            scaled
                .dates
                .par_iter()
                .zip(t_scaled.par_iter())
                .map(|(date, &t)| {
                    design_row(t, TimeUtils::date_to_epoch_days(*date), &changepoints, &specs)
                })
                .collect()
        });
        let beta = crate::trace_time!("ridge solve", 20_000, {
            self.solve(&rows, &scaled.y, changepoints.len(), &specs)?
        });

        let mut coeffs = beta.into_iter();
        let offset = coeffs.next().unwrap_or(0.0);
        let slope = coeffs.next().unwrap_or(0.0);
        let deltas: Vec<f64> = coeffs.by_ref().take(changepoints.len()).collect();
        let seasonalities: Vec<FittedSeasonality> = specs
            .iter()
            .map(|spec| FittedSeasonality {
                spec: *spec,
                beta: coeffs.by_ref().take(seasonality::n_columns(spec)).collect(),
            })
            .collect();

        let n_cp = changepoints.len();
        let mut fitted = FittedModel {
            settings: self.settings.clone(),
            history_dates: scaled.dates,
            t_start: scaled.t_start,
            t_span: scaled.t_span,
            y_scale: scaled.y_scale,
            trend: PiecewiseLinear {
                offset,
                slope,
                changepoints,
                deltas,
            },
            seasonalities,
            sigma_obs: 0.0,
            // History covers exactly one unit of scaled time.
            changepoint_rate: n_cp as f64,
            z,
        };

        fitted.sigma_obs = residual_sd(&rows, &scaled.y, &fitted.coefficients());

        #[cfg(debug_assertions)]
        if DF.log_fit {
            log::info!(
                "fit {} rows: {} changepoints, seasonalities {:?}, sigma {:.4}, final slope {:.4}",
                fitted.history_dates.len(),
                n_cp,
                fitted.seasonality_names(),
                fitted.sigma_obs,
                fitted.trend.final_slope()
            );
        }
        Ok(fitted)
    }

    /// Drops non-finite targets, sorts by date and scales both axes.
    fn prepare(training: &TrainingSeries) -> Result<Scaled, ForecastError> {
        let mut pairs: Vec<(NaiveDate, f64)> =
            training.rows().filter(|(_, y)| y.is_finite()).collect();
        pairs.sort_by_key(|(d, _)| *d);
        pairs.dedup_by_key(|(d, _)| *d);

        let insufficient = |actual| ForecastError::InsufficientData {
            required: MIN_FIT_ROWS,
            actual,
        };
        if pairs.len() < MIN_FIT_ROWS {
            return Err(insufficient(pairs.len()));
        }

        let (dates, y): (Vec<NaiveDate>, Vec<f64>) = pairs.into_iter().unzip();
        let t_start = TimeUtils::date_to_epoch_days(dates[0]);
        let t_span = TimeUtils::date_to_epoch_days(dates[dates.len() - 1]) - t_start;
        if t_span <= 0.0 {
            return Err(insufficient(dates.len()));
        }

        let max_abs = y.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        let y_scale = if max_abs > 0.0 { max_abs } else { 1.0 };
        let y = y.into_iter().map(|v| v / y_scale).collect();

        Ok(Scaled {
            dates,
            y,
            t_start,
            t_span,
            y_scale,
        })
    }

    /// Solves with the configured noise prior, then once more with penalties
    /// scaled to the residual noise of that first pass.
    fn solve(
        &self,
        rows: &[Vec<f64>],
        y: &[f64],
        n_changepoints: usize,
        specs: &[SeasonalitySpec],
    ) -> Result<Vec<f64>, ForecastError> {
        let first = solve_ridge(
            rows,
            y,
            &self.penalties(self.settings.noise_prior, n_changepoints, specs),
        )?;
        let noise = residual_sd(rows, y, &first).max(MIN_NOISE);

        #[cfg(debug_assertions)]
        if DF.log_fit {
            log::info!("refit with noise sd {:.4} (prior {:.4})", noise, self.settings.noise_prior);
        }
        solve_ridge(rows, y, &self.penalties(noise, n_changepoints, specs))
    }

    /// Ridge penalties per design column, from the Gaussian/Laplace priors and
    /// an observation noise sd on the scaled series.
    fn penalties(&self, noise_sd: f64, n_changepoints: usize, specs: &[SeasonalitySpec]) -> Vec<f64> {
        let s = &self.settings;
        let noise = noise_sd.powi(2);
        let base = noise / BASE_PRIOR_SCALE.powi(2);
        // A Laplace(τ) prior has the variance of a normal with sd √2·τ.
        let delta = noise / (2.0 * s.changepoint_prior_scale.powi(2));
        let fourier = noise / s.seasonality_prior_scale.powi(2);

        let mut out = vec![base, base];
        out.extend(std::iter::repeat_n(delta, n_changepoints));
        for spec in specs {
            out.extend(std::iter::repeat_n(fourier, seasonality::n_columns(spec)));
        }
        out
    }
}

fn design_row(
    t: f64,
    t_days: f64,
    changepoints: &[f64],
    specs: &[SeasonalitySpec],
) -> Vec<f64> {
    let mut row = Vec::with_capacity(
        2 + changepoints.len() + specs.iter().map(seasonality::n_columns).sum::<usize>(),
    );
    row.push(1.0);
    row.push(t);
    row.extend(trend::changepoint_features(t, changepoints));
    for spec in specs {
        row.extend(seasonality::fourier_features(t_days, spec));
    }
    row
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn residual_sd(rows: &[Vec<f64>], y: &[f64], beta: &[f64]) -> f64 {
    let residuals: Vec<f64> = rows
        .iter()
        .zip(y)
        .map(|(row, y)| y - dot(row, beta))
        .collect();
    mean_and_stddev(&residuals).1
}

impl FittedModel {
    /// History dates followed by `periods` consecutive days after the last one.
    pub fn make_future_dates(&self, periods: usize) -> Vec<NaiveDate> {
        let mut dates = self.history_dates.clone();
        if let Some(&last) = self.history_dates.last() {
            dates.extend((1..=periods as i64).map(|i| last + Duration::days(i)));
        }
        dates
    }

    /// Evaluates every component on `dates`, rescaled to price units.
    pub fn predict(&self, dates: &[NaiveDate]) -> ForecastFrame {
        let last_history = self.history_dates.last().copied();
        let rows: Vec<ForecastRow> = dates.par_iter().map(|&d| self.predict_one(d)).collect();
        let history_len = match last_history {
            Some(last) => dates.iter().take_while(|d| **d <= last).count(),
            None => 0,
        };
        ForecastFrame {
            rows,
            history_len,
            has_yearly: self.has_seasonality(self.settings.yearly.name),
            has_weekly: self.has_seasonality(self.settings.weekly.name),
        }
    }

    /// `make_future_dates` + `predict`.
    pub fn forecast(&self, periods: usize) -> ForecastFrame {
        self.predict(&self.make_future_dates(periods))
    }

    fn predict_one(&self, ds: NaiveDate) -> ForecastRow {
        let t_days = TimeUtils::date_to_epoch_days(ds);
        let t = (t_days - self.t_start) / self.t_span;

        let trend = self.trend.eval(t);
        let yearly = self.component(self.settings.yearly.name, t_days);
        let weekly = self.component(self.settings.weekly.name, t_days);
        let additive = yearly + weekly;
        let yhat = trend + additive;

        let t_sd = trend_sd(
            t - 1.0,
            self.changepoint_rate,
            self.trend.mean_abs_delta(),
        );
        let trend_band = Band::around(trend, self.z, t_sd);
        let yhat_band = Band::around(yhat, self.z, (self.sigma_obs.powi(2) + t_sd.powi(2)).sqrt());

        let k = self.y_scale;
        ForecastRow {
            ds,
            trend: trend * k,
            trend_lower: trend_band.lower * k,
            trend_upper: trend_band.upper * k,
            yearly: yearly * k,
            weekly: weekly * k,
            additive_terms: additive * k,
            yhat_lower: yhat_band.lower * k,
            yhat_upper: yhat_band.upper * k,
            yhat: yhat * k,
        }
    }

    fn component(&self, name: &str, t_days: f64) -> f64 {
        self.seasonalities
            .iter()
            .find(|s| s.spec.name == name)
            .map_or(0.0, |s| s.eval(t_days))
    }

    pub fn has_seasonality(&self, name: &str) -> bool {
        self.seasonalities.iter().any(|s| s.spec.name == name)
    }

    pub fn seasonality_names(&self) -> Vec<&'static str> {
        self.seasonalities.iter().map(|s| s.spec.name).collect()
    }

    /// One seasonal component over `days` consecutive days from `start`, in
    /// price units. `None` if the component was not fitted.
    pub fn seasonal_profile(&self, name: &str, start: NaiveDate, days: usize) -> Option<Vec<(NaiveDate, f64)>> {
        if !self.has_seasonality(name) {
            return None;
        }
        Some(
            (0..days as i64)
                .map(|i| {
                    let d = start + Duration::days(i);
                    (d, self.component(name, TimeUtils::date_to_epoch_days(d)) * self.y_scale)
                })
                .collect(),
        )
    }

    pub fn history_dates(&self) -> &[NaiveDate] {
        &self.history_dates
    }

    pub fn n_changepoints(&self) -> usize {
        self.trend.changepoints.len()
    }

    /// Changepoint dates, for plotting.
    pub fn changepoint_dates(&self) -> Vec<NaiveDate> {
        self.trend
            .changepoints
            .iter()
            .filter_map(|t| TimeUtils::epoch_days_to_date(self.t_start + t * self.t_span))
            .collect()
    }

    /// Residual standard deviation in price units.
    pub fn residual_sd(&self) -> f64 {
        self.sigma_obs * self.y_scale
    }

    fn coefficients(&self) -> Vec<f64> {
        let mut c = vec![self.trend.offset, self.trend.slope];
        c.extend(&self.trend.deltas);
        for s in &self.seasonalities {
            c.extend(&s.beta);
        }
        c
    }
}
