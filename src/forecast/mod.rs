//! Additive trend + seasonality forecaster.
//!
//! `y(t) = trend(t) + yearly(t) + weekly(t) + noise`, fitted by ridge-regularised
//! least squares on the scaled series. Only the stock default configuration is
//! exposed; see [`crate::config::FORECAST`].

mod error;
mod model;
mod seasonality;
mod solver;
mod trend;
mod uncertainty;

pub use {
    error::ForecastError,
    model::{FittedModel, ForecastModel, MIN_FIT_ROWS},
};
