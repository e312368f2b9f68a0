//! Fetch -> reshape -> fit -> predict for one coin.

use {
    crate::{
        config::{FORECAST, horizon_days},
        data::MarketData,
        domain::Coin,
        forecast::{FittedModel, ForecastModel},
        models::{ComponentProfiles, DashboardData},
    },
    anyhow::{Context, Result},
    chrono::{Datelike, Duration, NaiveDate},
};

#[cfg(debug_assertions)]
use crate::config::DF;

pub async fn run_forecast(market: &MarketData, coin: &Coin, years: u32) -> Result<DashboardData> {
    let ticker = coin.ticker();
    let prices = market
        .price_history(&ticker)
        .await
        .with_context(|| format!("loading price history for {} ({})", coin.name, ticker))?;

    let training = prices.training_series();
    let fitted = crate::trace_time!(&format!("Fit [{}]", ticker), 50_000, {
        ForecastModel::new(FORECAST).fit(&training)
    })
    .with_context(|| format!("fitting forecast model for {}", ticker))?;

    let forecast = fitted.forecast(horizon_days(years));
    let components = component_profiles(&fitted);

    #[cfg(debug_assertions)]
    if DF.log_fit {
        log::info!(
            "{}: {} changepoints, seasonalities {:?}, residual sd {:.4}",
            ticker,
            fitted.n_changepoints(),
            fitted.seasonality_names(),
            fitted.residual_sd()
        );
    }

    #[cfg(debug_assertions)]
    if DF.log_engine {
        log::info!(
            "{}: {} history rows, {} forecast rows ({} years)",
            ticker,
            prices.len(),
            forecast.len(),
            years
        );
    }

    Ok(DashboardData {
        coin: coin.clone(),
        years,
        prices,
        forecast,
        components,
        changepoints: fitted.changepoint_dates(),
    })
}

/// Yearly over the calendar year of the last history date, weekly over the
/// Monday-to-Sunday week containing it.
pub fn component_profiles(fitted: &FittedModel) -> ComponentProfiles {
    let Some(&last) = fitted.history_dates().last() else {
        return ComponentProfiles::default();
    };
    let year_start = NaiveDate::from_ymd_opt(last.year(), 1, 1).unwrap_or(last);
    let year_len = (NaiveDate::from_ymd_opt(last.year() + 1, 1, 1).unwrap_or(last) - year_start)
        .num_days()
        .max(1) as usize;
    let week_start = last - Duration::days(last.weekday().num_days_from_monday() as i64);

    ComponentProfiles {
        yearly: fitted.seasonal_profile(FORECAST.yearly.name, year_start, year_len),
        weekly: fitted.seasonal_profile(FORECAST.weekly.name, week_start, 7),
    }
}
