#![allow(clippy::const_is_empty)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::type_complexity)]
#![allow(clippy::too_many_arguments)]

// Core modules
pub mod app;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod forecast;
pub mod models;
pub mod ui;
pub mod utils;

// Re-export commonly used types outside of crate (for the report binary and tests)
pub use app::App;
pub use config::PERSISTENCE;
pub use data::{DataError, MarketData, MarketDataSettings};
pub use domain::{Coin, CoinListing, Ticker};
pub use engine::run_forecast;
pub use forecast::{ForecastError, ForecastModel};
pub use models::{DashboardData, ForecastFrame, PriceSeries};

// CLI argument parsing
use {
    crate::{
        config::{DEFAULT_COIN_LIMIT, EndpointConfig, HISTORY_START},
        utils::TimeUtils,
    },
    chrono::NaiveDate,
    clap::Parser,
    std::time::Duration,
};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// How many coins (top by market cap) the selector offers
    #[arg(long, default_value_t = DEFAULT_COIN_LIMIT)]
    pub coin_limit: usize,

    /// Expire cached listings and price histories after this many seconds
    /// (default: keep them for the whole session)
    #[arg(long)]
    pub cache_ttl_secs: Option<u64>,

    /// Override the CoinGecko API base URL (e.g. a CORS proxy on the web build)
    #[arg(long)]
    pub coingecko_url: Option<String>,

    /// Override the Yahoo Finance chart API base URL
    #[arg(long)]
    pub yahoo_url: Option<String>,

    /// First day of price history to fetch (YYYY-MM-DD)
    #[arg(long, default_value = HISTORY_START, value_parser = parse_start_date)]
    pub start_date: NaiveDate,

    /// HTTP timeout per request, in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

fn parse_start_date(text: &str) -> Result<NaiveDate, String> {
    TimeUtils::parse_date(text).map_err(|e| format!("{:#}", e))
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            coin_limit: DEFAULT_COIN_LIMIT,
            cache_ttl_secs: None,
            coingecko_url: None,
            yahoo_url: None,
            start_date: TimeUtils::parse_date(HISTORY_START).unwrap_or(TimeUtils::UNIX_EPOCH_DATE),
            timeout_ms: None,
        }
    }
}

impl Cli {
    pub fn market_settings(&self) -> MarketDataSettings {
        let mut endpoints = EndpointConfig::default();
        if let Some(url) = &self.coingecko_url {
            endpoints.listing_base_url = url.clone();
        }
        if let Some(url) = &self.yahoo_url {
            endpoints.history_base_url = url.clone();
        }
        if let Some(ms) = self.timeout_ms {
            endpoints.timeout_ms = ms;
        }
        MarketDataSettings {
            endpoints,
            cache_ttl: self.cache_ttl_secs.map(Duration::from_secs),
            history_start: self.start_date,
        }
    }
}

/// Main application entry point - creates the GUI app
/// This is the public API for the binary to call
pub fn run_app(cc: &eframe::CreationContext<'_>, args: Cli) -> App {
    App::new(cc, args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_parsed_defaults() {
        let parsed = Cli::parse_from(["crypto-forecast"]);
        let default = Cli::default();
        assert_eq!(parsed.coin_limit, default.coin_limit);
        assert_eq!(parsed.start_date, default.start_date);
        assert_eq!(parsed.cache_ttl_secs, None);
    }

    #[test]
    fn overrides_reach_market_settings() {
        let cli = Cli::parse_from([
            "crypto-forecast",
            "--cache-ttl-secs",
            "60",
            "--yahoo-url",
            "http://localhost:9000/chart",
            "--start-date",
            "2020-01-01",
        ]);
        let settings = cli.market_settings();
        assert_eq!(settings.cache_ttl, Some(Duration::from_secs(60)));
        assert_eq!(settings.endpoints.history_base_url, "http://localhost:9000/chart");
        assert_eq!(settings.history_start, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
    }

    #[test]
    fn bad_start_date_is_rejected() {
        assert!(Cli::try_parse_from(["crypto-forecast", "--start-date", "01/01/2020"]).is_err());
    }
}
