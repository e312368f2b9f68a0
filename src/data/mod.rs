mod cache;
mod coingecko;
mod error;
mod http;
mod market_data;
mod provider;
mod yahoo;

pub use {
    cache::TtlCache,
    coingecko::{CoinGeckoClient, parse_markets_page},
    error::DataError,
    market_data::{MarketData, MarketDataSettings},
    provider::{CoinListProvider, PriceHistoryProvider},
    yahoo::{YahooChartClient, parse_chart},
};
