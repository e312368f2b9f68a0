use {
    crate::{
        data::DataError,
        domain::{CoinListing, DailyBar, Ticker},
    },
    async_trait::async_trait,
    chrono::NaiveDate,
};

/// Source of the ranked coin listing.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait CoinListProvider: Send + Sync {
    /// Top `limit` coins by market cap, name -> symbol.
    async fn fetch_top_coins(&self, limit: usize) -> Result<CoinListing, DataError>;
}

/// Source of daily OHLC bars.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait PriceHistoryProvider: Send + Sync {
    /// Bars with `start <= date < end`. Order and uniqueness are not guaranteed.
    async fn fetch_daily_bars(
        &self,
        ticker: &Ticker,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyBar>, DataError>;
}
