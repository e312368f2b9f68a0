use {
    crate::{
        config::{EndpointConfig, HISTORY_START},
        data::{
            CoinGeckoClient, CoinListProvider, DataError, PriceHistoryProvider, TtlCache,
            YahooChartClient,
        },
        domain::{Coin, CoinListing, Ticker},
        models::PriceSeries,
        utils::TimeUtils,
    },
    chrono::NaiveDate,
    std::{
        sync::{Arc, Mutex, MutexGuard, PoisonError},
        time::Duration,
    },
};

#[cfg(debug_assertions)]
use crate::config::DF;

/// Runtime knobs for [`MarketData`], filled from the CLI.
#[derive(Debug, Clone)]
pub struct MarketDataSettings {
    pub endpoints: EndpointConfig,
    /// `None` memoises for the life of the process.
    pub cache_ttl: Option<Duration>,
    pub history_start: NaiveDate,
}

impl Default for MarketDataSettings {
    fn default() -> Self {
        Self {
            endpoints: EndpointConfig::default(),
            cache_ttl: None,
            history_start: TimeUtils::parse_date(HISTORY_START)
                .unwrap_or(TimeUtils::UNIX_EPOCH_DATE),
        }
    }
}

/// Memoised access to the coin listing and price histories.
///
/// Cheap to clone; clones share providers and caches.
#[derive(Clone)]
pub struct MarketData {
    listing: Arc<dyn CoinListProvider>,
    history: Arc<dyn PriceHistoryProvider>,
    coins_cache: Arc<Mutex<TtlCache<usize, CoinListing>>>,
    history_cache: Arc<Mutex<TtlCache<Ticker, PriceSeries>>>,
    history_start: NaiveDate,
}

fn locked<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MarketData {
    pub fn new(
        listing: Arc<dyn CoinListProvider>,
        history: Arc<dyn PriceHistoryProvider>,
        cache_ttl: Option<Duration>,
        history_start: NaiveDate,
    ) -> Self {
        Self {
            listing,
            history,
            coins_cache: Arc::new(Mutex::new(TtlCache::new(cache_ttl))),
            history_cache: Arc::new(Mutex::new(TtlCache::new(cache_ttl))),
            history_start,
        }
    }

    /// Wires up the live CoinGecko and Yahoo clients.
    pub fn from_settings(settings: &MarketDataSettings) -> Result<Self, DataError> {
        let endpoints = &settings.endpoints;
        let listing = CoinGeckoClient::new(&endpoints.listing_base_url, endpoints.timeout_ms)?;
        let history = YahooChartClient::new(&endpoints.history_base_url, endpoints.timeout_ms)?;
        Ok(Self::new(
            Arc::new(listing),
            Arc::new(history),
            settings.cache_ttl,
            settings.history_start,
        ))
    }

    pub fn history_start(&self) -> NaiveDate {
        self.history_start
    }

    /// Top `limit` coins by market cap. Memoised by `limit`.
    pub async fn top_coins(&self, limit: usize) -> Result<CoinListing, DataError> {
        if let Some(hit) = locked(&self.coins_cache).get(&limit) {
            #[cfg(debug_assertions)]
            if DF.log_cache {
                log::info!("coin listing cache hit (limit {})", limit);
            }
            return Ok(hit);
        }

        let listing = self.listing.fetch_top_coins(limit).await?;
        locked(&self.coins_cache).insert(limit, listing.clone());
        Ok(listing)
    }

    /// Daily bars for `ticker` from the history start up to, not including, today.
    /// Memoised by ticker.
    pub async fn price_history(&self, ticker: &Ticker) -> Result<PriceSeries, DataError> {
        if let Some(hit) = locked(&self.history_cache).get(ticker) {
            #[cfg(debug_assertions)]
            if DF.log_cache {
                log::info!("price history cache hit for {}", ticker);
            }
            return Ok(hit);
        }

        let end = TimeUtils::today_utc();
        let bars = self
            .history
            .fetch_daily_bars(ticker, self.history_start, end)
            .await?;
        let bars = bars
            .into_iter()
            .filter(|b| b.date >= self.history_start && b.date < end)
            .collect();
        let series = PriceSeries::from_bars(ticker.clone(), bars);
        if series.is_empty() {
            return Err(DataError::NoData(ticker.to_string()));
        }

        locked(&self.history_cache).insert(ticker.clone(), series.clone());
        Ok(series)
    }

    /// Resolves a display name or symbol against the top `limit` listing.
    pub async fn resolve_coin(&self, limit: usize, name_or_symbol: &str) -> Result<Coin, DataError> {
        let listing = self.top_coins(limit).await?;
        listing
            .find(name_or_symbol)
            .ok_or_else(|| DataError::UnknownCoin(name_or_symbol.to_string()))
    }

    /// Drops every memoised listing and history.
    pub fn clear(&self) {
        locked(&self.coins_cache).clear();
        locked(&self.history_cache).clear();
        #[cfg(debug_assertions)]
        if DF.log_cache {
            log::info!("market data caches cleared");
        }
    }
}
