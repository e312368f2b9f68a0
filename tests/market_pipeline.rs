//! End-to-end behaviour of the market data layer and the forecast pipeline
//! against in-memory providers.

use {
    async_trait::async_trait,
    chrono::{Duration as Days, NaiveDate},
    crypto_forecast::{
        CoinListing, DataError, MarketData, Ticker,
        config::horizon_days,
        data::{CoinListProvider, PriceHistoryProvider},
        domain::DailyBar,
        engine::{JobRequest, JobResult, process_request},
        run_forecast,
        utils::TimeUtils,
    },
    std::{
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
        time::Duration,
    },
};

const HISTORY_DAYS: i64 = 200;

#[derive(Default)]
struct FakeListing {
    calls: AtomicUsize,
}

#[async_trait]
impl CoinListProvider for FakeListing {
    async fn fetch_top_coins(&self, limit: usize) -> Result<CoinListing, DataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut listing = CoinListing::new();
        for (name, symbol) in [("Bitcoin", "btc"), ("Ethereum", "eth"), ("Tether", "usdt")]
            .into_iter()
            .take(limit)
        {
            listing.insert(name, symbol);
        }
        Ok(listing)
    }
}

/// Serves a smooth synthetic series over whatever range is asked for, plus
/// noise the market layer has to clean up: unsorted rows, a duplicate date
/// and bars outside the requested range.
#[derive(Default)]
struct FakeHistory {
    calls: AtomicUsize,
    empty: bool,
}

fn price(i: i64) -> f64 {
    100.0 + 0.5 * i as f64 + 3.0 * (2.0 * std::f64::consts::PI * i as f64 / 7.0).sin()
}

#[async_trait]
impl PriceHistoryProvider for FakeHistory {
    async fn fetch_daily_bars(
        &self,
        _ticker: &Ticker,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyBar>, DataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.empty {
            return Ok(Vec::new());
        }
        let days = (end - start).num_days();
        let bar = |date: NaiveDate, p: f64| DailyBar::new(date, p, p + 1.0, p - 1.0, p, p, 1_000);

        let mut bars: Vec<DailyBar> = (0..days)
            .rev()
            .map(|i| bar(start + Days::days(i), price(i)))
            .collect();
        bars.push(bar(start, price(0)));
        bars.push(bar(start - Days::days(3), 1.0));
        bars.push(bar(end, 1.0));
        bars.push(bar(end + Days::days(10), 1.0));
        Ok(bars)
    }
}

struct Fixture {
    listing: Arc<FakeListing>,
    history: Arc<FakeHistory>,
    market: MarketData,
    start: NaiveDate,
}

fn fixture(ttl: Option<Duration>, empty_history: bool) -> Fixture {
    let listing = Arc::new(FakeListing::default());
    let history = Arc::new(FakeHistory {
        calls: AtomicUsize::new(0),
        empty: empty_history,
    });
    let start = TimeUtils::today_utc() - Days::days(HISTORY_DAYS);
    let market = MarketData::new(listing.clone(), history.clone(), ttl, start);
    Fixture {
        listing,
        history,
        market,
        start,
    }
}

#[tokio::test]
async fn listing_is_fetched_once_per_limit() {
    let f = fixture(None, false);
    let first = f.market.top_coins(3).await.unwrap();
    let second = f.market.top_coins(3).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(f.listing.calls.load(Ordering::SeqCst), 1);

    f.market.top_coins(2).await.unwrap();
    assert_eq!(f.listing.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn listing_has_unique_names_and_uppercase_symbols() {
    let f = fixture(None, false);
    let listing = f.market.top_coins(3).await.unwrap();
    assert_eq!(listing.len(), 3);
    let names: Vec<&str> = listing.names().collect();
    assert_eq!(names, vec!["Bitcoin", "Ethereum", "Tether"]);
    assert!(listing.iter().all(|(_, s)| s == s.to_uppercase()));
}

#[tokio::test]
async fn expired_entries_are_refetched() {
    let f = fixture(Some(Duration::ZERO), false);
    f.market.top_coins(3).await.unwrap();
    f.market.top_coins(3).await.unwrap();
    assert_eq!(f.listing.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn clear_forces_a_refetch() {
    let f = fixture(None, false);
    let ticker = Ticker::from_listing_symbol("btc");
    f.market.price_history(&ticker).await.unwrap();
    f.market.price_history(&ticker).await.unwrap();
    assert_eq!(f.history.calls.load(Ordering::SeqCst), 1);

    f.market.clear();
    f.market.price_history(&ticker).await.unwrap();
    assert_eq!(f.history.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn price_history_is_sorted_unique_and_in_range() {
    let f = fixture(None, false);
    let series = f
        .market
        .price_history(&Ticker::from_listing_symbol("eth"))
        .await
        .unwrap();
    let today = TimeUtils::today_utc();

    assert_eq!(series.len(), HISTORY_DAYS as usize);
    assert_eq!(series.first_date(), Some(f.start));
    assert!(series.dates.windows(2).all(|w| w[0] < w[1]));
    assert!(series.dates.iter().all(|d| *d >= f.start && *d < today));
    assert_eq!(series.ticker.name(), "ETH-USD");
}

#[tokio::test]
async fn empty_history_is_an_error() {
    let f = fixture(None, true);
    let err = f
        .market
        .price_history(&Ticker::from_listing_symbol("btc"))
        .await
        .unwrap_err();
    assert!(matches!(err, DataError::NoData(_)));
}

#[tokio::test]
async fn coins_resolve_by_name_or_symbol() {
    let f = fixture(None, false);
    let by_name = f.market.resolve_coin(3, "Ethereum").await.unwrap();
    let by_symbol = f.market.resolve_coin(3, "eth").await.unwrap();
    assert_eq!(by_name, by_symbol);
    assert_eq!(by_name.ticker().name(), "ETH-USD");

    let err = f.market.resolve_coin(3, "Dogecoin").await.unwrap_err();
    assert!(matches!(err, DataError::UnknownCoin(name) if name == "Dogecoin"));
}

#[tokio::test]
async fn forecast_covers_history_plus_horizon() {
    let f = fixture(None, false);
    let coin = f.market.resolve_coin(3, "Bitcoin").await.unwrap();

    for years in [1, 2] {
        let data = run_forecast(&f.market, &coin, years).await.unwrap();
        assert_eq!(data.forecast.history_len, data.prices.len());
        assert_eq!(
            data.forecast.len(),
            data.prices.len() + horizon_days(years)
        );
        assert_eq!(data.forecast.rows[0].ds, f.start);
        assert!(data.forecast.rows.windows(2).all(|w| w[0].ds < w[1].ds));
        // 200 daily rows: weekly fitted, yearly not.
        assert!(data.forecast.has_weekly && !data.forecast.has_yearly);
        assert!(data.components.weekly.is_some() && data.components.yearly.is_none());
    }

    // Both horizons reuse one download.
    assert_eq!(f.history.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn horizon_does_not_change_in_sample_fit() {
    let f = fixture(None, false);
    let coin = f.market.resolve_coin(3, "Bitcoin").await.unwrap();
    let short = run_forecast(&f.market, &coin, 1).await.unwrap();
    let long = run_forecast(&f.market, &coin, 4).await.unwrap();

    let n = short.prices.len();
    for (a, b) in short.forecast.rows[..n].iter().zip(&long.forecast.rows[..n]) {
        assert_eq!(a.ds, b.ds);
        assert!((a.yhat - b.yhat).abs() < 1e-6);
    }
    // Points near the data fit closely.
    let last = &short.forecast.rows[n - 1];
    assert!((last.yhat - short.prices.close_prices[n - 1]).abs() < 5.0);
}

#[tokio::test]
async fn worker_jobs_report_errors_as_text() {
    let f = fixture(None, true);
    let coin = f.market.resolve_coin(3, "Tether").await.unwrap();
    let result = process_request(
        &f.market,
        JobRequest::Forecast {
            request_id: 7,
            coin,
            years: 1,
        },
    )
    .await;

    match result {
        JobResult::Forecast {
            request_id, result, ..
        } => {
            assert_eq!(request_id, 7);
            let message = result.unwrap_err();
            assert!(message.contains("USDT-USD"), "{}", message);
        }
        other => panic!("unexpected {:?}", other),
    }
}
