//! Yahoo Finance v8 chart client for daily bars.

use {
    crate::{
        config::API,
        data::{
            DataError, PriceHistoryProvider,
            http::{build_client, get_text, is_success, join_segments, parse_base_url},
        },
        domain::{DailyBar, Ticker},
        utils::TimeUtils,
    },
    async_trait::async_trait,
    chrono::NaiveDate,
    reqwest::{Request, Url},
    serde::Deserialize,
};

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    // Absent when the range holds no trading days.
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteColumns>,
    adjclose: Option<Vec<AdjCloseColumn>>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteColumns {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    // Float on some instruments, integer on others.
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseColumn {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

#[derive(Debug, Clone)]
pub struct YahooChartClient {
    base_url: Url,
    client: reqwest::Client,
}

impl YahooChartClient {
    pub fn new(base_url: &str, timeout_ms: u64) -> Result<Self, DataError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            client: build_client(timeout_ms)?,
        })
    }

    /// Daily chart request for `ticker` over `[start, end)`. The ticker is a
    /// single escaped path segment.
    pub fn chart_request(
        &self,
        ticker: &Ticker,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Request, DataError> {
        let url = join_segments(&self.base_url, &[ticker.name()]);
        let request = self
            .client
            .get(url)
            .query(&[
                ("period1", TimeUtils::date_to_epoch_sec(start).to_string()),
                ("period2", TimeUtils::date_to_epoch_sec(end).to_string()),
                ("interval", API.history.interval.to_string()),
                ("includeAdjustedClose", "true".to_string()),
            ])
            .build()?;
        Ok(request)
    }
}

/// Parses a chart response into bars with `start <= date < end`.
///
/// Rows with any missing OHLC value are skipped, a missing volume counts as
/// zero and a missing adjusted close falls back to the close.
pub fn parse_chart(
    body: &str,
    ticker: &Ticker,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<DailyBar>, DataError> {
    let response: ChartResponse = serde_json::from_str(body)?;

    if let Some(err) = response.chart.error {
        return Err(DataError::Api {
            code: err.code,
            description: err.description,
        });
    }

    let Some(data) = response.chart.result.and_then(|r| r.into_iter().next()) else {
        return Err(DataError::NoData(ticker.to_string()));
    };
    let timestamps = data.timestamp.unwrap_or_default();
    let quote = data.indicators.quote.into_iter().next().unwrap_or_default();
    let adj = data
        .indicators
        .adjclose
        .and_then(|v| v.into_iter().next())
        .map(|a| a.adjclose)
        .unwrap_or_default();

    let at = |col: &[Option<f64>], i: usize| col.get(i).copied().flatten();

    let mut bars = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let Some(date) = TimeUtils::epoch_sec_to_date(ts) else {
            continue;
        };
        if date < start || date >= end {
            continue;
        }
        let (Some(open), Some(high), Some(low), Some(close)) = (
            at(&quote.open, i),
            at(&quote.high, i),
            at(&quote.low, i),
            at(&quote.close, i),
        ) else {
            continue;
        };
        let adj_close = at(&adj, i).unwrap_or(close);
        let volume = at(&quote.volume, i).unwrap_or(0.0).max(0.0) as u64;
        bars.push(DailyBar::new(date, open, high, low, close, adj_close, volume));
    }
    Ok(bars)
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PriceHistoryProvider for YahooChartClient {
    async fn fetch_daily_bars(
        &self,
        ticker: &Ticker,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyBar>, DataError> {
        let request = self.chart_request(ticker, start, end)?;
        let (url, status, body) = get_text(&self.client, request).await?;
        match parse_chart(&body, ticker, start, end) {
            // Unknown symbols come back as 404 with a chart.error body.
            Err(e @ DataError::Api { .. }) => Err(e),
            Ok(bars) if is_success(status) => Ok(bars),
            Err(e) if is_success(status) => Err(e),
            _ => Err(DataError::Status { url, status }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn ticker() -> Ticker {
        Ticker::from_listing_symbol("btc")
    }

    // 2024-01-01 .. 2024-01-04 at 00:00 UTC, second row has a null close.
    const BODY: &str = r#"{"chart":{"result":[{
        "meta":{"symbol":"BTC-USD"},
        "timestamp":[1704067200,1704153600,1704240000,1704326400],
        "indicators":{
            "quote":[{
                "open":[42000.0,44000.0,44900.0,42800.0],
                "high":[44200.0,45800.0,45500.0,44700.0],
                "low":[41900.0,44000.0,40800.0,42600.0],
                "close":[44100.0,null,42800.0,44100.0],
                "volume":[1000,2000,null,4000]
            }],
            "adjclose":[{"adjclose":[44100.0,null,42800.0,44100.0]}]
        }
    }],"error":null}}"#;

    #[test]
    fn skips_null_rows_and_keeps_range() {
        let bars = parse_chart(BODY, &ticker(), d(2024, 1, 1), d(2024, 1, 4)).unwrap();
        let dates: Vec<_> = bars.iter().map(|b| b.date).collect();
        // 01-02 has a null close, 01-04 is the exclusive end.
        assert_eq!(dates, vec![d(2024, 1, 1), d(2024, 1, 3)]);
        assert_eq!(bars[1].volume, 0);
        assert!(
            bars.iter()
                .all(|b| b.date >= d(2024, 1, 1) && b.date < d(2024, 1, 4))
        );
    }

    #[test]
    fn chart_error_maps_to_api_error() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        assert!(matches!(
            parse_chart(body, &ticker(), d(2024, 1, 1), d(2024, 2, 1)),
            Err(DataError::Api { .. })
        ));
    }

    #[test]
    fn empty_result_is_no_data() {
        let body = r#"{"chart":{"result":[],"error":null}}"#;
        assert!(matches!(
            parse_chart(body, &ticker(), d(2024, 1, 1), d(2024, 2, 1)),
            Err(DataError::NoData(_))
        ));
    }

    fn client() -> YahooChartClient {
        YahooChartClient::new("https://charts.example.com/v8/finance/chart", 1_000).unwrap()
    }

    #[test]
    fn chart_request_uses_epoch_bounds() {
        let request = client()
            .chart_request(&ticker(), d(2015, 1, 1), d(2015, 1, 2))
            .unwrap();
        assert_eq!(
            request.url().as_str(),
            "https://charts.example.com/v8/finance/chart/BTC-USD?period1=1420070400&period2=1420156800&interval=1d&includeAdjustedClose=true"
        );
    }

    #[test]
    fn odd_symbols_stay_in_one_path_segment() {
        for (symbol, segment) in [("a#b", "A%23B-USD"), ("x/y", "X%2FY-USD"), ("c?d", "C%3FD-USD")] {
            let request = client()
                .chart_request(
                    &Ticker::from_listing_symbol(symbol),
                    d(2015, 1, 1),
                    d(2015, 1, 2),
                )
                .unwrap();
            let url = request.url();
            assert_eq!(url.path(), format!("/v8/finance/chart/{}", segment));
            assert_eq!(url.fragment(), None);
            let params: Vec<String> = url.query_pairs().map(|(k, _)| k.into_owned()).collect();
            assert_eq!(params, ["period1", "period2", "interval", "includeAdjustedClose"]);
        }
    }
}
