use {
    crate::domain::{DailyBar, Ticker},
    chrono::NaiveDate,
    serde::{Deserialize, Serialize},
};

/// Daily price history for one ticker, stored column-wise.
///
/// Dates are strictly increasing; every column has the same length.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PriceSeries {
    pub ticker: Ticker,
    pub dates: Vec<NaiveDate>,
    pub open_prices: Vec<f64>,
    pub high_prices: Vec<f64>,
    pub low_prices: Vec<f64>,
    pub close_prices: Vec<f64>,
    pub adj_close_prices: Vec<f64>,
    pub volumes: Vec<u64>,
}

/// The two-column `(ds, y)` frame a forecast model is fitted on.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct TrainingSeries {
    pub ds: Vec<NaiveDate>,
    pub y: Vec<f64>,
}

impl TrainingSeries {
    pub const FIELDS: [&'static str; 2] = ["ds", "y"];

    pub fn new(ds: Vec<NaiveDate>, y: Vec<f64>) -> Self {
        debug_assert_eq!(ds.len(), y.len());
        Self { ds, y }
    }

    pub fn len(&self) -> usize {
        self.ds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ds.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.ds.iter().copied().zip(self.y.iter().copied())
    }
}

impl PriceSeries {
    /// Builds the series from bars in any order. Bars are sorted by date and a
    /// repeated date keeps the last bar seen.
    pub fn from_bars(ticker: Ticker, mut bars: Vec<DailyBar>) -> Self {
        // Stable sort, so among equal dates the later input stays later.
        bars.sort_by_key(|b| b.date);
        let mut deduped: Vec<DailyBar> = Vec::with_capacity(bars.len());
        for bar in bars {
            match deduped.last_mut() {
                Some(last) if last.date == bar.date => *last = bar,
                _ => deduped.push(bar),
            }
        }

        let len = deduped.len();
        let mut series = Self {
            ticker,
            dates: Vec::with_capacity(len),
            open_prices: Vec::with_capacity(len),
            high_prices: Vec::with_capacity(len),
            low_prices: Vec::with_capacity(len),
            close_prices: Vec::with_capacity(len),
            adj_close_prices: Vec::with_capacity(len),
            volumes: Vec::with_capacity(len),
        };

        for b in deduped {
            series.dates.push(b.date);
            series.open_prices.push(b.open);
            series.high_prices.push(b.high);
            series.low_prices.push(b.low);
            series.close_prices.push(b.close);
            series.adj_close_prices.push(b.adj_close);
            series.volumes.push(b.volume);
        }
        series
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    pub fn get_bar(&self, idx: usize) -> DailyBar {
        DailyBar::new(
            self.dates[idx],
            self.open_prices[idx],
            self.high_prices[idx],
            self.low_prices[idx],
            self.close_prices[idx],
            self.adj_close_prices[idx],
            self.volumes[idx],
        )
    }

    /// The last `n` bars, oldest first.
    pub fn tail(&self, n: usize) -> Vec<DailyBar> {
        let start = self.len().saturating_sub(n);
        (start..self.len()).map(|i| self.get_bar(i)).collect()
    }

    /// Projects to `(ds = date, y = close)`. Row count is preserved.
    pub fn training_series(&self) -> TrainingSeries {
        TrainingSeries::new(self.dates.clone(), self.close_prices.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(y: i32, m: u32, d: u32, close: f64) -> DailyBar {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        DailyBar::new(date, close - 1.0, close + 1.0, close - 2.0, close, close, 10)
    }

    #[test]
    fn from_bars_sorts_and_keeps_last_duplicate() {
        let series = PriceSeries::from_bars(
            Ticker::from_listing_symbol("btc"),
            vec![
                bar(2024, 1, 3, 30.0),
                bar(2024, 1, 1, 10.0),
                bar(2024, 1, 2, 20.0),
                bar(2024, 1, 2, 21.0),
            ],
        );

        assert_eq!(series.len(), 3);
        assert!(series.dates.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(series.close_prices, vec![10.0, 21.0, 30.0]);
    }

    #[test]
    fn training_series_has_two_fields_and_same_rows() {
        let series = PriceSeries::from_bars(
            Ticker::from_listing_symbol("eth"),
            (1..=20).map(|d| bar(2024, 2, d, d as f64)).collect(),
        );
        let training = series.training_series();

        assert_eq!(TrainingSeries::FIELDS.len(), 2);
        assert_eq!(training.len(), series.len());
        assert_eq!(training.ds, series.dates);
        assert_eq!(training.y, series.close_prices);
    }

    #[test]
    fn tail_returns_last_rows_oldest_first() {
        let series = PriceSeries::from_bars(
            Ticker::from_listing_symbol("eth"),
            (1..=8).map(|d| bar(2024, 3, d, d as f64)).collect(),
        );
        let tail = series.tail(5);
        assert_eq!(tail.len(), 5);
        assert_eq!(tail[0].close, 4.0);
        assert_eq!(tail[4].close, 8.0);
        assert_eq!(series.tail(100).len(), 8);
    }
}
