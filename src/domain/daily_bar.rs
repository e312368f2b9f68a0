use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Direction of a daily bar, close against open.
#[derive(Debug, PartialEq)]
pub enum BarType {
    Bullish,
    Bearish,
}

/// One daily OHLC bar as returned by the history provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    pub date: NaiveDate,

    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Split/dividend adjusted close. Same as `close` for crypto.
    pub adj_close: f64,

    pub volume: u64,
}

impl DailyBar {
    // A constructor for convenience
    pub fn new(
        date: NaiveDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        adj_close: f64,
        volume: u64,
    ) -> Self {
        DailyBar {
            date,
            open,
            high,
            low,
            close,
            adj_close,
            volume,
        }
    }

    pub fn bar_type(&self) -> BarType {
        if self.close >= self.open {
            BarType::Bullish
        } else {
            BarType::Bearish
        }
    }
}
