use {
    chrono::NaiveDate,
    serde::{Deserialize, Serialize},
};

/// One predicted day. Seasonal columns are zero when the component is disabled.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ForecastRow {
    pub ds: NaiveDate,
    pub trend: f64,
    pub trend_lower: f64,
    pub trend_upper: f64,
    pub yearly: f64,
    pub weekly: f64,
    pub additive_terms: f64,
    pub yhat_lower: f64,
    pub yhat_upper: f64,
    pub yhat: f64,
}

impl ForecastRow {
    pub const FIELDS: [&'static str; 10] = [
        "ds",
        "trend",
        "trend_lower",
        "trend_upper",
        "yearly",
        "weekly",
        "additive_terms",
        "yhat_lower",
        "yhat_upper",
        "yhat",
    ];
}

/// Output of `FittedModel::predict`: history rows first, then the horizon.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ForecastFrame {
    pub rows: Vec<ForecastRow>,
    /// Number of leading rows whose date lies inside the training history.
    pub history_len: usize,
    pub has_yearly: bool,
    pub has_weekly: bool,
}

impl ForecastFrame {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn tail(&self, n: usize) -> &[ForecastRow] {
        let start = self.rows.len().saturating_sub(n);
        &self.rows[start..]
    }

    pub fn history(&self) -> &[ForecastRow] {
        &self.rows[..self.history_len.min(self.rows.len())]
    }

    pub fn future(&self) -> &[ForecastRow] {
        &self.rows[self.history_len.min(self.rows.len())..]
    }

    pub fn horizon_days(&self) -> usize {
        self.future().len()
    }

    pub fn last_history_date(&self) -> Option<NaiveDate> {
        self.history().last().map(|r| r.ds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(day: u32) -> ForecastRow {
        let ds = NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        ForecastRow {
            ds,
            trend: day as f64,
            trend_lower: day as f64,
            trend_upper: day as f64,
            yearly: 0.0,
            weekly: 0.0,
            additive_terms: 0.0,
            yhat_lower: day as f64,
            yhat_upper: day as f64,
            yhat: day as f64,
        }
    }

    #[test]
    fn history_and_future_split_at_history_len() {
        let frame = ForecastFrame {
            rows: (1..=10).map(row).collect(),
            history_len: 7,
            has_yearly: false,
            has_weekly: true,
        };
        assert_eq!(frame.history().len(), 7);
        assert_eq!(frame.horizon_days(), 3);
        assert_eq!(
            frame.last_history_date(),
            NaiveDate::from_ymd_opt(2024, 1, 7)
        );
        assert_eq!(frame.tail(5).first().map(|r| r.yhat), Some(6.0));
    }
}
