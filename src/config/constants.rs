use std::ops::RangeInclusive;

// Top Level Constants

/// First day of requested price history (inclusive).
pub const HISTORY_START: &str = "2015-01-01";

/// How many coins the dropdown offers (top N by market cap).
pub const DEFAULT_COIN_LIMIT: usize = 300;

/// Forecast horizon slider bounds, in years.
pub const HORIZON_YEARS: RangeInclusive<u32> = 1..=4;

/// A horizon year is always 365 days, leap years included.
pub const DAYS_PER_YEAR: u32 = 365;

/// Rows shown in the raw data and forecast tables.
pub const TABLE_TAIL_ROWS: usize = 5;

pub fn horizon_days(years: u32) -> usize {
    (years * DAYS_PER_YEAR) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizon_days_is_years_times_365() {
        assert_eq!(horizon_days(1), 365);
        assert_eq!(horizon_days(4), 1460);
        assert!(HORIZON_YEARS.contains(&1) && HORIZON_YEARS.contains(&4));
        assert!(!HORIZON_YEARS.contains(&5));
    }
}
