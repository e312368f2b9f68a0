use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// `std::time::Instant` is unavailable on wasm32, web-time covers both targets.
pub type AppInstant = web_time::Instant;

pub struct TimeUtils;

impl TimeUtils {
    pub const SECS_IN_D: i64 = 86_400;
    pub const MS_IN_D: i64 = Self::SECS_IN_D * 1000;
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d";
    pub const UNIX_EPOCH_DATE: NaiveDate = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();

    pub fn parse_date(text: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(text.trim(), Self::STANDARD_TIME_FORMAT)
            .with_context(|| format!("invalid date '{}', expected YYYY-MM-DD", text))
    }

    pub fn today_utc() -> NaiveDate {
        Utc::now().date_naive()
    }

    /// Midnight UTC of `date` as unix seconds.
    pub fn date_to_epoch_sec(date: NaiveDate) -> i64 {
        (date - Self::UNIX_EPOCH_DATE).num_days() * Self::SECS_IN_D
    }

    /// UTC calendar date containing `epoch_sec`.
    pub fn epoch_sec_to_date(epoch_sec: i64) -> Option<NaiveDate> {
        DateTime::from_timestamp(epoch_sec, 0).map(|dt| dt.date_naive())
    }

    /// Days since 1970-01-01, as a float for plotting and Fourier terms.
    pub fn date_to_epoch_days(date: NaiveDate) -> f64 {
        (date - Self::UNIX_EPOCH_DATE).num_days() as f64
    }

    pub fn epoch_days_to_date(days: f64) -> Option<NaiveDate> {
        Self::UNIX_EPOCH_DATE.checked_add_signed(chrono::Duration::days(days.round() as i64))
    }

    pub fn format_date(date: NaiveDate) -> String {
        date.format(Self::STANDARD_TIME_FORMAT).to_string()
    }

    /// Short label for plot axes ("Jan 2021").
    pub fn format_month(date: NaiveDate) -> String {
        date.format("%b %Y").to_string()
    }

    pub fn weekday_name(date: NaiveDate) -> &'static str {
        match date.weekday() {
            chrono::Weekday::Mon => "Monday",
            chrono::Weekday::Tue => "Tuesday",
            chrono::Weekday::Wed => "Wednesday",
            chrono::Weekday::Thu => "Thursday",
            chrono::Weekday::Fri => "Friday",
            chrono::Weekday::Sat => "Saturday",
            chrono::Weekday::Sun => "Sunday",
        }
    }
}

pub fn format_duration(ms: i64) -> String {
    let secs = ms / 1000;
    if secs < 60 {
        return format!("{}s", secs);
    }
    let mins = secs / 60;
    if mins < 60 {
        return format!("{}m", mins);
    }
    let hours = mins / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }
    let days = hours / 24;
    if days < 30 {
        return format!("{}d", days);
    }
    let months = days / 30;
    if months < 12 {
        return format!("{}M", months);
    }
    let years = months / 12;
    let rem_months = months % 12;
    format!("{}Y {}M", years, rem_months)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_round_trip_is_midnight_utc() {
        let d = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
        let secs = TimeUtils::date_to_epoch_sec(d);
        assert_eq!(secs, 1_420_070_400);
        assert_eq!(TimeUtils::epoch_sec_to_date(secs + 3600), Some(d));
        assert_eq!(TimeUtils::date_to_epoch_days(d), 16436.0);
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(TimeUtils::parse_date("2015-01-01").is_ok());
        assert!(TimeUtils::parse_date("01/01/2015").is_err());
    }

    #[test]
    fn format_duration_scales_units() {
        assert_eq!(format_duration(45_000), "45s");
        assert_eq!(format_duration(3 * 3_600_000), "3h");
        assert_eq!(format_duration(400 * TimeUtils::MS_IN_D), "1Y 1M");
    }
}
