use {
    crate::{
        models::ForecastFrame,
        ui::{UI_TEXT, utils::date_x},
        utils::TimeUtils,
    },
    chrono::NaiveDate,
    eframe::egui::{Slider, Ui},
    strum_macros::{Display, EnumIter},
};

/// Index window over the raw price history, standing in for a range slider.
///
/// `None` ends mean "track the edge", so a refreshed series keeps showing
/// everything until the user drags a handle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawRangeSelector {
    from: Option<usize>,
    to: Option<usize>,
}

impl RawRangeSelector {
    /// Inclusive index window clamped to a series of `len` rows.
    pub fn resolve(&self, len: usize) -> Option<(usize, usize)> {
        if len == 0 {
            return None;
        }
        let last = len - 1;
        let to = self.to.unwrap_or(last).min(last);
        let from = self.from.unwrap_or(0).min(to);
        Some((from, to))
    }

    pub fn is_full(&self, len: usize) -> bool {
        self.resolve(len)
            .is_some_and(|(from, to)| from == 0 && to + 1 == len)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Two index sliders labelled with the dates they point at.
    pub fn show(&mut self, ui: &mut Ui, dates: &[NaiveDate]) {
        let Some((mut from, mut to)) = self.resolve(dates.len()) else {
            return;
        };
        let last = dates.len() - 1;

        ui.horizontal(|ui| {
            ui.label(&UI_TEXT.label_range_from);
            let from_changed = ui
                .add(
                    Slider::new(&mut from, 0..=last)
                        .show_value(false)
                        .custom_formatter(|v, _| format_index(dates, v)),
                )
                .changed();
            ui.label(TimeUtils::format_date(dates[from]));

            ui.add_space(12.0);
            ui.label(&UI_TEXT.label_range_to);
            let to_changed = ui
                .add(
                    Slider::new(&mut to, 0..=last)
                        .show_value(false)
                        .custom_formatter(|v, _| format_index(dates, v)),
                )
                .changed();
            ui.label(TimeUtils::format_date(dates[to]));

            if from_changed || to_changed {
                // Handles may not cross.
                if from_changed && from > to {
                    to = from;
                } else if to_changed && to < from {
                    from = to;
                }
                self.from = (from > 0).then_some(from);
                self.to = (to < last).then_some(to);
            }

            if !self.is_full(dates.len()) && ui.small_button(RangePreset::All.to_string()).clicked() {
                self.reset();
            }
        });
    }
}

fn format_index(dates: &[NaiveDate], v: f64) -> String {
    dates
        .get(v.max(0.0) as usize)
        .map(|d| TimeUtils::format_date(*d))
        .unwrap_or_default()
}

/// Zoom buttons on the forecast chart, counted back from its last date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumIter, Display)]
pub enum RangePreset {
    #[strum(to_string = "1w")]
    Week,
    #[strum(to_string = "1m")]
    Month,
    #[strum(to_string = "6m")]
    HalfYear,
    #[strum(to_string = "1y")]
    Year,
    #[default]
    #[strum(to_string = "all")]
    All,
}

impl RangePreset {
    pub fn days(self) -> Option<i64> {
        match self {
            Self::Week => Some(7),
            Self::Month => Some(30),
            Self::HalfYear => Some(182),
            Self::Year => Some(365),
            Self::All => None,
        }
    }
}

/// Per-session view state of the forecast chart.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForecastView {
    pub preset: RangePreset,
    /// Set when the preset changed and the plot bounds must be pushed once.
    pub(crate) dirty: bool,
}

impl ForecastView {
    pub fn select(&mut self, preset: RangePreset) {
        self.preset = preset;
        self.dirty = true;
    }

    /// X bounds (epoch days) for the current preset, `None` meaning auto.
    pub fn x_bounds(&self, frame: &ForecastFrame) -> Option<(f64, f64)> {
        let last = frame.rows.last()?.ds;
        let first = frame.rows.first()?.ds;
        let days = self.preset.days()?;
        let start = last
            .checked_sub_signed(chrono::Duration::days(days))
            .unwrap_or(first)
            .max(first);
        Some((date_x(start), date_x(last)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ForecastRow;
    use strum::IntoEnumIterator;

    fn frame(days: i64) -> ForecastFrame {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let rows = (0..days)
            .map(|i| ForecastRow {
                ds: start + chrono::Duration::days(i),
                trend: 1.0,
                trend_lower: 1.0,
                trend_upper: 1.0,
                yearly: 0.0,
                weekly: 0.0,
                additive_terms: 0.0,
                yhat_lower: 1.0,
                yhat_upper: 1.0,
                yhat: 1.0,
            })
            .collect();
        ForecastFrame {
            rows,
            history_len: days as usize,
            has_yearly: false,
            has_weekly: false,
        }
    }

    #[test]
    fn default_range_covers_everything() {
        let r = RawRangeSelector::default();
        assert_eq!(r.resolve(10), Some((0, 9)));
        assert!(r.is_full(10));
        assert_eq!(r.resolve(0), None);
    }

    #[test]
    fn stale_indices_are_clamped() {
        let r = RawRangeSelector {
            from: Some(50),
            to: Some(80),
        };
        assert_eq!(r.resolve(20), Some((19, 19)));
        assert_eq!(r.resolve(100), Some((50, 80)));
    }

    #[test]
    fn presets_are_labelled_like_range_buttons() {
        let labels: Vec<String> = RangePreset::iter().map(|p| p.to_string()).collect();
        assert_eq!(labels, vec!["1w", "1m", "6m", "1y", "all"]);
    }

    #[test]
    fn preset_window_ends_at_last_row() {
        let f = frame(400);
        let mut view = ForecastView::default();
        assert_eq!(view.x_bounds(&f), None);

        view.select(RangePreset::Week);
        let (lo, hi) = view.x_bounds(&f).unwrap();
        assert_eq!(hi - lo, 7.0);
        assert_eq!(hi, date_x(f.rows[399].ds));

        // A window longer than the data starts at the first row.
        let short = frame(5);
        view.select(RangePreset::Year);
        let (lo, _) = view.x_bounds(&short).unwrap();
        assert_eq!(lo, date_x(short.rows[0].ds));
    }
}
