use {
    crate::{ui::UI_CONFIG, utils::TimeUtils},
    chrono::NaiveDate,
    eframe::egui::{Context, RichText, Ui, Visuals},
    egui_plot::{GridMark, PlotPoint},
    std::ops::RangeInclusive,
};

/// Prices span many orders of magnitude across coins (BTC vs. SHIB).
pub fn format_price(price: f64) -> String {
    let abs = price.abs();
    if !price.is_finite() {
        "-".to_string()
    } else if abs >= 1000.0 {
        format!("{:.2}", price)
    } else if abs >= 1.0 {
        format!("{:.4}", price)
    } else if abs >= 0.0001 {
        format!("{:.6}", price)
    } else {
        format!("{:.3e}", price)
    }
}

pub fn format_volume(volume: u64) -> String {
    match volume {
        v if v >= 1_000_000_000 => format!("{:.2}B", v as f64 / 1e9),
        v if v >= 1_000_000 => format!("{:.2}M", v as f64 / 1e6),
        v if v >= 1_000 => format!("{:.1}K", v as f64 / 1e3),
        v => v.to_string(),
    }
}

/// Top-level dashboard section title.
pub fn section_heading(ui: &mut Ui, text: &str) {
    ui.heading(RichText::new(text).strong().color(UI_CONFIG.colors.heading));
}

pub fn spaced_separator(ui: &mut Ui) {
    ui.add_space(UI_CONFIG.section_spacing / 2.0);
    ui.separator();
    ui.add_space(UI_CONFIG.section_spacing / 2.0);
}

/// Sets up custom visuals for the entire application
pub fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::dark();

    visuals.window_fill = UI_CONFIG.colors.central_panel;
    visuals.panel_fill = UI_CONFIG.colors.side_panel;

    // Make the widgets stand out a bit more
    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.inactive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.hovered.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.widgets.active.fg_stroke.color = UI_CONFIG.colors.heading;

    ctx.set_visuals(visuals);
}

/// Plot x coordinate of a date.
pub fn date_x(date: NaiveDate) -> f64 {
    TimeUtils::date_to_epoch_days(date)
}

/// X-axis labels for plots whose x is days since the epoch.
pub fn date_axis_formatter(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    TimeUtils::epoch_days_to_date(mark.value)
        .map(TimeUtils::format_date)
        .unwrap_or_default()
}

/// Hover text: series name, date and value.
pub fn date_value_label(name: &str, point: &PlotPoint) -> String {
    let date = TimeUtils::epoch_days_to_date(point.x)
        .map(TimeUtils::format_date)
        .unwrap_or_default();
    if name.is_empty() {
        format!("{}\n{}", date, format_price(point.y))
    } else {
        format!("{}\n{}\n{}", name, date, format_price(point.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_precision_scales_with_magnitude() {
        assert_eq!(format_price(64000.123), "64000.12");
        assert_eq!(format_price(1.5), "1.5000");
        assert_eq!(format_price(0.012345), "0.012345");
        assert_eq!(format_price(f64::NAN), "-");
    }

    #[test]
    fn volume_is_abbreviated() {
        assert_eq!(format_volume(999), "999");
        assert_eq!(format_volume(12_300), "12.3K");
        assert_eq!(format_volume(2_500_000_000), "2.50B");
    }

    #[test]
    fn date_x_round_trips_through_axis_labels() {
        let d = NaiveDate::from_ymd_opt(2021, 6, 15).unwrap();
        let x = date_x(d);
        assert_eq!(TimeUtils::epoch_days_to_date(x), Some(d));
    }
}
