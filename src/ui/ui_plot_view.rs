use {
    crate::{
        config::PLOT_CONFIG,
        models::{DashboardData, PriceSeries},
        ui::{
            ForecastView, RawRangeSelector, UI_TEXT,
            plot_layers::{
                ChangepointLayer, ForecastLineLayer, ForecastSeries, HistoryEndLayer, LayerContext, ObservedLayer,
                PlotLayer, UncertaintyBandLayer,
            },
            styles::UiStyleExt,
            ui_range::RangePreset,
            ui_text::forecast_plot_title,
            utils::{date_axis_formatter, date_value_label, date_x, format_price},
        },
        utils::{TimeUtils, finite_min_max, padded_range},
    },
    chrono::NaiveDate,
    eframe::egui::{FontId, Ui, Vec2b},
    egui_plot::{GridMark, Legend, Line, Plot, PlotPoints},
    std::ops::RangeInclusive,
    strum::IntoEnumIterator,
};

fn price_axis_formatter(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    format_price(mark.value)
}

// ============================================================================
// RAW SERIES
// ============================================================================

/// Open and close over the selected window, with the range sliders below.
pub(crate) fn render_raw_chart(ui: &mut Ui, prices: &PriceSeries, range: &mut RawRangeSelector) {
    ui.label_subheader(&UI_TEXT.raw_chart_title);
    let Some((from, to)) = range.resolve(prices.len()) else {
        ui.label_subdued(&UI_TEXT.label_no_data);
        return;
    };

    let window = from..=to;
    let open: Vec<[f64; 2]> = window
        .clone()
        .map(|i| [date_x(prices.dates[i]), prices.open_prices[i]])
        .collect();
    let close: Vec<[f64; 2]> = window
        .clone()
        .map(|i| [date_x(prices.dates[i]), prices.close_prices[i]])
        .collect();

    let x_lo = date_x(prices.dates[from]);
    // A single day still needs some width.
    let x_hi = date_x(prices.dates[to]).max(x_lo + 1.0);
    let y_bounds = finite_min_max(
        prices.open_prices[window.clone()]
            .iter()
            .chain(&prices.close_prices[window]),
    )
    .map(|(lo, hi)| padded_range(lo, hi, PLOT_CONFIG.plot_y_padding_pct));

    Plot::new(("raw_plot", prices.ticker.name()))
        .height(PLOT_CONFIG.main_plot_height)
        .legend(Legend::default())
        .x_axis_formatter(date_axis_formatter)
        .y_axis_formatter(price_axis_formatter)
        .label_formatter(date_value_label)
        .allow_double_click_reset(false)
        .allow_scroll(false)
        .allow_drag(Vec2b { x: false, y: true })
        .allow_zoom(Vec2b { x: false, y: true })
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds_x(x_lo..=x_hi);
            if let Some((y_lo, y_hi)) = y_bounds {
                plot_ui.set_plot_bounds_y(y_lo..=y_hi);
            }
            plot_ui.line(
                Line::new(UI_TEXT.series_open.as_str(), PlotPoints::new(open))
                    .color(PLOT_CONFIG.open_line_color)
                    .width(PLOT_CONFIG.raw_line_width),
            );
            plot_ui.line(
                Line::new(UI_TEXT.series_close.as_str(), PlotPoints::new(close))
                    .color(PLOT_CONFIG.close_line_color)
                    .width(PLOT_CONFIG.raw_line_width),
            );
        });

    range.show(ui, &prices.dates);
}

// ============================================================================
// FORECAST
// ============================================================================

pub(crate) fn render_forecast_chart(ui: &mut Ui, data: &DashboardData, view: &mut ForecastView) {
    ui.label_subheader(forecast_plot_title(data.years));

    ui.horizontal(|ui| {
        for preset in RangePreset::iter() {
            if ui
                .interactive_label(
                    &preset.to_string(),
                    view.preset == preset,
                    PLOT_CONFIG.color_text_neutral,
                    FontId::proportional(13.0),
                )
                .clicked()
            {
                view.select(preset);
            }
        }
    });

    let frame = &data.forecast;
    if frame.is_empty() {
        ui.label_subdued(&UI_TEXT.label_no_data);
        return;
    }

    // Only computed when a preset was just picked; otherwise the user owns the view.
    let pending_bounds = view.dirty.then(|| forecast_window_bounds(data, view));
    view.dirty = false;

    let ctx = LayerContext {
        frame,
        prices: &data.prices,
    };
    let layers: [&dyn PlotLayer; 4] = [
        &UncertaintyBandLayer(ForecastSeries::Yhat),
        &ForecastLineLayer(ForecastSeries::Yhat),
        &ObservedLayer,
        &HistoryEndLayer,
    ];

    Plot::new(("forecast_plot", data.coin.symbol.as_str(), data.years))
        .height(PLOT_CONFIG.main_plot_height)
        .legend(Legend::default())
        .x_axis_formatter(date_axis_formatter)
        .y_axis_formatter(price_axis_formatter)
        .label_formatter(date_value_label)
        .show(ui, |plot_ui| {
            if let Some(Some(((x_lo, x_hi), (y_lo, y_hi)))) = pending_bounds {
                plot_ui.set_plot_bounds_x(x_lo..=x_hi);
                plot_ui.set_plot_bounds_y(y_lo..=y_hi);
            }
            for layer in layers {
                layer.render(plot_ui, &ctx);
            }
        });
}

/// X window for the active preset and the Y span of everything inside it.
fn forecast_window_bounds(data: &DashboardData, view: &ForecastView) -> Option<((f64, f64), (f64, f64))> {
    let frame = &data.forecast;
    let (x_lo, x_hi) = view.x_bounds(frame).or_else(|| {
        let first = frame.rows.first()?;
        let last = frame.rows.last()?;
        Some((date_x(first.ds), date_x(last.ds)))
    })?;

    let in_window = |d: &NaiveDate| (x_lo..=x_hi).contains(&date_x(*d));
    let band = frame
        .rows
        .iter()
        .filter(|r| in_window(&r.ds))
        .flat_map(|r| [r.yhat_lower, r.yhat_upper]);
    let observed = data
        .prices
        .dates
        .iter()
        .zip(&data.prices.close_prices)
        .filter(|(d, _)| in_window(d))
        .map(|(_, y)| *y);
    let values: Vec<f64> = band.chain(observed).collect();
    let (y_lo, y_hi) = finite_min_max(&values)?;

    Some((
        (x_lo, x_hi.max(x_lo + 1.0)),
        padded_range(y_lo, y_hi, PLOT_CONFIG.plot_y_padding_pct),
    ))
}

// ============================================================================
// COMPONENTS
// ============================================================================

pub(crate) fn render_components(ui: &mut Ui, data: &DashboardData) {
    let ctx = LayerContext {
        frame: &data.forecast,
        prices: &data.prices,
    };

    ui.label_subdued(&UI_TEXT.component_trend);
    Plot::new(("trend_plot", data.coin.symbol.as_str()))
        .height(PLOT_CONFIG.component_plot_height)
        .x_axis_formatter(date_axis_formatter)
        .y_axis_formatter(price_axis_formatter)
        .label_formatter(date_value_label)
        .show(ui, |plot_ui| {
            UncertaintyBandLayer(ForecastSeries::Trend).render(plot_ui, &ctx);
            ForecastLineLayer(ForecastSeries::Trend).render(plot_ui, &ctx);
            ChangepointLayer(&data.changepoints).render(plot_ui, &ctx);
        });

    if let Some(yearly) = &data.components.yearly {
        ui.label_subdued(&UI_TEXT.component_yearly);
        profile_plot(ui, "yearly_plot", yearly, TimeUtils::format_month);
    }
    if let Some(weekly) = &data.components.weekly {
        ui.label_subdued(&UI_TEXT.component_weekly);
        profile_plot(ui, "weekly_plot", weekly, |d| TimeUtils::weekday_name(d).to_string());
    }
}

fn profile_plot(
    ui: &mut Ui,
    id: &str,
    profile: &[(NaiveDate, f64)],
    label: fn(NaiveDate) -> String,
) {
    let points: Vec<[f64; 2]> = profile.iter().map(|(d, v)| [date_x(*d), *v]).collect();
    Plot::new(id)
        .height(PLOT_CONFIG.component_plot_height)
        .x_axis_formatter(move |mark, _| {
            TimeUtils::epoch_days_to_date(mark.value)
                .map(label)
                .unwrap_or_default()
        })
        .y_axis_formatter(price_axis_formatter)
        .label_formatter(move |_, point| {
            let day = TimeUtils::epoch_days_to_date(point.x)
                .map(label)
                .unwrap_or_default();
            format!("{}\n{}", day, format_price(point.y))
        })
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new("", PlotPoints::new(points))
                    .color(PLOT_CONFIG.component_line_color)
                    .width(PLOT_CONFIG.component_line_width),
            );
        });
}
