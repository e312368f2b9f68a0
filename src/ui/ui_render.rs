use {
    crate::{
        app::DashboardState,
        config::PLOT_CONFIG,
        models::DashboardData,
        ui::{
            ForecastView, RawRangeSelector, UI_TEXT,
            styles::{UiStyleExt, get_outcome_color},
            ui_plot_view::{render_components, render_forecast_chart, render_raw_chart},
            ui_tables::{render_forecast_tail, render_raw_tail},
            utils::{format_price, section_heading, spaced_separator},
        },
        utils::TimeUtils,
    },
    eframe::egui::{RichText, Spinner, Ui},
};

/// Central panel: raw data, forecast data and components, top to bottom.
pub(crate) fn render_dashboard(
    ui: &mut Ui,
    dashboard: &DashboardState,
    raw_range: &mut RawRangeSelector,
    forecast_view: &mut ForecastView,
) {
    if let Some(error) = &dashboard.error {
        ui.label_error(&UI_TEXT.error_forecast);
        ui.label(RichText::new(error).color(PLOT_CONFIG.color_text_neutral));
        spaced_separator(ui);
    }

    let Some(data) = dashboard.data.as_deref() else {
        ui.horizontal(|ui| {
            if dashboard.is_loading() {
                ui.add(Spinner::new());
                ui.label_subdued(&UI_TEXT.label_loading_data);
            } else {
                ui.label_subdued(&UI_TEXT.label_no_data);
            }
        });
        return;
    };

    render_summary(ui, data, dashboard.last_duration_ms);
    spaced_separator(ui);

    section_heading(ui, &UI_TEXT.heading_raw_data);
    render_raw_tail(ui, &data.prices);
    ui.add_space(8.0);
    render_raw_chart(ui, &data.prices, raw_range);
    spaced_separator(ui);

    section_heading(ui, &UI_TEXT.heading_forecast_data);
    render_forecast_tail(ui, &data.forecast);
    ui.add_space(8.0);
    render_forecast_chart(ui, data, forecast_view);
    spaced_separator(ui);

    section_heading(ui, &UI_TEXT.heading_components);
    render_components(ui, data);
}

fn render_summary(ui: &mut Ui, data: &DashboardData, duration_ms: Option<u128>) {
    ui.horizontal_wrapped(|ui| {
        ui.label(
            RichText::new(format!("{} ({})", data.coin.name, data.coin.ticker()))
                .strong()
                .color(PLOT_CONFIG.color_text_primary),
        );
        ui.separator();
        if let (Some(first), Some(last)) = (data.prices.first_date(), data.prices.last_date()) {
            ui.metric(
                "history",
                &format!(
                    "{} .. {}",
                    TimeUtils::format_date(first),
                    TimeUtils::format_date(last)
                ),
                PLOT_CONFIG.color_text_neutral,
            );
        }
        ui.metric(
            "days",
            &data.prices.len().to_string(),
            PLOT_CONFIG.color_text_neutral,
        );
        let last_close = data.prices.close_prices.last().copied();
        if let Some(last) = last_close {
            ui.metric("last close", &format_price(last), PLOT_CONFIG.color_info);
        }
        if let Some(end) = data.forecast.rows.last() {
            let color = last_close
                .map(|last| get_outcome_color(end.yhat - last))
                .unwrap_or(PLOT_CONFIG.color_info);
            ui.metric(
                &format!("yhat {}", TimeUtils::format_date(end.ds)),
                &format_price(end.yhat),
                color,
            );
        }
        if let Some(ms) = duration_ms {
            ui.metric(
                &UI_TEXT.label_fit_time,
                &format!("{} ms", ms),
                PLOT_CONFIG.color_text_subdued,
            );
        }
    });
}
