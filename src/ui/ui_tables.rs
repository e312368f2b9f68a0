use {
    crate::{
        config::{PLOT_CONFIG, TABLE_TAIL_ROWS},
        domain::BarType,
        models::{ForecastFrame, ForecastRow, PriceSeries},
        ui::{
            UI_CONFIG, UI_TEXT,
            utils::{format_price, format_volume},
        },
        utils::TimeUtils,
    },
    eframe::egui::{RichText, Ui},
    egui_extras::{Column, TableBuilder},
};

const HEADER_HEIGHT: f32 = 20.0;

/// Last rows of the raw daily bars.
pub(crate) fn render_raw_tail(ui: &mut Ui, prices: &PriceSeries) {
    let start = prices.len().saturating_sub(TABLE_TAIL_ROWS);
    let headers = [
        &UI_TEXT.col_date,
        &UI_TEXT.col_open,
        &UI_TEXT.col_high,
        &UI_TEXT.col_low,
        &UI_TEXT.col_close,
        &UI_TEXT.col_adj_close,
        &UI_TEXT.col_volume,
    ];

    TableBuilder::new(ui)
        .id_salt("raw_tail")
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(90.0))
        .columns(Column::auto().at_least(80.0), headers.len() - 1)
        .header(HEADER_HEIGHT, |mut header| {
            for h in headers {
                header.col(|ui| {
                    ui.label(RichText::new(h).strong());
                });
            }
        })
        .body(|body| {
            body.rows(UI_CONFIG.table_row_height, prices.len() - start, |mut row| {
                let bar = prices.get_bar(start + row.index());
                row.col(|ui| {
                    ui.label(TimeUtils::format_date(bar.date));
                });
                for v in [bar.open, bar.high, bar.low] {
                    row.col(|ui| {
                        ui.monospace(format_price(v));
                    });
                }
                let close_color = match bar.bar_type() {
                    BarType::Bullish => PLOT_CONFIG.color_profit,
                    BarType::Bearish => PLOT_CONFIG.color_loss,
                };
                row.col(|ui| {
                    ui.label(RichText::new(format_price(bar.close)).monospace().color(close_color));
                });
                row.col(|ui| {
                    ui.monospace(format_price(bar.adj_close));
                });
                row.col(|ui| {
                    ui.monospace(format_volume(bar.volume));
                });
            });
        });
}

/// Last rows of the forecast frame, every column.
pub(crate) fn render_forecast_tail(ui: &mut Ui, frame: &ForecastFrame) {
    let rows = frame.tail(TABLE_TAIL_ROWS);
    let value_columns = forecast_columns(frame);

    TableBuilder::new(ui)
        .id_salt("forecast_tail")
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(90.0))
        .columns(Column::auto().at_least(80.0), value_columns.len())
        .header(HEADER_HEIGHT, |mut header| {
            header.col(|ui| {
                ui.label(RichText::new("ds").strong());
            });
            for (name, _) in &value_columns {
                header.col(|ui| {
                    ui.label(RichText::new(*name).strong());
                });
            }
        })
        .body(|body| {
            body.rows(UI_CONFIG.table_row_height, rows.len(), |mut row| {
                let r = &rows[row.index()];
                row.col(|ui| {
                    ui.label(TimeUtils::format_date(r.ds));
                });
                for (_, value) in &value_columns {
                    row.col(|ui| {
                        ui.monospace(format_price(value(r)));
                    });
                }
            });
        });
}

type ColumnGetter = fn(&ForecastRow) -> f64;

/// Value columns in display order. Seasonal ones only when the model fitted them.
fn forecast_columns(frame: &ForecastFrame) -> Vec<(&'static str, ColumnGetter)> {
    let base: [(&'static str, ColumnGetter); 6] = [
        ("trend", |r| r.trend),
        ("yhat_lower", |r| r.yhat_lower),
        ("yhat_upper", |r| r.yhat_upper),
        ("trend_lower", |r| r.trend_lower),
        ("trend_upper", |r| r.trend_upper),
        ("additive_terms", |r| r.additive_terms),
    ];
    let mut cols = base.to_vec();
    if frame.has_weekly {
        cols.push(("weekly", |r: &ForecastRow| r.weekly));
    }
    if frame.has_yearly {
        cols.push(("yearly", |r: &ForecastRow| r.yearly));
    }
    cols.push(("yhat", |r: &ForecastRow| r.yhat));
    cols
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seasonal_columns_follow_the_fit() {
        let mut frame = ForecastFrame::default();
        let names = |f: &ForecastFrame| -> Vec<&str> {
            forecast_columns(f).into_iter().map(|(n, _)| n).collect()
        };
        assert!(!names(&frame).contains(&"yearly"));
        assert_eq!(names(&frame).last(), Some(&"yhat"));

        frame.has_yearly = true;
        frame.has_weekly = true;
        let with_seasons = names(&frame);
        assert!(with_seasons.contains(&"yearly") && with_seasons.contains(&"weekly"));
        assert_eq!(with_seasons.len(), 9);
    }
}
