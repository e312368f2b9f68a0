use {
    crate::{
        config::PLOT_CONFIG,
        models::{ForecastFrame, ForecastRow, PriceSeries},
        ui::{UI_TEXT, utils::date_x},
    },
    chrono::NaiveDate,
    eframe::egui::Stroke,
    egui_plot::{Line, LineStyle, PlotPoints, PlotUi, Points, Polygon, VLine},
};

/// Upper bound on band quads per frame; longer frames are strided.
const MAX_BAND_QUADS: usize = 1_500;

pub struct LayerContext<'a> {
    pub frame: &'a ForecastFrame,
    pub prices: &'a PriceSeries,
}

pub trait PlotLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext);
}

/// Which forecast column a layer draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastSeries {
    Yhat,
    Trend,
}

impl ForecastSeries {
    fn center(self, row: &ForecastRow) -> f64 {
        match self {
            Self::Yhat => row.yhat,
            Self::Trend => row.trend,
        }
    }

    fn bounds(self, row: &ForecastRow) -> (f64, f64) {
        match self {
            Self::Yhat => (row.yhat_lower, row.yhat_upper),
            Self::Trend => (row.trend_lower, row.trend_upper),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Yhat => &UI_TEXT.series_predicted,
            Self::Trend => &UI_TEXT.component_trend,
        }
    }
}

// ============================================================================
// 1. UNCERTAINTY BAND
// ============================================================================
pub struct UncertaintyBandLayer(pub ForecastSeries);

impl PlotLayer for UncertaintyBandLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        let rows = &ctx.frame.rows;
        if rows.len() < 2 {
            return;
        }
        // One convex quad per step; a single polygon over the whole band
        // would be concave and egui fills those incorrectly.
        let step = rows.len().div_ceil(MAX_BAND_QUADS).max(1);
        let mut i = 0;
        while i + 1 < rows.len() {
            let j = (i + step).min(rows.len() - 1);
            let (a, b) = (&rows[i], &rows[j]);
            let (a_lo, a_hi) = self.0.bounds(a);
            let (b_lo, b_hi) = self.0.bounds(b);
            let (xa, xb) = (date_x(a.ds), date_x(b.ds));
            plot_ui.polygon(
                Polygon::new(
                    UI_TEXT.series_uncertainty.as_str(),
                    PlotPoints::new(vec![[xa, a_lo], [xb, b_lo], [xb, b_hi], [xa, a_hi]]),
                )
                .fill_color(PLOT_CONFIG.band_fill_color)
                .stroke(Stroke::NONE),
            );
            i = j;
        }
    }
}

// ============================================================================
// 2. FORECAST LINE
// ============================================================================
pub struct ForecastLineLayer(pub ForecastSeries);

impl PlotLayer for ForecastLineLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        let points: Vec<[f64; 2]> = ctx
            .frame
            .rows
            .iter()
            .map(|r| [date_x(r.ds), self.0.center(r)])
            .collect();
        plot_ui.line(
            Line::new(self.0.name(), PlotPoints::new(points))
                .color(PLOT_CONFIG.yhat_line_color)
                .width(PLOT_CONFIG.yhat_line_width),
        );
    }
}

// ============================================================================
// 3. OBSERVED HISTORY
// ============================================================================
pub struct ObservedLayer;

impl PlotLayer for ObservedLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        let points: Vec<[f64; 2]> = ctx
            .prices
            .dates
            .iter()
            .zip(&ctx.prices.close_prices)
            .map(|(d, y)| [date_x(*d), *y])
            .collect();
        plot_ui.points(
            Points::new(UI_TEXT.series_actual.as_str(), PlotPoints::new(points))
                .color(PLOT_CONFIG.observed_point_color)
                .radius(PLOT_CONFIG.observed_point_radius),
        );
    }
}

// ============================================================================
// 4. HISTORY END MARKER
// ============================================================================
pub struct HistoryEndLayer;

impl PlotLayer for HistoryEndLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        if let Some(last) = ctx.frame.last_history_date() {
            plot_ui.vline(
                VLine::new(UI_TEXT.series_history_end.as_str(), date_x(last))
                    .color(PLOT_CONFIG.history_end_color)
                    .style(LineStyle::Dashed { length: 6.0 })
                    .width(1.0),
            );
        }
    }
}

// ============================================================================
// 5. TREND CHANGEPOINTS
// ============================================================================
pub struct ChangepointLayer<'a>(pub &'a [NaiveDate]);

impl PlotLayer for ChangepointLayer<'_> {
    fn render(&self, plot_ui: &mut PlotUi, _ctx: &LayerContext) {
        for date in self.0 {
            plot_ui.vline(
                VLine::new(UI_TEXT.series_changepoint.as_str(), date_x(*date))
                    .color(PLOT_CONFIG.changepoint_color)
                    .style(LineStyle::Dotted { spacing: 4.0 })
                    .width(1.0),
            );
        }
    }
}
