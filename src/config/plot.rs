//! Plot visualization configuration

use eframe::egui::Color32;

pub struct PlotConfig {
    // --- RAW SERIES ---
    pub open_line_color: Color32,
    pub close_line_color: Color32,
    pub raw_line_width: f32,

    // --- FORECAST ---
    /// Observed history drawn as points over the forecast
    pub observed_point_color: Color32,
    pub observed_point_radius: f32,
    pub yhat_line_color: Color32,
    pub yhat_line_width: f32,
    /// Fill for the yhat_lower..yhat_upper band
    pub band_fill_color: Color32,
    /// Vertical marker at the last observed date
    pub history_end_color: Color32,

    // --- COMPONENTS ---
    pub component_line_color: Color32,
    pub component_line_width: f32,
    pub component_plot_height: f32,
    pub changepoint_color: Color32,

    pub main_plot_height: f32,
    pub plot_y_padding_pct: f64, // Y-Axis Padding factor (e.g. 0.05 = 5% padding top and bottom)

    // --- SEMANTIC COLORS ---
    pub color_profit: Color32,
    pub color_loss: Color32,
    pub color_info: Color32,
    pub color_warning: Color32,

    pub color_text_neutral: Color32, // Main values (white)
    pub color_text_primary: Color32,
    pub color_text_subdued: Color32,
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    open_line_color: Color32::from_rgb(99, 110, 250),   // Blue
    close_line_color: Color32::from_rgb(239, 85, 59),   // Red
    raw_line_width: 1.5,

    observed_point_color: Color32::from_gray(210),
    observed_point_radius: 1.5,
    yhat_line_color: Color32::from_rgb(0, 114, 178),
    yhat_line_width: 2.0,
    band_fill_color: Color32::from_rgba_premultiplied(0, 60, 95, 70),
    history_end_color: Color32::from_gray(120),

    component_line_color: Color32::from_rgb(0, 114, 178),
    component_line_width: 2.0,
    component_plot_height: 180.0,
    changepoint_color: Color32::from_rgba_premultiplied(120, 60, 60, 160),

    main_plot_height: 360.0,
    plot_y_padding_pct: 0.05,

    color_profit: Color32::from_rgb(100, 255, 100),
    color_loss: Color32::from_rgb(255, 80, 80),
    color_info: Color32::from_rgb(173, 216, 230), // Light Blue
    color_warning: Color32::from_rgb(255, 215, 0), // Gold/Yellow

    color_text_primary: Color32::WHITE,
    color_text_neutral: Color32::LIGHT_GRAY,
    color_text_subdued: Color32::GRAY,
};
