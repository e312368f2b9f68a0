use std::sync::LazyLock;

// Default egui fonts only, so symbols stay in basic Unicode.
pub const ICON_RELOAD: &str = "🔄";
pub const ICON_WARNING: &str = "⚠";

pub struct UiText {
    pub app_title: String,

    // --- Controls ---
    pub label_select_coin: String,
    pub label_years: String,
    pub button_reload: String,
    pub tooltip_reload: String,
    pub label_loading_data: String,
    pub label_loading_done: String,

    // --- Loading / failure screens ---
    pub ls_title: String,
    pub ls_fetching_coins: String,
    pub error_listing: String,
    pub error_forecast: String,
    pub button_retry: String,

    // --- Sections ---
    pub heading_raw_data: String,
    pub heading_forecast_data: String,
    pub heading_components: String,
    pub raw_chart_title: String,
    pub label_range_from: String,
    pub label_range_to: String,
    pub label_no_data: String,

    // --- Series names ---
    pub series_open: String,
    pub series_close: String,
    pub series_actual: String,
    pub series_predicted: String,
    pub series_uncertainty: String,
    pub series_history_end: String,
    pub series_changepoint: String,
    pub component_trend: String,
    pub component_yearly: String,
    pub component_weekly: String,

    // --- Table headers ---
    pub col_date: String,
    pub col_open: String,
    pub col_high: String,
    pub col_low: String,
    pub col_close: String,
    pub col_adj_close: String,
    pub col_volume: String,

    pub label_fit_time: String,
}

pub static UI_TEXT: LazyLock<UiText> = LazyLock::new(|| UiText {
    app_title: "Cryptocurrency Forecast App".to_string(),

    label_select_coin: "Select cryptocurrency for prediction".to_string(),
    label_years: "Years of prediction:".to_string(),
    button_reload: format!("{} Reload data", ICON_RELOAD),
    tooltip_reload: "Drop cached listings and price histories and fetch again".to_string(),
    label_loading_data: "Loading data...".to_string(),
    label_loading_done: "Loading data... done!".to_string(),

    ls_title: "Cryptocurrency Forecast App".to_string(),
    ls_fetching_coins: "Fetching top coins by market cap...".to_string(),
    error_listing: format!("{} Could not load the coin listing", ICON_WARNING),
    error_forecast: format!("{} Could not build the forecast", ICON_WARNING),
    button_retry: "Retry".to_string(),

    heading_raw_data: "Raw data".to_string(),
    heading_forecast_data: "Forecast data".to_string(),
    heading_components: "Forecast components".to_string(),
    raw_chart_title: "Time Series data with Rangeslider".to_string(),
    label_range_from: "From".to_string(),
    label_range_to: "To".to_string(),
    label_no_data: "No data yet".to_string(),

    series_open: "crypto_open".to_string(),
    series_close: "crypto_close".to_string(),
    series_actual: "Actual".to_string(),
    series_predicted: "Predicted".to_string(),
    series_uncertainty: "Uncertainty".to_string(),
    series_history_end: "Last observed".to_string(),
    series_changepoint: "changepoint".to_string(),
    component_trend: "trend".to_string(),
    component_yearly: "yearly".to_string(),
    component_weekly: "weekly".to_string(),

    col_date: "Date".to_string(),
    col_open: "Open".to_string(),
    col_high: "High".to_string(),
    col_low: "Low".to_string(),
    col_close: "Close".to_string(),
    col_adj_close: "Adj Close".to_string(),
    col_volume: "Volume".to_string(),

    label_fit_time: "fit".to_string(),
});

pub fn forecast_plot_title(years: u32) -> String {
    format!("Forecast plot for {} years", years)
}
