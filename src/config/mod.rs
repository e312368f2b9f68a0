//! Configuration module for the forecast dashboard.

// Can all be private now because we have a public re-export.
mod api;
mod debug;
mod forecast;
mod persistence;

// Public
pub mod constants;

// Can't be private because we don't re-export it
pub mod plot;

// Re-export commonly used items
pub use api::{API, ApiConfig, EndpointConfig};
pub use constants::{
    DAYS_PER_YEAR, DEFAULT_COIN_LIMIT, HISTORY_START, HORIZON_YEARS, TABLE_TAIL_ROWS,
    horizon_days,
};
pub use debug::{DF, LOG_PERFORMANCE};
pub use forecast::{FORECAST, ForecastSettings, SeasonalitySpec};
pub use persistence::PERSISTENCE;
pub use plot::PLOT_CONFIG;
