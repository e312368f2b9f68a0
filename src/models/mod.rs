mod dashboard;
mod forecast_frame;
mod price_series;

pub use {
    dashboard::{ComponentProfiles, DashboardData},
    forecast_frame::{ForecastFrame, ForecastRow},
    price_series::{PriceSeries, TrainingSeries},
};
