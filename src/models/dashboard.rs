use {
    crate::{
        domain::Coin,
        models::{ForecastFrame, PriceSeries},
    },
    chrono::NaiveDate,
};

/// Seasonal curves for the components chart, in price units.
/// `None` when the model did not fit that seasonality.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentProfiles {
    /// One calendar year of daily values.
    pub yearly: Option<Vec<(NaiveDate, f64)>>,
    /// Monday to Sunday.
    pub weekly: Option<Vec<(NaiveDate, f64)>>,
}

/// Everything one dashboard render needs for a coin and horizon.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub coin: Coin,
    pub years: u32,
    pub prices: PriceSeries,
    pub forecast: ForecastFrame,
    pub components: ComponentProfiles,
    /// Where the fitted trend is allowed to bend.
    pub changepoints: Vec<NaiveDate>,
}
