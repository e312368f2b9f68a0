use {
    crate::{
        domain::{Coin, CoinListing},
        models::DashboardData,
    },
    std::sync::Arc,
};

/// Work the UI hands to the worker.
#[derive(Debug, Clone)]
pub enum JobRequest {
    /// Fetch the top `limit` coins by market cap.
    CoinList { limit: usize },
    /// Load history, fit and forecast `years` ahead.
    Forecast {
        request_id: u64,
        coin: Coin,
        years: u32,
    },
}

/// The result returned by the worker. Errors are flattened to their full
/// context chain for display.
#[derive(Debug, Clone)]
pub enum JobResult {
    CoinList {
        limit: usize,
        result: Result<CoinListing, String>,
    },
    Forecast {
        request_id: u64,
        coin: Coin,
        years: u32,
        duration_ms: u128,
        result: Result<Arc<DashboardData>, String>,
    },
}
