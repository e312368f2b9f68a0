/// Client defaults shared by both market data endpoints.
pub struct ClientDefaults {
    pub timeout_ms: u64,
    pub user_agent: &'static str,
}

/// CoinGecko `/coins/markets` listing endpoint.
pub struct ListingConfig {
    pub base_url: &'static str,
    pub vs_currency: &'static str,
    pub order: &'static str,
    /// The endpoint silently caps `per_page` at this value.
    pub max_per_page: usize,
}

/// Yahoo v8 chart endpoint for daily bars.
pub struct HistoryConfig {
    pub base_url: &'static str,
    pub interval: &'static str,
    /// Appended to a listing symbol to build the history ticker (BTC -> BTC-USD).
    pub quote_suffix: &'static str,
}

pub struct ApiConfig {
    pub listing: ListingConfig,
    pub history: HistoryConfig,
    pub client: ClientDefaults,
}

pub const API: ApiConfig = ApiConfig {
    listing: ListingConfig {
        base_url: "https://api.coingecko.com/api/v3",
        vs_currency: "usd",
        order: "market_cap_desc",
        max_per_page: 250,
    },
    history: HistoryConfig {
        base_url: "https://query1.finance.yahoo.com/v8/finance/chart",
        interval: "1d",
        quote_suffix: "-USD",
    },
    client: ClientDefaults {
        timeout_ms: 30_000,
        // Yahoo rejects requests without a browser-like agent
        user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
    },
};

/// Runtime endpoint selection. Defaults come from [`API`], the CLI may override them.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    pub listing_base_url: String,
    pub history_base_url: String,
    pub timeout_ms: u64,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            listing_base_url: API.listing.base_url.to_string(),
            history_base_url: API.history.base_url.to_string(),
            timeout_ms: API.client.timeout_ms,
        }
    }
}
