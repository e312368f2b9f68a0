use {
    crate::config::API,
    serde::{Deserialize, Serialize},
};

/// A price-history symbol such as `BTC-USD`, built from a listing symbol.
#[derive(Serialize, Deserialize, Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Ticker {
    pub name: String,
}

impl Ticker {
    /// `btc` -> `BTC-USD`. Listing symbols are upper-cased first.
    pub fn from_listing_symbol(symbol: &str) -> Self {
        Self {
            name: format!(
                "{}{}",
                symbol.trim().to_uppercase(),
                API.history.quote_suffix
            ),
        }
    }

    /// The base asset, i.e. the name with the quote suffix stripped.
    pub fn base(&self) -> &str {
        self.name
            .strip_suffix(API.history.quote_suffix)
            .unwrap_or(&self.name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for Ticker {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_usd_ticker_from_listing_symbol() {
        let t = Ticker::from_listing_symbol("btc");
        assert_eq!(t.name(), "BTC-USD");
        assert_eq!(t.base(), "BTC");
        assert_eq!(t.to_string(), "BTC-USD");
    }
}
