use {
    crate::domain::Ticker,
    indexmap::IndexMap,
    serde::{Deserialize, Serialize},
};

/// One entry of the market listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub name: String,
    /// Upper-case listing symbol, e.g. `BTC`.
    pub symbol: String,
}

impl Coin {
    pub fn ticker(&self) -> Ticker {
        Ticker::from_listing_symbol(&self.symbol)
    }
}

impl std::fmt::Display for Coin {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.symbol)
    }
}

/// Display name -> symbol, in market-cap rank order.
///
/// Names are unique. Inserting a name that already exists replaces its symbol
/// but keeps the original rank position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoinListing {
    coins: IndexMap<String, String>,
}

impl CoinListing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, symbol: &str) {
        self.coins.insert(name.into(), symbol.trim().to_uppercase());
    }

    pub fn len(&self) -> usize {
        self.coins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }

    pub fn symbol(&self, name: &str) -> Option<&str> {
        self.coins.get(name).map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<Coin> {
        self.coins.get(name).map(|symbol| Coin {
            name: name.to_string(),
            symbol: symbol.clone(),
        })
    }

    /// Looks a coin up by display name first, then by symbol (case-insensitive).
    pub fn find(&self, name_or_symbol: &str) -> Option<Coin> {
        if let Some(coin) = self.get(name_or_symbol) {
            return Some(coin);
        }
        let wanted = name_or_symbol.trim().to_uppercase();
        self.coins
            .iter()
            .find(|(_, symbol)| **symbol == wanted)
            .map(|(name, symbol)| Coin {
                name: name.clone(),
                symbol: symbol.clone(),
            })
    }

    pub fn first(&self) -> Option<Coin> {
        self.coins.first().map(|(name, symbol)| Coin {
            name: name.clone(),
            symbol: symbol.clone(),
        })
    }

    /// Dropdown options, in rank order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.coins.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.coins.iter().map(|(n, s)| (n.as_str(), s.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_name_keeps_rank_and_takes_last_symbol() {
        let mut listing = CoinListing::new();
        listing.insert("Bitcoin", "btc");
        listing.insert("Ethereum", "eth");
        listing.insert("Bitcoin", "xbt");

        assert_eq!(listing.len(), 2);
        assert_eq!(listing.names().collect::<Vec<_>>(), vec!["Bitcoin", "Ethereum"]);
        assert_eq!(listing.symbol("Bitcoin"), Some("XBT"));
    }

    #[test]
    fn find_falls_back_to_symbol() {
        let mut listing = CoinListing::new();
        listing.insert("Solana", "sol");

        assert_eq!(listing.find("Solana").map(|c| c.symbol), Some("SOL".into()));
        assert_eq!(listing.find("sol").map(|c| c.name), Some("Solana".into()));
        assert!(listing.find("doge").is_none());
        assert_eq!(
            listing.first().map(|c| c.ticker().name),
            Some("SOL-USD".to_string())
        );
    }
}
