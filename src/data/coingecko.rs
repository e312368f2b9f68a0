//! CoinGecko `/coins/markets` listing client.

use {
    crate::{
        config::API,
        data::{
            CoinListProvider, DataError,
            http::{build_client, get_text, is_success, join_segments, parse_base_url},
        },
        domain::{Coin, CoinListing},
    },
    async_trait::async_trait,
    reqwest::{Request, Url},
    serde::Deserialize,
};

#[derive(Debug, Deserialize)]
struct MarketEntry {
    name: Option<String>,
    symbol: Option<String>,
}

/// CoinGecko answers rate limits and bad params with an object instead of an array.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    status: Option<ErrorStatus>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorStatus {
    error_code: Option<i64>,
    error_message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    base_url: Url,
    client: reqwest::Client,
}

impl CoinGeckoClient {
    pub fn new(base_url: &str, timeout_ms: u64) -> Result<Self, DataError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            client: build_client(timeout_ms)?,
        })
    }

    /// One page (1-based) of the market-cap ordered listing.
    pub fn markets_request(&self, per_page: usize, page: usize) -> Result<Request, DataError> {
        let url = join_segments(&self.base_url, &["coins", "markets"]);
        let request = self
            .client
            .get(url)
            .query(&[
                ("vs_currency", API.listing.vs_currency.to_string()),
                ("order", API.listing.order.to_string()),
                ("per_page", per_page.to_string()),
                ("page", page.to_string()),
                ("sparkline", "false".to_string()),
            ])
            .build()?;
        Ok(request)
    }

    async fn fetch_page(&self, per_page: usize, page: usize) -> Result<Vec<Coin>, DataError> {
        let request = self.markets_request(per_page, page)?;
        let (url, status, body) = get_text(&self.client, request).await?;
        if !is_success(status) {
            return Err(error_from_body(&body).unwrap_or(DataError::Status { url, status }));
        }
        parse_markets_page(&body)
    }
}

/// Parses one `/coins/markets` page. Every element needs `name` and `symbol`.
pub fn parse_markets_page(body: &str) -> Result<Vec<Coin>, DataError> {
    if let Some(err) = error_from_body(body) {
        return Err(err);
    }
    let entries: Vec<MarketEntry> = serde_json::from_str(body)?;
    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| match (entry.name, entry.symbol) {
            (Some(name), Some(symbol)) => Ok(Coin {
                name,
                symbol: symbol.trim().to_uppercase(),
            }),
            (None, _) => Err(DataError::Schema(format!("market entry {} has no 'name'", i))),
            (_, None) => Err(DataError::Schema(format!(
                "market entry {} has no 'symbol'",
                i
            ))),
        })
        .collect()
}

fn error_from_body(body: &str) -> Option<DataError> {
    if !body.trim_start().starts_with('{') {
        return None;
    }
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    if let Some(status) = parsed.status {
        return Some(DataError::Api {
            code: status
                .error_code
                .map(|c| c.to_string())
                .unwrap_or_default(),
            description: status.error_message.unwrap_or_default(),
        });
    }
    parsed.error.map(|description| DataError::Api {
        code: String::new(),
        description,
    })
}

/// Rows requested per page for a given `limit`.
pub(crate) fn page_size(limit: usize) -> usize {
    limit.clamp(1, API.listing.max_per_page)
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl CoinListProvider for CoinGeckoClient {
    async fn fetch_top_coins(&self, limit: usize) -> Result<CoinListing, DataError> {
        let mut listing = CoinListing::new();
        if limit == 0 {
            return Ok(listing);
        }

        // per_page must stay fixed across pages or the offsets shift.
        let per_page = page_size(limit);
        let mut collected: Vec<Coin> = Vec::with_capacity(limit);
        let mut page = 1;
        while collected.len() < limit {
            let coins = self.fetch_page(per_page, page).await?;
            let short_page = coins.len() < per_page;
            collected.extend(coins);
            if short_page {
                break;
            }
            page += 1;
        }
        collected.truncate(limit);

        for coin in collected {
            listing.insert(coin.name, &coin.symbol);
        }
        Ok(listing)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        std::sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
        tokio::{
            io::{AsyncReadExt, AsyncWriteExt},
            net::{TcpListener, TcpStream},
        },
    };

    /// Serves `/coins/markets` pages out of `total` synthetic coins on a local
    /// port. Returns the base URL and a counter of requests served.
    async fn serve_markets(total: usize) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}/api/v3", listener.local_addr().unwrap());
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                counter.fetch_add(1, Ordering::SeqCst);
                answer_page(socket, total).await;
            }
        });
        (base, hits)
    }

    async fn answer_page(mut socket: TcpStream, total: usize) {
        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }
        let head = String::from_utf8_lossy(&head);
        let target = head.split_whitespace().nth(1).unwrap_or_default();
        let param = |key: &str| -> usize {
            target
                .split(['?', '&'])
                .find_map(|kv| kv.strip_prefix(key)?.strip_prefix('='))
                .and_then(|v| v.parse().ok())
                .unwrap()
        };
        let (per_page, page) = (param("per_page"), param("page"));

        let first = (page - 1) * per_page;
        let coins: Vec<serde_json::Value> = (first..total.min(first + per_page))
            .map(|i| serde_json::json!({ "name": format!("Coin {}", i), "symbol": format!("c{}", i) }))
            .collect();
        let body = serde_json::to_string(&coins).unwrap();
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
    }

    #[tokio::test]
    async fn large_limits_page_until_full() {
        let (base, hits) = serve_markets(1_000).await;
        let client = CoinGeckoClient::new(&base, 5_000).unwrap();

        let listing = client.fetch_top_coins(300).await.unwrap();
        assert_eq!(listing.len(), 300);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        // Second page continues where the first stopped.
        assert_eq!(listing.names().nth(250), Some("Coin 250"));
        assert_eq!(listing.names().last(), Some("Coin 299"));
    }

    #[tokio::test]
    async fn short_page_ends_the_listing() {
        let (base, hits) = serve_markets(100).await;
        let client = CoinGeckoClient::new(&base, 5_000).unwrap();

        let listing = client.fetch_top_coins(300).await.unwrap();
        assert_eq!(listing.len(), 100);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(listing.symbol("Coin 0"), Some("C0"));
    }

    #[test]
    fn parses_names_and_uppercases_symbols() {
        let body = r#"[
            {"id":"bitcoin","symbol":"btc","name":"Bitcoin","current_price":64000.0},
            {"id":"ethereum","symbol":"eth","name":"Ethereum","current_price":3100.5}
        ]"#;
        let coins = parse_markets_page(body).unwrap();
        assert_eq!(coins.len(), 2);
        assert_eq!(coins[0].name, "Bitcoin");
        assert_eq!(coins[0].symbol, "BTC");
        assert!(coins.iter().all(|c| c.symbol == c.symbol.to_uppercase()));
    }

    #[test]
    fn missing_symbol_is_a_schema_error() {
        let body = r#"[{"id":"bitcoin","name":"Bitcoin"}]"#;
        assert!(matches!(
            parse_markets_page(body),
            Err(DataError::Schema(_))
        ));
    }

    #[test]
    fn rate_limit_object_is_an_api_error() {
        let body = r#"{"status":{"error_code":429,"error_message":"You've exceeded the Rate Limit."}}"#;
        match parse_markets_page(body) {
            Err(DataError::Api { code, .. }) => assert_eq!(code, "429"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn markets_request_carries_listing_params() {
        let client = CoinGeckoClient::new("https://api.example.com/v3/", 1_000).unwrap();
        assert_eq!(
            client.markets_request(250, 2).unwrap().url().as_str(),
            "https://api.example.com/v3/coins/markets?vs_currency=usd&order=market_cap_desc&per_page=250&page=2&sparkline=false"
        );
    }

    #[test]
    fn page_size_is_capped() {
        assert_eq!(page_size(300), 250);
        assert_eq!(page_size(10), 10);
        assert_eq!(page_size(0), 1);
    }
}
