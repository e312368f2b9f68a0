use {
    crate::data::DataError,
    reqwest::{Client, Request, Url},
};

#[cfg(debug_assertions)]
use crate::config::DF;

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn build_client(timeout_ms: u64) -> Result<Client, DataError> {
    use crate::config::API;
    Client::builder()
        .timeout(std::time::Duration::from_millis(timeout_ms))
        .user_agent(API.client.user_agent)
        .build()
        .map_err(DataError::Http)
}

// Browsers own the timeout and User-Agent, neither can be set from wasm.
#[cfg(target_arch = "wasm32")]
pub(crate) fn build_client(_timeout_ms: u64) -> Result<Client, DataError> {
    Ok(Client::new())
}

/// Parses a provider base URL. It has to accept extra path segments.
pub(crate) fn parse_base_url(base: &str) -> Result<Url, DataError> {
    let url = Url::parse(base).map_err(|e| DataError::InvalidUrl(format!("{}: {}", base, e)))?;
    if url.cannot_be_a_base() {
        return Err(DataError::InvalidUrl(format!("{}: cannot take a path", base)));
    }
    Ok(url)
}

/// `base` with each of `segments` appended as one percent-encoded path segment.
pub(crate) fn join_segments(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    // Only fails for cannot-be-a-base URLs, which parse_base_url rejects.
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// Sends `request` and returns its URL, the status code and the raw body.
/// Status handling is left to the caller since some providers put error
/// details in non-2xx bodies.
pub(crate) async fn get_text(
    client: &Client,
    request: Request,
) -> Result<(String, u16, String), DataError> {
    let url = request.url().to_string();
    #[cfg(debug_assertions)]
    if DF.log_requests {
        log::info!("GET {}", url);
    }
    let response = client.execute(request).await?;
    let status = response.status().as_u16();
    let body = response.text().await?;
    Ok((url, status, body))
}

pub(crate) fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_are_appended_and_escaped() {
        let base = parse_base_url("https://host/v3/").unwrap();
        assert_eq!(
            join_segments(&base, &["coins", "markets"]).as_str(),
            "https://host/v3/coins/markets"
        );

        let url = join_segments(&parse_base_url("https://host/chart").unwrap(), &["A#B/C"]);
        assert_eq!(url.path(), "/chart/A%23B%2FC");
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn base_url_must_take_a_path() {
        assert!(matches!(
            parse_base_url("mailto:someone@example.com"),
            Err(DataError::InvalidUrl(_))
        ));
        assert!(matches!(parse_base_url("not a url"), Err(DataError::InvalidUrl(_))));
    }
}
