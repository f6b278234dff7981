use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;
use std::time::Duration;

/// Desktop browser identity; mirror sites block obvious non-browser clients.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Timeout for content fetches (catalog pages, mirror pages, downloads).
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for lightweight existence probes.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

pub fn build_client() -> Client {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("ar,en-US;q=0.9,en;q=0.8"),
    );

    Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .timeout(FETCH_TIMEOUT)
        .build()
        .expect("Failed to create HTTP client")
}
