const DEFAULT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(5);

// The per-call deadline is enforced by `PriceSource::fetch`; this is only a
// transport-level backstop.
pub fn create_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(DEFAULT_TIMEOUT)
        .build()
        .unwrap_or_default()
}
