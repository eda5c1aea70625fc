use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("watchlog/", env!("CARGO_PKG_VERSION"));

/// Create a reqwest Client with the watchlog user agent and a request timeout
pub fn create_http_client(timeout_secs: u64) -> Client {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Join `base` and `path` with exactly one slash between them
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
