//! Shared reqwest plumbing.

use ecoroute_core::ProviderError;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Build a client whose every request is bounded by `timeout`.
pub fn build_client(timeout: Duration) -> Result<Client, ProviderError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|err| ProviderError::Configuration(err.to_string()))
}

/// Map a reqwest failure to a provider error. The request URL is stripped
/// since it carries the API key in its query string.
pub(crate) fn transport(err: reqwest::Error) -> ProviderError {
    let err = err.without_url();
    if err.is_timeout() {
        ProviderError::Timeout
    } else if err.is_decode() {
        ProviderError::Payload(err.to_string())
    } else {
        ProviderError::Transport(err.to_string())
    }
}

/// Fail on non-success status, otherwise decode the JSON body.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ProviderError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::Status(status.as_u16()));
    }
    response.json().await.map_err(transport)
}

pub(crate) fn require_key(name: &str, key: &str) -> Result<(), ProviderError> {
    if key.trim().is_empty() {
        return Err(ProviderError::Configuration(format!("{} is not set", name)));
    }
    Ok(())
}

pub(crate) fn trim_base(url: impl Into<String>) -> String {
    url.into().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn transport_errors_do_not_echo_the_url() {
        let client = build_client(Duration::from_secs(2)).unwrap();
        let err = client
            .get("http://127.0.0.1:1/data?appid=SECRET_KEY")
            .send()
            .await
            .unwrap_err();

        match transport(err) {
            ProviderError::Transport(detail) => {
                assert!(!detail.contains("SECRET_KEY"), "leaked: {}", detail);
                assert!(!detail.contains("127.0.0.1"), "leaked: {}", detail);
            }
            other => panic!("expected transport error, got {:?}", other),
        }
    }
}
