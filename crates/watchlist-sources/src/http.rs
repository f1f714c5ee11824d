use reqwest::{Client, Response};
use std::time::Duration;

use crate::error::ClientError;

/// Build an HTTP client with the fixed per-request timeout used by every call
pub fn build_client(
    service: &'static str,
    timeout_secs: u64,
    accept_invalid_certs: bool,
) -> Result<Client, ClientError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .danger_accept_invalid_certs(accept_invalid_certs)
        .user_agent(concat!("watchlist/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|source| ClientError::Transport { service, source })
}

/// Read a response body and decode it as JSON
pub async fn decode_json<T: serde::de::DeserializeOwned>(
    service: &'static str,
    response: Response,
) -> Result<T, ClientError> {
    let body = response
        .text()
        .await
        .map_err(|source| ClientError::Transport { service, source })?;

    serde_json::from_str(&body).map_err(|e| ClientError::Decode {
        service,
        message: e.to_string(),
    })
}

/// Turn a non-2xx response into `ClientError::Status`
pub async fn status_error(service: &'static str, response: Response) -> ClientError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    ClientError::Status {
        service,
        status,
        body,
    }
}
