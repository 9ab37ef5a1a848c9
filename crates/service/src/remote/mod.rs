//! Outbound HTTP calls. One shared [`reqwest::Client`] with a fixed per-call timeout.

pub mod gemini;
pub mod matcher;
pub mod openvidu;

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("{service} unavailable: {reason}")]
    Unavailable { service: &'static str, reason: String },

    #[error("{service} timed out")]
    Timeout { service: &'static str },

    #[error("{service} error: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("{service} returned an unexpected response: {reason}")]
    Decode { service: &'static str, reason: String },
}

pub fn http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder().timeout(timeout).build()
}

fn classify(service: &'static str, error: reqwest::Error) -> RemoteError {
    if error.is_timeout() {
        RemoteError::Timeout { service }
    } else if error.is_decode() {
        RemoteError::Decode {
            service,
            reason: error.to_string(),
        }
    } else {
        RemoteError::Unavailable {
            service,
            reason: error.to_string(),
        }
    }
}

/// Sends `request` and decodes a 2xx JSON body. Non-2xx answers become [`RemoteError::Status`].
async fn send_json<R: DeserializeOwned>(
    service: &'static str,
    request: RequestBuilder,
) -> Result<R, RemoteError> {
    let response = request.send().await.map_err(|e| classify(service, e))?;
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!(%status, body = %body, "{service} answered with an error");

        return Err(RemoteError::Status {
            service,
            status: status.as_u16(),
            body,
        });
    }

    let bytes = response.bytes().await.map_err(|e| classify(service, e))?;

    serde_json::from_slice(&bytes).map_err(|e| RemoteError::Decode {
        service,
        reason: e.to_string(),
    })
}
