//! Single-shot HTTP GET that reports every outcome as data.

use reqwest::{Client, StatusCode};
use tracing::debug;

/// Status reported for failures that never produced an HTTP response
/// (DNS, connect, TLS, timeout, malformed URL). No real HTTP status is 0.
pub const TRANSPORT_FAILURE_STATUS: u16 = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// HTTP 200 with the body text, uninterpreted.
    Success(String),
    Failure { status: u16, message: String },
}

impl FetchOutcome {
    pub fn status(&self) -> u16 {
        match self {
            FetchOutcome::Success(_) => StatusCode::OK.as_u16(),
            FetchOutcome::Failure { status, .. } => *status,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success(_))
    }

    /// Body on success, diagnostic text on failure.
    pub fn content(&self) -> &str {
        match self {
            FetchOutcome::Success(body) => body,
            FetchOutcome::Failure { message, .. } => message,
        }
    }
}

/// Issues a GET against `url`. Never returns an error: non-200 responses and
/// transport errors are folded into [`FetchOutcome::Failure`].
pub async fn fetch(client: &Client, url: &str) -> FetchOutcome {
    debug!("Requesting {}", url);

    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            debug!(error = %e, "Transport failure");
            return FetchOutcome::Failure {
                status: TRANSPORT_FAILURE_STATUS,
                message: e.to_string(),
            };
        }
    };

    let status = response.status();
    debug!(%status, "Received response");

    if status != StatusCode::OK {
        return FetchOutcome::Failure {
            status: status.as_u16(),
            message: format!(
                "Error: {} - {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            ),
        };
    }

    match response.text().await {
        Ok(body) => FetchOutcome::Success(body),
        Err(e) => FetchOutcome::Failure {
            status: TRANSPORT_FAILURE_STATUS,
            message: e.to_string(),
        },
    }
}
