//! HTTP client for the Hat runtime

use hat_devices::{Device, RuntimeEvent};
use thiserror::Error;
use url::Url;

/// Errors talking to the runtime
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport or decoding failure
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Runtime answered with a non-success status
    #[error("{endpoint} returned {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },
}

/// Thin client for the runtime's device, event and source endpoints
#[derive(Debug, Clone)]
pub struct HatClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HatClient {
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// List all devices known to the runtime
    pub async fn list_devices(&self) -> Result<Vec<Device>, ClientError> {
        let response = self.http.get(self.endpoint("devices")).send().await?;
        let response = check_status("devices", response).await?;
        Ok(response.json().await?)
    }

    /// List the events the runtime's devices can emit
    pub async fn list_possible_events(&self) -> Result<Vec<RuntimeEvent>, ClientError> {
        let response = self.http.get(self.endpoint("possible_events")).send().await?;
        let response = check_status("possible_events", response).await?;
        Ok(response.json().await?)
    }

    /// Replace the runtime's source with `source`
    pub async fn update_code(&self, source: String) -> Result<(), ClientError> {
        let response = self
            .http
            .post(self.endpoint("update_code"))
            .header(reqwest::header::CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(source)
            .send()
            .await?;
        check_status("update_code", response).await?;
        Ok(())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }
}

async fn check_status(
    endpoint: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::warn!("Runtime {} request failed with {}: {}", endpoint, status, body);
    Err(ClientError::Status {
        endpoint: endpoint.to_string(),
        status: status.as_u16(),
        body,
    })
}
