use std::time::Duration;

use reqwest::multipart::Form;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use super::ServiceError;

/// Shared HTTP plumbing for the remote service clients.
///
/// Cloning is cheap: `reqwest::Client` is reference-counted internally.
#[derive(Clone)]
pub struct ServiceTransport {
    client: Client,
    base_url: String,
}

impl ServiceTransport {
    /// `timeout` is applied per request when set; otherwise requests may wait indefinitely.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ServiceError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ServiceError::Client)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// POST a JSON body and decode a JSON response.
    pub async fn post_json<T, R>(&self, endpoint: &'static str, payload: &T) -> Result<R, ServiceError>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.url(endpoint))
            .json(payload)
            .send()
            .await
            .map_err(|source| ServiceError::Transport { endpoint, source })?;

        decode(endpoint, response).await
    }

    /// POST a multipart form and decode a JSON response.
    pub async fn post_multipart<R>(&self, endpoint: &'static str, form: Form) -> Result<R, ServiceError>
    where
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.url(endpoint))
            .multipart(form)
            .send()
            .await
            .map_err(|source| ServiceError::Transport { endpoint, source })?;

        decode(endpoint, response).await
    }
}

async fn decode<R: DeserializeOwned>(
    endpoint: &'static str,
    response: Response,
) -> Result<R, ServiceError> {
    let status = response.status();
    debug!("{endpoint} responded with {status}");

    if !status.is_success() {
        warn!("{endpoint} returned non-success status {status}");
        return Err(ServiceError::Status {
            endpoint,
            status: status.as_u16(),
        });
    }

    let body = response
        .bytes()
        .await
        .map_err(|source| ServiceError::Transport { endpoint, source })?;

    serde_json::from_slice(&body).map_err(|e| ServiceError::Malformed {
        endpoint,
        message: e.to_string(),
    })
}
