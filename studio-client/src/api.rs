/// API gateway
/// Single outbound request pipeline used by every component. Attaches the
/// current bearer credential when one is present and omits the header
/// otherwise; authorization failures are reported by the endpoint, never
/// pre-empted here.
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::session::SharedSession;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx response. `detail` carries the server's message when the
    /// body was a `{"detail": ...}` object, a generic line otherwise.
    #[error("{detail}")]
    Rejected { status: u16, detail: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
}

#[derive(Clone)]
pub struct ApiGateway {
    base_url: String,
    http: reqwest::Client,
    session: SharedSession,
}

impl ApiGateway {
    pub fn new(base_url: impl Into<String>, session: SharedSession) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
            session,
        }
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        timeout: Duration,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        self.send(self.http.get(&url), timeout).await
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        timeout: Duration,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        self.send(self.http.post(&url).json(body), timeout).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
        timeout: Duration,
    ) -> Result<T, ApiError> {
        let builder = match self.session.read().await.token.as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };

        let response = tokio::time::timeout(timeout, builder.send())
            .await
            .map_err(|_| ApiError::Timeout)?
            .map_err(|err| ApiError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|value| {
                    value
                        .get("detail")
                        .and_then(|detail| detail.as_str())
                        .map(str::to_string)
                })
                .unwrap_or_else(|| format!("request failed with status {}", status.as_u16()));
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                detail,
            });
        }

        response
            .json()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))
    }
}
