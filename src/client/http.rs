//! HTTP transport

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::ClientConfig;
use crate::errors::TransportError;
use crate::types::PreparedRequest;

/// Raw HTTP response: status plus the full body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one prepared request and returns the raw response.
///
/// Implementations perform no retries and no status interpretation.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: PreparedRequest) -> Result<HttpResponse, TransportError>;
}

/// reqwest 기반 HTTP 클라이언트
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// 새로운 HTTP 클라이언트 생성
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder().timeout(Duration::from_millis(config.timeout_ms()));
        if let Some(user_agent) = config.user_agent() {
            builder = builder.user_agent(user_agent);
        }
        let client = builder.build().map_err(TransportError::from)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn execute(&self, request: PreparedRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.request(request.method, &request.url);

        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(HttpResponse { status, body })
    }
}
