//! Exchange client: one active exchange, one request at a time

use reqwest::Method;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};

use super::{ClientConfig, ExchangeCredentials, HttpClient, Transport};
use crate::errors::{ClientError, ClientResult, Stage};
use crate::exchanges::create_exchange;
use crate::types::{Exchange, ExchangeId, Params, RequestSpec};

/// Dispatches generic requests to the currently selected exchange.
///
/// Selecting an exchange replaces the previous one. Callers that need several
/// exchanges at once hold several clients; they can share one transport.
pub struct ExchangeClient {
    exchange: Option<Box<dyn Exchange>>,
    transport: Arc<dyn Transport>,
}

impl ExchangeClient {
    /// Client backed by a reqwest [`HttpClient`]
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let transport = HttpClient::new(&config).map_err(|e| ClientError::Setup {
            message: e.to_string(),
        })?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Client backed by a caller-supplied transport
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            exchange: None,
            transport,
        }
    }

    /// Selects `id` as the active exchange, replacing any previous one
    pub fn add_exchange(&mut self, id: ExchangeId, credentials: ExchangeCredentials) {
        debug!(exchange = %id, "exchange selected");
        self.exchange = Some(create_exchange(id, credentials));
    }

    /// Selects an exchange by wire name (`"BINANCE"`, `"okx"`, ...).
    ///
    /// Unknown names fail with [`ClientError::UnsupportedExchange`] and leave
    /// the active exchange untouched.
    pub fn add_exchange_by_name(
        &mut self,
        name: &str,
        credentials: ExchangeCredentials,
    ) -> ClientResult<()> {
        let id: ExchangeId = name.parse()?;
        self.add_exchange(id, credentials);
        Ok(())
    }

    /// 현재 선택된 거래소
    pub fn exchange(&self) -> Option<&dyn Exchange> {
        self.exchange.as_deref()
    }

    /// Sends a request and decodes the JSON body into `T`
    pub async fn send_request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        params: Params,
        signed: bool,
    ) -> ClientResult<T> {
        let request = RequestSpec::new(method, endpoint)
            .with_params(params)
            .signed(signed);
        self.execute(&request).await
    }

    /// Untyped variant of [`send_request`](Self::send_request)
    pub async fn send_request_value(
        &self,
        method: Method,
        endpoint: &str,
        params: Params,
        signed: bool,
    ) -> ClientResult<serde_json::Value> {
        self.send_request(method, endpoint, params, signed).await
    }

    /// Prepares, sends and decodes one request
    pub async fn execute<T: DeserializeOwned>(&self, request: &RequestSpec) -> ClientResult<T> {
        let exchange = self.exchange().ok_or(ClientError::NoActiveExchange)?;
        let id = exchange.id();

        let prepared = exchange.prepare_request(request)?;
        debug!(
            exchange = %id,
            method = %prepared.method,
            url = prepared.url_without_query(),
            signed = request.signed,
            "sending request"
        );

        let response = self
            .transport
            .execute(prepared)
            .await
            .map_err(|e| ClientError::Exchange {
                exchange: id,
                stage: Stage::Transport,
                message: e.to_string(),
            })?;

        if !response.is_success() {
            warn!(exchange = %id, status = response.status, "request rejected");
            return Err(ClientError::Api {
                exchange: id,
                status: response.status,
                body: response.body,
            });
        }
        debug!(exchange = %id, status = response.status, "response received");

        serde_json::from_str(&response.body).map_err(|e| ClientError::Decode {
            exchange: id,
            data_type: std::any::type_name::<T>().to_string(),
            message: e.to_string(),
        })
    }
}
