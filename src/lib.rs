//! cryptoexchange: unified signed REST requests for cryptocurrency exchanges
//!
//! 거래소별 인증 방식을 하나의 요청 인터페이스로 통합
//!
//! ```no_run
//! use cryptoexchange::{params, ExchangeClient, ExchangeCredentials, ExchangeId, ClientConfig};
//! use reqwest::Method;
//!
//! # async fn run() -> cryptoexchange::ClientResult<()> {
//! let mut client = ExchangeClient::new(ClientConfig::default())?;
//! client.add_exchange(ExchangeId::Binance, ExchangeCredentials::new("key", "secret"));
//!
//! let ticker: serde_json::Value = client
//!     .send_request(Method::GET, "/api/v3/ticker/price", params! { "symbol" => "BTCUSDT" }, false)
//!     .await?;
//! # Ok(())
//! # }
//! ```

#[macro_use]
mod macros;

pub mod client;
pub mod errors;
pub mod exchanges;
pub mod types;
pub mod utils;

// Re-exports
pub use client::{ClientConfig, ExchangeClient, ExchangeCredentials, HttpClient, HttpResponse, Transport};
pub use errors::{ClientError, ClientResult, Stage, TransportError};
pub use types::{Exchange, ExchangeId, ParamValue, Params, PreparedRequest, RequestSpec};
