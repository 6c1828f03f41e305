//! HTTP client, configuration and the exchange dispatcher

mod config;
mod exchange_client;
mod http;

pub use config::{ClientConfig, ExchangeCredentials};
pub use exchange_client::ExchangeClient;
pub use http::{HttpClient, HttpResponse, Transport};
