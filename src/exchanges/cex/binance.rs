//! Binance request signing
//!
//! All parameters ride in the query string. Signed requests append a
//! millisecond `timestamp`, sign the encoded query with HMAC-SHA256 (hex) and
//! append `signature` last. The API key header is sent on every request.

use chrono::{DateTime, Utc};

use crate::client::ExchangeCredentials;
use crate::errors::ClientResult;
use crate::exchanges::common::{header_map, Endpoint, CONTENT_TYPE, FORM};
use crate::types::{Exchange, ExchangeId, PreparedRequest, RequestSpec};
use crate::utils::crypto::hmac_sha256_hex;
use crate::utils::query::{append_pair, encode_query};
use crate::utils::{time, NonceSource};

const BASE_URL: &str = "https://api.binance.com";
const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// Binance 거래소
pub struct Binance {
    credentials: ExchangeCredentials,
    nonce: NonceSource,
}

impl Binance {
    pub fn new(credentials: ExchangeCredentials) -> Self {
        Self {
            credentials,
            nonce: NonceSource::new(),
        }
    }
}

impl Exchange for Binance {
    fn id(&self) -> ExchangeId {
        ExchangeId::Binance
    }

    fn default_base_url(&self) -> &'static str {
        BASE_URL
    }

    fn credentials(&self) -> &ExchangeCredentials {
        &self.credentials
    }

    fn nonce_source(&self) -> &NonceSource {
        &self.nonce
    }

    fn prepare_request_at(
        &self,
        request: &RequestSpec,
        now: DateTime<Utc>,
    ) -> ClientResult<PreparedRequest> {
        let endpoint = Endpoint::parse(self.id(), self.base_url(), &request.endpoint)?;
        let mut params = endpoint.merged(&request.params);

        let query = if request.signed {
            params.insert("timestamp".into(), time::millis(now).into());
            let query = encode_query(&params);
            let signature = hmac_sha256_hex(self.credentials.api_secret(), &query);
            append_pair(&query, "signature", &signature)
        } else {
            encode_query(&params)
        };

        let headers = header_map([
            (API_KEY_HEADER, self.credentials.api_key()),
            (CONTENT_TYPE, FORM),
        ]);

        endpoint.into_request(&request.method, &query, headers, None)
    }
}
