//! MEXC request signing
//!
//! Same query-embedded HMAC-SHA256 scheme as Binance, but public requests
//! are sent as plain query strings with no key header at all.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::client::ExchangeCredentials;
use crate::errors::ClientResult;
use crate::exchanges::common::{header_map, Endpoint, CONTENT_TYPE, JSON};
use crate::types::{Exchange, ExchangeId, PreparedRequest, RequestSpec};
use crate::utils::crypto::hmac_sha256_hex;
use crate::utils::query::{append_pair, encode_query};
use crate::utils::{time, NonceSource};

const BASE_URL: &str = "https://api.mexc.com";
const API_KEY_HEADER: &str = "X-MEXC-APIKEY";

/// MEXC 거래소
pub struct Mexc {
    credentials: ExchangeCredentials,
    nonce: NonceSource,
}

impl Mexc {
    pub fn new(credentials: ExchangeCredentials) -> Self {
        Self {
            credentials,
            nonce: NonceSource::new(),
        }
    }
}

impl Exchange for Mexc {
    fn id(&self) -> ExchangeId {
        ExchangeId::Mexc
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

        if !request.signed {
            let query = encode_query(&params);
            return endpoint.into_request(&request.method, &query, HashMap::new(), None);
        }

        params.insert("timestamp".into(), time::millis(now).into());
        let query = encode_query(&params);
        let signature = hmac_sha256_hex(self.credentials.api_secret(), &query);
        let query = append_pair(&query, "signature", &signature);

        let headers = header_map([
            (API_KEY_HEADER, self.credentials.api_key()),
            (CONTENT_TYPE, JSON),
        ]);

        endpoint.into_request(&request.method, &query, headers, None)
    }
}
