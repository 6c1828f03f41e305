//! Bybit request signing

use chrono::{DateTime, Utc};

use crate::client::ExchangeCredentials;
use crate::errors::ClientResult;
use crate::exchanges::common::{header_map, uses_query, Endpoint, CONTENT_TYPE, FORM};
use crate::types::{Exchange, ExchangeId, PreparedRequest, RequestSpec};
use crate::utils::crypto::hmac_sha256_hex;
use crate::utils::query::{append_pair, encode_query, raw_query};
use crate::utils::{time, NonceSource};

const BASE_URL: &str = "https://api.bybit.com";

/// Bybit 거래소
pub struct Bybit {
    credentials: ExchangeCredentials,
    nonce: NonceSource,
}

impl Bybit {
    pub fn new(credentials: ExchangeCredentials) -> Self {
        Self {
            credentials,
            nonce: NonceSource::new(),
        }
    }
}

impl Exchange for Bybit {
    fn id(&self) -> ExchangeId {
        ExchangeId::Bybit
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
        let in_query = uses_query(&request.method);

        let mut params = if in_query {
            endpoint.merged(&request.params)
        } else {
            request.params.clone()
        };

        let payload = if request.signed {
            params.insert("api_key".into(), self.credentials.api_key().into());
            params.insert("timestamp".into(), time::millis(now).into());
            // signed over the unescaped pairs, sent escaped
            let signature = hmac_sha256_hex(self.credentials.api_secret(), &raw_query(&params));
            append_pair(&encode_query(&params), "sign", &signature)
        } else {
            encode_query(&params)
        };

        if in_query {
            endpoint.into_request(&request.method, &payload, Default::default(), None)
        } else {
            let query = encode_query(endpoint.embedded());
            let headers = header_map([(CONTENT_TYPE, FORM)]);
            endpoint.into_request(&request.method, &query, headers, Some(payload))
        }
    }
}
