//! KuCoin request signing

use chrono::{DateTime, Utc};

use crate::client::ExchangeCredentials;
use crate::errors::ClientResult;
use crate::exchanges::common::{header_map, request_path, split_json, Endpoint, CONTENT_TYPE, JSON};
use crate::types::{Exchange, ExchangeId, PreparedRequest, RequestSpec};
use crate::utils::crypto::hmac_sha256_base64;
use crate::utils::{time, NonceSource};

const BASE_URL: &str = "https://api.kucoin.com";

/// KuCoin 거래소
pub struct Kucoin {
    credentials: ExchangeCredentials,
    nonce: NonceSource,
}

impl Kucoin {
    pub fn new(credentials: ExchangeCredentials) -> Self {
        Self {
            credentials,
            nonce: NonceSource::new(),
        }
    }

    /// `timestamp + METHOD + endpoint + body`, HMAC-SHA256, base64
    fn sign(&self, timestamp: &str, method: &str, path: &str, body: &str) -> String {
        let prehash = format!("{timestamp}{method}{path}{body}");
        hmac_sha256_base64(self.credentials.api_secret(), &prehash)
    }
}

impl Exchange for Kucoin {
    fn id(&self) -> ExchangeId {
        ExchangeId::Kucoin
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
        let (query, body) = split_json(&endpoint, &request.method, &request.params)?;

        let mut headers = header_map([(CONTENT_TYPE, JSON)]);

        if request.signed {
            let timestamp = time::millis(now);
            let signature = self.sign(
                &timestamp,
                request.method.as_str(),
                &request_path(endpoint.path(), &query),
                body.as_deref().unwrap_or_default(),
            );

            headers.extend(header_map([
                ("KC-API-KEY", self.credentials.api_key()),
                ("KC-API-SIGN", signature.as_str()),
                ("KC-API-TIMESTAMP", timestamp.as_str()),
                ("KC-API-PASSPHRASE", self.credentials.passphrase()),
            ]));
        }

        endpoint.into_request(&request.method, &query, headers, body)
    }
}
