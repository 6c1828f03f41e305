//! OKX request signing

use chrono::{DateTime, Utc};

use crate::client::ExchangeCredentials;
use crate::errors::ClientResult;
use crate::exchanges::common::{header_map, request_path, split_json, Endpoint, CONTENT_TYPE, JSON};
use crate::types::{Exchange, ExchangeId, PreparedRequest, RequestSpec};
use crate::utils::crypto::hmac_sha256_base64;
use crate::utils::{time, NonceSource};

const BASE_URL: &str = "https://www.okx.com";

/// OKX 거래소
pub struct Okx {
    credentials: ExchangeCredentials,
    nonce: NonceSource,
}

impl Okx {
    pub fn new(credentials: ExchangeCredentials) -> Self {
        Self {
            credentials,
            nonce: NonceSource::new(),
        }
    }
}

impl Exchange for Okx {
    fn id(&self) -> ExchangeId {
        ExchangeId::Okx
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
            // OKX wants ISO-8601 with milliseconds, not an epoch number
            let timestamp = time::iso8601_millis(now);
            let prehash = format!(
                "{}{}{}{}",
                timestamp,
                request.method.as_str(),
                request_path(endpoint.path(), &query),
                body.as_deref().unwrap_or_default()
            );
            let signature = hmac_sha256_base64(self.credentials.api_secret(), &prehash);

            headers.extend(header_map([
                ("OK-ACCESS-KEY", self.credentials.api_key()),
                ("OK-ACCESS-SIGN", signature.as_str()),
                ("OK-ACCESS-TIMESTAMP", timestamp.as_str()),
                ("OK-ACCESS-PASSPHRASE", self.credentials.passphrase()),
            ]));
        }

        endpoint.into_request(&request.method, &query, headers, body)
    }
}
