//! Huobi (HTX) request signing
//!
//! Signature version 2: auth fields travel as query parameters and the
//! signature covers `METHOD\nhost\npath\nsorted-query`.

use chrono::{DateTime, Utc};
use reqwest::Method;

use crate::client::ExchangeCredentials;
use crate::errors::ClientResult;
use crate::exchanges::common::{header_map, Endpoint, CONTENT_TYPE, JSON};
use crate::types::{Exchange, ExchangeId, PreparedRequest, RequestSpec};
use crate::utils::crypto::hmac_sha256_base64;
use crate::utils::query::{append_pair, encode_query};
use crate::utils::{time, NonceSource};

const BASE_URL: &str = "https://api.huobi.pro";

/// Huobi 거래소
pub struct Huobi {
    credentials: ExchangeCredentials,
    nonce: NonceSource,
}

impl Huobi {
    pub fn new(credentials: ExchangeCredentials) -> Self {
        Self {
            credentials,
            nonce: NonceSource::new(),
        }
    }
}

impl Exchange for Huobi {
    fn id(&self) -> ExchangeId {
        ExchangeId::Huobi
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
            params.insert("AccessKeyId".into(), self.credentials.api_key().into());
            params.insert("SignatureMethod".into(), "HmacSHA256".into());
            params.insert("SignatureVersion".into(), "2".into());
            params.insert("Timestamp".into(), time::iso8601_seconds(now).into());

            let query = encode_query(&params);
            let payload = format!(
                "{}\n{}\n{}\n{}",
                request.method.as_str(),
                endpoint.host(),
                endpoint.url_path(),
                query
            );
            let signature = hmac_sha256_base64(self.credentials.api_secret(), &payload);
            append_pair(&query, "Signature", &signature)
        } else {
            encode_query(&params)
        };

        let headers = if request.method == Method::POST {
            header_map([(CONTENT_TYPE, JSON)])
        } else {
            Default::default()
        };

        endpoint.into_request(&request.method, &query, headers, None)
    }
}
