//! Kraken request signing
//!
//! Private endpoints take a form-encoded body with a nanosecond `nonce`.
//! `API-Sign` is `base64(HMAC-SHA512(b64decode(secret), path ++ sha256(nonce ++ postdata)))`.

use chrono::{DateTime, Utc};

use crate::client::ExchangeCredentials;
use crate::errors::{ClientError, ClientResult};
use crate::exchanges::common::{header_map, Endpoint, CONTENT_TYPE, FORM};
use crate::types::{Exchange, ExchangeId, PreparedRequest, RequestSpec};
use crate::utils::crypto::{base64_decode, base64_encode, hmac, sha256, HashAlgorithm};
use crate::utils::query::encode_query;
use crate::utils::{time, NonceSource};

const BASE_URL: &str = "https://api.kraken.com";

/// Kraken 거래소
pub struct Kraken {
    credentials: ExchangeCredentials,
    nonce: NonceSource,
}

impl Kraken {
    /// 새 Kraken 인스턴스 생성
    pub fn new(credentials: ExchangeCredentials) -> Self {
        Self {
            credentials,
            nonce: NonceSource::new(),
        }
    }

    fn sign(&self, path: &str, nonce: &str, post_data: &str) -> ClientResult<String> {
        // the decode error would echo secret bytes, so it is dropped
        let secret = base64_decode(self.credentials.api_secret())
            .map_err(|_| ClientError::config(self.id(), "API secret is not valid base64"))?;

        let mut message = path.as_bytes().to_vec();
        message.extend(sha256(format!("{nonce}{post_data}").as_bytes()));

        Ok(base64_encode(&hmac(HashAlgorithm::Sha512, &secret, &message)))
    }
}

impl Exchange for Kraken {
    fn id(&self) -> ExchangeId {
        ExchangeId::Kraken
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

        if !request.signed {
            let query = encode_query(&endpoint.merged(&request.params));
            return endpoint.into_request(&request.method, &query, Default::default(), None);
        }

        let nonce = time::nanos(now)
            .ok_or_else(|| ClientError::prepare(self.id(), "timestamp out of nanosecond range"))?;

        let mut params = request.params.clone();
        params.insert("nonce".into(), nonce.as_str().into());
        let post_data = encode_query(&params);

        let signature = self.sign(endpoint.path(), &nonce, &post_data)?;
        let headers = header_map([
            ("API-Key", self.credentials.api_key()),
            ("API-Sign", signature.as_str()),
            (CONTENT_TYPE, FORM),
        ]);

        let query = encode_query(endpoint.embedded());
        endpoint.into_request(&request.method, &query, headers, Some(post_data))
    }
}
