//! Gate.io (APIv4) request signing

use chrono::{DateTime, Utc};
use reqwest::Method;

use crate::client::ExchangeCredentials;
use crate::errors::{ClientError, ClientResult};
use crate::exchanges::common::{header_map, Endpoint, CONTENT_TYPE, JSON};
use crate::types::{Exchange, ExchangeId, PreparedRequest, RequestSpec};
use crate::utils::crypto::{sha512_hex, sign, HashAlgorithm, SignatureEncoding};
use crate::utils::query::encode_query;
use crate::utils::{time, NonceSource};

const BASE_URL: &str = "https://api.gateio.ws";

/// Gate.io 거래소
pub struct Gate {
    credentials: ExchangeCredentials,
    nonce: NonceSource,
}

impl Gate {
    pub fn new(credentials: ExchangeCredentials) -> Self {
        Self {
            credentials,
            nonce: NonceSource::new(),
        }
    }

    /// `METHOD\npath\nquery\n[sha512(body)\n]timestamp`
    ///
    /// The body hash line is only present for non-GET requests.
    fn payload(method: &Method, path: &str, query: &str, body: Option<&str>, timestamp: &str) -> String {
        let mut payload = format!("{}\n{}\n{}\n", method.as_str(), path, query);
        if *method != Method::GET {
            payload.push_str(&sha512_hex(body.unwrap_or_default().as_bytes()));
            payload.push('\n');
        }
        payload.push_str(timestamp);
        payload
    }
}

impl Exchange for Gate {
    fn id(&self) -> ExchangeId {
        ExchangeId::Gate
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

        // only GET carries params in the query
        let (query, body) = if request.method == Method::GET {
            (encode_query(&endpoint.merged(&request.params)), None)
        } else {
            let body = serde_json::to_string(&request.params).map_err(|e| {
                ClientError::prepare(self.id(), format!("failed to encode body: {e}"))
            })?;
            (encode_query(endpoint.embedded()), Some(body))
        };

        let mut headers = header_map([("Accept", JSON), (CONTENT_TYPE, JSON)]);

        if request.signed {
            let timestamp = time::seconds(now);
            let payload = Self::payload(
                &request.method,
                endpoint.path(),
                &query,
                body.as_deref(),
                &timestamp,
            );
            let signature = sign(
                HashAlgorithm::Sha512,
                SignatureEncoding::Hex,
                self.credentials.api_secret(),
                &payload,
            );

            headers.extend(header_map([
                ("KEY", self.credentials.api_key()),
                ("Timestamp", timestamp.as_str()),
                ("SIGN", signature.as_str()),
            ]));
        }

        endpoint.into_request(&request.method, &query, headers, body)
    }
}
