//! BTSE request signing
//!
//! `request-sign` is HMAC-SHA384 (hex) over `path + nonce + body`, where the
//! path is the endpoint without the `/spot` prefix of the base URL.

use chrono::{DateTime, Utc};

use crate::client::ExchangeCredentials;
use crate::errors::ClientResult;
use crate::exchanges::common::{header_map, split_json, Endpoint, CONTENT_TYPE, JSON};
use crate::types::{Exchange, ExchangeId, PreparedRequest, RequestSpec};
use crate::utils::crypto::{sign, HashAlgorithm, SignatureEncoding};
use crate::utils::{time, NonceSource};

const BASE_URL: &str = "https://api.btse.com/spot";

/// BTSE 거래소
pub struct Btse {
    credentials: ExchangeCredentials,
    nonce: NonceSource,
}

impl Btse {
    pub fn new(credentials: ExchangeCredentials) -> Self {
        Self {
            credentials,
            nonce: NonceSource::new(),
        }
    }

    fn sign(&self, message: &str) -> String {
        sign(
            HashAlgorithm::Sha384,
            SignatureEncoding::Hex,
            self.credentials.api_secret(),
            message,
        )
    }
}

impl Exchange for Btse {
    fn id(&self) -> ExchangeId {
        ExchangeId::Btse
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
            let nonce = time::millis(now);
            let signature = self.sign(&format!(
                "{}{}{}",
                endpoint.path(),
                nonce,
                body.as_deref().unwrap_or_default()
            ));

            headers.extend(header_map([
                ("request-api", self.credentials.api_key()),
                ("request-nonce", nonce.as_str()),
                ("request-sign", signature.as_str()),
            ]));
        }

        endpoint.into_request(&request.method, &query, headers, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;

    use crate::exchanges::test_support::{credentials, fixed_now};

    fn btse() -> Btse {
        Btse::new(credentials())
    }

    #[test]
    fn test_unsigned_keeps_spot_prefix() {
        let request = RequestSpec::get("/api/v3.2/price").with_param("symbol", "BTC-USD");
        let prepared = btse().prepare_request_at(&request, fixed_now()).unwrap();

        assert_eq!(
            prepared.url,
            "https://api.btse.com/spot/api/v3.2/price?symbol=BTC-USD"
        );
        assert_eq!(prepared.header("Content-Type"), Some(JSON));
        assert!(prepared.header("request-sign").is_none());
    }

    #[test]
    fn test_signed_get() {
        let request = RequestSpec::get("/api/v3.2/user/wallet").signed(true);
        let prepared = btse().prepare_request_at(&request, fixed_now()).unwrap();

        assert_eq!(prepared.header("request-api"), Some("test_key"));
        assert_eq!(prepared.header("request-nonce"), Some("1704164645678"));
        assert_eq!(prepared.header("request-sign"), Some("512204ff7a3f44f51263641005e69b400cc657f1f1861480e3194e005a7d6b7dcf31496256e59ed2ff9bab6959e25e32"));
        assert_eq!(prepared.header("request-sign").map(str::len), Some(96));
    }

    #[test]
    fn test_signed_post_signs_body() {
        let request = RequestSpec::post("/api/v3.2/order")
            .with_params(params! {
                "symbol" => "BTC-USD",
                "side" => "BUY",
                "type" => "LIMIT",
                "price" => 30000,
                "size" => "0.01",
            })
            .signed(true);
        let prepared = btse().prepare_request_at(&request, fixed_now()).unwrap();

        let body = prepared.body.as_deref().unwrap();
        assert_eq!(
            body,
            r#"{"price":30000,"side":"BUY","size":"0.01","symbol":"BTC-USD","type":"LIMIT"}"#
        );
        // HMAC-SHA384 hex of "/api/v3.2/order" ++ nonce ++ body
        assert_eq!(
            prepared.header("request-sign"),
            Some("08ccbe882face52df3b7a12561856885111ad77810650907aeee665008fbcbc7bf573cf5cac751dae14262aa07c0a1f8")
        );
    }
}
