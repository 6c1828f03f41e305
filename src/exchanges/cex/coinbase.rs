//! Coinbase Exchange request signing
//!
//! Same prehash layout as OKX/KuCoin, with a unix-seconds timestamp.

use chrono::{DateTime, Utc};

use crate::client::ExchangeCredentials;
use crate::errors::ClientResult;
use crate::exchanges::common::{header_map, request_path, split_json, Endpoint, CONTENT_TYPE, JSON};
use crate::types::{Exchange, ExchangeId, PreparedRequest, RequestSpec};
use crate::utils::crypto::hmac_sha256_base64;
use crate::utils::{time, NonceSource};

const BASE_URL: &str = "https://api.exchange.coinbase.com";

/// Coinbase 거래소
pub struct Coinbase {
    credentials: ExchangeCredentials,
    nonce: NonceSource,
}

impl Coinbase {
    pub fn new(credentials: ExchangeCredentials) -> Self {
        Self {
            credentials,
            nonce: NonceSource::new(),
        }
    }
}

impl Exchange for Coinbase {
    fn id(&self) -> ExchangeId {
        ExchangeId::Coinbase
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
            let timestamp = time::seconds(now);
            let prehash = format!(
                "{}{}{}{}",
                timestamp,
                request.method.as_str(),
                request_path(endpoint.path(), &query),
                body.as_deref().unwrap_or_default()
            );
            let signature = hmac_sha256_base64(self.credentials.api_secret(), &prehash);

            headers.extend(header_map([
                ("CB-ACCESS-KEY", self.credentials.api_key()),
                ("CB-ACCESS-SIGN", signature.as_str()),
                ("CB-ACCESS-TIMESTAMP", timestamp.as_str()),
                ("CB-ACCESS-PASSPHRASE", self.credentials.passphrase()),
            ]));
        }

        endpoint.into_request(&request.method, &query, headers, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchanges::test_support::{credentials, fixed_now};

    fn coinbase() -> Coinbase {
        Coinbase::new(credentials())
    }

    #[test]
    fn test_unsigned_products() {
        let prepared = coinbase()
            .prepare_request_at(&RequestSpec::get("/products"), fixed_now())
            .unwrap();
        assert_eq!(prepared.url, "https://api.exchange.coinbase.com/products");
        assert!(prepared.header("CB-ACCESS-KEY").is_none());
        assert!(prepared.header("CB-ACCESS-SIGN").is_none());
    }

    #[test]
    fn test_signed_accounts_uses_seconds() {
        let prepared = coinbase()
            .prepare_request_at(&RequestSpec::get("/accounts").signed(true), fixed_now())
            .unwrap();

        assert_eq!(prepared.header("CB-ACCESS-TIMESTAMP"), Some("1704164645"));
        assert_eq!(prepared.header("CB-ACCESS-KEY"), Some("test_key"));
        assert_eq!(prepared.header("CB-ACCESS-PASSPHRASE"), Some("test_passphrase"));
        assert_eq!(prepared.header("CB-ACCESS-SIGN"), Some("Q0le3EmQ2A9zaToEG83K7w9ZXHigVhAF2O3WRcjdUPk="));
    }

    #[test]
    fn test_signed_post_orders() {
        let request = RequestSpec::post("/orders")
            .with_param("product_id", "BTC-USD")
            .with_param("side", "buy")
            .with_param("size", "0.01")
            .signed(true);
        let prepared = coinbase().prepare_request_at(&request, fixed_now()).unwrap();

        let body = prepared.body.as_deref().unwrap();
        let expected = hmac_sha256_base64("test_secret", &format!("1704164645POST/orders{body}"));
        assert_eq!(prepared.header("CB-ACCESS-SIGN"), Some(expected.as_str()));
    }
}
