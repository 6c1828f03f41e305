//! Request-building helpers shared by the exchange adapters

use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{Method, Url};
use std::collections::HashMap;

use crate::errors::{ClientError, ClientResult};
use crate::types::{ExchangeId, ParamValue, Params, PreparedRequest};
use crate::utils::query::encode_query;

pub(crate) const CONTENT_TYPE: &str = "Content-Type";
pub(crate) const JSON: &str = "application/json";
pub(crate) const FORM: &str = "application/x-www-form-urlencoded";

/// Base URL joined with an endpoint.
///
/// Query pairs written directly into the endpoint (`/path?x=1`) are split off
/// into `embedded` so they go through the same canonical encoding as params.
pub(crate) struct Endpoint {
    id: ExchangeId,
    url: Url,
    path: String,
    embedded: Params,
}

impl Endpoint {
    pub(crate) fn parse(id: ExchangeId, base_url: &str, endpoint: &str) -> ClientResult<Self> {
        let raw = format!("{base_url}{endpoint}");
        let mut url = Url::parse(&raw)
            .map_err(|e| ClientError::prepare(id, format!("invalid URL '{raw}': {e}")))?;
        if url.host_str().is_none() {
            return Err(ClientError::prepare(id, format!("URL '{raw}' has no host")));
        }

        let embedded: Params = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), ParamValue::String(v.into_owned())))
            .collect();
        url.set_query(None);

        // Signed paths must match the normalized path on the wire, minus the
        // base URL's own path prefix (`/spot` for BTSE).
        let prefix = Url::parse(base_url)
            .map(|base| base.path().trim_end_matches('/').to_string())
            .unwrap_or_default();
        let path = url
            .path()
            .strip_prefix(prefix.as_str())
            .filter(|rest| rest.starts_with('/'))
            .unwrap_or(url.path())
            .to_string();

        Ok(Self {
            id,
            url,
            path,
            embedded,
        })
    }

    /// Endpoint path as sent, without query or base URL path
    pub(crate) fn path(&self) -> &str {
        &self.path
    }

    /// Full URL path, including any path carried by the base URL
    pub(crate) fn url_path(&self) -> &str {
        self.url.path()
    }

    /// Host, with the port when one is explicit
    pub(crate) fn host(&self) -> String {
        let host = self.url.host_str().unwrap_or_default();
        match self.url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        }
    }

    /// Query pairs embedded in the endpoint
    pub(crate) fn embedded(&self) -> &Params {
        &self.embedded
    }

    /// Embedded query pairs overlaid with `params`; `params` wins on conflict
    pub(crate) fn merged(&self, params: &Params) -> Params {
        let mut merged = self.embedded.clone();
        merged.extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
    }

    /// Final URL string carrying `query` verbatim
    pub(crate) fn url_with_query(&self, query: &str) -> String {
        let mut url = self.url.clone();
        if !query.is_empty() {
            url.set_query(Some(query));
        }
        url.to_string()
    }

    pub(crate) fn into_request(
        self,
        method: &Method,
        query: &str,
        headers: HashMap<String, String>,
        body: Option<String>,
    ) -> ClientResult<PreparedRequest> {
        // reject now rather than as a transport failure; values may be secrets
        for (name, value) in &headers {
            if HeaderName::from_bytes(name.as_bytes()).is_err() {
                return Err(ClientError::prepare(self.id, format!("invalid header name '{name}'")));
            }
            if HeaderValue::from_str(value).is_err() {
                return Err(ClientError::prepare(
                    self.id,
                    format!("invalid value for header '{name}'"),
                ));
            }
        }

        Ok(PreparedRequest {
            method: method.clone(),
            url: self.url_with_query(query),
            headers,
            body,
        })
    }

    pub(crate) fn exchange(&self) -> ExchangeId {
        self.id
    }
}

/// Methods whose parameters travel in the query string
pub(crate) fn uses_query(method: &Method) -> bool {
    *method == Method::GET || *method == Method::DELETE
}

/// Query string and body for JSON-bodied exchanges.
///
/// GET/DELETE put everything in the query; other methods serialize `params` as
/// a JSON object (`{}` when empty) and keep only embedded pairs in the query.
pub(crate) fn split_json(
    endpoint: &Endpoint,
    method: &Method,
    params: &Params,
) -> ClientResult<(String, Option<String>)> {
    if uses_query(method) {
        Ok((encode_query(&endpoint.merged(params)), None))
    } else {
        let body = serde_json::to_string(params).map_err(|e| {
            ClientError::prepare(endpoint.exchange(), format!("failed to encode body: {e}"))
        })?;
        Ok((encode_query(endpoint.embedded()), Some(body)))
    }
}

/// Path plus `?query` when a query is present
pub(crate) fn request_path(path: &str, query: &str) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}

pub(crate) fn header_map<const N: usize>(pairs: [(&str, &str); N]) -> HashMap<String, String> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;

    #[test]
    fn test_endpoint_parse() {
        let endpoint =
            Endpoint::parse(ExchangeId::Btse, "https://api.btse.com/spot", "/api/v3.2/order?x=1")
                .unwrap();
        assert_eq!(endpoint.path(), "/api/v3.2/order");
        assert_eq!(endpoint.url_path(), "/spot/api/v3.2/order");
        assert_eq!(endpoint.host(), "api.btse.com");

        let local = Endpoint::parse(ExchangeId::Huobi, "http://127.0.0.1:8080", "/v1").unwrap();
        assert_eq!(local.host(), "127.0.0.1:8080");
        assert_eq!(endpoint.embedded(), &params! { "x" => "1" });
        assert_eq!(
            endpoint.url_with_query(""),
            "https://api.btse.com/spot/api/v3.2/order"
        );
    }

    #[test]
    fn test_path_matches_wire() {
        let endpoint =
            Endpoint::parse(ExchangeId::Okx, "https://www.okx.com", "/api/v5/a b/../c").unwrap();
        assert_eq!(endpoint.path(), "/api/v5/c");
        assert_eq!(endpoint.url_with_query(""), "https://www.okx.com/api/v5/c");

        let spaced = Endpoint::parse(ExchangeId::Btse, "https://api.btse.com/spot", "/a b").unwrap();
        assert_eq!(spaced.path(), "/a%20b");
        assert_eq!(spaced.url_path(), "/spot/a%20b");

        let root = Endpoint::parse(ExchangeId::Binance, "https://api.binance.com", "").unwrap();
        assert_eq!(root.path(), "/");
    }

    #[test]
    fn test_invalid_header_is_prepare_error() {
        let endpoint = Endpoint::parse(ExchangeId::Okx, "https://www.okx.com", "/x").unwrap();
        let headers = header_map([("OK-ACCESS-PASSPHRASE", "bad\npass")]);
        let err = endpoint
            .into_request(&Method::GET, "", headers, None)
            .err()
            .unwrap();

        assert_eq!(err.code(), "REQUEST_ERROR");
        assert!(err.to_string().contains("OK-ACCESS-PASSPHRASE"));
        assert!(!err.to_string().contains("bad"));

        let endpoint = Endpoint::parse(ExchangeId::Okx, "https://www.okx.com", "/x").unwrap();
        let headers = header_map([("bad header", "v")]);
        assert!(endpoint.into_request(&Method::GET, "", headers, None).is_err());
    }

    #[test]
    fn test_endpoint_invalid_url() {
        let err = Endpoint::parse(ExchangeId::Okx, "not a url", "/api").err().unwrap();
        assert_eq!(err.code(), "REQUEST_ERROR");
        assert_eq!(err.exchange(), Some(ExchangeId::Okx));

        assert!(Endpoint::parse(ExchangeId::Okx, "https://", "").is_err());
    }

    #[test]
    fn test_merged_params_override_embedded() {
        let endpoint =
            Endpoint::parse(ExchangeId::Gate, "https://api.gateio.ws", "/x?limit=1&a=b").unwrap();
        let merged = endpoint.merged(&params! { "limit" => 5 });
        assert_eq!(merged, params! { "a" => "b", "limit" => 5 });
    }

    #[test]
    fn test_split_json() {
        let endpoint = Endpoint::parse(ExchangeId::Okx, "https://www.okx.com", "/o").unwrap();
        let params = params! { "instId" => "BTC-USDT", "sz" => "1" };

        let (query, body) = split_json(&endpoint, &Method::GET, &params).unwrap();
        assert_eq!(query, "instId=BTC-USDT&sz=1");
        assert!(body.is_none());

        let (query, body) = split_json(&endpoint, &Method::POST, &params).unwrap();
        assert_eq!(query, "");
        assert_eq!(body.as_deref(), Some(r#"{"instId":"BTC-USDT","sz":"1"}"#));

        let (_, body) = split_json(&endpoint, &Method::POST, &Params::new()).unwrap();
        assert_eq!(body.as_deref(), Some("{}"));
    }

    #[test]
    fn test_request_path() {
        assert_eq!(request_path("/a", ""), "/a");
        assert_eq!(request_path("/a", "b=1"), "/a?b=1");
    }
}
