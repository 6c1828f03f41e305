//! Query-string canonicalization

use crate::types::Params;

/// `k=v&...` in key order, keys and values percent-encoded.
///
/// This is the exact string that is both signed and sent.
pub fn encode_query(params: &Params) -> String {
    params
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                urlencoding::encode(k),
                urlencoding::encode(&v.to_string())
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// `k=v&...` in key order without percent-encoding
pub fn raw_query(params: &Params) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Appends an already-encoded pair to a query string
pub fn append_pair(query: &str, key: &str, value: &str) -> String {
    let pair = format!("{}={}", urlencoding::encode(key), urlencoding::encode(value));
    if query.is_empty() {
        pair
    } else {
        format!("{query}&{pair}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;

    #[test]
    fn test_encode_query_sorted() {
        let params = params! {
            "symbol" => "BTCUSDT",
            "limit" => 5,
            "side" => "BUY",
        };
        assert_eq!(encode_query(&params), "limit=5&side=BUY&symbol=BTCUSDT");
    }

    #[test]
    fn test_encode_query_escapes() {
        let params = params! {
            "symbol" => "BTC/USDT",
            "note" => "a b",
        };
        assert_eq!(encode_query(&params), "note=a%20b&symbol=BTC%2FUSDT");
        assert_eq!(raw_query(&params), "note=a b&symbol=BTC/USDT");
    }

    #[test]
    fn test_empty_params() {
        assert_eq!(encode_query(&Params::new()), "");
        assert_eq!(raw_query(&Params::new()), "");
    }

    #[test]
    fn test_append_pair() {
        assert_eq!(append_pair("", "signature", "ab"), "signature=ab");
        assert_eq!(append_pair("a=1", "signature", "ab"), "a=1&signature=ab");
    }
}
