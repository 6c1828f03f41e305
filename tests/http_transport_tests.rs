//! End-to-end tests over real HTTP against a local mock server

use mockito::Matcher;
use reqwest::Method;

use cryptoexchange::{
    params, ClientConfig, ClientError, ExchangeClient, ExchangeCredentials, ExchangeId, Params,
};

fn client_for(id: ExchangeId, base_url: String) -> ExchangeClient {
    let mut client = ExchangeClient::new(ClientConfig::default().with_timeout(5_000)).unwrap();
    client.add_exchange(id, ExchangeCredentials::new("k", "s").with_base_url(base_url));
    client
}

#[tokio::test]
async fn test_unsigned_get_decodes_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v3/ticker/price")
        .match_query(Matcher::UrlEncoded("symbol".into(), "BTCUSDT".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"symbol":"BTCUSDT","price":"42000.00"}"#)
        .create_async()
        .await;

    let client = client_for(ExchangeId::Binance, server.url());
    let ticker = client
        .send_request_value(
            Method::GET,
            "/api/v3/ticker/price",
            params! { "symbol" => "BTCUSDT" },
            false,
        )
        .await
        .unwrap();

    assert_eq!(ticker["price"], "42000.00");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_signed_get_sends_auth() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v3/account")
        .match_header("X-MBX-APIKEY", "k")
        .match_query(Matcher::AllOf(vec![
            Matcher::Regex("timestamp=\\d+".into()),
            Matcher::Regex("signature=[0-9a-f]{64}".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"balances":[]}"#)
        .create_async()
        .await;

    let client = client_for(ExchangeId::Binance, server.url());
    client
        .send_request_value(Method::GET, "/api/v3/account", Params::new(), true)
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v5/trade/order")
        .match_header("content-type", "application/json")
        .match_header("OK-ACCESS-KEY", "k")
        .match_body(Matcher::JsonString(
            r#"{"instId":"BTC-USDT","sz":"1"}"#.into(),
        ))
        .with_status(200)
        .with_body(r#"{"code":"0","data":[]}"#)
        .create_async()
        .await;

    let client = client_for(ExchangeId::Okx, server.url());
    client
        .send_request_value(
            Method::POST,
            "/api/v5/trade/order",
            params! { "instId" => "BTC-USDT", "sz" => "1" },
            true,
        )
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_status_keeps_body() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/ticker")
        .match_query(Matcher::Any)
        .with_status(429)
        .with_body(r#"{"msg":"rate limited"}"#)
        .create_async()
        .await;

    let client = client_for(ExchangeId::Binance, server.url());
    let err = client
        .send_request_value(Method::GET, "/ticker", Params::new(), false)
        .await
        .unwrap_err();

    match err {
        ClientError::Api { status, body, .. } => {
            assert_eq!(status, 429);
            assert_eq!(body, r#"{"msg":"rate limited"}"#);
        },
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // nothing listens on port 9 in the test environment
    let client = client_for(ExchangeId::Gate, "http://127.0.0.1:9".into());
    let err = client
        .send_request_value(Method::GET, "/api/v4/spot/time", Params::new(), false)
        .await
        .unwrap_err();

    assert!(err.is_network_error());
    assert_eq!(err.exchange(), Some(ExchangeId::Gate));
}
