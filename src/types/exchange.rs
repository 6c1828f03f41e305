//! Exchange trait - request preparation interface
//!
//! 거래소별 요청 생성/서명 인터페이스

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{PreparedRequest, RequestSpec};
use crate::client::ExchangeCredentials;
use crate::errors::{ClientError, ClientResult};
use crate::utils::NonceSource;

/// Exchange ID - identifies the exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExchangeId {
    Binance,
    Bitget,
    Btse,
    Bybit,
    Okx,
    Gate,
    Huobi,
    Kraken,
    Kucoin,
    Coinbase,
    Mexc,
}

impl ExchangeId {
    /// Every supported exchange, in registry order
    pub const ALL: [ExchangeId; 11] = [
        ExchangeId::Binance,
        ExchangeId::Bitget,
        ExchangeId::Btse,
        ExchangeId::Bybit,
        ExchangeId::Okx,
        ExchangeId::Gate,
        ExchangeId::Huobi,
        ExchangeId::Kraken,
        ExchangeId::Kucoin,
        ExchangeId::Coinbase,
        ExchangeId::Mexc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExchangeId::Binance => "BINANCE",
            ExchangeId::Bitget => "BITGET",
            ExchangeId::Btse => "BTSE",
            ExchangeId::Bybit => "BYBIT",
            ExchangeId::Okx => "OKX",
            ExchangeId::Gate => "GATE",
            ExchangeId::Huobi => "HUOBI",
            ExchangeId::Kraken => "KRAKEN",
            ExchangeId::Kucoin => "KUCOIN",
            ExchangeId::Coinbase => "COINBASE",
            ExchangeId::Mexc => "MEXC",
        }
    }
}

impl std::fmt::Display for ExchangeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExchangeId {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        ExchangeId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ClientError::UnsupportedExchange {
                name: name.to_string(),
            })
    }
}

/// 거래소 요청 생성 인터페이스
///
/// Every implementation owns an immutable credential set and a monotonic
/// nonce source, so one instance can prepare requests from several tasks.
pub trait Exchange: Send + Sync {
    /// 거래소 ID 반환
    fn id(&self) -> ExchangeId;

    /// Base URL used when the credentials carry no override
    fn default_base_url(&self) -> &'static str;

    fn credentials(&self) -> &ExchangeCredentials;

    fn nonce_source(&self) -> &NonceSource;

    /// Configured override, else the exchange default
    fn base_url(&self) -> &str {
        self.credentials()
            .base_url()
            .unwrap_or_else(|| self.default_base_url())
    }

    /// Builds the request using `now` as the signing timestamp/nonce.
    fn prepare_request_at(
        &self,
        request: &RequestSpec,
        now: DateTime<Utc>,
    ) -> ClientResult<PreparedRequest>;

    /// Builds the request with a fresh timestamp from the adapter's nonce source.
    fn prepare_request(&self, request: &RequestSpec) -> ClientResult<PreparedRequest> {
        self.prepare_request_at(request, self.nonce_source().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchange_id_round_trip() {
        for id in ExchangeId::ALL {
            assert_eq!(id.as_str().parse::<ExchangeId>().unwrap(), id);
            assert_eq!(id.to_string(), id.as_str());
        }
        assert_eq!("okx".parse::<ExchangeId>().unwrap(), ExchangeId::Okx);
        assert_eq!(" Kraken ".parse::<ExchangeId>().unwrap(), ExchangeId::Kraken);
    }

    #[test]
    fn test_unknown_exchange_id() {
        let err = "FTX".parse::<ExchangeId>().unwrap_err();
        assert!(matches!(err, ClientError::UnsupportedExchange { ref name } if name == "FTX"));
        assert_eq!(err.code(), "UNSUPPORTED_EXCHANGE");
    }

    #[test]
    fn test_exchange_id_serde() {
        let json = serde_json::to_string(&ExchangeId::Kucoin).unwrap();
        assert_eq!(json, "\"KUCOIN\"");
        let id: ExchangeId = serde_json::from_str("\"BTSE\"").unwrap();
        assert_eq!(id, ExchangeId::Btse);
    }
}
