//! Exchange Implementations
//!
//! 거래소별 구현체

pub mod cex;
pub(crate) mod common;

pub use cex::{Binance, Bitget, Btse, Bybit, Coinbase, Gate, Huobi, Kraken, Kucoin, Mexc, Okx};

use crate::client::ExchangeCredentials;
use crate::types::{Exchange, ExchangeId};

/// Builds the adapter for `id`
pub fn create_exchange(id: ExchangeId, credentials: ExchangeCredentials) -> Box<dyn Exchange> {
    match id {
        ExchangeId::Binance => Box::new(Binance::new(credentials)),
        ExchangeId::Bitget => Box::new(Bitget::new(credentials)),
        ExchangeId::Btse => Box::new(Btse::new(credentials)),
        ExchangeId::Bybit => Box::new(Bybit::new(credentials)),
        ExchangeId::Okx => Box::new(Okx::new(credentials)),
        ExchangeId::Gate => Box::new(Gate::new(credentials)),
        ExchangeId::Huobi => Box::new(Huobi::new(credentials)),
        ExchangeId::Kraken => Box::new(Kraken::new(credentials)),
        ExchangeId::Kucoin => Box::new(Kucoin::new(credentials)),
        ExchangeId::Coinbase => Box::new(Coinbase::new(credentials)),
        ExchangeId::Mexc => Box::new(Mexc::new(credentials)),
    }
}
