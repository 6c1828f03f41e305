//! Centralized exchange adapters
//!
//! 중앙화 거래소 구현체

mod binance;
mod bitget;
mod btse;
mod bybit;
mod coinbase;
mod gate;
mod huobi;
mod kraken;
mod kucoin;
mod mexc;
mod okx;

pub use binance::Binance;
pub use bitget::Bitget;
pub use btse::Btse;
pub use bybit::Bybit;
pub use coinbase::Coinbase;
pub use gate::Gate;
pub use huobi::Huobi;
pub use kraken::Kraken;
pub use kucoin::Kucoin;
pub use mexc::Mexc;
pub use okx::Okx;
