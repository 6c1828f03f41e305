//! Core types

mod exchange;
mod request;

pub use exchange::{Exchange, ExchangeId};
pub use request::{ParamValue, Params, PreparedRequest, RequestSpec};
