//! Client error hierarchy
//!
//! - Exchange: request construction, credential, transport or body-read failure
//! - Api: the exchange answered with a non-2xx status
//! - Decode: the body did not match the requested shape
//! - UnsupportedExchange: unknown exchange name
//! - NoActiveExchange: no exchange selected yet
//! - Setup: the HTTP transport could not be built

use thiserror::Error;

use crate::types::ExchangeId;

/// Phase in which an exchange-scoped failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Building the URL, query or body
    Prepare,
    /// Credentials are unusable (e.g. secret is not valid base64)
    Config,
    /// Network-level failure, including reading the response body
    Transport,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Stage::Prepare => "prepare",
            Stage::Config => "config",
            Stage::Transport => "transport",
        };
        f.write_str(s)
    }
}

#[derive(Error, Debug)]
pub enum ClientError {
    /// Exchange-scoped failure before a usable response was obtained
    #[error("Exchange {exchange} error ({stage}): {message}")]
    Exchange {
        exchange: ExchangeId,
        stage: Stage,
        message: String,
    },

    /// Non-success HTTP status, body kept verbatim
    #[error("API request failed with status {status}: {body}")]
    Api {
        exchange: ExchangeId,
        status: u16,
        body: String,
    },

    /// Response body is not valid JSON or does not fit the target type
    #[error("Exchange {exchange} failed to parse response as {data_type}: {message}")]
    Decode {
        exchange: ExchangeId,
        data_type: String,
        message: String,
    },

    #[error("Unsupported exchange: {name}")]
    UnsupportedExchange { name: String },

    #[error("No exchange selected")]
    NoActiveExchange,

    /// The HTTP transport could not be built
    #[error("Client setup failed: {message}")]
    Setup { message: String },
}

impl ClientError {
    pub(crate) fn prepare(exchange: ExchangeId, message: impl Into<String>) -> Self {
        ClientError::Exchange {
            exchange,
            stage: Stage::Prepare,
            message: message.into(),
        }
    }

    pub(crate) fn config(exchange: ExchangeId, message: impl Into<String>) -> Self {
        ClientError::Exchange {
            exchange,
            stage: Stage::Config,
            message: message.into(),
        }
    }

    /// Returns the error code as a string constant
    pub fn code(&self) -> &'static str {
        match self {
            ClientError::Exchange { stage, .. } => match stage {
                Stage::Prepare => "REQUEST_ERROR",
                Stage::Config => "CONFIG_ERROR",
                Stage::Transport => "NETWORK_ERROR",
            },
            ClientError::Api { .. } => "API_ERROR",
            ClientError::Decode { .. } => "DECODE_ERROR",
            ClientError::UnsupportedExchange { .. } => "UNSUPPORTED_EXCHANGE",
            ClientError::NoActiveExchange => "NO_ACTIVE_EXCHANGE",
            ClientError::Setup { .. } => "SETUP_ERROR",
        }
    }

    /// Exchange the error is scoped to, if any
    pub fn exchange(&self) -> Option<ExchangeId> {
        match self {
            ClientError::Exchange { exchange, .. }
            | ClientError::Api { exchange, .. }
            | ClientError::Decode { exchange, .. } => Some(*exchange),
            ClientError::UnsupportedExchange { .. }
            | ClientError::NoActiveExchange
            | ClientError::Setup { .. } => None,
        }
    }

    /// HTTP status of an API error
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_api_error(&self) -> bool {
        matches!(self, ClientError::Api { .. })
    }

    pub fn is_network_error(&self) -> bool {
        matches!(
            self,
            ClientError::Exchange {
                stage: Stage::Transport,
                ..
            }
        )
    }

    pub fn is_decode_error(&self) -> bool {
        matches!(self, ClientError::Decode { .. })
    }
}

/// Failure reported by a [`Transport`](crate::client::Transport)
#[derive(Error, Debug, Clone)]
#[error("{message} ({url})")]
pub struct TransportError {
    pub url: String,
    pub message: String,
    pub timeout: bool,
}

impl TransportError {
    pub fn new(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            message: message.into(),
            timeout: false,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        // Signed query strings must not end up in error messages.
        let url = err
            .url()
            .map(|u| {
                let mut u = u.clone();
                u.set_query(None);
                u.to_string()
            })
            .unwrap_or_default();
        let err = err.without_url();
        if err.is_timeout() {
            TransportError {
                url,
                message: "Request timed out".into(),
                timeout: true,
            }
        } else if err.is_connect() {
            TransportError {
                url,
                message: "Connection failed".into(),
                timeout: false,
            }
        } else {
            TransportError {
                url,
                message: err.to_string(),
                timeout: false,
            }
        }
    }
}

/// Result 타입 alias
pub type ClientResult<T> = Result<T, ClientError>;
