//! Credential and client configuration

use serde::Deserialize;
use std::fmt;

const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// 거래소 인증 정보
///
/// Immutable once built; each exchange adapter owns its own copy.
#[derive(Clone, Default, Deserialize)]
pub struct ExchangeCredentials {
    api_key: String,
    api_secret: String,
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    passphrase: Option<String>,
}

impl ExchangeCredentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            base_url: None,
            passphrase: None,
        }
    }

    /// Overrides the exchange's default base URL (testnets, proxies, mocks)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// 패스프레이즈 설정 (OKX, Bitget, KuCoin, Coinbase)
    pub fn with_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = Some(passphrase.into());
        self
    }

    // === Getters ===

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn api_secret(&self) -> &str {
        &self.api_secret
    }

    /// Base URL override; empty strings count as unset
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref().filter(|url| !url.is_empty())
    }

    /// Passphrase, or an empty string when none was configured
    pub fn passphrase(&self) -> &str {
        self.passphrase.as_deref().unwrap_or_default()
    }
}

impl fmt::Debug for ExchangeCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExchangeCredentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("base_url", &self.base_url)
            .field(
                "passphrase",
                &self.passphrase.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// HTTP 클라이언트 설정
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_timeout_ms")]
    timeout_ms: u64,
    #[serde(default)]
    user_agent: Option<String>,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: None,
        }
    }

    /// 타임아웃 설정 (밀리초)
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_builder() {
        let creds = ExchangeCredentials::new("test_key", "test_secret")
            .with_passphrase("phrase")
            .with_base_url("https://testnet.example.com");

        assert_eq!(creds.api_key(), "test_key");
        assert_eq!(creds.api_secret(), "test_secret");
        assert_eq!(creds.passphrase(), "phrase");
        assert_eq!(creds.base_url(), Some("https://testnet.example.com"));
    }

    #[test]
    fn test_empty_base_url_is_unset() {
        let creds = ExchangeCredentials::new("k", "s").with_base_url("");
        assert_eq!(creds.base_url(), None);
        assert_eq!(creds.passphrase(), "");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = ExchangeCredentials::new("visible_key", "hidden_secret")
            .with_passphrase("hidden_phrase");
        let debug = format!("{creds:?}");
        assert!(debug.contains("visible_key"));
        assert!(!debug.contains("hidden_secret"));
        assert!(!debug.contains("hidden_phrase"));
    }

    #[test]
    fn test_credentials_deserialize() {
        let creds: ExchangeCredentials =
            serde_json::from_str(r#"{"api_key":"k","api_secret":"s","passphrase":"p"}"#).unwrap();
        assert_eq!(creds.api_key(), "k");
        assert_eq!(creds.passphrase(), "p");
        assert_eq!(creds.base_url(), None);
    }

    #[test]
    fn test_client_config() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout_ms(), 30_000);

        let config = ClientConfig::new().with_timeout(5_000).with_user_agent("bot/1.0");
        assert_eq!(config.timeout_ms(), 5_000);
        assert_eq!(config.user_agent(), Some("bot/1.0"));

        let config: ClientConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.timeout_ms(), 30_000);
    }
}
