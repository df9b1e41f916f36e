//! Environment-driven gateway configuration.
//!
//! The API key and model come from the environment; everything else has a
//! documented default. The gateway holds no config file and no persistent
//! state.

use std::env;

/// Model used when `DEEPINFRA_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "meta-llama/Llama-3.3-70B-Instruct";

/// OpenAI-compatible API root used when `DEEPINFRA_BASE_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "https://api.deepinfra.com/v1/openai";

/// Listen address used when `REVIEWD_BIND` is unset. Localhost only.
pub const DEFAULT_BIND: &str = "127.0.0.1:8787";

/// Per-attempt wall-clock timeout for completion calls.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Total attempts per review, first try included.
pub const MAX_ATTEMPTS: u32 = 3;

/// Backoff base: the wait after failed attempt `i` (0-based) is `2^i * base`.
pub const BACKOFF_BASE_MS: u64 = 1000;

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub bind: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),
}

impl GatewayConfig {
    /// Load from the environment. `DEEPINFRA_API_KEY` is required; empty
    /// values count as unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = non_empty_var("DEEPINFRA_API_KEY")
            .ok_or(ConfigError::MissingVar("DEEPINFRA_API_KEY"))?;

        Ok(Self {
            api_key,
            model: non_empty_var("DEEPINFRA_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: non_empty_var("DEEPINFRA_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            bind: non_empty_var("REVIEWD_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string()),
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so the env mutations cannot race each other.
    #[test]
    fn test_from_env() {
        env::remove_var("DEEPINFRA_API_KEY");
        env::remove_var("DEEPINFRA_MODEL");
        env::remove_var("DEEPINFRA_BASE_URL");
        env::remove_var("REVIEWD_BIND");

        assert!(matches!(
            GatewayConfig::from_env(),
            Err(ConfigError::MissingVar("DEEPINFRA_API_KEY"))
        ));

        env::set_var("DEEPINFRA_API_KEY", "");
        assert!(GatewayConfig::from_env().is_err());

        env::set_var("DEEPINFRA_API_KEY", "di-test-key");
        let config = GatewayConfig::from_env().unwrap();
        assert_eq!(config.api_key, "di-test-key");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.bind, DEFAULT_BIND);

        env::set_var("DEEPINFRA_MODEL", "meta-llama/Llama-3.1-8B-Instruct");
        env::set_var("DEEPINFRA_BASE_URL", "http://127.0.0.1:9999/v1/openai");
        let config = GatewayConfig::from_env().unwrap();
        assert_eq!(config.model, "meta-llama/Llama-3.1-8B-Instruct");
        assert_eq!(config.base_url, "http://127.0.0.1:9999/v1/openai");

        env::remove_var("DEEPINFRA_API_KEY");
        env::remove_var("DEEPINFRA_MODEL");
        env::remove_var("DEEPINFRA_BASE_URL");
    }
}
