//! Gateway configuration sourced from the environment.
//!
//! The credential is mandatory and its absence is detected here -- before
//! any network call -- as the distinct [`GatewayError::MissingCredential`]
//! kind. Base URL and model have production defaults and exist mainly so
//! tests and proxies can redirect the client.

use secrecy::SecretString;

use silk_types::gateway::GatewayError;

/// Environment variable holding the gateway bearer credential.
pub const API_KEY_ENV: &str = "SILK_GATEWAY_KEY";

/// Environment variable overriding the gateway base URL.
pub const BASE_URL_ENV: &str = "SILK_GATEWAY_URL";

/// Environment variable overriding the completion model.
pub const MODEL_ENV: &str = "SILK_GATEWAY_MODEL";

const DEFAULT_BASE_URL: &str = "https://ai.gateway.lovable.dev/v1";
const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";

/// Connection settings for the upstream chat-completion gateway.
pub struct GatewayConfig {
    /// Bearer credential; never logged or shown in Debug output.
    pub api_key: SecretString,
    pub base_url: String,
    pub model: String,
}

impl GatewayConfig {
    /// Load the configuration from the environment.
    ///
    /// Fails fast with [`GatewayError::MissingCredential`] when the key is
    /// unset or blank.
    pub fn from_env() -> Result<Self, GatewayError> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or(GatewayError::MissingCredential)?;

        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let model = std::env::var(MODEL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Ok(Self {
            api_key: SecretString::from(api_key),
            base_url,
            model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test so the env-var mutations cannot race each other.
    #[test]
    fn test_from_env() {
        // SAFETY: this is the only test touching these vars, and it runs
        // its phases serially.
        unsafe {
            std::env::remove_var(API_KEY_ENV);
            std::env::remove_var(BASE_URL_ENV);
            std::env::remove_var(MODEL_ENV);
        }

        // Missing credential is the distinct configuration error.
        let err = GatewayConfig::from_env().unwrap_err();
        assert!(matches!(err, GatewayError::MissingCredential));

        // A blank credential counts as missing too.
        unsafe { std::env::set_var(API_KEY_ENV, "   ") };
        let err = GatewayConfig::from_env().unwrap_err();
        assert!(matches!(err, GatewayError::MissingCredential));

        // With a key set, base URL and model fall back to defaults.
        unsafe { std::env::set_var(API_KEY_ENV, "test-gateway-key") };
        let config = GatewayConfig::from_env().unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);

        unsafe { std::env::remove_var(API_KEY_ENV) };
    }
}
