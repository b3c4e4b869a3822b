//! Configuration module
//!
//! Explicit configuration for the upload handshake. Endpoints and the
//! anti-forgery token are passed in at construction time; `from_env` reads
//! them from `TRIPMEDIA_*` variables for binaries.

use std::env;
use std::time::Duration;

use crate::error::AppError;

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Endpoints and credentials for the upload handshake backend.
#[derive(Clone, Debug)]
pub struct HandshakeConfig {
    /// POST target that issues upload descriptors.
    pub authorize_url: String,
    /// POST target for completion reports.
    pub completion_url: String,
    /// Anti-forgery token sent as `X-CSRFToken` on both requests.
    pub csrf_token: String,
    /// Request timeout applied to both handshake calls.
    pub timeout: Duration,
}

impl HandshakeConfig {
    pub fn new(
        authorize_url: impl Into<String>,
        completion_url: impl Into<String>,
        csrf_token: impl Into<String>,
    ) -> Self {
        Self {
            authorize_url: authorize_url.into(),
            completion_url: completion_url.into(),
            csrf_token: csrf_token.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Create config from environment: TRIPMEDIA_UPLOAD_URL,
    /// TRIPMEDIA_UPLOAD_SUCCESS_URL, TRIPMEDIA_CSRF_TOKEN.
    pub fn from_env() -> Result<Self, AppError> {
        let authorize_url = require_env("TRIPMEDIA_UPLOAD_URL")?;
        let completion_url = require_env("TRIPMEDIA_UPLOAD_SUCCESS_URL")?;
        let csrf_token = require_env("TRIPMEDIA_CSRF_TOKEN")?;
        Ok(Self::new(authorize_url, completion_url, csrf_token))
    }
}

fn require_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Config(format!("Missing environment variable: {}", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_applies_default_timeout() {
        let config = HandshakeConfig::new("https://a/upload/", "https://a/success/", "token");
        assert_eq!(config.authorize_url, "https://a/upload/");
        assert_eq!(config.completion_url, "https://a/success/");
        assert_eq!(config.csrf_token, "token");
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    // Single test for all env cases so parallel tests never race on the vars.
    #[test]
    fn test_from_env() {
        env::set_var("TRIPMEDIA_UPLOAD_URL", "https://a/upload/");
        env::set_var("TRIPMEDIA_UPLOAD_SUCCESS_URL", "https://a/success/");
        env::set_var("TRIPMEDIA_CSRF_TOKEN", "token");
        let config = HandshakeConfig::from_env().unwrap();
        assert_eq!(config.authorize_url, "https://a/upload/");
        assert_eq!(config.completion_url, "https://a/success/");
        assert_eq!(config.csrf_token, "token");

        env::remove_var("TRIPMEDIA_CSRF_TOKEN");
        let err = HandshakeConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("TRIPMEDIA_CSRF_TOKEN"));

        env::remove_var("TRIPMEDIA_UPLOAD_URL");
        env::remove_var("TRIPMEDIA_UPLOAD_SUCCESS_URL");
        assert!(HandshakeConfig::from_env().is_err());
    }
}
