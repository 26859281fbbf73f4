//! Credential handling with secure memory.
//!
//! Inference tokens are wrapped with the `secrecy` crate so they never show
//! up in logs, debug output or error messages.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;

/// A secret string that won't be logged or displayed.
pub struct SecretString(SecretBox<str>);

impl SecretString {
    /// Create a new secret string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(value.into().into_boxed_str()))
    }

    /// Expose the secret value. Only call this where the token is sent.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for SecretString {
    fn clone(&self) -> Self {
        Self::new(self.expose())
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Access settings for the hosted inference API.
#[derive(Clone, Default)]
pub struct InferenceCredentials {
    /// Bearer token; anonymous access when absent
    pub api_token: Option<SecretString>,

    /// Endpoint override (self-hosted inference, proxies)
    pub base_url: Option<String>,
}

impl InferenceCredentials {
    /// Anonymous access to the public endpoint.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Authenticated access; blank tokens count as anonymous.
    pub fn with_token(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            api_token: (!token.trim().is_empty()).then(|| SecretString::new(token)),
            base_url: None,
        }
    }

    /// Read `HF_API_TOKEN` and `HF_INFERENCE_URL`; unset or blank values are ignored.
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("HF_API_TOKEN").ok(),
            std::env::var("HF_INFERENCE_URL").ok(),
        )
    }

    fn from_vars(token: Option<String>, base_url: Option<String>) -> Self {
        let credentials = token.map(Self::with_token).unwrap_or_default();
        match base_url.filter(|url| !url.trim().is_empty()) {
            Some(url) => credentials.with_base_url(url),
            None => credentials,
        }
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }
}

impl fmt::Debug for InferenceCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceCredentials")
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_not_in_debug_or_display() {
        let secret = SecretString::new("hf_super_secret");
        assert_eq!(format!("{:?}", secret), "[REDACTED]");
        assert_eq!(format!("{}", secret), "[REDACTED]");
        assert_eq!(secret.expose(), "hf_super_secret");
    }

    #[test]
    fn test_credentials_debug_hides_token() {
        let creds = InferenceCredentials::with_token("hf_secret").with_base_url("http://localhost:8080");
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("hf_secret"));
        assert!(debug.contains("localhost:8080"));
    }

    #[test]
    fn test_env_values() {
        let creds = InferenceCredentials::from_vars(
            Some("hf_env".into()),
            Some("http://proxy:8080".into()),
        );
        assert_eq!(creds.api_token.as_ref().map(SecretString::expose), Some("hf_env"));
        assert_eq!(creds.base_url.as_deref(), Some("http://proxy:8080"));

        let creds = InferenceCredentials::from_vars(None, Some("  ".into()));
        assert!(creds.api_token.is_none());
        assert!(creds.base_url.is_none());
    }

    #[test]
    fn test_blank_token_is_anonymous() {
        assert!(InferenceCredentials::with_token("  ").api_token.is_none());
        assert!(InferenceCredentials::with_token("hf_x").api_token.is_some());
    }
}
