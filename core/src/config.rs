//! Gateway configuration.
//!
//! # Design
//! Everything a gateway needs is captured once, at construction, and never
//! mutated afterwards: the validated endpoint resolver, the merchant
//! credentials, and an optional transport timeout. Configuration can be
//! built explicitly or read from `RISKIFIED_*` environment variables.

use std::fmt;
use std::time::Duration;

use crate::endpoint::{EndpointResolver, Environment};
use crate::error::{GatewayError, Result};

pub const ENV_BASE_URL: &str = "RISKIFIED_BASE_URL";
pub const ENV_ENVIRONMENT: &str = "RISKIFIED_ENVIRONMENT";
pub const ENV_AUTH_TOKEN: &str = "RISKIFIED_AUTH_TOKEN";
pub const ENV_SHOP_DOMAIN: &str = "RISKIFIED_SHOP_DOMAIN";
pub const ENV_TIMEOUT_MS: &str = "RISKIFIED_TIMEOUT_MS";

/// Merchant credentials sent with every request.
///
/// The auth token only ever leaves the process as an HMAC key; `Debug`
/// output redacts it.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    auth_token: String,
    shop_domain: String,
}

impl Credentials {
    pub fn new(auth_token: &str, shop_domain: &str) -> Result<Self> {
        if auth_token.trim().is_empty() {
            return Err(GatewayError::InvalidConfiguration(
                "auth token must not be empty".to_string(),
            ));
        }
        if shop_domain.trim().is_empty() {
            return Err(GatewayError::InvalidConfiguration(
                "shop domain must not be empty".to_string(),
            ));
        }
        Ok(Self {
            auth_token: auth_token.to_string(),
            shop_domain: shop_domain.trim().to_string(),
        })
    }

    pub fn auth_token(&self) -> &str {
        &self.auth_token
    }

    pub fn shop_domain(&self) -> &str {
        &self.shop_domain
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("auth_token", &"<redacted>")
            .field("shop_domain", &self.shop_domain)
            .finish()
    }
}

/// Immutable gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub(crate) endpoints: EndpointResolver,
    pub(crate) credentials: Credentials,
    pub(crate) timeout: Option<Duration>,
}

impl GatewayConfig {
    pub fn new(base_url: &str, auth_token: &str, shop_domain: &str) -> Result<Self> {
        Ok(Self {
            endpoints: EndpointResolver::new(base_url)?,
            credentials: Credentials::new(auth_token, shop_domain)?,
            timeout: None,
        })
    }

    pub fn for_environment(env: Environment, auth_token: &str, shop_domain: &str) -> Result<Self> {
        Ok(Self {
            endpoints: EndpointResolver::for_environment(env),
            credentials: Credentials::new(auth_token, shop_domain)?,
            timeout: None,
        })
    }

    /// Reads the configuration from `RISKIFIED_*` environment variables.
    ///
    /// `RISKIFIED_BASE_URL` wins over `RISKIFIED_ENVIRONMENT`, which defaults
    /// to `sandbox`. The auth token and shop domain are required.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).filter(|v| !v.trim().is_empty()).ok_or_else(|| {
                GatewayError::InvalidConfiguration(format!("{key} is not set"))
            })
        };
        let auth_token = required(ENV_AUTH_TOKEN)?;
        let shop_domain = required(ENV_SHOP_DOMAIN)?;

        let mut config = match lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            Some(base_url) => Self::new(&base_url, &auth_token, &shop_domain)?,
            None => {
                let env = match lookup(ENV_ENVIRONMENT) {
                    Some(name) => name.parse()?,
                    None => Environment::Sandbox,
                };
                Self::for_environment(env, &auth_token, &shop_domain)?
            }
        };

        if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
            let millis: u64 = raw.trim().parse().map_err(|_| {
                GatewayError::InvalidConfiguration(format!(
                    "{ENV_TIMEOUT_MS} must be a number of milliseconds, got {raw:?}"
                ))
            })?;
            config = config.with_timeout(Duration::from_millis(millis));
        }
        Ok(config)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn endpoints(&self) -> &EndpointResolver {
        &self.endpoints
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn explicit_config() {
        let config = GatewayConfig::new("http://localhost:3000/", "abc123", "shop.example.com").unwrap();
        assert_eq!(config.endpoints().base_url(), "http://localhost:3000");
        assert_eq!(config.credentials().shop_domain(), "shop.example.com");
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn empty_credentials_are_rejected() {
        assert!(matches!(
            GatewayConfig::new("http://localhost:3000", "", "shop.example.com"),
            Err(GatewayError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            GatewayConfig::for_environment(Environment::Sandbox, "abc123", " "),
            Err(GatewayError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn debug_redacts_auth_token() {
        let credentials = Credentials::new("super-secret", "shop.example.com").unwrap();
        let rendered = format!("{credentials:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("shop.example.com"));
    }

    #[test]
    fn env_defaults_to_sandbox() {
        let config = GatewayConfig::from_lookup(lookup_from(&[
            (ENV_AUTH_TOKEN, "abc123"),
            (ENV_SHOP_DOMAIN, "shop.example.com"),
        ]))
        .unwrap();
        assert_eq!(config.endpoints().base_url(), "https://sandbox.riskified.com");
    }

    #[test]
    fn env_base_url_wins_over_environment() {
        let config = GatewayConfig::from_lookup(lookup_from(&[
            (ENV_AUTH_TOKEN, "abc123"),
            (ENV_SHOP_DOMAIN, "shop.example.com"),
            (ENV_ENVIRONMENT, "production"),
            (ENV_BASE_URL, "http://127.0.0.1:8080"),
            (ENV_TIMEOUT_MS, "2500"),
        ]))
        .unwrap();
        assert_eq!(config.endpoints().base_url(), "http://127.0.0.1:8080");
        assert_eq!(config.timeout(), Some(Duration::from_millis(2500)));
    }

    #[test]
    fn env_missing_token_is_invalid() {
        let err = GatewayConfig::from_lookup(lookup_from(&[(ENV_SHOP_DOMAIN, "shop.example.com")]))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_AUTH_TOKEN));
    }

    #[test]
    fn env_unknown_environment_is_invalid() {
        let err = GatewayConfig::from_lookup(lookup_from(&[
            (ENV_AUTH_TOKEN, "abc123"),
            (ENV_SHOP_DOMAIN, "shop.example.com"),
            (ENV_ENVIRONMENT, "moon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidConfiguration(_)));
    }

    #[test]
    fn env_bad_timeout_is_invalid() {
        let err = GatewayConfig::from_lookup(lookup_from(&[
            (ENV_AUTH_TOKEN, "abc123"),
            (ENV_SHOP_DOMAIN, "shop.example.com"),
            (ENV_TIMEOUT_MS, "soon"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains(ENV_TIMEOUT_MS));
    }
}
