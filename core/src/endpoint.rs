//! Environment table and endpoint resolution.
//!
//! # Design
//! The base URL is validated once, when the resolver is built, so resolving
//! an action afterwards cannot fail. Action paths are fixed by the remote
//! service and appended verbatim to the base URL.

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::error::{GatewayError, Result};

/// A named deployment target of the fraud-review service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    Sandbox,
    Staging,
    Production,
    /// A locally running service, e.g. the mock server.
    Debug,
}

impl Environment {
    pub fn base_url(self) -> &'static str {
        match self {
            Environment::Sandbox => "https://sandbox.riskified.com",
            Environment::Staging => "https://s.riskified.com",
            Environment::Production => "https://wh.riskified.com",
            Environment::Debug => "http://localhost:3000",
        }
    }
}

impl FromStr for Environment {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" => Ok(Environment::Sandbox),
            "staging" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            "debug" | "local" => Ok(Environment::Debug),
            other => Err(GatewayError::InvalidConfiguration(format!(
                "unknown environment: {other:?}"
            ))),
        }
    }
}

/// A logical operation on the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Legacy create/update/submit webhook.
    OrderCreatedWebhook,
    Create,
    Update,
    Submit,
    Cancel,
    Refund,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::OrderCreatedWebhook,
        Action::Create,
        Action::Update,
        Action::Submit,
        Action::Cancel,
        Action::Refund,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Action::OrderCreatedWebhook => "/webhooks/merchant_order_created",
            Action::Create => "/api/create",
            Action::Update => "/api/update",
            Action::Submit => "/api/submit",
            Action::Cancel => "/api/cancel",
            Action::Refund => "/api/refund",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::OrderCreatedWebhook => "order-created-webhook",
            Action::Create => "create",
            Action::Update => "update",
            Action::Submit => "submit",
            Action::Cancel => "cancel",
            Action::Refund => "refund",
        };
        f.write_str(name)
    }
}

/// Maps actions onto absolute URLs below a validated base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointResolver {
    base_url: String,
}

impl EndpointResolver {
    /// Validates `base_url`: it must be an absolute `http` or `https` URL with
    /// a host. The parsed, percent-encoded form is kept, without trailing
    /// slashes.
    pub fn new(base_url: &str) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let parsed = Url::parse(trimmed).map_err(|e| {
            GatewayError::InvalidConfiguration(format!("malformed base url {base_url:?}: {e}"))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(GatewayError::InvalidConfiguration(format!(
                "base url {base_url:?} must use http or https"
            )));
        }
        if parsed.host_str().is_none_or(str::is_empty) {
            return Err(GatewayError::InvalidConfiguration(format!(
                "base url {base_url:?} has no host"
            )));
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(GatewayError::InvalidConfiguration(format!(
                "base url {base_url:?} must not carry a query or fragment"
            )));
        }
        Ok(Self {
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn for_environment(env: Environment) -> Self {
        Self {
            base_url: env.base_url().to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn resolve(&self, action: Action) -> String {
        format!("{}{}", self.base_url, action.path())
    }
}
