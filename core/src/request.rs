//! Request construction: validation, JSON serialization and signing.
//!
//! # Design
//! The auth token is a shared secret. It is never placed in the body or sent
//! in clear; instead the body is signed with HMAC-SHA256 keyed by the token
//! and the hex digest travels in `X-RISKIFIED-HMAC-SHA256`. The shop domain
//! identifies the merchant account in `X-RISKIFIED-SHOP-DOMAIN`. Header names
//! are a wire contract with the service and must not change.

use ring::hmac;
use serde::Serialize;

use crate::config::Credentials;
use crate::error::{GatewayError, Result};
use crate::http::HttpRequest;
use crate::validate::Validate;

pub const CONTENT_TYPE_HEADER: &str = "content-type";
pub const SHOP_DOMAIN_HEADER: &str = "X-RISKIFIED-SHOP-DOMAIN";
pub const HMAC_HEADER: &str = "X-RISKIFIED-HMAC-SHA256";
pub const SUBMIT_NOW_HEADER: &str = "X-RISKIFIED-SUBMIT-NOW";

/// Whether the legacy webhook should also queue the order for analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    Deferred,
    Immediate,
}

/// Turns payloads into signed `HttpRequest` values. Performs no I/O.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    credentials: Credentials,
}

impl RequestBuilder {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// Validates and serializes `payload`, then signs it for `url`.
    pub fn build<P>(&self, url: String, payload: &P, mode: SubmitMode) -> Result<HttpRequest>
    where
        P: Serialize + Validate,
    {
        payload.validate()?;
        let body = serde_json::to_string(payload).map_err(|e| GatewayError::FieldFormat {
            message: format!("the order could not be serialized to JSON: {e}"),
            source: Some(e),
        })?;

        let mut headers = vec![
            (CONTENT_TYPE_HEADER.to_string(), "application/json".to_string()),
            (
                SHOP_DOMAIN_HEADER.to_string(),
                self.credentials.shop_domain().to_string(),
            ),
            (
                HMAC_HEADER.to_string(),
                sign(self.credentials.auth_token(), &body),
            ),
        ];
        if mode == SubmitMode::Immediate {
            headers.push((SUBMIT_NOW_HEADER.to_string(), "true".to_string()));
        }

        Ok(HttpRequest { url, headers, body })
    }
}

/// Hex-encoded HMAC-SHA256 of `body` keyed by `auth_token`.
pub fn sign(auth_token: &str, body: &str) -> String {
    let key = hmac::Key::new(hmac::HMAC_SHA256, auth_token.as_bytes());
    hex::encode(hmac::sign(&key, body.as_bytes()).as_ref())
}
