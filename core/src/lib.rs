//! Synchronous client SDK for reporting order lifecycle events to the
//! Riskified fraud-review service.
//!
//! # Overview
//! An [`OrderGateway`] sends orders, cancellations and partial refunds to the
//! service and turns the JSON answer into an [`OrderNotification`] (or, for
//! the legacy webhook, the bare order id). Each call is exactly one blocking
//! HTTP round trip; there is no retry, pooling policy or batching.
//!
//! # Design
//! - [`EndpointResolver`] maps an [`Action`] onto an absolute URL below a
//!   base URL validated once at construction.
//! - [`RequestBuilder`] validates and serializes a payload and signs the body
//!   with the merchant auth token.
//! - [`Transport`] performs the round trip; [`UreqTransport`] is the default.
//! - [`response::interpret`] decodes the envelope and separates success,
//!   business rejection and malformed answers.
//! - Every failure is a [`GatewayError`]; nothing is swallowed.
//!
//! ```no_run
//! use riskified_core::{Environment, GatewayConfig, Order, OrderGateway};
//! use rust_decimal::Decimal;
//!
//! # fn main() -> riskified_core::Result<()> {
//! let config = GatewayConfig::for_environment(Environment::Sandbox, "token", "shop.example.com")?;
//! let gateway = OrderGateway::new(config);
//! let notification = gateway.create(&Order::new(1, Decimal::new(9990, 2)))?;
//! println!("order {} is {}", notification.id, notification.status);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod request;
pub mod response;
pub mod types;
pub mod validate;

#[cfg(test)]
mod test_logs;

pub use client::OrderGateway;
pub use config::{Credentials, GatewayConfig};
pub use endpoint::{Action, EndpointResolver, Environment};
pub use error::{ErrorKind, GatewayError, Result, TransportFault};
pub use http::{HttpRequest, HttpResponse, Transport, UreqTransport};
pub use request::{RequestBuilder, SubmitMode};
pub use types::{
    Address, Customer, DiscountCode, ErrorDetail, LineItem, Order, OrderCancellation,
    OrderNotification, OrderPartialRefund, PartialRefundDetails, PaymentDetails, ShippingLine,
    SuccessfulResult, TransactionResult,
};
pub use validate::Validate;
