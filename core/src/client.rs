//! The order gateway: one entry point per order lifecycle event.
//!
//! # Design
//! `OrderGateway` holds only immutable configuration (endpoint resolver,
//! credentials) and a transport, so it can be shared across threads and
//! called concurrently. Every operation is split into a `build_*` step that
//! produces an `HttpRequest` and a `parse_*` step that consumes an
//! `HttpResponse`; the convenience methods (`create`, `submit`, ...) run
//! both around exactly one transport call. Hosts that execute HTTP
//! themselves can call the `build_*` / `parse_*` pair directly.
//!
//! The generalized API (`/api/*`) returns an `OrderNotification`; the legacy
//! webhook returns only the id the service assigned to the order.

use serde::Serialize;
use tracing::{debug, error, instrument};

use crate::config::GatewayConfig;
use crate::endpoint::{Action, EndpointResolver};
use crate::error::{GatewayError, Result};
use crate::http::{HttpRequest, HttpResponse, Transport, UreqTransport};
use crate::request::{RequestBuilder, SubmitMode};
use crate::response;
use crate::types::{Order, OrderCancellation, OrderNotification, OrderPartialRefund};
use crate::validate::Validate;

/// Sends order lifecycle events to the fraud-review service.
#[derive(Debug, Clone)]
pub struct OrderGateway<T = UreqTransport> {
    endpoints: EndpointResolver,
    requests: RequestBuilder,
    transport: T,
}

impl OrderGateway<UreqTransport> {
    /// A gateway that performs blocking HTTP calls with `ureq`.
    pub fn new(config: GatewayConfig) -> Self {
        let transport = UreqTransport::new(config.timeout);
        Self::with_transport(config, transport)
    }
}

impl<T> OrderGateway<T> {
    pub fn with_transport(config: GatewayConfig, transport: T) -> Self {
        Self {
            endpoints: config.endpoints,
            requests: RequestBuilder::new(config.credentials),
            transport,
        }
    }

    pub fn endpoints(&self) -> &EndpointResolver {
        &self.endpoints
    }

    /// Builds the signed request for `action` without sending it.
    pub fn build_request<P>(&self, action: Action, payload: &P) -> Result<HttpRequest>
    where
        P: Serialize + Validate,
    {
        // The generalized API selects submission by path, never by header.
        self.requests
            .build(self.endpoints.resolve(action), payload, SubmitMode::Deferred)
    }

    /// Builds a request for the legacy create/update webhook. With
    /// `SubmitMode::Immediate` the service also queues the order for analysis.
    pub fn build_legacy_request(&self, order: &Order, mode: SubmitMode) -> Result<HttpRequest> {
        self.requests
            .build(self.endpoints.resolve(Action::OrderCreatedWebhook), order, mode)
    }

    pub fn parse_notification(&self, action: Action, response: &HttpResponse) -> Result<OrderNotification> {
        response::interpret(action, response)
    }

    pub fn parse_order_id(&self, response: &HttpResponse) -> Result<u64> {
        response::interpret(Action::OrderCreatedWebhook, response).map(|n| n.id)
    }
}

impl<T: Transport> OrderGateway<T> {
    /// Sends a new order without submitting it for analysis.
    pub fn create(&self, order: &Order) -> Result<OrderNotification> {
        self.send(Action::Create, order)
    }

    /// Sends an updated version of an order the service already knows.
    pub fn update(&self, order: &Order) -> Result<OrderNotification> {
        self.send(Action::Update, order)
    }

    /// Sends an order and submits it for analysis.
    pub fn submit(&self, order: &Order) -> Result<OrderNotification> {
        self.send(Action::Submit, order)
    }

    pub fn cancel(&self, cancellation: &OrderCancellation) -> Result<OrderNotification> {
        self.send(Action::Cancel, cancellation)
    }

    pub fn partly_refund(&self, refund: &OrderPartialRefund) -> Result<OrderNotification> {
        self.send(Action::Refund, refund)
    }

    /// Legacy webhook: create or update an order, returning the service id.
    pub fn create_or_update_order(&self, order: &Order) -> Result<u64> {
        let request = self.build_legacy_request(order, SubmitMode::Deferred)?;
        let response = self.execute(Action::OrderCreatedWebhook, &request)?;
        self.parse_order_id(&response)
    }

    /// Legacy webhook: create or update an order and submit it for analysis.
    pub fn submit_order(&self, order: &Order) -> Result<u64> {
        let request = self.build_legacy_request(order, SubmitMode::Immediate)?;
        let response = self.execute(Action::OrderCreatedWebhook, &request)?;
        self.parse_order_id(&response)
    }

    fn send<P>(&self, action: Action, payload: &P) -> Result<OrderNotification>
    where
        P: Serialize + Validate,
    {
        let request = self.build_request(action, payload)?;
        let response = self.execute(action, &request)?;
        self.parse_notification(action, &response)
    }

    #[instrument(level = "debug", skip(self, request), fields(url = %request.url))]
    fn execute(&self, action: Action, request: &HttpRequest) -> Result<HttpResponse> {
        debug!(body_len = request.body.len(), "sending order event");
        match self.transport.send(request) {
            Ok(response) => {
                debug!(status = response.status, "received response");
                Ok(response)
            }
            Err(fault) => {
                error!(error = %fault, "failed to send order to server");
                Err(GatewayError::Transport {
                    message: "failed to send order to server".to_string(),
                    source: fault,
                })
            }
        }
    }
}
