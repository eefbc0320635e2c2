//! Response interpretation: decode the envelope and decide the outcome.
//!
//! A response is either a clean success carrying an order id, or an error.
//! There is no "success with warnings" state.

use tracing::error;

use crate::endpoint::Action;
use crate::error::{GatewayError, Result, TransportFault};
use crate::http::HttpResponse;
use crate::types::{OrderNotification, TransactionResult};

/// Checks `response` to `action` and extracts the notification.
///
/// - body is not an envelope: `MalformedResponse` for 2xx, `Transport` with
///   a `Status` fault otherwise
/// - `isSuccessful: false`: `BusinessRejection`, whatever else is present
/// - `isSuccessful: true` with a non-2xx status: `Transport` with a `Status`
///   fault; the service never succeeds with an error status
/// - `isSuccessful: true` without `result` or without `result.id`:
///   `MalformedResponse`
pub fn interpret(action: Action, response: &HttpResponse) -> Result<OrderNotification> {
    let envelope: TransactionResult = match serde_json::from_str(&response.body) {
        Ok(envelope) => envelope,
        Err(e) if response.is_success() => {
            error!(%action, status = response.status, error = %e, "response body is not a transaction result");
            return Err(GatewayError::MalformedResponse(format!(
                "response body could not be decoded: {e}"
            )));
        }
        Err(_) => {
            error!(%action, status = response.status, "service answered with an error status");
            return Err(status_error(response));
        }
    };

    if !envelope.is_successful {
        return Err(GatewayError::BusinessRejection {
            status: response.status,
            reason: envelope.error.map(|detail| detail.message),
        });
    }

    if !response.is_success() {
        error!(%action, status = response.status, "service reported success with an error status");
        return Err(status_error(response));
    }

    let Some(result) = envelope.result else {
        let msg = "successful response was not in a recognized format: result is missing";
        error!(%action, status = response.status, "{msg}");
        return Err(GatewayError::MalformedResponse(msg.to_string()));
    };

    let Some(id) = result.id else {
        let msg = "successful response carried no order id";
        error!(%action, status = response.status, "{msg}");
        return Err(GatewayError::MalformedResponse(msg.to_string()));
    };

    Ok(OrderNotification {
        id,
        status: result.status.unwrap_or_default(),
        description: result.description,
    })
}

fn status_error(response: &HttpResponse) -> GatewayError {
    GatewayError::Transport {
        message: "failed to send order to server".to_string(),
        source: TransportFault::Status {
            status: response.status,
            body: response.body.clone(),
        },
    }
}
