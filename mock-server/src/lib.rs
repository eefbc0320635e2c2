//! In-process stand-in for the fraud-review HTTP API.
//!
//! Accepts the same six POST routes as the real service, checks the
//! shop-domain and HMAC headers, and answers with the service's envelope.
//! Two order ids are reserved so clients can exercise failure paths over
//! real HTTP: [`DECLINED_ORDER_ID`] is rejected and [`EMPTY_RESULT_ORDER_ID`]
//! gets a success envelope with a null result.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use ring::hmac;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{info, warn};

pub const SHOP_DOMAIN_HEADER: &str = "x-riskified-shop-domain";
pub const HMAC_HEADER: &str = "x-riskified-hmac-sha256";
pub const SUBMIT_NOW_HEADER: &str = "x-riskified-submit-now";

pub const DECLINED_ORDER_ID: u64 = 999;
pub const EMPTY_RESULT_ORDER_ID: u64 = 998;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionResult {
    #[serde(rename = "isSuccessful")]
    pub is_successful: bool,
    pub result: Option<SuccessfulResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuccessfulResult {
    pub id: u64,
    pub status: String,
    pub description: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorDetail {
    pub message: String,
}

impl TransactionResult {
    fn success(id: u64, status: &str) -> Self {
        Self {
            is_successful: true,
            result: Some(SuccessfulResult {
                id,
                status: status.to_string(),
                description: format!("order {id} {status}"),
            }),
            error: None,
        }
    }

    fn failure(message: &str) -> Self {
        Self {
            is_successful: false,
            result: None,
            error: Some(ErrorDetail {
                message: message.to_string(),
            }),
        }
    }
}

#[derive(Clone)]
pub struct MockState {
    key: Arc<hmac::Key>,
}

impl MockState {
    pub fn new(auth_token: &str) -> Self {
        Self {
            key: Arc::new(hmac::Key::new(hmac::HMAC_SHA256, auth_token.as_bytes())),
        }
    }
}

type Reply = (StatusCode, Json<TransactionResult>);

pub fn app(auth_token: &str) -> Router {
    Router::new()
        .route("/api/create", post(create))
        .route("/api/update", post(update))
        .route("/api/submit", post(submit))
        .route("/api/cancel", post(cancel))
        .route("/api/refund", post(refund))
        .route("/webhooks/merchant_order_created", post(merchant_order_created))
        .with_state(MockState::new(auth_token))
}

pub async fn run(listener: TcpListener, auth_token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(auth_token)).await
}

async fn create(State(state): State<MockState>, headers: HeaderMap, body: Bytes) -> Reply {
    handle(&state, &headers, &body, "created")
}

async fn update(State(state): State<MockState>, headers: HeaderMap, body: Bytes) -> Reply {
    handle(&state, &headers, &body, "updated")
}

async fn submit(State(state): State<MockState>, headers: HeaderMap, body: Bytes) -> Reply {
    handle(&state, &headers, &body, "submitted")
}

async fn cancel(State(state): State<MockState>, headers: HeaderMap, body: Bytes) -> Reply {
    handle(&state, &headers, &body, "cancelled")
}

async fn refund(State(state): State<MockState>, headers: HeaderMap, body: Bytes) -> Reply {
    handle(&state, &headers, &body, "refunded")
}

async fn merchant_order_created(
    State(state): State<MockState>,
    headers: HeaderMap,
    body: Bytes,
) -> Reply {
    let submit_now = header(&headers, SUBMIT_NOW_HEADER) == Some("true");
    let status = if submit_now { "submitted" } else { "created" };
    handle(&state, &headers, &body, status)
}

fn handle(state: &MockState, headers: &HeaderMap, body: &[u8], status: &str) -> Reply {
    let Some(shop) = header(headers, SHOP_DOMAIN_HEADER).filter(|s| !s.is_empty()) else {
        warn!("request without shop domain");
        return reject(StatusCode::BAD_REQUEST, "missing shop domain header");
    };

    let signature = header(headers, HMAC_HEADER).and_then(|sig| hex::decode(sig).ok());
    let authentic = signature.is_some_and(|sig| hmac::verify(&state.key, body, &sig).is_ok());
    if !authentic {
        warn!(shop, "hmac verification failed");
        return reject(StatusCode::UNAUTHORIZED, "hmac verification failed");
    }

    let id = serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|payload| payload.get("id").and_then(serde_json::Value::as_u64));
    let Some(id) = id else {
        return reject(StatusCode::UNPROCESSABLE_ENTITY, "body must be an order with a numeric id");
    };

    info!(shop, id, status, "order event accepted");
    match id {
        DECLINED_ORDER_ID => (StatusCode::OK, Json(TransactionResult::failure("order declined"))),
        EMPTY_RESULT_ORDER_ID => (
            StatusCode::OK,
            Json(TransactionResult {
                is_successful: true,
                result: None,
                error: None,
            }),
        ),
        _ => (StatusCode::OK, Json(TransactionResult::success(id, status))),
    }
}

fn reject(code: StatusCode, message: &str) -> Reply {
    (code, Json(TransactionResult::failure(message)))
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_serializes() {
        let json = serde_json::to_value(TransactionResult::success(5, "created")).unwrap();
        assert_eq!(json["isSuccessful"], true);
        assert_eq!(json["result"]["id"], 5);
        assert_eq!(json["result"]["status"], "created");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn failure_envelope_has_null_result() {
        let json = serde_json::to_value(TransactionResult::failure("nope")).unwrap();
        assert_eq!(json["isSuccessful"], false);
        assert!(json["result"].is_null());
        assert_eq!(json["error"]["message"], "nope");
    }

    #[test]
    fn envelope_roundtrips_through_json() {
        let envelope = TransactionResult::success(42, "refunded");
        let json = serde_json::to_string(&envelope).unwrap();
        let back: TransactionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, envelope);
    }
}
