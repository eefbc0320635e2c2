//! Domain DTOs for the fraud-review API.
//!
//! # Design
//! Request payloads (`Order`, `OrderCancellation`, `OrderPartialRefund`)
//! serialize to the field names the service expects. Monetary amounts are
//! `Decimal` on the Rust side and JSON numbers on the wire, written digit for
//! digit from the decimal (`99.90` stays `99.90`); they never pass through
//! `f64`. Optional fields are omitted from the body rather than sent as
//! `null`.
//!
//! Response types mirror the service's envelope. `TransactionResult` is the
//! raw decode target; `OrderNotification` only exists once the envelope has
//! been checked by the response interpreter.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Request payloads
// ---------------------------------------------------------------------------

/// An order as reported by the merchant's commerce system.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: u64,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::arbitrary_precision_option"
    )]
    pub total_discounts: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cart_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<Address>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub line_items: Vec<LineItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shipping_lines: Vec<ShippingLine>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub discount_codes: Vec<DiscountCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_details: Option<PaymentDetails>,
}

impl Order {
    /// An order with only the required fields set.
    pub fn new(id: u64, total: Decimal) -> Self {
        Self {
            id,
            total,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Customer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orders_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_email: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Billing or shipping address.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    pub title: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingLine {
    pub title: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiscountCode {
    pub code: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
}

/// Card data as seen by the merchant's payment gateway. Never the full PAN.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_card_bin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avs_result_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cvv_result_code: Option<String>,
    /// Masked number, e.g. `XXXX-XXXX-XXXX-4242`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_card_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_card_company: Option<String>,
}

/// Cancellation of an order the service already knows about.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderCancellation {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancel_reason: String,
}

/// One or more partial refunds of an order the service already knows about.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderPartialRefund {
    pub id: u64,
    pub partial_refunds: Vec<PartialRefundDetails>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PartialRefundDetails {
    pub refund_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refunded_at: Option<DateTime<Utc>>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

/// Response envelope returned by every endpoint.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct TransactionResult {
    #[serde(rename = "isSuccessful")]
    pub is_successful: bool,
    #[serde(default)]
    pub result: Option<SuccessfulResult>,
    #[serde(default)]
    pub error: Option<ErrorDetail>,
}

/// Payload of a successful envelope. Fields are optional on the wire; the
/// response interpreter decides whether what arrived is usable.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct SuccessfulResult {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Failure detail. The service sends either `"error": "text"` or
/// `"error": {"message": "text"}`; both decode to the same value.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorDetail {
    pub message: String,
}

impl<'de> Deserialize<'de> for ErrorDetail {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Text(String),
            Object { message: String },
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::Text(message) | Wire::Object { message } => ErrorDetail { message },
        })
    }
}

/// A checked, successful answer from the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderNotification {
    pub id: u64,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn minimal_order_serializes_required_fields_only() {
        let order = Order::new(1, dec!(99.90));
        let json = serde_json::to_string(&order).unwrap();
        assert_eq!(json, r#"{"id":1,"total":99.90}"#);
    }

    #[test]
    fn long_amounts_keep_every_digit() {
        let order = Order {
            total_discounts: Some(dec!(0.12345678901234567891)),
            ..Order::new(1, dec!(12345678901234.567))
        };
        let json = serde_json::to_string(&order).unwrap();
        assert_eq!(
            json,
            r#"{"id":1,"total":12345678901234.567,"total_discounts":0.12345678901234567891}"#
        );

        let back: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(back.total, dec!(12345678901234.567));
        assert_eq!(back.total_discounts, Some(dec!(0.12345678901234567891)));
    }

    #[test]
    fn decoded_amounts_keep_their_scale() {
        let order: Order = serde_json::from_str(r#"{"id":1,"total":10.50}"#).unwrap();
        assert_eq!(order.total.scale(), 2);
        assert_eq!(serde_json::to_string(&order).unwrap(), r#"{"id":1,"total":10.50}"#);
    }

    #[test]
    fn order_roundtrips_without_precision_loss() {
        let order = Order {
            email: Some("buyer@example.com".to_string()),
            currency: Some("USD".to_string()),
            total_discounts: Some(dec!(5.05)),
            line_items: vec![LineItem {
                title: "Widget".to_string(),
                price: dec!(47.43),
                quantity: 2,
                product_id: Some("w-1".to_string()),
                sku: None,
            }],
            ..Order::new(42, dec!(89.81))
        };
        let json = serde_json::to_string(&order).unwrap();
        let back: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(back, order);
        assert_eq!(back.total, dec!(89.81));
        assert_eq!(back.line_items[0].price, dec!(47.43));
    }

    #[test]
    fn timestamps_serialize_as_rfc3339() {
        let cancellation = OrderCancellation {
            id: 7,
            cancelled_at: Some("2024-03-01T10:15:00Z".parse().unwrap()),
            cancel_reason: "customer request".to_string(),
        };
        let json = serde_json::to_value(&cancellation).unwrap();
        assert_eq!(json["cancelled_at"], "2024-03-01T10:15:00Z");
        assert_eq!(json["cancel_reason"], "customer request");
    }

    #[test]
    fn transaction_result_decodes_success() {
        let result: TransactionResult =
            serde_json::from_str(r#"{"isSuccessful":true,"result":{"id":555,"status":"created"}}"#)
                .unwrap();
        assert!(result.is_successful);
        let ok = result.result.unwrap();
        assert_eq!(ok.id, Some(555));
        assert_eq!(ok.status.as_deref(), Some("created"));
        assert!(result.error.is_none());
    }

    #[test]
    fn transaction_result_decodes_null_result() {
        let result: TransactionResult =
            serde_json::from_str(r#"{"isSuccessful":true,"result":null}"#).unwrap();
        assert!(result.result.is_none());
    }

    #[test]
    fn transaction_result_requires_is_successful() {
        let result: Result<TransactionResult, _> = serde_json::from_str(r#"{"result":{"id":1}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn error_detail_accepts_both_shapes() {
        let text: TransactionResult =
            serde_json::from_str(r#"{"isSuccessful":false,"error":"bad shop"}"#).unwrap();
        let object: TransactionResult =
            serde_json::from_str(r#"{"isSuccessful":false,"error":{"message":"bad shop"}}"#)
                .unwrap();
        assert_eq!(text.error, object.error);
        assert_eq!(text.error.unwrap().message, "bad shop");
    }

    #[test]
    fn partial_refund_amounts_are_numbers() {
        let refund = OrderPartialRefund {
            id: 3,
            partial_refunds: vec![PartialRefundDetails {
                refund_id: "r-1".to_string(),
                refunded_at: None,
                amount: dec!(10.5),
                currency: "EUR".to_string(),
                reason: None,
            }],
        };
        let json = serde_json::to_value(&refund).unwrap();
        assert_eq!(json["partial_refunds"][0]["amount"], 10.5);
        assert!(json["partial_refunds"][0].get("reason").is_none());
    }
}
