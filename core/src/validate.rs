//! Pre-send shape checks for request payloads.
//!
//! Catches what the service would reject anyway (missing ids, negative
//! amounts, malformed currency codes) before a request is built, so the
//! caller gets a `FieldFormat` error instead of a round trip.

use rust_decimal::Decimal;

use crate::error::{GatewayError, Result};
use crate::types::{LineItem, Order, OrderCancellation, OrderPartialRefund, PartialRefundDetails};

/// Shape validation for a payload about to be sent.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

impl Validate for Order {
    fn validate(&self) -> Result<()> {
        require_id(self.id)?;
        require_non_negative("total", self.total)?;
        if let Some(discounts) = self.total_discounts {
            require_non_negative("total_discounts", discounts)?;
        }
        if let Some(currency) = &self.currency {
            require_currency("currency", currency)?;
        }
        if let Some(email) = &self.email {
            if !email.contains('@') {
                return Err(GatewayError::field_format(format!(
                    "email {email:?} is not an email address"
                )));
            }
        }
        for (index, item) in self.line_items.iter().enumerate() {
            validate_line_item(index, item)?;
        }
        Ok(())
    }
}

impl Validate for OrderCancellation {
    fn validate(&self) -> Result<()> {
        require_id(self.id)?;
        if self.cancel_reason.trim().is_empty() {
            return Err(GatewayError::field_format("cancel_reason must not be empty"));
        }
        Ok(())
    }
}

impl Validate for OrderPartialRefund {
    fn validate(&self) -> Result<()> {
        require_id(self.id)?;
        if self.partial_refunds.is_empty() {
            return Err(GatewayError::field_format(
                "partial_refunds must contain at least one refund",
            ));
        }
        for (index, refund) in self.partial_refunds.iter().enumerate() {
            validate_refund(index, refund)?;
        }
        Ok(())
    }
}

fn validate_line_item(index: usize, item: &LineItem) -> Result<()> {
    if item.title.trim().is_empty() {
        return Err(GatewayError::field_format(format!(
            "line_items[{index}].title must not be empty"
        )));
    }
    if item.quantity == 0 {
        return Err(GatewayError::field_format(format!(
            "line_items[{index}].quantity must be positive"
        )));
    }
    require_non_negative(&format!("line_items[{index}].price"), item.price)
}

fn validate_refund(index: usize, refund: &PartialRefundDetails) -> Result<()> {
    if refund.refund_id.trim().is_empty() {
        return Err(GatewayError::field_format(format!(
            "partial_refunds[{index}].refund_id must not be empty"
        )));
    }
    if refund.amount <= Decimal::ZERO {
        return Err(GatewayError::field_format(format!(
            "partial_refunds[{index}].amount must be positive"
        )));
    }
    require_currency(&format!("partial_refunds[{index}].currency"), &refund.currency)
}

fn require_id(id: u64) -> Result<()> {
    if id == 0 {
        return Err(GatewayError::field_format("id must be positive"));
    }
    Ok(())
}

fn require_non_negative(field: &str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(GatewayError::field_format(format!(
            "{field} must not be negative, got {value}"
        )));
    }
    Ok(())
}

fn require_currency(field: &str, code: &str) -> Result<()> {
    if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Err(GatewayError::field_format(format!(
            "{field} {code:?} is not a 3-letter currency code"
        )));
    }
    Ok(())
}
