//! Response DTOs for booking engine endpoints.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::Booking;

use super::calculators::{PaymentTotal, TAX_RATE};
use super::validation::FailureDetail;

/// Money value for JSON responses
#[derive(Debug, Clone, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
}

/// Response for a rental quote
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub day_count: i64,
    pub daily_rate: MoneyResponse,
    pub subtotal: MoneyResponse,
    #[serde(with = "rust_decimal::serde::str")]
    pub tax_rate: Decimal,
    pub tax: MoneyResponse,
    pub total: MoneyResponse,
}

impl QuoteResponse {
    pub fn new(total: PaymentTotal, currency: &str) -> Self {
        let money = |amount| MoneyResponse {
            amount,
            currency: currency.to_string(),
        };
        Self {
            day_count: total.day_count,
            daily_rate: money(total.daily_rate),
            subtotal: money(total.subtotal),
            tax_rate: TAX_RATE,
            tax: money(total.tax),
            total: money(total.total),
        }
    }
}

/// Response for a validation check
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResponse {
    pub valid: bool,
    pub failures: Vec<FailureDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<MoneyResponse>,
}

/// Response for a confirmed booking
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub booking_id: String,
    pub total_paid: MoneyResponse,
    pub booking: Booking,
}
