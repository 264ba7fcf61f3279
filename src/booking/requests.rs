//! Request DTOs for booking engine endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;

use super::selection::LocationSelection;

/// Reference to a car by its storage keys
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarRef {
    pub delegation_id: String,
    pub operation: String,
}

/// Request to price a rental
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    /// JSON number or string
    #[serde(default)]
    pub daily_rate: Option<Decimal>,
}

/// Booking form as submitted by the booking view
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingFormRequest {
    #[serde(default)]
    pub car: Option<CarRef>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub pickup_delegation_id: Option<String>,
    #[serde(default)]
    pub deliver_delegation_id: Option<String>,
    /// "Same location for pickup and return"
    #[serde(default)]
    pub same_delegation: bool,
}

impl BookingFormRequest {
    pub fn selection(&self) -> LocationSelection {
        LocationSelection::new(
            self.pickup_delegation_id.clone(),
            self.deliver_delegation_id.clone(),
            self.same_delegation,
        )
    }
}
