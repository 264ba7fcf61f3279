//! Delegation (rental branch) and car records

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sort key of a delegation's own profile record
pub const PROFILE_OPERATION: &str = "profile";

/// A rental branch, keyed by (`delegation_id`, `operation`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delegation {
    pub delegation_id: String,
    pub operation: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub available_car_qty: i32,
    pub phone: String,
    pub email: String,
}

impl Delegation {
    pub fn is_profile(&self) -> bool {
        self.operation == PROFILE_OPERATION
    }
}

/// A car in a delegation's fleet, keyed by (`delegation_id`, `operation`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub delegation_id: String,
    pub operation: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    #[serde(default)]
    pub rented: bool,
    /// Daily rate. Read from a JSON number or string, written as a number.
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub price: Decimal,
}
