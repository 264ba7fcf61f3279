//! Booking records

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::delegation::{Car, Delegation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Created,
    Active,
}

/// A booking, stored under its user as (`user_id`, `operation`).
///
/// Car and delegations are snapshots taken at booking time, so later edits to
/// the fleet or branch profile do not rewrite booking history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub user_id: String,
    pub operation: String,
    pub car: Car,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub pick_up_delegation: Delegation,
    pub deliver_delegation: Delegation,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_to_payment: Decimal,
    pub status_payment: PaymentStatus,
    pub status_booking: BookingStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_uses_front_end_field_names() {
        let booking = crate::seed::sample_booking();
        let json = serde_json::to_value(&booking).unwrap();

        assert_eq!(json["userId"], "USER#001");
        assert_eq!(json["pickUpDelegation"]["name"], "Barcelona Central");
        assert_eq!(json["statusPayment"], "PAID");
        assert_eq!(json["statusBooking"], "CREATED");
        assert_eq!(json["startDate"], "2025-10-01");
        assert_eq!(json["car"]["price"], 40000.0);
        assert_eq!(json["totalToPayment"], 344400.0);
        assert!(json["deliverDelegation"]["availableCarQty"].is_number());
    }

    #[test]
    fn test_money_fields_accept_numbers_and_strings() {
        let mut json = serde_json::to_value(crate::seed::sample_booking()).unwrap();
        json["totalToPayment"] = serde_json::json!(456.56);
        json["car"]["price"] = serde_json::json!("19.99");

        let booking: Booking = serde_json::from_value(json).unwrap();
        assert_eq!(booking.total_to_payment, rust_decimal_macros::dec!(456.56));
        assert_eq!(booking.car.price, rust_decimal_macros::dec!(19.99));
    }

    #[test]
    fn test_status_omitted_when_absent() {
        let mut booking = crate::seed::sample_booking();
        booking.status = None;
        let json = serde_json::to_value(&booking).unwrap();
        assert!(json.get("status").is_none());
    }
}
