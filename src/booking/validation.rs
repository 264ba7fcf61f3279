//! Booking submission checks.
//!
//! Every failing condition is reported, not only the first one.

use serde::Serialize;

use crate::models::Car;

use super::calculators::{compute_total, PaymentTotal, QuoteError, RentalInterval, DATE_FORMAT};
use super::selection::LocationSelection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationFailure {
    MissingStartDate,
    MissingEndDate,
    InvalidStartDate,
    InvalidEndDate,
    MissingCar,
    MissingPickup,
    MissingDelivery,
    UnknownPickup,
    UnknownDelivery,
    InvalidTotal,
}

impl ValidationFailure {
    pub fn message(&self) -> &'static str {
        match self {
            ValidationFailure::MissingStartDate => "Please select a start date",
            ValidationFailure::MissingEndDate => "Please select an end date",
            ValidationFailure::InvalidStartDate => "Start date is not a valid date",
            ValidationFailure::InvalidEndDate => "End date is not a valid date",
            ValidationFailure::MissingCar => "Car data is missing",
            ValidationFailure::MissingPickup => "Please select a pickup location",
            ValidationFailure::MissingDelivery => "Please select a return location",
            ValidationFailure::UnknownPickup => "Pickup location is not available",
            ValidationFailure::UnknownDelivery => "Return location is not available",
            ValidationFailure::InvalidTotal => "Invalid dates selected",
        }
    }
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Code plus user-facing message, for JSON bodies
#[derive(Debug, Clone, Serialize)]
pub struct FailureDetail {
    pub code: ValidationFailure,
    pub message: &'static str,
}

impl From<&ValidationFailure> for FailureDetail {
    fn from(failure: &ValidationFailure) -> Self {
        Self {
            code: *failure,
            message: failure.message(),
        }
    }
}

fn check_date(
    raw: Option<&str>,
    missing: ValidationFailure,
    invalid: ValidationFailure,
    failures: &mut Vec<ValidationFailure>,
) -> Option<chrono::NaiveDate> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => {
            failures.push(missing);
            None
        }
        Some(s) => match chrono::NaiveDate::parse_from_str(s, DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(_) => {
                failures.push(invalid);
                None
            }
        },
    }
}

/// Check a booking before it is submitted.
///
/// Returns the computed payment when nothing fails. The total is only checked
/// once both dates and the car are usable, so a missing date is not reported
/// twice.
pub fn validate_booking_submission(
    start: Option<&str>,
    end: Option<&str>,
    car: Option<&Car>,
    selection: &LocationSelection,
) -> Result<PaymentTotal, Vec<ValidationFailure>> {
    let mut failures = Vec::new();

    let start = check_date(
        start,
        ValidationFailure::MissingStartDate,
        ValidationFailure::InvalidStartDate,
        &mut failures,
    );
    let end = check_date(
        end,
        ValidationFailure::MissingEndDate,
        ValidationFailure::InvalidEndDate,
        &mut failures,
    );

    if car.is_none() {
        failures.push(ValidationFailure::MissingCar);
    }
    if selection.pickup.is_none() {
        failures.push(ValidationFailure::MissingPickup);
    }
    if !selection.linked && selection.delivery.is_none() {
        failures.push(ValidationFailure::MissingDelivery);
    }

    let total = match (start, end, car) {
        (Some(start), Some(end), Some(car)) => {
            match compute_total(&RentalInterval::new(start, end), car.price) {
                Ok(total) => Some(total),
                Err(
                    QuoteError::EndBeforeStart | QuoteError::NonPositiveRate | QuoteError::AmountTooLarge,
                ) => {
                    failures.push(ValidationFailure::InvalidTotal);
                    None
                }
                Err(QuoteError::MissingDate | QuoteError::UnparseableDate(_)) => None,
            }
        }
        _ => None,
    };

    match total {
        Some(total) if failures.is_empty() => Ok(total),
        _ => Err(failures),
    }
}
