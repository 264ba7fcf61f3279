//! Booking engine module.
//!
//! Prices a rental from its dates and the car's daily rate, keeps the pickup
//! and return locations consistent, validates a booking before it is sent,
//! and tracks the booking form through its states.

pub mod calculators;
pub mod flow;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod selection;
pub mod services;
pub mod validation;

// Re-export commonly used items
pub use calculators::{compute_total, round_money, PaymentTotal, QuoteError, RentalInterval, TAX_RATE};
pub use flow::{BookingFlow, FlowError, FlowState, FormEvent};
pub use routes::router;
pub use selection::{reduce, set_linked_location, LocationSelection, SelectionEvent};
pub use validation::{validate_booking_submission, ValidationFailure};
