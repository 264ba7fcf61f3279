//! Data records exchanged with the front-end and kept in the store

pub mod booking;
pub mod delegation;
pub mod user;

pub use booking::{Booking, BookingStatus, PaymentStatus};
pub use delegation::{Car, Delegation, PROFILE_OPERATION};
pub use user::User;
