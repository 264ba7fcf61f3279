//! Repository traits.
//!
//! Records are addressed by a partition key (user or delegation id) plus a
//! sort key (`operation`), so one partition holds a profile alongside the
//! cars or bookings that belong to it.

use std::future::Future;

use crate::error::Result;
use crate::models::{Booking, Car, Delegation, User};

/// Storage for delegations and their fleets
pub trait DelegationRepository: Send + Sync {
    fn save_delegation(&self, delegation: Delegation) -> impl Future<Output = Result<()>> + Send;

    fn save_car(&self, car: Car) -> impl Future<Output = Result<()>> + Send;

    fn get_delegation(
        &self,
        delegation_id: &str,
        operation: &str,
    ) -> impl Future<Output = Result<Option<Delegation>>> + Send;

    fn get_car(
        &self,
        delegation_id: &str,
        operation: &str,
    ) -> impl Future<Output = Result<Option<Car>>> + Send;

    /// All delegation records in one partition
    fn list_delegations_by_id(
        &self,
        delegation_id: &str,
    ) -> impl Future<Output = Result<Vec<Delegation>>> + Send;

    /// All cars in one partition
    fn list_cars_by_id(&self, delegation_id: &str) -> impl Future<Output = Result<Vec<Car>>> + Send;

    fn list_all_cars(&self) -> impl Future<Output = Result<Vec<Car>>> + Send;

    /// Every delegation whose operation is `profile`
    fn list_profile_delegations(&self) -> impl Future<Output = Result<Vec<Delegation>>> + Send;
}

/// Storage for users and their bookings
pub trait UserRepository: Send + Sync {
    fn save_user(&self, user: User) -> impl Future<Output = Result<()>> + Send;

    fn save_booking(&self, booking: Booking) -> impl Future<Output = Result<()>> + Send;

    fn find_bookings_by_user(&self, user_id: &str) -> impl Future<Output = Result<Vec<Booking>>> + Send;
}
