//! In-memory store
//!
//! Ordered maps keyed by (partition key, sort key). Listing order is the key
//! order, which keeps responses deterministic.

use std::collections::BTreeMap;

use tokio::sync::RwLock;
use tracing::debug;

use crate::error::Result;
use crate::models::{Booking, Car, Delegation, User};

use super::repository::{DelegationRepository, UserRepository};

type Key = (String, String);

/// Sort-key prefix that marks a booking row in a user partition
const BOOKING_PREFIX: &str = "booking";

#[derive(Debug, Default)]
pub struct MemoryStore {
    delegations: RwLock<BTreeMap<Key, Delegation>>,
    cars: RwLock<BTreeMap<Key, Car>>,
    users: RwLock<BTreeMap<Key, User>>,
    bookings: RwLock<BTreeMap<Key, Booking>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn key(partition: &str, sort: &str) -> Key {
    (partition.to_string(), sort.to_string())
}

fn partition<T: Clone>(map: &BTreeMap<Key, T>, partition_key: &str) -> Vec<T> {
    map.range(key(partition_key, "")..)
        .take_while(|((p, _), _)| p == partition_key)
        .map(|(_, v)| v.clone())
        .collect()
}

impl DelegationRepository for MemoryStore {
    async fn save_delegation(&self, delegation: Delegation) -> Result<()> {
        debug!(
            "Saving delegation {}/{}",
            delegation.delegation_id, delegation.operation
        );
        let k = key(&delegation.delegation_id, &delegation.operation);
        self.delegations.write().await.insert(k, delegation);
        Ok(())
    }

    async fn save_car(&self, car: Car) -> Result<()> {
        debug!("Saving car {}/{}", car.delegation_id, car.operation);
        let k = key(&car.delegation_id, &car.operation);
        self.cars.write().await.insert(k, car);
        Ok(())
    }

    async fn get_delegation(&self, delegation_id: &str, operation: &str) -> Result<Option<Delegation>> {
        Ok(self
            .delegations
            .read()
            .await
            .get(&key(delegation_id, operation))
            .cloned())
    }

    async fn get_car(&self, delegation_id: &str, operation: &str) -> Result<Option<Car>> {
        Ok(self.cars.read().await.get(&key(delegation_id, operation)).cloned())
    }

    async fn list_delegations_by_id(&self, delegation_id: &str) -> Result<Vec<Delegation>> {
        Ok(partition(&*self.delegations.read().await, delegation_id))
    }

    async fn list_cars_by_id(&self, delegation_id: &str) -> Result<Vec<Car>> {
        Ok(partition(&*self.cars.read().await, delegation_id))
    }

    async fn list_all_cars(&self) -> Result<Vec<Car>> {
        Ok(self.cars.read().await.values().cloned().collect())
    }

    async fn list_profile_delegations(&self) -> Result<Vec<Delegation>> {
        Ok(self
            .delegations
            .read()
            .await
            .values()
            .filter(|d| d.is_profile())
            .cloned()
            .collect())
    }
}

impl UserRepository for MemoryStore {
    async fn save_user(&self, user: User) -> Result<()> {
        debug!("Saving user {}/{}", user.user_id, user.operation);
        let k = key(&user.user_id, &user.operation);
        self.users.write().await.insert(k, user);
        Ok(())
    }

    async fn save_booking(&self, booking: Booking) -> Result<()> {
        debug!("Saving booking {}/{}", booking.user_id, booking.operation);
        let k = key(&booking.user_id, &booking.operation);
        self.bookings.write().await.insert(k, booking);
        Ok(())
    }

    async fn find_bookings_by_user(&self, user_id: &str) -> Result<Vec<Booking>> {
        Ok(partition(&*self.bookings.read().await, user_id)
            .into_iter()
            .filter(|b| b.operation.starts_with(BOOKING_PREFIX))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[tokio::test]
    async fn test_profile_listing_skips_non_profile_rows() {
        let store = MemoryStore::new();
        let profile = seed::sample_delegation();
        let mut other = profile.clone();
        other.operation = "audit#2025".to_string();

        store.save_delegation(profile.clone()).await.unwrap();
        store.save_delegation(other).await.unwrap();

        let profiles = store.list_profile_delegations().await.unwrap();
        assert_eq!(profiles, vec![profile]);
        assert_eq!(store.list_delegations_by_id("DELEG#001").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_partition_listing_is_exact() {
        let store = MemoryStore::new();
        let mut a = seed::sample_car();
        a.delegation_id = "DELEG#001".to_string();
        let mut b = a.clone();
        b.delegation_id = "DELEG#0010".to_string();

        store.save_car(a.clone()).await.unwrap();
        store.save_car(b).await.unwrap();

        assert_eq!(store.list_cars_by_id("DELEG#001").await.unwrap(), vec![a]);
        assert_eq!(store.list_all_cars().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_save_overwrites_same_key() {
        let store = MemoryStore::new();
        let mut car = seed::sample_car();
        store.save_car(car.clone()).await.unwrap();
        car.color = "Red".to_string();
        store.save_car(car.clone()).await.unwrap();

        let stored = store.get_car(&car.delegation_id, &car.operation).await.unwrap();
        assert_eq!(stored.unwrap().color, "Red");
        assert_eq!(store.list_all_cars().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_bookings_by_user() {
        let store = MemoryStore::new();
        let booking = seed::sample_booking();
        store.save_booking(booking.clone()).await.unwrap();

        assert_eq!(store.find_bookings_by_user("USER#001").await.unwrap(), vec![booking]);
        assert!(store.find_bookings_by_user("USER#002").await.unwrap().is_empty());
        assert!(store.get_delegation("nope", "profile").await.unwrap().is_none());
    }
}
