//! In-memory caching using moka
//!
//! Listings read on every booking form load are cached here and dropped
//! whenever a delegation or car is saved.

use moka::future::Cache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::models::{Car, Delegation};

const PROFILE_LISTING_KEY: &str = "delegations:profile";
const FLEET_LISTING_KEY: &str = "cars:all";

/// Application cache holding listing results
#[derive(Clone)]
pub struct AppCache {
    /// Profile delegations (the selectable locations)
    pub delegations: Cache<String, Arc<Vec<Delegation>>>,
    /// Every car across delegations
    pub cars: Cache<String, Arc<Vec<Car>>>,
}

impl AppCache {
    /// Create a new cache instance with configured TTLs
    pub fn new() -> Self {
        Self {
            // Branch profiles change rarely: 10 min TTL
            delegations: Cache::builder()
                .max_capacity(1)
                .time_to_live(Duration::from_secs(10 * 60))
                .build(),

            // Fleet listing: rented flags move, 2 min TTL
            cars: Cache::builder()
                .max_capacity(1)
                .time_to_live(Duration::from_secs(2 * 60))
                .build(),
        }
    }

    pub async fn profile_delegations(&self) -> Option<Arc<Vec<Delegation>>> {
        self.delegations.get(PROFILE_LISTING_KEY).await
    }

    pub async fn store_profile_delegations(&self, delegations: Vec<Delegation>) -> Arc<Vec<Delegation>> {
        let listing = Arc::new(delegations);
        self.delegations
            .insert(PROFILE_LISTING_KEY.to_string(), listing.clone())
            .await;
        listing
    }

    pub async fn all_cars(&self) -> Option<Arc<Vec<Car>>> {
        self.cars.get(FLEET_LISTING_KEY).await
    }

    pub async fn store_all_cars(&self, cars: Vec<Car>) -> Arc<Vec<Car>> {
        let listing = Arc::new(cars);
        self.cars.insert(FLEET_LISTING_KEY.to_string(), listing.clone()).await;
        listing
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            delegations_cached: self.delegations.entry_count() > 0,
            cars_cached: self.cars.entry_count() > 0,
        }
    }

    pub async fn invalidate_delegations(&self) {
        self.delegations.invalidate(PROFILE_LISTING_KEY).await;
        info!("Delegation listing cache invalidated");
    }

    pub async fn invalidate_cars(&self) {
        self.cars.invalidate(FLEET_LISTING_KEY).await;
        info!("Car listing cache invalidated");
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub delegations_cached: bool,
    pub cars_cached: bool,
}
