//! Booking service functions with storage access.
//!
//! These functions read the store and cache around the pure engine in
//! `calculators`, `selection`, `validation` and `flow`.

use chrono::{Datelike, NaiveDate, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::cache::AppCache;
use crate::context::UserContext;
use crate::db::{DelegationRepository, UserRepository};
use crate::error::Result;
use crate::models::{Booking, Car, Delegation};

use super::calculators::PaymentTotal;
use super::flow::{BookingFlow, FormEvent};
use super::requests::{BookingFormRequest, CarRef};
use super::selection::SelectionEvent;
use super::validation::ValidationFailure;

/// Selectable pickup/return locations.
///
/// A failed lookup is logged and yields an empty list so the form still opens.
pub async fn load_locations<R: DelegationRepository>(repo: &R, cache: &AppCache) -> Vec<Delegation> {
    if let Some(cached) = cache.profile_delegations().await {
        debug!("Cache HIT for location listing");
        return (*cached).clone();
    }

    debug!("Cache MISS for location listing");
    match repo.list_profile_delegations().await {
        Ok(delegations) => (*cache.store_profile_delegations(delegations).await).clone(),
        Err(e) => {
            warn!("Failed to load locations: {}", e);
            Vec::new()
        }
    }
}

/// Every car, via the cache
pub async fn list_all_cars<R: DelegationRepository>(repo: &R, cache: &AppCache) -> Result<Vec<Car>> {
    if let Some(cached) = cache.all_cars().await {
        debug!("Cache HIT for car listing");
        return Ok((*cached).clone());
    }

    let cars = repo.list_all_cars().await?;
    Ok((*cache.store_all_cars(cars).await).clone())
}

/// Fresh booking sort key, `booking#<year>#<8 hex chars>`
pub fn new_booking_operation(today: NaiveDate) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("booking#{}#{}", today.year(), &suffix[..8])
}

async fn resolve_car<R: DelegationRepository>(repo: &R, car: Option<&CarRef>) -> Result<Option<Car>> {
    match car {
        Some(r) => repo.get_car(&r.delegation_id, &r.operation).await,
        None => Ok(None),
    }
}

/// Load the car and locations, then replay the submitted form into a flow
async fn open_flow<R: DelegationRepository>(
    repo: &R,
    cache: &AppCache,
    request: BookingFormRequest,
) -> Result<BookingFlow> {
    let car = resolve_car(repo, request.car.as_ref()).await?;

    let mut flow = BookingFlow::new(car);
    flow.locations_loaded(load_locations(repo, cache).await)?;

    flow.apply(FormEvent::StartDateChanged(request.start_date))?;
    flow.apply(FormEvent::EndDateChanged(request.end_date))?;
    flow.apply(FormEvent::Location(SelectionEvent::LinkChanged(request.same_delegation)))?;
    flow.apply(FormEvent::Location(SelectionEvent::PickupChanged(request.pickup_delegation_id)))?;
    if !request.same_delegation {
        flow.apply(FormEvent::Location(SelectionEvent::DeliveryChanged(
            request.deliver_delegation_id,
        )))?;
    }
    Ok(flow)
}

/// Check a booking form without submitting it.
///
/// Runs the same checks as `submit_booking`, so a form reported valid here is
/// accepted there.
pub async fn check_booking<R: DelegationRepository>(
    repo: &R,
    cache: &AppCache,
    request: BookingFormRequest,
) -> Result<std::result::Result<PaymentTotal, Vec<ValidationFailure>>> {
    let flow = open_flow(repo, cache, request).await?;
    Ok(flow.check())
}

/// Run one booking form through the flow and store the result.
///
/// The car is looked up by key so the stored price, not a client-supplied
/// one, drives the total.
pub async fn submit_booking<D, U>(
    delegations: &D,
    users: &U,
    cache: &AppCache,
    user: &UserContext,
    request: BookingFormRequest,
) -> Result<Booking>
where
    D: DelegationRepository,
    U: UserRepository,
{
    let mut flow = open_flow(delegations, cache, request).await?;

    let operation = new_booking_operation(Utc::now().date_naive());
    let booking = flow.submit(user, operation, users).await?;

    info!(
        "Booking {} stored for {} ({})",
        booking.operation, booking.user_id, booking.total_to_payment
    );
    Ok(booking)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::error::AppError;
    use crate::seed;
    use rust_decimal_macros::dec;

    struct BrokenDelegations;

    impl DelegationRepository for BrokenDelegations {
        async fn save_delegation(&self, _delegation: Delegation) -> Result<()> {
            Err(AppError::Storage("down".to_string()))
        }
        async fn save_car(&self, _car: Car) -> Result<()> {
            Err(AppError::Storage("down".to_string()))
        }
        async fn get_delegation(&self, _id: &str, _op: &str) -> Result<Option<Delegation>> {
            Err(AppError::Storage("down".to_string()))
        }
        async fn get_car(&self, _id: &str, _op: &str) -> Result<Option<Car>> {
            Ok(Some(seed::sample_car()))
        }
        async fn list_delegations_by_id(&self, _id: &str) -> Result<Vec<Delegation>> {
            Err(AppError::Storage("down".to_string()))
        }
        async fn list_cars_by_id(&self, _id: &str) -> Result<Vec<Car>> {
            Err(AppError::Storage("down".to_string()))
        }
        async fn list_all_cars(&self) -> Result<Vec<Car>> {
            Err(AppError::Storage("down".to_string()))
        }
        async fn list_profile_delegations(&self) -> Result<Vec<Delegation>> {
            Err(AppError::Storage("down".to_string()))
        }
    }

    async fn seeded_store() -> MemoryStore {
        let store = MemoryStore::new();
        store.save_delegation(seed::sample_delegation()).await.unwrap();
        store.save_car(seed::sample_car()).await.unwrap();
        store
    }

    fn form(pickup: Option<&str>, same: bool) -> BookingFormRequest {
        let car = seed::sample_car();
        BookingFormRequest {
            car: Some(CarRef {
                delegation_id: car.delegation_id,
                operation: car.operation,
            }),
            start_date: Some("2025-10-01".to_string()),
            end_date: Some("2025-10-07".to_string()),
            pickup_delegation_id: pickup.map(String::from),
            deliver_delegation_id: None,
            same_delegation: same,
        }
    }

    #[test]
    fn test_new_booking_operation_format() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
        let op = new_booking_operation(date);
        assert!(op.starts_with("booking#2025#"));
        assert_eq!(op.len(), "booking#2025#".len() + 8);
        assert_ne!(op, new_booking_operation(date));
    }

    #[tokio::test]
    async fn test_load_locations_degrades_to_empty() {
        let cache = AppCache::new();
        assert!(load_locations(&BrokenDelegations, &cache).await.is_empty());
    }

    #[tokio::test]
    async fn test_load_locations_uses_cache() {
        let store = seeded_store().await;
        let cache = AppCache::new();
        assert_eq!(load_locations(&store, &cache).await.len(), 1);

        let mut second = seed::sample_delegation();
        second.delegation_id = "DELEG#002".to_string();
        store.save_delegation(second).await.unwrap();
        assert_eq!(load_locations(&store, &cache).await.len(), 1);

        cache.invalidate_delegations().await;
        assert_eq!(load_locations(&store, &cache).await.len(), 2);
    }

    #[tokio::test]
    async fn test_submit_booking_same_location() {
        let store = seeded_store().await;
        let cache = AppCache::new();
        let user = UserContext::new("USER#007");

        let booking = submit_booking(&store, &store, &cache, &user, form(Some("DELEG#001"), true))
            .await
            .unwrap();

        assert_eq!(booking.user_id, "USER#007");
        assert_eq!(booking.total_to_payment, dec!(344400.00));
        assert_eq!(booking.deliver_delegation.delegation_id, "DELEG#001");
        assert_eq!(store.find_bookings_by_user("USER#007").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_booking_reports_all_failures() {
        let store = seeded_store().await;
        let cache = AppCache::new();
        let mut request = form(None, false);
        request.car = None;
        request.end_date = None;

        let err = submit_booking(&store, &store, &cache, &UserContext::new("USER#001"), request)
            .await
            .unwrap_err();
        match err {
            AppError::Validation(failures) => assert_eq!(
                failures,
                vec![
                    ValidationFailure::MissingEndDate,
                    ValidationFailure::MissingCar,
                    ValidationFailure::MissingPickup,
                    ValidationFailure::MissingDelivery,
                ]
            ),
            other => panic!("unexpected error {other:?}"),
        }
        assert!(store.find_bookings_by_user("USER#001").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_with_no_locations_is_rejected() {
        let cache = AppCache::new();
        let store = MemoryStore::new();
        let err = submit_booking(
            &BrokenDelegations,
            &store,
            &cache,
            &UserContext::new("USER#001"),
            form(Some("DELEG#001"), true),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref f) if f == &vec![ValidationFailure::UnknownPickup]));
    }

    #[tokio::test]
    async fn test_check_booking_unknown_car() {
        let store = seeded_store().await;
        let mut request = form(Some("DELEG#001"), true);
        request.car = Some(CarRef {
            delegation_id: "DELEG#001".to_string(),
            operation: "car#1999#999".to_string(),
        });
        let failures = check_booking(&store, &AppCache::new(), request).await.unwrap().unwrap_err();
        assert_eq!(failures, vec![ValidationFailure::MissingCar]);
    }

    #[tokio::test]
    async fn test_check_booking_agrees_with_submit() {
        let store = seeded_store().await;
        let cache = AppCache::new();
        let user = UserContext::new("USER#003");

        let unknown = form(Some("DELEG#404"), true);
        let failures = check_booking(&store, &cache, unknown.clone()).await.unwrap().unwrap_err();
        assert_eq!(failures, vec![ValidationFailure::UnknownPickup]);
        let err = submit_booking(&store, &store, &cache, &user, unknown).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ref f) if f == &failures));

        let known = form(Some("DELEG#001"), true);
        let total = check_booking(&store, &cache, known.clone()).await.unwrap().unwrap();
        let booking = submit_booking(&store, &store, &cache, &user, known).await.unwrap();
        assert_eq!(booking.total_to_payment, total.total);
    }
}
