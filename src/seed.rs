//! Sample data.
//!
//! The sample records match what the "create" views post, and
//! `generate_cars` produces a random fleet for demos.

use chrono::NaiveDate;
use rand::Rng;
use rust_decimal::Decimal;
use tracing::info;

use crate::booking::{compute_total, RentalInterval};
use crate::db::{DelegationRepository, MemoryStore, UserRepository};
use crate::error::{AppError, Result};
use crate::models::{Booking, BookingStatus, Car, Delegation, PaymentStatus, User, PROFILE_OPERATION};

const MAKES: [&str; 5] = ["Toyota", "Honda", "Ford", "Chevrolet", "Nissan"];
const MODELS: [&str; 5] = ["Camry", "Civic", "Mustang", "Impala", "Altima"];
const COLORS: [&str; 5] = ["Blue", "Red", "Black", "White", "Green"];
const YEARS: [i32; 3] = [2023, 2024, 2025];

pub fn sample_user() -> User {
    User {
        user_id: "USER#001".to_string(),
        operation: PROFILE_OPERATION.to_string(),
        username: "jdoe".to_string(),
        email: "jdoe@example.com".to_string(),
        full_name: "John Doe".to_string(),
        phone: "+34 600 123 456".to_string(),
    }
}

pub fn sample_delegation() -> Delegation {
    Delegation {
        delegation_id: "DELEG#001".to_string(),
        operation: PROFILE_OPERATION.to_string(),
        name: "Barcelona Central".to_string(),
        address: "Carrer de la Marina, 15".to_string(),
        city: "Barcelona".to_string(),
        available_car_qty: 12,
        phone: "+34 931 234 567".to_string(),
        email: "central@renting.com".to_string(),
    }
}

pub fn sample_car() -> Car {
    Car {
        delegation_id: "DELEG#001".to_string(),
        operation: "car#2025#002".to_string(),
        make: "Toyota".to_string(),
        model: "Camry".to_string(),
        year: 2025,
        color: "Blue".to_string(),
        rented: false,
        price: Decimal::from(40000),
    }
}

/// A week-long booking of the sample car, picked up and returned at the sample branch
pub fn sample_booking() -> Booking {
    let car = Car {
        operation: "car#2025#001".to_string(),
        ..sample_car()
    };
    let start = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap_or_default();
    let end = NaiveDate::from_ymd_opt(2025, 10, 7).unwrap_or_default();
    let total = compute_total(&RentalInterval::new(start, end), car.price)
        .map(|t| t.total)
        .unwrap_or_default();

    Booking {
        user_id: "USER#001".to_string(),
        operation: "booking#2025#001".to_string(),
        car,
        status: Some("ACTIVE".to_string()),
        start_date: start,
        end_date: end,
        pick_up_delegation: sample_delegation(),
        deliver_delegation: sample_delegation(),
        total_to_payment: total,
        status_payment: PaymentStatus::Paid,
        status_booking: BookingStatus::Created,
    }
}

/// Random fleet for one delegation. Operations are `car#<year>#<nnn>`, numbered from 1.
pub fn generate_cars<R: Rng + ?Sized>(delegation_id: &str, count: usize, rng: &mut R) -> Vec<Car> {
    (1..=count)
        .map(|i| {
            let tag_year = YEARS[rng.random_range(0..YEARS.len())];
            Car {
                delegation_id: delegation_id.to_string(),
                operation: format!("car#{}#{:03}", tag_year, i),
                make: MAKES[rng.random_range(0..MAKES.len())].to_string(),
                model: MODELS[rng.random_range(0..MODELS.len())].to_string(),
                year: rng.random_range(2023..=2025),
                color: COLORS[rng.random_range(0..COLORS.len())].to_string(),
                rented: rng.random_bool(0.5),
                price: Decimal::from(rng.random_range(10..=50i64)),
            }
        })
        .collect()
}

/// Populate an empty store with the sample records and a random fleet
pub async fn seed_store(store: &MemoryStore, fleet_size: usize) -> Result<()> {
    let delegation = sample_delegation();
    let fleet = generate_cars(&delegation.delegation_id, fleet_size, &mut rand::rng());

    store.save_user(sample_user()).await?;
    store.save_delegation(delegation).await?;
    for car in fleet {
        store.save_car(car).await?;
    }
    // After the fleet, so a generated key never replaces the sample car
    store.save_car(sample_car()).await?;
    store.save_booking(sample_booking()).await?;

    let cars = store.list_all_cars().await?.len();
    if cars == 0 {
        return Err(AppError::Internal("seeding produced an empty fleet".to_string()));
    }
    info!("Seeded sample data: 1 user, 1 delegation, {} cars, 1 booking", cars);
    Ok(())
}
