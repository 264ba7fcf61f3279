//! Record endpoints for users, delegations, cars and bookings

pub mod delegations;
pub mod users;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", post(users::save_user))
        .route("/users/:user_id/bookings", get(users::bookings_by_user))
        .route("/me/bookings", get(users::my_bookings))
        .route("/bookings", post(users::save_booking))
        .route(
            "/delegations",
            get(delegations::all_profile_delegations).post(delegations::save_delegation),
        )
        .route("/delegations/:delegation_id", get(delegations::delegations_by_id))
        .route("/delegations/:delegation_id/:operation", get(delegations::get_delegation))
        .route("/cars", get(delegations::all_cars).post(delegations::save_car))
        .route("/cars/:delegation_id", get(delegations::cars_by_id))
        .route("/cars/:delegation_id/:operation", get(delegations::get_car))
}
