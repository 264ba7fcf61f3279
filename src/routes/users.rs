//! User and booking record handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::context::CurrentUser;
use crate::db::UserRepository;
use crate::error::Result;
use crate::extract::AppJson;
use crate::models::{Booking, User};
use crate::AppState;

pub async fn save_user(
    State(state): State<AppState>,
    AppJson(user): AppJson<User>,
) -> Result<(StatusCode, Json<User>)> {
    info!("Saving user {}", user.user_id);
    state.store.save_user(user.clone()).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Store a complete booking record as given (sample data, back-office import)
pub async fn save_booking(
    State(state): State<AppState>,
    AppJson(booking): AppJson<Booking>,
) -> Result<(StatusCode, Json<Booking>)> {
    info!("Saving booking {} for {}", booking.operation, booking.user_id);
    state.store.save_booking(booking.clone()).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

pub async fn bookings_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Booking>>> {
    Ok(Json(state.store.find_bookings_by_user(&user_id).await?))
}

pub async fn my_bookings(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Booking>>> {
    Ok(Json(state.store.find_bookings_by_user(&user.user_id).await?))
}
