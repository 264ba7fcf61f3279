//! Delegation and car record handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::booking::services;
use crate::db::DelegationRepository;
use crate::error::{AppError, Result};
use crate::extract::AppJson;
use crate::models::{Car, Delegation};
use crate::AppState;

pub async fn save_delegation(
    State(state): State<AppState>,
    AppJson(delegation): AppJson<Delegation>,
) -> Result<(StatusCode, Json<Delegation>)> {
    info!("Saving delegation {}/{}", delegation.delegation_id, delegation.operation);
    state.store.save_delegation(delegation.clone()).await?;
    state.cache.invalidate_delegations().await;
    Ok((StatusCode::CREATED, Json(delegation)))
}

pub async fn save_car(
    State(state): State<AppState>,
    AppJson(car): AppJson<Car>,
) -> Result<(StatusCode, Json<Car>)> {
    info!("Saving car {}/{}", car.delegation_id, car.operation);
    state.store.save_car(car.clone()).await?;
    state.cache.invalidate_cars().await;
    Ok((StatusCode::CREATED, Json(car)))
}

/// Branch profiles, i.e. the selectable pickup/return locations
pub async fn all_profile_delegations(State(state): State<AppState>) -> Json<Vec<Delegation>> {
    Json(services::load_locations(state.store.as_ref(), &state.cache).await)
}

pub async fn delegations_by_id(
    State(state): State<AppState>,
    Path(delegation_id): Path<String>,
) -> Result<Json<Vec<Delegation>>> {
    Ok(Json(state.store.list_delegations_by_id(&delegation_id).await?))
}

pub async fn get_delegation(
    State(state): State<AppState>,
    Path((delegation_id, operation)): Path<(String, String)>,
) -> Result<Json<Delegation>> {
    state
        .store
        .get_delegation(&delegation_id, &operation)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

pub async fn all_cars(State(state): State<AppState>) -> Result<Json<Vec<Car>>> {
    Ok(Json(services::list_all_cars(state.store.as_ref(), &state.cache).await?))
}

pub async fn cars_by_id(
    State(state): State<AppState>,
    Path(delegation_id): Path<String>,
) -> Result<Json<Vec<Car>>> {
    Ok(Json(state.store.list_cars_by_id(&delegation_id).await?))
}

pub async fn get_car(
    State(state): State<AppState>,
    Path((delegation_id, operation)): Path<(String, String)>,
) -> Result<Json<Car>> {
    state
        .store
        .get_car(&delegation_id, &operation)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}
