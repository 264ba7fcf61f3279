//! HTTP handlers for the booking engine

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};

use crate::context::CurrentUser;
use crate::error::Result;
use crate::extract::AppJson;
use crate::AppState;

use super::calculators;
use super::requests::{BookingFormRequest, QuoteRequest};
use super::responses::{BookingConfirmation, MoneyResponse, QuoteResponse, ValidationResponse};
use super::services;
use super::validation::FailureDetail;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/quote", post(quote))
        .route("/validate", post(validate))
        .route("/submit", post(submit))
}

/// Price a rental from raw form values
async fn quote(
    State(state): State<AppState>,
    AppJson(request): AppJson<QuoteRequest>,
) -> Result<Json<QuoteResponse>> {
    let total = calculators::quote(
        request.start_date.as_deref(),
        request.end_date.as_deref(),
        request.daily_rate,
    )?;
    Ok(Json(QuoteResponse::new(total, &state.config.currency)))
}

/// Report every problem with a booking form without storing anything
async fn validate(
    State(state): State<AppState>,
    AppJson(request): AppJson<BookingFormRequest>,
) -> Result<Json<ValidationResponse>> {
    let checked = services::check_booking(state.store.as_ref(), &state.cache, request).await?;
    let response = match checked {
        Ok(total) => ValidationResponse {
            valid: true,
            failures: vec![],
            total: Some(MoneyResponse {
                amount: total.total,
                currency: state.config.currency.clone(),
            }),
        },
        Err(failures) => ValidationResponse {
            valid: false,
            failures: failures.iter().map(FailureDetail::from).collect(),
            total: None,
        },
    };
    Ok(Json(response))
}

/// Complete a booking for the current user
async fn submit(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppJson(request): AppJson<BookingFormRequest>,
) -> Result<(StatusCode, Json<BookingConfirmation>)> {
    let store = state.store.as_ref();
    let booking = services::submit_booking(store, store, &state.cache, &user, request).await?;

    let confirmation = BookingConfirmation {
        booking_id: booking.operation.clone(),
        total_paid: MoneyResponse {
            amount: booking.total_to_payment,
            currency: state.config.currency.clone(),
        },
        booking,
    };
    Ok((StatusCode::CREATED, Json(confirmation)))
}
