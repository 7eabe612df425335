//! Payment API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use serde::Deserialize;

use crate::auth::{CurrentUser, Role};
use crate::core::ServerState;
use crate::db::models::PaymentMethod;
use crate::db::repository::PaymentMethodRepository;
use crate::orders::PaymentView;
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text};
use crate::utils::{AppResult, time};

/// Process payment request (cashier)
#[derive(Debug, Deserialize)]
pub struct ProcessPaymentRequest {
    pub order_id: String,
    pub payment_method_id: String,
    #[serde(default)]
    pub note: Option<String>,
}

/// Settle a Ready order
pub async fn process(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ProcessPaymentRequest>,
) -> AppResult<Json<PaymentView>> {
    user.require_any(&[Role::Cashier])?;
    validate_optional_text(&payload.note, "note", MAX_NOTE_LEN)?;

    let now = Utc::now().with_timezone(&state.config.timezone);
    let view = state
        .workflow
        .process_payment(
            &user,
            &payload.order_id,
            &payload.payment_method_id,
            payload.note,
            now,
        )
        .await?;
    Ok(Json(view))
}

/// Active payment methods
pub async fn list_methods(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<PaymentMethod>>> {
    user.require_any(&[Role::Cashier])?;
    let repo = PaymentMethodRepository::new(state.db.clone());
    let methods = repo.find_active().await?;
    Ok(Json(methods))
}

/// Payment registered for an order
pub async fn get_by_order(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(order_id): Path<String>,
) -> AppResult<Json<PaymentView>> {
    user.require_any(&[Role::Cashier])?;
    let view = state.workflow.get_payment(&order_id).await?;
    Ok(Json(view))
}

/// All payments of one business day
pub async fn list_by_day(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(date): Path<String>,
) -> AppResult<Json<Vec<PaymentView>>> {
    user.require_any(&[Role::Cashier])?;

    let tz = state.config.timezone;
    let date = time::parse_date(&date)?;
    let start = time::day_start_millis(date, tz);
    let end = time::day_end_millis(date, tz);

    let views = state.workflow.list_payments_between(start, end).await?;
    Ok(Json(views))
}
