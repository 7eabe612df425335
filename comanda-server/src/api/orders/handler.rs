//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Deserialize;

use crate::auth::{CurrentUser, Role};
use crate::core::ServerState;
use crate::orders::{CreateOrderInput, DailyOrderReport, LineInput, OrderView};
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text};
use crate::utils::{AppError, AppResult, time};

/// Create order request (customer or waiter)
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub table_id: String,
    #[serde(default)]
    pub note: Option<String>,
    pub lines: Vec<LineInput>,
}

/// Revise order request (waiter, Pending only)
#[derive(Debug, Deserialize)]
pub struct ReviseOrderRequest {
    pub order_id: String,
    #[serde(default)]
    pub note: Option<String>,
    pub lines: Vec<LineInput>,
}

/// Line completion toggle (cook)
#[derive(Debug, Deserialize)]
pub struct SetLineCompletionRequest {
    pub line_id: String,
    pub completed: bool,
}

/// Queue selector for `GET /orders`
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub role: String,
    pub status: String,
}

fn business_now(tz: Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(&tz)
}

fn validate_notes(note: &Option<String>, lines: &[LineInput]) -> AppResult<()> {
    validate_optional_text(note, "note", MAX_NOTE_LEN)?;
    for line in lines {
        validate_optional_text(&line.note, "line note", MAX_NOTE_LEN)?;
    }
    Ok(())
}

/// Create a new order in Pending state
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<OrderView>> {
    user.require_any(&[Role::Customer, Role::Waiter])?;
    validate_notes(&payload.note, &payload.lines)?;

    let now = business_now(state.config.timezone);
    let view = state
        .workflow
        .create_order(
            &user,
            CreateOrderInput {
                table_id: payload.table_id,
                note: payload.note,
                lines: payload.lines,
            },
            now,
        )
        .await?;
    Ok(Json(view))
}

/// List a role queue:
/// - `role=waiter|cook&status=pending` — open orders, oldest first
/// - `role=cashier&status=completed` — ready orders first, then settled
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<OrderView>>> {
    let views = match (query.role.as_str(), query.status.as_str()) {
        ("waiter" | "cook", "pending") => {
            user.require_any(&[Role::Waiter, Role::Cook])?;
            state.workflow.list_open_orders().await?
        }
        ("cashier", "completed") => {
            user.require_any(&[Role::Cashier])?;
            state.workflow.list_completed_orders().await?
        }
        _ => {
            return Err(AppError::validation(format!(
                "Unsupported queue: role={} status={}",
                query.role, query.status
            )));
        }
    };
    Ok(Json(views))
}

/// Get full order view by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<OrderView>> {
    let view = state.workflow.get_order(&id).await?;
    Ok(Json(view))
}

/// Full replace of note + lines; only while the order is Pending
pub async fn revise(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<ReviseOrderRequest>,
) -> AppResult<StatusCode> {
    user.require_any(&[Role::Waiter])?;

    if payload.order_id != id {
        return Err(AppError::validation("Order id mismatch"));
    }
    validate_notes(&payload.note, &payload.lines)?;

    state
        .workflow
        .revise_order(&id, payload.note, payload.lines)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Cook toggles a line's completion; may advance the order status
pub async fn set_line_completion(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<SetLineCompletionRequest>,
) -> AppResult<StatusCode> {
    user.require_any(&[Role::Cook])?;

    let now = business_now(state.config.timezone);
    state
        .workflow
        .set_line_completion(&payload.line_id, payload.completed, now)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Daily order report (admin)
pub async fn daily_report(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(date): Path<String>,
) -> AppResult<Json<DailyOrderReport>> {
    user.require_any(&[Role::Admin])?;

    let tz = state.config.timezone;
    let date = time::parse_date(&date)?;
    let start = time::day_start_millis(date, tz);
    let end = time::day_end_millis(date, tz);

    let report = state.workflow.daily_report(date, start, end).await?;
    Ok(Json(report))
}
