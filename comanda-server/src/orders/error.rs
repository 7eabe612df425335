//! Order workflow errors
//!
//! Each variant carries a stable machine-readable code; HTTP status
//! mapping lives here so handlers never reinterpret workflow failures.

use axum::http::StatusCode;
use thiserror::Error;

use crate::db::repository::RepoError;

/// Errors raised by the order workflow
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Order line not found: {0}")]
    LineNotFound(String),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Product not available: {0}")]
    ProductUnavailable(String),

    #[error("Payment method not valid: {0}")]
    InvalidPaymentMethod(String),

    #[error("No payment registered for order: {0}")]
    PaymentNotFound(String),

    #[error("Order is not ready for payment: {0}")]
    OrderNotReady(String),

    #[error("Order already has a payment: {0}")]
    AlreadyPaid(String),

    #[error("Invalid state for this operation: {0}")]
    InvalidState(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(#[from] RepoError),
}

impl OrderError {
    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            OrderError::OrderNotFound(_) => "ORDER_NOT_FOUND",
            OrderError::LineNotFound(_) => "LINE_NOT_FOUND",
            OrderError::TableNotFound(_) => "TABLE_NOT_FOUND",
            OrderError::ProductUnavailable(_) => "PRODUCT_UNAVAILABLE",
            OrderError::InvalidPaymentMethod(_) => "INVALID_PAYMENT_METHOD",
            OrderError::PaymentNotFound(_) => "PAYMENT_NOT_FOUND",
            OrderError::OrderNotReady(_) => "ORDER_NOT_READY",
            OrderError::AlreadyPaid(_) => "ALREADY_PAID",
            OrderError::InvalidState(_) => "INVALID_STATE",
            OrderError::Validation(_) => "VALIDATION",
            OrderError::Conflict(_) => "CONFLICT",
            OrderError::Storage(_) => "DATABASE",
        }
    }

    /// HTTP status the error maps to
    pub fn http_status(&self) -> StatusCode {
        match self {
            OrderError::OrderNotFound(_)
            | OrderError::LineNotFound(_)
            | OrderError::TableNotFound(_)
            | OrderError::PaymentNotFound(_) => StatusCode::NOT_FOUND,

            OrderError::ProductUnavailable(_)
            | OrderError::InvalidPaymentMethod(_)
            | OrderError::OrderNotReady(_)
            | OrderError::InvalidState(_)
            | OrderError::Validation(_) => StatusCode::BAD_REQUEST,

            OrderError::AlreadyPaid(_) | OrderError::Conflict(_) => StatusCode::CONFLICT,

            OrderError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type OrderResult<T> = Result<T, OrderError>;
