//! Payment API Module
//!
//! 收款接口：支付处理、支付查询、当日支付列表、可用支付方式。

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Payment router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/payments", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::process))
        .route("/methods", get(handler::list_methods))
        .route("/order/{order_id}", get(handler::get_by_order))
        .route("/day/{date}", get(handler::list_by_day))
}
