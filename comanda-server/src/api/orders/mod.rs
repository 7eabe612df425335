//! Order API Module
//!
//! 订单生命周期接口：创建 (顾客/服务员)、改单 (服务员)、
//! 出餐标记 (厨师)、各角色队列和日报 (管理员)。

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create).get(handler::list))
        // Cook marks a line done/undone; drives the status aggregation
        .route("/lines/completion", put(handler::set_line_completion))
        .route("/report/{date}", get(handler::daily_report))
        .route("/{id}", get(handler::get_by_id).put(handler::revise))
}
