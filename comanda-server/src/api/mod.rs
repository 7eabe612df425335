//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`orders`] - 订单生命周期接口 (创建/改单/出餐/队列)
//! - [`payments`] - 收款接口

pub mod health;
pub mod orders;
pub mod payments;

use axum::Router;

use crate::core::ServerState;

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(orders::router())
        .merge(payments::router())
}
