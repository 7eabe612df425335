//! Comanda Server - 餐厅点单后端
//!
//! # 架构概述
//!
//! 围绕一条共享订单记录协调四个角色：桌边顾客下单、服务员改单、
//! 厨师出餐、收银员收款。核心是订单生命周期工作流：
//!
//! - **订单编号** (`orders::number`): 按营业日计数的可读编号
//! - **状态机** (`orders::status`): Pending → InPreparation → Ready → Settled
//! - **工作流** (`orders::workflow`): 唯一的订单变更路径，按单加锁
//! - **收款** (`orders::workflow`): 一单一付，支付与结清同事务提交
//!
//! # 模块结构
//!
//! ```text
//! comanda-server/src/
//! ├── core/          # 配置、状态、HTTP 服务器
//! ├── auth/          # JWT 校验、角色授权
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 嵌入式 SurrealDB 存储
//! ├── orders/        # 订单生命周期核心
//! └── utils/         # 错误、日志、时间工具
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService, Role};
pub use core::{Config, Server, ServerState};
pub use orders::{OrderStatus, OrderWorkflow};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
   ______                                 __
  / ____/___  ____ ___  ____ _____  ____/ /___ _
 / /   / __ \/ __ `__ \/ __ `/ __ \/ __  / __ `/
/ /___/ /_/ / / / / / / /_/ / / / / /_/ / /_/ /
\____/\____/_/ /_/ /_/\__,_/_/ /_/\__,_/\__,_/
    "#
    );
}
