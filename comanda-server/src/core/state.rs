use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::{DbService, seed};
use crate::orders::OrderWorkflow;

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 是整个服务的核心数据结构，持有所有服务的共享引用。
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | workflow | Arc<OrderWorkflow> | 订单工作流 (唯一变更路径) |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// 订单工作流
    pub workflow: Arc<OrderWorkflow>,
    /// JWT 认证服务
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构
    /// 2. 数据库 (work_dir/database/comanda.db) + 基础数据
    /// 3. 订单工作流和 JWT 服务
    ///
    /// # Panics
    ///
    /// 数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("comanda.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");

        Self::from_service(config, db_service).await
    }

    /// 基于内存数据库初始化 (测试和临时运行)
    pub async fn initialize_in_memory(config: &Config) -> Self {
        let db_service = DbService::in_memory()
            .await
            .expect("Failed to initialize in-memory database");
        Self::from_service(config, db_service).await
    }

    async fn from_service(config: &Config, db_service: DbService) -> Self {
        let db = db_service.db;

        seed::seed_defaults(&db, config.seed_demo_catalog)
            .await
            .expect("Failed to seed baseline data");

        Self {
            config: config.clone(),
            db: db.clone(),
            workflow: Arc::new(OrderWorkflow::new(db)),
            jwt_service: Arc::new(JwtService::new(config.jwt.clone())),
        }
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
