use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;

/// 服务器状态 - 持有所有服务的共享引用
///
/// ServerState 是服务的核心数据结构，axum State 需要 Clone，
/// 连接池和 Arc 字段浅拷贝即可。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | pool | SqlitePool | 数据库连接池 |
/// | jwt_service | Option<Arc<JwtService>> | JWT 认证服务 (密钥未配置时为 None) |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 数据库连接池
    pub pool: SqlitePool,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Option<Arc<JwtService>>,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`ServerState::initialize`] 方法代替；测试场景直接传入
    /// 内存数据库连接池。
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        let jwt_service = config
            .jwt
            .clone()
            .map(|cfg| Arc::new(JwtService::with_config(cfg)));
        Self {
            config,
            pool,
            jwt_service,
        }
    }

    /// 初始化服务器状态
    ///
    /// 打开数据库连接池并应用迁移
    ///
    /// # Panics
    ///
    /// 数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        let db_service = DbService::new(&config.database_url)
            .await
            .expect("Failed to initialize database");

        Self::new(config.clone(), db_service.pool)
    }

    /// 获取 JWT 服务 (密钥未配置时返回 None)
    pub fn jwt_service(&self) -> Option<Arc<JwtService>> {
        self.jwt_service.clone()
    }
}
