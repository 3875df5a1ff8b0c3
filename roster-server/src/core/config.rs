use crate::auth::JwtConfig;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | DATABASE_URL | sqlite:roster.db | 存储连接串 (sqlx URL) |
/// | ENVIRONMENT | development | 运行环境 |
/// | JWT_SECRET | (必须) | 令牌签名密钥 (至少 32 字节) |
/// | JWT_EXPIRATION_MINUTES | 1440 | 令牌过期时间 (分钟) |
/// | JWT_ISSUER | roster-server | 令牌签发者 |
/// | JWT_AUDIENCE | roster-clients | 令牌受众 |
///
/// # 示例
///
/// ```ignore
/// DATABASE_URL=sqlite:/data/roster.db HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 存储连接串 (sqlx URL)
    pub database_url: String,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// JWT 认证配置 (密钥未配置时为 None，相关接口返回 401)
    pub jwt: Option<JwtConfig>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值。JWT 密钥缺失或过短不会阻止启动，
    /// 但所有需要令牌的操作都会失败。
    pub fn from_env() -> Self {
        let jwt = match JwtConfig::from_env() {
            Ok(cfg) => Some(cfg),
            Err(e) => {
                tracing::warn!("JWT configuration unavailable: {}", e);
                None
            }
        };

        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:roster.db".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            jwt,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
