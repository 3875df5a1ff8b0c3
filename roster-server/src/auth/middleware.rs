//! 认证中间件
//!
//! 为 JWT 认证提供 Axum 中间件

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentEmployee, JwtService};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

/// 判断请求是否需要认证
///
/// 受保护路由：
/// - `GET /employee` (名册列表)
/// - `GET /employee/profile` (当前员工档案)
///
/// 其余路由全部公开，按原样放行
fn is_protected(method: &http::Method, path: &str) -> bool {
    method == http::Method::GET && (path == "/employee" || path == "/employee/profile")
}

/// 认证中间件 - 要求受保护路由携带有效令牌
///
/// 从 `Authorization: Bearer <token>` 头提取并验证 JWT。
/// 验证成功后将 [`CurrentEmployee`] 注入请求扩展
/// (`req.extensions_mut().insert(employee)`)。
/// 无请求间状态，每个请求独立验证。
///
/// # 跳过认证的路径
///
/// - `OPTIONS *` (CORS 预检)
/// - 所有未列入受保护路由表的路径
///
/// # 错误处理
///
/// | 错误 | HTTP 状态码 |
/// |------|------------|
/// | 无 Authorization 头或非 Bearer | 401 Unauthorized |
/// | 密钥未配置 (部署错误) | 401 Unauthorized |
/// | 令牌过期或签名无效 | 401 InvalidToken |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // 允许 CORS 预检的 OPTIONS 请求 (跳过认证)
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // 公开路由跳过认证
    if !is_protected(req.method(), req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header.and_then(JwtService::extract_from_header) {
        Some(token) => token,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::unauthorized("No token provided"));
        }
    };

    // 密钥未配置属于部署错误，但对调用方同样表现为 401
    let Some(jwt_service) = state.jwt_service() else {
        security_log!("WARN", "auth_unconfigured", uri = format!("{:?}", req.uri()));
        return Err(AppError::unauthorized("JWT secret not configured"));
    };

    match jwt_service.validate_token(token) {
        Ok(claims) => {
            let employee = CurrentEmployee::from(claims);
            req.extensions_mut().insert(employee);
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );

            // 过期与签名错误对外统一为同一消息
            Err(AppError::invalid_token("Invalid token"))
        }
    }
}
