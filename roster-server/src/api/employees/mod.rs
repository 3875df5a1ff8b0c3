//! Employee API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/employee", routes())
}

/// 路由表
///
/// 认证要求由全局 require_auth 中间件按 (method, path) 判定：
/// `GET /employee` 与 `GET /employee/profile` 需要令牌，其余公开
fn routes() -> Router<ServerState> {
    Router::new()
        .route("/signup", post(handler::signup))
        .route("/login", post(handler::login))
        .route("/profile", get(handler::profile))
        .route("/search", get(handler::search))
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
