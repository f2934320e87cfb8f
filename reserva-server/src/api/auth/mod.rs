//! Auth API 模块

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/auth", routes())
}

fn routes() -> Router<ServerState> {
    // 公共路由：require_auth 中间件按路径跳过这两个接口
    Router::new()
        .route("/register", post(handler::register))
        .route("/login", post(handler::login))
}
