//! Employee API Module
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/employees/register | POST | 注册 (JSON 或 multipart) | 无 |
//! | /api/employees/login | POST | 登录，返回 JWT | 无 |
//! | /api/employees (/api/employees/) | GET | 员工列表 | 无 |
//! | /api/employees/search/{name} | GET | 按姓名搜索 | 无 |
//! | /api/employees/{id} | GET | 员工详情 | 无 |
//! | /api/employees/me | GET | 当前员工 | JWT |
//! | /api/employees/{id} | PUT | 更新本人记录 | JWT |
//! | /api/employees/{id} | DELETE | 删除本人记录 | JWT |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_auth;
use crate::core::ServerState;

/// Employee router
pub fn router(state: &ServerState) -> Router<ServerState> {
    Router::new()
        .route("/api/employees/", get(handler::list))
        .nest("/api/employees", routes(state))
}

fn routes(state: &ServerState) -> Router<ServerState> {
    // 公共路由
    let public_routes = Router::new()
        .route("/register", post(handler::register))
        .route("/login", post(handler::login))
        .route("/", get(handler::list))
        .route("/search/{name}", get(handler::search))
        .route("/{id}", get(handler::get_by_id));

    // 受保护路由：需要登录，且只能操作本人记录
    let protected_routes = Router::new()
        .route("/me", get(handler::me))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    public_routes.merge(protected_routes)
}
