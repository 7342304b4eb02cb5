//! 认证中间件
//!
//! 为受保护的员工路由提供 JWT 认证与本人校验

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::AppError;
use crate::auth::CurrentUser;
use crate::auth::extractor::authenticate_header;
use crate::core::ServerState;
use crate::security_log;

/// 认证中间件 - 要求员工登录
///
/// 从 `Authorization: Bearer <token>` 头提取并验证 JWT。
/// 验证成功后将 [`CurrentUser`] 注入请求扩展。
///
/// # 错误处理
///
/// | 错误 | HTTP 状态码 |
/// |------|------------|
/// | 无 Authorization 头 | 401 Unauthorized |
/// | 令牌过期 | 401 TokenExpired |
/// | 无效令牌 | 401 InvalidToken |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // CORS 预检
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let user = authenticate_header(state.get_jwt_service(), auth_header, req.uri())?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// 本人校验 - 员工只能修改或删除自己的记录
///
/// # 错误
///
/// 令牌主体与目标员工编号不一致时返回 403 Forbidden
pub fn ensure_self(user: &CurrentUser, employee_id: u32) -> Result<(), AppError> {
    if !user.is_self(employee_id) {
        security_log!(
            "WARN",
            "permission_denied",
            employee_id = user.employee_id,
            target_employee_id = employee_id
        );
        return Err(AppError::forbidden(
            "You can only modify your own employee record",
        ));
    }
    Ok(())
}
