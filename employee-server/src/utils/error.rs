//! 统一错误处理
//!
//! 提供应用级错误类型和响应结构：
//! - [`AppError`] - 应用错误枚举
//! - `ErrorBody` - API 错误响应结构
//!
//! # 错误码规范
//!
//! | 前缀 | 分类 | 示例 |
//! |------|------|------|
//! | E0xxx | 通用错误 | E0003 资源不存在 |
//! | E1xxx | 凭证错误 | E1001 邮箱或密码错误 |
//! | E2xxx | 权限错误 | E2001 无权限 |
//! | E3xxx | 认证令牌错误 | E3002 无效令牌 |
//! | E9xxx | 系统错误 | E9002 数据库错误 |
//!
//! # 使用示例
//!
//! ```ignore
//! Err(AppError::not_found("Employee not found"))
//! ```

use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::db::repository::RepoError;

/// API 错误响应结构
///
/// ```json
/// {
///   "code": "E0003",
///   "message": "Employee not found"
/// }
/// ```
#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

/// 应用错误枚举
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== 认证错误 (4xx) ==========
    #[error("Authentication required")]
    /// 未登录 (401)
    Unauthorized,

    #[error("Token expired")]
    /// 令牌过期 (401)
    TokenExpired,

    #[error("Invalid token: {0}")]
    /// 无效令牌 (401)
    InvalidToken(String),

    #[error("Invalid email or password")]
    /// 登录失败 (401)，不区分邮箱不存在与密码错误
    InvalidCredentials,

    #[error("Permission denied: {0}")]
    /// 无权限 (403)
    Forbidden(String),

    // ========== 业务逻辑错误 (4xx) ==========
    #[error("Resource not found: {0}")]
    /// 资源不存在 (404)
    NotFound(String),

    #[error("Resource already exists: {0}")]
    /// 资源冲突 (409)
    Conflict(String),

    #[error("Validation failed: {0}")]
    /// 验证失败 (400)
    Validation(String),

    // ========== 系统错误 (5xx) ==========
    #[error("Database error: {0}")]
    /// 数据库错误 (500)
    Database(String),

    #[error("Internal server error: {0}")]
    /// 内部错误 (500)
    Internal(String),
}

impl AppError {
    /// HTTP status and error code for this error
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "E3001"),
            AppError::InvalidToken(_) => (StatusCode::UNAUTHORIZED, "E3002"),
            AppError::TokenExpired => (StatusCode::UNAUTHORIZED, "E3003"),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "E1001"),
            AppError::Forbidden(_) => (StatusCode::FORBIDDEN, "E2001"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "E0003"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "E0004"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "E0002"),
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "E9002"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "E9001"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = match &self {
            AppError::Unauthorized => "Please login first".to_string(),
            AppError::TokenExpired => "Token expired".to_string(),
            AppError::InvalidToken(_) => "Invalid token".to_string(),
            AppError::InvalidCredentials => self.to_string(),
            AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::Validation(msg) => msg.clone(),
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                "Database error".to_string()
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                "Internal server error".to_string()
            }
        };

        let body = Json(ErrorBody { code, message });

        (status, body).into_response()
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::Validation(format!("Multipart error: {}", e))
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn unauthorized() -> Self {
        Self::Unauthorized
    }

    pub fn token_expired() -> Self {
        Self::TokenExpired
    }

    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::InvalidToken(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_errors_map_to_http_statuses() {
        let cases = [
            (RepoError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (RepoError::Duplicate("x".into()), StatusCode::CONFLICT),
            (RepoError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (RepoError::Database("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (repo_err, status) in cases {
            assert_eq!(AppError::from(repo_err).status_and_code().0, status);
        }
    }

    #[test]
    fn credential_errors_share_one_code() {
        let (status, code) = AppError::InvalidCredentials.status_and_code();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(code, "E1001");
    }

    #[tokio::test]
    async fn error_body_has_code_and_message_only() {
        let resp = AppError::not_found("Employee not found").into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "code": "E0003", "message": "Employee not found" })
        );
    }
}
