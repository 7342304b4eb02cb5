//! 认证授权模块
//!
//! - [`JwtService`] - JWT 令牌服务
//! - [`CurrentUser`] - 当前员工上下文
//! - [`require_auth`] - 认证中间件
//! - [`ensure_self`] - 本人校验

pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{ensure_self, require_auth};
