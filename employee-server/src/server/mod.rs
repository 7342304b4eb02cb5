//! HTTP 服务器中间件

pub mod middleware;
