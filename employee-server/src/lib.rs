//! Employee Server - 员工档案后端
//!
//! # 架构概述
//!
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储，唯一索引保证编号与邮箱不重复
//! - **认证** (`auth`): JWT + Argon2 认证体系
//! - **服务** (`services`): 员工业务逻辑与照片存储
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! employee-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、本人校验
//! ├── services/      # 员工服务、照片存储
//! ├── api/           # HTTP 路由和处理器
//! ├── server/        # 请求日志中间件
//! ├── utils/         # 错误、日志、校验
//! └── db/            # 数据库层
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod server;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use api::build_app;
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

// Security logging macro
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境：加载 `.env`，初始化日志
///
/// 日志参数读取 `LOG_LEVEL`、`LOG_JSON`、`LOG_DIR`
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let json = std::env::var("LOG_JSON")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false);
    let log_dir = std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty());
    if let Some(dir) = &log_dir {
        std::fs::create_dir_all(dir)?;
    }

    init_logger_with_file(log_level.as_deref(), json, log_dir.as_deref())
}

pub fn print_banner() {
    println!(
        r#"
    ______                __
   / ____/___ ___  ____  / /___  __  _____  ___
  / __/ / __ `__ \/ __ \/ / __ \/ / / / _ \/ _ \
 / /___/ / / / / / /_/ / / /_/ / /_/ /  __/  __/
/_____/_/ /_/ /_/ .___/_/\____/\__, /\___/\___/
               /_/            /____/
    "#
    );
}
