use std::path::PathBuf;
use std::time::Duration;

use crate::auth::{JwtConfig, JwtError};

/// Multipart framing and text fields on top of the photo itself
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (数据库、照片) |
/// | HTTP_PORT | 5000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | DB_NAMESPACE | employees | SurrealDB namespace |
/// | DB_NAME | employees | SurrealDB database |
/// | MAX_PHOTO_BYTES | 5242880 | 照片大小上限 |
/// | LOGIN_DELAY_MS | 500 | 登录固定延迟 (毫秒) |
/// | SHUTDOWN_TIMEOUT_MS | 10000 | 优雅关闭超时 (毫秒) |
///
/// JWT 相关变量见 [`JwtConfig::from_env`]，日志变量见 `setup_environment`。
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/srv/employees HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库和上传的照片
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | production
    pub environment: String,
    /// SurrealDB namespace
    pub db_namespace: String,
    /// SurrealDB database
    pub db_name: String,
    /// 照片大小上限 (字节)
    pub max_photo_bytes: usize,
    /// 登录固定延迟 (毫秒)，成功与失败一致
    pub login_delay_ms: u64,
    /// 关闭超时时间 (毫秒)
    pub shutdown_timeout_ms: u64,
    /// JWT 认证配置
    pub jwt: JwtConfig,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值；JWT 密钥缺失时按构建类型处理
    pub fn from_env() -> Result<Self, JwtError> {
        Ok(Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: env_parse("HTTP_PORT", 5000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            db_namespace: std::env::var("DB_NAMESPACE").unwrap_or_else(|_| "employees".into()),
            db_name: std::env::var("DB_NAME").unwrap_or_else(|_| "employees".into()),
            max_photo_bytes: env_parse("MAX_PHOTO_BYTES", 5 * 1024 * 1024),
            login_delay_ms: env_parse("LOGIN_DELAY_MS", 500),
            shutdown_timeout_ms: env_parse("SHUTDOWN_TIMEOUT_MS", 10_000),
            jwt: JwtConfig::from_env()?,
        })
    }

    /// 测试配置：指定工作目录，固定 JWT 密钥，无登录延迟
    ///
    /// 不读取环境变量
    pub fn for_tests(work_dir: impl Into<String>) -> Self {
        Self {
            work_dir: work_dir.into(),
            http_port: 0,
            environment: "test".into(),
            db_namespace: "test".into(),
            db_name: "test".into(),
            max_photo_bytes: 5 * 1024 * 1024,
            login_delay_ms: 0,
            shutdown_timeout_ms: 1_000,
            jwt: JwtConfig::with_secret("test-secret-key-with-at-least-32-characters"),
        }
    }

    /// 数据库目录
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 照片目录
    pub fn uploads_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join(crate::services::photo_store::PHOTO_PREFIX)
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.uploads_dir())?;
        Ok(())
    }

    /// 请求体上限：照片上限加表单开销
    pub fn body_limit(&self) -> usize {
        self.max_photo_bytes.saturating_add(FORM_OVERHEAD_BYTES)
    }

    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.shutdown_timeout_ms)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
