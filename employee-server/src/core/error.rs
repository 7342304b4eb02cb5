use thiserror::Error;

use crate::auth::JwtError;
use crate::utils::AppError;

/// 启动与运行期错误 (非请求级)
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("配置错误: {0}")]
    Config(#[from] JwtError),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("初始化失败: {0}")]
    Init(#[from] AppError),

    #[error("内部服务器错误")]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
