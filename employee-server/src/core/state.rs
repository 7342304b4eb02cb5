use std::sync::Arc;
use std::time::Instant;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::{Config, Result};
use crate::db::DbService;
use crate::services::{EmployeeService, PhotoStore};

/// 服务器状态 - 持有所有服务的共享引用
///
/// Clone 只复制句柄，可直接作为 axum 的 `State`。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | photos | PhotoStore | 照片存储 |
/// | started_at | Instant | 启动时间 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT 认证服务
    pub jwt_service: Arc<JwtService>,
    /// 照片存储
    pub photos: PhotoStore,
    /// 启动时间
    pub started_at: Instant,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("work_dir", &self.config.work_dir)
            .field("photos", &self.photos)
            .finish_non_exhaustive()
    }
}

impl ServerState {
    /// 手动构造，通常使用 [`ServerState::initialize`]
    pub fn new(config: Config, db: Surreal<Db>) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let photos = PhotoStore::new(config.uploads_dir(), config.max_photo_bytes);
        Self {
            config,
            db,
            jwt_service,
            photos,
            started_at: Instant::now(),
        }
    }

    /// 初始化服务器状态
    ///
    /// 1. 工作目录结构 (database/, uploads/)
    /// 2. 数据库 (work_dir/database, RocksDB)
    /// 3. JWT 与照片存储
    pub async fn initialize(config: &Config) -> Result<Self> {
        config.ensure_work_dir_structure()?;

        let db_service = DbService::new(
            &config.database_dir(),
            &config.db_namespace,
            &config.db_name,
        )
        .await?;

        Ok(Self::new(config.clone(), db_service.db))
    }

    /// 内存数据库状态 (测试场景)，照片仍写入 work_dir/uploads
    pub async fn in_memory(config: &Config) -> Result<Self> {
        config.ensure_work_dir_structure()?;
        let db_service = DbService::memory(&config.db_namespace, &config.db_name).await?;
        Ok(Self::new(config.clone(), db_service.db))
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }

    /// 员工服务
    pub fn employee_service(&self) -> EmployeeService {
        EmployeeService::new(self.db.clone(), self.photos.clone())
    }

    /// 运行时间 (秒)
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
