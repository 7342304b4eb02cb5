//! 服务层
//!
//! - [`EmployeeService`] - 员工注册、登录校验、更新、删除
//! - [`PhotoStore`] - 员工照片存储

pub mod employee;
pub mod photo_store;

pub use employee::EmployeeService;
pub use photo_store::{PhotoStore, PhotoUpload};
