//! # MRI扫描数据库模块
//!
//! 负责患者、MRI扫描和用户记录的存取，提供MySQL连接池和参数化的插入/查询操作。

pub mod connection;
pub mod models;
pub mod queries;

// 重新导出主要类型
pub use connection::{DatabaseConfig, DatabasePool};
pub use models::*;
pub use queries::DatabaseQueries;
