//! 错误定义模块

use thiserror::Error;

/// MRI扫描记录系统统一错误类型
#[derive(Error, Debug)]
pub enum MriError {
    /// 无法连接或认证到数据库
    #[error("数据库连接错误: {0}")]
    Connection(String),

    /// 输入校验失败，未发出任何数据库调用
    #[error("输入错误: {0}")]
    InvalidInput(String),

    /// 数据库拒绝了语句（约束冲突、类型不匹配等），保留驱动原始信息
    #[error("数据库错误: {0}")]
    Database(String),

    #[error("配置错误: {0}")]
    Config(String),

    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),
}

impl MriError {
    /// 错误对话框标题
    pub fn title(&self) -> &'static str {
        match self {
            MriError::Connection(_) | MriError::Database(_) => "Database Error",
            MriError::InvalidInput(_) => "Input Error",
            MriError::Config(_) => "Configuration Error",
            MriError::Io(_) => "File Error",
        }
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, MriError::Connection(_))
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, MriError::InvalidInput(_))
    }
}

#[cfg(feature = "database")]
impl From<sqlx::Error> for MriError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Configuration(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => MriError::Connection(err.to_string()),
            sqlx::Error::Database(db_err) => MriError::Database(db_err.message().to_string()),
            other => MriError::Database(other.to_string()),
        }
    }
}

/// MRI扫描记录系统统一结果类型
pub type Result<T> = std::result::Result<T, MriError>;
