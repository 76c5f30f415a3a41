//! # MRI Scan Core
//!
//! MRI扫描记录系统的核心模块，提供数据模型、错误定义、表单校验、密码摘要和记录服务。

pub mod credentials;
pub mod error;
pub mod files;
pub mod models;
pub mod repository;
pub mod service;
pub mod validation;

pub use credentials::{hash_password, CredentialHasher, Sha256Hasher};
pub use error::{MriError, Result};
pub use files::{select_dicom_file, FileFilter};
pub use models::*;
pub use repository::Repository;
pub use service::{Listing, RecordService, Submission};
