//! 核心数据模型定义
//!
//! 每个实体有三种形态：表单（用户原始输入）、草稿（已校验、待插入）、记录（数据库中的一行）。

use serde::{Deserialize, Serialize};

/// 数据库分配的记录ID
pub type RecordId = i64;

/// 可存取的实体
pub trait Entity: Clone + Send + Sync + 'static {
    /// 校验后待插入的数据
    type Draft: Send + Sync;

    /// 数据表名
    const TABLE: &'static str;
}

/// 患者记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: RecordId,
    pub name: String,
    pub dob: String, // YYYY-MM-DD，不校验
    pub contact: String,
    pub medical_history: String,
}

/// 待插入的患者
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPatient {
    pub name: String,
    pub dob: String,
    pub contact: String,
    pub medical_history: String,
}

/// 患者录入表单
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientForm {
    pub name: String,
    pub dob: String,
    pub contact: String,
    pub medical_history: String,
}

impl Entity for Patient {
    type Draft = NewPatient;
    const TABLE: &'static str = "Patients";
}

/// MRI扫描记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MriScan {
    pub id: RecordId,
    pub patient_id: i64, // 不检查对应患者是否存在
    pub scan_date: String,
    pub scan_type: String,
    pub notes: String,
    pub dicom_file_path: String, // 仅作为文本保存，从不打开
}

/// 待插入的MRI扫描
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMriScan {
    pub patient_id: i64,
    pub scan_date: String,
    pub scan_type: String,
    pub notes: String,
    pub dicom_file_path: String,
}

/// MRI扫描录入表单
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanForm {
    pub patient_id: String,
    pub scan_date: String,
    pub scan_type: String,
    pub notes: String,
    pub dicom_file_path: String,
}

impl Entity for MriScan {
    type Draft = NewMriScan;
    const TABLE: &'static str = "MRI_Scans";
}

/// 用户记录，列表查询不返回密码摘要
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    pub username: String,
    pub role: String,
}

/// 待插入的用户
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub role: String,
}

/// 用户录入表单
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserForm {
    pub username: String,
    pub password: String,
    pub role: String,
}

impl Entity for User {
    type Draft = NewUser;
    const TABLE: &'static str = "Users";
}
