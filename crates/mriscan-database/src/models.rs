//! 数据库模型

use mriscan_core::models::*;
use sqlx::FromRow;

// 数据库表模型 - 使用FromRow trait用于SQL查询，可空的文本列读出为空字符串

/// 数据库患者表 `Patients`
#[derive(Debug, FromRow)]
pub struct DbPatient {
    pub id: i64,
    pub name: Option<String>,
    pub dob: Option<String>,
    pub contact: Option<String>,
    pub medical_history: Option<String>,
}

impl From<DbPatient> for Patient {
    fn from(db_patient: DbPatient) -> Self {
        Patient {
            id: db_patient.id,
            name: db_patient.name.unwrap_or_default(),
            dob: db_patient.dob.unwrap_or_default(),
            contact: db_patient.contact.unwrap_or_default(),
            medical_history: db_patient.medical_history.unwrap_or_default(),
        }
    }
}

/// 数据库MRI扫描表 `MRI_Scans`
#[derive(Debug, FromRow)]
pub struct DbMriScan {
    pub id: i64,
    pub patient_id: i64,
    pub scan_date: Option<String>,
    pub scan_type: Option<String>,
    pub notes: Option<String>,
    pub dicom_file_path: Option<String>,
}

impl From<DbMriScan> for MriScan {
    fn from(db_scan: DbMriScan) -> Self {
        MriScan {
            id: db_scan.id,
            patient_id: db_scan.patient_id,
            scan_date: db_scan.scan_date.unwrap_or_default(),
            scan_type: db_scan.scan_type.unwrap_or_default(),
            notes: db_scan.notes.unwrap_or_default(),
            dicom_file_path: db_scan.dicom_file_path.unwrap_or_default(),
        }
    }
}

/// 数据库用户表 `Users`（不含 password_hash 列）
#[derive(Debug, FromRow)]
pub struct DbUser {
    pub id: i64,
    pub username: Option<String>,
    pub role: Option<String>,
}

impl From<DbUser> for User {
    fn from(db_user: DbUser) -> Self {
        User {
            id: db_user.id,
            username: db_user.username.unwrap_or_default(),
            role: db_user.role.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_columns_become_empty() {
        let patient = Patient::from(DbPatient {
            id: 3,
            name: Some("Jane Doe".to_string()),
            dob: None,
            contact: None,
            medical_history: Some("none".to_string()),
        });
        assert_eq!(patient.id, 3);
        assert_eq!(patient.dob, "");
        assert_eq!(patient.contact, "");
        assert_eq!(patient.medical_history, "none");
    }

    #[test]
    fn test_scan_conversion() {
        let scan = MriScan::from(DbMriScan {
            id: 1,
            patient_id: 42,
            scan_date: Some("2024-01-01".to_string()),
            scan_type: Some("T1".to_string()),
            notes: None,
            dicom_file_path: Some("/data/a.dcm".to_string()),
        });
        assert_eq!(scan.patient_id, 42);
        assert_eq!(scan.notes, "");
        assert_eq!(scan.dicom_file_path, "/data/a.dcm");
    }
}
