//! 录入表单校验
//!
//! 只做最少的检查：必填字段非空、患者ID可解析为整数。日期格式、字段长度、唯一性都不在这里检查，
//! 通过校验的字段原样传给数据库。

use crate::credentials::CredentialHasher;
use crate::error::{MriError, Result};
use crate::models::{NewMriScan, NewPatient, NewUser, PatientForm, ScanForm, UserForm};
use tracing::debug;

fn require(value: &str, message: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(MriError::InvalidInput(message.to_string()));
    }
    Ok(())
}

/// 解析十进制患者ID
pub fn parse_patient_id(raw: &str) -> Result<i64> {
    require(raw, "患者ID不能为空")?;
    raw.trim()
        .parse::<i64>()
        .map_err(|_| MriError::InvalidInput(format!("患者ID必须是整数: {}", raw.trim())))
}

impl PatientForm {
    /// 校验患者表单，姓名必填
    pub fn validate(self) -> Result<NewPatient> {
        require(&self.name, "姓名不能为空")?;

        Ok(NewPatient {
            name: self.name,
            dob: self.dob,
            contact: self.contact,
            medical_history: self.medical_history,
        })
    }
}

impl ScanForm {
    /// 校验扫描表单，患者ID必填且为整数；不检查该患者是否存在
    pub fn validate(self) -> Result<NewMriScan> {
        let patient_id = parse_patient_id(&self.patient_id)?;

        Ok(NewMriScan {
            patient_id,
            scan_date: self.scan_date,
            scan_type: self.scan_type,
            notes: self.notes,
            dicom_file_path: self.dicom_file_path,
        })
    }
}

impl UserForm {
    /// 校验用户表单，用户名和密码必填；校验通过后才计算摘要
    pub fn validate(self, hasher: &dyn CredentialHasher) -> Result<NewUser> {
        if self.username.trim().is_empty() || self.password.trim().is_empty() {
            return Err(MriError::InvalidInput("用户名和密码不能为空".to_string()));
        }

        let password_hash = hasher.hash(&self.password);
        debug!("Password digest computed for user {}", self.username);

        Ok(NewUser {
            username: self.username,
            password_hash,
            role: self.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::{hash_password, Sha256Hasher};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingHasher {
        calls: AtomicUsize,
    }

    impl CredentialHasher for CountingHasher {
        fn hash(&self, plaintext: &str) -> String {
            self.calls.fetch_add(1, Ordering::SeqCst);
            hash_password(plaintext)
        }
    }

    #[test]
    fn test_patient_name_required() {
        let form = PatientForm {
            name: "   ".to_string(),
            ..Default::default()
        };
        assert!(form.validate().unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_patient_optional_fields_verbatim() {
        let form = PatientForm {
            name: "Jane Doe".to_string(),
            dob: "not-a-date".to_string(),
            contact: String::new(),
            medical_history: " asthma ".to_string(),
        };
        let patient = form.validate().unwrap();
        assert_eq!(patient.name, "Jane Doe");
        assert_eq!(patient.dob, "not-a-date");
        assert_eq!(patient.contact, "");
        assert_eq!(patient.medical_history, " asthma ");
    }

    #[test]
    fn test_parse_patient_id() {
        assert_eq!(parse_patient_id("42").unwrap(), 42);
        assert_eq!(parse_patient_id(" 7 ").unwrap(), 7);
        assert_eq!(parse_patient_id("-3").unwrap(), -3);
        assert!(parse_patient_id("").unwrap_err().is_invalid_input());
        assert!(parse_patient_id("abc").unwrap_err().is_invalid_input());
        assert!(parse_patient_id("4.5").unwrap_err().is_invalid_input());
        assert!(parse_patient_id("0x10").unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_scan_form_passes_other_fields_through() {
        let form = ScanForm {
            patient_id: "12".to_string(),
            scan_date: "2024-13-45".to_string(),
            scan_type: "T1".to_string(),
            notes: String::new(),
            dicom_file_path: "/missing/file.dcm".to_string(),
        };
        let scan = form.validate().unwrap();
        assert_eq!(scan.patient_id, 12);
        assert_eq!(scan.scan_date, "2024-13-45");
        assert_eq!(scan.dicom_file_path, "/missing/file.dcm");
    }

    #[test]
    fn test_user_requires_username_before_hashing() {
        let hasher = CountingHasher::default();
        let form = UserForm {
            username: String::new(),
            password: "x".to_string(),
            role: "admin".to_string(),
        };
        assert!(form.validate(&hasher).unwrap_err().is_invalid_input());
        assert_eq!(hasher.calls.load(Ordering::SeqCst), 0);

        let form = UserForm {
            username: "jdoe".to_string(),
            password: " ".to_string(),
            role: String::new(),
        };
        assert!(form.validate(&hasher).unwrap_err().is_invalid_input());
        assert_eq!(hasher.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_user_password_is_hashed() {
        let form = UserForm {
            username: "jdoe".to_string(),
            password: "hunter2".to_string(),
            role: String::new(),
        };
        let user = form.validate(&Sha256Hasher).unwrap();
        assert_eq!(user.password_hash, hash_password("hunter2"));
        assert_ne!(user.password_hash, "hunter2");
        assert_eq!(user.role, "");
    }
}
