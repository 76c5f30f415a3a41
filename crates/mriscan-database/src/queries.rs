//! 数据库查询操作
//!
//! 所有语句都是参数化的，列名和顺序与既有表结构一致。查询时把列转换成统一类型，
//! 这样 `DATE`、`INT UNSIGNED` 等列也能按文本/整数读出。

use crate::connection::DatabasePool;
use crate::models::*;
use async_trait::async_trait;
use mriscan_core::{
    MriError, MriScan, NewMriScan, NewPatient, NewUser, Patient, RecordId, Repository, Result,
    User,
};

const INSERT_PATIENT: &str = r#"
    INSERT INTO Patients (name, dob, contact, medical_history)
    VALUES (?, ?, ?, ?)
"#;

const SELECT_PATIENTS: &str = r#"
    SELECT CAST(id AS SIGNED) AS id,
           CAST(name AS CHAR) AS name,
           CAST(dob AS CHAR) AS dob,
           CAST(contact AS CHAR) AS contact,
           CAST(medical_history AS CHAR) AS medical_history
    FROM Patients
"#;

const INSERT_SCAN: &str = r#"
    INSERT INTO MRI_Scans (patient_id, scan_date, scan_type, notes, dicom_file_path)
    VALUES (?, ?, ?, ?, ?)
"#;

const SELECT_SCANS: &str = r#"
    SELECT CAST(id AS SIGNED) AS id,
           CAST(patient_id AS SIGNED) AS patient_id,
           CAST(scan_date AS CHAR) AS scan_date,
           CAST(scan_type AS CHAR) AS scan_type,
           CAST(notes AS CHAR) AS notes,
           CAST(dicom_file_path AS CHAR) AS dicom_file_path
    FROM MRI_Scans
"#;

const INSERT_USER: &str = r#"
    INSERT INTO Users (username, password_hash, role)
    VALUES (?, ?, ?)
"#;

// password_hash 不参与查询
const SELECT_USERS: &str = r#"
    SELECT CAST(id AS SIGNED) AS id,
           CAST(username AS CHAR) AS username,
           CAST(role AS CHAR) AS role
    FROM Users
"#;

/// 数据库查询操作接口
#[derive(Debug, Clone)]
pub struct DatabaseQueries {
    pool: DatabasePool,
}

impl DatabaseQueries {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn inserted_id(last_insert_id: u64) -> Result<RecordId> {
    RecordId::try_from(last_insert_id)
        .map_err(|_| MriError::Database(format!("生成的ID超出范围: {}", last_insert_id)))
}

// ========== 患者相关操作 ==========

#[async_trait]
impl Repository<Patient> for DatabaseQueries {
    async fn insert(&self, patient: &NewPatient) -> Result<RecordId> {
        let mut conn = self.pool.open().await?;

        let result = sqlx::query(INSERT_PATIENT)
            .bind(&patient.name)
            .bind(&patient.dob)
            .bind(&patient.contact)
            .bind(&patient.medical_history)
            .execute(&mut *conn)
            .await?;

        tracing::info!("Patient {} created", result.last_insert_id());
        inserted_id(result.last_insert_id())
    }

    async fn fetch_all(&self) -> Result<Vec<Patient>> {
        let mut conn = self.pool.open().await?;

        let results = sqlx::query_as::<_, DbPatient>(SELECT_PATIENTS)
            .fetch_all(&mut *conn)
            .await?;

        Ok(results.into_iter().map(Patient::from).collect())
    }
}

// ========== MRI扫描相关操作 ==========

#[async_trait]
impl Repository<MriScan> for DatabaseQueries {
    async fn insert(&self, scan: &NewMriScan) -> Result<RecordId> {
        let mut conn = self.pool.open().await?;

        let result = sqlx::query(INSERT_SCAN)
            .bind(scan.patient_id)
            .bind(&scan.scan_date)
            .bind(&scan.scan_type)
            .bind(&scan.notes)
            .bind(&scan.dicom_file_path)
            .execute(&mut *conn)
            .await?;

        tracing::info!(
            "MRI scan {} created for patient {}",
            result.last_insert_id(),
            scan.patient_id
        );
        inserted_id(result.last_insert_id())
    }

    async fn fetch_all(&self) -> Result<Vec<MriScan>> {
        let mut conn = self.pool.open().await?;

        let results = sqlx::query_as::<_, DbMriScan>(SELECT_SCANS)
            .fetch_all(&mut *conn)
            .await?;

        Ok(results.into_iter().map(MriScan::from).collect())
    }
}

// ========== 用户相关操作 ==========

#[async_trait]
impl Repository<User> for DatabaseQueries {
    async fn insert(&self, user: &NewUser) -> Result<RecordId> {
        let mut conn = self.pool.open().await?;

        let result = sqlx::query(INSERT_USER)
            .bind(&user.username)
            .bind(&user.password_hash)
            .bind(&user.role)
            .execute(&mut *conn)
            .await?;

        tracing::info!("User {} created", result.last_insert_id());
        inserted_id(result.last_insert_id())
    }

    async fn fetch_all(&self) -> Result<Vec<User>> {
        let mut conn = self.pool.open().await?;

        let results = sqlx::query_as::<_, DbUser>(SELECT_USERS)
            .fetch_all(&mut *conn)
            .await?;

        Ok(results.into_iter().map(User::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::DatabaseConfig;
    use mriscan_core::{PatientForm, RecordService};
    use std::sync::Arc;

    #[test]
    fn test_statements_keep_column_order() {
        assert!(INSERT_PATIENT.contains("Patients (name, dob, contact, medical_history)"));
        assert!(INSERT_SCAN
            .contains("MRI_Scans (patient_id, scan_date, scan_type, notes, dicom_file_path)"));
        assert!(INSERT_USER.contains("Users (username, password_hash, role)"));
    }

    #[test]
    fn test_selects_are_unfiltered_and_unordered() {
        for sql in [SELECT_PATIENTS, SELECT_SCANS, SELECT_USERS] {
            let upper = sql.to_uppercase();
            assert!(!upper.contains("WHERE"));
            assert!(!upper.contains("ORDER BY"));
        }
        assert!(!SELECT_USERS.contains("password_hash"));
    }

    #[test]
    fn test_inserted_id_range() {
        assert_eq!(inserted_id(7).unwrap(), 7);
        assert!(inserted_id(u64::MAX).is_err());
    }

    /// 需要一个已建好 Patients/MRI_Scans/Users 表的MySQL实例：
    /// `MRISCAN_TEST_DATABASE_URL=mysql://root:pw@localhost/mriscan cargo test -- --ignored`
    #[tokio::test]
    #[ignore]
    async fn test_patient_round_trip_against_mysql() {
        let url = match std::env::var("MRISCAN_TEST_DATABASE_URL") {
            Ok(url) => url,
            Err(_) => return,
        };
        let config = DatabaseConfig {
            url: Some(url),
            ..Default::default()
        };
        let queries = Arc::new(DatabaseQueries::new(
            DatabasePool::connect_lazy(&config).unwrap(),
        ));
        let service = RecordService::new(queries);

        let form = PatientForm {
            name: "Jane Doe".to_string(),
            dob: "1990-01-01".to_string(),
            contact: "555-1234".to_string(),
            medical_history: "none".to_string(),
        };
        let submission = service.add_patient(form).await.unwrap();
        assert!(submission.id >= 1);

        let listing = service.load_patients().await;
        let row = listing
            .rows
            .iter()
            .find(|p| p.id == submission.id)
            .unwrap();
        assert_eq!(row.name, "Jane Doe");
        assert_eq!(row.dob, "1990-01-01");
    }
}
