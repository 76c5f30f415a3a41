//! 记录服务
//!
//! 对应三个录入页签的“添加”和“加载”操作：校验 → 插入 → 刷新列表。每个实体列表同一时刻只允许一个操作在执行，
//! 界面上不会出现交错的半更新列表。

use crate::credentials::{CredentialHasher, Sha256Hasher};
use crate::error::{MriError, Result};
use crate::models::{Entity, MriScan, Patient, PatientForm, RecordId, ScanForm, User, UserForm};
use crate::repository::Repository;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// 列表刷新结果
///
/// 连接失败和空表在显示上一致（都是空列表），但失败原因保存在 `failure` 中，由调用方提示给用户。
#[derive(Debug)]
pub struct Listing<E> {
    pub rows: Vec<E>,
    pub failure: Option<MriError>,
}

impl<E> Listing<E> {
    pub fn is_ok(&self) -> bool {
        self.failure.is_none()
    }
}

/// 添加成功后的结果：新记录ID和刷新后的列表
#[derive(Debug)]
pub struct Submission<E> {
    pub id: RecordId,
    pub listing: Listing<E>,
}

/// 记录服务
pub struct RecordService {
    patients: Arc<dyn Repository<Patient>>,
    scans: Arc<dyn Repository<MriScan>>,
    users: Arc<dyn Repository<User>>,
    hasher: Arc<dyn CredentialHasher>,
    patient_lane: Mutex<()>,
    scan_lane: Mutex<()>,
    user_lane: Mutex<()>,
}

impl RecordService {
    /// 使用同一个存储实现三个实体的数据访问，密码使用SHA-256摘要
    pub fn new<S>(store: Arc<S>) -> Self
    where
        S: Repository<Patient> + Repository<MriScan> + Repository<User> + 'static,
    {
        Self::with_repositories(
            store.clone(),
            store.clone(),
            store,
            Arc::new(Sha256Hasher),
        )
    }

    pub fn with_repositories(
        patients: Arc<dyn Repository<Patient>>,
        scans: Arc<dyn Repository<MriScan>>,
        users: Arc<dyn Repository<User>>,
        hasher: Arc<dyn CredentialHasher>,
    ) -> Self {
        Self {
            patients,
            scans,
            users,
            hasher,
            patient_lane: Mutex::new(()),
            scan_lane: Mutex::new(()),
            user_lane: Mutex::new(()),
        }
    }

    // ========== 患者 ==========

    /// 添加患者
    pub async fn add_patient(&self, form: PatientForm) -> Result<Submission<Patient>> {
        let draft = form.validate().map_err(rejected::<Patient>)?;
        submit(&self.patient_lane, self.patients.as_ref(), draft).await
    }

    /// 加载患者列表
    pub async fn load_patients(&self) -> Listing<Patient> {
        let _guard = self.patient_lane.lock().await;
        fetch_listing(self.patients.as_ref()).await
    }

    // ========== MRI扫描 ==========

    /// 添加MRI扫描记录
    pub async fn add_scan(&self, form: ScanForm) -> Result<Submission<MriScan>> {
        let draft = form.validate().map_err(rejected::<MriScan>)?;
        submit(&self.scan_lane, self.scans.as_ref(), draft).await
    }

    /// 加载MRI扫描列表
    pub async fn load_scans(&self) -> Listing<MriScan> {
        let _guard = self.scan_lane.lock().await;
        fetch_listing(self.scans.as_ref()).await
    }

    // ========== 用户 ==========

    /// 添加用户
    pub async fn add_user(&self, form: UserForm) -> Result<Submission<User>> {
        let draft = form
            .validate(self.hasher.as_ref())
            .map_err(rejected::<User>)?;
        submit(&self.user_lane, self.users.as_ref(), draft).await
    }

    /// 加载用户列表
    pub async fn load_users(&self) -> Listing<User> {
        let _guard = self.user_lane.lock().await;
        fetch_listing(self.users.as_ref()).await
    }
}

fn rejected<E: Entity>(err: MriError) -> MriError {
    warn!("{} input rejected: {}", E::TABLE, err);
    err
}

async fn submit<E: Entity>(
    lane: &Mutex<()>,
    repo: &dyn Repository<E>,
    draft: E::Draft,
) -> Result<Submission<E>> {
    let _guard = lane.lock().await;

    let id = repo.insert(&draft).await.map_err(|e| {
        error!("Failed to insert into {}: {}", E::TABLE, e);
        e
    })?;
    info!("Inserted record {} into {}", id, E::TABLE);

    let listing = fetch_listing(repo).await;
    Ok(Submission { id, listing })
}

async fn fetch_listing<E: Entity>(repo: &dyn Repository<E>) -> Listing<E> {
    match repo.fetch_all().await {
        Ok(rows) => {
            info!("Loaded {} rows from {}", rows.len(), E::TABLE);
            Listing {
                rows,
                failure: None,
            }
        }
        Err(e) => {
            error!("Failed to load {}: {}", E::TABLE, e);
            Listing {
                rows: Vec::new(),
                failure: Some(e),
            }
        }
    }
}
