//! 数据访问接口

use crate::error::Result;
use crate::models::{Entity, RecordId};
use async_trait::async_trait;

/// 单个实体的数据访问接口
///
/// 每次调用只发出一条语句：`insert` 为参数化INSERT并立即提交，`fetch_all` 为不带过滤、
/// 不带排序的SELECT，按存储引擎的自然顺序返回。出错时不重试，原样返回错误。
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// 插入一条记录，返回数据库分配的ID
    async fn insert(&self, draft: &E::Draft) -> Result<RecordId>;

    /// 读取全部记录，空表返回空列表
    async fn fetch_all(&self) -> Result<Vec<E>>;
}
