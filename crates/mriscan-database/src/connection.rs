//! 数据库连接管理

use mriscan_core::{MriError, Result};
use serde::{Deserialize, Serialize};
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlPool, MySqlPoolOptions};
use sqlx::pool::PoolConnection;
use sqlx::{Connection, MySql};
use std::time::Duration;
use tracing::{debug, info};

/// 数据库配置
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// 完整连接串，设置后优先于下面的分项
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// 数据库名
    pub database: String,
    /// 建立连接的超时时间（秒）
    pub connect_timeout_secs: u64,
    /// 连接池上限
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            port: 3306,
            username: "root".to_string(),
            password: String::new(),
            database: "mriscan".to_string(),
            connect_timeout_secs: 10,
            max_connections: 4,
        }
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "***"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("database", &self.database)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl DatabaseConfig {
    /// 生成MySQL连接参数
    pub fn connect_options(&self) -> Result<MySqlConnectOptions> {
        if let Some(url) = &self.url {
            return url
                .parse::<MySqlConnectOptions>()
                .map_err(|e| MriError::Config(format!("无效的数据库连接串: {}", e)));
        }

        Ok(MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .password(&self.password)
            .database(&self.database))
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// 数据库连接池
///
/// 每个操作通过 [`DatabasePool::open`] 取得一个独占连接，连接在离开作用域时归还，
/// 任何返回路径（包括出错）都会归还。
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
    options: MySqlConnectOptions,
    connect_timeout: Duration,
}

impl DatabasePool {
    /// 创建连接池，不立即连接数据库；连接错误在第一次使用时出现
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self> {
        let options = config.connect_options()?;
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections.max(1))
            .acquire_timeout(config.connect_timeout())
            .connect_lazy_with(options.clone());

        if config.url.is_some() {
            info!("Database pool configured from url (***)");
        } else {
            info!(
                "Database pool configured for {}:{}/{}",
                config.host, config.port, config.database
            );
        }
        Ok(Self {
            pool,
            options,
            connect_timeout: config.connect_timeout(),
        })
    }

    /// 取得一个连接；失败时返回连接错误，调用方拿不到任何连接对象
    pub async fn open(&self) -> Result<PoolConnection<MySql>> {
        match self.pool.acquire().await {
            Ok(conn) => {
                debug!("Database connection acquired");
                Ok(conn)
            }
            // 连接池超时会掩盖真实原因（拒绝连接、DNS失败等），直连一次取驱动的错误信息
            Err(sqlx::Error::PoolTimedOut) => Err(self.connect_failure().await),
            Err(e) => Err(MriError::Connection(e.to_string())),
        }
    }

    async fn connect_failure(&self) -> MriError {
        let attempt = tokio::time::timeout(
            self.connect_timeout,
            MySqlConnection::connect_with(&self.options),
        )
        .await;

        match attempt {
            Ok(Err(e)) => MriError::Connection(e.to_string()),
            Ok(Ok(conn)) => {
                let _ = conn.close().await;
                MriError::Connection(sqlx::Error::PoolTimedOut.to_string())
            }
            Err(_) => MriError::Connection(format!(
                "连接超时 ({}秒)",
                self.connect_timeout.as_secs()
            )),
        }
    }

    /// 检查数据库是否可达
    pub async fn ping(&self) -> Result<()> {
        let mut conn = self.open().await?;
        conn.ping()
            .await
            .map_err(|e| MriError::Connection(e.to_string()))
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
