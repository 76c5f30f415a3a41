//! 配置管理
//!
//! 配置来源按优先级从低到高：内置默认值 → TOML配置文件 → `MRISCAN_` 前缀的环境变量
//! （层级之间用 `__` 分隔，例如 `MRISCAN_DATABASE__PASSWORD`）。

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use mriscan_database::DatabaseConfig;
use serde::{Deserialize, Serialize};

/// 未指定 `--config` 时尝试读取的配置文件
pub const DEFAULT_CONFIG_FILE: &str = "mriscan.toml";

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 数据库配置
    pub database: DatabaseConfig,
    /// 日志配置
    pub logging: LoggingConfig,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别或过滤表达式，例如 `info`、`mriscan_database=debug`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// 加载配置；显式指定的配置文件必须存在
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let file = match config_path {
            Some(path) => File::with_name(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = Config::builder()
            .add_source(file)
            .add_source(environment())
            .build()
            .context("Failed to load configuration")?;

        settings
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// 从TOML文本解析配置
    pub fn from_toml(content: &str) -> Result<Self> {
        Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()
            .context("Failed to parse configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

/// `MRISCAN_` 前缀的环境变量来源
fn environment() -> Environment {
    Environment::with_prefix("MRISCAN")
        .prefix_separator("_")
        .separator("__")
}
