//! MRI扫描记录管理主程序

mod cli;
mod config;
mod render;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, PatientAction, ScanAction, ScanArgs, UserAction};
use config::AppConfig;
use mriscan_core::{select_dicom_file, Listing, MriError, RecordService, Submission};
use mriscan_database::{DatabasePool, DatabaseQueries};
use render::{render_json, render_table, report, TableRow};
use serde::Serialize;
use std::io::{BufRead, IsTerminal, Write};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Cli::parse();

    let app_config = AppConfig::load(args.config.as_deref())?;

    // 初始化日志，命令行参数优先于配置文件
    let log_level = args
        .log_level
        .clone()
        .unwrap_or_else(|| app_config.logging.level.clone());
    tracing_subscriber::fmt()
        .with_env_filter(&log_level)
        .with_writer(std::io::stderr)
        .init();

    info!(
        "配置已加载: {}",
        args.config.as_deref().unwrap_or(config::DEFAULT_CONFIG_FILE)
    );
    info!("数据库配置: {:?}", app_config.database);

    let pool = DatabasePool::connect_lazy(&app_config.database)?;
    let queries = Arc::new(DatabaseQueries::new(pool.clone()));
    let service = RecordService::new(queries);

    let code = run(&service, &pool, args.command, args.json).await?;
    pool.close().await;
    Ok(code)
}

async fn run(
    service: &RecordService,
    pool: &DatabasePool,
    command: Command,
    json: bool,
) -> Result<ExitCode> {
    match command {
        Command::Patient { action } => match action {
            PatientAction::Add(patient_args) => {
                let outcome = service.add_patient(patient_args.into()).await;
                submitted(outcome, "Patient added successfully!", json).map(exit_code)
            }
            PatientAction::List => show(service.load_patients().await, json).map(exit_code),
        },
        Command::Scan { action } => match action {
            ScanAction::Add(scan_args) => {
                let form = match scan_form(scan_args) {
                    Ok(form) => form,
                    Err(e) => {
                        report(&e);
                        return Ok(ExitCode::FAILURE);
                    }
                };
                let outcome = service.add_scan(form).await;
                submitted(outcome, "MRI scan record added successfully!", json).map(exit_code)
            }
            ScanAction::List => show(service.load_scans().await, json).map(exit_code),
        },
        Command::User { action } => match action {
            UserAction::Add(user_args) => {
                let form = match user_args.into_form(read_password) {
                    Ok(form) => form,
                    Err(e) => {
                        report(&MriError::Io(e));
                        return Ok(ExitCode::FAILURE);
                    }
                };
                let outcome = service.add_user(form).await;
                submitted(outcome, "User added successfully!", json).map(exit_code)
            }
            UserAction::List => show(service.load_users().await, json).map(exit_code),
        },
        Command::Check => match pool.ping().await {
            Ok(()) => {
                println!("Database connection OK");
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                report(&e);
                Ok(ExitCode::FAILURE)
            }
        },
    }
}

/// 选择DICOM文件并生成扫描表单
fn scan_form(scan_args: ScanArgs) -> std::result::Result<mriscan_core::ScanForm, MriError> {
    let dicom_file_path = match &scan_args.dicom_file {
        Some(path) => select_dicom_file(path, scan_args.file_filter())?,
        None => String::new(),
    };
    Ok(scan_args.into_form(dicom_file_path))
}

/// 从标准输入读取一行密码
fn read_password() -> std::io::Result<String> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        eprint!("Password: ");
        std::io::stderr().flush()?;
    }

    let mut line = String::new();
    if stdin.lock().read_line(&mut line)? == 0 {
        return Err(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "未提供密码",
        ));
    }
    Ok(line)
}

fn exit_code(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// 输出添加结果；插入已提交即视为成功，刷新失败只提示不影响结果
fn submitted<E>(
    outcome: mriscan_core::Result<Submission<E>>,
    message: &str,
    json: bool,
) -> Result<bool>
where
    E: TableRow + Serialize,
{
    match outcome {
        Ok(submission) => {
            println!("{}", message);
            show(submission.listing, json)?;
            Ok(true)
        }
        Err(e) => {
            report(&e);
            Ok(false)
        }
    }
}

/// 输出列表，返回列表是否加载成功
fn show<E>(listing: Listing<E>, json: bool) -> Result<bool>
where
    E: TableRow + Serialize,
{
    if let Some(e) = &listing.failure {
        error!("列表加载失败: {}", e);
        report(e);
    }

    if json {
        println!("{}", render_json(&listing.rows)?);
    } else {
        println!("{}", render_table(&listing.rows));
    }

    Ok(listing.is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mriscan_core::User;

    #[test]
    fn test_committed_insert_succeeds_despite_refresh_failure() {
        let outcome = Ok(Submission {
            id: 7,
            listing: Listing::<User> {
                rows: Vec::new(),
                failure: Some(MriError::Connection("Lost connection".into())),
            },
        });
        assert!(submitted(outcome, "User added successfully!", false).unwrap());
    }

    #[test]
    fn test_rejected_insert_fails() {
        let outcome: mriscan_core::Result<Submission<User>> =
            Err(MriError::InvalidInput("用户名和密码不能为空".into()));
        assert!(!submitted(outcome, "User added successfully!", false).unwrap());
    }

    #[test]
    fn test_failed_listing_is_reported_as_failure() {
        let listing = Listing::<User> {
            rows: Vec::new(),
            failure: Some(MriError::Connection("refused".into())),
        };
        assert!(!show(listing, true).unwrap());
    }
}
