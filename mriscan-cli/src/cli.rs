//! 命令行参数
//!
//! 每个子命令组对应原来的一个录入页签：`add` 相当于表单的“添加”按钮，`list` 相当于“加载”按钮。

use clap::{Args, Parser, Subcommand};
use mriscan_core::{FileFilter, PatientForm, ScanForm, UserForm};
use std::io;
use std::path::PathBuf;

/// MRI扫描记录管理命令行参数
#[derive(Parser, Debug)]
#[command(name = "mriscan")]
#[command(about = "MRI扫描记录管理：患者、MRI扫描和用户的录入与查询")]
pub struct Cli {
    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<String>,

    /// 日志级别，覆盖配置文件中的设置
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// 以JSON输出列表
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 患者管理
    Patient {
        #[command(subcommand)]
        action: PatientAction,
    },
    /// MRI扫描管理
    Scan {
        #[command(subcommand)]
        action: ScanAction,
    },
    /// 用户管理
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// 检查数据库连接
    Check,
}

#[derive(Subcommand, Debug)]
pub enum PatientAction {
    /// 添加患者
    Add(PatientArgs),
    /// 列出全部患者
    List,
}

#[derive(Subcommand, Debug)]
pub enum ScanAction {
    /// 添加MRI扫描记录
    Add(ScanArgs),
    /// 列出全部MRI扫描
    List,
}

#[derive(Subcommand, Debug)]
pub enum UserAction {
    /// 添加用户
    Add(UserArgs),
    /// 列出全部用户
    List,
}

#[derive(Args, Debug)]
pub struct PatientArgs {
    #[arg(long, default_value = "")]
    pub name: String,
    /// 出生日期 (YYYY-MM-DD)
    #[arg(long, default_value = "")]
    pub dob: String,
    #[arg(long, default_value = "")]
    pub contact: String,
    #[arg(long, default_value = "")]
    pub medical_history: String,
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    #[arg(long, default_value = "")]
    pub patient_id: String,
    /// 扫描日期 (YYYY-MM-DD)
    #[arg(long, default_value = "")]
    pub scan_date: String,
    #[arg(long, default_value = "")]
    pub scan_type: String,
    #[arg(long, default_value = "")]
    pub notes: String,
    /// DICOM文件 (*.dcm)
    #[arg(long)]
    pub dicom_file: Option<PathBuf>,
    /// 允许选择任意类型的文件
    #[arg(long, requires = "dicom_file")]
    pub any_file: bool,
}

#[derive(Args, Debug)]
pub struct UserArgs {
    #[arg(long, default_value = "")]
    pub username: String,
    /// 密码；未指定时读取 `MRISCAN_PASSWORD`，再没有则从标准输入读取一行
    #[arg(long, env = "MRISCAN_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
    #[arg(long, default_value = "")]
    pub role: String,
}

// 表单字段读取时去掉首尾空白

impl From<PatientArgs> for PatientForm {
    fn from(args: PatientArgs) -> Self {
        PatientForm {
            name: args.name.trim().to_string(),
            dob: args.dob.trim().to_string(),
            contact: args.contact.trim().to_string(),
            medical_history: args.medical_history.trim().to_string(),
        }
    }
}

impl ScanArgs {
    pub fn file_filter(&self) -> FileFilter {
        if self.any_file {
            FileFilter::AnyFile
        } else {
            FileFilter::Dicom
        }
    }

    /// 生成扫描表单，`dicom_file_path` 为已选择文件的绝对路径
    pub fn into_form(self, dicom_file_path: String) -> ScanForm {
        ScanForm {
            patient_id: self.patient_id.trim().to_string(),
            scan_date: self.scan_date.trim().to_string(),
            scan_type: self.scan_type.trim().to_string(),
            notes: self.notes.trim().to_string(),
            dicom_file_path: dicom_file_path.trim().to_string(),
        }
    }
}

impl UserArgs {
    /// 生成用户表单，命令行和环境变量都没有给出密码时调用 `read_password`
    pub fn into_form<F>(self, read_password: F) -> io::Result<UserForm>
    where
        F: FnOnce() -> io::Result<String>,
    {
        let password = match self.password {
            Some(password) => password,
            None => read_password()?,
        };

        Ok(UserForm {
            username: self.username.trim().to_string(),
            password: password.trim().to_string(),
            role: self.role.trim().to_string(),
        })
    }
}
