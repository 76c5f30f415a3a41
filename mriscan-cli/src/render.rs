//! 列表输出

use mriscan_core::{MriError, MriScan, Patient, User};
use serde::Serialize;

/// 可按表格输出的记录
pub trait TableRow {
    const HEADINGS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

impl TableRow for Patient {
    const HEADINGS: &'static [&'static str] = &["Id", "Name", "Dob", "Contact", "Medical_history"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.dob.clone(),
            self.contact.clone(),
            self.medical_history.clone(),
        ]
    }
}

impl TableRow for MriScan {
    const HEADINGS: &'static [&'static str] = &[
        "Id",
        "Patient_id",
        "Scan_date",
        "Scan_type",
        "Notes",
        "Dicom_file_path",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.patient_id.to_string(),
            self.scan_date.clone(),
            self.scan_type.clone(),
            self.notes.clone(),
            self.dicom_file_path.clone(),
        ]
    }
}

impl TableRow for User {
    const HEADINGS: &'static [&'static str] = &["Id", "Username", "Role"];

    fn cells(&self) -> Vec<String> {
        vec![self.id.to_string(), self.username.clone(), self.role.clone()]
    }
}

/// 生成对齐的文本表格，空列表只输出表头
pub fn render_table<T: TableRow>(rows: &[T]) -> String {
    let cells: Vec<Vec<String>> = rows.iter().map(T::cells).collect();

    let mut widths: Vec<usize> = T::HEADINGS.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |values: Vec<&str>| -> String {
        values
            .iter()
            .zip(&widths)
            .map(|(value, width)| format!("{:<width$}", value, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![format_line(T::HEADINGS.to_vec())];
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in &cells {
        lines.push(format_line(row.iter().map(String::as_str).collect()));
    }

    lines.join("\n")
}

/// 以JSON输出列表
pub fn render_json<T: Serialize>(rows: &[T]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(rows)
}

/// 错误提示，对应原来的错误对话框
pub fn report(err: &MriError) {
    eprintln!("{}: {}", err.title(), err);
}
