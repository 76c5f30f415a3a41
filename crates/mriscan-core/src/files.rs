//! DICOM文件选择
//!
//! 只负责把用户选择的路径规范成绝对路径字符串，文件本身从不打开，也不检查是否存在。

use crate::error::{MriError, Result};
use std::path::Path;

/// DICOM文件扩展名
pub const DICOM_EXTENSION: &str = "dcm";

/// 文件类型过滤
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileFilter {
    /// 仅DICOM文件 (*.dcm)
    #[default]
    Dicom,
    /// 所有文件 (*.*)
    AnyFile,
}

impl FileFilter {
    pub fn accepts(&self, path: &Path) -> bool {
        match self {
            FileFilter::Dicom => path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case(DICOM_EXTENSION))
                .unwrap_or(false),
            FileFilter::AnyFile => true,
        }
    }
}

/// 选择DICOM文件，返回绝对路径
pub fn select_dicom_file(path: &Path, filter: FileFilter) -> Result<String> {
    if path.as_os_str().is_empty() {
        return Err(MriError::InvalidInput("未选择文件".to_string()));
    }

    if !filter.accepts(path) {
        return Err(MriError::InvalidInput(format!(
            "不是DICOM文件 (*.{}): {}",
            DICOM_EXTENSION,
            path.display()
        )));
    }

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    Ok(absolute.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dicom_filter() {
        assert!(FileFilter::Dicom.accepts(Path::new("/scans/brain.dcm")));
        assert!(FileFilter::Dicom.accepts(Path::new("BRAIN.DCM")));
        assert!(!FileFilter::Dicom.accepts(Path::new("/scans/report.pdf")));
        assert!(!FileFilter::Dicom.accepts(Path::new("/scans/noext")));
        assert!(FileFilter::AnyFile.accepts(Path::new("/scans/report.pdf")));
    }

    #[test]
    fn test_select_relative_path_becomes_absolute() {
        let selected = select_dicom_file(Path::new("scans/brain.dcm"), FileFilter::Dicom).unwrap();
        assert!(Path::new(&selected).is_absolute());
        assert!(selected.ends_with("brain.dcm"));
    }

    #[test]
    fn test_select_does_not_require_existing_file() {
        let selected =
            select_dicom_file(Path::new("/no/such/dir/image.dcm"), FileFilter::Dicom).unwrap();
        assert_eq!(selected, "/no/such/dir/image.dcm");
    }

    #[test]
    fn test_select_rejects_filtered_out_file() {
        let err = select_dicom_file(Path::new("/tmp/notes.txt"), FileFilter::Dicom).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(select_dicom_file(Path::new("/tmp/notes.txt"), FileFilter::AnyFile).is_ok());
        assert!(select_dicom_file(Path::new(""), FileFilter::AnyFile).is_err());
    }
}
