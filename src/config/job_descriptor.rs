// ==========================================
// 商品批量导入 - 任务描述
// ==========================================
// 来源: 任务元数据（文件类型、表头行、声明行数、列映射、选项）
// 格式: camelCase JSON
// ==========================================

use crate::config::column_mapping::{deserialize_lenient_usize, ColumnMappingDescriptor};
use crate::config::import_options::ImportOptions;
use crate::domain::types::FileType;
use crate::importer::error::{ImportError, ImportResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 已上传文件的描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDescriptor {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    pub file_type: FileType,
    /// 文件存储中的键（相对路径）
    pub storage_key: String,
    /// 数据起始行（裁剪前的行索引）
    #[serde(deserialize_with = "deserialize_lenient_usize")]
    pub header_row: usize,
    /// 声明的数据行数
    #[serde(deserialize_with = "deserialize_lenient_usize")]
    pub actual_row_count: usize,
    pub field_details: ColumnMappingDescriptor,
}

/// 一次导入任务
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportJob {
    pub job_id: String,
    pub file: FileDescriptor,
    #[serde(default)]
    pub options: ImportOptions,
}

impl ImportJob {
    pub fn from_json_str(json: &str) -> ImportResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> ImportResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ImportError::FileReadError(format!("{}: {}", path.display(), e))
        })?;
        Self::from_json_str(&content)
    }

    /// 产出文件名: products_job_<jobId>.json
    pub fn output_file_name(&self) -> String {
        format!("products_job_{}.json", self.job_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::ProductStatus;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const JOB_JSON: &str = r#"{
        "jobId": "job-42",
        "file": {
            "id": "file-7",
            "fileName": "catalog.csv",
            "fileType": "CSV",
            "storageKey": "uploads/catalog.csv",
            "headerRow": "0",
            "actualRowCount": 3,
            "fieldDetails": {"title": [{"index": 0}]}
        },
        "options": {"defaultStatus": "ACTIVE"}
    }"#;

    #[test]
    fn test_parse_job() {
        let job = ImportJob::from_json_str(JOB_JSON).unwrap();

        assert_eq!(job.job_id, "job-42");
        assert_eq!(job.file.file_type, FileType::Csv);
        assert_eq!(job.file.header_row, 0);
        assert_eq!(job.file.actual_row_count, 3);
        assert!(job.file.field_details.contains("title"));
        assert_eq!(job.options.default_status, ProductStatus::Active);
        assert_eq!(job.output_file_name(), "products_job_job-42.json");
    }

    #[test]
    fn test_from_path() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", JOB_JSON).unwrap();

        let job = ImportJob::from_path(temp_file.path()).unwrap();
        assert_eq!(job.file.id, "file-7");
    }

    #[test]
    fn test_unknown_file_type_rejected() {
        let json = JOB_JSON.replace("\"CSV\"", "\"PDF\"");
        assert!(matches!(
            ImportJob::from_json_str(&json),
            Err(ImportError::Serialization(_))
        ));
    }
}
