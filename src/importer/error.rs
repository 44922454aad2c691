// ==========================================
// 商品批量导入 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 这里只包含致命错误；单元格级问题记录在商品的 errors/warnings 上
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 配置错误 =====
    #[error("配置错误: {0}")]
    Configuration(String),

    // ===== 文件相关错误 =====
    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    // ===== 结构校验错误 =====
    #[error("Invalid file. could not find values start position (header_row = {header_row})")]
    Alignment { header_row: usize },

    #[error("Invalid file. 数据行数 {actual} 与声明的行数 {expected} 不一致")]
    RowCountMismatch { expected: usize, actual: usize },

    // ===== 序列化错误 =====
    #[error("JSON 处理失败: {0}")]
    Serialization(String),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ImportError {
    /// 字节内容无法按声明类型解析
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            ImportError::CsvParseError(_) | ImportError::ExcelParseError(_)
        )
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

// 实现 From<serde_json::Error>
impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::Serialization(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_message() {
        let err = ImportError::Alignment { header_row: 9 };
        assert!(err.to_string().contains("could not find values start position"));
        assert!(!err.is_load_error());
    }

    #[test]
    fn test_load_error_grouping() {
        assert!(ImportError::CsvParseError("x".to_string()).is_load_error());
        assert!(ImportError::ExcelParseError("x".to_string()).is_load_error());
        assert!(!ImportError::Configuration("x".to_string()).is_load_error());
    }
}
