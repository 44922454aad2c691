// ==========================================
// 商品批量导入 - 核心库
// ==========================================
// 输入: 上传文件字节 + 文件类型 + 表头行 + 声明行数 + 列映射 + 选项
// 输出: 按首次出现顺序排列的商品记录（含变体、行级错误 / 警告）
// 定位: 纯计算核心，任务状态持久化由外部编排层负责
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 表格模型与商品记录
pub mod domain;

// 配置层 - 列映射与导入选项
pub mod config;

// 导入层 - 加载、定位、分组、提取
pub mod importer;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{FileType, InventoryPolicy, ProductStatus, WeightUnit};

// 领域实体
pub use domain::{Cell, ImportOutcome, ImportSummary, ProductRecord, TableRow, VariantRecord};

// 配置
pub use config::{ColumnMapping, ColumnMappingDescriptor, ImportJob, ImportOptions, RawColumnBinding};

// 导入器
pub use importer::{
    generate, ImportError, ImportResult, LocalFileSource, ProductImporter, ProductImporterImpl,
};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
