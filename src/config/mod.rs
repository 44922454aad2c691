// ==========================================
// 商品批量导入 - 配置层
// ==========================================
// 职责: 列映射描述与解析、导入选项、任务描述
// 存储: 由外部任务元数据提供（JSON）
// ==========================================

pub mod column_mapping;
pub mod import_options;
pub mod job_descriptor;

// 重导出核心配置类型
pub use column_mapping::{
    attribute_keys, ColumnMapping, ColumnMappingDescriptor, MetafieldColumn, OptionValueColumn,
    QuantityColumn, RawColumnBinding, WeightColumn,
};
pub use import_options::ImportOptions;
pub use job_descriptor::{FileDescriptor, ImportJob};
