// ==========================================
// 商品批量导入 - 导入层
// ==========================================
// 职责: 上传文件 → 商品记录（含变体、行级错误 / 警告）
// 支持: CSV, Excel
// ==========================================
// 阶段 0: 表格加载（file_parser）
// 阶段 1: 起始行定位 + 行数校验（alignment）
// 阶段 2: 行分组 + 字段提取（product_generator / field_mapper）
// ==========================================

// 模块声明
pub mod alignment;
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod product_generator;
pub mod product_importer_impl;
pub mod product_importer_trait;

// 重导出核心类型
pub use alignment::{align, locate_start_position};
pub use data_cleaner::{Coerced, DataCleaner};
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_parser::{CsvParser, ExcelParser, TableLoader};
pub use product_generator::ProductGenerator;
pub use product_importer_impl::{generate, LocalFileSource, ProductImporterImpl};

// 重导出 Trait 接口
pub use product_importer_trait::{FileParser, FileSource, ProductImporter};
