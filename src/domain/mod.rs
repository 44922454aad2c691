// ==========================================
// 商品批量导入 - 领域模型层
// ==========================================
// 职责: 定义表格模型、商品/变体记录、枚举类型
// 红线: 不含文件解析逻辑,不含分组逻辑
// ==========================================

pub mod import_report;
pub mod product;
pub mod table;
pub mod types;

// 重导出核心类型
pub use import_report::{ImportOutcome, ImportSummary};
pub use product::{
    ImageRef, InventoryItem, InventoryQuantity, Metafield, ProductBuilder, ProductRecord,
    RowDiagnostics, Seo, VariantBuilder, VariantRecord, DEFAULT_VARIANT_TITLE, INVALID_TITLE,
};
pub use table::{Cell, TableRow};
pub use types::{FileType, InventoryPolicy, MetafieldValueType, ProductStatus, WeightUnit};
