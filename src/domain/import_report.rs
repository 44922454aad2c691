// ==========================================
// 商品批量导入 - 导入结果
// ==========================================
// 用途: 编排层返回给调用方的汇总信息
// ==========================================

use crate::domain::product::ProductRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub job_id: String,
    pub file_id: String,
    pub total_products: usize,
    pub total_variants: usize,
    pub products_with_errors: usize,
    pub products_with_warnings: usize,
    pub elapsed_ms: u64,
    pub completed_at: DateTime<Utc>,
}

impl ImportSummary {
    pub fn from_products(
        job_id: impl Into<String>,
        file_id: impl Into<String>,
        products: &[ProductRecord],
        elapsed_ms: u64,
    ) -> Self {
        Self {
            job_id: job_id.into(),
            file_id: file_id.into(),
            total_products: products.len(),
            total_variants: products.iter().map(|p| p.variants.len()).sum(),
            products_with_errors: products.iter().filter(|p| p.has_errors()).count(),
            products_with_warnings: products.iter().filter(|p| p.has_warnings()).count(),
            elapsed_ms,
            completed_at: Utc::now(),
        }
    }

    /// 存在带错误的商品 → 部分完成
    pub fn is_partial(&self) -> bool {
        self.products_with_errors > 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub summary: ImportSummary,
    pub products: Vec<ProductRecord>,
}
