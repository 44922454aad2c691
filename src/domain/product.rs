// ==========================================
// 商品批量导入 - 商品领域模型
// ==========================================
// 职责: 商品 / 变体输出记录 + 行级诊断 + 构建器
// 序列化: camelCase JSON，对齐下游商品处理器的输入格式
// ==========================================
// 生命周期:
// - 非续行 → 创建 ProductBuilder
// - 本行及紧随的续行 → 原地追加变体、图片、诊断
// - 遇到下一个非续行或输入结束 → finish() 冻结为 ProductRecord
// ==========================================

use crate::domain::types::{
    InventoryPolicy, MetafieldValueType, ProductStatus, WeightUnit,
};
use serde::{Deserialize, Serialize};

/// 标题缺失时的占位标题
pub const INVALID_TITLE: &str = "Invalid Title";

/// 无选项值时的变体标题
pub const DEFAULT_VARIANT_TITLE: &str = "Default Title";

// ==========================================
// ProductRecord - 商品记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    pub published: bool,
    /// 选项名列表（按 option1/2/3 顺序）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option1_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option2_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option3_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo: Option<Seo>,
    pub status: ProductStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collections_to_join: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metafields: Option<Vec<Metafield>>,
    pub images: Vec<ImageRef>,
    pub variants: Vec<VariantRecord>,
    /// 已使用的变体标题（插入顺序，去重）
    pub variant_titles: Vec<String>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ProductRecord {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

// ==========================================
// VariantRecord - 变体记录
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantRecord {
    /// 变体标题（仅内存使用，输出经由 variantTitles 体现）
    #[serde(skip)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_unit: Option<WeightUnit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory_item: Option<InventoryItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory_quantities: Option<Vec<InventoryQuantity>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory_policy: Option<InventoryPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_at_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_shipping: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_src: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Seo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub src: String,
}

impl ImageRef {
    pub fn new(src: impl Into<String>) -> Self {
        Self { src: src.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metafield {
    pub key: String,
    pub value: String,
    pub namespace: String,
    pub value_type: MetafieldValueType,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryQuantity {
    pub available_quantity: i64,
    pub location_id: Option<String>,
}

// ==========================================
// RowDiagnostics - 行级错误 / 警告
// ==========================================
// 格式: "Row {n}: {message}"，不去重，按产生顺序累积
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowDiagnostics {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl RowDiagnostics {
    pub fn error(&mut self, row_number: usize, message: impl AsRef<str>) {
        self.errors.push(format_row_message(row_number, message.as_ref()));
    }

    pub fn warning(&mut self, row_number: usize, message: impl AsRef<str>) {
        self.warnings
            .push(format_row_message(row_number, message.as_ref()));
    }
}

pub fn format_row_message(row_number: usize, message: &str) -> String {
    format!("Row {}: {}", row_number, message)
}

// ==========================================
// ProductBuilder - 商品构建器
// ==========================================
// 只在所属行窗口内可变，窗口关闭后 finish() 产出不可变记录
#[derive(Debug, Clone)]
pub struct ProductBuilder {
    pub title: String,
    pub handle: Option<String>,
    pub description_html: Option<String>,
    pub vendor: Option<String>,
    pub product_type: Option<String>,
    pub tags: Option<Vec<String>>,
    pub published: bool,
    pub options: Option<Vec<String>>,
    pub option_names: [Option<String>; 3],
    pub seo: Option<Seo>,
    pub status: ProductStatus,
    pub collections_to_join: Option<Vec<String>>,
    pub metafields: Vec<Metafield>,
    pub images: Vec<ImageRef>,
    pub variants: Vec<VariantRecord>,
    pub variant_titles: Vec<String>,
    pub diagnostics: RowDiagnostics,
}

impl ProductBuilder {
    /// 以定义行开始一个新商品；标题缺失时使用占位标题并记录错误
    pub fn start(title: Option<String>, handle: Option<String>, row_number: usize) -> Self {
        let mut diagnostics = RowDiagnostics::default();
        let title = match title {
            Some(title) => title,
            None => {
                diagnostics.error(row_number, "Product Title is empty");
                INVALID_TITLE.to_string()
            }
        };

        Self {
            title,
            handle,
            description_html: None,
            vendor: None,
            product_type: None,
            tags: None,
            published: false,
            options: None,
            option_names: [None, None, None],
            seo: None,
            status: ProductStatus::default(),
            collections_to_join: None,
            metafields: Vec::new(),
            images: Vec::new(),
            variants: Vec::new(),
            variant_titles: Vec::new(),
            diagnostics,
        }
    }

    /// option 序号从 0 开始（0 → option1）
    pub fn option_name(&self, slot: usize) -> Option<&str> {
        self.option_names.get(slot).and_then(|n| n.as_deref())
    }

    pub fn set_option_name(&mut self, slot: usize, name: String) {
        self.options.get_or_insert_with(Vec::new).push(name.clone());
        if let Some(entry) = self.option_names.get_mut(slot) {
            *entry = Some(name);
        }
    }

    /// 登记变体标题；重复时返回 false（标题列表保持去重）
    pub fn register_variant_title(&mut self, title: &str) -> bool {
        if self.variant_titles.iter().any(|t| t == title) {
            return false;
        }
        self.variant_titles.push(title.to_string());
        true
    }

    pub fn push_variant(&mut self, variant: VariantRecord) {
        self.variants.push(variant);
    }

    pub fn error(&mut self, row_number: usize, message: impl AsRef<str>) {
        self.diagnostics.error(row_number, message);
    }

    pub fn warning(&mut self, row_number: usize, message: impl AsRef<str>) {
        self.diagnostics.warning(row_number, message);
    }

    pub fn finish(self) -> ProductRecord {
        let [option1_name, option2_name, option3_name] = self.option_names;
        ProductRecord {
            title: self.title,
            handle: self.handle,
            description_html: self.description_html,
            vendor: self.vendor,
            product_type: self.product_type,
            tags: self.tags,
            published: self.published,
            options: self.options,
            option1_name,
            option2_name,
            option3_name,
            seo: self.seo,
            status: self.status,
            collections_to_join: self.collections_to_join,
            metafields: if self.metafields.is_empty() {
                None
            } else {
                Some(self.metafields)
            },
            images: self.images,
            variants: self.variants,
            variant_titles: self.variant_titles,
            errors: self.diagnostics.errors,
            warnings: self.diagnostics.warnings,
        }
    }
}

// ==========================================
// VariantBuilder - 变体构建器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct VariantBuilder {
    variant: VariantRecord,
}

impl VariantBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 只要映射了任一 optionNValue，变体就带 options 数组（可能为空）
    pub fn enable_options(&mut self) {
        self.variant.options.get_or_insert_with(Vec::new);
    }

    pub fn push_option_value(&mut self, value: String) {
        self.variant.options.get_or_insert_with(Vec::new).push(value);
    }

    /// 由选项值拼出标题: 非空值之间以 '/' 分隔，无值时为 "Default Title"
    pub fn compute_title(&self) -> String {
        match self.variant.options.as_deref() {
            Some(values) if !values.is_empty() => values.join("/"),
            _ => DEFAULT_VARIANT_TITLE.to_string(),
        }
    }

    pub fn record(&mut self) -> &mut VariantRecord {
        &mut self.variant
    }

    pub fn inventory_item(&mut self) -> &mut InventoryItem {
        self.variant
            .inventory_item
            .get_or_insert_with(InventoryItem::default)
    }

    pub fn build(mut self, title: String) -> VariantRecord {
        self.variant.title = title;
        self.variant
    }
}
