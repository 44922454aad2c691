// ==========================================
// 商品批量导入 - 字段提取器实现
// ==========================================
// 职责: 按解析后的列映射从一行中提取商品 / 变体属性
// 规则: 未映射的属性不尝试；坏数据只记录 errors / warnings，从不中断
// - 结构性问题（选项名缺失、变体标题重复）→ error
// - 类型转换失败 → warning，使用默认值或省略该属性
// ==========================================

use crate::config::{ColumnMapping, ImportOptions};
use crate::domain::product::{ImageRef, InventoryQuantity, Metafield, ProductBuilder, Seo, VariantBuilder};
use crate::domain::table::TableRow;
use crate::domain::types::MetafieldValueType;
use crate::importer::data_cleaner::{Coerced, DataCleaner};
use tracing::warn;

const DESCRIPTION_SEPARATOR: &str = "<br>";

const BOOLEAN_HINT: &str =
    "Valid values are: [TRUE, YES, Y] for True, and [FALSE, NO, N] for False.";

pub struct FieldMapper<'a> {
    mapping: &'a ColumnMapping,
    options: &'a ImportOptions,
    cleaner: DataCleaner,
}

impl<'a> FieldMapper<'a> {
    pub fn new(mapping: &'a ColumnMapping, options: &'a ImportOptions) -> Self {
        Self {
            mapping,
            options,
            cleaner: DataCleaner,
        }
    }

    // ==========================================
    // 分组键
    // ==========================================

    /// 标题单元格（无效时为 None）
    pub fn title(&self, row: &TableRow) -> Option<String> {
        self.cleaner.text(row.cell(self.mapping.title))
    }

    /// handle 单元格（未映射或无效时为 None）
    pub fn handle(&self, row: &TableRow) -> Option<String> {
        self.text_at(row, self.mapping.handle)
    }

    fn text_at(&self, row: &TableRow, index: Option<usize>) -> Option<String> {
        index.and_then(|idx| self.cleaner.text(row.cell(idx)))
    }

    fn list_at(&self, row: &TableRow, index: Option<usize>) -> Option<Vec<String>> {
        self.text_at(row, index)
            .map(|value| self.cleaner.split_list(&value))
    }

    // ==========================================
    // 商品级属性（仅在定义行上提取）
    // ==========================================
    pub fn extract_product_details(&self, row: &TableRow, product: &mut ProductBuilder) {
        let row_number = row.row_number();
        let mapping = self.mapping;

        // descriptionHtml: 多列拼接，非末段之后追加分隔符
        if !mapping.description_html.is_empty() {
            let last = mapping.description_html.len() - 1;
            let mut html = String::new();
            for (pos, &index) in mapping.description_html.iter().enumerate() {
                if let Some(segment) = self.cleaner.text(row.cell(index)) {
                    html.push_str(&segment);
                }
                if pos < last {
                    html.push_str(DESCRIPTION_SEPARATOR);
                }
            }
            if !html.is_empty() {
                product.description_html = Some(html);
            }
        }

        product.vendor = self.text_at(row, mapping.vendor);
        product.product_type = self.text_at(row, mapping.product_type);

        // tags + 追加标签
        product.tags = self.list_at(row, mapping.tags);
        if !self.options.added_tags.is_empty() {
            product
                .tags
                .get_or_insert_with(Vec::new)
                .extend(self.options.added_tags.iter().cloned());
        }

        // published
        let default_published = self.options.default_published_status;
        product.published = match mapping.published.map(|idx| self.cleaner.parse_bool(row.cell(idx))) {
            Some(Coerced::Valid(published)) => published,
            Some(Coerced::Invalid) => {
                product.warning(
                    row_number,
                    format!(
                        "Invalid published Value. {} Replacing with default published value.",
                        BOOLEAN_HINT
                    ),
                );
                default_published
            }
            Some(Coerced::Absent) | None => default_published,
        };

        // option1/2/3 Name
        if mapping.has_option_columns() {
            product.options = Some(Vec::new());
        }
        for slot in 0..3 {
            let value_column = mapping.option_values[slot].as_ref();
            match mapping.option_names[slot] {
                Some(index) => match self.cleaner.text(row.cell(index)) {
                    Some(name) => product.set_option_name(slot, name),
                    None if value_column.is_some() => product.error(
                        row_number,
                        format!(
                            "Value for option{} Name is invalid. Please ensure value is not empty.",
                            slot + 1
                        ),
                    ),
                    None => {}
                },
                // 未映射选项名时使用选项值列上配置的默认名
                None => {
                    if let Some(name) = value_column.and_then(|c| c.default_option_name.clone()) {
                        product.set_option_name(slot, name);
                    }
                }
            }
        }

        // seo
        if mapping.seo_title.is_some() || mapping.seo_description.is_some() {
            product.seo = Some(Seo {
                title: self.text_at(row, mapping.seo_title),
                description: self.text_at(row, mapping.seo_description),
            });
        }

        // status
        let default_status = self.options.default_status;
        product.status = match mapping.status.map(|idx| self.cleaner.parse_status(row.cell(idx))) {
            Some(Coerced::Valid(status)) => status,
            Some(Coerced::Invalid) => {
                product.warning(
                    row_number,
                    "Invalid status Value. Valid values are: ACTIVE, DRAFT, ARCHIVED. Replacing with default status value.",
                );
                default_status
            }
            Some(Coerced::Absent) | None => default_status,
        };

        product.collections_to_join = self.list_at(row, mapping.custom_collections);

        // metafields: 名称缺失只记日志，不算商品警告
        for column in &mapping.metafields {
            let Some(value) = self.cleaner.text(row.cell(column.index)) else {
                continue;
            };
            let key = column.key.clone().unwrap_or_default();
            if key.trim().is_empty() {
                warn!(row = row_number, column = column.index, "元字段缺少名称");
            }
            product.metafields.push(Metafield {
                key,
                value,
                namespace: column.namespace.clone(),
                value_type: MetafieldValueType::String,
            });
        }
    }

    // ==========================================
    // 变体级属性（每一行都提取一个变体）
    // ==========================================
    pub fn extract_variant(&self, row: &TableRow, product: &mut ProductBuilder) {
        let row_number = row.row_number();
        let mapping = self.mapping;
        let mut variant = VariantBuilder::new();

        // 选项值 → 变体标题
        if mapping.has_option_values() {
            variant.enable_options();
        }
        for (slot, column) in mapping.option_values.iter().enumerate() {
            let Some(column) = column else {
                continue;
            };
            if product.option_name(slot).is_some() {
                if let Some(value) = self.cleaner.text(row.cell(column.index)) {
                    variant.push_option_value(value);
                }
            } else {
                product.error(
                    row_number,
                    format!(
                        "There is no Option{n} Name associated with the Option{n} value.",
                        n = slot + 1
                    ),
                );
            }
        }

        let title = variant.compute_title();
        if !product.register_variant_title(&title) {
            product.error(row_number, format!("Variant title {}, already exist", title));
        }

        variant.record().sku = self.text_at(row, mapping.variant_sku);

        // weight + unit
        if let Some(column) = &mapping.variant_weight {
            match self.cleaner.parse_float(row.cell(column.index)) {
                Coerced::Valid(weight) => {
                    if column.unit.is_none() {
                        warn!(row = row_number, "重量列未配置单位");
                    }
                    let record = variant.record();
                    record.weight = Some(weight);
                    record.weight_unit = column.unit;
                }
                Coerced::Invalid => product.warning(
                    row_number,
                    "Invalid variant weight value. Value should be a number.",
                ),
                Coerced::Absent => {}
            }
        }

        // inventoryItem: tracked + cost
        if mapping.has_inventory_item() {
            variant.inventory_item();
        }
        if let Some(index) = mapping.variant_tracked {
            match self.cleaner.parse_bool(row.cell(index)) {
                Coerced::Valid(tracked) => variant.inventory_item().tracked = Some(tracked),
                Coerced::Invalid => product.warning(
                    row_number,
                    format!("Invalid variant tracked Value. {}", BOOLEAN_HINT),
                ),
                Coerced::Absent => {}
            }
        }
        if let Some(index) = mapping.variant_cost {
            match self.cleaner.parse_float(row.cell(index)) {
                Coerced::Valid(cost) => variant.inventory_item().cost = Some(cost),
                Coerced::Invalid => product.warning(
                    row_number,
                    "Invalid variant cost Value. Value should be a number.",
                ),
                Coerced::Absent => {}
            }
        }

        // inventoryQuantities: 每个数量列使用自己绑定的 location，
        // 不统一取第一个绑定的 location
        let mut quantities = Vec::new();
        for column in &mapping.variant_quantity {
            match self.cleaner.parse_int(row.cell(column.index)) {
                Coerced::Valid(available_quantity) => {
                    let location_id = column
                        .location_id
                        .clone()
                        .filter(|loc| !loc.is_empty());
                    if location_id.is_none() {
                        warn!(row = row_number, column = column.index, "库存数量列缺少 location");
                    }
                    quantities.push(InventoryQuantity {
                        available_quantity,
                        location_id,
                    });
                }
                Coerced::Invalid => product.warning(
                    row_number,
                    "Invalid variant quantity Value. Value should be a whole number.",
                ),
                Coerced::Absent => {}
            }
        }
        if !quantities.is_empty() {
            variant.record().inventory_quantities = Some(quantities);
        }

        if let Some(index) = mapping.variant_inventory_policy {
            match self.cleaner.parse_inventory_policy(row.cell(index)) {
                Coerced::Valid(policy) => variant.record().inventory_policy = Some(policy),
                Coerced::Invalid => product.warning(
                    row_number,
                    "Invalid variant policy Value. Valid values are CONTINUE, DENY.",
                ),
                Coerced::Absent => {}
            }
        }

        if let Some(index) = mapping.variant_price {
            match self.cleaner.parse_float(row.cell(index)) {
                Coerced::Valid(price) => variant.record().price = Some(price),
                Coerced::Invalid => product.warning(
                    row_number,
                    "Invalid variant price Value. Value should be a number.",
                ),
                Coerced::Absent => {}
            }
        }

        if let Some(index) = mapping.variant_compare_at_price {
            match self.cleaner.parse_float(row.cell(index)) {
                Coerced::Valid(price) => variant.record().compare_at_price = Some(price),
                Coerced::Invalid => product.warning(
                    row_number,
                    "Invalid variant compare at price Value. Value should be a number.",
                ),
                Coerced::Absent => {}
            }
        }

        let requires_shipping = match mapping.variant_require_shipping {
            Some(index) => self.cleaner.parse_bool(row.cell(index)),
            None => Coerced::Absent,
        };
        match requires_shipping {
            Coerced::Valid(value) => variant.record().requires_shipping = Some(value),
            Coerced::Invalid => product.warning(
                row_number,
                format!("Invalid require shipping Value. {}", BOOLEAN_HINT),
            ),
            Coerced::Absent => {}
        }

        // 注意: 此处判断的是 requiresShipping 的转换结果而不是 taxable 自身，
        // 警告条件保留，修正前需业务确认
        // requiresShipping 有效而 taxable 非法时: 不写入非布尔标记，省略 taxable 并记日志
        if let Some(index) = mapping.variant_taxable {
            let taxable = self.cleaner.parse_bool(row.cell(index));
            if !taxable.is_absent() {
                if requires_shipping.is_valid() {
                    match taxable {
                        Coerced::Valid(value) => variant.record().taxable = Some(value),
                        _ => warn!(row = row_number, "taxable 值无法识别，已忽略"),
                    }
                } else {
                    product.warning(
                        row_number,
                        format!("Invalid variant taxable Value. {}", BOOLEAN_HINT),
                    );
                }
            }
        }

        variant.record().barcode = self.text_at(row, mapping.variant_barcode);
        variant.record().tax_code = self.text_at(row, mapping.variant_taxcode);

        // 图片: 多图列进入商品图片列表，变体图片同时挂在变体上
        for &index in &mapping.image_src {
            if let Some(sources) = self.cleaner.text(row.cell(index)) {
                product.images.extend(
                    self.cleaner
                        .split_list(&sources)
                        .into_iter()
                        .map(ImageRef::new),
                );
            }
        }
        if let Some(image) = self.text_at(row, mapping.variant_image) {
            product.images.push(ImageRef::new(image.clone()));
            variant.record().image_src = Some(image);
        }

        product.push_variant(variant.build(title));
    }
}
