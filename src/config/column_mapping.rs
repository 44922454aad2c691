// ==========================================
// 商品批量导入 - 列映射
// ==========================================
// 输入: 映射界面产出的描述 { 属性名: [ { index, 附加元数据 } ] }
// 输出: 强类型 ColumnMapping（每次运行只解析一次）
// 规则: 属性名存在 ⇔ 每行都尝试提取该属性；缺少 title 为致命配置错误
// ==========================================

use crate::domain::types::WeightUnit;
use crate::importer::error::{ImportError, ImportResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

// ==========================================
// 属性名常量
// ==========================================
pub mod attribute_keys {
    // 商品级
    pub const TITLE: &str = "title";
    pub const HANDLE: &str = "handle";
    pub const DESCRIPTION_HTML: &str = "descriptionHtml";
    pub const VENDOR: &str = "vendor";
    pub const PRODUCT_TYPE: &str = "productType";
    pub const TAGS: &str = "tags";
    pub const PUBLISHED: &str = "published";
    pub const OPTION_NAMES: [&str; 3] = ["option1Name", "option2Name", "option3Name"];
    pub const OPTION_VALUES: [&str; 3] = ["option1Value", "option2Value", "option3Value"];
    pub const SEO_TITLE: &str = "seoTitle";
    pub const SEO_DESCRIPTION: &str = "seoDescription";
    pub const STATUS: &str = "status";
    pub const CUSTOM_COLLECTIONS: &str = "customCollections";
    pub const METAFIELDS: &str = "metafields";
    pub const IMAGE_SRC: &str = "imageSrc";

    // 变体级
    pub const VARIANT_SKU: &str = "variantSku";
    pub const VARIANT_WEIGHT: &str = "variantWeight";
    pub const VARIANT_TRACKED: &str = "variantTracked";
    pub const VARIANT_COST: &str = "variantCost";
    pub const VARIANT_QUANTITY: &str = "variantQuantity";
    pub const VARIANT_INVENTORY_POLICY: &str = "variantInventoryPolicy";
    pub const VARIANT_PRICE: &str = "variantPrice";
    pub const VARIANT_COMPARE_AT_PRICE: &str = "variantCompareAtPrice";
    pub const VARIANT_REQUIRE_SHIPPING: &str = "variantRequireShipping";
    pub const VARIANT_TAXABLE: &str = "variantTaxable";
    pub const VARIANT_BARCODE: &str = "variantBarcode";
    pub const VARIANT_TAXCODE: &str = "variantTaxcode";
    pub const VARIANT_IMAGE: &str = "variantImage";

    pub fn is_known(key: &str) -> bool {
        OPTION_NAMES.contains(&key)
            || OPTION_VALUES.contains(&key)
            || [
                TITLE,
                HANDLE,
                DESCRIPTION_HTML,
                VENDOR,
                PRODUCT_TYPE,
                TAGS,
                PUBLISHED,
                SEO_TITLE,
                SEO_DESCRIPTION,
                STATUS,
                CUSTOM_COLLECTIONS,
                METAFIELDS,
                IMAGE_SRC,
                VARIANT_SKU,
                VARIANT_WEIGHT,
                VARIANT_TRACKED,
                VARIANT_COST,
                VARIANT_QUANTITY,
                VARIANT_INVENTORY_POLICY,
                VARIANT_PRICE,
                VARIANT_COMPARE_AT_PRICE,
                VARIANT_REQUIRE_SHIPPING,
                VARIANT_TAXABLE,
                VARIANT_BARCODE,
                VARIANT_TAXCODE,
                VARIANT_IMAGE,
            ]
            .contains(&key)
    }
}

use attribute_keys as keys;

/// 数字或十进制字符串（映射界面两种写法都会出现）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(u64),
    Text(String),
}

/// 宽松解析 usize: 接受 3 或 "3"
pub(crate) fn deserialize_lenient_usize<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => usize::try_from(n).map_err(serde::de::Error::custom),
        NumberOrText::Text(s) => s
            .trim()
            .parse::<usize>()
            .map_err(|_| serde::de::Error::custom(format!("无法解析为非负整数: {}", s))),
    }
}

// ==========================================
// RawColumnBinding - 原始列绑定
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawColumnBinding {
    #[serde(deserialize_with = "deserialize_lenient_usize")]
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_option_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl RawColumnBinding {
    pub fn at(index: usize) -> Self {
        Self {
            index,
            weight_unit: None,
            default_option_name: None,
            location: None,
            name: None,
            namespace: None,
        }
    }

    pub fn with_weight_unit(mut self, unit: impl Into<String>) -> Self {
        self.weight_unit = Some(unit.into());
        self
    }

    pub fn with_default_option_name(mut self, name: impl Into<String>) -> Self {
        self.default_option_name = Some(name.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_metafield(mut self, name: impl Into<String>, namespace: Option<&str>) -> Self {
        self.name = Some(name.into());
        self.namespace = namespace.map(str::to_string);
        self
    }
}

// ==========================================
// ColumnMappingDescriptor - 原始映射描述
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnMappingDescriptor {
    bindings: BTreeMap<String, Vec<RawColumnBinding>>,
}

impl ColumnMappingDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> ImportResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| ImportError::Configuration(format!("列映射格式错误: {}", e)))
    }

    pub fn with(mut self, key: impl Into<String>, bindings: Vec<RawColumnBinding>) -> Self {
        self.bindings.insert(key.into(), bindings);
        self
    }

    /// 单列快捷写法
    pub fn with_column(self, key: impl Into<String>, index: usize) -> Self {
        self.with(key, vec![RawColumnBinding::at(index)])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.bindings.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    fn all(&self, key: &str) -> &[RawColumnBinding] {
        self.bindings.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 单列属性取第一个绑定；属性存在但绑定列表为空视为配置错误
    fn first(&self, key: &str) -> ImportResult<Option<&RawColumnBinding>> {
        match self.bindings.get(key) {
            None => Ok(None),
            Some(list) => list.first().map(Some).ok_or_else(|| {
                ImportError::Configuration(format!("属性 {} 未绑定任何列", key))
            }),
        }
    }

    fn first_index(&self, key: &str) -> ImportResult<Option<usize>> {
        Ok(self.first(key)?.map(|b| b.index))
    }
}

// ==========================================
// 强类型列绑定
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct WeightColumn {
    pub index: usize,
    pub unit: Option<WeightUnit>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptionValueColumn {
    pub index: usize,
    /// 未映射 optionNName 时用作隐式选项名
    pub default_option_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuantityColumn {
    pub index: usize,
    pub location_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetafieldColumn {
    pub index: usize,
    pub key: Option<String>,
    pub namespace: String,
}

/// 元字段默认命名空间
pub const DEFAULT_METAFIELD_NAMESPACE: &str = "global";

// ==========================================
// ColumnMapping - 解析后的列映射
// ==========================================
// None / 空 Vec 表示该属性未映射，逐行循环中不再做字符串键查找
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMapping {
    pub title: usize,
    pub handle: Option<usize>,
    pub description_html: Vec<usize>,
    pub vendor: Option<usize>,
    pub product_type: Option<usize>,
    pub tags: Option<usize>,
    pub published: Option<usize>,
    pub option_names: [Option<usize>; 3],
    pub option_values: [Option<OptionValueColumn>; 3],
    pub seo_title: Option<usize>,
    pub seo_description: Option<usize>,
    pub status: Option<usize>,
    pub custom_collections: Option<usize>,
    pub metafields: Vec<MetafieldColumn>,
    pub image_src: Vec<usize>,

    pub variant_sku: Option<usize>,
    pub variant_weight: Option<WeightColumn>,
    pub variant_tracked: Option<usize>,
    pub variant_cost: Option<usize>,
    pub variant_quantity: Vec<QuantityColumn>,
    pub variant_inventory_policy: Option<usize>,
    pub variant_price: Option<usize>,
    pub variant_compare_at_price: Option<usize>,
    pub variant_require_shipping: Option<usize>,
    pub variant_taxable: Option<usize>,
    pub variant_barcode: Option<usize>,
    pub variant_taxcode: Option<usize>,
    pub variant_image: Option<usize>,
}

impl ColumnMapping {
    /// 解析映射描述；缺少 title 时在读取任何数据行之前失败
    pub fn resolve(descriptor: &ColumnMappingDescriptor) -> ImportResult<Self> {
        let title = descriptor
            .first_index(keys::TITLE)?
            .ok_or_else(|| ImportError::Configuration("File is missing title column.".to_string()))?;

        for key in descriptor.keys().filter(|k| !keys::is_known(k)) {
            debug!(key = %key, "忽略未知的映射属性");
        }

        let mut option_names = [None, None, None];
        let mut option_values = [None, None, None];
        for slot in 0..3 {
            option_names[slot] = descriptor.first_index(keys::OPTION_NAMES[slot])?;
            option_values[slot] = descriptor
                .first(keys::OPTION_VALUES[slot])?
                .map(|b| OptionValueColumn {
                    index: b.index,
                    default_option_name: b.default_option_name.clone(),
                });
        }

        let variant_weight = match descriptor.first(keys::VARIANT_WEIGHT)? {
            None => None,
            Some(binding) => Some(WeightColumn {
                index: binding.index,
                unit: binding
                    .weight_unit
                    .as_deref()
                    .filter(|u| !u.trim().is_empty())
                    .and_then(|u| match u.parse::<WeightUnit>() {
                        Ok(unit) => Some(unit),
                        // 无法识别的单位按未配置处理，不中断导入
                        Err(bad) => {
                            warn!(unit = %bad, "未知的重量单位，忽略");
                            None
                        }
                    }),
            }),
        };

        Ok(Self {
            title,
            handle: descriptor.first_index(keys::HANDLE)?,
            description_html: descriptor
                .all(keys::DESCRIPTION_HTML)
                .iter()
                .map(|b| b.index)
                .collect(),
            vendor: descriptor.first_index(keys::VENDOR)?,
            product_type: descriptor.first_index(keys::PRODUCT_TYPE)?,
            tags: descriptor.first_index(keys::TAGS)?,
            published: descriptor.first_index(keys::PUBLISHED)?,
            option_names,
            option_values,
            seo_title: descriptor.first_index(keys::SEO_TITLE)?,
            seo_description: descriptor.first_index(keys::SEO_DESCRIPTION)?,
            status: descriptor.first_index(keys::STATUS)?,
            custom_collections: descriptor.first_index(keys::CUSTOM_COLLECTIONS)?,
            metafields: descriptor
                .all(keys::METAFIELDS)
                .iter()
                .map(|b| MetafieldColumn {
                    index: b.index,
                    key: b.name.clone(),
                    namespace: b
                        .namespace
                        .clone()
                        .filter(|ns| !ns.trim().is_empty())
                        .unwrap_or_else(|| DEFAULT_METAFIELD_NAMESPACE.to_string()),
                })
                .collect(),
            image_src: descriptor
                .all(keys::IMAGE_SRC)
                .iter()
                .map(|b| b.index)
                .collect(),
            variant_sku: descriptor.first_index(keys::VARIANT_SKU)?,
            variant_weight,
            variant_tracked: descriptor.first_index(keys::VARIANT_TRACKED)?,
            variant_cost: descriptor.first_index(keys::VARIANT_COST)?,
            variant_quantity: descriptor
                .all(keys::VARIANT_QUANTITY)
                .iter()
                .map(|b| QuantityColumn {
                    index: b.index,
                    location_id: b.location.clone(),
                })
                .collect(),
            variant_inventory_policy: descriptor.first_index(keys::VARIANT_INVENTORY_POLICY)?,
            variant_price: descriptor.first_index(keys::VARIANT_PRICE)?,
            variant_compare_at_price: descriptor.first_index(keys::VARIANT_COMPARE_AT_PRICE)?,
            variant_require_shipping: descriptor.first_index(keys::VARIANT_REQUIRE_SHIPPING)?,
            variant_taxable: descriptor.first_index(keys::VARIANT_TAXABLE)?,
            variant_barcode: descriptor.first_index(keys::VARIANT_BARCODE)?,
            variant_taxcode: descriptor.first_index(keys::VARIANT_TAXCODE)?,
            variant_image: descriptor.first_index(keys::VARIANT_IMAGE)?,
        })
    }

    /// 是否映射了任一选项值列
    pub fn has_option_values(&self) -> bool {
        self.option_values.iter().any(Option::is_some)
    }

    /// 是否映射了任一选项名或选项值列
    pub fn has_option_columns(&self) -> bool {
        self.has_option_values() || self.option_names.iter().any(Option::is_some)
    }

    /// 是否需要 inventoryItem 分组
    pub fn has_inventory_item(&self) -> bool {
        self.variant_tracked.is_some() || self.variant_cost.is_some()
    }

    /// 所有绑定的 (属性名, 列索引)
    pub fn column_indices(&self) -> Vec<(&'static str, usize)> {
        let mut indices = vec![(keys::TITLE, self.title)];
        let singles = [
            (keys::HANDLE, self.handle),
            (keys::VENDOR, self.vendor),
            (keys::PRODUCT_TYPE, self.product_type),
            (keys::TAGS, self.tags),
            (keys::PUBLISHED, self.published),
            (keys::SEO_TITLE, self.seo_title),
            (keys::SEO_DESCRIPTION, self.seo_description),
            (keys::STATUS, self.status),
            (keys::CUSTOM_COLLECTIONS, self.custom_collections),
            (keys::VARIANT_SKU, self.variant_sku),
            (keys::VARIANT_WEIGHT, self.variant_weight.as_ref().map(|w| w.index)),
            (keys::VARIANT_TRACKED, self.variant_tracked),
            (keys::VARIANT_COST, self.variant_cost),
            (keys::VARIANT_INVENTORY_POLICY, self.variant_inventory_policy),
            (keys::VARIANT_PRICE, self.variant_price),
            (keys::VARIANT_COMPARE_AT_PRICE, self.variant_compare_at_price),
            (keys::VARIANT_REQUIRE_SHIPPING, self.variant_require_shipping),
            (keys::VARIANT_TAXABLE, self.variant_taxable),
            (keys::VARIANT_BARCODE, self.variant_barcode),
            (keys::VARIANT_TAXCODE, self.variant_taxcode),
            (keys::VARIANT_IMAGE, self.variant_image),
        ];
        indices.extend(singles.into_iter().filter_map(|(k, i)| i.map(|i| (k, i))));

        for slot in 0..3 {
            if let Some(index) = self.option_names[slot] {
                indices.push((keys::OPTION_NAMES[slot], index));
            }
            if let Some(value) = &self.option_values[slot] {
                indices.push((keys::OPTION_VALUES[slot], value.index));
            }
        }
        indices.extend(self.description_html.iter().map(|&i| (keys::DESCRIPTION_HTML, i)));
        indices.extend(self.image_src.iter().map(|&i| (keys::IMAGE_SRC, i)));
        indices.extend(self.metafields.iter().map(|m| (keys::METAFIELDS, m.index)));
        indices.extend(self.variant_quantity.iter().map(|q| (keys::VARIANT_QUANTITY, q.index)));
        indices
    }

    /// 校验所有列索引都落在裁剪后的表格宽度内
    pub fn validate_width(&self, width: usize) -> ImportResult<()> {
        match self
            .column_indices()
            .into_iter()
            .find(|&(_, index)| index >= width)
        {
            Some((key, index)) => Err(ImportError::Configuration(format!(
                "属性 {} 的列索引 {} 超出表格宽度 {}",
                key, index, width
            ))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_requires_title() {
        let descriptor = ColumnMappingDescriptor::new().with_column(keys::HANDLE, 1);
        let err = ColumnMapping::resolve(&descriptor).unwrap_err();
        assert!(matches!(err, ImportError::Configuration(_)));
    }

    #[test]
    fn test_resolve_from_json_with_text_indices() {
        let descriptor = ColumnMappingDescriptor::from_json_str(
            r#"{
                "title": [{"index": "0"}],
                "variantWeight": [{"index": 3, "weightUnit": "KILOGRAMS"}],
                "option1Value": [{"index": 2, "defaultOptionName": "Size"}],
                "metafields": [{"index": 4, "name": "material"}, {"index": 5, "name": "care", "namespace": "custom"}],
                "somethingElse": [{"index": 9}]
            }"#,
        )
        .unwrap();

        let mapping = ColumnMapping::resolve(&descriptor).unwrap();
        assert_eq!(mapping.title, 0);
        assert_eq!(
            mapping.variant_weight,
            Some(WeightColumn { index: 3, unit: Some(WeightUnit::Kilograms) })
        );
        assert_eq!(
            mapping.option_values[0].as_ref().and_then(|v| v.default_option_name.as_deref()),
            Some("Size")
        );
        assert_eq!(mapping.metafields[0].namespace, DEFAULT_METAFIELD_NAMESPACE);
        assert_eq!(mapping.metafields[1].namespace, "custom");
        assert!(mapping.has_option_values());
        assert!(!mapping.has_inventory_item());
    }

    #[test]
    fn test_resolve_rejects_empty_single_binding() {
        let descriptor = ColumnMappingDescriptor::new()
            .with_column(keys::TITLE, 0)
            .with(keys::VENDOR, vec![]);
        assert!(matches!(
            ColumnMapping::resolve(&descriptor),
            Err(ImportError::Configuration(_))
        ));
    }

    #[test]
    fn test_resolve_ignores_unknown_weight_unit() {
        let descriptor = ColumnMappingDescriptor::new()
            .with_column(keys::TITLE, 0)
            .with(
                keys::VARIANT_WEIGHT,
                vec![RawColumnBinding::at(1).with_weight_unit("lb")],
            );

        let mapping = ColumnMapping::resolve(&descriptor).unwrap();

        assert_eq!(mapping.variant_weight, Some(WeightColumn { index: 1, unit: None }));
    }

    #[test]
    fn test_validate_width() {
        let descriptor = ColumnMappingDescriptor::new()
            .with_column(keys::TITLE, 0)
            .with(keys::IMAGE_SRC, vec![RawColumnBinding::at(1), RawColumnBinding::at(4)]);
        let mapping = ColumnMapping::resolve(&descriptor).unwrap();

        assert!(mapping.validate_width(5).is_ok());
        let err = mapping.validate_width(3).unwrap_err();
        assert!(err.to_string().contains("imageSrc"));
    }

    #[test]
    fn test_bad_index_is_configuration_error() {
        let result = ColumnMappingDescriptor::from_json_str(r#"{"title": [{"index": "abc"}]}"#);
        assert!(matches!(result, Err(ImportError::Configuration(_))));
    }
}
