// ==========================================
// 商品批量导入 - 领域类型定义
// ==========================================
// 职责: 文件类型、商品状态、库存策略等枚举
// 序列化格式: SCREAMING_SNAKE_CASE (与下游商品处理器一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 文件类型 (File Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileType {
    Csv,   // 分隔文本
    Excel, // 工作簿
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileType::Csv => write!(f, "CSV"),
            FileType::Excel => write!(f, "EXCEL"),
        }
    }
}

impl FromStr for FileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CSV" => Ok(FileType::Csv),
            "EXCEL" => Ok(FileType::Excel),
            other => Err(other.to_string()),
        }
    }
}

// ==========================================
// 商品状态 (Product Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    Active,
    #[default]
    Draft,
    Archived,
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductStatus::Active => write!(f, "ACTIVE"),
            ProductStatus::Draft => write!(f, "DRAFT"),
            ProductStatus::Archived => write!(f, "ARCHIVED"),
        }
    }
}

// ==========================================
// 库存策略 (Inventory Policy)
// ==========================================
// 售罄后是否允许继续下单
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InventoryPolicy {
    Continue,
    Deny,
}

impl fmt::Display for InventoryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InventoryPolicy::Continue => write!(f, "CONTINUE"),
            InventoryPolicy::Deny => write!(f, "DENY"),
        }
    }
}

// ==========================================
// 重量单位 (Weight Unit)
// ==========================================
// 来源: 列映射中 variantWeight 绑定的 weightUnit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeightUnit {
    Grams,
    Kilograms,
    Ounces,
    Pounds,
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightUnit::Grams => write!(f, "GRAMS"),
            WeightUnit::Kilograms => write!(f, "KILOGRAMS"),
            WeightUnit::Ounces => write!(f, "OUNCES"),
            WeightUnit::Pounds => write!(f, "POUNDS"),
        }
    }
}

impl FromStr for WeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "GRAMS" => Ok(WeightUnit::Grams),
            "KILOGRAMS" => Ok(WeightUnit::Kilograms),
            "OUNCES" => Ok(WeightUnit::Ounces),
            "POUNDS" => Ok(WeightUnit::Pounds),
            other => Err(other.to_string()),
        }
    }
}

// ==========================================
// 元字段值类型 (Metafield Value Type)
// ==========================================
// 导入阶段统一按字符串处理
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetafieldValueType {
    #[default]
    String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_type_from_str() {
        assert_eq!("csv".parse::<FileType>(), Ok(FileType::Csv));
        assert_eq!(" EXCEL ".parse::<FileType>(), Ok(FileType::Excel));
        assert!("PDF".parse::<FileType>().is_err());
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&ProductStatus::Archived).unwrap();
        assert_eq!(json, "\"ARCHIVED\"");
        let status: ProductStatus = serde_json::from_str("\"ACTIVE\"").unwrap();
        assert_eq!(status, ProductStatus::Active);
    }

    #[test]
    fn test_weight_unit_round_trip_text() {
        assert_eq!("kilograms".parse::<WeightUnit>(), Ok(WeightUnit::Kilograms));
        assert_eq!(WeightUnit::Pounds.to_string(), "POUNDS");
    }
}
