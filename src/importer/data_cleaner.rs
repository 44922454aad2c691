// ==========================================
// 商品批量导入 - 数据清洗器实现
// ==========================================
// 职责: 单元格有效性判定 + 类型转换
// 结果: Absent（空）/ Valid（有效）/ Invalid（有值但无法解析）
// 规则: 清洗从不报错，Invalid 由调用方转为警告 + 默认值
// ==========================================

use crate::domain::table::Cell;
use crate::domain::types::{InventoryPolicy, ProductStatus};

/// 类型转换结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coerced<T> {
    /// 单元格为空，视为未提供
    Absent,
    Valid(T),
    /// 有值但无法解析
    Invalid,
}

impl<T> Coerced<T> {
    pub fn is_valid(&self) -> bool {
        matches!(self, Coerced::Valid(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Coerced::Absent)
    }
}

pub struct DataCleaner;

impl DataCleaner {
    /// 空 / NaN / 去首尾空白后为空 → 无效
    pub fn is_invalid(&self, cell: &Cell) -> bool {
        cell.is_blank()
    }

    /// 有效单元格的文本（保留原始空白）
    pub fn text(&self, cell: &Cell) -> Option<String> {
        if self.is_invalid(cell) {
            None
        } else {
            Some(cell.to_string())
        }
    }

    /// 布尔: {true, yes, y} / {false, no, n}，大小写不敏感
    pub fn parse_bool(&self, cell: &Cell) -> Coerced<bool> {
        if self.is_invalid(cell) {
            return Coerced::Absent;
        }
        if let Cell::Bool(b) = cell {
            return Coerced::Valid(*b);
        }

        match cell.to_string().trim().to_lowercase().as_str() {
            "true" | "yes" | "y" => Coerced::Valid(true),
            "false" | "no" | "n" => Coerced::Valid(false),
            _ => Coerced::Invalid,
        }
    }

    /// 浮点数
    pub fn parse_float(&self, cell: &Cell) -> Coerced<f64> {
        if self.is_invalid(cell) {
            return Coerced::Absent;
        }

        match cell {
            Cell::Number(n) => Coerced::Valid(*n),
            Cell::Bool(b) => Coerced::Valid(if *b { 1.0 } else { 0.0 }),
            other => match other.to_string().trim().parse::<f64>() {
                Ok(value) => Coerced::Valid(value),
                Err(_) => Coerced::Invalid,
            },
        }
    }

    /// 整数: 数字单元格向零截断，文本必须是整数字面量
    pub fn parse_int(&self, cell: &Cell) -> Coerced<i64> {
        if self.is_invalid(cell) {
            return Coerced::Absent;
        }

        match cell {
            Cell::Number(n) if n.is_finite() && n.abs() < i64::MAX as f64 => {
                Coerced::Valid(n.trunc() as i64)
            }
            Cell::Number(_) => Coerced::Invalid,
            Cell::Bool(b) => Coerced::Valid(i64::from(*b)),
            other => match other.to_string().trim().parse::<i64>() {
                Ok(value) => Coerced::Valid(value),
                Err(_) => Coerced::Invalid,
            },
        }
    }

    /// 商品状态: 子串 + 长度上限的轻量模糊匹配
    /// - 长度 ≤ 7 且含 "active"  → ACTIVE
    /// - 长度 ≤ 9 且含 "archive" → ARCHIVED
    /// - 长度 ≤ 6 且含 "draft"   → DRAFT
    pub fn parse_status(&self, cell: &Cell) -> Coerced<ProductStatus> {
        if self.is_invalid(cell) {
            return Coerced::Absent;
        }

        let cleaned = cell.to_string().trim().to_lowercase();
        let len = cleaned.chars().count();
        if len <= 7 && cleaned.contains("active") {
            Coerced::Valid(ProductStatus::Active)
        } else if len <= 9 && cleaned.contains("archive") {
            Coerced::Valid(ProductStatus::Archived)
        } else if len <= 6 && cleaned.contains("draft") {
            Coerced::Valid(ProductStatus::Draft)
        } else {
            Coerced::Invalid
        }
    }

    /// 库存策略
    /// - 长度 ≤ 9 且含 "continue" → CONTINUE
    /// - 长度 ≤ 5 且含 "deny"     → DENY
    pub fn parse_inventory_policy(&self, cell: &Cell) -> Coerced<InventoryPolicy> {
        if self.is_invalid(cell) {
            return Coerced::Absent;
        }

        let cleaned = cell.to_string().trim().to_lowercase();
        let len = cleaned.chars().count();
        if len <= 9 && cleaned.contains("continue") {
            Coerced::Valid(InventoryPolicy::Continue)
        } else if len <= 5 && cleaned.contains("deny") {
            Coerced::Valid(InventoryPolicy::Deny)
        } else {
            Coerced::Invalid
        }
    }

    /// 按 ';' 或 ',' 切分，不裁剪各项空白
    pub fn split_list(&self, value: &str) -> Vec<String> {
        value.split([';', ',']).map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    #[test]
    fn test_is_invalid() {
        let cleaner = DataCleaner;
        assert!(cleaner.is_invalid(&Cell::Empty));
        assert!(cleaner.is_invalid(&text("  \t ")));
        assert!(!cleaner.is_invalid(&text(" a ")));
        assert_eq!(cleaner.text(&text(" a ")), Some(" a ".to_string()));
    }

    #[test]
    fn test_parse_bool() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.parse_bool(&text(" YES ")), Coerced::Valid(true));
        assert_eq!(cleaner.parse_bool(&text("y")), Coerced::Valid(true));
        assert_eq!(cleaner.parse_bool(&text("False")), Coerced::Valid(false));
        assert_eq!(cleaner.parse_bool(&text("N")), Coerced::Valid(false));
        assert_eq!(cleaner.parse_bool(&text("maybe")), Coerced::Invalid);
        assert_eq!(cleaner.parse_bool(&Cell::Number(1.0)), Coerced::Invalid);
        assert_eq!(cleaner.parse_bool(&Cell::Bool(false)), Coerced::Valid(false));
        assert_eq!(cleaner.parse_bool(&Cell::Empty), Coerced::Absent);
    }

    #[test]
    fn test_parse_float() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.parse_float(&text(" 19.99 ")), Coerced::Valid(19.99));
        assert_eq!(cleaner.parse_float(&Cell::Number(5.0)), Coerced::Valid(5.0));
        assert_eq!(cleaner.parse_float(&text("abc")), Coerced::Invalid);
        assert_eq!(cleaner.parse_float(&text("")), Coerced::Absent);
    }

    #[test]
    fn test_parse_int() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.parse_int(&text("12")), Coerced::Valid(12));
        assert_eq!(cleaner.parse_int(&Cell::Number(7.9)), Coerced::Valid(7));
        assert_eq!(cleaner.parse_int(&text("7.5")), Coerced::Invalid);
        assert_eq!(cleaner.parse_int(&Cell::Number(f64::INFINITY)), Coerced::Invalid);
    }

    #[test]
    fn test_parse_status_length_bounds() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.parse_status(&text("Active")), Coerced::Valid(ProductStatus::Active));
        assert_eq!(cleaner.parse_status(&text(" active ")), Coerced::Valid(ProductStatus::Active));
        // "inactive" 长度 8 > 7
        assert_eq!(cleaner.parse_status(&text("inactive")), Coerced::Invalid);
        assert_eq!(cleaner.parse_status(&text("ARCHIVED")), Coerced::Valid(ProductStatus::Archived));
        assert_eq!(cleaner.parse_status(&text("archived!!")), Coerced::Invalid);
        assert_eq!(cleaner.parse_status(&text("draft")), Coerced::Valid(ProductStatus::Draft));
        assert_eq!(cleaner.parse_status(&text("drafts")), Coerced::Valid(ProductStatus::Draft));
        assert_eq!(cleaner.parse_status(&text("redrafts")), Coerced::Invalid);
        assert_eq!(cleaner.parse_status(&Cell::Empty), Coerced::Absent);
    }

    #[test]
    fn test_parse_inventory_policy() {
        let cleaner = DataCleaner;
        assert_eq!(
            cleaner.parse_inventory_policy(&text("Continue")),
            Coerced::Valid(InventoryPolicy::Continue)
        );
        assert_eq!(
            cleaner.parse_inventory_policy(&text("continues")),
            Coerced::Valid(InventoryPolicy::Continue)
        );
        assert_eq!(cleaner.parse_inventory_policy(&text("DENY")), Coerced::Valid(InventoryPolicy::Deny));
        assert_eq!(cleaner.parse_inventory_policy(&text("denyall")), Coerced::Invalid);
        assert_eq!(cleaner.parse_inventory_policy(&text("stop")), Coerced::Invalid);
    }

    #[test]
    fn test_split_list_does_not_trim() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.split_list("a; b,c"), vec!["a", " b", "c"]);
        assert_eq!(cleaner.split_list("solo"), vec!["solo"]);
    }
}
