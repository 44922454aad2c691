// ==========================================
// 商品批量导入 - 表格模型
// ==========================================
// 职责: 单元格值 + 带原始行号的数据行
// 约定: 用户可见行号 = 原始行索引 + 2（表头占一行，行号从 1 开始）
// ==========================================

use std::fmt;

/// 单元格原始值（异构: 文本 / 数字 / 布尔 / 空）
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Cell {
    /// 空单元格、NaN 与纯空白文本都视为空
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(n) => n.is_nan(),
            Cell::Bool(_) => false,
        }
    }

    /// 缺失值: 空单元格或 NaN（纯空白文本不算缺失）
    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Number(n) => n.is_nan(),
            Cell::Text(_) | Cell::Bool(_) => false,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => write!(f, "{}", s),
            // 整数值不带小数部分输出（SKU、条码等常被存成数字）
            Cell::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{:.0}", n)
            }
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// 裁剪后保留下来的一行数据
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    /// 裁剪前的行索引（表头之后从 0 计）
    pub original_index: usize,
    pub cells: Vec<Cell>,
}

impl TableRow {
    pub fn new(original_index: usize, cells: Vec<Cell>) -> Self {
        Self {
            original_index,
            cells,
        }
    }

    /// 越界列按空单元格处理
    pub fn cell(&self, index: usize) -> &Cell {
        const EMPTY: &Cell = &Cell::Empty;
        self.cells.get(index).unwrap_or(EMPTY)
    }

    /// 用户可见行号
    pub fn row_number(&self) -> usize {
        self.original_index + 2
    }

    /// 整行都是缺失值
    pub fn is_missing(&self) -> bool {
        self.cells.iter().all(Cell::is_missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_display_numbers() {
        assert_eq!(Cell::Number(12345.0).to_string(), "12345");
        assert_eq!(Cell::Number(19.99).to_string(), "19.99");
        assert_eq!(Cell::Bool(true).to_string(), "true");
        assert_eq!(Cell::Empty.to_string(), "");
    }

    #[test]
    fn test_cell_blank() {
        assert!(Cell::Empty.is_blank());
        assert!(Cell::Text("   ".to_string()).is_blank());
        assert!(Cell::Number(f64::NAN).is_blank());
        assert!(!Cell::Number(0.0).is_blank());
        assert!(!Cell::Text(" x ".to_string()).is_blank());
    }

    #[test]
    fn test_whitespace_text_is_blank_but_not_missing() {
        let space = Cell::Text(" ".to_string());
        assert!(space.is_blank());
        assert!(!space.is_missing());
        assert!(Cell::Empty.is_missing());
        assert!(Cell::Number(f64::NAN).is_missing());

        let row = TableRow::new(0, vec![Cell::Empty, space]);
        assert!(!row.is_missing());
        assert!(TableRow::new(1, vec![Cell::Empty, Cell::Empty]).is_missing());
    }

    #[test]
    fn test_row_number_and_out_of_range_cell() {
        let row = TableRow::new(3, vec![Cell::Text("a".to_string())]);
        assert_eq!(row.row_number(), 5);
        assert_eq!(row.cell(7), &Cell::Empty);
    }
}
