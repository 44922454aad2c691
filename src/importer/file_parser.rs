// ==========================================
// 商品批量导入 - 文件解析器实现
// ==========================================
// 阶段 0: 字节内容 → 表格
// 支持: CSV / Excel（首个工作表）
// 规则: 首行作为表头（只保留位置，不使用列名）
//       删除整列缺失的列、整行缺失的行（纯空白文本不算缺失），保留原始行索引
// ==========================================

use crate::domain::table::{Cell, TableRow};
use crate::domain::types::FileType;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::product_importer_trait::FileParser;
use calamine::{open_workbook_auto_from_rs, Data, DataType, Range, Reader};
use csv::ReaderBuilder;
use std::io::Cursor;
use tracing::debug;

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_rows(&self, bytes: &[u8]) -> ImportResult<Vec<TableRow>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(bytes);

        // 读取表头（只用于确定列数）
        let width = reader.headers()?.len();
        if width == 0 {
            return Err(ImportError::CsvParseError("文件无表头".to_string()));
        }

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;

            // 空白行不占行索引
            if record.len() == 1 && record[0].is_empty() {
                continue;
            }

            // 超出表头的字段只允许为空
            if record.iter().skip(width).any(|v| !v.trim().is_empty()) {
                return Err(ImportError::CsvParseError(format!(
                    "第 {} 条记录字段数 {} 超过表头列数 {}",
                    rows.len() + 1,
                    record.len(),
                    width
                )));
            }

            let mut cells: Vec<Cell> = record
                .iter()
                .take(width)
                .map(|value| {
                    if value.is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text(value.to_string())
                    }
                })
                .collect();
            cells.resize(width, Cell::Empty);

            rows.push(TableRow::new(rows.len(), cells));
        }

        Ok(rows)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_rows(&self, bytes: &[u8]) -> ImportResult<Vec<TableRow>> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

        // 读取第一个 sheet
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))??;

        range_to_rows(&range)
    }
}

/// 工作表区域 → 数据行（首行为表头）
pub fn range_to_rows(range: &Range<Data>) -> ImportResult<Vec<TableRow>> {
    let mut rows = range.rows();
    if rows.next().is_none() {
        return Err(ImportError::ExcelParseError(
            "Excel 文件无表头".to_string(),
        ));
    }

    Ok(rows
        .enumerate()
        .map(|(idx, row)| TableRow::new(idx, row.iter().map(data_to_cell).collect()))
        .collect())
}

fn data_to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) if s.is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(_) => match data.as_datetime() {
            Some(dt) => Cell::Text(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
            None => Cell::Text(data.to_string()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

// ==========================================
// TableLoader - 按文件类型加载并裁剪
// ==========================================
pub struct TableLoader;

impl TableLoader {
    pub fn parser_for(file_type: FileType) -> Box<dyn FileParser> {
        match file_type {
            FileType::Csv => Box::new(CsvParser),
            FileType::Excel => Box::new(ExcelParser),
        }
    }

    /// 加载表格: 解析 → 删除全空列 → 删除全空行
    pub fn load(bytes: &[u8], file_type: FileType) -> ImportResult<Vec<TableRow>> {
        let rows = Self::parser_for(file_type).parse_to_rows(bytes)?;
        let parsed = rows.len();
        let rows = trim_empty(rows);
        debug!(
            file_type = %file_type,
            parsed_rows = parsed,
            kept_rows = rows.len(),
            width = rows.first().map(|r| r.cells.len()).unwrap_or(0),
            "表格加载完成"
        );
        Ok(rows)
    }
}

/// 删除所有行都缺失的列，再删除所有列都缺失的行
/// 只看缺失值，纯空白文本保留（列索引与行数都不受影响）
pub fn trim_empty(rows: Vec<TableRow>) -> Vec<TableRow> {
    let width = rows.iter().map(|r| r.cells.len()).max().unwrap_or(0);
    let kept_columns: Vec<usize> = (0..width)
        .filter(|&col| rows.iter().any(|r| !r.cell(col).is_missing()))
        .collect();

    rows.into_iter()
        .filter(|r| !r.is_missing())
        .map(|r| {
            let cells = kept_columns.iter().map(|&col| r.cell(col).clone()).collect();
            TableRow::new(r.original_index, cells)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    #[test]
    fn test_csv_parser_valid_content() {
        let content = b"Title,Handle,Price\nShirt,shirt-1,19.99\nShirt,shirt-1,24.99\n";

        let rows = CsvParser.parse_to_rows(content).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].original_index, 0);
        assert_eq!(rows[0].cells, vec![text("Shirt"), text("shirt-1"), text("19.99")]);
        assert_eq!(rows[1].row_number(), 3);
    }

    #[test]
    fn test_csv_parser_keeps_untrimmed_values_and_pads_short_rows() {
        let content = b"A,B,C\n  x ,y\n";

        let rows = CsvParser.parse_to_rows(content).unwrap();

        assert_eq!(rows[0].cells, vec![text("  x "), text("y"), Cell::Empty]);
    }

    #[test]
    fn test_csv_parser_rejects_extra_fields() {
        let content = b"A,B\n1,2,3\n";
        let err = CsvParser.parse_to_rows(content).unwrap_err();
        assert!(err.is_load_error());
    }

    #[test]
    fn test_csv_parser_rejects_invalid_utf8() {
        let content: &[u8] = b"A,B\n\xff\xfe,2\n";
        assert!(CsvParser.parse_to_rows(content).is_err());
    }

    #[test]
    fn test_load_drops_empty_rows_and_columns() {
        let content = b"Title,Empty,Price\nShirt,,10\n,,\nPants,,20\n";

        let rows = TableLoader::load(content, FileType::Csv).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cells, vec![text("Shirt"), text("10")]);
        // 原始行索引保留（第 1 行被删除）
        assert_eq!(rows[1].original_index, 2);
        assert_eq!(rows[1].cells, vec![text("Pants"), text("20")]);
    }

    #[test]
    fn test_load_keeps_whitespace_only_columns_and_rows() {
        let content = b"Title,Pad,Price\nShirt, ,10\n , , \nPants, ,20\n";

        let rows = TableLoader::load(content, FileType::Csv).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].cells, vec![text("Shirt"), text(" "), text("10")]);
        assert_eq!(rows[1].original_index, 1);
        assert!(rows[1].cells.iter().all(Cell::is_blank));
        assert_eq!(rows[2].cells[2], text("20"));
    }

    #[test]
    fn test_excel_invalid_bytes_is_load_error() {
        let err = TableLoader::load(b"definitely not a workbook", FileType::Excel).unwrap_err();
        assert!(matches!(err, ImportError::ExcelParseError(_)));
    }

    #[test]
    fn test_range_to_rows_converts_cells() {
        let mut range: Range<Data> = Range::new((0, 0), (2, 2));
        range.set_value((0, 0), Data::String("Title".to_string()));
        range.set_value((0, 1), Data::String("Price".to_string()));
        range.set_value((0, 2), Data::String("Taxable".to_string()));
        range.set_value((1, 0), Data::String("Shirt".to_string()));
        range.set_value((1, 1), Data::Float(19.5));
        range.set_value((1, 2), Data::Bool(true));
        range.set_value((2, 0), Data::Int(123));

        let rows = range_to_rows(&range).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cells, vec![text("Shirt"), Cell::Number(19.5), Cell::Bool(true)]);
        assert_eq!(rows[1].cells[0].to_string(), "123");
        assert_eq!(rows[1].cells[1], Cell::Empty);
    }
}
