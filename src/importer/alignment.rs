// ==========================================
// 商品批量导入 - 数据起始行定位
// ==========================================
// 阶段 1: 在裁剪后的表格中找到数据起始行
// 规则: header_row 使用裁剪前的原始行索引
//       找不到 → Alignment 错误（致命）
//       截取后行数 ≠ 声明行数 → RowCountMismatch 错误（致命）
// ==========================================

use crate::domain::table::TableRow;
use crate::importer::error::{ImportError, ImportResult};
use tracing::debug;

/// 返回首个原始行索引等于 header_row 的行位置
pub fn locate_start_position(rows: &[TableRow], header_row: usize) -> Option<usize> {
    rows.iter().position(|row| row.original_index == header_row)
}

/// 定位起始行，丢弃其之前的行，并校验行数
pub fn align(
    mut rows: Vec<TableRow>,
    header_row: usize,
    expected_row_count: usize,
) -> ImportResult<Vec<TableRow>> {
    let start = locate_start_position(&rows, header_row)
        .ok_or(ImportError::Alignment { header_row })?;

    rows.drain(..start);

    if rows.len() != expected_row_count {
        return Err(ImportError::RowCountMismatch {
            expected: expected_row_count,
            actual: rows.len(),
        });
    }

    debug!(header_row, start, rows = rows.len(), "数据起始行定位完成");
    Ok(rows)
}
