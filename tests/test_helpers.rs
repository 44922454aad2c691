// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供列映射、任务描述、CSV 样例数据的构建
// ==========================================

#![allow(dead_code)]

use catalog_import::config::attribute_keys as keys;
use catalog_import::config::FileDescriptor;
use catalog_import::{ColumnMappingDescriptor, FileType, ImportJob, ImportOptions, RawColumnBinding};
use std::path::Path;

/// 样例商品表: 两个商品，第一个有两个颜色变体
///
/// 列: Title, Handle, Option1 Name, Option1 Value, Price, Published, Empty
pub const SHIRT_CSV: &str = "\
Title,Handle,Option1 Name,Option1 Value,Price,Published,Unused
Shirt,shirt-1,Color,Red,19.99,yes,
Shirt,shirt-1,Color,Blue,24.99,,
Pants,pants-1,Color,Black,39.5,no,
";

/// 标准映射: 与 SHIRT_CSV 的列对应（Unused 列已被裁剪）
pub fn shirt_mapping() -> ColumnMappingDescriptor {
    ColumnMappingDescriptor::new()
        .with_column(keys::TITLE, 0)
        .with_column(keys::HANDLE, 1)
        .with_column(keys::OPTION_NAMES[0], 2)
        .with_column(keys::OPTION_VALUES[0], 3)
        .with_column(keys::VARIANT_PRICE, 4)
        .with_column(keys::PUBLISHED, 5)
}

/// 只映射 title / handle / price 的简单映射
pub fn basic_mapping() -> ColumnMappingDescriptor {
    ColumnMappingDescriptor::new()
        .with_column(keys::TITLE, 0)
        .with_column(keys::HANDLE, 1)
        .with_column(keys::VARIANT_PRICE, 2)
}

/// 带库存数量和重量的映射
pub fn inventory_mapping() -> ColumnMappingDescriptor {
    basic_mapping()
        .with(
            keys::VARIANT_WEIGHT,
            vec![RawColumnBinding::at(3).with_weight_unit("GRAMS")],
        )
        .with(
            keys::VARIANT_QUANTITY,
            vec![RawColumnBinding::at(4).with_location("gid://location/1")],
        )
}

/// 构建导入任务
pub fn build_job(
    job_id: &str,
    storage_key: &str,
    file_type: FileType,
    header_row: usize,
    actual_row_count: usize,
    mapping: ColumnMappingDescriptor,
    options: ImportOptions,
) -> ImportJob {
    ImportJob {
        job_id: job_id.to_string(),
        file: FileDescriptor {
            id: format!("file-{}", job_id),
            file_name: Some(storage_key.to_string()),
            file_type,
            storage_key: storage_key.to_string(),
            header_row,
            actual_row_count,
            field_details: mapping,
        },
        options,
    }
}

/// 写入上传文件
pub fn write_upload(root: &Path, storage_key: &str, content: &str) {
    let path = root.join(storage_key);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}
