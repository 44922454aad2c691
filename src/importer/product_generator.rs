// ==========================================
// 商品批量导入 - 行分组与商品生成
// ==========================================
// 阶段 2: 按顺序遍历对齐后的数据行，折叠为商品列表
// 续行判定（只与紧邻的上一行比较）:
//   已有商品 且 ( 上一行标题存在且相等 或 上一行 handle 存在且相等 )
// - 续行   → 只提取变体，追加到当前商品
// - 非续行 → 冻结当前商品，新建商品并提取商品级属性 + 一个变体
// ==========================================

use crate::config::{ColumnMapping, ImportOptions};
use crate::domain::product::{ProductBuilder, ProductRecord};
use crate::domain::table::TableRow;
use crate::importer::field_mapper::FieldMapper;
use tracing::trace;

pub struct ProductGenerator<'a> {
    mapper: FieldMapper<'a>,
}

impl<'a> ProductGenerator<'a> {
    pub fn new(mapping: &'a ColumnMapping, options: &'a ImportOptions) -> Self {
        Self {
            mapper: FieldMapper::new(mapping, options),
        }
    }

    pub fn generate(&self, rows: &[TableRow]) -> Vec<ProductRecord> {
        let mut products = Vec::new();
        let mut current: Option<ProductBuilder> = None;
        let mut previous: Option<(Option<String>, Option<String>)> = None;

        for row in rows {
            let title = self.mapper.title(row);
            let handle = self.mapper.handle(row);

            let continues = match (&current, &previous) {
                (Some(_), Some((prev_title, prev_handle))) => {
                    Self::same_key(prev_title, &title) || Self::same_key(prev_handle, &handle)
                }
                _ => false,
            };

            match current.as_mut() {
                Some(product) if continues => {
                    trace!(row = row.row_number(), "续行，追加变体");
                    self.mapper.extract_variant(row, product);
                }
                _ => {
                    if let Some(done) = current.take() {
                        products.push(done.finish());
                    }
                    let mut product =
                        ProductBuilder::start(title.clone(), handle.clone(), row.row_number());
                    self.mapper.extract_product_details(row, &mut product);
                    self.mapper.extract_variant(row, &mut product);
                    current = Some(product);
                }
            }

            previous = Some((title, handle));
        }

        if let Some(done) = current {
            products.push(done.finish());
        }
        products
    }

    fn same_key(previous: &Option<String>, current: &Option<String>) -> bool {
        matches!(previous, Some(prev) if Some(prev) == current.as_ref())
    }
}
