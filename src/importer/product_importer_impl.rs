// ==========================================
// 商品批量导入 - 导入器实现
// ==========================================
// 职责: 整合导入流程，从上传文件到商品列表
// 流程: 解析列映射 → 获取文件 → 加载表格 → 定位起始行 → 行分组 + 字段提取
// 并发: 每个任务独立执行，不共享状态；CPU 密集部分放到阻塞线程池
// ==========================================

use crate::config::{ColumnMapping, ColumnMappingDescriptor, ImportJob, ImportOptions};
use crate::domain::import_report::{ImportOutcome, ImportSummary};
use crate::domain::product::ProductRecord;
use crate::domain::types::FileType;
use crate::importer::alignment::align;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::TableLoader;
use crate::importer::product_generator::ProductGenerator;
use crate::importer::product_importer_trait::{FileSource, ProductImporter};
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, instrument};

// ==========================================
// generate - 核心入口（同步、无 I/O）
// ==========================================

/// 文件字节 → 商品列表
///
/// # 参数
/// - bytes: 文件原始字节
/// - file_type: CSV / EXCEL
/// - header_row: 数据起始行（裁剪前的行索引）
/// - expected_row_count: 声明的数据行数
/// - descriptor: 列映射描述
/// - options: 导入选项
///
/// # 返回
/// - Ok(Vec<ProductRecord>): 按首次出现顺序排列的商品
/// - Err: 配置 / 加载 / 对齐 / 行数错误，不返回部分结果
#[instrument(skip(bytes, descriptor, options), fields(size = bytes.len()))]
pub fn generate(
    bytes: &[u8],
    file_type: FileType,
    header_row: usize,
    expected_row_count: usize,
    descriptor: &ColumnMappingDescriptor,
    options: &ImportOptions,
) -> ImportResult<Vec<ProductRecord>> {
    // 读取任何数据行之前先校验映射
    let mapping = ColumnMapping::resolve(descriptor)?;

    let rows = TableLoader::load(bytes, file_type)?;
    let rows = align(rows, header_row, expected_row_count)?;

    if let Some(width) = rows.first().map(|r| r.cells.len()) {
        mapping.validate_width(width)?;
    }

    let products = ProductGenerator::new(&mapping, options).generate(&rows);
    debug!(
        rows = rows.len(),
        products = products.len(),
        "商品生成完成"
    );
    Ok(products)
}

// ==========================================
// LocalFileSource - 本地目录文件源
// ==========================================
pub struct LocalFileSource {
    root: PathBuf,
}

impl LocalFileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// 存储键只允许是 root 之下的相对路径
    fn resolve(&self, storage_key: &str) -> ImportResult<PathBuf> {
        let key = Path::new(storage_key);
        let escapes = key
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if storage_key.trim().is_empty() || escapes {
            return Err(ImportError::FileReadError(format!(
                "非法的存储键: {}",
                storage_key
            )));
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl FileSource for LocalFileSource {
    async fn fetch(&self, storage_key: &str) -> ImportResult<Vec<u8>> {
        let path = self.resolve(storage_key)?;
        tokio::fs::read(&path)
            .await
            .map_err(|e| ImportError::FileReadError(format!("{}: {}", path.display(), e)))
    }
}

// ==========================================
// ProductImporterImpl - 商品导入器实现
// ==========================================
pub struct ProductImporterImpl<S>
where
    S: FileSource,
{
    source: S,
}

impl<S> ProductImporterImpl<S>
where
    S: FileSource,
{
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

#[async_trait]
impl<S> ProductImporter for ProductImporterImpl<S>
where
    S: FileSource,
{
    #[instrument(skip(self, job), fields(job_id = %job.job_id, file_id = %job.file.id))]
    async fn import_job(&self, job: ImportJob) -> ImportResult<ImportOutcome> {
        let start_time = Instant::now();
        info!(storage_key = %job.file.storage_key, file_type = %job.file.file_type, "开始导入任务");

        // 映射错误不需要读取文件
        ColumnMapping::resolve(&job.file.field_details)?;

        let bytes = self.source.fetch(&job.file.storage_key).await?;
        debug!(bytes = bytes.len(), "文件获取完成");

        let ImportJob { job_id, file, options } = job;
        let file_id = file.id.clone();
        let products = tokio::task::spawn_blocking(move || {
            generate(
                &bytes,
                file.file_type,
                file.header_row,
                file.actual_row_count,
                &file.field_details,
                &options,
            )
        })
        .await
        .map_err(|e| ImportError::Other(anyhow::anyhow!("导入任务异常终止: {}", e)))??;

        let elapsed_ms = start_time.elapsed().as_millis() as u64;
        let summary = ImportSummary::from_products(job_id, file_id, &products, elapsed_ms);
        info!(
            products = summary.total_products,
            variants = summary.total_variants,
            with_errors = summary.products_with_errors,
            with_warnings = summary.products_with_warnings,
            elapsed_ms,
            "导入任务完成"
        );

        Ok(ImportOutcome { summary, products })
    }

    async fn batch_import(&self, jobs: Vec<ImportJob>) -> Vec<Result<ImportOutcome, String>> {
        use futures::future::join_all;

        info!(count = jobs.len(), "开始批量导入");

        let import_tasks = jobs.into_iter().map(|job| {
            let job_id = job.job_id.clone();
            async move {
                match self.import_job(job).await {
                    Ok(outcome) => Ok(outcome),
                    Err(e) => {
                        error!(job_id = %job_id, error = %e, "导入任务失败");
                        Err(format!("任务 {} 导入失败: {}", job_id, e))
                    }
                }
            }
        });

        let results = join_all(import_tasks).await;

        info!(
            total = results.len(),
            success = results.iter().filter(|r| r.is_ok()).count(),
            failed = results.iter().filter(|r| r.is_err()).count(),
            "批量导入完成"
        );

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::attribute_keys as keys;

    #[test]
    fn test_generate_missing_title_fails_before_reading_rows() {
        let descriptor = ColumnMappingDescriptor::new().with_column(keys::VARIANT_PRICE, 0);

        // 内容不是合法工作簿，仍然先报配置错误
        let err = generate(
            b"not a workbook",
            FileType::Excel,
            0,
            0,
            &descriptor,
            &ImportOptions::default(),
        )
        .unwrap_err();

        assert!(matches!(err, ImportError::Configuration(_)));
    }

    #[test]
    fn test_generate_rejects_out_of_range_column() {
        let descriptor = ColumnMappingDescriptor::new()
            .with_column(keys::TITLE, 0)
            .with_column(keys::VARIANT_PRICE, 5);

        let err = generate(
            b"Title,Price\nShirt,1\n",
            FileType::Csv,
            0,
            1,
            &descriptor,
            &ImportOptions::default(),
        )
        .unwrap_err();

        assert!(matches!(err, ImportError::Configuration(msg) if msg.contains("variantPrice")));
    }

    #[test]
    fn test_local_file_source_rejects_escaping_keys() {
        let source = LocalFileSource::new("/tmp");
        assert!(source.resolve("../etc/passwd").is_err());
        assert!(source.resolve("/etc/passwd").is_err());
        assert!(source.resolve("").is_err());
        assert_eq!(
            source.resolve("uploads/a.csv").unwrap(),
            PathBuf::from("/tmp/uploads/a.csv")
        );
    }

    #[tokio::test]
    async fn test_local_file_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = LocalFileSource::new(dir.path());

        let err = source.fetch("missing.csv").await.unwrap_err();

        assert!(matches!(err, ImportError::FileReadError(_)));
    }
}
