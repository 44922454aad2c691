// ==========================================
// 商品批量导入 - 导入接口 Trait
// ==========================================
// 职责: 定义文件解析 / 文件获取 / 任务导入接口（不包含实现）
// ==========================================

use crate::config::ImportJob;
use crate::domain::import_report::ImportOutcome;
use crate::domain::table::TableRow;
use crate::importer::error::ImportResult;
use async_trait::async_trait;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 字节内容 → 原始数据行（阶段 0）
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析为未裁剪的数据行
    ///
    /// # 参数
    /// - bytes: 文件原始字节
    ///
    /// # 返回
    /// - Ok(Vec<TableRow>): 表头之后的所有行（原始行索引从 0 计）
    /// - Err: 内容无法按该格式解析
    fn parse_to_rows(&self, bytes: &[u8]) -> ImportResult<Vec<TableRow>>;
}

// ==========================================
// FileSource Trait
// ==========================================
// 用途: 按存储键获取上传文件内容
// 实现者: LocalFileSource
#[async_trait]
pub trait FileSource: Send + Sync {
    async fn fetch(&self, storage_key: &str) -> ImportResult<Vec<u8>>;
}

// ==========================================
// ProductImporter Trait
// ==========================================
// 用途: 商品导入主接口
// 实现者: ProductImporterImpl
#[async_trait]
pub trait ProductImporter: Send + Sync {
    /// 执行单个导入任务
    ///
    /// # 流程
    /// 1. 解析列映射（缺少 title 直接失败）
    /// 2. 获取文件内容
    /// 3. 加载表格并裁剪空行空列
    /// 4. 定位数据起始行并校验行数
    /// 5. 行分组 + 字段提取
    ///
    /// # 返回
    /// - Ok(ImportOutcome): 商品列表 + 汇总
    /// - Err: 致命错误（配置 / 加载 / 对齐 / 行数）
    async fn import_job(&self, job: ImportJob) -> ImportResult<ImportOutcome>;

    /// 批量导入（并发执行）
    ///
    /// # 说明
    /// - 每个任务相互独立，不共享状态
    /// - 单个任务失败不影响其他任务
    async fn batch_import(&self, jobs: Vec<ImportJob>) -> Vec<Result<ImportOutcome, String>>;
}
