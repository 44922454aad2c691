// ==========================================
// 商品批量导入 - 命令行入口
// ==========================================
// 用法: catalog-import --root <目录> --output-dir <目录> job1.json job2.json ...
// 每个任务输出 products_job_<jobId>.json；任一任务失败则以非零状态退出
// ==========================================

use anyhow::{Context, Result};
use catalog_import::{logging, ImportJob, LocalFileSource, ProductImporter, ProductImporterImpl};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "catalog-import")]
#[command(version)]
#[command(about = "商品批量导入: 将 CSV / Excel 表格转换为商品记录", long_about = None)]
struct Cli {
    /// 任务描述 JSON 文件
    #[arg(required = true)]
    jobs: Vec<PathBuf>,

    /// 上传文件根目录（storageKey 相对于此目录）
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// 商品 JSON 输出目录
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// 以 JSON 格式输出日志
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.log_json {
        logging::init_json();
    } else {
        logging::init();
    }

    tracing::info!("商品批量导入 v{}", catalog_import::VERSION);

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = %format!("{:#}", e), "导入中止");
            ExitCode::FAILURE
        }
    }
}

/// 返回是否所有任务都成功
async fn run(cli: Cli) -> Result<bool> {
    let jobs = cli
        .jobs
        .iter()
        .map(|path| {
            ImportJob::from_path(path)
                .with_context(|| format!("无法读取任务描述: {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    tokio::fs::create_dir_all(&cli.output_dir)
        .await
        .with_context(|| format!("无法创建输出目录: {}", cli.output_dir.display()))?;

    let output_names: Vec<String> = jobs.iter().map(ImportJob::output_file_name).collect();
    let importer = ProductImporterImpl::new(LocalFileSource::new(cli.root.clone()));
    let results = importer.batch_import(jobs).await;

    let mut all_ok = true;
    for (name, result) in output_names.into_iter().zip(results) {
        match result {
            Ok(outcome) => {
                let path = cli.output_dir.join(&name);
                let json = serde_json::to_vec_pretty(&outcome.products)
                    .context("商品序列化失败")?;
                tokio::fs::write(&path, json)
                    .await
                    .with_context(|| format!("无法写入: {}", path.display()))?;

                let status = if outcome.summary.is_partial() {
                    "partially-completed"
                } else {
                    "completed"
                };
                tracing::info!(
                    job_id = %outcome.summary.job_id,
                    status,
                    products = outcome.summary.total_products,
                    output = %path.display(),
                    "任务输出已写入"
                );
            }
            Err(message) => {
                all_ok = false;
                tracing::error!(output = %name, status = "failed", error = %message, "任务失败");
            }
        }
    }

    Ok(all_ok)
}
