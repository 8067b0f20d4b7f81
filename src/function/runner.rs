// runner.rs
use super::{RunError, RunRequest};
use super::coverage::{CoverageResult, EndpointCatalog};
use super::report::{self, NewmanExport, RunOutcome};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;

// 执行引擎抽象: 真实实现调用 newman, 测试注入假实现
pub trait CollectionRunner {
    async fn execute(&self, request: &RunRequest) -> Result<RunOutcome, RunError>;
}

// 通过 newman 命令行执行集合, 结果从 JSON 导出读取
pub struct NewmanCli {
    program: String,
}

impl NewmanCli {
    pub fn new() -> Self {
        NewmanCli {
            program: "newman".to_string(),
        }
    }

    // 组装 newman 参数: 集合/环境/报告导出 + 转发的两个标志
    pub fn build_args(&self, request: &RunRequest) -> Vec<String> {
        let mut args = vec![
            "run".to_string(),
            request.collection.display().to_string(),
            "-e".to_string(),
            request.environment.display().to_string(),
            "--reporters".to_string(),
            "htmlextra,junit,json".to_string(),
            "--reporter-htmlextra-export".to_string(),
            request.html_report_path().display().to_string(),
            "--reporter-htmlextra-title".to_string(),
            "Fake REST API - Users".to_string(),
            "--reporter-htmlextra-darkTheme".to_string(),
            "--reporter-junit-export".to_string(),
            request.junit_report_path().display().to_string(),
            "--reporter-json-export".to_string(),
            request.json_export_path().display().to_string(),
        ];
        if request.bail {
            args.push("--bail".to_string());
        }
        for folder in &request.folders {
            args.push("--folder".to_string());
            args.push(folder.clone());
        }
        args
    }
}

impl Default for NewmanCli {
    fn default() -> Self {
        NewmanCli::new()
    }
}

impl CollectionRunner for NewmanCli {
    async fn execute(&self, request: &RunRequest) -> Result<RunOutcome, RunError> {
        // 输入文件缺失时 newman 必然失败, 提前报为调用错误
        request.validate()?;

        // 清理上次的导出, 避免把旧结果当成本次运行
        let export_path = request.json_export_path();
        if export_path.exists() {
            fs::remove_file(&export_path)
                .map_err(|e| RunError::IOError(format!("无法清理旧结果文件: {}", e)))?;
        }

        let status = Command::new(&self.program)
            .args(self.build_args(request))
            .status()
            .await
            .map_err(|e| RunError::Spawn(format!("无法启动 {}: {}", self.program, e)))?;

        // 断言失败时 newman 退出码非零但仍会写出导出文件,
        // 只有导出缺失才视为调用失败
        if !export_path.exists() {
            return Err(RunError::Invocation(format!(
                "newman 未产出结果文件 (退出码 {:?})",
                status.code()
            )));
        }

        let raw = fs::read_to_string(&export_path)
            .map_err(|e| RunError::IOError(format!("无法读取结果文件: {}", e)))?;
        let export: NewmanExport = serde_json::from_str(&raw)?;
        Ok(export.run)
    }
}

// 一次完整运行的产出: 结果 + 覆盖统计 + 摘要位置 + 进程退出码
#[derive(Debug)]
pub struct RunReport {
    pub outcome: RunOutcome,
    pub coverage: CoverageResult,
    pub summary_path: PathBuf,
    pub exit_code: i32,
}

pub async fn run<R: CollectionRunner>(
    runner: &R,
    request: &RunRequest,
) -> Result<RunReport, RunError> {
    request.ensure_report_dir()?;

    if !request.folders.is_empty() {
        println!("运行目录: {}", request.folders.join(", "));
    }

    // 执行引擎自己不输出进度, 这里挂一个转轮
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message("正在执行集合...");
    pb.enable_steady_tick(Duration::from_millis(120));

    let outcome = runner.execute(request).await;
    pb.finish_and_clear();

    // 调用错误: 不写摘要, 直接上抛
    let outcome = outcome?;

    // 归并端点覆盖并写出摘要, 运行失败时摘要仍然保留
    let catalog = EndpointCatalog::fake_rest_users();
    let coverage = catalog.reduce(&outcome.executions);
    let summary = report::render_summary(&request.folders, &outcome.stats, &coverage);
    let summary_path = request.summary_path();
    report::write_summary(&summary_path, &summary)?;

    let exit_code = if outcome.has_failures() { 1 } else { 0 };
    Ok(RunReport {
        outcome,
        coverage,
        summary_path,
        exit_code,
    })
}
