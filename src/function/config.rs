// config.rs
use structopt::StructOpt;
use std::fs;
use std::path::PathBuf;
use super::RunError;

// 固定输入: 集合与环境文件的约定路径
pub const COLLECTION_PATH: &str = "postman/FakeRESTAPI-Users.postman_collection.json";
pub const ENVIRONMENT_PATH: &str = "postman/postman_environment.json";

// 固定输出目录, 每次运行覆盖其中的产物
pub const REPORT_DIR: &str = "reports/newman";

pub const HTML_REPORT_FILE: &str = "report.html";
pub const JUNIT_REPORT_FILE: &str = "junit.xml";
pub const JSON_EXPORT_FILE: &str = "run.json";
pub const SUMMARY_FILE: &str = "coverage-summary.txt";

#[derive(Debug, StructOpt)]
#[structopt(name = "newman_run", about = "运行 Postman 集合并统计端点覆盖")]
pub struct Config {
    /// CI 模式: 第一个断言失败后立即停止
    #[structopt(long)]
    pub ci: bool,

    /// 只运行集合中的指定目录, 可重复指定; 不指定则运行整个集合
    #[structopt(long = "folder", number_of_values = 1)]
    pub folder: Vec<String>,
}

impl Config {
    // 参数解析为纯函数, 结果是一个不可变的运行请求
    pub fn into_request(self) -> RunRequest {
        RunRequest::new(self.ci, self.folder)
    }
}

// 一次运行的完整请求描述, 构建后不再修改
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub collection: PathBuf,
    pub environment: PathBuf,
    pub report_dir: PathBuf,
    pub bail: bool,
    pub folders: Vec<String>,
}

impl RunRequest {
    pub fn new(bail: bool, folders: Vec<String>) -> Self {
        RunRequest {
            collection: PathBuf::from(COLLECTION_PATH),
            environment: PathBuf::from(ENVIRONMENT_PATH),
            report_dir: PathBuf::from(REPORT_DIR),
            bail,
            folders,
        }
    }

    pub fn html_report_path(&self) -> PathBuf {
        self.report_dir.join(HTML_REPORT_FILE)
    }

    pub fn junit_report_path(&self) -> PathBuf {
        self.report_dir.join(JUNIT_REPORT_FILE)
    }

    pub fn json_export_path(&self) -> PathBuf {
        self.report_dir.join(JSON_EXPORT_FILE)
    }

    pub fn summary_path(&self) -> PathBuf {
        self.report_dir.join(SUMMARY_FILE)
    }

    // 创建输出目录, 已存在时不报错
    pub fn ensure_report_dir(&self) -> Result<(), RunError> {
        fs::create_dir_all(&self.report_dir)
            .map_err(|e| RunError::IOError(format!("无法创建输出目录: {}", e)))?;
        Ok(())
    }

    // 验证固定输入文件存在, 缺失时属于调用错误
    pub fn validate(&self) -> Result<(), RunError> {
        if !self.collection.exists() {
            return Err(RunError::InvalidConfig(format!(
                "集合文件不存在: {}",
                self.collection.display()
            )));
        }
        if !self.environment.exists() {
            return Err(RunError::InvalidConfig(format!(
                "环境文件不存在: {}",
                self.environment.display()
            )));
        }
        Ok(())
    }
}
