//错误处理板块
use thiserror::Error;
use std::io;

#[derive(Error, Debug)]
pub enum RunError {
    #[error("配置错误: {0}")]
    InvalidConfig(String),

    #[error("无法启动 newman: {0}")]
    Spawn(String),

    #[error("newman 调用失败: {0}")]
    Invocation(String),

    #[error("文件操作错误: {0}")]
    IOError(String),

    #[error("解析运行结果失败: {0}")]
    ParseError(String),

    #[error("摘要生成错误: {0}")]
    ReportError(String),
}

impl From<io::Error> for RunError {
    fn from(err: io::Error) -> Self {
        RunError::IOError(err.to_string())
    }
}

impl From<serde_json::Error> for RunError {
    fn from(err: serde_json::Error) -> Self {
        RunError::ParseError(err.to_string())
    }
}
