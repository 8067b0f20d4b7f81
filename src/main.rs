use anyhow::Result;
use chrono::Local;
use structopt::StructOpt;
use newman_run::function::runner::{run, NewmanCli};
use newman_run::function::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. 解析命令行参数
    let config = Config::from_args();
    let request = config.into_request();

    // 2. 调用 newman 执行集合; 调用错误直接打印到 stderr 并以 1 退出
    let runner = NewmanCli::new();
    let report = run(&runner, &request).await?;

    // 3. 显示摘要位置与覆盖结果
    println!("覆盖摘要已写入: {}", report.summary_path.display());
    println!(
        "[{}] 运行结束, 端点覆盖 {}/{}",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        report.coverage.hit_count(),
        report.coverage.total()
    );

    // 4. 运行存在失败时以非零状态退出
    if report.exit_code != 0 {
        std::process::exit(report.exit_code);
    }
    Ok(())
}
