// report.rs
use serde::Deserialize;
use std::fs;
use std::path::Path;
use super::RunError;
use super::coverage::CoverageResult;

pub const SUMMARY_TITLE: &str = "Fake REST API - Users (Newman)";

// newman JSON 导出的顶层结构, 其余字段忽略
#[derive(Debug, Clone, Deserialize)]
pub struct NewmanExport {
    pub run: RunOutcome,
}

// 一次运行的结果: 聚合计数 + 执行记录 + 失败列表
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunOutcome {
    #[serde(default)]
    pub stats: RunStats,
    #[serde(default)]
    pub executions: Vec<Execution>,
    #[serde(default)]
    pub failures: Vec<serde_json::Value>,
}

impl RunOutcome {
    // 运行完成但存在失败时进程需以非零状态退出
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
            || self.stats.requests.failed > 0
            || self.stats.tests.failed > 0
            || self.stats.assertions.failed > 0
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RunStats {
    #[serde(default)]
    pub requests: StatEntry,
    #[serde(default)]
    pub tests: StatEntry,
    #[serde(default)]
    pub assertions: StatEntry,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct StatEntry {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub failed: u64,
}

// 实际发出的一次请求, 由 newman 报告
#[derive(Debug, Clone, Deserialize)]
pub struct Execution {
    pub request: ExecutedRequest,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExecutedRequest {
    pub method: String,
    #[serde(default)]
    pub url: ExecutedUrl,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExecutedUrl {
    #[serde(default)]
    pub path: Vec<String>,
}

impl ExecutedRequest {
    // newman 导出的路径是已解析的分段数组
    pub fn resolved_path(&self) -> String {
        format!("/{}", self.url.path.join("/"))
    }
}

// 渲染固定七行摘要, 末尾带换行
pub fn render_summary(folders: &[String], stats: &RunStats, coverage: &CoverageResult) -> String {
    let folders_label = if folders.is_empty() {
        "all".to_string()
    } else {
        folders.join(", ")
    };

    // 失败数大于总数时这里会显示负值, 不做截断
    let scenarios_total = stats.assertions.total as i64;
    let scenarios_passed = stats.assertions.total as i64 - stats.assertions.failed as i64;

    format!(
        "{title}\n\
         ================================\n\
         Folders:      {folders}\n\
         Requests:     {req_total} total, {req_failed} failed\n\
         Tests:        {test_total} total, {test_failed} failed\n\
         Assertions:   {asrt_total} total, {asrt_failed} failed\n\
         Endpoints:    {hit}/{ep_total} hit\n\
         Scenarios:    {passed}/{sc_total} passed\n",
        title = SUMMARY_TITLE,
        folders = folders_label,
        req_total = stats.requests.total,
        req_failed = stats.requests.failed,
        test_total = stats.tests.total,
        test_failed = stats.tests.failed,
        asrt_total = stats.assertions.total,
        asrt_failed = stats.assertions.failed,
        hit = coverage.hit_count(),
        ep_total = coverage.total(),
        passed = scenarios_passed,
        sc_total = scenarios_total,
    )
}

// 写入摘要文件, 覆盖旧内容
pub fn write_summary(path: &Path, content: &str) -> Result<(), RunError> {
    fs::write(path, content)
        .map_err(|e| RunError::ReportError(format!("写入摘要文件失败: {}", e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::coverage::EndpointCatalog;

    fn stats(
        requests: (u64, u64),
        tests: (u64, u64),
        assertions: (u64, u64),
    ) -> RunStats {
        RunStats {
            requests: StatEntry { total: requests.0, failed: requests.1 },
            tests: StatEntry { total: tests.0, failed: tests.1 },
            assertions: StatEntry { total: assertions.0, failed: assertions.1 },
        }
    }

    fn empty_coverage() -> CoverageResult {
        EndpointCatalog::fake_rest_users().reduce(&[])
    }

    #[test]
    fn summary_without_folders_reads_all() {
        let summary = render_summary(&[], &stats((0, 0), (0, 0), (0, 0)), &empty_coverage());
        assert!(summary.contains("Folders:      all\n"));
    }

    #[test]
    fn summary_joins_folders_in_order() {
        let folders = vec!["A".to_string(), "B".to_string()];
        let summary = render_summary(&folders, &stats((0, 0), (0, 0), (0, 0)), &empty_coverage());
        assert!(summary.contains("Folders:      A, B\n"));
    }

    #[test]
    fn scenarios_derive_from_assertion_counts() {
        let summary = render_summary(&[], &stats((5, 0), (5, 0), (10, 2)), &empty_coverage());
        assert!(summary.contains("Assertions:   10 total, 2 failed\n"));
        assert!(summary.contains("Scenarios:    8/10 passed\n"));
    }

    #[test]
    fn negative_scenarios_are_surfaced_not_clamped() {
        let summary = render_summary(&[], &stats((0, 0), (0, 0), (1, 3)), &empty_coverage());
        assert!(summary.contains("Scenarios:    -2/1 passed\n"));
    }

    #[test]
    fn summary_matches_fixed_schema_with_trailing_newline() {
        let summary = render_summary(&[], &stats((5, 1), (5, 0), (10, 2)), &empty_coverage());
        assert!(summary.ends_with('\n'));
        assert_eq!(summary.lines().count(), 8);
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines[0], SUMMARY_TITLE);
        assert_eq!(lines[1], "================================");
        assert_eq!(lines[3], "Requests:     5 total, 1 failed");
    }

    #[test]
    fn parses_newman_export() {
        let raw = r#"{
            "collection": {"info": {"name": "Fake REST API - Users"}},
            "run": {
                "stats": {
                    "iterations": {"total": 1, "pending": 0, "failed": 0},
                    "requests": {"total": 5, "pending": 0, "failed": 1},
                    "tests": {"total": 5, "pending": 0, "failed": 0},
                    "assertions": {"total": 10, "pending": 0, "failed": 2}
                },
                "executions": [
                    {
                        "item": {"name": "List users"},
                        "request": {
                            "method": "GET",
                            "url": {
                                "protocol": "https",
                                "host": ["fakerestapi", "azurewebsites", "net"],
                                "path": ["api", "v1", "Users"]
                            }
                        }
                    }
                ],
                "failures": [{"error": {"name": "AssertionError"}}]
            }
        }"#;
        let export: NewmanExport = serde_json::from_str(raw).unwrap();
        let run = export.run;
        assert_eq!(run.stats.requests.total, 5);
        assert_eq!(run.stats.assertions.failed, 2);
        assert_eq!(run.executions.len(), 1);
        assert_eq!(run.executions[0].request.method, "GET");
        assert_eq!(run.executions[0].request.resolved_path(), "/api/v1/Users");
        assert!(run.has_failures());
    }

    #[test]
    fn failures_detected_from_stats_alone() {
        let run = RunOutcome {
            stats: stats((5, 0), (5, 0), (10, 1)),
            executions: vec![],
            failures: vec![],
        };
        assert!(run.has_failures());

        let clean = RunOutcome {
            stats: stats((5, 0), (5, 0), (10, 0)),
            executions: vec![],
            failures: vec![],
        };
        assert!(!clean.has_failures());
    }
}
