// coverage.rs
use regex::Regex;
use std::collections::BTreeSet;
use super::report::Execution;

// 一个逻辑端点: HTTP 方法 + 路径模式
#[derive(Debug)]
pub struct EndpointDescriptor {
    pub method: &'static str,
    pub pattern: Regex,
}

impl EndpointDescriptor {
    fn new(method: &'static str, pattern: &str) -> Self {
        // 模式是编译期常量, 这里失败说明代码本身写错
        EndpointDescriptor {
            method,
            pattern: Regex::new(pattern).expect("端点模式不合法"),
        }
    }

    pub fn matches(&self, method: &str, path: &str) -> bool {
        self.method.eq_ignore_ascii_case(method) && self.pattern.is_match(path)
    }
}

// 被测 API 的固定端点清单, 启动时构建后只读
#[derive(Debug)]
pub struct EndpointCatalog {
    endpoints: Vec<EndpointDescriptor>,
}

impl EndpointCatalog {
    // Fake REST API Users 的五个端点: 列表/创建/按ID查询/按ID更新/按ID删除
    pub fn fake_rest_users() -> Self {
        EndpointCatalog {
            endpoints: vec![
                EndpointDescriptor::new("GET", r"(?i)^/api/v1/users/?$"),
                EndpointDescriptor::new("POST", r"(?i)^/api/v1/users/?$"),
                EndpointDescriptor::new("GET", r"(?i)^/api/v1/users/\d+$"),
                EndpointDescriptor::new("PUT", r"(?i)^/api/v1/users/\d+$"),
                EndpointDescriptor::new("DELETE", r"(?i)^/api/v1/users/\d+$"),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    // 归并执行记录: 每条记录对照每个端点, 命中的端点下标进集合,
    // 同一端点重复命中不再计数
    pub fn reduce(&self, executions: &[Execution]) -> CoverageResult {
        let mut hit = BTreeSet::new();
        for execution in executions {
            let path = execution.request.resolved_path();
            for (index, endpoint) in self.endpoints.iter().enumerate() {
                if endpoint.matches(&execution.request.method, &path) {
                    hit.insert(index);
                }
            }
        }
        CoverageResult {
            hit,
            total: self.endpoints.len(),
        }
    }
}

// 覆盖结果: 至少被一条记录命中的端点下标集合
#[derive(Debug, Clone)]
pub struct CoverageResult {
    hit: BTreeSet<usize>,
    total: usize,
}

impl CoverageResult {
    pub fn hit_count(&self) -> usize {
        self.hit.len()
    }

    pub fn total(&self) -> usize {
        self.total
    }
}
