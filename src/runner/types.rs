use crate::check::CheckResult;
use std::collections::HashMap;
use std::time::Duration;

/// 单个步骤的执行结果
#[derive(Debug, Clone)]
pub struct StepReport {
    /// 步骤名称
    pub step_name: String,

    /// HTTP 方法
    pub method: String,

    /// 渲染后的完整 URL
    pub url: String,

    /// 响应状态码（传输失败时为合成的 599）
    pub status: u16,

    /// 响应耗时
    pub duration: Duration,

    /// 检查结果列表
    pub checks: Vec<CheckResult>,

    /// 传输层错误消息（如果有）
    pub transport_error: Option<String>,
}

impl StepReport {
    /// 步骤聚合结果：所有检查全部通过
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }
}

/// 一次完整迭代的执行结果
#[derive(Debug, Clone)]
pub struct IterationReport {
    pub steps: Vec<StepReport>,
}

impl IterationReport {
    pub fn passed(&self) -> bool {
        self.steps.iter().all(|s| s.passed())
    }
}

/// 单个步骤跨迭代的延迟统计
#[derive(Debug, Clone)]
pub struct StepStats {
    pub name: String,
    pub requests: u64,
    pub failures: u64,
    pub min_ms: u64,
    pub avg_ms: u64,
    pub max_ms: u64,
}

/// 整次压测的摘要
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub iterations: usize,
    pub total_steps: usize,
    pub failed_steps: usize,
    pub total_checks: usize,
    pub failed_checks: usize,
    pub wall_clock: Duration,
    /// 按步骤声明顺序的统计
    pub per_step: Vec<StepStats>,
}

impl RunSummary {
    pub fn from_reports(reports: &[IterationReport], wall_clock: Duration) -> Self {
        let mut total_steps = 0;
        let mut failed_steps = 0;
        let mut total_checks = 0;
        let mut failed_checks = 0;

        // 按步骤名聚合，保持首次出现的顺序
        let mut order: Vec<String> = Vec::new();
        let mut durations: HashMap<String, Vec<u64>> = HashMap::new();
        let mut failures: HashMap<String, u64> = HashMap::new();

        for report in reports {
            for step in &report.steps {
                total_steps += 1;
                total_checks += step.checks.len();
                failed_checks += step.checks.iter().filter(|c| !c.passed).count();

                if !durations.contains_key(&step.step_name) {
                    order.push(step.step_name.clone());
                }
                durations
                    .entry(step.step_name.clone())
                    .or_default()
                    .push(step.duration.as_millis() as u64);

                if !step.passed() {
                    failed_steps += 1;
                    *failures.entry(step.step_name.clone()).or_default() += 1;
                }
            }
        }

        let per_step = order
            .into_iter()
            .map(|name| {
                let samples = &durations[&name];
                let sum: u64 = samples.iter().sum();
                StepStats {
                    requests: samples.len() as u64,
                    failures: failures.get(&name).copied().unwrap_or(0),
                    min_ms: samples.iter().copied().min().unwrap_or(0),
                    avg_ms: sum / samples.len() as u64,
                    max_ms: samples.iter().copied().max().unwrap_or(0),
                    name,
                }
            })
            .collect();

        Self {
            iterations: reports.len(),
            total_steps,
            failed_steps,
            total_checks,
            failed_checks,
            wall_clock,
            per_step,
        }
    }
}
