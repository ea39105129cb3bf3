use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::http::Url;
use crate::runner::iteration::ScenarioRunner;
use crate::runner::types::IterationReport;
use crate::scenario::plan::iteration_seed;

/// 虚拟用户调度选项
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// 并发虚拟用户数
    pub users: usize,

    /// 每个虚拟用户的迭代次数
    pub iterations: Option<u64>,

    /// 压测时长上限
    pub duration: Option<Duration>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            users: 1,
            iterations: Some(1),
            duration: None,
        }
    }
}

/// 以固定数量的虚拟用户执行压测
///
/// 每个虚拟用户是独立的 tokio 任务，循环执行迭代直到
/// 达到迭代次数或超过时长上限；上下文互不共享，
/// 错误信号由运行器内部统一上报。
pub async fn run_load(
    runner: Arc<ScenarioRunner>,
    base_url: Url,
    options: LoadOptions,
) -> Vec<IterationReport> {
    // 两个上限都未给出时只跑一轮
    let iterations = match (options.iterations, options.duration) {
        (None, None) => Some(1),
        (iterations, _) => iterations,
    };
    let deadline = options.duration.map(|d| Instant::now() + d);

    tracing::info!(
        "Starting load run: {} virtual user(s), iterations={:?}, duration={:?}",
        options.users,
        iterations,
        options.duration
    );

    let mut handles = Vec::with_capacity(options.users);
    for user in 0..options.users {
        let runner = runner.clone();
        let base_url = base_url.clone();

        handles.push(tokio::spawn(async move {
            let mut reports = Vec::new();
            let mut count = 0u64;

            loop {
                if let Some(limit) = iterations {
                    if count >= limit {
                        break;
                    }
                }
                if let Some(deadline) = deadline {
                    if Instant::now() >= deadline {
                        break;
                    }
                }

                let report = runner.run_iteration(&base_url, iteration_seed()).await;
                count += 1;

                if !report.passed() {
                    tracing::debug!("user {} iteration {} had failed checks", user, count);
                }
                reports.push(report);
            }

            tracing::info!("user {} finished after {} iteration(s)", user, count);
            reports
        }));
    }

    let mut all_reports = Vec::new();
    for handle in handles {
        match handle.await {
            Ok(reports) => all_reports.extend(reports),
            Err(e) => tracing::error!("virtual user task panicked: {}", e),
        }
    }

    all_reports
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_single_shot() {
        let options = LoadOptions::default();
        assert_eq!(options.users, 1);
        assert_eq!(options.iterations, Some(1));
        assert!(options.duration.is_none());
    }
}
