use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::capture::{CaptureContext, Renderer, apply_captures};
use crate::check::evaluate_check;
use crate::http::{Client, Request, Response, Url};
use crate::metrics::ErrorSignal;
use crate::runner::types::{IterationReport, StepReport};
use crate::scenario::step::{ScenarioPlan, StepSpec};

/// 场景运行器：按声明顺序执行一次完整迭代
///
/// 迭代内部不存在致命错误：传输失败以合成响应继续，
/// 每个步骤向错误信号上报一个样本。
pub struct ScenarioRunner {
    client: Client,
    plan: ScenarioPlan,
    signal: Arc<dyn ErrorSignal>,
    bearer_token: Option<String>,
    /// 迭代结束后的固定停顿
    pause: Duration,
}

impl ScenarioRunner {
    pub fn new(plan: ScenarioPlan, signal: Arc<dyn ErrorSignal>) -> Self {
        Self {
            client: Client::new(),
            plan,
            signal,
            bearer_token: None,
            pause: Duration::from_secs(1),
        }
    }

    pub fn with_bearer_token(mut self, token: Option<String>) -> Self {
        self.bearer_token = token;
        self
    }

    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// 执行一次迭代
    ///
    /// 上下文由哨兵默认值和种子构建，迭代之间不共享；
    /// 步骤 N 的请求一定在步骤 N-1 的响应和捕获完成之后发出
    pub async fn run_iteration(
        &self,
        base_url: &Url,
        seed: HashMap<String, String>,
    ) -> IterationReport {
        let mut context = CaptureContext::with_defaults(self.plan.defaults.clone());
        context.extend(seed);

        let mut steps = Vec::with_capacity(self.plan.steps.len());
        for step in &self.plan.steps {
            let report = self.execute_step(base_url, step, &mut context).await;
            self.signal.record(report.passed());
            steps.push(report);
        }

        let report = IterationReport { steps };

        if !self.pause.is_zero() {
            tokio::time::sleep(self.pause).await;
        }

        report
    }

    async fn execute_step(
        &self,
        base_url: &Url,
        step: &StepSpec,
        context: &mut CaptureContext,
    ) -> StepReport {
        let path = Renderer::render(&step.path_template, context);
        let url = base_url.join(&path);

        let mut request = Request::new(step.method, &url);
        if let Some(template) = &step.body_template {
            request = request.with_json_body(&Renderer::render(template, context));
        }
        if let Some(token) = &self.bearer_token {
            request = request.with_auth_bearer(token);
        }

        let start = Instant::now();
        let (response, transport_error) = match self.client.execute(request).await {
            Ok(response) => (response, None),
            Err(e) => {
                // 传输失败不是致命错误：合成响应让所有检查照常求值
                tracing::warn!("step '{}' transport failure: {}", step.name, e);
                let message = e.to_string();
                (
                    Response::transport_error(message.clone(), start.elapsed()),
                    Some(message),
                )
            }
        };

        let checks = step
            .checks
            .iter()
            .map(|check| evaluate_check(check, &response))
            .collect();

        apply_captures(&step.captures, &response, context);

        StepReport {
            step_name: step.name.clone(),
            method: step.method.to_string(),
            url,
            status: response.status.code(),
            duration: response.duration,
            checks,
            transport_error,
        }
    }
}
