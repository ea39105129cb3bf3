use std::collections::HashMap;

use crate::capture::CaptureRule;
use crate::check::CheckSpec;
use crate::http::Method;

/// 场景中的一个请求步骤
///
/// path/body 模板中的 {{name}} 占位符在执行时由捕获上下文渲染
#[derive(Debug, Clone)]
pub struct StepSpec {
    /// 步骤名称
    pub name: String,

    /// HTTP 方法
    pub method: Method,

    /// 相对于 base_url 的路径模板
    pub path_template: String,

    /// JSON body 模板（GET 步骤为 None）
    pub body_template: Option<String>,

    /// 该步骤的检查集合
    pub checks: Vec<CheckSpec>,

    /// 从响应提取值的规则
    pub captures: Vec<CaptureRule>,
}

impl StepSpec {
    pub fn new(name: impl Into<String>, method: Method, path_template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method,
            path_template: path_template.into(),
            body_template: None,
            checks: Vec::new(),
            captures: Vec::new(),
        }
    }

    pub fn with_body(mut self, template: impl Into<String>) -> Self {
        self.body_template = Some(template.into());
        self
    }

    pub fn with_check(mut self, check: CheckSpec) -> Self {
        self.checks.push(check);
        self
    }

    pub fn with_capture(mut self, rule: CaptureRule) -> Self {
        self.captures.push(rule);
        self
    }
}

/// 完整场景：有序步骤 + 哨兵默认值表
#[derive(Debug, Clone)]
pub struct ScenarioPlan {
    /// 按声明顺序执行的步骤
    pub steps: Vec<StepSpec>,

    /// 捕获上下文的哨兵默认值
    pub defaults: HashMap<String, String>,
}

impl ScenarioPlan {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
