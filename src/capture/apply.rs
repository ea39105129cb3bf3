use crate::capture::context::CaptureContext;
use crate::http::Response;

/// 捕获规则：把响应 body 顶层字段 field 写入上下文键 name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRule {
    /// 上下文键名
    pub name: String,

    /// body 顶层字段名
    pub field: String,
}

impl CaptureRule {
    pub fn new(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
        }
    }
}

/// 对一个响应应用全部捕获规则
///
/// body 非 JSON 或字段缺失时写入该键的哨兵默认值而不是跳过，
/// 后续渲染因此总能拿到确定的值
pub fn apply_captures(rules: &[CaptureRule], response: &Response, context: &mut CaptureContext) {
    let json = response.json();

    for rule in rules {
        let extracted = json
            .as_ref()
            .and_then(|value| value.get(&rule.field))
            .and_then(json_value_to_string);

        match extracted {
            Some(value) => context.set(rule.name.clone(), value),
            None => {
                if let Some(sentinel) = context.default_for(&rule.name).map(|s| s.to_string()) {
                    tracing::debug!(
                        "capture '{}' missing from response, using sentinel '{}'",
                        rule.name,
                        sentinel
                    );
                    context.set(rule.name.clone(), sentinel);
                }
            }
        }
    }
}

/// 把 JSON 标量转为字符串；数组和对象不可用作路径片段
fn json_value_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        serde_json::Value::Null
        | serde_json::Value::Array(_)
        | serde_json::Value::Object(_) => None,
    }
}
