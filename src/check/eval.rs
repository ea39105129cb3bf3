use crate::check::types::{CheckKind, CheckResult, CheckSpec};
use crate::http::Response;

/// 对单个响应求值一个检查
///
/// 求值永不失败：body 非 JSON 或字段缺失时结果为 false，而不是错误
pub fn evaluate_check(spec: &CheckSpec, response: &Response) -> CheckResult {
    match &spec.kind {
        CheckKind::StatusIs(expected) => {
            let actual = response.status.code();
            if actual == *expected {
                CheckResult::pass(&spec.name)
            } else {
                CheckResult::fail(
                    &spec.name,
                    format!("expected status {}, got {}", expected, actual),
                )
            }
        }

        CheckKind::LatencyUnder(threshold_ms) => {
            let actual = response.duration.as_millis() as u64;
            if actual < *threshold_ms {
                CheckResult::pass(&spec.name)
            } else {
                CheckResult::fail(
                    &spec.name,
                    format!("expected < {}ms, got {}ms", threshold_ms, actual),
                )
            }
        }

        CheckKind::BodyHasField(field) => match response.json() {
            Some(value) if value.get(field).is_some() => CheckResult::pass(&spec.name),
            Some(_) => CheckResult::fail(&spec.name, format!("field '{}' not found", field)),
            None => CheckResult::fail(&spec.name, "body is not valid JSON"),
        },

        CheckKind::BodyFieldIsArray(field) => match response.json() {
            Some(value) => match value.get(field) {
                Some(v) if v.is_array() => CheckResult::pass(&spec.name),
                Some(_) => {
                    CheckResult::fail(&spec.name, format!("field '{}' is not an array", field))
                }
                None => CheckResult::fail(&spec.name, format!("field '{}' not found", field)),
            },
            None => CheckResult::fail(&spec.name, "body is not valid JSON"),
        },
    }
}
