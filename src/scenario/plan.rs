use std::collections::HashMap;

use chrono::{Duration as ChronoDuration, Utc};
use once_cell::sync::Lazy;
use rand::Rng;

use crate::capture::CaptureRule;
use crate::check::{CheckKind, CheckSpec};
use crate::http::Method;
use crate::scenario::step::{ScenarioPlan, StepSpec};

/// SKU 创建失败时后续步骤使用的哨兵标识
pub const SENTINEL_SKU_ID: &str = "test-sku-id";
/// 临时冻结创建失败时转永久步骤使用的哨兵标识
pub const SENTINEL_BLOCK_ID: &str = "test-block-id";
/// 取消步骤使用的哨兵标识（从不捕获，除非调用方种入）
pub const SENTINEL_CANCEL_ID: &str = "cancel-test-id";

/// 所有步骤统一的响应时间预算（毫秒）
const LATENCY_BUDGET_MS: u64 = 500;

static SENTINELS: Lazy<HashMap<String, String>> = Lazy::new(|| {
    HashMap::from([
        ("sku_id".to_string(), SENTINEL_SKU_ID.to_string()),
        ("block_id".to_string(), SENTINEL_BLOCK_ID.to_string()),
        ("cancel_block_id".to_string(), SENTINEL_CANCEL_ID.to_string()),
    ])
});

/// 库存管理场景：建 SKU -> 临时冻结 -> 列冻结 -> 转永久 -> 取消
///
/// 步骤严格按声明顺序执行。取消步骤的 cancel_block_id 没有捕获来源，
/// 默认始终命中哨兵；要取消真实冻结需通过迭代种子注入。
pub fn inventory_plan() -> ScenarioPlan {
    let steps = vec![
        StepSpec::new("create sku", Method::Post, "/sku")
            .with_body(
                r#"{"sku_code": "{{sku_code}}", "name": "Load Test SKU {{sku_code}}", "quantity": {{quantity}}, "price": {{price}}}"#,
            )
            .with_check(CheckSpec::new(
                "create sku status is 200",
                CheckKind::StatusIs(200),
            ))
            .with_check(CheckSpec::new(
                "create sku duration < 500ms",
                CheckKind::LatencyUnder(LATENCY_BUDGET_MS),
            ))
            .with_check(CheckSpec::new(
                "has sku_id",
                CheckKind::BodyHasField("sku_id".to_string()),
            ))
            .with_check(CheckSpec::new(
                "has sku_code",
                CheckKind::BodyHasField("sku_code".to_string()),
            ))
            .with_capture(CaptureRule::new("sku_id", "sku_id")),
        StepSpec::new(
            "create temporary block",
            Method::Post,
            "/sku/{{sku_id}}/temporary-block",
        )
        .with_body(
            r#"{"quantity": {{block_quantity}}, "reason": "load test temporary block", "expires_at": "{{expires_at}}"}"#,
        )
        .with_check(CheckSpec::new(
            "temporary block status is 200",
            CheckKind::StatusIs(200),
        ))
        .with_check(CheckSpec::new(
            "temporary block duration < 500ms",
            CheckKind::LatencyUnder(LATENCY_BUDGET_MS),
        ))
        .with_check(CheckSpec::new(
            "has block_id",
            CheckKind::BodyHasField("block_id".to_string()),
        ))
        .with_check(CheckSpec::new(
            "has block status",
            CheckKind::BodyHasField("status".to_string()),
        ))
        .with_capture(CaptureRule::new("block_id", "block_id")),
        StepSpec::new("list temporary blocks", Method::Get, "/temporary-blocks")
            .with_check(CheckSpec::new(
                "list blocks status is 200",
                CheckKind::StatusIs(200),
            ))
            .with_check(CheckSpec::new(
                "list blocks duration < 500ms",
                CheckKind::LatencyUnder(LATENCY_BUDGET_MS),
            ))
            .with_check(CheckSpec::new(
                "has blocks array",
                CheckKind::BodyFieldIsArray("blocks".to_string()),
            ))
            .with_check(CheckSpec::new(
                "has total count",
                CheckKind::BodyHasField("total".to_string()),
            )),
        StepSpec::new(
            "convert block to permanent",
            Method::Post,
            "/temporary-blocks/{{block_id}}/convert-to-permanent",
        )
        .with_body(r#"{"reason": "load test convert"}"#)
        .with_check(CheckSpec::new(
            "convert status is 200",
            CheckKind::StatusIs(200),
        ))
        .with_check(CheckSpec::new(
            "convert duration < 500ms",
            CheckKind::LatencyUnder(LATENCY_BUDGET_MS),
        )),
        StepSpec::new(
            "cancel block",
            Method::Post,
            "/temporary-blocks/{{cancel_block_id}}/cancel",
        )
        .with_body(r#"{"reason": "load test cancel"}"#)
        .with_check(CheckSpec::new(
            "cancel status is 200",
            CheckKind::StatusIs(200),
        ))
        .with_check(CheckSpec::new(
            "cancel duration < 500ms",
            CheckKind::LatencyUnder(LATENCY_BUDGET_MS),
        )),
    ];

    ScenarioPlan {
        steps,
        defaults: SENTINELS.clone(),
    }
}

/// 每次迭代的动态种子值
///
/// sku_code 保证跨迭代唯一，数量和价格做随机抖动，
/// expires_at 为一小时后的 RFC 3339 时间戳
pub fn iteration_seed() -> HashMap<String, String> {
    let mut rng = rand::rng();
    let sku_code = format!("SKU-{}", uuid::Uuid::new_v4().simple());
    let expires_at = (Utc::now() + ChronoDuration::hours(1)).to_rfc3339();

    HashMap::from([
        ("sku_code".to_string(), sku_code),
        (
            "quantity".to_string(),
            rng.random_range(10..=100).to_string(),
        ),
        (
            "price".to_string(),
            format!("{:.2}", rng.random_range(1.0..100.0)),
        ),
        (
            "block_quantity".to_string(),
            rng.random_range(1..=5).to_string(),
        ),
        ("expires_at".to_string(), expires_at),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn test_plan_has_five_steps_in_order() {
        let plan = inventory_plan();
        let names: Vec<&str> = plan.steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "create sku",
                "create temporary block",
                "list temporary blocks",
                "convert block to permanent",
                "cancel block",
            ]
        );
    }

    #[test]
    fn test_first_step_has_four_checks() {
        let plan = inventory_plan();
        assert_eq!(plan.steps[0].checks.len(), 4);
    }

    #[test]
    fn test_list_step_has_no_body_and_no_captures() {
        let plan = inventory_plan();
        let list = &plan.steps[2];
        assert_eq!(list.method, Method::Get);
        assert!(list.body_template.is_none());
        assert!(list.captures.is_empty());
    }

    #[test]
    fn test_sentinel_defaults_present() {
        let plan = inventory_plan();
        assert_eq!(plan.defaults.get("sku_id").unwrap(), SENTINEL_SKU_ID);
        assert_eq!(plan.defaults.get("block_id").unwrap(), SENTINEL_BLOCK_ID);
        assert_eq!(
            plan.defaults.get("cancel_block_id").unwrap(),
            SENTINEL_CANCEL_ID
        );
    }

    #[test]
    fn test_cancel_block_id_never_captured() {
        let plan = inventory_plan();
        let captured: Vec<&str> = plan
            .steps
            .iter()
            .flat_map(|s| &s.captures)
            .map(|c| c.name.as_str())
            .collect();
        assert!(!captured.contains(&"cancel_block_id"));
    }

    #[test]
    fn test_seed_values_unique_per_iteration() {
        let a = iteration_seed();
        let b = iteration_seed();
        assert_ne!(a.get("sku_code"), b.get("sku_code"));
    }

    #[test]
    fn test_seed_expires_at_is_rfc3339_in_future() {
        let seed = iteration_seed();
        let expires = DateTime::parse_from_rfc3339(seed.get("expires_at").unwrap()).unwrap();
        assert!(expires > Utc::now());
    }

    #[test]
    fn test_seed_quantities_parse_as_numbers() {
        let seed = iteration_seed();
        assert!(seed.get("quantity").unwrap().parse::<u32>().is_ok());
        assert!(seed.get("block_quantity").unwrap().parse::<u32>().is_ok());
        assert!(seed.get("price").unwrap().parse::<f64>().is_ok());
    }
}
