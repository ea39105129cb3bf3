use std::fmt;

/// 检查类型
///
/// 每个检查都是对 {status, latency, body} 的纯谓词
#[derive(Debug, Clone, PartialEq)]
pub enum CheckKind {
    /// 状态码等于期望值
    StatusIs(u16),

    /// 响应时间低于阈值（毫秒）
    LatencyUnder(u64),

    /// JSON body 顶层存在指定字段
    BodyHasField(String),

    /// JSON body 顶层字段存在且为数组
    BodyFieldIsArray(String),
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckKind::StatusIs(code) => write!(f, "status == {}", code),
            CheckKind::LatencyUnder(ms) => write!(f, "response.time < {}", ms),
            CheckKind::BodyHasField(field) => write!(f, "body.{} exists", field),
            CheckKind::BodyFieldIsArray(field) => write!(f, "body.{} is array", field),
        }
    }
}

/// 具名检查
#[derive(Debug, Clone, PartialEq)]
pub struct CheckSpec {
    /// 检查名称，出现在报告和详细输出中
    pub name: String,

    pub kind: CheckKind,
}

impl CheckSpec {
    pub fn new(name: impl Into<String>, kind: CheckKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// 单个检查的求值结果
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// 检查名称
    pub name: String,

    /// 是否通过
    pub passed: bool,

    /// 失败说明（通过时为 None）
    pub detail: Option<String>,
}

impl CheckResult {
    pub fn pass(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            detail: None,
        }
    }

    pub fn fail(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            detail: Some(detail.into()),
        }
    }
}
