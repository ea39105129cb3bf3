use std::collections::HashMap;

/// 单次迭代的捕获上下文
///
/// 存储从前序响应提取的值，供后续步骤渲染 path/body。
/// 每次迭代开始时创建，迭代结束即丢弃，虚拟用户之间互不共享。
///
/// 每个键可以带一个哨兵默认值：捕获缺失时 get 返回默认值，
/// 渲染因此始终有确定的形状。
#[derive(Debug, Clone, Default)]
pub struct CaptureContext {
    /// 已捕获的值
    values: HashMap<String, String>,

    /// 键 -> 哨兵默认值
    defaults: HashMap<String, String>,
}

impl CaptureContext {
    /// 创建新的空上下文
    pub fn new() -> Self {
        Self::default()
    }

    /// 以哨兵默认值表创建上下文
    pub fn with_defaults(defaults: HashMap<String, String>) -> Self {
        Self {
            values: HashMap::new(),
            defaults,
        }
    }

    /// 写入捕获值
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// 读取值：先查捕获值，再回退到哨兵默认值
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .or_else(|| self.defaults.get(key))
            .map(|s| s.as_str())
    }

    /// 该键的哨兵默认值
    pub fn default_for(&self, key: &str) -> Option<&str> {
        self.defaults.get(key).map(|s| s.as_str())
    }

    /// 批量写入捕获值（用于迭代种子）
    pub fn extend(&mut self, vars: HashMap<String, String>) {
        self.values.extend(vars);
    }

    /// 捕获值数量（不含默认值）
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 是否没有任何捕获值
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
