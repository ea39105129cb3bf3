use crate::capture::context::CaptureContext;
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// 模板渲染器
pub struct Renderer;

impl Renderer {
    /// 替换文本中的所有 {{variable}} 占位符
    ///
    /// 查找顺序：捕获值 -> 哨兵默认值 -> 保持原样
    pub fn render(text: &str, context: &CaptureContext) -> String {
        static VAR_REGEX: OnceLock<Regex> = OnceLock::new();
        let re = VAR_REGEX.get_or_init(|| Regex::new(r"\{\{([a-zA-Z_][a-zA-Z0-9_]*)\}\}").unwrap());

        re.replace_all(text, |caps: &Captures| {
            let var_name = &caps[1];
            context.get(var_name).unwrap_or(&caps[0]).to_string()
        })
        .to_string()
    }
}
