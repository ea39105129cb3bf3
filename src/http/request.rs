use reqwest::{
    Body,
    header::{HeaderMap as Headers, HeaderName, HeaderValue},
};

use crate::http::types::Method;

pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: Headers,
    pub body: Option<Body>,
}

impl Request {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Headers::new(),
            body: None,
        }
    }

    fn insert_header(&mut self, key: &str, value: &str) {
        // 头部名称和值均来自固定代码路径，解析失败直接忽略该头部
        if let (Ok(name), Ok(val)) = (key.parse::<HeaderName>(), value.parse::<HeaderValue>()) {
            self.headers.insert(name, val);
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.insert_header(key, value);
        self
    }

    /// 设置 JSON 请求体（body 已是渲染后的 JSON 文本）
    pub fn with_json_body(mut self, json: &str) -> Self {
        self.insert_header("Content-Type", "application/json");
        self.body = Some(Body::from(json.to_owned()));
        self
    }

    pub fn with_auth_bearer(mut self, token: &str) -> Self {
        self.insert_header("Authorization", &format!("Bearer {}", token));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_body_sets_content_type() {
        let req = Request::new(Method::Post, "http://localhost:8000/sku")
            .with_json_body(r#"{"sku_code": "SKU-1"}"#);
        assert_eq!(
            req.headers.get("Content-Type").unwrap(),
            "application/json"
        );
        assert!(req.body.is_some());
    }

    #[test]
    fn test_auth_bearer_header() {
        let req = Request::new(Method::Get, "http://localhost:8000/temporary-blocks")
            .with_auth_bearer("secret");
        assert_eq!(
            req.headers.get("Authorization").unwrap(),
            "Bearer secret"
        );
    }
}
