use crate::http::types::Status;
use reqwest::header::HeaderMap as Headers;
use std::time::Duration;

pub struct Response {
    pub status: Status,
    pub headers: Headers,
    pub body: String,
    pub duration: Duration,
}

impl Response {
    pub fn new(status: Status, headers: Headers, body: String, duration: Duration) -> Self {
        Self {
            status,
            headers,
            body,
            duration,
        }
    }

    /// 传输层失败时的合成响应，状态固定为 599
    ///
    /// body 为错误消息（非 JSON），字段类检查对其求值一律为 false
    pub fn transport_error(message: String, duration: Duration) -> Self {
        Self {
            status: Status::new(599).unwrap(),
            headers: Headers::new(),
            body: message,
            duration,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// 尝试将 body 解析为 JSON
    ///
    /// 非 JSON body 返回 None，调用方统一按"值缺失"处理
    pub fn json(&self) -> Option<serde_json::Value> {
        serde_json::from_str(&self.body).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with_body(body: &str) -> Response {
        Response::new(
            Status::new(200).unwrap(),
            Headers::new(),
            body.to_string(),
            Duration::from_millis(100),
        )
    }

    #[test]
    fn test_json_valid_body() {
        let response = response_with_body(r#"{"sku_id": "abc123"}"#);
        let value = response.json().unwrap();
        assert_eq!(value["sku_id"], "abc123");
    }

    #[test]
    fn test_json_invalid_body_returns_none() {
        let response = response_with_body("not json");
        assert!(response.json().is_none());
    }

    #[test]
    fn test_json_empty_body_returns_none() {
        let response = response_with_body("");
        assert!(response.json().is_none());
    }

    #[test]
    fn test_transport_error_is_not_success() {
        let response =
            Response::transport_error("connection refused".to_string(), Duration::ZERO);
        assert!(!response.is_success());
        assert_eq!(response.status.code(), 599);
        assert!(response.json().is_none());
    }
}
