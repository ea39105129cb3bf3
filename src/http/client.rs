use std::time::Duration;

use crate::Result;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::types::{Method, Status};

#[derive(Clone)]
pub struct Client {
    inner: reqwest::Client,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(30))
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            inner: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    pub async fn execute(&self, request: Request) -> Result<Response> {
        let url = reqwest::Url::parse(&request.url)?;
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
            Method::Patch => reqwest::Method::PATCH,
        };
        let mut req = self.inner.request(method, url).headers(request.headers);

        if let Some(body) = request.body {
            req = req.body(body);
        }

        let start = std::time::Instant::now();
        let response = req.send().await?;

        let status = Status::new(response.status().as_u16())?;
        let headers = response.headers().clone();
        // 读完整个 body 之后才算一次请求结束
        let body = response.text().await?;
        let duration = start.elapsed();

        Ok(Response::new(status, headers, body, duration))
    }
}
