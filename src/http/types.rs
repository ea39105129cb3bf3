use std::fmt;
use std::str::FromStr;

use crate::{Result, RuloadError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl FromStr for Method {
    type Err = RuloadError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            "PATCH" => Ok(Method::Patch),
            _ => Err(RuloadError::ParseError(format!(
                "Invalid HTTP method: {}",
                s
            ))),
        }
    }
}

impl Method {
    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 压测目标的基础 URL
#[derive(Debug, Clone)]
pub struct Url {
    pub scheme: String,
    pub host: String,
    pub port: u16,
    pub path: String,
}

impl Url {
    /// 默认 host，当 URL 中未指定 host 时使用
    const DEFAULT_HOST: &'static str = "localhost";
    /// 默认 scheme，当 URL 中未指定 scheme 时使用
    const DEFAULT_SCHEME: &'static str = "http";

    pub fn parse(s: &str) -> Result<Self> {
        let input = s.trim();

        // 处理各种简化格式:
        // 1. ":8000" -> "http://localhost:8000"
        // 2. "localhost:8000" -> "http://localhost:8000"
        let normalized = if input.starts_with(':') {
            // 纯端口号格式: ":8000"
            format!("{}://{}{}", Self::DEFAULT_SCHEME, Self::DEFAULT_HOST, input)
        } else if !input.contains("://") {
            // 无协议格式: "localhost:8000" 或 "example.com/api"
            format!("{}://{}", Self::DEFAULT_SCHEME, input)
        } else {
            input.to_string()
        };

        let url = url::Url::parse(&normalized)?;

        let default_port = match url.scheme() {
            "https" => 443,
            _ => 80,
        };

        Ok(Url {
            scheme: url.scheme().to_string(),
            host: url
                .host()
                .map(|h| h.to_string())
                .unwrap_or_else(|| Self::DEFAULT_HOST.to_string()),
            port: url.port().unwrap_or(default_port),
            path: url.path().trim_end_matches('/').to_string(),
        })
    }

    /// 拼接基础 URL 和场景步骤的 path，path 必须以 '/' 开头
    pub fn join(&self, path: &str) -> String {
        format!("{}{}", self, path)
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}:{}{}", self.scheme, self.host, self.port, self.path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status(u16);

impl Status {
    pub fn new(code: u16) -> Result<Self> {
        if (100..600).contains(&code) {
            Ok(Self(code))
        } else {
            Err(RuloadError::ParseError(format!(
                "Invalid HTTP status code: {}",
                code
            )))
        }
    }

    pub fn code(&self) -> u16 {
        self.0
    }

    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.0)
    }

    pub fn is_client_error(&self) -> bool {
        (400..=499).contains(&self.0)
    }

    pub fn is_server_error(&self) -> bool {
        (500..=599).contains(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_url() {
        let url = Url::parse("https://inventory.example.com:8443/api").unwrap();
        assert_eq!(url.scheme, "https");
        assert_eq!(url.host, "inventory.example.com");
        assert_eq!(url.port, 8443);
        assert_eq!(url.path, "/api");
    }

    #[test]
    fn test_parse_url_without_port_https() {
        let url = Url::parse("https://example.com").unwrap();
        assert_eq!(url.scheme, "https");
        assert_eq!(url.port, 443);
    }

    #[test]
    fn test_parse_localhost_with_port() {
        let url = Url::parse("localhost:8000").unwrap();
        assert_eq!(url.scheme, "http");
        assert_eq!(url.host, "localhost");
        assert_eq!(url.port, 8000);
        assert_eq!(url.path, "");
    }

    #[test]
    fn test_parse_port_only() {
        let url = Url::parse(":8000").unwrap();
        assert_eq!(url.scheme, "http");
        assert_eq!(url.host, "localhost");
        assert_eq!(url.port, 8000);
    }

    #[test]
    fn test_join_step_path() {
        let url = Url::parse("localhost:8000/api").unwrap();
        assert_eq!(url.join("/sku"), "http://localhost:8000/api/sku");
    }

    #[test]
    fn test_join_without_base_path() {
        let url = Url::parse(":8000").unwrap();
        assert_eq!(
            url.join("/temporary-blocks"),
            "http://localhost:8000/temporary-blocks"
        );
    }

    #[test]
    fn test_parse_url_with_whitespace() {
        let url = Url::parse("  http://example.com/api  ").unwrap();
        assert_eq!(url.host, "example.com");
        assert_eq!(url.path, "/api");
    }

    #[test]
    fn test_status_ranges() {
        assert!(Status::new(200).unwrap().is_success());
        assert!(Status::new(404).unwrap().is_client_error());
        assert!(Status::new(503).unwrap().is_server_error());
        assert!(Status::new(999).is_err());
    }

    #[test]
    fn test_method_parse() {
        assert_eq!("post".parse::<Method>().unwrap(), Method::Post);
        assert_eq!("GET".parse::<Method>().unwrap(), Method::Get);
        assert!("TRACE".parse::<Method>().is_err());
    }
}
