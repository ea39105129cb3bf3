use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde::Deserialize;

use crate::{Result, RuloadError};

/// 环境配置
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Environment {
    /// 设置项映射
    #[serde(flatten)]
    pub variables: HashMap<String, String>,
}

/// 完整的配置文件
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoadConfig {
    /// 所有环境配置
    #[serde(default)]
    pub environments: HashMap<String, Environment>,
}

impl LoadConfig {
    /// 获取指定环境的配置
    pub fn get_environment(&self, env_name: &str) -> Option<&Environment> {
        self.environments.get(env_name)
    }
}

/// 从配置和 CLI 覆盖合并出的运行设置
///
/// 可识别的键: base_url, bearer_token, users, iterations, duration, pause_ms
#[derive(Debug, Clone, Default)]
pub struct RunSettings {
    pub base_url: Option<String>,
    pub bearer_token: Option<String>,
    pub users: Option<usize>,
    pub iterations: Option<u64>,
    pub duration_secs: Option<u64>,
    pub pause_ms: Option<u64>,
}

impl RunSettings {
    pub fn from_map(map: &HashMap<String, String>) -> Self {
        Self {
            base_url: map.get("base_url").cloned(),
            bearer_token: map.get("bearer_token").cloned(),
            users: map.get("users").and_then(|v| v.parse().ok()),
            iterations: map.get("iterations").and_then(|v| v.parse().ok()),
            duration_secs: map.get("duration").and_then(|v| v.parse().ok()),
            pause_ms: map.get("pause_ms").and_then(|v| v.parse().ok()),
        }
    }
}

/// 配置文件加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 配置文件名
    const CONFIG_FILE: &'static str = "ruload.toml";

    /// 从指定路径加载配置文件
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<LoadConfig> {
        let content = fs::read_to_string(path.as_ref())?;

        toml::from_str(&content)
            .map_err(|e| RuloadError::ConfigError(format!("Failed to parse config file: {}", e)))
    }

    /// 查找并加载配置文件
    /// 查找顺序：
    /// 1. 当前目录及父目录
    /// 2. 用户配置目录 ~/.config/ruload/
    pub fn find_and_load() -> Option<LoadConfig> {
        if let Some(config) = Self::try_load_from_current_dir() {
            return Some(config);
        }

        if let Some(config) = Self::try_load_from_user_dir() {
            return Some(config);
        }

        None
    }

    fn try_load_from_current_dir() -> Option<LoadConfig> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            let config_path = current.join(Self::CONFIG_FILE);
            if config_path.exists() {
                return Self::load_from_path(&config_path).ok();
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    fn try_load_from_user_dir() -> Option<LoadConfig> {
        let home = dirs::home_dir()?;
        let config_path = home.join(".config").join("ruload").join(Self::CONFIG_FILE);

        if config_path.exists() {
            Self::load_from_path(&config_path).ok()
        } else {
            None
        }
    }

    /// 合并设置项
    /// env_name: 环境名称（如 "dev", "staging"）
    /// cli_vars: CLI 传入的覆盖（--var key=value），优先级最高
    pub fn build_settings(
        config: &LoadConfig,
        env_name: Option<&str>,
        cli_vars: &[(String, String)],
    ) -> HashMap<String, String> {
        let mut settings = HashMap::new();

        // 1. 从配置文件加载环境设置
        if let Some(env) = env_name.and_then(|name| config.get_environment(name)) {
            for (key, value) in &env.variables {
                // 解析系统环境变量 ${VAR}
                settings.insert(key.clone(), Self::resolve_env_vars(value));
            }
        }

        // 2. 应用 CLI 覆盖
        for (key, value) in cli_vars {
            settings.insert(key.clone(), value.clone());
        }

        settings
    }

    /// 解析并替换系统环境变量 ${VAR}
    pub fn resolve_env_vars(text: &str) -> String {
        static ENV_REGEX: OnceLock<Regex> = OnceLock::new();
        let re = ENV_REGEX.get_or_init(|| Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap());

        re.replace_all(text, |caps: &Captures| {
            let env_name = &caps[1];
            std::env::var(env_name).unwrap_or_else(|_| caps[0].to_string())
        })
        .to_string()
    }

    /// 解析 CLI 变量参数 "key=value"
    pub fn parse_cli_var(s: &str) -> Option<(String, String)> {
        s.split_once('=')
            .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_from_path() {
        let config_content = r#"
[environments.dev]
base_url = "http://localhost:8000/api"
bearer_token = "dev-token"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(config_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = ConfigLoader::load_from_path(temp_file.path()).unwrap();
        assert_eq!(config.environments.len(), 1);
        assert!(config.get_environment("dev").is_some());
    }

    #[test]
    fn test_build_settings() {
        let config_content = r#"
[environments.dev]
base_url = "http://localhost:8000/api"
users = "5"

[environments.staging]
base_url = "https://staging.example.com/api"
bearer_token = "${STAGING_TOKEN}"
"#;

        let config: LoadConfig = toml::from_str(config_content).unwrap();

        // dev 环境
        let settings = ConfigLoader::build_settings(&config, Some("dev"), &[]);
        assert_eq!(
            settings.get("base_url").map(|s| s.as_str()),
            Some("http://localhost:8000/api")
        );
        assert_eq!(settings.get("users").map(|s| s.as_str()), Some("5"));

        // CLI 覆盖
        let cli_vars = vec![("users".to_string(), "20".to_string())];
        let settings = ConfigLoader::build_settings(&config, Some("dev"), &cli_vars);
        assert_eq!(settings.get("users").map(|s| s.as_str()), Some("20"));
    }

    #[test]
    fn test_run_settings_from_map() {
        let mut map = HashMap::new();
        map.insert("base_url".to_string(), "http://localhost:8000".to_string());
        map.insert("users".to_string(), "10".to_string());
        map.insert("iterations".to_string(), "3".to_string());
        map.insert("pause_ms".to_string(), "250".to_string());

        let settings = RunSettings::from_map(&map);
        assert_eq!(settings.base_url.as_deref(), Some("http://localhost:8000"));
        assert_eq!(settings.users, Some(10));
        assert_eq!(settings.iterations, Some(3));
        assert_eq!(settings.pause_ms, Some(250));
        assert!(settings.bearer_token.is_none());
    }

    #[test]
    fn test_run_settings_ignores_unparsable_numbers() {
        let mut map = HashMap::new();
        map.insert("users".to_string(), "many".to_string());

        let settings = RunSettings::from_map(&map);
        assert!(settings.users.is_none());
    }

    #[test]
    fn test_resolve_env_vars_missing_kept() {
        let result = ConfigLoader::resolve_env_vars("Bearer ${NONEXISTENT_RULOAD_VAR}");
        assert_eq!(result, "Bearer ${NONEXISTENT_RULOAD_VAR}");
    }

    #[test]
    fn test_parse_cli_var() {
        assert_eq!(
            ConfigLoader::parse_cli_var("users=10"),
            Some(("users".to_string(), "10".to_string()))
        );

        assert_eq!(
            ConfigLoader::parse_cli_var("base_url=http://localhost:8000"),
            Some(("base_url".to_string(), "http://localhost:8000".to_string()))
        );

        assert_eq!(ConfigLoader::parse_cli_var("invalid"), None);
    }
}
