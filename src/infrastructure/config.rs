use crate::core::constants::{env, fs as fs_consts, network};
use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 配置文件结构（conf/config.json）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// JDK 安装根目录
    #[serde(rename = "JDK_DIR")]
    pub jdk_dir: PathBuf,
    /// 指向当前 JDK bin 目录的用户环境变量名
    #[serde(rename = "JDK_ENV_NAME")]
    pub env_name: String,
    #[serde(rename = "HTTP_TIMEOUT_SECS", default = "default_http_timeout")]
    pub http_timeout_secs: u64,
    #[serde(rename = "ZULU_API_URL", default = "default_zulu_api")]
    pub zulu_api_url: String,
    #[serde(rename = "GITHUB_API_URL", default = "default_github_api")]
    pub github_api_url: String,
}

fn default_http_timeout() -> u64 {
    network::DEFAULT_HTTP_TIMEOUT_SECS
}

fn default_zulu_api() -> String {
    network::ZULU_API_URL.to_string()
}

fn default_github_api() -> String {
    network::GITHUB_API_URL.to_string()
}

impl Config {
    /// 创建默认配置
    pub fn new(jdk_dir: impl Into<PathBuf>, env_name: &str) -> Self {
        Config {
            jdk_dir: jdk_dir.into(),
            env_name: env_name.to_string(),
            http_timeout_secs: default_http_timeout(),
            zulu_api_url: default_zulu_api(),
            github_api_url: default_github_api(),
        }
    }

    /// 从文件加载配置
    pub fn load(path: &Path) -> AppResult<Self> {
        let display = path.display().to_string();
        let content =
            fs::read_to_string(path).map_err(|e| AppError::config_load_failed(&display, &e.to_string()))?;
        Self::from_json(&content).map_err(|e| match e {
            AppError::Config { .. } => e,
            other => AppError::config_load_failed(&display, &other.to_string()),
        })
    }

    pub fn from_json(content: &str) -> AppResult<Self> {
        let config: Config = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> AppResult<()> {
        if self.jdk_dir.as_os_str().is_empty() {
            return Err(AppError::Config {
                message: "JDK_DIR 不能为空".to_string(),
            });
        }
        let valid_name = !self.env_name.is_empty()
            && self
                .env_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid_name {
            return Err(AppError::Config {
                message: format!("无效的 JDK_ENV_NAME: '{}'", self.env_name),
            });
        }
        if self.http_timeout_secs == 0 {
            return Err(AppError::Config {
                message: "HTTP_TIMEOUT_SECS 必须大于 0".to_string(),
            });
        }
        Ok(())
    }
}

/// 按优先级查找配置文件
#[derive(Debug, Clone)]
pub struct ConfigLocator {
    search_dirs: Vec<PathBuf>,
}

impl ConfigLocator {
    /// 默认查找顺序：MJ_HOME → ./conf → <exe 目录>/conf → ~/.mj
    pub fn new() -> Self {
        let mut search_dirs = Vec::new();

        if let Ok(home) = std::env::var(env::HOME_VAR) {
            if !home.trim().is_empty() {
                search_dirs.push(PathBuf::from(home));
            }
        }

        if let Ok(cwd) = std::env::current_dir() {
            search_dirs.push(cwd.join(fs_consts::CONF_DIR));
        }

        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                search_dirs.push(dir.join(fs_consts::CONF_DIR));
            }
        }

        if let Some(home) = dirs::home_dir() {
            search_dirs.push(home.join(fs_consts::USER_DIR));
        }

        Self { search_dirs }
    }

    pub fn with_search_dirs(search_dirs: Vec<PathBuf>) -> Self {
        Self { search_dirs }
    }

    /// 显式路径优先，否则返回第一个存在的候选文件
    pub fn locate(&self, explicit: Option<&Path>, file_name: &str) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        self.search_dirs
            .iter()
            .map(|dir| dir.join(file_name))
            .find(|candidate| candidate.is_file())
    }

    /// 查找并加载 config.json
    pub fn load_config(&self, explicit: Option<&Path>) -> AppResult<Config> {
        let path = self
            .locate(explicit, fs_consts::CONFIG_FILE)
            .ok_or_else(|| AppError::Config {
                message: format!(
                    "未找到 {}，已查找: {}",
                    fs_consts::CONFIG_FILE,
                    self.describe_search_dirs()
                ),
            })?;
        tracing::debug!("使用配置文件 {}", path.display());
        Config::load(&path)
    }

    /// 查找 jdk_version.json，不存在时返回 `None`
    pub fn catalog_path(&self, explicit: Option<&Path>) -> Option<PathBuf> {
        self.locate(explicit, fs_consts::CATALOG_FILE)
    }

    fn describe_search_dirs(&self) -> String {
        self.search_dirs
            .iter()
            .map(|d| d.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for ConfigLocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let config =
            Config::from_json(r#"{"JDK_DIR": "D:\\jdks", "JDK_ENV_NAME": "JAVA_BIN"}"#).unwrap();
        assert_eq!(config.jdk_dir, PathBuf::from("D:\\jdks"));
        assert_eq!(config.env_name, "JAVA_BIN");
        assert_eq!(config.http_timeout_secs, network::DEFAULT_HTTP_TIMEOUT_SECS);
        assert_eq!(config.zulu_api_url, network::ZULU_API_URL);
    }

    #[test]
    fn test_missing_required_key_fails() {
        let err = Config::from_json(r#"{"JDK_DIR": "/opt/jdks"}"#).unwrap_err();
        assert!(matches!(err, AppError::Decode { .. }));
    }

    #[test]
    fn test_invalid_env_name_rejected() {
        let err = Config::from_json(r#"{"JDK_DIR": "/opt/jdks", "JDK_ENV_NAME": "JAVA%BIN"}"#)
            .unwrap_err();
        assert!(matches!(err, AppError::Config { .. }));
    }

    #[test]
    fn test_locator_prefers_first_existing_dir() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        fs::write(
            second.path().join("config.json"),
            r#"{"JDK_DIR": "/opt/jdks", "JDK_ENV_NAME": "JDK_BIN"}"#,
        )
        .unwrap();

        let locator =
            ConfigLocator::with_search_dirs(vec![first.path().to_path_buf(), second.path().to_path_buf()]);
        let config = locator.load_config(None).unwrap();
        assert_eq!(config.env_name, "JDK_BIN");

        fs::write(
            first.path().join("config.json"),
            r#"{"JDK_DIR": "/opt/other", "JDK_ENV_NAME": "OTHER_BIN"}"#,
        )
        .unwrap();
        assert_eq!(locator.load_config(None).unwrap().env_name, "OTHER_BIN");
    }

    #[test]
    fn test_explicit_path_wins_even_if_missing() {
        let dir = tempfile::tempdir().unwrap();
        let locator = ConfigLocator::with_search_dirs(vec![dir.path().to_path_buf()]);
        let explicit = dir.path().join("custom.json");

        let err = locator.load_config(Some(&explicit)).unwrap_err();
        assert!(err.to_string().contains("custom.json"));
    }

    #[test]
    fn test_missing_config_lists_search_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let locator = ConfigLocator::with_search_dirs(vec![dir.path().to_path_buf()]);
        let err = locator.load_config(None).unwrap_err();
        assert!(err.to_string().contains(&dir.path().display().to_string()));
        assert!(locator.catalog_path(None).is_none());
    }
}
