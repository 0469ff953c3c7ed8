use std::io;
use thiserror::Error;

/// 应用程序错误类型
#[derive(Error, Debug)]
pub enum AppError {
    #[error("不支持的 JDK 版本: {version}")]
    UnsupportedVersion { version: String },

    #[error("网络错误: {message}")]
    Network { message: String },

    #[error("响应解析错误: {message}")]
    Decode { message: String },

    #[error("IO 错误: {0}")]
    Io(#[from] io::Error),

    #[error("文件系统错误: {path} - {reason}")]
    Filesystem { path: String, reason: String },

    #[error("解压失败: {archive} - {reason}")]
    Extraction { archive: String, reason: String },

    #[error("配置错误: {message}")]
    Config { message: String },

    #[error("环境变量设置失败: {message}")]
    Activation { message: String },

    #[error("未找到请求的资源: {resource}")]
    NotFound { resource: String },
}

/// 用于提供错误上下文和用户友好建议
#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub operation: String,
    pub suggestions: Vec<String>,
}

impl AppError {
    /// 为错误添加上下文信息
    pub fn with_context(self, operation: &str) -> ContextualError {
        let suggestions = self.default_suggestions();
        ContextualError {
            error: self,
            context: ErrorContext {
                operation: operation.to_string(),
                suggestions,
            },
        }
    }

    /// 按错误类别给出的默认建议
    fn default_suggestions(&self) -> Vec<String> {
        match self {
            AppError::UnsupportedVersion { .. } => vec![
                "运行 `mj available common` 查看本地目录中的版本".to_string(),
                "GitHub 发行版请使用 gh-<vendor>-<tag> 格式, 例如 gh-graalvm-jdk-17".to_string(),
            ],
            AppError::Network { .. } | AppError::Decode { .. } => {
                vec!["检查网络连接或代理设置后重试".to_string()]
            }
            AppError::Config { .. } => vec![
                "确认 conf/config.json 存在且包含 JDK_DIR 和 JDK_ENV_NAME".to_string(),
                "也可以通过 --config 或 MJ_HOME 指定配置位置".to_string(),
            ],
            AppError::NotFound { .. } => {
                vec!["运行 `mj ls` 查看已安装的版本".to_string()]
            }
            _ => Vec::new(),
        }
    }
}

/// 带有上下文的错误
#[derive(Error, Debug)]
pub struct ContextualError {
    #[source]
    pub error: AppError,
    pub context: ErrorContext,
}

impl std::fmt::Display for ContextualError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "操作失败: {}\n错误: {}", self.context.operation, self.error)
    }
}

impl ContextualError {
    /// 获取用户友好的错误消息
    pub fn user_message(&self) -> String {
        let mut msg = format!("❌ {}\n", self.context.operation);
        msg.push_str(&format!("原因: {}\n", self.error));

        if !self.context.suggestions.is_empty() {
            msg.push_str("💡 建议:\n");
            for suggestion in &self.context.suggestions {
                msg.push_str(&format!("  • {}\n", suggestion));
            }
        }

        msg
    }
}

/// 应用程序 Result 类型
pub type AppResult<T> = Result<T, AppError>;
pub type ContextualResult<T> = Result<T, ContextualError>;

/// 便捷的错误创建函数
impl AppError {
    pub fn unsupported_version(version: &str) -> Self {
        Self::UnsupportedVersion {
            version: version.to_string(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn config_load_failed(path: &str, reason: &str) -> Self {
        Self::Config {
            message: format!("无法加载配置文件 {}: {}", path, reason),
        }
    }

    pub fn filesystem(path: &std::path::Path, reason: impl std::fmt::Display) -> Self {
        Self::Filesystem {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn extraction(archive: &std::path::Path, reason: impl std::fmt::Display) -> Self {
        Self::Extraction {
            archive: archive.display().to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn version_not_installed(name: &str) -> Self {
        Self::NotFound {
            resource: format!("JDK {}", name),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::Decode {
            message: error.to_string(),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::Decode {
                message: error.to_string(),
            }
        } else {
            Self::Network {
                message: error.to_string(),
            }
        }
    }
}

impl From<AppError> for ContextualError {
    fn from(error: AppError) -> Self {
        error.with_context("未知操作")
    }
}
