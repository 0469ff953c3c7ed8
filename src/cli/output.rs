use crate::error::{safe_to_json_pretty, AppResult};
use serde::Serialize;
use std::path::Path;

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Text
        }
    }
}

#[derive(Serialize)]
struct InstalledListing<'a> {
    root: String,
    current: Option<&'a str>,
    installed: &'a [String],
}

#[derive(Serialize)]
struct AvailableListing<'a> {
    source: &'a str,
    versions: &'a [String],
}

/// 输出格式化器
pub struct OutputFormatter;

impl OutputFormatter {
    /// 格式化已安装列表，`current` 为当前激活的目录名
    pub fn format_installed(
        &self,
        root: &Path,
        installed: &[String],
        current: Option<&str>,
        format: OutputFormat,
    ) -> AppResult<String> {
        match format {
            OutputFormat::Text => {
                if installed.is_empty() {
                    return Ok(format!("📭 {} 下没有已安装的 JDK\n", root.display()));
                }
                let mut output = format!("📦 已安装的 JDK ({}):\n", root.display());
                for name in installed {
                    let marker = if current == Some(name.as_str()) { "*" } else { " " };
                    output.push_str(&format!(" {} {}\n", marker, name));
                }
                Ok(output)
            }
            OutputFormat::Json => {
                let listing = InstalledListing {
                    root: root.display().to_string(),
                    current,
                    installed,
                };
                safe_to_json_pretty(&listing).map(|s| s + "\n")
            }
        }
    }

    /// 格式化可安装版本列表
    pub fn format_available(
        &self,
        source: &str,
        versions: &[String],
        format: OutputFormat,
    ) -> AppResult<String> {
        match format {
            OutputFormat::Text => {
                if versions.is_empty() {
                    return Ok(format!("📭 {} 没有可安装的版本\n", source));
                }
                let mut output = String::new();
                for version in versions {
                    output.push_str(version);
                    output.push('\n');
                }
                Ok(output)
            }
            OutputFormat::Json => {
                let listing = AvailableListing { source, versions };
                safe_to_json_pretty(&listing).map(|s| s + "\n")
            }
        }
    }
}

/// 默认输出格式化器实例
pub static FORMATTER: OutputFormatter = OutputFormatter;
