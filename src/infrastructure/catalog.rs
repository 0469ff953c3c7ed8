use crate::core::constants::identifier::SEPARATOR;
use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 单个版本的下载信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JdkVersion {
    pub version: String,
    #[serde(rename = "download")]
    pub download_url: String,
}

/// 目录文件中的一个厂商
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JdkType {
    #[serde(rename = "JdkType")]
    pub jdk_type: String,
    #[serde(default)]
    pub versions: Vec<JdkVersion>,
}

/// 展平后的 (厂商, 版本, 下载地址)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub vendor: String,
    pub version: String,
    pub download_url: String,
}

impl CatalogEntry {
    /// `available common` 中展示的可安装标识
    pub fn identifier(&self) -> String {
        format!("{}{}{}", self.vendor, SEPARATOR, self.version)
    }
}

/// 本地静态版本目录，启动时加载一次，之后只读
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// 从 JSON 文件加载
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::config_load_failed(&path.display().to_string(), &e.to_string())
        })?;
        Self::from_json(&content).map_err(|e| {
            AppError::config_load_failed(&path.display().to_string(), &e.to_string())
        })
    }

    pub fn from_json(content: &str) -> AppResult<Self> {
        let types: Vec<JdkType> = serde_json::from_str(content)?;
        Ok(Self::from_types(types))
    }

    pub fn from_types(types: Vec<JdkType>) -> Self {
        let entries = types
            .into_iter()
            .flat_map(|t| {
                let vendor = t.jdk_type;
                t.versions.into_iter().map(move |v| CatalogEntry {
                    vendor: vendor.clone(),
                    version: v.version,
                    download_url: v.download_url,
                })
            })
            .collect();
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 厂商名大小写不敏感、版本精确匹配；有重复条目时取目录中最后一个
    pub fn lookup(&self, vendor: &str, version: &str) -> Option<&CatalogEntry> {
        let vendor = vendor.to_lowercase();
        self.entries
            .iter()
            .rev()
            .find(|e| e.vendor.to_lowercase() == vendor && e.version == version)
    }

    /// 按文件顺序列出 `<JdkType>-<version>`
    pub fn common_identifiers(&self) -> Vec<String> {
        self.entries.iter().map(CatalogEntry::identifier).collect()
    }
}
