use super::http_client::HttpClient;
use super::platform::Platform;
use crate::core::constants::network::{JSON_ACCEPT, ZULU_API_URL};
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

/// 按运行时版本查询厂商最新 GA 包下载地址的数据源
#[async_trait]
pub trait VendorPackageSource: Send + Sync {
    /// 查询失败或没有匹配的包时返回 `None`
    async fn fetch_download_url(&self, runtime_version: &str) -> Option<String>;
}

/// Azul 元数据接口返回的包信息（只关心下载地址）
#[derive(Debug, Clone, Deserialize)]
pub struct ZuluPackage {
    pub download_url: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Azul Zulu 元数据客户端
pub struct AzulMetadataClient {
    http: HttpClient,
    endpoint: String,
    platform: Platform,
}

impl AzulMetadataClient {
    pub fn new(http: HttpClient) -> Self {
        Self::with_endpoint(http, ZULU_API_URL)
    }

    pub fn with_endpoint(http: HttpClient, endpoint: &str) -> Self {
        Self {
            http,
            endpoint: endpoint.to_string(),
            platform: Platform::target(),
        }
    }

    /// 构造查询地址：指定主版本的最新 GA、TCK 认证的完整 JDK，仅取一条
    pub fn query_url(&self, runtime_version: &str) -> AppResult<Url> {
        Url::parse_with_params(
            &self.endpoint,
            &[
                ("java_version", runtime_version),
                ("os", self.platform.os.as_str()),
                ("arch", self.platform.arch.as_str()),
                ("archive_type", self.platform.archive_type.as_str()),
                ("java_package_type", self.platform.package_type.as_str()),
                ("latest", "true"),
                ("distro_version", runtime_version),
                ("release_status", "ga"),
                ("certifications", "tck"),
                ("page", "1"),
                ("page_size", "1"),
            ],
        )
        .map_err(|e| AppError::Config {
            message: format!("无效的 Zulu API 地址 {}: {}", self.endpoint, e),
        })
    }

    /// 查询并返回第一条结果的下载地址，空数组返回 `Ok(None)`
    pub async fn try_fetch_download_url(&self, runtime_version: &str) -> AppResult<Option<String>> {
        let url = self.query_url(runtime_version)?;
        tracing::debug!("查询 Zulu {runtime_version} ({})", self.platform);
        let packages: Vec<ZuluPackage> = self.http.get_json(url.as_str(), JSON_ACCEPT).await?;
        Ok(packages.into_iter().next().map(|package| {
            if let Some(name) = &package.name {
                tracing::info!("Zulu 安装包: {name}");
            }
            package.download_url
        }))
    }
}

#[async_trait]
impl VendorPackageSource for AzulMetadataClient {
    async fn fetch_download_url(&self, runtime_version: &str) -> Option<String> {
        match self.try_fetch_download_url(runtime_version).await {
            Ok(Some(url)) => Some(url),
            Ok(None) => {
                tracing::warn!("Zulu API 未返回 Java {runtime_version} 的安装包");
                None
            }
            Err(e) => {
                tracing::warn!("查询 Zulu API 失败: {e}");
                eprintln!("⚠️  查询 Zulu API 失败: {}", e);
                None
            }
        }
    }
}
