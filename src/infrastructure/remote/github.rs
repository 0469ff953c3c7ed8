use super::http_client::HttpClient;
use super::platform::Platform;
use crate::core::constants::identifier::{RELEASE_ROUTE, RELEASE_TAG_PREFIX, SEPARATOR};
use crate::core::constants::network::{GITHUB_ACCEPT, GITHUB_API_URL};
use crate::core::constants::vendors;
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// GitHub 发行版信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseInfo {
    pub tag_name: String,
    #[serde(default)]
    pub assets: Vec<AssetInfo>,
}

/// 发行版中的资源文件
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetInfo {
    pub name: String,
    #[serde(rename = "browser_download_url")]
    pub download_url: String,
}

/// 已接入的发行版仓库 `(owner, repo)`
pub fn release_repository(vendor: &str) -> Option<(&'static str, &'static str)> {
    match vendor.to_lowercase().as_str() {
        vendors::GRAALVM => Some(("graalvm", "graalvm-ce-builds")),
        _ => None,
    }
}

/// 只保留 JDK 标签的发行版
pub fn jdk_releases(releases: Vec<ReleaseInfo>) -> Vec<ReleaseInfo> {
    releases
        .into_iter()
        .filter(|r| r.tag_name.starts_with(RELEASE_TAG_PREFIX))
        .collect()
}

/// 在标签以 `version_prefix` 开头的发行版中挑选当前平台的资源。
///
/// 多个资源都匹配时取遍历顺序中的最后一个。
pub fn select_asset_url(
    releases: &[ReleaseInfo],
    version_prefix: &str,
    platform: &Platform,
) -> Option<String> {
    let mut selected = None;
    for release in releases {
        if !release.tag_name.starts_with(version_prefix) {
            continue;
        }
        for asset in &release.assets {
            if platform.matches_asset(&asset.name) {
                selected = Some(asset.download_url.clone());
            }
        }
    }
    selected
}

/// 发行版列表数据源
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    async fn list_releases(&self, owner: &str, repo: &str) -> AppResult<Vec<ReleaseInfo>>;

    fn platform(&self) -> Platform {
        Platform::target()
    }

    /// 列出厂商仓库中的 JDK 发行版
    async fn vendor_releases(&self, vendor: &str) -> AppResult<Vec<ReleaseInfo>> {
        let (owner, repo) = release_repository(vendor).ok_or_else(|| AppError::NotFound {
            resource: format!("{} 的 GitHub 发行版仓库", vendor),
        })?;
        Ok(jdk_releases(self.list_releases(owner, repo).await?))
    }

    /// 查找厂商发行版中匹配版本前缀的下载地址，任何失败都报告后返回 `None`
    async fn find_download_url(&self, vendor: &str, version_prefix: &str) -> Option<String> {
        let releases = match self.vendor_releases(vendor).await {
            Ok(releases) => releases,
            Err(e) => {
                tracing::warn!("获取 {vendor} 发行版失败: {e}");
                eprintln!("⚠️  获取 {} 发行版失败: {}", vendor, e);
                return None;
            }
        };
        select_asset_url(&releases, version_prefix, &self.platform())
    }

    /// `available <vendor>` 使用的可安装标识列表，例如 `gh-graalvm-jdk-17.0.9`
    async fn release_identifiers(&self, vendor: &str) -> AppResult<Vec<String>> {
        let releases = self.vendor_releases(vendor).await?;
        Ok(releases
            .iter()
            .map(|r| format!("{RELEASE_ROUTE}{SEPARATOR}{vendor}{SEPARATOR}{}", r.tag_name))
            .collect())
    }
}

/// GitHub Releases 客户端
pub struct GitHubReleaseClient {
    http: HttpClient,
    api_base_url: String,
}

impl GitHubReleaseClient {
    pub fn new(http: HttpClient) -> Self {
        Self::with_api_base(http, GITHUB_API_URL)
    }

    pub fn with_api_base(http: HttpClient, api_base_url: &str) -> Self {
        Self {
            http,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn releases_url(&self, owner: &str, repo: &str) -> String {
        format!("{}/repos/{}/{}/releases", self.api_base_url, owner, repo)
    }
}

#[async_trait]
impl ReleaseSource for GitHubReleaseClient {
    async fn list_releases(&self, owner: &str, repo: &str) -> AppResult<Vec<ReleaseInfo>> {
        let url = self.releases_url(owner, repo);
        let releases: Vec<ReleaseInfo> = self.http.get_json(&url, GITHUB_ACCEPT).await?;
        tracing::debug!("{owner}/{repo} 返回 {} 个发行版", releases.len());
        Ok(releases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{serve, CannedResponse};

    fn asset(name: &str, url: &str) -> AssetInfo {
        AssetInfo {
            name: name.to_string(),
            download_url: url.to_string(),
        }
    }

    fn release(tag: &str, assets: Vec<AssetInfo>) -> ReleaseInfo {
        ReleaseInfo {
            tag_name: tag.to_string(),
            assets,
        }
    }

    #[test]
    fn test_last_matching_asset_wins() {
        let releases = vec![release(
            "jdk-17.0.9",
            vec![
                asset("graalvm-jdk-17.0.9_windows-x64_bin.zip", "https://a"),
                asset("graalvm-jdk-17.0.9_linux-x64_bin.tar.gz", "https://b"),
                asset("graalvm-jdk-17.0.9_windows-aarch64_bin.zip", "https://c"),
            ],
        )];

        assert_eq!(
            select_asset_url(&releases, "jdk-17", &Platform::target()).as_deref(),
            Some("https://c")
        );
    }

    #[test]
    fn test_later_release_overrides_earlier_match() {
        let releases = vec![
            release("jdk-17.0.9", vec![asset("x_windows-x64.zip", "https://new")]),
            release("jdk-17.0.8", vec![asset("x_windows-x64.zip", "https://old")]),
        ];

        assert_eq!(
            select_asset_url(&releases, "jdk-17", &Platform::target()).as_deref(),
            Some("https://old")
        );
    }

    #[test]
    fn test_unmatched_prefix_returns_none() {
        let releases = vec![release(
            "jdk-21.0.1",
            vec![asset("graalvm-jdk-21_windows-x64_bin.zip", "https://a")],
        )];

        assert_eq!(select_asset_url(&releases, "jdk-17", &Platform::target()), None);
    }

    #[test]
    fn test_jdk_releases_filters_other_tags() {
        let releases = vec![
            release("vm-22.3.0", vec![]),
            release("jdk-17.0.9", vec![]),
            release("graal-23", vec![]),
        ];
        let tags: Vec<_> = jdk_releases(releases).into_iter().map(|r| r.tag_name).collect();
        assert_eq!(tags, vec!["jdk-17.0.9"]);
    }

    #[test]
    fn test_release_repository() {
        assert_eq!(
            release_repository("GraalVM"),
            Some(("graalvm", "graalvm-ce-builds"))
        );
        assert_eq!(release_repository("temurin"), None);
    }

    #[tokio::test]
    async fn test_list_releases_and_find_download_url() {
        let body = r#"[
            {"tag_name": "vm-22.3.0", "assets": [
                {"name": "graalvm-ce-java17-windows-amd64-22.3.0.zip", "browser_download_url": "https://gh/vm.zip"}
            ]},
            {"tag_name": "jdk-17.0.9", "assets": [
                {"name": "graalvm-community-jdk-17.0.9_windows-x64_bin.zip", "browser_download_url": "https://gh/17.zip"},
                {"name": "graalvm-community-jdk-17.0.9_macos-x64_bin.tar.gz", "browser_download_url": "https://gh/17-mac.tar.gz"}
            ]}
        ]"#;
        let server = serve(CannedResponse::json(200, body)).await;
        let client = GitHubReleaseClient::with_api_base(
            HttpClient::without_proxy(5).unwrap(),
            &server.url("/"),
        );

        assert_eq!(
            client.find_download_url("graalvm", "jdk-17").await.as_deref(),
            Some("https://gh/17.zip")
        );
        let request = server.last_request().await.unwrap();
        assert!(request.starts_with("GET /repos/graalvm/graalvm-ce-builds/releases"));

        let ids = client.release_identifiers("graalvm").await.unwrap();
        assert_eq!(ids, vec!["gh-graalvm-jdk-17.0.9"]);
    }

    #[tokio::test]
    async fn test_unknown_vendor_is_not_found() {
        let client = GitHubReleaseClient::new(HttpClient::without_proxy(5).unwrap());
        assert_eq!(client.find_download_url("temurin", "jdk-17").await, None);
        assert!(matches!(
            client.release_identifiers("temurin").await,
            Err(AppError::NotFound { .. })
        ));
    }
}
