use super::registry::LocalRegistry;
use crate::core::constants::fs::DOWNLOAD_PREFIX;
use crate::core::resolver::VersionResolver;
use crate::error::{AppError, AppResult};
use crate::infrastructure::catalog::Catalog;
use crate::infrastructure::installer::{create_progress_bar, extract, progress_callback};
use crate::infrastructure::remote::{download_to_file, HttpClient};
use std::path::Path;

/// 安装结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOutcome {
    pub download_url: String,
    /// 解压后新出现的目录
    pub new_directories: Vec<String>,
}

/// JDK 安装器：解析地址、下载到安装目录中的临时文件、解压
pub struct JdkInstaller {
    resolver: VersionResolver,
    http: HttpClient,
}

impl JdkInstaller {
    pub fn new(resolver: VersionResolver, http: HttpClient) -> Self {
        Self { resolver, http }
    }

    pub fn resolver(&self) -> &VersionResolver {
        &self.resolver
    }

    /// 解析失败时不会创建 `destination`，也不会产生任何文件
    pub async fn install(
        &self,
        catalog: &Catalog,
        identifier: &str,
        destination: &Path,
    ) -> AppResult<InstallOutcome> {
        let download_url = self.resolver.resolve(catalog, identifier).await?;
        println!("🔗 下载地址: {}", download_url);

        tokio::fs::create_dir_all(destination)
            .await
            .map_err(|e| AppError::filesystem(destination, format!("创建安装目录失败: {}", e)))?;

        let registry = LocalRegistry::new(destination);
        let before = registry.list_installed()?;

        let archive = tempfile::Builder::new()
            .prefix(DOWNLOAD_PREFIX)
            .tempfile_in(destination)
            .map_err(|e| AppError::filesystem(destination, format!("创建临时文件失败: {}", e)))?
            .into_temp_path();

        println!("📥 正在下载 {}...", identifier);
        let pb = create_progress_bar();
        let downloaded = download_to_file(&self.http, &download_url, &archive, progress_callback(&pb)).await;
        pb.finish_and_clear();
        let size = downloaded?;
        tracing::info!("下载完成: {} 字节", size);

        println!("📦 正在解压...");
        extract(&archive, destination, Some(&download_url))?;

        if let Err(e) = archive.close() {
            tracing::warn!("删除临时文件失败: {e}");
            eprintln!("⚠️  删除临时文件失败: {}", e);
        }

        let new_directories = new_directories(&registry, &before);
        Ok(InstallOutcome {
            download_url,
            new_directories,
        })
    }
}

/// 解压后新出现的目录；安装已完成，读取失败只记录警告
fn new_directories(registry: &LocalRegistry, before: &[String]) -> Vec<String> {
    match registry.list_installed() {
        Ok(after) => after
            .into_iter()
            .filter(|name| !before.contains(name))
            .collect(),
        Err(e) => {
            tracing::warn!("列出安装目录失败: {e}");
            eprintln!("⚠️  无法列出新安装的目录: {}", e);
            Vec::new()
        }
    }
}
