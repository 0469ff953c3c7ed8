use crate::core::constants::identifier::NULL_URL;
use crate::core::identifier::VersionRoute;
use crate::error::{AppError, AppResult};
use crate::infrastructure::catalog::Catalog;
use crate::infrastructure::remote::{ReleaseSource, VendorPackageSource};

/// 把版本标识解析为一个下载地址
pub struct VersionResolver {
    vendor_api: Box<dyn VendorPackageSource>,
    releases: Box<dyn ReleaseSource>,
}

impl VersionResolver {
    pub fn new(vendor_api: Box<dyn VendorPackageSource>, releases: Box<dyn ReleaseSource>) -> Self {
        Self {
            vendor_api,
            releases,
        }
    }

    pub fn releases(&self) -> &dyn ReleaseSource {
        self.releases.as_ref()
    }

    /// 在联网之前先根据标识选择数据源；拿不到地址或地址为 `"null"` 时视为不支持的版本
    pub async fn resolve(&self, catalog: &Catalog, identifier: &str) -> AppResult<String> {
        let route = VersionRoute::parse(identifier)?;
        tracing::debug!("{identifier} -> {route}");

        let url = match &route {
            VersionRoute::StaticCatalog { vendor, version } => catalog
                .lookup(vendor, version)
                .map(|entry| entry.download_url.clone()),
            VersionRoute::DynamicApi { version, .. } => {
                self.vendor_api.fetch_download_url(version).await
            }
            VersionRoute::SourceRelease { vendor, tag } => {
                self.releases.find_download_url(vendor, tag).await
            }
        };

        match url {
            Some(url) if is_usable_url(&url) => Ok(url),
            _ => Err(AppError::unsupported_version(identifier)),
        }
    }
}

fn is_usable_url(url: &str) -> bool {
    !url.is_empty() && url != NULL_URL
}
