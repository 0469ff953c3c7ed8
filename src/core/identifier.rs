use crate::core::constants::identifier::{RELEASE_ROUTE, SEPARATOR};
use crate::core::constants::vendors;
use crate::error::{AppError, AppResult};
use std::fmt;

/// 厂商对应的数据源类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceKind {
    Catalog,
    VendorApi,
}

/// 按前缀匹配的厂商表，顺序即匹配优先级
const VENDOR_ROUTES: &[(&str, SourceKind)] = &[
    (vendors::ORACLE, SourceKind::Catalog),
    (vendors::GRAALVM, SourceKind::Catalog),
    (vendors::ZULU, SourceKind::VendorApi),
];

/// 版本标识解析后的查询路线
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionRoute {
    /// 本地目录查找，例如 `oracle-17`
    StaticCatalog { vendor: &'static str, version: String },
    /// 厂商元数据接口，例如 `zulu-17`
    DynamicApi { vendor: &'static str, version: String },
    /// GitHub 发行版，例如 `gh-graalvm-jdk-17`
    SourceRelease { vendor: String, tag: String },
}

impl VersionRoute {
    /// 解析用户输入的版本标识。
    ///
    /// - `gh-<vendor>-<tag>`：标签为厂商之后的全部内容，`gh-graalvm-jdk-17` 的标签是 `jdk-17`
    /// - `<vendor>-<version>`：版本只取第二段，厂商按整个标识的前缀（不区分大小写）匹配
    ///
    /// 段数不足或厂商未知时返回 [`AppError::UnsupportedVersion`]。
    pub fn parse(identifier: &str) -> AppResult<Self> {
        let unsupported = || AppError::unsupported_version(identifier);

        let mut segments = identifier.splitn(3, SEPARATOR);
        if segments.next() == Some(RELEASE_ROUTE) {
            let vendor = segments
                .next()
                .filter(|s| !s.is_empty())
                .ok_or_else(unsupported)?;
            let tag = segments
                .next()
                .filter(|s| !s.is_empty())
                .ok_or_else(unsupported)?;
            return Ok(Self::SourceRelease {
                vendor: vendor.to_string(),
                tag: tag.to_string(),
            });
        }

        let version = identifier
            .split(SEPARATOR)
            .nth(1)
            .filter(|s| !s.is_empty())
            .ok_or_else(unsupported)?
            .to_string();

        let lower = identifier.to_lowercase();
        let (vendor, kind) = VENDOR_ROUTES
            .iter()
            .find(|(name, _)| lower.starts_with(name))
            .copied()
            .ok_or_else(unsupported)?;

        Ok(match kind {
            SourceKind::Catalog => Self::StaticCatalog { vendor, version },
            SourceKind::VendorApi => Self::DynamicApi { vendor, version },
        })
    }
}

impl fmt::Display for VersionRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaticCatalog { vendor, version } => write!(f, "catalog {vendor} {version}"),
            Self::DynamicApi { vendor, version } => write!(f, "{vendor} api {version}"),
            Self::SourceRelease { vendor, tag } => write!(f, "github {vendor} {tag}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_catalog_vendors() {
        assert_eq!(
            VersionRoute::parse("oracle-17").unwrap(),
            VersionRoute::StaticCatalog {
                vendor: "oracle",
                version: "17".to_string()
            }
        );
        assert_eq!(
            VersionRoute::parse("GraalVM-21").unwrap(),
            VersionRoute::StaticCatalog {
                vendor: "graalvm",
                version: "21".to_string()
            }
        );
    }

    #[test]
    fn test_parse_vendor_api() {
        assert_eq!(
            VersionRoute::parse("Zulu-8").unwrap(),
            VersionRoute::DynamicApi {
                vendor: "zulu",
                version: "8".to_string()
            }
        );
    }

    #[test]
    fn test_parse_release_keeps_full_tag() {
        assert_eq!(
            VersionRoute::parse("gh-graalvm-jdk-17").unwrap(),
            VersionRoute::SourceRelease {
                vendor: "graalvm".to_string(),
                tag: "jdk-17".to_string()
            }
        );
        assert_eq!(
            VersionRoute::parse("gh-graalvm-jdk-17.0.9").unwrap(),
            VersionRoute::SourceRelease {
                vendor: "graalvm".to_string(),
                tag: "jdk-17.0.9".to_string()
            }
        );
    }

    #[test]
    fn test_only_second_segment_is_version() {
        assert_eq!(
            VersionRoute::parse("oracle-17-ea").unwrap(),
            VersionRoute::StaticCatalog {
                vendor: "oracle",
                version: "17".to_string()
            }
        );
    }

    #[test]
    fn test_malformed_identifiers_are_unsupported() {
        for raw in ["", "zulu", "zulu-", "gh", "gh-graalvm", "gh--jdk", "gh-graalvm-", "temurin-17", "17"] {
            assert!(
                matches!(
                    VersionRoute::parse(raw),
                    Err(AppError::UnsupportedVersion { ref version }) if version == raw
                ),
                "{raw:?} should be unsupported"
            );
        }
    }

    #[test]
    fn test_release_token_is_case_sensitive() {
        assert!(matches!(
            VersionRoute::parse("GH-graalvm-jdk-17"),
            Err(AppError::UnsupportedVersion { .. })
        ));
    }
}
