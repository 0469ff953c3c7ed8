use std::fmt;

/// 下载目标平台：OS / Arch / 压缩格式 / 包类型。
///
/// 激活流程只支持 Windows 用户级环境变量，因此默认目标固定为 windows-x64 的 zip 包。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Platform {
    pub os: String,
    pub arch: String,
    pub archive_type: String,
    pub package_type: String,
}

impl Platform {
    /// 固定的安装目标平台。
    pub fn target() -> Self {
        Platform {
            os: "windows".to_string(),
            arch: "x64".to_string(),
            archive_type: "zip".to_string(),
            package_type: "jdk".to_string(),
        }
    }

    /// 发行版资源文件名的后缀，例如 `.zip`。
    pub fn archive_suffix(&self) -> String {
        format!(".{}", self.archive_type)
    }

    /// 资源文件名是否属于当前平台：包含 OS 标记且以压缩格式后缀结尾。
    pub fn matches_asset(&self, asset_name: &str) -> bool {
        asset_name.contains(&self.os) && asset_name.ends_with(&self.archive_suffix())
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} ({})", self.os, self.arch, self.archive_type)
    }
}
