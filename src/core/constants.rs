//! 应用程序常量定义
//!
//! 本模块包含全局使用的常量，避免魔数并提供统一的配置值。

/// 网络相关常量
pub mod network {
    /// 默认请求超时时间（秒）
    pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
    /// 请求使用的 User-Agent
    pub const USER_AGENT: &str = concat!("sdkm/", env!("CARGO_PKG_VERSION"));
    /// Azul 元数据服务
    pub const ZULU_API_URL: &str = "https://api.azul.com/metadata/v1/zulu/packages/";
    /// GitHub API 根地址
    pub const GITHUB_API_URL: &str = "https://api.github.com";
    /// GitHub API 的 Accept 头
    pub const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
    /// JSON Accept 头
    pub const JSON_ACCEPT: &str = "application/json";
}

/// 版本标识相关常量
pub mod identifier {
    /// 标识符分隔符
    pub const SEPARATOR: char = '-';
    /// GitHub 发行版路由前缀
    pub const RELEASE_ROUTE: &str = "gh";
    /// `available` 命令列出本地目录时使用的关键字
    pub const COMMON_LISTING: &str = "common";
    /// 只保留以该前缀开头的发行版标签
    pub const RELEASE_TAG_PREFIX: &str = "jdk";
    /// 表示"无下载地址"的字面值
    pub const NULL_URL: &str = "null";
}

/// 厂商名称
pub mod vendors {
    pub const ORACLE: &str = "oracle";
    pub const GRAALVM: &str = "graalvm";
    pub const ZULU: &str = "zulu";
}

/// 环境变量相关常量
pub mod env {
    /// 用户级 PATH 变量名
    pub const PATH_VAR: &str = "Path";
    /// PATH 分隔符
    pub const PATH_SEPARATOR: char = ';';
    /// 日志过滤环境变量
    pub const LOG_FILTER_VAR: &str = "MJ_LOG";
    /// 配置目录环境变量
    pub const HOME_VAR: &str = "MJ_HOME";
}

/// 文件系统相关常量
pub mod fs {
    /// 配置文件名
    pub const CONFIG_FILE: &str = "config.json";
    /// 版本目录文件名
    pub const CATALOG_FILE: &str = "jdk_version.json";
    /// 工作目录和可执行文件目录下的配置子目录
    pub const CONF_DIR: &str = "conf";
    /// 用户主目录下的配置目录
    pub const USER_DIR: &str = ".mj";
    /// 临时下载文件前缀
    pub const DOWNLOAD_PREFIX: &str = ".mj-download-";
}
