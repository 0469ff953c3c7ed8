use crate::cli::commands::Commands;
use crate::cli::output::{OutputFormat, FORMATTER};
use crate::core::constants::identifier::COMMON_LISTING;
use crate::core::resolver::VersionResolver;
use crate::environments::java::{format_size, Activation, Activator, JdkInstaller, LocalRegistry};
use crate::error::{with_context, AppError, AppResult, ContextualResult};
use crate::infrastructure::catalog::Catalog;
use crate::infrastructure::config::{Config, ConfigLocator};
use crate::infrastructure::remote::{AzulMetadataClient, GitHubReleaseClient, HttpClient};
use crate::infrastructure::shell::{EnvironmentStore, PowerShellEnvironmentStore};
use std::path::{Path, PathBuf};

/// 命令处理器
pub struct CommandHandler {
    config: Config,
    catalog_path: Option<PathBuf>,
}

impl CommandHandler {
    /// 按查找顺序加载配置，并定位 jdk_version.json
    pub fn new(config_path: Option<&Path>, catalog_path: Option<&Path>) -> ContextualResult<Self> {
        let locator = ConfigLocator::new();
        let config = with_context(locator.load_config(config_path), "加载配置")?;
        let catalog_path = locator.catalog_path(catalog_path);
        Ok(Self::with_config(config, catalog_path))
    }

    pub fn with_config(config: Config, catalog_path: Option<PathBuf>) -> Self {
        Self {
            config,
            catalog_path,
        }
    }

    /// 处理命令
    pub async fn handle_command(&self, command: Commands) -> ContextualResult<()> {
        match command {
            Commands::Ls { json } => with_context(self.handle_ls(json), "列出已安装的 JDK"),
            Commands::Use { version } => {
                let result = PowerShellEnvironmentStore::detect()
                    .and_then(|mut store| self.activate_with(&mut store, &version));
                with_context(result.map(|_| ()), &format!("切换到 {}", version))
            }
            Commands::Available { version, json } => with_context(
                self.handle_available(&version, json).await,
                "查询可安装版本",
            ),
            Commands::Install { version } => with_context(
                self.handle_install(&version).await,
                &format!("安装 {}", version),
            ),
            Commands::Remove { version } => {
                with_context(self.handle_remove(&version), &format!("删除 {}", version))
            }
            Commands::Current => with_context(self.handle_current(), "读取当前 JDK"),
        }
    }

    fn registry(&self) -> LocalRegistry {
        LocalRegistry::new(&self.config.jdk_dir)
    }

    /// 加载本地目录；文件不存在时 `required` 决定报错还是返回空目录
    fn load_catalog(&self, required: bool) -> AppResult<Catalog> {
        match &self.catalog_path {
            Some(path) => Catalog::load(path),
            None if required => Err(AppError::NotFound {
                resource: crate::core::constants::fs::CATALOG_FILE.to_string(),
            }),
            None => {
                tracing::debug!("未找到本地目录，只使用远程数据源");
                Ok(Catalog::default())
            }
        }
    }

    fn installer(&self) -> AppResult<JdkInstaller> {
        let api = HttpClient::with_timeout(self.config.http_timeout_secs)?;
        let resolver = VersionResolver::new(
            Box::new(AzulMetadataClient::with_endpoint(
                api.clone(),
                &self.config.zulu_api_url,
            )),
            Box::new(GitHubReleaseClient::with_api_base(
                api,
                &self.config.github_api_url,
            )),
        );
        let downloads = HttpClient::for_downloads(self.config.http_timeout_secs)?;
        Ok(JdkInstaller::new(resolver, downloads))
    }

    fn handle_ls(&self, json: bool) -> AppResult<()> {
        let registry = self.registry();
        let installed = registry.list_installed()?;

        // 读取当前版本失败（例如没有 PowerShell）不影响列出
        let current = match PowerShellEnvironmentStore::detect()
            .and_then(|store| Activator::current(&store, &self.config.env_name))
        {
            Ok(value) => value.as_deref().and_then(installed_name).map(str::to_string),
            Err(e) => {
                tracing::debug!("无法读取当前 JDK: {e}");
                None
            }
        };

        let output = FORMATTER.format_installed(
            registry.root(),
            &installed,
            current.as_deref(),
            OutputFormat::from_json_flag(json),
        )?;
        print!("{}", output);
        Ok(())
    }

    /// 激活已安装的版本；目录不存在时不修改任何环境变量
    pub fn activate_with(&self, store: &mut dyn EnvironmentStore, name: &str) -> AppResult<Activation> {
        let registry = self.registry();
        if !registry.exists(name) {
            return Err(AppError::version_not_installed(name));
        }

        let installed = registry.path_of(name)?;
        let activation = Activator::activate(store, &self.config.env_name, &installed)?;
        if activation.path_updated {
            println!("🔧 已将 %{}% 加入用户 Path", self.config.env_name);
        }
        println!("✅ 已切换到 {} ({} = {})", name, self.config.env_name, activation.bin_dir);
        println!("💡 新打开的终端窗口中生效");
        Ok(activation)
    }

    async fn handle_available(&self, version: &str, json: bool) -> AppResult<()> {
        let versions = if version == COMMON_LISTING {
            self.load_catalog(true)?.common_identifiers()
        } else {
            println!("🔍 正在查询 {} 的发行版...", version);
            self.installer()?
                .resolver()
                .releases()
                .release_identifiers(version)
                .await?
        };

        let output = FORMATTER.format_available(version, &versions, OutputFormat::from_json_flag(json))?;
        print!("{}", output);
        Ok(())
    }

    async fn handle_install(&self, version: &str) -> AppResult<()> {
        println!("🚀 正在安装 JDK {}...", version);
        let catalog = self.load_catalog(false)?;
        let outcome = self
            .installer()?
            .install(&catalog, version, &self.config.jdk_dir)
            .await?;

        println!("🎉 安装完成: {}", self.config.jdk_dir.display());
        for name in &outcome.new_directories {
            println!("📁 {}", name);
        }
        if let Some(name) = outcome.new_directories.first() {
            println!("💡 使用 `mj use {}` 切换到该版本", name);
        }
        Ok(())
    }

    fn handle_remove(&self, version: &str) -> AppResult<()> {
        match self.registry().remove(version)? {
            Some(freed) => println!("🗑️  已删除 {}，释放 {}", version, format_size(freed)),
            None => println!("📭 {} 未安装，无需删除", version),
        }
        Ok(())
    }

    fn handle_current(&self) -> AppResult<()> {
        let store = PowerShellEnvironmentStore::detect()?;
        match Activator::current(&store, &self.config.env_name)? {
            Some(bin_dir) => println!("☕ {} = {}", self.config.env_name, bin_dir),
            None => println!("📭 {} 未设置，使用 `mj use <version>` 切换", self.config.env_name),
        }
        Ok(())
    }
}

/// 从 `<root>/<name>/bin` 取出目录名
fn installed_name(bin_dir: &str) -> Option<&str> {
    Path::new(bin_dir)
        .parent()
        .and_then(Path::file_name)
        .and_then(|name| name.to_str())
}
