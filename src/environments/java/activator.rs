use crate::core::constants::env::PATH_VAR;
use crate::error::AppResult;
use crate::infrastructure::shell::{path_reference, EnvironmentStore};
use std::path::Path;

/// 一次激活的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    /// 写入 `env_name` 的值
    pub bin_dir: String,
    /// 这次是否修改了 PATH
    pub path_updated: bool,
}

/// 把一个已安装的 JDK 设为当前版本。
///
/// PATH 中只保存 `%env_name%` 引用，切换版本时只改 `env_name` 本身。
pub struct Activator;

impl Activator {
    /// 先确保 PATH 引用了 `env_name`，再把它设为 `<installed>/bin`。
    ///
    /// 第二步失败时第一步不回滚。
    pub fn activate(
        store: &mut dyn EnvironmentStore,
        env_name: &str,
        installed: &Path,
    ) -> AppResult<Activation> {
        let path_updated = store.append_to_path(&path_reference(env_name))?;
        if path_updated {
            tracing::info!("已把 {} 加入用户 {}", path_reference(env_name), PATH_VAR);
        }

        let bin_dir = installed.join("bin").display().to_string();
        store.set(env_name, &bin_dir)?;
        tracing::info!("{env_name} = {bin_dir}");

        Ok(Activation {
            bin_dir,
            path_updated,
        })
    }

    /// 读取当前激活的 bin 目录
    pub fn current(store: &dyn EnvironmentStore, env_name: &str) -> AppResult<Option<String>> {
        store.get(env_name)
    }
}
