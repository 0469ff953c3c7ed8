use crate::error::{AppError, AppResult};
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// 安装目录下的 JDK 登记：每个直接子目录就是一个已安装的 JDK
#[derive(Debug, Clone)]
pub struct LocalRegistry {
    root: PathBuf,
}

impl LocalRegistry {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 按名称排序的已安装目录；安装目录不存在时返回空列表
    pub fn list_installed(&self) -> AppResult<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.root)
            .map_err(|e| AppError::filesystem(&self.root, format!("读取目录失败: {}", e)))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|e| AppError::filesystem(&self.root, format!("读取目录项失败: {}", e)))?;
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            if is_dir {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn path_of(&self, name: &str) -> AppResult<PathBuf> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.root.join(name)),
            _ => Err(AppError::filesystem(
                Path::new(name),
                "名称必须是安装目录下的单个目录名",
            )),
        }
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_of(name).map(|p| p.is_dir()).unwrap_or(false)
    }

    /// 删除已安装的目录，返回释放的字节数；目录不存在时返回 `None`
    pub fn remove(&self, name: &str) -> AppResult<Option<u64>> {
        let path = self.path_of(name)?;
        if !path.exists() {
            tracing::debug!("{} 不存在，无需删除", path.display());
            return Ok(None);
        }

        let freed = disk_usage(&path);
        fs::remove_dir_all(&path)
            .map_err(|e| AppError::filesystem(&path, format!("删除失败: {}", e)))?;
        Ok(Some(freed))
    }
}

/// 目录下所有文件的总大小，无法读取的项忽略
pub fn disk_usage(path: &Path) -> u64 {
    WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
        .filter_map(|entry| entry.metadata().ok())
        .filter(|meta| meta.is_file())
        .map(|meta| meta.len())
        .sum()
}

/// 以 B/KB/MB/GB 显示大小
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}
