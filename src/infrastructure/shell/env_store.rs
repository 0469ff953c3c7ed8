use crate::core::constants::env::{PATH_SEPARATOR, PATH_VAR};
use crate::error::{AppError, AppResult};
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Command;

/// 持久化的用户级环境变量
pub trait EnvironmentStore {
    fn get(&self, name: &str) -> AppResult<Option<String>>;

    fn set(&mut self, name: &str, value: &str) -> AppResult<()>;

    /// 确保用户 PATH 中包含 `entry`，返回是否做了修改
    fn append_to_path(&mut self, entry: &str) -> AppResult<bool> {
        let current = self.get(PATH_VAR)?.unwrap_or_default();
        match append_path_entry(&current, entry) {
            Some(updated) => {
                self.set(PATH_VAR, &updated)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// PATH 中引用环境变量的写法，例如 `%JAVA_BIN%`
pub fn path_reference(env_name: &str) -> String {
    format!("%{}%", env_name)
}

/// 计算追加后的 PATH；已包含时返回 `None`。
///
/// 判断使用子串包含，与已有 PATH 中更长的同前缀条目也会被视为已存在。
pub fn append_path_entry(current: &str, entry: &str) -> Option<String> {
    let current = current.trim();
    if current.contains(entry) {
        return None;
    }
    if current.is_empty() {
        return Some(entry.to_string());
    }
    let mut updated = current.to_string();
    if !updated.ends_with(PATH_SEPARATOR) {
        updated.push(PATH_SEPARATOR);
    }
    updated.push_str(entry);
    Some(updated)
}

/// 转义 PowerShell 单引号字符串
fn escape_powershell_value(value: &str) -> String {
    value.replace('\'', "''")
}

/// 通过 PowerShell 读写 User 作用域的环境变量
pub struct PowerShellEnvironmentStore {
    program: PathBuf,
}

impl PowerShellEnvironmentStore {
    /// 依次查找 `powershell` 和 `pwsh`
    pub fn detect() -> AppResult<Self> {
        let program = which::which("powershell")
            .or_else(|_| which::which("pwsh"))
            .map_err(|e| AppError::Activation {
                message: format!("未找到 PowerShell ({})，当前只支持 Windows 用户环境变量", e),
            })?;
        tracing::debug!("使用 {}", program.display());
        Ok(Self { program })
    }

    fn run(&self, script: &str) -> AppResult<String> {
        let output = Command::new(&self.program)
            .args(["-NoProfile", "-NonInteractive", "-Command", script])
            .output()
            .map_err(|e| AppError::Activation {
                message: format!("执行 PowerShell 失败: {}", e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::Activation {
                message: format!("PowerShell 返回 {}: {}", output.status, stderr.trim()),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl EnvironmentStore for PowerShellEnvironmentStore {
    fn get(&self, name: &str) -> AppResult<Option<String>> {
        let script = format!(
            "[System.Environment]::GetEnvironmentVariable('{}', [System.EnvironmentVariableTarget]::User)",
            escape_powershell_value(name)
        );
        let value = self.run(&script)?;
        let value = value.trim();
        Ok(if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        })
    }

    fn set(&mut self, name: &str, value: &str) -> AppResult<()> {
        let script = format!(
            "[System.Environment]::SetEnvironmentVariable('{}', '{}', [System.EnvironmentVariableTarget]::User)",
            escape_powershell_value(name),
            escape_powershell_value(value)
        );
        self.run(&script).map(|_| ())
    }
}

/// 内存中的环境变量，记录写入顺序
#[derive(Debug, Default, Clone)]
pub struct InMemoryEnvironmentStore {
    vars: HashMap<String, String>,
    writes: Vec<(String, String)>,
    fail_on_set: Option<String>,
}

impl InMemoryEnvironmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }

    /// 对指定变量的写入返回错误
    pub fn failing_on(mut self, name: &str) -> Self {
        self.fail_on_set = Some(name.to_string());
        self
    }

    pub fn writes(&self) -> &[(String, String)] {
        &self.writes
    }
}

impl EnvironmentStore for InMemoryEnvironmentStore {
    fn get(&self, name: &str) -> AppResult<Option<String>> {
        Ok(self.vars.get(name).cloned())
    }

    fn set(&mut self, name: &str, value: &str) -> AppResult<()> {
        if self.fail_on_set.as_deref() == Some(name) {
            return Err(AppError::Activation {
                message: format!("写入 {} 被拒绝", name),
            });
        }
        self.vars.insert(name.to_string(), value.to_string());
        self.writes.push((name.to_string(), value.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_adds_separator() {
        assert_eq!(
            append_path_entry("C:\\bin", "%JAVA_BIN%").as_deref(),
            Some("C:\\bin;%JAVA_BIN%")
        );
        assert_eq!(
            append_path_entry("C:\\bin;", "%JAVA_BIN%").as_deref(),
            Some("C:\\bin;%JAVA_BIN%")
        );
    }

    #[test]
    fn test_append_to_empty_path() {
        assert_eq!(append_path_entry("", "%JAVA_BIN%").as_deref(), Some("%JAVA_BIN%"));
        assert_eq!(append_path_entry("  \r\n", "%JAVA_BIN%").as_deref(), Some("%JAVA_BIN%"));
    }

    #[test]
    fn test_substring_counts_as_present() {
        assert_eq!(append_path_entry("C:\\bin;%JAVA_BIN%", "%JAVA_BIN%"), None);
        // 包含检查是子串匹配，不是按条目精确匹配
        assert_eq!(append_path_entry("x%JAVA_BIN%y", "%JAVA_BIN%"), None);
    }

    #[test]
    fn test_escape_powershell_value() {
        assert_eq!(escape_powershell_value("C:\\it's"), "C:\\it''s");
    }

    #[test]
    fn test_in_memory_store_append_to_path() {
        let mut store = InMemoryEnvironmentStore::new().with_var(PATH_VAR, "C:\\Windows");
        assert!(store.append_to_path("%JDK%").unwrap());
        assert!(!store.append_to_path("%JDK%").unwrap());
        assert_eq!(store.get(PATH_VAR).unwrap().as_deref(), Some("C:\\Windows;%JDK%"));
        assert_eq!(store.writes().len(), 1);
    }
}
