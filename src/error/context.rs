use crate::error::{AppError, ContextualError};

/// 安全的 JSON 序列化
pub fn safe_to_json_pretty<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(Into::into)
}

/// 为Result添加上下文信息的辅助函数
pub fn with_context<T, E: Into<AppError>>(
    result: Result<T, E>,
    operation: &str,
) -> Result<T, ContextualError> {
    result.map_err(|e| e.into().with_context(operation))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_json_serialization() {
        let data = serde_json::json!({"key": "value"});
        assert!(safe_to_json_pretty(&data).is_ok());
    }

    #[test]
    fn test_with_context() {
        let result: Result<i32, AppError> = Err(AppError::network("timeout"));
        let contextual = with_context(result, "查询 Zulu").unwrap_err();
        assert_eq!(contextual.context.operation, "查询 Zulu");
        assert!(matches!(contextual.error, AppError::Network { .. }));
    }
}
