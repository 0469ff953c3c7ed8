use crate::core::constants::network::USER_AGENT;
use crate::error::{AppError, AppResult};
use reqwest::{header::ACCEPT, Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP 客户端包装器
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    stall_timeout: Option<Duration>,
}

impl HttpClient {
    /// 接口请求客户端：整个请求（含响应体）必须在超时内完成
    pub fn with_timeout(timeout_secs: u64) -> AppResult<Self> {
        Self::build(timeout_secs, false, false)
    }

    /// 创建绕过系统代理的接口客户端（本地镜像或回环地址）
    pub fn without_proxy(timeout_secs: u64) -> AppResult<Self> {
        Self::build(timeout_secs, false, true)
    }

    /// 下载客户端：不限制总时长，只限制连接时间和两次收到数据之间的间隔
    pub fn for_downloads(timeout_secs: u64) -> AppResult<Self> {
        Self::build(timeout_secs, true, false)
    }

    pub fn for_downloads_without_proxy(timeout_secs: u64) -> AppResult<Self> {
        Self::build(timeout_secs, true, true)
    }

    fn build(timeout_secs: u64, streaming: bool, bypass_proxy: bool) -> AppResult<Self> {
        let limit = Duration::from_secs(timeout_secs);
        let mut builder = Client::builder().connect_timeout(limit).user_agent(USER_AGENT);
        if !streaming {
            builder = builder.timeout(limit);
        }
        if bypass_proxy {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|e| AppError::network(format!("创建 HTTP 客户端失败: {}", e)))?;

        Ok(Self {
            client,
            stall_timeout: streaming.then_some(limit),
        })
    }

    /// 下载时等待响应头或下一块数据的最长时间
    pub(crate) fn stall_timeout(&self) -> Option<Duration> {
        self.stall_timeout
    }

    /// GET 请求，非 2xx 状态视为网络错误
    pub async fn get(&self, url: &str, accept: &str) -> AppResult<Response> {
        tracing::debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .header(ACCEPT, accept)
            .send()
            .await
            .map_err(|e| AppError::network(format!("请求失败: {} (URL: {})", e, url)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::network(format!(
                "服务器返回状态码: {} (URL: {})",
                status, url
            )));
        }

        Ok(response)
    }

    /// GET 请求并解析 JSON
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str, accept: &str) -> AppResult<T> {
        let response = self.get(url, accept).await?;
        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                AppError::Decode {
                    message: format!("{} (URL: {})", e, url),
                }
            } else {
                AppError::network(format!("读取响应失败: {} (URL: {})", e, url))
            }
        })
    }
}
