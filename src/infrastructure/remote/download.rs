use super::http_client::HttpClient;
use crate::error::{AppError, AppResult};
use futures_util::StreamExt;
use std::future::Future;
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncWriteExt;

/// 流式下载到文件并回调进度 `(已下载, 总大小)`。
///
/// 不重试、不续传；失败时尽量删除已写入的部分文件。
/// 下载客户端不限制总时长，只在超过 `stall_timeout` 没有收到数据时中止。
pub async fn download_to_file(
    client: &HttpClient,
    url: &str,
    file_path: &Path,
    progress: impl Fn(u64, u64),
) -> AppResult<u64> {
    match download_to_file_internal(client, url, file_path, &progress).await {
        Ok(written) => Ok(written),
        Err(e) => {
            if let Err(cleanup) = tokio::fs::remove_file(file_path).await {
                tracing::debug!("删除未完成的下载文件失败: {cleanup}");
            }
            Err(e)
        }
    }
}

async fn download_to_file_internal(
    client: &HttpClient,
    url: &str,
    file_path: &Path,
    progress: &impl Fn(u64, u64),
) -> AppResult<u64> {
    let stall = client.stall_timeout();
    let response = within(stall, client.get(url, "*/*")).await??;

    let total_size = response.content_length().unwrap_or(0);
    let mut downloaded = 0u64;
    let mut stream = response.bytes_stream();

    let mut file = tokio::fs::File::create(file_path)
        .await
        .map_err(|e| AppError::filesystem(file_path, format!("创建文件失败: {}", e)))?;

    while let Some(chunk) = within(stall, stream.next()).await? {
        let chunk = chunk.map_err(|e| AppError::network(format!("读取数据失败: {}", e)))?;
        downloaded += chunk.len() as u64;
        progress(downloaded, total_size);
        file.write_all(&chunk)
            .await
            .map_err(|e| AppError::filesystem(file_path, format!("写入文件失败: {}", e)))?;
    }

    file.flush()
        .await
        .map_err(|e| AppError::filesystem(file_path, format!("刷新文件失败: {}", e)))?;

    Ok(downloaded)
}

/// 在限定时间内等待 `future`；没有限制时直接等待
async fn within<F: Future>(limit: Option<Duration>, future: F) -> AppResult<F::Output> {
    match limit {
        Some(limit) => tokio::time::timeout(limit, future).await.map_err(|_| {
            AppError::network(format!("{} 秒内没有收到数据", limit.as_secs()))
        }),
        None => Ok(future.await),
    }
}
