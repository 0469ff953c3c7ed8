//! 测试用的本地 HTTP 服务：对每个连接返回同一份固定响应，并记录请求头。

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub(crate) struct CannedResponse {
    status: u16,
    content_type: String,
    body: Vec<u8>,
    byte_delay: Option<Duration>,
}

impl CannedResponse {
    pub(crate) fn json(status: u16, body: &str) -> Self {
        Self::bytes(status, "application/json", body.as_bytes().to_vec())
    }

    pub(crate) fn bytes(status: u16, content_type: &str, body: Vec<u8>) -> Self {
        Self {
            status,
            content_type: content_type.to_string(),
            body,
            byte_delay: None,
        }
    }

    /// 响应头立即发送，响应体每隔 `delay` 发送一个字节
    pub(crate) fn trickled(mut self, delay: Duration) -> Self {
        self.byte_delay = Some(delay);
        self
    }

    fn head(&self) -> String {
        let reason = if self.status == 200 { "OK" } else { "Error" };
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            self.status,
            reason,
            self.content_type,
            self.body.len()
        )
    }
}

pub(crate) struct TestServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
    task: JoinHandle<()>,
}

impl TestServer {
    pub(crate) fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub(crate) async fn last_request(&self) -> Option<String> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub(crate) async fn serve(response: CannedResponse) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&requests);

    let task = tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                match stream.read(&mut chunk).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&chunk[..n]),
                }
                if request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            log.lock()
                .unwrap()
                .push(String::from_utf8_lossy(&request).into_owned());

            let _ = stream.write_all(response.head().as_bytes()).await;
            match response.byte_delay {
                Some(delay) => {
                    let _ = stream.flush().await;
                    for byte in &response.body {
                        tokio::time::sleep(delay).await;
                        if stream.write_all(&[*byte]).await.is_err() {
                            break;
                        }
                        let _ = stream.flush().await;
                    }
                }
                None => {
                    let _ = stream.write_all(&response.body).await;
                }
            }
            let _ = stream.shutdown().await;
        }
    });

    TestServer {
        addr,
        requests,
        task,
    }
}

/// 构造一个包含单个顶层目录的 zip 压缩包
pub(crate) fn zip_fixture(top_dir: &str) -> Vec<u8> {
    use std::io::Write;
    use zip::write::FileOptions;

    let mut cursor = std::io::Cursor::new(Vec::new());
    {
        let mut writer = zip::ZipWriter::new(&mut cursor);
        let options = FileOptions::default();
        writer.add_directory(format!("{top_dir}/"), options).unwrap();
        writer.add_directory(format!("{top_dir}/bin/"), options).unwrap();
        writer
            .start_file(format!("{top_dir}/bin/java.exe"), options.unix_permissions(0o755))
            .unwrap();
        writer.write_all(b"fake java").unwrap();
        writer.start_file(format!("{top_dir}/release"), options).unwrap();
        writer.write_all(b"JAVA_VERSION=\"17\"").unwrap();
        writer.finish().unwrap();
    }
    cursor.into_inner()
}
