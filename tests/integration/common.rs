//! Common utilities for integration tests.
//!
//! Provides a scripted stand-in for the district lookup service and helpers to
//! write config files into per-test directories.

use alloc::sync::Arc;
use std::{
    env, fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use tokio::{
    io::{AsyncReadExt as _, AsyncWriteExt as _},
    net::TcpListener,
    task,
};

/// Answers each request with the next scripted status; repeats the last one when the script runs out.
pub(crate) struct FakeLookupService {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
    task: task::JoinHandle<()>,
}

impl FakeLookupService {
    pub(crate) async fn start(statuses: &[u16]) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let statuses = statuses.to_vec();

        let recorded = Arc::clone(&requests);
        let task = tokio::spawn(async move {
            let mut served = 0;
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    return;
                };
                let mut buf = vec![0u8; 4096];
                let n = stream.read(&mut buf).await.unwrap_or(0);
                let head = String::from_utf8_lossy(&buf[..n]);
                let request_line = head.lines().next().unwrap_or_default().to_owned();
                recorded.lock().unwrap().push(request_line);

                let status = statuses
                    .get(served)
                    .or_else(|| statuses.last())
                    .copied()
                    .unwrap_or(200);
                served += 1;
                let response = format!(
                    "HTTP/1.1 {status} Scripted\r\ncontent-length: 0\r\nconnection: close\r\n\r\n"
                );
                drop(stream.write_all(response.as_bytes()).await);
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
            task,
        }
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for FakeLookupService {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Fresh directory for one test.
pub(crate) fn test_dir(name: &str) -> PathBuf {
    let dir = env::temp_dir().join("schoolportal_integration").join(name);
    drop(fs::remove_dir_all(&dir));
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Writes a config pointing at `base_url` with fast retries, plus any `extra` TOML.
pub(crate) fn write_config(name: &str, base_url: &str, extra: &str) -> PathBuf {
    let dir = test_dir(name);
    let path = dir.join("login.toml");
    let toml = format!(
        r#"
[lookup]
base_url = "{base_url}"
timeout_ms = 2000

[retry]
max_retries = 3
base_delay_ms = 10

{extra}
"#
    );
    fs::write(&path, toml).unwrap();
    path
}

pub(crate) fn config_arg(path: &Path) -> String {
    path.to_str().unwrap().to_owned()
}
