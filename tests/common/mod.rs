//! Shared utilities for integration tests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Request heads received by a mock site, in arrival order.
pub type RequestLog = Arc<Mutex<Vec<String>>>;

/// Start a mock static site serving `pages` (path → status, body).
///
/// Unknown paths answer 404. Returns the bound address and a log of raw
/// request heads.
pub async fn start_site_backend(pages: &[(&str, u16, &str)]) -> (SocketAddr, RequestLog) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let log: RequestLog = Arc::new(Mutex::new(Vec::new()));

    let pages: Arc<HashMap<String, (u16, String)>> = Arc::new(
        pages
            .iter()
            .map(|(path, status, body)| (path.to_string(), (*status, body.to_string())))
            .collect(),
    );

    let requests = log.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let pages = pages.clone();
                    let requests = requests.clone();
                    tokio::spawn(async move {
                        let head = read_head(&mut socket).await;
                        let path = head
                            .split_whitespace()
                            .nth(1)
                            .unwrap_or("/")
                            .to_string();
                        requests.lock().unwrap().push(head);

                        let (status, body) = pages
                            .get(&path)
                            .cloned()
                            .unwrap_or((404, "Not Found".to_string()));
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, log)
}

async fn read_head(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// An address nothing is listening on.
#[allow(dead_code)]
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
