//! Shared fixtures for integration testing: mock CDN upstreams.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// A mock upstream origin bound to an ephemeral loopback port.
///
/// Records every request path it sees, so tests can assert both what the
/// proxy fetched and that nothing was fetched at all.
pub struct MockUpstream {
    pub addr: SocketAddr,
    hits: Arc<AtomicU32>,
    paths: Arc<Mutex<Vec<String>>>,
}

impl MockUpstream {
    /// Number of requests the upstream has received.
    pub fn hits(&self) -> u32 {
        self.hits.load(Ordering::SeqCst)
    }

    /// Request paths seen so far, in arrival order.
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }

    /// Build an upstream base URL rooted at the given path.
    pub fn base_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start a mock upstream that answers every request with a fixed response.
///
/// An empty `content_type` omits the Content-Type header entirely.
pub async fn start_mock_upstream(
    status: u16,
    content_type: &'static str,
    body: &'static [u8],
) -> MockUpstream {
    start_upstream(status, content_type, body, Duration::ZERO).await
}

/// Start a mock upstream that accepts connections and reads requests but
/// stalls for `delay` before answering. Used to exercise the proxy's
/// upstream timeout.
pub async fn start_stalling_upstream(delay: Duration) -> MockUpstream {
    start_upstream(200, "text/plain", b"too late", delay).await
}

async fn start_upstream(
    status: u16,
    content_type: &'static str,
    body: &'static [u8],
    delay: Duration,
) -> MockUpstream {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicU32::new(0));
    let paths = Arc::new(Mutex::new(Vec::new()));

    let upstream = MockUpstream {
        addr,
        hits: hits.clone(),
        paths: paths.clone(),
    };

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let hits = hits.clone();
                    let paths = paths.clone();
                    tokio::spawn(async move {
                        let Some(path) = read_request_path(&mut socket).await else {
                            return;
                        };
                        hits.fetch_add(1, Ordering::SeqCst);
                        paths.lock().unwrap().push(path);

                        if !delay.is_zero() {
                            tokio::time::sleep(delay).await;
                        }

                        let mut response = format!(
                            "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n",
                            status,
                            reason(status),
                            body.len(),
                        );
                        if !content_type.is_empty() {
                            response.push_str(&format!("Content-Type: {content_type}\r\n"));
                        }
                        response.push_str("\r\n");

                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.write_all(body).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    upstream
}

/// Read the request head and return the request-target from the request
/// line. Requests are GETs, so there is no body to drain.
async fn read_request_path(socket: &mut TcpStream) -> Option<String> {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    loop {
        let n = socket.read(&mut buf).await.ok()?;
        if n == 0 {
            return None;
        }
        head.extend_from_slice(&buf[..n]);
        if head.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }
    let head = String::from_utf8(head).ok()?;
    let request_line = head.lines().next()?;
    request_line.split_whitespace().nth(1).map(str::to_string)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        204 => "No Content",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "OK",
    }
}
