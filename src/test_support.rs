//! In-process HTTP endpoint for exercising the form clients.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub struct CapturedRequest {
    pub head: String,
    pub body: Vec<u8>,
}

/// Accepts one request, answers it with `status` and `reply`, and hands back what was sent.
pub async fn serve_once(
    status: &'static str,
    reply: &'static str,
) -> (String, JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let addr = listener.local_addr().expect("listener has no address");

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept failed");
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        let header_end = loop {
            let n = socket.read(&mut chunk).await.expect("read failed");
            assert!(n > 0, "connection closed before headers");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = find(&buf, b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let lower = head.to_lowercase();
        let content_length = lower.lines().find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.trim() == "content-length" {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        });

        let body = match content_length {
            Some(len) => {
                while buf.len() < header_end + len {
                    let n = socket.read(&mut chunk).await.expect("read failed");
                    assert!(n > 0, "connection closed before body");
                    buf.extend_from_slice(&chunk[..n]);
                }
                buf[header_end..header_end + len].to_vec()
            }
            None if lower.contains("transfer-encoding: chunked") => {
                while !buf.ends_with(b"0\r\n\r\n") {
                    let n = socket.read(&mut chunk).await.expect("read failed");
                    assert!(n > 0, "connection closed before last chunk");
                    buf.extend_from_slice(&chunk[..n]);
                }
                buf[header_end..].to_vec()
            }
            None => Vec::new(),
        };

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{reply}",
            reply.len()
        );
        socket
            .write_all(response.as_bytes())
            .await
            .expect("write failed");
        let _ = socket.shutdown().await;

        CapturedRequest { head, body }
    });

    (format!("http://{addr}/exec"), handle)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
