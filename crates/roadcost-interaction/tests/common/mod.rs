//! A minimal canned-response HTTP server for exercising the real client.

use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub target: String,
    pub headers: String,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

pub struct CannedResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
    /// Content-Length to announce when it should differ from the body.
    pub declared_length: Option<usize>,
}

impl CannedResponse {
    pub fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.as_bytes().to_vec(),
            declared_length: None,
        }
    }

    pub fn bytes(status: u16, content_type: &'static str, body: &[u8]) -> Self {
        Self {
            status,
            content_type,
            body: body.to_vec(),
            declared_length: None,
        }
    }

    /// Announces `declared_length` bytes but closes after sending `body`.
    pub fn truncated(content_type: &'static str, body: &[u8], declared_length: usize) -> Self {
        Self {
            status: 200,
            content_type,
            body: body.to_vec(),
            declared_length: Some(declared_length),
        }
    }
}

/// Serves the given responses in order, one per connection, then stops.
pub struct CannedServer {
    pub target: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl CannedServer {
    pub async fn start(responses: Vec<CannedResponse>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = requests.clone();
        tokio::spawn(async move {
            for response in responses {
                let Ok((mut stream, _)) = listener.accept().await else {
                    return;
                };
                // Record before answering so the client never observes a
                // response whose request is not yet visible.
                let Some(request) = read_request(&mut stream).await else {
                    continue;
                };
                recorded.lock().await.push(request);
                write_response(&mut stream, response).await;
            }
        });

        Self {
            target: format!("http://{addr}"),
            requests,
        }
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }
}

async fn read_request(stream: &mut TcpStream) -> Option<RecordedRequest> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        if let Some(pos) = find(&buffer, b"\r\n\r\n") {
            break pos + 4;
        }
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buffer.extend_from_slice(&chunk[..n]);
    };

    let headers = String::from_utf8_lossy(&buffer[..header_end]).into_owned();
    let lower = headers.to_ascii_lowercase();
    let mut body = buffer[header_end..].to_vec();

    if let Some(length) = content_length(&lower) {
        while body.len() < length {
            let n = stream.read(&mut chunk).await.ok()?;
            if n == 0 {
                break;
            }
            body.extend_from_slice(&chunk[..n]);
        }
    } else if lower.contains("transfer-encoding: chunked") {
        while find(&body, b"0\r\n\r\n").is_none() {
            let n = stream.read(&mut chunk).await.ok()?;
            if n == 0 {
                break;
            }
            body.extend_from_slice(&chunk[..n]);
        }
    }

    let request_line = headers.lines().next().unwrap_or_default().to_string();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default().to_string();

    Some(RecordedRequest {
        method,
        target,
        headers,
        body,
    })
}

async fn write_response(stream: &mut TcpStream, response: CannedResponse) {
    let reason = match response.status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        413 => "Payload Too Large",
        _ => "Error",
    };
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        response.status,
        reason,
        response.content_type,
        response.declared_length.unwrap_or(response.body.len())
    );
    if stream.write_all(head.as_bytes()).await.is_err() {
        return;
    }
    let _ = stream.write_all(&response.body).await;
    let _ = stream.shutdown().await;
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn content_length(lower_headers: &str) -> Option<usize> {
    lower_headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse().ok())
}
