//! Test utilities for talking to a live responder over raw TCP

use std::net::SocketAddr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use crate::infrastructure::config::BackendConfig;

/// Same backend on an OS-assigned port
pub fn ephemeral(mut config: BackendConfig) -> BackendConfig {
    config.port = 0;
    config
}

/// One parsed HTTP/1.1 response
#[derive(Debug)]
pub struct RawResponse {
    pub status_line: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RawResponse {
    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Read exactly one Content-Length delimited response
pub async fn read_response<R: AsyncBufRead + Unpin>(reader: &mut R) -> RawResponse {
    let mut status_line = String::new();
    reader.read_line(&mut status_line).await.unwrap();

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).await.unwrap();
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        let (name, value) = line.split_once(':').unwrap();
        headers.push((name.trim().to_string(), value.trim().to_string()));
    }

    let length: usize = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .map(|(_, v)| v.parse().unwrap())
        .unwrap_or(0);

    let mut body = vec![0u8; length];
    reader.read_exact(&mut body).await.unwrap();

    RawResponse {
        status_line: status_line.trim_end().to_string(),
        headers,
        body: String::from_utf8(body).unwrap(),
    }
}

/// Open a connection, send `raw` verbatim, read one response
pub async fn send_request(addr: SocketAddr, raw: &str) -> RawResponse {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(raw.as_bytes()).await.unwrap();

    let mut reader = BufReader::new(stream);
    read_response(&mut reader).await
}
