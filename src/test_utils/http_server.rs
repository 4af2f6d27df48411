//! A minimal local HTTP responder.
//!
//! Serves fixed responses per path over plain HTTP/1.1 with
//! `Connection: close`. Unknown paths get a 404.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

type Routes = Arc<Mutex<HashMap<String, (u16, Vec<u8>)>>>;

/// Local HTTP server bound to an ephemeral port; stops when dropped.
pub struct TestServer {
    addr: SocketAddr,
    routes: Routes,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Bind to `127.0.0.1:0` and start serving on the current runtime.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let routes: Routes = Arc::default();

        let accept_routes = Arc::clone(&routes);
        let handle = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let routes = Arc::clone(&accept_routes);
                tokio::spawn(async move {
                    let _ = serve(stream, routes).await;
                });
            }
        });

        Self {
            addr,
            routes,
            handle,
        }
    }

    /// Full URL for `path` on this server.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Answer requests for `path` with `status` and `body`.
    pub fn respond(&self, path: &str, status: u16, body: impl Into<Vec<u8>>) {
        self.routes
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(path.to_string(), (status, body.into()));
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve(stream: TcpStream, routes: Routes) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).await?;
    let path = request_line.split_whitespace().nth(1).unwrap_or("/").to_string();

    // Drain headers; requests under test carry no body.
    loop {
        let mut line = String::new();
        let read = reader.read_line(&mut line).await?;
        if read == 0 || line == "\r\n" || line == "\n" {
            break;
        }
    }

    let (status, body) = routes
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .get(&path)
        .cloned()
        .unwrap_or_else(|| (404, b"not found".to_vec()));

    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    };

    let mut stream = reader.into_inner();
    let head = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/octet-stream\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    );
    stream.write_all(head.as_bytes()).await?;
    stream.write_all(&body).await?;
    stream.shutdown().await
}
