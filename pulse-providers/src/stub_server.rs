//! Minimal HTTP/1.1 server for exercising clients over a real socket

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

/// How the server answers every request
#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Json { status: u16, body: String },
    /// Read the request and never answer
    Hang,
}

impl Reply {
    pub(crate) fn ok(body: &str) -> Self {
        Reply::Json {
            status: 200,
            body: body.to_string(),
        }
    }

    pub(crate) fn status(status: u16, body: &str) -> Self {
        Reply::Json {
            status,
            body: body.to_string(),
        }
    }
}

/// Request head as received: request line plus headers, header names lowercased
#[derive(Debug, Clone)]
pub(crate) struct Received {
    pub target: String,
    pub head: String,
}

impl Received {
    pub(crate) fn header(&self, name: &str) -> Option<&str> {
        self.head.lines().skip(1).find_map(|line| {
            let (key, value) = line.split_once(':')?;
            (key.trim().eq_ignore_ascii_case(name)).then(|| value.trim())
        })
    }
}

pub(crate) struct StubServer {
    pub base_url: String,
    requests: mpsc::UnboundedReceiver<Received>,
}

impl StubServer {
    pub(crate) async fn start(reply: Reply) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                tokio::spawn(serve(stream, reply.clone(), tx.clone()));
            }
        });

        Self {
            base_url: format!("http://{}", addr),
            requests: rx,
        }
    }

    /// Next request the server saw
    pub(crate) async fn received(&mut self) -> Received {
        tokio::time::timeout(Duration::from_secs(5), self.requests.recv())
            .await
            .unwrap()
            .unwrap()
    }
}

async fn serve(mut stream: TcpStream, reply: Reply, tx: mpsc::UnboundedSender<Received>) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }

    let head = String::from_utf8_lossy(&buf).to_string();
    let target = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or_default()
        .to_string();
    let _ = tx.send(Received { target, head });

    match reply {
        Reply::Hang => std::future::pending::<()>().await,
        Reply::Json { status, body } => {
            let response = format!(
                "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    }
}
