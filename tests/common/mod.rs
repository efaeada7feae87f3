//! Shared utilities for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::time::Instant;

use canvas_fetch::client::{
    FetchClient, FetchError, HttpReply, HttpSend, ManualClock, Relay, ResponseCache, RetryPolicy,
    TransportStrategy,
};
use canvas_fetch::client::relay::Direct;

/// What a scripted sender does for one request.
#[derive(Debug, Clone)]
pub enum Script {
    Reply(u16, String),
    Fail(&'static str),
    Hang,
}

pub fn ok_json(body: serde_json::Value) -> Script {
    Script::Reply(200, body.to_string())
}

/// One recorded request.
#[derive(Debug, Clone)]
pub struct Call {
    pub url: String,
    pub credential: String,
    pub at: Instant,
}

type Responder = dyn Fn(&str) -> Script + Send + Sync;

/// An `HttpSend` fake driven by a closure over the request URL.
pub struct ScriptedSender {
    responder: Box<Responder>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedSender {
    pub fn new<F>(responder: F) -> Arc<Self>
    where
        F: Fn(&str) -> Script + Send + Sync + 'static,
    {
        Arc::new(Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn urls(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.url).collect()
    }
}

#[async_trait]
impl HttpSend for ScriptedSender {
    async fn get(&self, url: &str, credential: &str) -> Result<HttpReply, FetchError> {
        self.calls.lock().unwrap().push(Call {
            url: url.to_string(),
            credential: credential.to_string(),
            at: Instant::now(),
        });
        match (self.responder)(url) {
            Script::Reply(status, body) => Ok(HttpReply { status, body }),
            Script::Fail(reason) => Err(FetchError::Transport(reason.to_string())),
            Script::Hang => std::future::pending().await,
        }
    }
}

/// Ladder of `direct` plus three relays that prefix the request URL with
/// `relayN://` so tests can tell strategies apart.
pub fn test_ladder() -> Vec<Arc<dyn TransportStrategy>> {
    vec![
        Arc::new(Direct),
        Arc::new(Relay::new("relay1", "relay1://{url}")),
        Arc::new(Relay::new("relay2", "relay2://{url}")),
        Arc::new(Relay::new("relay3", "relay3://{raw_url}")),
    ]
}

pub fn test_policy() -> RetryPolicy {
    RetryPolicy {
        passes: 3,
        pass_delay: Duration::from_secs(1),
        attempt_timeout: Duration::from_secs(30),
    }
}

/// Client over a scripted sender with a manual clock.
pub fn scripted_client(sender: Arc<ScriptedSender>) -> (FetchClient, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(
        chrono::DateTime::parse_from_rfc3339("2026-03-01T12:00:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc),
    ));
    let cache = ResponseCache::with_clock(Duration::from_secs(300), clock.clone());
    let client = FetchClient::new(sender, test_ladder(), cache, test_policy());
    (client, clock)
}

/// Request line and headers as seen by the mock server.
#[derive(Debug, Clone)]
pub struct RequestHead {
    pub path: String,
    pub headers: Vec<(String, String)>,
}

impl RequestHead {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Start a programmable mock HTTP server on an ephemeral port.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(RequestHead) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let Some(head) = read_head(&mut socket).await else {
                            return;
                        };
                        let (status, body) = f(head).await;
                        let status_text = match status {
                            200 => "200 OK",
                            401 => "401 Unauthorized",
                            403 => "403 Forbidden",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a mock server that answers every request with `response` verbatim.
///
/// Returns the address and a counter of requests served.
pub async fn start_raw_backend(response: &'static str) -> (SocketAddr, Arc<AtomicU32>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicU32::new(0));
    let counter = hits.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let counter = counter.clone();
                    tokio::spawn(async move {
                        if read_head(&mut socket).await.is_none() {
                            return;
                        }
                        counter.fetch_add(1, Ordering::SeqCst);
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, hits)
}

async fn read_head(socket: &mut tokio::net::TcpStream) -> Option<RequestHead> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let text = String::from_utf8_lossy(&buf);
    let mut lines = text.split("\r\n");
    let path = lines.next()?.split_whitespace().nth(1)?.to_string();
    let headers = lines
        .take_while(|l| !l.is_empty())
        .filter_map(|l| l.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();
    Some(RequestHead { path, headers })
}

/// An address nothing is listening on.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}
