//! Scripted mock chat server for integration tests.

#![allow(dead_code)] // each integration test binary uses a subset
#![allow(clippy::unwrap_used, clippy::expect_used)] // test support

use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::{TcpListener, TcpStream},
    task::JoinHandle,
};

/// Maps one request line to one response line (`None` closes the
/// connection without replying).
pub type Responder = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// A TCP server speaking the line protocol from a scripted responder.
///
/// Accepts any number of connections; each connection reads request lines
/// and answers them one-for-one, preserving the protocol's positional
/// correlation. The `end` sentinel closes the connection without a reply,
/// as the real server does.
pub struct MockServer {
    addr: SocketAddr,
    accept_task: JoinHandle<()>,
    request_log: Arc<Mutex<Vec<String>>>,
}

impl MockServer {
    /// Bind to an ephemeral local port and start serving.
    pub async fn spawn(responder: Responder) -> Self {
        let listener =
            TcpListener::bind("127.0.0.1:0").await.expect("bind ephemeral test port");
        let addr = listener.local_addr().expect("local addr");
        let request_log = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&request_log);
        let accept_task = tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                let responder = Arc::clone(&responder);
                let log = Arc::clone(&log);
                tokio::spawn(serve_connection(socket, responder, log));
            }
        });

        Self { addr, accept_task, request_log }
    }

    /// A server that answers every request with a fixed script keyed on
    /// the verb, suitable for most scenarios.
    pub async fn with_script(
        script: impl Fn(&str, &[&str]) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        Self::spawn(Arc::new(move |line: &str| {
            let mut parts = line.split("/%");
            let verb = parts.next().unwrap_or_default();
            let args: Vec<&str> = parts.collect();
            script(verb, &args)
        }))
        .await
    }

    /// Host the client should connect to.
    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    /// Port the client should connect to.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Every request line received so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.request_log.lock().unwrap().clone()
    }

    /// Stop accepting connections.
    pub fn shutdown(&self) {
        self.accept_task.abort();
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.accept_task.abort();
    }
}

/// Serve one client connection line by line.
async fn serve_connection(
    socket: TcpStream,
    responder: Responder,
    log: Arc<Mutex<Vec<String>>>,
) {
    let (read_half, mut write_half) = socket.into_split();
    let mut lines = BufReader::new(read_half).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        log.lock().unwrap().push(line.clone());
        if line == "end" {
            break;
        }
        let Some(mut reply) = responder(&line) else {
            break;
        };
        reply.push('\n');
        if write_half.write_all(reply.as_bytes()).await.is_err() {
            break;
        }
    }
}
