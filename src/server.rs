//! The HTTP transport in front of the [`InteractionDispatcher`].
//!
//! `tiny_http` does blocking I/O, so accepting, reading and answering requests happens on
//! tokio's blocking pool while the dispatching itself runs as a regular task.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::task;
use tracing::{debug, error, info, warn};

use crate::config::ServeConfig;
use crate::dispatch::{EndpointRequest, EndpointResponse, InteractionDispatcher};
use crate::interactions_endpoint::{Verifier, SIGNATURE_HEADER, TIMESTAMP_HEADER};
use crate::thanks::ThanksLedger;
use crate::{Error, Result};

/// Wires up the store, ledger and dispatcher described by `config` and serves until ctrl-c.
///
/// # Errors
///
/// Returns an error if the public key is invalid, the store can't be opened or the address can't
/// be bound.
pub async fn serve(config: &ServeConfig) -> Result<()> {
    let verifier = Verifier::from_hex(&config.public_key)?;
    let store = config.store.open().await?;
    let dispatcher = InteractionDispatcher::new(verifier, ThanksLedger::new(store));

    let server = InteractionServer::bind(&config.bind, dispatcher)?;
    let shutdown = server.shutdown_handle();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("shutdown requested");
                shutdown.shutdown();
            },
            Err(why) => error!(error = %why, "failed to listen for ctrl-c"),
        }
    });

    info!(address = ?server.local_addr(), store = %config.store, "listening for interactions");
    server.run().await
}

/// Serves interactions over HTTP until shut down.
pub struct InteractionServer {
    server: Arc<tiny_http::Server>,
    dispatcher: Arc<InteractionDispatcher>,
    stopping: Arc<AtomicBool>,
}

/// Stops a running [`InteractionServer`] from another task.
#[derive(Clone)]
pub struct ShutdownHandle {
    server: Arc<tiny_http::Server>,
    stopping: Arc<AtomicBool>,
}

impl ShutdownHandle {
    pub fn shutdown(&self) {
        self.stopping.store(true, Ordering::SeqCst);
        self.server.unblock();
    }
}

impl InteractionServer {
    /// Binds the HTTP listener.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Server`] if the address can't be bound.
    pub fn bind(address: &str, dispatcher: InteractionDispatcher) -> Result<Self> {
        let server = tiny_http::Server::http(address).map_err(|why| Error::Server(why.to_string()))?;

        Ok(Self {
            server: Arc::new(server),
            dispatcher: Arc::new(dispatcher),
            stopping: Arc::new(AtomicBool::new(false)),
        })
    }

    /// The address the listener is bound to, useful when binding port 0.
    #[must_use]
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    #[must_use]
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            server: Arc::clone(&self.server),
            stopping: Arc::clone(&self.stopping),
        }
    }

    /// Accepts requests until [`ShutdownHandle::shutdown`] is called.
    ///
    /// Requests are handled concurrently, each on its own task.
    ///
    /// # Errors
    ///
    /// Returns an error if the accept loop's worker thread panics.
    pub async fn run(self) -> Result<()> {
        loop {
            let server = Arc::clone(&self.server);
            let received = task::spawn_blocking(move || receive(&server))
                .await
                .map_err(|why| Error::Server(why.to_string()))?;

            let (request, incoming) = match received {
                Ok(received) => received,
                Err(_) if self.stopping.load(Ordering::SeqCst) => break,
                Err(why) => {
                    error!(error = %why, "failed to receive request");
                    continue;
                },
            };

            let dispatcher = Arc::clone(&self.dispatcher);
            tokio::spawn(async move {
                let response = respond(&dispatcher, &incoming).await;
                match task::spawn_blocking(move || request.respond(to_http(response))).await {
                    Ok(Ok(())) => {},
                    Ok(Err(why)) => warn!(error = %why, "failed to send response"),
                    Err(why) => error!(error = %why, "response task panicked"),
                }
            });
        }

        info!("interaction server stopped");
        Ok(())
    }
}

/// What a handler needs from a request, copied out so it can be held across awaits.
struct Incoming {
    is_post: bool,
    signature: Option<String>,
    timestamp: Option<String>,
    body: Vec<u8>,
}

fn receive(server: &tiny_http::Server) -> std::io::Result<(tiny_http::Request, Incoming)> {
    use std::io::Read;

    let mut request = server.recv()?;
    let mut body = Vec::new();
    request.as_reader().read_to_end(&mut body)?;

    debug!(method = %request.method(), url = request.url(), bytes = body.len(), "request received");

    let find_header = |name| {
        let header = request.headers().iter().find(|h| h.field.equiv(name))?;
        Some(header.value.as_str().to_owned())
    };
    let incoming = Incoming {
        is_post: *request.method() == tiny_http::Method::Post,
        signature: find_header(SIGNATURE_HEADER),
        timestamp: find_header(TIMESTAMP_HEADER),
        body,
    };
    Ok((request, incoming))
}

async fn respond(dispatcher: &InteractionDispatcher, incoming: &Incoming) -> EndpointResponse {
    if !incoming.is_post {
        return EndpointResponse {
            status: 405,
            content_type: None,
            body: Vec::new(),
        };
    }

    dispatcher
        .handle(EndpointRequest {
            signature: incoming.signature.as_deref(),
            timestamp: incoming.timestamp.as_deref(),
            body: &incoming.body,
        })
        .await
}

fn to_http(response: EndpointResponse) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let mut http = tiny_http::Response::from_data(response.body).with_status_code(response.status);
    if let Some(content_type) = response.content_type {
        match tiny_http::Header::from_bytes(&b"Content-Type"[..], content_type.as_bytes()) {
            Ok(header) => http.add_header(header),
            Err(()) => warn!(content_type, "invalid content type header"),
        }
    }
    http
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpStream;

    use super::*;
    use crate::interactions_endpoint::tests::{sign, verifier};
    use crate::store::MemoryStore;
    use crate::thanks::ThanksLedger;

    fn exchange(address: SocketAddr, raw: String) -> String {
        let mut stream = TcpStream::connect(address).unwrap();
        stream.write_all(raw.as_bytes()).unwrap();

        let mut response = String::new();
        stream.read_to_string(&mut response).unwrap();
        response
    }

    fn post(body: &str, signature: &str) -> String {
        format!(
            "POST / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\
             {SIGNATURE_HEADER}: {signature}\r\n{TIMESTAMP_HEADER}: 1700000000\r\n\
             Content-Length: {}\r\n\r\n{body}",
            body.len()
        )
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn answers_over_http() {
        let dispatcher =
            InteractionDispatcher::new(verifier(), ThanksLedger::new(Arc::new(MemoryStore::new())));
        let server = InteractionServer::bind("127.0.0.1:0", dispatcher).unwrap();
        let address = server.local_addr().unwrap();
        let shutdown = server.shutdown_handle();
        let running = tokio::spawn(server.run());

        let ping = r#"{"type":1}"#;
        let signature = sign("1700000000", ping.as_bytes());
        let response = task::spawn_blocking(move || exchange(address, post(ping, &signature)))
            .await
            .unwrap();
        assert!(response.starts_with("HTTP/1.1 200"), "{response}");
        assert!(response.ends_with(r#"{"type":1}"#), "{response}");
        assert!(!response.to_ascii_lowercase().contains("content-type"), "{response}");

        let forged = sign("1", ping.as_bytes());
        let response = task::spawn_blocking(move || exchange(address, post(ping, &forged)))
            .await
            .unwrap();
        assert!(response.starts_with("HTTP/1.1 401"), "{response}");
        assert!(response.ends_with("Invalid signature"), "{response}");

        let response = task::spawn_blocking(move || {
            exchange(address, "GET / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n".into())
        })
        .await
        .unwrap();
        assert!(response.starts_with("HTTP/1.1 405"), "{response}");

        shutdown.shutdown();
        running.await.unwrap().unwrap();
    }
}
