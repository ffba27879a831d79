//! # Mock Framework
//!
//! Utilities for testing clients without a server.
//!
//! Use [`mock_api`] to get an [`ApiClient`] and a receiver of the requests it
//! sends. Then use [`expect_request`] to inspect the next request and
//! [`reply`] to answer it.

use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};

use crate::credentials::StaticToken;
use crate::error::TransportError;
use crate::request_framework::ApiClient;
use crate::transport::{HttpRequest, HttpResponse, Transport};

pub type Responder = oneshot::Sender<Result<HttpResponse, TransportError>>;

/// A request captured by the mock, with the channel its answer goes back on.
#[derive(Debug)]
pub struct MockExchange {
    pub request: HttpRequest,
    pub respond_to: Responder,
}

/// Transport that forwards every request to a channel the test controls.
///
/// The test plays the server: it reads the request off the receiver, checks
/// it, and decides the response (success, error status, transport failure).
#[derive(Clone)]
pub struct MockTransport {
    sender: mpsc::Sender<MockExchange>,
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(MockExchange { request, respond_to })
            .await
            .map_err(|_| TransportError::Closed)?;
        response.await.map_err(|_| TransportError::Closed)?
    }
}

pub fn create_mock_transport(buffer_size: usize) -> (MockTransport, mpsc::Receiver<MockExchange>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (MockTransport { sender }, receiver)
}

/// An [`ApiClient`] over a mock transport, logged in with `token` if given.
pub fn mock_api(token: Option<&str>, buffer_size: usize) -> (ApiClient, mpsc::Receiver<MockExchange>) {
    let (transport, receiver) = create_mock_transport(buffer_size);
    let credentials = match token {
        Some(token) => StaticToken::new(token),
        None => StaticToken::absent(),
    };
    (ApiClient::new(Arc::new(transport), Arc::new(credentials)), receiver)
}

/// Waits for the next request.
pub async fn expect_request(receiver: &mut mpsc::Receiver<MockExchange>) -> Option<(HttpRequest, Responder)> {
    receiver
        .recv()
        .await
        .map(|exchange| (exchange.request, exchange.respond_to))
}

/// Answers with `status`; `Value::Null` means an empty body.
pub fn reply(responder: Responder, status: u16, body: Value) {
    let body = if body.is_null() { None } else { Some(body) };
    let _ = responder.send(Ok(HttpResponse::new(status, body)));
}

/// Fails the request before any response exists.
pub fn reply_error(responder: Responder, error: TransportError) {
    let _ = responder.send(Err(error));
}

/// Asserts that nothing reached the transport.
pub fn assert_no_request(receiver: &mut mpsc::Receiver<MockExchange>) {
    assert!(receiver.try_recv().is_err(), "Expected no request to be sent");
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(mut lines) = self.0.lock() {
            lines.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` under a plain-text subscriber and returns what it logged.
pub fn capture_logs(f: impl FnOnce()) -> String {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();

    tracing::subscriber::with_default(subscriber, f);

    let bytes = buffer.0.lock().map(|b| b.clone()).unwrap_or_default();
    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_transport() {
        let (transport, mut receiver) = create_mock_transport(10);

        let send_task = tokio::spawn(async move {
            let request = HttpRequest {
                method: Method::GET,
                path: "/api/customers".to_string(),
                headers: Default::default(),
                body: None,
            };
            transport.send(request).await
        });

        let (request, responder) = expect_request(&mut receiver).await.expect("Expected a request");
        assert_eq!(request.path, "/api/customers");
        reply(responder, 200, json!([]));

        let resp = send_task.await.unwrap().unwrap();
        assert_eq!(resp.status, 200);
        assert_eq!(resp.body, Some(json!([])));
    }

    #[tokio::test]
    async fn dropped_responder_surfaces_as_closed() {
        let (transport, mut receiver) = create_mock_transport(1);

        let send_task = tokio::spawn(async move {
            let request = HttpRequest {
                method: Method::DELETE,
                path: "/api/refunds/1".to_string(),
                headers: Default::default(),
                body: None,
            };
            transport.send(request).await
        });

        let (_, responder) = expect_request(&mut receiver).await.unwrap();
        drop(responder);

        assert_eq!(send_task.await.unwrap(), Err(TransportError::Closed));
    }
}
