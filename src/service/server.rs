//! Reference service: routes envelopes to a [`ServiceHandler`] and broadcasts
//! `StatusChanged` to every connected client.
//!
//! Each connection runs two concurrent activities:
//!
//! 1. **Reader** -- reads newline-delimited `CommandEnvelope`s and spawns one
//!    task per command, so a slow handler call does not hold up the others.
//! 2. **Signal forwarder** -- receives broadcast `SignalEnvelope`s and writes
//!    them to the client.
//!
//! Both share one writer; every envelope is written as a whole line.

use crate::error::{FireBoxError, Result};
use crate::service::contract::{
    CommandEnvelope, ContractError, ContractErrorKind, Method, ResponseEnvelope, SignalEnvelope,
};
use crate::service::transport::Listener;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};
use tokio::sync::{Mutex, broadcast};
use tokio_util::sync::CancellationToken;
use tokio_util::task::AbortOnDropHandle;

/// Request id used when a line is too malformed to carry its own.
const UNPARSEABLE_REQUEST_ID: &str = "parse-error";

/// Implements the service's method surface.
#[async_trait]
pub trait ServiceHandler: Send + Sync + 'static {
    /// Current status string.
    async fn status(&self) -> Result<String>;
    /// Start the backend. `Ok(false)` means it was already running.
    async fn start(&self) -> Result<bool>;
    /// Stop the backend. `Ok(false)` means it was already stopped.
    async fn stop(&self) -> Result<bool>;
}

/// In-memory running flag; the lifecycle the background service exposes.
#[derive(Debug, Default)]
pub struct LifecycleHandler {
    running: AtomicBool,
}

impl LifecycleHandler {
    #[must_use]
    pub fn new(running: bool) -> Self {
        Self {
            running: AtomicBool::new(running),
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ServiceHandler for LifecycleHandler {
    async fn status(&self) -> Result<String> {
        let status = if self.is_running() { "running" } else { "stopped" };
        Ok(status.to_owned())
    }

    async fn start(&self) -> Result<bool> {
        Ok(!self.running.swap(true, Ordering::SeqCst))
    }

    async fn stop(&self) -> Result<bool> {
        Ok(self.running.swap(false, Ordering::SeqCst))
    }
}

/// Broadcasts `StatusChanged` to every connection of one server.
#[derive(Clone)]
pub struct StatusEmitter {
    signal_tx: broadcast::Sender<SignalEnvelope>,
}

impl StatusEmitter {
    /// Emit `StatusChanged(status)`. Returns how many connections will see it.
    pub fn emit(&self, status: &str) -> usize {
        let signal = SignalEnvelope::status_changed(uuid::Uuid::new_v4().to_string(), status);
        tracing::debug!(status, "emitting StatusChanged");
        self.signal_tx.send(signal).unwrap_or(0)
    }
}

/// Serves the envelope protocol on behalf of a handler.
pub struct ServiceServer<H: ServiceHandler> {
    handler: Arc<H>,
    emitter: StatusEmitter,
}

impl<H: ServiceHandler> Clone for ServiceServer<H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
            emitter: self.emitter.clone(),
        }
    }
}

impl<H: ServiceHandler> ServiceServer<H> {
    #[must_use]
    pub fn new(handler: H, event_capacity: usize) -> Self {
        let (signal_tx, _signal_rx) = broadcast::channel(event_capacity.max(1));
        Self {
            handler: Arc::new(handler),
            emitter: StatusEmitter { signal_tx },
        }
    }

    /// Handle for emitting `StatusChanged` outside of a `Start`/`Stop` call.
    #[must_use]
    pub fn emitter(&self) -> StatusEmitter {
        self.emitter.clone()
    }

    #[must_use]
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Accept connections until `shutdown` is cancelled.
    pub async fn run(&self, listener: Listener, shutdown: CancellationToken) -> Result<()> {
        loop {
            tokio::select! {
                () = shutdown.cancelled() => {
                    tracing::info!("shutdown requested; no longer accepting connections");
                    break;
                }
                accepted = listener.accept() => match accepted {
                    Ok(stream) => {
                        let server = self.clone();
                        let shutdown = shutdown.clone();
                        tokio::spawn(async move {
                            tokio::select! {
                                () = shutdown.cancelled() => {}
                                served = server.serve_stream(stream) => {
                                    if let Err(e) = served {
                                        tracing::warn!(error = %e, "connection ended with error");
                                    }
                                }
                            }
                        });
                    }
                    Err(e) => tracing::warn!(error = %e, "failed to accept connection"),
                },
            }
        }
        Ok(())
    }

    /// Serve one connected client until it disconnects.
    pub async fn serve_stream<S>(&self, stream: S) -> Result<()>
    where
        S: AsyncRead + AsyncWrite + Send + 'static,
    {
        let (read_half, write_half) = tokio::io::split(stream);
        let writer = Arc::new(Mutex::new(BufWriter::new(write_half)));
        tracing::debug!("client connected");

        let signal_writer = Arc::clone(&writer);
        let mut signal_rx = self.emitter.signal_tx.subscribe();
        // Aborted when this future completes or is dropped mid-connection.
        let _forwarder = AbortOnDropHandle::new(tokio::spawn(async move {
            loop {
                match signal_rx.recv().await {
                    Ok(signal) => match serde_json::to_string(&signal) {
                        Ok(json) => {
                            let mut w = signal_writer.lock().await;
                            if let Err(e) = write_line(&mut w, &json).await {
                                tracing::debug!(
                                    error = %e,
                                    "failed to write signal; stopping signal forwarder"
                                );
                                break;
                            }
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "failed to serialize signal; skipping");
                        }
                    },
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "signal forwarder lagged; signals dropped");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }));

        let mut lines = BufReader::new(read_half).lines();
        let result = loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break Ok(()),
                Err(e) => break Err(FireBoxError::Io(e)),
            };
            if line.trim().is_empty() {
                continue;
            }

            let server = self.clone();
            let writer = Arc::clone(&writer);
            tokio::spawn(async move {
                let response = server.handle_line(&line).await;
                match serde_json::to_string(&response) {
                    Ok(json) => {
                        let mut w = writer.lock().await;
                        if let Err(e) = write_line(&mut w, &json).await {
                            tracing::debug!(error = %e, "failed to write response");
                        }
                    }
                    Err(e) => tracing::error!(error = %e, "failed to serialize response"),
                }
            });
        };

        tracing::debug!("client disconnected");
        result
    }

    /// Decode, validate, and route a single line.
    pub async fn handle_line(&self, line: &str) -> ResponseEnvelope {
        let raw: serde_json::Value = match serde_json::from_str(line.trim()) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "failed to parse command envelope");
                return ResponseEnvelope::error(
                    UNPARSEABLE_REQUEST_ID,
                    format!("failed to parse command envelope: {e}"),
                );
            }
        };
        let request_id = raw
            .get("request_id")
            .and_then(serde_json::Value::as_str)
            .unwrap_or(UNPARSEABLE_REQUEST_ID)
            .to_owned();

        let envelope = match decode_command(raw) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!(request_id = %request_id, error = %e, "rejected command envelope");
                return ResponseEnvelope::error(request_id, e.to_string());
            }
        };
        self.route(&envelope).await
    }

    /// Route a validated command to the handler.
    pub async fn route(&self, envelope: &CommandEnvelope) -> ResponseEnvelope {
        let request_id = envelope.request_id.clone();
        let outcome = match envelope.method {
            Method::GetStatus => self
                .handler
                .status()
                .await
                .map(|status| serde_json::json!({ "status": status })),
            Method::Start => self.handle_transition(Method::Start).await,
            Method::Stop => self.handle_transition(Method::Stop).await,
        };
        match outcome {
            Ok(payload) => ResponseEnvelope::ok(request_id, payload),
            Err(e) => {
                tracing::warn!(
                    request_id = %request_id,
                    method = envelope.method.as_str(),
                    error = %e,
                    "handler failed"
                );
                ResponseEnvelope::error(request_id, e.to_string())
            }
        }
    }

    async fn handle_transition(&self, method: Method) -> Result<serde_json::Value> {
        let success = if method == Method::Start {
            self.handler.start().await?
        } else {
            self.handler.stop().await?
        };
        if success {
            let status = self.handler.status().await?;
            tracing::info!(method = method.as_str(), status = %status, "status changed");
            self.emitter.emit(&status);
        }
        Ok(serde_json::json!({ "success": success }))
    }
}

fn decode_command(raw: serde_json::Value) -> std::result::Result<CommandEnvelope, ContractError> {
    if let Some(method) = raw.get("method").and_then(serde_json::Value::as_str)
        && Method::parse(method).is_none()
    {
        return Err(ContractError::new(
            ContractErrorKind::UnknownMethod,
            format!("unknown method `{method}`"),
        ));
    }
    let envelope: CommandEnvelope = serde_json::from_value(raw).map_err(|e| {
        ContractError::new(
            ContractErrorKind::InvalidEnvelope,
            format!("malformed command envelope: {e}"),
        )
    })?;
    envelope.validate()?;
    Ok(envelope)
}

/// Write a single JSON line to the buffered writer and flush.
async fn write_line<W>(writer: &mut BufWriter<W>, json: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(json.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_server(running: bool) -> ServiceServer<LifecycleHandler> {
        ServiceServer::new(LifecycleHandler::new(running), 8)
    }

    #[tokio::test]
    async fn get_status_reports_running_flag() {
        let server = make_server(true);
        let resp = server
            .route(&CommandEnvelope::new("req-1", Method::GetStatus))
            .await;
        assert!(resp.ok);
        assert_eq!(resp.request_id, "req-1");
        assert_eq!(resp.payload["status"], "running");
    }

    #[tokio::test]
    async fn start_twice_reports_false_the_second_time() {
        let server = make_server(false);
        let mut signals = server.emitter.signal_tx.subscribe();

        let first = server.route(&CommandEnvelope::new("a", Method::Start)).await;
        let second = server.route(&CommandEnvelope::new("b", Method::Start)).await;
        assert_eq!(first.payload["success"], true);
        assert_eq!(second.payload["success"], false);
        assert!(second.ok);

        let signal = signals.try_recv().expect("one StatusChanged");
        assert_eq!(signal.status(), Some("running"));
        assert!(signals.try_recv().is_err());
    }

    #[tokio::test]
    async fn stop_emits_stopped() {
        let server = make_server(true);
        let mut signals = server.emitter.signal_tx.subscribe();
        let resp = server.route(&CommandEnvelope::new("s", Method::Stop)).await;
        assert_eq!(resp.payload["success"], true);
        assert_eq!(
            signals.try_recv().expect("signal").status(),
            Some("stopped")
        );
        assert!(!server.handler().is_running());
    }

    #[tokio::test]
    async fn unparseable_line_gets_parse_error_response() {
        let server = make_server(true);
        let resp = server.handle_line("{not json").await;
        assert!(!resp.ok);
        assert_eq!(resp.request_id, UNPARSEABLE_REQUEST_ID);
        assert!(resp.error.is_some());
    }

    #[tokio::test]
    async fn unknown_method_keeps_request_id() {
        let server = make_server(true);
        let resp = server
            .handle_line(r#"{"v":1,"request_id":"r-9","method":"Restart","payload":{}}"#)
            .await;
        assert!(!resp.ok);
        assert_eq!(resp.request_id, "r-9");
        assert!(resp.error.unwrap_or_default().contains("Restart"));
    }

    #[tokio::test]
    async fn wrong_version_is_rejected() {
        let server = make_server(true);
        let resp = server
            .handle_line(r#"{"v":2,"request_id":"r-1","method":"GetStatus"}"#)
            .await;
        assert!(!resp.ok);
        assert!(resp.error.unwrap_or_default().contains("version"));
    }

    #[test]
    fn emitting_without_connections_reaches_nobody() {
        let server = make_server(true);
        assert_eq!(server.emitter().emit("running"), 0);
    }
}
