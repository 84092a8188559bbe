//! Asynchronous client for the background service.
//!
//! A [`ServiceClient`] owns exactly one [`Connection`]. Connecting spawns two
//! tasks on the current tokio runtime:
//!
//! 1. **Receiver** -- reads envelopes from the service, resolves the matching
//!    [`PendingCall`] by `request_id`, and forwards `StatusChanged` signals
//!    into a bounded broadcast channel.
//! 2. **Sender** -- drains an unbounded queue of serialised commands onto the
//!    stream, so issuing a call never waits on the socket.
//!
//! Status handlers are plain closures and may block, so each subscription
//! runs on its own OS thread rather than on the runtime.
//!
//! Awaiting a [`PendingCall`] is a suspension point bounded by the configured
//! call timeout. Distinct calls are multiplexed by `request_id` and may resolve
//! in any order; signals are delivered to each subscriber in emission order.

use crate::config::ServiceConfig;
use crate::error::{ConnectionError, RpcError, RpcFailure};
use crate::service::contract::{CommandEnvelope, Method, ResponseEnvelope, ServiceMessage};
use crate::service::transport::{self, Endpoint};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::thread;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

type Reply = std::result::Result<ResponseEnvelope, RpcFailure>;

/// A `StatusChanged` notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEvent {
    pub status: String,
}

struct PendingEntry {
    reply_tx: oneshot::Sender<Reply>,
    deadline: Instant,
}

/// State shared between the client handle, its tasks, and outstanding calls.
struct Shared {
    pending: Mutex<HashMap<String, PendingEntry>>,
    signals: Mutex<Option<broadcast::Sender<StatusEvent>>>,
    closed: AtomicBool,
    disconnected: CancellationToken,
}

impl Shared {
    fn pending(&self) -> MutexGuard<'_, HashMap<String, PendingEntry>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn signals(&self) -> MutexGuard<'_, Option<broadcast::Sender<StatusEvent>>> {
        self.signals.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn fail(&self, request_id: &str, failure: RpcFailure) {
        if let Some(entry) = self.pending().remove(request_id) {
            let _ = entry.reply_tx.send(Err(failure));
        }
    }

    fn resolve(&self, response: ResponseEnvelope) {
        let entry = self.pending().remove(&response.request_id);
        match entry {
            Some(entry) => {
                let _ = entry.reply_tx.send(Ok(response));
            }
            None => tracing::debug!(
                request_id = %response.request_id,
                "dropping reply with no pending call"
            ),
        }
    }

    /// Time out every entry whose deadline has passed.
    fn sweep_expired(&self, now: Instant) {
        let mut pending = self.pending();
        let expired: Vec<String> = pending
            .iter()
            .filter(|(_, entry)| entry.deadline <= now)
            .map(|(id, _)| id.clone())
            .collect();
        for id in expired {
            if let Some(entry) = pending.remove(&id) {
                let _ = entry.reply_tx.send(Err(RpcFailure::Timeout));
            }
        }
    }

    fn publish(&self, event: StatusEvent) {
        if let Some(tx) = self.signals().as_ref() {
            // No receivers is fine: nobody is subscribed yet.
            let _ = tx.send(event);
        }
    }

    /// Mark the connection dead, fail every outstanding call, and end every
    /// subscription.
    fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        let drained: Vec<PendingEntry> =
            self.pending().drain().map(|(_, entry)| entry).collect();
        if !drained.is_empty() {
            tracing::warn!(
                pending = drained.len(),
                "connection closed with calls in flight"
            );
        }
        for entry in drained {
            let _ = entry.reply_tx.send(Err(RpcFailure::ConnectionLost));
        }
        self.signals().take();
        self.disconnected.cancel();
    }
}

/// The single channel a client holds to the service.
pub struct Connection {
    shared: Arc<Shared>,
    outgoing: mpsc::UnboundedSender<String>,
    receiver: JoinHandle<()>,
    sender: JoinHandle<()>,
}

impl Connection {
    fn spawn<S>(stream: S, event_capacity: usize) -> Self
    where
        S: AsyncRead + AsyncWrite + Send + 'static,
    {
        let (signal_tx, _signal_rx) = broadcast::channel(event_capacity.max(1));
        let shared = Arc::new(Shared {
            pending: Mutex::new(HashMap::new()),
            signals: Mutex::new(Some(signal_tx)),
            closed: AtomicBool::new(false),
            disconnected: CancellationToken::new(),
        });

        let (read_half, write_half) = tokio::io::split(stream);
        let (outgoing, outgoing_rx) = mpsc::unbounded_channel();

        let receiver = tokio::spawn(receive_loop(read_half, Arc::clone(&shared)));
        let sender = tokio::spawn(send_loop(write_half, outgoing_rx, Arc::clone(&shared)));

        Self {
            shared,
            outgoing,
            receiver,
            sender,
        }
    }

    fn is_open(&self) -> bool {
        !self.shared.is_closed()
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.receiver.abort();
        self.sender.abort();
        self.shared.close();
    }
}

/// Typed facade over the service's `GetStatus`, `Start`, `Stop` and
/// `StatusChanged` surface.
pub struct ServiceClient {
    connection: Connection,
    call_timeout: Duration,
}

impl ServiceClient {
    /// Connect to the endpoint named in `config`.
    ///
    /// Must be called from within a tokio runtime; the receive loop runs on
    /// that runtime's worker threads.
    pub async fn connect(config: &ServiceConfig) -> Result<Self, ConnectionError> {
        let endpoint = Endpoint::parse(&config.endpoint)?;
        let stream = transport::connect(&endpoint).await?;
        tracing::info!(
            endpoint = %endpoint,
            service = %config.service_name,
            object_path = %config.object_path,
            interface = %config.interface,
            "connected to service"
        );
        Ok(Self::from_stream(stream, config))
    }

    /// Run the client over an already-established stream.
    #[must_use]
    pub fn from_stream<S>(stream: S, config: &ServiceConfig) -> Self
    where
        S: AsyncRead + AsyncWrite + Send + 'static,
    {
        Self {
            connection: Connection::spawn(stream, config.event_capacity),
            call_timeout: config.call_timeout(),
        }
    }

    /// Whether the receive loop is still running.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connection.is_open()
    }

    /// Query the service-reported status string.
    #[must_use]
    pub fn get_status_async(&self) -> PendingCall<String> {
        self.issue(Method::GetStatus)
    }

    /// Ask the service to start. `false` means the transition was refused.
    #[must_use]
    pub fn start_async(&self) -> PendingCall<bool> {
        self.issue(Method::Start)
    }

    /// Ask the service to stop. `false` means the transition was refused.
    #[must_use]
    pub fn stop_async(&self) -> PendingCall<bool> {
        self.issue(Method::Stop)
    }

    /// Resolves once the connection is gone, whether the service hung up, an
    /// I/O error ended it, or [`Self::close`] was called.
    pub async fn closed(&self) {
        self.connection.shared.disconnected.cancelled().await;
    }

    /// Invoke `handler` once per `StatusChanged`, in emission order, until the
    /// returned [`Subscription`] is dropped or the connection closes.
    ///
    /// The handler runs on a dedicated thread, so a blocking handler delays
    /// neither the receive loop nor other subscribers. A handler that falls
    /// more than `event_capacity` events behind skips the oldest ones.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe_status_changed<F>(&self, mut handler: F) -> Subscription
    where
        F: FnMut(StatusEvent) + Send + 'static,
    {
        let receiver = self
            .connection
            .shared
            .signals()
            .as_ref()
            .map(broadcast::Sender::subscribe);
        let Some(mut rx) = receiver else {
            tracing::debug!("subscribing on a closed connection; no events will arrive");
            return Subscription::inactive();
        };

        let active = Arc::new(AtomicBool::new(true));
        let still_active = Arc::clone(&active);
        let spawned = thread::Builder::new()
            .name("firebox-status".to_owned())
            .spawn(move || {
                loop {
                    let received = rx.blocking_recv();
                    if !still_active.load(Ordering::SeqCst) {
                        break;
                    }
                    match received {
                        Ok(event) => handler(event),
                        Err(broadcast::error::RecvError::Lagged(n)) => {
                            tracing::warn!(lagged = n, "status subscriber lagged; events dropped");
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    }
                }
            });
        match spawned {
            Ok(thread) => Subscription {
                active,
                thread: Some(thread),
            },
            Err(e) => {
                tracing::error!(error = %e, "failed to start status subscriber thread");
                Subscription::inactive()
            }
        }
    }

    /// Tear the connection down now. Outstanding calls fail with
    /// [`RpcFailure::ConnectionLost`].
    pub fn close(&self) {
        self.connection.receiver.abort();
        self.connection.sender.abort();
        self.connection.shared.close();
    }

    fn issue<T: CallResult>(&self, method: Method) -> PendingCall<T> {
        let shared = &self.connection.shared;
        let request_id = uuid::Uuid::new_v4().to_string();
        let now = Instant::now();
        let deadline = now + self.call_timeout;
        let (reply_tx, reply_rx) = oneshot::channel();

        shared.sweep_expired(now);
        shared
            .pending()
            .insert(request_id.clone(), PendingEntry { reply_tx, deadline });

        // Closing drains the map; an entry inserted after the drain is ours
        // to fail.
        if shared.is_closed() {
            shared.fail(&request_id, RpcFailure::ConnectionLost);
        } else {
            let envelope = CommandEnvelope::new(request_id.clone(), method);
            match serde_json::to_string(&envelope) {
                Ok(line) => {
                    if self.connection.outgoing.send(line).is_err() {
                        shared.fail(&request_id, RpcFailure::ConnectionLost);
                    } else {
                        tracing::debug!(
                            request_id = %request_id,
                            method = method.as_str(),
                            "call issued"
                        );
                    }
                }
                Err(e) => shared.fail(&request_id, RpcFailure::Protocol(e.to_string())),
            }
        }

        PendingCall {
            method,
            request_id,
            deadline,
            state: CallState::Waiting(reply_rx),
            shared: Arc::downgrade(shared),
            _result: PhantomData,
        }
    }
}

/// Releases a status subscription when dropped.
///
/// Dropping never waits for a handler that is still running; the handler is
/// not invoked again afterwards.
pub struct Subscription {
    active: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Subscription {
    fn inactive() -> Self {
        Self {
            active: Arc::new(AtomicBool::new(false)),
            thread: None,
        }
    }

    /// Whether events can still arrive on this subscription.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
            && self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.active.store(false, Ordering::SeqCst);
    }
}

/// Decodes a successful reply payload into a method's result type.
pub trait CallResult: Clone + Send + Sized + 'static {
    fn from_payload(payload: &serde_json::Value) -> Result<Self, RpcFailure>;
}

impl CallResult for String {
    fn from_payload(payload: &serde_json::Value) -> Result<Self, RpcFailure> {
        payload
            .get("status")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| RpcFailure::Protocol("reply payload missing `status`".to_owned()))
    }
}

impl CallResult for bool {
    fn from_payload(payload: &serde_json::Value) -> Result<Self, RpcFailure> {
        payload
            .get("success")
            .and_then(serde_json::Value::as_bool)
            .ok_or_else(|| RpcFailure::Protocol("reply payload missing `success`".to_owned()))
    }
}

enum CallState<T> {
    Waiting(oneshot::Receiver<Reply>),
    Resolved(Result<T, RpcError>),
}

/// One in-flight call. Resolves exactly once to a result or an [`RpcError`];
/// reading it again returns the same outcome.
pub struct PendingCall<T> {
    method: Method,
    request_id: String,
    deadline: Instant,
    state: CallState<T>,
    shared: Weak<Shared>,
    _result: PhantomData<fn() -> T>,
}

impl<T: CallResult> PendingCall<T> {
    /// Wait for the outcome, at most until the call deadline.
    pub async fn result(&mut self) -> Result<T, RpcError> {
        let received = match &mut self.state {
            CallState::Resolved(outcome) => return outcome.clone(),
            CallState::Waiting(reply_rx) => tokio::time::timeout_at(self.deadline, reply_rx).await,
        };
        let reply = match received {
            Ok(Ok(reply)) => reply,
            Ok(Err(_dropped)) => Err(RpcFailure::ConnectionLost),
            Err(_elapsed) => {
                self.forget();
                Err(RpcFailure::Timeout)
            }
        };
        self.settle(reply)
    }

    /// Consume the handle and wait for the outcome.
    pub async fn into_result(mut self) -> Result<T, RpcError> {
        self.result().await
    }

    /// Non-blocking peek: `None` while the call is still in flight.
    pub fn try_result(&mut self) -> Option<Result<T, RpcError>> {
        let received = match &mut self.state {
            CallState::Resolved(outcome) => return Some(outcome.clone()),
            CallState::Waiting(reply_rx) => reply_rx.try_recv(),
        };
        let reply = match received {
            Ok(reply) => reply,
            Err(oneshot::error::TryRecvError::Closed) => Err(RpcFailure::ConnectionLost),
            Err(oneshot::error::TryRecvError::Empty) => {
                if Instant::now() < self.deadline {
                    return None;
                }
                self.forget();
                Err(RpcFailure::Timeout)
            }
        };
        Some(self.settle(reply))
    }

    /// Whether an outcome has been observed.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self.state, CallState::Resolved(_))
    }

    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    #[must_use]
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    fn settle(&mut self, reply: Reply) -> Result<T, RpcError> {
        let outcome = reply
            .and_then(|response| {
                if response.ok {
                    T::from_payload(&response.payload)
                } else {
                    Err(RpcFailure::Fault(
                        response
                            .error
                            .unwrap_or_else(|| "unspecified service fault".to_owned()),
                    ))
                }
            })
            .map_err(|reason| RpcError::new(self.method.as_str(), reason));

        if let Err(e) = &outcome {
            tracing::debug!(request_id = %self.request_id, error = %e, "call failed");
        }
        self.state = CallState::Resolved(outcome.clone());
        outcome
    }

    fn forget(&self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.pending().remove(&self.request_id);
        }
    }
}

impl<T> Drop for PendingCall<T> {
    fn drop(&mut self) {
        if matches!(self.state, CallState::Waiting(_))
            && let Some(shared) = self.shared.upgrade()
        {
            shared.pending().remove(&self.request_id);
        }
    }
}

async fn receive_loop<R>(read_half: R, shared: Arc<Shared>)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(read_half).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => dispatch_line(&shared, &line),
            Ok(None) => {
                tracing::info!("service closed the connection");
                break;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to read from service; closing connection");
                break;
            }
        }
    }
    shared.close();
}

fn dispatch_line(shared: &Shared, line: &str) {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return;
    }
    match serde_json::from_str::<ServiceMessage>(trimmed) {
        Ok(ServiceMessage::Response(response)) => shared.resolve(response),
        Ok(ServiceMessage::Signal(signal)) => match signal.status() {
            Some(status) => shared.publish(StatusEvent {
                status: status.to_owned(),
            }),
            None => tracing::debug!(signal = %signal.signal, "ignoring unrecognised signal"),
        },
        Err(e) => tracing::warn!(error = %e, "failed to parse message from service"),
    }
}

async fn send_loop<W>(
    write_half: W,
    mut outgoing: mpsc::UnboundedReceiver<String>,
    shared: Arc<Shared>,
) where
    W: AsyncWrite + Unpin,
{
    let mut writer = BufWriter::new(write_half);
    while let Some(line) = outgoing.recv().await {
        if let Err(e) = write_line(&mut writer, &line).await {
            tracing::warn!(error = %e, "failed to write to service; closing connection");
            shared.close();
            break;
        }
    }
}

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
    use crate::service::contract::SignalEnvelope;
    use tokio::io::{DuplexStream, Lines, ReadHalf, WriteHalf};

    type FakeLines = Lines<BufReader<ReadHalf<DuplexStream>>>;
    type FakeWriter = WriteHalf<DuplexStream>;

    fn test_config(timeout_ms: u64) -> ServiceConfig {
        ServiceConfig {
            call_timeout_ms: timeout_ms,
            ..ServiceConfig::default()
        }
    }

    /// Client wired to a hand-driven fake service end.
    fn pair(timeout_ms: u64) -> (ServiceClient, FakeLines, FakeWriter) {
        let (client_end, service_end) = tokio::io::duplex(4096);
        let client = ServiceClient::from_stream(client_end, &test_config(timeout_ms));
        let (read, write) = tokio::io::split(service_end);
        (client, BufReader::new(read).lines(), write)
    }

    async fn reply(write: &mut FakeWriter, response: ResponseEnvelope) {
        let mut json = serde_json::to_string(&response).expect("serialize response");
        json.push('\n');
        write.write_all(json.as_bytes()).await.expect("write response");
    }

    async fn next_command(lines: &mut FakeLines) -> CommandEnvelope {
        let line = lines
            .next_line()
            .await
            .expect("read command")
            .expect("command line");
        serde_json::from_str(&line).expect("parse command")
    }

    #[tokio::test]
    async fn replies_resolve_out_of_issue_order() {
        let (client, mut lines, mut write) = pair(5_000);

        let mut start = client.start_async();
        let mut status = client.get_status_async();

        let first = next_command(&mut lines).await;
        let second = next_command(&mut lines).await;
        assert_eq!(first.method, Method::Start);
        assert_eq!(second.method, Method::GetStatus);

        reply(
            &mut write,
            ResponseEnvelope::ok(second.request_id, serde_json::json!({"status": "idle"})),
        )
        .await;
        assert_eq!(status.result().await, Ok("idle".to_owned()));
        assert!(!start.is_resolved());

        reply(
            &mut write,
            ResponseEnvelope::ok(first.request_id, serde_json::json!({"success": false})),
        )
        .await;
        assert_eq!(start.result().await, Ok(false));
    }

    #[tokio::test]
    async fn issued_call_carries_its_wire_identity() {
        let (client, mut lines, _write) = pair(5_000);
        let call = client.start_async();
        let command = next_command(&mut lines).await;

        assert_eq!(call.method(), Method::Start);
        assert_eq!(call.request_id(), command.request_id);
        assert!(!call.is_resolved());
    }

    #[tokio::test]
    async fn resolved_call_rereads_the_same_outcome() {
        let (client, mut lines, mut write) = pair(5_000);
        let mut call = client.stop_async();
        let command = next_command(&mut lines).await;
        reply(
            &mut write,
            ResponseEnvelope::error(command.request_id, "busy"),
        )
        .await;

        let first = call.result().await;
        let second = call.result().await;
        assert_eq!(first, second);
        assert_eq!(
            first,
            Err(RpcError::new("Stop", RpcFailure::Fault("busy".to_owned())))
        );
        assert_eq!(call.try_result(), Some(first));
    }

    #[tokio::test]
    async fn unanswered_call_times_out_and_leaves_no_entry() {
        let (client, mut lines, _write) = pair(50);
        let mut call = client.get_status_async();
        let _ = next_command(&mut lines).await;

        let outcome = call.result().await;
        assert_eq!(
            outcome,
            Err(RpcError::new("GetStatus", RpcFailure::Timeout))
        );
        assert!(client.connection.shared.pending().is_empty());
    }

    #[tokio::test]
    async fn dropping_a_pending_call_releases_its_entry() {
        let (client, _lines, _write) = pair(5_000);
        let call = client.get_status_async();
        assert_eq!(client.connection.shared.pending().len(), 1);
        drop(call);
        assert!(client.connection.shared.pending().is_empty());
    }

    #[tokio::test]
    async fn malformed_payload_is_a_protocol_failure() {
        let (client, mut lines, mut write) = pair(5_000);
        let mut call = client.start_async();
        let command = next_command(&mut lines).await;
        reply(
            &mut write,
            ResponseEnvelope::ok(command.request_id, serde_json::json!({"status": "yes"})),
        )
        .await;

        match call.result().await {
            Err(RpcError {
                reason: RpcFailure::Protocol(_),
                ..
            }) => {}
            other => panic!("expected protocol failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_reply_and_garbage_lines_are_ignored() {
        let (client, mut lines, mut write) = pair(5_000);
        let mut call = client.get_status_async();
        let command = next_command(&mut lines).await;

        write.write_all(b"not json\n").await.expect("write garbage");
        reply(
            &mut write,
            ResponseEnvelope::ok("someone-else", serde_json::json!({"status": "x"})),
        )
        .await;
        reply(
            &mut write,
            ResponseEnvelope::ok(command.request_id, serde_json::json!({"status": "running"})),
        )
        .await;

        assert_eq!(call.result().await, Ok("running".to_owned()));
        assert!(client.is_connected());
    }

    #[tokio::test]
    async fn connection_loss_fails_in_flight_and_later_calls() {
        let (client, mut lines, write) = pair(5_000);
        let mut in_flight = client.get_status_async();
        let _ = next_command(&mut lines).await;

        drop(write);
        drop(lines);

        assert_eq!(
            in_flight.result().await,
            Err(RpcError::new("GetStatus", RpcFailure::ConnectionLost))
        );
        tokio::time::timeout(Duration::from_secs(5), client.closed())
            .await
            .expect("closed notification fires");
        assert!(!client.is_connected());

        let mut later = client.start_async();
        assert_eq!(
            later.result().await,
            Err(RpcError::new("Start", RpcFailure::ConnectionLost))
        );
    }

    #[tokio::test]
    async fn subscription_ends_when_connection_closes() {
        let (client, lines, mut write) = pair(5_000);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let subscription = client.subscribe_status_changed(move |event| {
            let _ = tx.send(event.status);
        });

        let signal = SignalEnvelope::status_changed("e-1", "running");
        let mut json = serde_json::to_string(&signal).expect("serialize signal");
        json.push('\n');
        write.write_all(json.as_bytes()).await.expect("write signal");
        assert_eq!(rx.recv().await.as_deref(), Some("running"));

        drop(write);
        drop(lines);
        assert_eq!(rx.recv().await, None);
        tokio::time::timeout(Duration::from_secs(5), async {
            while subscription.is_active() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("subscriber thread exits");
    }

    #[tokio::test]
    async fn close_fails_outstanding_calls() {
        let (client, _lines, _write) = pair(5_000);
        let mut call = client.stop_async();
        client.close();
        assert_eq!(
            call.result().await,
            Err(RpcError::new("Stop", RpcFailure::ConnectionLost))
        );
    }
}
