//! Logged-in session: history, cursor, and the two background loops.

use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicBool, Ordering},
};

use chatomatic_proto::Message;
use tokio::{sync::mpsc::UnboundedSender, task::JoinHandle, time::sleep};
use tracing::{info, warn};

use crate::{
    ChatClient, ClientConfig, HealthMonitor, MessageCursor, SessionEvent,
    channel::RequestChannel,
    connection::probe,
};

/// One logged-in session.
///
/// Owns the in-memory message history, the fetch cursor, and the two
/// long-lived background tasks:
///
/// - the **fetch loop** polls for new messages every
///   [`ClientConfig::fetch_interval`], appends them to the history and
///   advances the cursor;
/// - the **health loop** probes reachability every
///   [`ClientConfig::probe_interval`], attempts a reconnect when the probe
///   succeeds but the channel is down, and reports connectivity
///   transitions (only transitions) as [`SessionEvent`]s.
///
/// Both loops share the session's request channel with foreground calls;
/// the channel's exclusive-exchange lock keeps the three callers from
/// interleaving on the wire.
///
/// Cancellation is cooperative: [`Session::stop`] clears a shared flag
/// that both loops check at the top of each iteration, so stopping takes
/// at most one loop interval. History lives exactly as long as the
/// session; dropping the session after logout discards it.
pub struct Session {
    client: ChatClient,
    history: Arc<Mutex<Vec<Message>>>,
    running: Arc<AtomicBool>,
    fetch_task: JoinHandle<()>,
    health_task: JoinHandle<()>,
}

impl Session {
    /// Start the background loops for a logged-in client.
    pub async fn spawn(
        client: ChatClient,
        config: &ClientConfig,
        events: UnboundedSender<SessionEvent>,
    ) -> Self {
        let history = Arc::new(Mutex::new(Vec::new()));
        let running = Arc::new(AtomicBool::new(true));
        let connected = client.channel().is_connected().await;

        let fetch_task = tokio::spawn(fetch_loop(
            client.clone(),
            Arc::clone(&history),
            Arc::clone(&running),
            events.clone(),
            config.clone(),
        ));
        let health_task = tokio::spawn(health_loop(
            client.channel().clone(),
            Arc::clone(&running),
            events,
            config.clone(),
            connected,
        ));

        Self { client, history, running, fetch_task, health_task }
    }

    /// The facade bound to this session.
    pub fn client(&self) -> &ChatClient {
        &self.client
    }

    /// Snapshot of the messages accumulated so far, in arrival order.
    pub fn history(&self) -> Vec<Message> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Whether the loops are still scheduled to run.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Ask both loops to stop.
    ///
    /// Cooperative: each loop observes the flag at the top of its next
    /// iteration, so latency is bounded by the loop interval.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }

    /// Stop the loops and wait for both to exit.
    pub async fn join(self) {
        self.stop();
        let _ = self.fetch_task.await;
        let _ = self.health_task.await;
    }
}

/// Poll for new messages on a fixed interval.
///
/// Each tick: skip (and signal [`SessionEvent::ConnectionLost`]) while the
/// connection is down; otherwise fetch from the cursor, append the batch
/// in arrival order and advance the cursor. An empty batch is not an
/// error, there is simply nothing new. A failed exchange is reported as
/// a connection failure.
async fn fetch_loop(
    client: ChatClient,
    history: Arc<Mutex<Vec<Message>>>,
    running: Arc<AtomicBool>,
    events: UnboundedSender<SessionEvent>,
    config: ClientConfig,
) {
    let mut cursor = MessageCursor::new();
    while running.load(Ordering::Relaxed) {
        if client.channel().is_connected().await {
            match client.messages_since(cursor.position()).await {
                Some(batch) => {
                    if !batch.is_empty() {
                        cursor.advance(&batch);
                        history
                            .lock()
                            .unwrap_or_else(PoisonError::into_inner)
                            .extend(batch);
                    }
                },
                None => {
                    warn!("message fetch failed");
                    let _ = events.send(SessionEvent::ConnectionLost);
                },
            }
        } else {
            let _ = events.send(SessionEvent::ConnectionLost);
        }
        sleep(config.fetch_interval).await;
    }
}

/// Probe connection liveness on a fixed interval.
///
/// Each tick: probe reachability with a fresh socket; when the server is
/// reachable but the channel is down, attempt a reconnect; then feed the
/// resulting connectivity to the edge detector and emit
/// [`SessionEvent::ConnectionStateChanged`] on transitions only.
async fn health_loop(
    channel: RequestChannel,
    running: Arc<AtomicBool>,
    events: UnboundedSender<SessionEvent>,
    config: ClientConfig,
    initially_connected: bool,
) {
    let mut monitor = HealthMonitor::new(initially_connected);
    while running.load(Ordering::Relaxed) {
        let alive = probe(&config.host, config.port, config.probe_timeout).await;
        if alive && !channel.is_connected().await {
            if let Err(error) = channel.connect().await {
                warn!(%error, "reconnect attempt failed");
            }
        }
        let connected = alive && channel.is_connected().await;
        if let Some(connected) = monitor.observe(connected) {
            info!(connected, "connectivity changed");
            let _ = events.send(SessionEvent::ConnectionStateChanged { connected });
        }
        sleep(config.probe_interval).await;
    }
}
