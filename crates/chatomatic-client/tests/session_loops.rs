//! Background loop behavior: incremental fetch, failure signalling,
//! cooperative stop, close idempotence.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod support;

use std::time::Duration;

use chatomatic_client::{
    ChatClient, ClientConfig, Connection, RequestChannel, Session, SessionEvent,
};
use support::MockServer;
use tokio::sync::mpsc;

/// Millisecond-scale cadence so loop tests finish quickly.
fn test_config(server: &MockServer) -> ClientConfig {
    let mut config = ClientConfig::new(server.host(), server.port());
    config.fetch_interval = Duration::from_millis(20);
    config.probe_interval = Duration::from_millis(20);
    config.probe_timeout = Duration::from_millis(200);
    config
}

/// Server that answers `getmsg` incrementally: full history for an empty
/// cursor, one newer message once the cursor reaches 10:00:00, then
/// nothing further.
async fn incremental_server() -> MockServer {
    MockServer::with_script(|verb, args| {
        let reply = match verb {
            "getmsg" if args == [""] => {
                "ok/%10:00:00/%bob/%alice/%hi/%10:00:00/%bob/%alice/%there".to_owned()
            },
            "getmsg" if args == ["10:00:00"] => "ok/%10:00:05/%bob/%alice/%news".to_owned(),
            "getmsg" => "ok".to_owned(),
            _ => "ok".to_owned(),
        };
        Some(reply)
    })
    .await
}

#[tokio::test]
async fn fetch_loop_accumulates_history_without_redelivery() {
    let server = incremental_server().await;
    let channel = RequestChannel::new(Connection::new(server.host(), server.port()));
    channel.connect().await.expect("mock server reachable");

    let (events, _event_rx) = mpsc::unbounded_channel();
    let session =
        Session::spawn(ChatClient::new(channel), &test_config(&server), events).await;

    // Several fetch intervals: first tick takes the full history, a later
    // tick takes the one newer message, further ticks find nothing.
    tokio::time::sleep(Duration::from_millis(200)).await;

    let history = session.history();
    let bodies: Vec<&str> = history.iter().map(|m| m.body.as_str()).collect();
    assert_eq!(bodies, ["hi", "there", "news"]);

    session.join().await;
}

#[tokio::test]
async fn fetch_loop_reports_a_dead_connection() {
    // Server taken down before the session starts: the channel is never
    // connected and the health loop cannot reconnect, so every fetch tick
    // must signal a lost connection.
    let server = incremental_server().await;
    let config = test_config(&server);
    server.shutdown();
    tokio::time::sleep(Duration::from_millis(50)).await;
    let channel = RequestChannel::new(Connection::new(config.host.clone(), config.port));

    let (events, mut event_rx) = mpsc::unbounded_channel();
    let session = Session::spawn(ChatClient::new(channel), &config, events).await;

    let event = tokio::time::timeout(Duration::from_secs(1), event_rx.recv())
        .await
        .expect("an event within one second")
        .expect("channel open");
    assert_eq!(event, SessionEvent::ConnectionLost);

    session.join().await;
}

#[tokio::test]
async fn stopping_a_session_stops_both_loops() {
    let server = incremental_server().await;
    let channel = RequestChannel::new(Connection::new(server.host(), server.port()));
    channel.connect().await.expect("mock server reachable");

    let (events, _event_rx) = mpsc::unbounded_channel();
    let session =
        Session::spawn(ChatClient::new(channel), &test_config(&server), events).await;
    assert!(session.is_running());

    session.stop();
    // Cooperative cancellation: join returns within one loop interval.
    tokio::time::timeout(Duration::from_secs(1), session.join())
        .await
        .expect("loops observe the stop flag promptly");
}

#[tokio::test]
async fn health_loop_reconnects_when_the_server_is_reachable() {
    let server = incremental_server().await;
    // Channel starts Disconnected with the server up: the health loop's
    // probe succeeds, so it must bring the channel up itself and report
    // the transition.
    let channel = RequestChannel::new(Connection::new(server.host(), server.port()));

    let (events, mut event_rx) = mpsc::unbounded_channel();
    let session =
        Session::spawn(ChatClient::new(channel), &test_config(&server), events).await;

    let connected = tokio::time::timeout(Duration::from_secs(2), async {
        while let Some(event) = event_rx.recv().await {
            // Early fetch ticks may signal ConnectionLost before the
            // first probe lands; the reconnect edge is what we wait for.
            if let SessionEvent::ConnectionStateChanged { connected } = event {
                return connected;
            }
        }
        false
    })
    .await
    .expect("a state transition within two seconds");

    assert!(connected);
    assert!(session.client().channel().is_connected().await);

    session.join().await;
}

#[tokio::test]
async fn health_loop_reports_the_transition_when_the_server_goes_away() {
    let server = incremental_server().await;
    let channel = RequestChannel::new(Connection::new(server.host(), server.port()));
    channel.connect().await.expect("mock server reachable");

    let (events, mut event_rx) = mpsc::unbounded_channel();
    let session =
        Session::spawn(ChatClient::new(channel), &test_config(&server), events).await;

    // Take the server down; probes start failing.
    server.shutdown();

    let deadline = tokio::time::timeout(Duration::from_secs(2), async {
        while let Some(event) = event_rx.recv().await {
            // Fetch ticks may interleave ConnectionLost signals; the
            // health loop's edge notification is what we wait for.
            if let SessionEvent::ConnectionStateChanged { connected } = event {
                return connected;
            }
        }
        true
    })
    .await;
    assert!(!deadline.expect("a state transition within two seconds"));

    session.join().await;
}

#[tokio::test]
async fn close_is_idempotent_and_sends_one_end_sentinel() {
    let server = incremental_server().await;
    let channel = RequestChannel::new(Connection::new(server.host(), server.port()));
    channel.connect().await.expect("mock server reachable");

    channel.close().await;
    channel.close().await;

    // Give the server a beat to log the sentinel.
    tokio::time::sleep(Duration::from_millis(100)).await;
    let ends = server.requests().iter().filter(|line| *line == "end").count();
    assert_eq!(ends, 1);

    // A closed channel refuses further work.
    assert!(channel.connect().await.is_err());
    assert!(!channel.is_connected().await);
}
