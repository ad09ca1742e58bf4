//! Integration tests for the slave server and connection supervisor.
//!
//! Each test plays the master side itself over a real loopback WebSocket,
//! sending raw JSON frames, and observes the slave through the recording
//! mock injector.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::{sleep, timeout};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use edgeshare_core::{
    decode_message, transport, ControlState, InputEvent, KeyIdentifier, LeftEdgeThreshold, Point,
    TransportError,
};
use edgeshare_slave::infrastructure::input_injection::mock::{InjectedInput, MockInputInjector};
use edgeshare_slave::infrastructure::network::server::{bind, run_server};
use edgeshare_slave::infrastructure::network::session::{
    run_slave_session, SessionReport, SessionSettings,
};

type MasterWs = WebSocketStream<MaybeTlsStream<TcpStream>>;

const WAIT: Duration = Duration::from_secs(3);

fn settings() -> SessionSettings {
    SessionSettings {
        watch_interval: Duration::from_millis(5),
        edge: LeftEdgeThreshold::default(),
        ..SessionSettings::default()
    }
}

struct Server {
    port: u16,
    injector: MockInputInjector,
    running: Arc<AtomicBool>,
    task: tokio::task::JoinHandle<usize>,
}

async fn start_server() -> Server {
    start_server_with(settings()).await
}

async fn start_server_with(settings: SessionSettings) -> Server {
    let listener = bind("127.0.0.1", 0).await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let injector = MockInputInjector::new();
    injector.set_pointer(100, 100);
    let running = Arc::new(AtomicBool::new(true));
    let task = tokio::spawn(run_server(
        listener,
        Arc::new(injector.clone()),
        settings,
        Arc::clone(&running),
    ));
    Server {
        port,
        injector,
        running,
        task,
    }
}

async fn send(ws: &mut MasterWs, json: &str) {
    ws.send(Message::Text(json.to_string())).await.unwrap();
}

/// Waits until the injector has recorded at least `n` calls.
async fn wait_injected(injector: &MockInputInjector, n: usize) -> Vec<InjectedInput> {
    timeout(WAIT, async {
        loop {
            let injected = injector.injected();
            if injected.len() >= n {
                return injected;
            }
            sleep(Duration::from_millis(2)).await;
        }
    })
    .await
    .expect("injection did not happen in time")
}

/// Reads frames until one decodes to an event.
async fn next_event(ws: &mut MasterWs) -> InputEvent {
    loop {
        let msg = timeout(WAIT, ws.next())
            .await
            .expect("timed out waiting for a frame")
            .expect("stream ended")
            .expect("websocket error");
        if let Message::Text(text) = msg {
            return decode_message(&text).expect("slave sent an undecodable frame");
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_grab_then_delta_and_key_are_injected() {
    // Arrange
    let server = start_server().await;
    let mut master = transport::connect("127.0.0.1", server.port).await.unwrap();

    // Act
    send(&mut master, r#"{"type":"grab"}"#).await;
    send(&mut master, r#"{"type":"mousemove","dx":5,"dy":-3}"#).await;
    send(&mut master, r#"{"type":"keydown","key":"Key.shift"}"#).await;
    send(&mut master, r#"{"type":"mouseclick","button":"Button.right","pressed":true}"#).await;
    let injected = wait_injected(&server.injector, 3).await;

    // Assert
    assert_eq!(
        injected,
        vec![
            InjectedInput::Position(Point::new(105, 97)),
            InjectedInput::Key(KeyIdentifier::parse("shift").unwrap(), true),
            InjectedInput::Button(edgeshare_core::MouseButton::Right, true),
        ]
    );

    server.running.store(false, Ordering::Relaxed);
    timeout(WAIT, server.task).await.unwrap().unwrap();
}

#[tokio::test]
async fn test_input_before_grab_is_not_injected() {
    // Arrange
    let server = start_server().await;
    let mut master = transport::connect("127.0.0.1", server.port).await.unwrap();

    // Act: input while local, then a grab and one marker key
    send(&mut master, r#"{"type":"mousemove","dx":50,"dy":50}"#).await;
    send(&mut master, r#"{"type":"keydown","key":"q"}"#).await;
    send(&mut master, r#"{"type":"grab"}"#).await;
    send(&mut master, r#"{"type":"keyup","key":"m"}"#).await;
    let injected = wait_injected(&server.injector, 1).await;

    // Assert: only the marker made it through
    assert_eq!(
        injected,
        vec![InjectedInput::Key(KeyIdentifier::Char('m'), false)]
    );
    assert_eq!(server.injector.pointer(), Some(Point::new(100, 100)));

    server.running.store(false, Ordering::Relaxed);
    timeout(WAIT, server.task).await.unwrap().unwrap();
}

#[tokio::test]
async fn test_left_edge_sends_release_and_stops_injecting() {
    // Arrange
    let server = start_server().await;
    let mut master = transport::connect("127.0.0.1", server.port).await.unwrap();
    send(&mut master, r#"{"type":"grab"}"#).await;

    // Act: the master's deltas carry the slave pointer past the left edge
    send(&mut master, r#"{"type":"mousemove","dx":-150,"dy":0}"#).await;

    // Assert
    assert_eq!(next_event(&mut master).await, InputEvent::Release);

    // Act: input after the release is ignored until the next grab
    send(&mut master, r#"{"type":"keydown","key":"x"}"#).await;
    sleep(Duration::from_millis(20)).await;
    server.injector.set_pointer(500, 100);
    send(&mut master, r#"{"type":"grab"}"#).await;
    send(&mut master, r#"{"type":"keydown","key":"y"}"#).await;
    let injected = wait_injected(&server.injector, 2).await;

    // Assert
    assert_eq!(
        injected,
        vec![
            InjectedInput::Position(Point::new(-50, 100)),
            InjectedInput::Key(KeyIdentifier::Char('y'), true),
        ]
    );

    server.running.store(false, Ordering::Relaxed);
    timeout(WAIT, server.task).await.unwrap().unwrap();
}

#[tokio::test]
async fn test_garbage_frames_do_not_end_session() {
    // Arrange
    let server = start_server().await;
    let mut master = transport::connect("127.0.0.1", server.port).await.unwrap();

    // Act
    send(&mut master, "{not json").await;
    send(&mut master, r#"{"type":"scroll","dy":3}"#).await;
    send(&mut master, r#"{"type":"keydown","key":"Key.hyper"}"#).await;
    master.send(Message::Binary(vec![1, 2, 3])).await.unwrap();
    send(&mut master, r#"{"type":"grab"}"#).await;
    send(&mut master, r#"{"type":"keydown","key":"Key.esc"}"#).await;
    let injected = wait_injected(&server.injector, 1).await;

    // Assert
    assert_eq!(
        injected,
        vec![InjectedInput::Key(KeyIdentifier::parse("esc").unwrap(), true)]
    );

    server.running.store(false, Ordering::Relaxed);
    timeout(WAIT, server.task).await.unwrap().unwrap();
}

#[tokio::test]
async fn test_server_accepts_masters_one_after_another() {
    // Arrange
    let server = start_server().await;

    // Act: first master grabs and disconnects while remote
    let mut first = transport::connect("127.0.0.1", server.port).await.unwrap();
    send(&mut first, r#"{"type":"grab"}"#).await;
    send(&mut first, r#"{"type":"keydown","key":"a"}"#).await;
    wait_injected(&server.injector, 1).await;
    first.close(None).await.unwrap();
    drop(first);

    // Act: a second master starts from local again
    let mut second = transport::connect("127.0.0.1", server.port).await.unwrap();
    send(&mut second, r#"{"type":"keydown","key":"b"}"#).await;
    send(&mut second, r#"{"type":"grab"}"#).await;
    send(&mut second, r#"{"type":"keydown","key":"c"}"#).await;
    let injected = wait_injected(&server.injector, 2).await;
    second.close(None).await.unwrap();

    // Assert
    assert_eq!(
        injected,
        vec![
            InjectedInput::Key(KeyIdentifier::Char('a'), true),
            InjectedInput::Key(KeyIdentifier::Char('c'), true),
        ]
    );

    server.running.store(false, Ordering::Relaxed);
    let sessions = timeout(WAIT, server.task).await.unwrap().unwrap();
    assert_eq!(sessions, 2);
}

#[tokio::test]
async fn test_silent_client_does_not_block_next_master() {
    // Arrange: a client that opens TCP and never sends the upgrade request
    let server = start_server_with(SessionSettings {
        handshake_timeout: Duration::from_millis(100),
        ..settings()
    })
    .await;
    let _silent = TcpStream::connect(("127.0.0.1", server.port)).await.unwrap();
    sleep(Duration::from_millis(20)).await;

    // Act
    let mut master = timeout(WAIT, transport::connect("127.0.0.1", server.port))
        .await
        .expect("master was never accepted")
        .unwrap();
    send(&mut master, r#"{"type":"grab"}"#).await;
    send(&mut master, r#"{"type":"keydown","key":"k"}"#).await;
    let injected = wait_injected(&server.injector, 1).await;

    // Assert
    assert_eq!(
        injected,
        vec![InjectedInput::Key(KeyIdentifier::Char('k'), true)]
    );

    server.running.store(false, Ordering::Relaxed);
    let sessions = timeout(WAIT, server.task).await.unwrap().unwrap();
    assert_eq!(sessions, 1);
}

#[tokio::test]
async fn test_shutdown_during_silent_handshake_stops_server() {
    // Arrange
    let server = start_server_with(SessionSettings {
        handshake_timeout: Duration::from_secs(60),
        ..settings()
    })
    .await;
    let _silent = TcpStream::connect(("127.0.0.1", server.port)).await.unwrap();
    sleep(Duration::from_millis(50)).await;

    // Act
    server.running.store(false, Ordering::Relaxed);
    let sessions = timeout(WAIT, server.task)
        .await
        .expect("server ignored shutdown while a handshake was pending")
        .unwrap();

    // Assert
    assert_eq!(sessions, 0);
}

#[tokio::test]
async fn test_disconnect_while_remote_resets_to_local() {
    // Arrange
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let injector = MockInputInjector::new();
    injector.set_pointer(400, 400);
    let slave_injector = Arc::new(injector.clone());
    let slave = tokio::spawn(async move {
        let (tcp, _) = listener.accept().await.unwrap();
        let ws = transport::accept(tcp).await.unwrap();
        run_slave_session(ws, slave_injector, settings(), Arc::new(AtomicBool::new(true))).await
    });
    let mut master = transport::connect("127.0.0.1", port).await.unwrap();
    send(&mut master, r#"{"type":"grab"}"#).await;
    send(&mut master, r#"{"type":"mousemove","dx":1,"dy":1}"#).await;
    wait_injected(&injector, 1).await;

    // Act
    drop(master);
    let report: SessionReport = timeout(WAIT, slave).await.unwrap().unwrap();

    // Assert
    assert_eq!(report.state_at_close, ControlState::Remote);
    assert_eq!(injector.injected().len(), 1);
}

#[tokio::test]
async fn test_bind_to_port_in_use_fails() {
    let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = taken.local_addr().unwrap().port();

    let result = bind("127.0.0.1", port).await;

    assert!(matches!(result, Err(TransportError::Bind { .. })));
}
