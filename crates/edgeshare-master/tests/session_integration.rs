//! Integration tests for the master connection supervisor.
//!
//! Each test plays the slave side itself over a real loopback WebSocket and
//! drives the master through the mock capture backend, so the full path
//! (poll loop → relay → outbound writer → wire → codec) is exercised.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::{sleep, timeout};
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::WebSocketStream;

use edgeshare_core::{decode_message, transport, CloseReason, ControlState, InputEvent, KeyIdentifier};
use edgeshare_master::application::relay_input::RelaySettings;
use edgeshare_master::infrastructure::input_capture::mock::{MockInputSource, MockScreenGeometry};
use edgeshare_master::infrastructure::input_capture::CapturedEvent;
use edgeshare_master::infrastructure::network::session::{
    run_master_session, CaptureBackend, SessionReport, SessionSettings,
};

const WAIT: Duration = Duration::from_secs(3);

struct Fixture {
    slave: WebSocketStream<TcpStream>,
    capture: MockInputSource,
    running: Arc<AtomicBool>,
    master: tokio::task::JoinHandle<SessionReport>,
}

/// Starts a master session against a loopback "slave" owned by the test.
async fn start(pointer: (i32, i32)) -> Fixture {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let capture = MockInputSource::new();
    capture.set_pointer(pointer.0, pointer.1);
    let backend = CaptureBackend {
        source: Arc::new(capture.clone()),
        cursor: Arc::new(capture.clone()),
        geometry: Arc::new(MockScreenGeometry::with_width(1920)),
    };
    let settings = SessionSettings {
        poll_interval: Duration::from_millis(5),
        relay: RelaySettings::default(),
        ..SessionSettings::default()
    };
    let running = Arc::new(AtomicBool::new(true));

    let running_master = Arc::clone(&running);
    let master = tokio::spawn(async move {
        let ws = transport::connect("127.0.0.1", port).await.unwrap();
        run_master_session(ws, &backend, settings, running_master).await
    });

    let (tcp, _) = listener.accept().await.unwrap();
    let slave = transport::accept(tcp).await.unwrap();

    // Capture starts once the session loop is up.
    timeout(WAIT, async {
        while !capture.is_running() {
            sleep(Duration::from_millis(2)).await;
        }
    })
    .await
    .expect("capture never started");

    Fixture {
        slave,
        capture,
        running,
        master,
    }
}

/// Reads frames until one decodes to an event.
async fn next_event(ws: &mut WebSocketStream<TcpStream>) -> InputEvent {
    loop {
        let msg = timeout(WAIT, ws.next())
            .await
            .expect("timed out waiting for a frame")
            .expect("stream ended")
            .expect("websocket error");
        if let Message::Text(text) = msg {
            return decode_message(&text).expect("master sent an undecodable frame");
        }
    }
}

/// Reads events until `pred` matches.
async fn wait_for(
    ws: &mut WebSocketStream<TcpStream>,
    pred: impl Fn(&InputEvent) -> bool,
) -> InputEvent {
    loop {
        let event = next_event(ws).await;
        if pred(&event) {
            return event;
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_handoff_forwarding_and_release_over_websocket() {
    // Arrange
    let mut f = start((100, 100)).await;

    // Act: a key pressed while local must not reach the slave
    assert!(f
        .capture
        .inject_event(CapturedEvent::KeyDown(KeyIdentifier::Char('x'))));
    sleep(Duration::from_millis(50)).await;
    f.capture.set_pointer(1919, 100);

    // Assert: the first thing on the wire is the grab
    assert_eq!(next_event(&mut f.slave).await, InputEvent::Grab);
    assert!(matches!(
        next_event(&mut f.slave).await,
        InputEvent::PointerDelta { .. }
    ));

    // Act: key pressed while remote is forwarded
    assert!(f
        .capture
        .inject_event(CapturedEvent::KeyDown(KeyIdentifier::Char('k'))));
    let key = wait_for(&mut f.slave, |e| matches!(e, InputEvent::KeyEvent { .. })).await;

    // Assert
    assert_eq!(
        key,
        InputEvent::KeyEvent {
            key: KeyIdentifier::Char('k'),
            pressed: true
        }
    );

    // Act: slave releases, then closes
    f.capture.set_pointer(500, 100);
    f.slave
        .send(Message::Text(r#"{"type":"release"}"#.to_string()))
        .await
        .unwrap();
    f.slave
        .close(Some(CloseFrame {
            code: CloseCode::Normal,
            reason: "bye".into(),
        }))
        .await
        .unwrap();
    let report = timeout(WAIT, f.master).await.unwrap().unwrap();

    // Assert
    assert_eq!(
        report.reason,
        CloseReason::Peer {
            code: 1000,
            reason: "bye".to_string()
        }
    );
    assert_eq!(report.state_at_close, ControlState::Local);
    assert!(!f.capture.is_running(), "capture must stop with the session");
}

#[tokio::test]
async fn test_disconnect_while_remote_reports_remote_and_stops_capture() {
    // Arrange
    let mut f = start((1919, 0)).await;
    assert_eq!(next_event(&mut f.slave).await, InputEvent::Grab);

    // Act: drop the connection without a release
    drop(f.slave);
    let report = timeout(WAIT, f.master).await.unwrap().unwrap();

    // Assert
    assert_eq!(report.state_at_close, ControlState::Remote);
    assert!(!matches!(report.reason, CloseReason::LocalShutdown));
    assert!(!f.capture.is_running());
}

#[tokio::test]
async fn test_local_shutdown_sends_close_frame() {
    // Arrange
    let mut f = start((10, 10)).await;

    // Act
    f.running.store(false, Ordering::Relaxed);
    let report = timeout(WAIT, f.master).await.unwrap().unwrap();

    // Assert
    assert_eq!(report.reason, CloseReason::LocalShutdown);
    let saw_close = timeout(WAIT, async {
        while let Some(Ok(msg)) = f.slave.next().await {
            if matches!(msg, Message::Close(_)) {
                return true;
            }
        }
        false
    })
    .await
    .unwrap();
    assert!(saw_close, "slave must see a Close frame");
}

#[tokio::test]
async fn test_garbage_from_slave_does_not_end_session() {
    // Arrange
    let mut f = start((100, 100)).await;

    // Act
    f.slave
        .send(Message::Text("definitely not json".to_string()))
        .await
        .unwrap();
    f.slave
        .send(Message::Text(r#"{"type":"keydown","key":"Key.hyper"}"#.to_string()))
        .await
        .unwrap();
    f.capture.set_pointer(1919, 100);

    // Assert: the session is still alive and grabs
    assert_eq!(next_event(&mut f.slave).await, InputEvent::Grab);

    f.running.store(false, Ordering::Relaxed);
    timeout(WAIT, f.master).await.unwrap().unwrap();
}
