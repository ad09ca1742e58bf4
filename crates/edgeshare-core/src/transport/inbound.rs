//! Reading and classifying inbound frames.

use futures_util::{Stream, StreamExt};
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::{Error as WsError, Message as WsMessage};
use tracing::{debug, trace, warn};

use super::CloseReason;
use crate::domain::session::SessionId;
use crate::protocol::codec::decode_message;
use crate::protocol::messages::InputEvent;

/// Result of reading one frame from the peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// A decoded protocol message.
    Event(InputEvent),
    /// A frame that carried nothing actionable (malformed JSON, unmapped key,
    /// binary or control frame).  The session continues.
    Skipped,
    /// The connection is over.
    Closed(CloseReason),
}

/// Reads the next frame from `stream` and classifies it.
///
/// Malformed payloads are dropped at `debug` level and unmapped key or button
/// identifiers at `warn` level; neither ends the session.
pub async fn next_inbound<S>(stream: &mut S, session: &SessionId) -> Inbound
where
    S: Stream<Item = Result<WsMessage, WsError>> + Unpin,
{
    let frame = match stream.next().await {
        Some(Ok(frame)) => frame,
        Some(Err(WsError::ConnectionClosed | WsError::AlreadyClosed)) | None => {
            return Inbound::Closed(CloseReason::StreamEnded)
        }
        Some(Err(e)) => return Inbound::Closed(CloseReason::Transport(e.to_string())),
    };

    match frame {
        WsMessage::Text(text) => {
            trace!("session {session}: <- {text}");
            classify_text(&text, session)
        }
        WsMessage::Close(frame) => {
            let (code, reason) = match frame {
                Some(f) => (u16::from(f.code), f.reason.into_owned()),
                None => (u16::from(CloseCode::Status), String::new()),
            };
            Inbound::Closed(CloseReason::Peer { code, reason })
        }
        WsMessage::Binary(data) => {
            debug!("session {session}: ignoring binary frame ({} bytes)", data.len());
            Inbound::Skipped
        }
        WsMessage::Ping(_) | WsMessage::Pong(_) | WsMessage::Frame(_) => Inbound::Skipped,
    }
}

fn classify_text(text: &str, session: &SessionId) -> Inbound {
    match decode_message(text) {
        Ok(event) => Inbound::Event(event),
        Err(e) if e.is_unmapped_identifier() => {
            warn!("session {session}: dropping event: {e}");
            Inbound::Skipped
        }
        Err(e) => {
            debug!("session {session}: dropping frame: {e}");
            Inbound::Skipped
        }
    }
}
