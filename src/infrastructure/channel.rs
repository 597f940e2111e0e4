//! Real-time event channel over WebSocket.
//!
//! One channel is opened per joined room and owned exclusively by that room
//! session. The credential travels as a query parameter set before the
//! connection is established. Sends are fire-and-forget; there is no
//! acknowledgment and no automatic reconnection.

use futures_util::{
    SinkExt, StreamExt,
    stream::{SplitSink, SplitStream},
};
use thiserror::Error;
use tokio::net::TcpStream;
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};

use crate::domain::AuthToken;
use crate::infrastructure::dto::ws::{ClientEvent, ServerEvent};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Channel-specific errors
#[derive(Debug, Error)]
pub enum ChannelError {
    /// Connection could not be established
    #[error("connection failed: {0}")]
    Connect(String),

    /// An outbound event could not be written
    #[error("send failed: {0}")]
    Send(String),

    /// The connection broke while reading
    #[error("connection lost: {0}")]
    Receive(String),
}

/// A live, authenticated event channel
pub struct EventChannel {
    write: SplitSink<WsStream, Message>,
    read: SplitStream<WsStream>,
}

impl EventChannel {
    /// Open a channel to `ws_url`, authenticating with `token`
    pub async fn connect(ws_url: &str, token: &AuthToken) -> Result<Self, ChannelError> {
        let url = format!("{}?token={}", ws_url, token.as_str());

        let (ws_stream, _response) = connect_async(&url)
            .await
            .map_err(|e| ChannelError::Connect(e.to_string()))?;

        tracing::info!("Connected to real-time channel at {}", ws_url);

        let (write, read) = ws_stream.split();
        Ok(Self { write, read })
    }

    /// Emit one event. Fire-and-forget from the caller's perspective;
    /// failures surface only as an error to log.
    pub async fn send(&mut self, event: &ClientEvent) -> Result<(), ChannelError> {
        let json = serde_json::to_string(event).map_err(|e| ChannelError::Send(e.to_string()))?;

        self.write
            .send(Message::Text(json.into()))
            .await
            .map_err(|e| ChannelError::Send(e.to_string()))
    }

    /// Wait for the next recognized event.
    ///
    /// Returns `None` once the server closes the connection. Frames that do
    /// not parse as a known event are logged and skipped.
    pub async fn next_event(&mut self) -> Option<Result<ServerEvent, ChannelError>> {
        while let Some(message) = self.read.next().await {
            match message {
                Ok(Message::Text(text)) => match serde_json::from_str::<ServerEvent>(&text) {
                    Ok(event) => return Some(Ok(event)),
                    Err(e) => {
                        tracing::warn!("Ignoring unrecognized frame: {}", e);
                    }
                },
                Ok(Message::Binary(data)) => {
                    tracing::debug!("Ignoring {} bytes of binary data", data.len());
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    return None;
                }
                Ok(_) => {}
                Err(e) => {
                    return Some(Err(ChannelError::Receive(e.to_string())));
                }
            }
        }

        None
    }

    /// Close the channel. Part of session teardown; errors are only logged
    /// since there is nothing left to recover.
    pub async fn close(mut self) {
        if let Err(e) = self.write.close().await {
            tracing::debug!("Error while closing channel: {}", e);
        }
    }
}
