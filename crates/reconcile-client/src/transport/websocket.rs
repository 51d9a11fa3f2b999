//! WebSocket client transport
//!
//! Reads text frames from the server, dispatches them in arrival order and
//! writes any responses back. There is no reconnection.

use super::TransportResult;
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use reconcile_core::EndpointId;
use reconcile_rpc::RequestDispatcher;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

/// Counters for one connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionStats {
    /// Text frames dispatched
    pub frames: u64,
    /// Responses written back
    pub responses: u64,
}

/// A connected JSON-RPC endpoint
pub struct WebSocketEndpoint {
    endpoint_id: EndpointId,
    dispatcher: RequestDispatcher,
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WebSocketEndpoint {
    /// Open a client connection to `url`
    pub async fn connect(
        url: &str,
        endpoint_id: EndpointId,
        dispatcher: RequestDispatcher,
    ) -> TransportResult<Self> {
        let (stream, response) = connect_async(url).await?;

        tracing::info!(
            url = %url,
            endpoint_id = %endpoint_id,
            status = %response.status(),
            "WebSocket connection established"
        );

        Ok(Self {
            endpoint_id,
            dispatcher,
            stream,
        })
    }

    #[must_use]
    pub fn endpoint_id(&self) -> &EndpointId {
        &self.endpoint_id
    }

    /// Process frames until the server closes the connection
    pub async fn run(self) -> TransportResult<SessionStats> {
        serve_frames(self.stream, &self.endpoint_id, &self.dispatcher).await
    }
}

/// Dispatch every text frame read from `socket`, in order.
///
/// Returns when the stream ends or a close frame arrives.
pub async fn serve_frames<S>(
    socket: S,
    endpoint_id: &EndpointId,
    dispatcher: &RequestDispatcher,
) -> TransportResult<SessionStats>
where
    S: Stream<Item = Result<Message, tungstenite::Error>>
        + Sink<Message, Error = tungstenite::Error>
        + Unpin,
{
    let (mut sink, mut stream) = socket.split();
    let mut stats = SessionStats::default();

    while let Some(frame) = stream.next().await {
        match frame? {
            Message::Text(text) => {
                stats.frames += 1;
                for response in dispatcher.dispatch_text(endpoint_id, &text) {
                    sink.send(Message::Text(response.to_json()?)).await?;
                    stats.responses += 1;
                }
            }
            Message::Binary(data) => {
                tracing::debug!(
                    endpoint_id = %endpoint_id,
                    len = data.len(),
                    "Binary frames not supported, skipping"
                );
            }
            Message::Ping(_) | Message::Pong(_) => {
                // Pongs are queued by tungstenite itself
                tracing::trace!(endpoint_id = %endpoint_id, "Ping/pong");
            }
            Message::Close(frame) => {
                tracing::info!(
                    endpoint_id = %endpoint_id,
                    frame = ?frame,
                    "Server closed connection"
                );
                break;
            }
            Message::Frame(_) => {}
        }
    }

    tracing::debug!(
        endpoint_id = %endpoint_id,
        frames = stats.frames,
        responses = stats.responses,
        "Connection loop ended"
    );

    Ok(stats)
}
