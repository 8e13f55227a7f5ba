use std::future;
use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::response::Response;
use futures::{SinkExt, StreamExt};

use crate::application::ports::{FileLoader, LlmClient};
use crate::application::services::{ChatService, RelayFrame};
use crate::presentation::state::AppState;

pub async fn chat_ws_handler<F, L>(
    ws: WebSocketUpgrade,
    Path(session_id): Path<String>,
    State(state): State<AppState<F, L>>,
) -> Response
where
    F: FileLoader + 'static,
    L: LlmClient + 'static,
{
    let chat_service = Arc::clone(&state.chat_service);
    ws.on_upgrade(move |socket| relay(socket, session_id, chat_service))
}

async fn relay<F, L>(socket: WebSocket, session_id: String, chat_service: Arc<ChatService<F, L>>)
where
    F: FileLoader + 'static,
    L: LlmClient + 'static,
{
    let session = match chat_service.open_session(session_id.clone()).await {
        Ok(session) => session,
        Err(e) => {
            // Dropping the socket closes the connection without a frame.
            tracing::error!(session_id = %session_id, error = %e, "Failed to open chat session");
            return;
        }
    };

    let (sink, stream) = socket.split();
    let inbound = stream.filter_map(|message| future::ready(into_relay_frame(message)));
    let outbound =
        sink.with(|frame: RelayFrame| future::ready(Ok::<_, axum::Error>(into_ws_message(frame))));

    session.run(inbound, outbound).await;
}

/// Ping and pong are answered by axum itself and never reach the session.
fn into_relay_frame(
    message: Result<Message, axum::Error>,
) -> Option<Result<RelayFrame, axum::Error>> {
    match message {
        Ok(Message::Text(text)) => Some(Ok(RelayFrame::Text(text.as_str().to_owned()))),
        Ok(Message::Binary(bytes)) => Some(Ok(RelayFrame::Binary(bytes.to_vec()))),
        Ok(Message::Close(_)) => Some(Ok(RelayFrame::Close)),
        Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => None,
        Err(e) => Some(Err(e)),
    }
}

fn into_ws_message(frame: RelayFrame) -> Message {
    match frame {
        RelayFrame::Text(text) => Message::Text(text.into()),
        RelayFrame::Binary(bytes) => Message::Binary(bytes.into()),
        RelayFrame::Close => Message::Close(None),
    }
}
