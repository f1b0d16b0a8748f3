//! WebSocket endpoint
//!
//! Upgrades `/ws`, pumps frames, and feeds parsed events to the handlers.
//! Events on one connection are handled in arrival order (the receive
//! loop awaits each handler), which is what gives each handler its
//! persist-before-push guarantee.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use dashmap::DashMap;
use futures_util::{SinkExt, StreamExt};
use skillswap_service::ServiceContext;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::events::{ClientEvent, ServerEvent};
use crate::handlers::dispatch;
use crate::presence::PresenceHub;

/// Channel buffer size for outgoing events
const EVENT_BUFFER_SIZE: usize = 100;

/// Shared state for the realtime hub
#[derive(Clone)]
pub struct HubState {
    service_context: Arc<ServiceContext>,
    hub: Arc<PresenceHub>,
    /// Connection ID -> outbound channel, before and after identity binding
    sessions: Arc<DashMap<String, mpsc::Sender<ServerEvent>>>,
}

impl HubState {
    pub fn new(service_context: Arc<ServiceContext>, hub: Arc<PresenceHub>) -> Self {
        Self {
            service_context,
            hub,
            sessions: Arc::new(DashMap::new()),
        }
    }

    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    pub fn hub(&self) -> &PresenceHub {
        &self.hub
    }

    /// Outbound channel of a connection, if it is still open
    pub fn session_sender(&self, session_id: &str) -> Option<mpsc::Sender<ServerEvent>> {
        self.sessions.get(session_id).map(|s| s.clone())
    }
}

impl std::fmt::Debug for HubState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HubState")
            .field("connected", &self.hub.connected_count())
            .finish()
    }
}

/// `GET /ws` upgrade handler
pub async fn ws_handler(State(state): State<HubState>, ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(state, socket))
}

async fn handle_socket(state: HubState, socket: WebSocket) {
    let session_id = Uuid::new_v4().to_string();
    let (tx, mut rx) = mpsc::channel::<ServerEvent>(EVENT_BUFFER_SIZE);
    state.sessions.insert(session_id.clone(), tx);

    tracing::info!(session_id = %session_id, "Socket connected");

    let (mut ws_sink, mut ws_stream) = socket.split();

    // Outbound pump: everything queued for this connection
    let send_session = session_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match serde_json::to_string(&event) {
                Ok(json) => {
                    if ws_sink.send(Message::Text(json)).await.is_err() {
                        tracing::debug!(session_id = %send_session, "Socket send failed");
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!(session_id = %send_session, error = %e, "Event serialization failed");
                }
            }
        }
        let _ = ws_sink.close().await;
    });

    // Inbound loop: events are dispatched one at a time, in order
    while let Some(frame) = ws_stream.next().await {
        match frame {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientEvent>(&text) {
                Ok(event) => dispatch(&state, &session_id, event).await,
                Err(e) => {
                    // Malformed frames don't kill the connection; the
                    // client just gets no effect.
                    tracing::warn!(session_id = %session_id, error = %e, "Unparseable client event");
                }
            },
            Ok(Message::Close(_)) => {
                tracing::info!(session_id = %session_id, "Client closed socket");
                break;
            }
            Ok(Message::Ping(_) | Message::Pong(_) | Message::Binary(_)) => {}
            Err(e) => {
                tracing::warn!(session_id = %session_id, error = %e, "Socket error");
                break;
            }
        }
    }

    // Transport closed: unmap the connection and leave its rooms
    state.sessions.remove(&session_id);
    state.hub.remove_session(&session_id);
    send_task.abort();

    tracing::info!(session_id = %session_id, "Socket disconnected");
}
