//! Socket event handlers
//!
//! Every handler persists first and pushes second, so a client that
//! queries state right after a push observes the stored result. Push
//! failures are logged by the hub and never unwind into the persistence
//! path.

mod chat;
mod connection;

use crate::events::ClientEvent;
use crate::server::HubState;

/// Dispatch one client event. Handler errors are logged and swallowed;
/// the socket stays open (the client must re-issue the request).
pub async fn dispatch(state: &HubState, session_id: &str, event: ClientEvent) {
    let result = match event {
        ClientEvent::RegisterUser { user_id } => {
            chat::register_user(state, session_id, user_id);
            Ok(())
        }
        ClientEvent::JoinChat { user_id, other_user_id } => {
            chat::join_chat(state, user_id, other_user_id);
            Ok(())
        }
        ClientEvent::SendMessage { sender_id, receiver_id, text } => {
            chat::send_message(state, sender_id, receiver_id, text).await
        }
        ClientEvent::SendConnectionRequest { from_id, to_id } => {
            connection::send_request(state, from_id, to_id).await
        }
        ClientEvent::AcceptConnectionRequest { from_id, to_id } => {
            connection::respond(state, from_id, to_id, true).await
        }
        ClientEvent::RejectConnectionRequest { from_id, to_id } => {
            connection::respond(state, from_id, to_id, false).await
        }
        ClientEvent::CancelConnectionRequest { from_id, to_id } => {
            connection::cancel(state, from_id, to_id).await
        }
    };

    if let Err(e) = result {
        tracing::warn!(session_id, error = %e, "Socket event handler failed");
    }
}
