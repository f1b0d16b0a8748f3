//! Presence hub
//!
//! The transient identity -> connection map plus chat room membership.
//! One active connection per identity: a new registration silently
//! replaces the old one, and disconnect cleanup is scan-and-remove by
//! connection ID (the identity may already be bound to a newer socket).
//!
//! Nothing here is persisted; a reconnect rebuilds the state. Push
//! failures are logged and swallowed so they can never fail the database
//! write that triggered them.

use std::collections::HashSet;

use dashmap::DashMap;
use skillswap_core::Snowflake;
use tokio::sync::mpsc;

use crate::events::ServerEvent;

/// A live connection's outbound channel
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    pub session_id: String,
    pub sender: mpsc::Sender<ServerEvent>,
}

/// Identity -> connection map with room membership
pub struct PresenceHub {
    users: DashMap<Snowflake, ConnectionHandle>,
    rooms: DashMap<String, HashSet<Snowflake>>,
}

impl PresenceHub {
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            rooms: DashMap::new(),
        }
    }

    /// Bind an identity to a connection. Idempotent upsert; an existing
    /// mapping for the identity is replaced without fan-out to the old
    /// socket.
    pub fn register(&self, user_id: Snowflake, handle: ConnectionHandle) {
        tracing::debug!(user_id = %user_id, session_id = %handle.session_id, "Presence registered");
        self.users.insert(user_id, handle);
    }

    /// The identity's live sender, if connected
    pub fn lookup(&self, user_id: Snowflake) -> Option<mpsc::Sender<ServerEvent>> {
        self.users.get(&user_id).map(|h| h.sender.clone())
    }

    #[inline]
    pub fn is_online(&self, user_id: Snowflake) -> bool {
        self.users.contains_key(&user_id)
    }

    /// Remove by connection ID on transport close. Scan-and-remove: only
    /// the mapping still pointing at this session goes away, so a
    /// replacement connection for the same identity survives.
    pub fn remove_session(&self, session_id: &str) {
        let mut dropped: Option<Snowflake> = None;
        self.users.retain(|user_id, handle| {
            if handle.session_id == session_id {
                dropped = Some(*user_id);
                false
            } else {
                true
            }
        });

        if let Some(user_id) = dropped {
            self.rooms.alter_all(|_, mut members| {
                members.remove(&user_id);
                members
            });
            self.rooms.retain(|_, members| !members.is_empty());
            tracing::debug!(user_id = %user_id, session_id, "Presence removed");
        }
    }

    /// Subscribe an identity to a room
    pub fn join_room(&self, room_id: &str, user_id: Snowflake) {
        self.rooms
            .entry(room_id.to_string())
            .or_default()
            .insert(user_id);
        tracing::trace!(room_id, user_id = %user_id, "Joined room");
    }

    /// Current member identities of a room
    pub fn room_members(&self, room_id: &str) -> Vec<Snowflake> {
        self.rooms
            .get(room_id)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Push an event to one identity. Returns false (after logging) when
    /// the user is offline or the channel is gone; never an error.
    pub async fn send_to(&self, user_id: Snowflake, event: ServerEvent) -> bool {
        let Some(sender) = self.lookup(user_id) else {
            return false;
        };
        if let Err(e) = sender.send(event).await {
            tracing::warn!(user_id = %user_id, error = %e, "Dropping push to dead connection");
            return false;
        }
        true
    }

    /// Fan an event out to every connected member of a room
    pub async fn broadcast_room(&self, room_id: &str, event: &ServerEvent) {
        for member in self.room_members(room_id) {
            self.send_to(member, event.clone()).await;
        }
    }

    /// Number of connected identities (diagnostics)
    pub fn connected_count(&self) -> usize {
        self.users.len()
    }
}

impl Default for PresenceHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{ConnectionUpdateStatus, ServerEvent};

    fn handle(session: &str) -> (ConnectionHandle, mpsc::Receiver<ServerEvent>) {
        let (tx, rx) = mpsc::channel(8);
        (
            ConnectionHandle {
                session_id: session.to_string(),
                sender: tx,
            },
            rx,
        )
    }

    fn test_event() -> ServerEvent {
        ServerEvent::ConnectionUpdate {
            user_id: Snowflake::new(1),
            other_id: Snowflake::new(2),
            status: ConnectionUpdateStatus::Accepted,
        }
    }

    #[tokio::test]
    async fn register_and_lookup() {
        let hub = PresenceHub::new();
        let user = Snowflake::new(1);
        let (h, mut rx) = handle("s1");
        hub.register(user, h);

        assert!(hub.is_online(user));
        assert!(hub.send_to(user, test_event()).await);
        assert!(rx.recv().await.is_some());
    }

    #[tokio::test]
    async fn new_connection_replaces_old_mapping() {
        let hub = PresenceHub::new();
        let user = Snowflake::new(1);
        let (old, _old_rx) = handle("old");
        let (new, mut new_rx) = handle("new");

        hub.register(user, old);
        hub.register(user, new);
        assert_eq!(hub.connected_count(), 1);

        assert!(hub.send_to(user, test_event()).await);
        assert!(new_rx.try_recv().is_ok());
    }

    #[tokio::test]
    async fn remove_session_only_drops_its_own_mapping() {
        let hub = PresenceHub::new();
        let user = Snowflake::new(1);
        let (old, _old_rx) = handle("old");
        hub.register(user, old);
        let (new, _new_rx) = handle("new");
        hub.register(user, new);

        // The old transport closes after being replaced; the new mapping
        // must survive.
        hub.remove_session("old");
        assert!(hub.is_online(user));

        hub.remove_session("new");
        assert!(!hub.is_online(user));
    }

    #[tokio::test]
    async fn disconnect_leaves_rooms() {
        let hub = PresenceHub::new();
        let user = Snowflake::new(1);
        let (h, _rx) = handle("s1");
        hub.register(user, h);
        hub.join_room("1_2", user);

        assert_eq!(hub.room_members("1_2"), vec![user]);
        hub.remove_session("s1");
        assert!(hub.room_members("1_2").is_empty());
    }

    #[tokio::test]
    async fn send_to_offline_user_is_swallowed() {
        let hub = PresenceHub::new();
        assert!(!hub.send_to(Snowflake::new(99), test_event()).await);
    }
}
