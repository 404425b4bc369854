use std::sync::Arc;

use actix::prelude::*;
use dashmap::DashMap;
use tracing::debug;

use crate::rooms::{ConnId, RoomId};
use crate::ws::protocol::ServerMsg;

/// One outbound event fanned out to a session.
#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct RoomEvent(pub Arc<ServerMsg>);

/// Broadcast groups: room → connection → session mailbox.
///
/// Sessions join their room's group when they connect and leave it when
/// they stop, independent of whether they ever became players.
#[derive(Default)]
pub struct RoomHub {
    groups: DashMap<RoomId, DashMap<ConnId, Recipient<RoomEvent>>>,
}

impl RoomHub {
    pub fn new() -> Self {
        Self {
            groups: DashMap::new(),
        }
    }

    pub fn register(&self, room: &RoomId, conn: ConnId, recipient: Recipient<RoomEvent>) {
        let group = self.groups.entry(room.clone()).or_default();
        group.insert(conn, recipient);
    }

    pub fn unregister(&self, room: &RoomId, conn: ConnId) {
        if let Some(group) = self.groups.get(room) {
            group.remove(&conn);
        }
        // Re-check under the shard write lock so a concurrent register wins.
        self.groups.remove_if(room, |_, group| group.is_empty());
    }

    /// Queue `msg` on every session of the room. Mailbox order per session
    /// follows call order.
    pub fn broadcast(&self, room: &RoomId, msg: ServerMsg) {
        let Some(group) = self.groups.get(room) else {
            return;
        };
        debug!(
            room = %room,
            event = msg.event(),
            recipients = group.len(),
            "[WS HUB] broadcast"
        );
        let event = RoomEvent(Arc::new(msg));
        for recipient in group.iter() {
            recipient.value().do_send(event.clone());
        }
    }

    pub fn room_connection_count(&self, room: &RoomId) -> usize {
        self.groups.get(room).map(|g| g.len()).unwrap_or(0)
    }

    pub fn active_connections_count(&self) -> usize {
        self.groups.iter().map(|g| g.len()).sum()
    }
}
