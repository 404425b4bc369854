//! Room service: runs coordinator operations inside a room's critical
//! section and fans the resulting events out to the room's group.
//!
//! Broadcasts are queued while the room guard is still held, so every
//! session observes events in the order the room applied them.

use std::sync::Arc;

use tracing::{debug, info};

use crate::errors::GameError;
use crate::rooms::{clean_nickname, ConnId, JoinKind, RoomId, RoomRegistry};
use crate::ws::hub::RoomHub;
use crate::ws::protocol::ServerMsg;

pub struct RoomService {
    registry: Arc<RoomRegistry>,
    hub: Arc<RoomHub>,
    game_url_prefix: String,
}

impl RoomService {
    pub fn new(registry: Arc<RoomRegistry>, hub: Arc<RoomHub>, game_url_prefix: String) -> Self {
        Self {
            registry,
            hub,
            game_url_prefix,
        }
    }

    pub fn registry(&self) -> &Arc<RoomRegistry> {
        &self.registry
    }

    pub fn hub(&self) -> &Arc<RoomHub> {
        &self.hub
    }

    /// Page clients navigate to once the host starts the game.
    pub fn game_url(&self, room: &RoomId) -> String {
        format!("{}{}/", self.game_url_prefix, room)
    }

    /// Join (or rejoin) `room`, creating it on first use. Returns the
    /// `joined` reply for the caller; the roster goes to the whole group.
    pub fn join(
        &self,
        room_id: &RoomId,
        conn: ConnId,
        nickname: Option<&str>,
    ) -> Result<ServerMsg, GameError> {
        let name = clean_nickname(nickname);
        let mut room = self.registry.get_or_create(room_id);
        let result = room.join(conn, &name)?;

        match result.kind {
            JoinKind::Fresh => info!(
                room = %room_id,
                conn_id = %conn,
                symbol = ?result.symbol,
                is_host = result.is_host,
                "[ROOMS] Player joined"
            ),
            JoinKind::Reconnected => info!(
                room = %room_id,
                conn_id = %conn,
                symbol = ?result.symbol,
                evicted = ?result.evicted,
                "[ROOMS] Player reconnected"
            ),
            JoinKind::AlreadyJoined => {}
        }

        if result.kind != JoinKind::AlreadyJoined {
            self.hub
                .broadcast(room_id, ServerMsg::player_list(result.roster.clone()));
        }

        Ok(ServerMsg::joined(room_id, result))
    }

    pub fn start(&self, room_id: &RoomId, conn: ConnId) -> Result<(), GameError> {
        let mut room = self.registry.get(room_id).ok_or(GameError::RoomNotFound)?;
        let started = room.start(conn)?;

        info!(
            room = %room_id,
            conn_id = %conn,
            players = ?started.names_by_symbol,
            "[ROOMS] Game started"
        );
        self.hub
            .broadcast(room_id, ServerMsg::start(self.game_url(room_id)));
        Ok(())
    }

    pub fn apply_move(
        &self,
        room_id: &RoomId,
        conn: ConnId,
        big: i64,
        small: i64,
    ) -> Result<(), GameError> {
        let mut room = self.registry.get(room_id).ok_or(GameError::RoomNotFound)?;
        let result = room.apply_move(conn, big, small)?;
        debug!(
            room = %room_id,
            conn_id = %conn,
            big = result.big,
            small = result.small,
            symbol = ?result.symbol,
            closes_big_cell = result.small_outcome.is_decided(),
            "[ROOMS] Move applied"
        );

        self.hub.broadcast(room_id, ServerMsg::moved(&result));
        if let Some(over) = result.game_over {
            info!(
                room = %room_id,
                winner = ?over.winner,
                line = ?over.line,
                "[ROOMS] Game over"
            );
            self.hub.broadcast(room_id, ServerMsg::game_over(over));
        }
        Ok(())
    }

    pub fn reset(&self, room_id: &RoomId, conn: ConnId) -> Result<(), GameError> {
        let mut room = self.registry.get(room_id).ok_or(GameError::RoomNotFound)?;
        let result = room.reset()?;

        info!(room = %room_id, conn_id = %conn, "[ROOMS] Game reset");
        self.hub.broadcast(room_id, ServerMsg::reset(result));
        Ok(())
    }

    pub fn state(&self, room_id: &RoomId, conn: ConnId) -> Result<ServerMsg, GameError> {
        let room = self.registry.get(room_id).ok_or(GameError::RoomNotFound)?;
        Ok(ServerMsg::state(room.snapshot(conn)))
    }

    /// Disconnect cleanup. Unknown rooms and non-players are ignored.
    pub fn leave(&self, room_id: &RoomId, conn: ConnId) {
        let (left, name) = {
            let Some(mut room) = self.registry.get(room_id) else {
                return;
            };
            let name = room.player_name(conn).map(str::to_owned);
            let left = room.leave(conn);
            if left.broadcast_roster {
                self.hub
                    .broadcast(room_id, ServerMsg::player_list(room.roster()));
            }
            (left, name)
        };

        if left.was_player {
            info!(
                room = %room_id,
                conn_id = %conn,
                name = ?name,
                new_host = ?left.new_host,
                "[ROOMS] Player left"
            );
        }
        if left.now_empty {
            self.registry.remove_if_empty(room_id);
        }
    }
}
