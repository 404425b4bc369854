use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::{ErrorCode, GameError};
use crate::rooms::{ConnId, RoomId};
use crate::services::rooms::RoomService;
use crate::state::app_state::AppState;
use crate::ws::hub::RoomEvent;
use crate::ws::protocol::{ClientMsg, ServerMsg};
use crate::AppError;

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    room_name: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let room = RoomId::normalize(&room_name).ok_or_else(|| {
        AppError::bad_request(
            ErrorCode::InvalidRoomName,
            "Room name must contain at least one character",
        )
    })?;

    let session = GameWsSession::new(
        Uuid::new_v4(),
        room,
        app_state.rooms().clone(),
        app_state.config.heartbeat_interval,
        app_state.config.client_timeout,
    );
    ws::start(session, &req, stream)
}

/// One game-channel socket, bound to a single room for its lifetime.
pub struct GameWsSession {
    conn_id: ConnId,
    room: RoomId,
    rooms: Arc<RoomService>,
    heartbeat_interval: Duration,
    client_timeout: Duration,
    last_heartbeat: Instant,
}

impl GameWsSession {
    fn new(
        conn_id: ConnId,
        room: RoomId,
        rooms: Arc<RoomService>,
        heartbeat_interval: Duration,
        client_timeout: Duration,
    ) -> Self {
        Self {
            conn_id,
            room,
            rooms,
            heartbeat_interval,
            client_timeout,
            last_heartbeat: Instant::now(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(self.heartbeat_interval, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > actor.client_timeout {
                warn!(
                    conn_id = %actor.conn_id,
                    room = %actor.room,
                    "[WS SESSION] heartbeat timed out"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    /// Run one client action. `Some` is a direct reply for this socket;
    /// everything else reaches it through the room broadcast.
    fn dispatch(&self, msg: ClientMsg) -> Result<Option<ServerMsg>, GameError> {
        let (room, conn) = (&self.room, self.conn_id);
        match msg {
            ClientMsg::CreateOrJoin { nickname } => {
                self.rooms.join(room, conn, nickname.as_deref()).map(Some)
            }
            ClientMsg::StartGame => self.rooms.start(room, conn).map(|()| None),
            ClientMsg::GameMove { big, small } => {
                self.rooms.apply_move(room, conn, big, small).map(|()| None)
            }
            ClientMsg::Reset => self.rooms.reset(room, conn).map(|()| None),
            ClientMsg::GetState => self.rooms.state(room, conn).map(Some),
        }
    }

    fn handle_text(&self, text: &str, ctx: &mut ws::WebsocketContext<Self>) {
        let Ok(msg) = serde_json::from_str::<ClientMsg>(text) else {
            debug!(
                conn_id = %self.conn_id,
                room = %self.room,
                code = %GameError::MalformedMessage.code(),
                "[WS SESSION] dropping malformed frame"
            );
            return;
        };

        match self.dispatch(msg) {
            Ok(Some(reply)) => Self::send_json(ctx, &reply),
            Ok(None) => {}
            Err(err) => {
                debug!(
                    conn_id = %self.conn_id,
                    room = %self.room,
                    code = %err.code(),
                    "[WS SESSION] request rejected"
                );
                if err.is_reported() {
                    Self::send_json(ctx, &ServerMsg::error(&err));
                }
            }
        }
    }
}

impl Actor for GameWsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        let recipient = ctx.address().recipient::<RoomEvent>();
        self.rooms.hub().register(&self.room, self.conn_id, recipient);

        info!(
            conn_id = %self.conn_id,
            room = %self.room,
            room_connections = self.rooms.hub().room_connection_count(&self.room),
            "[WS SESSION] started"
        );

        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.rooms.hub().unregister(&self.room, self.conn_id);
        self.rooms.leave(&self.room, self.conn_id);
        info!(
            conn_id = %self.conn_id,
            room = %self.room,
            "[WS SESSION] stopped"
        );
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for GameWsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();
                self.handle_text(&text, ctx);
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                debug!(conn_id = %self.conn_id, "[WS SESSION] ignoring binary frame");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(
                    conn_id = %self.conn_id,
                    room = %self.room,
                    error = %err,
                    "[WS SESSION] protocol error"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}

impl Handler<RoomEvent> for GameWsSession {
    type Result = ();

    fn handle(&mut self, msg: RoomEvent, ctx: &mut Self::Context) -> Self::Result {
        Self::send_json(ctx, &msg.0);
    }
}
