//! Allocator channel: hands out free room codes. Not bound to any room.

use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::GameError;
use crate::rooms::{ConnId, RoomRegistry};
use crate::state::app_state::AppState;
use crate::utils::room_code::allocate_room_code;
use crate::ws::protocol::{AllocatorMsg, ServerMsg};

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let session = LobbyAllocatorSession {
        conn_id: Uuid::new_v4(),
        registry: app_state.registry().clone(),
        heartbeat_interval: app_state.config.heartbeat_interval,
        client_timeout: app_state.config.client_timeout,
        last_heartbeat: Instant::now(),
    };
    ws::start(session, &req, stream)
}

pub struct LobbyAllocatorSession {
    conn_id: ConnId,
    registry: Arc<RoomRegistry>,
    heartbeat_interval: Duration,
    client_timeout: Duration,
    last_heartbeat: Instant,
}

impl LobbyAllocatorSession {
    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS ALLOCATOR] failed to serialize outbound message"),
        }
    }

    fn allocate(&self) -> ServerMsg {
        match allocate_room_code(&self.registry) {
            Ok(code) => {
                debug!(conn_id = %self.conn_id, code = %code, "[WS ALLOCATOR] code allocated");
                ServerMsg::CodeAllocated { code }
            }
            Err(err) => {
                warn!(
                    conn_id = %self.conn_id,
                    code = %err.code(),
                    "[WS ALLOCATOR] allocation failed"
                );
                ServerMsg::error(&err)
            }
        }
    }
}

impl Actor for LobbyAllocatorSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, "[WS ALLOCATOR] started");

        ctx.run_interval(self.heartbeat_interval, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > actor.client_timeout {
                warn!(conn_id = %actor.conn_id, "[WS ALLOCATOR] heartbeat timed out");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, "[WS ALLOCATOR] stopped");
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for LobbyAllocatorSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();
                match serde_json::from_str::<AllocatorMsg>(&text) {
                    Ok(AllocatorMsg::RequestCode) => {
                        let reply = self.allocate();
                        Self::send_json(ctx, &reply);
                    }
                    Err(_) => debug!(
                        conn_id = %self.conn_id,
                        code = %GameError::MalformedMessage.code(),
                        "[WS ALLOCATOR] dropping malformed frame"
                    ),
                }
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(_) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(conn_id = %self.conn_id, error = %err, "[WS ALLOCATOR] protocol error");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}
