use actix_web::web;

use crate::ws::{allocator, session};

/// WebSocket endpoints. Each path is served with and without the trailing
/// slash.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(vec!["/ws/lobby/", "/ws/lobby"]).route(web::get().to(allocator::upgrade)),
    );
    cfg.service(
        web::resource(vec!["/ws/game/{room_name}/", "/ws/game/{room_name}"])
            .route(web::get().to(session::upgrade)),
    );
}
