use actix_web::web;

pub mod health;
pub mod realtime;

/// Register every route. `main.rs` and the integration tests share this so
/// both serve the same surface.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check: /health
    health::configure_routes(cfg);

    // WebSockets: /ws/lobby/, /ws/game/{room_name}/
    realtime::configure_routes(cfg);
}
