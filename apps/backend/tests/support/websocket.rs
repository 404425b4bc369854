// WebSocket test utilities

use std::net::{SocketAddr, TcpListener};
use std::time::Duration;

use actix_web::{web, App, HttpServer};
use serde_json::{json, Value};
use ultictactoe_backend::middleware::request_trace::RequestTrace;
use ultictactoe_backend::middleware::structured_logger::StructuredLogger;
use ultictactoe_backend::routes;
use ultictactoe_backend::state::app_state::AppState;
use ultictactoe_backend::ws::hub::RoomHub;

use crate::support::websocket_client::WebSocketClient;

pub const TIMEOUT: Duration = Duration::from_secs(5);

pub struct TestServer {
    pub handle: actix_web::dev::ServerHandle,
    pub addr: SocketAddr,
    pub join: tokio::task::JoinHandle<Result<(), std::io::Error>>,
}

impl TestServer {
    pub fn game_url(&self, room: &str) -> String {
        format!("ws://{}/ws/game/{}/", self.addr, room)
    }

    pub fn lobby_url(&self) -> String {
        format!("ws://{}/ws/lobby/", self.addr)
    }

    pub async fn stop(self) -> Result<(), Box<dyn std::error::Error>> {
        self.handle.stop(true).await;
        self.join.await??;
        Ok(())
    }
}

/// Start a real HTTP server on an ephemeral port with the production routes
/// and middleware, so tests can drive it with real WebSocket clients.
pub async fn start_test_server(state: AppState) -> Result<TestServer, Box<dyn std::error::Error>> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    let state_data = web::Data::new(state);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state_data.clone())
            .wrap(RequestTrace)
            .wrap(StructuredLogger)
            .configure(routes::configure)
    })
    .workers(2)
    .listen(listener)?
    .run();

    let handle = server.handle();
    let join = tokio::spawn(server);

    Ok(TestServer { handle, addr, join })
}

pub async fn wait_for_connections(
    hub: &RoomHub,
    expected: usize,
    timeout: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let start = tokio::time::Instant::now();
    loop {
        if hub.active_connections_count() == expected {
            return Ok(());
        }
        if start.elapsed() >= timeout {
            return Err(format!(
                "timeout waiting for active_connections_count == {expected} (got {})",
                hub.active_connections_count()
            )
            .into());
        }
        tokio::task::yield_now().await;
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

/// Connect to `room`, send `create_or_join` and consume the `joined` reply
/// plus the caller's own `player_list`. Returns the client and `joined`.
pub async fn join_room(
    server: &TestServer,
    room: &str,
    nickname: &str,
) -> Result<(WebSocketClient, Value), Box<dyn std::error::Error>> {
    let mut client = WebSocketClient::connect_retry(&server.game_url(room), TIMEOUT).await?;
    client
        .send_json(&json!({"action": "create_or_join", "nickname": nickname}))
        .await?;
    let joined = client.expect_event("joined", TIMEOUT).await?;
    client.expect_event("player_list", TIMEOUT).await?;
    Ok((client, joined))
}

/// Two joined players with the game started; both `start` events consumed.
pub async fn started_game(
    server: &TestServer,
    room: &str,
) -> Result<(WebSocketClient, WebSocketClient), Box<dyn std::error::Error>> {
    let (mut x, _) = join_room(server, room, "Alice").await?;
    let (mut o, _) = join_room(server, room, "Bob").await?;
    x.expect_event("player_list", TIMEOUT).await?;

    x.send_json(&json!({"action": "start_game"})).await?;
    x.expect_event("start", TIMEOUT).await?;
    o.expect_event("start", TIMEOUT).await?;
    Ok((x, o))
}

pub async fn send_move(
    client: &mut WebSocketClient,
    big: i64,
    small: i64,
) -> Result<(), Box<dyn std::error::Error>> {
    client
        .send_json(&json!({"action": "game_move", "big": big, "small": small}))
        .await
}

/// Poll `check` until it holds or `timeout` elapses.
pub async fn wait_until<F>(
    mut check: F,
    what: &str,
    timeout: Duration,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnMut() -> bool,
{
    let start = tokio::time::Instant::now();
    while !check() {
        if start.elapsed() >= timeout {
            return Err(format!("timeout waiting for {what}").into());
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    Ok(())
}
