// Reconnection by nickname while a game is running

use std::time::Duration;

use backend_test_support::unique_rooms::unique_room;
use serde_json::json;

use crate::support::build_test_state;
use crate::support::websocket::{
    join_room, send_move, start_test_server, started_game, wait_for_connections, TIMEOUT,
};
use crate::support::websocket_client::WebSocketClient;

#[tokio::test]
async fn dropped_player_rejoins_with_same_symbol_and_board(
) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state();
    let hub = state.hub().clone();
    let server = start_test_server(state).await?;
    let room = &unique_room("rejoin");

    let (mut x, mut o) = started_game(&server, room).await?;
    send_move(&mut x, 4, 4).await?;
    x.expect_event("move", TIMEOUT).await?;
    o.expect_event("move", TIMEOUT).await?;

    x.close().await?;
    wait_for_connections(&hub, 1, TIMEOUT).await?;
    // Mid-game departures keep the roster untouched.
    o.expect_silence(Duration::from_millis(200)).await?;

    let (mut x2, joined) = join_room(&server, room, "Alice").await?;
    assert_eq!(joined["your_symbol"], "X");
    assert_eq!(joined["phase"], "playing");
    assert_eq!(joined["board"], json!([[4, 4, "X"]]));
    assert_eq!(joined["currentPlayer"], "O");
    assert_eq!(joined["big_field_to_click"], 4);
    assert_eq!(joined["names_by_symbol"], json!({"X": "Alice", "O": "Bob"}));
    let new_id = joined["your_id"].as_str().unwrap().to_string();
    assert_eq!(joined["symbols"][new_id.as_str()], "X");

    let roster = o.expect_event("player_list", TIMEOUT).await?;
    assert_eq!(roster["count"], 2);

    send_move(&mut o, 4, 0).await?;
    let moved = x2.expect_event("move", TIMEOUT).await?;
    assert_eq!(moved["symbol"], "O");
    o.expect_event("move", TIMEOUT).await?;

    send_move(&mut x2, 0, 8).await?;
    let moved = o.expect_event("move", TIMEOUT).await?;
    assert_eq!(moved["symbol"], "X");

    server.stop().await
}

#[tokio::test]
async fn stranger_cannot_take_a_seat_mid_game() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_test_server(build_test_state()).await?;
    let room = &unique_room("no-seat");
    let (_x, _o) = started_game(&server, room).await?;

    let mut carol = WebSocketClient::connect_retry(&server.game_url(room), TIMEOUT).await?;
    carol
        .send_json(&json!({"action": "create_or_join", "nickname": "Carol"}))
        .await?;
    let err = carol.expect_event("error", TIMEOUT).await?;
    assert_eq!(err["message"], "Room is full (max. 2 players).");

    server.stop().await
}

#[tokio::test]
async fn second_socket_with_same_name_takes_over() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_test_server(build_test_state()).await?;
    let room = &unique_room("takeover");
    let (_x, mut o) = started_game(&server, room).await?;

    let (mut x2, joined) = join_room(&server, room, "Alice").await?;
    assert_eq!(joined["your_symbol"], "X");
    o.expect_event("player_list", TIMEOUT).await?;

    send_move(&mut x2, 1, 1).await?;
    let moved = o.expect_event("move", TIMEOUT).await?;
    assert_eq!(moved["symbol"], "X");

    server.stop().await
}
