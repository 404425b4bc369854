// Lobby: joining, roster broadcasts, host handling and start

use std::time::Duration;

use serde_json::json;

use crate::support::build_test_state;
use crate::support::websocket::{
    join_room, start_test_server, wait_for_connections, wait_until, TIMEOUT,
};
use crate::support::websocket_client::WebSocketClient;

#[tokio::test]
async fn two_players_get_x_and_o_third_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_test_server(build_test_state()).await?;
    let room = "lobby-xo";

    let (mut alice, joined_a) = join_room(&server, room, "Alice").await?;
    assert_eq!(joined_a["room"], room);
    assert_eq!(joined_a["you_are_host"], true);
    assert_eq!(joined_a["your_symbol"], "X");
    assert_eq!(joined_a["phase"], "lobby");
    assert_eq!(joined_a["board"], json!([]));
    let alice_id = joined_a["your_id"].as_str().unwrap().to_string();

    let (_bob, joined_b) = join_room(&server, room, "Bob").await?;
    assert_eq!(joined_b["you_are_host"], false);
    assert_eq!(joined_b["your_symbol"], "O");
    assert_eq!(joined_b["names_by_symbol"], json!({"X": "Alice", "O": "Bob"}));
    assert_eq!(joined_b["symbols"][alice_id.as_str()], "X");

    let roster = alice.expect_event("player_list", TIMEOUT).await?;
    assert_eq!(roster["count"], 2);
    assert_eq!(roster["players"][0]["name"], "Alice");
    assert_eq!(roster["players"][0]["is_host"], true);
    assert_eq!(roster["players"][1]["name"], "Bob");

    let mut carol = WebSocketClient::connect_retry(&server.game_url(room), TIMEOUT).await?;
    carol
        .send_json(&json!({"action": "create_or_join", "nickname": "Carol"}))
        .await?;
    let err = carol.expect_event("error", TIMEOUT).await?;
    assert_eq!(err["message"], "Room is full (max. 2 players).");
    alice.expect_silence(Duration::from_millis(200)).await?;

    server.stop().await
}

#[tokio::test]
async fn blank_nicknames_get_default_and_stay_distinct() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_test_server(build_test_state()).await?;
    let (_first, joined) = join_room(&server, "nick", "   ").await?;
    assert_eq!(joined["players"][0]["name"], "Spieler");

    let (_second, joined) = join_room(&server, "nick", "").await?;
    assert_eq!(joined["players"][1]["name"], "Spieler 2");
    assert_eq!(joined["names_by_symbol"], json!({"X": "Spieler", "O": "Spieler 2"}));
    server.stop().await
}

#[tokio::test]
async fn only_host_may_start_and_start_carries_url() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_test_server(build_test_state()).await?;
    let room = "4711";

    let (mut alice, _) = join_room(&server, room, "Alice").await?;
    alice.send_json(&json!({"action": "start_game"})).await?;
    let err = alice.expect_event("error", TIMEOUT).await?;
    assert_eq!(err["message"], "At least 2 players are required.");

    let (mut bob, _) = join_room(&server, room, "Bob").await?;
    alice.expect_event("player_list", TIMEOUT).await?;

    bob.send_json(&json!({"action": "start_game"})).await?;
    let err = bob.expect_event("error", TIMEOUT).await?;
    assert_eq!(err["message"], "Only the host can start the game.");

    alice.send_json(&json!({"action": "start_game"})).await?;
    for client in [&mut alice, &mut bob] {
        let start = client.expect_event("start", TIMEOUT).await?;
        assert_eq!(start["url"], "/play/lobby/4711/");
    }

    server.stop().await
}

#[tokio::test]
async fn host_leaving_lobby_hands_over_host() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state();
    let hub = state.hub().clone();
    let registry = state.registry().clone();
    let server = start_test_server(state).await?;
    let room = "handover";

    let (mut alice, _) = join_room(&server, room, "Alice").await?;
    let (mut bob, joined_b) = join_room(&server, room, "Bob").await?;
    alice.expect_event("player_list", TIMEOUT).await?;
    wait_for_connections(&hub, 2, TIMEOUT).await?;

    alice.close().await?;
    let roster = bob.expect_event("player_list", TIMEOUT).await?;
    assert_eq!(roster["count"], 1);
    assert_eq!(roster["players"][0]["id"], joined_b["your_id"]);
    assert_eq!(roster["players"][0]["is_host"], true);
    assert_eq!(roster["names_by_symbol"], json!({"O": "Bob"}));

    bob.close().await?;
    wait_for_connections(&hub, 0, TIMEOUT).await?;
    wait_until(|| !registry.contains(room), "empty room removal", TIMEOUT).await?;

    server.stop().await
}

#[tokio::test]
async fn room_names_are_normalized() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_test_server(build_test_state()).await?;
    let (_client, joined) = join_room(&server, "my%20room!", "Alice").await?;
    assert_eq!(joined["room"], "my_room_");
    server.stop().await
}
