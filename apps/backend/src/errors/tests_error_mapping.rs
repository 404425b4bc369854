// Unit tests for error mapping - no HTTP server, no sockets
use actix_web::body::to_bytes;
use actix_web::ResponseError;

use crate::errors::{ErrorCode, GameError};
use crate::AppError;

#[test]
fn maps_bad_request_to_400() {
    let app = AppError::bad_request(ErrorCode::InvalidRoomName, "empty room name");
    assert_eq!(app.code(), ErrorCode::InvalidRoomName);
    assert_eq!(app.status().as_u16(), 400);
}

#[test]
fn maps_config_and_internal_to_500() {
    let config = AppError::config("BACKEND_PORT must be a valid port number");
    assert_eq!(config.code().as_str(), "CONFIG_ERROR");
    assert_eq!(config.status().as_u16(), 500);

    let internal = AppError::internal("boom");
    assert_eq!(internal.code().as_str(), "INTERNAL");
    assert_eq!(internal.status().as_u16(), 500);
}

#[test]
fn every_game_error_has_a_distinct_code() {
    let all = [
        GameError::RoomFull,
        GameError::NotHost,
        GameError::InsufficientPlayers,
        GameError::NotInGame,
        GameError::NotYourTurn,
        GameError::OutOfRange,
        GameError::WrongBigCell,
        GameError::BigCellClosed,
        GameError::CellTaken,
        GameError::RoomNotFound,
        GameError::GameNotStarted,
        GameError::MalformedMessage,
        GameError::RoomCodesExhausted,
    ];
    let mut codes: Vec<&str> = all.iter().map(|e| e.code().as_str()).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), all.len());
}

#[actix_web::test]
async fn problem_details_body_shape() {
    let resp = AppError::bad_request(ErrorCode::InvalidRoomName, "empty room name").error_response();
    assert_eq!(resp.status().as_u16(), 400);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/problem+json"
    );
    let trace_header = resp
        .headers()
        .get("x-trace-id")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();

    let body = to_bytes(resp.into_body()).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["code"], "INVALID_ROOM_NAME");
    assert_eq!(json["title"], "Invalid Room Name");
    assert_eq!(json["status"], 400);
    assert_eq!(json["detail"], "empty room name");
    assert_eq!(json["trace_id"], trace_header);
    assert_eq!(json["type"], "https://ultictactoe.app/errors/INVALID_ROOM_NAME");
}
