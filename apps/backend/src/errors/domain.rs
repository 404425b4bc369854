//! Game-level error type returned by every room operation.
//!
//! Transport-agnostic: the connection handler turns each variant into a
//! single `error{message}` frame for the offending connection. None of these
//! end a connection or tear down a room.

use thiserror::Error;

use crate::errors::ErrorCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Room is full (max. 2 players).")]
    RoomFull,
    #[error("Only the host can start the game.")]
    NotHost,
    #[error("At least 2 players are required.")]
    InsufficientPlayers,
    #[error("You are not a player in this game.")]
    NotInGame,
    #[error("It is not your turn.")]
    NotYourTurn,
    #[error("Field index out of range.")]
    OutOfRange,
    #[error("You must play in the highlighted field.")]
    WrongBigCell,
    #[error("This field is already decided.")]
    BigCellClosed,
    #[error("This cell is already taken.")]
    CellTaken,
    #[error("Room not found.")]
    RoomNotFound,
    #[error("The game has not been started yet.")]
    GameNotStarted,
    #[error("Malformed message.")]
    MalformedMessage,
    #[error("No free room code available.")]
    RoomCodesExhausted,
}

impl GameError {
    pub fn code(&self) -> ErrorCode {
        match self {
            GameError::RoomFull => ErrorCode::RoomFull,
            GameError::NotHost => ErrorCode::NotHost,
            GameError::InsufficientPlayers => ErrorCode::InsufficientPlayers,
            GameError::NotInGame => ErrorCode::NotInGame,
            GameError::NotYourTurn => ErrorCode::NotYourTurn,
            GameError::OutOfRange => ErrorCode::OutOfRange,
            GameError::WrongBigCell => ErrorCode::WrongBigCell,
            GameError::BigCellClosed => ErrorCode::BigCellClosed,
            GameError::CellTaken => ErrorCode::CellTaken,
            GameError::RoomNotFound => ErrorCode::RoomNotFound,
            GameError::GameNotStarted => ErrorCode::GameNotStarted,
            GameError::MalformedMessage => ErrorCode::MalformedMessage,
            GameError::RoomCodesExhausted => ErrorCode::RoomCodesExhausted,
        }
    }

    /// Malformed frames are dropped without a reply.
    pub fn is_reported(&self) -> bool {
        !matches!(self, GameError::MalformedMessage)
    }
}
