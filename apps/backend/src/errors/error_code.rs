//! Error codes for the Ultimate Tic-Tac-Toe backend.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE. Game codes appear in logs next
//! to the human-readable `error{message}` sent over the socket; HTTP codes
//! appear in Problem Details bodies.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Room membership
    /// Room already has two players
    RoomFull,
    /// Only the host may start the game
    NotHost,
    /// Fewer than two players present
    InsufficientPlayers,
    /// Connection holds no symbol in this room
    NotInGame,
    /// Room does not exist (never joined, or torn down)
    RoomNotFound,
    /// Reset requested before any game was started
    GameNotStarted,

    // Move validation
    /// Mover's symbol is not the current turn
    NotYourTurn,
    /// Big or small index outside 0..=8
    OutOfRange,
    /// Move ignores the forced big cell
    WrongBigCell,
    /// Target big cell already won or drawn
    BigCellClosed,
    /// Target small cell already written
    CellTaken,

    // Protocol
    /// Inbound frame is not a valid message
    MalformedMessage,
    /// No free room code left in the keyspace
    RoomCodesExhausted,

    // HTTP / system
    /// General bad request error
    BadRequest,
    /// Invalid room name in the connection path
    InvalidRoomName,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RoomFull => "ROOM_FULL",
            Self::NotHost => "NOT_HOST",
            Self::InsufficientPlayers => "INSUFFICIENT_PLAYERS",
            Self::NotInGame => "NOT_IN_GAME",
            Self::RoomNotFound => "ROOM_NOT_FOUND",
            Self::GameNotStarted => "GAME_NOT_STARTED",

            Self::NotYourTurn => "NOT_YOUR_TURN",
            Self::OutOfRange => "OUT_OF_RANGE",
            Self::WrongBigCell => "WRONG_BIG_CELL",
            Self::BigCellClosed => "BIG_CELL_CLOSED",
            Self::CellTaken => "CELL_TAKEN",

            Self::MalformedMessage => "MALFORMED_MESSAGE",
            Self::RoomCodesExhausted => "ROOM_CODES_EXHAUSTED",

            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidRoomName => "INVALID_ROOM_NAME",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
