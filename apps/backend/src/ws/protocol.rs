use serde::{Deserialize, Serialize};

use crate::domain::{BoardEntry, FinishedField, Line, Symbol};
use crate::errors::GameError;
use crate::rooms::{
    ConnId, GameOver, GameView, JoinResult, MoveResult, Phase, ResetResult, RoomId, Roster,
    Snapshot,
};

pub const RESET_MESSAGE: &str = "Game reset";

/// Inbound frames on the game channel.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ClientMsg {
    CreateOrJoin {
        #[serde(default)]
        nickname: Option<String>,
    },
    StartGame,
    GameMove {
        big: i64,
        small: i64,
    },
    Reset,
    GetState,
}

/// Inbound frames on the allocator channel.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AllocatorMsg {
    RequestCode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ServerMsg {
    CodeAllocated {
        code: String,
    },

    Joined {
        room: RoomId,
        you_are_host: bool,
        your_id: ConnId,
        phase: Phase,
        your_symbol: Option<Symbol>,
        board: Vec<BoardEntry>,
        #[serde(rename = "currentPlayer")]
        current_player: Option<Symbol>,
        finished_fields: Vec<FinishedField>,
        big_field_to_click: Option<u8>,
        #[serde(flatten)]
        roster: Roster,
    },

    PlayerList {
        count: usize,
        #[serde(flatten)]
        roster: Roster,
    },

    Start {
        url: String,
    },

    Move {
        big: u8,
        small: u8,
        symbol: Symbol,
        #[serde(rename = "currentPlayer")]
        current_player: Option<Symbol>,
        finished_fields: Vec<FinishedField>,
        big_field_to_click: Option<u8>,
    },

    GameOver {
        winner: Option<Symbol>,
        line: Option<Line>,
        draw: bool,
    },

    Reset {
        message: String,
        board: Vec<BoardEntry>,
        #[serde(rename = "currentPlayer")]
        current_player: Option<Symbol>,
        finished_fields: Vec<FinishedField>,
        big_field_to_click: Option<u8>,
    },

    State {
        room: RoomId,
        phase: Phase,
        your_id: ConnId,
        your_symbol: Option<Symbol>,
        you_are_host: bool,
        #[serde(flatten)]
        roster: Roster,
        board: Vec<BoardEntry>,
        #[serde(rename = "currentPlayer")]
        current_player: Option<Symbol>,
        finished_fields: Vec<FinishedField>,
        big_field_to_click: Option<u8>,
    },

    Error {
        message: String,
    },
}

impl ServerMsg {
    pub fn joined(room: &RoomId, result: JoinResult) -> Self {
        let game = result.game.unwrap_or_else(|| GameView {
            board: Vec::new(),
            finished_fields: Vec::new(),
            current_player: None,
            forced_cell: None,
        });
        ServerMsg::Joined {
            room: room.clone(),
            you_are_host: result.is_host,
            your_id: result.conn,
            phase: result.phase,
            your_symbol: result.symbol,
            board: game.board,
            current_player: game.current_player,
            finished_fields: game.finished_fields,
            big_field_to_click: game.forced_cell,
            roster: result.roster,
        }
    }

    pub fn player_list(roster: Roster) -> Self {
        ServerMsg::PlayerList {
            count: roster.players.len(),
            roster,
        }
    }

    pub fn start(url: String) -> Self {
        ServerMsg::Start { url }
    }

    pub fn moved(result: &MoveResult) -> Self {
        ServerMsg::Move {
            big: result.big,
            small: result.small,
            symbol: result.symbol,
            current_player: result.next_turn,
            finished_fields: result.finished_fields.clone(),
            big_field_to_click: result.forced_cell,
        }
    }

    pub fn game_over(over: GameOver) -> Self {
        ServerMsg::GameOver {
            winner: over.winner,
            line: over.line,
            draw: over.is_draw(),
        }
    }

    pub fn reset(result: ResetResult) -> Self {
        ServerMsg::Reset {
            message: RESET_MESSAGE.to_string(),
            board: result.game.board,
            current_player: result.game.current_player,
            finished_fields: result.game.finished_fields,
            big_field_to_click: result.game.forced_cell,
        }
    }

    pub fn state(snapshot: Snapshot) -> Self {
        ServerMsg::State {
            room: snapshot.room,
            phase: snapshot.phase,
            your_id: snapshot.conn,
            your_symbol: snapshot.symbol,
            you_are_host: snapshot.is_host,
            roster: snapshot.roster,
            board: snapshot.game.board,
            current_player: snapshot.game.current_player,
            finished_fields: snapshot.game.finished_fields,
            big_field_to_click: snapshot.game.forced_cell,
        }
    }

    pub fn error(err: &GameError) -> Self {
        ServerMsg::Error {
            message: err.to_string(),
        }
    }

    /// Event name as it appears on the wire, for logging.
    pub fn event(&self) -> &'static str {
        match self {
            ServerMsg::CodeAllocated { .. } => "code_allocated",
            ServerMsg::Joined { .. } => "joined",
            ServerMsg::PlayerList { .. } => "player_list",
            ServerMsg::Start { .. } => "start",
            ServerMsg::Move { .. } => "move",
            ServerMsg::GameOver { .. } => "game_over",
            ServerMsg::Reset { .. } => "reset",
            ServerMsg::State { .. } => "state",
            ServerMsg::Error { .. } => "error",
        }
    }
}
