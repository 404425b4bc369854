//! Room coordinator: the only code that mutates a `Room`.
//!
//! Every operation is synchronous and runs to completion under the room's
//! registry entry lock, so one room never sees two interleaved mutations.

use std::collections::{BTreeMap, HashMap};

use crate::domain::rules::{board_index, PLAYERS};
use crate::domain::{
    next_forced_cell, BoardEntry, FinishedField, Line, Outcome, Symbol, UltimateBoard,
};
use crate::errors::GameError;
use crate::rooms::room::{ConnId, Phase, Player, Room, RoomId, Roster};

/// Display name used when a client sends no usable nickname.
pub const DEFAULT_NICKNAME: &str = "Spieler";

/// Trim a client nickname, falling back to [`DEFAULT_NICKNAME`].
pub fn clean_nickname(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => DEFAULT_NICKNAME.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// New player in a free slot.
    Fresh,
    /// Name matched a frozen binding while a game exists.
    Reconnected,
    /// Connection was already a player; nothing changed.
    AlreadyJoined,
}

/// Board, completions, turn and forced cell in wire-ready form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameView {
    pub board: Vec<BoardEntry>,
    pub finished_fields: Vec<FinishedField>,
    pub current_player: Option<Symbol>,
    pub forced_cell: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinResult {
    pub kind: JoinKind,
    pub conn: ConnId,
    pub is_host: bool,
    pub symbol: Option<Symbol>,
    pub phase: Phase,
    /// Stale connection that lost its symbol to a reconnection.
    pub evicted: Option<ConnId>,
    /// Present once a game has been started.
    pub game: Option<GameView>,
    pub roster: Roster,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartResult {
    pub phase: Phase,
    pub current_player: Symbol,
    pub names_by_symbol: BTreeMap<Symbol, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver {
    /// `None` for a global draw.
    pub winner: Option<Symbol>,
    /// Winning big-cell line; `None` for a draw.
    pub line: Option<Line>,
}

impl GameOver {
    pub fn is_draw(&self) -> bool {
        self.winner.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    pub big: u8,
    pub small: u8,
    pub symbol: Symbol,
    pub small_outcome: Outcome,
    pub finished_fields: Vec<FinishedField>,
    pub forced_cell: Option<u8>,
    /// `None` once the game is over.
    pub next_turn: Option<Symbol>,
    pub game_over: Option<GameOver>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetResult {
    pub game: GameView,
}

/// Read-only projection for resynchronization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub room: RoomId,
    pub conn: ConnId,
    pub symbol: Option<Symbol>,
    pub is_host: bool,
    pub phase: Phase,
    pub roster: Roster,
    pub game: GameView,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeaveResult {
    pub was_player: bool,
    /// Lobby roster changed and players remain to be told.
    pub broadcast_roster: bool,
    pub new_host: Option<ConnId>,
    /// Lobby is now empty and may be dropped from the registry.
    pub now_empty: bool,
}

impl Room {
    pub fn join(&mut self, conn: ConnId, name: &str) -> Result<JoinResult, GameError> {
        if self.is_player(conn) {
            return Ok(self.join_result(conn, JoinKind::AlreadyJoined, None));
        }

        if self.phase.has_game() {
            if let Some(symbol) = self.frozen_symbol(name) {
                let evicted = self.rebind_connection(conn, name, symbol);
                if self.phase == Phase::Starting {
                    self.phase = Phase::Playing;
                }
                return Ok(self.join_result(conn, JoinKind::Reconnected, evicted));
            }
        }

        if self.players.len() >= PLAYERS {
            return Err(GameError::RoomFull);
        }
        // A departed in-game player keeps its binding, so a slot may be
        // free while no symbol is.
        let symbol = Symbol::ALL
            .into_iter()
            .find(|s| self.holder_of(*s).is_none())
            .ok_or(GameError::RoomFull)?;

        let name = self.unique_name(name);
        self.players.push(Player { conn, name });
        self.symbols.insert(conn, symbol);
        if self.host.is_none() {
            self.host = Some(conn);
        }

        Ok(self.join_result(conn, JoinKind::Fresh, None))
    }

    /// Names key the reconnection table, so no two players may share one.
    /// A taken name gets the lowest free ` 2`, ` 3`, ... suffix.
    fn unique_name(&self, name: &str) -> String {
        let taken = |candidate: &str| {
            self.players.iter().any(|p| p.name == candidate)
                || self.rebind.contains_key(candidate)
        };
        if !taken(name) {
            return name.to_string();
        }
        (2..)
            .map(|n| format!("{name} {n}"))
            .find(|candidate| !taken(candidate))
            .unwrap_or_else(|| name.to_string())
    }

    fn rebind_connection(&mut self, conn: ConnId, name: &str, symbol: Symbol) -> Option<ConnId> {
        let stale = self.holder_of(symbol);
        if let Some(stale) = stale {
            self.symbols.remove(&stale);
            self.players.retain(|p| p.conn != stale);
            if self.host == Some(stale) {
                self.host = None;
            }
        }

        self.players.push(Player {
            conn,
            name: name.to_string(),
        });
        self.symbols.insert(conn, symbol);
        if self.host.is_none() {
            self.host = Some(conn);
        }
        stale
    }

    fn join_result(&self, conn: ConnId, kind: JoinKind, evicted: Option<ConnId>) -> JoinResult {
        JoinResult {
            kind,
            conn,
            is_host: self.host == Some(conn),
            symbol: self.symbol_of(conn),
            phase: self.phase,
            evicted,
            game: self.phase.has_game().then(|| self.game_view()),
            roster: self.roster(),
        }
    }

    pub fn start(&mut self, conn: ConnId) -> Result<StartResult, GameError> {
        if self.host != Some(conn) {
            return Err(GameError::NotHost);
        }
        if self.players.len() < PLAYERS {
            return Err(GameError::InsufficientPlayers);
        }

        let frozen: HashMap<String, Symbol> = self
            .players
            .iter()
            .filter_map(|p| self.symbol_of(p.conn).map(|s| (p.name.clone(), s)))
            .collect();
        self.rebind = frozen;

        self.board = UltimateBoard::empty();
        self.turn = Some(Symbol::X);
        self.forced_cell = None;
        self.phase = Phase::Starting;

        Ok(StartResult {
            phase: self.phase,
            current_player: Symbol::X,
            names_by_symbol: self.roster().names_by_symbol,
        })
    }

    /// Validation order: symbol, turn, range, forced cell, closed big cell,
    /// taken small cell.
    pub fn apply_move(
        &mut self,
        conn: ConnId,
        big: i64,
        small: i64,
    ) -> Result<MoveResult, GameError> {
        let symbol = self.symbol_of(conn).ok_or(GameError::NotInGame)?;
        if self.turn != Some(symbol) {
            return Err(GameError::NotYourTurn);
        }
        let (Some(big), Some(small)) = (board_index(big), board_index(small)) else {
            return Err(GameError::OutOfRange);
        };
        if self.forced_cell.is_some_and(|forced| forced != big) {
            return Err(GameError::WrongBigCell);
        }
        if self.board.is_closed(big) {
            return Err(GameError::BigCellClosed);
        }
        if self.board.cell(big, small).is_some() {
            return Err(GameError::CellTaken);
        }

        let placement = self.board.place(big, small, symbol);

        let game_over = match placement.big_outcome {
            Outcome::Win { symbol, line } => Some(GameOver {
                winner: Some(symbol),
                line: Some(line),
            }),
            Outcome::Draw => Some(GameOver {
                winner: None,
                line: None,
            }),
            Outcome::Ongoing => None,
        };

        if game_over.is_some() {
            self.phase = Phase::Finished;
            self.forced_cell = None;
            self.turn = None;
        } else {
            self.forced_cell = next_forced_cell(small, self.board.completion(small));
            self.turn = Some(symbol.other());
            if self.phase == Phase::Starting {
                self.phase = Phase::Playing;
            }
        }

        Ok(MoveResult {
            big,
            small,
            symbol,
            small_outcome: placement.small_outcome,
            finished_fields: self.board.finished_fields(),
            forced_cell: self.forced_cell,
            next_turn: self.turn,
            game_over,
        })
    }

    /// Clear the board for a rematch; players, symbols and host stay.
    pub fn reset(&mut self) -> Result<ResetResult, GameError> {
        if !self.phase.has_game() {
            return Err(GameError::GameNotStarted);
        }

        self.board = UltimateBoard::empty();
        self.turn = Some(Symbol::X);
        self.forced_cell = None;
        self.phase = Phase::Playing;

        Ok(ResetResult {
            game: self.game_view(),
        })
    }

    pub fn snapshot(&self, conn: ConnId) -> Snapshot {
        Snapshot {
            room: self.id.clone(),
            conn,
            symbol: self.symbol_of(conn),
            is_host: self.host == Some(conn),
            phase: self.phase,
            roster: self.roster(),
            game: self.game_view(),
        }
    }

    /// Drop a connection. In-game departures keep their symbol binding so
    /// the player can reconnect by name; lobby departures free everything.
    pub fn leave(&mut self, conn: ConnId) -> LeaveResult {
        let Some(pos) = self.players.iter().position(|p| p.conn == conn) else {
            return LeaveResult::default();
        };
        self.players.remove(pos);

        if self.phase.has_game() {
            // Host must be connected; a reconnection claims it again.
            if self.host == Some(conn) {
                self.host = None;
            }
            return LeaveResult {
                was_player: true,
                ..LeaveResult::default()
            };
        }

        self.symbols.remove(&conn);
        let mut new_host = None;
        if self.host == Some(conn) {
            self.host = self.players.first().map(|p| p.conn);
            new_host = self.host;
        }

        LeaveResult {
            was_player: true,
            broadcast_roster: !self.players.is_empty(),
            new_host,
            now_empty: self.players.is_empty(),
        }
    }

    pub fn game_view(&self) -> GameView {
        GameView {
            board: self.board.entries(),
            finished_fields: self.board.finished_fields(),
            current_player: self.turn,
            forced_cell: self.forced_cell,
        }
    }
}
