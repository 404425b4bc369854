use std::collections::{BTreeMap, HashMap};
use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;
use uuid::Uuid;

use crate::domain::{Symbol, UltimateBoard};

/// Identity of one open socket. Fresh per connection, never reused.
pub type ConnId = Uuid;

/// Maximum room identifier length after normalization.
pub const MAX_ROOM_ID_LEN: usize = 90;

/// Room identifier restricted to `[A-Za-z0-9._-]`, at most 90 chars.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    /// Trim, replace every char outside the charset with `_`, truncate.
    /// Returns `None` when nothing is left.
    pub fn normalize(raw: &str) -> Option<Self> {
        let normalized: String = raw
            .trim()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .take(MAX_ROOM_ID_LEN)
            .collect();

        if normalized.is_empty() {
            None
        } else {
            Some(Self(normalized))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RoomId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// Room lifecycle stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Players gather; host may start once two are present.
    Lobby,
    /// Start was broadcast and clients are navigating to the game page.
    Starting,
    /// Moves are being played.
    Playing,
    /// Someone won or the big board drew; only `reset` continues.
    Finished,
}

impl Phase {
    /// Phases in which a game exists and transient disconnects are tolerated.
    pub fn has_game(self) -> bool {
        !matches!(self, Phase::Lobby)
    }
}

/// A connected participant in join order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub conn: ConnId,
    pub name: String,
}

/// Wire form of one roster row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerEntry {
    pub id: ConnId,
    pub name: String,
    pub is_host: bool,
}

/// Roster projection shared by `joined`, `player_list` and `state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Roster {
    pub players: Vec<PlayerEntry>,
    pub symbols: BTreeMap<ConnId, Symbol>,
    pub names_by_symbol: BTreeMap<Symbol, String>,
}

/// All mutable state of one room. Only the coordinator operations
/// (see `rooms::coordinator`) change it.
#[derive(Debug, Clone)]
pub struct Room {
    pub(crate) id: RoomId,
    pub(crate) phase: Phase,
    pub(crate) players: Vec<Player>,
    pub(crate) host: Option<ConnId>,
    pub(crate) symbols: HashMap<ConnId, Symbol>,
    /// Display name → symbol, frozen at game start; consulted only while a
    /// game exists, never merged into `symbols`.
    pub(crate) rebind: HashMap<String, Symbol>,
    pub(crate) board: UltimateBoard,
    pub(crate) forced_cell: Option<u8>,
    pub(crate) turn: Option<Symbol>,
}

impl Room {
    pub fn new(id: RoomId) -> Self {
        Self {
            id,
            phase: Phase::Lobby,
            players: Vec::new(),
            host: None,
            symbols: HashMap::new(),
            rebind: HashMap::new(),
            board: UltimateBoard::empty(),
            forced_cell: None,
            turn: None,
        }
    }

    pub fn id(&self) -> &RoomId {
        &self.id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn host(&self) -> Option<ConnId> {
        self.host
    }

    pub fn board(&self) -> &UltimateBoard {
        &self.board
    }

    pub fn forced_cell(&self) -> Option<u8> {
        self.forced_cell
    }

    pub fn current_turn(&self) -> Option<Symbol> {
        self.turn
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn is_player(&self, conn: ConnId) -> bool {
        self.players.iter().any(|p| p.conn == conn)
    }

    pub fn player_name(&self, conn: ConnId) -> Option<&str> {
        self.players
            .iter()
            .find(|p| p.conn == conn)
            .map(|p| p.name.as_str())
    }

    pub fn symbol_of(&self, conn: ConnId) -> Option<Symbol> {
        self.symbols.get(&conn).copied()
    }

    pub fn holder_of(&self, symbol: Symbol) -> Option<ConnId> {
        self.symbols
            .iter()
            .find(|(_, s)| **s == symbol)
            .map(|(conn, _)| *conn)
    }

    pub fn frozen_symbol(&self, name: &str) -> Option<Symbol> {
        self.rebind.get(name).copied()
    }

    /// A lobby with nobody left in it; the registry drops these.
    pub fn is_empty_lobby(&self) -> bool {
        self.phase == Phase::Lobby && self.players.is_empty()
    }

    pub fn roster(&self) -> Roster {
        let players = self
            .players
            .iter()
            .map(|p| PlayerEntry {
                id: p.conn,
                name: p.name.clone(),
                is_host: self.host == Some(p.conn),
            })
            .collect();

        let symbols: BTreeMap<ConnId, Symbol> =
            self.symbols.iter().map(|(c, s)| (*c, *s)).collect();

        // Live holders first; the frozen table names a symbol whose holder
        // is currently disconnected.
        let mut names_by_symbol = BTreeMap::new();
        for player in &self.players {
            if let Some(symbol) = self.symbol_of(player.conn) {
                names_by_symbol.insert(symbol, player.name.clone());
            }
        }
        if self.phase.has_game() {
            for (name, symbol) in &self.rebind {
                names_by_symbol
                    .entry(*symbol)
                    .or_insert_with(|| name.clone());
            }
        }

        Roster {
            players,
            symbols,
            names_by_symbol,
        }
    }
}
