use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: usize = 6;
pub const TILE_KINDS: u8 = 6;
pub const GOAL_SCORE: u32 = 7;
pub const SESSION_SECONDS: u32 = 60;
pub const MIN_RUN: usize = 3;
pub const INITIAL_BEST_SCORE: u32 = 7;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct TileId(pub u64);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct TileKind(pub u8);

/// Hands out tile ids for one game state. Ids never repeat within the
/// allocator's lifetime, so a refilled or reshuffled tile is always new.
#[derive(Clone, Debug, Default)]
pub struct TileIdAllocator {
    next: u64,
}

impl TileIdAllocator {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    pub fn allocate(&mut self) -> TileId {
        let id = TileId(self.next);
        self.next += 1;
        id
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn is_adjacent(self, other: Position) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Cells covered by runs of `MIN_RUN` or more. A tile sitting on both a
/// horizontal and a vertical run appears once.
pub type MatchSet = BTreeSet<Position>;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub kind: TileKind,
    pub row: usize,
    pub col: usize,
}

impl Tile {
    pub fn new(id: TileId, kind: TileKind, pos: Position) -> Self {
        Self {
            id,
            kind,
            row: pos.row,
            col: pos.col,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum GameStatus {
    Menu,
    Playing,
    Won,
    Lost,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SelectOutcome {
    /// Not playing, cascade in flight, or the cell is off the board.
    Ignored,
    Selected,
    Deselected,
    /// Second cell was not adjacent; it becomes the new selection.
    Reselected,
    SwapRejected,
    SwapAccepted,
}

/// Every input the engine reacts to. Sessions feed these from the clock and
/// the player; replays feed them back in recorded order.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Match3Input {
    Start,
    Select { row: usize, col: usize },
    Tick,
    AdvanceCascade,
    Acknowledge,
    Retry,
    Leave,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    SelectionChanged {
        selection: Option<Position>,
    },
    SwapRejected {
        first: Position,
        second: Position,
    },
    CascadeStep {
        chain_index: u32,
        removed: usize,
        points: u32,
    },
    BoardReshuffled,
    TimerTick {
        time_remaining: u32,
    },
    Won {
        score: u32,
    },
    Lost {
        score: u32,
    },
}
