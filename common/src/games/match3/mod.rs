mod board;
mod cascade;
mod game_state;
mod session;
mod settings;
mod types;

pub use board::Board;
pub use cascade::{points_for, Cascade, CascadeResolver, CascadeStep};
pub use game_state::{Match3GameState, Match3Snapshot};
pub use session::{Match3Command, Match3Session, Match3SessionState, SessionPacing, SessionSummary};
pub use settings::Match3Settings;
pub use types::{
    GameEvent, GameStatus, Match3Input, MatchSet, Position, SelectOutcome, Tile, TileId,
    TileIdAllocator, TileKind, BOARD_SIZE, GOAL_SCORE, INITIAL_BEST_SCORE, MIN_RUN,
    SESSION_SECONDS, TILE_KINDS,
};
