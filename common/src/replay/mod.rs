pub mod file_io;
pub mod player;
pub mod recorder;

use serde::{Deserialize, Serialize};

use crate::games::match3::{Match3Input, Match3Settings};

pub use file_io::{
    generate_replay_filename, load_replay, load_replay_from_str, save_replay, save_replay_to_string,
    ReplayError,
};
pub use player::ReplayPlayer;
pub use recorder::ReplayRecorder;

pub const REPLAY_FILE_EXTENSION: &str = "fruitreplay";
pub const REPLAY_VERSION: u8 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayEntry {
    /// Clock ticks elapsed when the input was applied.
    pub tick: u64,
    pub input: Match3Input,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replay {
    pub format_version: u8,
    pub engine_version: String,
    pub game_started_timestamp_ms: i64,
    pub seed: u64,
    pub settings: Match3Settings,
    pub initial_best_score: u32,
    pub actions: Vec<ReplayEntry>,
}
