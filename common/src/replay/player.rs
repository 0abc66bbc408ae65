use crate::games::match3::{GameEvent, Match3GameState, Match3Snapshot};
use crate::games::SessionRng;

use super::{Replay, ReplayEntry};

/// Feeds a recorded session back through a fresh engine. The same seed and
/// the same inputs in the same order give the same game.
pub struct ReplayPlayer {
    replay: Replay,
    current_action_index: usize,
    rng: SessionRng,
    game_state: Match3GameState,
}

impl ReplayPlayer {
    pub fn new(replay: Replay) -> Result<Self, String> {
        let mut rng = SessionRng::new(replay.seed);
        let game_state = Match3GameState::new(replay.settings, &mut rng)?
            .with_best_score(replay.initial_best_score);

        Ok(Self {
            replay,
            current_action_index: 0,
            rng,
            game_state,
        })
    }

    pub fn engine_version(&self) -> &str {
        &self.replay.engine_version
    }

    pub fn seed(&self) -> u64 {
        self.replay.seed
    }

    pub fn game_started_timestamp_ms(&self) -> i64 {
        self.replay.game_started_timestamp_ms
    }

    pub fn total_actions(&self) -> usize {
        self.replay.actions.len()
    }

    pub fn current_action_index(&self) -> usize {
        self.current_action_index
    }

    pub fn is_finished(&self) -> bool {
        self.current_action_index >= self.replay.actions.len()
    }

    pub fn peek_next_action(&self) -> Option<&ReplayEntry> {
        self.replay.actions.get(self.current_action_index)
    }

    pub fn game_state(&self) -> &Match3GameState {
        &self.game_state
    }

    /// Applies the next recorded input. Returns the entry together with
    /// the events it produced.
    pub fn step(&mut self) -> Option<(ReplayEntry, Vec<GameEvent>)> {
        let entry = *self.replay.actions.get(self.current_action_index)?;
        self.current_action_index += 1;

        self.game_state.apply(entry.input, &mut self.rng);
        Some((entry, self.game_state.take_events()))
    }

    pub fn run_to_end(&mut self) -> Match3Snapshot {
        while self.step().is_some() {}
        self.game_state.snapshot()
    }
}
