use chrono::Utc;

use super::{Replay, ReplayEntry, REPLAY_VERSION};
use crate::games::match3::{Match3Input, Match3Settings};

pub struct ReplayRecorder {
    engine_version: String,
    created_timestamp_ms: i64,
    // Set by the first recorded Start.
    game_started_timestamp_ms: Option<i64>,
    seed: u64,
    settings: Match3Settings,
    initial_best_score: u32,
    actions: Vec<ReplayEntry>,
}

impl ReplayRecorder {
    pub fn new(
        engine_version: String,
        seed: u64,
        settings: Match3Settings,
        initial_best_score: u32,
    ) -> Self {
        Self {
            engine_version,
            created_timestamp_ms: Utc::now().timestamp_millis(),
            game_started_timestamp_ms: None,
            seed,
            settings,
            initial_best_score,
            actions: Vec::new(),
        }
    }

    pub fn record(&mut self, tick: u64, input: Match3Input) {
        if input == Match3Input::Start && self.game_started_timestamp_ms.is_none() {
            self.game_started_timestamp_ms = Some(Utc::now().timestamp_millis());
        }
        self.actions.push(ReplayEntry { tick, input });
    }

    /// Inputs stay in the order they were applied; ticks are informational.
    /// A session that never started is stamped with the recorder's creation time.
    pub fn finalize(&mut self) -> Replay {
        Replay {
            format_version: REPLAY_VERSION,
            engine_version: self.engine_version.clone(),
            game_started_timestamp_ms: self
                .game_started_timestamp_ms
                .unwrap_or(self.created_timestamp_ms),
            seed: self.seed,
            settings: self.settings,
            initial_best_score: self.initial_best_score,
            actions: std::mem::take(&mut self.actions),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn actions_count(&self) -> usize {
        self.actions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_finalize_drains_actions() {
        let mut recorder =
            ReplayRecorder::new("0.0.1".to_string(), 42, Match3Settings::default(), 7);
        recorder.record(0, Match3Input::Start);
        recorder.record(1, Match3Input::Tick);
        assert_eq!(recorder.actions_count(), 2);

        let replay = recorder.finalize();

        assert_eq!(replay.seed, 42);
        assert_eq!(replay.format_version, REPLAY_VERSION);
        assert_eq!(replay.actions.len(), 2);
        assert_eq!(replay.actions[1], ReplayEntry { tick: 1, input: Match3Input::Tick });
        assert_eq!(recorder.actions_count(), 0);
        assert_eq!(recorder.seed(), 42);
    }

    #[test]
    fn test_start_time_taken_at_first_start() {
        let mut recorder =
            ReplayRecorder::new("0.0.1".to_string(), 1, Match3Settings::default(), 7);
        let created = Utc::now().timestamp_millis();
        std::thread::sleep(Duration::from_millis(30));

        let before_start = Utc::now().timestamp_millis();
        recorder.record(0, Match3Input::Start);
        let after_start = Utc::now().timestamp_millis();
        std::thread::sleep(Duration::from_millis(30));
        recorder.record(5, Match3Input::Retry);
        recorder.record(6, Match3Input::Start);

        let replay = recorder.finalize();

        assert!(replay.game_started_timestamp_ms >= before_start);
        assert!(replay.game_started_timestamp_ms > created);
        assert!(replay.game_started_timestamp_ms <= after_start);
    }

    #[test]
    fn test_unstarted_session_uses_creation_time() {
        let before = Utc::now().timestamp_millis();
        let mut recorder =
            ReplayRecorder::new("0.0.1".to_string(), 1, Match3Settings::default(), 7);
        let after = Utc::now().timestamp_millis();

        let replay = recorder.finalize();

        assert!(replay.game_started_timestamp_ms >= before);
        assert!(replay.game_started_timestamp_ms <= after);
    }
}
