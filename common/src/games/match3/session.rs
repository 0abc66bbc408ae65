use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};

use super::game_state::{Match3GameState, Match3Snapshot};
use super::settings::Match3Settings;
use super::types::{GameEvent, GameStatus, Match3Input};
use crate::games::{GameBroadcaster, SessionRng};
use crate::replay::{Replay, ReplayRecorder};
use crate::version::VERSION;
use crate::{log, log_debug};

pub const DEFAULT_CASCADE_STEP_DELAY: Duration = Duration::from_millis(250);
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionPacing {
    pub tick_interval: Duration,
    pub cascade_step_delay: Duration,
}

impl Default for SessionPacing {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            cascade_step_delay: DEFAULT_CASCADE_STEP_DELAY,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Match3Command {
    Start,
    Select { row: usize, col: usize },
    Acknowledge,
    Retry,
    Leave,
    Quit,
}

impl Match3Command {
    fn as_input(self) -> Option<Match3Input> {
        match self {
            Match3Command::Start => Some(Match3Input::Start),
            Match3Command::Select { row, col } => Some(Match3Input::Select { row, col }),
            Match3Command::Acknowledge => Some(Match3Input::Acknowledge),
            Match3Command::Retry => Some(Match3Input::Retry),
            Match3Command::Leave => Some(Match3Input::Leave),
            Match3Command::Quit => None,
        }
    }
}

pub struct Match3SessionState {
    pub session_id: String,
    pub game_state: Match3GameState,
    pub rng: SessionRng,
    pub pacing: SessionPacing,
    pub replay_recorder: Option<ReplayRecorder>,
    pub tick: u64,
}

impl Match3SessionState {
    pub fn create(
        session_id: String,
        settings: Match3Settings,
        seed: u64,
        best_score: u32,
        pacing: SessionPacing,
        record_replay: bool,
    ) -> Result<Self, String> {
        let mut rng = SessionRng::new(seed);
        let game_state = Match3GameState::new(settings, &mut rng)?.with_best_score(best_score);
        let replay_recorder = record_replay
            .then(|| ReplayRecorder::new(VERSION.to_string(), seed, settings, best_score));

        Ok(Self {
            session_id,
            game_state,
            rng,
            pacing,
            replay_recorder,
            tick: 0,
        })
    }

    /// Applies an input and records it when it took effect.
    fn feed(&mut self, input: Match3Input) -> bool {
        let applied = self.game_state.apply(input, &mut self.rng);
        if !applied {
            return false;
        }

        if input == Match3Input::Tick {
            self.tick += 1;
        }
        if let Some(ref mut recorder) = self.replay_recorder {
            recorder.record(self.tick, input);
        }
        true
    }
}

#[derive(Clone, Debug)]
pub struct SessionSummary {
    pub session_id: String,
    pub seed: u64,
    pub final_snapshot: Match3Snapshot,
    pub swaps_made: u32,
    pub chains_resolved: u32,
    pub replay: Option<Replay>,
}

pub struct Match3Session;

impl Match3Session {
    /// Owns the game for its whole lifetime. The clock, the cascade pacing
    /// timer and player commands are all serviced on this one task, so
    /// nothing else ever touches the board. Returns when a `Quit` arrives or
    /// the command channel closes.
    pub async fn run<B: GameBroadcaster>(
        mut state: Match3SessionState,
        mut commands: mpsc::UnboundedReceiver<Match3Command>,
        broadcaster: B,
    ) -> SessionSummary {
        let tick_interval = state.pacing.tick_interval;
        let step_delay = state.pacing.cascade_step_delay;

        let mut clock = interval_at(Instant::now() + tick_interval, tick_interval);
        clock.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let cascade_timer = sleep(step_delay);
        tokio::pin!(cascade_timer);

        log!(
            "[session:{}] Match-3 session ready (seed {})",
            state.session_id,
            state.rng.seed()
        );
        Self::publish(&mut state, &broadcaster).await;

        loop {
            let playing = state.game_state.status() == GameStatus::Playing;
            let animating = state.game_state.is_animating();

            let changed = tokio::select! {
                _ = clock.tick(), if playing => state.feed(Match3Input::Tick),
                _ = &mut cascade_timer, if animating => {
                    let changed = state.feed(Match3Input::AdvanceCascade);
                    cascade_timer.as_mut().reset(Instant::now() + step_delay);
                    changed
                }
                command = commands.recv() => {
                    let Some(input) = command.and_then(Match3Command::as_input) else {
                        break;
                    };
                    let changed = state.feed(input);
                    if changed && matches!(input, Match3Input::Start | Match3Input::Retry) {
                        clock.reset();
                    }
                    if !animating && state.game_state.is_animating() {
                        cascade_timer.as_mut().reset(Instant::now() + step_delay);
                    }
                    changed
                }
            };

            if changed {
                Self::publish(&mut state, &broadcaster).await;
            }
        }

        let summary = SessionSummary {
            session_id: state.session_id.clone(),
            seed: state.rng.seed(),
            final_snapshot: state.game_state.snapshot(),
            swaps_made: state.game_state.swaps_made(),
            chains_resolved: state.game_state.chains_resolved(),
            replay: state.replay_recorder.as_mut().map(ReplayRecorder::finalize),
        };

        log!(
            "[session:{}] Session closed, score {} best {}",
            summary.session_id,
            summary.final_snapshot.score,
            summary.final_snapshot.best_score
        );
        broadcaster.broadcast_game_over(&summary).await;
        summary
    }

    async fn publish<B: GameBroadcaster>(state: &mut Match3SessionState, broadcaster: &B) {
        let events = state.game_state.take_events();

        for event in &events {
            match event {
                GameEvent::Won { score } => {
                    log!("[session:{}] Won with score {}", state.session_id, score);
                }
                GameEvent::Lost { score } => {
                    log!("[session:{}] Time is up, score {}", state.session_id, score);
                }
                GameEvent::CascadeStep {
                    chain_index,
                    removed,
                    points,
                } => {
                    log_debug!(
                        "[session:{}] Cascade pass {} removed {} tiles for {} points",
                        state.session_id,
                        chain_index,
                        removed,
                        points
                    );
                }
                GameEvent::BoardReshuffled => {
                    log_debug!("[session:{}] No moves left, board reshuffled", state.session_id);
                }
                _ => {}
            }
        }

        broadcaster
            .broadcast_state(state.game_state.snapshot(), events)
            .await;
    }
}
