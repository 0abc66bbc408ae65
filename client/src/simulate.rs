use fruit_tracker_common::games::SessionRng;
use fruit_tracker_common::games::match3::{
    GameEvent, GameStatus, Match3GameState, Match3Input, Match3Settings, Match3Snapshot,
};
use fruit_tracker_common::replay::{Replay, ReplayRecorder};
use fruit_tracker_common::version::VERSION;

pub struct SimulationReport {
    pub seed: u64,
    pub moves_made: u32,
    pub reshuffles: u32,
    pub final_snapshot: Match3Snapshot,
    pub replay: Replay,
}

struct Simulation {
    game_state: Match3GameState,
    rng: SessionRng,
    recorder: ReplayRecorder,
    tick: u64,
    reshuffles: u32,
}

impl Simulation {
    fn feed(&mut self, input: Match3Input) -> bool {
        if !self.game_state.apply(input, &mut self.rng) {
            return false;
        }
        if input == Match3Input::Tick {
            self.tick += 1;
        }
        self.recorder.record(self.tick, input);
        self.reshuffles += self
            .game_state
            .take_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::BoardReshuffled))
            .count() as u32;
        true
    }
}

/// Headless bot: always plays the first available swap, lets the cascade
/// settle, then spends one clock second per move.
pub fn simulate(
    settings: Match3Settings,
    seed: u64,
    max_moves: u32,
    initial_best_score: u32,
) -> Result<SimulationReport, String> {
    let mut rng = SessionRng::new(seed);
    let game_state = Match3GameState::new(settings, &mut rng)?.with_best_score(initial_best_score);
    let mut sim = Simulation {
        game_state,
        rng,
        recorder: ReplayRecorder::new(VERSION.to_string(), seed, settings, initial_best_score),
        tick: 0,
        reshuffles: 0,
    };

    sim.feed(Match3Input::Start);

    let mut moves_made = 0;
    while moves_made < max_moves && sim.game_state.status() == GameStatus::Playing {
        let Some((a, b)) = sim.game_state.board().find_move() else {
            return Err(format!("Seed {}: settled board has no move", seed));
        };

        sim.feed(Match3Input::Select { row: a.row, col: a.col });
        sim.feed(Match3Input::Select { row: b.row, col: b.col });
        while sim.game_state.is_animating() {
            sim.feed(Match3Input::AdvanceCascade);
        }
        moves_made += 1;

        sim.feed(Match3Input::Tick);
    }

    Ok(SimulationReport {
        seed,
        moves_made,
        reshuffles: sim.reshuffles,
        final_snapshot: sim.game_state.snapshot(),
        replay: sim.recorder.finalize(),
    })
}
