use serde::{Deserialize, Serialize};

use super::board::Board;
use super::cascade::{CascadeResolver, CascadeStep};
use super::settings::Match3Settings;
use super::types::{
    GameEvent, GameStatus, Match3Input, Position, SelectOutcome, TileIdAllocator,
    INITIAL_BEST_SCORE,
};
use crate::config::Validate;
use crate::games::session_rng::SessionRng;

/// Read-only view handed to renderers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match3Snapshot {
    pub board: Board,
    pub score: u32,
    pub best_score: u32,
    pub goal_score: u32,
    pub time_remaining: u32,
    pub selection: Option<Position>,
    pub animating: bool,
    pub status: GameStatus,
    pub won: bool,
    pub lost: bool,
}

pub struct Match3GameState {
    settings: Match3Settings,
    board: Board,
    ids: TileIdAllocator,
    status: GameStatus,
    score: u32,
    best_score: u32,
    time_remaining: u32,
    selection: Option<Position>,
    cascade: Option<CascadeResolver>,
    // Timer ran out while a cascade was still resolving.
    pending_loss: bool,
    swaps_made: u32,
    chains_resolved: u32,
    pending_events: Vec<GameEvent>,
}

impl Match3GameState {
    /// Starts in `Menu` with a playable board. Settings are validated first;
    /// board generation never terminates on a grid too small for a move.
    pub fn new(settings: Match3Settings, rng: &mut SessionRng) -> Result<Self, String> {
        settings.validate()?;

        let mut ids = TileIdAllocator::new();
        let board = Board::generate_playable(&settings, rng, &mut ids);

        Ok(Self {
            settings,
            board,
            ids,
            status: GameStatus::Menu,
            score: 0,
            best_score: INITIAL_BEST_SCORE,
            time_remaining: settings.session_seconds,
            selection: None,
            cascade: None,
            pending_loss: false,
            swaps_made: 0,
            chains_resolved: 0,
            pending_events: Vec::new(),
        })
    }

    pub fn with_best_score(mut self, best_score: u32) -> Self {
        self.best_score = best_score;
        self
    }

    /// Menu -> Playing.
    pub fn start(&mut self, rng: &mut SessionRng) -> bool {
        if self.status != GameStatus::Menu {
            return false;
        }
        self.begin_session(rng);
        true
    }

    /// Lost -> Playing, same reset as `start`.
    pub fn retry(&mut self, rng: &mut SessionRng) -> bool {
        if self.status != GameStatus::Lost {
            return false;
        }
        self.begin_session(rng);
        true
    }

    /// Won -> Menu.
    pub fn acknowledge(&mut self) -> bool {
        if self.status != GameStatus::Won {
            return false;
        }
        self.status = GameStatus::Menu;
        true
    }

    /// Lost -> Menu.
    pub fn leave(&mut self) -> bool {
        if self.status != GameStatus::Lost {
            return false;
        }
        self.status = GameStatus::Menu;
        true
    }

    fn begin_session(&mut self, rng: &mut SessionRng) {
        self.board = Board::generate_playable(&self.settings, rng, &mut self.ids);
        self.score = 0;
        self.time_remaining = self.settings.session_seconds;
        self.selection = None;
        self.cascade = None;
        self.pending_loss = false;
        self.swaps_made = 0;
        self.chains_resolved = 0;
        self.status = GameStatus::Playing;
    }

    pub fn select_cell(&mut self, pos: Position) -> SelectOutcome {
        if self.status != GameStatus::Playing || self.is_animating() || !self.board.contains(pos) {
            return SelectOutcome::Ignored;
        }

        let outcome = match self.selection {
            None => {
                self.selection = Some(pos);
                SelectOutcome::Selected
            }
            Some(current) if current == pos => {
                self.selection = None;
                SelectOutcome::Deselected
            }
            Some(current) if current.is_adjacent(pos) => {
                self.selection = None;
                self.attempt_swap(current, pos)
            }
            Some(_) => {
                self.selection = Some(pos);
                SelectOutcome::Reselected
            }
        };

        self.pending_events.push(GameEvent::SelectionChanged {
            selection: self.selection,
        });
        outcome
    }

    fn attempt_swap(&mut self, a: Position, b: Position) -> SelectOutcome {
        self.board.swap_kinds(a, b);
        let matches = self.board.find_matches();

        if matches.is_empty() {
            self.board.swap_kinds(a, b);
            self.pending_events.push(GameEvent::SwapRejected {
                first: a,
                second: b,
            });
            return SelectOutcome::SwapRejected;
        }

        self.swaps_made += 1;
        self.cascade = Some(CascadeResolver::begin(matches));
        SelectOutcome::SwapAccepted
    }

    /// Runs one collapse pass of the in-flight cascade. Score and board are
    /// updated before returning; the caller may render between passes.
    pub fn advance_cascade(&mut self, rng: &mut SessionRng) -> Option<CascadeStep> {
        let resolver = self.cascade.as_mut()?;
        let step = resolver.step(&mut self.board, &self.settings, rng, &mut self.ids)?;
        let finished = resolver.is_finished();

        self.score += step.points;
        self.pending_events.push(GameEvent::CascadeStep {
            chain_index: step.chain_index,
            removed: step.removed.len(),
            points: step.points,
        });
        if step.reshuffled {
            self.pending_events.push(GameEvent::BoardReshuffled);
        }

        if finished {
            self.cascade = None;
            self.finish_cascade();
        }

        Some(step)
    }

    /// Drives the in-flight cascade to completion.
    pub fn resolve_cascade(&mut self, rng: &mut SessionRng) -> Vec<CascadeStep> {
        let mut steps = Vec::new();
        while let Some(step) = self.advance_cascade(rng) {
            steps.push(step);
        }
        steps
    }

    fn finish_cascade(&mut self) {
        self.chains_resolved += 1;

        if self.pending_loss {
            self.pending_loss = false;
            self.end_session(GameStatus::Lost);
        } else if self.score >= self.settings.goal_score {
            self.end_session(GameStatus::Won);
        }
    }

    /// One elapsed second. Returns false when the clock is not running.
    pub fn tick(&mut self) -> bool {
        if self.status != GameStatus::Playing || self.time_remaining == 0 {
            return false;
        }

        self.time_remaining -= 1;
        self.pending_events.push(GameEvent::TimerTick {
            time_remaining: self.time_remaining,
        });

        if self.time_remaining == 0 {
            if self.is_animating() {
                self.pending_loss = true;
            } else {
                self.end_session(GameStatus::Lost);
            }
        }

        true
    }

    fn end_session(&mut self, status: GameStatus) {
        if self.status != GameStatus::Playing {
            return;
        }

        self.status = status;
        self.selection = None;
        self.best_score = self.best_score.max(self.score);

        let event = match status {
            GameStatus::Won => GameEvent::Won { score: self.score },
            _ => GameEvent::Lost { score: self.score },
        };
        self.pending_events.push(event);
    }

    /// Applies one input. Returns whether it changed anything, which is
    /// what decides if it belongs in a replay.
    pub fn apply(&mut self, input: Match3Input, rng: &mut SessionRng) -> bool {
        match input {
            Match3Input::Start => self.start(rng),
            Match3Input::Select { row, col } => {
                self.select_cell(Position::new(row, col)) != SelectOutcome::Ignored
            }
            Match3Input::Tick => self.tick(),
            Match3Input::AdvanceCascade => self.advance_cascade(rng).is_some(),
            Match3Input::Acknowledge => self.acknowledge(),
            Match3Input::Retry => self.retry(rng),
            Match3Input::Leave => self.leave(),
        }
    }

    pub fn snapshot(&self) -> Match3Snapshot {
        Match3Snapshot {
            board: self.board.clone(),
            score: self.score,
            best_score: self.best_score,
            goal_score: self.settings.goal_score,
            time_remaining: self.time_remaining,
            selection: self.selection,
            animating: self.is_animating(),
            status: self.status,
            won: self.status == GameStatus::Won,
            lost: self.status == GameStatus::Lost,
        }
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn is_animating(&self) -> bool {
        self.cascade.is_some()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn selection(&self) -> Option<Position> {
        self.selection
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn swaps_made(&self) -> u32 {
        self.swaps_made
    }

    pub fn chains_resolved(&self) -> u32 {
        self.chains_resolved
    }

    #[cfg(test)]
    fn set_board(&mut self, board: Board) {
        self.board = board;
    }

    #[cfg(test)]
    fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    #[cfg(test)]
    fn set_time_remaining(&mut self, time_remaining: u32) {
        self.time_remaining = time_remaining;
    }
}
