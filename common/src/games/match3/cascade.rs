use serde::{Deserialize, Serialize};

use super::board::Board;
use super::settings::Match3Settings;
use super::types::{MatchSet, TileIdAllocator, MIN_RUN};
use crate::games::session_rng::SessionRng;

/// One collapse pass, with the board as it looks right after it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeStep {
    pub chain_index: u32,
    pub removed: MatchSet,
    pub points: u32,
    pub board: Board,
    /// No further match follows this pass.
    pub last: bool,
    /// The settled board had no move and was replaced.
    pub reshuffled: bool,
}

/// One point per full triple cleared in a single pass.
pub fn points_for(removed: usize) -> u32 {
    (removed / MIN_RUN) as u32
}

/// Resumable cascade. The caller owns the board and decides when to run
/// the next pass, which lets a renderer pace the chain.
#[derive(Clone, Debug, Default)]
pub struct CascadeResolver {
    pending: MatchSet,
    chain_index: u32,
    finished: bool,
}

impl CascadeResolver {
    pub fn begin(matches: MatchSet) -> Self {
        let finished = matches.is_empty();
        Self {
            pending: matches,
            chain_index: 0,
            finished,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn chain_index(&self) -> u32 {
        self.chain_index
    }

    pub fn step(
        &mut self,
        board: &mut Board,
        settings: &Match3Settings,
        rng: &mut SessionRng,
        ids: &mut TileIdAllocator,
    ) -> Option<CascadeStep> {
        if self.finished {
            return None;
        }

        let removed = std::mem::take(&mut self.pending);
        let removed_count = board.collapse(&removed, rng, ids);
        self.chain_index += 1;

        let next = board.find_matches();
        let last = next.is_empty();
        let mut reshuffled = false;

        if last {
            self.finished = true;
            if !board.has_move() {
                *board = Board::generate_playable(settings, rng, ids);
                reshuffled = true;
            }
        } else {
            self.pending = next;
        }

        Some(CascadeStep {
            chain_index: self.chain_index,
            removed,
            points: points_for(removed_count),
            board: board.clone(),
            last,
            reshuffled,
        })
    }
}

/// Lazy sequence of cascade passes over a borrowed board. Dropping it
/// early leaves the board at whatever pass was reached last.
pub struct Cascade<'a> {
    resolver: CascadeResolver,
    board: &'a mut Board,
    settings: &'a Match3Settings,
    rng: &'a mut SessionRng,
    ids: &'a mut TileIdAllocator,
}

impl<'a> Cascade<'a> {
    pub fn new(
        board: &'a mut Board,
        settings: &'a Match3Settings,
        rng: &'a mut SessionRng,
        ids: &'a mut TileIdAllocator,
    ) -> Self {
        let resolver = CascadeResolver::begin(board.find_matches());
        Self {
            resolver,
            board,
            settings,
            rng,
            ids,
        }
    }
}

impl Iterator for Cascade<'_> {
    type Item = CascadeStep;

    fn next(&mut self) -> Option<Self::Item> {
        self.resolver.step(self.board, self.settings, self.rng, self.ids)
    }
}
