use serde::{Deserialize, Serialize};

use super::settings::Match3Settings;
use super::types::{MatchSet, Position, Tile, TileIdAllocator, TileKind, MIN_RUN};
use crate::games::session_rng::SessionRng;

/// Square grid of tiles stored row-major. Every cell always holds exactly
/// one tile whose `row`/`col` match its slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    tiles: Vec<Tile>,
    size: usize,
    kind_count: u8,
}

impl Board {
    /// Fills cells row by row, redrawing any kind that would complete a run
    /// with the two cells to the left or the two cells above. Earlier cells
    /// are already run-free, so the finished board has no match.
    pub fn generate(
        settings: &Match3Settings,
        rng: &mut SessionRng,
        ids: &mut TileIdAllocator,
    ) -> Self {
        let size = settings.board_size;
        let kind_count = settings.tile_kinds;
        let mut tiles: Vec<Tile> = Vec::with_capacity(size * size);

        for row in 0..size {
            for col in 0..size {
                let kind = loop {
                    let kind = rng.tile_kind(kind_count);
                    let idx = row * size + col;
                    if col >= 2 && tiles[idx - 1].kind == kind && tiles[idx - 2].kind == kind {
                        continue;
                    }
                    if row >= 2
                        && tiles[idx - size].kind == kind
                        && tiles[idx - 2 * size].kind == kind
                    {
                        continue;
                    }
                    break kind;
                };
                tiles.push(Tile::new(ids.allocate(), kind, Position::new(row, col)));
            }
        }

        Self {
            tiles,
            size,
            kind_count,
        }
    }

    /// Regenerates until the board is match-free and has a legal move.
    /// Loops forever on settings that fail `Validate`.
    pub fn generate_playable(
        settings: &Match3Settings,
        rng: &mut SessionRng,
        ids: &mut TileIdAllocator,
    ) -> Self {
        loop {
            let board = Self::generate(settings, rng, ids);
            if board.find_matches().is_empty() && board.has_move() {
                return board;
            }
        }
    }

    /// Builds a board from explicit kinds, one inner vec per row.
    pub fn from_kinds(
        rows: &[Vec<u8>],
        kind_count: u8,
        ids: &mut TileIdAllocator,
    ) -> Result<Self, String> {
        let size = rows.len();
        if size == 0 {
            return Err("Board must have at least one row".to_string());
        }

        let mut tiles = Vec::with_capacity(size * size);
        for (row, kinds) in rows.iter().enumerate() {
            if kinds.len() != size {
                return Err(format!(
                    "Row {} has {} cells, expected {}",
                    row,
                    kinds.len(),
                    size
                ));
            }
            for (col, &kind) in kinds.iter().enumerate() {
                if kind >= kind_count {
                    return Err(format!(
                        "Kind {} at ({}, {}) is outside 0..{}",
                        kind, row, col, kind_count
                    ));
                }
                tiles.push(Tile::new(
                    ids.allocate(),
                    TileKind(kind),
                    Position::new(row, col),
                ));
            }
        }

        Ok(Self {
            tiles,
            size,
            kind_count,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    pub fn get(&self, pos: Position) -> Option<&Tile> {
        if !self.contains(pos) {
            return None;
        }
        self.tiles.get(pos.row * self.size + pos.col)
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.size)
    }

    fn kind_at(&self, row: usize, col: usize) -> TileKind {
        self.tiles[row * self.size + col].kind
    }

    /// Exchanges the kinds of two cells. Ids stay where they are.
    pub fn swap_kinds(&mut self, a: Position, b: Position) {
        if !self.contains(a) || !self.contains(b) {
            return;
        }
        let ia = a.row * self.size + a.col;
        let ib = b.row * self.size + b.col;
        let kind_a = self.tiles[ia].kind;
        self.tiles[ia].kind = self.tiles[ib].kind;
        self.tiles[ib].kind = kind_a;
    }

    pub fn find_matches(&self) -> MatchSet {
        let kinds: Vec<TileKind> = self.tiles.iter().map(|t| t.kind).collect();
        find_matches_in(&kinds, self.size)
    }

    pub fn has_move(&self) -> bool {
        self.find_move().is_some()
    }

    /// First adjacent pair (scanning row-major, right neighbour before the
    /// one below) whose swap creates a match.
    pub fn find_move(&self) -> Option<(Position, Position)> {
        let mut scratch: Vec<TileKind> = self.tiles.iter().map(|t| t.kind).collect();
        let size = self.size;

        for row in 0..size {
            for col in 0..size {
                let here = Position::new(row, col);
                if col + 1 < size {
                    let right = Position::new(row, col + 1);
                    if swap_makes_match(&mut scratch, size, here, right) {
                        return Some((here, right));
                    }
                }
                if row + 1 < size {
                    let below = Position::new(row + 1, col);
                    if swap_makes_match(&mut scratch, size, here, below) {
                        return Some((here, below));
                    }
                }
            }
        }

        None
    }

    /// One gravity pass: drops surviving tiles to the bottom of each column
    /// keeping their order, then fills the top with fresh random tiles.
    /// Refill ignores run constraints; new matches feed the next pass.
    /// Returns how many tiles were removed.
    pub fn collapse(
        &mut self,
        to_remove: &MatchSet,
        rng: &mut SessionRng,
        ids: &mut TileIdAllocator,
    ) -> usize {
        let size = self.size;
        let mut removed = 0;

        for col in 0..size {
            let mut column: Vec<Tile> = Vec::with_capacity(size);
            for row in (0..size).rev() {
                if to_remove.contains(&Position::new(row, col)) {
                    removed += 1;
                } else {
                    column.push(self.tiles[row * size + col]);
                }
            }

            while column.len() < size {
                let kind = rng.tile_kind(self.kind_count);
                column.push(Tile::new(ids.allocate(), kind, Position::new(0, col)));
            }

            for (depth, mut tile) in column.into_iter().enumerate() {
                let row = size - 1 - depth;
                tile.row = row;
                tile.col = col;
                self.tiles[row * size + col] = tile;
            }
        }

        removed
    }

    pub fn is_consistent(&self) -> bool {
        self.tiles.len() == self.size * self.size
            && self.tiles.iter().enumerate().all(|(i, tile)| {
                tile.row == i / self.size
                    && tile.col == i % self.size
                    && tile.kind.0 < self.kind_count
            })
    }
}

fn swap_makes_match(kinds: &mut [TileKind], size: usize, a: Position, b: Position) -> bool {
    let ia = a.row * size + a.col;
    let ib = b.row * size + b.col;
    kinds.swap(ia, ib);
    let matched = !find_matches_in(kinds, size).is_empty();
    kinds.swap(ia, ib);
    matched
}

/// Scans every row, then every column, marking runs of `MIN_RUN` or more.
fn find_matches_in(kinds: &[TileKind], size: usize) -> MatchSet {
    let mut matched = MatchSet::new();

    for row in 0..size {
        let at = |col: usize| kinds[row * size + col];
        let mut run = 1;
        for col in 1..size {
            if at(col) == at(col - 1) {
                run += 1;
            } else {
                if run >= MIN_RUN {
                    for k in 1..=run {
                        matched.insert(Position::new(row, col - k));
                    }
                }
                run = 1;
            }
        }
        if run >= MIN_RUN {
            for k in 1..=run {
                matched.insert(Position::new(row, size - k));
            }
        }
    }

    for col in 0..size {
        let at = |row: usize| kinds[row * size + col];
        let mut run = 1;
        for row in 1..size {
            if at(row) == at(row - 1) {
                run += 1;
            } else {
                if run >= MIN_RUN {
                    for k in 1..=run {
                        matched.insert(Position::new(row - k, col));
                    }
                }
                run = 1;
            }
        }
        if run >= MIN_RUN {
            for k in 1..=run {
                matched.insert(Position::new(size - k, col));
            }
        }
    }

    matched
}

#[cfg(test)]
pub(crate) fn board_from(rows: &[[u8; 6]]) -> Board {
    let rows: Vec<Vec<u8>> = rows.iter().map(|r| r.to_vec()).collect();
    Board::from_kinds(&rows, 6, &mut TileIdAllocator::new()).unwrap()
}
