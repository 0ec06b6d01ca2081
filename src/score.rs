use crate::board::{Board, CELLS, SIDE};

pub type Score = u32;

/// Score given to a board identical to the target. Larger than any partial
/// score either scorer can produce.
pub const SOLVED_SCORE: Score = 20_000;

/// Ranks boards; higher is better.
pub trait Scorer {
    fn score(&self, board: &Board) -> Score;
}

impl<F> Scorer for F
where
    F: Fn(&Board) -> Score,
{
    fn score(&self, board: &Board) -> Score {
        self(board)
    }
}

/// Number of cells holding the same tile as the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileMatch {
    target: Board,
}

impl TileMatch {
    pub fn new(target: Board) -> Self {
        Self { target }
    }
}

impl Default for TileMatch {
    fn default() -> Self {
        Self::new(Board::FINISHED)
    }
}

impl Scorer for TileMatch {
    fn score(&self, board: &Board) -> Score {
        let matches = board
            .tiles()
            .iter()
            .zip(self.target.tiles())
            .filter(|(a, b)| a == b)
            .count();
        if matches == CELLS {
            SOLVED_SCORE
        } else {
            matches as Score
        }
    }
}

/// Headroom above the largest possible manhattan + linear conflict estimate.
pub const MANHATTAN_CEILING: Score = 256;

/// Manhattan distance of every tile from its target cell, plus two moves for
/// each pair of tiles sharing their target row or column in reversed order.
/// Reported as `MANHATTAN_CEILING - estimate` so that closer boards rank higher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Manhattan {
    target: Board,
    home: [usize; CELLS],
}

impl Manhattan {
    pub fn new(target: Board) -> Self {
        let mut home = [0; CELLS];
        for (idx, &tile) in target.tiles().iter().enumerate() {
            home[tile as usize] = idx;
        }
        Self { target, home }
    }

    pub fn estimate(&self, board: &Board) -> Score {
        self.manhattan_distance(board) + 2 * self.linear_conflicts(board)
    }

    fn manhattan_distance(&self, board: &Board) -> Score {
        let mut distance = 0;
        for (idx, &tile) in board.tiles().iter().enumerate() {
            if tile != 0 {
                let target = self.home[tile as usize];
                distance += (idx / SIDE).abs_diff(target / SIDE);
                distance += (idx % SIDE).abs_diff(target % SIDE);
            }
        }
        distance as Score
    }

    fn linear_conflicts(&self, board: &Board) -> Score {
        let tiles = board.tiles();
        let mut conflicts = 0;

        // Row conflicts
        for row in 0..SIDE {
            let mut max_seen = None;
            for col in 0..SIDE {
                let tile = tiles[row * SIDE + col];
                let home = self.home[tile as usize];
                if tile != 0 && home / SIDE == row {
                    let home_col = home % SIDE;
                    match max_seen {
                        Some(max) if home_col < max => conflicts += 1,
                        _ => max_seen = Some(home_col),
                    }
                }
            }
        }

        // Column conflicts
        for col in 0..SIDE {
            let mut max_seen = None;
            for row in 0..SIDE {
                let tile = tiles[row * SIDE + col];
                let home = self.home[tile as usize];
                if tile != 0 && home % SIDE == col {
                    let home_row = home / SIDE;
                    match max_seen {
                        Some(max) if home_row < max => conflicts += 1,
                        _ => max_seen = Some(home_row),
                    }
                }
            }
        }

        conflicts
    }
}

impl Default for Manhattan {
    fn default() -> Self {
        Self::new(Board::FINISHED)
    }
}

impl Scorer for Manhattan {
    fn score(&self, board: &Board) -> Score {
        if *board == self.target {
            return SOLVED_SCORE;
        }
        MANHATTAN_CEILING.saturating_sub(self.estimate(board))
    }
}
