use rand::{seq::SliceRandom, Rng};
use std::fmt;
use std::str::FromStr;

use crate::codec::{self, BoardId};
use crate::error::{PuzzleError, Result};

pub const SIDE: usize = 4;
pub const CELLS: usize = SIDE * SIDE;

/// A full arrangement of the 16 cells, row-major, with 0 as the blank.
///
/// Every `Board` value holds a permutation of `0..16`; the only ways to build
/// one are the validating constructors and the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Board([u8; CELLS]);

impl Board {
    /// The finished position. The blank sits in the top-left corner.
    pub const FINISHED: Board = Board([0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]);

    pub fn new(tiles: [u8; CELLS]) -> Result<Self> {
        validate(&tiles)?;
        Ok(Self(tiles))
    }

    pub fn from_slice(tiles: &[u8]) -> Result<Self> {
        let tiles: [u8; CELLS] = tiles.try_into().map_err(|_| {
            PuzzleError::InvalidBoard(format!("expected {} cells, got {}", CELLS, tiles.len()))
        })?;
        Self::new(tiles)
    }

    /// Skips validation; callers guarantee `tiles` is a permutation.
    pub(crate) const fn from_tiles_unchecked(tiles: [u8; CELLS]) -> Self {
        Self(tiles)
    }

    pub fn tiles(&self) -> &[u8; CELLS] {
        &self.0
    }

    pub fn id(&self) -> BoardId {
        codec::encode(self)
    }

    pub fn blank(&self) -> usize {
        // A valid board always holds exactly one blank.
        self.0.iter().position(|&t| t == 0).unwrap_or(0)
    }

    /// Returns a new board with the cells at `a` and `b` exchanged.
    pub fn with_swap(&self, a: usize, b: usize) -> Self {
        let mut tiles = self.0;
        tiles.swap(a, b);
        Self(tiles)
    }

    /// Whether the board lies in the same component of the move graph as
    /// [`Board::FINISHED`].
    ///
    /// Every move is a transposition that also shifts the blank by one cell,
    /// so permutation parity must match the parity of the blank's taxicab
    /// distance from cell 0.
    pub fn is_reachable(&self) -> bool {
        let blank = self.blank();
        let distance = blank / SIDE + blank % SIDE;
        count_inversions(&self.0) % 2 == distance % 2
    }

    /// Draws uniformly random boards until one is reachable from the finished
    /// position.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut tiles = Self::FINISHED.0;
        loop {
            tiles.shuffle(rng);
            let board = Self(tiles);
            if board.is_reachable() {
                return board;
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::FINISHED
    }
}

impl TryFrom<&[u8]> for Board {
    type Error = PuzzleError;

    fn try_from(tiles: &[u8]) -> Result<Self> {
        Self::from_slice(tiles)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::render::write_grid(f, &self.0)
    }
}

pub(crate) fn validate(tiles: &[u8]) -> Result<()> {
    if tiles.len() != CELLS {
        return Err(PuzzleError::InvalidBoard(format!(
            "expected {} cells, got {}",
            CELLS,
            tiles.len()
        )));
    }
    let mut seen = 0u16;
    for (idx, &tile) in tiles.iter().enumerate() {
        if tile as usize >= CELLS {
            return Err(PuzzleError::InvalidBoard(format!(
                "cell {} holds {}, outside 0..{}",
                idx, tile, CELLS
            )));
        }
        if seen & (1 << tile) != 0 {
            return Err(PuzzleError::InvalidBoard(format!(
                "tile {} appears more than once",
                tile
            )));
        }
        seen |= 1 << tile;
    }
    Ok(())
}

fn count_inversions(tiles: &[u8]) -> usize {
    tiles
        .iter()
        .enumerate()
        .map(|(i, &val)| tiles[i + 1..].iter().filter(|&&next| next < val).count())
        .sum()
}

/// A board as supplied from outside the crate: either the cell sequence or a
/// pre-encoded identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardInput {
    Sequence(Vec<i64>),
    Identity(BoardId),
}

impl BoardInput {
    pub fn into_board(self) -> Result<Board> {
        match self {
            BoardInput::Sequence(values) => {
                let tiles = values
                    .iter()
                    .map(|&v| {
                        u8::try_from(v).map_err(|_| {
                            PuzzleError::InvalidBoard(format!("value {} outside 0..{}", v, CELLS))
                        })
                    })
                    .collect::<Result<Vec<u8>>>()?;
                Board::from_slice(&tiles)
            }
            BoardInput::Identity(id) => codec::decode(id),
        }
    }
}

impl From<Board> for BoardInput {
    fn from(board: Board) -> Self {
        BoardInput::Sequence(board.0.iter().map(|&t| t as i64).collect())
    }
}

impl From<BoardId> for BoardInput {
    fn from(id: BoardId) -> Self {
        BoardInput::Identity(id)
    }
}

impl FromStr for BoardInput {
    type Err = PuzzleError;

    /// Accepts a comma or whitespace separated cell list, a decimal identity,
    /// or a `0x` prefixed hexadecimal identity.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            let hex: String = hex.chars().filter(|&c| c != '_').collect();
            return BoardId::from_str_radix(&hex, 16)
                .map(BoardInput::Identity)
                .map_err(|e| PuzzleError::UnsupportedInputType(format!("{:?}: {}", s, e)));
        }

        let parts: Vec<&str> = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();
        match parts.as_slice() {
            [] => Err(PuzzleError::UnsupportedInputType("empty input".to_string())),
            [single] => single
                .parse::<BoardId>()
                .map(BoardInput::Identity)
                .map_err(|e| PuzzleError::UnsupportedInputType(format!("{:?}: {}", s, e))),
            many => many
                .iter()
                .map(|p| p.parse::<i64>())
                .collect::<std::result::Result<Vec<_>, _>>()
                .map(BoardInput::Sequence)
                .map_err(|e| PuzzleError::UnsupportedInputType(format!("{:?}: {}", s, e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn rejects_wrong_length() {
        let err = Board::from_slice(&[0, 1, 2]).unwrap_err();
        assert!(matches!(err, PuzzleError::InvalidBoard(_)));
    }

    #[test]
    fn rejects_duplicates_and_out_of_range() {
        let mut tiles = *Board::FINISHED.tiles();
        tiles[3] = 2;
        assert!(matches!(Board::new(tiles), Err(PuzzleError::InvalidBoard(_))));

        let mut tiles = *Board::FINISHED.tiles();
        tiles[15] = 16;
        assert!(matches!(Board::new(tiles), Err(PuzzleError::InvalidBoard(_))));
    }

    #[test]
    fn blank_position() {
        let board = Board::FINISHED.with_swap(0, 5);
        assert_eq!(board.blank(), 5);
        assert_eq!(Board::FINISHED.blank(), 0);
    }

    #[test]
    fn reachability_parity() {
        assert!(Board::FINISHED.is_reachable());
        // One legal move away.
        assert!(Board::FINISHED.with_swap(0, 1).is_reachable());
        // Two tiles exchanged without moving the blank.
        assert!(!Board::FINISHED.with_swap(14, 15).is_reachable());
    }

    #[test]
    fn shuffled_boards_are_reachable() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let board = Board::shuffled(&mut rng);
            assert!(board.is_reachable());
            assert!(Board::new(*board.tiles()).is_ok());
        }
    }

    #[test]
    fn parse_sequence_input() {
        let input: BoardInput = "3,4,5,6, 0,1,2,7, 8,13,10,15, 12,9,14,11".parse().unwrap();
        let board = input.into_board().unwrap();
        assert_eq!(board.tiles()[0], 3);
        assert_eq!(board.blank(), 4);

        let spaced: BoardInput = "0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15".parse().unwrap();
        assert_eq!(spaced.into_board().unwrap(), Board::FINISHED);
    }

    #[test]
    fn parse_identity_input() {
        let dec: BoardInput = "0".parse().unwrap();
        assert_eq!(dec, BoardInput::Identity(0));
        let hex: BoardInput = "0x0001_b977_89ab_cdef".parse().unwrap();
        assert_eq!(hex, BoardInput::Identity(0x0001_b977_89ab_cdef));
    }

    #[test]
    fn parse_rejects_other_input() {
        assert!(matches!(
            "".parse::<BoardInput>(),
            Err(PuzzleError::UnsupportedInputType(_))
        ));
        assert!(matches!(
            "solved".parse::<BoardInput>(),
            Err(PuzzleError::UnsupportedInputType(_))
        ));
        assert!(matches!(
            "1,2,x".parse::<BoardInput>(),
            Err(PuzzleError::UnsupportedInputType(_))
        ));
    }

    #[test]
    fn sequence_input_rejects_negative_values() {
        let mut values: Vec<i64> = (0..16).collect();
        values[4] = -4;
        let err = BoardInput::Sequence(values).into_board().unwrap_err();
        assert!(matches!(err, PuzzleError::InvalidBoard(_)));
    }
}
