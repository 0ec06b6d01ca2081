//! Lehmer-code packing of a board into a single integer.
//!
//! Cell `i` stores the index of its tile among the tiles not yet placed by
//! cells `0..i`. That index shrinks as cells are consumed, so the digits use a
//! fixed mixed-radix width schedule: eight 4-bit digits, four 3-bit digits,
//! two 2-bit digits, one 1-bit digit, and a final cell that is forced.
//! Cell 0 occupies the lowest bits.

use crate::board::{Board, CELLS};
use crate::error::{PuzzleError, Result};

/// Integer form of a board.
pub type BoardId = u64;

pub const DIGIT_WIDTHS: [u32; CELLS] = [4, 4, 4, 4, 4, 4, 4, 4, 3, 3, 3, 3, 2, 2, 1, 0];

pub const DIGIT_SHIFTS: [u32; CELLS] = digit_shifts();

/// Number of low bits a valid identity may occupy.
pub const CODE_BITS: u32 = DIGIT_SHIFTS[CELLS - 1] + DIGIT_WIDTHS[CELLS - 1];

const fn digit_shifts() -> [u32; CELLS] {
    let mut shifts = [0; CELLS];
    let mut i = 1;
    while i < CELLS {
        shifts[i] = shifts[i - 1] + DIGIT_WIDTHS[i - 1];
        i += 1;
    }
    shifts
}

const ALL_UNUSED: u16 = u16::MAX;

pub fn encode(board: &Board) -> BoardId {
    let mut unused = ALL_UNUSED;
    let mut out: BoardId = 0;
    for (idx, &tile) in board.tiles().iter().enumerate() {
        let below = unused & ((1u16 << tile) - 1);
        out |= (below.count_ones() as BoardId) << DIGIT_SHIFTS[idx];
        unused &= !(1u16 << tile);
    }
    out
}

/// Validates `tiles` before encoding.
pub fn encode_tiles(tiles: &[u8]) -> Result<BoardId> {
    Ok(encode(&Board::from_slice(tiles)?))
}

pub fn decode(id: BoardId) -> Result<Board> {
    if id >> CODE_BITS != 0 {
        return Err(PuzzleError::InvalidBoard(format!(
            "identity {:#x} has bits set above bit {}",
            id,
            CODE_BITS - 1
        )));
    }

    let mut unused = ALL_UNUSED;
    let mut tiles = [0u8; CELLS];
    for (idx, cell) in tiles.iter_mut().enumerate() {
        let mask = (1 << DIGIT_WIDTHS[idx]) - 1;
        let digit = ((id >> DIGIT_SHIFTS[idx]) & mask) as u32;
        let remaining = (CELLS - idx) as u32;
        if digit >= remaining {
            return Err(PuzzleError::InvalidBoard(format!(
                "identity {:#x}: digit {} of cell {} exceeds the {} tiles left",
                id, digit, idx, remaining
            )));
        }
        let tile = nth_unused(unused, digit);
        *cell = tile;
        unused &= !(1u16 << tile);
    }
    Ok(Board::from_tiles_unchecked(tiles))
}

fn nth_unused(mut unused: u16, n: u32) -> u8 {
    for _ in 0..n {
        unused &= unused - 1;
    }
    unused.trailing_zeros() as u8
}
