//! Breadth-limited exploration of the 4x4 sliding puzzle.
//!
//! Boards are packed into 49-bit Lehmer codes ([`codec`]) so a search can
//! track millions of positions without keeping the 16! state graph around.

pub mod board;
pub mod codec;
pub mod error;
pub mod estimate;
pub mod moves;
pub mod render;
pub mod score;
pub mod search;

pub use board::{Board, BoardInput};
pub use codec::BoardId;
pub use error::{PuzzleError, Result};
pub use moves::{Edge, Move, MoveGenerator, SingleStep, SlideMoves};
pub use score::{Manhattan, Score, Scorer, TileMatch, SOLVED_SCORE};
pub use search::{ArrayIdentity, Candidate, Identity, PackedIdentity, SearchCursor, SearchResult};
