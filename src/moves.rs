use std::collections::VecDeque;
use std::fmt;

use crate::board::{Board, CELLS, SIDE};

/// Direction the blank travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    pub fn as_offset(&self) -> isize {
        match self {
            Move::Up => -(SIDE as isize),
            Move::Down => SIDE as isize,
            Move::Left => -1,
            Move::Right => 1,
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }

    pub fn perpendicular(&self) -> [Move; 2] {
        match self {
            Move::Up | Move::Down => [Move::Left, Move::Right],
            Move::Left | Move::Right => [Move::Up, Move::Down],
        }
    }

    /// Index the blank lands on when it leaves `blank` in this direction, or
    /// `None` when that would cross the grid edge.
    pub fn step(&self, blank: usize) -> Option<usize> {
        let legal = match self {
            Move::Up => blank >= SIDE,
            Move::Down => blank < CELLS - SIDE,
            Move::Left => blank % SIDE != 0,
            Move::Right => blank % SIDE != SIDE - 1,
        };
        legal.then(|| blank.wrapping_add_signed(self.as_offset()))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Left => "Left",
            Move::Down => "Down",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// One transition: `next` is `prev` with the blank moved by a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub prev: Board,
    pub next: Board,
}

impl Edge {
    pub fn new(prev: Board, next: Board) -> Self {
        Self { prev, next }
    }
}

/// Moves the blank (at `blank`) one cell in `dir`, returning the new board
/// and the blank's new index.
pub fn try_move(board: &Board, blank: usize, dir: Move) -> Option<(Board, usize)> {
    let target = dir.step(blank)?;
    Some((board.with_swap(blank, target), target))
}

/// Repeats one direction until the blank reaches the edge.
#[derive(Debug, Clone)]
pub struct Slide {
    board: Board,
    blank: usize,
    dir: Move,
}

impl Slide {
    pub fn new(board: Board, blank: usize, dir: Move) -> Self {
        Self { board, blank, dir }
    }
}

impl Iterator for Slide {
    type Item = (Board, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (board, blank) = try_move(&self.board, self.blank, self.dir)?;
        self.board = board;
        self.blank = blank;
        Some((board, blank))
    }
}

/// Produces the edges leaving a board.
pub trait MoveGenerator {
    type Moves: Iterator<Item = Edge>;

    fn moves(&self, board: Board) -> Self::Moves;
}

static SINGLE_STEP_ORDER: [Move; 4] = Move::ALL;

/// One blank slide per legal direction: 2 to 4 edges.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleStep;

impl MoveGenerator for SingleStep {
    type Moves = SingleStepMoves;

    fn moves(&self, board: Board) -> Self::Moves {
        SingleStepMoves {
            board,
            blank: board.blank(),
            dirs: SINGLE_STEP_ORDER.iter(),
        }
    }
}

pub struct SingleStepMoves {
    board: Board,
    blank: usize,
    dirs: std::slice::Iter<'static, Move>,
}

impl Iterator for SingleStepMoves {
    type Item = Edge;

    fn next(&mut self) -> Option<Edge> {
        for &dir in self.dirs.by_ref() {
            if let Some((next, _)) = try_move(&self.board, self.blank, dir) {
                return Some(Edge::new(self.board, next));
            }
        }
        None
    }
}

/// Initial direction of each straight run, then the two directions tried
/// from every board along it.
const SLIDE_PLANS: [(Move, [Move; 2]); 4] = [
    (Move::Up, [Move::Left, Move::Right]),
    (Move::Right, [Move::Up, Move::Down]),
    (Move::Down, [Move::Right, Move::Left]),
    (Move::Left, [Move::Up, Move::Down]),
];

/// Straight slides until blocked in each direction, plus the L-shaped slides
/// branching off every board on those straight runs.
///
/// Every yielded edge is still a single cell move: its `prev` is the board
/// immediately before that step, not the board passed to `moves`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlideMoves;

impl MoveGenerator for SlideMoves {
    type Moves = SlideMovesIter;

    fn moves(&self, board: Board) -> Self::Moves {
        let blank = board.blank();
        SlideMovesIter {
            root: board,
            root_blank: blank,
            plan: 0,
            main: Slide::new(board, blank, SLIDE_PLANS[0].0),
            main_prev: board,
            pending: VecDeque::new(),
        }
    }
}

pub struct SlideMovesIter {
    root: Board,
    root_blank: usize,
    plan: usize,
    main: Slide,
    main_prev: Board,
    pending: VecDeque<Edge>,
}

impl Iterator for SlideMovesIter {
    type Item = Edge;

    fn next(&mut self) -> Option<Edge> {
        loop {
            if let Some(edge) = self.pending.pop_front() {
                return Some(edge);
            }
            if self.plan >= SLIDE_PLANS.len() {
                return None;
            }

            match self.main.next() {
                Some((board, blank)) => {
                    self.pending.push_back(Edge::new(self.main_prev, board));
                    self.main_prev = board;
                    for dir in SLIDE_PLANS[self.plan].1 {
                        let mut prev = board;
                        for (next, _) in Slide::new(board, blank, dir) {
                            self.pending.push_back(Edge::new(prev, next));
                            prev = next;
                        }
                    }
                }
                None => {
                    self.plan += 1;
                    if let Some(&(dir, _)) = SLIDE_PLANS.get(self.plan) {
                        self.main = Slide::new(self.root, self.root_blank, dir);
                        self.main_prev = self.root;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diff_cells(a: &Board, b: &Board) -> Vec<usize> {
        (0..CELLS).filter(|&i| a.tiles()[i] != b.tiles()[i]).collect()
    }

    /// `next` differs from `prev` by the blank trading places with a neighbour.
    fn assert_single_step(edge: &Edge) {
        let diff = diff_cells(&edge.prev, &edge.next);
        assert_eq!(diff.len(), 2, "{:?}", edge);
        let from = edge.prev.blank();
        let to = edge.next.blank();
        assert!(diff.contains(&from) && diff.contains(&to));
        assert!(Move::ALL.iter().any(|d| d.step(from) == Some(to)));
        assert!(Board::new(*edge.next.tiles()).is_ok());
    }

    fn blank_at(idx: usize) -> Board {
        Board::FINISHED.with_swap(0, idx)
    }

    #[test]
    fn step_respects_edges() {
        assert_eq!(Move::Up.step(2), None);
        assert_eq!(Move::Down.step(13), None);
        assert_eq!(Move::Left.step(8), None);
        assert_eq!(Move::Right.step(11), None);
        assert_eq!(Move::Up.step(5), Some(1));
        assert_eq!(Move::Down.step(5), Some(9));
        assert_eq!(Move::Left.step(5), Some(4));
        assert_eq!(Move::Right.step(5), Some(6));
    }

    #[test]
    fn single_step_counts() {
        assert_eq!(SingleStep.moves(blank_at(0)).count(), 2);
        assert_eq!(SingleStep.moves(blank_at(1)).count(), 3);
        assert_eq!(SingleStep.moves(blank_at(5)).count(), 4);
        assert_eq!(SingleStep.moves(blank_at(15)).count(), 2);
    }

    #[test]
    fn single_step_order_and_legality() {
        let board = blank_at(5);
        let blanks: Vec<usize> = SingleStep.moves(board).map(|e| e.next.blank()).collect();
        assert_eq!(blanks, vec![1, 9, 4, 6]);
        for edge in SingleStep.moves(board) {
            assert_eq!(edge.prev, board);
            assert_single_step(&edge);
        }
    }

    #[test]
    fn single_step_is_reversible() {
        for idx in 0..CELLS {
            let board = blank_at(idx);
            for edge in SingleStep.moves(board) {
                assert!(SingleStep.moves(edge.next).any(|back| back.next == board));
            }
        }
    }

    #[test]
    fn slide_stops_at_edge() {
        let board = blank_at(1);
        let run: Vec<usize> = Slide::new(board, 1, Move::Down).map(|(_, b)| b).collect();
        assert_eq!(run, vec![5, 9, 13]);
        assert_eq!(Slide::new(board, 1, Move::Up).count(), 0);
    }

    #[test]
    fn slide_moves_chain_single_steps() {
        for idx in 0..CELLS {
            let board = blank_at(idx);
            let mut known = vec![board];
            for edge in SlideMoves.moves(board) {
                assert_single_step(&edge);
                assert!(known.contains(&edge.prev), "prev must come from an earlier edge");
                known.push(edge.next);
            }
        }
    }

    #[test]
    fn slide_moves_from_corner() {
        // Blank at 0: up and left runs are empty. The right run reaches 1, 2, 3
        // and each of those drops down three rows. The down run reaches 4, 8, 12
        // and each of those slides right three columns.
        let edges: Vec<Edge> = SlideMoves.moves(Board::FINISHED).collect();
        assert_eq!(edges.len(), 3 + 3 * 3 + 3 + 3 * 3);

        let first: Vec<usize> = edges.iter().take(5).map(|e| e.next.blank()).collect();
        assert_eq!(first, vec![1, 5, 9, 13, 2]);
        assert_eq!(edges[1].prev, edges[0].next);
        assert_eq!(edges[4].prev, edges[0].next);
    }

    #[test]
    fn slide_moves_cover_single_steps() {
        let board = blank_at(6);
        let slides: Vec<Board> = SlideMoves.moves(board).map(|e| e.next).collect();
        for edge in SingleStep.moves(board) {
            assert!(slides.contains(&edge.next));
        }
    }

    #[test]
    fn perpendicular_and_opposite() {
        for dir in Move::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            assert!(!dir.perpendicular().contains(&dir));
            assert!(!dir.perpendicular().contains(&dir.opposite()));
        }
    }
}
