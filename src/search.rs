use log::{debug, info, trace};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::{HashMap, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;

use crate::board::{Board, BoardInput};
use crate::codec::{self, BoardId};
use crate::error::{PuzzleError, Result};
use crate::moves::{MoveGenerator, SingleStep};
use crate::score::{Score, Scorer, TileMatch};

/// Maps boards to the hashable keys a search deduplicates on, and back.
pub trait Identity {
    type Key: Hash + Eq + Clone + Debug;

    fn key(&self, board: &Board) -> Self::Key;

    fn board(&self, key: &Self::Key) -> Result<Board>;
}

/// Keys boards by their packed [`BoardId`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PackedIdentity;

impl Identity for PackedIdentity {
    type Key = BoardId;

    fn key(&self, board: &Board) -> BoardId {
        codec::encode(board)
    }

    fn board(&self, key: &BoardId) -> Result<Board> {
        codec::decode(*key)
    }
}

/// Keys boards by their cell array.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayIdentity;

impl Identity for ArrayIdentity {
    type Key = Board;

    fn key(&self, board: &Board) -> Board {
        *board
    }

    fn board(&self, key: &Board) -> Result<Board> {
        Ok(*key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<K> {
    pub key: K,
    pub score: Score,
    /// Keys from the root up to, but not including, this candidate.
    pub path: Vec<K>,
}

impl<K> Candidate<K> {
    /// Number of single moves from the root.
    pub fn moves(&self) -> usize {
        self.path.len()
    }
}

#[derive(Debug, Clone)]
pub struct SearchResult<K> {
    /// Best first.
    pub candidates: Vec<Candidate<K>>,
    /// Distinct boards found, root excluded.
    pub discovered: usize,
    /// Number of new boards found at each depth.
    pub layers: Vec<usize>,
}

impl<K: Hash + Eq + Clone> SearchResult<K> {
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn path(&self, key: &K) -> Option<&[K]> {
        self.candidates
            .iter()
            .find(|c| &c.key == key)
            .map(|c| c.path.as_slice())
    }

    pub fn into_paths(self) -> HashMap<K, Vec<K>> {
        self.candidates.into_iter().map(|c| (c.key, c.path)).collect()
    }
}

/// Breadth-limited explorer rooted at one board.
///
/// The cursor holds only its configuration; every call to
/// [`SearchCursor::search`] builds and drops its own visited set and
/// predecessor map, so results can be fed into a new cursor to continue from
/// any candidate.
#[derive(Debug, Clone)]
pub struct SearchCursor<I = PackedIdentity, G = SingleStep, S = TileMatch> {
    root: Board,
    identity: I,
    generator: G,
    scorer: S,
}

impl SearchCursor {
    pub fn new(root: Board) -> Self {
        Self {
            root,
            identity: PackedIdentity,
            generator: SingleStep,
            scorer: TileMatch::default(),
        }
    }

    pub fn from_input(root: impl Into<BoardInput>) -> Result<Self> {
        Ok(Self::new(root.into().into_board()?))
    }
}

impl<I, G, S> SearchCursor<I, G, S>
where
    I: Identity,
    G: MoveGenerator,
    S: Scorer,
{
    pub fn with_identity<I2: Identity>(self, identity: I2) -> SearchCursor<I2, G, S> {
        SearchCursor {
            root: self.root,
            identity,
            generator: self.generator,
            scorer: self.scorer,
        }
    }

    pub fn with_generator<G2: MoveGenerator>(self, generator: G2) -> SearchCursor<I, G2, S> {
        SearchCursor {
            root: self.root,
            identity: self.identity,
            generator,
            scorer: self.scorer,
        }
    }

    pub fn with_scorer<S2: Scorer>(self, scorer: S2) -> SearchCursor<I, G, S2> {
        SearchCursor {
            root: self.root,
            identity: self.identity,
            generator: self.generator,
            scorer,
        }
    }

    pub fn root(&self) -> &Board {
        &self.root
    }

    pub fn identity(&self) -> &I {
        &self.identity
    }

    /// Expands `min_depth` layers from the root and returns the `candidates`
    /// best scoring boards found, each with the keys leading to it.
    ///
    /// Each board keeps the first predecessor it was found from. Layers are
    /// expanded strictly in order, so with [`SingleStep`] a candidate's path
    /// length is its distance from the root. Candidates with equal scores are
    /// not ordered in any meaningful way.
    pub fn search(&self, min_depth: usize, candidates: usize) -> Result<SearchResult<I::Key>> {
        if min_depth < 1 {
            return Err(PuzzleError::InvalidArgument(format!(
                "min_depth must be 1 or larger, got {}",
                min_depth
            )));
        }

        let root_key = self.identity.key(&self.root);
        let mut seen: FxHashSet<I::Key> = FxHashSet::default();
        seen.insert(root_key.clone());
        let mut paths_back: FxHashMap<I::Key, I::Key> = FxHashMap::default();
        let mut found: Vec<(I::Key, Board)> = Vec::new();
        let mut layers = Vec::with_capacity(min_depth);

        let mut next_gen = vec![self.root];
        for depth in 0..min_depth {
            debug!(
                "search depth {} of {}, frontier {}",
                depth + 1,
                min_depth,
                next_gen.len()
            );
            let current_gen = std::mem::take(&mut next_gen);
            for edge in current_gen.into_iter().flat_map(|b| self.generator.moves(b)) {
                let next_key = self.identity.key(&edge.next);
                if seen.insert(next_key.clone()) {
                    paths_back.insert(next_key.clone(), self.identity.key(&edge.prev));
                    found.push((next_key, edge.next));
                    next_gen.push(edge.next);
                }
            }
            layers.push(next_gen.len());
            if next_gen.is_empty() {
                break;
            }
        }

        let mut ranked: Vec<(Score, I::Key)> = found
            .into_iter()
            .map(|(key, board)| (self.scorer.score(&board), key))
            .collect();
        let discovered = ranked.len();
        ranked.sort_by(|a, b| b.0.cmp(&a.0));
        ranked.truncate(candidates);

        let candidates: Vec<Candidate<I::Key>> = ranked
            .into_iter()
            .map(|(score, key)| {
                let path = path_back(&paths_back, &root_key, &key);
                trace!("candidate {:?} score {} moves {}", key, score, path.len());
                Candidate { key, score, path }
            })
            .collect();

        info!(
            "searched {} layers from {:?}: {} boards, best score {}",
            layers.len(),
            root_key,
            discovered,
            candidates.first().map_or(0, |c| c.score)
        );

        Ok(SearchResult {
            candidates,
            discovered,
            layers,
        })
    }
}

/// Follows predecessors from `key` back to `root`, returning them in
/// root-first order.
fn path_back<K: Hash + Eq + Clone>(paths_back: &FxHashMap<K, K>, root: &K, key: &K) -> Vec<K> {
    let mut path = VecDeque::new();
    let mut step = key;
    while step != root {
        let Some(prev) = paths_back.get(step) else {
            break;
        };
        path.push_front(prev.clone());
        step = prev;
    }
    path.into()
}
