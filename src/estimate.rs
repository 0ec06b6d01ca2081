//! Exploratory count of how many boards a generator reaches from a start
//! position before a deadline. Diagnostic only: the full state space does not
//! fit in memory, so the count is a lower bound.

use log::{debug, info};
use rand::{seq::SliceRandom, Rng};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::board::Board;
use crate::codec::{self, BoardId};
use crate::moves::MoveGenerator;

const PROGRESS_EVERY: usize = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline(Instant);

impl Deadline {
    pub fn at(instant: Instant) -> Self {
        Self(instant)
    }

    pub fn after(timeout: Duration) -> Self {
        Self(Instant::now() + timeout)
    }

    pub fn expired(&self) -> bool {
        Instant::now() >= self.0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EstimateOptions {
    pub deadline: Deadline,
    /// Follow at most this many randomly chosen successors per board.
    pub fanout: Option<usize>,
    /// Stop expanding once this many boards have been seen.
    pub node_limit: Option<usize>,
}

impl EstimateOptions {
    pub fn new(deadline: Deadline) -> Self {
        Self {
            deadline,
            fanout: None,
            node_limit: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Estimate {
    /// Boards whose successors were generated.
    pub expanded: usize,
    /// Distinct boards seen, start included.
    pub seen: usize,
    /// Boards still queued when expansion stopped.
    pub pending: usize,
    pub timed_out: bool,
}

/// Breadth-first frontier counter bounded by `options.deadline`.
///
/// Once the deadline passes or the node limit is hit, expansion stops and the
/// remaining queue is drained into `pending`; every queued board has already
/// been counted in `seen`.
pub fn estimate<G, R>(
    start: Board,
    generator: &G,
    options: &EstimateOptions,
    rng: &mut R,
) -> Estimate
where
    G: MoveGenerator,
    R: Rng + ?Sized,
{
    let mut seen: FxHashSet<BoardId> = FxHashSet::default();
    seen.insert(codec::encode(&start));
    let mut queue = VecDeque::from([start]);
    let mut stats = Estimate::default();
    let mut next_report = PROGRESS_EVERY;

    while let Some(board) = queue.pop_front() {
        if options.deadline.expired() {
            stats.timed_out = true;
            queue.push_front(board);
            break;
        }
        if options.node_limit.is_some_and(|limit| seen.len() >= limit) {
            queue.push_front(board);
            break;
        }

        stats.expanded += 1;
        let mut successors: Vec<Board> = generator.moves(board).map(|edge| edge.next).collect();
        if let Some(fanout) = options.fanout {
            if successors.len() > fanout {
                successors.shuffle(rng);
                successors.truncate(fanout);
            }
        }
        for next in successors {
            if seen.insert(codec::encode(&next)) {
                queue.push_back(next);
            }
        }

        if seen.len() >= next_report {
            info!("finding boards... found = {:>14}", seen.len());
            next_report += PROGRESS_EVERY;
        }
    }

    stats.pending = queue.drain(..).count();
    stats.seen = seen.len();
    debug!(
        "estimate stopped: expanded {} seen {} pending {} timed out {}",
        stats.expanded, stats.seen, stats.pending, stats.timed_out
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::{SingleStep, SlideMoves};
    use rand::{rngs::StdRng, SeedableRng};

    fn far_future() -> Deadline {
        Deadline::after(Duration::from_secs(3600))
    }

    #[test]
    fn expired_deadline_expands_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        let options = EstimateOptions::new(Deadline::at(Instant::now()));
        let stats = estimate(Board::FINISHED, &SingleStep, &options, &mut rng);
        assert!(stats.timed_out);
        assert_eq!(stats.expanded, 0);
        assert_eq!(stats.seen, 1);
        assert_eq!(stats.pending, 1);
    }

    #[test]
    fn node_limit_stops_expansion() {
        let mut rng = StdRng::seed_from_u64(1);
        let options = EstimateOptions {
            node_limit: Some(1_000),
            ..EstimateOptions::new(far_future())
        };
        let stats = estimate(Board::FINISHED, &SingleStep, &options, &mut rng);
        assert!(!stats.timed_out);
        assert!(stats.seen >= 1_000);
        // Each expansion adds at most three unseen boards.
        assert!(stats.seen < 1_000 + 4);
        assert!(stats.pending > 0);
        assert_eq!(stats.seen, stats.expanded + stats.pending);
    }

    #[test]
    fn fanout_limits_growth() {
        let mut rng = StdRng::seed_from_u64(3);
        let options = EstimateOptions {
            fanout: Some(1),
            node_limit: Some(50),
            ..EstimateOptions::new(far_future())
        };
        let stats = estimate(Board::FINISHED, &SlideMoves, &options, &mut rng);
        // A single successor per board keeps at most one board queued.
        assert!(stats.pending <= 1);
        assert!(stats.seen <= stats.expanded + 1);
    }

    #[test]
    fn deadline_helpers() {
        assert!(Deadline::at(Instant::now()).expired());
        assert!(!far_future().expired());
    }
}
