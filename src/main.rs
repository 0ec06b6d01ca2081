use anyhow::{Context, Result};
use clap::{Args, Command, FromArgMatches, Parser, Subcommand, ValueEnum};
use log::info;
use rand::{rngs::StdRng, SeedableRng};
use std::time::Duration;

use slider_search::estimate::{estimate, Deadline, EstimateOptions};
use slider_search::render::styled_grid;
use slider_search::{
    Board, BoardInput, Identity, Manhattan, MoveGenerator, PackedIdentity, Scorer, SearchCursor,
    SingleStep, SlideMoves,
};

/// Starting position used when none is given.
const EXAMPLE_ROOT: [u8; 16] = [3, 4, 5, 6, 0, 1, 2, 7, 8, 13, 10, 15, 12, 9, 14, 11];

#[derive(Debug, Parser)]
#[command(name = "slider-search", about = "Breadth-limited 4x4 sliding puzzle explorer")]
struct Cli {
    #[command(subcommand)]
    cmd: Option<Cmd>,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Expand N layers from a board and report the best scoring positions
    Search(SearchArgs),
    /// Count boards reachable before a deadline
    Estimate(EstimateArgs),
    /// Print a board and its identity
    Show {
        /// Comma separated cells or an integer identity
        board: BoardInput,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScorerKind {
    /// Cells matching the finished board
    Tiles,
    /// Manhattan distance with linear conflicts
    Manhattan,
}

#[derive(Debug, Args)]
struct SearchArgs {
    /// Number of layers to expand
    #[arg(long, default_value_t = 8)]
    depth: usize,
    /// Number of candidates to report
    #[arg(long, default_value_t = 10)]
    candidates: usize,
    /// Use straight and L-shaped slides instead of single steps
    #[arg(long)]
    extended: bool,
    #[arg(long, value_enum, default_value_t = ScorerKind::Tiles)]
    scorer: ScorerKind,
    /// Root board: comma separated cells or an integer identity
    #[arg(long, conflicts_with = "random")]
    root: Option<BoardInput>,
    /// Start from a random reachable board
    #[arg(long)]
    random: bool,
    /// Seed for --random
    #[arg(long)]
    seed: Option<u64>,
    /// Print every board along each candidate's path
    #[arg(long)]
    paths: bool,
}

impl SearchArgs {
    /// Arguments of a bare `search`, taken from the `#[arg]` defaults.
    fn defaults() -> Result<Self> {
        let cmd = SearchArgs::augment_args(Command::new("search"));
        let matches = cmd.try_get_matches_from(["search"])?;
        Ok(SearchArgs::from_arg_matches(&matches)?)
    }
}

#[derive(Debug, Args)]
struct EstimateArgs {
    /// Wall-clock budget
    #[arg(long, default_value_t = 5)]
    seconds: u64,
    /// Follow at most this many random successors per board
    #[arg(long)]
    fanout: Option<usize>,
    /// Stop after seeing this many boards
    #[arg(long)]
    limit: Option<usize>,
    /// Use straight and L-shaped slides instead of single steps
    #[arg(long)]
    extended: bool,
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().cmd {
        Some(Cmd::Search(args)) => run_search(&args),
        Some(Cmd::Estimate(args)) => run_estimate(&args),
        Some(Cmd::Show { board }) => {
            let board = board.into_board().context("reading board")?;
            println!("{:#015x}\n{}", board.id(), board);
            Ok(())
        }
        None => run_search(&SearchArgs::defaults()?),
    }
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn run_search(args: &SearchArgs) -> Result<()> {
    let root = if args.random {
        Board::shuffled(&mut rng_from(args.seed))
    } else {
        match &args.root {
            Some(input) => input.clone().into_board().context("reading --root")?,
            None => Board::new(EXAMPLE_ROOT)?,
        }
    };
    if !root.is_reachable() {
        log::warn!("root cannot reach the finished board");
    }
    println!(
        "Root {:#015x}:\n{}",
        root.id(),
        styled_grid(&root, &Board::FINISHED)
    );

    let cursor = SearchCursor::new(root);
    match (args.extended, args.scorer) {
        (false, ScorerKind::Tiles) => report(&cursor, args),
        (false, ScorerKind::Manhattan) => report(&cursor.with_scorer(Manhattan::default()), args),
        (true, ScorerKind::Tiles) => report(&cursor.with_generator(SlideMoves), args),
        (true, ScorerKind::Manhattan) => report(
            &cursor
                .with_generator(SlideMoves)
                .with_scorer(Manhattan::default()),
            args,
        ),
    }
}

fn report<G, S>(cursor: &SearchCursor<PackedIdentity, G, S>, args: &SearchArgs) -> Result<()>
where
    G: MoveGenerator,
    S: Scorer,
{
    let result = cursor
        .search(args.depth, args.candidates)
        .with_context(|| format!("searching {} layers", args.depth))?;
    info!("layer sizes {:?}", result.layers);

    for candidate in &result.candidates {
        println!(
            "{:#015x}  score {:>5}  moves {:>3}  path {:x?}",
            candidate.key,
            candidate.score,
            candidate.moves(),
            candidate.path
        );
        if args.paths {
            for key in candidate.path.iter().skip(1).chain([&candidate.key]) {
                let board = cursor.identity().board(key)?;
                println!("{}", styled_grid(&board, &Board::FINISHED));
            }
        }
    }
    Ok(())
}

fn run_estimate(args: &EstimateArgs) -> Result<()> {
    let options = EstimateOptions {
        fanout: args.fanout,
        node_limit: args.limit,
        ..EstimateOptions::new(Deadline::after(Duration::from_secs(args.seconds)))
    };
    let mut rng = rng_from(args.seed);
    let stats = if args.extended {
        estimate(Board::FINISHED, &SlideMoves, &options, &mut rng)
    } else {
        estimate(Board::FINISHED, &SingleStep, &options, &mut rng)
    };
    println!(
        "expanded {}  seen {}  pending {}{}",
        stats.expanded,
        stats.seen,
        stats.pending,
        if stats.timed_out {
            "  (deadline hit)"
        } else {
            ""
        }
    );
    Ok(())
}
