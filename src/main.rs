//! Hegemon command line.
//!
//! `play` runs one game, `tournament` runs many in parallel and prints a JSON
//! summary, `odds` prints the exact combat tables. Logs go to stderr and are
//! filtered with `RUST_LOG` (default `info`).

use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use hegemon::board::{maps, random_initial_state, setup_rng, BoardSpec, World};
use hegemon::combat::{all_probability_tables, OddsGrid};
use hegemon::config::{self, GameConfig, TournamentConfig};
use hegemon::game::{run_tournament, Game};
use hegemon::render::{render_standings, render_summary, shared_renderer, TextRenderer};
use hegemon::rules::CheckMode;
use hegemon::strategy::{strategy_by_name, Strategy, STRATEGY_NAMES};

type CliResult = Result<(), Box<dyn Error>>;

#[derive(Parser, Debug)]
#[command(name = "hegemon", version)]
#[command(about = "Territorial conquest simulator with automated players")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a single game
    Play(PlayArgs),
    /// Play many games in parallel and print a JSON summary
    Tournament(TournamentArgs),
    /// Print the exact single-round loss tables
    Odds(OddsArgs),
}

#[derive(Args, Debug)]
struct PlayArgs {
    /// Built-in board: classic or polytech
    #[arg(long, default_value = "classic")]
    board: String,

    /// Board description in JSON, instead of a built-in board
    #[arg(long)]
    board_file: Option<PathBuf>,

    /// One strategy per army, comma separated
    #[arg(long, value_delimiter = ',', default_value = "probabilistic,uniform,random")]
    strategies: Vec<String>,

    /// Round bound, after which the game is undecided
    #[arg(long)]
    rounds: Option<u32>,

    /// Play until someone wins, with no round bound
    #[arg(long, conflicts_with = "rounds")]
    unbounded: bool,

    /// Seed for the deal, the dice and the strategies (0 = random)
    #[arg(long)]
    seed: Option<u64>,

    /// Skip the redundant transition checks
    #[arg(long)]
    trusted: bool,

    /// Print every turn as it is played
    #[arg(long)]
    log: bool,

    /// JSON game configuration; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct TournamentArgs {
    #[arg(long)]
    games: Option<usize>,

    /// Built-in board: classic or polytech
    #[arg(long)]
    board: Option<String>,

    /// One strategy per army, comma separated
    #[arg(long, value_delimiter = ',')]
    strategies: Option<Vec<String>>,

    #[arg(long)]
    rounds: Option<u32>,

    /// Base seed; game i uses seed + i (0 = random)
    #[arg(long)]
    seed: Option<u64>,

    /// Worker threads (0 = one per core)
    #[arg(long)]
    threads: Option<usize>,

    #[arg(long)]
    trusted: bool,

    /// JSON tournament configuration; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct OddsArgs {
    /// Also print the probability of taking a territory for up to N
    /// attackers against N defenders
    #[arg(long)]
    grid: Option<u32>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Play(args) => play(args),
        Command::Tournament(args) => tournament(args),
        Command::Odds(args) => odds(args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn play(args: PlayArgs) -> CliResult {
    let mut cfg: GameConfig = match &args.config {
        Some(path) => config::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(rounds) = args.rounds {
        cfg.max_rounds = Some(rounds);
    }
    if args.unbounded {
        cfg.max_rounds = None;
    }
    if let Some(seed) = args.seed {
        cfg.seed = seed;
    }
    if args.trusted {
        cfg.checks = CheckMode::Trusted;
    }
    cfg.seed = cfg.resolve_seed();

    let spec = match &args.board_file {
        Some(path) => BoardSpec::from_json(&fs::read_to_string(path)?)?,
        None => maps::by_name(&args.board)?,
    };
    let world = Arc::new(World::from_spec(&spec, args.strategies.len())?);
    let strategies = args
        .strategies
        .iter()
        .map(|name| strategy_by_name(name))
        .collect::<Result<Vec<Box<dyn Strategy>>, _>>()?;
    let state = random_initial_state(Arc::clone(&world), &mut setup_rng(cfg.seed))?;

    let stdout = io::stdout();
    writeln!(stdout.lock(), "board {} with {} armies, seed {}", world.name(), world.army_count(), cfg.seed)?;

    let mut game = Game::new(state, strategies, &cfg)?;
    let mut renderer = None;
    if args.log {
        let (handle, observer) = shared_renderer(TextRenderer::new(io::stdout()));
        renderer = Some(handle);
        game = game.with_observer(observer);
    }
    let outcome = game.run()?;
    if let Some(e) = renderer.as_ref().and_then(|r| r.borrow_mut().take_error()) {
        return Err(format!("turn log could not be written: {e}").into());
    }

    let mut out = stdout.lock();
    if !args.log {
        match outcome.winner {
            Some(w) => writeln!(out, "{w} wins after {} rounds", outcome.rounds)?,
            None => writeln!(out, "no winner within {} rounds", outcome.rounds)?,
        }
        write!(out, "{}", render_summary(&outcome.state))?;
    }
    writeln!(out, "{}", render_standings(&outcome.standings))?;
    Ok(())
}

fn tournament(args: TournamentArgs) -> CliResult {
    let mut cfg: TournamentConfig = match &args.config {
        Some(path) => config::load(path)?,
        None => TournamentConfig::default(),
    };
    if let Some(games) = args.games {
        cfg.games = games;
    }
    if let Some(board) = args.board {
        cfg.board = board;
    }
    if let Some(strategies) = args.strategies {
        cfg.strategies = strategies;
    }
    if let Some(rounds) = args.rounds {
        cfg.max_rounds = Some(rounds);
    }
    if let Some(seed) = args.seed {
        cfg.seed = seed;
    }
    if let Some(threads) = args.threads {
        cfg.threads = threads;
    }
    if args.trusted {
        cfg.checks = CheckMode::Trusted;
    }

    let summary = run_tournament(&cfg)?;
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, &summary)?;
    writeln!(out)?;
    Ok(())
}

fn odds(args: OddsArgs) -> CliResult {
    let mut out = io::stdout().lock();
    for table in all_probability_tables() {
        writeln!(out, "{} attacking dice vs {} defending dice ({} outcomes)", table.attack_dice, table.defense_dice, table.total)?;
        for ((pa, pd), p) in table.probabilities() {
            writeln!(out, "  attacker -{pa} defender -{pd}: {p:.6}")?;
        }
    }

    if let Some(n) = args.grid {
        let grid = OddsGrid::new(n, n);
        writeln!(out, "\nprobability of taking the territory (rows: attackers, columns: defenders)")?;
        write!(out, "{:>4}", "")?;
        for d in 1..=n {
            write!(out, "{d:>7}")?;
        }
        writeln!(out)?;
        for a in 1..=n {
            write!(out, "{a:>4}")?;
            for d in 1..=n {
                write!(out, "{:>7.3}", grid.get(a, d).unwrap_or(0.0))?;
            }
            writeln!(out)?;
        }
    }
    writeln!(out, "\nstrategies: {}", STRATEGY_NAMES.join(", "))?;
    Ok(())
}
