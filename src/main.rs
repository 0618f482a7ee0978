//! K-in-a-row terminal host
//!
//! - `kinarow play` - Play against the engine
//! - `kinarow selfplay` - Pit two difficulty levels against each other
//! - `kinarow levels` - Show the difficulty table

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use kinarow::{Engine, EngineConfig, GameState, GameStatus, Mark, MoveError, MoveResult, Variant};

/// K-in-a-row engine for 3x3 to 6x6 boards
#[derive(Parser)]
#[command(name = "kinarow")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Difficulty table to use instead of the built-in one (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the engine in the terminal
    Play {
        /// Board variant: easy, medium, hard or insane
        #[arg(short, long, default_value = "easy")]
        variant: Variant,
        /// Engine difficulty (1-10)
        #[arg(short, long, default_value_t = 5)]
        level: u8,
        /// Let the engine move first
        #[arg(long)]
        second: bool,
        /// Seed for the engine's random choices
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Play the engine against itself
    Selfplay {
        #[arg(short, long, default_value = "easy")]
        variant: Variant,
        /// Difficulty for X
        #[arg(short = 'x', long, default_value_t = 10)]
        x_level: u8,
        /// Difficulty for O
        #[arg(short = 'o', long, default_value_t = 10)]
        o_level: u8,
        /// Number of games
        #[arg(short = 'n', long, default_value_t = 1)]
        games: u32,
        #[arg(long)]
        seed: Option<u64>,
        /// Only print the summary
        #[arg(short, long)]
        quiet: bool,
    },
    /// Show the difficulty table and board variants
    Levels,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading difficulty table from {}", path.display()))?,
        None => EngineConfig::default(),
    };

    match cli.command {
        Commands::Play {
            variant,
            level,
            second,
            seed,
        } => {
            let human = if second { Mark::O } else { Mark::X };
            run_play(&config, variant, level, human, seed)
        }
        Commands::Selfplay {
            variant,
            x_level,
            o_level,
            games,
            seed,
            quiet,
        } => run_selfplay(&config, variant, [x_level, o_level], games, seed, quiet),
        Commands::Levels => {
            print_levels(&config);
            Ok(())
        }
    }
}

fn build_engine(config: &EngineConfig, level: u8, seed: Option<u64>) -> Result<Engine> {
    let engine = Engine::with_config(level, config)
        .with_context(|| format!("creating engine for level {level}"))?;
    Ok(match seed {
        Some(seed) => engine.with_seed(seed),
        None => engine,
    })
}

/// Accepts `row col` or `row,col`.
fn parse_coords(input: &str) -> Option<(usize, usize)> {
    let mut parts = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty());
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    parts.next().is_none().then_some((row, col))
}

/// Search line for a move, e.g. `AlphaBeta, depth 4, 812 nodes, 61% first-move cutoffs, 3 ms`.
fn search_summary(result: &MoveResult) -> String {
    let mut summary = format!("{:?}", result.search_type);
    if result.depth > 0 {
        summary.push_str(&format!(", depth {}, {} nodes", result.depth, result.nodes));
    }
    if result.stats.beta_cutoffs > 0 {
        summary.push_str(&format!(
            ", {:.0}% first-move cutoffs",
            result.stats.first_move_rate()
        ));
    }
    summary.push_str(&format!(", {} ms", result.time_ms));
    summary
}

/// Take back the human's last move and the engine reply that followed it.
fn undo_turn(game: &mut GameState, human: Mark) -> Result<(), MoveError> {
    game.undo()?;
    if game.current_mark() != human {
        game.undo()?;
    }
    Ok(())
}

fn describe(status: GameStatus) -> String {
    match status {
        GameStatus::Won(mark) => format!("{mark} wins"),
        GameStatus::Drawn => "draw".to_string(),
        GameStatus::InProgress => "in progress".to_string(),
    }
}

fn run_play(
    config: &EngineConfig,
    variant: Variant,
    level: u8,
    human: Mark,
    seed: Option<u64>,
) -> Result<()> {
    let mut engine = build_engine(config, level, seed)?;
    let mut game = GameState::from_variant(variant);
    let mut lines = io::stdin().lock().lines();

    println!(
        "{} against level {level}. You are {human}. Enter `row col`, `undo` or `quit`.",
        variant.description()
    );

    while !game.is_game_over() {
        println!("\n{}", game.board());

        if game.current_mark() != human {
            let result = engine.request_move_with_stats(game.board(), game.current_mark())?;
            println!("Engine plays {} ({})", result.best_move, search_summary(&result));
            game.play(result.best_move)?;
            continue;
        }

        print!("{human} to move> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line.context("reading move")?;
        let input = line.trim();

        match input {
            "quit" | "q" => return Ok(()),
            "undo" | "u" => {
                if let Err(err) = undo_turn(&mut game, human) {
                    println!("{err}");
                }
            }
            _ => match parse_coords(input) {
                Some((row, col)) => {
                    if let Err(err) = game.play_at(row, col) {
                        println!("{err}");
                    }
                }
                None => println!("Expected `row col`, e.g. `1 1`"),
            },
        }
    }

    println!("\n{}", game.board());
    println!("Game over: {}", describe(game.status()));
    if !game.winning_cells().is_empty() {
        let cells: Vec<String> = game.winning_cells().iter().map(ToString::to_string).collect();
        println!("Winning line: {}", cells.join(" "));
    }
    Ok(())
}

fn run_selfplay(
    config: &EngineConfig,
    variant: Variant,
    levels: [u8; 2],
    games: u32,
    seed: Option<u64>,
    quiet: bool,
) -> Result<()> {
    let [x_level, o_level] = levels;
    let (mut x_wins, mut o_wins, mut draws) = (0u32, 0u32, 0u32);

    println!(
        "{}: level {x_level} (X) vs level {o_level} (O), {games} game(s)",
        variant.description()
    );

    for n in 0..games {
        let game_seed = seed.map(|s| s.wrapping_add(u64::from(n) * 2));
        let mut engines = [
            build_engine(config, x_level, game_seed)?,
            build_engine(config, o_level, game_seed.map(|s| s.wrapping_add(1)))?,
        ];
        let mut game = GameState::from_variant(variant);

        while !game.is_game_over() {
            let mover = game.current_mark();
            let engine = &mut engines[usize::from(mover == Mark::O)];
            let result = engine.request_move_with_stats(game.board(), mover)?;
            game.play(result.best_move)?;
            if !quiet {
                println!("{mover} plays {} ({})", result.best_move, search_summary(&result));
            }
        }

        let status = game.status();
        match status {
            GameStatus::Won(Mark::X) => x_wins += 1,
            GameStatus::Won(_) => o_wins += 1,
            _ => draws += 1,
        }
        info!(game = n + 1, moves = game.move_count(), result = %describe(status), "self-play game finished");

        if !quiet {
            println!("{}", game.board());
            println!("Game {}: {}\n", n + 1, describe(status));
        }
    }

    println!("X wins: {x_wins}, O wins: {o_wins}, draws: {draws}");
    Ok(())
}

fn print_levels(config: &EngineConfig) {
    println!("{:<6} {:<12} {:>5} {:>10}", "Level", "Strategy", "Depth", "Budget");
    for (i, tier) in config.tiers.iter().enumerate() {
        let depth = if tier.strategy == kinarow::Strategy::DeepSearch {
            tier.depth.to_string()
        } else {
            "-".to_string()
        };
        let budget = if tier.strategy.is_timed() {
            format!("{} ms", tier.time_budget_ms)
        } else {
            "-".to_string()
        };
        println!("{:<6} {:<12} {:>5} {:>10}", i + 1, tier.strategy.name(), depth, budget);
    }

    println!("\nVariants:");
    for variant in Variant::ALL {
        println!("  {:<8} {}", variant.name(), variant.description());
    }
}
