//! Nhac Nhac engine harness
//!
//! Runs the search without a human at the keyboard:
//! - `nhac selfplay` plays the engine against itself
//! - `nhac analyze` searches the opening position and reports the choice

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use nhac_engine::render::{player_name, render_board, render_move};
use nhac_engine::{Board, EngineConfig, Move, Player, SearchOutcome, Searcher};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "nhac")]
#[command(about = "Negamax engine for Nhac Nhac (stacking tic-tac-toe)", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Search depth in plies (overrides the config file)
    #[arg(long, global = true)]
    depth: Option<u8>,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play the engine against itself
    Selfplay {
        /// Plies before the game is called a draw
        #[arg(long)]
        max_turns: Option<u32>,

        /// Player moving first
        #[arg(long, value_enum)]
        first: Option<Side>,
    },

    /// Search the opening position and report the chosen move
    Analyze {
        /// Player to search for
        #[arg(long, value_enum, default_value = "orange")]
        player: Side,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Side {
    Orange,
    Blue,
}

impl From<Side> for Player {
    fn from(side: Side) -> Self {
        match side {
            Side::Orange => Player::Orange,
            Side::Blue => Player::Blue,
        }
    }
}

/// Result of a self-play game.
#[derive(Debug, Serialize)]
struct GameRecord {
    first: Player,
    moves: Vec<Move>,
    winner: Option<Player>,
    final_board: Board,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(depth) = cli.depth {
        config.search.depth = depth;
    }

    match cli.command {
        Command::Selfplay { max_turns, first } => {
            if let Some(max_turns) = max_turns {
                config.max_turns = max_turns;
            }
            if let Some(first) = first {
                config.first = first.into();
            }
            config.validate()?;
            let record = selfplay(&config, cli.json)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            }
        }
        Command::Analyze { player } => {
            config.validate()?;
            let outcome = analyze(&config, player.into(), cli.json);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            }
        }
    }

    Ok(())
}

fn selfplay(config: &EngineConfig, quiet: bool) -> Result<GameRecord> {
    let mut searcher = Searcher::new(config.search);
    let mut board = Board::new();
    let mut player = config.first;
    let mut moves = Vec::new();
    let start = Instant::now();

    info!(depth = config.search.depth, first = ?player, "starting self-play");

    while board.winner().is_none() && moves.len() < config.max_turns as usize {
        if !quiet {
            println!("\n{}", render_board(&board));
            println!("Turn {}: {} to move", moves.len() + 1, player_name(player));
        }

        let Some(mov) = searcher.best_move(&board, player) else {
            info!(player = ?player, "no legal move, stopping");
            break;
        };

        board = board
            .apply(mov)
            .with_context(|| format!("engine produced an illegal move {mov:?}"))?;
        debug!(turn = moves.len() + 1, mov = %render_move(&mov), "move played");
        if !quiet {
            println!("> {}", render_move(&mov));
        }

        moves.push(mov);
        player = player.opponent();
    }

    let winner = board.winner();
    info!(
        plies = moves.len(),
        winner = ?winner,
        secs = start.elapsed().as_secs_f64(),
        "game over"
    );

    if !quiet {
        println!("\n{}", render_board(&board));
        match winner {
            Some(p) => println!("Winner: {}", player_name(p)),
            None => println!("No winner after {} plies.", moves.len()),
        }
    }

    Ok(GameRecord {
        first: config.first,
        moves,
        winner,
        final_board: board,
    })
}

fn analyze(config: &EngineConfig, player: Player, quiet: bool) -> SearchOutcome {
    let mut searcher = Searcher::new(config.search);
    let outcome = searcher.search(&Board::new(), player);
    if quiet {
        return outcome;
    }

    println!("Depth: {}", config.search.depth);
    match &outcome.best_move {
        Some(mov) => println!("Best move: {}", render_move(mov)),
        None => println!("Best move: none"),
    }
    println!("Score: {}", outcome.score);
    println!("Nodes: {}", outcome.stats.nodes);
    println!("Cutoffs: {}", outcome.stats.cutoffs);
    println!("Pruned: {:.1}%", outcome.stats.pruned_pct());
    println!("Time: {:.2}s", outcome.stats.elapsed.as_secs_f64());

    outcome
}
