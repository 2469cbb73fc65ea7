//! uttt - command-line front end for the ultimate tic-tac-toe engine.
//!
//! Replays move lists, prints boards and legal moves, and checks config
//! files. Logging goes to stderr and is controlled by `RUST_LOG`.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use cli::{Cli, Command};
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;
use ultimate_tictactoe::{EngineConfig, Mark, Position, UltimateBoard};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Replay { moves, first, json } => run_replay(&moves, first.into(), json),
        Command::Legal { moves, first } => run_legal(&moves, first.into()),
        Command::Config { config } => run_config(&config),
    }
}

/// Parses `SUB:CELL` into a pair of positions.
fn parse_move(text: &str) -> Result<(Position, Position)> {
    let (sub, cell) = text
        .split_once(':')
        .ok_or_else(|| anyhow!("Move {text:?} is not in SUB:CELL form"))?;
    let sub = sub
        .parse::<Position>()
        .with_context(|| format!("Bad sub-board in move {text:?}"))?;
    let cell = cell
        .parse::<Position>()
        .with_context(|| format!("Bad cell in move {text:?}"))?;
    Ok((sub, cell))
}

/// Applies moves in order, alternating marks from `first`.
#[instrument(skip(moves), fields(count = moves.len()))]
fn replay(moves: &[String], first: Mark) -> Result<UltimateBoard> {
    let mut board = UltimateBoard::new(first);
    for (n, text) in moves.iter().enumerate() {
        let (sub, cell) = parse_move(text)?;
        let mark = board.current_turn();
        if let Err(rejection) = board.apply_move(mark, sub, cell) {
            bail!("Move {} ({text}) by {mark} rejected: {rejection}", n + 1);
        }
        debug!(n, %mark, %sub, %cell, "Applied");
    }
    info!(outcome = %board.outcome(), "Replay finished");
    Ok(board)
}

fn run_replay(moves: &[String], first: Mark, json: bool) -> Result<()> {
    let board = replay(moves, first)?;
    let snapshot = board.snapshot();
    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{snapshot}");
    }
    Ok(())
}

fn run_legal(moves: &[String], first: Mark) -> Result<()> {
    let board = replay(moves, first)?;
    let legal = board.legal_moves();
    if legal.is_empty() {
        println!("No legal moves: {}", board.outcome());
        return Ok(());
    }
    for (sub, cell) in legal {
        println!("{}:{}  ({} / {})", sub.to_index(), cell.to_index(), sub, cell);
    }
    Ok(())
}

fn run_config(path: &std::path::Path) -> Result<()> {
    let config = EngineConfig::from_file(path)?;
    println!("first_mover = {}", config.first_mover());
    match config.seed() {
        Some(seed) => println!("seed = {seed}"),
        None => println!("seed = (entropy)"),
    }
    Ok(())
}
