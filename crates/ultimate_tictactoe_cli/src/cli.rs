//! Command-line interface for uttt.

use clap::{Parser, Subcommand, ValueEnum};
use ultimate_tictactoe::Mark;

/// uttt - replay and inspect ultimate tic-tac-toe games
#[derive(Parser, Debug)]
#[command(name = "uttt")]
#[command(about = "Replay and inspect ultimate tic-tac-toe games", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay moves and print the resulting board
    Replay {
        /// Moves as SUB:CELL, indices 0-8 or labels (e.g. 4:0 or center:top-left)
        #[arg(required = true)]
        moves: Vec<String>,

        /// Mark that moves first
        #[arg(long, value_enum, default_value = "x")]
        first: FirstMark,

        /// Print the snapshot as JSON instead of a text grid
        #[arg(long)]
        json: bool,
    },

    /// Replay moves and list the legal replies
    Legal {
        /// Moves as SUB:CELL (may be empty for the opening position)
        moves: Vec<String>,

        /// Mark that moves first
        #[arg(long, value_enum, default_value = "x")]
        first: FirstMark,
    },

    /// Validate an engine config file and print it
    Config {
        /// Path to the TOML config file
        #[arg(short, long, default_value = "uttt.toml")]
        config: std::path::PathBuf,
    },
}

/// Mark selectable on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirstMark {
    /// X moves first
    X,
    /// O moves first
    O,
}

impl From<FirstMark> for Mark {
    fn from(value: FirstMark) -> Self {
        match value {
            FirstMark::X => Mark::X,
            FirstMark::O => Mark::O,
        }
    }
}
