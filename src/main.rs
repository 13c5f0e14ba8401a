//! Shape Board
//!
//! Headless front end for the shape board engine. Lists the built-in pieces
//! and challenges, and plays text command scripts against a fresh engine.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::builder::RangedU64ValueParser;
use clap::{Args, Parser, Subcommand};

use shapeboard::challenge::{challenge_by_id, ChallengeId, CHALLENGES};
use shapeboard::config::{DEFAULT_BOARD_SIZE, DEFAULT_CELL_SIZE, MAX_BOARD_SIZE};
use shapeboard::pieces::{build_catalog, SHAPES};
use shapeboard::{script, Config, EngineState};

/// Builds shapes from polyomino pieces on a square board.
#[derive(Parser)]
#[command(name = "shapeboard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    board: BoardArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Args)]
struct BoardArgs {
    /// Number of cells per board side.
    #[arg(
        long,
        global = true,
        default_value_t = DEFAULT_BOARD_SIZE,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_BOARD_SIZE as u64),
    )]
    board_size: usize,
    /// Pixels per cell, used by `drop` commands.
    #[arg(long, global = true, default_value_t = DEFAULT_CELL_SIZE)]
    cell_size: u32,
}

#[derive(Subcommand)]
enum Command {
    /// List the pieces in the master catalog.
    Shapes,
    /// List the built-in challenges.
    Challenges,
    /// Print the target of one challenge.
    Show {
        /// Challenge id.
        id: u32,
    },
    /// Run a command script and print the final state.
    Play {
        /// Script file; reads standard input when omitted.
        #[arg(long)]
        script: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    better_panic::install();
    env_logger::init();

    let cli = Cli::parse();
    let config = Config {
        board_size: cli.board.board_size,
        cell_size: cli.board.cell_size,
    };

    let result = match cli.command {
        Some(Command::Shapes) => run_shapes(),
        Some(Command::Challenges) => {
            run_challenges();
            Ok(())
        }
        Some(Command::Show { id }) => run_show(config, ChallengeId(id)),
        Some(Command::Play { script }) => run_play(config, script),
        None => run_play(config, None),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

/// Prints every catalog piece with its pattern.
fn run_shapes() -> Result<(), String> {
    let pieces = build_catalog(SHAPES).map_err(|e| e.to_string())?;
    for piece in pieces {
        println!("piece {} ({}):", piece.id, piece.color);
        print!("{}", piece.pattern);
        println!();
    }
    Ok(())
}

/// Prints the challenge list.
fn run_challenges() {
    for challenge in CHALLENGES {
        println!(
            "{:>2}  {:<10} {:<6}  {}",
            challenge.id, challenge.name, challenge.difficulty, challenge.description
        );
    }
}

/// Prints a challenge target.
fn run_show(config: Config, id: ChallengeId) -> Result<(), String> {
    let challenge = challenge_by_id(id).ok_or_else(|| format!("No challenge with id {id}"))?;
    let target = challenge
        .target_board(config.board_size)
        .map_err(|e| format!("Challenge {id} cannot be shown: {e}"))?;
    println!("{} ({}): {}", challenge.name, challenge.difficulty, challenge.description);
    print!("{target}");
    Ok(())
}

/// Runs a script against a fresh engine and prints the final state.
fn run_play(config: Config, path: Option<PathBuf>) -> Result<(), String> {
    let source = match path {
        Some(path) => std::fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?,
        None => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .map_err(|e| format!("Failed to read stdin: {e}"))?;
            source
        }
    };

    let mut engine = EngineState::new(config, SHAPES).map_err(|e| e.to_string())?;
    let mut stdout = io::stdout().lock();
    script::run(&mut engine, &source, &mut stdout).map_err(|e| e.to_string())?;
    print!("{}", script::describe(&engine));
    Ok(())
}
