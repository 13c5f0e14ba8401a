//! Text command scripts for driving the engine without a UI.
//!
//! One command per line; blank lines and `#` comments are skipped:
//!
//! ```text
//! challenge 1
//! place 0 10 4
//! rotate placed 0
//! board
//! ```

use std::fmt::Write as _;
use std::io::{self, Write};
use std::str::{FromStr, SplitWhitespace};

use crate::challenge::ChallengeId;
use crate::engine::{Command, EngineState, Screen};
use crate::grid::format_placed;
use crate::pieces::PieceId;
use crate::registry::Scope;

/// A parsed script line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptCommand {
    Engine(Command),
    /// Drop a piece at a pointer position in pixels.
    Drop { id: PieceId, px: f64, py: f64 },
    /// Print the current state.
    Board,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ScriptError {
    #[display("unknown command {name:?}")]
    UnknownCommand { name: String },
    #[display("{command}: missing {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[display("{command}: cannot parse {value:?} as {argument}")]
    InvalidArgument {
        command: &'static str,
        argument: &'static str,
        value: String,
    },
    #[display("{command}: unexpected argument {value:?}")]
    TrailingArgument { command: &'static str, value: String },
}

/// Pulls typed arguments off a whitespace-split line.
struct Args<'a> {
    command: &'static str,
    words: SplitWhitespace<'a>,
}

impl<'a> Args<'a> {
    fn new(command: &'static str, words: SplitWhitespace<'a>) -> Self {
        Self { command, words }
    }

    fn arg<T: FromStr>(&mut self, argument: &'static str) -> Result<T, ScriptError> {
        let value = self.words.next().ok_or(ScriptError::MissingArgument {
            command: self.command,
            argument,
        })?;
        value.parse().map_err(|_| ScriptError::InvalidArgument {
            command: self.command,
            argument,
            value: value.to_owned(),
        })
    }

    fn piece(&mut self) -> Result<PieceId, ScriptError> {
        self.arg("piece id").map(PieceId)
    }

    fn finish<T>(mut self, parsed: T) -> Result<T, ScriptError> {
        match self.words.next() {
            Some(value) => Err(ScriptError::TrailingArgument {
                command: self.command,
                value: value.to_owned(),
            }),
            None => Ok(parsed),
        }
    }
}

impl FromStr for ScriptCommand {
    type Err = ScriptError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or_default();

        let parsed = match name {
            "rotate" => {
                let mut args = Args::new("rotate", words);
                let scope = match args.arg::<String>("scope")?.as_str() {
                    "available" => Scope::Available,
                    "placed" => Scope::Placed,
                    other => {
                        return Err(ScriptError::InvalidArgument {
                            command: "rotate",
                            argument: "scope",
                            value: other.to_owned(),
                        })
                    }
                };
                let id = args.piece()?;
                args.finish(Self::Engine(Command::Rotate { scope, id }))?
            }
            "place" => {
                let mut args = Args::new("place", words);
                let (id, x, y) = (args.piece()?, args.arg("x")?, args.arg("y")?);
                args.finish(Self::Engine(Command::Place { id, x, y }))?
            }
            "move" => {
                let mut args = Args::new("move", words);
                let (id, x, y) = (args.piece()?, args.arg("x")?, args.arg("y")?);
                args.finish(Self::Engine(Command::Move { id, x, y }))?
            }
            "remove" => {
                let mut args = Args::new("remove", words);
                let id = args.piece()?;
                args.finish(Self::Engine(Command::Remove { id }))?
            }
            "drop" => {
                let mut args = Args::new("drop", words);
                let id = args.piece()?;
                let px = args.arg("px")?;
                let py = args.arg("py")?;
                args.finish(Self::Drop { id, px, py })?
            }
            "challenge" => {
                let mut args = Args::new("challenge", words);
                let id = args.arg("challenge id").map(ChallengeId)?;
                args.finish(Self::Engine(Command::StartChallenge(id)))?
            }
            "reset" => Args::new("reset", words).finish(Self::Engine(Command::Reset))?,
            "free" => Args::new("free", words).finish(Self::Engine(Command::ExitToFreeMode))?,
            "menu" => Args::new("menu", words).finish(Self::Engine(Command::ReturnToMenu))?,
            "board" => Args::new("board", words).finish(Self::Board)?,
            _ => {
                return Err(ScriptError::UnknownCommand {
                    name: name.to_owned(),
                })
            }
        };
        Ok(parsed)
    }
}

/// Parses one script line. Blank lines and comments yield `None`.
///
/// # Errors
///
/// Returns [`ScriptError`] if the line is not a valid command.
pub fn parse_line(line: &str) -> Result<Option<ScriptCommand>, ScriptError> {
    let line = line.split_once('#').map_or(line, |(code, _)| code).trim();
    if line.is_empty() {
        return Ok(None);
    }
    line.parse().map(Some)
}

/// Describes the engine state: screen, challenge status, board and the
/// pieces still available.
pub fn describe(engine: &EngineState) -> String {
    let mut output = String::new();
    match engine.screen() {
        Screen::Menu => output.push_str("screen: menu\n"),
        Screen::Free => output.push_str("screen: free build\n"),
        Screen::Challenge(active) => {
            let challenge = active.challenge;
            let _ = writeln!(
                output,
                "screen: challenge {} \"{}\" ({}) - {}",
                challenge.id, challenge.name, challenge.difficulty, active.status
            );
        }
    }

    output.push_str(&format_placed(engine.config().board_size, engine.placed()));

    let available: Vec<String> = engine
        .available()
        .iter()
        .map(|piece| format!("{}:{}@{}", piece.id, piece.color, piece.rotation.degrees()))
        .collect();
    let _ = writeln!(output, "available: {}", available.join(" "));
    output
}

/// Runs every line of `source` against `engine`, writing board dumps and
/// per-line errors to `out`. Failed lines are reported and skipped.
pub fn run(engine: &mut EngineState, source: &str, out: &mut impl Write) -> io::Result<()> {
    for (index, line) in source.lines().enumerate() {
        let line_number = index + 1;
        let command = match parse_line(line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(out, "line {line_number}: {err}")?;
                continue;
            }
        };

        let result = match command {
            ScriptCommand::Engine(command) => engine.apply(command),
            ScriptCommand::Drop { id, px, py } => engine.drop_at_pixel(id, px, py),
            ScriptCommand::Board => {
                write!(out, "{}", describe(engine))?;
                Ok(())
            }
        };
        if let Err(err) = result {
            log::debug!("line {line_number} ignored: {err}");
            writeln!(out, "line {line_number}: {err}")?;
        }
    }
    Ok(())
}
