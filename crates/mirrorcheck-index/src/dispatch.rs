//! Command dispatch from flat argument lists to checker capabilities.

use std::path::PathBuf;

use thiserror::Error;

use mirrorcheck_core::IndexError;

use crate::checker::ConsistencyChecker;
use crate::report::IndexReport;

/// Operations a checker can be asked to perform.
///
/// One arm per supported command; each knows its wire name and the
/// number of positional arguments it consumes. The set is fixed at
/// compile time and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Index a sector: library name, sector name, sector path.
    IndexSector,
}

impl Command {
    /// All supported commands.
    pub const ALL: &'static [Command] = &[Command::IndexSector];

    /// Wire name used on the command surface.
    pub fn name(self) -> &'static str {
        match self {
            Command::IndexSector => "indexSector",
        }
    }

    /// Number of positional arguments the command expects.
    pub fn arity(self) -> usize {
        match self {
            Command::IndexSector => 3,
        }
    }

    /// Look a command up by its wire name.
    pub fn from_name(name: &str) -> Option<Command> {
        Command::ALL.iter().copied().find(|c| c.name() == name)
    }
}

/// Dispatch failures, surfaced before or while invoking a capability.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The command name is not in the registry.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Fewer positional arguments than the command's arity.
    #[error("{command} expects {expected} arguments, got {got}")]
    BadArity {
        command: &'static str,
        expected: usize,
        got: usize,
    },

    /// The capability itself failed; propagated unchanged.
    #[error(transparent)]
    Check(#[from] IndexError),
}

/// Result of a successfully dispatched command.
#[derive(Debug)]
pub enum Outcome {
    /// An `indexSector` run completed.
    Indexed(IndexReport),
}

/// Resolve `name`, unpack `args`, and invoke the matching capability
/// on `checker`.
///
/// Unknown names and short argument lists fail before any capability
/// is invoked; capability results are propagated unchanged.
pub fn dispatch(
    name: &str,
    args: &[String],
    checker: &dyn ConsistencyChecker,
) -> Result<Outcome, DispatchError> {
    let command =
        Command::from_name(name).ok_or_else(|| DispatchError::UnknownCommand(name.to_string()))?;
    if args.len() < command.arity() {
        return Err(DispatchError::BadArity {
            command: command.name(),
            expected: command.arity(),
            got: args.len(),
        });
    }

    match command {
        Command::IndexSector => {
            let sector_path = PathBuf::from(&args[2]);
            let report = checker.index_sector(&args[0], &args[1], &sector_path)?;
            Ok(Outcome::Indexed(report))
        }
    }
}
