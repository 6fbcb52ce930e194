// crates/jsonlogic-asp-clingo/src/solver.rs
// ============================================================================
// Module: Solver Invocation
// Description: Text-in/text-out contract with the clingo binary.
// Purpose: Write programs to temp files, run the solver process, and parse
//          its stdout into a status plus satisfied rule tokens.
// Dependencies: tempfile, tracing
// ============================================================================

//! ## Overview
//! The solving contract is deliberately narrow: feed full program text, get
//! back a status in `{Satisfiable, Unsatisfiable, Error}` plus, when
//! satisfiable, the ground `rule/1` tokens holding in the first reported
//! answer set. Every invocation failure (spawn error, non-UTF-8 output,
//! unrecognized output shape) maps to [`SolveStatus::Error`] with an empty
//! token set; nothing here returns a Rust error.
//!
//! clingo signals satisfiability through its exit code as well as stdout,
//! and its exit codes are nonzero even on success, so only stdout is
//! consulted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

use tempfile::Builder;
use tracing::debug;
use tracing::warn;

// ============================================================================
// SECTION: Outcome Types
// ============================================================================

/// Terminal status of one solve call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// The program has at least one stable model.
    Satisfiable,
    /// The program has no stable model.
    Unsatisfiable,
    /// The solver could not be run or produced unrecognizable output.
    Error,
}

/// Result of one solve call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveOutcome {
    /// Terminal status.
    pub status: SolveStatus,
    /// Tokens of the `rule/1` atoms holding in the first answer set; empty
    /// unless the status is [`SolveStatus::Satisfiable`].
    pub matched_tokens: Vec<String>,
}

impl SolveOutcome {
    /// An error outcome with no tokens.
    #[must_use]
    pub const fn error() -> Self {
        Self {
            status: SolveStatus::Error,
            matched_tokens: Vec::new(),
        }
    }
}

// ============================================================================
// SECTION: Solver Contract
// ============================================================================

/// Text-in/text-out answer-set solving contract.
pub trait AnswerSetSolver {
    /// Solves the given program text.
    fn solve(&self, program: &str) -> SolveOutcome;
}

// ============================================================================
// SECTION: Clingo Solver
// ============================================================================

/// Solver backed by an external `clingo` process.
///
/// # Invariants
/// - Each solve call owns its temp file; the file is removed when the call
///   returns (best effort, via drop).
#[derive(Debug, Clone)]
pub struct ClingoSolver {
    /// Path or name of the solver binary.
    binary: PathBuf,
}

impl ClingoSolver {
    /// Creates a solver that resolves `clingo` through `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("clingo"),
        }
    }

    /// Creates a solver with an explicit binary path.
    #[must_use]
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Parses clingo stdout into an outcome.
    ///
    /// Recognizes the `SATISFIABLE`/`UNSATISFIABLE` marker lines and, when
    /// satisfiable, collects `rule(<token>)` atoms from the first answer
    /// set. Output without either marker maps to an error outcome.
    #[must_use]
    pub fn parse_output(stdout: &str) -> SolveOutcome {
        let mut status = None;
        let mut tokens: Vec<String> = Vec::new();
        let mut answered = false;
        let mut lines = stdout.lines();

        while let Some(line) = lines.next() {
            match line.trim() {
                "SATISFIABLE" => {
                    status.get_or_insert(SolveStatus::Satisfiable);
                }
                "UNSATISFIABLE" => {
                    status.get_or_insert(SolveStatus::Unsatisfiable);
                }
                trimmed if trimmed.starts_with("Answer:") && !answered => {
                    answered = true;
                    let Some(model) = lines.next() else {
                        break;
                    };
                    tokens = model
                        .split_whitespace()
                        .filter_map(|atom| {
                            atom.strip_prefix("rule(")
                                .and_then(|rest| rest.strip_suffix(')'))
                                .map(ToString::to_string)
                        })
                        .collect();
                }
                _ => {}
            }
        }

        match status {
            Some(SolveStatus::Satisfiable) => SolveOutcome {
                status: SolveStatus::Satisfiable,
                matched_tokens: tokens,
            },
            Some(status) => SolveOutcome {
                status,
                matched_tokens: Vec::new(),
            },
            None => SolveOutcome::error(),
        }
    }
}

impl Default for ClingoSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl AnswerSetSolver for ClingoSolver {
    fn solve(&self, program: &str) -> SolveOutcome {
        let file = Builder::new().suffix(".lp").tempfile();
        let Ok(mut file) = file else {
            warn!("failed to create solver input file");
            return SolveOutcome::error();
        };
        if writeln!(file, "{program}").is_err() {
            warn!("failed to write solver input file");
            return SolveOutcome::error();
        }

        let output = Command::new(&self.binary).arg(file.path()).output();
        let Ok(output) = output else {
            warn!(binary = %self.binary.display(), "failed to spawn solver process");
            return SolveOutcome::error();
        };
        let Ok(stdout) = String::from_utf8(output.stdout) else {
            warn!("solver produced non-UTF-8 output");
            return SolveOutcome::error();
        };

        let outcome = Self::parse_output(&stdout);
        debug!(
            status = ?outcome.status,
            matched = outcome.matched_tokens.len(),
            "solver run finished"
        );
        outcome
    }
}
