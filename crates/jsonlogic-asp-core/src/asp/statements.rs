// crates/jsonlogic-asp-core/src/asp/statements.rs
// ============================================================================
// Module: ASP Statements
// Description: Facts, rules, and directives with optional comments.
// Purpose: Render compiled node output to single lines of program text.
// Dependencies: crate::asp::literals
// ============================================================================

//! ## Overview
//! A statement is one line of the target program: `atom.` (fact),
//! `head :- lit, lit.` (rule), or `#action text.` (directive). Facts and
//! rules may carry a human-readable comment that renders as a separate
//! `% comment` line when comment emission is enabled.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::asp::literals::Literal;
use crate::asp::literals::PredicateAtom;

// ============================================================================
// SECTION: Statement
// ============================================================================

/// A single line of the compiled logic program.
///
/// # Invariants
/// - Immutable once produced by a node's compile step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// Unconditional fact: `atom.`
    Fact {
        /// The asserted atom.
        atom: PredicateAtom,
        /// Optional informational comment.
        comment: Option<String>,
    },
    /// Horn-like rule: `head :- lit, lit.`
    Rule {
        /// Head atom derived when the body holds.
        head: PredicateAtom,
        /// Ordered body literals (conjunction).
        body: Vec<Literal>,
        /// Optional informational comment.
        comment: Option<String>,
    },
    /// Solver directive: `#action text.`
    Directive {
        /// Directive action name (e.g. `show`).
        action: String,
        /// Directive argument text.
        text: String,
    },
}

impl Statement {
    /// Creates a fact statement without a comment.
    #[must_use]
    pub const fn fact(atom: PredicateAtom) -> Self {
        Self::Fact {
            atom,
            comment: None,
        }
    }

    /// Creates a rule statement without a comment.
    #[must_use]
    pub const fn rule(head: PredicateAtom, body: Vec<Literal>) -> Self {
        Self::Rule {
            head,
            body,
            comment: None,
        }
    }

    /// Creates a rule statement carrying a comment.
    #[must_use]
    pub fn rule_with_comment(
        head: PredicateAtom,
        body: Vec<Literal>,
        comment: impl Into<String>,
    ) -> Self {
        Self::Rule {
            head,
            body,
            comment: Some(comment.into()),
        }
    }

    /// Creates a `#show predicate/arity.` directive.
    #[must_use]
    pub fn show(predicate: &str, arity: usize) -> Self {
        Self::Directive {
            action: "show".to_string(),
            text: format!("{predicate}/{arity}"),
        }
    }

    /// Renders the statement to one line of program text.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Fact { atom, .. } => format!("{atom}."),
            Self::Rule { head, body, .. } => {
                let literals: Vec<String> = body.iter().map(ToString::to_string).collect();
                format!("{head} :- {}.", literals.join(", "))
            }
            Self::Directive { action, text } => format!("#{action} {text}."),
        }
    }

    /// Renders the comment as a `% comment` line, when present.
    #[must_use]
    pub fn comment_line(&self) -> Option<String> {
        match self {
            Self::Fact { comment, .. } | Self::Rule { comment, .. } => {
                comment.as_ref().map(|c| format!("% {c}"))
            }
            Self::Directive { .. } => None,
        }
    }
}
