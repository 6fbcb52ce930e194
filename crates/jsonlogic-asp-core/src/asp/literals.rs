// crates/jsonlogic-asp-core/src/asp/literals.rs
// ============================================================================
// Module: ASP Literals
// Description: Predicate atoms and comparator expressions.
// Purpose: Model the smallest compiled units used as heads and body literals.
// Dependencies: none beyond std
// ============================================================================

//! ## Overview
//! A literal is either a predicate application (`name(t1, t2)`, optionally
//! negated with the textual prefix `not `) or an infix comparator expression
//! (`V1 < 3`). Literals are always produced fresh from a node and never
//! shared or mutated afterwards.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

// ============================================================================
// SECTION: Predicate Atom
// ============================================================================

/// A predicate application usable as a statement head or body literal.
///
/// # Invariants
/// - `predicate` and every term lex as valid ASP tokens; callers are
///   responsible for encoding raw values before constructing terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredicateAtom {
    /// Predicate name.
    pub predicate: String,
    /// Ordered term tokens; empty renders the bare predicate name.
    pub terms: Vec<String>,
    /// Whether the literal carries the `not ` negation-as-failure prefix.
    pub negated: bool,
}

impl PredicateAtom {
    /// Creates a positive predicate atom.
    #[must_use]
    pub fn new(predicate: impl Into<String>, terms: Vec<String>) -> Self {
        Self {
            predicate: predicate.into(),
            terms,
            negated: false,
        }
    }

    /// Returns a copy of this atom with the negation flag flipped.
    #[must_use]
    pub fn negated(&self) -> Self {
        Self {
            predicate: self.predicate.clone(),
            terms: self.terms.clone(),
            negated: !self.negated,
        }
    }
}

impl fmt::Display for PredicateAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            f.write_str("not ")?;
        }
        f.write_str(&self.predicate)?;
        if !self.terms.is_empty() {
            write!(f, "({})", self.terms.join(", "))?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Comparator Atom
// ============================================================================

/// An infix comparator expression between two term tokens.
///
/// # Invariants
/// - `left` and `right` are already-encoded tokens or logic variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparatorAtom {
    /// Left-hand term token or variable.
    pub left: String,
    /// Comparator text (`==`, `!=`, `<`, `<=`, `>`, `>=`, `=`).
    pub comparator: String,
    /// Right-hand term token, variable, or tuple literal.
    pub right: String,
}

impl ComparatorAtom {
    /// Creates a comparator expression.
    #[must_use]
    pub fn new(
        left: impl Into<String>,
        comparator: impl Into<String>,
        right: impl Into<String>,
    ) -> Self {
        Self {
            left: left.into(),
            comparator: comparator.into(),
            right: right.into(),
        }
    }
}

impl fmt::Display for ComparatorAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.comparator, self.right)
    }
}

// ============================================================================
// SECTION: Literal
// ============================================================================

/// The smallest compileable unit appearing in rule bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// Predicate application literal.
    Predicate(PredicateAtom),
    /// Infix comparator literal.
    Comparator(ComparatorAtom),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Predicate(atom) => atom.fmt(f),
            Self::Comparator(atom) => atom.fmt(f),
        }
    }
}

impl From<PredicateAtom> for Literal {
    fn from(value: PredicateAtom) -> Self {
        Self::Predicate(value)
    }
}

impl From<ComparatorAtom> for Literal {
    fn from(value: ComparatorAtom) -> Self {
        Self::Comparator(value)
    }
}
