// crates/jsonlogic-asp-core/src/ident.rs
// ============================================================================
// Module: Identifier Utilities
// Description: Unique node identifiers and deterministic constant tokens.
// Purpose: Provide solver-safe identifiers for nodes and arbitrary strings.
// Dependencies: md5, ulid
// ============================================================================

//! ## Overview
//! Two kinds of identifiers flow through compiled programs. Node identifiers
//! are fresh per node and only need to be unique; constant tokens are a pure
//! function of their input string and must be stable across processes so that
//! independently compiled rule and data programs agree on variable naming.
//!
//! Both forms start with a lowercase letter so that they lex as ASP constants
//! rather than variables or reserved words.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use ulid::Ulid;

// ============================================================================
// SECTION: Node Identifier
// ============================================================================

/// Opaque identifier assigned to a rule node at construction.
///
/// # Invariants
/// - Lexes as an ASP constant (lowercase letter followed by alphanumerics).
/// - Never participates in structural hashing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Generates a fresh, collision-resistant node identifier.
///
/// No two calls in the same process return equal values; across processes
/// collisions are practically impossible (ULID randomness).
#[must_use]
pub fn generate_unique_id() -> NodeId {
    NodeId(format!("n{}", Ulid::new().to_string().to_lowercase()))
}

// ============================================================================
// SECTION: Constant Tokens
// ============================================================================

/// Derives a deterministic solver-safe constant token for a string.
///
/// The token is `"s"` followed by the 32-hex-digit md5 of the input bytes.
/// It is a pure function of its input: repeated calls, in any process, yield
/// the same token, which is what lets rule programs and data programs agree
/// on variable naming without sharing state.
#[must_use]
pub fn constant_token(input: &str) -> String {
    format!("s{:x}", md5::compute(input.as_bytes()))
}
