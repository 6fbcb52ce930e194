// crates/jsonlogic-asp-core/src/error.rs
// ============================================================================
// Module: Compiler Errors
// Description: Construction-time and parse-time error taxonomy.
// Purpose: Fail fast with descriptive diagnostics; no partial nodes.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! All compile-time errors are unrecoverable for the subtree being built and
//! propagate immediately; there is no best-effort compilation. Solve-time
//! failures are deliberately not represented here; the façade collapses
//! them into an empty match set.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Node Errors
// ============================================================================

/// Node construction errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum NodeError {
    /// Wrong arity, primitive type, or nested-node kind for a node variant.
    #[error("{node} received unexpected operand: {details}")]
    InvalidOperandShape {
        /// The node variant that rejected the operand.
        node: &'static str,
        /// Description of the offending operand.
        details: String,
    },
}

// ============================================================================
// SECTION: Parse Errors
// ============================================================================

/// Rule-tree parse errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Operator key is in neither the built-in nor the custom operator table,
    /// or is enumerated but has no compiler support.
    #[error("unsupported operator: {operator}")]
    UnsupportedOperator {
        /// The unrecognized or uncompilable operator key.
        operator: String,
    },
    /// Rule-tree node is not a single-key object.
    #[error("rule tree node must be a single-key object, found {found}")]
    MalformedNode {
        /// Short description of what was found instead.
        found: String,
    },
    /// Node construction rejected its operands.
    #[error(transparent)]
    Node(#[from] NodeError),
}
