// crates/jsonlogic-asp-core/src/node/data.rs
// ============================================================================
// Module: Data Nodes
// Description: Variable reference and missing-field check nodes.
// Purpose: Bridge rule trees to the `var/2` facts supplied by data records.
// Dependencies: crate::{asp, error, ident, node}
// ============================================================================

//! ## Overview
//! `var` nodes are referenced, never defined, by the rule program: the
//! matching `var(token, value)` facts come from the compiled data record.
//! `missing` nodes invert that relationship and hold exactly when none of
//! their named variables appear in the data.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::collections::hash_map::DefaultHasher;
use std::hash::Hash;
use std::hash::Hasher;

use crate::asp::Literal;
use crate::asp::PredicateAtom;
use crate::asp::Statement;
use crate::error::NodeError;
use crate::ident::NodeId;
use crate::ident::constant_token;
use crate::ident::generate_unique_id;
use crate::node::Operand;
use crate::node::combine_fingerprint;
use crate::value::Primitive;

/// Term variable a `var` node binds its value to by default.
const VAR_TERM_VARIABLE: &str = "V";

/// Anonymous term variable used when only presence matters.
const ANY_TERM_VARIABLE: &str = "_";

// ============================================================================
// SECTION: Variable Reference
// ============================================================================

/// Reference to a flattened data field.
///
/// # Invariants
/// - Compiles to no statements of its own; data records supply the facts.
#[derive(Debug)]
pub struct VarNode {
    /// Unique node identifier (not part of the atom; kept for parity with
    /// the shared node contract and diagnostics).
    node_id: NodeId,
    /// Flattened key path this reference names.
    var_name: String,
    /// Structural fingerprint.
    fingerprint: u64,
}

impl VarNode {
    /// Builds a variable reference from its operand list.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::InvalidOperandShape`] unless the operand is a
    /// single string.
    pub fn new(operands: Vec<Operand>) -> Result<Self, NodeError> {
        let mut operands = operands;
        let name = match (operands.len(), operands.pop()) {
            (1, Some(Operand::Value(Primitive::Str(name)))) => name,
            (_, operand) => {
                return Err(NodeError::InvalidOperandShape {
                    node: "var",
                    details: operand.map_or_else(
                        || "empty operand list".to_string(),
                        |op| format!("expected a single string, received {}", op.describe()),
                    ),
                });
            }
        };

        let fingerprint = combine_fingerprint("var", &[string_fingerprint(&name)]);
        Ok(Self {
            node_id: generate_unique_id(),
            var_name: name,
            fingerprint,
        })
    }

    /// The referenced key path.
    #[must_use]
    pub fn var_name(&self) -> &str {
        &self.var_name
    }

    /// Unique node identifier.
    #[must_use]
    pub const fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    /// `var(token, V)`: the reference bound to its default variable.
    #[must_use]
    pub fn atom(&self) -> PredicateAtom {
        self.atom_with_variable(VAR_TERM_VARIABLE, false)
    }

    /// The reference with its output rebound to a caller-local variable.
    #[must_use]
    pub fn atom_with_variable(&self, variable: &str, negated: bool) -> PredicateAtom {
        PredicateAtom {
            predicate: "var".to_string(),
            terms: vec![constant_token(&self.var_name), variable.to_string()],
            negated,
        }
    }

    /// Variable references are defined by the data record, not the rule
    /// program, so they lower to no statements.
    #[must_use]
    pub const fn compile(&self) -> Vec<Statement> {
        Vec::new()
    }

    /// Structural fingerprint.
    #[must_use]
    pub const fn fingerprint(&self) -> u64 {
        self.fingerprint
    }
}

// ============================================================================
// SECTION: Missing Check
// ============================================================================

/// True iff all named variables are absent from the data record.
///
/// # Invariants
/// - Names are deduplicated and kept sorted so compilation is deterministic.
#[derive(Debug)]
pub struct MissingNode {
    /// Unique node identifier.
    node_id: NodeId,
    /// Deduplicated, sorted variable names.
    var_names: BTreeSet<String>,
    /// Structural fingerprint.
    fingerprint: u64,
}

impl MissingNode {
    /// Builds a missing-field check from its operand list.
    ///
    /// Accepts string operands and literal lists of strings; the combined
    /// name set must be non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::InvalidOperandShape`] for non-string operands or
    /// an empty name set.
    pub fn new(operands: Vec<Operand>) -> Result<Self, NodeError> {
        let mut names = BTreeSet::new();
        for operand in operands {
            match operand {
                Operand::Value(Primitive::Str(name)) => {
                    names.insert(name);
                }
                Operand::List(values) => {
                    for value in values {
                        let Primitive::Str(name) = value else {
                            return Err(NodeError::InvalidOperandShape {
                                node: "missing",
                                details: format!("expected string names, received {value}"),
                            });
                        };
                        names.insert(name);
                    }
                }
                other => {
                    return Err(NodeError::InvalidOperandShape {
                        node: "missing",
                        details: format!("expected string names, received {}", other.describe()),
                    });
                }
            }
        }

        if names.is_empty() {
            return Err(NodeError::InvalidOperandShape {
                node: "missing",
                details: "requires at least 1 variable name".to_string(),
            });
        }

        let parts: Vec<u64> = names.iter().map(|name| string_fingerprint(name)).collect();
        let fingerprint = combine_fingerprint("missing", &parts);
        Ok(Self {
            node_id: generate_unique_id(),
            var_names: names,
            fingerprint,
        })
    }

    /// Unique node identifier.
    #[must_use]
    pub const fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    /// `missing(id)`.
    #[must_use]
    pub fn atom(&self) -> PredicateAtom {
        PredicateAtom::new("missing", vec![self.node_id.to_string()])
    }

    /// One rule whose body requires every named variable to be underivable.
    #[must_use]
    pub fn compile(&self) -> Vec<Statement> {
        let body: Vec<Literal> = self
            .var_names
            .iter()
            .map(|name| {
                Literal::Predicate(PredicateAtom {
                    predicate: "var".to_string(),
                    terms: vec![constant_token(name), ANY_TERM_VARIABLE.to_string()],
                    negated: true,
                })
            })
            .collect();
        vec![Statement::rule(self.atom(), body)]
    }

    /// Structural fingerprint.
    #[must_use]
    pub const fn fingerprint(&self) -> u64 {
        self.fingerprint
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Fingerprint of a bare string (used for variable names).
fn string_fingerprint(name: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    name.hash(&mut hasher);
    hasher.finish()
}
