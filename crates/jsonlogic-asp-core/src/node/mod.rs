// crates/jsonlogic-asp-core/src/node/mod.rs
// ============================================================================
// Module: Rule Nodes
// Description: Tagged-union rule-tree node with per-operator lowering.
// Purpose: Give every operator a typed node, a stable atom, and a compile step.
// Dependencies: crate::{asp, error, ident, value}
// ============================================================================

//! ## Overview
//! A [`RuleNode`] is the compiled, typed form of one rule-tree operator
//! application. Nodes are created during parsing, validated eagerly, and
//! never mutated afterwards. Each node knows its own predicate atom, how to
//! lower itself to statements, and its structural fingerprint.
//!
//! The fingerprint is computed once at construction from the variant tag and
//! the children's fingerprints, ordered where order is semantic (conditional
//! chains, ordering and inequality comparisons, membership needle/haystack)
//! and sorted otherwise. The node identifier never participates. Fingerprint equality is
//! what the translation cache uses to collapse structurally identical
//! subtrees, so it must track semantic equivalence exactly.

// ============================================================================
// SECTION: Submodules
// ============================================================================

/// Membership and merge nodes.
pub mod array;
/// And/or/not and the bool helper node.
pub mod boolean;
/// Comparison nodes.
pub mod compare;
/// Conditional (if/elif/else) chains.
pub mod conditional;
/// Caller-supplied operator extension points.
pub mod custom;
/// Variable reference and missing-field nodes.
pub mod data;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::hash_map::DefaultHasher;
use std::hash::Hash;
use std::hash::Hasher;
use std::mem;
use std::sync::Arc;

use crate::asp::PredicateAtom;
use crate::asp::Statement;
use crate::ident::NodeId;
use crate::value::Primitive;

pub use array::Haystack;
pub use array::InNode;
pub use array::MergeItem;
pub use array::MergeNode;
pub use array::Needle;
pub use boolean::AndNode;
pub use boolean::BoolNode;
pub use boolean::NotNode;
pub use boolean::OrNode;
pub use boolean::TreeChild;
pub use compare::CompareNode;
pub use compare::CompareOp;
pub use compare::CompareOperand;
pub use conditional::ConditionalNode;
pub use custom::CustomNode;
pub use custom::CustomOperator;
pub use custom::CustomOperators;
pub use data::MissingNode;
pub use data::VarNode;

// ============================================================================
// SECTION: Operands
// ============================================================================

/// One operand extracted from a rule-tree operator application.
///
/// # Invariants
/// - `List` holds only primitives; nested operator mappings are parsed into
///   nodes before operands are assembled.
#[derive(Debug, Clone)]
pub enum Operand {
    /// An already-parsed child node.
    Node(Arc<RuleNode>),
    /// A scalar leaf value.
    Value(Primitive),
    /// A literal list of scalar values.
    List(Vec<Primitive>),
}

impl Operand {
    /// Structural fingerprint of the operand.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        match self {
            Self::Node(node) => node.fingerprint(),
            Self::Value(value) => primitive_fingerprint(value),
            Self::List(values) => {
                let mut parts: Vec<u64> = values.iter().map(primitive_fingerprint).collect();
                parts.sort_unstable();
                combine_fingerprint("list", &parts)
            }
        }
    }

    /// Short description of the operand kind for diagnostics.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Node(node) => format!("{} node", node.operator_name()),
            Self::Value(value) => format!("value {value}"),
            Self::List(values) => format!("list of {} values", values.len()),
        }
    }
}

// ============================================================================
// SECTION: Rule Node
// ============================================================================

/// A compiled, typed representation of one rule-tree operator application.
///
/// # Invariants
/// - Children are fixed at construction; no node is mutated afterwards.
/// - Compiled statements reference only this node's identifier and the
///   already-assigned atoms of its children (strict post-order emission).
#[derive(Debug)]
pub enum RuleNode {
    /// Variable reference (`var`).
    Var(VarNode),
    /// Missing-field check (`missing`).
    Missing(MissingNode),
    /// Boolean conjunction (`and`).
    And(AndNode),
    /// Boolean disjunction (`or`).
    Or(OrNode),
    /// Boolean negation (`!`).
    Not(NotNode),
    /// Comparison chain (`==`, `!=`, `<`, ...).
    Compare(CompareNode),
    /// Array membership (`in`).
    In(InNode),
    /// Array merge (`merge`).
    Merge(MergeNode),
    /// Conditional chain (`if`).
    Conditional(ConditionalNode),
    /// Boolean literal helper used inside conditional chains.
    Bool(BoolNode),
    /// Caller-supplied operator implementation.
    Custom(Arc<dyn CustomNode>),
}

impl RuleNode {
    /// The node's unique identifier.
    #[must_use]
    pub fn node_id(&self) -> &NodeId {
        match self {
            Self::Var(n) => n.node_id(),
            Self::Missing(n) => n.node_id(),
            Self::And(n) => n.node_id(),
            Self::Or(n) => n.node_id(),
            Self::Not(n) => n.node_id(),
            Self::Compare(n) => n.node_id(),
            Self::In(n) => n.node_id(),
            Self::Merge(n) => n.node_id(),
            Self::Conditional(n) => n.node_id(),
            Self::Bool(n) => n.node_id(),
            Self::Custom(n) => n.node_id(),
        }
    }

    /// The logic-program predicate name this node compiles to.
    #[must_use]
    pub fn operator_name(&self) -> &str {
        match self {
            Self::Var(_) => "var",
            Self::Missing(_) => "missing",
            Self::And(_) => "and",
            Self::Or(_) => "or",
            Self::Not(_) => "neg",
            Self::Compare(n) => n.op().predicate(),
            Self::In(_) => "in",
            Self::Merge(_) => "merge",
            Self::Conditional(_) => "if",
            Self::Bool(_) => "bool",
            Self::Custom(n) => n.operator_name(),
        }
    }

    /// The node's own predicate atom.
    #[must_use]
    pub fn atom(&self) -> PredicateAtom {
        match self {
            Self::Var(n) => n.atom(),
            Self::Missing(n) => n.atom(),
            Self::Merge(n) => n.atom(),
            Self::Bool(n) => n.atom(),
            Self::Custom(n) => n.atom(),
            Self::And(_) | Self::Or(_) | Self::Not(_) | Self::Compare(_) | Self::In(_)
            | Self::Conditional(_) => {
                PredicateAtom::new(self.operator_name(), vec![self.node_id().to_string()])
            }
        }
    }

    /// The node's atom with the negation flag flipped.
    #[must_use]
    pub fn negated_atom(&self) -> PredicateAtom {
        self.atom().negated()
    }

    /// Whether this node binds a data value to a term variable.
    #[must_use]
    pub const fn is_data_producing(&self) -> bool {
        matches!(self, Self::Var(_) | Self::Merge(_))
    }

    /// Whether this node derives a truth value usable inside boolean trees.
    #[must_use]
    pub const fn is_boolean_valued(&self) -> bool {
        !self.is_data_producing()
    }

    /// For data-producing nodes, the own atom with its output variable
    /// rebound to `variable` (optionally negated). `None` otherwise.
    #[must_use]
    pub fn atom_with_variable(&self, variable: &str, negated: bool) -> Option<PredicateAtom> {
        match self {
            Self::Var(n) => Some(n.atom_with_variable(variable, negated)),
            Self::Merge(n) => Some(n.atom_with_variable(variable, negated)),
            _ => None,
        }
    }

    /// Variant-specific lowering to logic-program statements.
    ///
    /// Deterministic and side-effect-free: repeated calls yield identical
    /// statements because any auxiliary identifiers are fixed at
    /// construction.
    #[must_use]
    pub fn compile(&self) -> Vec<Statement> {
        match self {
            Self::Var(n) => n.compile(),
            Self::Missing(n) => n.compile(),
            Self::And(n) => n.compile(),
            Self::Or(n) => n.compile(),
            Self::Not(n) => n.compile(),
            Self::Compare(n) => n.compile(),
            Self::In(n) => n.compile(),
            Self::Merge(n) => n.compile(),
            Self::Conditional(n) => n.compile(),
            Self::Bool(n) => n.compile(),
            Self::Custom(n) => n.compile(),
        }
    }

    /// The node children participating in post-order emission.
    #[must_use]
    pub fn child_nodes(&self) -> Vec<Arc<RuleNode>> {
        match self {
            Self::Var(_) | Self::Missing(_) | Self::Bool(_) => Vec::new(),
            Self::And(n) => n.child_nodes(),
            Self::Or(n) => n.child_nodes(),
            Self::Not(n) => vec![n.child().clone()],
            Self::Compare(n) => n.child_nodes(),
            Self::In(n) => n.child_nodes(),
            Self::Merge(n) => n.child_nodes(),
            Self::Conditional(n) => n.child_nodes(),
            Self::Custom(n) => n.child_nodes(),
        }
    }

    /// Post-order rendering: children's lines first, then this node's own
    /// compiled statements, optionally interleaved with comment lines.
    #[must_use]
    pub fn emit(&self, with_comments: bool) -> Vec<String> {
        let mut lines = Vec::new();
        for child in self.child_nodes() {
            lines.extend(child.emit(with_comments));
        }
        for statement in self.compile() {
            if with_comments && let Some(comment) = statement.comment_line() {
                lines.push(comment);
            }
            lines.push(statement.render());
        }
        lines
    }

    /// The node's structural fingerprint (content-derived identity).
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        match self {
            Self::Var(n) => n.fingerprint(),
            Self::Missing(n) => n.fingerprint(),
            Self::And(n) => n.fingerprint(),
            Self::Or(n) => n.fingerprint(),
            Self::Not(n) => n.fingerprint(),
            Self::Compare(n) => n.fingerprint(),
            Self::In(n) => n.fingerprint(),
            Self::Merge(n) => n.fingerprint(),
            Self::Conditional(n) => n.fingerprint(),
            Self::Bool(n) => n.fingerprint(),
            Self::Custom(n) => n.fingerprint(),
        }
    }
}

impl PartialEq for RuleNode {
    fn eq(&self, other: &Self) -> bool {
        mem::discriminant(self) == mem::discriminant(other)
            && self.fingerprint() == other.fingerprint()
    }
}

// ============================================================================
// SECTION: Fingerprint Helpers
// ============================================================================

/// Combines a variant tag with child fingerprints into one fingerprint.
///
/// Callers decide whether `parts` is ordered or sorted; order-insensitive
/// variants must sort before calling so that operand permutations collapse.
#[must_use]
pub(crate) fn combine_fingerprint(tag: &str, parts: &[u64]) -> u64 {
    let mut hasher = DefaultHasher::new();
    tag.hash(&mut hasher);
    parts.hash(&mut hasher);
    hasher.finish()
}

/// Structural fingerprint of a primitive leaf value.
#[must_use]
pub(crate) fn primitive_fingerprint(value: &Primitive) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash_structure(&mut hasher);
    hasher.finish()
}
