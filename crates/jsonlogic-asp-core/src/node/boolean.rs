// crates/jsonlogic-asp-core/src/node/boolean.rs
// ============================================================================
// Module: Boolean Nodes
// Description: Conjunction, disjunction, negation, and the bool helper.
// Purpose: Lower boolean composition to facts and rules with stable-model
//          disjunction expressed as one rule per alternative.
// Dependencies: crate::{asp, error, ident, node}
// ============================================================================

//! ## Overview
//! `and` compiles to a single rule whose body conjoins every child atom;
//! `or` compiles to one rule per child (the standard stable-model idiom for
//! disjunction). Boolean literal children are resolved at compile time:
//! a `false` under `and` makes the node unsatisfiable (no statements at
//! all), a `true` under `or` makes it a bare fact.
//!
//! The [`BoolNode`] helper gives boolean literals an atom so conditional
//! chains can treat them like any other condition: `bool(true)` is emitted
//! as a fact, while `bool(false)` is never derivable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use crate::asp::Literal;
use crate::asp::PredicateAtom;
use crate::asp::Statement;
use crate::error::NodeError;
use crate::ident::NodeId;
use crate::ident::generate_unique_id;
use crate::node::RuleNode;
use crate::node::combine_fingerprint;

// ============================================================================
// SECTION: Tree Children
// ============================================================================

/// A child of a boolean tree node: another node or a boolean literal.
#[derive(Debug, Clone)]
pub enum TreeChild {
    /// Nested node child.
    Node(Arc<RuleNode>),
    /// Boolean literal child, resolved at compile time.
    Bool(bool),
}

impl TreeChild {
    /// Structural fingerprint of the child.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        match self {
            Self::Node(node) => node.fingerprint(),
            Self::Bool(value) => combine_fingerprint("lit", &[u64::from(*value)]),
        }
    }
}

/// Validates and deduplicates boolean-tree children.
///
/// Structurally identical children are registered once; node children must
/// derive a truth value (data-producing nodes are rejected).
fn register_tree_children(
    node: &'static str,
    children: Vec<TreeChild>,
) -> Result<Vec<TreeChild>, NodeError> {
    if children.is_empty() {
        return Err(NodeError::InvalidOperandShape {
            node,
            details: "requires at least 1 child".to_string(),
        });
    }

    let mut registered: Vec<TreeChild> = Vec::with_capacity(children.len());
    for child in children {
        if let TreeChild::Node(inner) = &child {
            if !inner.is_boolean_valued() {
                return Err(NodeError::InvalidOperandShape {
                    node,
                    details: format!("found unexpected child node type {}", inner.operator_name()),
                });
            }
        }
        let fingerprint = child.fingerprint();
        if registered.iter().any(|seen| seen.fingerprint() == fingerprint) {
            continue;
        }
        registered.push(child);
    }
    Ok(registered)
}

/// True when any child is the literal `true`.
fn has_true(children: &[TreeChild]) -> bool {
    children.iter().any(|c| matches!(c, TreeChild::Bool(true)))
}

/// True when any child is the literal `false`.
fn has_false(children: &[TreeChild]) -> bool {
    children.iter().any(|c| matches!(c, TreeChild::Bool(false)))
}

/// The node children of a boolean tree, in registration order.
fn node_children(children: &[TreeChild]) -> Vec<Arc<RuleNode>> {
    children
        .iter()
        .filter_map(|c| match c {
            TreeChild::Node(node) => Some(node.clone()),
            TreeChild::Bool(_) => None,
        })
        .collect()
}

// ============================================================================
// SECTION: Conjunction
// ============================================================================

/// Boolean conjunction over one or more children.
///
/// # Invariants
/// - Children are deduplicated structurally at construction.
#[derive(Debug)]
pub struct AndNode {
    /// Unique node identifier.
    node_id: NodeId,
    /// Registered children.
    children: Vec<TreeChild>,
    /// Structural fingerprint.
    fingerprint: u64,
}

impl AndNode {
    /// Builds a conjunction from its children.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::InvalidOperandShape`] when no children are given
    /// or a child is not truth-valued.
    pub fn new(children: Vec<TreeChild>) -> Result<Self, NodeError> {
        let children = register_tree_children("and", children)?;
        let mut parts: Vec<u64> = children.iter().map(TreeChild::fingerprint).collect();
        parts.sort_unstable();
        let fingerprint = combine_fingerprint("and", &parts);
        Ok(Self {
            node_id: generate_unique_id(),
            children,
            fingerprint,
        })
    }

    /// Unique node identifier.
    #[must_use]
    pub const fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    /// `and(id)`.
    #[must_use]
    pub fn atom(&self) -> PredicateAtom {
        PredicateAtom::new("and", vec![self.node_id.to_string()])
    }

    /// Node children in registration order.
    #[must_use]
    pub fn child_nodes(&self) -> Vec<Arc<RuleNode>> {
        node_children(&self.children)
    }

    /// A literal `false` child makes the node unsatisfiable (no statements);
    /// only-`true` children make it a bare fact; otherwise one rule conjoins
    /// every node child's atom.
    #[must_use]
    pub fn compile(&self) -> Vec<Statement> {
        if has_false(&self.children) {
            // Never satisfiable: emit nothing so the head can never derive.
            return Vec::new();
        }

        let nodes = self.child_nodes();
        if nodes.is_empty() {
            if has_true(&self.children) {
                return vec![Statement::fact(self.atom())];
            }
            return Vec::new();
        }

        let body: Vec<Literal> = nodes
            .iter()
            .map(|child| Literal::Predicate(child.atom()))
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
// SECTION: Disjunction
// ============================================================================

/// Boolean disjunction over one or more children.
///
/// # Invariants
/// - Children are deduplicated structurally at construction.
#[derive(Debug)]
pub struct OrNode {
    /// Unique node identifier.
    node_id: NodeId,
    /// Registered children.
    children: Vec<TreeChild>,
    /// Structural fingerprint.
    fingerprint: u64,
}

impl OrNode {
    /// Builds a disjunction from its children.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::InvalidOperandShape`] when no children are given
    /// or a child is not truth-valued.
    pub fn new(children: Vec<TreeChild>) -> Result<Self, NodeError> {
        let children = register_tree_children("or", children)?;
        let mut parts: Vec<u64> = children.iter().map(TreeChild::fingerprint).collect();
        parts.sort_unstable();
        let fingerprint = combine_fingerprint("or", &parts);
        Ok(Self {
            node_id: generate_unique_id(),
            children,
            fingerprint,
        })
    }

    /// Unique node identifier.
    #[must_use]
    pub const fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    /// `or(id)`.
    #[must_use]
    pub fn atom(&self) -> PredicateAtom {
        PredicateAtom::new("or", vec![self.node_id.to_string()])
    }

    /// Node children in registration order.
    #[must_use]
    pub fn child_nodes(&self) -> Vec<Arc<RuleNode>> {
        node_children(&self.children)
    }

    /// A literal `true` child makes the node a bare fact; otherwise one rule
    /// per node child derives the head from that child alone.
    #[must_use]
    pub fn compile(&self) -> Vec<Statement> {
        if has_true(&self.children) {
            return vec![Statement::fact(self.atom())];
        }

        self.child_nodes()
            .iter()
            .map(|child| Statement::rule(self.atom(), vec![Literal::Predicate(child.atom())]))
            .collect()
    }

    /// Structural fingerprint.
    #[must_use]
    pub const fn fingerprint(&self) -> u64 {
        self.fingerprint
    }
}

// ============================================================================
// SECTION: Negation
// ============================================================================

/// Boolean negation of exactly one child node.
///
/// # Invariants
/// - Exactly one child, fixed at construction.
#[derive(Debug)]
pub struct NotNode {
    /// Unique node identifier.
    node_id: NodeId,
    /// The negated child.
    child: Arc<RuleNode>,
    /// Structural fingerprint.
    fingerprint: u64,
}

impl NotNode {
    /// Builds a negation from exactly one child node.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::InvalidOperandShape`] for any other arity or a
    /// non-node child.
    pub fn new(children: Vec<Arc<RuleNode>>) -> Result<Self, NodeError> {
        let mut children = children;
        let child = match (children.len(), children.pop()) {
            (1, Some(child)) => child,
            (count, _) => {
                return Err(NodeError::InvalidOperandShape {
                    node: "neg",
                    details: format!("expects only 1 child, received {count}"),
                });
            }
        };

        let fingerprint = combine_fingerprint("neg", &[child.fingerprint()]);
        Ok(Self {
            node_id: generate_unique_id(),
            child,
            fingerprint,
        })
    }

    /// Unique node identifier.
    #[must_use]
    pub const fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    /// The negated child.
    #[must_use]
    pub const fn child(&self) -> &Arc<RuleNode> {
        &self.child
    }

    /// `neg(id)`.
    #[must_use]
    pub fn atom(&self) -> PredicateAtom {
        PredicateAtom::new("neg", vec![self.node_id.to_string()])
    }

    /// Negating a data-producing child means "no such value is present":
    /// the child's output variable is rebound to `_` and the literal is
    /// negated. Any other child contributes its own atom with the negation
    /// flag flipped.
    #[must_use]
    pub fn compile(&self) -> Vec<Statement> {
        if let Some(literal) = self.child.atom_with_variable("_", true) {
            let name = match self.child.as_ref() {
                RuleNode::Var(var) => var.var_name().to_string(),
                other => other.operator_name().to_string(),
            };
            return vec![Statement::rule_with_comment(
                self.atom(),
                vec![Literal::Predicate(literal)],
                format!("Not {name}"),
            )];
        }

        vec![Statement::rule(
            self.atom(),
            vec![Literal::Predicate(self.child.negated_atom())],
        )]
    }

    /// Structural fingerprint.
    #[must_use]
    pub const fn fingerprint(&self) -> u64 {
        self.fingerprint
    }
}

// ============================================================================
// SECTION: Bool Helper
// ============================================================================

/// Boolean literal wrapped as a node so it can stand in condition position.
///
/// # Invariants
/// - The atom carries the literal itself, not the node identifier, so all
///   helpers of the same polarity share one atom and one emitted fact.
#[derive(Debug)]
pub struct BoolNode {
    /// Unique node identifier (diagnostics only; not part of the atom).
    node_id: NodeId,
    /// Wrapped literal.
    value: bool,
    /// Structural fingerprint.
    fingerprint: u64,
}

impl BoolNode {
    /// Wraps a boolean literal.
    #[must_use]
    pub fn new(value: bool) -> Self {
        Self {
            node_id: generate_unique_id(),
            value,
            fingerprint: combine_fingerprint("bool", &[u64::from(value)]),
        }
    }

    /// Unique node identifier.
    #[must_use]
    pub const fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    /// The wrapped literal.
    #[must_use]
    pub const fn value(&self) -> bool {
        self.value
    }

    /// `bool(true)` or `bool(false)`.
    #[must_use]
    pub fn atom(&self) -> PredicateAtom {
        PredicateAtom::new("bool", vec![self.value.to_string()])
    }

    /// `bool(true)` is asserted as a fact; `bool(false)` is never derivable.
    #[must_use]
    pub fn compile(&self) -> Vec<Statement> {
        if self.value {
            vec![Statement::fact(self.atom())]
        } else {
            Vec::new()
        }
    }

    /// Structural fingerprint.
    #[must_use]
    pub const fn fingerprint(&self) -> u64 {
        self.fingerprint
    }
}
