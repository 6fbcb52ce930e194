// crates/jsonlogic-asp-core/src/node/compare.rs
// ============================================================================
// Module: Comparison Nodes
// Description: Pairwise-chained comparison lowering.
// Purpose: Compile equality and ordering operators over variables and
//          primitives into one rule with binding and comparator literals.
// Dependencies: crate::{asp, error, ident, node, value}
// ============================================================================

//! ## Overview
//! A comparison takes two or more operands, each a data-producing node or a
//! primitive, and chains adjacent pairs: `{"<": [a, b, c]}` holds when
//! `a < b` and `b < c`. Each distinct data-producing operand is bound once
//! to a numbered local variable (`V1`, `V2`, ...) in first-appearance order;
//! primitives appear directly as encoded tokens.
//!
//! Strict-equality variants keep their own predicate names but reuse the
//! `==`/`!=` comparator text of their non-strict counterparts.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use crate::asp::ComparatorAtom;
use crate::asp::Literal;
use crate::asp::PredicateAtom;
use crate::asp::Statement;
use crate::error::NodeError;
use crate::ident::NodeId;
use crate::ident::generate_unique_id;
use crate::node::Operand;
use crate::node::RuleNode;
use crate::node::combine_fingerprint;
use crate::node::primitive_fingerprint;
use crate::value::Primitive;

// ============================================================================
// SECTION: Comparison Operators
// ============================================================================

/// The supported comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// Loose equality (`==`).
    Eq,
    /// Loose inequality (`!=`).
    Neq,
    /// Strict equality (`===`).
    Seq,
    /// Strict inequality (`!==`).
    Sneq,
    /// Less-than (`<`).
    Lt,
    /// Less-than-or-equal (`<=`).
    Lte,
    /// Greater-than (`>`).
    Gt,
    /// Greater-than-or-equal (`>=`).
    Gte,
}

impl CompareOp {
    /// The predicate name the node's head atom uses.
    #[must_use]
    pub const fn predicate(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Neq => "neq",
            Self::Seq => "seq",
            Self::Sneq => "sneq",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Gt => "gt",
            Self::Gte => "gte",
        }
    }

    /// The infix comparator text emitted into rule bodies.
    ///
    /// `seq`/`sneq` reuse the loose comparator text.
    #[must_use]
    pub const fn comparator(self) -> &'static str {
        match self {
            Self::Eq | Self::Seq => "==",
            Self::Neq | Self::Sneq => "!=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
        }
    }

    /// Whether operand order is semantic for this operator.
    ///
    /// Only equality chains assert that every operand is equal, so only they
    /// may fingerprint the operand multiset. Inequality and ordering chains
    /// constrain adjacent pairs; `a != b, b != c` says nothing about `a` and
    /// `c`, so permuted operand sequences are distinct constraints and must
    /// fingerprint as-is.
    #[must_use]
    pub const fn is_ordered(self) -> bool {
        !matches!(self, Self::Eq | Self::Seq)
    }
}

// ============================================================================
// SECTION: Comparison Operands
// ============================================================================

/// One side of a comparison chain.
#[derive(Debug, Clone)]
pub enum CompareOperand {
    /// Data-producing node whose value is bound to a local variable.
    Node(Arc<RuleNode>),
    /// Primitive encoded directly into term position.
    Value(Primitive),
}

impl CompareOperand {
    /// Structural fingerprint of the operand.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        match self {
            Self::Node(node) => node.fingerprint(),
            Self::Value(value) => primitive_fingerprint(value),
        }
    }

    /// Human-readable operand name for statement comments.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Node(node) => match node.as_ref() {
                RuleNode::Var(var) => var.var_name().to_string(),
                other => other.operator_name().to_string(),
            },
            Self::Value(value) => value.to_string(),
        }
    }
}

// ============================================================================
// SECTION: Comparison Node
// ============================================================================

/// Pairwise-chained comparison over two or more operands.
///
/// # Invariants
/// - Operand sequence is kept exactly as given; chaining order is semantic.
#[derive(Debug)]
pub struct CompareNode {
    /// Unique node identifier.
    node_id: NodeId,
    /// The comparison operator.
    op: CompareOp,
    /// Ordered operands.
    operands: Vec<CompareOperand>,
    /// Structural fingerprint.
    fingerprint: u64,
}

impl CompareNode {
    /// Builds a comparison from its operand list.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::InvalidOperandShape`] for fewer than two
    /// operands, list operands, or node operands that do not produce a
    /// data value.
    pub fn new(op: CompareOp, operands: Vec<Operand>) -> Result<Self, NodeError> {
        if operands.len() < 2 {
            return Err(NodeError::InvalidOperandShape {
                node: op.predicate(),
                details: format!("requires at least 2 operands, received {}", operands.len()),
            });
        }

        let mut converted = Vec::with_capacity(operands.len());
        for operand in operands {
            match operand {
                Operand::Node(node) => {
                    if !node.is_data_producing() {
                        return Err(NodeError::InvalidOperandShape {
                            node: op.predicate(),
                            details: format!(
                                "found unexpected child node type {}",
                                node.operator_name()
                            ),
                        });
                    }
                    converted.push(CompareOperand::Node(node));
                }
                Operand::Value(value) => converted.push(CompareOperand::Value(value)),
                other @ Operand::List(_) => {
                    return Err(NodeError::InvalidOperandShape {
                        node: op.predicate(),
                        details: format!("expected node or primitive, received {}", other.describe()),
                    });
                }
            }
        }

        let mut parts: Vec<u64> = converted.iter().map(CompareOperand::fingerprint).collect();
        if !op.is_ordered() {
            parts.sort_unstable();
        }
        let fingerprint = combine_fingerprint(op.predicate(), &parts);

        Ok(Self {
            node_id: generate_unique_id(),
            op,
            operands: converted,
            fingerprint,
        })
    }

    /// Unique node identifier.
    #[must_use]
    pub const fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    /// The comparison operator.
    #[must_use]
    pub const fn op(&self) -> CompareOp {
        self.op
    }

    /// `<predicate>(id)`.
    #[must_use]
    pub fn atom(&self) -> PredicateAtom {
        PredicateAtom::new(self.op.predicate(), vec![self.node_id.to_string()])
    }

    /// Node operands in appearance order.
    #[must_use]
    pub fn child_nodes(&self) -> Vec<Arc<RuleNode>> {
        self.operands
            .iter()
            .filter_map(|operand| match operand {
                CompareOperand::Node(node) => Some(node.clone()),
                CompareOperand::Value(_) => None,
            })
            .collect()
    }

    /// One rule: binding literals for each distinct data operand, then one
    /// comparator literal per adjacent operand pair.
    #[must_use]
    pub fn compile(&self) -> Vec<Statement> {
        let mut bindings: Vec<Literal> = Vec::new();
        // (fingerprint, bound variable) pairs so repeated operands share one
        // binding literal and one local variable.
        let mut bound: Vec<(u64, String)> = Vec::new();
        let mut terms: Vec<String> = Vec::with_capacity(self.operands.len());

        for operand in &self.operands {
            match operand {
                CompareOperand::Node(node) => {
                    let fingerprint = node.fingerprint();
                    let variable = bound
                        .iter()
                        .find(|(seen, _)| *seen == fingerprint)
                        .map(|(_, variable)| variable.clone());
                    let variable = if let Some(variable) = variable {
                        variable
                    } else {
                        let fresh = format!("V{}", bound.len() + 1);
                        if let Some(atom) = node.atom_with_variable(&fresh, false) {
                            bindings.push(Literal::Predicate(atom));
                        }
                        bound.push((fingerprint, fresh.clone()));
                        fresh
                    };
                    terms.push(variable);
                }
                CompareOperand::Value(value) => terms.push(value.encode()),
            }
        }

        let mut body = bindings;
        for pair in terms.windows(2) {
            body.push(Literal::Comparator(ComparatorAtom::new(
                pair[0].clone(),
                self.op.comparator(),
                pair[1].clone(),
            )));
        }

        let names: Vec<String> = self.operands.iter().map(CompareOperand::describe).collect();
        let comment = names.join(&format!(" {} ", self.op.predicate().to_uppercase()));
        vec![Statement::rule_with_comment(self.atom(), body, comment)]
    }

    /// Structural fingerprint.
    #[must_use]
    pub const fn fingerprint(&self) -> u64 {
        self.fingerprint
    }
}
