// crates/jsonlogic-asp-core/src/node/conditional.rs
// ============================================================================
// Module: Conditional Nodes
// Description: if/elif/else chain lowering.
// Purpose: Compile positional condition/branch chains into an auxiliary
//          predicate cascade with negation-as-failure exclusivity.
// Dependencies: crate::{asp, error, ident, node, value}
// ============================================================================

//! ## Overview
//! Children alternate condition and branch, with an optional trailing else.
//! The chain shape is fixed by the child count alone: `pairs = count / 2`,
//! `has_else = count > 1 && count is odd`, `elifs = pairs - 1`. Each elif
//! and the else derive through their own auxiliary predicate whose body
//! negates every earlier condition, so exactly the first true condition
//! selects its branch under stable-model semantics.
//!
//! Boolean literal children are wrapped in the `bool` helper node at
//! construction so they compile like any other condition. Unlike every other
//! tree node, duplicate children are kept: position is semantic here.

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
use crate::node::BoolNode;
use crate::node::Operand;
use crate::node::RuleNode;
use crate::node::combine_fingerprint;
use crate::value::Primitive;

// ============================================================================
// SECTION: Conditional Node
// ============================================================================

/// Positional if/elif/else chain.
///
/// # Invariants
/// - Child order and duplication are semantic and preserved exactly.
/// - Auxiliary identifiers are fixed at construction so `compile` is pure.
#[derive(Debug)]
pub struct ConditionalNode {
    /// Unique node identifier.
    node_id: NodeId,
    /// Alternating condition/branch children plus optional trailing else.
    children: Vec<Arc<RuleNode>>,
    /// One auxiliary identifier per elif pair.
    elif_ids: Vec<NodeId>,
    /// Auxiliary identifier for the else branch, when present.
    else_id: Option<NodeId>,
    /// Structural fingerprint.
    fingerprint: u64,
}

impl ConditionalNode {
    /// Builds a conditional chain from its operand list.
    ///
    /// Boolean literal operands wrap in the `bool` helper node; all other
    /// operands must be truth-valued nodes.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::InvalidOperandShape`] for an empty operand list
    /// or any operand that is neither a truth-valued node nor a boolean
    /// literal.
    pub fn new(operands: Vec<Operand>) -> Result<Self, NodeError> {
        if operands.is_empty() {
            return Err(NodeError::InvalidOperandShape {
                node: "if",
                details: "requires at least 1 child".to_string(),
            });
        }

        let mut children: Vec<Arc<RuleNode>> = Vec::with_capacity(operands.len());
        for operand in operands {
            match operand {
                Operand::Node(node) => {
                    if !node.is_boolean_valued() {
                        return Err(NodeError::InvalidOperandShape {
                            node: "if",
                            details: format!(
                                "found unexpected child node type {}",
                                node.operator_name()
                            ),
                        });
                    }
                    children.push(node);
                }
                Operand::Value(Primitive::Bool(value)) => {
                    children.push(Arc::new(RuleNode::Bool(BoolNode::new(value))));
                }
                other => {
                    return Err(NodeError::InvalidOperandShape {
                        node: "if",
                        details: format!(
                            "expected node or boolean literal, received {}",
                            other.describe()
                        ),
                    });
                }
            }
        }

        let count = children.len();
        let pairs = count / 2;
        let has_else = count > 1 && count % 2 == 1;
        let elif_count = pairs.saturating_sub(1);

        let elif_ids: Vec<NodeId> = (0..elif_count).map(|_| generate_unique_id()).collect();
        let else_id = has_else.then(generate_unique_id);

        let parts: Vec<u64> = children.iter().map(|child| child.fingerprint()).collect();
        let fingerprint = combine_fingerprint("if", &parts);

        Ok(Self {
            node_id: generate_unique_id(),
            children,
            elif_ids,
            else_id,
            fingerprint,
        })
    }

    /// Unique node identifier.
    #[must_use]
    pub const fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    /// `if(id)`.
    #[must_use]
    pub fn atom(&self) -> PredicateAtom {
        PredicateAtom::new("if", vec![self.node_id.to_string()])
    }

    /// All children in positional order.
    #[must_use]
    pub fn child_nodes(&self) -> Vec<Arc<RuleNode>> {
        self.children.clone()
    }

    /// The condition children in chain order.
    fn conditions(&self) -> Vec<&Arc<RuleNode>> {
        self.children.iter().step_by(2).take(self.children.len() / 2).collect()
    }

    /// Negated atoms of the first `upto` conditions, in chain order.
    fn negated_prior_conditions(&self, upto: usize) -> Vec<Literal> {
        self.conditions()
            .iter()
            .take(upto)
            .map(|condition| Literal::Predicate(condition.negated_atom()))
            .collect()
    }

    /// Outermost-first cascade: the base pair rule, then one link plus one
    /// auxiliary rule per elif, then the else link plus its auxiliary rule.
    #[must_use]
    pub fn compile(&self) -> Vec<Statement> {
        if self.children.len() == 1 {
            return vec![Statement::rule(
                self.atom(),
                vec![Literal::Predicate(self.children[0].atom())],
            )];
        }

        let pairs = self.children.len() / 2;
        let mut statements = Vec::new();

        statements.push(Statement::rule(
            self.atom(),
            vec![
                Literal::Predicate(self.children[0].atom()),
                Literal::Predicate(self.children[1].atom()),
            ],
        ));

        for (index, elif_id) in self.elif_ids.iter().enumerate() {
            let pair = index + 1;
            let elif_atom = PredicateAtom::new("elif", vec![elif_id.to_string()]);

            statements.push(Statement::rule(
                self.atom(),
                vec![Literal::Predicate(elif_atom.clone())],
            ));

            let mut body = self.negated_prior_conditions(pair);
            body.push(Literal::Predicate(self.children[pair * 2].atom()));
            body.push(Literal::Predicate(self.children[pair * 2 + 1].atom()));
            statements.push(Statement::rule(elif_atom, body));
        }

        if let Some(else_id) = &self.else_id {
            let else_atom = PredicateAtom::new("else", vec![else_id.to_string()]);

            statements.push(Statement::rule(
                self.atom(),
                vec![Literal::Predicate(else_atom.clone())],
            ));

            let mut body = self.negated_prior_conditions(pairs);
            body.push(Literal::Predicate(
                self.children[self.children.len() - 1].atom(),
            ));
            statements.push(Statement::rule(else_atom, body));
        }

        statements
    }

    /// Structural fingerprint.
    #[must_use]
    pub const fn fingerprint(&self) -> u64 {
        self.fingerprint
    }
}
