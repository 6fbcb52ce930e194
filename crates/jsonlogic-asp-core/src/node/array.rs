// crates/jsonlogic-asp-core/src/node/array.rs
// ============================================================================
// Module: Array Nodes
// Description: Membership and merge lowering.
// Purpose: Compile `in` checks and `merge` value unions into rules that bind
//          data values to shared local variables.
// Dependencies: crate::{asp, error, ident, node, value}
// ============================================================================

//! ## Overview
//! Membership binds the single-data side to the local variable `I` and
//! constrains it against the other side: a primitive list becomes the tuple
//! literal `I = (v1;v2;...)`, another data-producing node is bound to the
//! same variable. Merge is a union over possible values of `M`: one rule per
//! data-producing child plus, when literal values exist, one rule binding
//! `M` to their tuple.

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

/// Local variable a membership check binds both sides to.
const IN_TERM_VARIABLE: &str = "I";

/// Local variable a merge binds its value union to.
const MERGE_TERM_VARIABLE: &str = "M";

/// Renders primitives as the ASP tuple literal `(v1;v2;...)`.
fn tuple_literal(values: &[Primitive]) -> String {
    let encoded: Vec<String> = values.iter().map(Primitive::encode).collect();
    format!("({})", encoded.join(";"))
}

/// Whether a membership operand is the collection side regardless of its
/// position: a literal list, or a merge node (a multi-valued union).
fn is_collection_shaped(operand: &Operand) -> bool {
    match operand {
        Operand::List(_) => true,
        Operand::Node(node) => matches!(node.as_ref(), RuleNode::Merge(_)),
        Operand::Value(_) => false,
    }
}

// ============================================================================
// SECTION: Membership
// ============================================================================

/// The collection side of a membership check.
#[derive(Debug, Clone)]
pub enum Haystack {
    /// Literal list of primitive values.
    Values(Vec<Primitive>),
    /// Data-producing node bound to the same local variable as the needle.
    Node(Arc<RuleNode>),
}

impl Haystack {
    /// Structural fingerprint of the haystack.
    ///
    /// Literal lists fingerprint as a multiset; element order is not
    /// semantic for membership.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        match self {
            Self::Values(values) => {
                let mut parts: Vec<u64> = values.iter().map(primitive_fingerprint).collect();
                parts.sort_unstable();
                combine_fingerprint("haystack", &parts)
            }
            Self::Node(node) => node.fingerprint(),
        }
    }
}

/// The value side of a membership check.
#[derive(Debug, Clone)]
pub enum Needle {
    /// Data-producing node bound to the membership variable.
    Node(Arc<RuleNode>),
    /// Primitive constrained against a data-producing haystack.
    Value(Primitive),
}

impl Needle {
    /// Structural fingerprint of the needle.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        match self {
            Self::Node(node) => node.fingerprint(),
            Self::Value(value) => primitive_fingerprint(value),
        }
    }
}

/// Membership check: the needle's value must occur in the haystack.
///
/// # Invariants
/// - At least one side is a data-producing node; a fully literal check is
///   rejected at construction.
#[derive(Debug)]
pub struct InNode {
    /// Unique node identifier.
    node_id: NodeId,
    /// The value side.
    needle: Needle,
    /// The collection side.
    haystack: Haystack,
    /// Structural fingerprint.
    fingerprint: u64,
}

impl InNode {
    /// Builds a membership check from exactly two operands. The collection
    /// side (a literal list or a merge node) may appear in either position;
    /// the remaining operand is the needle.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::InvalidOperandShape`] for any other arity, for
    /// node operands that do not produce a data value, or when neither side
    /// is a data-producing node.
    pub fn new(operands: Vec<Operand>) -> Result<Self, NodeError> {
        let mut operands = operands;
        let (first, second) = match (operands.len(), operands.pop(), operands.pop()) {
            (2, Some(second), Some(first)) => (first, second),
            (count, _, _) => {
                return Err(NodeError::InvalidOperandShape {
                    node: "in",
                    details: format!("expects exactly 2 operands, received {count}"),
                });
            }
        };

        // The collection side is positional only as a tiebreak: when exactly
        // one operand is collection-shaped it is the haystack wherever it
        // appears.
        let (needle_operand, haystack_operand) =
            if is_collection_shaped(&first) && !is_collection_shaped(&second) {
                (second, first)
            } else {
                (first, second)
            };

        let needle = match needle_operand {
            Operand::Node(node) if node.is_data_producing() => Needle::Node(node),
            Operand::Node(node) => {
                return Err(NodeError::InvalidOperandShape {
                    node: "in",
                    details: format!("found unexpected child node type {}", node.operator_name()),
                });
            }
            Operand::Value(value) => Needle::Value(value),
            other @ Operand::List(_) => {
                return Err(NodeError::InvalidOperandShape {
                    node: "in",
                    details: format!("needle must be a node or primitive, received {}", other.describe()),
                });
            }
        };

        let haystack = match haystack_operand {
            Operand::List(values) => Haystack::Values(values),
            Operand::Node(node) if node.is_data_producing() => Haystack::Node(node),
            Operand::Node(node) => {
                return Err(NodeError::InvalidOperandShape {
                    node: "in",
                    details: format!("found unexpected child node type {}", node.operator_name()),
                });
            }
            Operand::Value(value) => Haystack::Values(vec![value]),
        };

        if matches!(needle, Needle::Value(_)) && matches!(haystack, Haystack::Values(_)) {
            return Err(NodeError::InvalidOperandShape {
                node: "in",
                details: "at least one side must reference data".to_string(),
            });
        }

        let fingerprint =
            combine_fingerprint("in", &[needle.fingerprint(), haystack.fingerprint()]);
        Ok(Self {
            node_id: generate_unique_id(),
            needle,
            haystack,
            fingerprint,
        })
    }

    /// Unique node identifier.
    #[must_use]
    pub const fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    /// `in(id)`.
    #[must_use]
    pub fn atom(&self) -> PredicateAtom {
        PredicateAtom::new("in", vec![self.node_id.to_string()])
    }

    /// Node operands, needle first.
    #[must_use]
    pub fn child_nodes(&self) -> Vec<Arc<RuleNode>> {
        let mut nodes = Vec::new();
        if let Needle::Node(node) = &self.needle {
            nodes.push(node.clone());
        }
        if let Haystack::Node(node) = &self.haystack {
            nodes.push(node.clone());
        }
        nodes
    }

    /// One rule binding the data side(s) to `I` and constraining any literal
    /// side against it.
    #[must_use]
    pub fn compile(&self) -> Vec<Statement> {
        let mut body: Vec<Literal> = Vec::new();

        match &self.needle {
            Needle::Node(node) => {
                if let Some(atom) = node.atom_with_variable(IN_TERM_VARIABLE, false) {
                    body.push(Literal::Predicate(atom));
                }
            }
            Needle::Value(value) => {
                body.push(Literal::Comparator(ComparatorAtom::new(
                    IN_TERM_VARIABLE,
                    "=",
                    value.encode(),
                )));
            }
        }

        match &self.haystack {
            Haystack::Values(values) => {
                body.push(Literal::Comparator(ComparatorAtom::new(
                    IN_TERM_VARIABLE,
                    "=",
                    tuple_literal(values),
                )));
            }
            Haystack::Node(node) => {
                if let Some(atom) = node.atom_with_variable(IN_TERM_VARIABLE, false) {
                    body.push(Literal::Predicate(atom));
                }
            }
        }

        vec![Statement::rule(self.atom(), body)]
    }

    /// Structural fingerprint.
    #[must_use]
    pub const fn fingerprint(&self) -> u64 {
        self.fingerprint
    }
}

// ============================================================================
// SECTION: Merge
// ============================================================================

/// One contribution to a merge's value union.
#[derive(Debug, Clone)]
pub enum MergeItem {
    /// Data-producing node contributing its bound value.
    Node(Arc<RuleNode>),
    /// Literal value contributing itself.
    Value(Primitive),
}

impl MergeItem {
    /// Structural fingerprint of the item.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        match self {
            Self::Node(node) => node.fingerprint(),
            Self::Value(value) => primitive_fingerprint(value),
        }
    }
}

/// Union over possible values: data-sourced and literal alike.
///
/// # Invariants
/// - One level of literal list nesting is flattened at construction.
/// - Items are deduplicated structurally; first-seen order is kept.
#[derive(Debug)]
pub struct MergeNode {
    /// Unique node identifier.
    node_id: NodeId,
    /// Registered items in first-seen order.
    items: Vec<MergeItem>,
    /// Structural fingerprint.
    fingerprint: u64,
}

impl MergeNode {
    /// Builds a merge from its operand list, flattening literal lists one
    /// level deep.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::InvalidOperandShape`] when no items remain or a
    /// node operand does not produce a data value.
    pub fn new(operands: Vec<Operand>) -> Result<Self, NodeError> {
        let mut items: Vec<MergeItem> = Vec::new();
        let push = |item: MergeItem, items: &mut Vec<MergeItem>| {
            let fingerprint = item.fingerprint();
            if !items.iter().any(|seen| seen.fingerprint() == fingerprint) {
                items.push(item);
            }
        };

        for operand in operands {
            match operand {
                Operand::Node(node) => {
                    if !node.is_data_producing() {
                        return Err(NodeError::InvalidOperandShape {
                            node: "merge",
                            details: format!(
                                "found unexpected child node type {}",
                                node.operator_name()
                            ),
                        });
                    }
                    push(MergeItem::Node(node), &mut items);
                }
                Operand::Value(value) => push(MergeItem::Value(value), &mut items),
                Operand::List(values) => {
                    for value in values {
                        push(MergeItem::Value(value), &mut items);
                    }
                }
            }
        }

        if items.is_empty() {
            return Err(NodeError::InvalidOperandShape {
                node: "merge",
                details: "requires at least 1 value".to_string(),
            });
        }

        let mut parts: Vec<u64> = items.iter().map(MergeItem::fingerprint).collect();
        parts.sort_unstable();
        let fingerprint = combine_fingerprint("merge", &parts);
        Ok(Self {
            node_id: generate_unique_id(),
            items,
            fingerprint,
        })
    }

    /// Unique node identifier.
    #[must_use]
    pub const fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    /// `merge(id, M)`: the union bound to its default variable.
    #[must_use]
    pub fn atom(&self) -> PredicateAtom {
        self.atom_with_variable(MERGE_TERM_VARIABLE, false)
    }

    /// The union with its output rebound to a caller-local variable.
    #[must_use]
    pub fn atom_with_variable(&self, variable: &str, negated: bool) -> PredicateAtom {
        PredicateAtom {
            predicate: "merge".to_string(),
            terms: vec![self.node_id.to_string(), variable.to_string()],
            negated,
        }
    }

    /// Node items in first-seen order.
    #[must_use]
    pub fn child_nodes(&self) -> Vec<Arc<RuleNode>> {
        self.items
            .iter()
            .filter_map(|item| match item {
                MergeItem::Node(node) => Some(node.clone()),
                MergeItem::Value(_) => None,
            })
            .collect()
    }

    /// One rule per data-sourced item plus, when literal values exist, one
    /// rule binding `M` to their tuple.
    #[must_use]
    pub fn compile(&self) -> Vec<Statement> {
        let mut statements = Vec::new();
        let mut values: Vec<Primitive> = Vec::new();

        for item in &self.items {
            match item {
                MergeItem::Node(node) => {
                    if let Some(atom) = node.atom_with_variable(MERGE_TERM_VARIABLE, false) {
                        let name = match node.as_ref() {
                            RuleNode::Var(var) => var.var_name().to_string(),
                            other => other.operator_name().to_string(),
                        };
                        statements.push(Statement::rule_with_comment(
                            self.atom(),
                            vec![Literal::Predicate(atom)],
                            format!("Merge {name}"),
                        ));
                    }
                }
                MergeItem::Value(value) => values.push(value.clone()),
            }
        }

        if !values.is_empty() {
            statements.push(Statement::rule(
                self.atom(),
                vec![Literal::Comparator(ComparatorAtom::new(
                    MERGE_TERM_VARIABLE,
                    "=",
                    tuple_literal(&values),
                ))],
            ));
        }

        statements
    }

    /// Structural fingerprint.
    #[must_use]
    pub const fn fingerprint(&self) -> u64 {
        self.fingerprint
    }
}
