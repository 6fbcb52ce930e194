// crates/jsonlogic-asp-core/src/parser.rs
// ============================================================================
// Module: Tree Parser
// Description: Recursive rule-tree parsing with structural interning.
// Purpose: Turn nested operator mappings into typed nodes, collapsing
//          structurally identical subtrees through a per-call cache.
// Dependencies: crate::{error, node, value}, serde_json, tracing
// ============================================================================

//! ## Overview
//! A rule tree is a nested single-key JSON object mapping an operator key to
//! its operand(s). Parsing walks the tree bottom-up: operands that are
//! themselves operator mappings parse recursively, primitives and literal
//! lists pass through, and the resulting node is interned in a
//! [`TranslationCache`] keyed by structural fingerprint.
//!
//! The cache is owned by exactly one assembler call. Sharing it across
//! independent compilations would leak node identifiers between programs and
//! make deduplication stale, so callers construct a fresh cache per batch.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::error::NodeError;
use crate::error::ParseError;
use crate::node::AndNode;
use crate::node::BoolNode;
use crate::node::CompareNode;
use crate::node::CompareOp;
use crate::node::ConditionalNode;
use crate::node::CustomOperators;
use crate::node::InNode;
use crate::node::MergeNode;
use crate::node::MissingNode;
use crate::node::NotNode;
use crate::node::Operand;
use crate::node::OrNode;
use crate::node::RuleNode;
use crate::node::TreeChild;
use crate::node::VarNode;
use crate::value::Primitive;

// ============================================================================
// SECTION: Operator Vocabulary
// ============================================================================

/// Operator keys with compiler support.
const BUILTIN_OPERATORS: &[&str] = &[
    "var", "missing", "and", "or", "!", "!!", "==", "!=", "===", "!==", "<", "<=", ">", ">=",
    "in", "merge", "if",
];

/// Operator keys enumerated in the rule-tree vocabulary that have no
/// compiler support: arithmetic, string, and array higher-order operators.
const UNSUPPORTED_OPERATORS: &[&str] = &[
    "+", "-", "*", "/", "%", "min", "max", "?:", "map", "reduce", "filter", "all", "none",
    "some", "cat", "substr", "log", "missing_some",
];

/// Whether a key belongs to the combined operator vocabulary.
fn in_vocabulary(key: &str, custom_operators: &CustomOperators) -> bool {
    BUILTIN_OPERATORS.contains(&key)
        || UNSUPPORTED_OPERATORS.contains(&key)
        || custom_operators.contains(key)
}

/// Whether a JSON value is a single-key object whose key is in the combined
/// operator vocabulary.
fn is_operator_mapping(value: &Value, custom_operators: &CustomOperators) -> bool {
    match value {
        Value::Object(map) => {
            map.len() == 1
                && map
                    .keys()
                    .next()
                    .is_some_and(|key| in_vocabulary(key, custom_operators))
        }
        _ => false,
    }
}

/// Short description of a JSON value's shape for diagnostics.
fn describe_json(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "a boolean".to_string(),
        Value::Number(_) => "a number".to_string(),
        Value::String(_) => "a string".to_string(),
        Value::Array(items) => format!("an array of {} items", items.len()),
        Value::Object(map) => format!("an object with {} keys", map.len()),
    }
}

// ============================================================================
// SECTION: Translation Cache
// ============================================================================

/// Per-compilation interning table from structural fingerprint to the
/// canonical node already built for that fingerprint.
///
/// # Invariants
/// - Scoped to exactly one assembler call; never shared across independent
///   compilations.
#[derive(Debug, Default)]
pub struct TranslationCache {
    /// Canonical nodes by structural fingerprint.
    nodes: HashMap<u64, Arc<RuleNode>>,
}

impl TranslationCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns a freshly built node: returns the cached canonical instance
    /// for its fingerprint when one exists, discarding the new node,
    /// otherwise registers and returns the new node.
    #[must_use]
    pub fn intern(&mut self, node: RuleNode) -> Arc<RuleNode> {
        let fingerprint = node.fingerprint();
        if let Some(existing) = self.nodes.get(&fingerprint) {
            debug!(fingerprint, operator = existing.operator_name(), "translation cache hit");
            return Arc::clone(existing);
        }
        let node = Arc::new(node);
        self.nodes.insert(fingerprint, Arc::clone(&node));
        node
    }

    /// Number of distinct interned nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the cache holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

// ============================================================================
// SECTION: Parse Entry Point
// ============================================================================

/// Parses one rule-tree node into a typed, interned rule node.
///
/// # Errors
///
/// Returns [`ParseError::MalformedNode`] when the value is not a single-key
/// object, [`ParseError::UnsupportedOperator`] for keys outside the
/// supported vocabulary (including enumerated-but-uncompilable operators),
/// and construction errors from the node constructors.
pub fn parse_rule_tree(
    value: &Value,
    cache: &mut TranslationCache,
    custom_operators: &CustomOperators,
) -> Result<Arc<RuleNode>, ParseError> {
    let Value::Object(map) = value else {
        return Err(ParseError::MalformedNode {
            found: describe_json(value),
        });
    };
    let Some((operator, operand)) = map.iter().next().filter(|_| map.len() == 1) else {
        return Err(ParseError::MalformedNode {
            found: describe_json(value),
        });
    };

    let operands = parse_operands(operand, cache, custom_operators)?;
    build_node(operator, operands, cache, custom_operators)
}

/// Normalizes an operand value to a list and recursively parses every
/// element that is itself an operator mapping.
fn parse_operands(
    operand: &Value,
    cache: &mut TranslationCache,
    custom_operators: &CustomOperators,
) -> Result<Vec<Operand>, ParseError> {
    let elements: Vec<&Value> = match operand {
        Value::Array(items) => items.iter().collect(),
        single => vec![single],
    };

    let mut operands = Vec::with_capacity(elements.len());
    for element in elements {
        operands.push(parse_operand(element, cache, custom_operators)?);
    }
    Ok(operands)
}

/// Parses one operand element: operator mappings recurse, scalars and
/// scalar lists pass through.
fn parse_operand(
    element: &Value,
    cache: &mut TranslationCache,
    custom_operators: &CustomOperators,
) -> Result<Operand, ParseError> {
    if is_operator_mapping(element, custom_operators) {
        return Ok(Operand::Node(parse_rule_tree(element, cache, custom_operators)?));
    }

    match element {
        Value::Object(map) => {
            if let Some(key) = map.keys().next().filter(|_| map.len() == 1) {
                return Err(ParseError::UnsupportedOperator {
                    operator: key.clone(),
                });
            }
            Err(ParseError::MalformedNode {
                found: describe_json(element),
            })
        }
        Value::Array(items) => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                let Some(primitive) = Primitive::from_json(item) else {
                    return Err(ParseError::MalformedNode {
                        found: format!("a list containing {}", describe_json(item)),
                    });
                };
                values.push(primitive);
            }
            Ok(Operand::List(values))
        }
        scalar => Primitive::from_json(scalar).map(Operand::Value).ok_or_else(|| {
            ParseError::MalformedNode {
                found: describe_json(scalar),
            }
        }),
    }
}

// ============================================================================
// SECTION: Node Construction
// ============================================================================

/// Dispatches an operator key to its node constructor and interns the
/// result.
fn build_node(
    operator: &str,
    operands: Vec<Operand>,
    cache: &mut TranslationCache,
    custom_operators: &CustomOperators,
) -> Result<Arc<RuleNode>, ParseError> {
    let node = match operator {
        "var" => RuleNode::Var(VarNode::new(operands)?),
        "missing" => RuleNode::Missing(MissingNode::new(operands)?),
        "and" => RuleNode::And(AndNode::new(tree_children("and", operands)?)?),
        "or" => RuleNode::Or(OrNode::new(tree_children("or", operands)?)?),
        "!" => RuleNode::Not(NotNode::new(negation_children("neg", operands)?)?),
        "!!" => {
            let inner = cache.intern(RuleNode::Not(NotNode::new(negation_children(
                "neg", operands,
            )?)?));
            RuleNode::Not(NotNode::new(vec![inner])?)
        }
        "==" => RuleNode::Compare(CompareNode::new(CompareOp::Eq, operands)?),
        "!=" => RuleNode::Compare(CompareNode::new(CompareOp::Neq, operands)?),
        "===" => RuleNode::Compare(CompareNode::new(CompareOp::Seq, operands)?),
        "!==" => RuleNode::Compare(CompareNode::new(CompareOp::Sneq, operands)?),
        "<" => RuleNode::Compare(CompareNode::new(CompareOp::Lt, operands)?),
        "<=" => RuleNode::Compare(CompareNode::new(CompareOp::Lte, operands)?),
        ">" => RuleNode::Compare(CompareNode::new(CompareOp::Gt, operands)?),
        ">=" => RuleNode::Compare(CompareNode::new(CompareOp::Gte, operands)?),
        "in" => RuleNode::In(InNode::new(operands)?),
        "merge" => RuleNode::Merge(MergeNode::new(operands)?),
        "if" => RuleNode::Conditional(ConditionalNode::new(operands)?),
        key => {
            if let Some(factory) = custom_operators.get(key) {
                RuleNode::Custom(factory.build(operands)?)
            } else {
                return Err(ParseError::UnsupportedOperator {
                    operator: key.to_string(),
                });
            }
        }
    };

    Ok(cache.intern(node))
}

/// Converts operands into boolean-tree children, wrapping boolean literals.
fn tree_children(node: &'static str, operands: Vec<Operand>) -> Result<Vec<TreeChild>, NodeError> {
    let mut children = Vec::with_capacity(operands.len());
    for operand in operands {
        match operand {
            Operand::Node(inner) => children.push(TreeChild::Node(inner)),
            Operand::Value(Primitive::Bool(value)) => children.push(TreeChild::Bool(value)),
            other => {
                return Err(NodeError::InvalidOperandShape {
                    node,
                    details: format!(
                        "expected node or boolean literal, received {}",
                        other.describe()
                    ),
                });
            }
        }
    }
    Ok(children)
}

/// Converts operands into negation children, wrapping boolean literals in
/// the `bool` helper node.
fn negation_children(
    node: &'static str,
    operands: Vec<Operand>,
) -> Result<Vec<Arc<RuleNode>>, NodeError> {
    let mut children = Vec::with_capacity(operands.len());
    for operand in operands {
        match operand {
            Operand::Node(inner) => children.push(inner),
            Operand::Value(Primitive::Bool(value)) => {
                children.push(Arc::new(RuleNode::Bool(BoolNode::new(value))));
            }
            other => {
                return Err(NodeError::InvalidOperandShape {
                    node,
                    details: format!(
                        "expected node or boolean literal, received {}",
                        other.describe()
                    ),
                });
            }
        }
    }
    Ok(children)
}
