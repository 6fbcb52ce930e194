// crates/jsonlogic-asp-core/src/simplifier.rs
// ============================================================================
// Module: Simplifier
// Description: Pre-parse algebraic simplification of boolean expressions.
// Purpose: Fold constants, flatten nested same-operator groups, and
//          short-circuit and/or/not before the tree reaches the parser.
// Dependencies: crate::value, serde_json, tracing
// ============================================================================

//! ## Overview
//! The simplifier rewrites the nested-mapping representation, not typed
//! nodes, so it runs before parsing and is purely optional: compiled output
//! is semantically identical with or without it, modulo which structurally
//! dead branches reach the parser.
//!
//! Only boolean literals participate in and/or filtering; other primitives
//! pass through untouched. Negation folding, by contrast, coerces any
//! primitive operand through JSON-Logic truthiness.
//!
//! Zero remaining children collapse to `false` for `and` and `or` alike.
//! That is asymmetric with classical logic's empty conjunction but matches
//! the compiled behavior, where a childless node is never satisfiable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use serde_json::json;
use tracing::debug;

use crate::value::Primitive;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Simplifies one rule-tree node, recursing through and/or/not structure.
///
/// Nodes whose operator is not simplifiable are returned unchanged.
#[must_use]
pub fn simplify(node: &Value) -> Value {
    let Value::Object(map) = node else {
        return node.clone();
    };
    let Some((key, operand)) = map.iter().next().filter(|_| map.len() == 1) else {
        return node.clone();
    };

    match key.as_str() {
        "and" | "or" => simplify_and_or(key, operand),
        "!" => simplify_negation(operand, true),
        "!!" => simplify_negation(operand, false),
        _ => node.clone(),
    }
}

// ============================================================================
// SECTION: Conjunction / Disjunction
// ============================================================================

/// Flattens, folds, and short-circuits an and/or group.
fn simplify_and_or(key: &str, operand: &Value) -> Value {
    let elements: Vec<&Value> = match operand {
        Value::Array(items) => items.iter().collect(),
        single => vec![single],
    };

    // Short-circuit literal: false for and, true for or.
    let absorbing = key == "or";

    let mut remaining: Vec<Value> = Vec::with_capacity(elements.len());
    for element in elements {
        let simplified = simplify(element);

        // Same-operator nesting flattens into the parent's operand list.
        if let Value::Object(map) = &simplified
            && map.len() == 1
            && let Some(Value::Array(inner)) = map.get(key)
        {
            remaining.extend(inner.iter().cloned());
            continue;
        }

        if let Value::Bool(literal) = simplified {
            if literal == absorbing {
                debug!(operator = key, "short-circuited to literal");
                return Value::Bool(absorbing);
            }
            continue;
        }
        remaining.push(simplified);
    }

    match remaining.len() {
        0 => Value::Bool(false),
        1 => remaining.remove(0),
        _ => json!({ key: remaining }),
    }
}

// ============================================================================
// SECTION: Negation
// ============================================================================

/// Folds single (`invert == true`) or double (`invert == false`) negation.
fn simplify_negation(operand: &Value, invert: bool) -> Value {
    let inner: &Value = match operand {
        // An empty array operand is falsy, so it folds directly.
        Value::Array(items) if items.is_empty() => return Value::Bool(invert),
        Value::Array(items) if items.len() == 1 => &items[0],
        Value::Array(_) => return rebuild_negation(operand.clone(), invert),
        single => single,
    };

    if let Some(primitive) = Primitive::from_json(inner) {
        let truthy = primitive.is_truthy();
        debug!(truthy, invert, "folded negation of primitive");
        return Value::Bool(if invert { !truthy } else { truthy });
    }

    let simplified = simplify(inner);
    if let Value::Bool(literal) = simplified {
        return Value::Bool(if invert { !literal } else { literal });
    }
    rebuild_negation(simplified, invert)
}

/// Rebuilds the unfoldable negation node around a simplified operand.
fn rebuild_negation(operand: Value, invert: bool) -> Value {
    if invert {
        json!({ "!": operand })
    } else {
        json!({ "!!": operand })
    }
}
