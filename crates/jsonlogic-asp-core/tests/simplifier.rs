// crates/jsonlogic-asp-core/tests/simplifier.rs
// ============================================================================
// Module: Simplifier Tests
// Description: Tests for pre-parse boolean algebra rewrites.
// ============================================================================
//! ## Overview
//! Validates constant folding, same-operator flattening, short-circuits, and
//! negation folding on the nested-mapping representation.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use jsonlogic_asp_core::simplify;
use serde_json::json;

// ============================================================================
// SECTION: Conjunction / Disjunction
// ============================================================================

/// Tests that a false element short-circuits a conjunction.
#[test]
fn test_and_short_circuits_on_false() {
    let tree = json!({"and": [{">=": [{"var": "a"}, 1]}, false]});
    assert_eq!(simplify(&tree), json!(false));
}

/// Tests that true elements drop out of a conjunction.
#[test]
fn test_and_drops_true_elements() {
    let tree = json!({"and": [true, {">=": [{"var": "a"}, 1]}, true]});
    assert_eq!(simplify(&tree), json!({">=": [{"var": "a"}, 1]}));
}

/// Tests that a true element short-circuits a disjunction.
#[test]
fn test_or_short_circuits_on_true() {
    let tree = json!({"or": [{">=": [{"var": "a"}, 1]}, true]});
    assert_eq!(simplify(&tree), json!(true));
}

/// Tests that false elements drop out of a disjunction.
#[test]
fn test_or_drops_false_elements() {
    let tree = json!({"or": [false, {">=": [{"var": "a"}, 1]}]});
    assert_eq!(simplify(&tree), json!({">=": [{"var": "a"}, 1]}));
}

/// Tests that empty groups collapse to false for both operators.
#[test]
fn test_empty_groups_are_false() {
    assert_eq!(simplify(&json!({"and": []})), json!(false));
    assert_eq!(simplify(&json!({"or": []})), json!(false));
    assert_eq!(simplify(&json!({"and": [true, true]})), json!(false));
}

/// Tests that nested same-operator groups flatten into the parent.
#[test]
fn test_same_operator_flattening() {
    let tree = json!({"and": [
        {"and": [{">": [{"var": "a"}, 1]}, {">": [{"var": "b"}, 2]}]},
        {">": [{"var": "c"}, 3]},
    ]});
    let simplified = simplify(&tree);
    assert_eq!(
        simplified,
        json!({"and": [
            {">": [{"var": "a"}, 1]},
            {">": [{"var": "b"}, 2]},
            {">": [{"var": "c"}, 3]},
        ]})
    );
}

/// Tests that non-boolean primitives pass through and/or untouched.
#[test]
fn test_non_boolean_primitives_pass_through() {
    let tree = json!({"and": [0, {">": [{"var": "a"}, 1]}]});
    let simplified = simplify(&tree);
    assert_eq!(simplified, json!({"and": [0, {">": [{"var": "a"}, 1]}]}));
}

/// Tests singleton unwrap after filtering.
#[test]
fn test_singleton_unwrap() {
    let tree = json!({"and": {">": [{"var": "a"}, 1]}});
    assert_eq!(simplify(&tree), json!({">": [{"var": "a"}, 1]}));
}

// ============================================================================
// SECTION: Negation
// ============================================================================

/// Tests folding single negation of primitives via truthiness.
#[test]
fn test_single_negation_folds_primitives() {
    assert_eq!(simplify(&json!({"!": true})), json!(false));
    assert_eq!(simplify(&json!({"!": 0})), json!(true));
    assert_eq!(simplify(&json!({"!": "nonempty"})), json!(false));
    assert_eq!(simplify(&json!({"!": null})), json!(true));
}

/// Tests folding double negation of primitives via truthiness.
#[test]
fn test_double_negation_folds_primitives() {
    assert_eq!(simplify(&json!({"!!": true})), json!(true));
    assert_eq!(simplify(&json!({"!!": ""})), json!(false));
    assert_eq!(simplify(&json!({"!!": 7})), json!(true));
}

/// Tests the empty-array operand parity rule.
#[test]
fn test_negation_of_empty_array() {
    assert_eq!(simplify(&json!({"!": []})), json!(true));
    assert_eq!(simplify(&json!({"!!": []})), json!(false));
}

/// Tests that negation recurses into a foldable nested operand.
#[test]
fn test_negation_folds_nested_group() {
    let tree = json!({"!": {"and": [true, false]}});
    assert_eq!(simplify(&tree), json!(true));
}

/// Tests that unfoldable negation keeps its simplified operand.
#[test]
fn test_negation_keeps_unfoldable_operand() {
    let tree = json!({"!": {"and": [true, {">": [{"var": "a"}, 1]}]}});
    assert_eq!(simplify(&tree), json!({"!": {">": [{"var": "a"}, 1]}}));
}

/// Tests that a multi-element array operand to negation passes through for
/// the parser to reject, rather than losing operands silently.
#[test]
fn test_negation_keeps_multi_element_array() {
    let tree = json!({"!": [true, false]});
    assert_eq!(simplify(&tree), tree);
}

// ============================================================================
// SECTION: Pass-Through
// ============================================================================

/// Tests that non-simplifiable operators return unchanged.
#[test]
fn test_other_operators_unchanged() {
    let tree = json!({"if": [{">": [{"var": "a"}, 1]}, true, false]});
    assert_eq!(simplify(&tree), tree);
    let compare = json!({"==": [{"var": "a"}, 1]});
    assert_eq!(simplify(&compare), compare);
}
