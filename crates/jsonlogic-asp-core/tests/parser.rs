// crates/jsonlogic-asp-core/tests/parser.rs
// ============================================================================
// Module: Parser Tests
// Description: Tests for rule-tree parsing, interning, and custom operators.
// ============================================================================
//! ## Overview
//! Validates recursive parsing of nested operator mappings, translation-cache
//! interning, the operator vocabulary, and custom operator dispatch.

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

use std::sync::Arc;

use jsonlogic_asp_core::CustomNode;
use jsonlogic_asp_core::CustomOperator;
use jsonlogic_asp_core::CustomOperators;
use jsonlogic_asp_core::NodeError;
use jsonlogic_asp_core::NodeId;
use jsonlogic_asp_core::Operand;
use jsonlogic_asp_core::ParseError;
use jsonlogic_asp_core::PredicateAtom;
use jsonlogic_asp_core::RuleNode;
use jsonlogic_asp_core::Statement;
use jsonlogic_asp_core::TranslationCache;
use jsonlogic_asp_core::constant_token;
use jsonlogic_asp_core::generate_unique_id;
use jsonlogic_asp_core::parse_rule_tree;
use serde_json::json;

/// Parses a tree with a fresh cache and no custom operators.
fn parse(value: &serde_json::Value) -> Result<Arc<RuleNode>, ParseError> {
    let mut cache = TranslationCache::new();
    parse_rule_tree(value, &mut cache, &CustomOperators::new())
}

// ============================================================================
// SECTION: Built-In Operators
// ============================================================================

/// Tests parsing each built-in operator into its node kind.
#[test]
fn test_parse_builtin_operators() {
    let cases = [
        (json!({"var": "age"}), "var"),
        (json!({"missing": ["a", "b"]}), "missing"),
        (json!({"and": [{"var": "a"}, {"var": "b"}]}), "invalid"),
        (json!({"==": [{"var": "a"}, 1]}), "eq"),
        (json!({"!=": [{"var": "a"}, 1]}), "neq"),
        (json!({"===": [{"var": "a"}, 1]}), "seq"),
        (json!({"!==": [{"var": "a"}, 1]}), "sneq"),
        (json!({"<": [{"var": "a"}, 1]}), "lt"),
        (json!({"<=": [{"var": "a"}, 1]}), "lte"),
        (json!({">": [{"var": "a"}, 1]}), "gt"),
        (json!({">=": [{"var": "a"}, 1]}), "gte"),
        (json!({"in": [{"var": "a"}, ["x"]]}), "in"),
        (json!({"merge": [{"var": "a"}, 1]}), "merge"),
        (json!({"if": [{">": [{"var": "a"}, 1]}, true]}), "if"),
    ];
    for (tree, expected) in cases {
        let result = parse(&tree);
        if expected == "invalid" {
            // Boolean trees reject data-producing children.
            assert!(result.is_err());
        } else {
            assert_eq!(result.unwrap().operator_name(), expected);
        }
    }
}

/// Tests that and/or accept comparison children and boolean literals.
#[test]
fn test_parse_and_with_literals() {
    let tree = json!({"and": [{">=": [{"var": "age"}, 18]}, true]});
    let node = parse(&tree).unwrap();
    assert_eq!(node.operator_name(), "and");
    assert_eq!(node.child_nodes().len(), 1);
}

/// Tests that a membership check accepts its literal list in either position.
#[test]
fn test_parse_in_with_list_first() {
    let node = parse(&json!({"in": [["A", "B"], {"var": "a"}]})).unwrap();
    assert_eq!(node.operator_name(), "in");
    let line = node.compile()[0].render();
    assert!(line.contains(&format!("var({}, I)", constant_token("a"))));
    assert!(line.contains(&format!(
        "I = ({};{})",
        constant_token("A"),
        constant_token("B")
    )));
}

/// Tests that a single negation over a literal parses through the helper.
#[test]
fn test_parse_negation_of_literal() {
    let node = parse(&json!({"!": true})).unwrap();
    assert_eq!(node.operator_name(), "neg");
    let line = node.compile()[0].render();
    assert!(line.contains(":- not bool(true)."));
}

/// Tests that double negation parses as two stacked negations.
#[test]
fn test_parse_double_negation() {
    let node = parse(&json!({"!!": {">=": [{"var": "a"}, 1]}})).unwrap();
    assert_eq!(node.operator_name(), "neg");
    let inner = &node.child_nodes()[0];
    assert_eq!(inner.operator_name(), "neg");
    assert_eq!(inner.child_nodes()[0].operator_name(), "gte");
}

// ============================================================================
// SECTION: Interning
// ============================================================================

/// Tests that structurally identical subtrees intern to one instance.
#[test]
fn test_identical_subtrees_intern() {
    let mut cache = TranslationCache::new();
    let custom = CustomOperators::new();
    let tree = json!({">=": [{"var": "age"}, 18]});
    let first = parse_rule_tree(&tree, &mut cache, &custom).unwrap();
    let second = parse_rule_tree(&tree, &mut cache, &custom).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

/// Tests that independent caches never share instances.
#[test]
fn test_fresh_cache_rebuilds_nodes() {
    let tree = json!({">=": [{"var": "age"}, 18]});
    let first = parse(&tree).unwrap();
    let second = parse(&tree).unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert_ne!(first.node_id(), second.node_id());
    assert_eq!(first.fingerprint(), second.fingerprint());
}

/// Tests that duplicate children inside one tree collapse via interning.
#[test]
fn test_duplicate_children_collapse() {
    let tree = json!({"or": [
        {">=": [{"var": "age"}, 18]},
        {">=": [{"var": "age"}, 18]},
    ]});
    let node = parse(&tree).unwrap();
    assert_eq!(node.child_nodes().len(), 1);
}

// ============================================================================
// SECTION: Vocabulary & Errors
// ============================================================================

/// Tests that enumerated-but-uncompilable operators are rejected.
#[test]
fn test_enumerated_operators_without_support() {
    for key in ["+", "-", "*", "/", "%", "map", "reduce", "filter", "cat", "substr"] {
        let result = parse(&json!({ key: [1, 2] }));
        assert!(
            matches!(result, Err(ParseError::UnsupportedOperator { ref operator }) if operator == key)
        );
    }
}

/// Tests that unknown operators are rejected, including nested ones.
#[test]
fn test_unknown_operator() {
    assert!(matches!(
        parse(&json!({"frobnicate": 1})),
        Err(ParseError::UnsupportedOperator { .. })
    ));
    assert!(matches!(
        parse(&json!({"==": [{"var": "a"}, {"bogus": 1}]})),
        Err(ParseError::UnsupportedOperator { ref operator }) if operator == "bogus"
    ));
}

/// Tests that non-single-key nodes are malformed.
#[test]
fn test_malformed_nodes() {
    assert!(matches!(
        parse(&json!({"var": "a", "missing": "b"})),
        Err(ParseError::MalformedNode { .. })
    ));
    assert!(matches!(
        parse(&json!([1, 2])),
        Err(ParseError::MalformedNode { .. })
    ));
    assert!(matches!(parse(&json!(42)), Err(ParseError::MalformedNode { .. })));
}

/// Tests that constructor rejections surface through the parser.
#[test]
fn test_constructor_errors_propagate() {
    assert!(matches!(
        parse(&json!({"var": 42})),
        Err(ParseError::Node(NodeError::InvalidOperandShape { .. }))
    ));
}

// ============================================================================
// SECTION: Custom Operators
// ============================================================================

/// Custom node asserting a single fact.
#[derive(Debug)]
struct FlagNode {
    /// Unique node identifier.
    node_id: NodeId,
}

impl CustomNode for FlagNode {
    fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    fn operator_name(&self) -> &str {
        "flag"
    }

    fn atom(&self) -> PredicateAtom {
        PredicateAtom::new("flag", vec![self.node_id.to_string()])
    }

    fn compile(&self) -> Vec<Statement> {
        vec![Statement::fact(self.atom())]
    }

    fn child_nodes(&self) -> Vec<Arc<RuleNode>> {
        Vec::new()
    }

    fn fingerprint(&self) -> u64 {
        0x666c_6167
    }
}

/// Factory for [`FlagNode`].
struct FlagOperator;

impl CustomOperator for FlagOperator {
    fn build(&self, _operands: Vec<Operand>) -> Result<Arc<dyn CustomNode>, NodeError> {
        Ok(Arc::new(FlagNode {
            node_id: generate_unique_id(),
        }))
    }
}

/// Tests custom operator registration, dispatch, and nesting.
#[test]
fn test_custom_operator_dispatch() {
    let mut custom = CustomOperators::new();
    custom.register("flag", Arc::new(FlagOperator));
    let mut cache = TranslationCache::new();

    let tree = json!({"and": [{"flag": 1}, {">=": [{"var": "a"}, 1]}]});
    let node = parse_rule_tree(&tree, &mut cache, &custom).unwrap();
    assert_eq!(node.operator_name(), "and");
    let lines = node.emit(false);
    assert!(lines.iter().any(|line| line.starts_with("flag(n")));
}

/// Tests that unregistered custom keys stay unsupported.
#[test]
fn test_custom_operator_requires_registration() {
    assert!(matches!(
        parse(&json!({"flag": 1})),
        Err(ParseError::UnsupportedOperator { .. })
    ));
}
