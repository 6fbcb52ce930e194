// crates/jsonlogic-asp-core/src/program.rs
// ============================================================================
// Module: Program Assembler
// Description: Batch compilation of rule trees and data records to text.
// Purpose: Emit deduplicated rule programs with an out-of-band token
//          mapping, and flatten data records into var/2 fact programs.
// Dependencies: crate::{asp, error, ident, node, parser, value}, serde,
//               serde_json, tracing
// ============================================================================

//! ## Overview
//! One assembler call owns one translation cache, shared across every rule
//! in the batch so identical subtrees in *different* rules also collapse.
//! Each rule contributes its emitted statements plus one
//! `rule(token) :- <root atom>.` bridge, where the token is the rule id's
//! constant token; the token-to-id mapping travels out-of-band because the
//! program text must stay solver-safe.
//!
//! Data records flatten depth-first: object keys join with `.`, array
//! indices with `_`, and each leaf becomes one `var(token(path), value).`
//! fact. Duplicate lines are dropped preserving first-seen order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::asp::Literal;
use crate::asp::PredicateAtom;
use crate::asp::Statement;
use crate::error::ParseError;
use crate::ident::constant_token;
use crate::node::CustomOperators;
use crate::parser::TranslationCache;
use crate::parser::parse_rule_tree;
use crate::value::Primitive;

// ============================================================================
// SECTION: Inputs & Outputs
// ============================================================================

/// One named rule tree submitted for compilation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleInput {
    /// Caller-visible rule identifier.
    pub rule_id: String,
    /// Nested operator expression.
    pub rule_tree: Value,
}

/// One named data record submitted for compilation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataInput {
    /// Caller-visible record identifier.
    pub data_id: String,
    /// Nested key-value structure.
    pub data_object: Value,
}

/// Output of a rule-batch compilation.
#[derive(Debug, Clone)]
pub struct CompiledRules {
    /// Deduplicated program text.
    pub program: String,
    /// Obfuscated rule token back to the caller-supplied rule id.
    pub rule_mapping: HashMap<String, String>,
}

// ============================================================================
// SECTION: Rule Compilation
// ============================================================================

/// Compiles a batch of rule trees into one deduplicated program.
///
/// # Errors
///
/// Returns [`ParseError`] when any rule tree fails to parse; no partial
/// program is produced.
pub fn compile_rule_programs(
    rules: &[RuleInput],
    with_comments: bool,
    custom_operators: &CustomOperators,
) -> Result<CompiledRules, ParseError> {
    let mut cache = TranslationCache::new();
    let mut lines: Vec<String> = Vec::new();
    let mut rule_mapping = HashMap::with_capacity(rules.len());

    for rule in rules {
        let root = parse_rule_tree(&rule.rule_tree, &mut cache, custom_operators)?;
        lines.extend(root.emit(with_comments));

        let token = constant_token(&rule.rule_id);
        let bridge = Statement::rule_with_comment(
            PredicateAtom::new("rule", vec![token.clone()]),
            vec![Literal::Predicate(root.atom())],
            rule.rule_id.clone(),
        );
        if with_comments && let Some(comment) = bridge.comment_line() {
            lines.push(comment);
        }
        lines.push(bridge.render());
        rule_mapping.insert(token, rule.rule_id.clone());
    }

    let deduplicated = dedupe_lines(lines);
    debug!(
        rules = rules.len(),
        interned = cache.len(),
        lines = deduplicated.len(),
        "compiled rule batch"
    );
    Ok(CompiledRules {
        program: deduplicated.join("\n"),
        rule_mapping,
    })
}

// ============================================================================
// SECTION: Data Compilation
// ============================================================================

/// Compiles one data record into a deduplicated fact program.
#[must_use]
pub fn compile_data_program(data: &DataInput, with_comments: bool) -> String {
    let mut facts: Vec<(String, Primitive)> = Vec::new();
    flatten(&data.data_object, String::new(), &mut facts);

    let mut lines: Vec<String> = Vec::with_capacity(facts.len() * 2);
    for (path, value) in facts {
        let statement = Statement::Fact {
            atom: PredicateAtom::new(
                "var",
                vec![constant_token(&path), value.encode()],
            ),
            comment: Some(format!("{path} : {value}")),
        };
        if with_comments && let Some(comment) = statement.comment_line() {
            lines.push(comment);
        }
        lines.push(statement.render());
    }

    let deduplicated = dedupe_lines(lines);
    debug!(
        data_id = %data.data_id,
        lines = deduplicated.len(),
        "compiled data record"
    );
    deduplicated.join("\n")
}

/// Depth-first flattening: object keys join with `.`, array indices with
/// `_`, scalars land as leaves under the accumulated path.
fn flatten(value: &Value, path: String, out: &mut Vec<(String, Primitive)>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten(child, format!("{path}{key}."), out);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten(child, format!("{path}{index}_"), out);
            }
        }
        scalar => {
            if let Some(primitive) = Primitive::from_json(scalar) {
                // The path carries a trailing separator from its last segment.
                let mut key = path;
                key.pop();
                out.push((key, primitive));
            }
        }
    }
}

// ============================================================================
// SECTION: Line Deduplication
// ============================================================================

/// Drops duplicate statement lines preserving first-seen order.
///
/// A comment line travels with the statement line after it: it is kept or
/// dropped together with that statement.
fn dedupe_lines(lines: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(lines.len());
    let mut output: Vec<String> = Vec::with_capacity(lines.len());
    let mut pending_comment: Option<String> = None;

    for line in lines {
        if line.starts_with('%') {
            pending_comment = Some(line);
            continue;
        }
        let comment = pending_comment.take();
        if seen.insert(line.clone()) {
            if let Some(comment) = comment {
                output.push(comment);
            }
            output.push(line);
        }
    }
    output
}
