// crates/jsonlogic-asp-clingo/tests/evaluator.rs
// ============================================================================
// Module: Evaluator Tests
// Description: Tests for program composition and rule-id mapping.
// ============================================================================
//! ## Overview
//! Validates the evaluation façade against a scripted in-memory solver, plus
//! end-to-end scenarios that run only when a clingo binary is on `PATH`.

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

use std::cell::RefCell;
use std::process::Command;

use jsonlogic_asp_clingo::AnswerSetSolver;
use jsonlogic_asp_clingo::ClingoSolver;
use jsonlogic_asp_clingo::Evaluator;
use jsonlogic_asp_clingo::SolveOutcome;
use jsonlogic_asp_clingo::SolveStatus;
use jsonlogic_asp_clingo::compose_program;
use jsonlogic_asp_core::DataInput;
use jsonlogic_asp_core::RuleInput;
use jsonlogic_asp_core::constant_token;
use serde_json::json;

// ============================================================================
// SECTION: Scripted Solver
// ============================================================================

/// Solver that replays a fixed outcome and records submitted programs.
struct ScriptedSolver {
    /// Outcome returned from every solve call.
    outcome: SolveOutcome,
    /// Programs received, in call order.
    programs: RefCell<Vec<String>>,
}

impl ScriptedSolver {
    /// Creates a solver replaying the given outcome.
    fn new(outcome: SolveOutcome) -> Self {
        Self {
            outcome,
            programs: RefCell::new(Vec::new()),
        }
    }

    /// Creates a satisfiable solver matching the given tokens.
    fn satisfiable(tokens: &[&str]) -> Self {
        Self::new(SolveOutcome {
            status: SolveStatus::Satisfiable,
            matched_tokens: tokens.iter().map(ToString::to_string).collect(),
        })
    }
}

impl AnswerSetSolver for ScriptedSolver {
    fn solve(&self, program: &str) -> SolveOutcome {
        self.programs.borrow_mut().push(program.to_string());
        self.outcome.clone()
    }
}

/// Builds a rule input.
fn rule(rule_id: &str, tree: serde_json::Value) -> RuleInput {
    RuleInput {
        rule_id: rule_id.to_string(),
        rule_tree: tree,
    }
}

/// Builds a data input.
fn data(value: serde_json::Value) -> DataInput {
    DataInput {
        data_id: "record".to_string(),
        data_object: value,
    }
}

// ============================================================================
// SECTION: Composition & Mapping
// ============================================================================

/// Tests that satisfied tokens map back to caller rule ids.
#[test]
fn test_tokens_map_to_rule_ids() {
    let token = constant_token("adult");
    let solver = ScriptedSolver::satisfiable(&[&token, "sunknowntoken"]);
    let evaluator = Evaluator::new(solver);

    let matched = evaluator
        .evaluate_many(
            &[rule("adult", json!({">=": [{"var": "age"}, 18]}))],
            &data(json!({"age": 30})),
        )
        .unwrap();
    // Unmapped tokens pass through verbatim.
    assert_eq!(matched, vec!["adult".to_string(), "sunknowntoken".to_string()]);
}

/// Tests that unsatisfiable and error outcomes both yield no matches.
#[test]
fn test_unsat_and_error_collapse_to_empty() {
    for status in [SolveStatus::Unsatisfiable, SolveStatus::Error] {
        let solver = ScriptedSolver::new(SolveOutcome {
            status,
            matched_tokens: Vec::new(),
        });
        let evaluator = Evaluator::new(solver);
        let matched = evaluator
            .evaluate_many(
                &[rule("adult", json!({">=": [{"var": "age"}, 18]}))],
                &data(json!({"age": 30})),
            )
            .unwrap();
        assert!(matched.is_empty());
    }
}

/// Tests the composed program layout: data, rules, then the show directive.
#[test]
fn test_program_composition() {
    let solver = ScriptedSolver::satisfiable(&[]);
    let evaluator = Evaluator::new(solver);
    evaluator
        .evaluate_many(
            &[rule("adult", json!({">=": [{"var": "age"}, 18]}))],
            &data(json!({"age": 30})),
        )
        .unwrap();

    let programs = evaluator_programs(&evaluator);
    assert_eq!(programs.len(), 1);
    let program = &programs[0];
    assert!(program.ends_with("#show rule/1."));
    let age_fact = format!("var({}, 30).", constant_token("age"));
    let segments: Vec<&str> = program.split("\n\n\n").collect();
    assert_eq!(segments.len(), 3);
    assert!(segments[0].contains(&age_fact));
    assert!(segments[1].contains("rule("));
}

/// Returns the programs recorded by a scripted-solver evaluator.
fn evaluator_programs(evaluator: &Evaluator<ScriptedSolver>) -> Vec<String> {
    evaluator.solver().programs.borrow().clone()
}

/// Tests that rules folded to boolean literals bypass the solver.
#[test]
fn test_simplify_pass_folds_constants() {
    let solver = ScriptedSolver::satisfiable(&[]);
    let evaluator = Evaluator::new(solver);
    let matched = evaluator
        .evaluate_many(
            &[
                rule("never", json!({"and": [{">=": [{"var": "age"}, 18]}, false]})),
                rule("always", json!({"or": [{">=": [{"var": "age"}, 18]}, true]})),
            ],
            &data(json!({"age": 30})),
        )
        .unwrap();
    assert_eq!(matched, vec!["always".to_string()]);
    // Nothing compilable remained, so no solve call happened.
    assert!(evaluator_programs(&evaluator).is_empty());
}

/// Tests the invalid-tree failure path.
#[test]
fn test_parse_errors_propagate() {
    let solver = ScriptedSolver::satisfiable(&[]);
    let evaluator = Evaluator::new(solver).simplify_first(false);
    let result = evaluator.evaluate_many(
        &[rule("broken", json!({"frobnicate": 1}))],
        &data(json!({"age": 30})),
    );
    assert!(result.is_err());
}

/// Tests precompiled evaluation with and without a mapping.
#[test]
fn test_evaluate_precompiled() {
    let token = constant_token("adult");
    let solver = ScriptedSolver::satisfiable(&[&token]);
    let evaluator = Evaluator::new(solver);

    let mapping = std::collections::HashMap::from([(token.clone(), "adult".to_string())]);
    let program = format!("rule({token}).");
    let matched =
        evaluator.evaluate_precompiled(&program, Some(&mapping), &data(json!({"age": 30})));
    assert_eq!(matched, vec!["adult".to_string()]);

    let unmapped = evaluator.evaluate_precompiled(&program, None, &data(json!({"age": 30})));
    assert_eq!(unmapped, vec![token]);
}

/// Tests standalone program composition with an empty data segment.
#[test]
fn test_compose_skips_empty_segments() {
    let composed = compose_program("", "rule(sabc).");
    assert_eq!(composed, "rule(sabc).\n\n\n#show rule/1.");
}

// ============================================================================
// SECTION: End-To-End (clingo)
// ============================================================================

/// Whether a clingo binary is available on `PATH`.
fn clingo_available() -> bool {
    Command::new("clingo")
        .arg("--version")
        .output()
        .is_ok_and(|output| output.status.success())
}

/// Tests comparison and membership rules end-to-end against clingo.
#[test]
fn test_end_to_end_matching() {
    if !clingo_available() {
        eprintln!("skipping: clingo not found on PATH");
        return;
    }

    let evaluator = Evaluator::new(ClingoSolver::new());
    let rules = [
        rule("adult", json!({">=": [{"var": "age"}, 18]})),
        rule(
            "likes_fruit",
            json!({"in": [{"var": "fruit"}, ["apple", "banana"]]}),
        ),
        rule("senior", json!({">=": [{"var": "age"}, 65]})),
    ];

    let matched = evaluator
        .evaluate_many(&rules, &data(json!({"age": 30, "fruit": "apple"})))
        .unwrap();
    assert!(matched.contains(&"adult".to_string()));
    assert!(matched.contains(&"likes_fruit".to_string()));
    assert!(!matched.contains(&"senior".to_string()));
}

/// Tests missing-field semantics end-to-end against clingo.
#[test]
fn test_end_to_end_missing() {
    if !clingo_available() {
        eprintln!("skipping: clingo not found on PATH");
        return;
    }

    let evaluator = Evaluator::new(ClingoSolver::new());
    let rules = [rule("incomplete", json!({"missing": ["name", "email"]}))];

    let matched = evaluator
        .evaluate_many(&rules, &data(json!({"age": 30})))
        .unwrap();
    assert_eq!(matched, vec!["incomplete".to_string()]);

    let unmatched = evaluator
        .evaluate_many(&rules, &data(json!({"name": "ada", "email": "a@b"})))
        .unwrap();
    assert!(unmatched.is_empty());
}

/// Tests conditional branch selection end-to-end against clingo.
#[test]
fn test_end_to_end_conditional() {
    if !clingo_available() {
        eprintln!("skipping: clingo not found on PATH");
        return;
    }

    let evaluator = Evaluator::new(ClingoSolver::new());
    let rules = [rule(
        "branchy",
        json!({"if": [
            {"==": [{"var": "a"}, 1]}, true,
            {"==": [{"var": "a"}, 2]}, false,
            true,
        ]}),
    )];

    for (value, expected) in [(1, true), (2, false), (3, true)] {
        let matched = evaluator
            .evaluate_one(&rules[0], &data(json!({"a": value})))
            .unwrap();
        assert_eq!(matched, expected, "branch selection for a = {value}");
    }
}
