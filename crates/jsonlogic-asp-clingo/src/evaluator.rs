// crates/jsonlogic-asp-clingo/src/evaluator.rs
// ============================================================================
// Module: Evaluation Façade
// Description: Compile, solve, and map satisfied tokens back to rule ids.
// Purpose: Compose data facts, rule programs, and the show directive into
//          one solver call and report which caller rules matched.
// Dependencies: jsonlogic-asp-core, crate::solver, tracing
// ============================================================================

//! ## Overview
//! The façade is thin by design: simplify (optionally), compile, join the
//! data program, rule program, and `#show rule/1.` directive, solve, and
//! translate satisfied tokens through the rule mapping. Unsatisfiable and
//! error outcomes are the same observable result, an empty match set;
//! "nothing matched" and "the program was broken" are indistinguishable to
//! callers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;

use jsonlogic_asp_core::CustomOperators;
use jsonlogic_asp_core::DataInput;
use jsonlogic_asp_core::ParseError;
use jsonlogic_asp_core::RuleInput;
use jsonlogic_asp_core::Statement;
use jsonlogic_asp_core::compile_data_program;
use jsonlogic_asp_core::compile_rule_programs;
use jsonlogic_asp_core::simplify;
use serde_json::Value;
use tracing::debug;

use crate::solver::AnswerSetSolver;
use crate::solver::SolveStatus;

// ============================================================================
// SECTION: Evaluator
// ============================================================================

/// Rule evaluation façade over an answer-set solver.
///
/// # Invariants
/// - Each evaluation compiles with a fresh translation cache; no state is
///   carried between calls.
#[derive(Debug)]
pub struct Evaluator<S: AnswerSetSolver> {
    /// The solving collaborator.
    solver: S,
    /// Whether rule trees pass through the simplifier before parsing.
    simplify_first: bool,
    /// Whether compiled programs carry informational comments.
    with_comments: bool,
    /// Caller-supplied operator registrations.
    custom_operators: CustomOperators,
}

impl<S: AnswerSetSolver> Evaluator<S> {
    /// Creates an evaluator with simplification on and comments off.
    #[must_use]
    pub fn new(solver: S) -> Self {
        Self {
            solver,
            simplify_first: true,
            with_comments: false,
            custom_operators: CustomOperators::new(),
        }
    }

    /// Sets whether rule trees are simplified before parsing.
    #[must_use]
    pub const fn simplify_first(mut self, simplify_first: bool) -> Self {
        self.simplify_first = simplify_first;
        self
    }

    /// Sets whether compiled programs carry informational comments.
    #[must_use]
    pub const fn with_comments(mut self, with_comments: bool) -> Self {
        self.with_comments = with_comments;
        self
    }

    /// Installs caller-supplied operators consulted during parsing.
    #[must_use]
    pub fn custom_operators(mut self, custom_operators: CustomOperators) -> Self {
        self.custom_operators = custom_operators;
        self
    }

    /// The solving collaborator.
    #[must_use]
    pub const fn solver(&self) -> &S {
        &self.solver
    }

    /// Evaluates a batch of rules against one data record, returning the
    /// ids of the rules the record satisfies.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when any rule tree fails to compile. Solver
    /// failures do not error; they yield an empty match set.
    pub fn evaluate_many(
        &self,
        rules: &[RuleInput],
        data: &DataInput,
    ) -> Result<Vec<String>, ParseError> {
        // Rules the simplifier folds to a bare boolean have no tree left to
        // compile: true matches unconditionally, false never matches.
        let mut always_matched: Vec<String> = Vec::new();
        let mut prepared: Vec<RuleInput> = Vec::with_capacity(rules.len());
        for rule in rules {
            if !self.simplify_first {
                prepared.push(rule.clone());
                continue;
            }
            match simplify(&rule.rule_tree) {
                Value::Bool(true) => always_matched.push(rule.rule_id.clone()),
                Value::Bool(false) => {}
                rule_tree => prepared.push(RuleInput {
                    rule_id: rule.rule_id.clone(),
                    rule_tree,
                }),
            }
        }

        if prepared.is_empty() {
            return Ok(always_matched);
        }

        let compiled =
            compile_rule_programs(&prepared, self.with_comments, &self.custom_operators)?;
        let data_program = compile_data_program(data, self.with_comments);
        let mut matched =
            self.solve_mapped(&data_program, &compiled.program, &compiled.rule_mapping);
        matched.extend(always_matched);
        Ok(matched)
    }

    /// Evaluates a single rule against one data record.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when the rule tree fails to compile.
    pub fn evaluate_one(&self, rule: &RuleInput, data: &DataInput) -> Result<bool, ParseError> {
        let matched = self.evaluate_many(std::slice::from_ref(rule), data)?;
        Ok(matched.iter().any(|id| *id == rule.rule_id))
    }

    /// Evaluates an already-compiled rule program against one data record.
    ///
    /// Satisfied tokens translate through `rule_mapping` when one is given;
    /// unmapped tokens pass through verbatim.
    #[must_use]
    pub fn evaluate_precompiled(
        &self,
        rule_program: &str,
        rule_mapping: Option<&HashMap<String, String>>,
        data: &DataInput,
    ) -> Vec<String> {
        let data_program = compile_data_program(data, self.with_comments);
        let empty = HashMap::new();
        self.solve_mapped(&data_program, rule_program, rule_mapping.unwrap_or(&empty))
    }

    /// Composes the full program, solves it, and maps satisfied tokens.
    fn solve_mapped(
        &self,
        data_program: &str,
        rule_program: &str,
        rule_mapping: &HashMap<String, String>,
    ) -> Vec<String> {
        let program = compose_program(data_program, rule_program);
        let outcome = self.solver.solve(&program);
        debug!(status = ?outcome.status, "evaluation solve finished");

        if outcome.status != SolveStatus::Satisfiable {
            return Vec::new();
        }
        outcome
            .matched_tokens
            .into_iter()
            .map(|token| rule_mapping.get(&token).cloned().unwrap_or(token))
            .collect()
    }
}

// ============================================================================
// SECTION: Program Composition
// ============================================================================

/// Joins the data program, rule program, and show directive with blank-line
/// separators, skipping empty segments.
#[must_use]
pub fn compose_program(data_program: &str, rule_program: &str) -> String {
    let show = Statement::show("rule", 1).render();
    let segments: Vec<&str> = [data_program, rule_program, show.as_str()]
        .into_iter()
        .filter(|segment| !segment.is_empty())
        .collect();
    segments.join("\n\n\n")
}
