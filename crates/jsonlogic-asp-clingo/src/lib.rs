// crates/jsonlogic-asp-clingo/src/lib.rs
// ============================================================================
// Module: Solving Root
// Description: Public API surface for solving and evaluation.
// Purpose: Wire together the solver contract, the clingo process backend,
//          and the evaluation façade.
// Dependencies: crate::{evaluator, solver}
// ============================================================================

//! ## Overview
//! This crate pairs the compiler with an external answer-set solver. The
//! [`AnswerSetSolver`] trait is the seam: [`ClingoSolver`] implements it by
//! shelling out to a `clingo` binary, and tests substitute scripted solvers.
//! [`Evaluator`] composes compiled rule and data programs with a solver and
//! reports which caller rule ids matched.

// ============================================================================
// SECTION: Core Modules
// ============================================================================

pub mod evaluator;
pub mod solver;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use evaluator::Evaluator;
pub use evaluator::compose_program;
pub use solver::AnswerSetSolver;
pub use solver::ClingoSolver;
pub use solver::SolveOutcome;
pub use solver::SolveStatus;
