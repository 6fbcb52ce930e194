// crates/jsonlogic-asp-core/src/asp/mod.rs
// ============================================================================
// Module: ASP Adapters
// Description: Atoms, literals, and statements of the target logic-program format.
// Purpose: Model the smallest compileable units and their textual rendering.
// Dependencies: none beyond std
// ============================================================================

//! ## Overview
//! The wire format to the solver is plain ASCII: facts, rules, directives,
//! and `%` comments. These submodules model that format as immutable values
//! that render to single lines of program text.

/// Predicate and comparator literals.
pub mod literals;
/// Fact, rule, and directive statements.
pub mod statements;

pub use literals::ComparatorAtom;
pub use literals::Literal;
pub use literals::PredicateAtom;
pub use statements::Statement;
