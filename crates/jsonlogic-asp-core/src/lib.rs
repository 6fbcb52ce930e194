// crates/jsonlogic-asp-core/src/lib.rs
// ============================================================================
// Module: Compiler Root
// Description: Public API surface for the rule-tree compiler.
// Purpose: Wire together encoding, nodes, parsing, simplification, and
//          program assembly, with flat re-exports for callers.
// Dependencies: crate::{asp, error, ident, node, parser, program, simplifier,
//               value}
// ============================================================================

//! ## Overview
//! This crate compiles JSON-Logic-style rule expression trees and flat data
//! records into answer-set-program text. Rule trees parse into typed,
//! immutable nodes with structural deduplication; each node lowers itself to
//! a small set of facts and rules; the assembler joins everything into
//! deduplicated program text plus an out-of-band mapping from obfuscated
//! rule tokens back to caller rule ids.
//!
//! Solving is a separate concern: this crate produces program text only.

// ============================================================================
// SECTION: Core Modules
// ============================================================================

pub mod asp;
pub mod error;
pub mod ident;
pub mod node;
pub mod parser;
pub mod program;
pub mod simplifier;
pub mod value;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use asp::ComparatorAtom;
pub use asp::Literal;
pub use asp::PredicateAtom;
pub use asp::Statement;
pub use error::NodeError;
pub use error::ParseError;
pub use ident::NodeId;
pub use ident::constant_token;
pub use ident::generate_unique_id;
pub use node::CustomNode;
pub use node::CustomOperator;
pub use node::CustomOperators;
pub use node::Operand;
pub use node::RuleNode;
pub use parser::TranslationCache;
pub use parser::parse_rule_tree;
pub use program::CompiledRules;
pub use program::DataInput;
pub use program::RuleInput;
pub use program::compile_data_program;
pub use program::compile_rule_programs;
pub use simplifier::simplify;
pub use value::Primitive;
