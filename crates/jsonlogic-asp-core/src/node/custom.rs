// crates/jsonlogic-asp-core/src/node/custom.rs
// ============================================================================
// Module: Custom Nodes
// Description: Caller-supplied operator extension points.
// Purpose: Let callers register additional operators that parse and lower
//          alongside the built-in vocabulary.
// Dependencies: crate::{asp, error, ident, node}
// ============================================================================

//! ## Overview
//! A custom operator supplies two pieces: a [`CustomNode`] implementation
//! carrying the same contract the built-in variants satisfy (identity, atom,
//! lowering, children, fingerprint) and a [`CustomOperator`] factory the
//! parser consults when it encounters the registered operator key. Custom
//! keys shadow nothing: registration of a built-in key is ignored by the
//! parser, which checks the built-in table first.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::asp::PredicateAtom;
use crate::asp::Statement;
use crate::error::NodeError;
use crate::ident::NodeId;
use crate::node::Operand;
use crate::node::RuleNode;

// ============================================================================
// SECTION: Custom Node Contract
// ============================================================================

/// Contract a caller-supplied node must satisfy to participate in
/// compilation.
///
/// # Invariants
/// - `compile` is deterministic and side-effect-free; auxiliary identifiers
///   must be fixed at construction.
/// - `fingerprint` derives from semantic content only, never the node
///   identifier, or deduplication becomes unsound.
pub trait CustomNode: fmt::Debug + Send + Sync {
    /// Unique node identifier.
    fn node_id(&self) -> &NodeId;

    /// The logic-program predicate name this node compiles to.
    fn operator_name(&self) -> &str;

    /// The node's own predicate atom.
    fn atom(&self) -> PredicateAtom;

    /// Variant-specific lowering to logic-program statements.
    fn compile(&self) -> Vec<Statement>;

    /// Node children participating in post-order emission.
    fn child_nodes(&self) -> Vec<Arc<RuleNode>>;

    /// Structural fingerprint.
    fn fingerprint(&self) -> u64;
}

// ============================================================================
// SECTION: Operator Factory
// ============================================================================

/// Factory the parser invokes to build a node for a registered operator key.
pub trait CustomOperator: Send + Sync {
    /// Builds a node from the (already recursively parsed) operand list.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError`] when the operands violate the operator's arity
    /// or type constraints.
    fn build(&self, operands: Vec<Operand>) -> Result<Arc<dyn CustomNode>, NodeError>;
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Registry of caller-supplied operators keyed by operator name.
#[derive(Default, Clone)]
pub struct CustomOperators {
    /// Registered factories by operator key.
    operators: HashMap<String, Arc<dyn CustomOperator>>,
}

impl CustomOperators {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory for an operator key, replacing any previous
    /// registration of the same key.
    pub fn register(&mut self, key: impl Into<String>, operator: Arc<dyn CustomOperator>) {
        self.operators.insert(key.into(), operator);
    }

    /// Looks up the factory registered for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Arc<dyn CustomOperator>> {
        self.operators.get(key)
    }

    /// Whether a factory is registered for a key.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.operators.contains_key(key)
    }
}

impl fmt::Debug for CustomOperators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.operators.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("CustomOperators").field("keys", &keys).finish()
    }
}
