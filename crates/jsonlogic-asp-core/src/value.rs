// crates/jsonlogic-asp-core/src/value.rs
// ============================================================================
// Module: Primitive Values
// Description: Leaf value model for rule trees and data records.
// Purpose: Encode JSON scalars into solver literal tokens deterministically.
// Dependencies: crate::ident, serde_json
// ============================================================================

//! ## Overview
//! Rule-tree leaves and flattened data values are JSON scalars. [`Primitive`]
//! is their typed form; [`Primitive::encode`] produces the token that appears
//! in ASP term position. String values never appear raw: they are replaced by
//! their constant token because raw strings may contain solver-unsafe bytes.
//!
//! Float encoding truncates to an integer. This mirrors the reference
//! behavior and is a known lossy quirk; see DESIGN.md before changing it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;

use serde_json::Value;

use crate::ident::constant_token;

// ============================================================================
// SECTION: Primitive
// ============================================================================

/// A scalar leaf value carried by a rule tree or a flattened data record.
///
/// # Invariants
/// - Immutable once constructed.
/// - `encode` output is always valid in ASP term position.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// UTF-8 string value.
    Str(String),
    /// Signed integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// Boolean value.
    Bool(bool),
    /// JSON null.
    Null,
}

impl Primitive {
    /// Converts a JSON value into a primitive, if it is a scalar.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::Str(s.clone())),
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => n.as_i64().map_or_else(
                || n.as_f64().map(Self::Float),
                |i| Some(Self::Int(i)),
            ),
            Value::Null => Some(Self::Null),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Encodes the value as an ASP term token.
    ///
    /// Strings become their constant token; booleans become the bare
    /// constants `true`/`false`; integers render as decimal text; floats are
    /// truncated toward zero before rendering; null becomes the bare
    /// constant `null`.
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            Self::Str(s) => constant_token(s),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => {
                let truncated = f.trunc();
                if truncated == 0.0 {
                    "0".to_string()
                } else {
                    format!("{truncated:.0}")
                }
            }
            Self::Bool(b) => b.to_string(),
            Self::Null => "null".to_string(),
        }
    }

    /// JSON-Logic truthiness: `false`, `0`, `""`, and `null` are falsy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Str(s) => !s.is_empty(),
            Self::Int(i) => *i != 0,
            Self::Float(f) => *f != 0.0,
            Self::Bool(b) => *b,
            Self::Null => false,
        }
    }

    /// Feeds the value's structural identity into a hasher.
    ///
    /// Identity is derived from the variant tag plus canonical content, so
    /// two primitives hash equally exactly when they render equally under
    /// the same variant.
    pub(crate) fn hash_structure<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Str(s) => {
                0u8.hash(state);
                s.hash(state);
            }
            Self::Int(i) => {
                1u8.hash(state);
                i.hash(state);
            }
            Self::Float(f) => {
                2u8.hash(state);
                f.to_bits().hash(state);
            }
            Self::Bool(b) => {
                3u8.hash(state);
                b.hash(state);
            }
            Self::Null => 4u8.hash(state),
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => i.fmt(f),
            Self::Float(v) => v.fmt(f),
            Self::Bool(b) => b.fmt(f),
            Self::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for Primitive {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Primitive {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for Primitive {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Primitive {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Primitive {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}
