// crates/jsonlogic-asp-core/tests/tokens.rs
// ============================================================================
// Module: Token Tests
// Description: Tests for constant tokens and node identifiers.
// ============================================================================
//! ## Overview
//! Validates deterministic constant-token derivation and node identifier
//! uniqueness.

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

use std::collections::HashSet;

use jsonlogic_asp_core::constant_token;
use jsonlogic_asp_core::generate_unique_id;
use proptest::prelude::proptest;

// ============================================================================
// SECTION: Constant Tokens
// ============================================================================

/// Tests the known token vector for "123".
#[test]
fn test_constant_token_known_vector() {
    assert_eq!(constant_token("123"), "s202cb962ac59075b964b07152d234b70");
}

/// Tests that token derivation is deterministic across calls.
#[test]
fn test_constant_token_is_deterministic() {
    assert_eq!(constant_token("person.age"), constant_token("person.age"));
}

/// Tests that the empty string still yields a full-width token.
#[test]
fn test_constant_token_of_empty_string() {
    let token = constant_token("");
    assert_eq!(token.len(), 33);
    assert!(token.starts_with('s'));
}

proptest! {
    /// Tests that every token is the `s` prefix plus 32 lowercase hex digits.
    #[test]
    fn test_constant_token_shape(input in ".*") {
        let token = constant_token(&input);
        assert_eq!(token.len(), 33);
        let mut chars = token.chars();
        assert_eq!(chars.next(), Some('s'));
        assert!(chars.all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    /// Tests that equal inputs always map to equal tokens.
    #[test]
    fn test_constant_token_pure(input in ".*") {
        assert_eq!(constant_token(&input), constant_token(&input));
    }
}

// ============================================================================
// SECTION: Node Identifiers
// ============================================================================

/// Tests that generated identifiers lex as ASP constants.
#[test]
fn test_unique_id_shape() {
    let id = generate_unique_id();
    let text = id.as_str();
    assert!(text.starts_with('n'));
    assert!(text.len() > 1);
    assert!(text.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
}

/// Tests that repeated generation never collides within a process.
#[test]
fn test_unique_ids_do_not_collide() {
    let ids: HashSet<String> = (0..10_000)
        .map(|_| generate_unique_id().as_str().to_string())
        .collect();
    assert_eq!(ids.len(), 10_000);
}
