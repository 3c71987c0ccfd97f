/*
 * expr.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Target-language source expressions.
//!
//! The source-emitting backend never evaluates values; it composes
//! expression *text*. [`SourceExpr`] pairs that text with the precedence of
//! its top-level operator so that embedding an expression under a tighter
//! operator parenthesizes it exactly when needed.

/// Precedence of an atomic expression: literals, variable references, and
/// call results. Atoms never need parenthesization.
pub const PRECEDENCE_ATOM: i32 = i32::MAX;

/// Precedence of the conditional (ternary) operator, the loosest operator
/// this crate emits.
pub const PRECEDENCE_CONDITIONAL: i32 = 1;

/// A target-language expression produced by the source-emitting backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceExpr {
    code: String,
    precedence: i32,
}

impl SourceExpr {
    /// Create an expression whose top-level operator has the given
    /// precedence.
    pub fn new(code: impl Into<String>, precedence: i32) -> Self {
        Self {
            code: code.into(),
            precedence,
        }
    }

    /// Create an atomic expression (maximum precedence).
    pub fn atom(code: impl Into<String>) -> Self {
        Self::new(code, PRECEDENCE_ATOM)
    }

    /// The expression text, without any added parentheses.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The precedence of the expression's top-level operator.
    pub fn precedence(&self) -> i32 {
        self.precedence
    }

    /// The expression text as embeddable under an operator of
    /// `min_precedence`: parenthesized iff this expression binds more
    /// loosely than the context requires.
    pub fn code_at_least(&self, min_precedence: i32) -> String {
        if self.precedence >= min_precedence {
            self.code.clone()
        } else {
            format!("({})", self.code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atom_never_parenthesized() {
        let expr = SourceExpr::atom("TEXT");
        assert_eq!(expr.code_at_least(PRECEDENCE_ATOM), "TEXT");
        assert_eq!(expr.code_at_least(PRECEDENCE_CONDITIONAL), "TEXT");
    }

    #[test]
    fn test_loose_expression_parenthesized_when_embedded() {
        let ternary = SourceExpr::new("a ? b : c", PRECEDENCE_CONDITIONAL);
        assert_eq!(ternary.code_at_least(PRECEDENCE_CONDITIONAL), "a ? b : c");
        assert_eq!(
            ternary.code_at_least(PRECEDENCE_CONDITIONAL + 1),
            "(a ? b : c)"
        );
    }
}
