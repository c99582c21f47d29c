//! Alias rules for route expressions.
//!
//! # Responsibilities
//! - Hold the ordered alias rules added by the operator
//! - Rewrite a route expression through every rule in order
//!
//! # Design Decisions
//! - Rules chain: each rule's output feeds the next rule's input
//!   (sequential, not simultaneous, substitution)
//! - Every non-overlapping occurrence is replaced, not just the first
//! - No validation on add; an empty or overlapping rule is the
//!   operator's to own
//! - Empty table borrows the input through, so bulk registration pays
//!   nothing when no aliases are configured

use std::borrow::Cow;

/// A single literal substitution applied to route expressions.
#[derive(Debug, Clone)]
struct AliasRule {
    from: String,
    to: String,
}

/// Ordered sequence of alias rules.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    rules: Vec<AliasRule>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule. Rules apply in insertion order and are never
    /// removed.
    pub fn add(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.rules.push(AliasRule {
            from: from.into(),
            to: to.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule over the expression and report whether the final
    /// result differs from the input. A rule chain that rewrites the
    /// expression back to itself reports unchanged.
    pub fn apply<'a>(&self, expr: &'a str) -> (Cow<'a, str>, bool) {
        if self.rules.is_empty() {
            return (Cow::Borrowed(expr), false);
        }
        let mut current = Cow::Borrowed(expr);
        for rule in &self.rules {
            if current.contains(&rule.from) {
                current = Cow::Owned(current.replace(&rule.from, &rule.to));
            }
        }
        let changed = current != expr;
        (current, changed)
    }
}
