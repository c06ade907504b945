//! # Error Types
//!
//! Two tiers are kept apart. [`RuleError`] is returned eagerly when a rule
//! cannot be registered at all. [`Violations`] is the aggregated outcome of
//! running every registered rule: data for an operator, not a fault.

use std::fmt;

use thiserror::Error;

/// Error raised while registering a rule.
#[derive(Error, Debug)]
pub enum RuleError {
    /// A pattern rule's regular expression failed to compile. No rule was
    /// registered.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern as supplied.
        pattern: String,
        /// Compilation failure reported by the regex engine.
        source: regex::Error,
    },
}

/// Ordered failure messages from one verification pass, in rule
/// declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violations {
    messages: Vec<String>,
}

impl Violations {
    pub(crate) fn new(messages: Vec<String>) -> Self {
        Self { messages }
    }

    /// Returns the number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if there are no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns the messages in declaration order.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Iterate over the messages.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.messages.iter()
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<String> {
        self.messages
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, message) in self.messages.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Violations {}

impl IntoIterator for Violations {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}

impl<'v> IntoIterator for &'v Violations {
    type Item = &'v String;
    type IntoIter = std::slice::Iter<'v, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}
