//! # Verifiers
//!
//! A verifier is one registered pass/fail step. The checker stores verifiers
//! in declaration order and runs every one of them.

use crate::condition::Condition;

/// One validation step.
pub trait Verifier {
    /// `Ok` when the step passes, otherwise the messages describing why not.
    fn verify(&self) -> Result<(), Vec<String>>;
}

/// Adapts a [`Condition`] into a verifier that renders the condition's
/// description on failure.
#[derive(Debug, Clone)]
pub struct ConditionVerifier<'a> {
    condition: Condition<'a>,
}

impl<'a> ConditionVerifier<'a> {
    /// Wrap a condition.
    pub fn new(condition: Condition<'a>) -> Self {
        Self { condition }
    }

    /// The wrapped condition.
    pub fn condition(&self) -> &Condition<'a> {
        &self.condition
    }
}

impl Verifier for ConditionVerifier<'_> {
    fn verify(&self) -> Result<(), Vec<String>> {
        if self.condition.evaluate() {
            Ok(())
        } else {
            Err(vec![self.condition.describe()])
        }
    }
}
