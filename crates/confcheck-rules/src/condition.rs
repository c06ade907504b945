//! # Condition Algebra
//!
//! A [`Condition`] is a lazily evaluated boolean paired with a lazily
//! rendered description. Leaves wrap two closures over the current state of
//! borrowed configuration fields; [`Condition::and`] and [`Condition::or`]
//! combine conditions into a small tree interpreted by
//! [`Condition::evaluate`] and [`Condition::describe`].
//!
//! ## Evaluation vs Description
//!
//! Evaluation short-circuits left to right. Description never does: a
//! combined condition always renders every sub-description, joined with
//! `and` / `or`, because a message is rendered independently of which branch
//! decided the outcome.
//!
//! Both closures must be pure functions of the referenced fields. They may
//! be invoked any number of times.

use std::fmt;
use std::rc::Rc;

type Describe<'a> = Rc<dyn Fn() -> String + 'a>;
type Evaluate<'a> = Rc<dyn Fn() -> bool + 'a>;

/// A composable, lazily evaluated check with a lazily rendered explanation.
#[derive(Clone)]
pub enum Condition<'a> {
    /// Primitive condition built from two deferred closures.
    Leaf {
        /// Renders the human-readable description.
        describe: Describe<'a>,
        /// Computes the outcome.
        evaluate: Evaluate<'a>,
    },
    /// Holds when every sub-condition holds. Empty holds.
    All(Vec<Condition<'a>>),
    /// Holds when at least one sub-condition holds. Empty does not hold.
    Any(Vec<Condition<'a>>),
}

impl<'a> Condition<'a> {
    /// Primitive condition. Neither closure runs until asked to.
    pub fn when(
        describe: impl Fn() -> String + 'a,
        evaluate: impl Fn() -> bool + 'a,
    ) -> Self {
        Condition::Leaf {
            describe: Rc::new(describe),
            evaluate: Rc::new(evaluate),
        }
    }

    /// Short-circuiting conjunction, described with `and`.
    pub fn and(conditions: impl IntoIterator<Item = Condition<'a>>) -> Self {
        Condition::All(conditions.into_iter().collect())
    }

    /// Short-circuiting disjunction, described with `or`.
    pub fn or(conditions: impl IntoIterator<Item = Condition<'a>>) -> Self {
        Condition::Any(conditions.into_iter().collect())
    }

    /// Evaluate against the current state of the referenced fields.
    pub fn evaluate(&self) -> bool {
        match self {
            Condition::Leaf { evaluate, .. } => evaluate(),
            Condition::All(conditions) => conditions.iter().all(Condition::evaluate),
            Condition::Any(conditions) => conditions.iter().any(Condition::evaluate),
        }
    }

    /// Render the full description, including every sub-condition.
    pub fn describe(&self) -> String {
        match self {
            Condition::Leaf { describe, .. } => describe(),
            Condition::All(conditions) => join(conditions, " and "),
            Condition::Any(conditions) => join(conditions, " or "),
        }
    }
}

fn join(conditions: &[Condition<'_>], separator: &str) -> String {
    conditions
        .iter()
        .map(Condition::describe)
        .collect::<Vec<_>>()
        .join(separator)
}

impl fmt::Debug for Condition<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Condition::Leaf { .. } => "Leaf",
            Condition::All(_) => "All",
            Condition::Any(_) => "Any",
        };
        f.debug_struct("Condition")
            .field("kind", &kind)
            .field("description", &self.describe())
            .finish()
    }
}
