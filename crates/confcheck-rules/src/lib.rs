//! # confcheck-rules — Declarative Configuration Rules
//!
//! Register rules such as "field X is mandatory", "exactly one of A or B
//! must be set" or "field Y must be one of an enumerated set" against a
//! loaded configuration value, then evaluate all of them in one pass.
//! Failure messages name each field by its serialized key path
//! (`database.pool_size`) rather than its Rust name.
//!
//! ## Modules
//!
//! - [`condition`] — lazy boolean conditions with deferred descriptions,
//!   composable with [`Condition::and`] / [`Condition::or`].
//! - [`verifier`] — the single-method [`Verifier`] trait and the adapter
//!   from a condition to a verifier.
//! - [`checker`] — the [`Checker`] and its rule builders.
//! - [`error`] — [`RuleError`] (registration failures) and [`Violations`]
//!   (aggregated validation failures).
//!
//! ## Crate Policy
//!
//! - Depends only on `confcheck-core` internally.
//! - Single-threaded: a checker is built, then verified, by one owner.
//! - Validation failures are data, never panics.

pub mod checker;
pub mod condition;
pub mod error;
pub mod verifier;

pub use checker::Checker;
pub use condition::Condition;
pub use error::{RuleError, Violations};
pub use verifier::{ConditionVerifier, Verifier};

pub use confcheck_core::{impl_tagged, TagScheme, Tagged, INT_UNSET};
