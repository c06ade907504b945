//! # confcheck-core — Field Registry and Tag-Path Resolution
//!
//! Foundational types for declarative configuration validation. A loaded
//! configuration value describes its own field tree through [`Tagged`];
//! given a reference to any leaf of that tree, [`TagResolver`] recovers the
//! dotted path of serialization keys that leads to it (`database.limits.max_conns`),
//! so validation messages can name fields the way the operator wrote them.
//!
//! ## Key Design Principles
//!
//! 1. **Explicit registry, no reflection.** Field lists and tags are declared
//!    next to the type (see [`impl_tagged!`]). Nothing is inferred at runtime.
//!
//! 2. **Identity is address plus type.** A field is found by where it lives in
//!    the borrowed root, not by its name or value. The root stays borrowed for
//!    as long as a resolver exists, so identities cannot move.
//!
//! 3. **Misuse fails to compile.** Structures cannot be passed where a leaf is
//!    expected and leaves cannot be passed where a root is expected.
//!
//! 4. **Not found is not an error.** Resolution returns `Option`; callers pick
//!    a fallback label.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `confcheck-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod defaults;
pub mod error;
pub mod field;
pub mod resolve;
pub mod scheme;

// Re-export primary types for ergonomic imports.
pub use defaults::{
    set_default, set_default_duration, set_default_float, set_default_int, set_default_string,
    set_default_u16, set_default_uint, unset_int, INT_UNSET,
};
pub use error::CoreError;
pub use field::{ConfigScalar, Field, FieldId, FieldRef, TagList, Tagged};
pub use resolve::{resolve, TagResolver};
pub use scheme::TagScheme;
