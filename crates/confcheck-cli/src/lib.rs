//! # confcheck-cli — Reference Caller for confcheck
//!
//! Provides the `confcheck` command-line interface: the loading, defaulting,
//! and reporting steps that surround the rule checker.
//!
//! ## Subcommands
//!
//! - `confcheck validate <FILE>` — validate a service descriptor.
//!
//! ```bash
//! confcheck validate deploy/service.yaml
//! confcheck validate deploy/service.json --scheme json -v
//! ```
//!
//! ## Exit Status
//!
//! `0` when valid, `2` when violations were found, `1` when the document
//! could not be loaded or a rule could not be registered.

pub mod descriptor;
pub mod load;
pub mod validate;
