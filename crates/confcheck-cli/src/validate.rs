//! # Validate Subcommand
//!
//! Loads a service descriptor, applies defaults, registers the descriptor's
//! rules, and prints every violation found in one pass.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use confcheck_core::TagScheme;
use confcheck_rules::{Checker, RuleError};

use crate::descriptor::ServiceDescriptor;
use crate::load::{load_document, DocumentFormat};

/// Exit status when the document is valid.
pub const EXIT_VALID: u8 = 0;
/// Exit status when rule violations were found.
pub const EXIT_VIOLATIONS: u8 = 2;

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the service descriptor.
    pub path: PathBuf,

    /// Document format.
    #[arg(long, value_enum, default_value_t = DocumentFormat::Auto)]
    pub format: DocumentFormat,

    /// Tag key used to name fields in messages (yaml or json).
    #[arg(long, default_value = "yaml")]
    pub scheme: TagScheme,
}

/// Run the validate subcommand and return the process exit status.
///
/// # Errors
///
/// Returns an error if the document cannot be loaded or a rule cannot be
/// registered.
pub fn run_validate(args: &ValidateArgs) -> anyhow::Result<u8> {
    let messages = validate_file(&args.path, args.format, args.scheme)?;
    let shown = args.path.display();

    if messages.is_empty() {
        println!("{shown}: OK");
        return Ok(EXIT_VALID);
    }

    for message in &messages {
        println!("  {message}");
    }
    println!("{shown}: {} violation(s)", messages.len());
    Ok(EXIT_VIOLATIONS)
}

/// Load, default, and check the descriptor at `path`. An empty result means
/// the descriptor is valid.
///
/// # Errors
///
/// Returns an error if the document cannot be loaded or a rule cannot be
/// registered.
pub fn validate_file(
    path: &Path,
    format: DocumentFormat,
    scheme: TagScheme,
) -> anyhow::Result<Vec<String>> {
    let mut descriptor: ServiceDescriptor = load_document(path, format)
        .with_context(|| format!("failed to load service descriptor {}", path.display()))?;
    descriptor.apply_defaults();
    check_descriptor(&descriptor, scheme).context("failed to register descriptor rules")
}

/// Run the descriptor's rules. An empty result means the descriptor is valid.
///
/// # Errors
///
/// Returns [`RuleError`] if a rule cannot be registered.
pub fn check_descriptor(
    descriptor: &ServiceDescriptor,
    scheme: TagScheme,
) -> Result<Vec<String>, RuleError> {
    let mut checker = Checker::new(descriptor, scheme);
    descriptor.register_rules(&mut checker)?;
    tracing::info!(name = %descriptor.name, rules = checker.len(), "checking service descriptor");

    match checker.verify() {
        Ok(()) => Ok(Vec::new()),
        Err(violations) => {
            for message in &violations {
                tracing::debug!(%message, "violation");
            }
            Ok(violations.into_inner())
        }
    }
}
