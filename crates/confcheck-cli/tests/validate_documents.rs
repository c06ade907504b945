//! # Descriptor Validation Tests
//!
//! Writes service descriptors to a temporary directory in both formats and
//! runs the full load, default, and check sequence over them.

use std::path::PathBuf;

use confcheck_cli::load::DocumentFormat;
use confcheck_cli::validate::{
    run_validate, validate_file, ValidateArgs, EXIT_VALID, EXIT_VIOLATIONS,
};
use confcheck_core::TagScheme;

const VALID_YAML: &str = r#"
name: ledger-api
environment: production
listen:
  workers: 0
  request_timeout_ms: 1500
tls:
  enabled: true
  cert_file: /etc/tls/cert.pem
  key_file: /etc/tls/key.pem
database:
  driver: postgres
  host: db.internal
  pool_size: 20
cache:
  backend: redis
  url: redis://cache.internal
"#;

const BROKEN_YAML: &str = r#"
name: Ledger API
environment: prod
log_level: chatty
tls:
  enabled: true
database:
  driver: postgres
  url: postgres://db/ledger
  host: db.internal
"#;

fn write(dir: &tempfile::TempDir, file: &str, content: &str) -> PathBuf {
    let path = dir.path().join(file);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn valid_yaml_descriptor() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "service.yaml", VALID_YAML);
    let messages = validate_file(&path, DocumentFormat::Auto, TagScheme::YAML).unwrap();
    assert!(messages.is_empty(), "unexpected violations: {messages:?}");
}

#[test]
fn broken_yaml_descriptor_reports_everything_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "service.yaml", BROKEN_YAML);
    let messages = validate_file(&path, DocumentFormat::Auto, TagScheme::YAML).unwrap();
    assert_eq!(
        messages,
        [
            "name must match pattern ^[a-z][a-z0-9-]{0,62}$",
            "environment is mandatory and value of environment must be in [development, staging, production]",
            "value of log_level must be in [trace, debug, info, warn, error]",
            "listen.workers is mandatory",
            "tls.cert_file is mandatory when tls.enabled=true",
            "tls.key_file is mandatory when tls.enabled=true",
            "either database.url or database.host is mandatory, but only one can be set",
        ]
    );
}

#[test]
fn json_descriptor_with_json_scheme() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "service.json",
        r#"{
            "name": "ledger-api",
            "environment": "development",
            "listen": {"workers": 2},
            "database": {"driver": "sqlite"}
        }"#,
    );
    let messages = validate_file(&path, DocumentFormat::Auto, TagScheme::JSON).unwrap();
    assert_eq!(
        messages,
        ["either database.url or database.host is mandatory, but only one can be set"]
    );
}

#[test]
fn unparsable_document_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "service.json", "{ not json");
    let err = validate_file(&path, DocumentFormat::Auto, TagScheme::YAML).unwrap_err();
    assert!(format!("{err:#}").contains("invalid JSON"));
}

#[test]
fn exit_status_reflects_outcome() {
    let dir = tempfile::tempdir().unwrap();
    let valid = ValidateArgs {
        path: write(&dir, "ok.yaml", VALID_YAML),
        format: DocumentFormat::Yaml,
        scheme: TagScheme::YAML,
    };
    assert_eq!(run_validate(&valid).unwrap(), EXIT_VALID);

    let broken = ValidateArgs {
        path: write(&dir, "broken.yaml", BROKEN_YAML),
        format: DocumentFormat::Yaml,
        scheme: TagScheme::YAML,
    };
    assert_eq!(run_validate(&broken).unwrap(), EXIT_VIOLATIONS);
}
