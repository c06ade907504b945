//! # Checker
//!
//! The per-session accumulator of validation rules for one loaded
//! configuration value. Builder methods each register exactly one verifier;
//! [`Checker::verify`] then runs all of them, in declaration order, and
//! reports every failure at once.
//!
//! ## Usage
//!
//! ```
//! use confcheck_core::{impl_tagged, TagScheme};
//! use confcheck_rules::Checker;
//!
//! #[derive(Default)]
//! struct Tls { enabled: bool, cert_file: String }
//! #[derive(Default)]
//! struct Server { name: String, log_level: String, tls: Tls }
//!
//! impl_tagged!(Tls {
//!     scalar enabled ["yaml" = "enabled"],
//!     scalar cert_file ["yaml" = "cert_file"],
//! });
//! impl_tagged!(Server {
//!     scalar name ["yaml" = "name"],
//!     scalar log_level ["yaml" = "log_level,omitempty"],
//!     nested tls ["yaml" = "tls"],
//! });
//!
//! let config = Server {
//!     log_level: "loud".into(),
//!     tls: Tls { enabled: true, cert_file: String::new() },
//!     ..Server::default()
//! };
//!
//! let mut checker = Checker::new(&config, TagScheme::YAML);
//! checker.string_mandatory(&config.name);
//! checker.enum_optional(&config.log_level, &["debug", "info", "warn"], "info");
//! let tls_on = checker.bool_equals(&config.tls.enabled, true);
//! checker.string_mandatory_when(&config.tls.cert_file, tls_on);
//!
//! let violations = checker.verify().unwrap_err();
//! assert_eq!(
//!     violations.messages(),
//!     [
//!         "name is mandatory",
//!         "value of log_level must be in [debug, info, warn]",
//!         "tls.cert_file is mandatory when tls.enabled=true",
//!     ]
//! );
//! ```
//!
//! ## Usage Contract
//!
//! A checker is bound to a structure. Anything else is rejected at compile
//! time:
//!
//! ```compile_fail
//! use confcheck_core::TagScheme;
//! use confcheck_rules::Checker;
//!
//! let port = 8080_i64;
//! // ERROR: `i64` does not implement `Tagged`
//! let _checker = Checker::new(&port, TagScheme::YAML);
//! ```
//!
//! Field references passed to builders should belong to the bound
//! instance. A reference that does not is still checked; its messages name
//! it as `entry holding value <value>`.

use std::fmt;
use std::rc::Rc;

use confcheck_core::{ConfigScalar, TagResolver, TagScheme, Tagged, INT_UNSET};
use regex::Regex;

use crate::condition::Condition;
use crate::error::{RuleError, Violations};
use crate::verifier::{ConditionVerifier, Verifier};

/// Validation rules registered against one configuration instance.
pub struct Checker<'a, C: Tagged> {
    config: &'a C,
    resolver: TagResolver<'a>,
    verifiers: Vec<Box<dyn Verifier + 'a>>,
}

impl<'a, C: Tagged> Checker<'a, C> {
    /// Bind a checker to `config` under `scheme`.
    pub fn new(config: &'a C, scheme: TagScheme) -> Self {
        Self {
            config,
            resolver: TagResolver::new(scheme, config),
            verifiers: Vec::new(),
        }
    }

    /// Checker naming fields by their `yaml` tags.
    pub fn yaml(config: &'a C) -> Self {
        Self::new(config, TagScheme::YAML)
    }

    /// Checker naming fields by their `json` tags.
    pub fn json(config: &'a C) -> Self {
        Self::new(config, TagScheme::JSON)
    }

    /// The bound configuration.
    pub fn config(&self) -> &'a C {
        self.config
    }

    /// The naming scheme in use.
    pub fn scheme(&self) -> TagScheme {
        self.resolver.scheme()
    }

    /// Tag path of `entry` within the bound configuration.
    pub fn tag_path<T: ConfigScalar>(&self, entry: &T) -> Option<String> {
        self.resolver.resolve(entry)
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.verifiers.len()
    }

    /// Whether no rule has been registered.
    pub fn is_empty(&self) -> bool {
        self.verifiers.is_empty()
    }

    /// Run every registered rule in declaration order.
    ///
    /// Never stops at the first failure. `Ok` means every rule passed;
    /// otherwise the error carries one message per failing rule, in the
    /// order the rules were registered.
    pub fn verify(&self) -> Result<(), Violations> {
        let messages: Vec<String> = self
            .verifiers
            .iter()
            .filter_map(|verifier| verifier.verify().err())
            .flatten()
            .collect();

        tracing::debug!(
            scheme = %self.scheme(),
            rules = self.verifiers.len(),
            violations = messages.len(),
            "configuration checked"
        );

        if messages.is_empty() {
            Ok(())
        } else {
            Err(Violations::new(messages))
        }
    }

    // ─── Registration ────────────────────────────────────────────────

    /// Register a custom verifier.
    pub fn add_verifier(&mut self, verifier: impl Verifier + 'a) {
        self.verifiers.push(Box::new(verifier));
        tracing::trace!(rules = self.verifiers.len(), "registered verifier");
    }

    /// Register an arbitrary condition built from two closures.
    pub fn add_condition(
        &mut self,
        evaluate: impl Fn() -> bool + 'a,
        describe: impl Fn() -> String + 'a,
    ) {
        self.register("condition", Condition::when(describe, evaluate));
    }

    /// Alias of [`Checker::add_condition`] for string-valued rules.
    pub fn string_condition(
        &mut self,
        evaluate: impl Fn() -> bool + 'a,
        describe: impl Fn() -> String + 'a,
    ) {
        self.add_condition(evaluate, describe);
    }

    /// Alias of [`Checker::add_condition`] for integer-valued rules.
    pub fn int_condition(
        &mut self,
        evaluate: impl Fn() -> bool + 'a,
        describe: impl Fn() -> String + 'a,
    ) {
        self.add_condition(evaluate, describe);
    }

    fn register(&mut self, rule: &'static str, condition: Condition<'a>) {
        self.verifiers.push(Box::new(ConditionVerifier::new(condition)));
        tracing::trace!(rule, rules = self.verifiers.len(), "registered rule");
    }

    // ─── String rules ────────────────────────────────────────────────

    /// `entry` must be non-empty.
    pub fn string_mandatory(&mut self, entry: &'a String) {
        let describe = self.describe_mandatory(entry);
        self.register(
            "string_mandatory",
            Condition::when(describe, move || !entry.is_empty()),
        );
    }

    /// `entry` must be non-empty whenever `when` holds.
    pub fn string_mandatory_when(&mut self, entry: &'a String, when: Condition<'a>) {
        let describe = describe_when(self.describe_mandatory(entry), when.clone());
        self.register(
            "string_mandatory_when",
            Condition::when(describe, move || !entry.is_empty() || !when.evaluate()),
        );
    }

    /// Exactly one of `first` and `second` must be non-empty.
    pub fn string_xor(&mut self, first: &'a String, second: &'a String) {
        let describe = self.describe_xor(first, second);
        self.register(
            "string_xor",
            Condition::when(describe, move || first.is_empty() != second.is_empty()),
        );
    }

    /// Exactly one of `first` and `second` must be non-empty whenever `when`
    /// holds.
    pub fn string_xor_when(
        &mut self,
        first: &'a String,
        second: &'a String,
        when: Condition<'a>,
    ) {
        let describe = describe_when(self.describe_xor(first, second), when.clone());
        self.register(
            "string_xor_when",
            Condition::when(describe, move || {
                first.is_empty() != second.is_empty() || !when.evaluate()
            }),
        );
    }

    /// `entry` must match `pattern` (unanchored, as [`Regex::is_match`]).
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidPattern`] if `pattern` does not compile. No
    /// rule is registered in that case.
    pub fn string_pattern(&mut self, entry: &'a String, pattern: &str) -> Result<(), RuleError> {
        let regex = Regex::new(pattern).map_err(|source| RuleError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        let resolver = self.resolver;
        let pattern = pattern.to_string();
        self.register(
            "string_pattern",
            Condition::when(
                move || format!("{} must match pattern {pattern}", resolver.label(entry)),
                move || regex.is_match(entry),
            ),
        );
        Ok(())
    }

    // ─── Standalone conditions ───────────────────────────────────────

    /// Holds when `entry` equals `value`. Not registered.
    pub fn string_equals(&self, entry: &'a String, value: &str) -> Condition<'a> {
        let resolver = self.resolver;
        let value = value.to_string();
        let expected = value.clone();
        Condition::when(
            move || format!("{}={value}", resolver.label(entry)),
            move || *entry == expected,
        )
    }

    /// Holds when `entry` is non-empty. Not registered.
    pub fn string_not_empty(&self, entry: &'a String) -> Condition<'a> {
        let resolver = self.resolver;
        Condition::when(
            move || format!("{} is not empty", resolver.label(entry)),
            move || !entry.is_empty(),
        )
    }

    /// Holds when `entry` is one of `values`. Not registered.
    pub fn string_in(&self, entry: &'a String, values: &[&str]) -> Condition<'a> {
        let resolver = self.resolver;
        let values = owned(values);
        let allowed = Rc::clone(&values);
        Condition::when(
            move || format!("{} is contained in {}", resolver.label(entry), list(&values)),
            move || allowed.iter().any(|v| v == entry),
        )
    }

    /// Holds when `entry` equals `value`. Not registered.
    pub fn bool_equals(&self, entry: &'a bool, value: bool) -> Condition<'a> {
        let resolver = self.resolver;
        Condition::when(
            move || format!("{}={value}", resolver.label(entry)),
            move || *entry == value,
        )
    }

    /// Holds when `entry` equals `value`. Not registered.
    pub fn int_equals(&self, entry: &'a i64, value: i64) -> Condition<'a> {
        let resolver = self.resolver;
        Condition::when(
            move || format!("{}={value}", resolver.label(entry)),
            move || *entry == value,
        )
    }

    // ─── Enumerations ────────────────────────────────────────────────

    /// When `entry` is set it must be one of `values`; an empty `entry`
    /// passes.
    ///
    /// `default` documents the value the caller applies to an empty entry;
    /// it is not applied here. A default outside `values` is logged.
    pub fn enum_optional(&mut self, entry: &'a String, values: &[&str], default: &str) {
        if !default.is_empty() && !values.contains(&default) {
            tracing::warn!(
                field = %self.resolver.label(entry),
                default,
                "enum default is not one of the allowed values"
            );
        }
        let condition = self.enum_value_condition(entry, values);
        self.register("enum_optional", condition);
    }

    /// `entry` must be set and be one of `values`.
    ///
    /// Both halves are combined into one rule, so a failure message always
    /// names both the mandatory and the membership requirement.
    pub fn enum_mandatory(&mut self, entry: &'a String, values: &[&str]) {
        let mandatory = Condition::when(self.describe_mandatory(entry), move || !entry.is_empty());
        let condition = Condition::and([mandatory, self.enum_value_condition(entry, values)]);
        self.register("enum_mandatory", condition);
    }

    /// `entry` must be set whenever `when` holds, and must be one of
    /// `values` whenever it is set.
    pub fn enum_mandatory_when(
        &mut self,
        entry: &'a String,
        values: &[&str],
        when: Condition<'a>,
    ) {
        let describe = describe_when(self.describe_mandatory(entry), when.clone());
        let mandatory = Condition::when(describe, move || !entry.is_empty() || !when.evaluate());
        let condition = Condition::and([mandatory, self.enum_value_condition(entry, values)]);
        self.register("enum_mandatory_when", condition);
    }

    fn enum_value_condition(&self, entry: &'a String, values: &[&str]) -> Condition<'a> {
        let resolver = self.resolver;
        let values = owned(values);
        let allowed = Rc::clone(&values);
        Condition::when(
            move || format!("value of {} must be in {}", resolver.label(entry), list(&values)),
            move || entry.is_empty() || allowed.iter().any(|v| v == entry),
        )
    }

    // ─── Integer rules ───────────────────────────────────────────────

    /// `entry` must differ from [`INT_UNSET`]. `0` is a valid setting.
    pub fn int_mandatory(&mut self, entry: &'a i64) {
        let describe = self.describe_mandatory(entry);
        self.register(
            "int_mandatory",
            Condition::when(describe, move || *entry != INT_UNSET),
        );
    }

    /// `entry` must differ from [`INT_UNSET`] whenever `when` holds.
    pub fn int_mandatory_when(&mut self, entry: &'a i64, when: Condition<'a>) {
        let describe = describe_when(self.describe_mandatory(entry), when.clone());
        self.register(
            "int_mandatory_when",
            Condition::when(describe, move || *entry != INT_UNSET || !when.evaluate()),
        );
    }

    // ─── Descriptions ────────────────────────────────────────────────

    fn describe_mandatory<T: ConfigScalar>(&self, entry: &'a T) -> impl Fn() -> String + 'a {
        let resolver = self.resolver;
        move || format!("{} is mandatory", resolver.label(entry))
    }

    fn describe_xor(&self, first: &'a String, second: &'a String) -> impl Fn() -> String + 'a {
        let resolver = self.resolver;
        move || {
            format!(
                "either {} or {} is mandatory, but only one can be set",
                resolver.label(first),
                resolver.label(second)
            )
        }
    }
}

impl<C: Tagged> fmt::Debug for Checker<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checker")
            .field("scheme", &self.scheme())
            .field("rules", &self.verifiers.len())
            .finish()
    }
}

fn describe_when<'a>(
    describe: impl Fn() -> String + 'a,
    when: Condition<'a>,
) -> impl Fn() -> String + 'a {
    move || format!("{} when {}", describe(), when.describe())
}

fn owned(values: &[&str]) -> Rc<[String]> {
    values.iter().map(|v| v.to_string()).collect()
}

fn list(values: &[String]) -> String {
    format!("[{}]", values.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use confcheck_core::impl_tagged;

    #[derive(Default)]
    struct Db {
        url: String,
        host: String,
        driver: String,
        pool: i64,
    }

    #[derive(Default)]
    struct Conf {
        name: String,
        mode: String,
        debug: bool,
        workers: i64,
        db: Db,
    }

    impl_tagged!(Db {
        scalar url ["yaml" = "url", "json" = "url"],
        scalar host ["yaml" = "host", "json" = "host"],
        scalar driver ["yaml" = "driver,omitempty", "json" = "driver"],
        scalar pool ["yaml" = "pool", "json" = "poolSize"],
    });
    impl_tagged!(Conf {
        scalar name ["yaml" = "name", "json" = "name"],
        scalar mode ["yaml" = "mode", "json" = "mode"],
        scalar debug ["yaml" = "debug", "json" = "debug"],
        scalar workers ["yaml" = "workers", "json" = "workers"],
        nested db ["yaml" = "db", "json" = "database"],
    });

    fn messages<C: Tagged>(checker: &Checker<'_, C>) -> Vec<String> {
        match checker.verify() {
            Ok(()) => Vec::new(),
            Err(violations) => violations.into_inner(),
        }
    }

    #[test]
    fn new_checker_has_no_rules_and_passes() {
        let conf = Conf::default();
        let checker = Checker::yaml(&conf);
        assert!(checker.is_empty());
        assert_eq!(checker.verify(), Ok(()));
    }

    #[test]
    fn string_mandatory_message() {
        let conf = Conf::default();
        let mut checker = Checker::yaml(&conf);
        checker.string_mandatory(&conf.db.url);
        assert_eq!(messages(&checker), ["db.url is mandatory"]);
    }

    #[test]
    fn json_scheme_names_json_tags() {
        let conf = Conf::default();
        let mut checker = Checker::json(&conf);
        checker.int_mandatory(&conf.db.pool);
        assert_eq!(conf.db.pool, 0);
        assert_eq!(checker.verify(), Ok(()));
        assert_eq!(checker.tag_path(&conf.db.pool).as_deref(), Some("database.poolSize"));
    }

    #[test]
    fn string_mandatory_when_gated() {
        let mut conf = Conf::default();
        conf.mode = "cluster".into();
        let mut checker = Checker::yaml(&conf);
        let clustered = checker.string_equals(&conf.mode, "cluster");
        checker.string_mandatory_when(&conf.db.host, clustered);
        assert_eq!(messages(&checker), ["db.host is mandatory when mode=cluster"]);

        let standalone = Conf::default();
        let mut checker = Checker::yaml(&standalone);
        let clustered = checker.string_equals(&standalone.mode, "cluster");
        checker.string_mandatory_when(&standalone.db.host, clustered);
        assert_eq!(checker.verify(), Ok(()));
    }

    #[test]
    fn string_xor_message() {
        let conf = Conf::default();
        let mut checker = Checker::yaml(&conf);
        checker.string_xor(&conf.db.url, &conf.db.host);
        assert_eq!(
            messages(&checker),
            ["either db.url or db.host is mandatory, but only one can be set"]
        );
    }

    #[test]
    fn string_xor_when_includes_trigger() {
        let mut conf = Conf::default();
        conf.debug = true;
        let mut checker = Checker::yaml(&conf);
        let debug = checker.bool_equals(&conf.debug, true);
        checker.string_xor_when(&conf.db.url, &conf.db.host, debug);
        assert_eq!(
            messages(&checker),
            ["either db.url or db.host is mandatory, but only one can be set when debug=true"]
        );
    }

    #[test]
    fn string_xor_when_inactive_trigger_passes() {
        let conf = Conf::default();
        let mut checker = Checker::yaml(&conf);
        let debug = checker.bool_equals(&conf.debug, true);
        checker.string_xor_when(&conf.db.url, &conf.db.host, debug);
        assert_eq!(checker.verify(), Ok(()));
    }

    #[test]
    fn string_pattern_matches_and_reports() {
        let mut conf = Conf::default();
        conf.name = "Bad Name".into();
        let mut checker = Checker::yaml(&conf);
        checker.string_pattern(&conf.name, "^[a-z-]+$").unwrap();
        assert_eq!(messages(&checker), ["name must match pattern ^[a-z-]+$"]);
    }

    #[test]
    fn string_pattern_invalid_registers_nothing() {
        let conf = Conf::default();
        let mut checker = Checker::yaml(&conf);
        let err = checker.string_pattern(&conf.name, "[unclosed").unwrap_err();
        assert!(matches!(err, RuleError::InvalidPattern { ref pattern, .. } if pattern == "[unclosed"));
        assert!(checker.is_empty());
        assert_eq!(checker.verify(), Ok(()));
    }

    #[test]
    fn string_in_and_not_empty_conditions() {
        let mut conf = Conf::default();
        conf.mode = "edge".into();
        let checker = Checker::yaml(&conf);
        let known = checker.string_in(&conf.mode, &["edge", "core"]);
        assert!(known.evaluate());
        assert_eq!(known.describe(), "mode is contained in [edge, core]");
        let named = checker.string_not_empty(&conf.name);
        assert!(!named.evaluate());
        assert_eq!(named.describe(), "name is not empty");
        assert!(checker.is_empty());
    }

    #[test]
    fn int_equals_condition() {
        let mut conf = Conf::default();
        conf.workers = 4;
        let checker = Checker::yaml(&conf);
        let four = checker.int_equals(&conf.workers, 4);
        assert!(four.evaluate());
        assert_eq!(four.describe(), "workers=4");
    }

    #[test]
    fn enum_optional_accepts_empty_and_members() {
        let conf = Conf::default();
        let mut checker = Checker::yaml(&conf);
        checker.enum_optional(&conf.db.driver, &["postgres", "sqlite"], "sqlite");
        assert_eq!(checker.verify(), Ok(()));

        let mut conf = Conf::default();
        conf.db.driver = "mysql".into();
        let mut checker = Checker::yaml(&conf);
        checker.enum_optional(&conf.db.driver, &["postgres", "sqlite"], "sqlite");
        assert_eq!(
            messages(&checker),
            ["value of db.driver must be in [postgres, sqlite]"]
        );
    }

    #[test]
    fn enum_mandatory_renders_both_clauses() {
        let conf = Conf::default();
        let mut checker = Checker::yaml(&conf);
        checker.enum_mandatory(&conf.db.driver, &["postgres"]);
        assert_eq!(
            messages(&checker),
            ["db.driver is mandatory and value of db.driver must be in [postgres]"]
        );
    }

    #[test]
    fn enum_mandatory_when_checks_membership_even_when_inactive() {
        let mut conf = Conf::default();
        conf.db.driver = "mysql".into();
        let mut checker = Checker::yaml(&conf);
        let debug = checker.bool_equals(&conf.debug, true);
        checker.enum_mandatory_when(&conf.db.driver, &["postgres"], debug);
        assert_eq!(
            messages(&checker),
            ["db.driver is mandatory when debug=true and value of db.driver must be in [postgres]"]
        );
    }

    #[test]
    fn enum_mandatory_when_inactive_and_empty_passes() {
        let conf = Conf::default();
        let mut checker = Checker::yaml(&conf);
        let debug = checker.bool_equals(&conf.debug, true);
        checker.enum_mandatory_when(&conf.db.driver, &["postgres"], debug);
        assert_eq!(checker.verify(), Ok(()));
    }

    #[test]
    fn int_mandatory_when_message() {
        let mut conf = Conf::default();
        conf.workers = INT_UNSET;
        conf.mode = "cluster".into();
        let mut checker = Checker::yaml(&conf);
        let clustered = checker.string_equals(&conf.mode, "cluster");
        checker.int_mandatory_when(&conf.workers, clustered);
        assert_eq!(messages(&checker), ["workers is mandatory when mode=cluster"]);
    }

    #[test]
    fn foreign_reference_falls_back_to_value() {
        let conf = Conf::default();
        let local = INT_UNSET;
        let mut checker = Checker::yaml(&conf);
        checker.int_mandatory(&local);
        assert_eq!(messages(&checker), ["entry holding value -1 is mandatory"]);
    }

    #[test]
    fn add_condition_and_aliases() {
        let conf = Conf::default();
        let mut checker = Checker::yaml(&conf);
        checker.add_condition(|| false, || "custom".to_string());
        checker.string_condition(|| true, || "never".to_string());
        checker.int_condition(|| false, || "limit".to_string());
        assert_eq!(checker.len(), 3);
        assert_eq!(messages(&checker), ["custom", "limit"]);
    }

    #[test]
    fn custom_verifier_may_report_many_messages() {
        struct Pair;
        impl Verifier for Pair {
            fn verify(&self) -> Result<(), Vec<String>> {
                Err(vec!["first".into(), "second".into()])
            }
        }
        let conf = Conf::default();
        let mut checker = Checker::yaml(&conf);
        checker.add_verifier(Pair);
        assert_eq!(messages(&checker), ["first", "second"]);
    }

    #[test]
    fn debug_reports_rule_count() {
        let conf = Conf::default();
        let mut checker = Checker::yaml(&conf);
        checker.string_mandatory(&conf.name);
        assert_eq!(
            format!("{checker:?}"),
            r#"Checker { scheme: TagScheme { key: "yaml", separator: "." }, rules: 1 }"#
        );
    }
}
