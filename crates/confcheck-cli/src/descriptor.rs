//! # Service Descriptor
//!
//! The configuration document validated by the `confcheck` binary: a
//! service's identity, listener, TLS, database, and optional cache settings.
//! Field names in the document are the serde names below; the same names
//! are declared as `yaml` and `json` tags so violations point at the key the
//! operator wrote.
//!
//! Integers where "not configured" must differ from `0` start out as
//! [`INT_UNSET`] through the `Default` impls, which `#[serde(default)]`
//! uses for missing keys.

use std::time::Duration;

use confcheck_core::{
    impl_tagged, set_default_duration, set_default_float, set_default_int, set_default_string,
    set_default_u16, set_default_uint, unset_int, INT_UNSET,
};
use confcheck_rules::{Checker, RuleError};
use serde::{Deserialize, Deserializer};

/// Service names: lower-case, digits and dashes, starting with a letter.
pub const NAME_PATTERN: &str = "^[a-z][a-z0-9-]{0,62}$";
/// Deployment environments.
pub const ENVIRONMENTS: &[&str] = &["development", "staging", "production"];
/// Accepted log levels.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
/// Log level applied when none is configured.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Supported database drivers.
pub const DRIVERS: &[&str] = &["postgres", "sqlite"];
/// Supported cache backends.
pub const CACHE_BACKENDS: &[&str] = &["memory", "redis"];
/// Cache backend applied when none is configured.
pub const DEFAULT_CACHE_BACKEND: &str = "memory";

/// Root of a service configuration document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServiceDescriptor {
    pub name: String,
    pub environment: String,
    pub log_level: String,
    pub listen: ListenConfig,
    pub tls: TlsConfig,
    pub database: DatabaseConfig,
    pub cache: Option<CacheConfig>,
}

/// Listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListenConfig {
    pub address: String,
    pub port: u16,
    pub workers: i64,
    #[serde(rename = "request_timeout_ms", deserialize_with = "millis")]
    pub request_timeout: Duration,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: String::new(),
            port: 0,
            workers: unset_int(),
            request_timeout: Duration::ZERO,
        }
    }
}

/// TLS termination settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TlsConfig {
    pub enabled: bool,
    pub cert_file: String,
    pub key_file: String,
}

/// Database connection settings. Exactly one of `url` and `host` is set.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub driver: String,
    pub url: String,
    pub host: String,
    pub pool_size: i64,
    pub connect_retries: i64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            driver: String::new(),
            url: String::new(),
            host: String::new(),
            pool_size: unset_int(),
            connect_retries: 0,
        }
    }
}

/// Optional cache settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub backend: String,
    pub url: String,
    pub ttl_secs: u64,
    pub eviction_ratio: f64,
}

impl_tagged!(ServiceDescriptor {
    scalar name ["yaml" = "name", "json" = "name"],
    scalar environment ["yaml" = "environment", "json" = "environment"],
    scalar log_level ["yaml" = "log_level,omitempty", "json" = "log_level,omitempty"],
    nested listen ["yaml" = "listen", "json" = "listen"],
    nested tls ["yaml" = "tls", "json" = "tls"],
    nested database ["yaml" = "database", "json" = "database"],
    nested cache ["yaml" = "cache,omitempty", "json" = "cache,omitempty"],
});

impl_tagged!(ListenConfig {
    scalar address ["yaml" = "address", "json" = "address"],
    scalar port ["yaml" = "port", "json" = "port"],
    scalar workers ["yaml" = "workers", "json" = "workers"],
    scalar request_timeout ["yaml" = "request_timeout_ms", "json" = "request_timeout_ms"],
});

impl_tagged!(TlsConfig {
    scalar enabled ["yaml" = "enabled", "json" = "enabled"],
    scalar cert_file ["yaml" = "cert_file", "json" = "cert_file"],
    scalar key_file ["yaml" = "key_file", "json" = "key_file"],
});

impl_tagged!(DatabaseConfig {
    scalar driver ["yaml" = "driver", "json" = "driver"],
    scalar url ["yaml" = "url,omitempty", "json" = "url,omitempty"],
    scalar host ["yaml" = "host,omitempty", "json" = "host,omitempty"],
    scalar pool_size ["yaml" = "pool_size", "json" = "pool_size"],
    scalar connect_retries ["yaml" = "connect_retries", "json" = "connect_retries"],
});

impl_tagged!(CacheConfig {
    scalar backend ["yaml" = "backend", "json" = "backend"],
    scalar url ["yaml" = "url", "json" = "url"],
    scalar ttl_secs ["yaml" = "ttl_secs", "json" = "ttl_secs"],
    scalar eviction_ratio ["yaml" = "eviction_ratio", "json" = "eviction_ratio"],
});

impl ServiceDescriptor {
    /// Fill zero-valued fields that have a default.
    pub fn apply_defaults(&mut self) {
        set_default_string(&mut self.log_level, DEFAULT_LOG_LEVEL);
        set_default_string(&mut self.listen.address, "0.0.0.0");
        set_default_u16(&mut self.listen.port, 8080);
        set_default_duration(&mut self.listen.request_timeout, Duration::from_secs(30));
        set_default_int(&mut self.database.connect_retries, 3);
        if let Some(cache) = self.cache.as_mut() {
            set_default_string(&mut cache.backend, DEFAULT_CACHE_BACKEND);
            set_default_uint(&mut cache.ttl_secs, 300);
            set_default_float(&mut cache.eviction_ratio, 0.1);
        }
    }

    /// Register this descriptor's rules on a checker bound to it.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError`] if a pattern rule fails to compile.
    pub fn register_rules<'a>(&'a self, checker: &mut Checker<'a, Self>) -> Result<(), RuleError> {
        checker.string_mandatory(&self.name);
        checker.string_pattern(&self.name, NAME_PATTERN)?;
        checker.enum_mandatory(&self.environment, ENVIRONMENTS);
        checker.enum_optional(&self.log_level, LOG_LEVELS, DEFAULT_LOG_LEVEL);
        checker.int_mandatory(&self.listen.workers);

        let tls_on = checker.bool_equals(&self.tls.enabled, true);
        checker.string_mandatory_when(&self.tls.cert_file, tls_on.clone());
        checker.string_mandatory_when(&self.tls.key_file, tls_on.clone());

        let production = checker.string_equals(&self.environment, "production");
        let (required, trigger) = (tls_on.clone(), production.clone());
        checker.add_condition(
            move || tls_on.evaluate() || !production.evaluate(),
            move || format!("{} when {}", required.describe(), trigger.describe()),
        );

        checker.enum_mandatory(&self.database.driver, DRIVERS);
        checker.string_xor(&self.database.url, &self.database.host);
        let production = checker.string_equals(&self.environment, "production");
        checker.int_mandatory_when(&self.database.pool_size, production);

        if let Some(cache) = &self.cache {
            checker.enum_optional(&cache.backend, CACHE_BACKENDS, DEFAULT_CACHE_BACKEND);
            let redis = checker.string_equals(&cache.backend, "redis");
            checker.string_mandatory_when(&cache.url, redis);
        }
        Ok(())
    }

    /// Whether every sentinel-initialized integer was configured.
    pub fn integers_configured(&self) -> bool {
        self.listen.workers != INT_UNSET && self.database.pool_size != INT_UNSET
    }
}

fn millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    u64::deserialize(deserializer).map(Duration::from_millis)
}
