//! # Tag Naming Schemes
//!
//! A [`TagScheme`] pairs the key under which a field's serialization tag is
//! declared (for example `yaml` or `json`) with the separator used to join
//! nested tags into a display path. A scheme is fixed for the lifetime of a
//! resolver or checker.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Immutable (tag key, path separator) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TagScheme {
    key: &'static str,
    separator: &'static str,
}

impl TagScheme {
    /// Tags declared under `yaml`, joined with `.`.
    pub const YAML: TagScheme = TagScheme::new("yaml", ".");

    /// Tags declared under `json`, joined with `.`.
    pub const JSON: TagScheme = TagScheme::new("json", ".");

    /// Presets accepted by [`FromStr`].
    pub const PRESETS: [TagScheme; 2] = [TagScheme::YAML, TagScheme::JSON];

    /// Build an arbitrary scheme.
    pub const fn new(key: &'static str, separator: &'static str) -> Self {
        Self { key, separator }
    }

    /// The key under which tags are looked up.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// The separator placed between path components.
    pub fn separator(&self) -> &'static str {
        self.separator
    }

    /// Append `local` to `parent`.
    ///
    /// An empty parent yields the bare local tag, so top-level fields never
    /// carry a leading separator.
    pub fn join(&self, parent: &str, local: &str) -> String {
        if parent.is_empty() {
            local.to_string()
        } else {
            format!("{parent}{}{local}", self.separator)
        }
    }
}

impl fmt::Display for TagScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key)
    }
}

impl FromStr for TagScheme {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::PRESETS
            .into_iter()
            .find(|preset| preset.key.eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownScheme {
                name: s.to_string(),
                expected: Self::PRESETS
                    .iter()
                    .map(|p| p.key)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_differ_only_in_key() {
        assert_eq!(TagScheme::YAML.key(), "yaml");
        assert_eq!(TagScheme::JSON.key(), "json");
        assert_eq!(TagScheme::YAML.separator(), TagScheme::JSON.separator());
        assert_eq!(TagScheme::YAML.separator(), ".");
    }

    #[test]
    fn join_with_empty_parent_is_bare_tag() {
        assert_eq!(TagScheme::YAML.join("", "server"), "server");
    }

    #[test]
    fn join_nested() {
        assert_eq!(TagScheme::YAML.join("server", "port"), "server.port");
        assert_eq!(TagScheme::new("toml", "/").join("a/b", "c"), "a/b/c");
    }

    #[test]
    fn parse_presets_case_insensitive() {
        assert_eq!("yaml".parse::<TagScheme>().unwrap(), TagScheme::YAML);
        assert_eq!("JSON".parse::<TagScheme>().unwrap(), TagScheme::JSON);
    }

    #[test]
    fn parse_unknown_scheme_lists_presets() {
        let err = "toml".parse::<TagScheme>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown tag scheme 'toml'; expected one of: yaml, json"
        );
    }

    #[test]
    fn display_is_key() {
        assert_eq!(TagScheme::JSON.to_string(), "json");
    }
}
